use bytes::Bytes;
use chunkstream::source::ChunkedSource;
use chunkstream::{BinaryStream, StreamErrorKind, WindowedStream};

/// Chunk size 4, chunks [0,1,2,3] [4,5,6,7] [8,9], total length 10.
fn ten_byte_source() -> ChunkedSource {
    let chunks = vec![
        Bytes::from_static(&[0, 1, 2, 3]),
        Bytes::from_static(&[4, 5, 6, 7]),
        Bytes::from_static(&[8, 9]),
    ];
    ChunkedSource::new(chunks, 4, 10).unwrap()
}

#[test]
fn test_walkthrough() {
    let mut stream = WindowedStream::new(ten_byte_source());
    assert_eq!(stream.length(), 10);

    assert_eq!(stream.read(Some(3)).unwrap().as_ref(), &[0, 1, 2]);
    assert_eq!(stream.position(), 3);

    assert_eq!(stream.peek(Some(2)).unwrap().as_ref(), &[3, 4]);
    assert_eq!(stream.position(), 3);

    assert_eq!(stream.read(Some(2)).unwrap().as_ref(), &[3, 4]);
    assert_eq!(stream.position(), 5);

    let mut child = stream.stream(3).unwrap();
    assert_eq!(stream.position(), 8);
    assert_eq!(child.length(), 3);
    assert_eq!(child.read(None).unwrap().as_ref(), &[5, 6, 7]);

    assert_eq!(stream.read(None).unwrap().as_ref(), &[8, 9]);

    let err = stream.read(Some(1)).unwrap_err();
    assert_eq!(err.kind(), &StreamErrorKind::OutOfRange { missing: 1 });
}

#[test]
fn test_walkthrough_with_tiny_window() {
    let mut stream = WindowedStream::with_max_window(ten_byte_source(), 2);

    // Reads of two or more bytes bypass the window here
    assert_eq!(stream.read(Some(3)).unwrap().as_ref(), &[0, 1, 2]);
    assert_eq!(stream.peek(Some(2)).unwrap().as_ref(), &[3, 4]);
    assert_eq!(stream.byte().unwrap(), 3);
    assert_eq!(stream.byte().unwrap(), 4);

    let mut child = stream.stream(3).unwrap();
    assert_eq!(child.byte().unwrap(), 5);
    assert_eq!(child.byte().unwrap(), 6);
    assert_eq!(child.byte().unwrap(), 7);
    assert!(child.is_eof());

    assert_eq!(stream.read(None).unwrap().as_ref(), &[8, 9]);
}

#[test]
fn test_read_past_end_reports_deficit() {
    let mut stream = WindowedStream::new(ten_byte_source());
    stream.skip(6).unwrap();
    let err = stream.read(Some(7)).unwrap_err();
    assert_eq!(err.missing_bytes(), Some(3));
    assert_eq!(err.position(), 6);
    assert!(err.to_string().contains("Expected 3 more bytes"));
}

#[test]
fn test_peek_past_end_reports_deficit() {
    let mut stream = WindowedStream::new(ten_byte_source());
    stream.seek(-1);
    let err = stream.peek(Some(5)).unwrap_err();
    assert_eq!(err.missing_bytes(), Some(4));
}

#[test]
fn test_peek_rest_keeps_position() {
    let mut stream = WindowedStream::with_max_window(ten_byte_source(), 3);
    stream.seek(4);
    assert_eq!(stream.peek(None).unwrap().as_ref(), &[4, 5, 6, 7, 8, 9]);
    assert_eq!(stream.position(), 4);

    stream.seek(10);
    assert!(stream.peek(None).unwrap().is_empty());

    stream.seek(12);
    let err = stream.peek(None).unwrap_err();
    assert_eq!(err.missing_bytes(), Some(2));
    assert_eq!(err.position(), 12);
}

#[test]
fn test_skip_past_end() {
    let mut stream = WindowedStream::new(ten_byte_source());
    stream.skip(10).unwrap();
    assert!(stream.is_eof());

    let err = stream.skip(2).unwrap_err();
    assert_eq!(err.missing_bytes(), Some(2));
}

#[test]
fn test_sub_stream_past_end() {
    let mut stream = WindowedStream::new(ten_byte_source());
    stream.skip(8).unwrap();
    let err = stream.stream(5).unwrap_err();
    assert_eq!(err.missing_bytes(), Some(3));
}

#[test]
fn test_byte_at_end() {
    let mut stream = WindowedStream::new(ten_byte_source());
    stream.seek(-1);
    assert_eq!(stream.byte().unwrap(), 9);
    assert_eq!(stream.byte().unwrap_err().missing_bytes(), Some(1));
}

#[test]
fn test_sub_stream_cannot_read_beyond_its_view() {
    let mut stream = WindowedStream::new(ten_byte_source());
    stream.skip(2).unwrap();
    let mut child = stream.stream(4).unwrap();

    assert_eq!(child.read(Some(3)).unwrap().as_ref(), &[2, 3, 4]);
    let err = child.read(Some(2)).unwrap_err();
    assert_eq!(err.missing_bytes(), Some(1));

    // The parent continues after the child's range
    assert_eq!(stream.byte().unwrap(), 6);
}

#[test]
fn test_nested_sub_streams() {
    let mut stream = WindowedStream::with_max_window(ten_byte_source(), 3);
    stream.skip(1).unwrap();
    let mut outer = stream.stream(8).unwrap();
    outer.skip(2).unwrap();
    let mut inner = outer.stream(4).unwrap();

    assert_eq!(inner.start(), 3);
    assert_eq!(inner.read(None).unwrap().as_ref(), &[3, 4, 5, 6]);
    assert_eq!(outer.read(None).unwrap().as_ref(), &[7, 8]);
    assert_eq!(stream.read(None).unwrap().as_ref(), &[9]);
}

#[test]
fn test_seek_within_sub_stream_is_relative() {
    let mut stream = WindowedStream::new(ten_byte_source());
    stream.skip(4).unwrap();
    let mut child = stream.stream(5).unwrap();

    child.seek(-2);
    assert_eq!(child.position(), 3);
    assert_eq!(child.read(None).unwrap().as_ref(), &[7, 8]);

    child.seek(0);
    assert_eq!(child.byte().unwrap(), 4);
}

#[test]
fn test_logical_length_shorter_than_chunks() {
    let chunks = vec![Bytes::from_static(&[0, 1, 2, 3]), Bytes::from_static(&[4, 5, 6, 7])];
    let source = ChunkedSource::new(chunks, 4, 6).unwrap();
    let mut stream = WindowedStream::new(source);

    assert_eq!(stream.read(None).unwrap().as_ref(), &[0, 1, 2, 3, 4, 5]);
    assert_eq!(stream.byte().unwrap_err().missing_bytes(), Some(1));
}

#[test]
fn test_read_array() {
    let mut stream = WindowedStream::new(ten_byte_source());
    stream.skip(2).unwrap();
    let value = u32::from_le_bytes(stream.read_array().unwrap());
    assert_eq!(value, u32::from_le_bytes([2, 3, 4, 5]));
    assert_eq!(stream.remaining(), 4);
}

#[test]
fn test_streams_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ChunkedSource>();
    assert_send_sync::<WindowedStream>();
}

#[test]
fn test_sub_streams_on_other_threads() {
    let data: Vec<u8> = (0..=255).collect();
    let source = ChunkedSource::from_bytes(data, 16).unwrap();
    let mut stream = WindowedStream::with_max_window(source, 32);

    let parts: Vec<WindowedStream> = (0..4).map(|_| stream.stream(64).unwrap()).collect();
    let handles: Vec<_> = parts
        .into_iter()
        .map(|mut part| std::thread::spawn(move || part.read(None).unwrap()))
        .collect();

    for (index, handle) in handles.into_iter().enumerate() {
        let bytes = handle.join().unwrap();
        let expected: Vec<u8> = (index * 64..(index + 1) * 64).map(|b| b as u8).collect();
        assert_eq!(bytes.as_ref(), expected.as_slice());
    }
}
