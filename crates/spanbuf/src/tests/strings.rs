//! Length-prefixed and bare string codec behavior.

use crate::{BufferError, ByteOrder, ByteView, ByteViewMut, GrowableHeapBuffer, HeapBuffer};

#[test]
fn ascii_roundtrip_with_headers() {
    let mut buffer = GrowableHeapBuffer::new();
    let written = buffer.put_string_ascii(0, "hello").unwrap();
    assert_eq!(written, 9);
    assert_eq!(buffer.get_string_ascii(0).unwrap(), "hello");
    assert_eq!(buffer.get_i32(0), Ok(5));
}

#[test]
fn explicit_byte_order_headers() {
    let mut buffer = HeapBuffer::new(32);
    buffer
        .put_string_ascii_order(0, "abc", ByteOrder::BigEndian)
        .unwrap();
    assert_eq!(&buffer.as_bytes()[..7], &[0, 0, 0, 3, b'a', b'b', b'c']);
    assert_eq!(
        buffer
            .get_string_ascii_order(0, ByteOrder::BigEndian)
            .unwrap(),
        "abc"
    );

    buffer
        .put_string_utf8_order(8, "xyz", ByteOrder::LittleEndian)
        .unwrap();
    assert_eq!(&buffer.as_bytes()[8..15], &[3, 0, 0, 0, b'x', b'y', b'z']);
}

#[test]
fn non_ascii_characters_become_question_marks() {
    let mut buffer = HeapBuffer::new(32);
    let written = buffer.put_string_ascii(0, "héllo\u{20AC}").unwrap();
    // six characters, one byte each
    assert_eq!(written, 10);
    assert_eq!(&buffer.as_bytes()[4..10], b"h?llo?");
}

#[test]
fn utf8_payload_is_preserved() {
    let mut buffer = GrowableHeapBuffer::new();
    let text = "héllo\u{20AC} done";
    let written = buffer.put_string_utf8(0, text).unwrap();
    assert_eq!(written, 4 + text.len());
    assert_eq!(buffer.get_string_utf8(0).unwrap(), text);
}

#[test]
fn empty_string_has_no_payload() {
    let mut buffer = HeapBuffer::new(4);
    assert_eq!(buffer.put_string_ascii(0, ""), Ok(4));
    assert_eq!(buffer.get_string_ascii(0).unwrap(), "");
    assert_eq!(buffer.put_string_utf8(0, ""), Ok(4));
    assert_eq!(buffer.get_string_utf8(0).unwrap(), "");
}

#[test]
fn negative_wire_length_is_rejected() {
    let mut buffer = HeapBuffer::new(8);
    buffer.put_i32(0, -1).unwrap();
    assert_eq!(
        buffer.get_string_ascii(0),
        Err(BufferError::NegativeLength { length: -1 })
    );
    assert_eq!(
        buffer.get_string_utf8(0),
        Err(BufferError::NegativeLength { length: -1 })
    );
}

#[test]
fn header_past_payload_capacity_is_out_of_bounds() {
    let mut buffer = HeapBuffer::new(8);
    buffer.put_i32(0, 100).unwrap();
    assert!(matches!(
        buffer.get_string_ascii(0),
        Err(BufferError::OutOfBounds { .. })
    ));
}

#[test]
fn bounded_put_enforces_the_callers_limit() {
    let mut buffer = GrowableHeapBuffer::new();
    assert_eq!(buffer.put_string_utf8_bounded(0, "abcdef", 6), Ok(10));
    assert_eq!(
        buffer.put_string_utf8_bounded(0, "abcdefg", 6),
        Err(BufferError::SizeExceeded { length: 7, max: 6 })
    );
    // multi-byte characters count by encoded length
    assert_eq!(
        buffer.put_string_utf8_bounded(0, "\u{20AC}\u{20AC}", 5),
        Err(BufferError::SizeExceeded { length: 6, max: 5 })
    );
}

#[test]
fn without_length_forms_take_exact_byte_counts() {
    let mut buffer = HeapBuffer::new(16);
    let written = buffer.put_string_ascii_without_length(3, "abc").unwrap();
    assert_eq!(written, 3);
    assert_eq!(
        buffer.get_string_ascii_without_length(3, 3).unwrap(),
        "abc"
    );
    let written = buffer.put_string_utf8_without_length(8, "dé").unwrap();
    assert_eq!(written, 3);
    assert_eq!(buffer.get_string_utf8_without_length(8, 3).unwrap(), "dé");
}

#[test]
fn read_side_widens_high_bytes() {
    let mut buffer = HeapBuffer::new(8);
    buffer.put_i32(0, 2).unwrap();
    buffer.put_u8(4, 0xE9).unwrap(); // é in Latin-1
    buffer.put_u8(5, b'x').unwrap();
    assert_eq!(buffer.get_string_ascii(0).unwrap(), "éx");
}
