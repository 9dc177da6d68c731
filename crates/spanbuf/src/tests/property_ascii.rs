//! Properties of the integer ASCII codec against the standard library's
//! formatter and parser.

use alloc::string::ToString;

use quickcheck::QuickCheck;

use crate::{ByteView, ByteViewMut, GrowableHeapBuffer, HeapBuffer, ascii};

fn test_count() -> u64 {
    if is_ci::cached() { 10_000 } else { 1_000 }
}

#[test]
fn u64_format_matches_display_and_reparses() {
    fn prop(value: u64) -> bool {
        let mut buffer = GrowableHeapBuffer::new();
        let written = buffer.put_u64_ascii(0, value).unwrap();
        let expected = value.to_string();
        &buffer.as_bytes()[..written] == expected.as_bytes()
            && buffer.parse_u64_ascii(0, written) == Ok(value)
    }
    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(u64) -> bool);
}

#[test]
fn i64_format_matches_display_and_reparses() {
    fn prop(value: i64) -> bool {
        let mut buffer = GrowableHeapBuffer::new();
        let written = buffer.put_i64_ascii(0, value).unwrap();
        let expected = value.to_string();
        &buffer.as_bytes()[..written] == expected.as_bytes()
            && buffer.parse_i64_ascii(0, written) == Ok(value)
    }
    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(i64) -> bool);
}

#[test]
fn i32_format_matches_display_and_reparses() {
    fn prop(value: i32) -> bool {
        let mut buffer = HeapBuffer::new(16);
        let written = buffer.put_i32_ascii(0, value).unwrap();
        buffer.parse_i32_ascii(0, written) == Ok(value)
            && &buffer.as_bytes()[..written] == value.to_string().as_bytes()
    }
    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(i32) -> bool);
}

#[test]
fn parse_agrees_with_std_on_canonical_text() {
    fn prop(value: u64) -> bool {
        let text = value.to_string();
        ascii::parse_u64(text.as_bytes()) == Ok(value)
    }
    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(u64) -> bool);
}

#[test]
fn digit_count_agrees_with_display_length() {
    fn prop(value: u64) -> bool {
        ascii::digit_count_u64(value) == value.to_string().len()
    }
    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(u64) -> bool);
}

#[test]
fn batched_and_scalar_parsing_agree() {
    // arbitrary digit strings of arbitrary length, including ones long
    // enough to take the 8- and 4-digit batched paths several times
    fn prop(digits: alloc::vec::Vec<u8>) -> bool {
        let text: alloc::vec::Vec<u8> = digits.iter().map(|d| b'0' + d % 10).collect();
        if text.is_empty() || text.len() > 19 {
            return true;
        }
        let scalar = text
            .iter()
            .fold(0u64, |acc, &b| acc * 10 + u64::from(b - b'0'));
        ascii::parse_u64(&text) == Ok(scalar)
    }
    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(alloc::vec::Vec<u8>) -> bool);
}

#[test]
fn fixed_point_samples() {
    let mut buffer = GrowableHeapBuffer::new();
    // writing the natural int 12345 at index 0 returns 5 and yields "12345"
    assert_eq!(buffer.put_u32_ascii(0, 12345), Ok(5));
    assert_eq!(&buffer.as_bytes()[..5], b"12345");
    // INT_MIN via the signed formatter returns 11 and the literal bytes
    assert_eq!(buffer.put_i32_ascii(0, i32::MIN), Ok(11));
    assert_eq!(&buffer.as_bytes()[..11], b"-2147483648");
}

#[test]
fn extreme_values_roundtrip_through_buffers() {
    let mut buffer = GrowableHeapBuffer::new();
    for value in [0i64, 1, -1, i64::from(i32::MIN), i64::from(i32::MAX), i64::MIN, i64::MAX] {
        let written = buffer.put_i64_ascii(0, value).unwrap();
        assert_eq!(buffer.parse_i64_ascii(0, written), Ok(value), "{value}");
    }
}

#[test]
fn overflow_surfaces_through_the_view() {
    let mut buffer = GrowableHeapBuffer::new();
    let written = buffer.put_u64_ascii(0, u64::from(u32::MAX) + 1).unwrap();
    assert!(matches!(
        buffer.parse_u32_ascii(0, written),
        Err(crate::AsciiError::Overflow { .. })
    ));
    assert_eq!(
        buffer.parse_u64_ascii(0, written),
        Ok(u64::from(u32::MAX) + 1)
    );
}

#[test]
fn padded_put_through_the_view() {
    let mut buffer = HeapBuffer::new(8);
    assert_eq!(buffer.put_u32_ascii_padded(0, 8, 42), Ok(8));
    assert_eq!(buffer.as_bytes(), b"00000042");
    assert!(matches!(
        buffer.put_u32_ascii_padded(0, 3, 12345),
        Err(crate::AsciiError::DoesNotFit { .. })
    ));
}

#[test]
fn from_end_put_through_the_view() {
    let mut buffer = HeapBuffer::new(10);
    buffer.set_memory(0, 10, b'.').unwrap();
    let start = buffer.put_u32_ascii_from_end(987, 10).unwrap();
    assert_eq!(start, 7);
    assert_eq!(buffer.as_bytes(), b".......987");
    assert!(buffer.put_u32_ascii_from_end(987, 2).is_err());
    assert!(buffer.put_u32_ascii_from_end(1, 11).is_err());
}
