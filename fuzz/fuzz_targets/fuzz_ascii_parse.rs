#![no_main]

use libfuzzer_sys::fuzz_target;
use spanbuf::{ByteView, HeapBuffer};

// The parsers must never panic on arbitrary bytes, and whenever they accept
// an input the standard library's parser must agree on the value.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() || data.len() > 64 {
        return;
    }
    let buffer = HeapBuffer::from_slice(data);
    let length = data.len();

    if let Ok(value) = buffer.parse_u64_ascii(0, length) {
        let text = core::str::from_utf8(data).expect("accepted input is ASCII");
        assert_eq!(text.parse::<u64>().ok(), Some(value));
    }
    if let Ok(value) = buffer.parse_u32_ascii(0, length) {
        let text = core::str::from_utf8(data).expect("accepted input is ASCII");
        assert_eq!(text.parse::<u32>().ok(), Some(value));
    }
    if let Ok(value) = buffer.parse_i64_ascii(0, length) {
        let text = core::str::from_utf8(data).expect("accepted input is ASCII");
        assert_eq!(text.parse::<i64>().ok(), Some(value));
    }
    if let Ok(value) = buffer.parse_i32_ascii(0, length) {
        let text = core::str::from_utf8(data).expect("accepted input is ASCII");
        assert_eq!(text.parse::<i32>().ok(), Some(value));
    }

    // arbitrary sub-ranges must bounds-check rather than slice-panic
    let mid = length / 2;
    let _ = buffer.parse_u64_ascii(mid, length);
});
