#![no_main]

use libfuzzer_sys::fuzz_target;
use spanbuf::{ByteView, ByteViewMut, HeapBuffer};

// Round-trip every bit pattern: format must never panic, always emit plain
// decimal text, and re-parsing must recover the exact value.
fuzz_target!(|bits: u64| {
    let value = f64::from_bits(bits);
    let mut buffer = HeapBuffer::new(512);
    let length = buffer.put_f64_ascii(0, value).unwrap();

    let text = buffer.get_string_ascii_without_length(0, length).unwrap();
    assert!(!text.contains(['e', 'E']), "scientific notation in {text:?}");

    let reparsed: f64 = text.parse().unwrap();
    if value.is_nan() {
        assert!(reparsed.is_nan());
    } else {
        assert_eq!(reparsed.to_bits(), value.to_bits(), "{text:?}");
    }
});
