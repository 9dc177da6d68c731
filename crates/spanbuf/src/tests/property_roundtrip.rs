//! Property: every primitive type round-trips through every buffer variant
//! in every byte order.

use quickcheck::QuickCheck;

use crate::{
    ByteOrder, ByteView, ByteViewMut, GrowableHeapBuffer, GrowableNativeBuffer, HeapBuffer,
    NativeBuffer,
};

fn test_count() -> u64 {
    if is_ci::cached() { 10_000 } else { 1_000 }
}

/// One round-trip property per primitive type: native, little, big, and
/// runtime-selected orders must all reproduce the written value at an
/// arbitrary valid index.
macro_rules! roundtrip_property {
    ($ty:ty, $get:ident, $get_le:ident, $get_be:ident, $get_order:ident,
     $put:ident, $put_le:ident, $put_be:ident, $put_order:ident) => {
        paste::paste! {
            #[test]
            fn [<roundtrip_ $ty>]() {
                fn prop(value: $ty, index: u8) -> bool {
                    let index = usize::from(index);
                    let mut buffer = HeapBuffer::new(256 + core::mem::size_of::<$ty>());
                    buffer.$put(index, value).unwrap();
                    if buffer.$get(index) != Ok(value) {
                        return false;
                    }
                    buffer.$put_le(index, value).unwrap();
                    if buffer.$get_le(index) != Ok(value) {
                        return false;
                    }
                    buffer.$put_be(index, value).unwrap();
                    if buffer.$get_be(index) != Ok(value) {
                        return false;
                    }
                    for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
                        buffer.$put_order(index, value, order).unwrap();
                        if buffer.$get_order(index, order) != Ok(value) {
                            return false;
                        }
                    }
                    true
                }
                QuickCheck::new()
                    .tests(test_count())
                    .quickcheck(prop as fn($ty, u8) -> bool);
            }
        }
    };
}

roundtrip_property!(u16, get_u16, get_u16_le, get_u16_be, get_u16_order, put_u16, put_u16_le, put_u16_be, put_u16_order);
roundtrip_property!(i16, get_i16, get_i16_le, get_i16_be, get_i16_order, put_i16, put_i16_le, put_i16_be, put_i16_order);
roundtrip_property!(u32, get_u32, get_u32_le, get_u32_be, get_u32_order, put_u32, put_u32_le, put_u32_be, put_u32_order);
roundtrip_property!(i32, get_i32, get_i32_le, get_i32_be, get_i32_order, put_i32, put_i32_le, put_i32_be, put_i32_order);
roundtrip_property!(u64, get_u64, get_u64_le, get_u64_be, get_u64_order, put_u64, put_u64_le, put_u64_be, put_u64_order);
roundtrip_property!(i64, get_i64, get_i64_le, get_i64_be, get_i64_order, put_i64, put_i64_le, put_i64_be, put_i64_order);
// Floats are compared by bit pattern so NaN payloads count as equal.
#[test]
fn roundtrip_f32_bits() {
    fn prop(bits: u32, index: u8) -> bool {
        let index = usize::from(index);
        let value = f32::from_bits(bits);
        let mut buffer = HeapBuffer::new(260);
        buffer.put_f32(index, value).unwrap();
        if buffer.get_f32(index).unwrap().to_bits() != bits {
            return false;
        }
        buffer.put_f32_be(index, value).unwrap();
        buffer.get_f32_be(index).unwrap().to_bits() == bits
    }
    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(u32, u8) -> bool);
}

#[test]
fn roundtrip_f64_bits() {
    fn prop(bits: u64, index: u8) -> bool {
        let index = usize::from(index);
        let value = f64::from_bits(bits);
        let mut buffer = HeapBuffer::new(264);
        buffer.put_f64(index, value).unwrap();
        if buffer.get_f64(index).unwrap().to_bits() != bits {
            return false;
        }
        buffer.put_f64_le(index, value).unwrap();
        buffer.get_f64_le(index).unwrap().to_bits() == bits
    }
    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(u64, u8) -> bool);
}

#[test]
fn roundtrip_u8_across_variants() {
    fn prop(value: u8, index: u8) -> bool {
        let index = usize::from(index);
        let mut heap = HeapBuffer::new(257);
        let mut native = NativeBuffer::new(257);
        let mut growable_heap = GrowableHeapBuffer::new();
        let mut growable_native = GrowableNativeBuffer::new();
        heap.put_u8(index, value).unwrap();
        native.put_u8(index, value).unwrap();
        growable_heap.put_u8(index, value).unwrap();
        growable_native.put_u8(index, value).unwrap();
        heap.get_u8(index) == Ok(value)
            && native.get_u8(index) == Ok(value)
            && growable_heap.get_u8(index) == Ok(value)
            && growable_native.get_u8(index) == Ok(value)
    }
    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(u8, u8) -> bool);
}

#[test]
fn foreign_order_is_a_byte_swap() {
    fn prop(value: u64, index: u8) -> bool {
        let index = usize::from(index);
        let mut buffer = NativeBuffer::new(300);
        buffer.put_u64_le(index, value).unwrap();
        let little = buffer.get_u64_be(index).unwrap();
        little == value.swap_bytes()
    }
    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(u64, u8) -> bool);
}

#[test]
fn nan_payload_survives_typed_access() {
    let mut buffer = HeapBuffer::new(8);
    let weird_nan = f64::from_bits(0x7FF8_0000_0000_1234);
    buffer.put_f64(0, weird_nan).unwrap();
    assert_eq!(buffer.get_f64(0).unwrap().to_bits(), weird_nan.to_bits());
}
