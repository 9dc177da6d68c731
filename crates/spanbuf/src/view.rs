//! The buffer capability contract.
//!
//! [`ByteView`] is the read side, [`ByteViewMut`] the write side, and
//! [`AtomicByteView`] the restricted atomic accessor family of the
//! pointer-backed variants. Implementors supply only how raw bytes are
//! reached; every typed, string, and numeric-text operation is a provided
//! method shared by all backings, so content semantics (equality, ordering,
//! hashing) are identical across storage media.

use alloc::string::String;
use core::{
    cmp::Ordering,
    sync::atomic::{self, AtomicI32, AtomicI64},
};

use crate::{
    ascii,
    bounds::{check_bounds, wire_length},
    error::{AsciiError, BufferError},
    order::ByteOrder,
};

macro_rules! view_get {
    ($ty:ty, $get:ident, $get_le:ident, $get_be:ident, $get_order:ident, $get_unchecked:ident) => {
        #[doc = concat!("Reads a `", stringify!($ty), "` at `index` in native byte order.")]
        ///
        /// # Errors
        ///
        /// [`BufferError::OutOfBounds`] when the access lies outside the capacity.
        fn $get(&self, index: usize) -> Result<$ty, BufferError> {
            const SIZE: usize = core::mem::size_of::<$ty>();
            check_bounds(index, SIZE, self.capacity())?;
            let mut raw = [0u8; SIZE];
            raw.copy_from_slice(&self.as_bytes()[index..index + SIZE]);
            Ok(<$ty>::from_ne_bytes(raw))
        }

        #[doc = concat!("Reads a little-endian `", stringify!($ty), "` at `index`.")]
        ///
        /// # Errors
        ///
        /// [`BufferError::OutOfBounds`] when the access lies outside the capacity.
        fn $get_le(&self, index: usize) -> Result<$ty, BufferError> {
            const SIZE: usize = core::mem::size_of::<$ty>();
            check_bounds(index, SIZE, self.capacity())?;
            let mut raw = [0u8; SIZE];
            raw.copy_from_slice(&self.as_bytes()[index..index + SIZE]);
            Ok(<$ty>::from_le_bytes(raw))
        }

        #[doc = concat!("Reads a big-endian `", stringify!($ty), "` at `index`.")]
        ///
        /// # Errors
        ///
        /// [`BufferError::OutOfBounds`] when the access lies outside the capacity.
        fn $get_be(&self, index: usize) -> Result<$ty, BufferError> {
            const SIZE: usize = core::mem::size_of::<$ty>();
            check_bounds(index, SIZE, self.capacity())?;
            let mut raw = [0u8; SIZE];
            raw.copy_from_slice(&self.as_bytes()[index..index + SIZE]);
            Ok(<$ty>::from_be_bytes(raw))
        }

        #[doc = concat!("Reads a `", stringify!($ty), "` at `index` in the requested byte order.")]
        ///
        /// # Errors
        ///
        /// [`BufferError::OutOfBounds`] when the access lies outside the capacity.
        fn $get_order(&self, index: usize, order: ByteOrder) -> Result<$ty, BufferError> {
            match order {
                ByteOrder::LittleEndian => self.$get_le(index),
                ByteOrder::BigEndian => self.$get_be(index),
            }
        }

        #[doc = concat!("Reads a native-order `", stringify!($ty), "` at `index` without bounds checking.")]
        ///
        /// # Safety
        ///
        #[doc = concat!("`index + size_of::<", stringify!($ty), ">()` must not exceed `capacity()`.")]
        unsafe fn $get_unchecked(&self, index: usize) -> $ty {
            const SIZE: usize = core::mem::size_of::<$ty>();
            let mut raw = [0u8; SIZE];
            // SAFETY: caller guarantees the range is in bounds.
            unsafe {
                core::ptr::copy_nonoverlapping(
                    self.as_bytes().as_ptr().add(index),
                    raw.as_mut_ptr(),
                    SIZE,
                );
            }
            <$ty>::from_ne_bytes(raw)
        }
    };
}

macro_rules! view_put {
    ($ty:ty, $put:ident, $put_le:ident, $put_be:ident, $put_order:ident, $put_unchecked:ident) => {
        #[doc = concat!("Writes a `", stringify!($ty), "` at `index` in native byte order.")]
        ///
        /// # Errors
        ///
        /// [`BufferError::OutOfBounds`] on a fixed buffer when the access lies
        /// outside the capacity, [`BufferError::CapacityExceeded`] on a
        /// growable buffer that cannot reach it.
        fn $put(&mut self, index: usize, value: $ty) -> Result<(), BufferError> {
            const SIZE: usize = core::mem::size_of::<$ty>();
            self.ensure_capacity(index, SIZE)?;
            self.as_bytes_mut()[index..index + SIZE].copy_from_slice(&value.to_ne_bytes());
            Ok(())
        }

        #[doc = concat!("Writes a little-endian `", stringify!($ty), "` at `index`.")]
        ///
        /// # Errors
        ///
        /// As the native-order form.
        fn $put_le(&mut self, index: usize, value: $ty) -> Result<(), BufferError> {
            const SIZE: usize = core::mem::size_of::<$ty>();
            self.ensure_capacity(index, SIZE)?;
            self.as_bytes_mut()[index..index + SIZE].copy_from_slice(&value.to_le_bytes());
            Ok(())
        }

        #[doc = concat!("Writes a big-endian `", stringify!($ty), "` at `index`.")]
        ///
        /// # Errors
        ///
        /// As the native-order form.
        fn $put_be(&mut self, index: usize, value: $ty) -> Result<(), BufferError> {
            const SIZE: usize = core::mem::size_of::<$ty>();
            self.ensure_capacity(index, SIZE)?;
            self.as_bytes_mut()[index..index + SIZE].copy_from_slice(&value.to_be_bytes());
            Ok(())
        }

        #[doc = concat!("Writes a `", stringify!($ty), "` at `index` in the requested byte order.")]
        ///
        /// # Errors
        ///
        /// As the native-order form.
        fn $put_order(&mut self, index: usize, value: $ty, order: ByteOrder) -> Result<(), BufferError> {
            match order {
                ByteOrder::LittleEndian => self.$put_le(index, value),
                ByteOrder::BigEndian => self.$put_be(index, value),
            }
        }

        #[doc = concat!("Writes a native-order `", stringify!($ty), "` at `index` without bounds checking.")]
        ///
        /// # Safety
        ///
        #[doc = concat!("`index + size_of::<", stringify!($ty), ">()` must not exceed `capacity()`.")]
        unsafe fn $put_unchecked(&mut self, index: usize, value: $ty) {
            const SIZE: usize = core::mem::size_of::<$ty>();
            let raw = value.to_ne_bytes();
            // SAFETY: caller guarantees the range is in bounds.
            unsafe {
                core::ptr::copy_nonoverlapping(
                    raw.as_ptr(),
                    self.as_bytes_mut().as_mut_ptr().add(index),
                    SIZE,
                );
            }
        }
    };
}

/// Read capability over a contiguous byte range.
///
/// Every access is bounds-checked and `Result`-returning; the deliberate
/// hot-path opt-out is the visibly `unsafe` `*_unchecked` method family.
/// UTF-16 code units have no dedicated accessors; they travel through the
/// `u16` family.
pub trait ByteView {
    /// Number of addressable bytes.
    fn capacity(&self) -> usize;

    /// The entire content as one byte slice.
    fn as_bytes(&self) -> &[u8];

    /// Borrows `length` bytes starting at `index`.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfBounds`] when the range lies outside the capacity.
    fn checked_slice(&self, index: usize, length: usize) -> Result<&[u8], BufferError> {
        check_bounds(index, length, self.capacity())?;
        Ok(&self.as_bytes()[index..index + length])
    }

    /// Copies `dst.len()` bytes starting at `index` into `dst`.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfBounds`] when the range lies outside the capacity.
    fn get_bytes(&self, index: usize, dst: &mut [u8]) -> Result<(), BufferError> {
        let src = self.checked_slice(index, dst.len())?;
        dst.copy_from_slice(src);
        Ok(())
    }

    /// Reads the byte at `index`.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfBounds`] when `index` lies outside the capacity.
    fn get_u8(&self, index: usize) -> Result<u8, BufferError> {
        check_bounds(index, 1, self.capacity())?;
        Ok(self.as_bytes()[index])
    }

    /// Reads the byte at `index` as a signed value.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfBounds`] when `index` lies outside the capacity.
    fn get_i8(&self, index: usize) -> Result<i8, BufferError> {
        Ok(self.get_u8(index)? as i8)
    }

    view_get!(u16, get_u16, get_u16_le, get_u16_be, get_u16_order, get_u16_unchecked);
    view_get!(i16, get_i16, get_i16_le, get_i16_be, get_i16_order, get_i16_unchecked);
    view_get!(u32, get_u32, get_u32_le, get_u32_be, get_u32_order, get_u32_unchecked);
    view_get!(i32, get_i32, get_i32_le, get_i32_be, get_i32_order, get_i32_unchecked);
    view_get!(u64, get_u64, get_u64_le, get_u64_be, get_u64_order, get_u64_unchecked);
    view_get!(i64, get_i64, get_i64_le, get_i64_be, get_i64_order, get_i64_unchecked);
    view_get!(f32, get_f32, get_f32_le, get_f32_be, get_f32_order, get_f32_unchecked);
    view_get!(f64, get_f64, get_f64_le, get_f64_be, get_f64_order, get_f64_unchecked);

    /// Parses `length` ASCII bytes at `index` as an unsigned decimal number.
    /// Bare digits only; see [`ascii::parse_u32`].
    ///
    /// # Errors
    ///
    /// [`AsciiError`] on malformed or overflowing text, or when the range
    /// lies outside the capacity.
    fn parse_u32_ascii(&self, index: usize, length: usize) -> Result<u32, AsciiError> {
        ascii::parse_u32(self.checked_slice(index, length)?)
    }

    /// Parses `length` ASCII bytes at `index` as an unsigned decimal number.
    ///
    /// # Errors
    ///
    /// As [`ByteView::parse_u32_ascii`].
    fn parse_u64_ascii(&self, index: usize, length: usize) -> Result<u64, AsciiError> {
        ascii::parse_u64(self.checked_slice(index, length)?)
    }

    /// Parses `length` ASCII bytes at `index` as a signed decimal number.
    /// One leading `'-'` is permitted; see [`ascii::parse_i32`].
    ///
    /// # Errors
    ///
    /// As [`ByteView::parse_u32_ascii`].
    fn parse_i32_ascii(&self, index: usize, length: usize) -> Result<i32, AsciiError> {
        ascii::parse_i32(self.checked_slice(index, length)?)
    }

    /// Parses `length` ASCII bytes at `index` as a signed decimal number.
    ///
    /// # Errors
    ///
    /// As [`ByteView::parse_u32_ascii`].
    fn parse_i64_ascii(&self, index: usize, length: usize) -> Result<i64, AsciiError> {
        ascii::parse_i64(self.checked_slice(index, length)?)
    }

    /// Reads a length-prefixed ASCII string at `index` with a native-order
    /// length header.
    ///
    /// # Errors
    ///
    /// [`BufferError::NegativeLength`] on a negative header,
    /// [`BufferError::OutOfBounds`] when header or payload lie outside the
    /// capacity.
    fn get_string_ascii(&self, index: usize) -> Result<String, BufferError> {
        self.get_string_ascii_order(index, ByteOrder::NATIVE)
    }

    /// Reads a length-prefixed ASCII string with the length header in the
    /// requested byte order.
    ///
    /// Payload bytes are widened byte-for-byte to characters, mirroring the
    /// write side's `'?'` replacement policy.
    ///
    /// # Errors
    ///
    /// As [`ByteView::get_string_ascii`].
    fn get_string_ascii_order(&self, index: usize, order: ByteOrder) -> Result<String, BufferError> {
        let length = wire_length(self.get_i32_order(index, order)?)?;
        self.get_string_ascii_without_length(index + 4, length)
    }

    /// Reads exactly `length` ASCII payload bytes at `index`, no header.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfBounds`] when the range lies outside the capacity.
    fn get_string_ascii_without_length(
        &self,
        index: usize,
        length: usize,
    ) -> Result<String, BufferError> {
        let bytes = self.checked_slice(index, length)?;
        Ok(bytes.iter().map(|&b| char::from(b)).collect())
    }

    /// Reads a length-prefixed UTF-8 string at `index` with a native-order
    /// length header. Invalid sequences decode lossily.
    ///
    /// # Errors
    ///
    /// As [`ByteView::get_string_ascii`].
    fn get_string_utf8(&self, index: usize) -> Result<String, BufferError> {
        self.get_string_utf8_order(index, ByteOrder::NATIVE)
    }

    /// Reads a length-prefixed UTF-8 string with the length header in the
    /// requested byte order.
    ///
    /// # Errors
    ///
    /// As [`ByteView::get_string_ascii`].
    fn get_string_utf8_order(&self, index: usize, order: ByteOrder) -> Result<String, BufferError> {
        let length = wire_length(self.get_i32_order(index, order)?)?;
        self.get_string_utf8_without_length(index + 4, length)
    }

    /// Reads exactly `length` UTF-8 payload bytes at `index`, no header.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfBounds`] when the range lies outside the capacity.
    fn get_string_utf8_without_length(
        &self,
        index: usize,
        length: usize,
    ) -> Result<String, BufferError> {
        let bytes = self.checked_slice(index, length)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Content equality: capacities match and every byte matches. Two
    /// buffers of different storage media with identical bytes are equal.
    fn content_equals<O: ByteView + ?Sized>(&self, other: &O) -> bool {
        self.capacity() == other.capacity() && self.as_bytes() == other.as_bytes()
    }

    /// Byte-wise lexicographic order over the common prefix; on a tie the
    /// shorter buffer orders first.
    fn content_compare<O: ByteView + ?Sized>(&self, other: &O) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }

    /// Content hash folding the bytes a word at a time with a
    /// multiplicative mix; stable across storage media.
    fn content_hash(&self) -> u64 {
        const PRIME: u64 = 0x0000_0100_0000_01B3;
        let bytes = self.as_bytes();
        let mut hash = 0xCBF2_9CE4_8422_2325u64;
        let mut chunks = bytes.chunks_exact(8);
        for chunk in chunks.by_ref() {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(chunk);
            hash = (hash ^ u64::from_le_bytes(raw)).wrapping_mul(PRIME);
        }
        let tail = chunks.remainder();
        if !tail.is_empty() {
            let mut raw = [0u8; 8];
            raw[..tail.len()].copy_from_slice(tail);
            hash = (hash ^ u64::from_le_bytes(raw)).wrapping_mul(PRIME);
        }
        (hash ^ bytes.len() as u64).wrapping_mul(PRIME)
    }
}

/// Write capability over a contiguous byte range.
///
/// `ensure_capacity` is the single seam between fixed and growable storage:
/// fixed buffers bounds-check, growable buffers grow under the 1.5x policy.
pub trait ByteViewMut: ByteView {
    /// The entire content as one mutable byte slice.
    fn as_bytes_mut(&mut self) -> &mut [u8];

    /// Makes `[index, index + length)` writable.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfBounds`] on a fixed buffer when the range lies
    /// outside the capacity; [`BufferError::CapacityExceeded`] on a growable
    /// buffer whose ceiling is too low, in which case capacity and content
    /// are left unchanged.
    fn ensure_capacity(&mut self, index: usize, length: usize) -> Result<(), BufferError>;

    /// Copies `src` into the buffer starting at `index`.
    ///
    /// # Errors
    ///
    /// As [`ByteViewMut::ensure_capacity`].
    fn put_bytes(&mut self, index: usize, src: &[u8]) -> Result<(), BufferError> {
        self.ensure_capacity(index, src.len())?;
        self.as_bytes_mut()[index..index + src.len()].copy_from_slice(src);
        Ok(())
    }

    /// Copies `length` bytes from `src` at `src_index` into the buffer at
    /// `index`.
    ///
    /// # Errors
    ///
    /// As [`ByteViewMut::ensure_capacity`]; also fails when the source range
    /// lies outside `src`.
    fn put_bytes_from<O: ByteView + ?Sized>(
        &mut self,
        index: usize,
        src: &O,
        src_index: usize,
        length: usize,
    ) -> Result<(), BufferError> {
        let src = src.checked_slice(src_index, length)?;
        self.ensure_capacity(index, length)?;
        self.as_bytes_mut()[index..index + length].copy_from_slice(src);
        Ok(())
    }

    /// Fills `length` bytes starting at `index` with `value`.
    ///
    /// # Errors
    ///
    /// As [`ByteViewMut::ensure_capacity`].
    fn set_memory(&mut self, index: usize, length: usize, value: u8) -> Result<(), BufferError> {
        self.ensure_capacity(index, length)?;
        self.as_bytes_mut()[index..index + length].fill(value);
        Ok(())
    }

    /// Writes one byte at `index`.
    ///
    /// # Errors
    ///
    /// As [`ByteViewMut::ensure_capacity`].
    fn put_u8(&mut self, index: usize, value: u8) -> Result<(), BufferError> {
        self.ensure_capacity(index, 1)?;
        self.as_bytes_mut()[index] = value;
        Ok(())
    }

    /// Writes one signed byte at `index`.
    ///
    /// # Errors
    ///
    /// As [`ByteViewMut::ensure_capacity`].
    fn put_i8(&mut self, index: usize, value: i8) -> Result<(), BufferError> {
        self.put_u8(index, value as u8)
    }

    view_put!(u16, put_u16, put_u16_le, put_u16_be, put_u16_order, put_u16_unchecked);
    view_put!(i16, put_i16, put_i16_le, put_i16_be, put_i16_order, put_i16_unchecked);
    view_put!(u32, put_u32, put_u32_le, put_u32_be, put_u32_order, put_u32_unchecked);
    view_put!(i32, put_i32, put_i32_le, put_i32_be, put_i32_order, put_i32_unchecked);
    view_put!(u64, put_u64, put_u64_le, put_u64_be, put_u64_order, put_u64_unchecked);
    view_put!(i64, put_i64, put_i64_le, put_i64_be, put_i64_order, put_i64_unchecked);
    view_put!(f32, put_f32, put_f32_le, put_f32_be, put_f32_order, put_f32_unchecked);
    view_put!(f64, put_f64, put_f64_le, put_f64_be, put_f64_order, put_f64_unchecked);

    /// Writes `value` as ASCII digits at `index`, returning the byte count.
    ///
    /// # Errors
    ///
    /// [`AsciiError::Buffer`] when the digits do not fit.
    fn put_u32_ascii(&mut self, index: usize, value: u32) -> Result<usize, AsciiError> {
        self.put_u64_ascii(index, u64::from(value))
    }

    /// Writes `value` as ASCII digits at `index`, returning the byte count.
    ///
    /// # Errors
    ///
    /// [`AsciiError::Buffer`] when the digits do not fit.
    fn put_u64_ascii(&mut self, index: usize, value: u64) -> Result<usize, AsciiError> {
        let count = ascii::digit_count_u64(value);
        self.ensure_capacity(index, count)?;
        ascii::format_u64(&mut self.as_bytes_mut()[index..index + count], value);
        Ok(count)
    }

    /// Writes `value` as ASCII at `index` with a leading `'-'` when
    /// negative, returning the byte count.
    ///
    /// # Errors
    ///
    /// [`AsciiError::Buffer`] when the text does not fit.
    fn put_i32_ascii(&mut self, index: usize, value: i32) -> Result<usize, AsciiError> {
        let count = ascii::digit_count_i32(value);
        self.ensure_capacity(index, count)?;
        ascii::format_i32(&mut self.as_bytes_mut()[index..index + count], value);
        Ok(count)
    }

    /// Writes `value` as ASCII at `index` with a leading `'-'` when
    /// negative, returning the byte count.
    ///
    /// # Errors
    ///
    /// [`AsciiError::Buffer`] when the text does not fit.
    fn put_i64_ascii(&mut self, index: usize, value: i64) -> Result<usize, AsciiError> {
        let count = ascii::digit_count_i64(value);
        self.ensure_capacity(index, count)?;
        ascii::format_i64(&mut self.as_bytes_mut()[index..index + count], value);
        Ok(count)
    }

    /// Writes `value` right-aligned into exactly `width` bytes at `index`,
    /// left-padded with `'0'`.
    ///
    /// # Errors
    ///
    /// [`AsciiError::DoesNotFit`] when `value` needs more than `width`
    /// digits; [`AsciiError::Buffer`] when the field does not fit.
    fn put_u32_ascii_padded(
        &mut self,
        index: usize,
        width: usize,
        value: u32,
    ) -> Result<usize, AsciiError> {
        if ascii::digit_count_u32(value) > width {
            return Err(AsciiError::DoesNotFit {
                value: u64::from(value),
                width,
            });
        }
        self.ensure_capacity(index, width)?;
        ascii::format_u32_padded(&mut self.as_bytes_mut()[index..index + width], width, value)?;
        Ok(width)
    }

    /// Writes the digits of `value` right-to-left ending just before `end`,
    /// returning the start index used. The caller guarantees room below
    /// `end`; no growth is attempted.
    ///
    /// # Errors
    ///
    /// [`AsciiError::Buffer`] when `end` exceeds the capacity or there are
    /// fewer than `digit_count` bytes below it.
    fn put_u32_ascii_from_end(&mut self, value: u32, end: usize) -> Result<usize, AsciiError> {
        let count = ascii::digit_count_u32(value);
        if end > self.capacity() || end < count {
            return Err(AsciiError::Buffer(BufferError::OutOfBounds {
                index: end.saturating_sub(count),
                length: count,
                capacity: self.capacity(),
            }));
        }
        Ok(ascii::format_u64_from_end(
            &mut self.as_bytes_mut()[..end],
            u64::from(value),
        ))
    }

    /// Writes the shortest round-trip decimal form of `value` at `index`,
    /// returning the byte count. See [`ascii::format_f64`].
    ///
    /// # Errors
    ///
    /// As [`ByteViewMut::ensure_capacity`].
    fn put_f64_ascii(&mut self, index: usize, value: f64) -> Result<usize, BufferError> {
        let mut scratch = [0u8; ascii::MAX_F64_ASCII];
        let length = ascii::format_f64(&mut scratch, value);
        self.ensure_capacity(index, length)?;
        self.as_bytes_mut()[index..index + length].copy_from_slice(&scratch[..length]);
        Ok(length)
    }

    /// Writes `value` as a length-prefixed ASCII string at `index` with a
    /// native-order length header, returning the total byte count. Characters
    /// above 127 are written as `'?'`.
    ///
    /// # Errors
    ///
    /// As [`ByteViewMut::put_string_ascii_order`].
    fn put_string_ascii(&mut self, index: usize, value: &str) -> Result<usize, BufferError> {
        self.put_string_ascii_order(index, value, ByteOrder::NATIVE)
    }

    /// Writes `value` as a length-prefixed ASCII string with the length
    /// header in the requested byte order.
    ///
    /// # Errors
    ///
    /// [`BufferError::SizeExceeded`] when the payload is longer than
    /// `i32::MAX`; otherwise as [`ByteViewMut::ensure_capacity`].
    fn put_string_ascii_order(
        &mut self,
        index: usize,
        value: &str,
        order: ByteOrder,
    ) -> Result<usize, BufferError> {
        let length = value.chars().count();
        let header = i32::try_from(length).map_err(|_| BufferError::SizeExceeded {
            length,
            max: i32::MAX as usize,
        })?;
        self.ensure_capacity(index, 4 + length)?;
        self.put_i32_order(index, header, order)?;
        self.put_string_ascii_without_length(index + 4, value)?;
        Ok(4 + length)
    }

    /// Writes the ASCII payload of `value` at `index` with no header,
    /// returning the byte count. Characters above 127 are written as `'?'`.
    ///
    /// # Errors
    ///
    /// As [`ByteViewMut::ensure_capacity`].
    fn put_string_ascii_without_length(
        &mut self,
        index: usize,
        value: &str,
    ) -> Result<usize, BufferError> {
        let length = value.chars().count();
        self.ensure_capacity(index, length)?;
        let payload = &mut self.as_bytes_mut()[index..index + length];
        for (dst, ch) in payload.iter_mut().zip(value.chars()) {
            *dst = if ch.is_ascii() { ch as u8 } else { b'?' };
        }
        Ok(length)
    }

    /// Writes `value` as a length-prefixed UTF-8 string at `index` with a
    /// native-order length header, returning the total byte count.
    ///
    /// # Errors
    ///
    /// As [`ByteViewMut::put_string_ascii_order`].
    fn put_string_utf8(&mut self, index: usize, value: &str) -> Result<usize, BufferError> {
        self.put_string_utf8_order(index, value, ByteOrder::NATIVE)
    }

    /// Writes `value` as a length-prefixed UTF-8 string with the length
    /// header in the requested byte order.
    ///
    /// # Errors
    ///
    /// As [`ByteViewMut::put_string_ascii_order`].
    fn put_string_utf8_order(
        &mut self,
        index: usize,
        value: &str,
        order: ByteOrder,
    ) -> Result<usize, BufferError> {
        let payload = value.as_bytes();
        let header = i32::try_from(payload.len()).map_err(|_| BufferError::SizeExceeded {
            length: payload.len(),
            max: i32::MAX as usize,
        })?;
        self.ensure_capacity(index, 4 + payload.len())?;
        self.put_i32_order(index, header, order)?;
        self.as_bytes_mut()[index + 4..index + 4 + payload.len()].copy_from_slice(payload);
        Ok(4 + payload.len())
    }

    /// Writes a length-prefixed UTF-8 string, failing when the encoded
    /// payload exceeds `max_encoded_length`.
    ///
    /// # Errors
    ///
    /// [`BufferError::SizeExceeded`] when the payload is too long; otherwise
    /// as [`ByteViewMut::put_string_utf8`].
    fn put_string_utf8_bounded(
        &mut self,
        index: usize,
        value: &str,
        max_encoded_length: usize,
    ) -> Result<usize, BufferError> {
        let length = value.len();
        if length > max_encoded_length {
            return Err(BufferError::SizeExceeded {
                length,
                max: max_encoded_length,
            });
        }
        self.put_string_utf8(index, value)
    }

    /// Writes the UTF-8 payload of `value` at `index` with no header,
    /// returning the byte count.
    ///
    /// # Errors
    ///
    /// As [`ByteViewMut::ensure_capacity`].
    fn put_string_utf8_without_length(
        &mut self,
        index: usize,
        value: &str,
    ) -> Result<usize, BufferError> {
        self.put_bytes(index, value.as_bytes())?;
        Ok(value.len())
    }
}

/// Restricted atomic accessors of the pointer-backed variants.
///
/// These publish individual 32/64-bit fields across threads without a lock;
/// they do not make the buffer as a whole thread-safe. Offsets must be
/// aligned to the word size (the backing allocations are at least 8-byte
/// aligned), unlike the plain accessors which assume no alignment.
pub trait AtomicByteView: ByteView {
    /// Base pointer of the backing region; at least 8-byte aligned.
    fn base_ptr(&self) -> *mut u8;

    #[doc(hidden)]
    fn atomic_i32(&self, index: usize) -> Result<&AtomicI32, BufferError> {
        check_bounds(index, 4, self.capacity())?;
        if index % 4 != 0 {
            return Err(BufferError::Misaligned { index, align: 4 });
        }
        // SAFETY: in bounds and aligned; non-atomic writes require `&mut
        // self`, so no plain access races this view while it is borrowed.
        Ok(unsafe { AtomicI32::from_ptr(self.base_ptr().add(index).cast()) })
    }

    #[doc(hidden)]
    fn atomic_i64(&self, index: usize) -> Result<&AtomicI64, BufferError> {
        check_bounds(index, 8, self.capacity())?;
        if index % 8 != 0 {
            return Err(BufferError::Misaligned { index, align: 8 });
        }
        // SAFETY: as `atomic_i32`.
        Ok(unsafe { AtomicI64::from_ptr(self.base_ptr().add(index).cast()) })
    }

    /// Acquire load of the `i32` at `index`.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfBounds`] or [`BufferError::Misaligned`].
    fn get_i32_volatile(&self, index: usize) -> Result<i32, BufferError> {
        Ok(self.atomic_i32(index)?.load(atomic::Ordering::Acquire))
    }

    /// Release store of an `i32` at `index`.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfBounds`] or [`BufferError::Misaligned`].
    fn put_i32_ordered(&self, index: usize, value: i32) -> Result<(), BufferError> {
        self.atomic_i32(index)?
            .store(value, atomic::Ordering::Release);
        Ok(())
    }

    /// Sequentially consistent store of an `i32` at `index`.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfBounds`] or [`BufferError::Misaligned`].
    fn put_i32_volatile(&self, index: usize, value: i32) -> Result<(), BufferError> {
        self.atomic_i32(index)?
            .store(value, atomic::Ordering::SeqCst);
        Ok(())
    }

    /// Atomically replaces the `i32` at `index` with `update` when it equals
    /// `expected`; returns whether the swap happened.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfBounds`] or [`BufferError::Misaligned`].
    fn compare_and_set_i32(
        &self,
        index: usize,
        expected: i32,
        update: i32,
    ) -> Result<bool, BufferError> {
        Ok(self
            .atomic_i32(index)?
            .compare_exchange(
                expected,
                update,
                atomic::Ordering::SeqCst,
                atomic::Ordering::SeqCst,
            )
            .is_ok())
    }

    /// Atomically adds `delta` to the `i32` at `index`, returning the
    /// previous value.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfBounds`] or [`BufferError::Misaligned`].
    fn get_and_add_i32(&self, index: usize, delta: i32) -> Result<i32, BufferError> {
        Ok(self
            .atomic_i32(index)?
            .fetch_add(delta, atomic::Ordering::SeqCst))
    }

    /// Atomically replaces the `i32` at `index`, returning the previous
    /// value.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfBounds`] or [`BufferError::Misaligned`].
    fn get_and_set_i32(&self, index: usize, value: i32) -> Result<i32, BufferError> {
        Ok(self.atomic_i32(index)?.swap(value, atomic::Ordering::SeqCst))
    }

    /// Acquire load of the `i64` at `index`.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfBounds`] or [`BufferError::Misaligned`].
    fn get_i64_volatile(&self, index: usize) -> Result<i64, BufferError> {
        Ok(self.atomic_i64(index)?.load(atomic::Ordering::Acquire))
    }

    /// Release store of an `i64` at `index`.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfBounds`] or [`BufferError::Misaligned`].
    fn put_i64_ordered(&self, index: usize, value: i64) -> Result<(), BufferError> {
        self.atomic_i64(index)?
            .store(value, atomic::Ordering::Release);
        Ok(())
    }

    /// Sequentially consistent store of an `i64` at `index`.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfBounds`] or [`BufferError::Misaligned`].
    fn put_i64_volatile(&self, index: usize, value: i64) -> Result<(), BufferError> {
        self.atomic_i64(index)?
            .store(value, atomic::Ordering::SeqCst);
        Ok(())
    }

    /// Atomically replaces the `i64` at `index` with `update` when it equals
    /// `expected`; returns whether the swap happened.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfBounds`] or [`BufferError::Misaligned`].
    fn compare_and_set_i64(
        &self,
        index: usize,
        expected: i64,
        update: i64,
    ) -> Result<bool, BufferError> {
        Ok(self
            .atomic_i64(index)?
            .compare_exchange(
                expected,
                update,
                atomic::Ordering::SeqCst,
                atomic::Ordering::SeqCst,
            )
            .is_ok())
    }

    /// Atomically adds `delta` to the `i64` at `index`, returning the
    /// previous value.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfBounds`] or [`BufferError::Misaligned`].
    fn get_and_add_i64(&self, index: usize, delta: i64) -> Result<i64, BufferError> {
        Ok(self
            .atomic_i64(index)?
            .fetch_add(delta, atomic::Ordering::SeqCst))
    }

    /// Atomically replaces the `i64` at `index`, returning the previous
    /// value.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfBounds`] or [`BufferError::Misaligned`].
    fn get_and_set_i64(&self, index: usize, value: i64) -> Result<i64, BufferError> {
        Ok(self.atomic_i64(index)?.swap(value, atomic::Ordering::SeqCst))
    }
}

impl ByteView for [u8] {
    fn capacity(&self) -> usize {
        self.len()
    }

    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl ByteViewMut for [u8] {
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        self
    }

    fn ensure_capacity(&mut self, index: usize, length: usize) -> Result<(), BufferError> {
        check_bounds(index, length, self.len())
    }
}

/// Escaped prefix of a buffer's content for `Debug` rendering.
pub(crate) fn debug_prefix(bytes: &[u8]) -> &bstr::BStr {
    bstr::BStr::new(&bytes[..bytes.len().min(64)])
}

/// Content-based `PartialEq`/`Eq`/`PartialOrd`/`Ord`/`Hash` for a buffer
/// variant, delegating to the shared [`ByteView`] semantics so all storage
/// media compare alike.
macro_rules! impl_content_traits {
    ($ty:ty) => {
        impl<O: $crate::ByteView + ?Sized> PartialEq<O> for $ty {
            fn eq(&self, other: &O) -> bool {
                self.content_equals(other)
            }
        }

        impl Eq for $ty {}

        impl<O: $crate::ByteView + ?Sized> PartialOrd<O> for $ty {
            fn partial_cmp(&self, other: &O) -> Option<core::cmp::Ordering> {
                Some(self.content_compare(other))
            }
        }

        impl Ord for $ty {
            fn cmp(&self, other: &Self) -> core::cmp::Ordering {
                self.content_compare(other)
            }
        }

        impl core::hash::Hash for $ty {
            fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
                state.write_u64(self.content_hash());
            }
        }
    };
}
pub(crate) use impl_content_traits;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_views_share_the_contract() {
        let mut storage = [0u8; 16];
        let view: &mut [u8] = &mut storage;
        view.put_u32(0, 0xDEAD_BEEF).unwrap();
        assert_eq!(view.get_u32(0), Ok(0xDEAD_BEEF));
        view.put_u16_be(4, 0x0102).unwrap();
        let mut copied = [0u8; 2];
        view.get_bytes(4, &mut copied).unwrap();
        assert_eq!(copied, [0x01, 0x02]);
    }

    #[test]
    fn order_forms_byte_swap() {
        let mut storage = [0u8; 8];
        let view: &mut [u8] = &mut storage;
        view.put_u32_le(0, 0x0A0B_0C0D).unwrap();
        assert_eq!(&view.as_bytes()[..4], &[0x0D, 0x0C, 0x0B, 0x0A]);
        view.put_u32_be(4, 0x0A0B_0C0D).unwrap();
        assert_eq!(&view.as_bytes()[4..], &[0x0A, 0x0B, 0x0C, 0x0D]);
        assert_eq!(
            view.get_u32_order(0, ByteOrder::LittleEndian),
            view.get_u32_order(4, ByteOrder::BigEndian)
        );
    }

    #[test]
    fn one_byte_boundary() {
        let storage = [7u8; 4];
        let view: &[u8] = &storage;
        assert_eq!(view.get_u8(3), Ok(7));
        assert_eq!(
            view.get_u8(4),
            Err(BufferError::OutOfBounds {
                index: 4,
                length: 1,
                capacity: 4
            })
        );
    }

    #[test]
    fn typed_access_past_the_end_fails() {
        let mut storage = [0u8; 4];
        let view: &mut [u8] = &mut storage;
        assert!(view.get_u32(1).is_err());
        assert!(view.put_u64(0, 1).is_err());
        assert!(view.get_u32(0).is_ok());
    }

    #[test]
    fn unchecked_access_matches_checked() {
        let mut storage = [0u8; 8];
        let view: &mut [u8] = &mut storage;
        // SAFETY: index 0 with 8 bytes available.
        unsafe { view.put_u64_unchecked(0, 0x0102_0304_0506_0708) };
        assert_eq!(view.get_u64(0), Ok(0x0102_0304_0506_0708));
        // SAFETY: as above.
        assert_eq!(unsafe { view.get_u64_unchecked(0) }, 0x0102_0304_0506_0708);
    }

    #[test]
    fn content_semantics_on_slices() {
        let a = [1u8, 2, 3];
        let b = [1u8, 2, 3];
        let c = [1u8, 2, 3, 0];
        assert!(a[..].content_equals(&b[..]));
        // same prefix, different capacity: never equal, shorter orders first
        assert!(!a[..].content_equals(&c[..]));
        assert_eq!(a[..].content_compare(&c[..]), Ordering::Less);
        assert_eq!(a[..].content_hash(), b[..].content_hash());
        assert_ne!(a[..].content_hash(), c[..].content_hash());
    }
}
