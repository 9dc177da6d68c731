//! Allocation-free ASCII numeric codec.
//!
//! Parsing validates and converts digits in machine-word batches where at
//! least four (32-bit) or eight (64-bit) contiguous digit bytes remain, with
//! a scalar loop for the tail. Formatting computes the digit count up front
//! and emits two digits per [`DIGIT_PAIRS`] lookup, least-significant pair
//! first, so no scratch formatting pass is ever needed.
//!
//! Grammar: `[optional '-'][one or more ASCII digits]` for the signed
//! parsers; the natural (`u32`/`u64`) parsers accept bare digits only — a
//! leading `+` or `-` is malformed.

mod bignum;
mod float;

pub use float::{MAX_F64_ASCII, format_f64};

use crate::error::AsciiError;

/// Two ASCII digits for every value 00–99, two bytes per entry.
const DIGIT_PAIRS: &[u8; 200] = b"0001020304050607080910111213141516171819\
2021222324252627282930313233343536373839\
4041424344454647484950515253545556575859\
6061626364656667686970717273747576777879\
8081828384858687888990919293949596979899";

/// Decimal digits of `u64::MAX`; the only legal 20-digit natural number is
/// one that compares less than or equal to this, digit by digit.
const U64_MAX_ASCII: &[u8; 20] = b"18446744073709551615";

/// `i32::MIN` kept as literal bytes: negating the minimum overflows, so it
/// is copied verbatim instead of computed.
const I32_MIN_ASCII: &[u8] = b"-2147483648";

/// `i64::MIN` kept as literal bytes for the same reason.
const I64_MIN_ASCII: &[u8] = b"-9223372036854775808";

const POW10: [u64; 20] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
    1_000_000_000_000_000_000,
    10_000_000_000_000_000_000,
];

/// Number of decimal digits in `value`.
///
/// A base-2 logarithm estimate corrected by one power-of-ten table probe;
/// never formats into scratch space.
#[must_use]
pub const fn digit_count_u64(value: u64) -> usize {
    if value == 0 {
        return 1;
    }
    let bits = 64 - value.leading_zeros() as usize;
    // 1233/4096 is a lower approximation of log10(2).
    let estimate = (bits * 1233) >> 12;
    estimate + 1 - (value < POW10[estimate]) as usize
}

/// Number of decimal digits in `value`.
#[must_use]
pub const fn digit_count_u32(value: u32) -> usize {
    digit_count_u64(value as u64)
}

/// Number of bytes [`format_i64`] emits for `value`, sign included.
#[must_use]
pub const fn digit_count_i64(value: i64) -> usize {
    if value < 0 {
        1 + digit_count_u64(value.unsigned_abs())
    } else {
        digit_count_u64(value as u64)
    }
}

/// Number of bytes [`format_i32`] emits for `value`, sign included.
#[must_use]
pub const fn digit_count_i32(value: i32) -> usize {
    digit_count_i64(value as i64)
}

#[inline]
fn load_le_u64(bytes: &[u8]) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(raw)
}

#[inline]
fn load_le_u32(bytes: &[u8]) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[..4]);
    u32::from_le_bytes(raw)
}

/// One bitmask test proving all eight bytes of `chunk` lie in `'0'..='9'`.
#[inline]
const fn is_eight_digits(chunk: u64) -> bool {
    ((chunk & 0xF0F0_F0F0_F0F0_F0F0)
        | ((chunk.wrapping_add(0x0606_0606_0606_0606) & 0xF0F0_F0F0_F0F0_F0F0) >> 4))
        == 0x3333_3333_3333_3333
}

#[inline]
const fn is_four_digits(chunk: u32) -> bool {
    ((chunk & 0xF0F0_F0F0) | ((chunk.wrapping_add(0x0606_0606) & 0xF0F0_F0F0) >> 4))
        == 0x3333_3333
}

/// Converts eight ASCII digits (little-endian load, first digit in the low
/// byte) to their numeric value with fixed-point multiply/shift steps.
#[inline]
const fn parse_eight_digits(chunk: u64) -> u64 {
    const MASK: u64 = 0x0000_00FF_0000_00FF;
    const MUL1: u64 = 0x000F_4240_0000_0064; // 100 + (10^6 << 32)
    const MUL2: u64 = 0x0000_2710_0000_0001; // 1 + (10^4 << 32)
    let val = chunk.wrapping_sub(0x3030_3030_3030_3030);
    let val = val.wrapping_mul(10).wrapping_add(val >> 8);
    ((val & MASK).wrapping_mul(MUL1)).wrapping_add(((val >> 16) & MASK).wrapping_mul(MUL2)) >> 32
}

#[inline]
const fn parse_four_digits(chunk: u32) -> u32 {
    let val = chunk.wrapping_sub(0x3030_3030);
    let val = val.wrapping_mul(10).wrapping_add(val >> 8);
    (val & 0xFF) * 100 + ((val >> 16) & 0xFF)
}

/// Validates that `digits` is all ASCII digits and accumulates its value,
/// wrapping on overflow. Callers are responsible for range checks; `text` is
/// the full original slice reported on a malformed byte.
fn accumulate_digits(digits: &[u8], text: &[u8]) -> Result<u64, AsciiError> {
    let mut acc: u64 = 0;
    let mut rest = digits;
    while rest.len() >= 8 {
        let chunk = load_le_u64(rest);
        if !is_eight_digits(chunk) {
            return Err(AsciiError::malformed(text));
        }
        acc = acc
            .wrapping_mul(100_000_000)
            .wrapping_add(parse_eight_digits(chunk));
        rest = &rest[8..];
    }
    if rest.len() >= 4 {
        let chunk = load_le_u32(rest);
        if !is_four_digits(chunk) {
            return Err(AsciiError::malformed(text));
        }
        acc = acc
            .wrapping_mul(10_000)
            .wrapping_add(u64::from(parse_four_digits(chunk)));
        rest = &rest[4..];
    }
    for &byte in rest {
        if !byte.is_ascii_digit() {
            return Err(AsciiError::malformed(text));
        }
        acc = acc.wrapping_mul(10).wrapping_add(u64::from(byte - b'0'));
    }
    Ok(acc)
}

fn parse_natural(digits: &[u8], text: &[u8]) -> Result<u64, AsciiError> {
    if digits.is_empty() {
        return if text.is_empty() {
            Err(AsciiError::Empty)
        } else {
            // a bare sign with no digits
            Err(AsciiError::malformed(text))
        };
    }
    let value = accumulate_digits(digits, text)?;
    if digits.len() > U64_MAX_ASCII.len()
        || (digits.len() == U64_MAX_ASCII.len() && digits > U64_MAX_ASCII.as_slice())
    {
        // Equal-length digit strings compare numerically; only the exact
        // boundary value is legal at the maximum digit count.
        return Err(AsciiError::overflow(text));
    }
    Ok(value)
}

/// Parses an unsigned decimal number. Bare digits only: any sign byte is
/// malformed.
///
/// # Errors
///
/// [`AsciiError::Empty`] on an empty slice, [`AsciiError::Malformed`] on a
/// non-digit byte, [`AsciiError::Overflow`] past `u64::MAX`.
pub fn parse_u64(bytes: &[u8]) -> Result<u64, AsciiError> {
    parse_natural(bytes, bytes)
}

/// Parses an unsigned decimal number into a `u32`.
///
/// # Errors
///
/// As [`parse_u64`], with overflow past `u32::MAX`.
pub fn parse_u32(bytes: &[u8]) -> Result<u32, AsciiError> {
    let value = parse_u64(bytes)?;
    u32::try_from(value).map_err(|_| AsciiError::overflow(bytes))
}

/// Parses a signed decimal number. One leading `'-'` is permitted;
/// `i64::MIN`, whose magnitude exceeds the positive range by one, is legal.
///
/// # Errors
///
/// As [`parse_u64`], with overflow outside `i64::MIN..=i64::MAX`.
pub fn parse_i64(bytes: &[u8]) -> Result<i64, AsciiError> {
    match bytes.split_first() {
        Some((&b'-', digits)) => {
            let magnitude = parse_natural(digits, bytes)?;
            if magnitude > i64::MIN.unsigned_abs() {
                return Err(AsciiError::overflow(bytes));
            }
            Ok(0i64.wrapping_sub_unsigned(magnitude))
        }
        _ => {
            let magnitude = parse_natural(bytes, bytes)?;
            i64::try_from(magnitude).map_err(|_| AsciiError::overflow(bytes))
        }
    }
}

/// Parses a signed decimal number into an `i32`.
///
/// # Errors
///
/// As [`parse_i64`], with overflow outside `i32::MIN..=i32::MAX`.
pub fn parse_i32(bytes: &[u8]) -> Result<i32, AsciiError> {
    let value = parse_i64(bytes)?;
    i32::try_from(value).map_err(|_| AsciiError::overflow(bytes))
}

/// Writes the digits of `value` so the last lands at `dst[end - 1]`.
fn write_backward(dst: &mut [u8], end: usize, mut value: u64) {
    let mut pos = end;
    while value >= 100 {
        let pair = (value % 100) as usize * 2;
        value /= 100;
        pos -= 2;
        dst[pos] = DIGIT_PAIRS[pair];
        dst[pos + 1] = DIGIT_PAIRS[pair + 1];
    }
    if value < 10 {
        pos -= 1;
        dst[pos] = b'0' + value as u8;
    } else {
        let pair = value as usize * 2;
        pos -= 2;
        dst[pos] = DIGIT_PAIRS[pair];
        dst[pos + 1] = DIGIT_PAIRS[pair + 1];
    }
}

/// Formats `value` into the front of `dst`, returning the byte count.
///
/// # Panics
///
/// When `dst` is shorter than [`digit_count_u64`]`(value)`.
pub fn format_u64(dst: &mut [u8], value: u64) -> usize {
    let count = digit_count_u64(value);
    write_backward(dst, count, value);
    count
}

/// Formats `value` into the front of `dst`, returning the byte count.
///
/// # Panics
///
/// When `dst` is shorter than [`digit_count_u32`]`(value)`.
pub fn format_u32(dst: &mut [u8], value: u32) -> usize {
    format_u64(dst, u64::from(value))
}

/// Formats `value` with its digits ending at `dst.len()`, returning the
/// start index used. No leading zero is written.
///
/// # Panics
///
/// When `dst` is shorter than the digit count of `value`.
pub fn format_u64_from_end(dst: &mut [u8], value: u64) -> usize {
    let count = digit_count_u64(value);
    let end = dst.len();
    write_backward(dst, end, value);
    end - count
}

/// Formats a signed value into the front of `dst`, returning the byte count.
/// `i64::MIN` is emitted from its precomputed literal.
///
/// # Panics
///
/// When `dst` is shorter than [`digit_count_i64`]`(value)`.
pub fn format_i64(dst: &mut [u8], value: i64) -> usize {
    if value == i64::MIN {
        dst[..I64_MIN_ASCII.len()].copy_from_slice(I64_MIN_ASCII);
        return I64_MIN_ASCII.len();
    }
    if value < 0 {
        dst[0] = b'-';
        1 + format_u64(&mut dst[1..], value.unsigned_abs())
    } else {
        format_u64(dst, value.unsigned_abs())
    }
}

/// Formats a signed value into the front of `dst`, returning the byte count.
///
/// # Panics
///
/// When `dst` is shorter than [`digit_count_i32`]`(value)`.
pub fn format_i32(dst: &mut [u8], value: i32) -> usize {
    if value == i32::MIN {
        dst[..I32_MIN_ASCII.len()].copy_from_slice(I32_MIN_ASCII);
        return I32_MIN_ASCII.len();
    }
    format_i64(dst, i64::from(value))
}

/// Formats `value` right-aligned into exactly `width` bytes of `dst`,
/// left-padded with `'0'`.
///
/// # Errors
///
/// [`AsciiError::DoesNotFit`] when `value` needs more than `width` digits.
///
/// # Panics
///
/// When `dst` is shorter than `width`.
pub fn format_u32_padded(dst: &mut [u8], width: usize, value: u32) -> Result<(), AsciiError> {
    if digit_count_u32(value) > width {
        return Err(AsciiError::DoesNotFit {
            value: u64::from(value),
            width,
        });
    }
    dst[..width].fill(b'0');
    write_backward(dst, width, u64::from(value));
    Ok(())
}
