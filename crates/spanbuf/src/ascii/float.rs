//! Shortest round-trip decimal formatting of IEEE-754 doubles.
//!
//! Free-format Burger–Dybvig digit generation over [`Big`]: the mantissa and
//! its rounding interval are scaled into a big-integer fraction, digits are
//! produced until the interval uniquely identifies the original value, and
//! round-half-to-even decides the boundary digit. The output is always plain
//! decimal (`0.xxxx` or `xxxx.0` layouts), never scientific notation.

use core::cmp::Ordering;

use super::bignum::Big;

/// Worst-case output length of [`format_f64`]: sign, `0.`, 323 leading
/// zeros for the smallest subnormal, and up to 17 significant digits.
pub const MAX_F64_ASCII: usize = 344;

const FRACTION_BITS: u32 = 52;
const FRACTION_MASK: u64 = (1 << FRACTION_BITS) - 1;
const EXPONENT_MASK: u64 = 0x7FF;
const HIDDEN_BIT: u64 = 1 << FRACTION_BITS;

struct Decimal {
    /// Raw digit values `0..=9`, most significant first.
    digits: [u8; 18],
    len: usize,
    /// Decimal exponent: the value is `0.digits * 10^exp10`.
    exp10: i32,
}

/// Formats `value` into the front of `dst`, returning the byte count.
///
/// The result is the shortest decimal string that parses back (round to
/// nearest, ties to even) to the identical bit pattern. Signed zero,
/// infinities, and NaN are written as the fixed literals `0.0`, `-0.0`,
/// `Infinity`, `-Infinity`, and `NaN`.
///
/// # Panics
///
/// When `dst` is shorter than [`MAX_F64_ASCII`].
pub fn format_f64(dst: &mut [u8], value: f64) -> usize {
    assert!(dst.len() >= MAX_F64_ASCII);
    let bits = value.to_bits();
    let negative = bits >> 63 == 1;
    let biased = ((bits >> FRACTION_BITS) & EXPONENT_MASK) as i32;
    let fraction = bits & FRACTION_MASK;

    if biased == EXPONENT_MASK as i32 {
        let literal: &[u8] = if fraction != 0 {
            b"NaN"
        } else if negative {
            b"-Infinity"
        } else {
            b"Infinity"
        };
        dst[..literal.len()].copy_from_slice(literal);
        return literal.len();
    }
    if biased == 0 && fraction == 0 {
        let literal: &[u8] = if negative { b"-0.0" } else { b"0.0" };
        dst[..literal.len()].copy_from_slice(literal);
        return literal.len();
    }

    // Normalize to value = mantissa * 2^exp with an integer mantissa.
    let (mantissa, exp) = if biased == 0 {
        (fraction, 1 - 1075)
    } else {
        (fraction | HIDDEN_BIT, biased - 1075)
    };
    // At a power-of-two boundary (other than the smallest normal) the gap
    // below the value is half the gap above it.
    let unequal_gaps = fraction == 0 && biased > 1;
    let decimal = shortest_decimal(mantissa, exp, unequal_gaps);
    emit(dst, negative, &decimal)
}

fn high(scaled: &Big, s: &Big, even: bool) -> bool {
    match scaled.cmp(s) {
        Ordering::Greater => true,
        Ordering::Equal => even,
        Ordering::Less => false,
    }
}

fn low(r: &Big, m_minus: &Big, even: bool) -> bool {
    match r.cmp(m_minus) {
        Ordering::Less => true,
        Ordering::Equal => even,
        Ordering::Greater => false,
    }
}

/// Quotient of `r / s` in `0..=9`; leaves the remainder in `r`.
fn next_digit(r: &mut Big, s: &Big) -> u8 {
    let mut digit = 0u8;
    while (*r).cmp(s) != Ordering::Less {
        r.sub_assign(s);
        digit += 1;
        debug_assert!(digit < 10);
    }
    digit
}

#[allow(clippy::too_many_lines)]
fn shortest_decimal(mantissa: u64, exp: i32, unequal_gaps: bool) -> Decimal {
    // Round-to-nearest-even maps a boundary value back to this mantissa only
    // when the mantissa is even, so even mantissas own their interval ends.
    let even = mantissa & 1 == 0;

    // value = r / s; boundaries at (r - m_minus) / s and (r + m_plus) / s.
    let mut r = Big::from_u64(mantissa);
    let mut s;
    let mut m_plus;
    let mut m_minus;
    if exp >= 0 {
        let exp = exp.unsigned_abs();
        if unequal_gaps {
            r.shl(exp + 2);
            s = Big::from_u64(4);
            m_plus = Big::pow2(exp + 1);
            m_minus = Big::pow2(exp);
        } else {
            r.shl(exp + 1);
            s = Big::from_u64(2);
            m_plus = Big::pow2(exp);
            m_minus = Big::pow2(exp);
        }
    } else {
        let shift = exp.unsigned_abs();
        if unequal_gaps {
            r.shl(2);
            s = Big::pow2(shift + 2);
            m_plus = Big::from_u64(2);
            m_minus = Big::from_u64(1);
        } else {
            r.shl(1);
            s = Big::pow2(shift + 1);
            m_plus = Big::from_u64(1);
            m_minus = Big::from_u64(1);
        }
    }

    // Estimate ceil(log10(value)) from the binary exponent; 1233/4096 is a
    // lower approximation of log10(2) so the fixup below only has to move by
    // at most one in either direction.
    let log2 = 63 - i32::try_from(mantissa.leading_zeros()).unwrap_or(0) + exp;
    let mut exp10 = ((log2 * 1233) >> 12) + 1;
    if exp10 >= 0 {
        s.mul_pow10(exp10.unsigned_abs());
    } else {
        let power = exp10.unsigned_abs();
        r.mul_pow10(power);
        m_plus.mul_pow10(power);
        m_minus.mul_pow10(power);
    }

    // Fix the estimate so that value + m_plus lies in [1/10, 1) scaled by s.
    loop {
        if high(&r.plus(&m_plus), &s, even) {
            s.times10();
            exp10 += 1;
            continue;
        }
        let mut boundary = r.plus(&m_plus);
        boundary.times10();
        if high(&boundary, &s, even) {
            break;
        }
        r.times10();
        m_plus.times10();
        m_minus.times10();
        exp10 -= 1;
    }

    let mut digits = [0u8; 18];
    let mut len = 0;
    loop {
        r.times10();
        m_plus.times10();
        m_minus.times10();
        let mut digit = next_digit(&mut r, &s);
        let lo = low(&r, &m_minus, even);
        let hi = high(&r.plus(&m_plus), &s, even);
        if !lo && !hi {
            digits[len] = digit;
            len += 1;
            continue;
        }
        if hi && !lo {
            digit += 1;
        } else if lo && hi {
            // Both boundaries reach: round half to even on the remainder.
            let mut doubled = r;
            doubled.shl(1);
            digit += match doubled.cmp(&s) {
                Ordering::Less => 0,
                Ordering::Greater => 1,
                Ordering::Equal => digit & 1,
            };
        }
        digits[len] = digit;
        len += 1;
        break;
    }

    // A rounded-up 9 carries left; a carry out of the first digit shifts the
    // decimal point instead of adding a digit.
    let mut i = len;
    while i > 0 && digits[i - 1] == 10 {
        digits[i - 1] = 0;
        if i == 1 {
            digits[0] = 1;
            exp10 += 1;
        } else {
            digits[i - 2] += 1;
        }
        i -= 1;
    }
    while len > 1 && digits[len - 1] == 0 {
        len -= 1;
    }

    Decimal {
        digits,
        len,
        exp10,
    }
}

fn emit(dst: &mut [u8], negative: bool, decimal: &Decimal) -> usize {
    let digits = &decimal.digits[..decimal.len];
    let mut pos = 0;
    let mut push = |dst: &mut [u8], byte: u8| {
        dst[pos] = byte;
        pos += 1;
    };
    if negative {
        push(dst, b'-');
    }
    let point = decimal.exp10;
    if point <= 0 {
        push(dst, b'0');
        push(dst, b'.');
        for _ in 0..point.unsigned_abs() {
            push(dst, b'0');
        }
        for &digit in digits {
            push(dst, b'0' + digit);
        }
    } else if point as usize >= digits.len() {
        for &digit in digits {
            push(dst, b'0' + digit);
        }
        for _ in 0..(point as usize - digits.len()) {
            push(dst, b'0');
        }
        push(dst, b'.');
        push(dst, b'0');
    } else {
        let split = point as usize;
        for &digit in &digits[..split] {
            push(dst, b'0' + digit);
        }
        push(dst, b'.');
        for &digit in &digits[split..] {
            push(dst, b'0' + digit);
        }
    }
    pos
}
