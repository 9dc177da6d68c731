//! Fixed-width unsigned big integer backing the decimal double formatter.
//!
//! 1280 bits is enough headroom for a 53-bit mantissa scaled through the
//! full IEEE-754 binary exponent range plus the powers of ten the digit
//! generator multiplies in along the way.

use core::cmp::Ordering;

const LIMBS: usize = 20;

/// Little-endian limb order; value is the weighted sum of `limbs`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Big {
    limbs: [u64; LIMBS],
}

impl Big {
    pub(crate) const fn zero() -> Self {
        Big { limbs: [0; LIMBS] }
    }

    pub(crate) const fn from_u64(value: u64) -> Self {
        let mut big = Big::zero();
        big.limbs[0] = value;
        big
    }

    /// `2^bits`.
    pub(crate) fn pow2(bits: u32) -> Self {
        let mut big = Big::from_u64(1);
        big.shl(bits);
        big
    }

    pub(crate) fn add_assign(&mut self, other: &Big) {
        let mut carry = false;
        for (limb, &rhs) in self.limbs.iter_mut().zip(&other.limbs) {
            let (sum, c1) = limb.overflowing_add(rhs);
            let (sum, c2) = sum.overflowing_add(u64::from(carry));
            *limb = sum;
            carry = c1 || c2;
        }
        debug_assert!(!carry, "Big overflow in add");
    }

    pub(crate) fn plus(&self, other: &Big) -> Big {
        let mut sum = *self;
        sum.add_assign(other);
        sum
    }

    /// Requires `self >= other`.
    pub(crate) fn sub_assign(&mut self, other: &Big) {
        let mut borrow = false;
        for (limb, &rhs) in self.limbs.iter_mut().zip(&other.limbs) {
            let (diff, b1) = limb.overflowing_sub(rhs);
            let (diff, b2) = diff.overflowing_sub(u64::from(borrow));
            *limb = diff;
            borrow = b1 || b2;
        }
        debug_assert!(!borrow, "Big underflow in sub");
    }

    pub(crate) fn mul_small(&mut self, factor: u64) {
        let mut carry: u128 = 0;
        for limb in &mut self.limbs {
            let product = u128::from(*limb) * u128::from(factor) + carry;
            *limb = product as u64;
            carry = product >> 64;
        }
        debug_assert_eq!(carry, 0, "Big overflow in mul");
    }

    pub(crate) fn times10(&mut self) {
        self.mul_small(10);
    }

    pub(crate) fn shl(&mut self, bits: u32) {
        let limb_shift = (bits / 64) as usize;
        let bit_shift = bits % 64;
        if limb_shift > 0 {
            for i in (0..LIMBS).rev() {
                self.limbs[i] = if i >= limb_shift {
                    self.limbs[i - limb_shift]
                } else {
                    0
                };
            }
        }
        if bit_shift > 0 {
            let mut carry = 0u64;
            for limb in &mut self.limbs {
                let next = *limb >> (64 - bit_shift);
                *limb = (*limb << bit_shift) | carry;
                carry = next;
            }
            debug_assert_eq!(carry, 0, "Big overflow in shl");
        }
    }

    pub(crate) fn mul_pow10(&mut self, mut power: u32) {
        // 10^19 is the largest power of ten in one limb.
        const POW10_19: u64 = 10_000_000_000_000_000_000;
        const POW10_SMALL: [u64; 19] = [
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
        ];
        while power >= 19 {
            self.mul_small(POW10_19);
            power -= 19;
        }
        if power > 0 {
            self.mul_small(POW10_SMALL[power as usize]);
        }
    }
}

impl Ord for Big {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.limbs.iter().rev().zip(other.limbs.iter().rev()) {
            match a.cmp(b) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Big {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
