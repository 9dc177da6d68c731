//! Bounds validation and the shared capacity-growth policy.
//!
//! Every storage variant funnels its accesses through [`check_bounds`]; the
//! two growable variants additionally share [`grown_capacity`], the 1.5x
//! growth rule capped at a hard maximum.

use crate::error::BufferError;

/// Validates that `[index, index + length)` lies inside `[0, capacity)`.
///
/// The addition is performed with checked arithmetic so an `index + length`
/// that wraps is rejected rather than aliased back into range.
///
/// # Errors
///
/// [`BufferError::OutOfBounds`] carrying the rejected triple.
#[inline]
pub fn check_bounds(index: usize, length: usize, capacity: usize) -> Result<(), BufferError> {
    match index.checked_add(length) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(BufferError::OutOfBounds {
            index,
            length,
            capacity,
        }),
    }
}

/// Converts a wire-supplied signed 32-bit length into a `usize`.
///
/// Lengths travel as 4-byte signed integers in the length-prefixed string
/// format; a negative value is a bounds violation, not a huge unsigned one.
#[inline]
pub(crate) fn wire_length(length: i32) -> Result<usize, BufferError> {
    usize::try_from(length).map_err(|_| BufferError::NegativeLength { length })
}

/// Computes the next capacity for a growable buffer.
///
/// Returns the smallest value `>= max(current, required)` reachable by
/// repeatedly multiplying `current` by 1.5, capped at `max`. A `required`
/// position past `max` is a capacity-exceeded error; the caller must leave
/// the buffer untouched in that case.
pub(crate) fn grown_capacity(
    current: usize,
    required: usize,
    max: usize,
) -> Result<usize, BufferError> {
    if required > max {
        return Err(BufferError::CapacityExceeded {
            required,
            max_capacity: max,
        });
    }
    let mut capacity = current;
    while capacity < required {
        // The +1 floor keeps 0- and 1-byte capacities from stalling.
        let step = core::cmp::max(capacity >> 1, 1);
        capacity = capacity.saturating_add(step).min(max);
    }
    Ok(capacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_bounds_access_passes() {
        assert_eq!(check_bounds(0, 1, 1), Ok(()));
        assert_eq!(check_bounds(7, 0, 7), Ok(()));
        assert_eq!(check_bounds(0, 64, 64), Ok(()));
    }

    #[test]
    fn end_past_capacity_fails() {
        assert_eq!(
            check_bounds(64, 1, 64),
            Err(BufferError::OutOfBounds {
                index: 64,
                length: 1,
                capacity: 64
            })
        );
    }

    #[test]
    fn overflowing_end_fails() {
        assert!(check_bounds(usize::MAX, 2, usize::MAX).is_err());
    }

    #[test]
    fn negative_wire_length_rejected() {
        assert_eq!(
            wire_length(-1),
            Err(BufferError::NegativeLength { length: -1 })
        );
        assert_eq!(wire_length(0), Ok(0));
        assert_eq!(wire_length(i32::MAX), Ok(i32::MAX as usize));
    }

    #[test]
    fn growth_multiplies_by_three_halves() {
        assert_eq!(grown_capacity(128, 129, usize::MAX), Ok(192));
        assert_eq!(grown_capacity(128, 200, usize::MAX), Ok(288));
        assert_eq!(grown_capacity(128, 128, usize::MAX), Ok(128));
        assert_eq!(grown_capacity(128, 0, usize::MAX), Ok(128));
    }

    #[test]
    fn growth_caps_at_max() {
        assert_eq!(grown_capacity(128, 250, 250), Ok(250));
        assert_eq!(
            grown_capacity(128, 251, 250),
            Err(BufferError::CapacityExceeded {
                required: 251,
                max_capacity: 250
            })
        );
    }

    #[test]
    fn growth_from_tiny_capacity_terminates() {
        assert_eq!(grown_capacity(0, 3, 16), Ok(3));
        assert_eq!(grown_capacity(1, 100, 128), Ok(128));
    }
}
