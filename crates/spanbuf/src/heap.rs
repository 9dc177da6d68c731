//! Fixed-capacity buffer over owned heap bytes.

use alloc::{boxed::Box, vec, vec::Vec};
use core::fmt;

use crate::{
    bounds::check_bounds,
    error::BufferError,
    view::{ByteView, ByteViewMut, debug_prefix, impl_content_traits},
};

/// Fixed-capacity buffer backed by an owned heap allocation.
///
/// Capacity is set at construction and never changes; a write past the end
/// is a bounds violation, not a growth trigger.
#[derive(Clone)]
pub struct HeapBuffer {
    bytes: Box<[u8]>,
}

impl HeapBuffer {
    /// A zero-filled buffer of `capacity` bytes.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        HeapBuffer {
            bytes: vec![0; capacity].into_boxed_slice(),
        }
    }

    /// A buffer holding a copy of `bytes`, capacity equal to its length.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Self {
        HeapBuffer {
            bytes: bytes.into(),
        }
    }
}

impl From<Vec<u8>> for HeapBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        HeapBuffer {
            bytes: bytes.into_boxed_slice(),
        }
    }
}

impl From<Box<[u8]>> for HeapBuffer {
    fn from(bytes: Box<[u8]>) -> Self {
        HeapBuffer { bytes }
    }
}

impl ByteView for HeapBuffer {
    fn capacity(&self) -> usize {
        self.bytes.len()
    }

    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl ByteViewMut for HeapBuffer {
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    fn ensure_capacity(&mut self, index: usize, length: usize) -> Result<(), BufferError> {
        check_bounds(index, length, self.bytes.len())
    }
}

impl fmt::Debug for HeapBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapBuffer")
            .field("capacity", &self.capacity())
            .field("bytes", &debug_prefix(self.as_bytes()))
            .finish()
    }
}

impl_content_traits!(HeapBuffer);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_capacity_is_not_grown() {
        let mut buffer = HeapBuffer::new(8);
        assert_eq!(buffer.capacity(), 8);
        buffer.put_u64(0, u64::MAX).unwrap();
        assert_eq!(
            buffer.put_u8(8, 1),
            Err(BufferError::OutOfBounds {
                index: 8,
                length: 1,
                capacity: 8
            })
        );
        assert_eq!(buffer.capacity(), 8);
    }

    #[test]
    fn wraps_existing_bytes() {
        let buffer = HeapBuffer::from_slice(b"abc");
        assert_eq!(buffer.capacity(), 3);
        assert_eq!(buffer.get_u8(0), Ok(b'a'));
        let owned: HeapBuffer = alloc::vec![b'a', b'b', b'c'].into();
        assert_eq!(buffer, owned);
    }
}
