//! Growable buffer over owned heap bytes.

use alloc::{vec, vec::Vec};
use core::fmt;

use crate::{
    bounds::grown_capacity,
    error::BufferError,
    view::{ByteView, ByteViewMut, debug_prefix, impl_content_traits},
};

/// Initial capacity of the growable variants unless one is supplied.
pub const DEFAULT_INITIAL_CAPACITY: usize = 128;

/// Heap-backed buffer that grows by 1.5x on any write past its capacity,
/// up to a hard ceiling.
///
/// Growth either fully succeeds or has no visible effect: a refused growth
/// leaves capacity and content exactly as they were. New capacity reads as
/// zeroes and existing bytes are preserved.
#[derive(Clone)]
pub struct GrowableHeapBuffer {
    bytes: Vec<u8>,
    max_capacity: usize,
}

impl GrowableHeapBuffer {
    /// Ceiling applied when none is supplied, just under the platform's
    /// allocation limit.
    pub const MAX_CAPACITY: usize = isize::MAX as usize - 8;

    /// A buffer with the default initial capacity and ceiling.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    /// A buffer starting at `initial_capacity` with the default ceiling.
    #[must_use]
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self::with_max_capacity(initial_capacity, Self::MAX_CAPACITY)
    }

    /// A buffer starting at `initial_capacity`, never growing past
    /// `max_capacity`.
    #[must_use]
    pub fn with_max_capacity(initial_capacity: usize, max_capacity: usize) -> Self {
        GrowableHeapBuffer {
            bytes: vec![0; initial_capacity.min(max_capacity)],
            max_capacity,
        }
    }

    /// The configured growth ceiling.
    #[must_use]
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }
}

impl Default for GrowableHeapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteView for GrowableHeapBuffer {
    fn capacity(&self) -> usize {
        self.bytes.len()
    }

    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl ByteViewMut for GrowableHeapBuffer {
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    fn ensure_capacity(&mut self, index: usize, length: usize) -> Result<(), BufferError> {
        let required = index
            .checked_add(length)
            .ok_or(BufferError::OutOfBounds {
                index,
                length,
                capacity: self.bytes.len(),
            })?;
        if required <= self.bytes.len() {
            return Ok(());
        }
        let new_capacity = grown_capacity(self.bytes.len(), required, self.max_capacity)?;
        self.bytes.resize(new_capacity, 0);
        Ok(())
    }
}

impl fmt::Debug for GrowableHeapBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrowableHeapBuffer")
            .field("capacity", &self.capacity())
            .field("max_capacity", &self.max_capacity)
            .field("bytes", &debug_prefix(self.as_bytes()))
            .finish()
    }
}

impl_content_traits!(GrowableHeapBuffer);
