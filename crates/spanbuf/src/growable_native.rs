//! Growable buffer over an off-heap allocation.

use core::{fmt, ptr::NonNull};

use crate::{
    bounds::grown_capacity,
    error::BufferError,
    growable_heap::DEFAULT_INITIAL_CAPACITY,
    native::{allocate, deallocate},
    view::{AtomicByteView, ByteView, ByteViewMut, debug_prefix, impl_content_traits},
};

/// Native-memory buffer that grows by 1.5x on any write past its capacity,
/// up to a hard ceiling.
///
/// Growth allocates a fresh zeroed region, copies `[0, old_capacity)` into
/// it, and frees the old region; a refused growth leaves the buffer at its
/// previous capacity and content.
pub struct GrowableNativeBuffer {
    ptr: NonNull<u8>,
    capacity: usize,
    max_capacity: usize,
}

impl GrowableNativeBuffer {
    /// Ceiling applied when none is supplied.
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
    ///
    /// # Panics
    ///
    /// When the initial allocation fails.
    #[must_use]
    pub fn with_max_capacity(initial_capacity: usize, max_capacity: usize) -> Self {
        let capacity = initial_capacity.min(max_capacity);
        GrowableNativeBuffer {
            ptr: allocate(capacity),
            capacity,
            max_capacity,
        }
    }

    /// The configured growth ceiling.
    #[must_use]
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    fn grow_to(&mut self, new_capacity: usize) {
        let new_ptr = allocate(new_capacity);
        // SAFETY: both regions are valid, distinct allocations; the old one
        // holds `capacity` initialized bytes.
        unsafe {
            core::ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), self.capacity);
            deallocate(self.ptr, self.capacity);
        }
        self.ptr = new_ptr;
        self.capacity = new_capacity;
    }
}

impl Default for GrowableNativeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for GrowableNativeBuffer {
    fn drop(&mut self) {
        // SAFETY: ptr/capacity came from `allocate` and are dropped once.
        unsafe { deallocate(self.ptr, self.capacity) };
    }
}

// SAFETY: as `NativeBuffer`: uniquely owned allocation, plain mutation
// behind `&mut self`, atomic accessors the only `&self` mutation path.
unsafe impl Send for GrowableNativeBuffer {}
unsafe impl Sync for GrowableNativeBuffer {}

impl ByteView for GrowableNativeBuffer {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn as_bytes(&self) -> &[u8] {
        // SAFETY: the allocation is valid for `capacity` bytes.
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.capacity) }
    }
}

impl ByteViewMut for GrowableNativeBuffer {
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        // SAFETY: as `as_bytes`, with exclusivity from `&mut self`.
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.capacity) }
    }

    fn ensure_capacity(&mut self, index: usize, length: usize) -> Result<(), BufferError> {
        let required = index
            .checked_add(length)
            .ok_or(BufferError::OutOfBounds {
                index,
                length,
                capacity: self.capacity,
            })?;
        if required <= self.capacity {
            return Ok(());
        }
        let new_capacity = grown_capacity(self.capacity, required, self.max_capacity)?;
        self.grow_to(new_capacity);
        Ok(())
    }
}

impl AtomicByteView for GrowableNativeBuffer {
    fn base_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }
}

impl fmt::Debug for GrowableNativeBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrowableNativeBuffer")
            .field("capacity", &self.capacity)
            .field("max_capacity", &self.max_capacity)
            .field("bytes", &debug_prefix(self.as_bytes()))
            .finish()
    }
}

impl_content_traits!(GrowableNativeBuffer);
