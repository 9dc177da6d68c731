//! Fixed-capacity buffer over an off-heap allocation.

use alloc::alloc::{Layout, alloc_zeroed, dealloc, handle_alloc_error};
use core::{fmt, ptr::NonNull};

use crate::{
    bounds::check_bounds,
    error::BufferError,
    view::{AtomicByteView, ByteView, ByteViewMut, debug_prefix, impl_content_traits},
};

/// All native allocations are 8-byte aligned so the atomic accessors only
/// have to validate the index, not the base.
pub(crate) const NATIVE_ALIGN: usize = 8;

fn layout_for(capacity: usize) -> Layout {
    Layout::from_size_align(capacity, NATIVE_ALIGN).expect("capacity overflows the allocator limit")
}

/// Zeroed allocation of `capacity` bytes; dangling for zero capacity.
pub(crate) fn allocate(capacity: usize) -> NonNull<u8> {
    if capacity == 0 {
        return NonNull::dangling();
    }
    let layout = layout_for(capacity);
    // SAFETY: layout has non-zero size.
    let Some(ptr) = NonNull::new(unsafe { alloc_zeroed(layout) }) else {
        handle_alloc_error(layout);
    };
    ptr
}

/// Releases an allocation produced by [`allocate`].
///
/// # Safety
///
/// `ptr` must come from `allocate(capacity)` with the same `capacity`, and
/// must not be used afterwards.
pub(crate) unsafe fn deallocate(ptr: NonNull<u8>, capacity: usize) {
    if capacity > 0 {
        // SAFETY: same layout as the allocation, per the contract above.
        unsafe { dealloc(ptr.as_ptr(), layout_for(capacity)) };
    }
}

/// Fixed-capacity buffer backed by an off-heap allocation, freed on drop.
///
/// Unlike [`HeapBuffer`](crate::HeapBuffer) the backing is 8-byte aligned,
/// so this variant also carries the [`AtomicByteView`] accessors.
pub struct NativeBuffer {
    ptr: NonNull<u8>,
    capacity: usize,
}

impl NativeBuffer {
    /// A zero-filled buffer of `capacity` bytes of native memory.
    ///
    /// # Panics
    ///
    /// When `capacity` overflows the allocator's size limit, or on
    /// allocation failure.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        NativeBuffer {
            ptr: allocate(capacity),
            capacity,
        }
    }

    /// A buffer holding a copy of `bytes`, capacity equal to its length.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Self {
        let buffer = NativeBuffer::new(bytes.len());
        if !bytes.is_empty() {
            // SAFETY: freshly allocated with exactly `bytes.len()` bytes.
            unsafe {
                core::ptr::copy_nonoverlapping(bytes.as_ptr(), buffer.ptr.as_ptr(), bytes.len());
            }
        }
        buffer
    }
}

impl Drop for NativeBuffer {
    fn drop(&mut self) {
        // SAFETY: ptr/capacity came from `allocate` and are dropped once.
        unsafe { deallocate(self.ptr, self.capacity) };
    }
}

// SAFETY: the allocation is uniquely owned; plain mutation requires `&mut
// self` and the only `&self` mutation path is the atomic accessor family.
unsafe impl Send for NativeBuffer {}
unsafe impl Sync for NativeBuffer {}

impl ByteView for NativeBuffer {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn as_bytes(&self) -> &[u8] {
        // SAFETY: the allocation is valid for `capacity` bytes and zeroed.
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.capacity) }
    }
}

impl ByteViewMut for NativeBuffer {
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        // SAFETY: as `as_bytes`, with exclusivity from `&mut self`.
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.capacity) }
    }

    fn ensure_capacity(&mut self, index: usize, length: usize) -> Result<(), BufferError> {
        check_bounds(index, length, self.capacity)
    }
}

impl AtomicByteView for NativeBuffer {
    fn base_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }
}

impl fmt::Debug for NativeBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeBuffer")
            .field("capacity", &self.capacity)
            .field("bytes", &debug_prefix(self.as_bytes()))
            .finish()
    }
}

impl_content_traits!(NativeBuffer);
