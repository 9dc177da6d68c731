//! Buffers over OS file mappings.
//!
//! Map mode is a type-level choice: [`MappedBuffer`] is a read-write
//! mapping carrying the full contract, [`ReadOnlyMappedBuffer`] a read-only
//! mapping carrying only [`ByteView`]. Neither owns or closes the file
//! handle it was mapped from; the OS mapping itself is released exactly
//! once, when the buffer is dropped (or replaced by `remap`).

use core::fmt;
use std::{fs::File, io};

use memmap2::{Mmap, MmapMut, MmapOptions};

use crate::{
    bounds::check_bounds,
    error::BufferError,
    view::{AtomicByteView, ByteView, ByteViewMut, debug_prefix, impl_content_traits},
};

/// Read-write buffer over a memory-mapped byte range of a file.
///
/// Capacity equals the mapped length and never grows in place; `remap`
/// releases the mapping and establishes a new one.
pub struct MappedBuffer {
    map: MmapMut,
}

impl MappedBuffer {
    /// Maps `length` bytes of `file` starting at byte `offset` for reading
    /// and writing.
    ///
    /// # Errors
    ///
    /// Any `mmap` failure reported by the OS.
    ///
    /// # Safety
    ///
    /// The mapped range must not be truncated or modified through the file
    /// (or another mapping) while this buffer exists; the mapping aliases
    /// the file's pages directly.
    pub unsafe fn map(file: &File, offset: u64, length: usize) -> io::Result<Self> {
        // SAFETY: forwarded to the caller's contract above.
        let map = unsafe { MmapOptions::new().offset(offset).len(length).map_mut(file)? };
        Ok(MappedBuffer { map })
    }

    /// Releases the current mapping and maps a new range of `file`.
    ///
    /// # Errors
    ///
    /// Any `mmap` failure reported by the OS; on failure the previous
    /// mapping is left in place.
    ///
    /// # Safety
    ///
    /// As [`MappedBuffer::map`].
    pub unsafe fn remap(&mut self, file: &File, offset: u64, length: usize) -> io::Result<()> {
        // SAFETY: forwarded to the caller's contract above.
        let map = unsafe { MmapOptions::new().offset(offset).len(length).map_mut(file)? };
        // dropping the previous MmapMut unmaps it, exactly once
        self.map = map;
        Ok(())
    }

    /// Flushes dirty pages of the mapping back to the file.
    ///
    /// # Errors
    ///
    /// Any `msync` failure reported by the OS.
    pub fn flush(&self) -> io::Result<()> {
        self.map.flush()
    }
}

impl ByteView for MappedBuffer {
    fn capacity(&self) -> usize {
        self.map.len()
    }

    fn as_bytes(&self) -> &[u8] {
        &self.map
    }
}

impl ByteViewMut for MappedBuffer {
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.map
    }

    fn ensure_capacity(&mut self, index: usize, length: usize) -> Result<(), BufferError> {
        check_bounds(index, length, self.map.len())
    }
}

impl AtomicByteView for MappedBuffer {
    fn base_ptr(&self) -> *mut u8 {
        // mappings are page-aligned, comfortably past the 8-byte requirement
        self.map.as_ptr().cast_mut()
    }
}

impl fmt::Debug for MappedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappedBuffer")
            .field("capacity", &self.capacity())
            .field("bytes", &debug_prefix(self.as_bytes()))
            .finish()
    }
}

impl_content_traits!(MappedBuffer);

/// Read-only buffer over a memory-mapped byte range of a file.
pub struct ReadOnlyMappedBuffer {
    map: Mmap,
}

impl ReadOnlyMappedBuffer {
    /// Maps `length` bytes of `file` starting at byte `offset` for reading.
    ///
    /// # Errors
    ///
    /// Any `mmap` failure reported by the OS.
    ///
    /// # Safety
    ///
    /// As [`MappedBuffer::map`].
    pub unsafe fn map(file: &File, offset: u64, length: usize) -> io::Result<Self> {
        // SAFETY: forwarded to the caller's contract above.
        let map = unsafe { MmapOptions::new().offset(offset).len(length).map(file)? };
        Ok(ReadOnlyMappedBuffer { map })
    }
}

impl ByteView for ReadOnlyMappedBuffer {
    fn capacity(&self) -> usize {
        self.map.len()
    }

    fn as_bytes(&self) -> &[u8] {
        &self.map
    }
}

impl fmt::Debug for ReadOnlyMappedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadOnlyMappedBuffer")
            .field("capacity", &self.capacity())
            .field("bytes", &debug_prefix(self.as_bytes()))
            .finish()
    }
}

impl_content_traits!(ReadOnlyMappedBuffer);
