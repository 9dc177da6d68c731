//! Byte-order-aware flat buffers with an allocation-free ASCII numeric
//! codec.
//!
//! One capability contract — [`ByteView`] / [`ByteViewMut`] — over several
//! storage media: fixed heap and native-memory buffers, their growable
//! variants (1.5x growth capped at a ceiling), memory-mapped files behind
//! the `mmap` feature, and plain byte slices. Every access is explicitly
//! bounds-checked; the numeric codec parses and formats integers in batched
//! digit groups and renders doubles in their shortest round-trip decimal
//! form.
//!
//! ```rust
//! use spanbuf::{ByteView, ByteViewMut, GrowableHeapBuffer};
//!
//! let mut buffer = GrowableHeapBuffer::new();
//! assert_eq!(buffer.put_u32_ascii(0, 12345).unwrap(), 5);
//! assert_eq!(buffer.parse_u32_ascii(0, 5).unwrap(), 12345);
//! assert_eq!(buffer.put_i32_ascii(5, i32::MIN).unwrap(), 11);
//! assert_eq!(&buffer.as_bytes()[..16], b"12345-2147483648");
//! ```

#![no_std]
#![allow(missing_docs)]

extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod ascii;
mod bounds;
mod error;
mod growable_heap;
mod growable_native;
mod heap;
#[cfg(feature = "mmap")]
mod mapped;
mod native;
mod order;
mod view;

#[cfg(test)]
mod tests;

pub use bounds::check_bounds;
pub use error::{AsciiError, BufferError};
pub use growable_heap::{DEFAULT_INITIAL_CAPACITY, GrowableHeapBuffer};
pub use growable_native::GrowableNativeBuffer;
pub use heap::HeapBuffer;
#[cfg(feature = "mmap")]
pub use mapped::{MappedBuffer, ReadOnlyMappedBuffer};
pub use native::NativeBuffer;
pub use order::ByteOrder;
pub use view::{AtomicByteView, ByteView, ByteViewMut};
