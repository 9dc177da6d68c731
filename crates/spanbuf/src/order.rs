/// Byte order of a multi-byte access.
///
/// Every typed accessor exists in a native-order form plus explicit
/// little-endian, big-endian, and runtime-selected forms; a requested order
/// different from [`ByteOrder::NATIVE`] byte-swaps after read / before write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Least-significant byte first.
    LittleEndian,
    /// Most-significant byte first.
    BigEndian,
}

impl ByteOrder {
    /// The byte order of the host platform.
    pub const NATIVE: ByteOrder = if cfg!(target_endian = "big") {
        ByteOrder::BigEndian
    } else {
        ByteOrder::LittleEndian
    };

    /// Whether this order matches the host platform's.
    #[must_use]
    pub const fn is_native(self) -> bool {
        matches!(
            (self, ByteOrder::NATIVE),
            (ByteOrder::LittleEndian, ByteOrder::LittleEndian)
                | (ByteOrder::BigEndian, ByteOrder::BigEndian)
        )
    }
}
