use bstr::BString;
use thiserror::Error;

/// Errors raised by buffer access, capacity management, and the string codec.
///
/// Every variant is local to the call that produced it: the buffer is left in
/// the state it had before the failing operation, including a growable buffer
/// whose growth was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// `index + length` overflows or reaches past `capacity`.
    #[error("index out of bounds: index={index} length={length} capacity={capacity}")]
    OutOfBounds {
        /// Requested start of the access.
        index: usize,
        /// Requested length of the access.
        length: usize,
        /// Capacity of the buffer at the time of the access.
        capacity: usize,
    },

    /// A wire-supplied 32-bit length was negative.
    #[error("negative wire length: {length}")]
    NegativeLength {
        /// The signed length read from the buffer.
        length: i32,
    },

    /// A growable buffer would have to grow past its configured ceiling.
    #[error("capacity exceeded: required={required} max_capacity={max_capacity}")]
    CapacityExceeded {
        /// Position the write would have to reach.
        required: usize,
        /// Hard capacity ceiling of the buffer.
        max_capacity: usize,
    },

    /// An atomic accessor was given an index not aligned for its word size.
    #[error("misaligned atomic access: index={index} requires {align}-byte alignment")]
    Misaligned {
        /// The offending index.
        index: usize,
        /// Required alignment in bytes.
        align: usize,
    },

    /// An encoded string payload exceeds a caller-supplied bound.
    #[error("encoded length {length} exceeds bound {max}")]
    SizeExceeded {
        /// Encoded payload length in bytes.
        length: usize,
        /// The caller's maximum.
        max: usize,
    },
}

/// Errors raised by the ASCII numeric codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsciiError {
    /// A byte outside `'0'..='9'` (and outside a permitted leading sign) was
    /// encountered while parsing. Carries the raw text parsed.
    #[error("malformed number: {text}")]
    Malformed {
        /// The full slice handed to the parser.
        text: BString,
    },

    /// The parsed magnitude exceeds the target type's range.
    #[error("numeric overflow: {text}")]
    Overflow {
        /// The full slice handed to the parser.
        text: BString,
    },

    /// An empty slice (or `length == 0`) was handed to a parser.
    #[error("cannot parse an empty slice")]
    Empty,

    /// A padded put was asked to fit a value into fewer digits than it needs.
    #[error("{value} does not fit in {width} digits")]
    DoesNotFit {
        /// The value to format.
        value: u64,
        /// Requested field width in digits.
        width: usize,
    },

    /// The underlying buffer access failed.
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

impl AsciiError {
    pub(crate) fn malformed(text: &[u8]) -> Self {
        AsciiError::Malformed { text: text.into() }
    }

    pub(crate) fn overflow(text: &[u8]) -> Self {
        AsciiError::Overflow { text: text.into() }
    }
}
