/// Result type returned by `finish`.
pub type Result<T> = core::result::Result<T, CodecError>;

/// The error recorded by a `BinaryReader` or `BinaryWriter`.
///
/// Once recorded, the error is kept for the rest of the instance's lifetime.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The stream ended before the requested number of bytes could be read. This covers both
    /// a stream that was already at its end (`actual == 0`) and one that ended part-way through
    /// a field.
    #[error("short read ({actual} of {expected} bytes)")]
    ShortRead {
        /// Bytes the field required.
        expected: u64,
        /// Bytes the stream delivered before it ended.
        actual: u64,
    },

    /// The wrapped stream reported an error.
    #[error("stream I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A bit-width other than 8, 16, 32 or 64 was supplied.
#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
#[error("invalid bit-width {0} (expected 8, 16, 32 or 64)")]
pub struct InvalidBitWidth(pub u8);
