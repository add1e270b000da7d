use core::fmt;

/// A structured code identifying the reason a codec operation failed.
///
/// This enum is intentionally stable and string-free to support `no_std` and to remain hot-path friendly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Fewer bytes are available than the decode step requires.
    InsufficientInput,
    /// The destination width, length, or remaining buffer capacity is too small for the value.
    InsufficientCapacity,
    /// The lead byte matches none of the recognized forms for the operation attempted.
    MalformedTag,
    /// Structural nesting exceeds the configured walker depth limit.
    DepthExceeded,
    /// A string payload is not valid UTF-8.
    Utf8Invalid,
}

/// A codec error with a stable code and a byte offset.
///
/// The offset is the cursor position at which the failure was detected: the
/// read position for decode failures, the write position for capacity
/// failures. Single-step operations leave the cursor at that position;
/// multi-step walker operations do not (see [`crate::skip`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackError {
    /// The error code.
    pub code: ErrorCode,
    /// Byte offset into the buffer where the error was detected.
    pub offset: usize,
}

impl PackError {
    /// Construct an error at `offset`.
    #[inline]
    #[must_use]
    pub const fn new(code: ErrorCode, offset: usize) -> Self {
        Self { code, offset }
    }
}

impl fmt::Display for PackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.code {
            ErrorCode::InsufficientInput => "insufficient input bytes",
            ErrorCode::InsufficientCapacity => "insufficient destination capacity",
            ErrorCode::MalformedTag => "malformed or unexpected tag byte",
            ErrorCode::DepthExceeded => "nesting depth limit exceeded",
            ErrorCode::Utf8Invalid => "string must be valid UTF-8",
        };
        write!(f, "msgpack codec failed at {}: {msg}", self.offset)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PackError {}
