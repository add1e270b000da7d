use crate::{ErrorCode, PackError};

#[cfg(feature = "simdutf8")]
use simdutf8::basic as simd_utf8;

/// Validates UTF-8 bytes and returns a borrowed `&str` on success.
#[inline]
pub(crate) fn validate(bytes: &[u8], off: usize) -> Result<&str, PackError> {
    #[cfg(feature = "simdutf8")]
    {
        simd_utf8::from_utf8(bytes).map_err(|_| PackError::new(ErrorCode::Utf8Invalid, off))
    }

    #[cfg(not(feature = "simdutf8"))]
    {
        core::str::from_utf8(bytes).map_err(|_| PackError::new(ErrorCode::Utf8Invalid, off))
    }
}
