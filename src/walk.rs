use crate::kind::{classify, ValueKind};
use crate::{scalar, varlen, Buffer, ErrorCode, PackError};

/// Default maximum container nesting depth accepted by the walker.
///
/// Sized for small stacks; adjust explicitly for your deployment via
/// [`WalkLimits`].
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Resource limits for the structural walker.
///
/// The walker descends recursively into arrays and maps, so its stack usage
/// is proportional to document nesting. The depth limit bounds that usage
/// deterministically against adversarial or malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkLimits {
    /// Maximum container nesting depth. Entering any array or map consumes
    /// one level, whether or not it is empty.
    pub max_depth: usize,
}

impl WalkLimits {
    /// Limits with the given maximum nesting depth.
    #[inline]
    #[must_use]
    pub const fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl Default for WalkLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Skip the next encoded value, consuming exactly the bytes it occupies,
/// with [`DEFAULT_MAX_DEPTH`].
///
/// Returns the kind of the skipped value. This is the schema-less primitive:
/// callers use it to step over fields they do not understand while indexing
/// into a document.
///
/// # Errors
///
/// `InsufficientInput` on an empty buffer or truncated value, `MalformedTag`
/// on an unrecognized lead byte, `DepthExceeded` past the nesting limit.
/// After a failure partway through a composite value the cursor position is
/// unspecified (though in bounds); re-init or [`Buffer::reset_all`] before
/// reusing the cursor.
pub fn skip(s: &mut Buffer<'_>) -> Result<ValueKind, PackError> {
    skip_with_limits(s, WalkLimits::default())
}

/// [`skip`] with caller-provided limits.
///
/// # Errors
///
/// As for [`skip`].
pub fn skip_with_limits(s: &mut Buffer<'_>, limits: WalkLimits) -> Result<ValueKind, PackError> {
    skip_value(s, &limits, 0)
}

/// Duplicate the next encoded value from `src` into `dest` byte for byte,
/// with [`DEFAULT_MAX_DEPTH`].
///
/// Returns the kind of the copied value.
///
/// # Errors
///
/// As for [`skip`], plus `InsufficientCapacity` when `dest` cannot hold the
/// value's byte range. After any failure neither cursor's position should be
/// treated as valid for continued use.
pub fn copy(src: &mut Buffer<'_>, dest: &mut Buffer<'_>) -> Result<ValueKind, PackError> {
    copy_with_limits(src, dest, WalkLimits::default())
}

/// [`copy`] with caller-provided limits.
///
/// # Errors
///
/// As for [`copy`].
pub fn copy_with_limits(
    src: &mut Buffer<'_>,
    dest: &mut Buffer<'_>,
    limits: WalkLimits,
) -> Result<ValueKind, PackError> {
    let start = src.position();
    let kind = skip_with_limits(src, limits)?;
    let end = src.position();
    dest.write(&src.storage()[start..end])?;
    Ok(kind)
}

fn skip_value(s: &mut Buffer<'_>, limits: &WalkLimits, depth: usize) -> Result<ValueKind, PackError> {
    let kind = classify(s);
    match kind {
        ValueKind::Empty => Err(PackError::new(ErrorCode::InsufficientInput, s.position())),
        ValueKind::Unknown => Err(PackError::new(ErrorCode::MalformedTag, s.position())),
        ValueKind::Nil => {
            scalar::read_nil(s)?;
            Ok(kind)
        }
        ValueKind::Bool => {
            scalar::read_bool(s)?;
            Ok(kind)
        }
        // Integers are decoded at full width and discarded.
        ValueKind::UInt => {
            scalar::read_u64(s)?;
            Ok(kind)
        }
        ValueKind::SInt => {
            scalar::read_i64(s)?;
            Ok(kind)
        }
        ValueKind::Float => {
            scalar::read_f32(s)?;
            Ok(kind)
        }
        // Sized payloads are stepped over, not copied.
        ValueKind::Str => {
            let len = varlen::read_str_size(s)?;
            advance_payload(s, len)?;
            Ok(kind)
        }
        ValueKind::Bin => {
            let len = varlen::read_bin_size(s)?;
            advance_payload(s, len)?;
            Ok(kind)
        }
        ValueKind::Ext => skip_ext(s),
        ValueKind::Array => {
            if depth >= limits.max_depth {
                return Err(PackError::new(ErrorCode::DepthExceeded, s.position()));
            }
            let count = varlen::read_array_size(s)?;
            for _ in 0..count {
                skip_value(s, limits, depth + 1)?;
            }
            Ok(kind)
        }
        ValueKind::Map => {
            if depth >= limits.max_depth {
                return Err(PackError::new(ErrorCode::DepthExceeded, s.position()));
            }
            let pairs = varlen::read_map_size(s)?;
            for _ in 0..pairs {
                skip_value(s, limits, depth + 1)?;
                skip_value(s, limits, depth + 1)?;
            }
            Ok(kind)
        }
    }
}

fn advance_payload(s: &mut Buffer<'_>, len: u32) -> Result<(), PackError> {
    let n = usize::try_from(len)
        .map_err(|_| PackError::new(ErrorCode::InsufficientInput, s.position()))?;
    s.advance(n)
}

// Fixed-size ext values: tag, type byte, then 1/2/4/8/16 payload bytes.
fn skip_ext(s: &mut Buffer<'_>) -> Result<ValueKind, PackError> {
    let off = s.position();
    let payload = match s.peek() {
        Some(0xD4) => 1,
        Some(0xD5) => 2,
        Some(0xD6) => 4,
        Some(0xD7) => 8,
        Some(0xD8) => 16,
        Some(_) => return Err(PackError::new(ErrorCode::MalformedTag, off)),
        None => return Err(PackError::new(ErrorCode::InsufficientInput, off)),
    };
    s.advance(2 + payload)?;
    Ok(ValueKind::Ext)
}
