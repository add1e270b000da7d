use crate::{Buffer, ErrorCode, PackError};

// Encoded scalars are at most tag + 8 payload bytes.
const MAX_SCALAR: usize = 9;

fn be_uint(bytes: &[u8]) -> u64 {
    let mut v = 0u64;
    for &b in bytes {
        v = (v << 8) | u64::from(b);
    }
    v
}

// Sign-extends from the top bit of the most significant byte.
fn be_sint(bytes: &[u8]) -> i64 {
    let mut v: i64 = match bytes.first() {
        Some(&b) if b & 0x80 != 0 => -1,
        _ => 0,
    };
    for &b in bytes {
        v = (v << 8) | i64::from(b);
    }
    v
}

/// Append a nil value (`0xC0`).
///
/// # Errors
///
/// `InsufficientCapacity` when the buffer is full.
pub fn write_nil(s: &mut Buffer<'_>) -> Result<(), PackError> {
    s.write_byte(0xC0)
}

/// Append a boolean (`0xC2`/`0xC3`).
///
/// # Errors
///
/// `InsufficientCapacity` when the buffer is full.
pub fn write_bool(s: &mut Buffer<'_>, value: bool) -> Result<(), PackError> {
    s.write_byte(if value { 0xC3 } else { 0xC2 })
}

/// Append an unsigned integer using the narrowest encoding that holds it:
/// positive fixint below `0x80`, then `0xCC`/`0xCD`/`0xCE`/`0xCF` with a
/// big-endian payload of 1/2/4/8 bytes.
///
/// # Errors
///
/// `InsufficientCapacity` when the full encoding does not fit; nothing is
/// written in that case.
pub fn write_uint(s: &mut Buffer<'_>, value: u64) -> Result<(), PackError> {
    let mut tmp = [0u8; MAX_SCALAR];
    let n = uint_encoding(&mut tmp, value);
    s.write(&tmp[..n])
}

fn uint_encoding(tmp: &mut [u8; MAX_SCALAR], value: u64) -> usize {
    if value < 0x80 {
        tmp[0] = value as u8;
        1
    } else if let Ok(v) = u8::try_from(value) {
        tmp[0] = 0xCC;
        tmp[1] = v;
        2
    } else if let Ok(v) = u16::try_from(value) {
        tmp[0] = 0xCD;
        tmp[1..3].copy_from_slice(&v.to_be_bytes());
        3
    } else if let Ok(v) = u32::try_from(value) {
        tmp[0] = 0xCE;
        tmp[1..5].copy_from_slice(&v.to_be_bytes());
        5
    } else {
        tmp[0] = 0xCF;
        tmp[1..9].copy_from_slice(&value.to_be_bytes());
        9
    }
}

/// Append a signed integer using the narrowest encoding that holds it:
/// a single fixint byte for `-32..=127`, then `0xD0`/`0xD1`/`0xD2`/`0xD3`
/// with a two's complement big-endian payload of 1/2/4/8 bytes.
///
/// # Errors
///
/// `InsufficientCapacity` when the full encoding does not fit; nothing is
/// written in that case.
pub fn write_sint(s: &mut Buffer<'_>, value: i64) -> Result<(), PackError> {
    let mut tmp = [0u8; MAX_SCALAR];
    let n = sint_encoding(&mut tmp, value);
    s.write(&tmp[..n])
}

fn sint_encoding(tmp: &mut [u8; MAX_SCALAR], value: i64) -> usize {
    if (-32..=0x7F).contains(&value) {
        // Positive fixint and negative fixint share the value's low byte.
        tmp[0] = (value & 0xFF) as u8;
        1
    } else if let Ok(v) = i8::try_from(value) {
        tmp[0] = 0xD0;
        tmp[1..2].copy_from_slice(&v.to_be_bytes());
        2
    } else if let Ok(v) = i16::try_from(value) {
        tmp[0] = 0xD1;
        tmp[1..3].copy_from_slice(&v.to_be_bytes());
        3
    } else if let Ok(v) = i32::try_from(value) {
        tmp[0] = 0xD2;
        tmp[1..5].copy_from_slice(&v.to_be_bytes());
        5
    } else {
        tmp[0] = 0xD3;
        tmp[1..9].copy_from_slice(&value.to_be_bytes());
        9
    }
}

/// Append a 32-bit float (`0xCA` + IEEE-754 binary32, big-endian).
///
/// # Errors
///
/// `InsufficientCapacity` when the encoding does not fit.
pub fn write_f32(s: &mut Buffer<'_>, value: f32) -> Result<(), PackError> {
    let mut tmp = [0u8; 5];
    tmp[0] = 0xCA;
    tmp[1..5].copy_from_slice(&value.to_bits().to_be_bytes());
    s.write(&tmp)
}

/// Decode a nil value.
///
/// # Errors
///
/// `MalformedTag` if the next byte is not `0xC0`, `InsufficientInput` at end
/// of buffer. The cursor is untouched on failure.
pub fn read_nil(s: &mut Buffer<'_>) -> Result<(), PackError> {
    let off = s.position();
    match s.peek() {
        Some(0xC0) => s.advance(1),
        Some(_) => Err(PackError::new(ErrorCode::MalformedTag, off)),
        None => Err(PackError::new(ErrorCode::InsufficientInput, off)),
    }
}

/// Decode a boolean.
///
/// # Errors
///
/// `MalformedTag` if the next byte is neither `0xC2` nor `0xC3`,
/// `InsufficientInput` at end of buffer. The cursor is untouched on failure.
pub fn read_bool(s: &mut Buffer<'_>) -> Result<bool, PackError> {
    let off = s.position();
    match s.peek() {
        Some(0xC2) => {
            s.advance(1)?;
            Ok(false)
        }
        Some(0xC3) => {
            s.advance(1)?;
            Ok(true)
        }
        Some(_) => Err(PackError::new(ErrorCode::MalformedTag, off)),
        None => Err(PackError::new(ErrorCode::InsufficientInput, off)),
    }
}

/// Decode a 32-bit float.
///
/// The bit pattern is rebuilt from the 4 big-endian payload bytes via
/// [`f32::from_bits`]; no storage is reinterpreted in place.
///
/// # Errors
///
/// `MalformedTag` unless the tag is `0xCA`, `InsufficientInput` when the tag
/// or its payload is truncated. The cursor is untouched on failure.
pub fn read_f32(s: &mut Buffer<'_>) -> Result<f32, PackError> {
    let off = s.position();
    let input = s.remaining();
    match input.first() {
        Some(0xCA) => {
            let payload = input
                .get(1..5)
                .ok_or(PackError::new(ErrorCode::InsufficientInput, off))?;
            let bits = u32::from_be_bytes([payload[0], payload[1], payload[2], payload[3]]);
            s.advance(5)?;
            Ok(f32::from_bits(bits))
        }
        Some(_) => Err(PackError::new(ErrorCode::MalformedTag, off)),
        None => Err(PackError::new(ErrorCode::InsufficientInput, off)),
    }
}

/// Decode an unsigned integer whose encoded width is at most `max_width`
/// payload bytes, zero-extended to 64 bits. Fixints count as width 1.
pub(crate) fn read_uint_raw(s: &mut Buffer<'_>, max_width: usize) -> Result<u64, PackError> {
    let off = s.position();
    let input = s.remaining();
    let &tag = input
        .first()
        .ok_or(PackError::new(ErrorCode::InsufficientInput, off))?;

    if tag < 0x80 {
        s.advance(1)?;
        return Ok(u64::from(tag));
    }
    let width: usize = match tag {
        0xCC => 1,
        0xCD => 2,
        0xCE => 4,
        0xCF => 8,
        _ => return Err(PackError::new(ErrorCode::MalformedTag, off)),
    };
    if width > max_width {
        return Err(PackError::new(ErrorCode::InsufficientCapacity, off));
    }
    let payload = input
        .get(1..1 + width)
        .ok_or(PackError::new(ErrorCode::InsufficientInput, off))?;
    let value = be_uint(payload);
    s.advance(1 + width)?;
    Ok(value)
}

/// Decode a signed integer whose encoded width is at most `max_width`
/// payload bytes, sign-extended to 64 bits. Fixints count as width 1.
pub(crate) fn read_sint_raw(s: &mut Buffer<'_>, max_width: usize) -> Result<i64, PackError> {
    let off = s.position();
    let input = s.remaining();
    let &tag = input
        .first()
        .ok_or(PackError::new(ErrorCode::InsufficientInput, off))?;

    if tag < 0x80 {
        s.advance(1)?;
        return Ok(i64::from(tag));
    }
    if tag >= 0xE0 {
        s.advance(1)?;
        return Ok(i64::from(tag) - 0x100);
    }
    let width: usize = match tag {
        0xD0 => 1,
        0xD1 => 2,
        0xD2 => 4,
        0xD3 => 8,
        _ => return Err(PackError::new(ErrorCode::MalformedTag, off)),
    };
    if width > max_width {
        return Err(PackError::new(ErrorCode::InsufficientCapacity, off));
    }
    let payload = input
        .get(1..1 + width)
        .ok_or(PackError::new(ErrorCode::InsufficientInput, off))?;
    let value = be_sint(payload);
    s.advance(1 + width)?;
    Ok(value)
}

macro_rules! impl_read_uint {
    ($(#[$attr:meta])* $name:ident, $ty:ty) => {
        $(#[$attr])*
        ///
        /// Accepts any unsigned encoding (positive fixint, `0xCC`-`0xCF`)
        /// whose payload width fits the target type; the value is
        /// zero-extended into the remaining high-order bytes.
        ///
        /// # Errors
        ///
        /// `InsufficientCapacity` when the encoded width exceeds the target
        /// width, `MalformedTag` for any non-unsigned tag (including
        /// negative fixints), `InsufficientInput` on truncation. The cursor
        /// is untouched on failure.
        pub fn $name(s: &mut Buffer<'_>) -> Result<$ty, PackError> {
            let off = s.position();
            let v = read_uint_raw(s, core::mem::size_of::<$ty>())?;
            <$ty>::try_from(v).map_err(|_| PackError::new(ErrorCode::InsufficientCapacity, off))
        }
    };
}

macro_rules! impl_read_sint {
    ($(#[$attr:meta])* $name:ident, $ty:ty) => {
        $(#[$attr])*
        ///
        /// Accepts positive fixints, negative fixints, and `0xD0`-`0xD3`
        /// whose payload width fits the target type; the value is
        /// sign-extended (`0xFF` fill for negatives) into the remaining
        /// high-order bytes.
        ///
        /// # Errors
        ///
        /// `InsufficientCapacity` when the encoded width exceeds the target
        /// width, `MalformedTag` for unsigned tags `0xCC`-`0xCF` and other
        /// non-integer tags, `InsufficientInput` on truncation. The cursor
        /// is untouched on failure.
        pub fn $name(s: &mut Buffer<'_>) -> Result<$ty, PackError> {
            let off = s.position();
            let v = read_sint_raw(s, core::mem::size_of::<$ty>())?;
            <$ty>::try_from(v).map_err(|_| PackError::new(ErrorCode::InsufficientCapacity, off))
        }
    };
}

impl_read_uint!(
    /// Decode an unsigned integer into 8 bits.
    read_u8,
    u8
);
impl_read_uint!(
    /// Decode an unsigned integer into 16 bits.
    read_u16,
    u16
);
impl_read_uint!(
    /// Decode an unsigned integer into 32 bits.
    read_u32,
    u32
);
impl_read_uint!(
    /// Decode an unsigned integer into 64 bits.
    read_u64,
    u64
);

impl_read_sint!(
    /// Decode a signed integer into 8 bits.
    read_i8,
    i8
);
impl_read_sint!(
    /// Decode a signed integer into 16 bits.
    read_i16,
    i16
);
impl_read_sint!(
    /// Decode a signed integer into 32 bits.
    read_i32,
    i32
);
impl_read_sint!(
    /// Decode a signed integer into 64 bits.
    read_i64,
    i64
);
