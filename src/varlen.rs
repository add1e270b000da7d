use crate::{utf8, Buffer, ErrorCode, PackError};

// Variable-length headers are at most tag + 4 length bytes.
const MAX_HEADER: usize = 5;

/// Declared payload length (or element/pair count) plus the header bytes it
/// occupied, parsed without consuming anything.
struct Header {
    consumed: usize,
    len: u32,
}

fn be_len(input: &[u8], n: usize, off: usize) -> Result<u32, PackError> {
    let bytes = input
        .get(1..1 + n)
        .ok_or(PackError::new(ErrorCode::InsufficientInput, off))?;
    let mut v = 0u32;
    for &b in bytes {
        v = (v << 8) | u32::from(b);
    }
    Ok(v)
}

fn parse_str_header(input: &[u8], off: usize) -> Result<Header, PackError> {
    let &tag = input
        .first()
        .ok_or(PackError::new(ErrorCode::InsufficientInput, off))?;
    match tag {
        0xA0..=0xBF => Ok(Header {
            consumed: 1,
            len: u32::from(tag & 0x1F),
        }),
        0xD9 => Ok(Header {
            consumed: 2,
            len: be_len(input, 1, off)?,
        }),
        0xDA => Ok(Header {
            consumed: 3,
            len: be_len(input, 2, off)?,
        }),
        0xDB => Ok(Header {
            consumed: 5,
            len: be_len(input, 4, off)?,
        }),
        _ => Err(PackError::new(ErrorCode::MalformedTag, off)),
    }
}

fn parse_bin_header(input: &[u8], off: usize) -> Result<Header, PackError> {
    let &tag = input
        .first()
        .ok_or(PackError::new(ErrorCode::InsufficientInput, off))?;
    match tag {
        0xC4 => Ok(Header {
            consumed: 2,
            len: be_len(input, 1, off)?,
        }),
        0xC5 => Ok(Header {
            consumed: 3,
            len: be_len(input, 2, off)?,
        }),
        0xC6 => Ok(Header {
            consumed: 5,
            len: be_len(input, 4, off)?,
        }),
        _ => Err(PackError::new(ErrorCode::MalformedTag, off)),
    }
}

fn parse_container_header(
    input: &[u8],
    fix_base: u8,
    tag16: u8,
    off: usize,
) -> Result<Header, PackError> {
    let &tag = input
        .first()
        .ok_or(PackError::new(ErrorCode::InsufficientInput, off))?;
    if tag & 0xF0 == fix_base {
        return Ok(Header {
            consumed: 1,
            len: u32::from(tag & 0x0F),
        });
    }
    if tag == tag16 {
        return Ok(Header {
            consumed: 3,
            len: be_len(input, 2, off)?,
        });
    }
    if tag == tag16 + 1 {
        return Ok(Header {
            consumed: 5,
            len: be_len(input, 4, off)?,
        });
    }
    Err(PackError::new(ErrorCode::MalformedTag, off))
}

fn len_u32(len: usize, off: usize) -> Result<u32, PackError> {
    u32::try_from(len).map_err(|_| PackError::new(ErrorCode::InsufficientCapacity, off))
}

fn len_usize(len: u32, off: usize) -> Result<usize, PackError> {
    usize::try_from(len).map_err(|_| PackError::new(ErrorCode::InsufficientCapacity, off))
}

fn str_header(hdr: &mut [u8; MAX_HEADER], len: u32) -> usize {
    if len <= 31 {
        hdr[0] = 0xA0 | (len as u8);
        1
    } else if let Ok(v) = u8::try_from(len) {
        hdr[0] = 0xD9;
        hdr[1] = v;
        2
    } else if let Ok(v) = u16::try_from(len) {
        hdr[0] = 0xDA;
        hdr[1..3].copy_from_slice(&v.to_be_bytes());
        3
    } else {
        hdr[0] = 0xDB;
        hdr[1..5].copy_from_slice(&len.to_be_bytes());
        5
    }
}

fn bin_header(hdr: &mut [u8; MAX_HEADER], len: u32) -> usize {
    if let Ok(v) = u8::try_from(len) {
        hdr[0] = 0xC4;
        hdr[1] = v;
        2
    } else if let Ok(v) = u16::try_from(len) {
        hdr[0] = 0xC5;
        hdr[1..3].copy_from_slice(&v.to_be_bytes());
        3
    } else {
        hdr[0] = 0xC6;
        hdr[1..5].copy_from_slice(&len.to_be_bytes());
        5
    }
}

fn container_header(hdr: &mut [u8; MAX_HEADER], fix_base: u8, tag16: u8, count: u32) -> usize {
    if count <= 15 {
        hdr[0] = fix_base | (count as u8);
        1
    } else if let Ok(v) = u16::try_from(count) {
        hdr[0] = tag16;
        hdr[1..3].copy_from_slice(&v.to_be_bytes());
        3
    } else {
        hdr[0] = tag16 + 1;
        hdr[1..5].copy_from_slice(&count.to_be_bytes());
        5
    }
}

// Header and payload go out together or not at all.
fn write_all(s: &mut Buffer<'_>, hdr: &[u8], payload: &[u8]) -> Result<(), PackError> {
    if s.available() < hdr.len() + payload.len() {
        return Err(PackError::new(ErrorCode::InsufficientCapacity, s.position()));
    }
    s.write(hdr)?;
    s.write(payload)
}

/// Append a UTF-8 string with the narrowest header that holds its length:
/// fixstr up to 31 bytes, then `0xD9`/`0xDA`/`0xDB`.
///
/// # Errors
///
/// `InsufficientCapacity` when header plus payload do not fit the remaining
/// capacity (nothing is written), or when the length exceeds the `str32`
/// wire maximum.
pub fn write_str(s: &mut Buffer<'_>, text: &str) -> Result<(), PackError> {
    let bytes = text.as_bytes();
    let mut hdr = [0u8; MAX_HEADER];
    let n = str_header(&mut hdr, len_u32(bytes.len(), s.position())?);
    write_all(s, &hdr[..n], bytes)
}

/// Append a binary blob. There is no fix form for bin: the header is always
/// `0xC4`/`0xC5`/`0xC6` with the narrowest length field.
///
/// # Errors
///
/// `InsufficientCapacity` when header plus payload do not fit the remaining
/// capacity (nothing is written), or when the length exceeds the `bin32`
/// wire maximum.
pub fn write_bin(s: &mut Buffer<'_>, data: &[u8]) -> Result<(), PackError> {
    let mut hdr = [0u8; MAX_HEADER];
    let n = bin_header(&mut hdr, len_u32(data.len(), s.position())?);
    write_all(s, &hdr[..n], data)
}

/// Append an array header for `count` elements: fixarray up to 15, then
/// `0xDC`/`0xDD`. The caller encodes the elements afterwards.
///
/// # Errors
///
/// `InsufficientCapacity` when the header does not fit.
pub fn write_array_header(s: &mut Buffer<'_>, count: u32) -> Result<(), PackError> {
    let mut hdr = [0u8; MAX_HEADER];
    let n = container_header(&mut hdr, 0x90, 0xDC, count);
    s.write(&hdr[..n])
}

/// Append a map header for `pairs` key/value pairs: fixmap up to 15, then
/// `0xDE`/`0xDF`. The caller encodes `2 * pairs` values afterwards.
///
/// # Errors
///
/// `InsufficientCapacity` when the header does not fit.
pub fn write_map_header(s: &mut Buffer<'_>, pairs: u32) -> Result<(), PackError> {
    let mut hdr = [0u8; MAX_HEADER];
    let n = container_header(&mut hdr, 0x80, 0xDE, pairs);
    s.write(&hdr[..n])
}

/// Decode a string header, reporting the declared payload length in bytes.
/// The payload itself is not touched.
///
/// # Errors
///
/// `MalformedTag` for a non-string tag, `InsufficientInput` on truncation.
/// The cursor is untouched on failure.
pub fn read_str_size(s: &mut Buffer<'_>) -> Result<u32, PackError> {
    let off = s.position();
    let header = parse_str_header(s.remaining(), off)?;
    s.advance(header.consumed)?;
    Ok(header.len)
}

/// Decode a binary header, reporting the declared payload length in bytes.
///
/// # Errors
///
/// `MalformedTag` for a non-bin tag, `InsufficientInput` on truncation.
/// The cursor is untouched on failure.
pub fn read_bin_size(s: &mut Buffer<'_>) -> Result<u32, PackError> {
    let off = s.position();
    let header = parse_bin_header(s.remaining(), off)?;
    s.advance(header.consumed)?;
    Ok(header.len)
}

/// Decode an array header, reporting the declared element count.
///
/// # Errors
///
/// `MalformedTag` for a non-array tag, `InsufficientInput` on truncation.
/// The cursor is untouched on failure.
pub fn read_array_size(s: &mut Buffer<'_>) -> Result<u32, PackError> {
    let off = s.position();
    let header = parse_container_header(s.remaining(), 0x90, 0xDC, off)?;
    s.advance(header.consumed)?;
    Ok(header.len)
}

/// Decode a map header, reporting the declared pair count. The payload that
/// follows is `2 * count` encoded values.
///
/// # Errors
///
/// `MalformedTag` for a non-map tag, `InsufficientInput` on truncation.
/// The cursor is untouched on failure.
pub fn read_map_size(s: &mut Buffer<'_>) -> Result<u32, PackError> {
    let off = s.position();
    let header = parse_container_header(s.remaining(), 0x80, 0xDE, off)?;
    s.advance(header.consumed)?;
    Ok(header.len)
}

fn read_blob<'d>(
    s: &mut Buffer<'_>,
    dest: &'d mut [u8],
    header: &Header,
    off: usize,
) -> Result<&'d [u8], PackError> {
    let len = len_usize(header.len, off)?;
    if len > dest.len() {
        return Err(PackError::new(ErrorCode::InsufficientCapacity, off));
    }
    let input = s.remaining();
    let payload = input
        .get(header.consumed..header.consumed + len)
        .ok_or(PackError::new(ErrorCode::InsufficientInput, off))?;
    dest[..len].copy_from_slice(payload);
    s.advance(header.consumed + len)?;
    Ok(&dest[..len])
}

/// Decode a string and copy its raw bytes into `dest`, returning the filled
/// prefix. No UTF-8 validation is performed; see [`read_str`] for the
/// validating variant.
///
/// # Errors
///
/// `InsufficientCapacity`, before any byte is copied, when the declared
/// length exceeds `dest.len()`; `MalformedTag`/`InsufficientInput` as for
/// [`read_str_size`]. The cursor is untouched on failure.
pub fn read_str_bytes<'d>(s: &mut Buffer<'_>, dest: &'d mut [u8]) -> Result<&'d [u8], PackError> {
    let off = s.position();
    let header = parse_str_header(s.remaining(), off)?;
    read_blob(s, dest, &header, off)
}

/// Decode a string into `dest` and return it as validated UTF-8.
///
/// # Errors
///
/// As for [`read_str_bytes`], plus `Utf8Invalid` when the payload is not
/// valid UTF-8; on that failure the cursor is untouched but `dest` already
/// holds the raw payload bytes.
pub fn read_str<'d>(s: &mut Buffer<'_>, dest: &'d mut [u8]) -> Result<&'d str, PackError> {
    let off = s.position();
    let header = parse_str_header(s.remaining(), off)?;
    let len = len_usize(header.len, off)?;
    if len > dest.len() {
        return Err(PackError::new(ErrorCode::InsufficientCapacity, off));
    }
    let input = s.remaining();
    let payload = input
        .get(header.consumed..header.consumed + len)
        .ok_or(PackError::new(ErrorCode::InsufficientInput, off))?;
    dest[..len].copy_from_slice(payload);
    let text = utf8::validate(&dest[..len], off)?;
    s.advance(header.consumed + len)?;
    Ok(text)
}

/// Decode a binary blob into `dest`, returning the filled prefix.
///
/// # Errors
///
/// `InsufficientCapacity`, before any byte is copied, when the declared
/// length exceeds `dest.len()`; `MalformedTag`/`InsufficientInput` as for
/// [`read_bin_size`]. The cursor is untouched on failure.
pub fn read_bin<'d>(s: &mut Buffer<'_>, dest: &'d mut [u8]) -> Result<&'d [u8], PackError> {
    let off = s.position();
    let header = parse_bin_header(s.remaining(), off)?;
    read_blob(s, dest, &header, off)
}
