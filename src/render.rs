use core::fmt::{self, Write as _};

use crate::kind::{classify, ValueKind};
use crate::walk::WalkLimits;
use crate::{scalar, varlen, Buffer, ErrorCode, PackError};

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Render the next encoded value from `input` as JSON-flavored debug text
/// written into `output`, with default [`WalkLimits`].
///
/// The rendering is a human-readable view, not part of the wire contract:
/// `null`/`true`/`false`, decimal numbers, quoted strings with minimal
/// escaping, `h'..'` hex notation for bin payloads, `ext(type, h'..')` for
/// fixed-size extension values, and `[..]`/`{k: v, ..}` for containers.
/// String payloads pass through unvalidated; this is a byte-level view.
///
/// # Errors
///
/// Decode errors as for [`crate::skip`]; `InsufficientCapacity` when
/// `output` runs out of room. After a failure partway through a composite
/// value, both cursors need a reset before reuse.
pub fn render_json(input: &mut Buffer<'_>, output: &mut Buffer<'_>) -> Result<(), PackError> {
    render_json_with_limits(input, output, WalkLimits::default())
}

/// [`render_json`] with caller-provided limits.
///
/// # Errors
///
/// As for [`render_json`].
pub fn render_json_with_limits(
    input: &mut Buffer<'_>,
    output: &mut Buffer<'_>,
    limits: WalkLimits,
) -> Result<(), PackError> {
    render_value(input, output, &limits, 0)
}

fn render_value(
    input: &mut Buffer<'_>,
    output: &mut Buffer<'_>,
    limits: &WalkLimits,
    depth: usize,
) -> Result<(), PackError> {
    match classify(input) {
        ValueKind::Empty => Err(PackError::new(
            ErrorCode::InsufficientInput,
            input.position(),
        )),
        ValueKind::Unknown => Err(PackError::new(ErrorCode::MalformedTag, input.position())),
        ValueKind::Nil => {
            scalar::read_nil(input)?;
            output.write(b"null")
        }
        ValueKind::Bool => {
            let text: &[u8] = if scalar::read_bool(input)? {
                b"true"
            } else {
                b"false"
            };
            output.write(text)
        }
        ValueKind::UInt => {
            let v = scalar::read_u64(input)?;
            write_display(output, format_args!("{v}"))
        }
        ValueKind::SInt => {
            let v = scalar::read_i64(input)?;
            write_display(output, format_args!("{v}"))
        }
        ValueKind::Float => {
            let v = scalar::read_f32(input)?;
            write_display(output, format_args!("{v}"))
        }
        ValueKind::Str => render_str(input, output),
        ValueKind::Bin => render_bin(input, output),
        ValueKind::Ext => render_ext(input, output),
        ValueKind::Array => {
            if depth >= limits.max_depth {
                return Err(PackError::new(ErrorCode::DepthExceeded, input.position()));
            }
            let count = varlen::read_array_size(input)?;
            output.write_byte(b'[')?;
            for i in 0..count {
                if i != 0 {
                    output.write(b", ")?;
                }
                render_value(input, output, limits, depth + 1)?;
            }
            output.write_byte(b']')
        }
        ValueKind::Map => {
            if depth >= limits.max_depth {
                return Err(PackError::new(ErrorCode::DepthExceeded, input.position()));
            }
            let pairs = varlen::read_map_size(input)?;
            output.write_byte(b'{')?;
            for i in 0..pairs {
                if i != 0 {
                    output.write(b", ")?;
                }
                render_value(input, output, limits, depth + 1)?;
                output.write(b": ")?;
                render_value(input, output, limits, depth + 1)?;
            }
            output.write_byte(b'}')
        }
    }
}

fn render_str(input: &mut Buffer<'_>, output: &mut Buffer<'_>) -> Result<(), PackError> {
    let off = input.position();
    let len = varlen::read_str_size(input)?;
    let len =
        usize::try_from(len).map_err(|_| PackError::new(ErrorCode::InsufficientCapacity, off))?;
    let payload = input.read_slice(len)?;
    output.write_byte(b'"')?;
    for &b in payload {
        match b {
            b'"' => output.write(b"\\\"")?,
            b'\\' => output.write(b"\\\\")?,
            b'\n' => output.write(b"\\n")?,
            b'\r' => output.write(b"\\r")?,
            b'\t' => output.write(b"\\t")?,
            0x00..=0x1F => {
                let esc = [
                    b'\\',
                    b'u',
                    b'0',
                    b'0',
                    HEX[usize::from(b >> 4)],
                    HEX[usize::from(b & 0x0F)],
                ];
                output.write(&esc)?;
            }
            _ => output.write_byte(b)?,
        }
    }
    output.write_byte(b'"')
}

fn write_hex(output: &mut Buffer<'_>, payload: &[u8]) -> Result<(), PackError> {
    output.write(b"h'")?;
    for &b in payload {
        output.write(&[HEX[usize::from(b >> 4)], HEX[usize::from(b & 0x0F)]])?;
    }
    output.write_byte(b'\'')
}

fn render_bin(input: &mut Buffer<'_>, output: &mut Buffer<'_>) -> Result<(), PackError> {
    let off = input.position();
    let len = varlen::read_bin_size(input)?;
    let len =
        usize::try_from(len).map_err(|_| PackError::new(ErrorCode::InsufficientCapacity, off))?;
    let payload = input.read_slice(len)?;
    write_hex(output, payload)
}

fn render_ext(input: &mut Buffer<'_>, output: &mut Buffer<'_>) -> Result<(), PackError> {
    let off = input.position();
    let len: usize = match input.peek() {
        Some(0xD4) => 1,
        Some(0xD5) => 2,
        Some(0xD6) => 4,
        Some(0xD7) => 8,
        Some(0xD8) => 16,
        Some(_) => return Err(PackError::new(ErrorCode::MalformedTag, off)),
        None => return Err(PackError::new(ErrorCode::InsufficientInput, off)),
    };
    let head = input.read_slice(2)?;
    // The type byte is a signed int8 on the wire.
    let ty = i64::from(head[1]) - if head[1] >= 0x80 { 0x100 } else { 0 };
    write_display(output, format_args!("ext({ty}, "))?;
    let payload = input.read_slice(len)?;
    write_hex(output, payload)?;
    output.write_byte(b')')
}

// Adapter routing core::fmt output into a Buffer, preserving the capacity
// error that fmt::Error would otherwise flatten away.
struct BufferSink<'s, 'a> {
    buffer: &'s mut Buffer<'a>,
    error: Option<PackError>,
}

impl fmt::Write for BufferSink<'_, '_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match self.buffer.write(s.as_bytes()) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.error = Some(e);
                Err(fmt::Error)
            }
        }
    }
}

fn write_display(output: &mut Buffer<'_>, args: fmt::Arguments<'_>) -> Result<(), PackError> {
    let mut sink = BufferSink {
        buffer: output,
        error: None,
    };
    match sink.write_fmt(args) {
        Ok(()) => Ok(()),
        Err(_) => {
            let fallback = PackError::new(ErrorCode::InsufficientCapacity, sink.buffer.position());
            Err(sink.error.unwrap_or(fallback))
        }
    }
}
