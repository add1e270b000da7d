use crate::Buffer;

/// Coarse classification of the next encoded value in a buffer.
///
/// Produced transiently by [`classify`]; the codec never builds an in-memory
/// tree of a document, it only ever looks at the next value in a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// No bytes are available.
    Empty,
    /// Nil (`0xC0`).
    Nil,
    /// Boolean (`0xC2`/`0xC3`).
    Bool,
    /// Unsigned integer: positive fixint or `0xCC`-`0xCF`.
    UInt,
    /// Signed integer: negative fixint or `0xD0`-`0xD3`.
    SInt,
    /// 32-bit float (`0xCA`).
    Float,
    /// UTF-8 string: fixstr or `0xD9`-`0xDB`.
    Str,
    /// Binary blob (`0xC4`-`0xC6`).
    Bin,
    /// Array: fixarray or `0xDC`/`0xDD`.
    Array,
    /// Map: fixmap or `0xDE`/`0xDF`.
    Map,
    /// Fixed-size extension value (`0xD4`-`0xD8`).
    Ext,
    /// A lead byte outside the recognized table.
    Unknown,
}

pub(crate) fn classify_byte(tag: u8) -> ValueKind {
    match tag {
        0x00..=0x7F => ValueKind::UInt,
        0x80..=0x8F => ValueKind::Map,
        0x90..=0x9F => ValueKind::Array,
        0xA0..=0xBF => ValueKind::Str,
        0xC0 => ValueKind::Nil,
        0xC2 | 0xC3 => ValueKind::Bool,
        0xC4..=0xC6 => ValueKind::Bin,
        0xCA => ValueKind::Float,
        0xCC..=0xCF => ValueKind::UInt,
        0xD0..=0xD3 => ValueKind::SInt,
        0xD4..=0xD8 => ValueKind::Ext,
        0xD9..=0xDB => ValueKind::Str,
        0xDC | 0xDD => ValueKind::Array,
        0xDE | 0xDF => ValueKind::Map,
        0xE0..=0xFF => ValueKind::SInt,
        // 0xC1, 0xC7-0xC9 (ext 8/16/32), 0xCB (float64): outside the profile.
        _ => ValueKind::Unknown,
    }
}

/// Inspect the next unread byte and report the kind of value it begins.
///
/// Never advances the cursor, so it can be called repeatedly with no side
/// effect. Returns [`ValueKind::Empty`] when the buffer is exhausted.
#[must_use]
pub fn classify(s: &Buffer<'_>) -> ValueKind {
    match s.peek() {
        None => ValueKind::Empty,
        Some(tag) => classify_byte(tag),
    }
}
