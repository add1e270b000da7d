//! # fixpack
//!
//! Fixed-buffer MessagePack encoding and decoding for memory-constrained
//! targets.
//!
//! ## Design principles
//!
//! - **The caller owns the memory.**
//!   Every operation works through a [`Buffer`], a bounds-checked cursor over
//!   a byte region the embedding application supplies. The codec allocates
//!   nothing and performs no I/O of its own.
//! - **Minimal-width encoding, always.**
//!   Writers pick the narrowest tag that holds the value: fixint before
//!   `uint8`, fixstr before `str8`, and so on, smallest-fits-first.
//! - **Schema-less traversal without materialization.**
//!   [`classify`] inspects the next value without consuming it; [`skip`] and
//!   [`copy`] walk arbitrarily nested documents to find how many bytes a
//!   value occupies, never building an in-memory tree.
//!
//! ## Wire profile
//!
//! The implemented subset of MessagePack: nil, bool, integers (fixint and
//! `uint8`-`uint64`/`int8`-`int64`), `float32`, str, bin, array, map, and
//! fixed-size ext values (`fixext1`-`fixext16`, skip/copy/render only).
//! `float64` and the variable-length ext family are outside the profile and
//! classify as [`ValueKind::Unknown`].
//!
//! ## Decoding into wider targets
//!
//! Typed integer decodes accept any narrower encoding and extend it into the
//! requested width: zero fill for unsigned and non-negative values, `0xFF`
//! fill (two's complement sign extension) for negatives. An encoding wider
//! than the target fails with [`ErrorCode::InsufficientCapacity`] rather
//! than truncating.
//!
//! ## Feature flags
//!
//! - `std` *(default)*: implements `std::error::Error` for [`PackError`].
//! - `simdutf8`: enables SIMD-accelerated UTF-8 validation where supported.
//!
//! ## Concurrency
//!
//! Single-threaded and synchronous. A [`Buffer`] is not internally
//! synchronized; embedders sharing one serialize access themselves.
//!
//! ## `no_std`
//!
//! The crate is `no_std` compatible and allocation-free throughout; no
//! `alloc` is required for any API.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod buffer;
mod error;
mod kind;
mod render;
mod scalar;
pub(crate) mod utf8;
mod varlen;
mod walk;

pub use crate::buffer::Buffer;
pub use crate::error::{ErrorCode, PackError};
pub use crate::kind::{classify, ValueKind};
pub use crate::render::{render_json, render_json_with_limits};
pub use crate::scalar::{
    read_bool, read_f32, read_i16, read_i32, read_i64, read_i8, read_nil, read_u16, read_u32,
    read_u64, read_u8, write_bool, write_f32, write_nil, write_sint, write_uint,
};
pub use crate::varlen::{
    read_array_size, read_bin, read_bin_size, read_map_size, read_str, read_str_bytes,
    read_str_size, write_array_header, write_bin, write_map_header, write_str,
};
pub use crate::walk::{
    copy, copy_with_limits, skip, skip_with_limits, WalkLimits, DEFAULT_MAX_DEPTH,
};
