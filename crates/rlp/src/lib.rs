#![warn(missing_debug_implementations, missing_docs, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]

//! Recursive Length Prefix (RLP) encoding and decoding.
//!
//! RLP is Ethereum's serialization format for nested byte strings and lists.
//! This crate provides:
//!
//! - [`Encodable`] and [`Decodable`] for typed, cursor-driven codec work,
//! - [`Header`] for manual prefix handling when composing record encodings,
//! - [`RlpValue`] for schema-less value trees inspected at runtime.

mod decode;
pub use decode::{decode_exact, Decodable, PayloadView};

mod encode;
pub use encode::{encode, encode_list, length_of_length, list_length, Encodable};

mod error;
pub use error::{Error, Result};

mod header;
pub use header::Header;

mod value;
pub use value::{decode_tag, encode_value, RlpValue};

#[doc(no_inline)]
pub use bytes::{Buf, BufMut, Bytes, BytesMut};

/// RLP prefix byte for a 0-length string.
pub const EMPTY_STRING_CODE: u8 = 0x80;

/// RLP prefix byte for a 0-length list.
pub const EMPTY_LIST_CODE: u8 = 0xC0;
