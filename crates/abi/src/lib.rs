#![warn(missing_debug_implementations, missing_docs, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]

//! Solidity ABI parameter encoding and decoding.
//!
//! Call data lays values out in two regions: a fixed-size head holding one
//! entry per parameter (the value itself when static, a byte offset when
//! dynamic) and a tail holding the dynamic payloads the offsets point into.
//! The encoder here runs the two passes separately — values are pre-encoded
//! into relocatable slots first, then offsets are resolved once the total
//! head size is known.

mod decode;
pub use decode::{decode, decode_output};

mod encode;
pub use encode::encode;

mod error;
pub use error::{Error, Result};

mod event;
pub use event::{decode_log, encode_topic, EventParam};

mod param;
pub use param::{Param, ParamType};

mod selector;
pub use selector::{selector, short_signature, signature, signature_hash};

mod token;
pub use token::Token;

/// Size of one ABI word.
pub const WORD_SIZE: usize = 32;
