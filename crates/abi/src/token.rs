use crate::{Error, ParamType, Result};
use alloy_primitives::{Address, Bytes, I256, U256};

/// A runtime value carried into or out of the ABI codec.
///
/// Tokens are shape-checked against a [`ParamType`] before encoding; the
/// pairing is what the original compile-time dispatch guaranteed, recovered
/// here with an explicit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A boolean.
    Bool(bool),
    /// A signed integer, two's complement.
    Int(I256),
    /// An unsigned integer.
    Uint(U256),
    /// A 20-byte address.
    Address(Address),
    /// `bytesN` content, at most 32 bytes.
    FixedBytes(Bytes),
    /// UTF-8 string content.
    String(String),
    /// Dynamic byte content.
    Bytes(Bytes),
    /// A fixed-size array of homogeneous values.
    FixedArray(Vec<Token>),
    /// A dynamically-sized array of homogeneous values.
    Array(Vec<Token>),
    /// An ordered group of heterogeneous values.
    Tuple(Vec<Token>),
}

impl Token {
    /// Checks that the token's shape and range match `kind`.
    pub fn type_check(&self, kind: &ParamType) -> Result<()> {
        let ok = match (self, kind) {
            (Self::Bool(_), ParamType::Bool) => true,
            (Self::Uint(value), ParamType::Uint(bits)) => value.bit_len() <= *bits,
            (Self::Int(value), ParamType::Int(bits)) => int_fits(*value, *bits),
            (Self::Address(_), ParamType::Address) => true,
            (Self::FixedBytes(bytes), ParamType::FixedBytes(size)) => bytes.len() == *size,
            (Self::String(_), ParamType::String) => true,
            (Self::Bytes(_), ParamType::Bytes) => true,
            (Self::FixedArray(items), ParamType::FixedArray(child, size)) => {
                items.len() == *size
                    && items.iter().all(|item| item.type_check(child).is_ok())
            }
            (Self::Array(items), ParamType::Array(child)) => {
                items.iter().all(|item| item.type_check(child).is_ok())
            }
            (Self::Tuple(items), ParamType::Tuple(components)) => {
                items.len() == components.len()
                    && items
                        .iter()
                        .zip(components)
                        .all(|(item, component)| item.type_check(&component.kind).is_ok())
            }
            _ => false,
        };
        if ok {
            Ok(())
        } else {
            Err(Error::TypeCheck { expected: kind.canonical() })
        }
    }
}

/// True if `value` is representable in `bits` two's-complement bits.
pub(crate) fn int_fits(value: I256, bits: usize) -> bool {
    if bits >= 256 {
        return true;
    }
    let max = (I256::ONE << (bits - 1)) - I256::ONE;
    let min = -(I256::ONE << (bits - 1));
    value >= min && value <= max
}
