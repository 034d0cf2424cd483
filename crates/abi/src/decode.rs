use crate::{token, Error, Param, ParamType, Result, Token, WORD_SIZE};
use alloy_primitives::{Address, Bytes, I256, U256};

/// Decodes `data` against `params`, returning one token per parameter.
///
/// Trailing bytes beyond the described region are tolerated — RPC responses
/// routinely carry them — but every word that is part of a value is checked
/// strictly.
pub fn decode(params: &[Param], data: &[u8]) -> Result<Vec<Token>> {
    for param in params {
        param.kind.validate()?;
    }
    let mut tokens = Vec::with_capacity(params.len());
    let mut at = 0;
    for param in params {
        tokens.push(decode_token(&param.kind, data, at)?);
        at += param.kind.static_size();
    }
    Ok(tokens)
}

/// Decodes a contract call's return data.
///
/// An empty body when outputs were declared means the callee did not return
/// what the caller's ABI promised; that case is distinguished from a
/// legitimately empty output list.
pub fn decode_output(params: &[Param], data: &[u8]) -> Result<Vec<Token>> {
    if data.is_empty() && !params.is_empty() {
        return Err(Error::EmptyResponse);
    }
    decode(params, data)
}

/// Decodes one value whose head entry sits at `at` within `region`.
///
/// `region` is the enclosing head region; offsets read from it are relative
/// to its start, not to the whole buffer.
fn decode_token(kind: &ParamType, region: &[u8], at: usize) -> Result<Token> {
    match kind {
        ParamType::Bool => {
            let w = word(region, at)?;
            if !w[..WORD_SIZE - 1].iter().all(|&b| b == 0) || w[WORD_SIZE - 1] > 1 {
                return Err(Error::InvalidData("boolean word must be zero or one"));
            }
            Ok(Token::Bool(w[WORD_SIZE - 1] == 1))
        }
        ParamType::Uint(bits) => {
            let value = U256::from_be_bytes(word(region, at)?);
            if value.bit_len() > *bits {
                return Err(Error::InvalidData("integer wider than its declared type"));
            }
            Ok(Token::Uint(value))
        }
        ParamType::Int(bits) => {
            let value = I256::from_be_bytes(word(region, at)?);
            if !token::int_fits(value, *bits) {
                return Err(Error::InvalidData("integer wider than its declared type"));
            }
            Ok(Token::Int(value))
        }
        ParamType::Address => {
            let w = word(region, at)?;
            if !w[..WORD_SIZE - 20].iter().all(|&b| b == 0) {
                return Err(Error::InvalidData("address word carries non-zero padding"));
            }
            Ok(Token::Address(Address::from_slice(&w[WORD_SIZE - 20..])))
        }
        ParamType::FixedBytes(size) => {
            let w = word(region, at)?;
            if !w[*size..].iter().all(|&b| b == 0) {
                return Err(Error::InvalidData("fixed bytes word carries non-zero padding"));
            }
            Ok(Token::FixedBytes(Bytes::from(w[..*size].to_vec())))
        }
        ParamType::String => {
            let payload = dynamic_payload(region, at)?;
            let s = core::str::from_utf8(payload)
                .map_err(|_| Error::InvalidData("string payload is not valid utf-8"))?;
            Ok(Token::String(s.to_owned()))
        }
        ParamType::Bytes => {
            Ok(Token::Bytes(Bytes::from(dynamic_payload(region, at)?.to_vec())))
        }
        ParamType::FixedArray(child, size) => {
            let (member_region, base) = if kind.is_dynamic() {
                (&region[offset_at(region, at)?..], 0)
            } else {
                (region, at)
            };
            let stride = child.static_size();
            let items = (0..*size)
                .map(|i| decode_token(child, member_region, base + i * stride))
                .collect::<Result<Vec<_>>>()?;
            Ok(Token::FixedArray(items))
        }
        ParamType::Tuple(components) => {
            let (member_region, base) = if kind.is_dynamic() {
                (&region[offset_at(region, at)?..], 0)
            } else {
                (region, at)
            };
            let mut member_at = base;
            let mut items = Vec::with_capacity(components.len());
            for component in components {
                items.push(decode_token(&component.kind, member_region, member_at)?);
                member_at += component.kind.static_size();
            }
            Ok(Token::Tuple(items))
        }
        ParamType::Array(child) => {
            let target = offset_at(region, at)?;
            let count = small_word(region, target)?;
            let member_region = &region[target + WORD_SIZE..];
            let stride = child.static_size();
            // Bound the claimed element count by the bytes actually present
            // before allocating for it.
            let needed = count.checked_mul(stride).ok_or(Error::Overflow)?;
            if needed > member_region.len() {
                return Err(Error::InputTooShort);
            }
            let items = (0..count)
                .map(|i| decode_token(child, member_region, i * stride))
                .collect::<Result<Vec<_>>>()?;
            Ok(Token::Array(items))
        }
    }
}

/// Reads the word at `at`.
fn word(region: &[u8], at: usize) -> Result<[u8; WORD_SIZE]> {
    match region.get(at..at + WORD_SIZE) {
        Some(slice) => {
            let mut w = [0u8; WORD_SIZE];
            w.copy_from_slice(slice);
            Ok(w)
        }
        None => Err(Error::InputTooShort),
    }
}

/// Reads a word that must fit `usize` (offsets, lengths, counts).
fn small_word(region: &[u8], at: usize) -> Result<usize> {
    let value = U256::from_be_bytes(word(region, at)?);
    usize::try_from(value).map_err(|_| Error::Overflow)
}

/// Reads the offset word at `at` and bounds-checks it against the region.
fn offset_at(region: &[u8], at: usize) -> Result<usize> {
    let offset = small_word(region, at)?;
    if offset > region.len() {
        return Err(Error::OffsetOutOfBounds { offset });
    }
    Ok(offset)
}

/// Resolves an offset word to its `[length][content]` payload.
fn dynamic_payload<'a>(region: &'a [u8], at: usize) -> Result<&'a [u8]> {
    let target = offset_at(region, at)?;
    let length = small_word(region, target)?;
    let start = target + WORD_SIZE;
    let end = start.checked_add(length).ok_or(Error::Overflow)?;
    region.get(start..end).ok_or(Error::InputTooShort)
}
