use crate::{Error, Param, ParamType, Result, Token, WORD_SIZE};
use alloy_primitives::{Bytes, U256};

/// Offsets and lengths are kept inside the range a 4-byte word can address;
/// anything larger cannot come out of a sane call anyway.
const MAX_DATA: usize = u32::MAX as usize;

/// One pre-encoded value, relocatable until pointers are resolved.
struct Slot {
    /// Dynamic slots move to the tail and leave an offset word behind.
    dynamic: bool,
    bytes: Vec<u8>,
}

/// ABI-encodes `values` against `params`.
///
/// Runs the two passes over the value tree: a depth-first pre-encode that
/// turns every parameter into a [`Slot`], then pointer resolution that splits
/// the slots into the head and tail regions. Single values take the same
/// path — there is no one-parameter shortcut.
pub fn encode(params: &[Param], values: &[Token]) -> Result<Bytes> {
    if params.len() != values.len() {
        return Err(Error::CountMismatch { expected: params.len(), got: values.len() });
    }
    for (param, value) in params.iter().zip(values) {
        param.kind.validate()?;
        value.type_check(&param.kind)?;
    }

    let slots = params
        .iter()
        .zip(values)
        .map(|(param, value)| pre_encode(&param.kind, value))
        .collect::<Result<Vec<_>>>()?;
    Ok(resolve_pointers(slots)?.into())
}

/// First pass: encodes one value into a relocatable slot.
fn pre_encode(kind: &ParamType, token: &Token) -> Result<Slot> {
    let slot = match (kind, token) {
        (ParamType::Bool, Token::Bool(value)) => {
            let mut word = [0u8; WORD_SIZE];
            word[WORD_SIZE - 1] = *value as u8;
            Slot::fixed(word)
        }
        (ParamType::Uint(_), Token::Uint(value)) => Slot::fixed(value.to_be_bytes::<WORD_SIZE>()),
        (ParamType::Int(_), Token::Int(value)) => {
            // Sign extension falls out of the full-width two's complement.
            Slot::fixed(value.to_be_bytes::<WORD_SIZE>())
        }
        (ParamType::Address, Token::Address(value)) => {
            let mut word = [0u8; WORD_SIZE];
            word[WORD_SIZE - 20..].copy_from_slice(value.as_slice());
            Slot::fixed(word)
        }
        (ParamType::FixedBytes(_), Token::FixedBytes(value)) => {
            let mut word = [0u8; WORD_SIZE];
            word[..value.len()].copy_from_slice(value);
            Slot::fixed(word)
        }
        (ParamType::String, Token::String(value)) => {
            Slot { dynamic: true, bytes: length_prefixed(value.as_bytes())? }
        }
        (ParamType::Bytes, Token::Bytes(value)) => {
            Slot { dynamic: true, bytes: length_prefixed(value)? }
        }
        (ParamType::FixedArray(child, _), Token::FixedArray(items)) => {
            let slots = items
                .iter()
                .map(|item| pre_encode(child, item))
                .collect::<Result<Vec<_>>>()?;
            aggregate(kind.is_dynamic(), slots)?
        }
        (ParamType::Tuple(components), Token::Tuple(items)) => {
            let slots = components
                .iter()
                .zip(items)
                .map(|(component, item)| pre_encode(&component.kind, item))
                .collect::<Result<Vec<_>>>()?;
            aggregate(kind.is_dynamic(), slots)?
        }
        (ParamType::Array(child), Token::Array(items)) => {
            let slots = items
                .iter()
                .map(|item| pre_encode(child, item))
                .collect::<Result<Vec<_>>>()?;
            let mut bytes = U256::from(items.len()).to_be_bytes::<WORD_SIZE>().to_vec();
            bytes.extend_from_slice(&resolve_pointers(slots)?);
            Slot { dynamic: true, bytes }
        }
        // encode() type-checks up front; this arm only fires on internal
        // misuse.
        _ => return Err(Error::TypeCheck { expected: kind.canonical() }),
    };
    Ok(slot)
}

impl Slot {
    fn fixed(word: [u8; WORD_SIZE]) -> Self {
        Self { dynamic: false, bytes: word.to_vec() }
    }
}

/// Collapses member slots into one aggregate slot.
///
/// A dynamic aggregate is assembled eagerly — its slot already carries the
/// nested head and tail, with offsets relative to the aggregate's own head.
fn aggregate(dynamic: bool, slots: Vec<Slot>) -> Result<Slot> {
    let bytes = if dynamic {
        resolve_pointers(slots)?
    } else {
        slots.into_iter().flat_map(|slot| slot.bytes).collect()
    };
    Ok(Slot { dynamic, bytes })
}

/// Second pass: lays slots out as head ++ tail.
///
/// Static slots sit in the head whole; each dynamic slot leaves one offset
/// word pointing past the head into the tail. Offsets are measured from the
/// start of this head region, which is what makes nested regions
/// relocatable.
fn resolve_pointers(slots: Vec<Slot>) -> Result<Vec<u8>> {
    let heads_size: usize = slots
        .iter()
        .map(|slot| if slot.dynamic { WORD_SIZE } else { slot.bytes.len() })
        .sum();
    let tails_size: usize = slots.iter().filter(|s| s.dynamic).map(|s| s.bytes.len()).sum();
    if heads_size + tails_size > MAX_DATA {
        return Err(Error::Overflow);
    }

    let mut head = Vec::with_capacity(heads_size);
    let mut tail = Vec::with_capacity(tails_size);
    for slot in &slots {
        if slot.dynamic {
            let offset = U256::from(heads_size + tail.len());
            head.extend_from_slice(&offset.to_be_bytes::<WORD_SIZE>());
            tail.extend_from_slice(&slot.bytes);
        } else {
            head.extend_from_slice(&slot.bytes);
        }
    }
    head.extend_from_slice(&tail);
    Ok(head)
}

/// `[length word][content, zero-padded to a word boundary]`.
fn length_prefixed(content: &[u8]) -> Result<Vec<u8>> {
    if content.len() > MAX_DATA {
        return Err(Error::Overflow);
    }
    let padded = content.len().div_ceil(WORD_SIZE) * WORD_SIZE;
    let mut bytes = Vec::with_capacity(WORD_SIZE + padded);
    bytes.extend_from_slice(&U256::from(content.len()).to_be_bytes::<WORD_SIZE>());
    bytes.extend_from_slice(content);
    bytes.resize(WORD_SIZE + padded, 0);
    Ok(bytes)
}
