use crate::{decode, encode, Error, Param, ParamType, Result, Token, WORD_SIZE};
use alloy_primitives::{keccak256, B256};

/// One event parameter, carrying the indexed flag next to the type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventParam {
    /// Parameter name.
    pub name: String,
    /// The parameter's type.
    pub kind: ParamType,
    /// True when the value is carried in a topic instead of the data section.
    pub indexed: bool,
}

impl EventParam {
    /// Creates an event parameter.
    pub fn new(name: impl Into<String>, kind: ParamType, indexed: bool) -> Self {
        Self { name: name.into(), kind, indexed }
    }
}

/// Encodes an indexed value into its topic word.
///
/// Value types occupy the topic directly. Reference types — strings, bytes,
/// arrays and tuples, static or not — are represented by the keccak-256 of
/// their in-place encoding; the original value is not recoverable from the
/// topic, only comparable against it.
pub fn encode_topic(kind: &ParamType, value: &Token) -> Result<B256> {
    kind.validate()?;
    value.type_check(kind)?;
    if !is_reference_type(kind) {
        let word = encode(&[Param::new("", kind.clone())], core::slice::from_ref(value))?;
        return Ok(B256::from_slice(&word[..WORD_SIZE]));
    }
    let mut packed = Vec::new();
    pack(value, &mut packed)?;
    Ok(keccak256(&packed))
}

/// Reference types never sit in a topic themselves.
fn is_reference_type(kind: &ParamType) -> bool {
    matches!(
        kind,
        ParamType::String
            | ParamType::Bytes
            | ParamType::Array(_)
            | ParamType::FixedArray(..)
            | ParamType::Tuple(_)
    )
}

/// In-place encoding for topic hashing: raw content for byte-likes, padded
/// words for everything else, no offsets and no length prefixes.
fn pack(value: &Token, out: &mut Vec<u8>) -> Result<()> {
    match value {
        Token::String(s) => out.extend_from_slice(s.as_bytes()),
        Token::Bytes(b) => out.extend_from_slice(b),
        Token::Array(items) | Token::FixedArray(items) | Token::Tuple(items) => {
            for item in items {
                pack_element(item, out)?;
            }
        }
        _ => pack_element(value, out)?,
    }
    Ok(())
}

/// Elements of hashed aggregates are padded to full words.
fn pack_element(value: &Token, out: &mut Vec<u8>) -> Result<()> {
    match value {
        Token::String(s) => pad_chunks(s.as_bytes(), out),
        Token::Bytes(b) => pad_chunks(b, out),
        Token::Array(items) | Token::FixedArray(items) | Token::Tuple(items) => {
            for item in items {
                pack_element(item, out)?;
            }
        }
        scalar => {
            let kind = scalar_kind(scalar)?;
            let word = encode(&[Param::new("", kind)], core::slice::from_ref(scalar))?;
            out.extend_from_slice(&word);
        }
    }
    Ok(())
}

fn pad_chunks(content: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(content);
    let rem = content.len() % WORD_SIZE;
    if rem != 0 {
        out.extend(core::iter::repeat(0u8).take(WORD_SIZE - rem));
    }
}

/// Widest type matching a scalar token; topic hashing only needs the word
/// layout, not the declared width.
fn scalar_kind(value: &Token) -> Result<ParamType> {
    Ok(match value {
        Token::Bool(_) => ParamType::Bool,
        Token::Uint(_) => ParamType::Uint(256),
        Token::Int(_) => ParamType::Int(256),
        Token::Address(_) => ParamType::Address,
        Token::FixedBytes(b) => ParamType::FixedBytes(b.len()),
        _ => return Err(Error::InvalidData("value cannot be packed into a topic")),
    })
}

/// Decodes a log against its event parameters.
///
/// Indexed static values come out of `topics` (which excludes topic0);
/// indexed dynamic values only exist as hashes, so they surface as the raw
/// 32-byte topic. Everything else is ABI-decoded from `data`.
pub fn decode_log(
    params: &[EventParam],
    topics: &[B256],
    data: &[u8],
) -> Result<Vec<Token>> {
    let indexed_count = params.iter().filter(|p| p.indexed).count();
    if indexed_count != topics.len() {
        return Err(Error::CountMismatch { expected: indexed_count, got: topics.len() });
    }

    let body_params: Vec<Param> = params
        .iter()
        .filter(|p| !p.indexed)
        .map(|p| Param::new(p.name.clone(), p.kind.clone()))
        .collect();
    let mut body = decode(&body_params, data)?.into_iter();
    let mut topics = topics.iter();

    params
        .iter()
        .map(|p| {
            if p.indexed {
                let topic = topics.next().ok_or(Error::InputTooShort)?;
                decode_topic(&p.kind, *topic)
            } else {
                body.next().ok_or(Error::InputTooShort)
            }
        })
        .collect()
}

fn decode_topic(kind: &ParamType, topic: B256) -> Result<Token> {
    if is_reference_type(kind) {
        // Only the hash survives; hand it back as-is.
        return Ok(Token::FixedBytes(topic.to_vec().into()));
    }
    let params = [Param::new("", kind.clone())];
    let mut tokens = decode(&params, topic.as_slice())?;
    Ok(tokens.remove(0))
}
