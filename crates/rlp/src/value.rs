use crate::{Encodable, Error, Header, PayloadView, Result, EMPTY_STRING_CODE};
use alloy_primitives::{Bytes, U256};

/// A schema-less RLP value tree.
///
/// Every encodable shape reduces to a byte string or a list before hitting
/// the wire; the extra variants here carry the conversion rules for values
/// assembled at runtime, where no concrete Rust type drives an [`Encodable`]
/// impl. Signed values below zero and lengths beyond the format's range are
/// rejected rather than silently mangled.
#[derive(Debug, Clone, PartialEq)]
pub enum RlpValue {
    /// `true => 0x01`, `false => 0x80`.
    Bool(bool),
    /// Minimal big-endian unsigned integer.
    Uint(U256),
    /// Signed integer, accepted only when non-negative.
    Int(i128),
    /// Encoded as the unsigned integer holding the IEEE-754 bit pattern.
    /// Only literal and test inputs take this path; protocol fields never do.
    Float(f64),
    /// Raw byte string.
    Bytes(Bytes),
    /// UTF-8 string, encoded as its bytes. Named enum and error tags are
    /// passed through this variant.
    Str(String),
    /// Ordered list of nested values.
    List(Vec<RlpValue>),
    /// An absent optional, encoded as the empty string marker.
    Null,
}

impl RlpValue {
    /// Encodes the value tree into a fresh buffer.
    pub fn encode(&self) -> Result<Bytes> {
        let mut out = Vec::new();
        self.encode_into(&mut out)?;
        Ok(out.into())
    }

    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        match self {
            Self::Bool(b) => b.encode(out),
            Self::Uint(x) => x.encode(out),
            Self::Int(i) => {
                if *i < 0 {
                    return Err(Error::NegativeNumber);
                }
                (*i as u128).encode(out);
            }
            Self::Float(f) => f.to_bits().encode(out),
            Self::Bytes(bytes) => {
                check_length(bytes.len())?;
                bytes.encode(out);
            }
            Self::Str(s) => {
                check_length(s.len())?;
                s.encode(out);
            }
            Self::List(items) => {
                // Children land in a scratch buffer first; the list prefix
                // needs the total payload size up front.
                let mut payload = Vec::new();
                for item in items {
                    item.encode_into(&mut payload)?;
                }
                check_length(payload.len())?;
                Header { list: true, payload_length: payload.len() }.encode(out);
                out.extend_from_slice(&payload);
            }
            Self::Null => out.push(EMPTY_STRING_CODE),
        }
        Ok(())
    }

    /// Structurally decodes one item, advancing `buf`.
    ///
    /// Without a schema only the string/list distinction survives decoding,
    /// so the result is built from [`RlpValue::Bytes`] and [`RlpValue::List`]
    /// alone; typed decoding goes through [`crate::Decodable`].
    pub fn decode(buf: &mut &[u8]) -> Result<Self> {
        match Header::decode_raw(buf)? {
            PayloadView::String(payload) => Ok(Self::Bytes(Bytes::from(payload.to_vec()))),
            PayloadView::List(items) => items
                .into_iter()
                .map(|mut item| Self::decode(&mut item))
                .collect::<Result<Vec<_>>>()
                .map(Self::List),
        }
    }
}

/// Lengths the format cannot represent are refused before any byte is
/// written. The wire caps length fields at eight big-endian bytes.
const fn check_length(len: usize) -> Result<()> {
    if crate::length_of_length(len) > 8 {
        return Err(Error::Overflow);
    }
    Ok(())
}

/// Encodes any [`Encodable`] view of a runtime value; convenience for call
/// sites that already hold an [`RlpValue`].
pub fn encode_value(value: &RlpValue) -> Result<Bytes> {
    value.encode()
}

/// Decodes a tag string and resolves it against the known variant names.
///
/// Tagged unions serialize the active variant's name as a plain string; a
/// name outside `variants` fails with [`Error::InvalidEnumTag`].
pub fn decode_tag<'v>(buf: &mut &[u8], variants: &[&'v str]) -> Result<&'v str> {
    let bytes = Header::decode_bytes(buf, false)?;
    variants
        .iter()
        .find(|name| name.as_bytes() == bytes)
        .copied()
        .ok_or(Error::InvalidEnumTag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::hex;

    #[test]
    fn encode_spec_tuple() {
        // (127, false, "foobar")
        let value = RlpValue::List(vec![
            RlpValue::Uint(U256::from(127)),
            RlpValue::Bool(false),
            RlpValue::Str("foobar".into()),
        ]);
        assert_eq!(value.encode().unwrap(), Bytes::from(hex!("c97f8086666f6f626172").to_vec()));
    }

    #[test]
    fn rejects_negative_integers() {
        assert_eq!(RlpValue::Int(-1).encode(), Err(Error::NegativeNumber));
        assert_eq!(
            RlpValue::List(vec![RlpValue::Int(-42)]).encode(),
            Err(Error::NegativeNumber)
        );
        assert_eq!(RlpValue::Int(127).encode().unwrap(), Bytes::from(hex!("7f").to_vec()));
    }

    #[test]
    fn float_uses_bit_pattern() {
        let expected = crate::encode(1.5f64.to_bits());
        assert_eq!(RlpValue::Float(1.5).encode().unwrap(), Bytes::from(expected));
    }

    #[test]
    fn null_is_empty_string() {
        assert_eq!(RlpValue::Null.encode().unwrap(), Bytes::from(hex!("80").to_vec()));
    }

    #[test]
    fn encode_nested_lists() {
        // [ [], [[]], [ [], [[]] ] ]
        let empty = RlpValue::List(vec![]);
        let value = RlpValue::List(vec![
            empty.clone(),
            RlpValue::List(vec![empty.clone()]),
            RlpValue::List(vec![empty.clone(), RlpValue::List(vec![empty])]),
        ]);
        assert_eq!(value.encode().unwrap(), Bytes::from(hex!("c7c0c1c0c3c0c1c0").to_vec()));
    }

    #[test]
    fn structural_decode_roundtrip() {
        let value = RlpValue::List(vec![
            RlpValue::Bytes(Bytes::from_static(b"cat")),
            RlpValue::List(vec![RlpValue::Bytes(Bytes::from_static(b"dog"))]),
        ]);
        let encoded = value.encode().unwrap();
        let mut buf = &encoded[..];
        assert_eq!(RlpValue::decode(&mut buf).unwrap(), value);
        assert!(buf.is_empty());
    }

    #[test]
    fn tag_decoding() {
        let encoded = crate::encode("london");
        let variants = ["berlin", "london", "cancun"];
        assert_eq!(decode_tag(&mut &encoded[..], &variants), Ok("london"));

        let encoded = crate::encode("shanghai");
        assert_eq!(decode_tag(&mut &encoded[..], &variants), Err(Error::InvalidEnumTag));
    }
}
