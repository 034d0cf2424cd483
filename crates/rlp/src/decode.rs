use crate::{Error, Header, Result};
use alloy_primitives::{Address, Bytes, FixedBytes, U256};

/// A type that can be reconstructed from RLP.
///
/// `decode` advances `buf` past the consumed item so composite decoders can
/// keep reading from the same cursor.
pub trait Decodable: Sized {
    /// Decodes one item from the front of `buf`.
    fn decode(buf: &mut &[u8]) -> Result<Self>;
}

/// The payload of a decoded item, classified by its prefix.
#[derive(Debug, PartialEq, Eq)]
pub enum PayloadView<'a> {
    /// A byte string payload.
    String(&'a [u8]),
    /// A list payload, split into the encodings of its items.
    List(Vec<&'a [u8]>),
}

impl Header {
    /// Decodes the next item and returns its payload classified as string or
    /// list, advancing `buf` past the whole item.
    pub fn decode_raw<'a>(buf: &mut &'a [u8]) -> Result<PayloadView<'a>> {
        let header = Self::decode(buf)?;
        let (mut payload, rest) = buf.split_at(header.payload_length);
        *buf = rest;

        if !header.list {
            return Ok(PayloadView::String(payload));
        }

        let mut items = Vec::new();
        while !payload.is_empty() {
            // Headers are cheap to re-derive; this walk just partitions the
            // payload into one slice per child item.
            let mut probe = payload;
            let child = Self::decode(&mut probe)?;
            let consumed = payload.len() - probe.len() + child.payload_length;
            items.push(&payload[..consumed]);
            payload = &payload[consumed..];
        }
        Ok(PayloadView::List(items))
    }
}

/// Decodes a value and requires the input to be fully consumed.
pub fn decode_exact<T: Decodable>(bytes: impl AsRef<[u8]>) -> Result<T> {
    let mut buf = bytes.as_ref();
    let value = T::decode(&mut buf)?;
    if !buf.is_empty() {
        return Err(Error::UnexpectedLength);
    }
    Ok(value)
}

impl Decodable for bool {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        let bytes = Header::decode_bytes(buf, false)?;
        match bytes {
            [] => Ok(false),
            [1] => Ok(true),
            _ => Err(Error::UnexpectedValue),
        }
    }
}

/// Builds an unsigned integer from a minimal big-endian payload.
fn decode_int_bytes(bytes: &[u8], max: usize) -> Result<&[u8]> {
    if bytes.len() > max {
        return Err(Error::Overflow);
    }
    if bytes.first() == Some(&0) {
        return Err(Error::LeadingZero);
    }
    Ok(bytes)
}

macro_rules! uint_impl {
    ($($t:ty),+ $(,)?) => {$(
        impl Decodable for $t {
            fn decode(buf: &mut &[u8]) -> Result<Self> {
                const SIZE: usize = core::mem::size_of::<$t>();
                let bytes = Header::decode_bytes(buf, false)?;
                let bytes = decode_int_bytes(bytes, SIZE)?;
                let mut padded = [0u8; SIZE];
                padded[SIZE - bytes.len()..].copy_from_slice(bytes);
                Ok(<$t>::from_be_bytes(padded))
            }
        }
    )+};
}

uint_impl!(u8, u16, u32, u64, u128);

impl Decodable for usize {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        u64::decode(buf)?.try_into().map_err(|_| Error::Overflow)
    }
}

impl Decodable for U256 {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        let bytes = Header::decode_bytes(buf, false)?;
        let bytes = decode_int_bytes(bytes, 32)?;
        Ok(Self::from_be_slice(bytes))
    }
}

impl<const N: usize> Decodable for FixedBytes<N> {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        let bytes = Header::decode_bytes(buf, false)?;
        if bytes.len() != N {
            return Err(Error::UnexpectedLength);
        }
        Ok(Self::from_slice(bytes))
    }
}

impl Decodable for Address {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        FixedBytes::<20>::decode(buf).map(Self)
    }
}

impl Decodable for Bytes {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        Header::decode_bytes(buf, false).map(|b| Self::from(b.to_vec()))
    }
}

impl Decodable for String {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        let bytes = Header::decode_bytes(buf, false)?;
        core::str::from_utf8(bytes).map(Into::into).map_err(|_| Error::UnexpectedValue)
    }
}

impl<T: Decodable> Decodable for Vec<T> {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        let mut payload = Header::decode_bytes(buf, true)?;
        let mut items = Self::new();
        while !payload.is_empty() {
            items.push(T::decode(&mut payload)?);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode;
    use alloy_primitives::hex;

    #[test]
    fn decode_integers() {
        assert_eq!(u64::decode(&mut &hex!("80")[..]), Ok(0));
        assert_eq!(u64::decode(&mut &hex!("01")[..]), Ok(1));
        assert_eq!(u64::decode(&mut &hex!("7f")[..]), Ok(0x7f));
        assert_eq!(u64::decode(&mut &hex!("8180")[..]), Ok(0x80));
        assert_eq!(u64::decode(&mut &hex!("820400")[..]), Ok(0x0400));
        assert_eq!(u64::decode(&mut &hex!("88ffffffffffffffff")[..]), Ok(u64::MAX));
    }

    #[test]
    fn rejects_non_minimal_integers() {
        // Leading zero byte.
        assert_eq!(u64::decode(&mut &hex!("820001")[..]), Err(Error::LeadingZero));
        // A raw zero byte is the non-canonical spelling of 0.
        assert_eq!(u64::decode(&mut &hex!("00")[..]), Err(Error::LeadingZero));
        // Single byte below 0x80 wrapped in a length prefix.
        assert_eq!(u64::decode(&mut &hex!("817f")[..]), Err(Error::NonCanonicalSingleByte));
    }

    #[test]
    fn rejects_oversized_integers() {
        assert_eq!(u64::decode(&mut &hex!("89ffffffffffffffffff")[..]), Err(Error::Overflow));
        let mut too_wide = vec![0xa1];
        too_wide.extend_from_slice(&[0xffu8; 33]);
        assert_eq!(U256::decode(&mut &too_wide[..]), Err(Error::Overflow));
    }

    #[test]
    fn decode_bool() {
        assert_eq!(bool::decode(&mut &hex!("01")[..]), Ok(true));
        assert_eq!(bool::decode(&mut &hex!("80")[..]), Ok(false));
        assert_eq!(bool::decode(&mut &hex!("02")[..]), Err(Error::UnexpectedValue));
    }

    #[test]
    fn decode_string_and_bytes() {
        assert_eq!(String::decode(&mut &hex!("83646f67")[..]).unwrap(), "dog");
        assert_eq!(
            Bytes::decode(&mut &hex!("83010203")[..]).unwrap(),
            Bytes::from_static(&[1, 2, 3])
        );
        assert_eq!(String::decode(&mut &hex!("c0")[..]), Err(Error::UnexpectedList));
    }

    #[test]
    fn decode_fixed_length_values() {
        let addr = hex!("94f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
        assert_eq!(
            Address::decode(&mut &addr[..]).unwrap(),
            Address::from_slice(&hex!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266"))
        );
        // 19 bytes where 20 are required.
        let short = hex!("93f39fd6e51aad88f6f4ce6ab8827279cfffb922");
        assert_eq!(Address::decode(&mut &short[..]), Err(Error::UnexpectedLength));
    }

    #[test]
    fn decode_vectors() {
        assert_eq!(Vec::<u64>::decode(&mut &hex!("c0")[..]).unwrap(), Vec::<u64>::new());
        assert_eq!(Vec::<u64>::decode(&mut &hex!("c3010203")[..]).unwrap(), vec![1, 2, 3]);
        assert_eq!(
            Vec::<String>::decode(&mut &hex!("c88363617483646f67")[..]).unwrap(),
            vec!["cat".to_owned(), "dog".to_owned()]
        );
        assert_eq!(Vec::<u64>::decode(&mut &hex!("83646f67")[..]), Err(Error::UnexpectedString));
    }

    #[test]
    fn decode_consumes_cursor() {
        let data = hex!("01820400");
        let mut buf = &data[..];
        assert_eq!(u64::decode(&mut buf), Ok(1));
        assert_eq!(u64::decode(&mut buf), Ok(0x0400));
        assert!(buf.is_empty());
    }

    #[test]
    fn decode_exact_rejects_trailing_bytes() {
        assert_eq!(decode_exact::<u64>(hex!("01ff")), Err(Error::UnexpectedLength));
        assert_eq!(decode_exact::<u64>(hex!("01")), Ok(1));
    }

    #[test]
    fn decode_raw_partitions_lists() {
        let mut buf = &hex!("c88363617483646f67")[..];
        let view = Header::decode_raw(&mut buf).unwrap();
        assert_eq!(
            view,
            PayloadView::List(vec![&hex!("83636174")[..], &hex!("83646f67")[..]])
        );
        assert!(buf.is_empty());

        let mut buf = &hex!("83646f67")[..];
        assert_eq!(Header::decode_raw(&mut buf).unwrap(), PayloadView::String(b"dog"));
    }

    #[test]
    fn truncated_input_errors() {
        assert_eq!(u64::decode(&mut &hex!("82ff")[..]), Err(Error::InputTooShort));
        assert_eq!(Vec::<u64>::decode(&mut &hex!("c3ffff")[..]), Err(Error::InputTooShort));
        assert_eq!(u64::decode(&mut &[][..]), Err(Error::InputTooShort));
    }

    proptest::proptest! {
        #[test]
        fn roundtrip_u64(x: u64) {
            let mut buf = &encode(x)[..];
            proptest::prop_assert_eq!(u64::decode(&mut buf), Ok(x));
            proptest::prop_assert!(buf.is_empty());
        }

        #[test]
        fn roundtrip_u256(words: [u64; 4]) {
            let x = U256::from_limbs(words);
            let mut buf = &encode(x)[..];
            proptest::prop_assert_eq!(U256::decode(&mut buf), Ok(x));
        }

        #[test]
        fn roundtrip_string(s: String) {
            let mut buf = &encode(s.as_str())[..];
            proptest::prop_assert_eq!(String::decode(&mut buf).unwrap(), s);
        }

        #[test]
        fn roundtrip_int_list(items: Vec<u64>) {
            let mut buf = &encode(items.clone())[..];
            proptest::prop_assert_eq!(Vec::<u64>::decode(&mut buf).unwrap(), items);
        }
    }
}
