use crate::{Error, Result, EMPTY_LIST_CODE, EMPTY_STRING_CODE};
use bytes::BufMut;

/// The prefix of an RLP item: whether it is a list and how long its payload is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// True if the item is a list, false if it is a string.
    pub list: bool,
    /// Length of the payload in bytes, excluding the prefix itself.
    pub payload_length: usize,
}

impl Header {
    /// Decodes a header from the front of `buf`, advancing past the prefix.
    ///
    /// A single byte below [`EMPTY_STRING_CODE`] is its own payload; in that
    /// case the buffer is not advanced and the returned payload length is 1.
    pub fn decode(buf: &mut &[u8]) -> Result<Self> {
        let &first = buf.first().ok_or(Error::InputTooShort)?;

        let (list, payload_length) = match first {
            0x00..=0x7f => return Ok(Self { list: false, payload_length: 1 }),
            0x80..=0xb7 => {
                *buf = &buf[1..];
                let len = (first - EMPTY_STRING_CODE) as usize;
                if len == 1 && buf.first().is_some_and(|&b| b < EMPTY_STRING_CODE) {
                    return Err(Error::NonCanonicalSingleByte);
                }
                (false, len)
            }
            0xb8..=0xbf => {
                *buf = &buf[1..];
                (false, decode_long_length(buf, (first - 0xb7) as usize)?)
            }
            0xc0..=0xf7 => {
                *buf = &buf[1..];
                (true, (first - EMPTY_LIST_CODE) as usize)
            }
            0xf8..=0xff => {
                *buf = &buf[1..];
                (true, decode_long_length(buf, (first - 0xf7) as usize)?)
            }
        };

        if buf.len() < payload_length {
            return Err(Error::InputTooShort);
        }
        Ok(Self { list, payload_length })
    }

    /// Decodes a string or list payload, checking the prefix kind against
    /// `is_list`, and advances `buf` past the whole item.
    pub fn decode_bytes<'a>(buf: &mut &'a [u8], is_list: bool) -> Result<&'a [u8]> {
        let header = Self::decode(buf)?;
        if header.list != is_list {
            return Err(if is_list { Error::UnexpectedString } else { Error::UnexpectedList });
        }
        let (payload, rest) = buf.split_at(header.payload_length);
        *buf = rest;
        Ok(payload)
    }

    /// Encodes the prefix into `out`.
    pub fn encode(&self, out: &mut dyn BufMut) {
        let code = if self.list { EMPTY_LIST_CODE } else { EMPTY_STRING_CODE };
        if self.payload_length < 56 {
            out.put_u8(code + self.payload_length as u8);
        } else {
            let be = self.payload_length.to_be_bytes();
            let be = &be[(self.payload_length.leading_zeros() / 8) as usize..];
            out.put_u8(code + 55 + be.len() as u8);
            out.put_slice(be);
        }
    }

    /// Number of bytes the encoded prefix occupies.
    pub const fn length(&self) -> usize {
        1 + crate::length_of_length(self.payload_length)
    }

    /// Total encoded size of the item this header describes.
    pub const fn length_with_payload(&self) -> usize {
        self.length() + self.payload_length
    }
}

/// Reads a big-endian length field of `len_of_len` bytes.
fn decode_long_length(buf: &mut &[u8], len_of_len: usize) -> Result<usize> {
    if len_of_len > core::mem::size_of::<usize>() {
        return Err(Error::Overflow);
    }
    if buf.len() < len_of_len {
        return Err(Error::InputTooShort);
    }
    let (len_bytes, rest) = buf.split_at(len_of_len);
    if len_bytes[0] == 0 {
        return Err(Error::NonCanonicalSize);
    }
    let mut length = 0usize;
    for &b in len_bytes {
        length = (length << 8) | b as usize;
    }
    // Lengths below 56 must use the short form.
    if length < 56 {
        return Err(Error::NonCanonicalSize);
    }
    *buf = rest;
    Ok(length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::hex;

    #[test]
    fn single_byte_is_not_consumed() {
        let mut buf = &[0x7fu8][..];
        let header = Header::decode(&mut buf).unwrap();
        assert_eq!(header, Header { list: false, payload_length: 1 });
        assert_eq!(buf, &[0x7f]);
    }

    #[test]
    fn short_and_long_string_boundary() {
        // 55 payload bytes keep the short form.
        let mut short = vec![EMPTY_STRING_CODE + 55];
        short.extend_from_slice(&[b'a'; 55]);
        let mut buf = &short[..];
        assert_eq!(Header::decode(&mut buf).unwrap().payload_length, 55);

        // 56 payload bytes switch to the long form.
        let mut long = vec![0xb8, 56];
        long.extend_from_slice(&[b'a'; 56]);
        let mut buf = &long[..];
        assert_eq!(Header::decode(&mut buf).unwrap().payload_length, 56);
    }

    #[test]
    fn rejects_non_canonical_long_form() {
        // 1 payload byte announced through the long form.
        let mut buf = &hex!("b801ff")[..];
        assert_eq!(Header::decode(&mut buf), Err(Error::NonCanonicalSize));

        // Leading zero in the length field.
        let data = [&[0xb9, 0x00, 0x38][..], &[0u8; 56][..]].concat();
        let mut buf = &data[..];
        assert_eq!(Header::decode(&mut buf), Err(Error::NonCanonicalSize));
    }

    #[test]
    fn rejects_truncated_payload() {
        let mut buf = &hex!("83616263")[..];
        Header::decode(&mut buf).unwrap();

        let mut buf = &hex!("836162")[..];
        assert_eq!(Header::decode(&mut buf), Err(Error::InputTooShort));
    }

    #[test]
    fn encode_matches_decode() {
        for payload_length in [0usize, 1, 55, 56, 255, 256, 65_536] {
            for list in [false, true] {
                let header = Header { list, payload_length };
                let mut out = Vec::new();
                header.encode(&mut out);
                assert_eq!(out.len(), header.length());

                out.extend(core::iter::repeat(0x80u8).take(payload_length));
                let mut buf = &out[..];
                assert_eq!(Header::decode(&mut buf).unwrap(), header);
            }
        }
    }
}
