use crate::{Header, EMPTY_STRING_CODE};
use alloy_primitives::{Address, Bytes, FixedBytes, U256};
use bytes::BufMut;

/// A type that can be laid out as RLP.
///
/// Byte strings are covered by `[u8]`, [`Bytes`] and [`FixedBytes`]; `Vec<T>`
/// always encodes as a list, including `Vec<u8>`.
pub trait Encodable {
    /// Appends the encoding of `self` to `out`.
    fn encode(&self, out: &mut dyn BufMut);

    /// Number of bytes [`Self::encode`] will write.
    fn length(&self) -> usize;
}

impl Encodable for bool {
    #[inline]
    fn encode(&self, out: &mut dyn BufMut) {
        // true => 0x01, false => the empty string marker.
        out.put_u8(if *self { 1 } else { EMPTY_STRING_CODE });
    }

    #[inline]
    fn length(&self) -> usize {
        1
    }
}

impl Encodable for u8 {
    fn encode(&self, out: &mut dyn BufMut) {
        let x = *self;
        if x == 0 {
            out.put_u8(EMPTY_STRING_CODE);
        } else if x < EMPTY_STRING_CODE {
            out.put_u8(x);
        } else {
            out.put_u8(EMPTY_STRING_CODE + 1);
            out.put_u8(x);
        }
    }

    #[inline]
    fn length(&self) -> usize {
        if *self < EMPTY_STRING_CODE {
            1
        } else {
            2
        }
    }
}

macro_rules! uint_impl {
    ($($t:ty),+ $(,)?) => {$(
        impl Encodable for $t {
            fn encode(&self, out: &mut dyn BufMut) {
                let x = *self;
                if x == 0 {
                    out.put_u8(EMPTY_STRING_CODE);
                } else if x < EMPTY_STRING_CODE as $t {
                    out.put_u8(x as u8);
                } else {
                    let be = x.to_be_bytes();
                    let be = &be[(x.leading_zeros() / 8) as usize..];
                    out.put_u8(EMPTY_STRING_CODE + be.len() as u8);
                    out.put_slice(be);
                }
            }

            #[inline]
            fn length(&self) -> usize {
                let x = *self;
                if x < EMPTY_STRING_CODE as $t {
                    1
                } else {
                    1 + core::mem::size_of::<$t>() - (x.leading_zeros() / 8) as usize
                }
            }
        }
    )+};
}

uint_impl!(u16, u32, u64, u128);

impl Encodable for usize {
    #[inline]
    fn encode(&self, out: &mut dyn BufMut) {
        (*self as u64).encode(out)
    }

    #[inline]
    fn length(&self) -> usize {
        (*self as u64).length()
    }
}

impl Encodable for U256 {
    fn encode(&self, out: &mut dyn BufMut) {
        if self.is_zero() {
            out.put_u8(EMPTY_STRING_CODE);
        } else if *self < U256::from(EMPTY_STRING_CODE) {
            out.put_u8(self.to::<u8>());
        } else {
            let be = self.to_be_bytes::<32>();
            let be = &be[32 - self.byte_len()..];
            out.put_u8(EMPTY_STRING_CODE + be.len() as u8);
            out.put_slice(be);
        }
    }

    #[inline]
    fn length(&self) -> usize {
        if *self < U256::from(EMPTY_STRING_CODE) {
            1
        } else {
            1 + self.byte_len()
        }
    }
}

impl Encodable for [u8] {
    fn encode(&self, out: &mut dyn BufMut) {
        if self.len() == 1 && self[0] < EMPTY_STRING_CODE {
            out.put_u8(self[0]);
        } else {
            Header { list: false, payload_length: self.len() }.encode(out);
            out.put_slice(self);
        }
    }

    fn length(&self) -> usize {
        if self.len() == 1 && self[0] < EMPTY_STRING_CODE {
            1
        } else {
            Header { list: false, payload_length: self.len() }.length_with_payload()
        }
    }
}

impl<const N: usize> Encodable for FixedBytes<N> {
    #[inline]
    fn encode(&self, out: &mut dyn BufMut) {
        self.as_slice().encode(out)
    }

    #[inline]
    fn length(&self) -> usize {
        self.as_slice().length()
    }
}

impl Encodable for Address {
    #[inline]
    fn encode(&self, out: &mut dyn BufMut) {
        self.as_slice().encode(out)
    }

    #[inline]
    fn length(&self) -> usize {
        self.as_slice().length()
    }
}

impl Encodable for Bytes {
    #[inline]
    fn encode(&self, out: &mut dyn BufMut) {
        self.as_ref().encode(out)
    }

    #[inline]
    fn length(&self) -> usize {
        self.as_ref().length()
    }
}

impl Encodable for str {
    #[inline]
    fn encode(&self, out: &mut dyn BufMut) {
        self.as_bytes().encode(out)
    }

    #[inline]
    fn length(&self) -> usize {
        self.as_bytes().length()
    }
}

impl Encodable for String {
    #[inline]
    fn encode(&self, out: &mut dyn BufMut) {
        self.as_bytes().encode(out)
    }

    #[inline]
    fn length(&self) -> usize {
        self.as_bytes().length()
    }
}

impl<T: ?Sized + Encodable> Encodable for &T {
    #[inline]
    fn encode(&self, out: &mut dyn BufMut) {
        (**self).encode(out)
    }

    #[inline]
    fn length(&self) -> usize {
        (**self).length()
    }
}

/// An absent optional encodes as the empty string marker.
impl<T: Encodable> Encodable for Option<T> {
    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            Some(value) => value.encode(out),
            None => out.put_u8(EMPTY_STRING_CODE),
        }
    }

    fn length(&self) -> usize {
        match self {
            Some(value) => value.length(),
            None => 1,
        }
    }
}

impl<T: Encodable> Encodable for Vec<T> {
    #[inline]
    fn encode(&self, out: &mut dyn BufMut) {
        encode_list(self, out)
    }

    #[inline]
    fn length(&self) -> usize {
        list_length(self)
    }
}

/// Encodes `value` into a fresh buffer.
pub fn encode<T: Encodable>(value: T) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.length());
    value.encode(&mut out);
    out
}

/// Encodes a slice of items as an RLP list.
pub fn encode_list<T: Encodable>(items: &[T], out: &mut dyn BufMut) {
    let payload_length = items.iter().map(Encodable::length).sum();
    Header { list: true, payload_length }.encode(out);
    for item in items {
        item.encode(out);
    }
}

/// Total encoded size of a slice encoded as an RLP list.
pub fn list_length<T: Encodable>(items: &[T]) -> usize {
    let payload_length: usize = items.iter().map(Encodable::length).sum();
    Header { list: true, payload_length }.length_with_payload()
}

/// Number of bytes the big-endian length field of a long-form prefix needs,
/// zero when the short form applies.
pub const fn length_of_length(payload_length: usize) -> usize {
    if payload_length < 56 {
        0
    } else {
        core::mem::size_of::<usize>() - (payload_length.leading_zeros() / 8) as usize
    }
}
