use alloy_primitives::Address;
use ethwire_rlp::{Decodable, Encodable, EMPTY_STRING_CODE};

/// The destination of a transaction: a call to an account or a contract
/// creation.
///
/// Creation is spelled as the empty string on the wire, a call as the
/// 20-byte address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TxKind {
    /// Create a new contract.
    #[default]
    Create,
    /// Call the account at the address.
    Call(Address),
}

impl TxKind {
    /// The call target, if any.
    pub const fn to(&self) -> Option<&Address> {
        match self {
            Self::Create => None,
            Self::Call(to) => Some(to),
        }
    }

    /// True for contract creations.
    pub const fn is_create(&self) -> bool {
        matches!(self, Self::Create)
    }
}

impl From<Address> for TxKind {
    fn from(address: Address) -> Self {
        Self::Call(address)
    }
}

impl Encodable for TxKind {
    fn encode(&self, out: &mut dyn bytes::BufMut) {
        match self {
            Self::Create => out.put_u8(EMPTY_STRING_CODE),
            Self::Call(to) => to.encode(out),
        }
    }

    fn length(&self) -> usize {
        match self {
            Self::Create => 1,
            Self::Call(to) => to.length(),
        }
    }
}

impl Decodable for TxKind {
    fn decode(buf: &mut &[u8]) -> ethwire_rlp::Result<Self> {
        if buf.first() == Some(&EMPTY_STRING_CODE) {
            *buf = &buf[1..];
            return Ok(Self::Create);
        }
        Address::decode(buf).map(Self::Call)
    }
}
