use alloy_primitives::{Address, U256};
use bytes::BufMut;
use ethwire_rlp::{Decodable, Encodable, Header};

/// One EIP-7702 authorization: a signed permission to set the authority's
/// code to the target address.
///
/// Entries flatten to `(chain_id, address, nonce, y_parity, r, s)` on the
/// wire; the order is fixed by the EIP.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Authorization {
    /// Chain the authorization is valid on; zero means any chain.
    pub chain_id: U256,
    /// Code delegation target.
    pub address: Address,
    /// The authority's nonce at signing time.
    pub nonce: u64,
    /// Signature parity bit.
    pub y_parity: u8,
    /// Signature `r`.
    pub r: U256,
    /// Signature `s`.
    pub s: U256,
}

impl Authorization {
    fn payload_length(&self) -> usize {
        self.chain_id.length()
            + self.address.length()
            + self.nonce.length()
            + self.y_parity.length()
            + self.r.length()
            + self.s.length()
    }
}

impl Encodable for Authorization {
    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.payload_length() }.encode(out);
        self.chain_id.encode(out);
        self.address.encode(out);
        self.nonce.encode(out);
        self.y_parity.encode(out);
        self.r.encode(out);
        self.s.encode(out);
    }

    fn length(&self) -> usize {
        Header { list: true, payload_length: self.payload_length() }.length_with_payload()
    }
}

impl Decodable for Authorization {
    fn decode(buf: &mut &[u8]) -> ethwire_rlp::Result<Self> {
        let mut payload = Header::decode_bytes(buf, true)?;
        let authorization = Self {
            chain_id: Decodable::decode(&mut payload)?,
            address: Decodable::decode(&mut payload)?,
            nonce: Decodable::decode(&mut payload)?,
            y_parity: Decodable::decode(&mut payload)?,
            r: Decodable::decode(&mut payload)?,
            s: Decodable::decode(&mut payload)?,
        };
        if !payload.is_empty() {
            return Err(ethwire_rlp::Error::UnexpectedLength);
        }
        Ok(authorization)
    }
}
