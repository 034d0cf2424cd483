use crate::{
    transaction::{Signature, TransactionError, TxKind},
    ChainId,
};
use alloy_primitives::{keccak256, Bytes, B256, U256};
use bytes::BufMut;
use ethwire_rlp::{Decodable, Encodable, Header, EMPTY_STRING_CODE};

/// An untyped legacy transaction.
///
/// The oldest wire format: a bare RLP list with no type byte. The chain id,
/// when present, never appears as a field — it travels inside the signature
/// `v` value (EIP-155) and as a `(chain_id, 0, 0)` trailer on the signing
/// preimage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct TxLegacy {
    /// Replay-protection chain id; `None` (or zero) disables EIP-155.
    pub chain_id: Option<ChainId>,
    /// Sender nonce.
    pub nonce: u64,
    /// Price per unit of gas.
    pub gas_price: u128,
    /// Gas limit.
    pub gas_limit: u64,
    /// Call target or contract creation.
    pub to: TxKind,
    /// Wei transferred with the call.
    pub value: U256,
    /// Call data.
    pub input: Bytes,
}

impl TxLegacy {
    /// Effective chain id, treating zero as unprotected.
    fn eip155_chain_id(&self) -> Option<ChainId> {
        self.chain_id.filter(|id| *id > 0)
    }

    pub(crate) fn fields_len(&self) -> usize {
        self.nonce.length()
            + self.gas_price.length()
            + self.gas_limit.length()
            + self.to.length()
            + self.value.length()
            + self.input.length()
    }

    pub(crate) fn rlp_encode_fields(&self, out: &mut dyn BufMut) {
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas_limit.encode(out);
        self.to.encode(out);
        self.value.encode(out);
        self.input.encode(out);
    }

    /// Encodes the signing preimage.
    ///
    /// With EIP-155 active the field list gains the `(chain_id, 0, 0)`
    /// placeholder trailer; without it the six fields stand alone.
    pub fn encode_for_signing(&self, out: &mut dyn BufMut) {
        let mut payload_length = self.fields_len();
        if let Some(id) = self.eip155_chain_id() {
            payload_length += id.length() + 2;
        }
        Header { list: true, payload_length }.encode(out);
        self.rlp_encode_fields(out);
        if let Some(id) = self.eip155_chain_id() {
            id.encode(out);
            out.put_u8(EMPTY_STRING_CODE);
            out.put_u8(EMPTY_STRING_CODE);
        }
    }

    /// Keccak-256 of the signing preimage.
    pub fn signature_hash(&self) -> B256 {
        let mut buf = Vec::new();
        self.encode_for_signing(&mut buf);
        keccak256(&buf)
    }

    /// Length of [`Self::encode_with_signature`] output.
    pub fn encoded_len_with_signature(&self, signature: &Signature) -> usize {
        let payload_length = self.fields_len() + signature.rlp_len_legacy(self.eip155_chain_id());
        Header { list: true, payload_length }.length_with_payload()
    }

    /// Encodes the signed transaction: the fields followed by `(v, r, s)`
    /// with the EIP-155 `v` derivation applied.
    pub fn encode_with_signature(&self, signature: &Signature, out: &mut dyn BufMut) {
        let payload_length = self.fields_len() + signature.rlp_len_legacy(self.eip155_chain_id());
        Header { list: true, payload_length }.encode(out);
        self.rlp_encode_fields(out);
        signature.rlp_encode_legacy(self.eip155_chain_id(), out);
    }

    /// Decodes a signed legacy transaction from its bare RLP list.
    pub(crate) fn rlp_decode_signed(buf: &mut &[u8]) -> Result<(Self, Signature), TransactionError> {
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(ethwire_rlp::Error::UnexpectedString.into());
        }
        let remaining = buf.len();

        let mut tx = Self {
            chain_id: None,
            nonce: Decodable::decode(buf)?,
            gas_price: Decodable::decode(buf)?,
            gas_limit: Decodable::decode(buf)?,
            to: Decodable::decode(buf)?,
            value: Decodable::decode(buf)?,
            input: Decodable::decode(buf)?,
        };
        let (signature, chain_id) = Signature::rlp_decode_legacy(buf)?;
        tx.chain_id = chain_id;

        if remaining - buf.len() != header.payload_length {
            return Err(ethwire_rlp::Error::UnexpectedLength.into());
        }
        Ok((tx, signature))
    }
}
