use crate::{
    transaction::{AccessList, Authorization, Signature, EIP7702_TX_TYPE_ID},
    ChainId,
};
use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use bytes::BufMut;
use ethwire_rlp::{Decodable, Encodable, Header};

/// An EIP-7702 set-code transaction (Prague).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct TxEip7702 {
    /// Chain the transaction is valid on.
    pub chain_id: ChainId,
    /// Sender nonce.
    pub nonce: u64,
    /// Tip offered to the block producer, per unit of gas.
    pub max_priority_fee_per_gas: u128,
    /// Ceiling on the total per-gas price.
    pub max_fee_per_gas: u128,
    /// Gas limit.
    pub gas_limit: u64,
    /// Call target; set-code transactions cannot create contracts.
    pub to: Address,
    /// Wei transferred with the call.
    pub value: U256,
    /// Call data.
    pub input: Bytes,
    /// Accounts and storage keys the transaction plans to access.
    pub access_list: AccessList,
    /// Code delegations installed before execution.
    pub authorization_list: Vec<Authorization>,
}

impl TxEip7702 {
    pub(crate) fn fields_len(&self) -> usize {
        self.chain_id.length()
            + self.nonce.length()
            + self.max_priority_fee_per_gas.length()
            + self.max_fee_per_gas.length()
            + self.gas_limit.length()
            + self.to.length()
            + self.value.length()
            + self.input.length()
            + self.access_list.length()
            + self.authorization_list.length()
    }

    pub(crate) fn rlp_encode_fields(&self, out: &mut dyn BufMut) {
        self.chain_id.encode(out);
        self.nonce.encode(out);
        self.max_priority_fee_per_gas.encode(out);
        self.max_fee_per_gas.encode(out);
        self.gas_limit.encode(out);
        self.to.encode(out);
        self.value.encode(out);
        self.input.encode(out);
        self.access_list.encode(out);
        self.authorization_list.encode(out);
    }

    pub(crate) fn rlp_decode_fields(buf: &mut &[u8]) -> ethwire_rlp::Result<Self> {
        Ok(Self {
            chain_id: Decodable::decode(buf)?,
            nonce: Decodable::decode(buf)?,
            max_priority_fee_per_gas: Decodable::decode(buf)?,
            max_fee_per_gas: Decodable::decode(buf)?,
            gas_limit: Decodable::decode(buf)?,
            to: Decodable::decode(buf)?,
            value: Decodable::decode(buf)?,
            input: Decodable::decode(buf)?,
            access_list: Decodable::decode(buf)?,
            authorization_list: Decodable::decode(buf)?,
        })
    }

    /// Encodes the signing preimage: the type byte over the unsigned list.
    pub fn encode_for_signing(&self, out: &mut dyn BufMut) {
        out.put_u8(EIP7702_TX_TYPE_ID);
        Header { list: true, payload_length: self.fields_len() }.encode(out);
        self.rlp_encode_fields(out);
    }

    /// Keccak-256 of the signing preimage.
    pub fn signature_hash(&self) -> B256 {
        let mut buf = Vec::new();
        self.encode_for_signing(&mut buf);
        keccak256(&buf)
    }

    /// Length of the signed list encoding, type byte excluded.
    pub(crate) fn rlp_encoded_len_signed(&self, signature: &Signature) -> usize {
        let payload_length = self.fields_len() + signature.rlp_len_typed();
        Header { list: true, payload_length }.length_with_payload()
    }

    /// Encodes the signed list `[fields.., y_parity, r, s]`, type byte
    /// excluded.
    pub(crate) fn rlp_encode_signed(&self, signature: &Signature, out: &mut dyn BufMut) {
        let payload_length = self.fields_len() + signature.rlp_len_typed();
        Header { list: true, payload_length }.encode(out);
        self.rlp_encode_fields(out);
        signature.rlp_encode_typed(out);
    }

    /// Decodes the signed list, type byte already consumed.
    pub(crate) fn rlp_decode_signed(buf: &mut &[u8]) -> ethwire_rlp::Result<(Self, Signature)> {
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(ethwire_rlp::Error::UnexpectedString);
        }
        let remaining = buf.len();
        let tx = Self::rlp_decode_fields(buf)?;
        let signature = Signature::rlp_decode_typed(buf)?;
        if remaining - buf.len() != header.payload_length {
            return Err(ethwire_rlp::Error::UnexpectedLength);
        }
        Ok((tx, signature))
    }
}
