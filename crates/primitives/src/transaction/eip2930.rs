use crate::{
    transaction::{AccessList, Signature, TxKind, EIP2930_TX_TYPE_ID},
    ChainId,
};
use alloy_primitives::{keccak256, Bytes, B256, U256};
use bytes::BufMut;
use ethwire_rlp::{Decodable, Encodable, Header};

/// An EIP-2930 access list transaction (Berlin).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct TxEip2930 {
    /// Chain the transaction is valid on.
    pub chain_id: ChainId,
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
    /// Accounts and storage keys the transaction plans to access.
    pub access_list: AccessList,
}

impl TxEip2930 {
    pub(crate) fn fields_len(&self) -> usize {
        self.chain_id.length()
            + self.nonce.length()
            + self.gas_price.length()
            + self.gas_limit.length()
            + self.to.length()
            + self.value.length()
            + self.input.length()
            + self.access_list.length()
    }

    pub(crate) fn rlp_encode_fields(&self, out: &mut dyn BufMut) {
        self.chain_id.encode(out);
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas_limit.encode(out);
        self.to.encode(out);
        self.value.encode(out);
        self.input.encode(out);
        self.access_list.encode(out);
    }

    pub(crate) fn rlp_decode_fields(buf: &mut &[u8]) -> ethwire_rlp::Result<Self> {
        Ok(Self {
            chain_id: Decodable::decode(buf)?,
            nonce: Decodable::decode(buf)?,
            gas_price: Decodable::decode(buf)?,
            gas_limit: Decodable::decode(buf)?,
            to: Decodable::decode(buf)?,
            value: Decodable::decode(buf)?,
            input: Decodable::decode(buf)?,
            access_list: Decodable::decode(buf)?,
        })
    }

    /// Encodes the signing preimage: the type byte over the unsigned list.
    pub fn encode_for_signing(&self, out: &mut dyn BufMut) {
        out.put_u8(EIP2930_TX_TYPE_ID);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::AccessListItem;
    use alloy_primitives::{address, b256, Address};

    #[test]
    fn roundtrip_create() {
        let tx = TxEip2930 {
            chain_id: 1,
            nonce: 0,
            gas_price: 1,
            gas_limit: 2,
            to: TxKind::Create,
            value: U256::from(3),
            input: Bytes::from(vec![1, 2]),
            access_list: Default::default(),
        };
        let signature = Signature { odd_y_parity: true, ..Default::default() };

        let mut encoded = Vec::new();
        tx.rlp_encode_signed(&signature, &mut encoded);
        assert_eq!(encoded.len(), tx.rlp_encoded_len_signed(&signature));

        let (decoded, decoded_signature) = TxEip2930::rlp_decode_signed(&mut &encoded[..]).unwrap();
        assert_eq!(decoded, tx);
        assert_eq!(decoded_signature, signature);
    }

    #[test]
    fn roundtrip_call_with_access_list() {
        let tx = TxEip2930 {
            chain_id: 1,
            nonce: 7,
            gas_price: 30_000_000_000,
            gas_limit: 100_000,
            to: TxKind::Call(Address::default()),
            value: U256::ZERO,
            input: Bytes::new(),
            access_list: AccessList(vec![AccessListItem {
                address: address!("de0b295669a9fd93d5f28d9ec85e40f4cb697bae"),
                storage_keys: vec![b256!(
                    "0000000000000000000000000000000000000000000000000000000000000003"
                )],
            }]),
        };
        let signature = Signature { r: U256::from(1), s: U256::from(2), odd_y_parity: false };

        let mut encoded = Vec::new();
        tx.rlp_encode_signed(&signature, &mut encoded);
        let (decoded, _) = TxEip2930::rlp_decode_signed(&mut &encoded[..]).unwrap();
        assert_eq!(decoded, tx);
    }

    #[test]
    fn preimage_starts_with_type_byte() {
        let tx = TxEip2930::default();
        let mut buf = Vec::new();
        tx.encode_for_signing(&mut buf);
        assert_eq!(buf[0], 0x01);
    }
}
