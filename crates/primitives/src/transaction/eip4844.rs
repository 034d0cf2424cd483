use crate::{
    transaction::{AccessList, Signature, EIP4844_TX_TYPE_ID},
    ChainId,
};
use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use bytes::BufMut;
use ethwire_rlp::{Decodable, Encodable, Header};

/// An EIP-4844 blob transaction (Cancun), canonical form.
///
/// This is the shape that gets signed and included in blocks: the blob data
/// itself is referenced through versioned hashes only. The network form that
/// carries the blobs lives in
/// [`BlobTransaction`](crate::transaction::BlobTransaction).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct TxEip4844 {
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
    /// Call target; blob transactions cannot create contracts.
    pub to: Address,
    /// Wei transferred with the call.
    pub value: U256,
    /// Call data.
    pub input: Bytes,
    /// Accounts and storage keys the transaction plans to access.
    pub access_list: AccessList,
    /// Ceiling on the per-blob-gas price.
    pub max_fee_per_blob_gas: u128,
    /// Versioned hashes committing to the carried blobs.
    pub blob_versioned_hashes: Vec<B256>,
}

impl TxEip4844 {
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
            + self.max_fee_per_blob_gas.length()
            + self.blob_versioned_hashes.length()
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
        self.max_fee_per_blob_gas.encode(out);
        self.blob_versioned_hashes.encode(out);
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
            max_fee_per_blob_gas: Decodable::decode(buf)?,
            blob_versioned_hashes: Decodable::decode(buf)?,
        })
    }

    /// Encodes the signing preimage: the type byte over the unsigned list.
    ///
    /// Signing always operates on the canonical form, sidecar or not.
    pub fn encode_for_signing(&self, out: &mut dyn BufMut) {
        out.put_u8(EIP4844_TX_TYPE_ID);
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
    use alloy_primitives::{address, b256};

    fn sample() -> TxEip4844 {
        TxEip4844 {
            chain_id: 1,
            nonce: 3,
            max_priority_fee_per_gas: 1_000_000_000,
            max_fee_per_gas: 50_000_000_000,
            gas_limit: 21_000,
            to: address!("11e9ca82a3a762b4b5bd264d4173a242e7a77064"),
            value: U256::ZERO,
            input: Bytes::new(),
            access_list: Default::default(),
            max_fee_per_blob_gas: 20_000_000_000,
            blob_versioned_hashes: vec![
                b256!("012ec3d6f66766bedb002a190126b3549fce0047de0d4c25cffce0dc1c57921a"),
                b256!("0152d8e24762ff22b1cfd9f8c0683786a7ca63ba49973818b3d1e9512cd2cec4"),
            ],
        }
    }

    #[test]
    fn canonical_signed_roundtrip() {
        let tx = sample();
        let signature = Signature { r: U256::from(7), s: U256::from(9), odd_y_parity: false };

        let mut encoded = Vec::new();
        tx.rlp_encode_signed(&signature, &mut encoded);
        assert_eq!(encoded.len(), tx.rlp_encoded_len_signed(&signature));

        let (decoded, decoded_signature) = TxEip4844::rlp_decode_signed(&mut &encoded[..]).unwrap();
        assert_eq!(decoded, tx);
        assert_eq!(decoded_signature, signature);
    }

    #[test]
    fn preimage_is_canonical_regardless_of_blobs() {
        let tx = sample();
        let mut buf = Vec::new();
        tx.encode_for_signing(&mut buf);
        assert_eq!(buf[0], 0x03);
        // Two versioned hashes, no blobs anywhere in the preimage.
        assert_eq!(tx.blob_versioned_hashes.len(), 2);
    }
}
