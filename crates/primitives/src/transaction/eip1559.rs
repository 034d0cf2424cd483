use crate::{
    transaction::{AccessList, Signature, TxKind, EIP1559_TX_TYPE_ID},
    ChainId,
};
use alloy_primitives::{keccak256, Bytes, B256, U256};
use bytes::BufMut;
use ethwire_rlp::{Decodable, Encodable, Header};

/// An EIP-1559 dynamic fee transaction (London).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct TxEip1559 {
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
    /// Call target or contract creation.
    pub to: TxKind,
    /// Wei transferred with the call.
    pub value: U256,
    /// Call data.
    pub input: Bytes,
    /// Accounts and storage keys the transaction plans to access.
    pub access_list: AccessList,
}

impl TxEip1559 {
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
        })
    }

    /// Encodes the signing preimage: the type byte over the unsigned list.
    pub fn encode_for_signing(&self, out: &mut dyn BufMut) {
        out.put_u8(EIP1559_TX_TYPE_ID);
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
    use alloy_primitives::{address, hex};

    #[test]
    fn unsigned_london_vector() {
        // 69th nonce, 2 gwei fees, 21001 gas, 1 ether, two bytes of data.
        let tx = TxEip1559 {
            chain_id: 1,
            nonce: 69,
            max_priority_fee_per_gas: 2_000_000_000,
            max_fee_per_gas: 2_000_000_000,
            gas_limit: 21001,
            to: TxKind::Call(address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")),
            value: U256::from(1_000_000_000_000_000_000u64),
            input: Bytes::from(hex!("1234").to_vec()),
            access_list: Default::default(),
        };

        let mut buf = Vec::new();
        tx.encode_for_signing(&mut buf);
        assert_eq!(
            buf,
            hex!(
                "02f101458477359400847735940082520994f39fd6e51aad88f6f4ce6ab88272"
                "79cfffb92266880de0b6b3a7640000821234c0"
            )
        );
    }

    #[test]
    fn decode_mainnet_signed_tx() {
        // https://etherscan.io/tx/0x86718885c4b4218c6af87d3d0b0d83e3cc465df2a05c048aa4db9f1a6f9de91f
        let data = hex!(
            "f872018307910d808507204d2cb1827d0094388c818ca8b9251b393131c08a73"
            "6a67ccb19297880320d04823e2701c80c001a0cf024f4815304df2867a1a74e9"
            "d2707b6abda0337d2d54a4438d453f4160f190a07ac0e6b3bc9395b5b9c8b9e6"
            "d77204a236577a5b18467b9175c01de4faa208d9"
        );

        let (tx, signature) = TxEip1559::rlp_decode_signed(&mut &data[..]).unwrap();
        assert_eq!(tx.chain_id, 1);
        assert_eq!(tx.nonce, 0x07910d);
        assert_eq!(tx.to, TxKind::Call(address!("388c818ca8b9251b393131c08a736a67ccb19297")));
        assert!(signature.odd_y_parity);

        // Byte-exact re-encode.
        let mut encoded = Vec::new();
        tx.rlp_encode_signed(&signature, &mut encoded);
        assert_eq!(encoded, data);
    }

    #[test]
    fn signed_roundtrip() {
        let tx = TxEip1559 {
            chain_id: 4,
            nonce: 26,
            max_priority_fee_per_gas: 1_500_000_000,
            max_fee_per_gas: 1_500_000_013,
            gas_limit: 21_000,
            to: TxKind::Call(address!("61815774383099e24810ab832a5b2a5425c154d5")),
            value: U256::from(3_000_000_000_000_000_000u64),
            input: Bytes::new(),
            access_list: Default::default(),
        };
        let signature = Signature {
            r: U256::from(0x0102),
            s: U256::from(0x0304),
            odd_y_parity: true,
        };

        let mut encoded = Vec::new();
        tx.rlp_encode_signed(&signature, &mut encoded);
        assert_eq!(encoded.len(), tx.rlp_encoded_len_signed(&signature));
        let (decoded, decoded_signature) = TxEip1559::rlp_decode_signed(&mut &encoded[..]).unwrap();
        assert_eq!(decoded, tx);
        assert_eq!(decoded_signature, signature);
    }
}
