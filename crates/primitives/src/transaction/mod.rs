//! Transaction envelope types and their wire serialization.

use crate::{ChainId, TxHash};
use alloy_primitives::{keccak256, Bytes, B256, U256};
use bytes::BufMut;
use ethwire_rlp::{Decodable, Encodable, Header};

pub use access_list::{AccessList, AccessListItem};
pub use authorization::Authorization;
pub use eip1559::TxEip1559;
pub use eip2930::TxEip2930;
pub use eip4844::TxEip4844;
pub use eip7702::TxEip7702;
pub use error::TransactionError;
pub use kind::TxKind;
pub use legacy::TxLegacy;
pub use sidecar::{
    kzg_to_versioned_hash, Blob, BlobTransaction, BlobTransactionSidecar, Bytes48,
    TxEip4844WithSidecar, BYTES_PER_BLOB, VERSIONED_HASH_VERSION_KZG,
};
pub use signature::Signature;
pub use tx_type::{
    TxType, EIP1559_TX_TYPE_ID, EIP2930_TX_TYPE_ID, EIP4844_TX_TYPE_ID, EIP7702_TX_TYPE_ID,
    LEGACY_TX_TYPE_ID,
};

mod access_list;
mod authorization;
mod eip1559;
mod eip2930;
mod eip4844;
mod eip7702;
mod error;
mod kind;
mod legacy;
mod sidecar;
/// Signature splicing and EIP-155 `v` handling.
pub mod signature;
mod tx_type;

/// An unsigned transaction of any supported kind.
///
/// Field order inside each variant is fixed by the corresponding EIP and is
/// exactly the order bytes hit the wire in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transaction {
    /// Untyped legacy transaction.
    Legacy(TxLegacy),
    /// EIP-2930 access list transaction.
    Eip2930(TxEip2930),
    /// EIP-1559 dynamic fee transaction.
    Eip1559(TxEip1559),
    /// EIP-4844 blob transaction, canonical form.
    Eip4844(TxEip4844),
    /// EIP-7702 set-code transaction.
    Eip7702(TxEip7702),
}

impl Transaction {
    /// The transaction's type discriminator.
    pub const fn tx_type(&self) -> TxType {
        match self {
            Self::Legacy(_) => TxType::Legacy,
            Self::Eip2930(_) => TxType::Eip2930,
            Self::Eip1559(_) => TxType::Eip1559,
            Self::Eip4844(_) => TxType::Eip4844,
            Self::Eip7702(_) => TxType::Eip7702,
        }
    }

    /// The chain id, if the transaction carries one.
    pub const fn chain_id(&self) -> Option<ChainId> {
        match self {
            Self::Legacy(tx) => tx.chain_id,
            Self::Eip2930(tx) => Some(tx.chain_id),
            Self::Eip1559(tx) => Some(tx.chain_id),
            Self::Eip4844(tx) => Some(tx.chain_id),
            Self::Eip7702(tx) => Some(tx.chain_id),
        }
    }

    /// The sender nonce.
    pub const fn nonce(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.nonce,
            Self::Eip2930(tx) => tx.nonce,
            Self::Eip1559(tx) => tx.nonce,
            Self::Eip4844(tx) => tx.nonce,
            Self::Eip7702(tx) => tx.nonce,
        }
    }

    /// The gas limit.
    pub const fn gas_limit(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.gas_limit,
            Self::Eip2930(tx) => tx.gas_limit,
            Self::Eip1559(tx) => tx.gas_limit,
            Self::Eip4844(tx) => tx.gas_limit,
            Self::Eip7702(tx) => tx.gas_limit,
        }
    }

    /// The call target; blob and set-code transactions always call.
    pub const fn kind(&self) -> TxKind {
        match self {
            Self::Legacy(tx) => tx.to,
            Self::Eip2930(tx) => tx.to,
            Self::Eip1559(tx) => tx.to,
            Self::Eip4844(tx) => TxKind::Call(tx.to),
            Self::Eip7702(tx) => TxKind::Call(tx.to),
        }
    }

    /// Wei transferred with the call.
    pub const fn value(&self) -> U256 {
        match self {
            Self::Legacy(tx) => tx.value,
            Self::Eip2930(tx) => tx.value,
            Self::Eip1559(tx) => tx.value,
            Self::Eip4844(tx) => tx.value,
            Self::Eip7702(tx) => tx.value,
        }
    }

    /// The call data.
    pub const fn input(&self) -> &Bytes {
        match self {
            Self::Legacy(tx) => &tx.input,
            Self::Eip2930(tx) => &tx.input,
            Self::Eip1559(tx) => &tx.input,
            Self::Eip4844(tx) => &tx.input,
            Self::Eip7702(tx) => &tx.input,
        }
    }

    /// Encodes the bytes that get hashed and signed for this transaction.
    pub fn encode_for_signing(&self, out: &mut dyn BufMut) {
        match self {
            Self::Legacy(tx) => tx.encode_for_signing(out),
            Self::Eip2930(tx) => tx.encode_for_signing(out),
            Self::Eip1559(tx) => tx.encode_for_signing(out),
            Self::Eip4844(tx) => tx.encode_for_signing(out),
            Self::Eip7702(tx) => tx.encode_for_signing(out),
        }
    }

    /// The signing preimage in a fresh buffer.
    pub fn encoded_for_signing(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode_for_signing(&mut buf);
        buf
    }

    /// Keccak-256 of the signing preimage.
    pub fn signature_hash(&self) -> B256 {
        match self {
            Self::Legacy(tx) => tx.signature_hash(),
            Self::Eip2930(tx) => tx.signature_hash(),
            Self::Eip1559(tx) => tx.signature_hash(),
            Self::Eip4844(tx) => tx.signature_hash(),
            Self::Eip7702(tx) => tx.signature_hash(),
        }
    }
}

impl From<TxLegacy> for Transaction {
    fn from(tx: TxLegacy) -> Self {
        Self::Legacy(tx)
    }
}

impl From<TxEip2930> for Transaction {
    fn from(tx: TxEip2930) -> Self {
        Self::Eip2930(tx)
    }
}

impl From<TxEip1559> for Transaction {
    fn from(tx: TxEip1559) -> Self {
        Self::Eip1559(tx)
    }
}

impl From<TxEip4844> for Transaction {
    fn from(tx: TxEip4844) -> Self {
        Self::Eip4844(tx)
    }
}

impl From<TxEip7702> for Transaction {
    fn from(tx: TxEip7702) -> Self {
        Self::Eip7702(tx)
    }
}

/// A transaction with its signature spliced in.
///
/// This is the unit `eth_sendRawTransaction` and block bodies deal in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransactionSigned {
    /// The transaction.
    pub transaction: Transaction,
    /// The signature over [`Transaction::signature_hash`].
    pub signature: Signature,
}

impl TransactionSigned {
    /// Pairs a transaction with a signature.
    pub fn from_transaction_and_signature(
        transaction: impl Into<Transaction>,
        signature: Signature,
    ) -> Self {
        Self { transaction: transaction.into(), signature }
    }

    /// The type byte emitted ahead of the payload; legacy has none.
    pub const fn type_flag(&self) -> Option<u8> {
        match self.transaction.tx_type() {
            TxType::Legacy => None,
            ty => Some(ty as u8),
        }
    }

    /// Length of [`Self::encode_2718`] output.
    pub fn encode_2718_len(&self) -> usize {
        match &self.transaction {
            Transaction::Legacy(tx) => tx.encoded_len_with_signature(&self.signature),
            Transaction::Eip2930(tx) => 1 + tx.rlp_encoded_len_signed(&self.signature),
            Transaction::Eip1559(tx) => 1 + tx.rlp_encoded_len_signed(&self.signature),
            Transaction::Eip4844(tx) => 1 + tx.rlp_encoded_len_signed(&self.signature),
            Transaction::Eip7702(tx) => 1 + tx.rlp_encoded_len_signed(&self.signature),
        }
    }

    /// Encodes the raw transaction: `[type_byte]? ++ rlp(fields ++ sig)`.
    ///
    /// Blob transactions serialize their canonical form here; the network
    /// wrapper with blob data is [`BlobTransaction::encode_2718`].
    pub fn encode_2718(&self, out: &mut dyn BufMut) {
        if let Some(ty) = self.type_flag() {
            out.put_u8(ty);
        }
        match &self.transaction {
            Transaction::Legacy(tx) => tx.encode_with_signature(&self.signature, out),
            Transaction::Eip2930(tx) => tx.rlp_encode_signed(&self.signature, out),
            Transaction::Eip1559(tx) => tx.rlp_encode_signed(&self.signature, out),
            Transaction::Eip4844(tx) => tx.rlp_encode_signed(&self.signature, out),
            Transaction::Eip7702(tx) => tx.rlp_encode_signed(&self.signature, out),
        }
    }

    /// The raw transaction in a fresh buffer.
    pub fn encoded_2718(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encode_2718_len());
        self.encode_2718(&mut out);
        out
    }

    /// The transaction hash: keccak-256 of the raw encoding.
    pub fn hash(&self) -> TxHash {
        keccak256(self.encoded_2718())
    }

    /// Decodes a raw transaction.
    ///
    /// Legacy payloads are RLP lists and always start at `0xc0` or above;
    /// typed payloads start with their type byte, which is always below it.
    /// That first byte is the whole dispatch.
    pub fn decode_2718(buf: &mut &[u8]) -> Result<Self, TransactionError> {
        match buf.first() {
            None => Err(ethwire_rlp::Error::InputTooShort.into()),
            Some(&byte) if byte >= 0xc0 => {
                let (tx, signature) = TxLegacy::rlp_decode_signed(buf)?;
                Ok(Self { transaction: Transaction::Legacy(tx), signature })
            }
            Some(&byte) => {
                *buf = &buf[1..];
                Self::typed_decode(TxType::try_from(byte)?, buf)
            }
        }
    }

    /// Decodes a typed payload, type byte already consumed.
    fn typed_decode(ty: TxType, buf: &mut &[u8]) -> Result<Self, TransactionError> {
        let (transaction, signature) = match ty {
            TxType::Legacy => {
                return Err(ethwire_rlp::Error::Custom(
                    "legacy transactions have no type byte",
                )
                .into())
            }
            TxType::Eip2930 => {
                let (tx, signature) = TxEip2930::rlp_decode_signed(buf)?;
                (Transaction::Eip2930(tx), signature)
            }
            TxType::Eip1559 => {
                let (tx, signature) = TxEip1559::rlp_decode_signed(buf)?;
                (Transaction::Eip1559(tx), signature)
            }
            TxType::Eip4844 => {
                let (tx, signature) = TxEip4844::rlp_decode_signed(buf)?;
                (Transaction::Eip4844(tx), signature)
            }
            TxType::Eip7702 => {
                let (tx, signature) = TxEip7702::rlp_decode_signed(buf)?;
                (Transaction::Eip7702(tx), signature)
            }
        };
        Ok(Self { transaction, signature })
    }
}

impl Encodable for TransactionSigned {
    /// Network framing: legacy transactions are their bare list, typed
    /// payloads travel wrapped in an RLP string header.
    fn encode(&self, out: &mut dyn BufMut) {
        if self.type_flag().is_some() {
            Header { list: false, payload_length: self.encode_2718_len() }.encode(out);
        }
        self.encode_2718(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.encode_2718_len();
        if self.type_flag().is_some() {
            Header { list: false, payload_length }.length_with_payload()
        } else {
            payload_length
        }
    }
}

impl Decodable for TransactionSigned {
    fn decode(buf: &mut &[u8]) -> ethwire_rlp::Result<Self> {
        fn unwrap_rlp(err: TransactionError) -> ethwire_rlp::Error {
            match err {
                TransactionError::Rlp(err) => err,
                _ => ethwire_rlp::Error::Custom("invalid enveloped transaction"),
            }
        }

        let &first = buf.first().ok_or(ethwire_rlp::Error::InputTooShort)?;
        if first >= 0xc0 {
            // Legacy: the bare list itself.
            return Self::decode_2718(buf).map_err(unwrap_rlp);
        }
        // Typed: unwrap the string header first.
        let mut payload = Header::decode_bytes(buf, false)?;
        let tx = Self::decode_2718(&mut payload).map_err(unwrap_rlp)?;
        // The string header's payload must be exactly one transaction.
        if !payload.is_empty() {
            return Err(ethwire_rlp::Error::UnexpectedLength);
        }
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256, hex, Address};
    use assert_matches::assert_matches;
    use core::str::FromStr;

    #[test]
    fn type_flag_determinism() {
        let signature = Signature::default();
        let cases: [(Transaction, Option<u8>); 5] = [
            (Transaction::Legacy(Default::default()), None),
            (Transaction::Eip2930(Default::default()), Some(0x01)),
            (Transaction::Eip1559(Default::default()), Some(0x02)),
            (Transaction::Eip4844(Default::default()), Some(0x03)),
            (Transaction::Eip7702(Default::default()), Some(0x04)),
        ];
        for (transaction, expected) in cases {
            let signed = TransactionSigned { transaction, signature };
            assert_eq!(signed.type_flag(), expected);
            let encoded = signed.encoded_2718();
            match expected {
                None => assert!(encoded[0] >= 0xc0),
                Some(ty) => assert_eq!(encoded[0], ty),
            }
        }
    }

    #[test]
    fn decode_empty_input() {
        assert_matches!(
            TransactionSigned::decode_2718(&mut &[][..]),
            Err(TransactionError::Rlp(ethwire_rlp::Error::InputTooShort))
        );
    }

    #[test]
    fn unknown_type_byte() {
        let data = [0x05u8, 0xc0];
        assert_matches!(
            TransactionSigned::decode_2718(&mut &data[..]),
            Err(TransactionError::InvalidTransactionType(0x05))
        );
    }

    #[test]
    fn decode_legacy_network_tx() {
        // Rinkeby-era legacy transaction with an EIP-155 signature.
        let data = hex!(
            "f86b02843b9aca00830186a094d3e8763675e4c425df46cc3b5c0f6cbdac3960"
            "4687038d7ea4c68000802ba00eb96ca19e8a77102767a41fc85a36afd5c61ccb"
            "09911cec5d3e86e193d9c5aea03a456401896b1b6055311536bf00a718568c74"
            "4d8c1f9df59879e8350220ca18"
        );
        let mut buf = &data[..];
        let signed = TransactionSigned::decode_2718(&mut buf).unwrap();
        assert!(buf.is_empty());

        let expected = Transaction::Legacy(TxLegacy {
            chain_id: Some(4),
            nonce: 2,
            gas_price: 1_000_000_000,
            gas_limit: 100_000,
            to: TxKind::Call(Address::from_str("d3e8763675e4c425df46cc3b5c0f6cbdac396046").unwrap()),
            value: U256::from(1_000_000_000_000_000u64),
            input: Bytes::default(),
        });
        assert_eq!(signed.transaction, expected);
        assert_eq!(
            signed.hash(),
            b256!("a517b206d2223278f860ea017d3626cacad4f52ff51030dc9a96b432f17f8d34")
        );

        // Byte-exact re-encode.
        assert_eq!(signed.encoded_2718(), data);
    }

    #[test]
    fn decode_typed_mainnet_tx() {
        // https://etherscan.io/tx/0x86718885c4b4218c6af87d3d0b0d83e3cc465df2a05c048aa4db9f1a6f9de91f
        let data = hex!(
            "02f872018307910d808507204d2cb1827d0094388c818ca8b9251b393131c08a"
            "736a67ccb19297880320d04823e2701c80c001a0cf024f4815304df2867a1a74"
            "e9d2707b6abda0337d2d54a4438d453f4160f190a07ac0e6b3bc9395b5b9c8b9"
            "e6d77204a236577a5b18467b9175c01de4faa208d9"
        );
        let signed = TransactionSigned::decode_2718(&mut &data[..]).unwrap();
        assert_eq!(signed.transaction.tx_type(), TxType::Eip1559);
        assert_eq!(
            signed.transaction.kind(),
            TxKind::Call(address!("388c818ca8b9251b393131c08a736a67ccb19297"))
        );
        assert_eq!(signed.encoded_2718(), data);
    }

    #[test]
    fn roundtrip_every_kind() {
        let signature = Signature {
            r: U256::from(0x1111),
            s: U256::from(0x2222),
            odd_y_parity: true,
        };
        let to = address!("61815774383099e24810ab832a5b2a5425c154d5");
        let transactions: [Transaction; 5] = [
            TxLegacy { chain_id: Some(1), to: TxKind::Call(to), ..Default::default() }.into(),
            TxEip2930 { chain_id: 1, to: TxKind::Call(to), ..Default::default() }.into(),
            TxEip1559 { chain_id: 1, to: TxKind::Create, ..Default::default() }.into(),
            TxEip4844 { chain_id: 1, to, ..Default::default() }.into(),
            TxEip7702 { chain_id: 1, to, ..Default::default() }.into(),
        ];

        for transaction in transactions {
            let signed = TransactionSigned { transaction, signature };
            let encoded = signed.encoded_2718();
            assert_eq!(encoded.len(), signed.encode_2718_len());

            let mut buf = &encoded[..];
            let decoded = TransactionSigned::decode_2718(&mut buf).unwrap();
            assert!(buf.is_empty(), "decoder must consume the whole payload");
            assert_eq!(decoded, signed);
        }
    }

    #[test]
    fn network_framing_roundtrip() {
        let signature = Signature { r: U256::from(1), s: U256::from(2), odd_y_parity: false };
        let signed = TransactionSigned {
            transaction: TxEip1559 { chain_id: 1, ..Default::default() }.into(),
            signature,
        };

        let mut framed = Vec::new();
        signed.encode(&mut framed);
        assert_eq!(framed.len(), signed.length());
        // Typed payloads gain a string header in network framing.
        assert!(framed[0] >= 0x80 && framed[0] < 0xc0);

        let mut buf = &framed[..];
        let decoded = TransactionSigned::decode(&mut buf).unwrap();
        assert!(buf.is_empty());
        assert_eq!(decoded, signed);

        // Legacy framing is the bare list.
        let legacy = TransactionSigned {
            transaction: TxLegacy { chain_id: Some(1), ..Default::default() }.into(),
            signature,
        };
        let mut framed = Vec::new();
        legacy.encode(&mut framed);
        assert_eq!(framed, legacy.encoded_2718());
        let decoded = TransactionSigned::decode(&mut &framed[..]).unwrap();
        assert_eq!(decoded, legacy);
    }

    #[test]
    fn signing_preimage_dispatch() {
        let tx: Transaction = TxEip1559 { chain_id: 1, nonce: 9, ..Default::default() }.into();
        let preimage = tx.encoded_for_signing();
        assert_eq!(preimage[0], 0x02);
        assert_eq!(tx.signature_hash(), keccak256(&preimage));
    }

    #[test]
    fn truncated_typed_payload() {
        // Type byte followed by a list that promises more than it holds.
        let data = [0x02u8, 0xc3, 0x01];
        assert_matches!(
            TransactionSigned::decode_2718(&mut &data[..]),
            Err(TransactionError::Rlp(ethwire_rlp::Error::InputTooShort))
        );
    }
}
