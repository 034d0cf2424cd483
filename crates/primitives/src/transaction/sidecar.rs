use crate::transaction::{Signature, TransactionError, TxEip4844, EIP4844_TX_TYPE_ID};
use alloy_primitives::{FixedBytes, B256};
use bytes::BufMut;
use ethwire_rlp::{Decodable, Encodable, Header};
use sha2::{Digest, Sha256};

/// Bytes per blob: 4096 field elements of 32 bytes each.
pub const BYTES_PER_BLOB: usize = 131_072;

/// Version byte of a KZG versioned hash.
pub const VERSIONED_HASH_VERSION_KZG: u8 = 0x01;

/// A 48-byte KZG commitment or proof.
pub type Bytes48 = FixedBytes<48>;

/// One opaque blob of data-availability payload.
///
/// The codec only moves blobs around; interpreting or proving them belongs
/// to the KZG library.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Blob(pub Box<[u8; BYTES_PER_BLOB]>);

impl Default for Blob {
    fn default() -> Self {
        Self(Box::new([0u8; BYTES_PER_BLOB]))
    }
}

impl Blob {
    /// Wraps raw blob bytes; the length must be exact.
    pub fn from_slice(data: &[u8]) -> Option<Self> {
        if data.len() != BYTES_PER_BLOB {
            return None;
        }
        let mut blob = Self::default();
        blob.0.copy_from_slice(data);
        Some(blob)
    }
}

impl Encodable for Blob {
    fn encode(&self, out: &mut dyn BufMut) {
        self.0.as_slice().encode(out)
    }

    fn length(&self) -> usize {
        self.0.as_slice().length()
    }
}

impl Decodable for Blob {
    fn decode(buf: &mut &[u8]) -> ethwire_rlp::Result<Self> {
        let bytes = Header::decode_bytes(buf, false)?;
        Self::from_slice(bytes).ok_or(ethwire_rlp::Error::UnexpectedLength)
    }
}

/// Maps a KZG commitment to its versioned hash:
/// the version byte over the tail of the commitment's SHA-256.
pub fn kzg_to_versioned_hash(commitment: &Bytes48) -> B256 {
    let mut hash: [u8; 32] = Sha256::digest(commitment.as_slice()).into();
    hash[0] = VERSIONED_HASH_VERSION_KZG;
    B256::from(hash)
}

/// The blob payload gossiped next to an EIP-4844 transaction: parallel lists
/// of blobs, their commitments and their proofs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BlobTransactionSidecar {
    /// The blob payloads.
    pub blobs: Vec<Blob>,
    /// One KZG commitment per blob.
    pub commitments: Vec<Bytes48>,
    /// One KZG proof per blob.
    pub proofs: Vec<Bytes48>,
}

impl BlobTransactionSidecar {
    /// Versioned hashes of the commitments, in order.
    pub fn versioned_hashes(&self) -> Vec<B256> {
        self.commitments.iter().map(kzg_to_versioned_hash).collect()
    }

    pub(crate) fn fields_len(&self) -> usize {
        self.blobs.length() + self.commitments.length() + self.proofs.length()
    }

    /// Encodes the three sidecar lists, without an enclosing header.
    pub fn rlp_encode_fields(&self, out: &mut dyn BufMut) {
        self.blobs.encode(out);
        self.commitments.encode(out);
        self.proofs.encode(out);
    }

    /// Decodes the three sidecar lists, without an enclosing header.
    pub fn rlp_decode_fields(buf: &mut &[u8]) -> ethwire_rlp::Result<Self> {
        Ok(Self {
            blobs: Decodable::decode(buf)?,
            commitments: Decodable::decode(buf)?,
            proofs: Decodable::decode(buf)?,
        })
    }
}

/// A canonical EIP-4844 transaction paired with its sidecar.
///
/// Which of the two Cancun wire forms gets produced is a type decision:
/// [`TxEip4844`] alone serializes the canonical form, this pairing
/// serializes the network wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxEip4844WithSidecar {
    /// The canonical transaction.
    pub tx: TxEip4844,
    /// The blob payload backing the transaction's versioned hashes.
    pub sidecar: BlobTransactionSidecar,
}

impl TxEip4844WithSidecar {
    /// Pairs a transaction with its sidecar.
    ///
    /// Empty versioned hashes are derived from the sidecar commitments;
    /// supplied ones must match the derived set exactly.
    pub fn try_new(
        mut tx: TxEip4844,
        sidecar: BlobTransactionSidecar,
    ) -> Result<Self, TransactionError> {
        let derived = sidecar.versioned_hashes();
        if tx.blob_versioned_hashes.is_empty() {
            tx.blob_versioned_hashes = derived;
        } else if tx.blob_versioned_hashes != derived {
            return Err(TransactionError::BlobVersionedHashesMismatch);
        }
        Ok(Self { tx, sidecar })
    }
}

/// A signed blob transaction in its network form.
///
/// Serializes as
/// `0x03 || rlp([tx_payload_body, blobs, commitments, proofs])`, the shape
/// `PooledTransactions` responses carry. Block bodies and signing hashes use
/// the canonical form instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobTransaction {
    /// The transaction signature.
    pub signature: Signature,
    /// The transaction payload with the sidecar.
    pub transaction: TxEip4844WithSidecar,
}

impl BlobTransaction {
    fn wrapper_payload_length(&self) -> usize {
        let TxEip4844WithSidecar { tx, sidecar } = &self.transaction;
        tx.rlp_encoded_len_signed(&self.signature) + sidecar.fields_len()
    }

    /// Length of [`Self::encode_2718`] output.
    pub fn encode_2718_len(&self) -> usize {
        1 + Header { list: true, payload_length: self.wrapper_payload_length() }
            .length_with_payload()
    }

    /// Encodes the network wrapper, type byte included.
    pub fn encode_2718(&self, out: &mut dyn BufMut) {
        let TxEip4844WithSidecar { tx, sidecar } = &self.transaction;
        out.put_u8(EIP4844_TX_TYPE_ID);
        Header { list: true, payload_length: self.wrapper_payload_length() }.encode(out);
        tx.rlp_encode_signed(&self.signature, out);
        sidecar.rlp_encode_fields(out);
    }

    /// Encodes the network wrapper into a fresh buffer.
    pub fn encoded_2718(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encode_2718_len());
        self.encode_2718(&mut out);
        out
    }

    /// Decodes a network wrapper, expecting the leading type byte.
    pub fn decode_2718(buf: &mut &[u8]) -> Result<Self, TransactionError> {
        match buf.first() {
            Some(&EIP4844_TX_TYPE_ID) => *buf = &buf[1..],
            Some(&other) => return Err(TransactionError::InvalidTransactionType(other)),
            None => return Err(ethwire_rlp::Error::InputTooShort.into()),
        }
        Self::decode_inner(buf)
    }

    /// Decodes the wrapper list `[tx_payload_body, blobs, commitments,
    /// proofs]`, type byte already consumed.
    pub(crate) fn decode_inner(buf: &mut &[u8]) -> Result<Self, TransactionError> {
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(ethwire_rlp::Error::UnexpectedString.into());
        }
        let remaining = buf.len();

        let (tx, signature) = TxEip4844::rlp_decode_signed(buf)?;
        let sidecar = BlobTransactionSidecar::rlp_decode_fields(buf)?;
        if remaining - buf.len() != header.payload_length {
            return Err(ethwire_rlp::Error::UnexpectedLength.into());
        }

        let transaction = TxEip4844WithSidecar::try_new(tx, sidecar)?;
        Ok(Self { signature, transaction })
    }
}
