/// Errors produced while assembling or parsing transaction envelopes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionError {
    /// The signature `v` value fits no known recovery scheme.
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u64),
    /// The leading byte names no known transaction type.
    #[error("unsupported transaction type: {0}")]
    InvalidTransactionType(u8),
    /// Supplied blob versioned hashes disagree with the sidecar commitments.
    #[error("blob versioned hashes do not match the sidecar commitments")]
    BlobVersionedHashesMismatch,
    /// The underlying RLP was malformed.
    #[error(transparent)]
    Rlp(#[from] ethwire_rlp::Error),
}
