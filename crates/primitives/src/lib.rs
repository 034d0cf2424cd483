#![warn(missing_debug_implementations, missing_docs, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]

//! Ethereum transaction envelope types and their wire serialization.
//!
//! This crate assembles per-EIP field tuples, splices signatures into place
//! and produces the exact byte sequences `eth_sendRawTransaction` expects.
//! It validates nothing beyond shape: balances, nonces and gas economics are
//! the node's problem, and signing is the wallet's.

pub mod transaction;

pub use transaction::{
    kzg_to_versioned_hash, AccessList, AccessListItem, Authorization, Blob, BlobTransaction,
    BlobTransactionSidecar, Bytes48, Signature, Transaction, TransactionError, TransactionSigned,
    TxEip1559, TxEip2930, TxEip4844, TxEip4844WithSidecar, TxEip7702, TxKind, TxLegacy, TxType,
    BYTES_PER_BLOB, EIP1559_TX_TYPE_ID, EIP2930_TX_TYPE_ID, EIP4844_TX_TYPE_ID,
    EIP7702_TX_TYPE_ID, LEGACY_TX_TYPE_ID, VERSIONED_HASH_VERSION_KZG,
};

// Re-exported so downstream crates name one source for these.
pub use alloy_primitives::{self, Address, Bytes, FixedBytes, B256, U256};
pub use ethwire_rlp as rlp;

/// Chain identifier type (introduced in EIP-155).
pub type ChainId = u64;
/// A transaction hash: keccak-256 of the raw enveloped transaction.
pub type TxHash = B256;
/// An account storage key.
pub type StorageKey = B256;
