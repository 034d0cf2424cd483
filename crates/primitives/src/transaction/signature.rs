use crate::{transaction::TransactionError, ChainId};
use alloy_primitives::U256;
use ethwire_rlp::{Decodable, Encodable};

/// An ECDSA signature carried by a transaction envelope.
///
/// The envelope codec only splices signatures into their wire position; it
/// neither produces nor verifies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signature {
    /// The signature's `r` value.
    pub r: U256,
    /// The signature's `s` value.
    pub s: U256,
    /// Parity of the recovered public key's `y` coordinate.
    pub odd_y_parity: bool,
}

impl Signature {
    /// The `v` value for a legacy transaction.
    ///
    /// With a chain id this is the EIP-155 form `chain_id * 2 + 35 + parity`;
    /// without replay protection it is the pre-fork `27 + parity`.
    pub const fn v(&self, chain_id: Option<ChainId>) -> u64 {
        let parity = self.odd_y_parity as u64;
        match chain_id {
            Some(id) if id > 0 => id * 2 + 35 + parity,
            _ => 27 + parity,
        }
    }

    /// Splits a legacy `v` value into parity and chain id.
    ///
    /// Accepts the EIP-155 form, the pre-fork 27/28 form and the bare 0/1
    /// parity some tooling emits; everything else is an invalid recovery id.
    pub const fn extract_chain_id(v: u64) -> Result<(bool, Option<ChainId>), TransactionError> {
        match v {
            0 | 1 => Ok((v == 1, None)),
            27 | 28 => Ok((v == 28, None)),
            _ if v >= 35 => Ok(((v - 35) % 2 == 1, Some((v - 35) / 2))),
            _ => Err(TransactionError::InvalidRecoveryId(v)),
        }
    }

    /// RLP length of the trailing `(parity, r, s)` fields of a typed
    /// transaction.
    pub(crate) fn rlp_len_typed(&self) -> usize {
        self.odd_y_parity.length() + self.r.length() + self.s.length()
    }

    /// Encodes the `(parity, r, s)` trailer of a typed transaction.
    pub(crate) fn rlp_encode_typed(&self, out: &mut dyn bytes::BufMut) {
        self.odd_y_parity.encode(out);
        self.r.encode(out);
        self.s.encode(out);
    }

    /// RLP length of the trailing `(v, r, s)` fields of a legacy transaction.
    pub(crate) fn rlp_len_legacy(&self, chain_id: Option<ChainId>) -> usize {
        self.v(chain_id).length() + self.r.length() + self.s.length()
    }

    /// Encodes the `(v, r, s)` trailer of a legacy transaction.
    pub(crate) fn rlp_encode_legacy(&self, chain_id: Option<ChainId>, out: &mut dyn bytes::BufMut) {
        self.v(chain_id).encode(out);
        self.r.encode(out);
        self.s.encode(out);
    }

    /// Decodes the `(parity, r, s)` trailer of a typed transaction.
    pub(crate) fn rlp_decode_typed(buf: &mut &[u8]) -> ethwire_rlp::Result<Self> {
        Ok(Self {
            odd_y_parity: Decodable::decode(buf)?,
            r: Decodable::decode(buf)?,
            s: Decodable::decode(buf)?,
        })
    }

    /// Decodes the `(v, r, s)` trailer of a legacy transaction, returning the
    /// chain id embedded in `v`, if any.
    pub(crate) fn rlp_decode_legacy(
        buf: &mut &[u8],
    ) -> Result<(Self, Option<ChainId>), TransactionError> {
        let v = u64::decode(buf)?;
        let (odd_y_parity, chain_id) = Self::extract_chain_id(v)?;
        let r = U256::decode(buf)?;
        let s = U256::decode(buf)?;
        Ok((Self { r, s, odd_y_parity }, chain_id))
    }
}
