use crate::transaction::TransactionError;

/// Identifier of an untyped legacy transaction.
pub const LEGACY_TX_TYPE_ID: u8 = 0;
/// EIP-2930 type byte.
pub const EIP2930_TX_TYPE_ID: u8 = 1;
/// EIP-1559 type byte.
pub const EIP1559_TX_TYPE_ID: u8 = 2;
/// EIP-4844 type byte.
pub const EIP4844_TX_TYPE_ID: u8 = 3;
/// EIP-7702 type byte.
pub const EIP7702_TX_TYPE_ID: u8 = 4;

/// Transaction kind discriminator per EIP-2718.
///
/// Legacy transactions never emit this byte on the wire; all other kinds
/// prepend it to their RLP payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TxType {
    /// Legacy transaction pre EIP-2718.
    #[default]
    Legacy = 0,
    /// Access list transaction (Berlin).
    Eip2930 = 1,
    /// Dynamic fee transaction (London).
    Eip1559 = 2,
    /// Blob transaction (Cancun).
    Eip4844 = 3,
    /// Set-code transaction (Prague).
    Eip7702 = 4,
}

impl TryFrom<u8> for TxType {
    type Error = TransactionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            LEGACY_TX_TYPE_ID => Ok(Self::Legacy),
            EIP2930_TX_TYPE_ID => Ok(Self::Eip2930),
            EIP1559_TX_TYPE_ID => Ok(Self::Eip1559),
            EIP4844_TX_TYPE_ID => Ok(Self::Eip4844),
            EIP7702_TX_TYPE_ID => Ok(Self::Eip7702),
            _ => Err(TransactionError::InvalidTransactionType(value)),
        }
    }
}

impl From<TxType> for u8 {
    fn from(value: TxType) -> Self {
        value as Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn type_byte_roundtrip() {
        for ty in [TxType::Legacy, TxType::Eip2930, TxType::Eip1559, TxType::Eip4844, TxType::Eip7702]
        {
            assert_eq!(TxType::try_from(u8::from(ty)).unwrap(), ty);
        }
    }

    #[test]
    fn unknown_type_bytes_are_rejected() {
        assert_matches!(TxType::try_from(0x05), Err(TransactionError::InvalidTransactionType(0x05)));
        assert_matches!(TxType::try_from(0x7f), Err(TransactionError::InvalidTransactionType(0x7f)));
    }
}
