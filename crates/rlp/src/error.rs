/// RLP result type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors produced while encoding or decoding RLP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A length exceeded what the format (or the host `usize`) can represent.
    #[error("length is larger than the format can represent")]
    Overflow,
    /// Signed values below zero have no RLP representation.
    #[error("negative numbers cannot be encoded")]
    NegativeNumber,
    /// The input ended before the announced payload did.
    #[error("input too short")]
    InputTooShort,
    /// Expected a list prefix, found a string.
    #[error("unexpected string")]
    UnexpectedString,
    /// Expected a string prefix, found a list.
    #[error("unexpected list")]
    UnexpectedList,
    /// The decoded payload length does not match the expected one.
    #[error("unexpected length")]
    UnexpectedLength,
    /// The payload bytes do not form a valid value of the target type.
    #[error("unexpected value")]
    UnexpectedValue,
    /// A decoded tag string names no known enum variant.
    #[error("unknown enum tag")]
    InvalidEnumTag,
    /// An integer payload carries a leading zero byte.
    #[error("leading zero in integer")]
    LeadingZero,
    /// A value below 0x80 was wrapped in a single-byte string prefix.
    #[error("non-canonical single byte")]
    NonCanonicalSingleByte,
    /// The long form was used for a length the short form covers, or the
    /// length field itself has a leading zero.
    #[error("non-canonical size information")]
    NonCanonicalSize,
    /// Decoder-specific failure.
    #[error("{0}")]
    Custom(&'static str),
}
