/// ABI result type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors produced while encoding or decoding ABI data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Integer width is not a multiple of 8 in `8..=256`.
    #[error("invalid integer width: {0} bits")]
    InvalidBits(usize),
    /// Fixed bytes size is outside `1..=32`.
    #[error("invalid fixed bytes size: {0}")]
    InvalidSize(usize),
    /// A tuple type carries no components.
    #[error("tuple types need at least one component")]
    EmptyComponents,
    /// The value does not fit the declared parameter type.
    #[error("value does not match parameter type {expected}")]
    TypeCheck {
        /// Canonical rendering of the declared type.
        expected: String,
    },
    /// Parameter and value counts differ.
    #[error("expected {expected} values, got {got}")]
    CountMismatch {
        /// Number of declared parameters.
        expected: usize,
        /// Number of supplied values.
        got: usize,
    },
    /// A length or offset exceeds what the encoding can address.
    #[error("length exceeds the encodable range")]
    Overflow,
    /// The buffer ended before the described data did.
    #[error("input too short")]
    InputTooShort,
    /// A head word points outside the enclosing region.
    #[error("offset {offset} is out of bounds")]
    OffsetOutOfBounds {
        /// The offending offset value.
        offset: usize,
    },
    /// A word carries bits a value of the declared type cannot have.
    #[error("invalid data: {0}")]
    InvalidData(&'static str),
    /// The response body was empty although output parameters were expected.
    #[error("expected a non-empty response")]
    EmptyResponse,
}
