use crate::{Error, Result, WORD_SIZE};
use core::fmt;

/// A Solidity parameter type.
///
/// The closed set of shapes the ABI can express; every value is checked
/// against one of these before any byte is laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// `bool`.
    Bool,
    /// `intN`, two's complement, `N` bits.
    Int(usize),
    /// `uintN`, `N` bits.
    Uint(usize),
    /// `address`, 20 bytes right-aligned in its word.
    Address,
    /// `bytesN`, 1 to 32 bytes left-aligned in its word.
    FixedBytes(usize),
    /// `string`, UTF-8, dynamic.
    String,
    /// `bytes`, dynamic.
    Bytes,
    /// `T[N]`.
    FixedArray(Box<ParamType>, usize),
    /// `T[]`, dynamic.
    Array(Box<ParamType>),
    /// `(T1,...,Tn)` with named components.
    Tuple(Vec<Param>),
}

/// A named parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Parameter or component name; empty names are allowed.
    pub name: String,
    /// The parameter's type.
    pub kind: ParamType,
}

impl Param {
    /// Creates a named parameter.
    pub fn new(name: impl Into<String>, kind: ParamType) -> Self {
        Self { name: name.into(), kind }
    }
}

impl ParamType {
    /// Checks the type's own invariants, recursively.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Int(bits) | Self::Uint(bits) => {
                if *bits == 0 || *bits > 256 || *bits % 8 != 0 {
                    return Err(Error::InvalidBits(*bits));
                }
            }
            Self::FixedBytes(size) => {
                if *size == 0 || *size > WORD_SIZE {
                    return Err(Error::InvalidSize(*size));
                }
            }
            Self::FixedArray(child, _) | Self::Array(child) => child.validate()?,
            Self::Tuple(components) => {
                if components.is_empty() {
                    return Err(Error::EmptyComponents);
                }
                for component in components {
                    component.kind.validate()?;
                }
            }
            Self::Bool | Self::Address | Self::String | Self::Bytes => {}
        }
        Ok(())
    }

    /// True if values of this type live in the tail region.
    ///
    /// Strings, bytes and unsized arrays are always dynamic; fixed arrays and
    /// tuples inherit it from their members.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::String | Self::Bytes | Self::Array(_) => true,
            Self::FixedArray(child, _) => child.is_dynamic(),
            Self::Tuple(components) => components.iter().any(|c| c.kind.is_dynamic()),
            _ => false,
        }
    }

    /// Bytes this parameter occupies in its enclosing head region.
    ///
    /// Dynamic types take one offset word; static aggregates take the sum of
    /// their members.
    pub fn static_size(&self) -> usize {
        match self {
            Self::FixedArray(child, size) if !self.is_dynamic() => size * child.static_size(),
            Self::Tuple(components) if !self.is_dynamic() => {
                components.iter().map(|c| c.kind.static_size()).sum()
            }
            _ => WORD_SIZE,
        }
    }

    /// The canonical Solidity type string, as hashed into selectors.
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Int(bits) => write!(f, "int{bits}"),
            Self::Uint(bits) => write!(f, "uint{bits}"),
            Self::Address => f.write_str("address"),
            Self::FixedBytes(size) => write!(f, "bytes{size}"),
            Self::String => f.write_str("string"),
            Self::Bytes => f.write_str("bytes"),
            Self::FixedArray(child, size) => write!(f, "{child}[{size}]"),
            Self::Array(child) => write!(f, "{child}[]"),
            Self::Tuple(components) => {
                f.write_str("(")?;
                for (i, component) in components.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", component.kind)?;
                }
                f.write_str(")")
            }
        }
    }
}
