use crate::Param;
use alloy_primitives::{keccak256, Selector, B256};
use core::fmt::Write;

/// Renders the canonical signature string, e.g. `transfer(address,uint256)`.
pub fn signature(name: &str, params: &[Param]) -> String {
    let mut out = String::from(name);
    out.push('(');
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        // Display on ParamType is the canonical form, so this cannot fail.
        let _ = write!(out, "{}", param.kind);
    }
    out.push(')');
    out
}

/// Keccak-256 of the canonical signature; topic0 for events, the error
/// selector source for errors.
pub fn signature_hash(name: &str, params: &[Param]) -> B256 {
    keccak256(signature(name, params).as_bytes())
}

/// The 4-byte function selector prefixing call data.
pub fn selector(name: &str, params: &[Param]) -> Selector {
    Selector::from_slice(&signature_hash(name, params)[..4])
}

/// Alias kept for call sites written against the short name.
pub fn short_signature(name: &str, params: &[Param]) -> Selector {
    selector(name, params)
}
