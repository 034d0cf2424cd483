use alloy_primitives::{Address, B256};
use bytes::BufMut;
use ethwire_rlp::{Decodable, Encodable, Header};

/// One account the transaction plans to touch, with the storage keys it will
/// read. Addresses and keys are fixed-size values, so malformed entries are
/// unrepresentable here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct AccessListItem {
    /// Account address that would be loaded at the start of execution.
    pub address: Address,
    /// Keys of storage that would be loaded at the start of execution.
    pub storage_keys: Vec<B256>,
}

impl Encodable for AccessListItem {
    fn encode(&self, out: &mut dyn BufMut) {
        let payload_length = self.address.length() + self.storage_keys.length();
        Header { list: true, payload_length }.encode(out);
        self.address.encode(out);
        self.storage_keys.encode(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.address.length() + self.storage_keys.length();
        Header { list: true, payload_length }.length_with_payload()
    }
}

impl Decodable for AccessListItem {
    fn decode(buf: &mut &[u8]) -> ethwire_rlp::Result<Self> {
        let mut payload = Header::decode_bytes(buf, true)?;
        let item = Self {
            address: Decodable::decode(&mut payload)?,
            storage_keys: Decodable::decode(&mut payload)?,
        };
        if !payload.is_empty() {
            return Err(ethwire_rlp::Error::UnexpectedLength);
        }
        Ok(item)
    }
}

/// AccessList as defined in EIP-2930.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, derive_more::Deref, derive_more::From)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessList(pub Vec<AccessListItem>);

impl Encodable for AccessList {
    #[inline]
    fn encode(&self, out: &mut dyn BufMut) {
        self.0.encode(out)
    }

    #[inline]
    fn length(&self) -> usize {
        self.0.length()
    }
}

impl Decodable for AccessList {
    #[inline]
    fn decode(buf: &mut &[u8]) -> ethwire_rlp::Result<Self> {
        Vec::decode(buf).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256, hex};

    #[test]
    fn empty_access_list_is_an_empty_rlp_list() {
        let list = AccessList::default();
        let mut out = Vec::new();
        list.encode(&mut out);
        assert_eq!(out, hex!("c0"));
    }

    #[test]
    fn access_list_roundtrip() {
        let list = AccessList(vec![
            AccessListItem {
                address: address!("de0b295669a9fd93d5f28d9ec85e40f4cb697bae"),
                storage_keys: vec![
                    b256!("0000000000000000000000000000000000000000000000000000000000000003"),
                    b256!("0000000000000000000000000000000000000000000000000000000000000007"),
                ],
            },
            AccessListItem {
                address: address!("bb9bc244d798123fde783fcc1c72d3bb8c189413"),
                storage_keys: vec![],
            },
        ]);

        let mut out = Vec::new();
        list.encode(&mut out);
        assert_eq!(out.len(), list.length());

        let mut buf = &out[..];
        assert_eq!(AccessList::decode(&mut buf).unwrap(), list);
        assert!(buf.is_empty());
    }

    #[test]
    fn item_with_trailing_garbage_is_rejected() {
        let item = AccessListItem {
            address: address!("de0b295669a9fd93d5f28d9ec85e40f4cb697bae"),
            storage_keys: vec![],
        };
        let mut out = Vec::new();
        // Re-wrap the item with an extra byte smuggled into its payload.
        let mut body = Vec::new();
        item.address.encode(&mut body);
        item.storage_keys.encode(&mut body);
        body.push(0x01);
        Header { list: true, payload_length: body.len() }.encode(&mut out);
        out.extend_from_slice(&body);

        assert_eq!(
            AccessListItem::decode(&mut &out[..]),
            Err(ethwire_rlp::Error::UnexpectedLength)
        );
    }
}
