//! # Solidity ABI Encoding of Leaf Values
//!
//! [`SolType`] is the tag a tree dump records for each leaf field. Decoding a
//! hex string under its tag yields a typed [`LeafValue`], and the pair is
//! encoded with `alloy_sol_types`, the same bytes `abi.encode(...)` produces
//! on-chain:
//!
//! - `address`: 20 bytes, left-padded with 12 zero bytes.
//! - `bytes32`: 32 bytes, unchanged.
//!
//! Hex input takes an optional `0x` prefix and any casing. Surrounding
//! whitespace is rejected, so a stored value always reloads verbatim.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::hex::FromHexError;
use alloy_primitives::{Address, B256};
use alloy_sol_types::{sol_data, SolType as AbiType};
use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// A supported Solidity value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolType {
    /// 20-byte account or contract address.
    Address,
    /// 32-byte opaque word (transaction hash, chain identifier hash).
    Bytes32,
}

/// A hex value decoded under its [`SolType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafValue {
    Address(Address),
    Bytes32(B256),
}

impl SolType {
    /// Returns the Solidity type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Bytes32 => "bytes32",
        }
    }

    /// Decode one hex value under this type.
    pub fn decode(&self, value: &str) -> Result<LeafValue, ValueError> {
        match self {
            Self::Address => parse_hex::<Address>(value, 40).map(LeafValue::Address),
            Self::Bytes32 => parse_hex::<B256>(value, 64).map(LeafValue::Bytes32),
        }
    }
}

impl fmt::Display for SolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolType {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "address" => Ok(Self::Address),
            "bytes32" => Ok(Self::Bytes32),
            other => Err(ValueError::UnknownType(other.to_string())),
        }
    }
}

fn parse_hex<T>(value: &str, digits: usize) -> Result<T, ValueError>
where
    T: FromStr<Err = FromHexError>,
{
    value.parse::<T>().map_err(|e| match e {
        FromHexError::OddLength | FromHexError::InvalidStringLength => ValueError::InvalidLength {
            value: value.to_string(),
            expected: digits,
            actual: value.strip_prefix("0x").unwrap_or(value).len(),
        },
        other => ValueError::InvalidHex {
            value: value.to_string(),
            reason: other.to_string(),
        },
    })
}

/// `abi.encode(values[0], values[1])` under the two type tags.
pub fn abi_encode(types: &[SolType; 2], values: [&str; 2]) -> Result<Vec<u8>, ValueError> {
    let first = types[0].decode(values[0])?;
    let second = types[1].decode(values[1])?;
    Ok(match (first, second) {
        (LeafValue::Address(a), LeafValue::Bytes32(b)) => {
            <(sol_data::Address, sol_data::FixedBytes<32>) as AbiType>::abi_encode(&(a, b))
        }
        (LeafValue::Bytes32(a), LeafValue::Bytes32(b)) => {
            <(sol_data::FixedBytes<32>, sol_data::FixedBytes<32>) as AbiType>::abi_encode(&(a, b))
        }
        (LeafValue::Address(a), LeafValue::Address(b)) => {
            <(sol_data::Address, sol_data::Address) as AbiType>::abi_encode(&(a, b))
        }
        (LeafValue::Bytes32(a), LeafValue::Address(b)) => {
            <(sol_data::FixedBytes<32>, sol_data::Address) as AbiType>::abi_encode(&(a, b))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0x1111111111111111111111111111111111111111";

    #[test]
    fn test_address_and_bytes32_encoding() {
        let chain = format!("0x{}", "22".repeat(32));
        let encoded = abi_encode(&[SolType::Address, SolType::Bytes32], [ADDR, &chain]).unwrap();
        assert_eq!(encoded.len(), 64);
        assert_eq!(&encoded[..12], &[0u8; 12]);
        assert_eq!(&encoded[12..32], &[0x11; 20]);
        assert_eq!(&encoded[32..], &[0x22; 32]);
    }

    #[test]
    fn test_bytes32_pair_is_concatenation() {
        let a = format!("0x{}", "0a".repeat(32));
        let b = "0b".repeat(32);
        let encoded = abi_encode(&[SolType::Bytes32, SolType::Bytes32], [&a, &b]).unwrap();
        assert_eq!(&encoded[..32], &[0x0a; 32]);
        assert_eq!(&encoded[32..], &[0x0b; 32]);
    }

    #[test]
    fn test_checksummed_and_lowercase_decode_equal() {
        let checksummed = SolType::Address
            .decode("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")
            .unwrap();
        let lower = SolType::Address
            .decode("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed")
            .unwrap();
        assert_eq!(checksummed, lower);
    }

    #[test]
    fn test_address_type_rejects_bytes32_value() {
        let hash = format!("0x{}", "00".repeat(32));
        let err = SolType::Address.decode(&hash).unwrap_err();
        assert!(matches!(
            err,
            ValueError::InvalidLength {
                expected: 40,
                actual: 64,
                ..
            }
        ));
    }

    #[test]
    fn test_non_hex_rejected() {
        let err = SolType::Bytes32
            .decode(&format!("0x{}", "zz".repeat(32)))
            .unwrap_err();
        assert!(matches!(err, ValueError::InvalidHex { .. }));
    }

    #[test]
    fn test_surrounding_whitespace_rejected() {
        let hash = format!("0x{}", "ab".repeat(32));
        assert!(SolType::Bytes32.decode(&hash).is_ok());
        assert!(SolType::Bytes32.decode(&format!(" {hash}")).is_err());
        assert!(SolType::Bytes32.decode(&format!("{hash}\n")).is_err());
        assert!(SolType::Address.decode(&format!(" {ADDR} ")).is_err());
    }

    #[test]
    fn test_type_tag_parse_and_serde() {
        assert_eq!("address".parse::<SolType>().unwrap(), SolType::Address);
        assert_eq!("bytes32".parse::<SolType>().unwrap(), SolType::Bytes32);
        assert!(matches!(
            "uint256".parse::<SolType>(),
            Err(ValueError::UnknownType(_))
        ));
        assert_eq!(
            serde_json::to_string(&[SolType::Address, SolType::Bytes32]).unwrap(),
            r#"["address","bytes32"]"#
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Re-casing any hex digit of an address never changes its encoding.
        #[test]
        fn casing_never_changes_encoding(
            bytes in proptest::array::uniform20(any::<u8>()),
            mask in proptest::collection::vec(any::<bool>(), 40),
        ) {
            let types = [SolType::Address, SolType::Bytes32];
            let lower = hex::encode(bytes);
            let mixed: String = lower
                .chars()
                .zip(mask)
                .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
                .collect();
            let chain = format!("0x{}", "ab".repeat(32));
            let a = abi_encode(&types, [&format!("0x{lower}"), &chain]).unwrap();
            let b = abi_encode(&types, [&format!("0x{mixed}"), &chain]).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
