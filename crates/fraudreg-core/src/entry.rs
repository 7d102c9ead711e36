//! # Registry Entries
//!
//! An [`Entry`] is the 2-tuple `(primary, chainId)` submitted in a batch.
//! The three entry kinds share this shape and differ only in the Solidity
//! type of `primary`:
//!
//! | Kind          | `primary` | `chainId` |
//! |---------------|-----------|-----------|
//! | `wallet`      | `address` | `bytes32` |
//! | `transaction` | `bytes32` | `bytes32` |
//! | `contract`    | `address` | `bytes32` |
//!
//! ## Identity Invariant
//!
//! Entries keep the exact strings the caller supplied. Two entries denote the
//! same registry value when their leaves are equal, which makes identity
//! independent of hex casing and of the `0x` prefix.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::abi::SolType;

/// Solidity types of an entry's two fields, in order.
pub type LeafEncoding = [SolType; 2];

/// The kind of registry entry in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A flagged externally-owned account.
    Wallet,
    /// A flagged transaction hash.
    Transaction,
    /// A flagged contract address.
    Contract,
}

impl EntryKind {
    /// Returns the entry kind name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wallet => "wallet",
            Self::Transaction => "transaction",
            Self::Contract => "contract",
        }
    }

    /// Leaf encoding used for batches of this kind.
    pub fn leaf_encoding(&self) -> LeafEncoding {
        match self {
            Self::Wallet | Self::Contract => [SolType::Address, SolType::Bytes32],
            Self::Transaction => [SolType::Bytes32, SolType::Bytes32],
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wallet" => Ok(Self::Wallet),
            "transaction" => Ok(Self::Transaction),
            "contract" => Ok(Self::Contract),
            other => Err(format!(
                "unknown entry kind {other:?}; expected wallet, transaction or contract"
            )),
        }
    }
}

/// One registry entry: a primary value and the chain it was observed on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    /// Address or transaction hash, as supplied.
    pub primary: String,
    /// 32-byte chain identifier hash, as supplied.
    #[serde(rename = "chainId")]
    pub chain_id: String,
}

impl Entry {
    /// Create an entry from its two textual values.
    pub fn new(primary: impl Into<String>, chain_id: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            chain_id: chain_id.into(),
        }
    }
}

impl From<[String; 2]> for Entry {
    fn from([primary, chain_id]: [String; 2]) -> Self {
        Self { primary, chain_id }
    }
}

impl From<Entry> for [String; 2] {
    fn from(entry: Entry) -> Self {
        [entry.primary, entry.chain_id]
    }
}
