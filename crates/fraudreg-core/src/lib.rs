//! # fraudreg-core — Foundational Types for the Fraud Registry
//!
//! This crate is the leaf of the workspace DAG. It defines the value types
//! that every registry batch is made of and the exact byte encodings the
//! on-chain registry expects.
//!
//! ## Key Design Principles
//!
//! 1. **EVM primitives from alloy.** [`B256`], [`Address`] and
//!    [`keccak256()`] are `alloy_primitives`; the pair encoding is
//!    `alloy_sol_types`, so leaves hash exactly what Solidity's `abi.encode`
//!    produces.
//!
//! 2. **Keccak-256 only.** [`keccak256()`] is the single hashing primitive.
//!    It matches the EVM `keccak256` opcode, not NIST SHA3-256.
//!
//! 3. **Textual values are preserved.** [`Entry`] stores the caller's hex
//!    strings untouched (checksummed casing included). Identity comparisons go
//!    through decoded values, so casing never changes equality.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `fraudreg-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod abi;
pub mod entry;
pub mod error;

// Re-export primary types for ergonomic imports.
pub use abi::{abi_encode, LeafValue, SolType};
pub use alloy_primitives::{keccak256, Address, B256};
pub use entry::{Entry, EntryKind, LeafEncoding};
pub use error::ValueError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty_known_vector() {
        assert_eq!(
            keccak256(b"").to_string(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak256_abc_known_vector() {
        // Distinguishes Keccak from NIST SHA3-256 (which gives 3a985da7...).
        assert_eq!(
            keccak256(b"abc").to_string(),
            "0x4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45"
        );
    }

    #[test]
    fn test_word_ordering_is_big_endian_numeric() {
        let mut small = [0u8; 32];
        small[31] = 0xff;
        let mut large = [0u8; 32];
        large[0] = 0x01;
        assert!(B256::new(small) < B256::new(large));
    }

    #[test]
    fn test_word_serde_as_prefixed_hex() {
        let word = B256::new([0xAB; 32]);
        let json = serde_json::to_string(&word).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "ab".repeat(32)));
        let back: B256 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, word);
        assert!(serde_json::from_str::<B256>("\"0x1234\"").is_err());
    }
}
