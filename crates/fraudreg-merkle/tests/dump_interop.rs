//! # Tree Dump Interoperability
//!
//! A stored tree must reproduce the same root and the same proofs in any
//! process that loads it, however many times it is re-dumped.

use fraudreg_core::{keccak256, Entry, EntryKind};
use fraudreg_merkle::{deserialize, serialize, BatchLimits, StandardMerkleTree, FORMAT_TAG};
use proptest::prelude::*;

fn build(kind: EntryKind, entries: &[Entry]) -> StandardMerkleTree {
    StandardMerkleTree::build_for(kind, entries, &BatchLimits::default()).unwrap()
}

fn assert_same_tree(a: &StandardMerkleTree, b: &StandardMerkleTree) {
    assert_eq!(a.root(), b.root());
    assert_eq!(a.leaf_count(), b.leaf_count());
    for iv in a.values() {
        assert_eq!(
            a.get_proof(&iv.entry).unwrap(),
            b.get_proof(&iv.entry).unwrap(),
            "proof mismatch for {:?}",
            iv.entry
        );
    }
}

#[test]
fn double_roundtrip_for_every_kind() {
    let chain = keccak256(b"eip155:10").to_string();
    for kind in [EntryKind::Wallet, EntryKind::Transaction, EntryKind::Contract] {
        let width = match kind {
            EntryKind::Transaction => 32,
            _ => 20,
        };
        let entries: Vec<Entry> = (1..=13u8)
            .map(|i| Entry::new(format!("0x{}", format!("{i:02X}").repeat(width)), chain.clone()))
            .collect();
        let original = build(kind, &entries);

        let once = deserialize(&serialize(&original).unwrap()).unwrap();
        let twice = deserialize(&serialize(&once).unwrap()).unwrap();

        assert_same_tree(&original, &once);
        assert_same_tree(&original, &twice);
        assert_eq!(serialize(&original).unwrap(), serialize(&twice).unwrap());
    }
}

#[test]
fn dump_preserves_caller_casing() {
    let entries = vec![
        Entry::new("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed", keccak256(b"eip155:1").to_string()),
        Entry::new("0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359", keccak256(b"eip155:1").to_string()),
    ];
    let tree = build(EntryKind::Wallet, &entries);
    let json = serialize(&tree).unwrap();
    assert!(json.contains("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
    assert!(json.starts_with(&format!(r#"{{"format":"{FORMAT_TAG}","tree":["#)));

    let loaded = deserialize(&json).unwrap();
    assert_eq!(loaded.values()[0].entry, entries[0]);
    assert_eq!(loaded.sorted_entries(), tree.sorted_entries());
}

#[test]
fn loaded_tree_answers_multiproofs() {
    let chain = keccak256(b"eip155:56").to_string();
    let entries: Vec<Entry> = (1..=9u8)
        .map(|i| Entry::new(format!("0x{}", format!("{i:02x}").repeat(20)), chain.clone()))
        .collect();
    let tree = build(EntryKind::Contract, &entries);
    let loaded = deserialize(&serialize(&tree).unwrap()).unwrap();

    let subset = [entries[1].clone(), entries[6].clone(), entries[8].clone()];
    let mp = loaded.get_multi_proof(&subset).unwrap();
    assert_eq!(mp, tree.get_multi_proof(&subset).unwrap());
    assert!(tree.verify_multi_proof(&mp).unwrap());
}

proptest! {
    /// Any transaction batch survives two dump/load cycles unchanged.
    #[test]
    fn roundtrip_preserves_proofs(
        hashes in proptest::collection::hash_set(proptest::array::uniform32(any::<u8>()), 1..32)
    ) {
        let chain = keccak256(b"eip155:1").to_string();
        let entries: Vec<Entry> = hashes
            .iter()
            .map(|h| Entry::new(format!("0x{}", hex::encode(h)), chain.clone()))
            .collect();
        let tree = build(EntryKind::Transaction, &entries);
        let twice = deserialize(&serialize(&deserialize(&serialize(&tree).unwrap()).unwrap()).unwrap()).unwrap();
        prop_assert_eq!(twice.root(), tree.root());
        for e in &entries {
            prop_assert_eq!(twice.get_proof(e).unwrap(), tree.get_proof(e).unwrap());
        }
    }
}
