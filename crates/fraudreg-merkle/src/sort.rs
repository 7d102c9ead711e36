//! # Entry Sorting
//!
//! Orders a batch ascending by leaf hash before tree construction.
//!
//! The registry's batch functions take parallel arrays
//! (`primaryValues[]`, `chainIds[]`) and assume they arrive in leaf order.
//! Callers must submit the sorted arrays from [`BatchArrays`], never their
//! original input order.
//!
//! The sort is stable. With distinct leaves stability is irrelevant to the
//! result; it only matters for reporting duplicates at their first input
//! position.

use fraudreg_core::{Entry, LeafEncoding, B256};
use serde::{Deserialize, Serialize};

use crate::error::MerkleError;
use crate::leaf::leaf_hash;

/// An entry together with its leaf and its position in the caller's input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedEntry {
    /// The entry as supplied.
    pub entry: Entry,
    /// Its leaf hash.
    pub leaf: B256,
    /// Position in the original input.
    pub input_index: usize,
}

/// Compute every leaf and sort ascending by leaf.
pub fn sort_by_leaf(
    encoding: &LeafEncoding,
    entries: &[Entry],
) -> Result<Vec<SortedEntry>, MerkleError> {
    let mut hashed = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            leaf_hash(encoding, entry)
                .map(|leaf| SortedEntry {
                    entry: entry.clone(),
                    leaf,
                    input_index: index,
                })
                .map_err(|source| MerkleError::InvalidValue { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;
    hashed.sort_by(|a, b| a.leaf.cmp(&b.leaf));
    Ok(hashed)
}

/// Return the entries in ascending leaf order.
pub fn sort_entries(encoding: &LeafEncoding, entries: &[Entry]) -> Result<Vec<Entry>, MerkleError> {
    Ok(sort_by_leaf(encoding, entries)?
        .into_iter()
        .map(|s| s.entry)
        .collect())
}

/// Find the first repeated leaf in a sorted batch.
///
/// Returns `(leaf, first_input_index, second_input_index)`.
pub fn find_duplicate_leaf(sorted: &[SortedEntry]) -> Option<(B256, usize, usize)> {
    sorted.windows(2).find_map(|pair| {
        (pair[0].leaf == pair[1].leaf).then(|| {
            let (first, second) = if pair[0].input_index < pair[1].input_index {
                (pair[0].input_index, pair[1].input_index)
            } else {
                (pair[1].input_index, pair[0].input_index)
            };
            (pair[0].leaf, first, second)
        })
    })
}

/// Parallel arrays for a `registerBatch` call, in leaf order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchArrays {
    /// `primaryValues[]` argument.
    pub primary_values: Vec<String>,
    /// `chainIds[]` argument.
    pub chain_ids: Vec<String>,
}

impl BatchArrays {
    /// Split already-sorted entries into parallel arrays.
    pub fn from_sorted<'a>(sorted: impl IntoIterator<Item = &'a Entry>) -> Self {
        let (primary_values, chain_ids) = sorted
            .into_iter()
            .map(|e| (e.primary.clone(), e.chain_id.clone()))
            .unzip();
        Self {
            primary_values,
            chain_ids,
        }
    }

    /// Sort `entries` and split them into parallel arrays.
    pub fn from_entries(encoding: &LeafEncoding, entries: &[Entry]) -> Result<Self, MerkleError> {
        let sorted = sort_entries(encoding, entries)?;
        Ok(Self::from_sorted(&sorted))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.primary_values.len()
    }

    /// Whether the arrays are empty.
    pub fn is_empty(&self) -> bool {
        self.primary_values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fraudreg_core::EntryKind;

    fn tx(i: u8) -> Entry {
        Entry::new(format!("0x{}", format!("{i:02x}").repeat(32)), format!("0x{}", "aa".repeat(32)))
    }

    #[test]
    fn test_sorted_ascending_by_leaf() {
        let enc = EntryKind::Transaction.leaf_encoding();
        let entries: Vec<Entry> = (1..=9).map(tx).collect();
        let sorted = sort_by_leaf(&enc, &entries).unwrap();
        assert_eq!(sorted.len(), 9);
        for pair in sorted.windows(2) {
            assert!(pair[0].leaf < pair[1].leaf);
        }
    }

    #[test]
    fn test_sort_is_order_independent() {
        let enc = EntryKind::Transaction.leaf_encoding();
        let forward: Vec<Entry> = (1..=6).map(tx).collect();
        let mut backward = forward.clone();
        backward.reverse();
        assert_eq!(
            sort_entries(&enc, &forward).unwrap(),
            sort_entries(&enc, &backward).unwrap()
        );
    }

    #[test]
    fn test_input_index_tracks_origin() {
        let enc = EntryKind::Transaction.leaf_encoding();
        let entries: Vec<Entry> = (1..=5).map(tx).collect();
        for s in sort_by_leaf(&enc, &entries).unwrap() {
            assert_eq!(entries[s.input_index], s.entry);
        }
    }

    #[test]
    fn test_invalid_value_reports_position() {
        let enc = EntryKind::Transaction.leaf_encoding();
        let mut entries: Vec<Entry> = (1..=3).map(tx).collect();
        entries[2].primary = "0x1234".into();
        match sort_by_leaf(&enc, &entries) {
            Err(MerkleError::InvalidValue { index, .. }) => assert_eq!(index, 2),
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_find_duplicate_across_casing() {
        let enc = EntryKind::Wallet.leaf_encoding();
        let chain = format!("0x{}", "01".repeat(32));
        let entries = vec![
            Entry::new("0xaBcDeF0000000000000000000000000000000001", chain.clone()),
            Entry::new("0x2222222222222222222222222222222222222222", chain.clone()),
            Entry::new("0xabcdef0000000000000000000000000000000001", chain),
        ];
        let sorted = sort_by_leaf(&enc, &entries).unwrap();
        let (_, first, second) = find_duplicate_leaf(&sorted).unwrap();
        assert_eq!((first, second), (0, 2));
    }

    #[test]
    fn test_no_duplicate_in_distinct_batch() {
        let enc = EntryKind::Transaction.leaf_encoding();
        let entries: Vec<Entry> = (1..=4).map(tx).collect();
        assert!(find_duplicate_leaf(&sort_by_leaf(&enc, &entries).unwrap()).is_none());
    }

    #[test]
    fn test_batch_arrays_follow_sorted_order() {
        let enc = EntryKind::Transaction.leaf_encoding();
        let entries: Vec<Entry> = (1..=4).map(tx).collect();
        let sorted = sort_entries(&enc, &entries).unwrap();
        let arrays = BatchArrays::from_entries(&enc, &entries).unwrap();
        assert_eq!(arrays.len(), 4);
        for (i, e) in sorted.iter().enumerate() {
            assert_eq!(arrays.primary_values[i], e.primary);
            assert_eq!(arrays.chain_ids[i], e.chain_id);
        }
        let json = serde_json::to_value(&arrays).unwrap();
        assert!(json.get("primaryValues").is_some());
        assert!(json.get("chainIds").is_some());
    }
}
