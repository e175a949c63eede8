//! Secondary index maintenance — the tag and entity lookup tables.
//!
//! A table maps a key (tag or entity ref) to the set of node ids currently
//! carrying it. Tables hold no authority of their own: the store retracts a
//! node's old entries and applies its new ones around every node write, and
//! retracts once on delete. A bucket whose last id is removed is pruned, so
//! tables never accumulate empty keys.
//!
//! Callers pass already-validated keys; no validation happens here.

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Lookup table: key → set of node ids.
pub type LookupTable = HashMap<String, BTreeSet<String>>;

/// Insert `id` under `key`, creating the bucket if needed.
pub fn add(table: &mut LookupTable, key: &str, id: &str) {
    table.entry(key.to_string()).or_default().insert(id.to_string());
}

/// Remove `id` from `key`'s bucket, pruning the bucket when it empties.
pub fn remove(table: &mut LookupTable, key: &str, id: &str) {
    if let Some(ids) = table.get_mut(key) {
        ids.remove(id);
        if ids.is_empty() {
            table.remove(key);
        }
    }
}

/// Deterministic projection: sorted keys, each with a sorted id array.
///
/// Suitable for serialization and for comparing index state independent of
/// internal iteration order.
pub fn snapshot(table: &LookupTable) -> BTreeMap<String, Vec<String>> {
    table
        .iter()
        .map(|(key, ids)| (key.clone(), ids.iter().cloned().collect()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let mut table = LookupTable::new();
        add(&mut table, "x", "n1");
        add(&mut table, "x", "n2");
        add(&mut table, "x", "n1"); // set semantics

        assert_eq!(table["x"].len(), 2);

        remove(&mut table, "x", "n1");
        assert_eq!(table["x"].len(), 1);
    }

    #[test]
    fn test_empty_bucket_is_pruned() {
        let mut table = LookupTable::new();
        add(&mut table, "x", "n1");
        remove(&mut table, "x", "n1");
        assert!(!table.contains_key("x"));
    }

    #[test]
    fn test_remove_unknown_key_is_noop() {
        let mut table = LookupTable::new();
        remove(&mut table, "missing", "n1");
        assert!(table.is_empty());
    }

    #[test]
    fn test_snapshot_is_sorted() {
        let mut table = LookupTable::new();
        add(&mut table, "b", "n2");
        add(&mut table, "b", "n1");
        add(&mut table, "a", "n3");

        let snap = snapshot(&table);
        let keys: Vec<&String> = snap.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(snap["b"], vec!["n1", "n2"]);
    }
}
