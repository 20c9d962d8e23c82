//! Per-kind pair of indexes and the rebuild policy.

use crate::index::{AvlIndex, BstIndex, NameKey};

/// A record that can be indexed by id and by display name.
///
/// Implemented by each entity kind ([`Item`](crate::entity::Item),
/// [`Customer`](crate::entity::Customer)); the index pair is instantiated
/// once per kind rather than branching on a runtime payload type.
pub trait IndexedRecord {
    /// The unique, orderable record key (the entity id).
    type Key: Copy + Ord;

    /// Returns the record's unique key.
    fn record_key(&self) -> Self::Key;

    /// Returns the record's display name.
    fn record_name(&self) -> &str;
}

/// A consistent pair of indexes over one entity kind.
///
/// Owns a balanced index keyed by the unique id and an unbalanced index
/// keyed by the case-insensitive name. Both indexes hold the record's key,
/// not the record itself; the authoritative entity is re-fetched from the
/// record store after a successful search, so a rebuild can never leave a
/// dangling reference behind.
///
/// The set is maintained by whole-set rebuild: any mutation that may change
/// keys or membership discards both trees and rebuilds them from a fresh
/// store snapshot. Entity counts are small, rebuild cost is O(n log n), and
/// tree deletion never has to exist.
pub struct EntityIndexSet<R: IndexedRecord> {
    by_id: AvlIndex<R::Key, R::Key>,
    by_name: BstIndex<NameKey, R::Key>,
}

impl<R: IndexedRecord> Default for EntityIndexSet<R> {
    fn default() -> Self {
        Self {
            by_id: AvlIndex::default(),
            by_name: BstIndex::default(),
        }
    }
}

impl<R: IndexedRecord> EntityIndexSet<R> {
    /// Creates an empty index set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index set from a store snapshot.
    ///
    /// Records are inserted in snapshot iteration order (the store's natural
    /// order). Ids are unique upstream, so every by-id insert lands; name
    /// collisions coexist per the by-name tie rule.
    pub fn build(snapshot: &[R]) -> Self {
        let mut set = Self::new();
        for record in snapshot {
            set.insert(record);
        }
        tracing::debug!(
            records = snapshot.len(),
            id_height = set.by_id.height(),
            "index set built"
        );
        set
    }

    /// Discards both trees and rebuilds them from `snapshot`.
    pub fn rebuild(&mut self, snapshot: &[R]) {
        *self = Self::build(snapshot);
    }

    fn insert(&mut self, record: &R) {
        let key = record.record_key();
        self.by_id.insert(key, key);
        self.by_name.insert(NameKey::new(record.record_name()), key);
    }

    /// Looks up a record key by id.
    pub fn lookup_id(&self, id: R::Key) -> Option<R::Key> {
        self.by_id.get(&id).copied()
    }

    /// Looks up a record key by case-insensitive name.
    ///
    /// On duplicate names, returns the first-inserted record for that name.
    pub fn lookup_name(&self, name: &str) -> Option<R::Key> {
        self.by_name.get(&NameKey::new(name)).copied()
    }

    /// Returns the number of indexed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns true if no records are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Height of the balanced by-id tree, for diagnostics.
    #[must_use]
    pub fn id_tree_height(&self) -> u32 {
        self.by_id.height()
    }
}

impl<R: IndexedRecord> std::fmt::Debug for EntityIndexSet<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityIndexSet")
            .field("len", &self.len())
            .field("id_tree_height", &self.id_tree_height())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rec {
        id: u32,
        name: &'static str,
    }

    impl IndexedRecord for Rec {
        type Key = u32;

        fn record_key(&self) -> u32 {
            self.id
        }

        fn record_name(&self) -> &str {
            self.name
        }
    }

    fn rec(id: u32, name: &'static str) -> Rec {
        Rec { id, name }
    }

    #[test]
    fn build_and_lookup() {
        let snapshot = vec![rec(30, "Zinc"), rec(10, "Amox"), rec(20, "Ibuprofen")];
        let set = EntityIndexSet::build(&snapshot);

        assert_eq!(set.len(), 3);
        assert_eq!(set.lookup_id(10), Some(10));
        assert_eq!(set.lookup_id(20), Some(20));
        assert_eq!(set.lookup_id(99), None);
        assert_eq!(set.lookup_name("amox"), Some(10));
        assert_eq!(set.lookup_name("ZINC"), Some(30));
        assert_eq!(set.lookup_name("Aspirin"), None);
    }

    #[test]
    fn name_collision_returns_first_inserted() {
        let snapshot = vec![rec(1, "Zinc"), rec(2, "Amox"), rec(3, "amox")];
        let set = EntityIndexSet::build(&snapshot);

        assert_eq!(set.lookup_name("AMOX"), Some(2));
        // Both collided records are still in the by-id tree.
        assert_eq!(set.lookup_id(3), Some(3));
    }

    #[test]
    fn rebuild_replaces_membership() {
        let mut set = EntityIndexSet::build(&[rec(1, "Old"), rec(2, "Stale")]);
        set.rebuild(&[rec(3, "Fresh")]);

        assert_eq!(set.len(), 1);
        assert_eq!(set.lookup_id(1), None);
        assert_eq!(set.lookup_name("stale"), None);
        assert_eq!(set.lookup_id(3), Some(3));
        assert_eq!(set.lookup_name("FRESH"), Some(3));
    }

    #[test]
    fn rebuild_from_empty_snapshot() {
        let mut set = EntityIndexSet::build(&[rec(1, "Only")]);
        set.rebuild(&[]);
        assert!(set.is_empty());
        assert_eq!(set.lookup_id(1), None);
    }

    #[test]
    fn rebuild_consistency_matches_snapshot() {
        let snapshot: Vec<Rec> = (0..50).map(|i| rec(i * 3, "n")).collect();
        let set = EntityIndexSet::build(&snapshot);

        for record in &snapshot {
            assert_eq!(set.lookup_id(record.id), Some(record.id));
        }
        for missing in [1u32, 2, 4, 151] {
            assert_eq!(set.lookup_id(missing), None);
        }
    }
}
