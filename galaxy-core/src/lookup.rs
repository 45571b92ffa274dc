//! Key -> system index derived from a document.

use std::collections::{HashMap, HashSet};
use tracing::{trace, warn};

use crate::{Document, StarSystem, SystemKey};

/// Maps each system key to its position in the document it was built from.
///
/// The index holds positions, not borrows, so it must be rebuilt whenever the
/// document it describes is replaced or reordered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupIndex {
    by_key: HashMap<SystemKey, usize>,
}

impl LookupIndex {
    /// Build a fresh index from `doc`. Later duplicates shadow earlier ones.
    pub fn rebuild(doc: &Document) -> Self {
        let mut by_key = HashMap::with_capacity(doc.len());
        for (index, system) in doc.iter().enumerate() {
            if by_key.insert(system.key.clone(), index).is_some() {
                warn!(key = %system.key, index, "duplicate system key while rebuilding lookup");
            }
        }
        trace!(entries = by_key.len(), "lookup index rebuilt");
        Self { by_key }
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_key.clear();
    }

    pub fn position(&self, key: &SystemKey) -> Option<usize> {
        self.by_key.get(key).copied()
    }

    pub fn contains(&self, key: &SystemKey) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &SystemKey> {
        self.by_key.keys()
    }

    pub fn resolve<'a>(&self, doc: &'a Document, key: &SystemKey) -> Option<&'a StarSystem> {
        self.position(key).and_then(|i| doc.get(i))
    }

    pub fn resolve_mut<'a>(
        &self,
        doc: &'a mut Document,
        key: &SystemKey,
    ) -> Option<&'a mut StarSystem> {
        self.position(key).and_then(move |i| doc.get_mut(i))
    }

    /// Keep the keys that resolve, in order, dropping unknowns and repeats.
    pub fn retain_known(&self, keys: &[SystemKey]) -> Vec<SystemKey> {
        let mut seen = HashSet::with_capacity(keys.len());
        keys.iter()
            .filter(|k| self.contains(k) && seen.insert(*k))
            .cloned()
            .collect()
    }

    /// True when every system in `doc` is reachable and no stale keys remain.
    pub fn is_consistent_with(&self, doc: &Document) -> bool {
        self.by_key.len() == doc.len()
            && doc
                .iter()
                .enumerate()
                .all(|(i, s)| self.position(&s.key) == Some(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document::from_systems(vec![
            StarSystem::new("sol", "Sol", 0.0, 0.0),
            StarSystem::new("vega", "Vega", 3.0, 4.0),
        ])
    }

    #[test]
    fn test_rebuild_maps_every_key() {
        let doc = doc();
        let index = LookupIndex::rebuild(&doc);

        assert_eq!(index.len(), 2);
        assert_eq!(index.resolve(&doc, &"vega".into()).unwrap().name, "Vega");
        assert!(index.is_consistent_with(&doc));
    }

    #[test]
    fn test_stale_index_is_detected() {
        let mut doc = doc();
        let index = LookupIndex::rebuild(&doc);
        doc.remove_keys(&[SystemKey::new("sol")]);

        assert!(!index.is_consistent_with(&doc));
        assert!(LookupIndex::rebuild(&doc).is_consistent_with(&doc));
    }

    #[test]
    fn test_retain_known_drops_unknown_and_repeats() {
        let index = LookupIndex::rebuild(&doc());
        let keys = vec![
            SystemKey::new("vega"),
            SystemKey::new("ghost"),
            SystemKey::new("vega"),
            SystemKey::new("sol"),
        ];

        assert_eq!(
            index.retain_known(&keys),
            vec![SystemKey::new("vega"), SystemKey::new("sol")]
        );
    }
}
