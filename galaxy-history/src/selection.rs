use galaxy_core::{Document, LookupIndex, StarSystem, SystemKey};

/// The user's multi-select, in order of selection.
///
/// Stored as keys and resolved through the lookup index on use, so it stays
/// valid when the map is swapped for a snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    keys: Vec<SystemKey>,
}

impl Selection {
    pub fn keys(&self) -> &[SystemKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn primary(&self) -> Option<&SystemKey> {
        self.keys.first()
    }

    pub fn contains(&self, key: &SystemKey) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Replace the selection with `keys`, keeping only those the index knows.
    pub fn restore(&mut self, keys: &[SystemKey], lookup: &LookupIndex) {
        self.keys = lookup.retain_known(keys);
    }

    /// Add or remove `key`. Returns true when the key ends up selected.
    pub fn toggle(&mut self, key: SystemKey) -> bool {
        if let Some(pos) = self.keys.iter().position(|k| k == &key) {
            self.keys.remove(pos);
            false
        } else {
            self.keys.push(key);
            true
        }
    }

    /// Resolve to the selected systems in `doc`.
    pub fn systems<'a>(&self, doc: &'a Document, lookup: &LookupIndex) -> Vec<&'a StarSystem> {
        self.keys
            .iter()
            .filter_map(|k| lookup.resolve(doc, k))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_drops_missing_keys() {
        let doc = Document::from_systems(vec![StarSystem::new("sol", "Sol", 0.0, 0.0)]);
        let lookup = LookupIndex::rebuild(&doc);
        let mut selection = Selection::default();

        selection.restore(&[SystemKey::new("ghost"), SystemKey::new("sol")], &lookup);

        assert_eq!(selection.keys(), &[SystemKey::new("sol")]);
        assert_eq!(selection.systems(&doc, &lookup)[0].name, "Sol");
    }

    #[test]
    fn test_toggle() {
        let mut selection = Selection::default();
        assert!(selection.toggle("a".into()));
        assert!(selection.toggle("b".into()));
        assert!(!selection.toggle("a".into()));
        assert_eq!(selection.primary(), Some(&SystemKey::new("b")));
    }
}
