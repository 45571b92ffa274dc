//! galaxy-core: the editable galaxy map model.
//!
//! Design rules:
//! - Systems are identified by `key`, never by position or structural equality.
//! - The lookup index is derived data: rebuilt from the document, never patched.
//! - Snapshots are independent deep copies; nothing in a snapshot aliases the live map.
//! - All structs are serializable so maps and snapshots can be written to disk.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod lookup;
pub mod map_file;
pub mod snapshot;

pub use lookup::LookupIndex;
pub use map_file::{load_map, save_map, MapFile, MAP_FILE_EXT};
pub use snapshot::{validate_snapshot, CloneSnapshotter, JsonSnapshotter, Snapshotter};

/// Primary identity of a star system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SystemKey(pub String);

impl SystemKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for SystemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SystemKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for SystemKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// A star system on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarSystem {
    pub key: SystemKey,
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub faction: Option<String>,
    #[serde(default)]
    pub star_type: Option<String>,
    /// Keys of systems this one has a lane to.
    #[serde(default)]
    pub links: Vec<SystemKey>,
}

impl StarSystem {
    pub fn new(key: impl Into<SystemKey>, name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            x,
            y,
            faction: None,
            star_type: None,
            links: Vec::new(),
        }
    }

    pub fn has_finite_position(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn is_linked_to(&self, other: &SystemKey) -> bool {
        self.links.iter().any(|k| k == other)
    }
}

/// The ordered collection of systems being edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    systems: Vec<StarSystem>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_systems(systems: Vec<StarSystem>) -> Self {
        Self { systems }
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn systems(&self) -> &[StarSystem] {
        &self.systems
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StarSystem> {
        self.systems.iter()
    }

    pub fn get(&self, index: usize) -> Option<&StarSystem> {
        self.systems.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut StarSystem> {
        self.systems.get_mut(index)
    }

    pub fn keys(&self) -> impl Iterator<Item = &SystemKey> {
        self.systems.iter().map(|s| &s.key)
    }

    pub fn contains_key(&self, key: &SystemKey) -> bool {
        self.systems.iter().any(|s| &s.key == key)
    }

    pub fn push(&mut self, system: StarSystem) {
        self.systems.push(system);
    }

    /// Remove every system whose key is in `keys`, along with lanes pointing at them.
    /// Returns the number of systems removed.
    pub fn remove_keys(&mut self, keys: &[SystemKey]) -> usize {
        let before = self.systems.len();
        self.systems.retain(|s| !keys.contains(&s.key));
        for system in self.systems.iter_mut() {
            system.links.retain(|k| !keys.contains(k));
        }
        before - self.systems.len()
    }

    pub fn clear(&mut self) {
        self.systems.clear();
    }

    /// Swap in the contents of `other` while keeping this container (and its allocation).
    pub fn replace_contents(&mut self, other: Document) {
        self.systems.clear();
        self.systems.extend(other.systems);
    }

    pub fn into_systems(self) -> Vec<StarSystem> {
        self.systems
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a StarSystem;
    type IntoIter = std::slice::Iter<'a, StarSystem>;

    fn into_iter(self) -> Self::IntoIter {
        self.systems.iter()
    }
}

/// A named group of systems drawn as a territory overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    /// RGB, 0.0-1.0
    pub color: [f32; 3],
    pub systems: Vec<SystemKey>,
}

/// Errors related to the map model and snapshot capture.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("snapshot copy failed: {0}")]
    CopyFailed(String),

    #[error("duplicate system key: {key}")]
    DuplicateKey { key: SystemKey },

    #[error("system at index {index} has an empty key")]
    EmptyKey { index: usize },

    #[error("system {key} has a non-finite position")]
    NonFiniteCoordinate { key: SystemKey },

    #[error("unknown system: {key}")]
    UnknownSystem { key: SystemKey },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut a = StarSystem::new("sol", "Sol", 0.0, 0.0);
        a.links.push("alpha".into());
        let mut b = StarSystem::new("alpha", "Alpha Centauri", 4.3, 1.0);
        b.links.push("sol".into());
        Document::from_systems(vec![a, b, StarSystem::new("vega", "Vega", -10.0, 2.5)])
    }

    #[test]
    fn test_remove_keys_drops_dangling_links() {
        let mut doc = sample();
        let removed = doc.remove_keys(&[SystemKey::new("alpha")]);

        assert_eq!(removed, 1);
        assert_eq!(doc.len(), 2);
        assert!(!doc.contains_key(&"alpha".into()));
        assert!(doc.get(0).unwrap().links.is_empty());
    }

    #[test]
    fn test_replace_contents_keeps_order() {
        let mut doc = sample();
        let other = Document::from_systems(vec![
            StarSystem::new("b", "B", 1.0, 1.0),
            StarSystem::new("a", "A", 0.0, 0.0),
        ]);
        doc.replace_contents(other);

        let keys: Vec<_> = doc.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_document_serializes_as_plain_array() {
        let doc = Document::from_systems(vec![StarSystem::new("sol", "Sol", 0.0, 0.0)]);
        let json = serde_json::to_value(&doc).unwrap();

        assert!(json.is_array());
        assert_eq!(json[0]["key"], "sol");
    }

    #[test]
    fn test_blank_key_is_empty() {
        assert!(SystemKey::new("   ").is_empty());
        assert!(!SystemKey::new("sol").is_empty());
    }
}
