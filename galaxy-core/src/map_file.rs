//! Plain JSON map files.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::{validate_snapshot, Document, Region};

/// File extension recommended for saved maps.
pub const MAP_FILE_EXT: &str = "galaxy.json";

/// On-disk map: the systems plus region overlays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapFile {
    pub systems: Document,
    #[serde(default)]
    pub regions: Vec<Region>,
}

/// Save a map to disk as pretty JSON.
pub fn save_map(path: impl AsRef<Path>, map: &MapFile) -> anyhow::Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create parent dir: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(map).context("serialize map to json")?;
    fs::write(path, json).with_context(|| format!("write map file: {}", path.display()))?;
    tracing::info!(path = %path.display(), systems = map.systems.len(), "map saved");
    Ok(())
}

/// Load a map from disk, rejecting duplicate keys and broken positions.
pub fn load_map(path: impl AsRef<Path>) -> anyhow::Result<MapFile> {
    let path = path.as_ref();
    let data =
        fs::read_to_string(path).with_context(|| format!("read map file: {}", path.display()))?;
    let map: MapFile = serde_json::from_str(&data).context("parse map json")?;
    validate_snapshot(&map.systems)
        .with_context(|| format!("validate map file: {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        systems = map.systems.len(),
        regions = map.regions.len(),
        "map loaded"
    );
    Ok(map)
}
