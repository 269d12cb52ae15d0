use std::fs;
use std::path::Path;

use quotebook::kv::write_atomic;

use super::*;

/// Loads the collection file; a missing file is an empty collection.
pub(super) fn load(path: &Path) -> Result<Vec<Entry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let quotes = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse {}", path.display()))?;
    Ok(quotes)
}

pub(super) fn save(path: &Path, quotes: &[Entry]) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(quotes).context("serialize collection")?;
    write_atomic(path, &bytes).with_context(|| format!("write {}", path.display()))
}
