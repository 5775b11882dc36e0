//! The compiled-unit record index.
//!
//! The index is stored as `index.json` in the cache directory and maps each
//! cache file name to the unit name and source modification time recorded
//! when that artifact was written. The modification time is the sole
//! staleness anchor: a record is valid for a template source iff the two
//! modification times are equal.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// Name of the index file within the cache directory.
const INDEX_FILE: &str = "index.json";

/// The metadata recorded for one compiled-unit artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRecord {
    /// Name of the compiled unit stored in the artifact.
    pub unit_name: String,

    /// Modification time of the template source the artifact was compiled
    /// from, as a unix timestamp.
    pub source_mtime: i64,
}

/// The on-disk record index, keyed by cache file name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheIndex {
    /// Records for every known artifact.
    pub entries: HashMap<String, UnitRecord>,
}

impl CacheIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the index from the cache directory.
    ///
    /// Fail-safe: a missing or unparsable index reads as `None`, which
    /// callers treat as an empty cache.
    pub fn load(cache_dir: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(cache_dir.join(INDEX_FILE)).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Saves the index into the cache directory, creating it if needed.
    ///
    /// The write goes to a temporary file first and is renamed into place,
    /// so concurrent readers never observe a partially written index.
    pub fn save(&self, cache_dir: &Path) -> Result<(), CacheError> {
        std::fs::create_dir_all(cache_dir).map_err(|e| CacheError::Io {
            path: cache_dir.to_path_buf(),
            source: e,
        })?;
        let json = serde_json::to_string_pretty(self).map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;
        let path = cache_dir.join(INDEX_FILE);
        let tmp = cache_dir.join(format!("{INDEX_FILE}.tmp"));
        std::fs::write(&tmp, json).map_err(|e| CacheError::Io {
            path: tmp.clone(),
            source: e,
        })?;
        std::fs::rename(&tmp, &path).map_err(|e| CacheError::Io { path, source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut index = CacheIndex::new();
        index.entries.insert(
            "ab12.unit".to_string(),
            UnitRecord {
                unit_name: "Stencil0z1_ffUnit".to_string(),
                source_mtime: 100,
            },
        );
        index.save(dir.path()).unwrap();

        let loaded = CacheIndex::load(dir.path()).unwrap();
        let rec = &loaded.entries["ab12.unit"];
        assert_eq!(rec.unit_name, "Stencil0z1_ffUnit");
        assert_eq!(rec.source_mtime, 100);
    }

    #[test]
    fn load_missing_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CacheIndex::load(dir.path()).is_none());
    }

    #[test]
    fn load_corrupt_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.json"), "{{{ not json").unwrap();
        assert!(CacheIndex::load(dir.path()).is_none());
    }

    #[test]
    fn save_creates_cache_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep").join("cache");
        CacheIndex::new().save(&nested).unwrap();
        assert!(nested.join("index.json").exists());
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        CacheIndex::new().save(dir.path()).unwrap();
        assert!(!dir.path().join("index.json.tmp").exists());
    }

    #[test]
    fn record_serde_roundtrip() {
        let rec = UnitRecord {
            unit_name: "Stencil1zaa_00ffUnit".to_string(),
            source_mtime: 42,
        };
        let json = serde_json::to_string(&rec).unwrap();
        let back: UnitRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rec);
    }
}
