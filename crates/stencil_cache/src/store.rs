//! The cache store contract and its filesystem implementation.

use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use stencil_common::ContentHash;

use crate::error::CacheError;
use crate::record::{CacheIndex, UnitRecord};

/// File extension for compiled-unit artifacts.
const ARTIFACT_EXT: &str = "unit";

/// Storage contract between the compiler/loader and the on-disk cache.
///
/// Implementations are supplied by the embedding application and threaded
/// through every call; the compiler never holds global cache state. The
/// filesystem behind the store is the single source of truth: records are
/// re-read on every lookup, never cached in memory across calls.
pub trait CacheStore: Send + Sync {
    /// Maps a template source path to the cache path of its artifact.
    fn cache_key_for(&self, source_path: &str) -> PathBuf;

    /// Reads the record for a cache path. `None` means not found, including
    /// the fail-safe cases (missing or corrupt index).
    fn read_record(&self, cache_path: &Path) -> Option<UnitRecord>;

    /// Writes (or replaces) the record for a cache path.
    fn write_record(&self, cache_path: &Path, record: &UnitRecord) -> Result<(), CacheError>;

    /// Persists compiled-unit source text at the cache path.
    fn write_artifact(&self, cache_path: &Path, text: &str) -> Result<(), CacheError>;

    /// Reads compiled-unit source text from the cache path.
    fn read_artifact(&self, cache_path: &Path) -> Result<String, CacheError>;

    /// Returns `true` if a file exists at the path.
    fn file_exists(&self, path: &Path) -> bool;

    /// Returns the on-disk modification time of a file as a unix timestamp,
    /// or `None` if the file is missing.
    fn file_mtime(&self, path: &Path) -> Option<i64>;

    /// Deletes the file at the path.
    fn delete_file(&self, path: &Path) -> Result<(), CacheError>;
}

/// Filesystem-backed [`CacheStore`].
///
/// Artifacts live at `<cache_dir>/<hash-of-source-path>.unit`; records live
/// in the `index.json` of the same directory. Artifact and index writes are
/// write-to-temp-then-rename, so readers never observe partial files.
pub struct FileStore {
    /// Root directory for artifacts and the record index.
    cache_dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at the given cache directory.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Returns the cache directory this store is rooted at.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Index key for a cache path: its file name.
    fn index_key(cache_path: &Path) -> String {
        cache_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn atomic_write(&self, path: &Path, text: &str) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.cache_dir).map_err(|e| CacheError::Io {
            path: self.cache_dir.clone(),
            source: e,
        })?;
        let tmp = path.with_extension(format!("{ARTIFACT_EXT}.tmp"));
        std::fs::write(&tmp, text).map_err(|e| CacheError::Io {
            path: tmp.clone(),
            source: e,
        })?;
        std::fs::rename(&tmp, path).map_err(|e| CacheError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

impl CacheStore for FileStore {
    fn cache_key_for(&self, source_path: &str) -> PathBuf {
        let hash = ContentHash::of_str(source_path);
        self.cache_dir.join(format!("{}.{ARTIFACT_EXT}", hash.as_hex()))
    }

    fn read_record(&self, cache_path: &Path) -> Option<UnitRecord> {
        CacheIndex::load(&self.cache_dir)?
            .entries
            .get(&Self::index_key(cache_path))
            .cloned()
    }

    fn write_record(&self, cache_path: &Path, record: &UnitRecord) -> Result<(), CacheError> {
        let mut index = CacheIndex::load(&self.cache_dir).unwrap_or_default();
        index
            .entries
            .insert(Self::index_key(cache_path), record.clone());
        index.save(&self.cache_dir)
    }

    fn write_artifact(&self, cache_path: &Path, text: &str) -> Result<(), CacheError> {
        self.atomic_write(cache_path, text)
    }

    fn read_artifact(&self, cache_path: &Path) -> Result<String, CacheError> {
        std::fs::read_to_string(cache_path).map_err(|e| CacheError::Io {
            path: cache_path.to_path_buf(),
            source: e,
        })
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn file_mtime(&self, path: &Path) -> Option<i64> {
        let modified = std::fs::metadata(path).ok()?.modified().ok()?;
        let since_epoch = modified.duration_since(UNIX_EPOCH).ok()?;
        Some(since_epoch.as_secs() as i64)
    }

    fn delete_file(&self, path: &Path) -> Result<(), CacheError> {
        std::fs::remove_file(path).map_err(|e| CacheError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
