//! The unit compiler: staleness detection, recovery, and recompilation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use stencil_cache::{CacheStore, UnitRecord};
use stencil_common::{ContentHash, UnitName};

use crate::error::CompileError;
use crate::source::TemplateSource;

/// Reference to a processed compiled unit: where its artifact lives and
/// what it is called.
#[derive(Debug, Clone)]
pub struct UnitRef {
    /// Cache path of the artifact.
    pub cache_path: PathBuf,

    /// Name of the compiled unit.
    pub unit_name: UnitName,
}

/// Compiles template sources into cached units, reusing prior work
/// whenever the source modification time still matches the cache record.
///
/// Compilation is serialized per cache path: concurrent `process` calls
/// for the same template queue behind an in-process lock, so at most one
/// of them recompiles and the rest observe its fresh record. The store
/// itself is the single source of truth; no record is cached in memory
/// across calls.
pub struct Compiler {
    store: Arc<dyn CacheStore>,
    locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl Compiler {
    /// Creates a compiler over the given cache store.
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Processes a template source, returning its compiled-unit reference.
    ///
    /// Three outcomes, checked in order while holding the per-path lock:
    ///
    /// 1. A record whose stored modification time equals the source's:
    ///    the unit is fresh, return its name with no further I/O.
    /// 2. No record, but the artifact file on disk is at least as new as
    ///    the source: another writer compiled it without updating this
    ///    index. Recover the name from the artifact text, bind it with a
    ///    fresh record, and return it without recompiling.
    /// 3. Otherwise recompile: parse, transform, assemble, validate, then
    ///    persist artifact and record.
    pub fn process(&self, source: &TemplateSource) -> Result<UnitRef, CompileError> {
        let cache_path = self.store.cache_key_for(&source.source_path);
        let lock = self.lock_for(&cache_path);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        match self.store.read_record(&cache_path) {
            Some(record) if record.source_mtime == source.mtime => {
                // A record with a name that violates the convention cannot
                // be trusted; fall through to a clean recompile.
                if let Some(unit_name) = UnitName::parse(&record.unit_name) {
                    return Ok(UnitRef {
                        cache_path,
                        unit_name,
                    });
                }
            }
            Some(_) => {}
            None => {
                if let Some(unit_name) = self.recover_foreign_fresh(&cache_path, source)? {
                    return Ok(UnitRef {
                        cache_path,
                        unit_name,
                    });
                }
            }
        }

        let unit_name = self.compile_locked(source, &cache_path)?;
        Ok(UnitRef {
            cache_path,
            unit_name,
        })
    }

    /// Forces a clean recompilation, bypassing the staleness check.
    ///
    /// Used by the loader after purging a corrupt artifact (whose record
    /// may still claim freshness) and by callers that want to rebuild
    /// regardless of cache state.
    pub fn recompile(&self, source: &TemplateSource) -> Result<UnitRef, CompileError> {
        let cache_path = self.store.cache_key_for(&source.source_path);
        let lock = self.lock_for(&cache_path);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let unit_name = self.compile_locked(source, &cache_path)?;
        Ok(UnitRef {
            cache_path,
            unit_name,
        })
    }

    /// Checks for an artifact written by a build not reflected in the
    /// index (a prior process, or a concurrent writer that lost the index
    /// race). If the artifact is at least as new as the source and its
    /// text yields a unit name, binds that name with a fresh record.
    fn recover_foreign_fresh(
        &self,
        cache_path: &Path,
        source: &TemplateSource,
    ) -> Result<Option<UnitName>, CompileError> {
        if !self.store.file_exists(cache_path) {
            return Ok(None);
        }
        let fresh_on_disk = self
            .store
            .file_mtime(cache_path)
            .is_some_and(|disk_mtime| disk_mtime >= source.mtime);
        if !fresh_on_disk {
            return Ok(None);
        }
        let Ok(text) = self.store.read_artifact(cache_path) else {
            // Unreadable artifact is a soft miss; recompilation replaces it.
            return Ok(None);
        };
        let Some(unit_name) = UnitName::find_in(&text) else {
            return Ok(None);
        };
        self.store.write_record(
            cache_path,
            &UnitRecord {
                unit_name: unit_name.as_str().to_string(),
                source_mtime: source.mtime,
            },
        )?;
        Ok(Some(unit_name))
    }

    fn compile_locked(
        &self,
        source: &TemplateSource,
        cache_path: &Path,
    ) -> Result<UnitName, CompileError> {
        let document =
            stencil_parser::parse(&source.raw_content).map_err(|e| CompileError::Format {
                source_path: source.source_path.clone(),
                source: e,
            })?;

        let code = document.code.as_deref().unwrap_or("");
        let transformed = stencil_codegen::transform(code);

        let unit_name = UnitName::generate(&ContentHash::of_str(&source.raw_content));
        let text = stencil_codegen::assemble(
            &source.source_path,
            &unit_name,
            source.parent_unit.as_deref(),
            &transformed,
        );

        stencil_codegen::validate(&text).map_err(|e| CompileError::Compilation {
            source_path: source.source_path.clone(),
            source: e,
        })?;

        // Artifact first: a record must never point at a missing file.
        self.store.write_artifact(cache_path, &text)?;
        self.store.write_record(
            cache_path,
            &UnitRecord {
                unit_name: unit_name.as_str().to_string(),
                source_mtime: source.mtime,
            },
        )?;

        Ok(unit_name)
    }

    fn lock_for(&self, cache_path: &Path) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.entry(cache_path.to_path_buf()).or_default().clone()
    }
}
