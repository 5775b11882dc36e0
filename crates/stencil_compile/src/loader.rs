//! Activation of compiled units into live instances.

use std::sync::Arc;

use stencil_cache::CacheStore;
use stencil_common::UnitName;

use crate::compiler::{Compiler, UnitRef};
use crate::error::LoadError;
use crate::registry::UnitRegistry;
use crate::source::TemplateSource;
use crate::unit::{CompiledUnit, RenderContext, UnitInstance};

/// Activates compiled units, loading artifacts into the process registry
/// and recovering from cache inconsistencies.
///
/// Recovery is bounded: a missing, corrupt, or misnamed artifact is purged
/// and recompiled exactly once per activation; if the unit still cannot be
/// resolved, the activation fails.
pub struct Loader {
    compiler: Compiler,
    registry: UnitRegistry,
    store: Arc<dyn CacheStore>,
}

impl Loader {
    /// Creates a loader over the given cache store.
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self {
            compiler: Compiler::new(store.clone()),
            registry: UnitRegistry::new(),
            store,
        }
    }

    /// The loader's unit registry.
    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    /// The loader's compiler.
    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    /// Activates the unit for a template source, binding it to the given
    /// render context.
    ///
    /// Processes the source through the compiler, then resolves the unit
    /// name against the registry, loading the artifact on first use. If
    /// the artifact has gone missing or no longer carries a recoverable
    /// name, it is deleted and the template recompiled once; failure after
    /// that is fatal for this request.
    pub fn activate(
        &self,
        source: &TemplateSource,
        context: RenderContext,
    ) -> Result<UnitInstance, LoadError> {
        let unit_ref = self.compiler.process(source)?;

        if let Some(unit) = self.resolve(&unit_ref) {
            return Ok(UnitInstance::new(unit, context));
        }

        // The registry and artifact both failed to produce the recorded
        // unit. Try recovering whatever unit the artifact actually holds.
        if self.store.file_exists(&unit_ref.cache_path) {
            if let Ok(text) = self.store.read_artifact(&unit_ref.cache_path) {
                if UnitName::find_in(&text).is_some() {
                    if let Some(unit) = CompiledUnit::from_source(&text) {
                        let shared = self.registry.register(unit);
                        return Ok(UnitInstance::new(shared, context));
                    }
                }
            }
            // Unreadable or corrupt: purge the artifact. The record may
            // still claim freshness, so the recompile below must bypass it.
            let _ = self.store.delete_file(&unit_ref.cache_path);
        }

        let unit_ref = self.compiler.recompile(source)?;
        if let Some(unit) = self.resolve(&unit_ref) {
            return Ok(UnitInstance::new(unit, context));
        }

        Err(LoadError::Unresolvable {
            unit_name: unit_ref.unit_name.as_str().to_string(),
            source_path: source.source_path.clone(),
        })
    }

    /// Resolves a unit reference against the registry, loading the
    /// artifact into the registry on a miss. Returns `None` if the
    /// artifact cannot be read or does not contain the expected unit.
    fn resolve(&self, unit_ref: &UnitRef) -> Option<Arc<CompiledUnit>> {
        if let Some(unit) = self.registry.lookup(&unit_ref.unit_name) {
            return Some(unit);
        }

        let text = self.store.read_artifact(&unit_ref.cache_path).ok()?;
        let unit = CompiledUnit::from_source(&text)?;
        self.registry.register(unit);

        self.registry.lookup(&unit_ref.unit_name)
    }
}
