//! The process-wide symbol table for loaded units.
//!
//! Compiled units are resolved by name through a registry lookup rather
//! than runtime symbol-table mutation; loading an artifact means parsing
//! its text and registering the result here.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use stencil_common::UnitName;

use crate::unit::CompiledUnit;

/// Registry of units loaded into the current process.
#[derive(Default)]
pub struct UnitRegistry {
    units: RwLock<HashMap<String, Arc<CompiledUnit>>>,
}

impl UnitRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a unit by name.
    pub fn lookup(&self, name: &UnitName) -> Option<Arc<CompiledUnit>> {
        let units = self.units.read().unwrap_or_else(|e| e.into_inner());
        units.get(name.as_str()).cloned()
    }

    /// Registers a unit under its own name, replacing any previous entry,
    /// and returns the shared handle.
    pub fn register(&self, unit: CompiledUnit) -> Arc<CompiledUnit> {
        let shared = Arc::new(unit);
        let mut units = self.units.write().unwrap_or_else(|e| e.into_inner());
        units.insert(shared.name.as_str().to_string(), shared.clone());
        shared
    }

    /// Number of registered units.
    pub fn len(&self) -> usize {
        let units = self.units.read().unwrap_or_else(|e| e.into_inner());
        units.len()
    }

    /// Returns `true` if no units are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
