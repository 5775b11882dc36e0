//! Incremental compilation and activation of template units.
//!
//! [`Compiler::process`] drives the cache state machine: reuse a fresh
//! record, recover an identifier from a foreign-fresh artifact, or
//! recompile. [`Loader::activate`] turns a processed template into a live
//! unit instance via the in-process [`UnitRegistry`], recovering from
//! missing or corrupt artifacts with one forced recompilation.

#![warn(missing_docs)]

pub mod compiler;
pub mod error;
pub mod loader;
pub mod registry;
pub mod source;
pub mod unit;

pub use compiler::{Compiler, UnitRef};
pub use error::{CompileError, LoadError};
pub use loader::Loader;
pub use registry::UnitRegistry;
pub use source::TemplateSource;
pub use unit::{CompiledUnit, RenderContext, UnitInstance};
