//! Error taxonomy for compilation and activation.
//!
//! Parsing and compilation errors propagate synchronously from
//! [`process`](crate::Compiler::process); loader errors propagate
//! synchronously from [`activate`](crate::Loader::activate). There is no
//! background retry: every failure is reported once to the immediate
//! caller. Record/artifact divergence is not an error at all; it is
//! recovered inside the state machine and only surfaces as
//! [`LoadError::Unresolvable`] when recovery has failed twice.

use stencil_cache::CacheError;
use stencil_codegen::SyntaxError;
use stencil_parser::FormatError;

/// Errors raised while processing a template source into a compiled unit.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The template's front-matter could not be parsed.
    #[error("invalid front-matter in {source_path}: {source}")]
    Format {
        /// Path of the offending template.
        source_path: String,
        /// The underlying parse failure.
        #[source]
        source: FormatError,
    },

    /// The assembled unit source is not syntactically well-formed. Nothing
    /// was persisted for this template.
    #[error("generated unit for {source_path} is not well-formed: {source}")]
    Compilation {
        /// Path of the offending template.
        source_path: String,
        /// The validator's rejection.
        #[source]
        source: SyntaxError,
    },

    /// The cache store failed; surfaced immediately, no retry.
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Errors raised while activating a compiled unit.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Compilation failed while (re)processing the template.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// The unit could not be activated even after one forced
    /// recompilation. Fatal for the current render request.
    #[error("unit {unit_name} for {source_path} could not be activated after recompilation")]
    Unresolvable {
        /// The unit name that could not be resolved.
        unit_name: String,
        /// Path of the template being activated.
        source_path: String,
    },
}
