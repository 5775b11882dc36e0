//! Code transformation and unit-source generation.
//!
//! Takes the opaque code fragment of a template document and produces the
//! source text of a compiled unit: declarations are made member-visible,
//! import lines are hoisted above the unit header, and the assembled text is
//! checked for syntactic well-formedness before it may be persisted.

#![warn(missing_docs)]

pub mod assemble;
pub mod transform;
pub mod validate;

pub use assemble::assemble;
pub use transform::{transform, TransformedCode};
pub use validate::{validate, SyntaxError};
