//! Shared foundational types for the stencil template compiler.
//!
//! This crate provides content hashing for cache keys and staleness checks,
//! and the unit-naming convention used to identify compiled template units,
//! including the pattern scan that recovers a unit name from artifact text.

#![warn(missing_docs)]

pub mod hash;
pub mod unit_name;

pub use hash::ContentHash;
pub use unit_name::UnitName;
