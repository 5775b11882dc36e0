//! On-disk cache storage for compiled template units.
//!
//! This crate defines the [`CacheStore`] contract the compiler and loader
//! are written against, and provides [`FileStore`], the filesystem
//! implementation: cache paths derived from hashed source paths, a JSON
//! record index for staleness checks, and atomically written artifact text.
//! All index reads are fail-safe: corruption reads as a cache miss, never
//! an error.

#![warn(missing_docs)]

pub mod error;
pub mod record;
pub mod store;

pub use error::CacheError;
pub use record::{CacheIndex, UnitRecord};
pub use store::{CacheStore, FileStore};
