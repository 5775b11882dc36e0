//! Parsing and validation of `stencil.toml` project configuration files.
//!
//! This crate reads the project configuration file and produces a
//! strongly-typed [`ProjectConfig`] with defaults for the template and
//! cache directories and the compile options.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::{CompileSection, ProjectConfig, ProjectSection};
