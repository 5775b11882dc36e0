//! Configuration types for `stencil.toml`.

use serde::Deserialize;

/// Top-level project configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// The `[project]` section.
    pub project: ProjectSection,

    /// The `[compile]` section.
    #[serde(default)]
    pub compile: CompileSection,
}

/// The `[project]` section: identity and directory layout.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSection {
    /// Project name. Required.
    pub name: String,

    /// Directory containing template sources, relative to the project root.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,

    /// Directory for compiled units and the record index, relative to the
    /// project root.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,
}

/// The `[compile]` section: options applied to every compilation.
#[derive(Debug, Clone, Deserialize)]
pub struct CompileSection {
    /// Default parent unit that compiled units inherit from.
    #[serde(default)]
    pub parent_unit: Option<String>,

    /// File extensions treated as templates.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for CompileSection {
    fn default() -> Self {
        Self {
            parent_unit: None,
            extensions: default_extensions(),
        }
    }
}

fn default_templates_dir() -> String {
    "templates".to_string()
}

fn default_cache_dir() -> String {
    ".stencil-cache".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["stencil".to_string(), "htm".to_string()]
}
