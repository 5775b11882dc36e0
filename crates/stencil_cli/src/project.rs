//! Shared project helpers for CLI commands: root resolution and template
//! discovery.

use std::path::{Path, PathBuf};

use stencil_config::ProjectConfig;

use crate::GlobalArgs;

/// Walks up from `start` looking for the nearest directory containing
/// `stencil.toml`.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join("stencil.toml").exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find stencil.toml in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Resolves the project root directory from global CLI args.
///
/// If `--config` is specified, uses that path (file → parent dir, dir →
/// itself). Otherwise walks up from the current directory.
pub fn resolve_project_root(global: &GlobalArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_file() {
            Ok(p.parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".")))
        } else {
            Ok(p)
        }
    } else {
        find_project_root(&std::env::current_dir()?)
    }
}

/// Discovers template files in the given directory (recursive).
///
/// Returns files whose extension is listed in the config's `extensions`,
/// sorted by path.
pub fn discover_templates(
    dir: &Path,
    config: &ProjectConfig,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut files = Vec::new();
    walk_dir(dir, &config.compile.extensions, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk_dir(
    dir: &Path,
    extensions: &[String],
    files: &mut Vec<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            walk_dir(&path, extensions, files)?;
        } else if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            if extensions.iter().any(|known| known == ext) {
                files.push(path);
            }
        }
    }
    Ok(())
}

/// Collects the templates named on the command line, or every template
/// under the configured templates directory when none are named.
pub fn select_templates(
    paths: &[String],
    project_root: &Path,
    config: &ProjectConfig,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    if !paths.is_empty() {
        return Ok(paths.iter().map(PathBuf::from).collect());
    }
    let templates_dir = project_root.join(&config.project.templates_dir);
    if !templates_dir.is_dir() {
        return Err(format!("templates directory {} not found", templates_dir.display()).into());
    }
    discover_templates(&templates_dir, config)
}
