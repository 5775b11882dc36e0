//! `stencil status` — report cache freshness without compiling.

use stencil_cache::{CacheStore, FileStore};
use stencil_compile::TemplateSource;

use crate::project::{resolve_project_root, select_templates};
use crate::{GlobalArgs, StatusArgs};

/// Cache freshness of one template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// A record exists and matches the source modification time.
    Fresh,
    /// A record exists but the source has changed since it was written.
    Stale,
    /// No record, but an artifact at least as new as the source exists;
    /// the next compile will recover it without recompiling.
    Recoverable,
    /// Nothing usable is cached.
    Uncached,
}

impl Freshness {
    fn label(self) -> &'static str {
        match self {
            Freshness::Fresh => "fresh",
            Freshness::Stale => "stale",
            Freshness::Recoverable => "recoverable",
            Freshness::Uncached => "uncached",
        }
    }
}

/// Classifies a template source against the cache store, mirroring the
/// compiler's state machine without performing any writes.
pub fn classify(store: &dyn CacheStore, source: &TemplateSource) -> Freshness {
    let cache_path = store.cache_key_for(&source.source_path);
    match store.read_record(&cache_path) {
        Some(record) if record.source_mtime == source.mtime => Freshness::Fresh,
        Some(_) => Freshness::Stale,
        None => {
            let recoverable = store.file_exists(&cache_path)
                && store
                    .file_mtime(&cache_path)
                    .is_some_and(|disk| disk >= source.mtime);
            if recoverable {
                Freshness::Recoverable
            } else {
                Freshness::Uncached
            }
        }
    }
}

/// Runs the `stencil status` command.
///
/// Returns exit code 0; missing template files are reported and counted
/// as errors with exit code 1.
pub fn run(args: &StatusArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project_root = resolve_project_root(global)?;
    let config = stencil_config::load_config(&project_root)?;
    let templates = select_templates(&args.paths, &project_root, &config)?;

    let store = FileStore::new(project_root.join(&config.project.cache_dir));

    let mut failures = 0;
    for path in &templates {
        match TemplateSource::from_file(path, None) {
            Ok(source) => {
                let freshness = classify(&store, &source);
                println!("{:>12}  {}", freshness.label(), path.display());
            }
            Err(e) => {
                eprintln!("error: cannot read {}: {e}", path.display());
                failures += 1;
            }
        }
    }

    Ok(if failures == 0 { 0 } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use stencil_compile::Compiler;

    fn store_and_source() -> (tempfile::TempDir, Arc<FileStore>, TemplateSource) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileStore::new(dir.path()));
        let source = TemplateSource::new(
            "pages/home.stencil",
            "---\ntitle: Home\n---\nmarkup here",
            100,
            None,
        );
        (dir, store, source)
    }

    #[test]
    fn uncompiled_template_is_uncached() {
        let (_dir, store, source) = store_and_source();
        assert_eq!(classify(store.as_ref(), &source), Freshness::Uncached);
    }

    #[test]
    fn compiled_template_is_fresh() {
        let (_dir, store, source) = store_and_source();
        Compiler::new(store.clone()).process(&source).unwrap();
        assert_eq!(classify(store.as_ref(), &source), Freshness::Fresh);
    }

    #[test]
    fn bumped_mtime_reads_stale() {
        let (_dir, store, source) = store_and_source();
        Compiler::new(store.clone()).process(&source).unwrap();
        let bumped = TemplateSource::new(
            source.source_path.clone(),
            source.raw_content.clone(),
            source.mtime + 1,
            None,
        );
        assert_eq!(classify(store.as_ref(), &bumped), Freshness::Stale);
    }

    #[test]
    fn foreign_artifact_reads_recoverable() {
        let (_dir, store, source) = store_and_source();
        let cache_path = store.cache_key_for(&source.source_path);
        store
            .write_artifact(&cache_path, "unit body written by another process")
            .unwrap();
        assert_eq!(classify(store.as_ref(), &source), Freshness::Recoverable);
    }
}
