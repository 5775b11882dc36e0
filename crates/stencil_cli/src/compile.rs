//! `stencil compile` — build templates into cached units.

use std::sync::Arc;

use stencil_cache::FileStore;
use stencil_compile::{Compiler, TemplateSource};

use crate::project::{resolve_project_root, select_templates};
use crate::{CompileArgs, GlobalArgs};

/// Runs the `stencil compile` command.
///
/// Compiles each selected template through the incremental cache; with
/// `--force`, every template is recompiled regardless of cache state.
/// Returns exit code 0 on success, 1 if any template failed.
pub fn run(args: &CompileArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project_root = resolve_project_root(global)?;
    let config = stencil_config::load_config(&project_root)?;

    let templates = select_templates(&args.paths, &project_root, &config)?;
    if templates.is_empty() {
        eprintln!(
            "error: no templates found under {}",
            project_root.join(&config.project.templates_dir).display()
        );
        return Ok(1);
    }

    let store = Arc::new(FileStore::new(project_root.join(&config.project.cache_dir)));
    let compiler = Compiler::new(store);

    let mut failures = 0;
    for path in &templates {
        let source = match TemplateSource::from_file(path, config.compile.parent_unit.clone()) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("error: cannot read {}: {e}", path.display());
                failures += 1;
                continue;
            }
        };

        let result = if args.force {
            compiler.recompile(&source)
        } else {
            compiler.process(&source)
        };

        match result {
            Ok(unit_ref) => {
                if !global.quiet {
                    eprintln!("  Compiled {}", path.display());
                    if global.verbose {
                        eprintln!("           {} -> {}", unit_ref.unit_name, unit_ref.cache_path.display());
                    }
                }
            }
            Err(e) => {
                eprintln!("error: {e}");
                failures += 1;
            }
        }
    }

    if !global.quiet {
        eprintln!(
            "  Finished {} template(s), {} failed",
            templates.len(),
            failures
        );
    }

    Ok(if failures == 0 { 0 } else { 1 })
}
