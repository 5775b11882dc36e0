//! `stencil sections` — dump a template's parsed sections as JSON.

use std::path::Path;

/// Runs the `stencil sections` command.
///
/// Parses the template and prints its settings, code, and markup as a
/// JSON object on stdout. Returns exit code 0 on success.
pub fn run(args: &crate::SectionsArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(Path::new(&args.file))?;
    let document = stencil_parser::parse(&content)?;
    let json = serde_json::to_string_pretty(&document)?;
    println!("{json}");
    Ok(0)
}
