//! Assembly of the final compiled-unit source text.

use stencil_common::UnitName;

use crate::transform::TransformedCode;

/// Assembles the source text of a compiled unit.
///
/// Layout: hoisted import lines first (verbatim, so symbol resolution is
/// unaffected), a provenance comment naming the template source path, the
/// unit header with its optional parent, then the transformed body inside
/// the unit braces.
pub fn assemble(
    source_path: &str,
    name: &UnitName,
    parent: Option<&str>,
    code: &TransformedCode,
) -> String {
    let mut out = String::new();

    for import in &code.hoisted {
        out.push_str(import);
        if !import.ends_with('\n') {
            out.push('\n');
        }
    }

    out.push_str(&format!("/* {source_path} */\n"));

    match parent {
        Some(parent) => out.push_str(&format!("unit {name}: {parent} {{\n")),
        None => out.push_str(&format!("unit {name} {{\n")),
    }

    if !code.body.is_empty() {
        out.push_str(&code.body);
        out.push('\n');
    }
    out.push_str("}\n");

    out
}
