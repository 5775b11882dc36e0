//! Textual transformation of template code fragments.
//!
//! The fragment is opaque: transformation is line- and pattern-anchored,
//! never a full parse. Unmatched constructs pass through untouched and any
//! syntax error surfaces later, when the assembled unit is validated.

use std::sync::OnceLock;

use regex::Regex;
use stencil_parser::{CODE_CLOSE, CODE_OPEN};

/// A code fragment rewritten into a unit-member body plus its hoisted
/// import lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedCode {
    /// The fragment with declarations rewritten and imports removed.
    pub body: String,

    /// Import lines extracted from the fragment, in original order and with
    /// their exact text. Replayed verbatim above the generated unit so
    /// symbol resolution is unaffected.
    pub hoisted: Vec<String>,
}

fn fn_decl_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^(\s*)fn\s").expect("fn pattern is valid"))
}

fn import_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)use\s+[a-z0-9_.:]+(?:\s+as\s+[a-z0-9_]+)?;[ \t]*\n?")
            .expect("import pattern is valid")
    })
}

/// Transforms a raw code fragment into a self-contained unit body.
///
/// Strips a surrounding delimiter wrapper if present, rewrites bare `fn`
/// declarations at statement start to `pub fn`, and hoists `use` import
/// lines out of the body.
pub fn transform(code: &str) -> TransformedCode {
    let stripped = strip_delimiters(code);

    let rewritten = fn_decl_pattern().replace_all(stripped, "${1}pub fn ");

    let hoisted: Vec<String> = import_pattern()
        .find_iter(&rewritten)
        .map(|m| m.as_str().to_string())
        .collect();
    let body = import_pattern().replace_all(&rewritten, "").trim().to_string();

    TransformedCode { body, hoisted }
}

/// Strips a leading/trailing code-delimiter wrapper, if present.
fn strip_delimiters(code: &str) -> &str {
    let mut s = code.trim();
    if let Some(rest) = s.strip_prefix(CODE_OPEN) {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix(CODE_CLOSE) {
        s = rest;
    }
    s.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_fn_becomes_pub_fn() {
        let t = transform("fn on_start() {\n}");
        assert_eq!(t.body, "pub fn on_start() {\n}");
    }

    #[test]
    fn indented_fn_keeps_indentation() {
        let t = transform("fn a() {}\n    fn b() {}");
        assert!(t.body.contains("pub fn a()"));
        assert!(t.body.contains("    pub fn b()"));
    }

    #[test]
    fn already_public_fn_is_untouched() {
        let t = transform("pub fn visible() {}");
        assert_eq!(t.body, "pub fn visible() {}");
        assert!(!t.body.contains("pub pub"));
    }

    #[test]
    fn mid_line_fn_is_not_rewritten() {
        let t = transform("let f = make_fn();\ncall(fn_table);");
        assert!(!t.body.contains("pub fn"));
    }

    #[test]
    fn delimiter_wrapper_is_stripped() {
        let t = transform("<%\nfn f() {}\n%>");
        assert_eq!(t.body, "pub fn f() {}");
    }

    #[test]
    fn imports_are_hoisted_in_order() {
        let code = "use app.helpers as h;\nuse site::nav;\nfn f() {}";
        let t = transform(code);
        assert_eq!(t.hoisted, vec!["use app.helpers as h;\n", "use site::nav;\n"]);
        assert_eq!(t.body, "pub fn f() {}");
    }

    #[test]
    fn hoisted_text_is_exact() {
        let t = transform("use Site.Theme as Theme;\nfn f() {}");
        assert_eq!(t.hoisted[0], "use Site.Theme as Theme;\n");
    }

    #[test]
    fn import_without_alias() {
        let t = transform("use app.navigation;\nfn f() {}");
        assert_eq!(t.hoisted.len(), 1);
        assert!(!t.body.contains("use "));
    }

    #[test]
    fn no_imports_leaves_body_alone() {
        let t = transform("fn f() { user(); }");
        assert!(t.hoisted.is_empty());
        assert_eq!(t.body, "pub fn f() { user(); }");
    }

    #[test]
    fn empty_fragment() {
        let t = transform("");
        assert!(t.body.is_empty());
        assert!(t.hoisted.is_empty());
    }

    #[test]
    fn unmatched_constructs_pass_through() {
        let code = "fn broken( {\nlet x = ;";
        let t = transform(code);
        assert!(t.body.contains("pub fn broken( {"));
        assert!(t.body.contains("let x = ;"));
    }
}
