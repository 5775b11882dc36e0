//! Template document parsing and rendering.
//!
//! The on-disk document format is positional:
//!
//! ```text
//! ---
//! title: Home          # YAML front-matter
//! ---
//! <%                   # embedded code fragment
//! fn on_start() {}
//! %>
//! ---
//! <h1>markup</h1>      # arbitrary markup, may itself contain "---"
//! ```
//!
//! With only two sections they are read as front-matter and markup; with a
//! single section the whole document is markup. The separator is not named,
//! so trailing segments are rejoined to keep markup bytes faithful.

use serde::Serialize;

use crate::error::FormatError;

/// The literal token separating document sections.
pub const SECTION_SEPARATOR: &str = "---";

/// Opening delimiter of an embedded code fragment.
pub const CODE_OPEN: &str = "<%";

/// Closing delimiter of an embedded code fragment.
pub const CODE_CLOSE: &str = "%>";

/// Parsed front-matter: an ordered string-keyed mapping.
pub type Settings = serde_yaml::Mapping;

/// A template document split into its three sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateDocument {
    /// Front-matter key/value settings. Empty when the document has none.
    pub settings: Settings,

    /// The embedded code fragment, stripped of its delimiter wrapper.
    /// `None` when the document has fewer than four sections.
    pub code: Option<String>,

    /// The markup section. Always present; empty string when absent.
    pub markup: String,
}

/// Parses raw template text into a [`TemplateDocument`].
///
/// Splitting never fails: a document with too few sections degrades to
/// plain markup. The only error is front-matter that is present but does
/// not parse as a YAML mapping.
pub fn parse(content: &str) -> Result<TemplateDocument, FormatError> {
    let segments: Vec<&str> = content.split(SECTION_SEPARATOR).collect();
    let n = segments.len();

    // No separator at all: the whole document is markup.
    if n == 1 {
        return Ok(TemplateDocument {
            settings: Settings::new(),
            code: None,
            markup: content.to_string(),
        });
    }

    if n == 2 {
        return Ok(TemplateDocument {
            settings: Settings::new(),
            code: None,
            markup: strip_separator_newline(&segments[1..].join(SECTION_SEPARATOR)),
        });
    }

    let settings = parse_settings(segments[1])?;

    if n == 3 {
        return Ok(TemplateDocument {
            settings,
            code: None,
            markup: strip_separator_newline(&segments[2..].join(SECTION_SEPARATOR)),
        });
    }

    Ok(TemplateDocument {
        settings,
        code: normalize_code(segments[2]),
        markup: strip_separator_newline(&segments[3..].join(SECTION_SEPARATOR)),
    })
}

/// Renders a document back into the on-disk format.
///
/// Inverse of [`parse`] up to normalization: `parse(render(parse(x)))`
/// yields the same settings/code/markup triple as `parse(x)`.
pub fn render(doc: &TemplateDocument) -> String {
    let code = doc.code.as_deref().map(str::trim).unwrap_or("");
    let markup = doc.markup.trim();

    let mut blocks: Vec<String> = Vec::new();
    if !doc.settings.is_empty() {
        let yaml = serde_yaml::to_string(&doc.settings)
            .expect("front-matter mapping always serializes");
        blocks.push(yaml.trim().to_string());
    } else if !code.is_empty() {
        // Empty front-matter slot keeps the code section in third position.
        blocks.push(String::new());
    }
    if !code.is_empty() {
        blocks.push(format!("{CODE_OPEN}\n{code}\n{CODE_CLOSE}"));
    }

    if blocks.is_empty() {
        return markup.to_string();
    }

    blocks.push(markup.to_string());
    let joined = blocks.join(&format!("\n{SECTION_SEPARATOR}\n"));
    format!("{SECTION_SEPARATOR}\n{joined}").trim().to_string()
}

/// Parses a front-matter segment into settings.
///
/// Empty or explicit-null front-matter yields an empty mapping; anything
/// else must be a YAML mapping.
fn parse_settings(raw: &str) -> Result<Settings, FormatError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Settings::new());
    }
    let value: serde_yaml::Value =
        serde_yaml::from_str(trimmed).map_err(|e| FormatError::InvalidYaml(e.to_string()))?;
    match value {
        serde_yaml::Value::Null => Ok(Settings::new()),
        serde_yaml::Value::Mapping(m) => Ok(m),
        serde_yaml::Value::Bool(_) | serde_yaml::Value::Number(_) => {
            Err(FormatError::NotAMapping {
                found: "scalar".to_string(),
            })
        }
        serde_yaml::Value::String(_) => Err(FormatError::NotAMapping {
            found: "string".to_string(),
        }),
        serde_yaml::Value::Sequence(_) => Err(FormatError::NotAMapping {
            found: "sequence".to_string(),
        }),
        serde_yaml::Value::Tagged(_) => Err(FormatError::NotAMapping {
            found: "tagged value".to_string(),
        }),
    }
}

/// Normalizes a code segment: trims it and strips the delimiter wrapper.
/// An effectively empty fragment becomes `None`.
fn normalize_code(raw: &str) -> Option<String> {
    let mut s = raw.trim();
    if let Some(rest) = s.strip_prefix(CODE_OPEN) {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix(CODE_CLOSE) {
        s = rest;
    }
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Drops the single newline that belongs to the separator line, so markup
/// starts at its own first byte. Interior and trailing bytes are untouched.
fn strip_separator_newline(markup: &str) -> String {
    markup
        .strip_prefix("\r\n")
        .or_else(|| markup.strip_prefix('\n'))
        .unwrap_or(markup)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(content: &str) -> TemplateDocument {
        parse(content).unwrap()
    }

    #[test]
    fn no_separator_is_pure_markup() {
        let d = doc("<h1>hello</h1>");
        assert!(d.settings.is_empty());
        assert!(d.code.is_none());
        assert_eq!(d.markup, "<h1>hello</h1>");
    }

    #[test]
    fn two_segments_are_markup_only() {
        let d = doc("ignored---\n<p>body</p>");
        assert!(d.settings.is_empty());
        assert!(d.code.is_none());
        assert_eq!(d.markup, "<p>body</p>");
    }

    #[test]
    fn settings_and_markup() {
        let d = doc("---\ntitle: Home\n---\nmarkup here");
        assert_eq!(
            d.settings.get("title").and_then(|v| v.as_str()),
            Some("Home")
        );
        assert!(d.code.is_none());
        assert_eq!(d.markup, "markup here");
    }

    #[test]
    fn settings_code_and_markup() {
        let d = doc("---\ntitle: Home\n---\n<%\nfn on_start() {}\n%>\n---\n<h1>hi</h1>");
        assert_eq!(d.code.as_deref(), Some("fn on_start() {}"));
        assert_eq!(d.markup, "<h1>hi</h1>");
    }

    #[test]
    fn code_without_wrapper_is_kept() {
        let d = doc("---\ntitle: x\n---\nfn f() {}\n---\nm");
        assert_eq!(d.code.as_deref(), Some("fn f() {}"));
    }

    #[test]
    fn separator_inside_markup_is_preserved() {
        let d = doc("---\ntitle: x\n---\nbefore --- after --- end");
        assert_eq!(d.markup, "before --- after --- end");
    }

    #[test]
    fn fewer_than_three_segments_never_have_code_or_settings() {
        for content in ["plain", "a---b"] {
            let d = doc(content);
            assert!(d.code.is_none());
            assert!(d.settings.is_empty());
        }
    }

    #[test]
    fn empty_front_matter_is_empty_settings() {
        let d = doc("---\n\n---\nmarkup");
        assert!(d.settings.is_empty());
        assert_eq!(d.markup, "markup");
    }

    #[test]
    fn invalid_yaml_front_matter_errors() {
        let err = parse("---\ntitle: [unclosed\n---\nmarkup").unwrap_err();
        assert!(matches!(err, FormatError::InvalidYaml(_)));
    }

    #[test]
    fn sequence_front_matter_errors() {
        let err = parse("---\n- a\n- b\n---\nmarkup").unwrap_err();
        assert!(matches!(err, FormatError::NotAMapping { .. }));
    }

    #[test]
    fn settings_preserve_key_order() {
        let d = doc("---\nzebra: 1\nalpha: 2\n---\nm");
        let keys: Vec<_> = d
            .settings
            .keys()
            .filter_map(|k| k.as_str().map(str::to_string))
            .collect();
        assert_eq!(keys, vec!["zebra", "alpha"]);
    }

    #[test]
    fn empty_code_section_becomes_none() {
        let d = doc("---\ntitle: x\n---\n<%\n%>\n---\nm");
        assert!(d.code.is_none());
    }

    fn assert_round_trip(content: &str) {
        let first = parse(content).unwrap();
        let second = parse(&render(&first)).unwrap();
        assert_eq!(first.settings, second.settings, "settings for {content:?}");
        assert_eq!(first.code, second.code, "code for {content:?}");
        assert_eq!(
            first.markup.trim(),
            second.markup.trim(),
            "markup for {content:?}"
        );
    }

    #[test]
    fn round_trip_markup_only() {
        assert_round_trip("<h1>just markup</h1>");
    }

    #[test]
    fn round_trip_settings_and_markup() {
        assert_round_trip("---\ntitle: Home\nlayout: default\n---\nmarkup here");
    }

    #[test]
    fn round_trip_full_document() {
        assert_round_trip(
            "---\ntitle: Home\n---\n<%\nfn on_start() {\n    let x = 1;\n}\n%>\n---\n<h1>{{ title }}</h1>",
        );
    }

    #[test]
    fn round_trip_code_without_settings() {
        assert_round_trip("---\n\n---\n<%\nfn f() {}\n%>\n---\nmarkup");
    }

    #[test]
    fn render_settings_only_document() {
        let d = doc("---\ntitle: Home\n---\nbody");
        let out = render(&d);
        assert!(out.starts_with("---\n"));
        assert!(out.contains("title: Home"));
        assert!(out.ends_with("body"));
    }
}
