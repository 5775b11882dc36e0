//! The template source handed to a compilation attempt.

use std::path::Path;
use std::time::UNIX_EPOCH;

/// A versioned template source, immutable for one compilation attempt.
///
/// Owned by the calling rendering runtime; the compiler only reads it. The
/// modification time is the staleness anchor compared against cache
/// records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    /// Logical path of the template, e.g. `pages/home.stencil`.
    pub source_path: String,

    /// Raw on-disk document text.
    pub raw_content: String,

    /// Source modification time as a unix timestamp.
    pub mtime: i64,

    /// Name of the unit this template's unit inherits from, if any.
    pub parent_unit: Option<String>,
}

impl TemplateSource {
    /// Creates a source from already-read content.
    pub fn new(
        source_path: impl Into<String>,
        raw_content: impl Into<String>,
        mtime: i64,
        parent_unit: Option<String>,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            raw_content: raw_content.into(),
            mtime,
            parent_unit,
        }
    }

    /// Reads a template file, capturing its content and modification time.
    pub fn from_file(path: &Path, parent_unit: Option<String>) -> std::io::Result<Self> {
        let raw_content = std::fs::read_to_string(path)?;
        let modified = std::fs::metadata(path)?.modified()?;
        let mtime = modified
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        Ok(Self {
            source_path: path.to_string_lossy().into_owned(),
            raw_content,
            mtime,
            parent_unit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_populates_fields() {
        let src = TemplateSource::new("pages/home.stencil", "---\nt: 1\n---\nm", 100, None);
        assert_eq!(src.source_path, "pages/home.stencil");
        assert_eq!(src.mtime, 100);
        assert!(src.parent_unit.is_none());
    }

    #[test]
    fn from_file_reads_content_and_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("home.stencil");
        std::fs::write(&path, "---\ntitle: Home\n---\nmarkup").unwrap();

        let src = TemplateSource::from_file(&path, Some("BasePage".to_string())).unwrap();
        assert!(src.raw_content.contains("title: Home"));
        assert!(src.mtime > 0);
        assert_eq!(src.parent_unit.as_deref(), Some("BasePage"));
    }

    #[test]
    fn from_file_missing_errors() {
        assert!(TemplateSource::from_file(Path::new("/nonexistent.stencil"), None).is_err());
    }
}
