//! Error types for document parsing.

/// Errors raised while parsing a template document.
///
/// Section splitting itself never fails: structurally malformed input
/// degrades to plain markup. The only hard failure is front-matter that is
/// present but cannot be read as a YAML mapping.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The front-matter block is not valid YAML.
    #[error("front-matter is not valid YAML: {0}")]
    InvalidYaml(String),

    /// The front-matter block parsed as YAML but is not a key/value mapping.
    #[error("front-matter must be a mapping, found {found}")]
    NotAMapping {
        /// Short description of what the front-matter parsed as instead.
        found: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_yaml_display() {
        let err = FormatError::InvalidYaml("mapping values are not allowed".to_string());
        assert!(err.to_string().contains("not valid YAML"));
    }

    #[test]
    fn not_a_mapping_display() {
        let err = FormatError::NotAMapping {
            found: "sequence".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "front-matter must be a mapping, found sequence"
        );
    }
}
