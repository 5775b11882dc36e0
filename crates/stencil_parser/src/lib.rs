//! Parsing and rendering of template documents.
//!
//! A template document has up to three sections separated by the literal
//! `---` token: YAML front-matter, an embedded code fragment, and markup.
//! [`parse`] splits raw text into a [`TemplateDocument`]; [`render`] is its
//! inverse, reassembling a document into the on-disk format.

#![warn(missing_docs)]

pub mod document;
pub mod error;

pub use document::{
    parse, render, Settings, TemplateDocument, CODE_CLOSE, CODE_OPEN, SECTION_SEPARATOR,
};
pub use error::FormatError;
