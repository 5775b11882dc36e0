//! The naming convention for compiled template units.
//!
//! Every compiled unit is identified by a name of the form
//! `Stencil<token>_<hash>Unit`, where `<token>` is an opaque lowercase
//! alphanumeric string unique within the process lifetime and `<hash>` is the
//! hex content hash of the template source. The reserved prefix and suffix
//! make the name recoverable from artifact text by pattern scan when the
//! cache index has lost track of it.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use regex::Regex;

use crate::hash::ContentHash;

/// Reserved prefix of every generated unit name.
const NAME_PREFIX: &str = "Stencil";

/// Fixed suffix of every generated unit name.
const NAME_SUFFIX: &str = "Unit";

/// Process-wide sequence counter. Guarantees that two units generated in the
/// same process never share a name, even for identical source content.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

fn name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"Stencil[0-9a-z]+_[0-9a-f]+Unit").expect("unit name pattern is valid")
    })
}

fn anchored_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^Stencil[0-9a-z]+_[0-9a-f]+Unit$").expect("unit name pattern is valid")
    })
}

/// The identifier of a compiled template unit.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct UnitName(String);

impl UnitName {
    /// Generates a fresh unit name for a source with the given content hash.
    ///
    /// The name combines a process-wide sequence number, a random token, and
    /// the content hash. The sequence number makes in-process collisions
    /// impossible (names double as registry keys); the random token keeps
    /// names from different processes distinct even for identical content.
    pub fn generate(content: &ContentHash) -> Self {
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let token: u64 = rand::random();
        Self(format!(
            "{NAME_PREFIX}{seq:x}z{token:016x}_{content}{NAME_SUFFIX}"
        ))
    }

    /// Validates a string as a well-formed unit name.
    ///
    /// Returns `None` unless the entire string matches the naming convention.
    pub fn parse(s: &str) -> Option<Self> {
        anchored_pattern().is_match(s).then(|| Self(s.to_string()))
    }

    /// Scans arbitrary text for the first substring matching the naming
    /// convention. Used to recover a unit's identity from a cached artifact
    /// whose index record is missing or inconsistent. Never fails.
    pub fn find_in(text: &str) -> Option<Self> {
        name_pattern()
            .find(text)
            .map(|m| Self(m.as_str().to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnitName({})", self.0)
    }
}
