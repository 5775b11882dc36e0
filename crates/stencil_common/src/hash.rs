//! Content hashing for cache keys and generated unit names.

use std::fmt;

/// A 64-bit XXH3 content hash.
///
/// Used to derive cache file names from template source paths and to embed
/// a content fingerprint in generated unit names. Two inputs with the same
/// `ContentHash` are assumed identical for cache purposes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash(u64);

impl ContentHash {
    /// Computes the hash of a byte slice.
    pub fn of(data: &[u8]) -> Self {
        Self(xxhash_rust::xxh3::xxh3_64(data))
    }

    /// Computes the hash of a string's UTF-8 bytes.
    pub fn of_str(s: &str) -> Self {
        Self::of(s.as_bytes())
    }

    /// Returns the hash as a fixed-width lowercase hex string (16 chars).
    pub fn as_hex(&self) -> String {
        format!("{:016x}", self.0)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:016x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let a = ContentHash::of_str("hello template");
        let b = ContentHash::of_str("hello template");
        assert_eq!(a, b);
    }

    #[test]
    fn different_inputs_differ() {
        let a = ContentHash::of_str("pages/home.stencil");
        let b = ContentHash::of_str("pages/about.stencil");
        assert_ne!(a, b);
    }

    #[test]
    fn hex_is_fixed_width() {
        let h = ContentHash::of(b"x");
        let s = h.as_hex();
        assert_eq!(s.len(), 16);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn display_matches_hex() {
        let h = ContentHash::of_str("abc");
        assert_eq!(format!("{h}"), h.as_hex());
    }
}
