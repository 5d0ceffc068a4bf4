//! Content fingerprints for source snapshots.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 128-bit XXH3 fingerprint of a piece of source text.
///
/// Two snapshots with the same `ContentHash` are treated as identical. The run
/// cache stores these instead of the full unit source, so a memoization hit
/// costs one hash and one 16-byte comparison.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Fingerprints raw bytes.
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = xxhash_rust::xxh3::xxh3_128(data);
        Self(hash.to_le_bytes())
    }

    /// Fingerprints a source snapshot.
    pub fn of_source(source: &str) -> Self {
        Self::from_bytes(source.as_bytes())
    }

    /// Returns the first eight hex digits, for log lines.
    pub fn short(&self) -> String {
        self.0[..4].iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({}..)", self.short())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_source_same_hash() {
        assert_eq!(ContentHash::of_source("a = 1"), ContentHash::of_source("a = 1"));
    }

    #[test]
    fn whitespace_edit_changes_hash() {
        assert_ne!(ContentHash::of_source("a = 1"), ContentHash::of_source("a =  1"));
    }

    #[test]
    fn of_source_matches_from_bytes() {
        assert_eq!(
            ContentHash::of_source("print(1)"),
            ContentHash::from_bytes(b"print(1)")
        );
    }

    #[test]
    fn display_is_32_hex_chars() {
        let s = ContentHash::of_source("x").to_string();
        assert_eq!(s.len(), 32);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn short_is_prefix_of_display() {
        let h = ContentHash::of_source("cell");
        assert_eq!(h.short().len(), 8);
        assert!(h.to_string().starts_with(&h.short()));
        assert_eq!(format!("{h:?}"), format!("ContentHash({}..)", h.short()));
    }

    #[test]
    fn serde_roundtrip() {
        let h = ContentHash::of_source("serde");
        let json = serde_json::to_string(&h).unwrap();
        let back: ContentHash = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }
}
