//! Opaque identifier for artifacts loaded into a [`SourceDb`](crate::SourceDb).

use serde::{Deserialize, Serialize};

/// Index of an artifact inside a [`SourceDb`](crate::SourceDb).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FileId(u32);

impl FileId {
    /// Placeholder for spans that do not belong to any loaded artifact.
    pub const DUMMY: FileId = FileId(u32::MAX);

    /// Wraps a raw index.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_roundtrip() {
        assert_eq!(FileId::from_raw(3).as_raw(), 3);
    }

    #[test]
    fn dummy_is_max() {
        assert_eq!(FileId::DUMMY.as_raw(), u32::MAX);
        assert_ne!(FileId::DUMMY, FileId::from_raw(0));
    }
}
