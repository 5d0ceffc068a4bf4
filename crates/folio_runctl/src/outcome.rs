//! The result of one pipeline call.

use serde::Serialize;
use std::fmt;

/// Text shown in place of a unit skipped by an abort.
pub const ABORTED_TEXT: &str = "**Aborted**";

/// A rendered result, or the sentinel left by an inactive gate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Outcome<R> {
    /// The renderer produced `R`, now or in an earlier pass.
    Rendered(R),
    /// The abort gate was closed when the unit arrived.
    Aborted,
}

impl<R> Outcome<R> {
    /// Returns `true` for the abort sentinel.
    pub fn is_aborted(&self) -> bool {
        matches!(self, Outcome::Aborted)
    }

    /// The rendered value, if any.
    pub fn rendered(&self) -> Option<&R> {
        match self {
            Outcome::Rendered(r) => Some(r),
            Outcome::Aborted => None,
        }
    }
}

impl<R: fmt::Display> fmt::Display for Outcome<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Rendered(r) => r.fmt(f),
            Outcome::Aborted => f.write_str(ABORTED_TEXT),
        }
    }
}
