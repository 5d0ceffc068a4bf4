//! Abort gate for one render stream.

/// Whether units are still rendered in the current pass.
///
/// Reopens whenever a call at position 0 is observed, and closes only when a
/// processed unit carries the `abort` option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AbortGate {
    active: bool,
}

impl Default for AbortGate {
    fn default() -> Self {
        Self { active: true }
    }
}

impl AbortGate {
    /// A fresh, open gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Notes the position of an incoming call.
    pub fn observe(&mut self, position: usize) {
        if position == 0 {
            self.active = true;
        }
    }

    /// Returns `true` while units should be rendered.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Closes the gate for the rest of the pass.
    pub fn trip(&mut self) {
        self.active = false;
    }
}
