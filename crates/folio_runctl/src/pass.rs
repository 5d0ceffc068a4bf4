//! State carried across the calls of one or more passes.

use std::collections::HashMap;

use crate::cache::RunCache;
use crate::gate::AbortGate;
use crate::outcome::Outcome;

/// Cache and gate owned by one render stream.
#[derive(Debug)]
pub struct StreamState<R> {
    /// Memoized outcomes per artifact.
    pub cache: RunCache<Outcome<R>>,
    /// The stream's abort flag.
    pub gate: AbortGate,
}

impl<R> Default for StreamState<R> {
    fn default() -> Self {
        Self {
            cache: RunCache::new(),
            gate: AbortGate::new(),
        }
    }
}

/// The position counter plus every stream's state.
///
/// Caches live as long as the `PassState`; only the position is reset
/// between passes. Calls must arrive in document order, one per unit: a
/// skipped or repeated call shifts every later position and is not detected.
#[derive(Debug)]
pub struct PassState<R> {
    position: usize,
    streams: HashMap<String, StreamState<R>>,
}

impl<R> Default for PassState<R> {
    fn default() -> Self {
        Self {
            position: 0,
            streams: HashMap::new(),
        }
    }
}

impl<R> PassState<R> {
    /// Creates state with no streams and position 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new traversal of the document.
    pub fn begin_pass(&mut self) {
        self.position = 0;
    }

    /// Position the next call will take.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Takes the current position and moves past it.
    pub fn advance(&mut self) -> usize {
        let position = self.position;
        self.position += 1;
        position
    }

    /// The state of `stream`, created on first use.
    pub fn stream_mut(&mut self, stream: &str) -> &mut StreamState<R> {
        self.streams.entry(stream.to_string()).or_default()
    }

    /// The state of `stream`, if it has been used.
    pub fn stream(&self, stream: &str) -> Option<&StreamState<R>> {
        self.streams.get(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_and_reset() {
        let mut pass = PassState::<()>::new();
        assert_eq!(pass.advance(), 0);
        assert_eq!(pass.advance(), 1);
        assert_eq!(pass.position(), 2);
        pass.begin_pass();
        assert_eq!(pass.position(), 0);
    }

    #[test]
    fn streams_are_independent() {
        let mut pass = PassState::<()>::new();
        pass.stream_mut("python").gate.trip();
        assert!(pass.stream_mut("shell").gate.is_active());
        assert!(!pass.stream("python").map(|s| s.gate.is_active()).unwrap_or(true));
        assert!(pass.stream("missing").is_none());
    }
}
