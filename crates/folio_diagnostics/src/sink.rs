//! Accumulator for diagnostics emitted while a command runs.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::cell::{Cell, RefCell};

/// Collects diagnostics and counts errors.
///
/// Emission goes through `&self` so that a sink can be shared by the
/// helpers of a single command. The sink is not `Sync`.
#[derive(Debug)]
pub struct DiagnosticSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
    error_count: Cell<usize>,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
            error_count: Cell::new(0),
        }
    }

    /// Records a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        if diag.severity == Severity::Error {
            self.error_count.set(self.error_count.get() + 1);
        }
        self.diagnostics.borrow_mut().push(diag);
    }

    /// Returns `true` once any error was emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Number of errors emitted so far.
    pub fn error_count(&self) -> usize {
        self.error_count.get()
    }

    /// Drains every diagnostic. The error count is kept.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }

    /// Copies the current diagnostics without draining.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}
