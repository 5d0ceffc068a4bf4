//! Structured diagnostics and their terminal rendering.
//!
//! A [`Diagnostic`] carries a [`Severity`], a [`DiagnosticCode`], a message,
//! and source [`Label`]s. The [`DiagnosticSink`] collects them while a command
//! runs; [`TerminalRenderer`] formats them rustc-style.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod label;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use label::{Label, LabelStyle};
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
