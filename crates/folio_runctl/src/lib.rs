//! Run control for repeated document passes.
//!
//! Each content unit in a pass is routed through an ordered list of
//! [`Stage`]s before it reaches the real [`Render`] step:
//!
//! - **Cache** ([`RunCache`]): reuses the result recorded for the same
//!   artifact and position when the unit source is unchanged, and discards
//!   every later entry when it is not.
//! - **Gate** ([`AbortGate`]): once a unit asks to abort, every later unit in
//!   the pass yields [`Outcome::Aborted`] until the next pass begins.
//!
//! All state lives in a [`PassState`] passed by `&mut` into each call.

#![warn(missing_docs)]

pub mod cache;
pub mod gate;
pub mod options;
pub mod outcome;
pub mod pass;
pub mod pipeline;

pub use cache::{CacheEntry, RunCache};
pub use gate::AbortGate;
pub use options::Options;
pub use outcome::{Outcome, ABORTED_TEXT};
pub use pass::{PassState, StreamState};
pub use pipeline::{Pipeline, Render, Stage, Unit};
