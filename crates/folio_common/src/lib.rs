//! Shared foundational types used across the Folio workspace.
//!
//! Currently this is the [`ContentHash`] fingerprint that the run cache uses
//! to compare a unit's source snapshot against the one recorded for the same
//! pass position.

#![warn(missing_docs)]

pub mod hash;

pub use hash::ContentHash;
