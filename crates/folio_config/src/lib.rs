//! Parsing and validation of `folio.toml`.
//!
//! Every section is optional; a missing file yields [`FolioConfig::default`].

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, load_config_or_default, CONFIG_FILE_NAME};
pub use types::*;
