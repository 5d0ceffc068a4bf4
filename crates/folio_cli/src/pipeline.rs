//! Shared helpers for CLI commands.
//!
//! Config resolution, script loading, marker construction and the
//! diagnostics the commands have in common.

use std::path::{Path, PathBuf};

use folio_config::FolioConfig;
use folio_diagnostics::{Diagnostic, DiagnosticCode, Label};
use folio_script::{EscapeRun, Markers};
use folio_source::{FileId, SourceDb, SourceFile, Span};

use crate::GlobalArgs;

/// Loads the configuration named by `--config`, or `./folio.toml`.
///
/// `--config` may name the file itself or the directory holding it. Without
/// the flag a missing `folio.toml` yields the defaults.
pub fn load_settings(global: &GlobalArgs) -> Result<FolioConfig, Box<dyn std::error::Error>> {
    match global.config {
        Some(ref config_path) => {
            let p = PathBuf::from(config_path);
            if p.is_file() {
                let content = std::fs::read_to_string(&p)?;
                Ok(folio_config::load_config_from_str(&content)?)
            } else {
                Ok(folio_config::load_config(&p)?)
            }
        }
        None => Ok(folio_config::load_config_or_default(&std::env::current_dir()?)?),
    }
}

/// Compiles the configured markers.
pub fn markers(config: &FolioConfig) -> Result<Markers, Box<dyn std::error::Error>> {
    Ok(Markers::from_config(&config.script)?)
}

/// Reads `path` into `db`, attaching the path to any I/O error.
pub fn load_script(db: &mut SourceDb, path: &Path) -> Result<FileId, Box<dyn std::error::Error>> {
    db.load_file(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()).into())
}

/// Warning for an escape run that reaches the end of the file.
pub fn unterminated_escape(file: &SourceFile, run: EscapeRun<'_>) -> Diagnostic {
    let start = file.line_start(run.opened_at);
    let span = Span::new(file.id, start, start + run.marker.len() as u32);
    Diagnostic::warning(
        DiagnosticCode::UNTERMINATED_ESCAPE,
        "escape run is never closed",
        span,
    )
    .with_label(Label::primary(span, "opened here"))
    .with_note(format!(
        "every line after this one is passed through verbatim; close the run with a line starting `{}`",
        run.marker
    ))
}
