//! `folio check`: parse scripts and report problems.
//!
//! Each file is loaded, parsed into statements and run through the splitter.
//! Parse failures become `E001` errors, unreadable files `E002` errors, and
//! escape runs that never close `W001` warnings.

use std::path::Path;

use folio_config::FolioConfig;
use folio_diagnostics::{
    Diagnostic, DiagnosticCode, DiagnosticRenderer, DiagnosticSink, Severity, TerminalRenderer,
};
use folio_script::{Markers, Splitter, parse_statements};
use folio_source::{FileId, SourceDb, Span};

use crate::pipeline::{markers, unterminated_escape};
use crate::{CheckArgs, GlobalArgs};

/// Runs `folio check`. Returns 1 when any file has errors.
pub fn run(
    args: &CheckArgs,
    global: &GlobalArgs,
    config: &FolioConfig,
) -> Result<i32, Box<dyn std::error::Error>> {
    let markers = markers(config)?;
    let mut db = SourceDb::new();
    let sink = DiagnosticSink::new();

    for path in &args.files {
        match db.load_file(Path::new(path)) {
            Ok(id) => check_file(&db, id, &markers, &sink),
            Err(err) => sink.emit(Diagnostic::error(
                DiagnosticCode::IO,
                format!("cannot read {path}: {err}"),
                Span::DUMMY,
            )),
        }
    }

    let diagnostics = sink.diagnostics();
    let renderer = TerminalRenderer::new(global.color);
    for diag in &diagnostics {
        if diag.severity == Severity::Error || !global.quiet {
            eprint!("{}", renderer.render(diag, &db));
        }
    }

    let warning_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();
    if !global.quiet {
        eprintln!(
            "   Checked {} file(s): {} error(s), {} warning(s)",
            args.files.len(),
            sink.error_count(),
            warning_count
        );
    }

    if sink.has_errors() {
        Ok(1)
    } else {
        Ok(0)
    }
}

/// Parses one loaded file and reports into `sink`.
pub fn check_file(db: &SourceDb, id: FileId, markers: &Markers, sink: &DiagnosticSink) {
    let file = db.get_file(id);
    let statements = match parse_statements(&file.content) {
        Ok(statements) => statements,
        Err(err) => {
            tracing::debug!(path = %file.path.display(), %err, "parse failed");
            sink.emit(err.to_diagnostic(id));
            return;
        }
    };
    tracing::debug!(
        path = %file.path.display(),
        statements = statements.len(),
        "parsed script"
    );

    let mut split = Splitter::with_statements(&file.content, &statements, markers);
    split.by_ref().for_each(drop);
    if let Some(run) = split.unterminated_escape() {
        sink.emit(unterminated_escape(file, run));
    }
}
