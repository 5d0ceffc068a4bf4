//! `folio split` and `folio statements`: inspect how a script is segmented.

use std::path::Path;

use folio_config::FolioConfig;
use folio_diagnostics::{DiagnosticRenderer, TerminalRenderer};
use folio_script::{splitter, statement_boundaries, Boundary, Segment};
use folio_source::SourceDb;

use crate::pipeline::{load_script, markers, unterminated_escape};
use crate::{GlobalArgs, ReportFormat, SplitArgs};

/// Width of the line-range and kind columns, including separators.
const GUTTER: usize = 18;

/// Runs `folio split`. Returns 1 when the script does not parse.
pub fn run_split(
    args: &SplitArgs,
    global: &GlobalArgs,
    config: &FolioConfig,
) -> Result<i32, Box<dyn std::error::Error>> {
    let markers = markers(config)?;
    let mut db = SourceDb::new();
    let id = load_script(&mut db, Path::new(&args.file))?;
    let file = db.get_file(id);
    let renderer = TerminalRenderer::new(global.color);

    let mut split = match splitter(&file.content, &markers) {
        Ok(split) => split,
        Err(err) => {
            eprint!("{}", renderer.render(&err.to_diagnostic(id), &db));
            return Ok(1);
        }
    };
    let segments: Vec<Segment<'_>> = split.by_ref().collect();
    tracing::debug!(file = %args.file, segments = segments.len(), "split script");

    match args.format {
        ReportFormat::Text => print!("{}", format_segments(&segments)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&segments)?),
    }

    if let Some(run) = split.unterminated_escape() {
        if !global.quiet {
            eprint!("{}", renderer.render(&unterminated_escape(file, run), &db));
        }
    }
    Ok(0)
}

/// Runs `folio statements`. Returns 1 when the script does not parse.
pub fn run_statements(
    args: &SplitArgs,
    global: &GlobalArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    let mut db = SourceDb::new();
    let id = load_script(&mut db, Path::new(&args.file))?;
    let file = db.get_file(id);

    let boundaries = match statement_boundaries(&file.content) {
        Ok(boundaries) => boundaries,
        Err(err) => {
            let renderer = TerminalRenderer::new(global.color);
            eprint!("{}", renderer.render(&err.to_diagnostic(id), &db));
            return Ok(1);
        }
    };

    match args.format {
        ReportFormat::Text => print!("{}", format_boundaries(&boundaries)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&boundaries)?),
    }
    Ok(0)
}

/// One row per segment: line range, kind, then the text. Continuation lines
/// of multi-line text are indented under the first.
pub fn format_segments(segments: &[Segment<'_>]) -> String {
    let mut out = String::new();
    for segment in segments {
        let head = format!("{:<9} {:<7}", segment.lines.to_string(), segment.kind.to_string());
        let mut lines = segment.text.lines();
        match lines.next() {
            Some(first) if !first.is_empty() => {
                out.push_str(&head);
                out.push(' ');
                out.push_str(first);
            }
            _ => out.push_str(head.trim_end()),
        }
        out.push('\n');
        for line in lines {
            out.push_str(&" ".repeat(GUTTER));
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// One row per statement: line span and kind.
pub fn format_boundaries(boundaries: &[Boundary]) -> String {
    boundaries
        .iter()
        .map(|b| {
            let span = if b.first_line == b.last_line {
                b.first_line.to_string()
            } else {
                format!("{}-{}", b.first_line, b.last_line)
            };
            format!("{span:<9} {}\n", b.kind)
        })
        .collect()
}
