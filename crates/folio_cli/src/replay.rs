//! `folio replay`: drive units through the cached, abortable pipeline.
//!
//! Units are read from JSON, either a bare list or a notebook-shaped object
//! with a `cells` list. Each unit has a `source` (a string, or a list of
//! lines that are concatenated) and optional `metadata` whose
//! `folio.options` list carries `clear` and `abort`. The renderer splits each
//! unit and reports how many segments of each kind it produced.

use std::fmt;
use std::path::Path;

use folio_config::FolioConfig;
use folio_runctl::{Outcome, PassState, Pipeline, Render, Unit};
use folio_script::{splitter, Markers, ParseError, SegmentKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pipeline::markers;
use crate::{GlobalArgs, ReplayArgs};

/// Render stream identity used by the replay pipeline.
const STREAM: &str = "script";

/// One unit as stored in the replay file.
#[derive(Debug, Deserialize)]
pub struct Cell {
    /// Unit source.
    pub source: CellSource,
    /// Free-form metadata; only `folio.options` is read.
    #[serde(default)]
    pub metadata: Value,
}

/// Cell source as a single string or as a list of lines.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CellSource {
    /// The whole source.
    Text(String),
    /// Lines, each keeping its own terminator.
    Lines(Vec<String>),
}

impl CellSource {
    /// The source as one string.
    pub fn text(&self) -> String {
        match self {
            CellSource::Text(text) => text.clone(),
            CellSource::Lines(lines) => lines.concat(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CellFile {
    Notebook { cells: Vec<Cell> },
    List(Vec<Cell>),
}

/// Segment counts for one rendered unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SegmentCounts {
    /// Code segments.
    pub code: usize,
    /// Comment segments.
    pub comment: usize,
    /// Escape segments.
    pub escape: usize,
}

impl fmt::Display for SegmentCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} code, {} comment, {} escape",
            self.code, self.comment, self.escape
        )
    }
}

/// Renders a unit by splitting it. Counts its own invocations.
pub struct SegmentCounter {
    markers: Markers,
    calls: usize,
}

impl SegmentCounter {
    /// Creates a counter that splits with `markers`.
    pub fn new(markers: Markers) -> Self {
        Self { markers, calls: 0 }
    }

    /// How many units have actually been rendered.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl Render for SegmentCounter {
    type Output = SegmentCounts;
    type Error = ParseError;

    fn render(&mut self, unit: &Unit<'_>) -> Result<SegmentCounts, ParseError> {
        self.calls += 1;
        let mut counts = SegmentCounts::default();
        for segment in splitter(unit.source, &self.markers)? {
            match segment.kind {
                SegmentKind::Code => counts.code += 1,
                SegmentKind::Comment => counts.comment += 1,
                SegmentKind::Escape => counts.escape += 1,
            }
        }
        Ok(counts)
    }
}

/// How a replayed unit was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// The renderer ran.
    Run,
    /// A cached result was reused.
    Hit,
    /// The gate short-circuited the unit.
    Aborted,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Run => "run",
            Status::Hit => "hit",
            Status::Aborted => "aborted",
        })
    }
}

/// One line of replay output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayRow {
    /// 1-indexed pass number.
    pub pass: usize,
    /// Position within the pass.
    pub position: usize,
    /// How the outcome was produced.
    pub status: Status,
    /// The outcome.
    pub outcome: Outcome<SegmentCounts>,
}

impl fmt::Display for ReplayRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pass {} #{:<3} {:<7} {}",
            self.pass,
            self.position,
            self.status.to_string(),
            self.outcome
        )
    }
}

/// Runs `folio replay`.
pub fn run(
    args: &ReplayArgs,
    global: &GlobalArgs,
    config: &FolioConfig,
) -> Result<i32, Box<dyn std::error::Error>> {
    let cells = load_cells(Path::new(&args.cells))?;
    let rows = replay(&args.cells, &cells, args.passes, markers(config)?)?;
    if !global.quiet {
        for row in &rows {
            println!("{row}");
        }
    }
    Ok(0)
}

/// Reads a replay file.
pub fn load_cells(path: &Path) -> Result<Vec<Cell>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    parse_cells(&content)
}

/// Parses replay JSON.
pub fn parse_cells(content: &str) -> Result<Vec<Cell>, Box<dyn std::error::Error>> {
    let file: CellFile = serde_json::from_str(content)?;
    Ok(match file {
        CellFile::Notebook { cells } | CellFile::List(cells) => cells,
    })
}

/// Runs `passes` passes over `cells` of `artifact`.
///
/// A parse failure in any unit aborts the replay with an error naming the
/// unit's position.
pub fn replay(
    artifact: &str,
    cells: &[Cell],
    passes: usize,
    markers: Markers,
) -> Result<Vec<ReplayRow>, Box<dyn std::error::Error>> {
    let mut pipeline = Pipeline::new(STREAM, SegmentCounter::new(markers));
    let mut state = PassState::new();
    let sources: Vec<String> = cells.iter().map(|c| c.source.text()).collect();
    let mut rows = Vec::with_capacity(cells.len() * passes);

    for pass in 1..=passes {
        state.begin_pass();
        tracing::debug!(pass, units = cells.len(), "starting pass");
        for (cell, source) in cells.iter().zip(&sources) {
            let position = state.position();
            let unit = Unit::with_metadata(source, &cell.metadata);
            let calls_before = pipeline.renderer().calls();
            let outcome = pipeline
                .run(&mut state, artifact, &unit)
                .map_err(|e| format!("unit {position}: {e}"))?;
            let status = if pipeline.renderer().calls() > calls_before {
                Status::Run
            } else if outcome.is_aborted() {
                Status::Aborted
            } else {
                Status::Hit
            };
            rows.push(ReplayRow {
                pass,
                position,
                status,
                outcome,
            });
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn statuses(rows: &[ReplayRow], pass: usize) -> Vec<Status> {
        rows.iter()
            .filter(|r| r.pass == pass)
            .map(|r| r.status)
            .collect()
    }

    #[test]
    fn parses_list_and_notebook() {
        let list = parse_cells(r#"[{"source": "x = 1"}]"#).unwrap();
        assert_eq!(list.len(), 1);
        let notebook = parse_cells(
            r##"{"cells": [{"source": ["# hi\n", "x = 1\n"], "metadata": {}}], "nbformat": 4}"##,
        )
        .unwrap();
        assert_eq!(notebook[0].source.text(), "# hi\nx = 1\n");
    }

    #[test]
    fn second_pass_reuses() {
        let cells = parse_cells(r##"[{"source": "# a\nx = 1\n"}, {"source": "y = 2\n"}]"##).unwrap();
        let rows = replay("doc.json", &cells, 2, Markers::default()).unwrap();
        assert_eq!(statuses(&rows, 1), vec![Status::Run, Status::Run]);
        assert_eq!(statuses(&rows, 2), vec![Status::Hit, Status::Hit]);
        assert_eq!(
            rows[0].outcome,
            Outcome::Rendered(SegmentCounts {
                code: 1,
                comment: 1,
                escape: 0
            })
        );
    }

    #[test]
    fn abort_option_skips_rest_of_first_pass() {
        let cells = parse_cells(
            r#"[
                {"source": "a = 1", "metadata": {"folio": {"options": ["abort"]}}},
                {"source": "b = 2"},
                {"source": "c = 3"}
            ]"#,
        )
        .unwrap();
        let rows = replay("doc.json", &cells, 1, Markers::default()).unwrap();
        assert_eq!(
            statuses(&rows, 1),
            vec![Status::Run, Status::Aborted, Status::Aborted]
        );
        assert_eq!(rows[1].to_string(), "pass 1 #1   aborted **Aborted**");
    }

    #[test]
    fn clear_option_reruns_every_pass() {
        let cells = parse_cells(
            r#"[{"source": "a = 1", "metadata": {"folio": {"options": ["clear"]}}}]"#,
        )
        .unwrap();
        let rows = replay("doc.json", &cells, 3, Markers::default()).unwrap();
        assert!(rows.iter().all(|r| r.status == Status::Run));
    }

    #[test]
    fn parse_failure_names_position() {
        let cells = parse_cells(r#"[{"source": "x = 1"}, {"source": "y = ("}]"#).unwrap();
        let err = replay("doc.json", &cells, 1, Markers::default()).unwrap_err();
        assert!(err.to_string().starts_with("unit 1:"));
    }

    #[test]
    fn run_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cells.json");
        std::fs::write(&path, r#"[{"source": "x = 1"}]"#).unwrap();
        let args = ReplayArgs {
            cells: path.display().to_string(),
            passes: 2,
        };
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: None,
        };
        assert_eq!(run(&args, &global, &FolioConfig::default()).unwrap(), 0);
    }
}
