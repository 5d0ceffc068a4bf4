//! Conformance test helpers for folio.
//!
//! Provides shared functions that run source text through the splitter and
//! units through the run-control pipeline, returning plain values for
//! assertion in integration tests.

#![warn(missing_docs)]

use folio_config::FolioConfig;
use folio_runctl::{Outcome, PassState, Pipeline, Render, Unit};
use folio_script::{split_source, splitter, Markers, ParseError, SegmentKind};

/// Result of splitting one source.
pub struct SplitResult {
    /// Classified segments as `(kind, text)`.
    pub segments: Vec<(SegmentKind, String)>,
    /// Texts of the raw partition, terminators included.
    pub raw: Vec<String>,
    /// Whether an escape run was still open at the end.
    pub unterminated_escape: bool,
}

impl SplitResult {
    /// Segment kinds in order.
    pub fn kinds(&self) -> Vec<SegmentKind> {
        self.segments.iter().map(|(kind, _)| *kind).collect()
    }
}

/// Parses a `folio.toml` snippet.
pub fn make_config(toml_str: &str) -> FolioConfig {
    folio_config::load_config_from_str(toml_str).unwrap()
}

/// Splits `source` with the default markers.
pub fn split_default(source: &str) -> Result<SplitResult, ParseError> {
    split_with_markers(source, &Markers::default())
}

/// Splits `source` with the markers configured in `config`.
pub fn split_with_config(source: &str, config: &FolioConfig) -> Result<SplitResult, ParseError> {
    let markers = Markers::from_config(&config.script).unwrap();
    split_with_markers(source, &markers)
}

/// Splits `source` with explicit markers.
pub fn split_with_markers(source: &str, markers: &Markers) -> Result<SplitResult, ParseError> {
    let raw = split_source(source)?.map(|s| s.text.to_string()).collect();
    let mut split = splitter(source, markers)?;
    let segments = split
        .by_ref()
        .map(|s| (s.kind, s.text.into_owned()))
        .collect();
    Ok(SplitResult {
        segments,
        raw,
        unterminated_escape: split.unterminated_escape().is_some(),
    })
}

/// A renderer that echoes unit sources and records every invocation.
///
/// A unit whose source is `"fail"` produces an error.
#[derive(Default)]
pub struct Recorder {
    /// Sources rendered, in call order.
    pub rendered: Vec<String>,
}

impl Render for Recorder {
    type Output = String;
    type Error = String;

    fn render(&mut self, unit: &Unit<'_>) -> Result<String, String> {
        self.rendered.push(unit.source.to_string());
        if unit.source == "fail" {
            return Err(format!("cannot render {}", unit.source));
        }
        Ok(format!("rendered({})", unit.source))
    }
}

/// Runs one full pass of `units` over `artifact`.
pub fn run_pass(
    pipeline: &mut Pipeline<Recorder>,
    state: &mut PassState<String>,
    artifact: &str,
    units: &[Unit<'_>],
) -> Vec<Outcome<String>> {
    state.begin_pass();
    units
        .iter()
        .map(|unit| pipeline.run(state, artifact, unit).unwrap())
        .collect()
}

/// Renders an outcome list as display strings.
pub fn texts(outcomes: &[Outcome<String>]) -> Vec<String> {
    outcomes.iter().map(ToString::to_string).collect()
}
