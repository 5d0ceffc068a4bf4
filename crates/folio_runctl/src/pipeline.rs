//! Ordered stages in front of a renderer.

use serde_json::Value;

use crate::cache::RunCache;
use crate::gate::AbortGate;
use crate::options::Options;
use crate::outcome::Outcome;
use crate::pass::{PassState, StreamState};

/// One content unit as seen by the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unit<'a> {
    /// The unit's source snapshot.
    pub source: &'a str,
    /// Run-control options.
    pub options: Options,
}

impl<'a> Unit<'a> {
    /// A unit with no options.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            options: Options::default(),
        }
    }

    /// A unit whose options come from its metadata.
    pub fn with_metadata(source: &'a str, metadata: &Value) -> Self {
        Self::new(source).with_options(Options::from_metadata(metadata))
    }

    /// Replaces the options.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }
}

/// The step that turns a unit into a result.
pub trait Render {
    /// What a successful render produces.
    type Output: Clone;
    /// What a failed render reports.
    type Error;

    /// Renders one unit.
    fn render(&mut self, unit: &Unit<'_>) -> Result<Self::Output, Self::Error>;
}

/// A run-control step that wraps everything after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Memoize by artifact, position and source snapshot.
    Cache,
    /// Short-circuit to [`Outcome::Aborted`] after an `abort` unit.
    Gate,
}

/// A render stream: an identity, its stage list and the renderer.
pub struct Pipeline<Rd: Render> {
    stream: String,
    stages: Vec<Stage>,
    renderer: Rd,
}

impl<Rd: Render> Pipeline<Rd> {
    /// Stages used by [`Pipeline::new`].
    pub const DEFAULT_STAGES: [Stage; 2] = [Stage::Cache, Stage::Gate];

    /// A pipeline with the cache in front of the gate.
    pub fn new(stream: impl Into<String>, renderer: Rd) -> Self {
        Self::with_stages(stream, Self::DEFAULT_STAGES.to_vec(), renderer)
    }

    /// A pipeline with an explicit stage order. The first stage is outermost.
    pub fn with_stages(stream: impl Into<String>, stages: Vec<Stage>, renderer: Rd) -> Self {
        Self {
            stream: stream.into(),
            stages,
            renderer,
        }
    }

    /// The stream identity keying this pipeline's cache and gate.
    pub fn stream(&self) -> &str {
        &self.stream
    }

    /// The stage order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// The wrapped renderer.
    pub fn renderer(&self) -> &Rd {
        &self.renderer
    }

    /// Processes the next unit of `artifact`.
    ///
    /// Takes and advances the pass position even when rendering fails.
    /// Renderer errors propagate untouched.
    pub fn run(
        &mut self,
        pass: &mut PassState<Rd::Output>,
        artifact: &str,
        unit: &Unit<'_>,
    ) -> Result<Outcome<Rd::Output>, Rd::Error> {
        let position = pass.advance();
        let gated = self.stages.contains(&Stage::Gate);
        let StreamState { cache, gate } = pass.stream_mut(&self.stream);
        // A cache hit skips the gate stage; the pass start and an abort
        // request still apply to the gate.
        if gated {
            gate.observe(position);
        }
        let outcome = Call {
            renderer: &mut self.renderer,
            cache: Some(cache),
            gate: &*gate,
            artifact,
            position,
        }
        .dispatch(&self.stages, unit)?;
        if gated && unit.options.abort {
            tracing::debug!(stream = %self.stream, position, "abort requested");
            gate.trip();
        }
        Ok(outcome)
    }
}

struct Call<'p, Rd: Render> {
    renderer: &'p mut Rd,
    cache: Option<&'p mut RunCache<Outcome<Rd::Output>>>,
    gate: &'p AbortGate,
    artifact: &'p str,
    position: usize,
}

impl<Rd: Render> Call<'_, Rd> {
    fn dispatch(
        &mut self,
        stages: &[Stage],
        unit: &Unit<'_>,
    ) -> Result<Outcome<Rd::Output>, Rd::Error> {
        match stages.split_first() {
            None => self.renderer.render(unit).map(Outcome::Rendered),
            Some((Stage::Cache, rest)) => self.cached(rest, unit),
            Some((Stage::Gate, rest)) => self.gated(rest, unit),
        }
    }

    /// A repeated `Cache` stage finds the cache taken and passes through.
    fn cached(
        &mut self,
        rest: &[Stage],
        unit: &Unit<'_>,
    ) -> Result<Outcome<Rd::Output>, Rd::Error> {
        let Some(cache) = self.cache.take() else {
            return self.dispatch(rest, unit);
        };
        let (artifact, position) = (self.artifact, self.position);
        let outcome =
            cache.render_or_reuse(artifact, position, unit, |unit| self.dispatch(rest, unit));
        self.cache = Some(cache);
        outcome
    }

    fn gated(
        &mut self,
        rest: &[Stage],
        unit: &Unit<'_>,
    ) -> Result<Outcome<Rd::Output>, Rd::Error> {
        if self.gate.is_active() {
            return self.dispatch(rest, unit);
        }
        tracing::trace!(artifact = self.artifact, position = self.position, "gate closed");
        Ok(Outcome::Aborted)
    }
}
