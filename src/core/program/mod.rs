//=========================================================================
// Programs
//=========================================================================
//
// The contract a hosted program implements, plus the engine-side
// session that drives it.
//
// Lifecycle of one launch:
//   create() ─> state
//   first tick:        redraw(RedrawContext, &state)
//   every later tick:  state = on_frame(UpdateContext, state)
//
//=========================================================================

//=== Module Declarations =================================================

mod catalog;

//=== Public API ==========================================================

pub use catalog::ProgramCatalog;

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::context::{ContextRevision, RedrawContext, SystemStats, UpdateContext};
use super::error::EngineResult;
use super::state::EngineState;
use super::viewport::AspectRatio;

//=== Program Trait =======================================================

/// An interactive program run by the engine.
///
/// The engine owns the state between ticks and never looks inside it.
///
/// # Example
///
/// ```rust
/// use frame_runtime::prelude::*;
///
/// struct Hello;
///
/// impl Program for Hello {
///     type State = ();
///
///     fn info(&self) -> ProgramInfo {
///         ProgramInfo::new("hello").with_feature_tags(["shape:text"])
///     }
///
///     fn create(&self) -> Self::State {}
///
///     fn redraw(&self, ctx: &mut RedrawContext<'_>, _state: &()) -> EngineResult<()> {
///         ctx.create("text%hello%0", EntityKind::Text, &Config::new().with("text", "Hello"))
///     }
///
///     fn on_frame(&self, _ctx: &mut UpdateContext<'_>, state: ()) -> EngineResult<()> {
///         Ok(state)
///     }
/// }
/// ```
pub trait Program: 'static {
    type State: 'static;

    /// Metadata used for feature checks and viewport fitting.
    fn info(&self) -> ProgramInfo;

    /// Builds the initial state. Called once per launch.
    fn create(&self) -> Self::State;

    /// Builds the initial scene. Runs exactly once per launch, on the
    /// first tick.
    fn redraw(&self, ctx: &mut RedrawContext<'_>, state: &Self::State) -> EngineResult<()>;

    /// Advances the program by one frame.
    fn on_frame(&self, ctx: &mut UpdateContext<'_>, state: Self::State) -> EngineResult<Self::State>;
}

//=== ProgramInfo =========================================================

/// Program metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramInfo {
    pub name: String,
    pub description: String,

    /// Requested viewport proportion; `None` fills the container.
    pub aspect_ratio: Option<AspectRatio>,

    /// Engine features the program relies on.
    pub feature_tags: Vec<String>,

    pub context_revision: ContextRevision,
}

impl ProgramInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            aspect_ratio: None,
            feature_tags: Vec::new(),
            context_revision: ContextRevision::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_aspect_ratio(mut self, width: f64, height: f64) -> Self {
        self.aspect_ratio = Some(AspectRatio::new(width, height));
        self
    }

    pub fn with_feature_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.feature_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_context_revision(mut self, revision: ContextRevision) -> Self {
        self.context_revision = revision;
        self
    }
}

//=== Session =============================================================

/// A launched program with its state, erased over the program type.
pub(crate) trait Session {
    fn info(&self) -> &ProgramInfo;

    /// Runs `redraw` on the first call and `on_frame` afterwards.
    fn frame(&mut self, state: &mut EngineState, system: SystemStats) -> EngineResult<()>;
}

pub(crate) struct ProgramSession<P: Program> {
    program: P,
    info: ProgramInfo,
    state: Option<P::State>,
    needs_redraw: bool,
}

impl<P: Program> ProgramSession<P> {
    pub fn new(program: P, info: ProgramInfo) -> Self {
        let state = program.create();
        Self {
            program,
            info,
            state: Some(state),
            needs_redraw: true,
        }
    }
}

impl<P: Program> Session for ProgramSession<P> {
    fn info(&self) -> &ProgramInfo {
        &self.info
    }

    fn frame(&mut self, state: &mut EngineState, system: SystemStats) -> EngineResult<()> {
        let revision = self.info.context_revision;

        if self.needs_redraw {
            self.needs_redraw = false;
            let Some(current) = self.state.as_ref() else {
                return Ok(());
            };
            debug!("Redrawing {}", self.info.name);
            let mut ctx = RedrawContext::new(state, revision, system);
            return self.program.redraw(&mut ctx, current);
        }

        // State is absent only after a failed on_frame; the engine
        // unloads the session in that case.
        let Some(current) = self.state.take() else {
            return Ok(());
        };
        let mut ctx = UpdateContext::new(state, revision, system);
        self.state = Some(self.program.on_frame(&mut ctx, current)?);
        Ok(())
    }
}
