//=========================================================================
// Frame Runtime Engine
//
// Main entry point: owns the engine state, the frame clock and the
// launched program, and runs one tick per host frame.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──tick(ts)──>  [one frame]
//         │                          │
//         ├─ with_viewport()         ├─ launch(program)
//         ├─ with_throttle()         ├─ start() / stop()
//         ├─ with_renderer()         └─ run()  (winit window)
//         ├─ with_input()
//         └─ with_image_loader()
// ```
//
// Tick order:
//   1. run state check
//   2. record timestamp, advance engine time
//   3. apply host events (input, interactions, image loads)
//   4. fire due timers
//   5. redraw (first tick after launch) or on_frame
//   6. repaint
//   7. frame counters, optional throttle
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::thread;
use std::time::Duration;

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Sender};
use log::{debug, error, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::context::SystemStats;
use crate::core::device::{DeviceSubscriptions, InputSource};
use crate::core::entity::EntityRegistry;
use crate::core::error::EngineResult;
use crate::core::features;
use crate::core::frame_clock::{FrameClock, RunState, TickControl};
use crate::core::loader::{FileImageLoader, ImageLoader};
use crate::core::platform_bridge::{EventCollector, HostEvent};
use crate::core::program::{Program, ProgramInfo, ProgramSession, Session};
use crate::core::render::{HeadlessRenderer, Renderer};
use crate::core::state::{EngineState, Services};
use crate::core::viewport::Viewport;
use crate::platform::{Platform, PlatformError};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Viewport**: 800 × 600
/// - **Throttle**: none
/// - **Renderer**: [`HeadlessRenderer`]
/// - **Input**: [`DeviceSubscriptions`]
/// - **Image loader**: [`FileImageLoader`]
///
/// # Examples
///
/// ```no_run
/// use frame_runtime::EngineBuilder;
/// use std::time::Duration;
///
/// let engine = EngineBuilder::new()
///     .with_viewport(1280.0, 720.0)
///     .with_throttle(Duration::from_millis(100))   // slow motion
///     .build();
/// ```
pub struct EngineBuilder {
    width: f64,
    height: f64,
    throttle: Option<Duration>,
    renderer: Option<Box<dyn Renderer>>,
    input: Option<Box<dyn InputSource>>,
    loader: Option<Box<dyn ImageLoader>>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            throttle: None,
            renderer: None,
            input: None,
            loader: None,
        }
    }

    /// Sets the container size the viewport is fitted into.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        assert!(
            width > 0.0 && height > 0.0,
            "Viewport must be positive, got {}x{}",
            width,
            height
        );
        self.width = width;
        self.height = height;
        self
    }

    /// Sleeps `throttle` after every tick. Debugging aid.
    ///
    /// The sleep blocks the calling thread; under [`Engine::run`] that is
    /// the window thread, so input is not read while throttled.
    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = Some(throttle);
        self
    }

    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn with_input(mut self, input: impl InputSource + 'static) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    pub fn with_image_loader(mut self, loader: impl ImageLoader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    /// Builds an idle engine with no program loaded.
    pub fn build(self) -> Engine {
        info!(
            "Building engine (viewport: {}x{}, throttle: {:?})",
            self.width, self.height, self.throttle
        );

        let (host, receiver) = unbounded();
        let services = Services::new(
            self.renderer
                .unwrap_or_else(|| Box::new(HeadlessRenderer::new())),
            self.input
                .unwrap_or_else(|| Box::new(DeviceSubscriptions::new())),
            self.loader.unwrap_or_else(|| Box::new(FileImageLoader)),
            host.clone(),
            Viewport::new(self.width, self.height),
        );

        Engine {
            state: EngineState::new(services),
            clock: FrameClock::new(),
            session: None,
            collector: EventCollector::new(receiver),
            host,
            container: (self.width, self.height),
            throttle: self.throttle,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Frame runtime hosting one program at a time.
///
/// # Examples
///
/// Driving ticks by hand:
/// ```
/// use frame_runtime::prelude::*;
///
/// # #[derive(Clone)]
/// # struct Idle;
/// # impl Program for Idle {
/// #     type State = ();
/// #     fn info(&self) -> ProgramInfo { ProgramInfo::new("idle") }
/// #     fn create(&self) {}
/// #     fn redraw(&self, _: &mut RedrawContext<'_>, _: &()) -> EngineResult<()> { Ok(()) }
/// #     fn on_frame(&self, _: &mut UpdateContext<'_>, s: ()) -> EngineResult<()> { Ok(s) }
/// # }
/// let mut engine = EngineBuilder::new().build();
/// engine.launch(Idle)?;
/// engine.start();
///
/// assert_eq!(engine.tick(0.0)?, TickControl::Continue);
/// engine.stop();
/// assert_eq!(engine.tick(16.0)?, TickControl::Exit);
/// # Ok::<(), EngineError>(())
/// ```
pub struct Engine {
    state: EngineState,
    clock: FrameClock,
    session: Option<Box<dyn Session>>,
    collector: EventCollector,
    host: Sender<HostEvent>,
    container: (f64, f64),
    throttle: Option<Duration>,
}

impl Engine {
    //--- Programs ---------------------------------------------------------

    /// Loads `program`, replacing the current one.
    ///
    /// The previous program's entities are torn down and session
    /// counters reset; engine-lifetime counters carry on. `redraw` runs
    /// on the next tick.
    ///
    /// # Errors
    ///
    /// Fails without touching the current program if `program` needs a
    /// feature this engine lacks.
    pub fn launch<P: Program>(&mut self, program: P) -> EngineResult<()> {
        let info = program.info();
        features::check(&info)?;

        self.unload();

        let (width, height) = self.container;
        self.state.services.viewport = Viewport::fit(width, height, info.aspect_ratio);
        self.clock.reset_session();

        info!(
            "Launching {} (context {})",
            info.name,
            info.context_revision.name()
        );
        self.session = Some(Box::new(ProgramSession::new(program, info)));
        Ok(())
    }

    fn unload(&mut self) {
        if let Some(session) = self.session.take() {
            info!("Tearing down {}", session.info().name);
            self.state.teardown();
        }
    }

    pub fn program_info(&self) -> Option<&ProgramInfo> {
        self.session.as_ref().map(|s| s.info())
    }

    //--- Run State --------------------------------------------------------

    /// Starts (or resumes) ticking.
    pub fn start(&mut self) {
        info!("Engine running");
        self.clock.start();
    }

    /// Stops ticking. A tick already in progress completes.
    pub fn stop(&mut self) {
        if self.clock.is_running() {
            info!("Engine stopped");
        }
        self.clock.stop();
    }

    pub fn run_state(&self) -> RunState {
        self.clock.state()
    }

    //--- Frame ------------------------------------------------------------

    /// Runs one frame at host time `timestamp` (ms).
    ///
    /// Returns [`TickControl::Exit`] once the engine is stopped.
    ///
    /// # Errors
    ///
    /// A program callback error stops the engine, unloads the program
    /// and is returned here.
    pub fn tick(&mut self, timestamp: f64) -> EngineResult<TickControl> {
        if !self.clock.is_running() {
            return Ok(TickControl::Exit);
        }
        self.clock.begin_frame(timestamp);
        let now = self.clock.now();

        for event in self.collector.collect_frame().drain(..) {
            self.state.dispatch(event);
        }
        self.state.fire_due_timers(now);

        let system = self.clock.stats(&self.state.services.viewport);
        let result = match self.session.as_mut() {
            Some(session) => session.frame(&mut self.state, system),
            None => Ok(()),
        };
        if let Err(e) = result {
            if let Some(info) = self.program_info() {
                error!("Program {} failed: {}", info.name, e);
            }
            self.stop();
            self.unload();
            return Err(e);
        }

        self.state.services.renderer.repaint();
        self.clock.end_frame();

        if let Some(throttle) = self.throttle {
            trace!("Throttling for {:?}", throttle);
            thread::sleep(throttle);
        }

        Ok(if self.clock.is_running() {
            TickControl::Continue
        } else {
            TickControl::Exit
        })
    }

    /// Frames per second since the previous call, in engine time.
    pub fn report_fps(&mut self) -> f64 {
        let fps = self.clock.report_fps();
        debug!("FPS: {:.1}", fps);
        fps
    }

    pub fn stats(&self) -> SystemStats {
        self.clock.stats(&self.state.services.viewport)
    }

    //--- Host Integration -------------------------------------------------

    /// Sender for host messages, applied at the top of the next tick.
    pub fn host_sender(&self) -> Sender<HostEvent> {
        self.host.clone()
    }

    /// Refits the viewport to a new container size.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.container = (width, height);
        let ratio = self.program_info().and_then(|info| info.aspect_ratio);
        self.state.services.viewport = Viewport::fit(width, height, ratio);
        debug!("Viewport now {:?}", self.state.services.viewport);
    }

    pub fn viewport(&self) -> Viewport {
        self.state.services.viewport
    }

    /// Read access to the live entities.
    pub fn registry(&self) -> &EntityRegistry {
        &self.state.registry
    }

    //--- Execution --------------------------------------------------------

    /// Opens a window and drives ticks from its redraws until it closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    pub fn run(self) -> Result<(), PlatformError> {
        info!("Starting windowed host");
        Platform::new(self).run()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
