//=========================================================================
// Platform Subsystem
//
// Windowed host: drives the engine from a Winit event loop.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌────────────────────────────────────────────┐
//  │  Winit Event Loop                          │
//  │   ├─ KeyboardInput / MouseInput / Touch    │
//  │   │    ↓                                   │
//  │   │  InputProcessor ──HostEvent──> channel │
//  │   ├─ Resized ──> Engine::resize            │
//  │   └─ RedrawRequested ──> Engine::tick(ms)  │
//  │                          ↓                 │
//  │                    (drains channel)        │
//  └────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: one engine tick per redraw,
//   timestamped with milliseconds since the platform was created
// - **Channel, not direct calls**: input reaches the engine through the
//   same host channel as image loads, so all of it is applied at the top
//   of a tick
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;
mod input_processor;
mod swipe;

//=== Standard Library Imports ============================================

use std::time::Instant;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::*;
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    error::EventLoopError,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::frame_clock::TickControl;
use crate::core::platform_bridge::HostEvent;
use crate::engine::Engine;
use input_processor::InputProcessor;

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are fatal: without an event loop the engine cannot run.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[source] EventLoopError),

    /// Event loop execution error.
    #[error("event loop error: {0}")]
    EventLoopExecution(#[source] EventLoopError),
}

//=== Platform ============================================================

/// Window owner and tick driver.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(engine)`
/// 2. **Execution**: `platform.run()` blocks in the event loop
/// 3. **Window**: created in `resumed()`, which also starts the engine
/// 4. **Shutdown**: close request stops the engine and exits the loop
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    engine: Engine,

    /// Host channel into the engine.
    host: Sender<HostEvent>,

    input_processor: InputProcessor,

    /// Zero point of tick timestamps.
    epoch: Instant,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Does not create the window yet; that happens in `resumed()`.
    pub fn new(engine: Engine) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        let host = engine.host_sender();
        Self {
            window: None,
            engine,
            host,
            input_processor: InputProcessor::new(),
            epoch: Instant::now(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    fn send(&self, event: Option<HostEvent>) {
        let Some(event) = event else {
            return;
        };
        trace!(target: "platform::input", "Forwarding {:?}", event);
        if self.host.send(event).is_err() {
            warn!(target: "platform::input", "Host channel disconnected, dropping input");
        }
    }

    fn timestamp(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    fn window_title(&self) -> String {
        match self.engine.program_info() {
            Some(info) => info.name.clone(),
            None => "Frame Runtime".to_string(),
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let viewport = self.engine.viewport();
        let attrs = WindowAttributes::default()
            .with_title(self.window_title())
            .with_inner_size(LogicalSize::new(viewport.width, viewport.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                self.engine
                    .resize(f64::from(size.width), f64::from(size.height));
                self.engine.start();
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.engine.stop();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                self.engine
                    .resize(f64::from(size.width), f64::from(size.height));
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.input_processor
                    .process_cursor_moved(position.x, position.y);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                let event = self
                    .input_processor
                    .process_key(&key_event.logical_key, key_event.state);
                self.send(event);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(*button, *state);
                self.send(event);
            }

            WindowEvent::Touch(touch) => {
                let event = self.input_processor.process_touch(touch);
                self.send(event);
            }

            WindowEvent::RedrawRequested => {
                let timestamp = self.timestamp();
                match self.engine.tick(timestamp) {
                    Ok(TickControl::Continue) => {
                        if let Some(window) = &self.window {
                            window.request_redraw();
                        }
                    }
                    Ok(TickControl::Exit) => {
                        debug!(target: "platform", "Engine stopped, no further redraws");
                    }
                    Err(e) => {
                        error!(target: "platform", "Engine failed: {}", e);
                        event_loop.exit();
                    }
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
