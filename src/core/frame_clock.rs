//=========================================================================
// Frame Clock
//=========================================================================
//
// Run state and timing bookkeeping for the frame loop.
//
// Two sets of counters are kept:
// - session: reset whenever a program is (re)launched
// - engine:  monotonic over the engine's lifetime; timers and FPS use it
//
// Time only advances between two ticks of the same run. Stopping and
// starting again resets the reference timestamp, so the stopped span
// is never counted.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::context::SystemStats;
use super::viewport::Viewport;

//=== RunState ============================================================

/// Lifecycle of the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Built, never started.
    Idle,
    Running,
    /// Stopped; `start` resumes.
    Stopped,
}

//=== TickControl =========================================================

/// Tells the host whether to keep driving ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== FrameClock ==========================================================

#[derive(Debug)]
pub(crate) struct FrameClock {
    state: RunState,
    last_timestamp: Option<f64>,
    timestamp: f64,

    frame_count: u64,
    elapsed_ms: f64,
    engine_frame_count: u64,
    engine_elapsed_ms: f64,

    // FPS window start
    fps_frames: u64,
    fps_elapsed_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            state: RunState::Idle,
            last_timestamp: None,
            timestamp: 0.0,
            frame_count: 0,
            elapsed_ms: 0.0,
            engine_frame_count: 0,
            engine_elapsed_ms: 0.0,
            fps_frames: 0,
            fps_elapsed_ms: 0.0,
        }
    }

    //--- Run State --------------------------------------------------------

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn start(&mut self) {
        self.state = RunState::Running;
        self.last_timestamp = None;
    }

    pub fn stop(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Stopped;
        }
    }

    //--- Per Tick ---------------------------------------------------------

    /// Records the tick timestamp and advances both elapsed counters by
    /// the time since the previous tick of this run.
    pub fn begin_frame(&mut self, timestamp: f64) {
        let delta = match self.last_timestamp {
            Some(last) => (timestamp - last).max(0.0),
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp);
        self.timestamp = timestamp;
        self.elapsed_ms += delta;
        self.engine_elapsed_ms += delta;
    }

    pub fn end_frame(&mut self) {
        self.frame_count += 1;
        self.engine_frame_count += 1;
    }

    /// Engine time of the current tick (ms).
    pub fn now(&self) -> f64 {
        self.engine_elapsed_ms
    }

    pub fn reset_session(&mut self) {
        self.frame_count = 0;
        self.elapsed_ms = 0.0;
    }

    pub fn stats(&self, viewport: &Viewport) -> SystemStats {
        SystemStats {
            timestamp: self.timestamp,
            frame_count: self.frame_count,
            elapsed_ms: self.elapsed_ms,
            engine_frame_count: self.engine_frame_count,
            engine_elapsed_ms: self.engine_elapsed_ms,
            width: viewport.width,
            height: viewport.height,
            aspect_ratio: viewport.aspect_ratio(),
        }
    }

    //--- FPS --------------------------------------------------------------

    /// Frames per second since the previous report, in engine time.
    /// Zero when no engine time has passed.
    pub fn report_fps(&mut self) -> f64 {
        let frames = self.engine_frame_count - self.fps_frames;
        let seconds = (self.engine_elapsed_ms - self.fps_elapsed_ms) / 1000.0;

        self.fps_frames = self.engine_frame_count;
        self.fps_elapsed_ms = self.engine_elapsed_ms;

        if seconds > 0.0 {
            frames as f64 / seconds
        } else {
            0.0
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
