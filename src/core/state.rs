//=========================================================================
// Engine State
//=========================================================================
//
// Everything the per-frame context reads or writes, owned in one place.
//
// Architecture:
//   EngineState
//     ├─ registry: EntityRegistry   (entities + event queues)
//     └─ services: Services
//          ├─ timers:   TimerScheduler
//          ├─ renderer: Box<dyn Renderer>
//          ├─ input:    Box<dyn InputSource>
//          ├─ loader:   Box<dyn ImageLoader>
//          └─ host:     Sender<HostEvent> (handed to loaders)
//
// The registry borrows `services` for each call, so each field has a
// single writer at any time.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use log::trace;

//=== Internal Dependencies ===============================================

use super::config::Config;
use super::device::InputSource;
use super::entity::{EntityKind, EntityRegistry};
use super::error::EngineResult;
use super::event::{EventKind, EventPayload};
use super::loader::{ImageLoader, LoadTicket};
use super::platform_bridge::HostEvent;
use super::render::{DrawableId, Renderer};
use super::timer::TimerScheduler;
use super::viewport::Viewport;

//=== Services ============================================================

/// Collaborators and id counters lent to the registry.
pub(crate) struct Services {
    pub timers: TimerScheduler,
    pub renderer: Box<dyn Renderer>,
    pub input: Box<dyn InputSource>,
    pub loader: Box<dyn ImageLoader>,
    pub host: Sender<HostEvent>,
    pub viewport: Viewport,
    next_drawable: u64,
    next_ticket: u64,
}

impl Services {
    pub fn new(
        renderer: Box<dyn Renderer>,
        input: Box<dyn InputSource>,
        loader: Box<dyn ImageLoader>,
        host: Sender<HostEvent>,
        viewport: Viewport,
    ) -> Self {
        Self {
            timers: TimerScheduler::new(),
            renderer,
            input,
            loader,
            host,
            viewport,
            next_drawable: 0,
            next_ticket: 0,
        }
    }

    pub fn next_drawable(&mut self) -> DrawableId {
        self.next_drawable += 1;
        DrawableId(self.next_drawable)
    }

    pub fn next_ticket(&mut self) -> LoadTicket {
        self.next_ticket += 1;
        LoadTicket(self.next_ticket)
    }
}

//=== EngineState =========================================================

/// Registry plus collaborators; the mutable half of the engine.
pub(crate) struct EngineState {
    pub registry: EntityRegistry,
    pub services: Services,
}

impl EngineState {
    pub fn new(services: Services) -> Self {
        Self {
            registry: EntityRegistry::new(),
            services,
        }
    }

    //--- Context Operations -----------------------------------------------

    pub fn create(
        &mut self,
        identifier: &str,
        kind: EntityKind,
        config: &Config,
        now: f64,
    ) -> EngineResult<()> {
        self.registry
            .create(identifier, kind, config, &mut self.services, now)
    }

    pub fn update(&mut self, identifier: &str, config: &Config, now: f64) -> EngineResult<()> {
        self.registry
            .update(identifier, config, &mut self.services, now)
    }

    pub fn remove(&mut self, identifier: &str) -> EngineResult<()> {
        self.registry.remove(identifier, &mut self.services)
    }

    pub fn dequeue(
        &mut self,
        identifier: &str,
        kind: EventKind,
        now: f64,
    ) -> EngineResult<Option<EventPayload>> {
        self.registry.dequeue(identifier, kind, now)
    }

    //--- Tick Phases ------------------------------------------------------

    /// Applies one host message.
    pub fn dispatch(&mut self, event: HostEvent) {
        trace!("Host event: {:?}", event);
        match event {
            HostEvent::Device { kind, payload } => self.registry.route_device(kind, payload),
            HostEvent::Interaction {
                drawable,
                kind,
                payload,
            } => self.registry.route_interaction(drawable, kind, payload),
            HostEvent::ImageLoaded { ticket, result } => {
                self.registry
                    .complete_image(ticket, result, &mut self.services)
            }
        }
    }

    pub fn fire_due_timers(&mut self, now: f64) {
        self.registry.fire_due_timers(&mut self.services, now);
    }

    /// Removes every entity and drops every pending timer fire.
    pub fn teardown(&mut self) {
        self.registry.clear(&mut self.services);
        self.services.timers.clear();
    }
}
