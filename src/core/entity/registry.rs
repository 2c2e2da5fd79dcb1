//=========================================================================
// Entity Registry
//=========================================================================
//
// Owns identifier → entity records, the stage slot, the drawable
// back-references and every event queue.
//
// Architecture:
//   slots:     HashMap<identifier, Slot>     (loading | ready)
//   loading:   HashMap<LoadTicket, identifier>
//   drawables: HashMap<DrawableId, identifier>
//   stage:     Option<identifier>
//   queues:    EventQueues
//
// Collaborators (renderer, input, loader, timer scheduler) are lent in
// through `Services` for the duration of each call; the registry never
// stores them.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashMap;

//=== External Dependencies ===============================================

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::{
    Entity, EntityKind, Lifecycle, PendingImage, Shape, ShapeKind, Slot, Timer, TimerSchedule,
};
use crate::core::config::{self, Config};
use crate::core::error::{EngineError, EngineResult};
use crate::core::event::{EventKind, EventPayload, EventQueues};
use crate::core::loader::{ImageData, LoadReply, LoadTicket};
use crate::core::render::DrawableId;
use crate::core::state::Services;

//=== EntityRegistry ======================================================

/// Registry of named entities and their event queues.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    slots: HashMap<String, Slot>,
    loading: HashMap<LoadTicket, String>,
    drawables: HashMap<DrawableId, String>,
    stage: Option<String>,
    queues: EventQueues,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Queries ----------------------------------------------------------

    /// Lifecycle state of `identifier`, or `None` if it is not registered.
    pub fn lifecycle(&self, identifier: &str) -> Option<Lifecycle> {
        self.slots.get(identifier).map(|slot| match slot {
            Slot::Loading(_) => Lifecycle::Loading,
            Slot::Ready(_) => Lifecycle::Ready,
        })
    }

    /// Identifier currently holding the stage role.
    pub fn stage(&self) -> Option<&str> {
        self.stage.as_deref()
    }

    /// Number of registered identifiers, loading ones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Event kinds `identifier` is subscribed to.
    pub fn subscriptions(&self, identifier: &str) -> Vec<EventKind> {
        self.queues.kinds(identifier)
    }

    /// Payloads waiting in `(identifier, kind)`.
    pub fn pending(&self, identifier: &str, kind: EventKind) -> usize {
        self.queues.len(identifier, kind)
    }

    /// Identifiers of every registered entity, unordered.
    pub fn identifiers(&self) -> Vec<String> {
        self.slots.keys().cloned().collect()
    }

    //--- Create -----------------------------------------------------------

    /// Creates `identifier` as `kind`.
    ///
    /// Images start out `loading`; every other kind is `ready` on return.
    /// All validation happens before any collaborator is touched.
    pub(crate) fn create(
        &mut self,
        identifier: &str,
        kind: EntityKind,
        config: &Config,
        services: &mut Services,
        now: f64,
    ) -> EngineResult<()> {
        if self.slots.contains_key(identifier) {
            return Err(EngineError::DuplicateIdentifier(identifier.to_string()));
        }
        if config.identifier(identifier)?.is_some() {
            return Err(EngineError::RenameOnCreate(identifier.to_string()));
        }

        let events = config.event_list(identifier)?;
        if let Some(&kind_rejected) = events.iter().find(|e| !kind.accepts(**e)) {
            return Err(EngineError::UnsupportedEvent {
                identifier: identifier.to_string(),
                kind: kind_rejected,
            });
        }

        match kind {
            EntityKind::Stage => self.create_stage(identifier, &events, services),
            EntityKind::Timer => self.create_timer(identifier, config, services, now),
            EntityKind::Image => self.create_image(identifier, config, events, services),
            EntityKind::Text => self.create_shape(identifier, ShapeKind::Text, config, &events, services),
            EntityKind::Rect => self.create_shape(identifier, ShapeKind::Rect, config, &events, services),
            EntityKind::Ellipse => {
                self.create_shape(identifier, ShapeKind::Ellipse, config, &events, services)
            }
            EntityKind::Line => self.create_shape(identifier, ShapeKind::Line, config, &events, services),
        }
    }

    fn create_shape(
        &mut self,
        identifier: &str,
        kind: ShapeKind,
        config: &Config,
        events: &[EventKind],
        services: &mut Services,
    ) -> EngineResult<()> {
        let drawable = services.next_drawable();
        services
            .renderer
            .add_drawable(drawable, kind, &config.attributes(), None);
        self.register_shape(identifier, Shape { kind, drawable }, events, services);
        Ok(())
    }

    fn create_stage(
        &mut self,
        identifier: &str,
        events: &[EventKind],
        services: &mut Services,
    ) -> EngineResult<()> {
        if let Some(existing) = &self.stage {
            return Err(EngineError::StageExists {
                existing: existing.clone(),
                requested: identifier.to_string(),
            });
        }

        for &kind in events {
            self.queues.subscribe(identifier, kind);
            services.input.subscribe(kind);
        }
        self.slots
            .insert(identifier.to_string(), Slot::Ready(Entity::Stage));
        self.stage = Some(identifier.to_string());

        debug!("Stage {} ready ({:?})", identifier, events);
        Ok(())
    }

    fn create_timer(
        &mut self,
        identifier: &str,
        config: &Config,
        services: &mut Services,
        now: f64,
    ) -> EngineResult<()> {
        let interval = config
            .number(identifier, config::INTERVAL)?
            .ok_or_else(|| EngineError::MissingAttribute {
                identifier: identifier.to_string(),
                kind: EntityKind::Timer,
                key: config::INTERVAL,
            })?;
        check_interval(identifier, interval)?;

        let handle = services.timers.schedule(identifier, now + interval);
        self.queues.subscribe(identifier, EventKind::Fire);
        self.slots.insert(
            identifier.to_string(),
            Slot::Ready(Entity::Timer(Timer {
                interval,
                count: 0,
                schedule: TimerSchedule::Running(handle),
            })),
        );

        debug!("Timer {} ready (interval {}ms, first fire at {})", identifier, interval, now + interval);
        Ok(())
    }

    fn create_image(
        &mut self,
        identifier: &str,
        config: &Config,
        events: Vec<EventKind>,
        services: &mut Services,
    ) -> EngineResult<()> {
        let url = config
            .text(identifier, config::URL)?
            .ok_or_else(|| EngineError::MissingAttribute {
                identifier: identifier.to_string(),
                kind: EntityKind::Image,
                key: config::URL,
            })?;

        let ticket = services.next_ticket();
        self.slots.insert(
            identifier.to_string(),
            Slot::Loading(PendingImage {
                ticket,
                attributes: config.attributes(),
                events,
            }),
        );
        self.loading.insert(ticket, identifier.to_string());

        debug!("Image {} loading from {} ({:?})", identifier, url, ticket);
        services
            .loader
            .load(url, LoadReply::new(ticket, services.host.clone()));
        Ok(())
    }

    fn register_shape(
        &mut self,
        identifier: &str,
        shape: Shape,
        events: &[EventKind],
        services: &mut Services,
    ) {
        for &kind in events {
            self.queues.subscribe(identifier, kind);
            services.renderer.listen(shape.drawable, kind);
        }
        self.drawables.insert(shape.drawable, identifier.to_string());

        debug!("{} {} ready as {:?}", shape.kind.as_str(), identifier, shape.drawable);
        self.slots
            .insert(identifier.to_string(), Slot::Ready(Entity::Shape(shape)));
    }

    /// Applies an image load result.
    ///
    /// Results for tickets nobody waits for any more (the identifier was
    /// removed, or removed and created again) are dropped. A failed load
    /// leaves the identifier loading for good; it can still be removed.
    pub(crate) fn complete_image(
        &mut self,
        ticket: LoadTicket,
        result: Result<ImageData, String>,
        services: &mut Services,
    ) {
        let Some(identifier) = self.loading.remove(&ticket) else {
            debug!("Discarding image load {:?}: identifier was removed", ticket);
            return;
        };

        let pending = match self.slots.remove(&identifier) {
            Some(Slot::Loading(pending)) if pending.ticket == ticket => pending,
            other => {
                // Ticket map and slot disagree; keep whatever is there.
                warn!("Image {} is no longer loading {:?}", identifier, ticket);
                if let Some(slot) = other {
                    self.slots.insert(identifier, slot);
                }
                return;
            }
        };

        match result {
            Ok(image) => {
                let drawable = services.next_drawable();
                services.renderer.add_drawable(
                    drawable,
                    ShapeKind::Image,
                    &pending.attributes,
                    Some(&image),
                );
                let shape = Shape {
                    kind: ShapeKind::Image,
                    drawable,
                };
                self.register_shape(&identifier, shape, &pending.events, services);
            }
            Err(reason) => {
                warn!("Image {} failed to load: {}", identifier, reason);
                self.slots.insert(identifier, Slot::Loading(pending));
            }
        }
    }

    //--- Update -----------------------------------------------------------

    /// Mutates a ready entity; renames it when `config` carries an
    /// `identifier`. A no-op while the identifier is loading.
    pub(crate) fn update(
        &mut self,
        identifier: &str,
        config: &Config,
        services: &mut Services,
        now: f64,
    ) -> EngineResult<()> {
        match self.slots.get(identifier) {
            None => return Err(EngineError::UnknownIdentifier(identifier.to_string())),
            Some(Slot::Loading(_)) => {
                trace!("Update on loading {} ignored", identifier);
                return Ok(());
            }
            Some(Slot::Ready(Entity::Stage)) => {
                return Err(EngineError::StageNotUpdatable(identifier.to_string()));
            }
            Some(Slot::Ready(_)) => {}
        }

        let rename = config.identifier(identifier)?.filter(|new| *new != identifier);
        if let Some(new) = rename {
            if self.slots.contains_key(new) {
                return Err(EngineError::DuplicateIdentifier(new.to_string()));
            }
        }
        if config.get(config::EVENT_LIST).is_some() {
            return Err(EngineError::InvalidAttribute {
                identifier: identifier.to_string(),
                key: config::EVENT_LIST.to_string(),
            });
        }

        let Some(Slot::Ready(entity)) = self.slots.get_mut(identifier) else {
            return Ok(());
        };

        match entity {
            Entity::Stage => {}
            Entity::Shape(shape) => {
                if let Some(key) = [config::INTERVAL, config::PAUSE, config::URL]
                    .into_iter()
                    .find(|key| config.get(key).is_some())
                {
                    return Err(EngineError::InvalidAttribute {
                        identifier: identifier.to_string(),
                        key: key.to_string(),
                    });
                }
                let attributes = config.attributes();
                if !attributes.is_empty() {
                    services.renderer.set_attributes(shape.drawable, &attributes);
                }
            }
            Entity::Timer(timer) => {
                update_timer(identifier, timer, config, services, now)?;
            }
        }

        if let Some(new) = rename {
            self.rename(identifier, new, services);
        }
        Ok(())
    }

    fn rename(&mut self, from: &str, to: &str, services: &mut Services) {
        let Some(mut slot) = self.slots.remove(from) else {
            return;
        };

        match &mut slot {
            Slot::Ready(Entity::Shape(shape)) => {
                self.drawables.insert(shape.drawable, to.to_string());
            }
            Slot::Ready(Entity::Timer(timer)) => {
                timer.rekey(to, &mut services.timers);
            }
            Slot::Ready(Entity::Stage) | Slot::Loading(_) => {}
        }

        self.queues.rename(from, to);
        self.slots.insert(to.to_string(), slot);
        debug!("Renamed {} to {}", from, to);
    }

    //--- Remove -----------------------------------------------------------

    /// Removes `identifier` and every queue it owns.
    ///
    /// Removing a loading identifier succeeds; its load result will be
    /// discarded when it arrives.
    pub(crate) fn remove(&mut self, identifier: &str, services: &mut Services) -> EngineResult<()> {
        let slot = self
            .slots
            .remove(identifier)
            .ok_or_else(|| EngineError::UnknownIdentifier(identifier.to_string()))?;

        match slot {
            Slot::Loading(pending) => {
                self.loading.remove(&pending.ticket);
                debug!("Removed {} while loading {:?}", identifier, pending.ticket);
            }
            Slot::Ready(Entity::Stage) => {
                for kind in self.queues.kinds(identifier) {
                    services.input.unsubscribe(kind);
                }
                self.stage = None;
                debug!("Removed stage {}", identifier);
            }
            Slot::Ready(Entity::Timer(timer)) => {
                timer.cancel();
                debug!("Removed timer {}", identifier);
            }
            Slot::Ready(Entity::Shape(shape)) => {
                services.renderer.destroy_drawable(shape.drawable);
                self.drawables.remove(&shape.drawable);
                debug!("Removed {} {}", shape.kind.as_str(), identifier);
            }
        }

        self.queues.remove_all(identifier);
        Ok(())
    }

    /// Removes every entity, loading ones included.
    pub(crate) fn clear(&mut self, services: &mut Services) {
        for identifier in self.identifiers() {
            // Every key came from `slots`, so removal cannot miss.
            let _ = self.remove(&identifier, services);
        }
        self.queues.clear();
        self.loading.clear();
        self.drawables.clear();
        self.stage = None;
    }

    //--- Events -----------------------------------------------------------

    /// Pops the oldest `(identifier, kind)` payload.
    ///
    /// `Remain` on a timer returns its countdown instead. Loading
    /// identifiers yield `None`.
    pub(crate) fn dequeue(
        &mut self,
        identifier: &str,
        kind: EventKind,
        now: f64,
    ) -> EngineResult<Option<EventPayload>> {
        let entity = match self.slots.get(identifier) {
            None => return Err(EngineError::UnknownIdentifier(identifier.to_string())),
            Some(Slot::Loading(_)) => return Ok(None),
            Some(Slot::Ready(entity)) => entity,
        };

        if kind == EventKind::Remain {
            return match entity {
                Entity::Timer(timer) => Ok(Some(EventPayload::Number(timer.remain(now)))),
                _ => Err(unsupported(identifier, kind)),
            };
        }

        if !self.queues.is_subscribed(identifier, kind) {
            return Err(unsupported(identifier, kind));
        }
        Ok(self.queues.pop(identifier, kind))
    }

    /// Delivers a device event to the stage, if it wants that kind.
    pub(crate) fn route_device(&mut self, kind: EventKind, payload: EventPayload) {
        match &self.stage {
            Some(stage) => {
                if !self.queues.push(stage, kind, payload) {
                    trace!("Stage {} not subscribed to {}, dropped", stage, kind);
                }
            }
            None => trace!("No stage, dropped {} event", kind),
        }
    }

    /// Delivers a drawable interaction to the drawable's owner.
    pub(crate) fn route_interaction(
        &mut self,
        drawable: DrawableId,
        kind: EventKind,
        payload: EventPayload,
    ) {
        match self.drawables.get(&drawable) {
            Some(identifier) => {
                if !self.queues.push(identifier, kind, payload) {
                    trace!("{} not subscribed to {}, dropped", identifier, kind);
                }
            }
            None => warn!("{} event for unknown drawable {:?}", kind, drawable),
        }
    }

    //--- Timers -----------------------------------------------------------

    /// Fires every timer due at `now`.
    ///
    /// Each fire enqueues the pre-increment count and reschedules from
    /// `now`, so a late tick fires once instead of catching up.
    pub(crate) fn fire_due_timers(&mut self, services: &mut Services, now: f64) {
        while let Some(companion) = services.timers.pop_due(now) {
            if companion.is_cancelled() {
                continue;
            }

            let identifier = companion.identifier();
            let Some(Slot::Ready(Entity::Timer(timer))) = self.slots.get_mut(identifier) else {
                warn!("Live companion for missing timer {}", identifier);
                continue;
            };

            let count = timer.count;
            timer.count += 1;
            timer.schedule =
                TimerSchedule::Running(services.timers.schedule(identifier, now + timer.interval));
            self.queues
                .push(identifier, EventKind::Fire, EventPayload::Count(count));

            trace!("Timer {} fired #{} at {}", identifier, count, now);
        }
    }
}

//=== Helpers =============================================================

fn check_interval(identifier: &str, interval: f64) -> EngineResult<()> {
    if interval.is_finite() && interval > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidInterval {
            identifier: identifier.to_string(),
            interval,
        })
    }
}

fn unsupported(identifier: &str, kind: EventKind) -> EngineError {
    EngineError::UnsupportedEvent {
        identifier: identifier.to_string(),
        kind,
    }
}

/// Timers accept `interval` and `pause` besides the rename key.
fn update_timer(
    identifier: &str,
    timer: &mut Timer,
    config: &Config,
    services: &mut Services,
    now: f64,
) -> EngineResult<()> {
    if let Some(key) = config.attribute_keys().next() {
        return Err(EngineError::InvalidAttribute {
            identifier: identifier.to_string(),
            key: key.to_string(),
        });
    }

    let interval = config.number(identifier, config::INTERVAL)?;
    if let Some(interval) = interval {
        check_interval(identifier, interval)?;
    }
    let pause = config.flag(identifier, config::PAUSE)?;

    if let Some(interval) = interval {
        timer.interval = interval;
    }
    match pause {
        Some(true) => timer.pause(now),
        Some(false) => timer.resume(identifier, now, &mut services.timers),
        None => {}
    }
    Ok(())
}
