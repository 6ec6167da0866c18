//! The backdrop engine: spawners, registry and timers for the lifetime of one mount.
//!
//! The engine owns every timer it schedules. Deactivation cancels them all synchronously, empties
//! the registry and bumps the epoch; entity events carry the epoch they were scheduled under and
//! are ignored if it no longer matches, so nothing can touch the registry after teardown.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    config::EngineConfig,
    foundation::{
        core::{Millis, Viewport},
        error::FxResult,
    },
    scene::{
        backdrop::{GlowLayer, Rgba8},
        entity::{Entity, EntityId, EntityKind, Sprite},
        registry::{Population, Registry},
    },
    spawn::{Spawner, sample_particle, sample_spark},
    time::{
        clock::Clock,
        timer::{Fired, TimerQueue},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerEvent {
    Spawn(EntityKind),
    Start { id: EntityId, epoch: u64 },
    Retire { id: EntityId, epoch: u64 },
}

/// An entity leaving the registry after its full timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Retirement {
    pub id: EntityId,
    pub kind: EntityKind,
    pub spawned_at: Millis,
    pub retired_at: Millis,
}

impl Retirement {
    pub fn lifetime(&self) -> u64 {
        self.retired_at.since(self.spawned_at)
    }
}

/// Registry mutations performed by one [`Engine::tick`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct TickReport {
    pub spawned: Vec<EntityId>,
    pub started: Vec<EntityId>,
    pub retired: Vec<Retirement>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.spawned.is_empty() && self.started.is_empty() && self.retired.is_empty()
    }
}

/// Everything a renderer needs to paint one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Frame {
    pub at: Millis,
    pub viewport: Viewport,
    pub base: Rgba8,
    pub glows: Vec<GlowLayer>,
    pub sprites: Vec<Sprite>,
}

pub struct Engine<C, R = StdRng> {
    config: EngineConfig,
    clock: C,
    rng: R,
    timers: TimerQueue<TimerEvent>,
    registry: Registry,
    particles: Spawner,
    sparks: Spawner,
    next_id: u64,
    epoch: u64,
    active: bool,
}

impl<C: Clock> Engine<C, StdRng> {
    /// Engine with a seeded standard RNG; the same seed replays the same backdrop.
    pub fn seeded(config: EngineConfig, clock: C, seed: u64) -> FxResult<Self> {
        Self::new(config, clock, StdRng::seed_from_u64(seed))
    }
}

impl<C: Clock, R: Rng> Engine<C, R> {
    pub fn new(config: EngineConfig, clock: C, rng: R) -> FxResult<Self> {
        config.validate()?;
        Ok(Self {
            particles: Spawner::new(EntityKind::Particle, config.particles.interval_ms),
            sparks: Spawner::new(EntityKind::Spark, config.sparks.interval_ms),
            config,
            clock,
            rng,
            timers: TimerQueue::new(),
            registry: Registry::new(),
            next_id: 0,
            epoch: 0,
            active: false,
        })
    }

    /// Start both spawners. Does nothing if already active.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn activate(&mut self) {
        if self.active {
            return;
        }
        let now = self.clock.now();
        self.active = true;
        self.particles.start(
            &mut self.timers,
            now,
            TimerEvent::Spawn(EntityKind::Particle),
        );
        self.sparks
            .start(&mut self.timers, now, TimerEvent::Spawn(EntityKind::Spark));
        tracing::info!(%now, epoch = self.epoch, "backdrop activated");
    }

    /// Stop everything: both spawners, every pending entity timer, every live entity.
    ///
    /// Synchronous and idempotent. When this returns no timer is pending and the registry is
    /// empty; it stays that way until the next [`Engine::activate`].
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.particles.stop(&mut self.timers);
        self.sparks.stop(&mut self.timers);
        let cancelled = self.timers.cancel_all();
        let cleared = self.registry.clear();
        self.epoch += 1;
        self.active = false;
        tracing::info!(cancelled, cleared, epoch = self.epoch, "backdrop deactivated");
    }

    /// Activate and return a guard that deactivates when dropped.
    pub fn mount(&mut self) -> Mounted<'_, C, R> {
        self.activate();
        Mounted { engine: self }
    }

    /// Process every timer due at or before the clock's current time.
    ///
    /// Events run one at a time in due order, each stamped with its own due time, so entity
    /// timelines do not depend on how often the host polls.
    pub fn tick(&mut self) -> FxResult<TickReport> {
        let mut report = TickReport::default();
        if !self.active {
            return Ok(report);
        }
        let now = self.clock.now();
        while let Some(fired) = self.timers.pop_due(now) {
            self.dispatch(fired, &mut report)?;
        }
        Ok(report)
    }

    fn dispatch(&mut self, fired: Fired<TimerEvent>, report: &mut TickReport) -> FxResult<()> {
        let at = fired.due;
        match fired.event {
            TimerEvent::Spawn(kind) => self.spawn(kind, at, report),
            TimerEvent::Start { id, epoch } => {
                if self.is_stale(epoch) {
                    tracing::trace!(%id, epoch, "ignoring stale start");
                    return Ok(());
                }
                self.start_entity(id, at, report)
            }
            TimerEvent::Retire { id, epoch } => {
                if self.is_stale(epoch) {
                    tracing::trace!(%id, epoch, "ignoring stale retire");
                    return Ok(());
                }
                self.retire(id, at, report);
                Ok(())
            }
        }
    }

    fn is_stale(&self, epoch: u64) -> bool {
        !self.active || epoch != self.epoch
    }

    fn spawn(&mut self, kind: EntityKind, at: Millis, report: &mut TickReport) -> FxResult<()> {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        let vp = self.config.viewport;

        let entity = match kind {
            EntityKind::Particle => {
                let params = sample_particle(&self.config.particles, vp, &mut self.rng);
                let mut entity = Entity::particle(id, params, at)?;
                let end = entity.start(at)?;
                self.timers.once(
                    end,
                    TimerEvent::Retire {
                        id,
                        epoch: self.epoch,
                    },
                );
                report.started.push(id);
                entity
            }
            EntityKind::Spark => {
                let params = sample_spark(&self.config.sparks, vp, &mut self.rng);
                let entity = Entity::spark(id, params, at)?;
                self.timers.once(
                    at.after(params.start_delay),
                    TimerEvent::Start {
                        id,
                        epoch: self.epoch,
                    },
                );
                entity
            }
        };

        tracing::debug!(%id, %kind, %at, lifetime = entity.lifetime(), "spawned");
        let prev = self.registry.insert(entity);
        debug_assert!(prev.is_none(), "entity ids are never reused");
        report.spawned.push(id);
        Ok(())
    }

    fn start_entity(&mut self, id: EntityId, at: Millis, report: &mut TickReport) -> FxResult<()> {
        let Some(entity) = self.registry.get_mut(id) else {
            tracing::trace!(%id, "start for unknown entity");
            return Ok(());
        };
        let end = entity.start(at)?;
        self.timers.once(
            end,
            TimerEvent::Retire {
                id,
                epoch: self.epoch,
            },
        );
        report.started.push(id);
        Ok(())
    }

    fn retire(&mut self, id: EntityId, at: Millis, report: &mut TickReport) {
        let Some(entity) = self.registry.remove(id) else {
            tracing::trace!(%id, "retire for unknown entity");
            return;
        };
        let retirement = Retirement {
            id,
            kind: entity.kind(),
            spawned_at: entity.spawned_at(),
            retired_at: at,
        };
        debug_assert_eq!(retirement.lifetime(), entity.lifetime());
        tracing::debug!(%id, kind = %retirement.kind, %at, "retired");
        report.retired.push(retirement);
    }
}

impl<C: Clock, R> Engine<C, R> {
    /// Interpolated state of every live entity at the clock's current time, in draw order.
    ///
    /// Pure query: entities whose timeline already ended but whose retirement has not been
    /// processed yet are left out rather than drawn in their final state.
    pub fn snapshot(&self) -> Vec<Sprite> {
        let now = self.clock.now();
        self.registry
            .iter()
            .filter(|e| e.is_live(now))
            .map(|e| e.sprite(now))
            .collect()
    }

    pub fn frame(&self) -> Frame {
        let vp = self.config.viewport;
        Frame {
            at: self.clock.now(),
            viewport: vp,
            base: self.config.backdrop.base,
            glows: self.config.backdrop.layout(vp),
            sprites: self.snapshot(),
        }
    }
}

impl<C, R> Engine<C, R> {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Incremented by every deactivation.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn population(&self) -> Population {
        self.registry.population()
    }

    /// Timers still armed: spawner triggers, pending spark starts and pending retirements.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

/// Scope guard returned by [`Engine::mount`]; deactivates the engine when dropped.
pub struct Mounted<'a, C: Clock, R: Rng> {
    engine: &'a mut Engine<C, R>,
}

impl<C: Clock, R: Rng> std::ops::Deref for Mounted<'_, C, R> {
    type Target = Engine<C, R>;

    fn deref(&self) -> &Self::Target {
        self.engine
    }
}

impl<C: Clock, R: Rng> std::ops::DerefMut for Mounted<'_, C, R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.engine
    }
}

impl<C: Clock, R: Rng> Drop for Mounted<'_, C, R> {
    fn drop(&mut self) {
        self.engine.deactivate();
    }
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;
