//! Periodic spawners and the random parameter sampling behind each new entity.

use rand::Rng;

use crate::{
    animation::program::{ParticleParams, SparkParams},
    config::{ParticleConfig, SparkConfig, Span},
    foundation::core::{Millis, Point, Vec2, Viewport},
    scene::entity::EntityKind,
    time::timer::{TimerId, TimerQueue},
};

/// A fixed-interval trigger for one entity kind.
///
/// The spawner only owns its trigger; entities it creates belong to the registry.
#[derive(Debug)]
pub struct Spawner {
    kind: EntityKind,
    interval: u64,
    timer: Option<TimerId>,
}

impl Spawner {
    pub fn new(kind: EntityKind, interval: u64) -> Self {
        Self {
            kind,
            interval,
            timer: None,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Arm the trigger. The first tick fires one interval after `now`.
    /// Starting a running spawner does nothing.
    pub fn start<E: Clone>(&mut self, timers: &mut TimerQueue<E>, now: Millis, event: E) {
        if self.timer.is_some() {
            return;
        }
        let first = now.after(self.interval);
        self.timer = Some(timers.every(first, self.interval, event));
    }

    /// Disarm the trigger. Returns `false` if it was not running.
    pub fn stop<E: Clone>(&mut self, timers: &mut TimerQueue<E>) -> bool {
        match self.timer.take() {
            Some(id) => {
                timers.cancel(id);
                true
            }
            None => false,
        }
    }
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, span: Span<f64>) -> f64 {
    rng.gen_range(span.min..span.max)
}

fn uniform_ms<R: Rng + ?Sized>(rng: &mut R, span: Span<u64>) -> u64 {
    rng.gen_range(span.min..span.max)
}

/// Sample one particle: anywhere along the bottom edge, just below the screen.
pub fn sample_particle<R: Rng + ?Sized>(
    cfg: &ParticleConfig,
    vp: Viewport,
    rng: &mut R,
) -> ParticleParams {
    let x = rng.gen_range(0.0..vp.width);
    ParticleParams {
        origin: Point::new(x, vp.height + cfg.spawn_below),
        duration: uniform_ms(rng, cfg.duration_ms),
        drift_x: uniform(rng, cfg.drift_x),
        rise: cfg.rise_fraction * vp.height,
        peak_opacity: uniform(rng, cfg.peak_opacity),
        fade_in: cfg.fade_in_ms,
        size: uniform(rng, cfg.size),
    }
}

/// Sample one spark somewhere in the top band of the screen.
pub fn sample_spark<R: Rng + ?Sized>(cfg: &SparkConfig, vp: Viewport, rng: &mut R) -> SparkParams {
    let x = rng.gen_range(0.0..vp.width);
    let y = rng.gen_range(0.0..vp.height * cfg.band);
    let dx = uniform(rng, cfg.offset_x);
    let dy = -uniform(rng, cfg.lift);
    SparkParams {
        origin: Point::new(x, y),
        duration: uniform_ms(rng, cfg.duration_ms),
        offset: Vec2::new(dx, dy),
        start_delay: uniform_ms(rng, cfg.start_delay_ms),
        peak_opacity: cfg.peak_opacity,
        fade_in: cfg.fade_in_ms,
        size: cfg.size,
    }
}

#[cfg(test)]
#[path = "../tests/unit/spawn.rs"]
mod tests;
