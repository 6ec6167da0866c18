//! Timeline programs for the two entity kinds.
//!
//! A program is fully determined by the parameters sampled at spawn time; nothing about an
//! entity's motion is decided after it is built.

use crate::{
    animation::channel::{AnimatedChannel, Program},
    foundation::{
        core::{Millis, Point, Vec2},
        error::{FxError, FxResult},
    },
};

/// Parameters of one rising particle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParticleParams {
    pub origin: Point,
    /// Duration of the drift phase in ms.
    pub duration: u64,
    pub drift_x: f64,
    /// Upward travel in px over the drift phase.
    pub rise: f64,
    pub peak_opacity: f64,
    pub fade_in: u64,
    pub size: f64,
}

/// Parameters of one spark.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SparkParams {
    pub origin: Point,
    pub duration: u64,
    pub offset: Vec2,
    /// One-time deferral before the program starts.
    pub start_delay: u64,
    pub peak_opacity: f64,
    pub fade_in: u64,
    pub size: f64,
}

/// The three channels of one entity, started together.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    pub x: AnimatedChannel,
    pub y: AnimatedChannel,
    pub opacity: AnimatedChannel,
}

impl Timeline {
    /// Fade in, then drift up and sideways while fading back out.
    pub fn particle(p: &ParticleParams) -> FxResult<Self> {
        if p.duration <= p.fade_in {
            return Err(FxError::animation(
                "particle duration must be longer than its fade-in",
            ));
        }
        let fade = p.fade_in;
        let d = p.duration;
        Self::build(
            p.origin,
            Program::new().segment(fade, p.origin.x + p.drift_x, d),
            Program::new().segment(fade, p.origin.y - p.rise, d),
            Program::new()
                .then(p.peak_opacity, fade)
                .then(0.0, d - fade),
        )
    }

    /// Flash in, then fly off by `offset` while fading out.
    pub fn spark(p: &SparkParams) -> FxResult<Self> {
        if p.duration <= p.fade_in {
            return Err(FxError::animation(
                "spark duration must be longer than its fade-in",
            ));
        }
        let fade = p.fade_in;
        let d = p.duration;
        Self::build(
            p.origin,
            Program::new().segment(fade, p.origin.x + p.offset.x, d),
            Program::new().segment(fade, p.origin.y + p.offset.y, d),
            Program::new()
                .then(p.peak_opacity, fade)
                .then(0.0, d - fade),
        )
    }

    fn build(origin: Point, x: Program, y: Program, opacity: Program) -> FxResult<Self> {
        let mut tl = Self {
            x: AnimatedChannel::new(origin.x),
            y: AnimatedChannel::new(origin.y),
            opacity: AnimatedChannel::new(0.0),
        };
        tl.x.set_program(x)?;
        tl.y.set_program(y)?;
        tl.opacity.set_program(opacity)?;
        Ok(tl)
    }

    /// Start all channels at `at`; returns when the last one completes.
    pub fn start(&mut self, at: Millis) -> FxResult<Millis> {
        let x = self.x.start(at)?;
        let y = self.y.start(at)?;
        let o = self.opacity.start(at)?;
        Ok(x.max(y).max(o))
    }

    /// Program length in ms, from start to the end of the last segment.
    pub fn length(&self) -> u64 {
        [&self.x, &self.y, &self.opacity]
            .iter()
            .map(|ch| ch.program().end())
            .max()
            .unwrap_or(0)
    }

    pub fn is_started(&self) -> bool {
        self.opacity.is_started()
    }

    pub fn completes_at(&self) -> Option<Millis> {
        self.opacity
            .started_at()
            .map(|at| at.after(self.length()))
    }

    pub fn is_complete(&self, now: Millis) -> bool {
        self.completes_at().is_some_and(|end| now >= end)
    }

    pub fn position(&self, now: Millis) -> Point {
        Point::new(self.x.sample(now), self.y.sample(now))
    }

    pub fn opacity(&self, now: Millis) -> f64 {
        self.opacity.sample(now)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/program.rs"]
mod tests;
