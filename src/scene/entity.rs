use crate::{
    animation::program::{ParticleParams, SparkParams, Timeline},
    foundation::{
        core::{Millis, Point},
        error::FxResult,
    },
};

/// Opaque entity identity, unique for the lifetime of an engine.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Particle,
    Spark,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Particle => "particle",
            Self::Spark => "spark",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntityParams {
    Particle(ParticleParams),
    Spark(SparkParams),
}

/// One ephemeral visual element and its timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    id: EntityId,
    params: EntityParams,
    timeline: Timeline,
    spawned_at: Millis,
}

impl Entity {
    pub fn particle(id: EntityId, params: ParticleParams, spawned_at: Millis) -> FxResult<Self> {
        Ok(Self {
            id,
            timeline: Timeline::particle(&params)?,
            params: EntityParams::Particle(params),
            spawned_at,
        })
    }

    pub fn spark(id: EntityId, params: SparkParams, spawned_at: Millis) -> FxResult<Self> {
        Ok(Self {
            id,
            timeline: Timeline::spark(&params)?,
            params: EntityParams::Spark(params),
            spawned_at,
        })
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        match self.params {
            EntityParams::Particle(_) => EntityKind::Particle,
            EntityParams::Spark(_) => EntityKind::Spark,
        }
    }

    pub fn params(&self) -> &EntityParams {
        &self.params
    }

    pub fn origin(&self) -> Point {
        match &self.params {
            EntityParams::Particle(p) => p.origin,
            EntityParams::Spark(s) => s.origin,
        }
    }

    pub fn size(&self) -> f64 {
        match &self.params {
            EntityParams::Particle(p) => p.size,
            EntityParams::Spark(s) => s.size,
        }
    }

    /// Deferral between spawn and program start. Particles start immediately.
    pub fn start_delay(&self) -> Option<u64> {
        match &self.params {
            EntityParams::Particle(_) => None,
            EntityParams::Spark(s) => Some(s.start_delay),
        }
    }

    pub fn spawned_at(&self) -> Millis {
        self.spawned_at
    }

    /// Total time from spawn to retirement.
    pub fn lifetime(&self) -> u64 {
        self.start_delay()
            .unwrap_or(0)
            .saturating_add(self.timeline.length())
    }

    pub fn expires_at(&self) -> Option<Millis> {
        self.timeline.completes_at()
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn is_started(&self) -> bool {
        self.timeline.is_started()
    }

    /// Start the timeline at `at`; returns when it completes.
    pub fn start(&mut self, at: Millis) -> FxResult<Millis> {
        self.timeline.start(at)
    }

    /// Whether the entity should still be drawn at `now`.
    pub fn is_live(&self, now: Millis) -> bool {
        !self.timeline.is_complete(now)
    }

    pub fn sprite(&self, now: Millis) -> Sprite {
        Sprite {
            id: self.id,
            kind: self.kind(),
            position: self.timeline.position(now),
            opacity: self.timeline.opacity(now),
            size: self.size(),
            started: self.is_started(),
        }
    }
}

/// Interpolated state of one live entity, as handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Sprite {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Point,
    pub opacity: f64,
    pub size: f64,
    pub started: bool,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/entity.rs"]
mod tests;
