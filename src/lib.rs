//! Ambient particle/spark backdrop engine.
//!
//! Two spawners create short-lived entities on fixed intervals; each entity runs a timeline of
//! linear motion/opacity segments and leaves the registry exactly when that timeline ends. The
//! host drives the [`Engine`] with [`Engine::tick`], reads [`Engine::snapshot`] per paint and
//! tears everything down with [`Engine::deactivate`] (or by dropping a [`Mounted`] guard).
#![forbid(unsafe_code)]

pub mod animation;
pub mod config;
pub mod engine;
pub mod foundation;
pub mod scene;
pub mod spawn;
pub mod time;

pub use animation::{
    channel::{AnimatedChannel, Program, Segment},
    program::{ParticleParams, SparkParams, Timeline},
};
pub use config::{EngineConfig, ParticleConfig, Span, SparkConfig};
pub use engine::{Engine, Frame, Mounted, Retirement, TickReport};
pub use foundation::core::{Millis, Point, Vec2, Viewport};
pub use foundation::error::{FxError, FxResult};
pub use scene::{
    backdrop::{Backdrop, Corner, Glow, GlowLayer, Rgba8},
    entity::{Entity, EntityId, EntityKind, EntityParams, Sprite},
    registry::{Population, Registry},
};
pub use time::{
    clock::{Clock, ManualClock, SystemClock},
    timer::{TimerId, TimerQueue},
};
