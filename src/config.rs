//! Engine configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config. Defaults reproduce the
//! stock backdrop: a particle every 300 ms and a spark every 1.5 s.

use std::{fs::File, io::BufReader, path::Path};

use crate::{
    foundation::{
        core::Viewport,
        error::{FxError, FxResult},
    },
    scene::backdrop::Backdrop,
};

/// Half-open sampling range `[min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

impl<T> Span<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl Span<f64> {
    fn validate(&self, what: &str) -> FxResult<()> {
        if !(self.min.is_finite() && self.max.is_finite()) {
            return Err(FxError::config(format!("{what}: bounds must be finite")));
        }
        if self.min >= self.max {
            return Err(FxError::config(format!("{what}: min must be < max")));
        }
        // Uniform sampling needs a finite width.
        if !(self.max - self.min).is_finite() {
            return Err(FxError::config(format!("{what}: range is too wide")));
        }
        Ok(())
    }
}

impl Span<u64> {
    fn validate(&self, what: &str) -> FxResult<()> {
        if self.min >= self.max {
            return Err(FxError::config(format!("{what}: min must be < max")));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub interval_ms: u64,
    pub duration_ms: Span<u64>,
    pub drift_x: Span<f64>,
    pub peak_opacity: Span<f64>,
    pub size: Span<f64>,
    pub fade_in_ms: u64,
    /// Particles spawn this far below the bottom edge.
    pub spawn_below: f64,
    /// Upward travel as a fraction of screen height.
    pub rise_fraction: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            interval_ms: 300,
            duration_ms: Span::new(8_000, 12_000),
            drift_x: Span::new(-30.0, 30.0),
            peak_opacity: Span::new(0.1, 0.4),
            size: Span::new(2.0, 6.0),
            fade_in_ms: 500,
            spawn_below: 20.0,
            rise_fraction: 0.6,
        }
    }
}

impl ParticleConfig {
    pub fn validate(&self) -> FxResult<()> {
        if self.interval_ms == 0 {
            return Err(FxError::config("particles.interval_ms must be > 0"));
        }
        self.duration_ms.validate("particles.duration_ms")?;
        if self.duration_ms.min <= self.fade_in_ms {
            return Err(FxError::config(
                "particles.duration_ms must be longer than fade_in_ms",
            ));
        }
        self.drift_x.validate("particles.drift_x")?;
        self.peak_opacity.validate("particles.peak_opacity")?;
        validate_opacity(self.peak_opacity, "particles.peak_opacity")?;
        self.size.validate("particles.size")?;
        if self.size.min < 0.0 {
            return Err(FxError::config("particles.size must be >= 0"));
        }
        if !self.spawn_below.is_finite() || !self.rise_fraction.is_finite() {
            return Err(FxError::config(
                "particles.spawn_below and rise_fraction must be finite",
            ));
        }
        Ok(())
    }

    /// Shortest and longest possible lifetime, fade-in included.
    pub fn lifetime_bounds(&self) -> (u64, u64) {
        (
            self.fade_in_ms.saturating_add(self.duration_ms.min),
            self.fade_in_ms.saturating_add(self.duration_ms.max),
        )
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SparkConfig {
    pub interval_ms: u64,
    pub duration_ms: Span<u64>,
    pub offset_x: Span<f64>,
    /// Upward travel; the vertical offset is the negated sample, so `[0, 200)` yields `(-200, 0]`.
    pub lift: Span<f64>,
    pub start_delay_ms: Span<u64>,
    pub peak_opacity: f64,
    pub fade_in_ms: u64,
    pub size: f64,
    /// Sparks spawn in the top `band` fraction of the screen.
    pub band: f64,
}

impl Default for SparkConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1_500,
            duration_ms: Span::new(1_500, 3_000),
            offset_x: Span::new(-75.0, 75.0),
            lift: Span::new(0.0, 200.0),
            start_delay_ms: Span::new(0, 2_000),
            peak_opacity: 0.7,
            fade_in_ms: 200,
            size: 3.0,
            band: 0.7,
        }
    }
}

impl SparkConfig {
    pub fn validate(&self) -> FxResult<()> {
        if self.interval_ms == 0 {
            return Err(FxError::config("sparks.interval_ms must be > 0"));
        }
        self.duration_ms.validate("sparks.duration_ms")?;
        if self.duration_ms.min <= self.fade_in_ms {
            return Err(FxError::config(
                "sparks.duration_ms must be longer than fade_in_ms",
            ));
        }
        self.offset_x.validate("sparks.offset_x")?;
        self.lift.validate("sparks.lift")?;
        self.start_delay_ms.validate("sparks.start_delay_ms")?;
        validate_opacity(
            Span::new(self.peak_opacity, self.peak_opacity),
            "sparks.peak_opacity",
        )?;
        if !(self.size.is_finite() && self.size >= 0.0) {
            return Err(FxError::config("sparks.size must be finite and >= 0"));
        }
        if !(self.band > 0.0 && self.band <= 1.0) {
            return Err(FxError::config("sparks.band must be in (0, 1]"));
        }
        Ok(())
    }

    pub fn lifetime_bounds(&self) -> (u64, u64) {
        (
            self.start_delay_ms
                .min
                .saturating_add(self.fade_in_ms)
                .saturating_add(self.duration_ms.min),
            self.start_delay_ms
                .max
                .saturating_add(self.fade_in_ms)
                .saturating_add(self.duration_ms.max),
        )
    }
}

fn validate_opacity(span: Span<f64>, what: &str) -> FxResult<()> {
    if !(0.0..=1.0).contains(&span.min) || !(0.0..=1.0).contains(&span.max) {
        return Err(FxError::config(format!("{what}: must lie in [0, 1]")));
    }
    Ok(())
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub viewport: Viewport,
    pub particles: ParticleConfig,
    pub sparks: SparkConfig,
    pub backdrop: Backdrop,
}

impl EngineConfig {
    pub fn validate(&self) -> FxResult<()> {
        self.viewport.validate()?;
        self.particles.validate()?;
        self.sparks.validate()?;
        self.backdrop.validate()
    }

    pub fn from_json(json: &str) -> FxResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> FxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            FxError::serde(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
