use crate::foundation::error::{FxError, FxResult};

pub use kurbo::{Point, Vec2};

/// Milliseconds on the engine's monotonic time base.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    /// Time-base origin.
    pub const ZERO: Self = Self(0);

    /// Shift forward by `ms` using saturating arithmetic.
    pub fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed from `earlier` to `self`, zero if `earlier` is later.
    pub fn since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

impl std::fmt::Display for Millis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Screen bounds in logical pixels. Origin is top-left, `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Create a validated viewport with finite, positive dimensions.
    pub fn new(width: f64, height: f64) -> FxResult<Self> {
        let vp = Self { width, height };
        vp.validate()?;
        Ok(vp)
    }

    pub fn validate(&self) -> FxResult<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(FxError::config("viewport width must be finite and > 0"));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(FxError::config("viewport height must be finite and > 0"));
        }
        Ok(())
    }

    /// Return `true` when `p` lies inside `[0, width) x [0, height)`.
    pub fn contains(&self, p: Point) -> bool {
        (0.0..self.width).contains(&p.x) && (0.0..self.height).contains(&p.y)
    }
}

impl Default for Viewport {
    // A typical phone screen in logical points.
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 844.0,
        }
    }
}

/// Linear interpolation from `a` to `b` at normalized progress `t`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
