//! Static layers painted behind the animated entities.

use crate::foundation::{
    core::{Point, Viewport},
    error::{FxError, FxResult},
};

/// Straight (non-premultiplied) RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with a fractional alpha in `[0, 1]`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// A soft circular glow hanging partly off one corner of the screen.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Glow {
    pub corner: Corner,
    pub diameter: f64,
    /// Distance of the circle's bounding box from the corner; negative pushes it off-screen.
    pub inset: f64,
    pub color: Rgba8,
    pub blur_radius: f64,
}

/// A glow resolved against a viewport.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GlowLayer {
    pub center: Point,
    pub radius: f64,
    pub color: Rgba8,
    pub blur_radius: f64,
}

impl Glow {
    pub fn layout(&self, vp: Viewport) -> GlowLayer {
        let r = self.diameter / 2.0;
        let near = self.inset + r;
        let cx = match self.corner {
            Corner::TopLeft | Corner::BottomLeft => near,
            Corner::TopRight | Corner::BottomRight => vp.width - near,
        };
        let cy = match self.corner {
            Corner::TopLeft | Corner::TopRight => near,
            Corner::BottomLeft | Corner::BottomRight => vp.height - near,
        };
        GlowLayer {
            center: Point::new(cx, cy),
            radius: r,
            color: self.color,
            blur_radius: self.blur_radius,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Backdrop {
    pub base: Rgba8,
    pub glows: Vec<Glow>,
}

impl Default for Backdrop {
    // Dark base with an emerald glow bottom-left and an aqua glow top-right.
    fn default() -> Self {
        Self {
            base: Rgba8::rgb(0x0C, 0x0F, 0x14),
            glows: vec![
                Glow {
                    corner: Corner::BottomLeft,
                    diameter: 400.0,
                    inset: -150.0,
                    color: Rgba8::rgb(16, 185, 129).with_alpha(0.08),
                    blur_radius: 120.0,
                },
                Glow {
                    corner: Corner::TopRight,
                    diameter: 400.0,
                    inset: -150.0,
                    color: Rgba8::rgb(6, 182, 212).with_alpha(0.08),
                    blur_radius: 120.0,
                },
            ],
        }
    }
}

impl Backdrop {
    pub fn validate(&self) -> FxResult<()> {
        for glow in &self.glows {
            if !(glow.diameter.is_finite() && glow.diameter > 0.0) {
                return Err(FxError::config("glow diameter must be finite and > 0"));
            }
            if !glow.inset.is_finite() || !(glow.blur_radius.is_finite() && glow.blur_radius >= 0.0)
            {
                return Err(FxError::config(
                    "glow inset and blur radius must be finite, blur >= 0",
                ));
            }
        }
        Ok(())
    }

    pub fn layout(&self, vp: Viewport) -> Vec<GlowLayer> {
        self.glows.iter().map(|g| g.layout(vp)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/backdrop.rs"]
mod tests;
