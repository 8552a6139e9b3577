//! View transform (translation + uniform scale).
//!
//! Scale is clamped before it is stored, so no sequence of zoom operations
//! can leave it outside `[MIN_SCALE, MAX_SCALE]` or produce `NaN`.
//!
//! Zoom is centre-anchored: the centre of the viewport shows the scene
//! point `scene_centre - translation / scale`. The minimap uses the same
//! convention for its viewport indicator.

use serde::{Deserialize, Serialize};

/// Smallest allowed zoom factor.
pub const MIN_SCALE: f32 = 0.25;

/// Largest allowed zoom factor.
pub const MAX_SCALE: f32 = 3.0;

/// Clamp a candidate scale, rejecting `NaN`.
#[inline]
pub fn clamp_scale(scale: f32) -> Option<f32> {
    if scale.is_nan() {
        None
    } else {
        Some(scale.clamp(MIN_SCALE, MAX_SCALE))
    }
}

/// Size of the main view in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
        }
    }
}

impl ViewportSize {
    /// Create a viewport size, or `None` unless both sides are positive and finite.
    pub fn new(width: f32, height: f32) -> Option<Self> {
        let valid = |side: f32| side.is_finite() && side > 0.0;
        (valid(width) && valid(height)).then_some(Self { width, height })
    }
}

/// Pan/zoom state applied uniformly to the rendered scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Horizontal translation in pixels.
    pub x: f32,
    /// Vertical translation in pixels.
    pub y: f32,
    /// Uniform zoom factor.
    pub scale: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    /// No translation, unit scale.
    pub const IDENTITY: ViewTransform = ViewTransform {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };

    /// Create a transform, sanitising every component.
    pub fn new(x: f32, y: f32, scale: f32) -> Self {
        let finite_or_zero = |v: f32| if v.is_finite() { v } else { 0.0 };
        Self {
            x: finite_or_zero(x),
            y: finite_or_zero(y),
            scale: clamp_scale(scale).unwrap_or(1.0),
        }
    }

    /// Restore the identity transform.
    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Multiply the scale by `factor`, clamped. Returns whether it changed.
    pub fn zoom_by(&mut self, factor: f32) -> bool {
        let Some(next) = clamp_scale(self.scale * factor) else {
            return false;
        };
        let changed = next != self.scale;
        self.scale = next;
        changed
    }

    /// Set the translation. Non-finite input is ignored.
    pub fn set_translation(&mut self, x: f32, y: f32) -> bool {
        if !(x.is_finite() && y.is_finite()) {
            return false;
        }
        let changed = x != self.x || y != self.y;
        self.x = x;
        self.y = y;
        changed
    }

    /// Map a viewport pixel to scene coordinates.
    pub fn screen_to_scene(
        &self,
        screen_x: f32,
        screen_y: f32,
        viewport: ViewportSize,
        scene_width: f32,
        scene_height: f32,
    ) -> (f32, f32) {
        (
            scene_width / 2.0 + (screen_x - viewport.width / 2.0 - self.x) / self.scale,
            scene_height / 2.0 + (screen_y - viewport.height / 2.0 - self.y) / self.scale,
        )
    }

    /// Map a scene point to viewport pixels.
    pub fn scene_to_screen(
        &self,
        scene_x: f32,
        scene_y: f32,
        viewport: ViewportSize,
        scene_width: f32,
        scene_height: f32,
    ) -> (f32, f32) {
        (
            viewport.width / 2.0 + self.x + (scene_x - scene_width / 2.0) * self.scale,
            viewport.height / 2.0 + self.y + (scene_y - scene_height / 2.0) * self.scale,
        )
    }

    /// The scene rectangle visible in the viewport, as `(min_x, min_y, max_x, max_y)`.
    pub fn visible_scene_rect(
        &self,
        viewport: ViewportSize,
        scene_width: f32,
        scene_height: f32,
    ) -> (f32, f32, f32, f32) {
        let (min_x, min_y) = self.screen_to_scene(0.0, 0.0, viewport, scene_width, scene_height);
        let (max_x, max_y) = self.screen_to_scene(
            viewport.width,
            viewport.height,
            viewport,
            scene_width,
            scene_height,
        );
        (min_x, min_y, max_x, max_y)
    }
}
