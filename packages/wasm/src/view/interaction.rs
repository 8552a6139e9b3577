//! Pointer and wheel interaction.
//!
//! `Idle → Panning → Idle`. A primary-button press records the pointer
//! position minus the current translation as the pan anchor; moves while
//! panning set the translation to pointer minus anchor; release or leave
//! returns to idle unconditionally. A press that arrives while already
//! panning (the release was lost, e.g. on focus loss) simply re-anchors,
//! so no drag state outlives the next press.
//!
//! Each graph instance owns its own controller; there is no shared state.

use super::transform::ViewTransform;

/// Wheel scroll down (positive delta).
pub const WHEEL_ZOOM_OUT: f32 = 0.9;
/// Wheel scroll up (negative delta).
pub const WHEEL_ZOOM_IN: f32 = 1.1;
/// Zoom-in control.
pub const BUTTON_ZOOM_IN: f32 = 1.2;
/// Zoom-out control.
pub const BUTTON_ZOOM_OUT: f32 = 0.8;

/// Pointer button, by DOM `MouseEvent.button` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Auxiliary,
    Secondary,
    Other(i16),
}

impl From<i16> for PointerButton {
    fn from(code: i16) -> Self {
        match code {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// Drag state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanState {
    #[default]
    Idle,
    /// Pointer position minus translation at the time of the press.
    Panning { anchor_x: f32, anchor_y: f32 },
}

/// Pan/zoom state machine for one graph instance.
#[derive(Debug, Clone, Default)]
pub struct ViewController {
    transform: ViewTransform,
    pan: PanState,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn pan_state(&self) -> PanState {
        self.pan
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.pan, PanState::Panning { .. })
    }

    /// Start (or restart) a pan. Only the primary button pans.
    pub fn pointer_down(&mut self, button: PointerButton, x: f32, y: f32) -> bool {
        if button != PointerButton::Primary || !(x.is_finite() && y.is_finite()) {
            return false;
        }
        self.pan = PanState::Panning {
            anchor_x: x - self.transform.x,
            anchor_y: y - self.transform.y,
        };
        true
    }

    /// Follow the pointer while panning. Returns whether the translation changed.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        let PanState::Panning { anchor_x, anchor_y } = self.pan else {
            return false;
        };
        self.transform.set_translation(x - anchor_x, y - anchor_y)
    }

    pub fn pointer_up(&mut self) {
        self.pan = PanState::Idle;
    }

    pub fn pointer_leave(&mut self) {
        self.pan = PanState::Idle;
    }

    /// Zoom by one wheel notch. Translation is never touched.
    pub fn wheel(&mut self, delta_y: f32) -> bool {
        if !delta_y.is_finite() || delta_y == 0.0 {
            return false;
        }
        let factor = if delta_y > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            WHEEL_ZOOM_IN
        };
        self.transform.zoom_by(factor)
    }

    pub fn zoom_in(&mut self) -> bool {
        self.transform.zoom_by(BUTTON_ZOOM_IN)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.transform.zoom_by(BUTTON_ZOOM_OUT)
    }

    /// Back to `{0, 0, 1}`, ending any drag.
    pub fn reset(&mut self) {
        self.transform.reset();
        self.pan = PanState::Idle;
    }

    /// Scale as a rounded percentage for the controls label.
    pub fn zoom_percent(&self) -> u32 {
        (self.transform.scale * 100.0).round() as u32
    }
}
