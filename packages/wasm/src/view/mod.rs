//! Pan and zoom.
//!
//! - `transform`: the translation/scale applied to the rendered scene
//! - `interaction`: the pointer and wheel state machine driving it
//!
//! The transform is render-time only; it never touches layout positions.

mod interaction;
mod transform;

pub use interaction::{
    BUTTON_ZOOM_IN, BUTTON_ZOOM_OUT, PanState, PointerButton, ViewController, WHEEL_ZOOM_IN,
    WHEEL_ZOOM_OUT,
};
pub use transform::{MAX_SCALE, MIN_SCALE, ViewTransform, ViewportSize, clamp_scale};
