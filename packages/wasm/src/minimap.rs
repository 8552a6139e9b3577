//! Minimap projection.
//!
//! Maps the laid-out scene and the current main-view transform into a small
//! fixed-size overview. The minimap has its own scale, chosen so the whole
//! scene fits with a margin. Projection is read-only: it never touches the
//! transform or the positions.

use serde::Serialize;

use crate::layout::{LayoutMetrics, PositionedNode};
use crate::view::{ViewTransform, ViewportSize, clamp_scale};

/// Axis-aligned rectangle in minimap units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Minimap canvas and node box sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimapConfig {
    /// Canvas width.
    pub width: f32,
    /// Canvas height.
    pub height: f32,
    /// Share of the canvas the scene may fill.
    pub margin_factor: f32,
    /// Scene-space width of a node box.
    pub node_width: f32,
    /// Scene-space height of a node box.
    pub node_height: f32,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        Self {
            width: 120.0,
            height: 80.0,
            margin_factor: 0.9,
            node_width: 200.0,
            node_height: 50.0,
        }
    }
}

impl MinimapConfig {
    /// Default canvas, node boxes taken from the layout metrics.
    pub fn for_metrics(metrics: &LayoutMetrics) -> Self {
        Self {
            node_width: metrics.node_width,
            node_height: metrics.node_height,
            ..Self::default()
        }
    }
}

/// One node box on the minimap.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimapNode {
    pub id: String,
    pub is_root: bool,
    pub rect: Rect,
}

/// Everything needed to draw the minimap.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimapProjection {
    /// Scene units to minimap units.
    pub scale: f32,
    /// Projected scene width (the SVG view box).
    pub content_width: f32,
    /// Projected scene height.
    pub content_height: f32,
    pub node_rects: Vec<MinimapNode>,
    /// The part of the scene visible in the main view.
    pub viewport_rect: Rect,
}

/// Scale fitting a `total_width` by `total_height` scene into the minimap.
///
/// Zero when either bound is zero, negative, or not finite.
pub fn minimap_scale(config: &MinimapConfig, total_width: f32, total_height: f32) -> f32 {
    let usable = |side: f32| side.is_finite() && side > 0.0;
    if !usable(total_width) || !usable(total_height) {
        return 0.0;
    }
    let scale = (config.width / total_width).min(config.height / total_height) * config.margin_factor;
    if scale.is_finite() { scale.max(0.0) } else { 0.0 }
}

/// Rectangle showing which part of the scene the main view displays.
///
/// Its size shrinks as the main view zooms in. The origin is clamped at
/// zero so the indicator clips at the top-left edge instead of leaving the
/// canvas.
pub fn viewport_indicator(
    minimap_scale: f32,
    total_width: f32,
    total_height: f32,
    transform: &ViewTransform,
    viewport: ViewportSize,
) -> Rect {
    if minimap_scale <= 0.0 {
        return Rect::default();
    }
    let view_scale = clamp_scale(transform.scale).unwrap_or(1.0);
    let width = viewport.width / view_scale * minimap_scale;
    let height = viewport.height / view_scale * minimap_scale;
    let x = (total_width * minimap_scale - width) / 2.0 - transform.x / view_scale * minimap_scale;
    let y = (total_height * minimap_scale - height) / 2.0 - transform.y / view_scale * minimap_scale;
    Rect::new(x.max(0.0), y.max(0.0), width, height)
}

/// Project positions and the current view into minimap space.
pub fn project(
    config: &MinimapConfig,
    positions: &[PositionedNode],
    total_width: f32,
    total_height: f32,
    transform: &ViewTransform,
    viewport: ViewportSize,
) -> MinimapProjection {
    let scale = minimap_scale(config, total_width, total_height);
    if scale == 0.0 {
        return MinimapProjection {
            scale,
            content_width: 0.0,
            content_height: 0.0,
            node_rects: Vec::new(),
            viewport_rect: Rect::default(),
        };
    }

    let node_rects = positions
        .iter()
        .map(|node| MinimapNode {
            id: node.id.clone(),
            is_root: node.is_root,
            rect: Rect::new(
                (node.x - config.node_width / 2.0) * scale,
                (node.y - config.node_height / 2.0) * scale,
                config.node_width * scale,
                config.node_height * scale,
            ),
        })
        .collect();

    MinimapProjection {
        scale,
        content_width: total_width * scale,
        content_height: total_height * scale,
        node_rects,
        viewport_rect: viewport_indicator(scale, total_width, total_height, transform, viewport),
    }
}
