//! Edge render hints.
//!
//! Tiered layouts draw each edge as a cubic curve leaving the parent's
//! right edge and entering the child's left edge, with both control points
//! on the horizontal midpoint. Radial layouts draw straight segments
//! between node centres. Paths are derived at render time and never stored
//! with the positions.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write as _;

use super::{LayoutMetrics, LayoutResult, PositionedNode};

/// A point in scene space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Geometry of one drawn edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EdgePath {
    /// Cubic Bézier curve.
    Cubic {
        from: Point,
        control1: Point,
        control2: Point,
        to: Point,
    },
    /// Straight segment.
    Line { from: Point, to: Point },
}

impl EdgePath {
    /// Curve from the parent's right edge to the child's left edge.
    pub fn cubic(parent: &PositionedNode, child: &PositionedNode, node_width: f32) -> Self {
        let from = Point::new(parent.x + node_width / 2.0, parent.y);
        let to = Point::new(child.x - node_width / 2.0, child.y);
        let mid_x = (from.x + to.x) / 2.0;
        Self::Cubic {
            from,
            control1: Point::new(mid_x, from.y),
            control2: Point::new(mid_x, to.y),
            to,
        }
    }

    /// Segment between the two node centres.
    pub fn line(parent: &PositionedNode, child: &PositionedNode) -> Self {
        Self::Line {
            from: Point::new(parent.x, parent.y),
            to: Point::new(child.x, child.y),
        }
    }

    /// SVG path data.
    pub fn to_svg(&self) -> String {
        let mut d = String::new();
        match self {
            Self::Cubic {
                from,
                control1,
                control2,
                to,
            } => {
                let _ = write!(
                    d,
                    "M {} {} C {} {}, {} {}, {} {}",
                    from.x, from.y, control1.x, control1.y, control2.x, control2.y, to.x, to.y
                );
            }
            Self::Line { from, to } => {
                let _ = write!(d, "M {} {} L {} {}", from.x, from.y, to.x, to.y);
            }
        }
        d
    }
}

/// An edge with both endpoints resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutedEdge {
    pub from_id: String,
    pub to_id: String,
    pub path: EdgePath,
}

/// Resolve every edge of `result` into a drawable path.
///
/// An edge whose endpoint is missing from the position list is skipped.
pub fn route_edges(result: &LayoutResult, metrics: &LayoutMetrics) -> Vec<RoutedEdge> {
    let by_id: HashMap<&str, &PositionedNode> = result
        .positions
        .iter()
        .map(|node| (node.id.as_str(), node))
        .collect();
    let curved = result.mode.uses_curved_edges();

    result
        .edges
        .iter()
        .filter_map(|edge| {
            let (Some(from), Some(to)) = (
                by_id.get(edge.from_id.as_str()),
                by_id.get(edge.to_id.as_str()),
            ) else {
                tracing::warn!(edge = %edge, "skipping edge with a missing endpoint");
                return None;
            };
            let path = if curved {
                EdgePath::cubic(from, to, metrics.node_width)
            } else {
                EdgePath::line(from, to)
            };
            Some(RoutedEdge {
                from_id: edge.from_id.clone(),
                to_id: edge.to_id.clone(),
                path,
            })
        })
        .collect()
}
