//! Radial (concentric ring) layout.
//!
//! The root sits at the centre of a square scene. Functions are spread
//! evenly over the inner ring, starting at the top and going clockwise.
//! Each function's tests fan out on the outer ring inside a sector centred
//! on the function's own angle.

use std::f32::consts::{FRAC_PI_2, TAU};

use super::{LayoutMetrics, LayoutMode, LayoutResult, PositionedNode, has_grandchildren};
use crate::graph::{Edge, MindMapNode, NodeDepth};

/// Share of the per-function angle a test sector may use.
pub const SECTOR_FILL: f32 = 0.8;

/// Widest sector a function's tests may span.
pub const MAX_SECTOR: f32 = FRAC_PI_2;

/// Angle of the first function (straight up).
pub const START_ANGLE: f32 = -FRAC_PI_2;

/// Angle between consecutive functions; zero when there are none.
pub fn angle_step(count: usize) -> f32 {
    if count == 0 { 0.0 } else { TAU / count as f32 }
}

/// Angular width of the sector holding one function's tests.
pub fn sector_width(step: f32) -> f32 {
    (SECTOR_FILL * step).min(MAX_SECTOR)
}

/// Angles of `count` tests inside a sector centred on `center`.
///
/// A single test sits exactly on the centre angle; otherwise the tests
/// span the sector edge to edge.
fn sector_angles(center: f32, sector: f32, count: usize) -> impl Iterator<Item = f32> {
    let start = center - sector / 2.0;
    let gap = if count > 1 { sector / (count - 1) as f32 } else { 0.0 };
    (0..count).map(move |i| {
        if count == 1 {
            center
        } else {
            start + i as f32 * gap
        }
    })
}

#[inline]
fn polar(cx: f32, cy: f32, radius: f32, angle: f32) -> (f32, f32) {
    (cx + radius * angle.cos(), cy + radius * angle.sin())
}

/// Lay out `root` on concentric rings.
pub fn layout(root: &MindMapNode, metrics: &LayoutMetrics) -> LayoutResult {
    let outer_radius = if has_grandchildren(root) {
        metrics.outer_ring_radius()
    } else {
        metrics.ring_radius
    };
    let side = 2.0 * outer_radius + metrics.node_width + 2.0 * metrics.padding;
    let center = side / 2.0;

    let total = root.node_count();
    let mut positions = Vec::with_capacity(total);
    let mut edges = Vec::with_capacity(total.saturating_sub(1));
    positions.push(PositionedNode::new(root, NodeDepth::Root, center, center));

    let step = angle_step(root.children.len());
    let sector = sector_width(step);

    for (i, function) in root.children.iter().enumerate() {
        let angle = START_ANGLE + i as f32 * step;
        let (x, y) = polar(center, center, metrics.ring_radius, angle);
        positions.push(PositionedNode::new(function, NodeDepth::Function, x, y));
        edges.push(Edge::new(&root.id, &function.id));

        let tests = &function.children;
        for (test, test_angle) in tests.iter().zip(sector_angles(angle, sector, tests.len())) {
            let (x, y) = polar(center, center, outer_radius, test_angle);
            positions.push(PositionedNode::new(test, NodeDepth::Test, x, y));
            edges.push(Edge::new(&function.id, &test.id));
        }
    }

    LayoutResult {
        mode: LayoutMode::Radial,
        width: side,
        height: side,
        positions,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::tests::sample_tree;

    fn fan(count: usize) -> MindMapNode {
        MindMapNode::new("r", "r").with_children(
            (0..count)
                .map(|i| MindMapNode::new(format!("f{i}"), format!("fn{i}")))
                .collect(),
        )
    }

    fn angle_of(result: &LayoutResult, id: &str) -> f32 {
        let center = result.width / 2.0;
        let node = result.position(id).unwrap();
        (node.y - center).atan2(node.x - center)
    }

    fn distance_from_center(result: &LayoutResult, id: &str) -> f32 {
        let center = result.width / 2.0;
        let node = result.position(id).unwrap();
        ((node.x - center).powi(2) + (node.y - center).powi(2)).sqrt()
    }

    #[test]
    fn test_root_at_center_of_square() {
        let result = layout(&sample_tree(), &LayoutMetrics::default());
        assert!((result.width - result.height).abs() < 0.01);
        let root = result.root().unwrap();
        assert!((root.x - result.width / 2.0).abs() < 0.01);
        assert!((root.y - result.height / 2.0).abs() < 0.01);
    }

    #[test]
    fn test_canvas_side_depends_on_outer_ring() {
        let metrics = LayoutMetrics::default();
        let shallow = layout(&fan(3), &metrics);
        assert!((shallow.width - (2.0 * 250.0 + 200.0 + 100.0)).abs() < 0.01);

        let deep = layout(&sample_tree(), &metrics);
        assert!((deep.width - (2.0 * 470.0 + 200.0 + 100.0)).abs() < 0.01);
    }

    #[test]
    fn test_first_function_at_top() {
        let result = layout(&fan(4), &LayoutMetrics::default());
        let first = result.position("f0").unwrap();
        let center = result.width / 2.0;
        assert!((first.x - center).abs() < 0.01);
        assert!((first.y - (center - 250.0)).abs() < 0.01);
    }

    #[test]
    fn test_functions_evenly_spaced_clockwise() {
        for count in [1usize, 2, 3, 5, 8, 13] {
            let result = layout(&fan(count), &LayoutMetrics::default());
            let step = TAU / count as f32;
            for i in 0..count {
                let id = format!("f{i}");
                assert!((distance_from_center(&result, &id) - 250.0).abs() < 0.01);
                if i + 1 < count {
                    let next = format!("f{}", i + 1);
                    let diff = (angle_of(&result, &next) - angle_of(&result, &id)).rem_euclid(TAU);
                    assert!(
                        (diff - step).abs() < 1e-3,
                        "count {count}: step between f{i} and f{} was {diff}, expected {step}",
                        i + 1
                    );
                }
            }
        }
    }

    #[test]
    fn test_tests_fan_inside_sector() {
        let result = layout(&sample_tree(), &LayoutMetrics::default());
        // Four functions: step = PI/2, sector = min(0.8 * PI/2, PI/2).
        let sector = 0.8 * FRAC_PI_2;

        let parent = angle_of(&result, "func:src/cache.rs:get");
        let first = angle_of(&result, "tests/cache.rs:get_hit");
        let middle = angle_of(&result, "tests/cache.rs:get_miss");
        let last = angle_of(&result, "tests/cache.rs:get_expired");

        assert!((middle - parent).abs() < 1e-3);
        assert!(((last - first).rem_euclid(TAU) - sector).abs() < 1e-3);
        assert!((distance_from_center(&result, "tests/cache.rs:get_hit") - 470.0).abs() < 0.01);
    }

    #[test]
    fn test_single_test_sits_on_parent_angle() {
        let result = layout(&sample_tree(), &LayoutMetrics::default());
        let parent = angle_of(&result, "func:src/cache.rs:put");
        let only = angle_of(&result, "tests/cache.rs:put_new");
        assert!((parent - only).abs() < 1e-3);
    }

    #[test]
    fn test_sector_capped_at_quarter_turn() {
        assert!((sector_width(angle_step(1)) - FRAC_PI_2).abs() < 1e-6);
        assert!((sector_width(angle_step(8)) - 0.8 * TAU / 8.0).abs() < 1e-6);
        assert_eq!(angle_step(0), 0.0);
    }

    #[test]
    fn test_empty_tree() {
        let result = layout(&MindMapNode::new("r", "r"), &LayoutMetrics::default());
        assert_eq!(result.positions.len(), 1);
        assert!(result.height >= 400.0);
        assert!(result.positions[0].x.is_finite());
    }

    #[test]
    fn test_nodes_fit_in_canvas() {
        let result = layout(&sample_tree(), &LayoutMetrics::default());
        for node in &result.positions {
            assert!(node.x - 100.0 >= -0.01 && node.x + 100.0 <= result.width + 0.01);
        }
    }
}
