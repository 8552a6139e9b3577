//! Horizontal (tiered column) layout.
//!
//! The file sits in the left column, functions one tier to the right, tests
//! one further tier to the right. Vertical placement works in slots:
//!
//! - every test takes one slot, stacked in the order of its function,
//! - a function with tests is centred on the span of its own tests,
//! - a function without tests takes a slot of its own.
//!
//! Slots are shared across the whole tree, so tests of different functions
//! never land on the same row. The root is centred on the fan of functions
//! it connects to.

use super::{LayoutMetrics, LayoutMode, LayoutResult, PositionedNode, has_grandchildren};
use crate::graph::{Edge, MindMapNode, NodeDepth};

/// Lay out `root` as tiered columns.
pub fn layout(root: &MindMapNode, metrics: &LayoutMetrics) -> LayoutResult {
    let functions: Vec<&MindMapNode> = root.children.iter().collect();
    layout_groups(root, &[functions], metrics, LayoutMode::Horizontal)
}

/// Slot range claimed by one function.
struct FunctionSlots<'a> {
    node: &'a MindMapNode,
    /// First slot: the function's own, or its first test's.
    first: usize,
    /// Slots claimed; at least one.
    len: usize,
}

/// Tiered layout over groups of functions, with one empty slot between
/// consecutive non-empty groups.
pub(super) fn layout_groups(
    root: &MindMapNode,
    groups: &[Vec<&MindMapNode>],
    metrics: &LayoutMetrics,
    mode: LayoutMode,
) -> LayoutResult {
    let mut placements: Vec<FunctionSlots<'_>> = Vec::with_capacity(root.children.len());
    let mut next_slot = 0usize;

    for (group_index, group) in groups.iter().filter(|group| !group.is_empty()).enumerate() {
        if group_index > 0 {
            next_slot += 1;
        }
        for &node in group {
            let len = node.children.len().max(1);
            placements.push(FunctionSlots {
                node,
                first: next_slot,
                len,
            });
            next_slot += len;
        }
    }

    let slot_count = next_slot as f32;
    let spacing = metrics.sibling_spacing;
    let height = metrics
        .min_height
        .max(slot_count * spacing + 2.0 * metrics.padding);
    let tiers = if has_grandchildren(root) { 2.0 } else { 1.0 };
    let width = 2.0 * metrics.padding + metrics.node_width + metrics.tier_spacing * tiers;

    // Centre the block of slots vertically.
    let top = (height - slot_count * spacing) / 2.0 + spacing / 2.0;
    let slot_y = |slot: usize| top + slot as f32 * spacing;

    let root_x = metrics.padding + metrics.node_width / 2.0;
    let function_x = root_x + metrics.tier_spacing;
    let test_x = function_x + metrics.tier_spacing;

    let mut descendants = Vec::with_capacity(root.node_count().saturating_sub(1));
    let mut edges = Vec::with_capacity(root.node_count().saturating_sub(1));
    let mut function_y_sum = 0.0;

    for slots in &placements {
        let function = slots.node;
        let y = if function.children.is_empty() {
            slot_y(slots.first)
        } else {
            (slot_y(slots.first) + slot_y(slots.first + slots.len - 1)) / 2.0
        };
        function_y_sum += y;

        descendants.push(PositionedNode::new(function, NodeDepth::Function, function_x, y));
        edges.push(Edge::new(&root.id, &function.id));

        for (offset, test) in function.children.iter().enumerate() {
            descendants.push(PositionedNode::new(
                test,
                NodeDepth::Test,
                test_x,
                slot_y(slots.first + offset),
            ));
            edges.push(Edge::new(&function.id, &test.id));
        }
    }

    let root_y = if placements.is_empty() {
        height / 2.0
    } else {
        function_y_sum / placements.len() as f32
    };

    let mut positions = Vec::with_capacity(descendants.len() + 1);
    positions.push(PositionedNode::new(root, NodeDepth::Root, root_x, root_y));
    positions.extend(descendants);

    LayoutResult {
        mode,
        width,
        height,
        positions,
        edges,
    }
}
