//! Progress-driven visual scaling.
//!
//! Every value grows monotonically with animation progress and never drops
//! below [`VISUAL_FLOOR`]; some renderers reject zero-sized or fully
//! transparent geometry.

use serde::Serialize;

use crate::graph::GraphNode;

use super::palette::color_for;

/// Smallest value any visual property may take.
pub const VISUAL_FLOOR: f32 = 0.01;

/// Node sphere scale at importance 0 and 1 once fully shown.
const NODE_SCALE_MIN: f32 = 0.6;
const NODE_SCALE_MAX: f32 = 1.4;
/// Line width once fully shown.
const LINE_WIDTH: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualScale {
    pub opacity: f32,
    pub node_scale: f32,
    pub line_width: f32,
}

impl VisualScale {
    /// Visual properties at `progress` for a node of `importance`.
    ///
    /// Both inputs are clamped to [0, 1]; non-finite values count as 0 for
    /// progress and 0.5 for importance.
    pub fn at(progress: f32, importance: f32) -> Self {
        let p = if progress.is_finite() { progress.clamp(0.0, 1.0) } else { 0.0 };
        let importance = if importance.is_finite() { importance.clamp(0.0, 1.0) } else { 0.5 };

        let full_scale = NODE_SCALE_MIN + (NODE_SCALE_MAX - NODE_SCALE_MIN) * importance;
        Self {
            opacity: floor(p),
            node_scale: floor(full_scale * p),
            line_width: floor(LINE_WIDTH * p),
        }
    }
}

/// Colour plus visual scale for one validated node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    pub color: &'static str,
    #[serde(flatten)]
    pub scale: VisualScale,
}

impl NodeStyle {
    pub fn at(node: &GraphNode, progress: f32) -> Self {
        Self {
            color: color_for(node.kind),
            scale: VisualScale::at(progress, node.importance),
        }
    }
}

#[inline]
fn floor(v: f32) -> f32 {
    v.max(VISUAL_FLOOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_at_zero_progress() {
        let v = VisualScale::at(0.0, 1.0);
        assert_eq!(v.opacity, VISUAL_FLOOR);
        assert_eq!(v.node_scale, VISUAL_FLOOR);
        assert_eq!(v.line_width, VISUAL_FLOOR);
    }

    #[test]
    fn test_monotonic_in_progress() {
        let mut last = VisualScale::at(0.0, 0.5);
        for i in 1..=50 {
            let v = VisualScale::at(i as f32 / 50.0, 0.5);
            assert!(v.opacity >= last.opacity);
            assert!(v.node_scale >= last.node_scale);
            assert!(v.line_width >= last.line_width);
            last = v;
        }
        assert_eq!(last.opacity, 1.0);
    }

    #[test]
    fn test_importance_grows_nodes() {
        assert!(VisualScale::at(1.0, 1.0).node_scale > VisualScale::at(1.0, 0.0).node_scale);
    }

    #[test]
    fn test_non_finite_inputs_stay_positive() {
        let v = VisualScale::at(f32::NAN, f32::INFINITY);
        assert!(v.opacity > 0.0 && v.node_scale > 0.0 && v.line_width > 0.0);
    }

    #[test]
    fn test_node_style_reads_kind_and_importance() {
        use crate::graph::{LaneIndex, NodeKind, NodeOrdinal};

        let node = |kind, importance| GraphNode {
            id: "n".into(),
            ordinal: NodeOrdinal(0),
            kind,
            importance,
            lane: Some(LaneIndex(0)),
        };
        let big = NodeStyle::at(&node(NodeKind::Fact, 1.0), 1.0);
        let small = NodeStyle::at(&node(NodeKind::Intent, 0.0), 1.0);

        assert_eq!(big.color, color_for(NodeKind::Fact));
        assert_ne!(big.color, small.color);
        assert!(big.scale.node_scale > small.scale.node_scale);
    }
}
