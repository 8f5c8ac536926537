//! Renderable edge set.
//!
//! The renderer re-validates edges against the computed layout before drawing
//! them: both endpoints must have resolved to finite positions, and the
//! segment must be longer than a minimum length. Near-zero segments are valid
//! data but degenerate geometry.

use serde::Serialize;

use crate::graph::{sanitize_strength, GraphSnapshot};
use crate::layout::{LayoutResult, Position3};

/// Segments at or below this length are suppressed.
pub const MIN_EDGE_LENGTH: f32 = 0.05;

/// An edge that can be drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderableEdge {
    pub source: String,
    pub target: String,
    pub relation: String,
    /// Sanitised into [0, 1].
    pub strength: f32,
    pub from: Position3,
    pub to: Position3,
}

impl RenderableEdge {
    pub fn length(&self) -> f32 {
        self.from.distance(&self.to)
    }
}

/// Edges of `snapshot` that are safe to draw against `layout`, in input order.
pub fn renderable_edges(
    snapshot: &GraphSnapshot,
    layout: &LayoutResult,
    min_length: f32,
) -> Vec<RenderableEdge> {
    let min_length = if min_length.is_finite() && min_length >= 0.0 {
        min_length
    } else {
        MIN_EDGE_LENGTH
    };

    snapshot
        .edges
        .iter()
        .filter_map(|edge| {
            let from = layout.get(&edge.source).filter(Position3::is_finite)?;
            let to = layout.get(&edge.target).filter(Position3::is_finite)?;
            let length = from.distance(&to);
            if !length.is_finite() || length <= min_length {
                return None;
            }
            Some(RenderableEdge {
                source: edge.source.clone(),
                target: edge.target.clone(),
                relation: edge.relation.clone(),
                strength: sanitize_strength(edge.strength),
                from,
                to,
            })
        })
        .collect()
}
