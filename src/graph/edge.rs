//! Validated edge type.
//!
//! Edges reaching this type have:
//! - Two endpoints that exist in the node set
//! - Distinct endpoints (self-loops carry no geometry)
//! - A strength in [0, 1] used to modulate link attraction

/// Strength used when the caller sent a non-finite value.
pub const DEFAULT_STRENGTH: f32 = 0.5;

/// Edge payload stored on the petgraph edge.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    /// Always finite and within [0, 1].
    pub strength: f32,
}

impl GraphEdge {
    pub fn new(raw_strength: f64) -> Self {
        Self {
            strength: sanitize_strength(raw_strength),
        }
    }
}

/// Clamp an unvalidated strength into [0, 1].
pub fn sanitize_strength(raw: f64) -> f32 {
    if raw.is_finite() {
        (raw as f32).clamp(0.0, 1.0)
    } else {
        DEFAULT_STRENGTH
    }
}
