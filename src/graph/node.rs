//! Validated node type and related identifiers.
//!
//! A validated node carries:
//! - A stable ordinal (position among surviving nodes, in input order)
//! - Its sanitised importance
//! - The lane it is pulled towards, if its stage exists

use super::snapshot::NodeKind;

/// Stable per-layout node ordinal.
///
/// Assigned in input order to nodes that survive validation, so re-running
/// layout on the same ordered node list yields the same ordinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeOrdinal(pub u32);

impl NodeOrdinal {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a stage in the stage list, i.e. its horizontal lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LaneIndex(pub u32);

impl LaneIndex {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Importance used when the caller sent a non-finite value.
pub const DEFAULT_IMPORTANCE: f32 = 0.5;

/// A node after boundary validation.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: String,
    pub ordinal: NodeOrdinal,
    pub kind: NodeKind,
    /// Always finite and within [0, 1].
    pub importance: f32,
    /// `None` when `stage_id` names no known stage: no lane pull.
    pub lane: Option<LaneIndex>,
}

/// Clamp an unvalidated importance into [0, 1].
pub fn sanitize_importance(raw: f64) -> f32 {
    if raw.is_finite() {
        (raw as f32).clamp(0.0, 1.0)
    } else {
        DEFAULT_IMPORTANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newtype_indices() {
        assert_eq!(NodeOrdinal(42).index(), 42);
        assert_eq!(LaneIndex(3).index(), 3);
        assert!(NodeOrdinal(1) < NodeOrdinal(2));
    }

    #[test]
    fn test_sanitize_importance() {
        assert_eq!(sanitize_importance(0.25), 0.25);
        assert_eq!(sanitize_importance(4.0), 1.0);
        assert_eq!(sanitize_importance(-1.0), 0.0);
        assert_eq!(sanitize_importance(f64::NAN), DEFAULT_IMPORTANCE);
        assert_eq!(sanitize_importance(f64::INFINITY), DEFAULT_IMPORTANCE);
    }
}
