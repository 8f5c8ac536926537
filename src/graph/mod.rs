//! Graph data structures.
//!
//! The raw snapshot types mirror the collaborator's JSON; the validated
//! `ExplanationGraph` is what the solver reads.

mod edge;
mod engine;
mod node;
mod snapshot;

pub use edge::{sanitize_strength, GraphEdge, DEFAULT_STRENGTH};
pub use engine::{ExplanationGraph, ValidationReport};
pub use node::{sanitize_importance, GraphNode, LaneIndex, NodeOrdinal, DEFAULT_IMPORTANCE};
pub use snapshot::{Edge, GraphSnapshot, Node, NodeKind, Stage};
