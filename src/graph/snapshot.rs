//! Graph snapshot: the raw input handed over by the answer-generation flow.
//!
//! The snapshot mirrors the JSON the collaborator produces. Every array is
//! optional (a missing array reads as empty) and scalar fields are left
//! unvalidated; repair happens once in [`ExplanationGraph::from_snapshot`].
//!
//! [`ExplanationGraph::from_snapshot`]: super::ExplanationGraph::from_snapshot

use serde::{Deserialize, Deserializer, Serialize};

/// A named phase of the reasoning trace. Its position in the stage list is
/// its lane index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stage {
    pub id: String,
    pub label: String,
    pub description: String,
    /// Informational only, never read by the layout.
    #[serde(deserialize_with = "lenient_f64")]
    pub weight: f64,
}

/// Node type tag. Only drives colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Intent,
    Fact,
    Intermediate,
    Conclusion,
    Constraint,
    #[default]
    #[serde(other)]
    Context,
}

/// A concept, fact or claim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Nominally in [0, 1]; callers may send anything.
    #[serde(default = "missing_number", deserialize_with = "lenient_f64")]
    pub importance: f64,
    #[serde(alias = "stageId")]
    pub stage_id: String,
}

/// A directed relation between two node ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub relation: String,
    #[serde(default = "missing_number", deserialize_with = "lenient_f64")]
    pub strength: f64,
}

/// Stages, nodes and edges at one instant. Never mutated by the solver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphSnapshot {
    pub stages: Vec<Stage>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// An absent number reads like `null`.
fn missing_number() -> f64 {
    f64::NAN
}

/// Accepts numbers and `null`; `null` becomes NaN so the validator treats it
/// like any other non-finite value.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_arrays_read_as_empty() {
        let snapshot: GraphSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.is_empty());
        assert!(snapshot.stages.is_empty());
        assert!(snapshot.edges.is_empty());
    }

    #[test]
    fn test_node_fields_and_aliases() {
        let json = r#"{
            "stages": [{"id": "s1", "label": "Parse", "description": "", "weight": 1}],
            "nodes": [
                {"id": "a", "label": "A", "type": "fact", "importance": 0.7, "stage_id": "s1"},
                {"id": "b", "label": "B", "type": "conclusion", "importance": null, "stageId": "s1"}
            ],
            "edges": [{"source": "a", "target": "b", "relation": "supports", "strength": 0.5}]
        }"#;
        let snapshot: GraphSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.nodes[0].kind, NodeKind::Fact);
        assert_eq!(snapshot.nodes[0].stage_id, "s1");
        assert_eq!(snapshot.nodes[1].stage_id, "s1");
        assert!(snapshot.nodes[1].importance.is_nan());
        assert_eq!(snapshot.edges[0].strength, 0.5);
    }

    #[test]
    fn test_unknown_kind_falls_back_to_context() {
        let node: Node = serde_json::from_str(r#"{"id": "x", "type": "hunch"}"#).unwrap();
        assert_eq!(node.kind, NodeKind::Context);
    }

    #[test]
    fn test_absent_numbers_read_as_nan() {
        let node: Node = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        let edge: Edge = serde_json::from_str(r#"{"source": "x", "target": "y"}"#).unwrap();
        assert!(node.importance.is_nan());
        assert!(edge.strength.is_nan());
    }
}
