//! ExplanationGraph - validated graph structure.
//!
//! The ExplanationGraph is built once from a [`GraphSnapshot`] at the input
//! boundary. Dangling references are repaired here so the solver never has
//! to re-check them: edges to unknown nodes and self-loops are dropped,
//! duplicate node ids keep their first occurrence, and stage references are
//! resolved to lane indices. A stage's lane is its position in the stage
//! list; a repeated stage id keeps its first position and leaves an empty
//! lane behind.

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Directed;
use serde::Serialize;
use std::collections::HashMap;

use super::edge::GraphEdge;
use super::node::{sanitize_importance, GraphNode, LaneIndex, NodeOrdinal};
use super::snapshot::GraphSnapshot;

/// What boundary validation had to repair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Stages whose id repeats an earlier stage (their lane stays empty).
    pub duplicate_stages: usize,
    /// Nodes dropped because an earlier node used the same id.
    pub duplicate_nodes: usize,
    /// Edges dropped because an endpoint id is not in the node set.
    pub dangling_edges: usize,
    /// Edges dropped because source and target are the same node.
    pub self_loops: usize,
    /// Nodes whose `stage_id` names no stage (kept, but without lane pull).
    pub dangling_stage_refs: usize,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// The validated graph consumed by the layout solver.
///
/// This struct manages:
/// - Graph topology via petgraph
/// - Map from caller-supplied node ids to internal indices
/// - The number of stages (lanes)
pub struct ExplanationGraph {
    /// Node indices coincide with ordinals since nodes are never removed.
    graph: StableGraph<GraphNode, GraphEdge, Directed>,

    /// Map from caller node id to petgraph NodeIndex
    id_to_index: HashMap<String, NodeIndex>,

    /// Number of stages (lanes) in the snapshot, repeats included
    stage_count: usize,

    report: ValidationReport,
}

impl ExplanationGraph {
    /// Validate a snapshot and build the graph.
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Self {
        let mut report = ValidationReport::default();

        let mut lanes: HashMap<&str, LaneIndex> = HashMap::with_capacity(snapshot.stages.len());
        for (position, stage) in snapshot.stages.iter().enumerate() {
            if lanes.contains_key(stage.id.as_str()) {
                report.duplicate_stages += 1;
                continue;
            }
            lanes.insert(stage.id.as_str(), LaneIndex(position as u32));
        }

        let mut graph =
            StableGraph::with_capacity(snapshot.nodes.len(), snapshot.edges.len());
        let mut id_to_index = HashMap::with_capacity(snapshot.nodes.len());

        for node in &snapshot.nodes {
            if id_to_index.contains_key(&node.id) {
                report.duplicate_nodes += 1;
                continue;
            }

            let lane = lanes.get(node.stage_id.as_str()).copied();
            if lane.is_none() {
                report.dangling_stage_refs += 1;
            }

            let ordinal = NodeOrdinal(graph.node_count() as u32);
            let index = graph.add_node(GraphNode {
                id: node.id.clone(),
                ordinal,
                kind: node.kind,
                importance: sanitize_importance(node.importance),
                lane,
            });
            id_to_index.insert(node.id.clone(), index);
        }

        for edge in &snapshot.edges {
            let (Some(&source), Some(&target)) =
                (id_to_index.get(&edge.source), id_to_index.get(&edge.target))
            else {
                report.dangling_edges += 1;
                continue;
            };
            if source == target {
                report.self_loops += 1;
                continue;
            }
            graph.add_edge(source, target, GraphEdge::new(edge.strength));
        }

        if !report.is_clean() {
            log_repairs(&report);
        }

        Self {
            graph,
            id_to_index,
            stage_count: snapshot.stages.len(),
            report,
        }
    }

    /// Number of surviving nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of stages (lanes).
    pub fn stage_count(&self) -> usize {
        self.stage_count
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// What validation repaired while building this graph.
    pub fn report(&self) -> ValidationReport {
        self.report
    }

    /// Look up a node by its caller-supplied id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.id_to_index
            .get(id)
            .and_then(|&index| self.graph.node_weight(index))
    }

    /// Nodes in ordinal order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph
            .node_indices()
            .filter_map(move |index| self.graph.node_weight(index))
    }

    /// Retained edges as `(source ordinal, target ordinal, edge)`.
    pub fn links(&self) -> impl Iterator<Item = (NodeOrdinal, NodeOrdinal, &GraphEdge)> {
        self.graph.edge_references().filter_map(move |edge| {
            let source = self.graph.node_weight(edge.source())?.ordinal;
            let target = self.graph.node_weight(edge.target())?.ordinal;
            Some((source, target, edge.weight()))
        })
    }

    /// Undirected degree per node, indexed by ordinal.
    pub fn degrees(&self) -> Vec<u32> {
        let mut degrees = vec![0u32; self.graph.node_count()];
        for (source, target, _) in self.links() {
            degrees[source.index()] += 1;
            degrees[target.index()] += 1;
        }
        degrees
    }
}

fn log_repairs(report: &ValidationReport) {
    if report.duplicate_nodes > 0 {
        tracing::warn!(
            dropped = report.duplicate_nodes,
            "graph snapshot contains duplicate node ids; keeping first occurrence"
        );
    }
    if report.duplicate_stages > 0 {
        tracing::warn!(
            repeated = report.duplicate_stages,
            "graph snapshot repeats stage ids; nodes use the first lane"
        );
    }
    if report.dangling_edges > 0 || report.self_loops > 0 {
        tracing::debug!(
            dangling = report.dangling_edges,
            self_loops = report.self_loops,
            "dropped edges excluded from the force model"
        );
    }
    if report.dangling_stage_refs > 0 {
        tracing::debug!(
            nodes = report.dangling_stage_refs,
            "nodes reference unknown stages and receive no lane pull"
        );
    }
}
