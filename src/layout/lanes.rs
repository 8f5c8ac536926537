//! Stage lanes along the horizontal axis.

use crate::graph::ExplanationGraph;

/// Target x for every lane, evenly spread across `width` in stage order.
///
/// `n > 1` lanes span `[-width/2, width/2]`; a single lane sits at 0.
pub fn lane_targets(stage_count: usize, width: f32) -> Vec<f32> {
    match stage_count {
        0 => Vec::new(),
        1 => vec![0.0],
        n => {
            let last = (n - 1) as f32;
            (0..n)
                .map(|i| -width / 2.0 + (i as f32 / last) * width)
                .collect()
        }
    }
}

/// Per-node lane target and whether the node feels the lane pull at all,
/// indexed by ordinal. Nodes without a known stage target 0 with no pull.
pub fn node_lane_targets(graph: &ExplanationGraph, width: f32) -> (Vec<f32>, Vec<bool>) {
    let lanes = lane_targets(graph.stage_count(), width);
    graph
        .nodes()
        .map(|node| match node.lane.and_then(|lane| lanes.get(lane.index())) {
            Some(&x) => (x, true),
            None => (0.0, false),
        })
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphSnapshot, Node, Stage};

    #[test]
    fn test_lane_targets_spacing() {
        assert!(lane_targets(0, 60.0).is_empty());
        assert_eq!(lane_targets(1, 60.0), vec![0.0]);
        assert_eq!(lane_targets(2, 60.0), vec![-30.0, 30.0]);
        assert_eq!(lane_targets(3, 60.0), vec![-30.0, 0.0, 30.0]);
        assert_eq!(lane_targets(5, 40.0), vec![-20.0, -10.0, 0.0, 10.0, 20.0]);
    }

    #[test]
    fn test_node_lane_targets_without_stage() {
        let snapshot = GraphSnapshot {
            stages: vec![
                Stage { id: "s1".into(), ..Default::default() },
                Stage { id: "s2".into(), ..Default::default() },
            ],
            nodes: vec![
                Node { id: "a".into(), stage_id: "s2".into(), ..Default::default() },
                Node { id: "b".into(), stage_id: "gone".into(), ..Default::default() },
            ],
            edges: vec![],
        };
        let graph = ExplanationGraph::from_snapshot(&snapshot);
        let (targets, pulled) = node_lane_targets(&graph, 60.0);

        assert_eq!(targets, vec![30.0, 0.0]);
        assert_eq!(pulled, vec![true, false]);
    }

    #[test]
    fn test_repeated_stage_leaves_empty_lane() {
        let stage = |id: &str| Stage { id: id.into(), ..Default::default() };
        let snapshot = GraphSnapshot {
            stages: vec![stage("s1"), stage("s1"), stage("s2")],
            nodes: vec![
                Node { id: "a".into(), stage_id: "s1".into(), ..Default::default() },
                Node { id: "b".into(), stage_id: "s2".into(), ..Default::default() },
            ],
            edges: vec![],
        };
        let graph = ExplanationGraph::from_snapshot(&snapshot);
        let (targets, _) = node_lane_targets(&graph, 60.0);

        assert_eq!(targets, vec![-30.0, 30.0]);
    }
}
