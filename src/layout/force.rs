//! Lane-constrained force simulation.
//!
//! The simulation buffer is owned: [`step`] consumes a [`SimulationState`]
//! and returns the next one. Forces are applied in a fixed order each step:
//!
//! 1. **Link**: pulls linked pairs towards `link_distance`, with intensity
//!    scaled by edge strength.
//! 2. **Repulsion**: every pair pushes apart with magnitude falling off with
//!    squared distance.
//! 3. **Lane**: pulls x towards the node's stage lane.
//! 4. **Centering**: pulls y towards 0.
//! 5. **Collision**: a few passes pushing apart disks closer than twice the
//!    collision radius.
//!
//! Forces only adjust velocities; positions move once per step during
//! integration, after velocity decay.

use crate::graph::ExplanationGraph;
use crate::spatial::SpatialIndex;

use super::config::LayoutConfig;
use super::lanes::node_lane_targets;

/// Owned per-run simulation buffer (SoA layout).
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub pos_x: Vec<f32>,
    pub pos_y: Vec<f32>,
    pub vel_x: Vec<f32>,
    pub vel_y: Vec<f32>,
    /// Simulation heat; starts at 1 and decays towards 0.
    pub alpha: f32,
}

impl SimulationState {
    /// Start at rest from the given seed positions.
    pub fn from_seeds(seed_x: &[f32], seed_y: &[f32]) -> Self {
        let n = seed_x.len().min(seed_y.len());
        Self {
            pos_x: seed_x[..n].to_vec(),
            pos_y: seed_y[..n].to_vec(),
            vel_x: vec![0.0; n],
            vel_y: vec![0.0; n],
            alpha: 1.0,
        }
    }

    pub fn len(&self) -> usize {
        self.pos_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pos_x.is_empty()
    }
}

/// A link retained for the force model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub source: usize,
    pub target: usize,
    /// Effective strength: base link strength modulated by edge strength.
    pub strength: f32,
    /// Share of the correction applied to the target.
    pub bias: f32,
}

/// Immutable per-run inputs to [`step`].
#[derive(Debug, Clone)]
pub struct ForceModel {
    config: LayoutConfig,
    alpha_decay: f32,
    lane_x: Vec<f32>,
    laned: Vec<bool>,
    links: Vec<Link>,
}

impl ForceModel {
    /// Build the model. `config` is sanitised here.
    pub fn new(graph: &ExplanationGraph, config: &LayoutConfig) -> Self {
        let config = config.sanitized();
        let (lane_x, laned) = node_lane_targets(graph, config.lane_width);

        let degrees = graph.degrees();
        let links = graph
            .links()
            .map(|(source, target, edge)| {
                let (s, t) = (source.index(), target.index());
                let ds = degrees[s] as f32;
                let dt = degrees[t] as f32;
                Link {
                    source: s,
                    target: t,
                    strength: config.link_strength * (0.5 + 0.5 * edge.strength),
                    bias: ds / (ds + dt),
                }
            })
            .collect();

        Self {
            alpha_decay: config.alpha_decay(),
            config,
            lane_x,
            laned,
            links,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn node_count(&self) -> usize {
        self.lane_x.len()
    }

    /// Lane target x per node (0 for nodes without a lane).
    pub fn lane_x(&self) -> &[f32] {
        &self.lane_x
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }
}

/// Advance the simulation by one step.
pub fn step(mut state: SimulationState, model: &ForceModel, index: &mut SpatialIndex) -> SimulationState {
    if state.is_empty() {
        return state;
    }

    let config = &model.config;
    state.alpha += (0.0 - state.alpha) * model.alpha_decay;
    let alpha = state.alpha;

    apply_links(&mut state, &model.links, config.link_distance, alpha);
    apply_repulsion(&mut state, config.charge, config.min_charge_distance, alpha);
    apply_lane(&mut state, &model.lane_x, &model.laned, config.lane_strength, alpha);
    apply_centering(&mut state, config.center_strength, alpha);
    for _ in 0..config.collision_iterations {
        apply_collision(&mut state, config.collision_radius, index);
    }

    let keep = 1.0 - config.velocity_decay;
    for i in 0..state.len() {
        state.vel_x[i] *= keep;
        state.vel_y[i] *= keep;
        state.pos_x[i] += state.vel_x[i];
        state.pos_y[i] += state.vel_y[i];
    }

    state
}

fn apply_links(state: &mut SimulationState, links: &[Link], distance: f32, alpha: f32) {
    for (n, link) in links.iter().enumerate() {
        let (s, t) = (link.source, link.target);
        if s >= state.len() || t >= state.len() {
            continue;
        }

        let mut dx = state.pos_x[t] + state.vel_x[t] - state.pos_x[s] - state.vel_x[s];
        let mut dy = state.pos_y[t] + state.vel_y[t] - state.pos_y[s] - state.vel_y[s];
        if dx == 0.0 && dy == 0.0 {
            dx = jiggle(s, t ^ n);
            dy = jiggle(t, s ^ n);
        }

        let l = (dx * dx + dy * dy).sqrt();
        let k = (l - distance) / l * alpha * link.strength;
        dx *= k;
        dy *= k;

        state.vel_x[t] -= dx * link.bias;
        state.vel_y[t] -= dy * link.bias;
        state.vel_x[s] += dx * (1.0 - link.bias);
        state.vel_y[s] += dy * (1.0 - link.bias);
    }
}

fn apply_repulsion(state: &mut SimulationState, charge: f32, min_distance: f32, alpha: f32) {
    let min_sq = min_distance * min_distance;
    let n = state.len();

    for i in 0..n {
        for j in (i + 1)..n {
            let mut dx = state.pos_x[j] - state.pos_x[i];
            let mut dy = state.pos_y[j] - state.pos_y[i];
            if dx == 0.0 && dy == 0.0 {
                dx = jiggle(i, j);
                dy = jiggle(j, i);
            }

            let mut l = dx * dx + dy * dy;
            // Below the minimum distance the force stops growing, which keeps
            // near-coincident pairs bounded by |charge| * alpha / min_distance.
            if l < min_sq {
                l = (min_sq * l).sqrt();
            }

            let w = charge * alpha / l;
            state.vel_x[i] += dx * w;
            state.vel_y[i] += dy * w;
            state.vel_x[j] -= dx * w;
            state.vel_y[j] -= dy * w;
        }
    }
}

fn apply_lane(state: &mut SimulationState, lane_x: &[f32], laned: &[bool], strength: f32, alpha: f32) {
    for i in 0..state.len() {
        if laned.get(i).copied().unwrap_or(false) {
            let target = lane_x.get(i).copied().unwrap_or(0.0);
            state.vel_x[i] += (target - state.pos_x[i]) * strength * alpha;
        }
    }
}

fn apply_centering(state: &mut SimulationState, strength: f32, alpha: f32) {
    for i in 0..state.len() {
        state.vel_y[i] += (0.0 - state.pos_y[i]) * strength * alpha;
    }
}

fn apply_collision(state: &mut SimulationState, radius: f32, index: &mut SpatialIndex) {
    if radius <= 0.0 || state.len() < 2 {
        return;
    }

    let reach = radius * 2.0;
    let reach_sq = reach * reach;

    let predicted_x: Vec<f32> = (0..state.len()).map(|i| state.pos_x[i] + state.vel_x[i]).collect();
    let predicted_y: Vec<f32> = (0..state.len()).map(|i| state.pos_y[i] + state.vel_y[i]).collect();
    index.rebuild(&predicted_x, &predicted_y);

    for i in 0..state.len() {
        let mut candidates = index.in_radius(predicted_x[i], predicted_y[i], reach);
        candidates.sort_unstable();

        for j in candidates.into_iter().filter(|&j| j > i) {
            let xi = state.pos_x[i] + state.vel_x[i];
            let yi = state.pos_y[i] + state.vel_y[i];
            let mut dx = xi - state.pos_x[j] - state.vel_x[j];
            let mut dy = yi - state.pos_y[j] - state.vel_y[j];

            let mut l = dx * dx + dy * dy;
            if l >= reach_sq {
                continue;
            }
            if dx == 0.0 && dy == 0.0 {
                dx = jiggle(i, j);
                dy = jiggle(j, i);
                l = dx * dx + dy * dy;
            }

            let l = l.sqrt();
            let push = (reach - l) / l;
            dx *= push;
            dy *= push;

            // Equal radii: each disk takes half of the separation.
            state.vel_x[i] += dx * 0.5;
            state.vel_y[i] += dy * 0.5;
            state.vel_x[j] -= dx * 0.5;
            state.vel_y[j] -= dy * 0.5;
        }
    }
}

/// Tiny non-zero offset derived from a pair of slots, replacing the zero
/// direction between coincident points.
fn jiggle(a: usize, b: usize) -> f32 {
    let h = (a as u32)
        .wrapping_mul(0x9E37_79B1)
        .rotate_left(13)
        ^ (b as u32).wrapping_mul(0x85EB_CA6B);
    let magnitude = (1 + h % 1000) as f32 * 1e-6;
    if h & (1 << 16) != 0 { magnitude } else { -magnitude }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, GraphSnapshot, Node, Stage};

    fn two_lane_graph() -> ExplanationGraph {
        let snapshot = GraphSnapshot {
            stages: vec![
                Stage { id: "s1".into(), ..Default::default() },
                Stage { id: "s2".into(), ..Default::default() },
            ],
            nodes: vec![
                Node { id: "a".into(), stage_id: "s1".into(), ..Default::default() },
                Node { id: "b".into(), stage_id: "s2".into(), ..Default::default() },
            ],
            edges: vec![Edge {
                source: "a".into(),
                target: "b".into(),
                strength: 1.0,
                ..Default::default()
            }],
        };
        ExplanationGraph::from_snapshot(&snapshot)
    }

    #[test]
    fn test_model_links_and_bias() {
        let model = ForceModel::new(&two_lane_graph(), &LayoutConfig::default());
        assert_eq!(model.node_count(), 2);
        assert_eq!(model.lane_x(), &[-30.0, 30.0]);

        let link = model.links()[0];
        assert_eq!((link.source, link.target), (0, 1));
        assert_eq!(link.bias, 0.5);
        assert!((link.strength - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_step_decays_alpha() {
        let model = ForceModel::new(&two_lane_graph(), &LayoutConfig::default());
        let state = SimulationState::from_seeds(&[-25.0, 25.0], &[1.0, -1.0]);
        let next = step(state, &model, &mut SpatialIndex::new());
        assert!(next.alpha < 1.0);
        assert!(next.alpha > 0.9);
    }

    #[test]
    fn test_link_pulls_distant_pair_together() {
        let mut state = SimulationState::from_seeds(&[0.0, 40.0], &[0.0, 0.0]);
        let links = [Link { source: 0, target: 1, strength: 1.0, bias: 0.5 }];
        apply_links(&mut state, &links, 10.0, 1.0);
        assert!(state.vel_x[0] > 0.0);
        assert!(state.vel_x[1] < 0.0);
    }

    #[test]
    fn test_repulsion_is_bounded_for_coincident_points() {
        let mut state = SimulationState::from_seeds(&[5.0, 5.0], &[5.0, 5.0]);
        apply_repulsion(&mut state, -30.0, 1.0, 1.0);
        for v in state.vel_x.iter().chain(&state.vel_y) {
            assert!(v.is_finite());
            assert!(v.abs() <= 30.0 + 1e-3, "velocity {v} exceeds bound");
        }
        assert!(state.vel_x[0] != 0.0 || state.vel_y[0] != 0.0);
    }

    #[test]
    fn test_lane_only_pulls_laned_nodes() {
        let mut state = SimulationState::from_seeds(&[0.0, 0.0], &[0.0, 0.0]);
        apply_lane(&mut state, &[10.0, 10.0], &[true, false], 1.0, 0.5);
        assert_eq!(state.vel_x, vec![5.0, 0.0]);
    }

    #[test]
    fn test_centering_pulls_towards_zero() {
        let mut state = SimulationState::from_seeds(&[0.0, 0.0], &[10.0, -10.0]);
        apply_centering(&mut state, 0.1, 1.0);
        assert_eq!(state.vel_y, vec![-1.0, 1.0]);
    }

    #[test]
    fn test_collision_separates_overlapping_disks() {
        let mut state = SimulationState::from_seeds(&[0.0, 1.0], &[0.0, 0.0]);
        apply_collision(&mut state, 2.5, &mut SpatialIndex::new());
        // Overlap is 5 - 1 = 4, split evenly.
        assert!((state.vel_x[0] + 2.0).abs() < 1e-5);
        assert!((state.vel_x[1] - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_collision_ignores_separated_disks() {
        let mut state = SimulationState::from_seeds(&[0.0, 20.0], &[0.0, 0.0]);
        apply_collision(&mut state, 2.5, &mut SpatialIndex::new());
        assert_eq!(state.vel_x, vec![0.0, 0.0]);
    }

    #[test]
    fn test_jiggle_is_nonzero_and_tiny() {
        for a in 0..50 {
            for b in 0..50 {
                let j = jiggle(a, b);
                assert!(j != 0.0);
                assert!(j.abs() <= 1e-3);
            }
        }
    }
}
