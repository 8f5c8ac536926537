//! Layout solver entry point.
//!
//! `compute_layout` is a pure function of its snapshot: it validates the
//! input, seeds every node, runs a fixed number of guarded simulation steps,
//! clamps the result and lifts it to 3D. It never fails; any internal error
//! degrades to the empty layout.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::graph::{ExplanationGraph, GraphSnapshot};
use crate::spatial::SpatialIndex;

use super::config::LayoutConfig;
use super::depth::depth_for;
use super::force::{step, ForceModel, SimulationState};
use super::guard::{clamp_coord, sanitize, StabilityGuard};
use super::seed::{SeedSource, StdRngSeeds};

/// A finite 3D position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn distance(&self, other: &Position3) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Node id → position, in node input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutResult {
    positions: IndexMap<String, Position3>,
}

impl LayoutResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<Position3> {
        self.positions.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Position3)> {
        self.positions.iter().map(|(id, p)| (id.as_str(), *p))
    }
}

impl FromIterator<(String, Position3)> for LayoutResult {
    fn from_iter<I: IntoIterator<Item = (String, Position3)>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

/// Compute a layout with the default seed source seeded from `config`.
pub fn compute_layout(snapshot: &GraphSnapshot, config: &LayoutConfig) -> LayoutResult {
    let mut seeds = StdRngSeeds::new(config.random_seed);
    compute_layout_with_seeds(snapshot, config, &mut seeds)
}

/// Compute a layout with an explicit seed source.
pub fn compute_layout_with_seeds(
    snapshot: &GraphSnapshot,
    config: &LayoutConfig,
    seeds: &mut dyn SeedSource,
) -> LayoutResult {
    let graph = ExplanationGraph::from_snapshot(snapshot);
    layout_graph(&graph, config, seeds)
}

/// Compute a layout for an already validated graph.
pub fn layout_graph(
    graph: &ExplanationGraph,
    config: &LayoutConfig,
    seeds: &mut dyn SeedSource,
) -> LayoutResult {
    match try_layout(graph, config, seeds) {
        Ok(result) => result,
        Err(err) => {
            tracing::error!(%err, "layout solver failed; emitting empty layout");
            LayoutResult::empty()
        }
    }
}

fn try_layout(
    graph: &ExplanationGraph,
    config: &LayoutConfig,
    seeds: &mut dyn SeedSource,
) -> Result<LayoutResult> {
    if graph.is_empty() {
        return Ok(LayoutResult::empty());
    }

    let model = ForceModel::new(graph, config);
    let config = model.config();
    let bound = config.coordinate_bound;
    let n = graph.node_count();

    let mut seed_x = Vec::with_capacity(n);
    let mut seed_y = Vec::with_capacity(n);
    for (i, &lane_x) in model.lane_x().iter().enumerate() {
        let [jx, jy] = seeds.seed(i);
        let jx = sanitize(jx, 0.0).clamp(-1.0, 1.0);
        let jy = sanitize(jy, 0.0).clamp(-1.0, 1.0);
        seed_x.push(clamp_coord(lane_x + jx * config.seed_spread, bound));
        seed_y.push(clamp_coord(jy * config.seed_spread, bound));
    }

    let state = if n == 1 {
        // Nothing competes with the lane and centering pulls, so the node
        // sits exactly at its lane target on y = 0.
        SimulationState::from_seeds(&[clamp_coord(model.lane_x()[0], bound)], &[0.0])
    } else {
        simulate(&model, &seed_x, &seed_y)
    };

    if state.len() != n {
        return Err(LayoutError::BufferMismatch {
            expected: n,
            actual: state.len(),
        });
    }

    let mut positions = IndexMap::with_capacity(n);
    for (node, (&x, &y)) in graph.nodes().zip(state.pos_x.iter().zip(&state.pos_y)) {
        let ordinal = node.ordinal.index();
        let position = Position3::new(
            clamp_coord(x, bound),
            clamp_coord(y, bound),
            depth_for(ordinal, config.z_multiplier, config.z_modulus, config.z_spread),
        );
        if !position.is_finite() {
            return Err(LayoutError::NonFiniteOutput {
                node: node.id.clone(),
            });
        }
        positions.insert(node.id.clone(), position);
    }

    Ok(LayoutResult { positions })
}

fn simulate(model: &ForceModel, seed_x: &[f32], seed_y: &[f32]) -> SimulationState {
    let config = model.config();
    let guard = StabilityGuard::new(seed_x, seed_y, config.coordinate_bound);
    let mut index = SpatialIndex::new();
    let mut state = SimulationState::from_seeds(seed_x, seed_y);
    let mut repaired = 0usize;

    for _ in 0..config.iterations {
        state = step(state, model, &mut index);
        repaired += guard.repair(&mut state);
    }

    if repaired > 0 {
        tracing::warn!(
            repaired,
            nodes = state.len(),
            "non-finite coordinates replaced during simulation"
        );
    }

    state
}
