//! Layout session: one display's view of the current snapshot.
//!
//! A session hands a snapshot to the solver exactly once per
//! `(snapshot key, replay token)` pair and restarts the entrance animation
//! whenever that pair changes. It also decides when a freshly computed layout
//! has settled enough for a one-off still-image capture.

use crate::animation::{AnimationConfig, AnimationDriver, AnimationState, FrameScheduler};
use crate::graph::{ExplanationGraph, GraphSnapshot, ValidationReport};
use crate::layout::{layout_graph, LayoutConfig, LayoutResult, StdRngSeeds};
use crate::render::NodeStyle;

/// What the renderer reads each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameView {
    pub progress: f32,
    pub state: AnimationState,
}

pub struct LayoutSession<S: FrameScheduler> {
    layout_config: LayoutConfig,
    driver: AnimationDriver<S>,
    layout: LayoutResult,
    /// `(snapshot key, replay token)` the current layout was computed for.
    identity: Option<(u64, u64)>,
    snapshot: Option<GraphSnapshot>,
    graph: Option<ExplanationGraph>,
    local_replays: u64,
    capture_pending: bool,
}

impl<S: FrameScheduler> LayoutSession<S> {
    pub fn new(layout_config: LayoutConfig, animation_config: AnimationConfig, scheduler: S) -> Self {
        Self {
            layout_config,
            driver: AnimationDriver::new(animation_config, scheduler),
            layout: LayoutResult::empty(),
            identity: None,
            snapshot: None,
            graph: None,
            local_replays: 0,
            capture_pending: false,
        }
    }

    /// Bring the session up to date with the caller's snapshot.
    ///
    /// Returns true when the layout was recomputed (and the animation
    /// restarted); an unchanged key and token is a no-op.
    pub fn sync(&mut self, snapshot: &GraphSnapshot, snapshot_key: u64, replay_token: u64, now: f64) -> bool {
        let identity = (snapshot_key, replay_token);
        if self.identity == Some(identity) {
            return false;
        }

        self.identity = Some(identity);
        self.snapshot = Some(snapshot.clone());
        self.local_replays = 0;
        self.recompute(now);
        true
    }

    /// Replay the current snapshot. Counts as a new replay token, so the
    /// layout is recomputed from scratch.
    pub fn replay(&mut self, now: f64) -> bool {
        if self.snapshot.is_none() {
            return false;
        }
        self.local_replays += 1;
        self.recompute(now);
        true
    }

    /// Advance the animation to `now`.
    pub fn frame(&mut self, now: f64) -> FrameView {
        let progress = self.driver.tick(now);
        FrameView {
            progress,
            state: self.driver.state(),
        }
    }

    /// True exactly once per computed, non-empty layout, after its entrance
    /// animation has settled.
    pub fn take_capture_request(&mut self, now: f64) -> bool {
        if self.capture_pending && self.driver.is_settled(now) {
            self.capture_pending = false;
            return true;
        }
        false
    }

    /// Drop the current layout and stop animating.
    pub fn clear(&mut self) {
        self.driver.reset();
        self.layout = LayoutResult::empty();
        self.identity = None;
        self.snapshot = None;
        self.graph = None;
        self.capture_pending = false;
    }

    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    pub fn snapshot(&self) -> Option<&GraphSnapshot> {
        self.snapshot.as_ref()
    }

    /// Style of node `id` at the current animation progress.
    pub fn node_style(&self, id: &str) -> Option<NodeStyle> {
        let node = self.graph.as_ref()?.node(id)?;
        Some(NodeStyle::at(node, self.driver.progress()))
    }

    /// What validation repaired in the current snapshot.
    pub fn report(&self) -> ValidationReport {
        self.graph
            .as_ref()
            .map(ExplanationGraph::report)
            .unwrap_or_default()
    }

    pub fn driver(&self) -> &AnimationDriver<S> {
        &self.driver
    }

    fn recompute(&mut self, now: f64) {
        let Some(snapshot) = self.snapshot.as_ref() else {
            return;
        };

        let graph = ExplanationGraph::from_snapshot(snapshot);
        let mut seeds = StdRngSeeds::new(self.layout_config.random_seed);

        self.driver.reset();
        self.layout = layout_graph(&graph, &self.layout_config, &mut seeds);
        self.graph = Some(graph);
        tracing::debug!(
            nodes = self.layout.len(),
            replays = self.local_replays,
            "layout recomputed"
        );

        self.capture_pending = !self.layout.is_empty();
        self.driver.start(now);
    }
}
