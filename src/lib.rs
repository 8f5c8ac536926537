//! Explain Graph - WASM Module
//!
//! Lane-constrained force layout for explanation graphs, plus the entrance
//! animation that reveals them. Compiled to WebAssembly and exposed to the
//! renderer via wasm-bindgen; every piece is also usable natively.
//!
//! # Architecture
//!
//! - `graph`: input snapshot types and the validated petgraph graph
//! - `layout`: the lane-constrained force solver
//! - `spatial`: R-tree neighbour index used by collision avoidance
//! - `animation`: eased entrance progress and frame scheduling
//! - `render`: renderable edges, visual scaling and node colours
//! - `session`: one display's snapshot, layout and animation lifecycle
//! - `console`: `tracing` output to the browser console

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod animation;
pub mod console;
pub mod error;
pub mod graph;
pub mod layout;
pub mod render;
pub mod session;
pub mod spatial;

pub use error::LayoutError;
pub use graph::{ExplanationGraph, GraphSnapshot, NodeKind};
pub use layout::{compute_layout, LayoutConfig, LayoutResult, Position3};
pub use session::{FrameView, LayoutSession};

use animation::{AnimationConfig, ManualScheduler};
use render::{renderable_edges, VisualScale, MIN_EDGE_LENGTH};

/// Initialize the WASM module: panic messages and `tracing` go to the
/// browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::init_tracing(tracing::Level::INFO);
}

// =========================================================================
// Free functions
// =========================================================================

/// Compute the layout of a graph snapshot.
///
/// `graph` is `{ stages, nodes, edges }`; `config` is an optional partial
/// `LayoutConfig`. Returns an object mapping node id to `{ x, y, z }`. A
/// snapshot that cannot be decoded lays out as the empty graph.
#[wasm_bindgen(js_name = computeLayout)]
pub fn compute_layout_js(graph: JsValue, config: JsValue) -> Result<JsValue, JsValue> {
    let snapshot = decode_snapshot(graph);
    let config: LayoutConfig = decode_or_default(config, "layout config");
    to_js(&compute_layout(&snapshot, &config))
}

/// Edges of `graph` that are safe to draw against `layout`.
#[wasm_bindgen(js_name = renderableEdges)]
pub fn renderable_edges_js(
    graph: JsValue,
    layout: JsValue,
    min_length: Option<f32>,
) -> Result<JsValue, JsValue> {
    let snapshot = decode_snapshot(graph);
    let layout: LayoutResult = decode_or_default(layout, "layout");
    to_js(&renderable_edges(&snapshot, &layout, min_length.unwrap_or(MIN_EDGE_LENGTH)))
}

/// `{ opacity, nodeScale, lineWidth }` at `progress` for a node of
/// `importance`.
#[wasm_bindgen(js_name = visualScale)]
pub fn visual_scale_js(progress: f32, importance: f32) -> Result<JsValue, JsValue> {
    to_js(&VisualScale::at(progress, importance))
}

/// Hex colour for a node type tag. Unknown tags colour as `context`.
#[wasm_bindgen(js_name = nodeColor)]
pub fn node_color_js(kind: &str) -> String {
    render::color_for(parse_kind(kind)).to_string()
}

// =========================================================================
// Session
// =========================================================================

/// A display's layout session, driven by the host's own frame loop.
///
/// The host calls `frame(now)` from its render loop while `state` is
/// `"running"`.
#[wasm_bindgen]
pub struct ExplainLayoutSession {
    session: LayoutSession<ManualScheduler>,
}

#[wasm_bindgen]
impl ExplainLayoutSession {
    /// Create a session. Both configs are optional partial objects.
    #[wasm_bindgen(constructor)]
    pub fn new(layout_config: JsValue, animation_config: JsValue) -> Self {
        let layout_config: LayoutConfig = decode_or_default(layout_config, "layout config");
        let animation_config: AnimationConfig =
            decode_or_default(animation_config, "animation config");
        Self {
            session: LayoutSession::new(layout_config, animation_config, ManualScheduler::new()),
        }
    }

    /// Recompute the layout if `(snapshot_key, replay_token)` changed.
    ///
    /// Returns true when a new layout was computed.
    pub fn sync(&mut self, graph: JsValue, snapshot_key: f64, replay_token: f64, now: f64) -> bool {
        let snapshot = decode_snapshot(graph);
        self.session
            .sync(&snapshot, snapshot_key.to_bits(), replay_token.to_bits(), now)
    }

    /// Replay the current snapshot from scratch.
    pub fn replay(&mut self, now: f64) -> bool {
        self.session.replay(now)
    }

    /// Advance the entrance animation and return its progress.
    pub fn frame(&mut self, now: f64) -> f32 {
        self.session.frame(now).progress
    }

    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.session.driver().state().as_str().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn progress(&self) -> f32 {
        self.session.driver().progress()
    }

    pub fn layout(&self) -> Result<JsValue, JsValue> {
        to_js(self.session.layout())
    }

    #[wasm_bindgen(js_name = renderableEdges)]
    pub fn renderable_edges(&self, min_length: Option<f32>) -> Result<JsValue, JsValue> {
        let Some(snapshot) = self.session.snapshot() else {
            return to_js(&Vec::<render::RenderableEdge>::new());
        };
        to_js(&renderable_edges(
            snapshot,
            self.session.layout(),
            min_length.unwrap_or(MIN_EDGE_LENGTH),
        ))
    }

    /// `{ color, opacity, nodeScale, lineWidth }` for node `id` at the
    /// current progress, or `undefined` for an unknown id.
    #[wasm_bindgen(js_name = nodeStyle)]
    pub fn node_style(&self, id: &str) -> Result<JsValue, JsValue> {
        match self.session.node_style(id) {
            Some(style) => to_js(&style),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Counts of what validation repaired in the current snapshot.
    pub fn report(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.report())
    }

    /// True once per layout, after its entrance animation has settled.
    #[wasm_bindgen(js_name = takeCaptureRequest)]
    pub fn take_capture_request(&mut self, now: f64) -> bool {
        self.session.take_capture_request(now)
    }

    pub fn clear(&mut self) {
        self.session.clear();
    }
}

// =========================================================================
// JS conversion
// =========================================================================

fn decode_snapshot(value: JsValue) -> GraphSnapshot {
    decode_or_default(value, "graph snapshot")
}

/// Decode `value`, falling back to the default for `undefined`, `null` or
/// anything undecodable.
fn decode_or_default<T: DeserializeOwned + Default>(value: JsValue, what: &str) -> T {
    if value.is_undefined() || value.is_null() {
        return T::default();
    }
    match serde_wasm_bindgen::from_value(value) {
        Ok(decoded) => decoded,
        Err(err) => {
            tracing::warn!(%err, what, "could not decode input; using defaults");
            T::default()
        }
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).map_err(JsValue::from)
}

fn parse_kind(tag: &str) -> NodeKind {
    match tag {
        "intent" => NodeKind::Intent,
        "fact" => NodeKind::Fact,
        "intermediate" => NodeKind::Intermediate,
        "conclusion" => NodeKind::Conclusion,
        "constraint" => NodeKind::Constraint,
        _ => NodeKind::Context,
    }
}
