//! Browser tests for the wasm-bindgen surface.

#![cfg(target_arch = "wasm32")]

use explain_graph_wasm::animation::EntranceAnimation;
use explain_graph_wasm::graph::{Edge, Node, Stage};
use explain_graph_wasm::{
    compute_layout_js, node_color_js, renderable_edges_js, ExplainLayoutSession, GraphSnapshot,
    LayoutResult,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn two_stage() -> GraphSnapshot {
    let stage = |id: &str| Stage { id: id.into(), ..Default::default() };
    let node = |id: &str, s: &str| Node {
        id: id.into(),
        stage_id: s.into(),
        importance: 0.5,
        ..Default::default()
    };
    let edge = |a: &str, b: &str| Edge {
        source: a.into(),
        target: b.into(),
        relation: "supports".into(),
        strength: 0.5,
    };
    GraphSnapshot {
        stages: vec![stage("s1"), stage("s2")],
        nodes: vec![node("a", "s1"), node("b", "s1"), node("c", "s2"), node("d", "s2")],
        edges: vec![edge("a", "c"), edge("b", "d")],
    }
}

fn to_js(snapshot: &GraphSnapshot) -> JsValue {
    serde_wasm_bindgen::to_value(snapshot).unwrap()
}

#[wasm_bindgen_test]
fn test_compute_layout_from_js() {
    let value = compute_layout_js(to_js(&two_stage()), JsValue::UNDEFINED).unwrap();
    let layout: LayoutResult = serde_wasm_bindgen::from_value(value.clone()).unwrap();
    assert_eq!(layout.len(), 4);
    assert!(layout.iter().all(|(_, p)| p.is_finite()));

    let edges = renderable_edges_js(to_js(&two_stage()), value, None).unwrap();
    assert_eq!(js_sys::Array::from(&edges).length(), 2);
}

#[wasm_bindgen_test]
fn test_undecodable_graph_is_empty_layout() {
    let value = compute_layout_js(JsValue::from_str("not a graph"), JsValue::NULL).unwrap();
    let layout: LayoutResult = serde_wasm_bindgen::from_value(value).unwrap();
    assert!(layout.is_empty());
}

#[wasm_bindgen_test]
fn test_session_from_js() {
    let mut session = ExplainLayoutSession::new(JsValue::UNDEFINED, JsValue::UNDEFINED);
    assert!(session.sync(to_js(&two_stage()), 1.0, 0.0, 0.0));
    assert!(!session.sync(to_js(&two_stage()), 1.0, 0.0, 10.0));
    assert_eq!(session.state(), "running");

    assert_eq!(session.frame(1500.0), 1.0);
    assert_eq!(session.state(), "complete");
    assert!(session.take_capture_request(2000.0));
    assert!(!session.take_capture_request(2000.0));
}

#[wasm_bindgen_test]
fn test_entrance_animation_starts_idle() {
    let animation = EntranceAnimation::new(None);
    assert_eq!(animation.state(), "idle");
    assert_eq!(animation.progress(), 0.0);
    animation.reset();
    assert_eq!(animation.state(), "idle");
}

#[wasm_bindgen_test]
fn test_node_color_falls_back_to_context() {
    assert_eq!(node_color_js("unknown"), node_color_js("context"));
    assert_ne!(node_color_js("fact"), node_color_js("context"));
}

#[wasm_bindgen_test]
fn test_undecodable_config_falls_back_to_defaults() {
    let value = compute_layout_js(to_js(&two_stage()), JsValue::from_str("not a config")).unwrap();
    let layout: LayoutResult = serde_wasm_bindgen::from_value(value).unwrap();
    assert_eq!(layout.len(), 4);
}

#[wasm_bindgen_test]
fn test_session_node_style_and_report() {
    let mut session = ExplainLayoutSession::new(JsValue::UNDEFINED, JsValue::UNDEFINED);
    session.sync(to_js(&two_stage()), 1.0, 0.0, 0.0);

    assert!(session.node_style("a").unwrap().is_object());
    assert!(session.node_style("missing").unwrap().is_undefined());
    assert!(session.report().unwrap().is_object());
}
