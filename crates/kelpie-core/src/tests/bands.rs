use futures::executor::block_on;
use std::sync::Arc;

use super::{RecordingHost, edge, input, node};
use crate::{Engine, GraphInput, GraphNode, LayoutOutcome, LayoutResult};

fn layered(id: &str, layer: &str) -> GraphNode {
    GraphNode {
        layer: Some(layer.to_string()),
        ..node(id)
    }
}

fn run(request: GraphInput) -> LayoutResult {
    let engine = Engine::new(Arc::new(RecordingHost::default()));
    match block_on(engine.compute_layout(Some(request))).unwrap() {
        LayoutOutcome::Published(result) => result,
        other => panic!("expected a published layout, got {other:?}"),
    }
}

fn layered_request() -> GraphInput {
    let mut request = input(
        vec![
            layered("raw_data", "raw"),
            layered("clean_data", "intermediate"),
            layered("model", "output"),
        ],
        vec![edge("raw_data", "clean_data"), edge("clean_data", "model")],
    );
    request.layers = vec![
        "raw".to_string(),
        "intermediate".to_string(),
        "output".to_string(),
    ];
    request
}

#[test]
fn an_unlayered_graph_has_no_bands() {
    let result = run(input(vec![node("a"), node("b")], vec![edge("a", "b")]));
    assert!(result.layers.is_empty());
}

#[test]
fn bands_follow_the_declared_layer_order() {
    let result = run(layered_request());
    let ids: Vec<&str> = result.layers.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["raw", "intermediate", "output"]);
}

#[test]
fn bands_tile_the_canvas_without_overlap() {
    let result = run(layered_request());
    assert_eq!(result.layers.first().unwrap().top, 0.0);
    assert_eq!(result.layers.last().unwrap().bottom, result.size.height);
    for pair in result.layers.windows(2) {
        assert_eq!(pair[0].bottom, pair[1].top);
    }
}

#[test]
fn every_member_box_sits_inside_its_band() {
    let result = run(layered_request());
    for n in &result.nodes {
        let layer = match n.id.as_str() {
            "raw_data" => "raw",
            "clean_data" => "intermediate",
            _ => "output",
        };
        let band = result.layers.iter().find(|b| b.id == layer).unwrap();
        assert!(n.y - n.height / 2.0 >= band.top);
        assert!(n.y + n.height / 2.0 <= band.bottom);
    }
}

#[test]
fn layers_without_visible_members_get_no_band() {
    let mut request = layered_request();
    request.layers.insert(1, "ghost".to_string());
    let result = run(request);
    let ids: Vec<&str> = result.layers.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["raw", "intermediate", "output"]);
}
