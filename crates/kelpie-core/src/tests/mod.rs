use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{GraphEdge, GraphInput, GraphNode, Host, LayoutResult, Strategy};

mod bands;
mod safeguard;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum HostEvent {
    LoadingStarted,
    LargeGraphDetected(usize),
    LayoutPublished,
}

/// Records every engine notification and the last published result, standing in for the
/// host application's store.
#[derive(Default)]
pub(crate) struct RecordingHost {
    pub events: Mutex<Vec<HostEvent>>,
    pub result: Mutex<Option<LayoutResult>>,
    pub confirmed: AtomicBool,
}

impl RecordingHost {
    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn result(&self) -> Option<LayoutResult> {
        self.result.lock().unwrap().clone()
    }

    pub fn confirm_large_graph(&self) {
        self.confirmed.store(true, Ordering::SeqCst);
    }
}

impl Host for RecordingHost {
    fn loading_started(&self) {
        self.events.lock().unwrap().push(HostEvent::LoadingStarted);
    }

    fn large_graph_detected(&self, node_count: usize) {
        self.events
            .lock()
            .unwrap()
            .push(HostEvent::LargeGraphDetected(node_count));
    }

    fn layout_published(&self, result: &LayoutResult) {
        self.events.lock().unwrap().push(HostEvent::LayoutPublished);
        *self.result.lock().unwrap() = Some(result.clone());
    }

    fn large_graph_confirmed(&self) -> bool {
        self.confirmed.load(Ordering::SeqCst)
    }
}

pub(crate) fn node(id: &str) -> GraphNode {
    GraphNode {
        id: id.to_string(),
        name: id.replace('_', " "),
        kind: "task".to_string(),
        width: 50.0 + id.len() as f64 * 8.0,
        height: 40.0,
        layer: None,
        rank_hint: None,
    }
}

pub(crate) fn edge(source: &str, target: &str) -> GraphEdge {
    GraphEdge {
        source: source.to_string(),
        target: target.to_string(),
    }
}

pub(crate) fn input(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> GraphInput {
    GraphInput {
        nodes,
        edges,
        layers: Vec::new(),
        strategy: Strategy::Current,
        fonts_ready: true,
    }
}
