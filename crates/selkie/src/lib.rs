#![forbid(unsafe_code)]

//! Layered DAG layout algorithms for pipeline graphs.
//!
//! `selkie` is the headless layout engine behind `kelpie-core`: given the visible nodes and
//! edges of a pipeline graph (sizes precomputed by the host) it assigns every node a rank,
//! orders each rank to reduce edge crossings, converts rank/order into concrete coordinates,
//! and routes every edge as a polyline. All entry points are pure and synchronous; callers
//! that need to keep an interactive thread responsive run them on their own worker.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

mod error;
pub use error::{Error, Result};

mod order;
mod position;
mod rank;
mod route;

/// A node as the layout sees it: an identity plus a precomputed box.
///
/// `layer` pins the node into a named horizontal band (see [`Graph::layers`]); `rank_hint` is
/// an optional ordering seed from an upstream topological pass. Neither is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub layer: Option<String>,
    #[serde(default)]
    pub rank_hint: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

/// Layout input: visible nodes and edges, plus the declared top-to-bottom layer sequence.
///
/// The edge set must form a DAG over `nodes`; cycles are an upstream precondition violation,
/// not something this crate detects or repairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Layer ids in declared order. Empty when the graph is unlayered.
    #[serde(default)]
    pub layers: Vec<String>,
}

impl Graph {
    /// Rejects edges whose endpoints are missing from the node set.
    pub fn validate(&self) -> Result<()> {
        let mut node_exists: std::collections::BTreeSet<&str> = std::collections::BTreeSet::new();
        for n in &self.nodes {
            node_exists.insert(n.id.as_str());
        }
        for e in &self.edges {
            if !node_exists.contains(e.source.as_str()) || !node_exists.contains(e.target.as_str())
            {
                return Err(Error::InvalidReference {
                    source: e.source.clone(),
                    target: e.target.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Which within-rank ordering heuristic to run.
///
/// The two variants share one contract and differ only in sweep count and tie-break details.
/// Keeping them as a tagged variant keeps each heuristic's edge cases isolated and
/// independently testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Bounded alternating barycenter sweeps, best layering by crossing count.
    #[default]
    Current,
    /// A single downward median pass, retained for backward-compatible visual output on
    /// previously-saved layouts.
    Legacy,
}

/// Spacing constants. All distances are in the same unit as node sizes (pixels, typically).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Horizontal gap between neighboring node boxes in the same rank.
    pub node_sep: f64,
    /// Vertical gap between the node boxes of adjacent ranks.
    pub rank_sep: f64,
    /// Padding around the bounding box of all placed nodes.
    pub padding: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            node_sep: 50.0,
            rank_sep: 70.0,
            padding: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// A node with final center coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rank: i32,
    pub order: usize,
}

/// An edge with a routed polyline: source exit point, intermediate bends (one per skipped
/// rank), target entry point. Always at least two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedEdge {
    pub source: String,
    pub target: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub nodes: Vec<PlacedNode>,
    pub edges: Vec<RoutedEdge>,
    pub size: Size,
}

/// Predecessor/successor lists in input order, computed once per layout and shared by the
/// rank and order passes.
pub(crate) struct Adjacency {
    pub preds: FxHashMap<String, Vec<String>>,
    pub succs: FxHashMap<String, Vec<String>>,
}

impl Adjacency {
    pub(crate) fn build(graph: &Graph) -> Self {
        let mut preds: FxHashMap<String, Vec<String>> = FxHashMap::default();
        let mut succs: FxHashMap<String, Vec<String>> = FxHashMap::default();
        for n in &graph.nodes {
            preds.entry(n.id.clone()).or_default();
            succs.entry(n.id.clone()).or_default();
        }
        for e in &graph.edges {
            succs
                .entry(e.source.clone())
                .or_default()
                .push(e.target.clone());
            preds
                .entry(e.target.clone())
                .or_default()
                .push(e.source.clone());
        }
        Self { preds, succs }
    }
}

/// Headless layout entry point: rank -> order -> position -> route.
///
/// Deterministic: identical inputs (including `strategy`) produce a field-for-field identical
/// [`Layout`]. Nodes and edges come back in input order.
pub fn layout(graph: &Graph, strategy: Strategy, options: &LayoutOptions) -> Result<Layout> {
    graph.validate()?;

    let adjacency = Adjacency::build(graph);
    let ranks = rank::assign_ranks(graph, &adjacency);
    let layering = order::order_ranks(graph, &adjacency, &ranks, strategy);
    let coords = position::assign_coordinates(graph, &layering, options);
    let edges = route::route_edges(graph, &ranks, &coords, options);

    let mut order_of: FxHashMap<&str, usize> = FxHashMap::default();
    for row in &layering {
        for (i, id) in row.iter().enumerate() {
            order_of.insert(id.as_str(), i);
        }
    }

    let nodes = graph
        .nodes
        .iter()
        .map(|n| {
            let pos = coords
                .positions
                .get(n.id.as_str())
                .copied()
                .unwrap_or(Point { x: 0.0, y: 0.0 });
            PlacedNode {
                id: n.id.clone(),
                x: pos.x,
                y: pos.y,
                width: n.width,
                height: n.height,
                rank: ranks.get(n.id.as_str()).copied().unwrap_or(0),
                order: order_of.get(n.id.as_str()).copied().unwrap_or(0),
            }
        })
        .collect();

    Ok(Layout {
        nodes,
        edges,
        size: coords.size,
    })
}
