//! Request and result records for one layout computation.
//!
//! The host rebuilds a [`GraphInput`] snapshot on every change to visible nodes, edges or
//! layout-affecting flags; it is never mutated after construction. A [`LayoutResult`] is
//! immutable once produced and wholly replaced — never patched — by the next successful
//! computation. Per-entity attributes live on one record type per entity rather than in
//! parallel per-attribute tables, so a request cannot carry mismatched key sets.

use serde::{Deserialize, Serialize};

use crate::{RoutedEdge, Size, Strategy};

/// A visible node with its precomputed box. `width`/`height` come from the host's text
/// measurement, which is why layout waits for [`GraphInput::fonts_ready`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    /// Display label, carried through to the result untouched.
    pub name: String,
    /// Shape tag for the renderer (e.g. `"task"`, `"data"`, `"parameters"`). Layout ignores
    /// it beyond carrying it through.
    pub kind: String,
    pub width: f64,
    pub height: f64,
    /// Pins the node into a named layer band; `None` means unconstrained.
    #[serde(default)]
    pub layer: Option<String>,
    /// Optional ordering seed from an upstream topological pass.
    #[serde(default)]
    pub rank_hint: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

/// The snapshot handed to the orchestrator: everything one layout computation depends on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphInput {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    /// Visible layer ids in declared top-to-bottom order. Empty when layers are disabled.
    #[serde(default)]
    pub layers: Vec<String>,
    #[serde(default)]
    pub strategy: Strategy,
    /// Layout must not run before text metrics exist; node sizes depend on them.
    pub fonts_ready: bool,
}

/// A node with final center coordinates, rank and within-rank order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedNode {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rank: i32,
    pub order: usize,
}

/// The vertical extent of one declared layer, for the band drawn behind the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerBand {
    pub id: String,
    pub top: f64,
    pub bottom: f64,
}

/// One finished layout. Every input node and edge appears exactly once; the canvas bounds
/// all node boxes and edge points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub nodes: Vec<PlacedNode>,
    pub edges: Vec<RoutedEdge>,
    pub layers: Vec<LayerBand>,
    pub size: Size,
    /// The strategy actually used, so downstream consumers can apply strategy-specific
    /// rendering quirks.
    pub strategy: Strategy,
}

impl LayoutResult {
    pub(crate) fn empty(strategy: Strategy) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            layers: Vec::new(),
            size: Size {
                width: 0.0,
                height: 0.0,
            },
            strategy,
        }
    }
}

impl GraphInput {
    pub(crate) fn to_layout_graph(&self) -> selkie::Graph {
        selkie::Graph {
            nodes: self
                .nodes
                .iter()
                .map(|n| selkie::Node {
                    id: n.id.clone(),
                    width: n.width,
                    height: n.height,
                    layer: n.layer.clone(),
                    rank_hint: n.rank_hint,
                })
                .collect(),
            edges: self
                .edges
                .iter()
                .map(|e| selkie::Edge {
                    source: e.source.clone(),
                    target: e.target.clone(),
                })
                .collect(),
            layers: self.layers.clone(),
        }
    }

    /// Joins the geometric layout back with the display attributes the layout crate never
    /// sees. Both sides come back in input order.
    pub(crate) fn into_result(self, layout: selkie::Layout) -> LayoutResult {
        let nodes: Vec<PlacedNode> = self
            .nodes
            .iter()
            .zip(&layout.nodes)
            .map(|(input, placed)| PlacedNode {
                id: input.id.clone(),
                name: input.name.clone(),
                kind: input.kind.clone(),
                x: placed.x,
                y: placed.y,
                width: placed.width,
                height: placed.height,
                rank: placed.rank,
                order: placed.order,
            })
            .collect();

        let layers = crate::bands::layer_bands(&self, &nodes, &layout.size);

        LayoutResult {
            nodes,
            edges: layout.edges,
            layers,
            size: layout.size,
            strategy: self.strategy,
        }
    }
}
