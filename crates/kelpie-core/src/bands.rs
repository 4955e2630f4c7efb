//! Layer bands: the horizontal stripes drawn behind a layered graph.

use crate::model::{GraphInput, LayerBand, PlacedNode};
use crate::Size;
use rustc_hash::FxHashMap;

/// Computes one band per declared layer that has a visible member: the vertical extent of
/// the member boxes, with adjacent band edges meeting halfway across the gap and the first
/// and last band stretched to the canvas edges. Empty for unlayered graphs.
pub(crate) fn layer_bands(input: &GraphInput, nodes: &[PlacedNode], size: &Size) -> Vec<LayerBand> {
    if input.layers.is_empty() {
        return Vec::new();
    }

    let layer_of: FxHashMap<&str, &str> = input
        .nodes
        .iter()
        .filter_map(|n| Some((n.id.as_str(), n.layer.as_deref()?)))
        .collect();

    let mut bands: Vec<LayerBand> = Vec::new();
    for layer in &input.layers {
        let mut top = f64::INFINITY;
        let mut bottom = f64::NEG_INFINITY;
        for n in nodes {
            if layer_of.get(n.id.as_str()).copied() != Some(layer.as_str()) {
                continue;
            }
            top = top.min(n.y - n.height / 2.0);
            bottom = bottom.max(n.y + n.height / 2.0);
        }
        if top.is_finite() && bottom.is_finite() {
            bands.push(LayerBand {
                id: layer.clone(),
                top,
                bottom,
            });
        }
    }

    for i in 1..bands.len() {
        let midpoint = (bands[i - 1].bottom + bands[i].top) / 2.0;
        bands[i - 1].bottom = midpoint;
        bands[i].top = midpoint;
    }
    if let Some(first) = bands.first_mut() {
        first.top = 0.0;
    }
    if let Some(last) = bands.last_mut() {
        last.bottom = size.height;
    }

    bands
}
