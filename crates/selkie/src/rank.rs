//! Rank assignment: longest-path layering, with declared layers as hard rank bands.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;

use crate::{Adjacency, Graph};

/// Assigns every node an integer rank `>= 0` such that, for consistent inputs, every edge
/// increases in rank from source to target.
///
/// Roots get the lowest rank of their band; every other node lands one past its highest
/// predecessor. When the graph declares layers, each layer occupies a contiguous rank band in
/// declared order and member ranks are clamped into their band — the band wins when a layer
/// assignment disagrees with the longest-path rank.
pub(crate) fn assign_ranks(graph: &Graph, adjacency: &Adjacency) -> FxHashMap<String, i32> {
    let topo = topo_order(graph, adjacency);
    let base = longest_path(&topo, adjacency);

    let mut ranks = if graph.layers.is_empty() {
        base
    } else {
        clamp_into_bands(graph, adjacency, &topo, &base)
    };

    normalize(&mut ranks);
    ranks
}

/// Deterministic Kahn order: initial nodes and out-neighbors in insertion order.
fn topo_order(graph: &Graph, adjacency: &Adjacency) -> Vec<String> {
    let mut indegree: FxHashMap<&str, usize> = FxHashMap::default();
    for n in &graph.nodes {
        indegree.insert(n.id.as_str(), 0);
    }
    for e in &graph.edges {
        if let Some(d) = indegree.get_mut(e.target.as_str()) {
            *d += 1;
        }
    }

    let mut queue: VecDeque<&str> = graph
        .nodes
        .iter()
        .map(|n| n.id.as_str())
        .filter(|id| indegree.get(id).copied().unwrap_or(0) == 0)
        .collect();

    let mut topo: Vec<String> = Vec::with_capacity(graph.nodes.len());
    let mut placed: FxHashMap<&str, bool> = FxHashMap::default();
    while let Some(v) = queue.pop_front() {
        topo.push(v.to_string());
        placed.insert(v, true);
        let Some(succs) = adjacency.succs.get(v) else {
            continue;
        };
        for w in succs {
            if let Some(d) = indegree.get_mut(w.as_str()) {
                *d = d.saturating_sub(1);
                if *d == 0 {
                    queue.push_back(w.as_str());
                }
            }
        }
    }

    // A cycle would be an upstream precondition violation. Degrade to insertion order for the
    // stragglers instead of looping or panicking.
    if topo.len() != graph.nodes.len() {
        for n in &graph.nodes {
            if !placed.get(n.id.as_str()).copied().unwrap_or(false) {
                topo.push(n.id.clone());
            }
        }
    }

    topo
}

fn longest_path(topo: &[String], adjacency: &Adjacency) -> FxHashMap<String, i32> {
    let mut ranks: FxHashMap<String, i32> = FxHashMap::default();
    for v in topo {
        let rank = adjacency
            .preds
            .get(v.as_str())
            .into_iter()
            .flatten()
            .filter_map(|u| ranks.get(u.as_str()).map(|r| r + 1))
            .max()
            .unwrap_or(0);
        ranks.insert(v.clone(), rank);
    }
    ranks
}

/// Re-ranks with each declared layer pinned to a contiguous band.
///
/// Band extents come from the unconstrained ranks: a layer's band is as tall as the
/// longest-path spread of its members. Unlayered nodes keep pure longest-path ranks, which
/// shifts them past any band their ancestors occupy.
fn clamp_into_bands(
    graph: &Graph,
    adjacency: &Adjacency,
    topo: &[String],
    base: &FxHashMap<String, i32>,
) -> FxHashMap<String, i32> {
    let layer_of: FxHashMap<&str, usize> = graph
        .layers
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();

    // Ids not in the declared sequence are treated as unconstrained.
    let member_band: FxHashMap<&str, usize> = graph
        .nodes
        .iter()
        .filter_map(|n| {
            let layer = n.layer.as_deref()?;
            Some((n.id.as_str(), *layer_of.get(layer)?))
        })
        .collect();

    let mut min_base: Vec<Option<i32>> = vec![None; graph.layers.len()];
    let mut max_base: Vec<Option<i32>> = vec![None; graph.layers.len()];
    for n in &graph.nodes {
        let Some(&band) = member_band.get(n.id.as_str()) else {
            continue;
        };
        let Some(&r) = base.get(n.id.as_str()) else {
            continue;
        };
        min_base[band] = Some(min_base[band].map_or(r, |m| m.min(r)));
        max_base[band] = Some(max_base[band].map_or(r, |m| m.max(r)));
    }

    // Bands stack in declared order; empty layers occupy no ranks.
    let mut band_start: Vec<i32> = vec![0; graph.layers.len()];
    let mut band_end: Vec<i32> = vec![-1; graph.layers.len()];
    let mut next_start: i32 = 0;
    for band in 0..graph.layers.len() {
        let span = match (min_base[band], max_base[band]) {
            (Some(lo), Some(hi)) => hi - lo + 1,
            _ => 0,
        };
        band_start[band] = next_start;
        band_end[band] = next_start + span - 1;
        next_start += span;
    }

    let mut ranks: FxHashMap<String, i32> = FxHashMap::default();
    for v in topo {
        let candidate = adjacency
            .preds
            .get(v.as_str())
            .into_iter()
            .flatten()
            .filter_map(|u| ranks.get(u.as_str()).map(|r| r + 1))
            .max()
            .unwrap_or(0);
        let rank = match member_band.get(v.as_str()) {
            Some(&band) if band_end[band] >= band_start[band] => {
                candidate.clamp(band_start[band], band_end[band])
            }
            _ => candidate,
        };
        ranks.insert(v.clone(), rank);
    }
    ranks
}

/// Shifts ranks so the lowest is zero.
fn normalize(ranks: &mut FxHashMap<String, i32>) {
    let Some(min) = ranks.values().copied().min() else {
        return;
    };
    if min == 0 {
        return;
    }
    for r in ranks.values_mut() {
        *r -= min;
    }
}
