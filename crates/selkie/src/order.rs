//! Within-rank ordering / crossing minimization.
//!
//! Two heuristics share one contract: rows of node ids, one per rank, reordered to reduce
//! edge crossings between adjacent ranks. `Strategy::Current` runs a fixed number of
//! alternating barycenter sweeps and keeps the best layering seen; `Strategy::Legacy` is a
//! single downward median pass kept for backward-compatible output.

use rustc_hash::FxHashMap;

use crate::{Adjacency, Graph, Strategy};

/// The barycenter heuristic runs a bounded number of sweeps, not to convergence, so layout
/// cost stays predictable on large graphs.
const BARYCENTER_SWEEPS: usize = 4;

/// Orders each rank's nodes. Returns one row per rank (index = rank), every node exactly
/// once, in its final left-to-right order.
pub(crate) fn order_ranks(
    graph: &Graph,
    adjacency: &Adjacency,
    ranks: &FxHashMap<String, i32>,
    strategy: Strategy,
) -> Vec<Vec<String>> {
    let rows = initial_rows(graph, ranks);
    if rows.len() <= 1 {
        return rows;
    }
    match strategy {
        Strategy::Current => barycenter_sweeps(graph, adjacency, rows),
        Strategy::Legacy => median_pass(graph, adjacency, rows),
    }
}

/// Initial order within each rank: the upstream rank hint when present, then input order.
/// Both sort keys are stable across recomputation, which keeps the whole pipeline
/// deterministic.
fn initial_rows(graph: &Graph, ranks: &FxHashMap<String, i32>) -> Vec<Vec<String>> {
    let Some(&max_rank) = ranks.values().max() else {
        return Vec::new();
    };

    let mut rows: Vec<Vec<(i32, usize, String)>> = vec![Vec::new(); (max_rank + 1).max(0) as usize];
    for (idx, n) in graph.nodes.iter().enumerate() {
        let Some(&rank) = ranks.get(n.id.as_str()) else {
            continue;
        };
        let hint = n.rank_hint.unwrap_or(i32::MAX);
        rows[rank.max(0) as usize].push((hint, idx, n.id.clone()));
    }

    rows.into_iter()
        .map(|mut row| {
            row.sort_by_key(|(hint, idx, _)| (*hint, *idx));
            row.into_iter().map(|(_, _, id)| id).collect()
        })
        .collect()
}

fn input_index(graph: &Graph) -> FxHashMap<&str, usize> {
    graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect()
}

fn positions(rows: &[Vec<String>]) -> FxHashMap<String, usize> {
    let mut pos: FxHashMap<String, usize> = FxHashMap::default();
    for row in rows {
        for (i, id) in row.iter().enumerate() {
            pos.insert(id.clone(), i);
        }
    }
    pos
}

fn barycenter_sweeps(
    graph: &Graph,
    adjacency: &Adjacency,
    mut rows: Vec<Vec<String>>,
) -> Vec<Vec<String>> {
    let input_idx = input_index(graph);

    let mut best = rows.clone();
    let mut best_cc = cross_count(adjacency, &best);

    for sweep in 0..BARYCENTER_SWEEPS {
        if sweep % 2 == 0 {
            for r in 1..rows.len() {
                sort_row_by_mean(&mut rows, r, &adjacency.preds, &input_idx);
            }
        } else {
            for r in (0..rows.len().saturating_sub(1)).rev() {
                sort_row_by_mean(&mut rows, r, &adjacency.succs, &input_idx);
            }
        }

        let cc = cross_count(adjacency, &rows);
        if cc < best_cc {
            best_cc = cc;
            best = rows.clone();
        }
    }

    best
}

/// Re-sorts `rows[r]` by the mean position of each node's neighbors. Nodes without neighbors
/// keep their current position as the key, so they drift only when pushed by ties.
fn sort_row_by_mean(
    rows: &mut [Vec<String>],
    r: usize,
    neighbors: &FxHashMap<String, Vec<String>>,
    input_idx: &FxHashMap<&str, usize>,
) {
    let pos = positions(rows);

    let mut keyed: Vec<(f64, usize, usize, String)> = rows[r]
        .iter()
        .enumerate()
        .map(|(prev_pos, id)| {
            let adjacent: Vec<usize> = neighbors
                .get(id.as_str())
                .into_iter()
                .flatten()
                .filter_map(|n| pos.get(n.as_str()).copied())
                .collect();
            let key = if adjacent.is_empty() {
                prev_pos as f64
            } else {
                adjacent.iter().sum::<usize>() as f64 / adjacent.len() as f64
            };
            let idx = input_idx.get(id.as_str()).copied().unwrap_or(usize::MAX);
            (key, prev_pos, idx, id.clone())
        })
        .collect();

    keyed.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.1.cmp(&b.1))
            .then(a.2.cmp(&b.2))
    });

    rows[r] = keyed.into_iter().map(|(_, _, _, id)| id).collect();
}

/// Legacy ordering: one downward pass keyed by the median predecessor position, ties by
/// input order.
fn median_pass(
    graph: &Graph,
    adjacency: &Adjacency,
    mut rows: Vec<Vec<String>>,
) -> Vec<Vec<String>> {
    let input_idx = input_index(graph);

    for r in 1..rows.len() {
        let pos = positions(&rows);

        let mut keyed: Vec<(f64, usize, String)> = rows[r]
            .iter()
            .enumerate()
            .map(|(prev_pos, id)| {
                let mut adjacent: Vec<usize> = adjacency
                    .preds
                    .get(id.as_str())
                    .into_iter()
                    .flatten()
                    .filter_map(|n| pos.get(n.as_str()).copied())
                    .collect();
                adjacent.sort_unstable();
                let key = median(&adjacent).unwrap_or(prev_pos as f64);
                let idx = input_idx.get(id.as_str()).copied().unwrap_or(usize::MAX);
                (key, idx, id.clone())
            })
            .collect();

        keyed.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.1.cmp(&b.1))
        });

        rows[r] = keyed.into_iter().map(|(_, _, id)| id).collect();
    }

    rows
}

fn median(sorted: &[usize]) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid] as f64)
    } else {
        Some((sorted[mid - 1] + sorted[mid]) as f64 / 2.0)
    }
}

/// Total crossings between all adjacent row pairs. Only rank-adjacent edges participate;
/// skip edges are routed around rows later and do not affect the count.
pub(crate) fn cross_count(adjacency: &Adjacency, rows: &[Vec<String>]) -> usize {
    let mut cc = 0;
    for i in 1..rows.len() {
        cc += two_layer_cross_count(adjacency, &rows[i - 1], &rows[i]);
    }
    cc
}

/// Accumulator-tree crossing count between two adjacent rows.
fn two_layer_cross_count(adjacency: &Adjacency, north: &[String], south: &[String]) -> usize {
    if south.is_empty() {
        return 0;
    }

    let mut south_pos: FxHashMap<&str, usize> = FxHashMap::default();
    for (i, v) in south.iter().enumerate() {
        south_pos.insert(v.as_str(), i);
    }

    let mut south_entries: Vec<usize> = Vec::new();
    for v in north {
        let mut entries: Vec<usize> = adjacency
            .succs
            .get(v.as_str())
            .into_iter()
            .flatten()
            .filter_map(|w| south_pos.get(w.as_str()).copied())
            .collect();
        entries.sort_unstable();
        south_entries.extend(entries);
    }

    let mut first_index: usize = 1;
    while first_index < south.len() {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree: Vec<usize> = vec![0; tree_size];

    let mut cc: usize = 0;
    for entry in south_entries {
        let mut index = entry + first_index;
        tree[index] += 1;
        while index > 0 {
            if index % 2 == 1 {
                cc += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += 1;
        }
    }

    cc
}
