//! Edge routing: polylines from source exit to target entry.
//!
//! Rank-adjacent edges are the straight two-point case. Skip edges get one bend per
//! intervening rank at that rank's vertical center, nudged sideways out of any node box the
//! straight line would pierce, so the rendered curve threads between layers instead of
//! overlapping unrelated nodes.

use rustc_hash::FxHashMap;

use crate::position::Coordinates;
use crate::{Graph, LayoutOptions, Point, RoutedEdge};

pub(crate) fn route_edges(
    graph: &Graph,
    ranks: &FxHashMap<String, i32>,
    coords: &Coordinates,
    options: &LayoutOptions,
) -> Vec<RoutedEdge> {
    let mut dims: FxHashMap<&str, (f64, f64)> = FxHashMap::default();
    for n in &graph.nodes {
        dims.insert(n.id.as_str(), (n.width, n.height));
    }

    // Obstacle boxes per rank, sorted left to right.
    let mut by_rank: Vec<Vec<(f64, f64)>> = vec![Vec::new(); coords.rank_y.len()];
    for n in &graph.nodes {
        let rank = ranks.get(n.id.as_str());
        let pos = coords.positions.get(n.id.as_str());
        let (Some(&rank), Some(&pos)) = (rank, pos) else {
            continue;
        };
        let idx = rank.max(0) as usize;
        if idx < by_rank.len() {
            by_rank[idx].push((pos.x, n.width));
        }
    }
    for row in &mut by_rank {
        row.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    }

    let clearance = options.node_sep / 2.0;

    graph
        .edges
        .iter()
        .map(|e| {
            let src = coords.positions.get(e.source.as_str()).copied();
            let tgt = coords.positions.get(e.target.as_str()).copied();
            let (Some(src), Some(tgt)) = (src, tgt) else {
                return RoutedEdge {
                    source: e.source.clone(),
                    target: e.target.clone(),
                    points: Vec::new(),
                };
            };
            let (_, src_h) = dims.get(e.source.as_str()).copied().unwrap_or((0.0, 0.0));
            let (_, tgt_h) = dims.get(e.target.as_str()).copied().unwrap_or((0.0, 0.0));

            let start = Point {
                x: src.x,
                y: src.y + src_h / 2.0,
            };
            let end = Point {
                x: tgt.x,
                y: tgt.y - tgt_h / 2.0,
            };

            let mut points = vec![start];
            let src_rank = ranks.get(e.source.as_str()).copied().unwrap_or(0);
            let tgt_rank = ranks.get(e.target.as_str()).copied().unwrap_or(0);
            for r in (src_rank + 1)..tgt_rank {
                let idx = r.max(0) as usize;
                let Some(&y) = coords.rank_y.get(idx) else {
                    continue;
                };
                let span = end.y - start.y;
                let t = if span == 0.0 {
                    0.5
                } else {
                    (y - start.y) / span
                };
                let desired = start.x + (end.x - start.x) * t;
                let x = clear_of_nodes(desired, &by_rank[idx], clearance);
                points.push(Point { x, y });
            }
            points.push(end);

            RoutedEdge {
                source: e.source.clone(),
                target: e.target.clone(),
                points,
            }
        })
        .collect()
}

/// Moves `x` to the nearer edge of any node box (expanded by `clearance`) it falls inside.
/// Boxes in a rank are spaced at least `2 * clearance` apart, so one left-to-right pass
/// settles on a free position.
fn clear_of_nodes(mut x: f64, row: &[(f64, f64)], clearance: f64) -> f64 {
    for &(cx, w) in row {
        let half = w / 2.0 + clearance;
        if (x - cx).abs() < half {
            x = if x < cx { cx - half } else { cx + half };
        }
    }
    x
}
