//! Coordinate assignment: rank -> y, within-rank order -> x.

use rustc_hash::FxHashMap;

use crate::{Graph, LayoutOptions, Point, Size};

pub(crate) struct Coordinates {
    /// Node center positions.
    pub positions: FxHashMap<String, Point>,
    /// Vertical center of every rank, indexed by rank. Ranks left empty by layer banding
    /// still get a center so skip-edge bends have a y to land on.
    pub rank_y: Vec<f64>,
    pub size: Size,
}

/// Places every node at its final center. Rank centers stack top to bottom with a gap of
/// half the max node height on each side plus `rank_sep`; within a rank, boxes advance by
/// their own width plus `node_sep`, and each row is centered on the widest one. The canvas
/// is the bounding box of all node boxes plus `padding` on every side.
pub(crate) fn assign_coordinates(
    graph: &Graph,
    rows: &[Vec<String>],
    options: &LayoutOptions,
) -> Coordinates {
    let mut dims: FxHashMap<&str, (f64, f64)> = FxHashMap::default();
    for n in &graph.nodes {
        dims.insert(n.id.as_str(), (n.width, n.height));
    }

    if rows.is_empty() {
        return Coordinates {
            positions: FxHashMap::default(),
            rank_y: Vec::new(),
            size: Size {
                width: 0.0,
                height: 0.0,
            },
        };
    }

    let mut rank_y: Vec<f64> = Vec::with_capacity(rows.len());
    let mut max_heights: Vec<f64> = Vec::with_capacity(rows.len());
    let mut cursor_y = options.padding;
    for row in rows {
        let max_h = row
            .iter()
            .filter_map(|id| dims.get(id.as_str()).map(|&(_, h)| h))
            .fold(0.0_f64, f64::max);
        rank_y.push(cursor_y + max_h / 2.0);
        max_heights.push(max_h);
        cursor_y += max_h + options.rank_sep;
    }
    let content_bottom = cursor_y - options.rank_sep;

    let row_width = |row: &[String]| -> f64 {
        if row.is_empty() {
            return 0.0;
        }
        let widths: f64 = row
            .iter()
            .filter_map(|id| dims.get(id.as_str()).map(|&(w, _)| w))
            .sum();
        widths + options.node_sep * (row.len() - 1) as f64
    };

    let max_row_width = rows.iter().map(|row| row_width(row)).fold(0.0_f64, f64::max);

    let mut positions: FxHashMap<String, Point> = FxHashMap::default();
    for (r, row) in rows.iter().enumerate() {
        let mut cursor_x = options.padding + (max_row_width - row_width(row)) / 2.0;
        for id in row {
            let (w, _) = dims.get(id.as_str()).copied().unwrap_or((0.0, 0.0));
            positions.insert(
                id.clone(),
                Point {
                    x: cursor_x + w / 2.0,
                    y: rank_y[r],
                },
            );
            cursor_x += w + options.node_sep;
        }
    }

    Coordinates {
        positions,
        rank_y,
        size: Size {
            width: max_row_width + options.padding * 2.0,
            height: content_bottom + options.padding,
        },
    }
}
