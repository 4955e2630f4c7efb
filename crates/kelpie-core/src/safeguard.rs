//! Size safeguard: large graphs wait for explicit confirmation before layout runs.

use serde::{Deserialize, Serialize};

/// Node count above which layout waits for confirmation. Overridable per engine via
/// [`crate::Engine::with_large_graph_threshold`].
pub const LARGE_GRAPH_THRESHOLD: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeClass {
    /// Proceed automatically.
    Small,
    /// Wait for the host's session-scoped confirmation before running the expensive
    /// strategies; `node_count` feeds the host's warning UI.
    Large { node_count: usize },
}

pub fn classify(node_count: usize, threshold: usize) -> SizeClass {
    if node_count > threshold {
        SizeClass::Large { node_count }
    } else {
        SizeClass::Small
    }
}
