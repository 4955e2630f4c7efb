//! The surrounding application, as the layout core sees it.

use crate::model::LayoutResult;

/// Loading-state sink and session flags owned by the host application.
///
/// The engine calls these in a fixed order per accepted computation: `loading_started` at
/// submission, then exactly one of `large_graph_detected` or `layout_published` (or neither,
/// when the computation errors or is superseded). A superseded computation never reaches the
/// host at all.
pub trait Host: Send + Sync {
    /// A computation was accepted. Fires in submission order, before any heavy work, so the
    /// host can show progress without waiting for completion.
    fn loading_started(&self);

    /// The request exceeds the large-graph threshold and no confirmation is recorded for
    /// this session. No layout work was performed.
    fn large_graph_detected(&self, node_count: usize);

    /// The single "finished" transition: the result is final and the graph may be shown.
    /// The host must never observe "finished" with a stale result, which is why this is one
    /// callback rather than separate loading/visibility/result notifications.
    fn layout_published(&self, result: &LayoutResult);

    /// Session-scoped "render it anyway" flag. Owned and written by the host; the engine
    /// only reads it.
    fn large_graph_confirmed(&self) -> bool;
}
