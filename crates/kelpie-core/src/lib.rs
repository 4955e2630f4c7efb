#![forbid(unsafe_code)]

//! Headless pipeline-DAG visualization core.
//!
//! Design goals:
//! - deterministic, testable layout outputs (field-for-field reproducible)
//! - runtime-agnostic async APIs (no specific executor required)
//! - the host stays responsive: heavy work happens in a future the host runs on its own
//!   worker, and stale computations are discarded instead of interrupted
//!
//! The geometric work itself lives in the `selkie` crate; this crate owns the request/result
//! model, the large-graph safeguard and the orchestration around one computation.

mod bands;
pub mod error;
pub mod host;
pub mod model;
pub mod safeguard;

pub use error::{Error, Result};
pub use host::Host;
pub use model::{GraphEdge, GraphInput, GraphNode, LayerBand, LayoutResult, PlacedNode};
pub use safeguard::{LARGE_GRAPH_THRESHOLD, SizeClass};
pub use selkie::{LayoutOptions, Point, RoutedEdge, Size, Strategy};

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

/// How one call to [`Engine::compute_layout`] ended.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutOutcome {
    /// The computation finished and the host received the result.
    Published(LayoutResult),
    /// No request, or fonts were not ready. Nothing ran and no host state changed.
    Deferred,
    /// The graph exceeds the large-graph threshold and the session holds no confirmation.
    /// The host was told the node count; no layout work was performed.
    AwaitingConfirmation { node_count: usize },
    /// A newer request was issued before this computation finished; its result was
    /// discarded without touching the host.
    Superseded,
}

/// The layout orchestrator.
///
/// One engine serves one graph view for the lifetime of a session. It holds no per-request
/// state beyond a monotonically increasing sequence number; every request is a self-contained
/// snapshot.
pub struct Engine {
    host: Arc<dyn Host>,
    large_graph_threshold: usize,
    options: LayoutOptions,
    seq: AtomicU64,
}

impl Engine {
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self {
            host,
            large_graph_threshold: LARGE_GRAPH_THRESHOLD,
            options: LayoutOptions::default(),
            seq: AtomicU64::new(0),
        }
    }

    pub fn with_large_graph_threshold(mut self, threshold: usize) -> Self {
        self.large_graph_threshold = threshold;
        self
    }

    pub fn with_layout_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// Computes a layout for one request snapshot.
    ///
    /// The precondition check, the sequence number and the `loading_started` notification
    /// all happen synchronously at call time, so hosts that submit several requests in a row
    /// observe `loading_started` in submission order. The returned future does the heavy
    /// work and may be run on any executor.
    ///
    /// Only the result matching the latest issued sequence number is ever published: when a
    /// newer request is submitted while this one is still computing, this one resolves to
    /// [`LayoutOutcome::Superseded`] and the host is not called (last request wins, not
    /// first completion).
    pub fn compute_layout(
        &self,
        request: Option<GraphInput>,
    ) -> impl Future<Output = Result<LayoutOutcome>> + '_ {
        let prepared = self.prepare(request);
        async move {
            match prepared {
                None => Ok(LayoutOutcome::Deferred),
                Some((seq, input)) => self.compute_at(seq, input),
            }
        }
    }

    /// Synchronous variant of [`Engine::compute_layout`], for hosts without an executor.
    /// The work is CPU-bound and performs no I/O.
    pub fn compute_layout_sync(&self, request: Option<GraphInput>) -> Result<LayoutOutcome> {
        match self.prepare(request) {
            None => Ok(LayoutOutcome::Deferred),
            Some((seq, input)) => self.compute_at(seq, input),
        }
    }

    /// Submission-order prelude: precondition gate, sequence number, loading notification.
    fn prepare(&self, request: Option<GraphInput>) -> Option<(u64, GraphInput)> {
        let input = request.filter(|r| r.fonts_ready)?;
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.host.loading_started();
        Some((seq, input))
    }

    fn compute_at(&self, seq: u64, input: GraphInput) -> Result<LayoutOutcome> {
        if input.nodes.is_empty() {
            return Ok(self.publish(seq, LayoutResult::empty(input.strategy)));
        }

        if let SizeClass::Large { node_count } =
            safeguard::classify(input.nodes.len(), self.large_graph_threshold)
        {
            if !self.host.large_graph_confirmed() {
                debug!(node_count, "graph exceeds large-graph threshold, deferring layout");
                self.host.large_graph_detected(node_count);
                return Ok(LayoutOutcome::AwaitingConfirmation { node_count });
            }
        }

        debug!(
            nodes = input.nodes.len(),
            edges = input.edges.len(),
            strategy = ?input.strategy,
            "computing graph layout"
        );
        let graph = input.to_layout_graph();
        let layout = selkie::layout(&graph, input.strategy, &self.options)?;
        Ok(self.publish(seq, input.into_result(layout)))
    }

    /// Publishes `result` unless a newer request has been issued in the meantime.
    fn publish(&self, seq: u64, result: LayoutResult) -> LayoutOutcome {
        if self.seq.load(Ordering::SeqCst) != seq {
            trace!(seq, "discarding superseded layout result");
            return LayoutOutcome::Superseded;
        }
        self.host.layout_published(&result);
        LayoutOutcome::Published(result)
    }
}

#[cfg(test)]
mod tests;
