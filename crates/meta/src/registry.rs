//! Process-wide metadata registry with atomic publication.
//!
//! # Purpose
//!
//! Give programs one well-known place to publish the [`MetaGraph`] they
//! built at startup. The factory engine never reads this holder implicitly;
//! callers fetch a snapshot with [`current`] and hand it to the engine.
//!
//! # Mental model
//!
//! * The holder is an `ArcSwapOption<MetaGraph>`: empty until [`init`], empty
//!   again after [`shutdown`].
//! * Readers pin an `Arc<MetaGraph>` and resolve everything against that
//!   immutable graph, even if the registry is shut down meanwhile.
//! * Population happens before [`init`]; a published graph is never mutated.
//!
//! # Lifecycle
//!
//! 1. Startup: build a graph with [`MetaGraphBuilder`](crate::MetaGraphBuilder) and [`init`] it.
//! 2. Steady state: [`current`] is a wait-free snapshot load.
//! 3. Teardown: [`shutdown`] unpublishes the graph; pinned snapshots stay valid.
//!
//! # Failure modes
//!
//! * A second [`init`] without an intervening [`shutdown`] is rejected with
//!   [`MetaError::AlreadyInitialized`] and leaves the published graph in place.
//! * [`require`] on an empty holder reports [`MetaError::NotInitialized`].

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwapOption;

use crate::{MetaError, MetaGraph};

static REGISTRY: LazyLock<ArcSwapOption<MetaGraph>> = LazyLock::new(ArcSwapOption::empty);

/// Publishes `graph` as the process-wide metadata.
pub fn init(graph: MetaGraph) -> Result<Arc<MetaGraph>, MetaError> {
	let graph = Arc::new(graph);
	let previous = REGISTRY.compare_and_swap(&None::<Arc<MetaGraph>>, Some(Arc::clone(&graph)));
	if previous.is_some() {
		tracing::warn!(domain = "meta", "metadata registry initialized twice; keeping the first graph");
		return Err(MetaError::AlreadyInitialized);
	}
	tracing::debug!(domain = "meta", objects = graph.len(), "metadata registry initialized");
	Ok(graph)
}

/// Returns the published graph, if any.
pub fn current() -> Option<Arc<MetaGraph>> {
	REGISTRY.load_full()
}

/// Returns the published graph or [`MetaError::NotInitialized`].
pub fn require() -> Result<Arc<MetaGraph>, MetaError> {
	current().ok_or(MetaError::NotInitialized)
}

pub fn is_initialized() -> bool {
	REGISTRY.load().is_some()
}

/// Unpublishes the graph, returning it.
pub fn shutdown() -> Option<Arc<MetaGraph>> {
	let previous = REGISTRY.swap(None);
	if previous.is_some() {
		tracing::debug!(domain = "meta", "metadata registry shut down");
	}
	previous
}
