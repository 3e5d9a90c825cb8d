//! Structured observability hooks for assistant sessions.
//!
//! This module provides:
//! - Session-scoped tracing spans via the `SessionSpan` RAII guard and
//!   [`session_span`] for async code
//! - Emission functions for key lifecycle events: session start, query
//!   received, query processed, memory eviction, reasoning failure
//!
//! Events are emitted at `info!` level unless noted; filter with `RUST_LOG`.

use tracing::info;

/// RAII guard that enters a session-scoped tracing span.
///
/// # Example
///
/// ```ignore
/// let _span = SessionSpan::enter("5f0c...");
/// // tracing calls are now associated with session_id = "5f0c..."
/// ```
pub struct SessionSpan {
    _span: tracing::span::EnteredSpan,
}

impl SessionSpan {
    /// Create and enter a span tagged with the session id.
    pub fn enter(session_id: &str) -> Self {
        Self {
            _span: session_span(session_id).entered(),
        }
    }
}

/// Session-scoped span for instrumenting futures.
///
/// Use this instead of [`SessionSpan`] across `.await` points.
pub fn session_span(session_id: &str) -> tracing::Span {
    tracing::info_span!("cogmem.session", session_id = %session_id)
}

/// Emit event: session started with its strategy and memory capacity.
pub fn emit_session_started(session_id: &str, strategy: &str, capacity: usize) {
    info!(
        event = "session.started",
        session_id = %session_id,
        strategy = %strategy,
        capacity = capacity,
    );
}

/// Emit event: a query entered the pipeline.
pub fn emit_query_received(session_id: &str, query: &str) {
    info!(event = "query.received", session_id = %session_id, query = %query);
}

/// Emit event: a query produced a response.
pub fn emit_query_processed(
    session_id: &str,
    confidence: f64,
    context_used: usize,
    duration_ms: u64,
) {
    info!(
        event = "query.processed",
        session_id = %session_id,
        confidence = confidence,
        context_used = context_used,
        duration_ms = duration_ms,
    );
}

/// Emit event: an eviction pass dropped records (debug level).
pub fn emit_memory_evicted(removed: usize, remaining: usize, capacity: usize) {
    tracing::debug!(
        event = "memory.evicted",
        removed = removed,
        remaining = remaining,
        capacity = capacity,
    );
}

/// Emit event: the reasoning stage failed (warning level).
pub fn emit_reasoning_failed(session_id: &str, error: &dyn std::fmt::Display) {
    tracing::warn!(event = "reasoning.failed", session_id = %session_id, error = %error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_span_create() {
        let _span = SessionSpan::enter("test-session-id");
    }
}
