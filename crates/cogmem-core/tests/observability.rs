//! Observability tests for assistant session tracing.
//!
//! These tests verify that structured tracing events are emitted for the key
//! lifecycle points: session start, query receipt, query completion, memory
//! eviction, and reasoning failure.

use async_trait::async_trait;
use cogmem_core::memory::{MemoryStore, Record};
use cogmem_core::{
    emit_memory_evicted, emit_query_processed, emit_query_received, emit_reasoning_failed,
    emit_session_started, Assistant, AssistantConfig, Reasoner, ReasoningError, ReasoningOutcome,
    ReasoningStrategy, SessionSpan,
};
use tracing_test::traced_test;

#[traced_test]
#[test]
fn test_emit_session_started_logs_strategy() {
    emit_session_started("sess-1", "tree_of_thought", 42);
    assert!(logs_contain("session.started"));
    assert!(logs_contain("tree_of_thought"));
}

#[traced_test]
#[test]
fn test_emit_query_events() {
    emit_query_received("sess-2", "what is rust");
    emit_query_processed("sess-2", 0.85, 3, 512);
    assert!(logs_contain("query.received"));
    assert!(logs_contain("query.processed"));
    assert!(logs_contain("context_used=3"));
}

#[traced_test]
#[test]
fn test_emit_memory_evicted_logs_counts() {
    emit_memory_evicted(2, 10, 10);
    assert!(logs_contain("memory.evicted"));
    assert!(logs_contain("removed=2"));
}

#[traced_test]
#[test]
fn test_emit_reasoning_failed_logs_warning() {
    let error_msg = "backend unavailable";
    emit_reasoning_failed("sess-3", &error_msg);
    assert!(logs_contain("reasoning.failed"));
    assert!(logs_contain("backend unavailable"));
}

#[traced_test]
#[test]
fn test_session_span_enter_creates_span() {
    let span = SessionSpan::enter("span-session");
    tracing::info!("inside session span");
    drop(span);
    assert!(logs_contain("span-session"));
}

#[traced_test]
#[tokio::test]
async fn test_process_emits_lifecycle_events() {
    let mut config = AssistantConfig::default();
    config.memory.capacity = 1;
    config.reasoning.strategy = ReasoningStrategy::Basic;
    let mut assistant = Assistant::from_config(&config).unwrap();

    assistant.process("trace me").await.unwrap();

    assert!(logs_contain("session.started"));
    assert!(logs_contain("query.received"));
    assert!(logs_contain("query.processed"));
    // the response pushes the capacity-1 store over its bound
    assert!(logs_contain("memory.evicted"));
}

struct BrokenReasoner;

#[async_trait]
impl Reasoner for BrokenReasoner {
    fn strategy(&self) -> ReasoningStrategy {
        ReasoningStrategy::Basic
    }

    async fn reason(
        &self,
        _query: &str,
        _context: &[Record],
    ) -> Result<ReasoningOutcome, ReasoningError> {
        Err(ReasoningError::Failed("no answer".into()))
    }
}

#[traced_test]
#[tokio::test]
async fn test_reasoning_failure_is_logged() {
    let mut assistant = Assistant::new(MemoryStore::new(4).unwrap(), BrokenReasoner);
    assert!(assistant.process("doomed").await.is_err());
    assert!(logs_contain("reasoning.failed"));
    assert!(!logs_contain("query.processed"));
}
