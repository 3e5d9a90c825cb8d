//! Pipeline tests for the assistant: memory persistence across queries,
//! reasoning strategies, and a sustained query load.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use cogmem_core::memory::{ROLE_ASSISTANT, ROLE_USER};
use cogmem_core::{
    Assistant, AssistantConfig, CannedReasoner, ManualClock, MemoryStore, ReasoningStrategy,
};

fn config(capacity: usize, strategy: ReasoningStrategy) -> AssistantConfig {
    let mut c = AssistantConfig::default();
    c.memory.capacity = capacity;
    c.reasoning.strategy = strategy;
    c
}

#[tokio::test(start_paused = true)]
async fn test_memory_persists_across_queries() {
    let mut assistant =
        Assistant::from_config(&config(1000, ReasoningStrategy::ChainOfThought)).unwrap();

    assistant.process("Python is a great language").await.unwrap();
    let result = assistant.process("Tell me about Python").await.unwrap();

    // own query, the earlier query, and the earlier response
    assert!(result.context_used >= 2, "context_used = {}", result.context_used);
    assert_eq!(assistant.memory().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_all_strategies_report_confidence() {
    for (strategy, steps, confidence) in [
        (ReasoningStrategy::ChainOfThought, 5, 0.85),
        (ReasoningStrategy::TreeOfThought, 4, 0.90),
        (ReasoningStrategy::Basic, 1, 0.70),
    ] {
        let mut assistant = Assistant::from_config(&config(100, strategy)).unwrap();
        let result = assistant.process("Complex query").await.unwrap();
        assert!(result.confidence > 0.0, "strategy {strategy} failed");
        assert_eq!(result.confidence, confidence);
        assert_eq!(result.reasoning.len(), steps);
        assert_eq!(assistant.session_stats().reasoning_strategy, strategy);
    }
}

#[tokio::test(start_paused = true)]
async fn test_stress_hundred_queries_under_capacity() {
    let mut assistant =
        Assistant::from_config(&config(50, ReasoningStrategy::ChainOfThought)).unwrap();

    for i in 0..100 {
        let report = assistant.process(&format!("Query {i}")).await.unwrap();
        assert!(report.context_used <= 5);
        assert!(assistant.memory().len() <= 50);
    }

    let stats = assistant.session_stats();
    assert_eq!(stats.queries_processed, 100);
    assert_eq!(stats.total_memories, 50);
    assert_eq!(stats.evicted_total, 150);
    assert_eq!(stats.memory_usage, 1.0);
}

#[tokio::test]
async fn test_roles_alternate_and_response_weighted_by_confidence() {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let memory = MemoryStore::with_clock(10, clock.clone()).unwrap();
    let reasoner = CannedReasoner::with_step_delay(ReasoningStrategy::TreeOfThought, Duration::ZERO);
    let mut assistant = Assistant::new(memory, reasoner).with_context_limit(1);

    let report = assistant.process("distributed systems").await.unwrap();
    assert_eq!(report.context_used, 1);
    assert_eq!(report.response, "After exploring multiple paths: distributed systems");

    let records = assistant.memory().records();
    assert_eq!(records[0].role(), ROLE_USER);
    assert_eq!(records[1].role(), ROLE_ASSISTANT);
    assert_eq!(assistant.memory().importance_of(records[0].id()), Some(1.0));
    assert_eq!(assistant.memory().importance_of(records[1].id()), Some(0.90));
}

#[tokio::test]
async fn test_context_limit_zero_uses_no_context() {
    let mut c = config(10, ReasoningStrategy::Basic);
    c.memory.context_limit = 0;
    let mut assistant = Assistant::from_config(&c).unwrap();
    assistant.process("first words").await.unwrap();
    let report = assistant.process("first words again").await.unwrap();
    assert_eq!(report.context_used, 0);
}

#[tokio::test]
async fn test_report_serializes_to_json() {
    let mut assistant = Assistant::from_config(&config(10, ReasoningStrategy::Basic)).unwrap();
    let report = assistant.process("json please").await.unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["query"], "json please");
    assert_eq!(value["response"], "Processing: json please");
    assert_eq!(value["context_used"], 1);

    let stats = serde_json::to_value(assistant.session_stats()).unwrap();
    assert_eq!(stats["reasoning_strategy"], "basic");
    assert_eq!(stats["total_memories"], 2);
}
