//! Query orchestrator chaining the memory store and the reasoning stage.
//!
//! For each query the assistant records the user message, pulls related
//! context from memory, asks the reasoner for a response, and stores that
//! response back into memory weighted by its confidence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::AssistantConfig;
use crate::error::Result;
use crate::memory::{Clock, MemoryStore, Record, SystemClock};
use crate::obs;
use crate::reasoning::{CannedReasoner, Reasoner, ReasoningStrategy};

/// Metadata key carrying the reasoner's confidence on assistant records.
pub const CONFIDENCE_KEY: &str = "confidence";

/// Per-query result returned by [`Assistant::process`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryReport {
    pub query: String,
    pub response: String,
    pub reasoning: Vec<String>,
    pub confidence: f64,
    pub context_used: usize,
    pub session_duration_secs: f64,
}

/// Aggregate statistics for the current session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub session_id: Uuid,
    pub total_memories: usize,
    pub session_duration_secs: f64,
    pub reasoning_strategy: ReasoningStrategy,
    pub memory_usage: f64,
    pub queries_processed: u64,
    pub evicted_total: u64,
}

/// Memory-backed query pipeline around a [`Reasoner`].
pub struct Assistant<R: Reasoner> {
    memory: MemoryStore,
    reasoner: R,
    clock: Arc<dyn Clock>,
    context_limit: usize,
    user_importance: f64,
    session_id: Uuid,
    session_start: DateTime<Utc>,
    queries_processed: u64,
}

impl Assistant<CannedReasoner> {
    /// Build an assistant with the canned reasoner on the system clock.
    pub fn from_config(config: &AssistantConfig) -> Result<Self> {
        Self::from_config_with_clock(config, Arc::new(SystemClock))
    }

    /// Build an assistant with the canned reasoner on the given clock.
    pub fn from_config_with_clock(config: &AssistantConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        let memory = MemoryStore::with_clock(config.memory.capacity, Arc::clone(&clock))?;
        let reasoner =
            CannedReasoner::with_step_delay(config.reasoning.strategy, config.reasoning.step_delay());
        Ok(Self::new(memory, reasoner)
            .with_context_limit(config.memory.context_limit)
            .with_user_importance(config.memory.user_importance))
    }
}

impl<R: Reasoner> std::fmt::Debug for Assistant<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("session_id", &self.session_id)
            .field("strategy", &self.reasoner.strategy())
            .field("memory", &self.memory)
            .field("context_limit", &self.context_limit)
            .field("user_importance", &self.user_importance)
            .field("queries_processed", &self.queries_processed)
            .finish_non_exhaustive()
    }
}

impl<R: Reasoner> Assistant<R> {
    /// Create an assistant; records are timestamped with the store's clock.
    pub fn new(memory: MemoryStore, reasoner: R) -> Self {
        let clock = memory.clock();
        let session_start = clock.now();
        let session_id = Uuid::new_v4();
        obs::emit_session_started(
            &session_id.to_string(),
            reasoner.strategy().as_str(),
            memory.capacity(),
        );
        Self {
            memory,
            reasoner,
            clock,
            context_limit: crate::memory::DEFAULT_CONTEXT_LIMIT,
            user_importance: crate::memory::DEFAULT_IMPORTANCE,
            session_id,
            session_start,
            queries_processed: 0,
        }
    }

    pub fn with_context_limit(mut self, limit: usize) -> Self {
        self.context_limit = limit;
        self
    }

    pub fn with_user_importance(mut self, importance: f64) -> Self {
        self.user_importance = importance;
        self
    }

    /// Run `query` through memory and reasoning.
    ///
    /// If the reasoner fails, the user record stays in memory and no
    /// assistant record is written.
    pub async fn process(&mut self, query: &str) -> Result<QueryReport> {
        let span = obs::session_span(&self.session_id.to_string());
        self.process_inner(query).instrument(span).await
    }

    async fn process_inner(&mut self, query: &str) -> Result<QueryReport> {
        let session_id = self.session_id.to_string();
        let started = Instant::now();
        obs::emit_query_received(&session_id, query);

        let message = Record::user(query, self.clock.now());
        self.memory.add_memory(message, self.user_importance);

        let context = self.memory.get_relevant_context(query, self.context_limit);

        let outcome = match self.reasoner.reason(query, &context).await {
            Ok(outcome) => outcome,
            Err(e) => {
                obs::emit_reasoning_failed(&session_id, &e);
                return Err(e.into());
            }
        };

        let reply = Record::assistant(outcome.response.clone(), self.clock.now())
            .with_metadata(CONFIDENCE_KEY, outcome.confidence);
        self.memory.add_memory(reply, outcome.confidence);
        self.queries_processed += 1;

        obs::emit_query_processed(
            &session_id,
            outcome.confidence,
            context.len(),
            started.elapsed().as_millis() as u64,
        );

        Ok(QueryReport {
            query: query.to_string(),
            response: outcome.response,
            reasoning: outcome.reasoning,
            confidence: outcome.confidence,
            context_used: context.len(),
            session_duration_secs: self.session_duration_secs(),
        })
    }

    pub fn session_stats(&self) -> SessionStats {
        SessionStats {
            session_id: self.session_id,
            total_memories: self.memory.len(),
            session_duration_secs: self.session_duration_secs(),
            reasoning_strategy: self.reasoner.strategy(),
            memory_usage: self.memory.usage(),
            queries_processed: self.queries_processed,
            evicted_total: self.memory.evicted_total(),
        }
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    pub fn reasoner(&self) -> &R {
        &self.reasoner
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    fn session_duration_secs(&self) -> f64 {
        let elapsed = self.clock.now().signed_duration_since(self.session_start);
        elapsed
            .num_microseconds()
            .map(|us| us as f64 / 1_000_000.0)
            .unwrap_or_else(|| elapsed.num_seconds() as f64)
            .max(0.0)
    }
}
