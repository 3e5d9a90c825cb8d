//! cogmem Core Library
//!
//! Importance-weighted conversational memory with keyword-overlap context
//! retrieval, a canned reasoning stage, and the orchestrator that chains
//! them for each query.

pub mod assistant;
pub mod config;
pub mod error;
pub mod memory;
pub mod obs;
pub mod reasoning;
pub mod telemetry;

pub use assistant::{Assistant, QueryReport, SessionStats, CONFIDENCE_KEY};

pub use config::{AssistantConfig, ConfigError, MemoryConfig, ReasoningConfig};

pub use error::{AssistantError, Result};

pub use memory::{
    Clock, EvictionReport, ManualClock, MemoryError, MemoryStore, Record, RecordId,
    SharedMemoryStore, SystemClock,
};

pub use obs::{
    emit_memory_evicted, emit_query_processed, emit_query_received, emit_reasoning_failed,
    emit_session_started, session_span, SessionSpan,
};

pub use reasoning::{
    CannedReasoner, Reasoner, ReasoningError, ReasoningOutcome, ReasoningStrategy,
};

pub use telemetry::init_tracing;
