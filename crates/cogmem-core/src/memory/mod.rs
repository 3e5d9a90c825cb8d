//! Memory subsystem: timestamped records, importance-weighted retention,
//! and keyword-overlap context retrieval.
//!
//! The store keeps records in insertion order alongside an importance map.
//! Whenever an insertion pushes it past capacity, every record is rescored
//! as `importance / age_seconds` against the injected [`Clock`] and the
//! lowest-scoring records are dropped in a single pass.

pub mod clock;
pub mod error;
pub mod record;
pub mod relevance;
pub mod retention;
pub mod shared;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{MemoryError, MemoryResult};
pub use record::{Record, RecordId, ROLE_ASSISTANT, ROLE_USER};
pub use relevance::{overlap, rank, tokenize, DEFAULT_CONTEXT_LIMIT};
pub use retention::{
    elapsed_secs, evict_to_capacity, retention_score, EvictionReport, DEFAULT_IMPORTANCE,
    MIN_ELAPSED_SECS,
};
pub use shared::SharedMemoryStore;
pub use store::{MemoryStore, DEFAULT_CAPACITY};
