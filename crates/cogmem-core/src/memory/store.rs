//! Capacity-bounded record store with importance-weighted eviction.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::clock::{Clock, SystemClock};
use super::error::{MemoryError, MemoryResult};
use super::record::{Record, RecordId};
use super::relevance;
use super::retention::evict_to_capacity;
use crate::obs;

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// In-process memory of timestamped records.
///
/// Records are kept in insertion order with a parallel importance map keyed
/// by [`RecordId`]. After every insertion the store holds at most
/// `capacity` records and exactly one importance entry per record.
#[derive(Debug)]
pub struct MemoryStore {
    records: Vec<Record>,
    importance: HashMap<RecordId, f64>,
    capacity: usize,
    evicted_total: u64,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    /// Create a store on the system clock.
    pub fn new(capacity: usize) -> MemoryResult<Self> {
        Self::with_clock(capacity, Arc::new(SystemClock))
    }

    /// Create a store that measures record age against `clock`.
    pub fn with_clock(capacity: usize, clock: Arc<dyn Clock>) -> MemoryResult<Self> {
        if capacity == 0 {
            return Err(MemoryError::InvalidCapacity(capacity));
        }
        Ok(Self {
            records: Vec::new(),
            importance: HashMap::new(),
            capacity,
            evicted_total: 0,
            clock,
        })
    }

    /// Append `record` with the given importance, then evict down to capacity.
    ///
    /// A record whose id is already stored (a clone, or one loaded twice) is
    /// given a fresh id so each stored record keeps its own importance entry.
    pub fn add_memory(&mut self, mut record: Record, importance: f64) {
        if self.importance.contains_key(&record.id()) {
            let duplicate = record.id();
            record.reassign_id();
            debug!(%duplicate, record_id = %record.id(), "duplicate record id reassigned");
        }
        debug!(
            record_id = %record.id(),
            role = %record.role(),
            importance,
            "memory record added"
        );
        self.importance.insert(record.id(), importance);
        self.records.push(record);
        self.evict();
    }

    /// Up to `limit` stored records sharing at least one word with `query`.
    ///
    /// Ordered by overlap descending, then most recent first.
    pub fn get_relevant_context(&self, query: &str, limit: usize) -> Vec<Record> {
        relevance::rank(&self.records, query, limit)
            .into_iter()
            .cloned()
            .collect()
    }

    fn evict(&mut self) {
        if self.records.len() <= self.capacity {
            return;
        }
        let now = self.clock.now();
        let report = evict_to_capacity(&mut self.records, &mut self.importance, self.capacity, now);
        self.evicted_total += report.removed_count as u64;
        obs::emit_memory_evicted(report.removed_count, report.remaining_count, self.capacity);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stored records in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn importance_of(&self, id: RecordId) -> Option<f64> {
        self.importance.get(&id).copied()
    }

    /// Number of importance entries held (always equal to `len()`).
    pub fn importance_entries(&self) -> usize {
        self.importance.len()
    }

    /// Fill ratio in `[0, 1]`.
    pub fn usage(&self) -> f64 {
        self.records.len() as f64 / self.capacity as f64
    }

    /// Records dropped by eviction since the store was created.
    pub fn evicted_total(&self) -> u64 {
        self.evicted_total
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            importance: HashMap::new(),
            capacity: DEFAULT_CAPACITY,
            evicted_total: 0,
            clock: Arc::new(SystemClock),
        }
    }
}
