//! Importance-and-recency retention scoring and capacity eviction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::record::{Record, RecordId};

/// Lower bound on the age used for scoring, in seconds.
///
/// Records created in the same clock tick as the eviction (or stamped ahead
/// of the clock) are scored as if they were this old.
pub const MIN_ELAPSED_SECS: f64 = 0.001;

/// Importance assumed for a record with no recorded weight.
pub const DEFAULT_IMPORTANCE: f64 = 1.0;

/// Seconds between `created_at` and `now`, clamped to [`MIN_ELAPSED_SECS`].
pub fn elapsed_secs(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let delta = now.signed_duration_since(created_at);
    let secs = match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        None => delta.num_seconds() as f64,
    };
    secs.max(MIN_ELAPSED_SECS)
}

/// Retention score: `importance / elapsed_seconds`.
pub fn retention_score(importance: f64, created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    importance * (1.0 / elapsed_secs(created_at, now))
}

/// Result of an eviction pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvictionReport {
    pub removed_count: usize,
    pub remaining_count: usize,
    pub removed_ids: Vec<RecordId>,
}

/// Drop the lowest-retention records until at most `capacity` remain.
///
/// Scores are recomputed against `now` on every call. Ranking is a stable
/// descending sort, so equal scores favour earlier insertions. Survivors keep
/// their relative insertion order, and the importance entries of removed
/// records are discarded in the same pass.
pub fn evict_to_capacity(
    records: &mut Vec<Record>,
    importance: &mut HashMap<RecordId, f64>,
    capacity: usize,
    now: DateTime<Utc>,
) -> EvictionReport {
    if records.len() <= capacity {
        return EvictionReport {
            removed_count: 0,
            remaining_count: records.len(),
            removed_ids: Vec::new(),
        };
    }

    let mut ranked: Vec<(usize, f64)> = records
        .iter()
        .enumerate()
        .map(|(pos, r)| {
            let weight = importance
                .get(&r.id())
                .copied()
                .unwrap_or(DEFAULT_IMPORTANCE);
            (pos, retention_score(weight, r.created_at(), now))
        })
        .collect();
    ranked.sort_by(|(_, a), (_, b)| b.total_cmp(a));

    let mut keep = vec![false; records.len()];
    for (pos, _) in ranked.iter().take(capacity) {
        keep[*pos] = true;
    }

    let mut removed_ids = Vec::with_capacity(records.len() - capacity);
    let mut flags = keep.into_iter();
    records.retain(|r| {
        let kept = flags.next().unwrap_or(false);
        if !kept {
            importance.remove(&r.id());
            removed_ids.push(r.id());
        }
        kept
    });

    EvictionReport {
        removed_count: removed_ids.len(),
        remaining_count: records.len(),
        removed_ids,
    }
}
