//! Keyword-overlap relevance ranking.

use std::cmp::Reverse;
use std::collections::HashSet;

use super::record::Record;

/// Default number of records returned by a context lookup.
pub const DEFAULT_CONTEXT_LIMIT: usize = 5;

/// Lowercased, whitespace-delimited word set.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Number of distinct words shared by `query_tokens` and `text`.
pub fn overlap(query_tokens: &HashSet<String>, text: &str) -> usize {
    if query_tokens.is_empty() {
        return 0;
    }
    tokenize(text).intersection(query_tokens).count()
}

/// Rank `records` against `query`, returning at most `limit` matches.
///
/// Records sharing no word with the query are skipped. Order is overlap
/// descending, then most recent first (`created_at`, then record id).
pub fn rank<'a>(records: &'a [Record], query: &str, limit: usize) -> Vec<&'a Record> {
    if limit == 0 {
        return Vec::new();
    }

    let query_tokens = tokenize(query);
    let mut scored: Vec<(usize, &Record)> = records
        .iter()
        .filter_map(|r| {
            let score = overlap(&query_tokens, r.content());
            (score > 0).then_some((score, r))
        })
        .collect();

    scored.sort_by_key(|(score, r)| (Reverse(*score), Reverse(r.created_at()), Reverse(r.id())));
    scored.into_iter().take(limit).map(|(_, r)| r).collect()
}
