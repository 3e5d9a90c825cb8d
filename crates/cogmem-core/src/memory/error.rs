//! Error types for the memory subsystem.

/// Errors produced by memory operations.
///
/// Insertion and retrieval are total; only construction can be rejected.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    #[error("invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),
}

/// Result type for memory operations.
pub type MemoryResult<T> = std::result::Result<T, MemoryError>;
