//! Crate-level error taxonomy for cogmem.

use crate::config::ConfigError;
use crate::memory::MemoryError;
use crate::reasoning::ReasoningError;

/// Errors surfaced by the assistant pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("memory error: {0}")]
    Memory(#[from] MemoryError),

    #[error("reasoning error: {0}")]
    Reasoning(#[from] ReasoningError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for assistant operations.
pub type Result<T> = std::result::Result<T, AssistantError>;
