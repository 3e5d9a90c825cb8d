//! Reasoning stage: strategy selection and the canned reasoner.
//!
//! [`CannedReasoner`] walks a fixed list of steps for the chosen strategy,
//! pausing `step_delay` after each one, and answers with a templated
//! response at a fixed confidence. The [`Reasoner`] trait is the seam for
//! plugging in anything smarter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use crate::memory::Record;

/// Delay between reasoning steps when none is configured.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(100);

const CHAIN_OF_THOUGHT_STEPS: [&str; 5] = [
    "Understanding the query",
    "Identifying key concepts",
    "Retrieving relevant information",
    "Synthesizing response",
    "Validating conclusions",
];

const TREE_OF_THOUGHT_BRANCHES: [&str; 4] = [
    "Exploring possibility A",
    "Exploring possibility B",
    "Evaluating trade-offs",
    "Selecting optimal path",
];

/// Errors produced by the reasoning stage.
#[derive(Debug, thiserror::Error)]
pub enum ReasoningError {
    #[error("unknown reasoning strategy: {0} (expected chain_of_thought, tree_of_thought or basic)")]
    UnknownStrategy(String),

    #[error("reasoning failed: {0}")]
    Failed(String),
}

/// Reasoning strategy applied to each query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningStrategy {
    #[default]
    ChainOfThought,
    TreeOfThought,
    Basic,
}

impl ReasoningStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChainOfThought => "chain_of_thought",
            Self::TreeOfThought => "tree_of_thought",
            Self::Basic => "basic",
        }
    }

    /// Confidence reported by the canned reasoner for this strategy.
    pub fn confidence(&self) -> f64 {
        match self {
            Self::ChainOfThought => 0.85,
            Self::TreeOfThought => 0.90,
            Self::Basic => 0.70,
        }
    }
}

impl std::fmt::Display for ReasoningStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReasoningStrategy {
    type Err = ReasoningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "chain_of_thought" => Ok(Self::ChainOfThought),
            "tree_of_thought" => Ok(Self::TreeOfThought),
            "basic" => Ok(Self::Basic),
            other => Err(ReasoningError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Output of one reasoning pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningOutcome {
    pub response: String,
    pub reasoning: Vec<String>,
    pub confidence: f64,
}

/// Produces a response for a query given retrieved context.
#[async_trait]
pub trait Reasoner: Send + Sync {
    fn strategy(&self) -> ReasoningStrategy;

    async fn reason(
        &self,
        query: &str,
        context: &[Record],
    ) -> Result<ReasoningOutcome, ReasoningError>;
}

/// Fixed-script reasoner with an artificial per-step delay.
#[derive(Debug, Clone)]
pub struct CannedReasoner {
    strategy: ReasoningStrategy,
    step_delay: Duration,
}

impl CannedReasoner {
    pub fn new(strategy: ReasoningStrategy) -> Self {
        Self::with_step_delay(strategy, DEFAULT_STEP_DELAY)
    }

    pub fn with_step_delay(strategy: ReasoningStrategy, step_delay: Duration) -> Self {
        Self {
            strategy,
            step_delay,
        }
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    async fn walk(&self, steps: &[&str], verb: &str, query: &str) -> Vec<String> {
        let mut chain = Vec::with_capacity(steps.len());
        for step in steps {
            chain.push(format!("{step}: {verb} '{query}'"));
            if !self.step_delay.is_zero() {
                tokio::time::sleep(self.step_delay).await;
            }
        }
        chain
    }
}

impl Default for CannedReasoner {
    fn default() -> Self {
        Self::new(ReasoningStrategy::default())
    }
}

#[async_trait]
impl Reasoner for CannedReasoner {
    fn strategy(&self) -> ReasoningStrategy {
        self.strategy
    }

    async fn reason(
        &self,
        query: &str,
        _context: &[Record],
    ) -> Result<ReasoningOutcome, ReasoningError> {
        let (response, reasoning) = match self.strategy {
            ReasoningStrategy::ChainOfThought => (
                format!("Based on chain-of-thought analysis: {query}"),
                self.walk(&CHAIN_OF_THOUGHT_STEPS, "Processing", query).await,
            ),
            ReasoningStrategy::TreeOfThought => (
                format!("After exploring multiple paths: {query}"),
                self.walk(&TREE_OF_THOUGHT_BRANCHES, "Analyzing", query).await,
            ),
            ReasoningStrategy::Basic => (
                format!("Processing: {query}"),
                vec!["Direct processing".to_string()],
            ),
        };

        Ok(ReasoningOutcome {
            response,
            reasoning,
            confidence: self.strategy.confidence(),
        })
    }
}
