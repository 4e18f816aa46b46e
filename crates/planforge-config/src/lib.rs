//! Configuration system for PlanForge.
//!
//! Load planner configuration from TOML or YAML to pick the search
//! strategy, heuristic and budgets without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use planforge_config::{PlannerConfig, SearchStrategy};
//! use std::time::Duration;
//!
//! let config = PlannerConfig::from_toml_str(r#"
//!     strategy = "best_first"
//!     heuristic = "max_cost"
//!
//!     [termination]
//!     node_limit = 100000
//!     seconds_spent_limit = 30
//! "#).unwrap();
//!
//! assert_eq!(config.strategy, SearchStrategy::BestFirst);
//! assert_eq!(config.node_limit(), Some(100_000));
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use planforge_config::PlannerConfig;
//!
//! let config = PlannerConfig::load("planner.toml").unwrap_or_default();
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main planner configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PlannerConfig {
    /// Frontier ordering.
    #[serde(default)]
    pub strategy: SearchStrategy,

    /// Heuristic used by the best-first strategies.
    #[serde(default)]
    pub heuristic: HeuristicType,

    /// Threads for layer-parallel breadth-first expansion.
    #[serde(default)]
    pub thread_count: ThreadCount,

    /// Search budgets.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,
}

impl PlannerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings no planner can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thread_count == ThreadCount::Count(0) {
            return Err(ConfigError::Invalid(
                "thread_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_heuristic(mut self, heuristic: HeuristicType) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_thread_count(mut self, thread_count: ThreadCount) -> Self {
        self.thread_count = thread_count;
        self
    }

    /// Sets the maximum number of node expansions.
    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.termination = Some(TerminationConfig {
            node_limit: Some(limit),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the maximum plan depth explored.
    pub fn with_depth_limit(mut self, limit: usize) -> Self {
        self.termination = Some(TerminationConfig {
            depth_limit: Some(limit),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the wall-clock limit in milliseconds.
    pub fn with_time_limit_millis(mut self, millis: u64) -> Self {
        self.termination = Some(TerminationConfig {
            millis_spent_limit: Some(millis),
            seconds_spent_limit: None,
            ..self.termination.unwrap_or_default()
        });
        self
    }

    pub fn node_limit(&self) -> Option<u64> {
        self.termination.as_ref().and_then(|t| t.node_limit)
    }

    pub fn depth_limit(&self) -> Option<usize> {
        self.termination.as_ref().and_then(|t| t.depth_limit)
    }

    /// Returns the wall-clock limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }
}

/// Order in which the frontier is explored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// FIFO frontier; shortest plans by action count.
    #[default]
    BreadthFirst,

    /// Priority by path cost plus heuristic estimate.
    BestFirst,

    /// Priority by heuristic estimate alone.
    GreedyBestFirst,
}

impl std::fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchStrategy::BreadthFirst => write!(f, "breadth_first"),
            SearchStrategy::BestFirst => write!(f, "best_first"),
            SearchStrategy::GreedyBestFirst => write!(f, "greedy_best_first"),
        }
    }
}

/// Built-in heuristic estimators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicType {
    /// Always zero; best-first becomes uniform-cost search.
    Zero,

    /// Number of goal literals the state gets wrong. Not admissible.
    #[default]
    GoalCount,

    /// Relaxed reachability cost (h_max). Admissible.
    MaxCost,
}

/// Thread count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// Sequential search.
    #[default]
    None,

    /// Use the available parallelism.
    Auto,

    /// Specific number of threads.
    Count(usize),
}

impl ThreadCount {
    /// Resolves to a concrete worker count, or `None` for sequential search.
    pub fn resolve(&self) -> Option<usize> {
        match self {
            ThreadCount::None => None,
            ThreadCount::Auto => Some(
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1),
            ),
            ThreadCount::Count(n) => Some(*n),
        }
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum number of node expansions.
    #[serde(alias = "max_nodes")]
    pub node_limit: Option<u64>,

    /// Nodes at this depth are goal-tested but not expanded.
    #[serde(alias = "max_depth")]
    pub depth_limit: Option<usize>,

    /// Maximum seconds to spend searching.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend searching, added to the seconds limit.
    pub millis_spent_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    ///
    /// A configured limit of zero is returned as `Some(Duration::ZERO)`.
    pub fn time_limit(&self) -> Option<Duration> {
        if self.seconds_spent_limit.is_none() && self.millis_spent_limit.is_none() {
            return None;
        }
        let seconds = Duration::from_secs(self.seconds_spent_limit.unwrap_or(0));
        let millis = Duration::from_millis(self.millis_spent_limit.unwrap_or(0));
        Some(seconds + millis)
    }
}

#[cfg(test)]
mod tests;
