//! Search configuration parameters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the search engine treats the participants it is not playing for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Zero-sum: the reference participant maximizes, everyone else
    /// minimizes the reference's score.
    #[default]
    Adversarial,
    /// Every participant maximizes its own score, ignoring the others.
    Selfish,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Adversarial => write!(f, "adversarial"),
            SearchMode::Selfish => write!(f, "selfish"),
        }
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "adversarial" | "classic" => Ok(SearchMode::Adversarial),
            "selfish" | "independent" => Ok(SearchMode::Selfish),
            other => Err(format!(
                "unknown search mode '{other}' (expected 'adversarial' or 'selfish')"
            )),
        }
    }
}

/// Minimax search configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Adversarial or selfish value semantics.
    pub mode: SearchMode,

    /// Depth at which non-terminal states are scored by the heuristic.
    /// `None` searches exhaustively; only safe for small game trees.
    pub max_depth: Option<u32>,
}

impl SearchConfig {
    /// Create a new config with the given mode and unbounded depth.
    pub fn new(mode: SearchMode) -> Self {
        Self {
            mode,
            max_depth: None,
        }
    }

    /// Set the search mode.
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Limit the search depth.
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Remove the depth limit.
    pub fn unbounded(mut self) -> Self {
        self.max_depth = None;
        self
    }

    /// True once `depth` has reached the configured limit.
    #[must_use]
    pub fn depth_reached(&self, depth: u32) -> bool {
        self.max_depth.is_some_and(|max| depth >= max)
    }
}
