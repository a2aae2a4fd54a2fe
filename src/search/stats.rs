//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one minimax search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// States visited, root children included.
    pub nodes: u64,

    /// Terminal states scored.
    pub terminal_evals: u64,

    /// Depth-limited states scored by the heuristic.
    pub heuristic_evals: u64,

    /// Times the early-pruning hook abandoned remaining siblings.
    pub pruned: u64,

    /// Deepest ply reached.
    pub max_depth: u32,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visit at `depth`.
    pub(crate) fn visit(&mut self, depth: u32) {
        self.nodes += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Calculate nodes per second.
    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.nodes as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Elapsed time in whole milliseconds.
    #[must_use]
    pub fn millis(&self) -> u64 {
        self.time_us / 1_000
    }
}
