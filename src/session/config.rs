//! Session configuration parameters.

use serde::{Deserialize, Serialize};

use crate::core::Marker;
use crate::search::{SearchConfig, SearchMode};

/// Configuration for a session of repeated matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Search settings shared by every search participant.
    pub search: SearchConfig,

    /// Fixed reference for adversarial search (one-vs-all). `None` makes
    /// each acting participant its own reference.
    pub reference: Option<Marker>,

    /// Keep per-move events in match records.
    pub record_events: bool,

    /// Advance the starting participant after every match.
    pub rotate_start: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            reference: None,
            record_events: true,
            rotate_start: true,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search settings.
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Set the search mode.
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.search.mode = mode;
        self
    }

    /// Limit the search depth.
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.search.max_depth = Some(depth);
        self
    }

    /// Play every adversarial search against `reference`.
    pub fn with_reference(mut self, reference: Marker) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Enable or disable per-move event recording.
    pub fn with_record_events(mut self, record: bool) -> Self {
        self.record_events = record;
        self
    }

    /// Enable or disable starting-participant rotation.
    pub fn with_rotate_start(mut self, rotate: bool) -> Self {
        self.rotate_start = rotate;
        self
    }
}
