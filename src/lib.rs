//! # rust-tbg
//!
//! A general-purpose framework for turn-based, deterministic,
//! perfect-information games with a multi-participant minimax engine.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: Games describe themselves through the
//!    `GameRules` trait. The engine never inspects a state directly.
//!
//! 2. **N-Participant First**: Turn order is a ring of markers with
//!    active flags. Nothing assumes two participants.
//!
//! 3. **Pure Transitions**: `apply_move` returns a fresh state, so search
//!    branches never share a mutable buffer.
//!
//! ## Search Semantics
//!
//! - **Adversarial**: one reference participant maximizes, everyone else
//!   minimizes its score. With two participants this is classic minimax.
//!
//! - **Selfish**: every participant maximizes its own score. Nodes carry
//!   one score per active participant.
//!
//! ## Modules
//!
//! - `core`: Markers, turn order, RNG, default naming
//! - `rules`: `GameRules` trait for game implementations
//! - `search`: Depth-limited minimax
//! - `players`: Participants and their move strategies
//! - `session`: Match driver, score table, logging, replay
//! - `games`: Tic-tac-toe and Nim

pub mod core;
pub mod error;
pub mod games;
pub mod players;
pub mod rules;
pub mod search;
pub mod session;

// Re-export commonly used types
pub use crate::core::{GameRng, Marker, NameSequence, TurnOrder};

pub use crate::error::{ConfigurationError, Error, Result};

pub use crate::rules::{GameRules, Moves, Outcome, Score};

pub use crate::search::{Minimax, SearchConfig, SearchMode, SearchResult, SearchStats};

pub use crate::players::{
    ConsoleInput, MoveInput, MoveRequest, Participant, ParticipantKind, ParticipantSpec,
    ScriptedInput, Strategy,
};

pub use crate::session::{
    FileLogger, LogFormat, MatchRecord, MemoryLogger, Session, SessionBuilder, SessionConfig,
    SessionLogger, SessionSummary, Standings,
};
