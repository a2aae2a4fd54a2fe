//! Game rules trait for game implementations.
//!
//! Games implement `GameRules` to define:
//! - Legal moves for each game state
//! - How moves produce new states
//! - Terminal detection, winners, scores and heuristics
//!
//! The search engine and match driver call into `GameRules` but never
//! interpret game-specific concepts directly.

pub mod engine;

pub use engine::{GameRules, Moves, Outcome, Score};
