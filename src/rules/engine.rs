//! Game rules trait for game implementations.
//!
//! Games implement `GameRules` to define their rules:
//! - What moves are legal, and in which order they are tried
//! - How a move produces a new state
//! - Terminal detection, winners, and scoring for the search engine

use smallvec::SmallVec;
use std::fmt::{Debug, Display};
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::core::{Marker, TurnOrder};
use crate::error::Result;

/// Evaluation of a state from one participant's point of view.
pub type Score = i32;

/// Legal moves of a state, in tie-break priority order.
pub type Moves<M> = SmallVec<[M; 16]>;

/// Result of a completed match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Single winner.
    Winner(Marker),
    /// Draw (no winner).
    Draw,
}

impl Outcome {
    /// Check if a marker won.
    #[must_use]
    pub fn is_winner(&self, marker: Marker) -> bool {
        matches!(self, Outcome::Winner(m) if *m == marker)
    }

    /// Winning marker, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Marker> {
        match self {
            Outcome::Winner(m) => Some(*m),
            Outcome::Draw => None,
        }
    }
}

/// Rules of a turn-based, deterministic, perfect-information game.
///
/// ## Implementation Notes
///
/// - `apply_move` is pure: it returns a fresh state and never touches its
///   input. The search engine relies on this for branch isolation.
/// - `possible_moves` order is the tie-break order of the search engine.
/// - `terminal_score` must rank win > draw > loss at every depth, with
///   shallower wins and deeper losses scoring better.
/// - `heuristic` must stay strictly inside the terminal win/loss bounds.
pub trait GameRules {
    /// Game state. Cloning must yield an independent snapshot.
    type State: Clone + Debug;

    /// A single legal action.
    type Move: Clone + PartialEq + Debug + Display + FromStr;

    /// Game name, used for log folders and summaries.
    fn name(&self) -> &str;

    /// Supported participant counts.
    fn player_range(&self) -> RangeInclusive<usize> {
        1..=255
    }

    /// Markers pre-assigned to the first participants.
    fn default_markers(&self) -> Vec<Marker> {
        Vec::new()
    }

    /// Legal moves in `state`.
    fn possible_moves(&self, state: &Self::State) -> Moves<Self::Move>;

    /// Apply `mv` for `marker`, returning the successor state.
    ///
    /// Fails with [`crate::Error::InvalidMove`] if `mv` is not legal.
    fn apply_move(&self, state: &Self::State, mv: &Self::Move, marker: Marker)
        -> Result<Self::State>;

    /// Check if the game is over.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Winner of `state`, if any.
    fn winner(&self, state: &Self::State) -> Option<Marker>;

    /// Score of a terminal state for `subject`, found at `depth`.
    fn terminal_score(&self, state: &Self::State, subject: Marker, depth: u32) -> Score;

    /// Estimate of a non-terminal state for `subject` at the depth limit.
    fn heuristic(&self, state: &Self::State, subject: Marker, depth: u32) -> Score;

    /// Participant to move after `marker`.
    fn next_marker(&self, order: &TurnOrder, marker: Marker) -> Marker {
        order.next(marker)
    }

    /// Early-pruning hook, consulted after each child of a search node.
    ///
    /// Returning `true` abandons the remaining siblings of that node. This
    /// is an unsound relaxation, not alpha-beta: it can change the result.
    fn early_pruning(
        &self,
        _state: &Self::State,
        _depth: u32,
        _value: Score,
        _max_depth: Option<u32>,
        _reference: Option<Marker>,
    ) -> bool {
        false
    }

    /// Textual snapshot of a state for event logs.
    fn snapshot(&self, state: &Self::State) -> String;

    /// Pretty form of a snapshot for replay and terminal output.
    fn display_snapshot(&self, snapshot: &str) -> String {
        snapshot.to_string()
    }

    /// Parse a move typed by a human.
    fn parse_move(&self, _state: &Self::State, text: &str) -> Option<Self::Move> {
        text.trim().parse().ok()
    }

    /// Label of a move as a human would type it.
    fn describe_move(&self, mv: &Self::Move) -> String {
        mv.to_string()
    }

    /// How-to-play text.
    fn help(&self) -> String {
        [
            "How to play:",
            "- Enter a move (e.g., a number or coordinate depending on the game),",
            "  or press [Enter] without typing anything to let the AI play for you.",
            "- Type '?' or 'help' at any time to display these instructions again.",
        ]
        .join("\n")
    }

    // === Convenience Methods ===

    /// Check whether `mv` is currently legal.
    fn is_legal(&self, state: &Self::State, mv: &Self::Move) -> bool {
        self.possible_moves(state).iter().any(|m| m == mv)
    }

    /// Outcome of a terminal state, `None` while the game continues.
    fn outcome(&self, state: &Self::State) -> Option<Outcome> {
        if !self.is_terminal(state) {
            return None;
        }
        Some(match self.winner(state) {
            Some(marker) => Outcome::Winner(marker),
            None => Outcome::Draw,
        })
    }
}
