//! Nim rules and state.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::core::Marker;
use crate::error::{Error, Result};
use crate::rules::{GameRules, Moves, Score};

/// Score of taking the last stone on the very first move, for games of
/// up to 99 stones. Longer games raise it to their stone count plus one.
const WIN_SCORE: Score = 100;

/// Remove `count` stones from pile `pile`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Take {
    pub pile: usize,
    pub count: u32,
}

impl Take {
    pub fn new(pile: usize, count: u32) -> Self {
        Self { pile, count }
    }
}

impl fmt::Display for Take {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.pile, self.count)
    }
}

impl FromStr for Take {
    type Err = String;

    /// Accepts `pile:count` or `pile count`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let err = || format!("'{s}' is not a move (expected pile:count)");
        let mut parts = s
            .trim()
            .split(|c: char| c == ':' || c.is_whitespace())
            .filter(|p| !p.is_empty());
        let pile = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        let count = parts.next().and_then(|c| c.parse().ok()).ok_or_else(err)?;
        if parts.next().is_some() {
            return Err(err());
        }
        Ok(Take { pile, count })
    }
}

/// Nim position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NimState {
    /// Stones left per pile.
    pub piles: Vector<u32>,
    /// Participant who took stones last.
    pub last_mover: Option<Marker>,
}

impl NimState {
    /// Stones left across all piles.
    #[must_use]
    pub fn stones(&self) -> u32 {
        self.piles.iter().sum()
    }
}

/// Nim rules.
#[derive(Clone, Debug)]
pub struct Nim {
    piles: Vec<u32>,
    max_take: Option<u32>,
}

impl Default for Nim {
    fn default() -> Self {
        Self::new([1, 3, 5])
    }
}

impl Nim {
    /// Nim starting from the given pile sizes.
    pub fn new(piles: impl IntoIterator<Item = u32>) -> Self {
        Self {
            piles: piles.into_iter().collect(),
            max_take: None,
        }
    }

    /// Cap the stones removable per move.
    pub fn with_max_take(mut self, max_take: u32) -> Self {
        self.max_take = Some(max_take.max(1));
        self
    }

    /// Starting position.
    #[must_use]
    pub fn initial_state(&self) -> NimState {
        NimState {
            piles: self.piles.iter().copied().collect(),
            last_mover: None,
        }
    }

    fn take_limit(&self, pile: u32) -> u32 {
        self.max_take.map_or(pile, |max| pile.min(max))
    }

    /// Win score at `depth`: shrinks with depth, never below 1.
    fn win_score(&self, depth: u32) -> Score {
        let stones: u32 = self.piles.iter().sum();
        let horizon = WIN_SCORE.max(Score::try_from(stones).unwrap_or(Score::MAX - 1) + 1);
        let depth = Score::try_from(depth).unwrap_or(Score::MAX);
        horizon.saturating_sub(depth).max(1)
    }
}

impl GameRules for Nim {
    type State = NimState;
    type Move = Take;

    fn name(&self) -> &str {
        "Nim"
    }

    fn player_range(&self) -> RangeInclusive<usize> {
        2..=8
    }

    fn possible_moves(&self, state: &NimState) -> Moves<Take> {
        state
            .piles
            .iter()
            .enumerate()
            .flat_map(|(pile, &stones)| {
                (1..=self.take_limit(stones)).map(move |count| Take { pile, count })
            })
            .collect()
    }

    fn apply_move(&self, state: &NimState, mv: &Take, marker: Marker) -> Result<NimState> {
        let stones = state
            .piles
            .get(mv.pile)
            .copied()
            .ok_or_else(|| Error::invalid_move(mv, marker))?;
        if mv.count == 0 || mv.count > self.take_limit(stones) {
            return Err(Error::invalid_move(mv, marker));
        }

        let mut next = state.clone();
        next.piles.set(mv.pile, stones - mv.count);
        next.last_mover = Some(marker);
        Ok(next)
    }

    fn is_terminal(&self, state: &NimState) -> bool {
        state.stones() == 0
    }

    fn winner(&self, state: &NimState) -> Option<Marker> {
        if self.is_terminal(state) {
            state.last_mover
        } else {
            None
        }
    }

    fn terminal_score(&self, state: &NimState, subject: Marker, depth: u32) -> Score {
        let speed = self.win_score(depth);
        match self.winner(state) {
            Some(winner) if winner == subject => speed,
            Some(_) => -speed,
            None => 0,
        }
    }

    // Without knowing who moves next no pile count favors anyone.
    fn heuristic(&self, _state: &NimState, _subject: Marker, _depth: u32) -> Score {
        0
    }

    fn snapshot(&self, state: &NimState) -> String {
        state
            .piles
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn display_snapshot(&self, snapshot: &str) -> String {
        snapshot
            .split_whitespace()
            .enumerate()
            .map(|(i, count)| {
                let stones = count.parse::<usize>().map_or_else(|_| count.to_string(), |n| "|".repeat(n));
                format!("\tpile {i}: {stones}")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn help(&self) -> String {
        let mut lines = vec![
            "How to play:".to_string(),
            "- Remove stones from one pile by entering 'pile:count' (e.g. '0:2').".to_string(),
            "- Whoever takes the last stone wins.".to_string(),
        ];
        if let Some(max) = self.max_take {
            lines.push(format!("- At most {max} stones may be taken per move."));
        }
        lines.push("- Press [Enter] without typing anything to let the AI play for you.".to_string());
        lines.push("- Type '?' or 'help' to display these instructions again.".to_string());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TurnOrder;
    use crate::search::{Minimax, SearchConfig};
    use proptest::prelude::*;

    const A: Marker = Marker('a');
    const B: Marker = Marker('b');

    #[test]
    fn test_take_parsing() {
        assert_eq!("1:2".parse::<Take>(), Ok(Take::new(1, 2)));
        assert_eq!(" 0 3 ".parse::<Take>(), Ok(Take::new(0, 3)));
        assert!("1".parse::<Take>().is_err());
        assert!("1:2:3".parse::<Take>().is_err());
        assert_eq!(Take::new(2, 1).to_string(), "2:1");
    }

    #[test]
    fn test_possible_moves_respect_cap() {
        let game = Nim::new([2, 0, 4]).with_max_take(3);
        let moves = game.possible_moves(&game.initial_state());
        assert_eq!(moves.len(), 2 + 3);
        assert_eq!(moves[0], Take::new(0, 1));
        assert!(!moves.contains(&Take::new(2, 4)));
    }

    #[test]
    fn test_apply_move_is_persistent() {
        let game = Nim::new([3, 4]);
        let start = game.initial_state();
        let next = game.apply_move(&start, &Take::new(1, 4), A).unwrap();

        assert_eq!(start.piles, Vector::from(vec![3, 4]));
        assert_eq!(next.piles, Vector::from(vec![3, 0]));
        assert_eq!(next.last_mover, Some(A));
        assert!(game.apply_move(&next, &Take::new(1, 1), B).is_err());
        assert!(game.apply_move(&next, &Take::new(5, 1), B).is_err());
        assert!(game.apply_move(&next, &Take::new(0, 0), B).is_err());
    }

    #[test]
    fn test_last_stone_wins() {
        let game = Nim::new([1]);
        let end = game.apply_move(&game.initial_state(), &Take::new(0, 1), B).unwrap();
        assert!(game.is_terminal(&end));
        assert_eq!(game.winner(&end), Some(B));
        assert_eq!(game.terminal_score(&end, B, 1), 99);
        assert_eq!(game.terminal_score(&end, A, 1), -99);
    }

    #[test]
    fn test_long_game_keeps_win_above_loss() {
        let game = Nim::new([150]).with_max_take(1);
        let end = NimState {
            piles: Vector::from(vec![0]),
            last_mover: Some(B),
        };
        assert_eq!(game.terminal_score(&end, B, 150), 1);
        assert_eq!(game.terminal_score(&end, A, 150), -1);
        assert!(game.terminal_score(&end, B, 149) > game.terminal_score(&end, B, 150));
        // Small games keep the usual scale.
        assert_eq!(Nim::new([3]).terminal_score(&end, B, 2), 98);
    }

    proptest! {
        #[test]
        fn prop_win_beats_draw_beats_loss(
            stones in 1u32..400,
            depth in 1u32..1_000,
            other_depth in 1u32..1_000,
        ) {
            let game = Nim::new([stones]).with_max_take(1);
            let end = NimState {
                piles: Vector::from(vec![0]),
                last_mover: Some(A),
            };
            let unfinished = game.initial_state();

            let win = game.terminal_score(&end, A, depth);
            let loss = game.terminal_score(&end, B, other_depth);
            let draw = game.terminal_score(&unfinished, A, depth);
            prop_assert!(win > draw);
            prop_assert!(draw > loss);
            if depth <= stones {
                prop_assert!(game.terminal_score(&end, A, depth) >= game.terminal_score(&end, A, depth + 1));
            }
        }
    }

    #[test]
    fn test_two_player_search_finds_nim_sum_move() {
        // 1 ^ 3 ^ 5 = 7; only taking 3 from pile 2 restores a zero nim-sum.
        let game = Nim::default();
        let order = TurnOrder::new([A, B]).unwrap();
        let search = Minimax::new(&game, &order, SearchConfig::default());
        let mv = search.best_move(&game.initial_state(), A, None).unwrap();
        assert_eq!(mv, Take::new(2, 3));
    }

    #[test]
    fn test_snapshot_and_display() {
        let game = Nim::new([2, 0, 1]);
        let snap = game.snapshot(&game.initial_state());
        assert_eq!(snap, "2 0 1");
        let shown = game.display_snapshot(&snap);
        assert!(shown.contains("pile 0: ||"));
        assert!(shown.contains("pile 2: |"));
    }
}
