//! Tic-tac-toe rules, board and scoring.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::core::Marker;
use crate::error::{Error, Result};
use crate::rules::{GameRules, Moves, Score};

/// Rows, columns and diagonals.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

const CENTER: usize = 4;
const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// Cell index typed on a numeric keypad, indexed by board cell.
const KEYPAD: [char; 9] = ['7', '8', '9', '4', '5', '6', '1', '2', '3'];

/// Value a fast-pruning board stops at: a win or loss at depth 5.
const FAST_PRUNE_VALUE: Score = 50;

/// A board cell, the move type of tic-tac-toe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell(u8);

impl Cell {
    /// Create a cell from its index, `None` if out of range.
    pub fn new(index: usize) -> Option<Self> {
        (index < 9).then_some(Cell(index as u8))
    }

    /// Board index of this cell.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Cell {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(Cell::new)
            .ok_or_else(|| format!("'{s}' is not a cell between 0 and 8"))
    }
}

/// Nine cells, each empty or holding a participant's marker.
///
/// `Copy`, so every successor is an independent value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board([Option<Marker>; 9]);

impl Board {
    /// Empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marker at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Marker> {
        self.0.get(index).copied().flatten()
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.0.iter().filter(|c| c.is_some()).count()
    }

    /// True when no cell is empty.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    /// Marker owning a complete line, if any.
    #[must_use]
    pub fn line_owner(&self) -> Option<Marker> {
        WINNING_LINES.iter().find_map(|&[a, b, c]| match self.0[a] {
            Some(m) if self.0[b] == Some(m) && self.0[c] == Some(m) => Some(m),
            _ => None,
        })
    }

    fn with(mut self, index: usize, marker: Marker) -> Self {
        self.0[index] = Some(marker);
        self
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.0 {
            write!(f, "{}", cell.map_or(' ', |m| m.0))?;
        }
        Ok(())
    }
}

/// How humans type cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    /// 0..=8, left to right, top to bottom.
    #[default]
    Index,
    /// 1..=9 as on a numeric keypad; an empty entry asks the AI.
    Keypad,
}

/// Tic-tac-toe rules.
#[derive(Clone, Debug, Default)]
pub struct TicTacToe {
    layout: Layout,
    fast_pruning: bool,
}

impl TicTacToe {
    /// Standard rules: index layout, no pruning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the human input layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Stop exploring a node once a child is a win or loss in five plies.
    pub fn with_fast_pruning(mut self) -> Self {
        self.fast_pruning = true;
        self
    }

    /// Input layout.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Parse a nine-character board; ' ' or '.' mark empty cells.
    pub fn parse_board(text: &str) -> Result<Board> {
        let invalid = |reason: &str| Error::InvalidSnapshot {
            snapshot: text.to_string(),
            reason: reason.to_string(),
        };

        let chars: Vec<char> = text.chars().collect();
        if chars.len() != 9 {
            return Err(invalid("expected exactly 9 cells"));
        }

        let mut board = Board::new();
        for (i, ch) in chars.into_iter().enumerate() {
            if ch == ' ' || ch == '.' {
                continue;
            }
            let marker = Marker::new(ch).map_err(|e| invalid(&e.to_string()))?;
            board = board.with(i, marker);
        }
        Ok(board)
    }

    fn cell_label(&self, index: usize) -> char {
        match self.layout {
            Layout::Index => char::from(b'0' + index as u8),
            Layout::Keypad => KEYPAD[index],
        }
    }
}

impl GameRules for TicTacToe {
    type State = Board;
    type Move = Cell;

    fn name(&self) -> &str {
        "TicTacToe"
    }

    fn player_range(&self) -> RangeInclusive<usize> {
        2..=2
    }

    fn default_markers(&self) -> Vec<Marker> {
        vec![Marker('X'), Marker('O')]
    }

    fn possible_moves(&self, board: &Board) -> Moves<Cell> {
        if board.line_owner().is_some() {
            return Moves::new();
        }
        (0..9u8)
            .filter(|&i| board.0[i as usize].is_none())
            .map(Cell)
            .collect()
    }

    fn apply_move(&self, board: &Board, mv: &Cell, marker: Marker) -> Result<Board> {
        if !self.is_legal(board, mv) {
            return Err(Error::invalid_move(mv, marker));
        }
        Ok(board.with(mv.index(), marker))
    }

    fn is_terminal(&self, board: &Board) -> bool {
        board.line_owner().is_some() || board.is_full()
    }

    fn winner(&self, board: &Board) -> Option<Marker> {
        board.line_owner()
    }

    fn terminal_score(&self, board: &Board, subject: Marker, depth: u32) -> Score {
        let speed = 10 - depth as Score;
        match board.line_owner() {
            Some(winner) if winner == subject => 10 * speed,
            Some(_) => -10 * speed,
            None => {
                let center = if board.0[CENTER] == Some(subject) { 5 } else { 0 };
                let corners = CORNERS
                    .iter()
                    .filter(|&&i| board.0[i] == Some(subject))
                    .count() as Score;
                center + corners
            }
        }
    }

    fn heuristic(&self, board: &Board, subject: Marker, _depth: u32) -> Score {
        let mut score = 0;

        // Lines one move from completion.
        for line in &WINNING_LINES {
            let cells = line.map(|i| board.0[i]);
            let empty = cells.iter().filter(|c| c.is_none()).count();
            if empty != 1 {
                continue;
            }
            let mut owners = cells.iter().flatten();
            if let (Some(a), Some(b)) = (owners.next(), owners.next()) {
                if a == b {
                    score += if *a == subject { 1 } else { -1 };
                }
            }
        }

        match board.0[CENTER] {
            Some(m) if m == subject => score += 1,
            Some(_) => score -= 1,
            None => {}
        }

        score
    }

    fn early_pruning(
        &self,
        _board: &Board,
        _depth: u32,
        value: Score,
        _max_depth: Option<u32>,
        _reference: Option<Marker>,
    ) -> bool {
        self.fast_pruning && value.abs() == FAST_PRUNE_VALUE
    }

    fn snapshot(&self, board: &Board) -> String {
        board.to_string()
    }

    fn display_snapshot(&self, snapshot: &str) -> String {
        let cells: Vec<char> = snapshot.chars().chain(std::iter::repeat(' ')).take(9).collect();
        let row = |r: usize| {
            format!(
                "\t║ {} ║ {} ║ {} ║",
                cells[3 * r],
                cells[3 * r + 1],
                cells[3 * r + 2]
            )
        };
        [
            "\t╔═══╦═══╦═══╗".to_string(),
            row(0),
            "\t╠═══╬═══╬═══╣".to_string(),
            row(1),
            "\t╠═══╬═══╬═══╣".to_string(),
            row(2),
            "\t╚═══╩═══╩═══╝".to_string(),
        ]
        .join("\n")
    }

    fn parse_move(&self, _board: &Board, text: &str) -> Option<Cell> {
        let text = text.trim();
        match self.layout {
            Layout::Index => text.parse().ok(),
            Layout::Keypad => {
                let mut chars = text.chars();
                let (Some(ch), None) = (chars.next(), chars.next()) else {
                    return None;
                };
                KEYPAD.iter().position(|&k| k == ch).and_then(Cell::new)
            }
        }
    }

    fn describe_move(&self, mv: &Cell) -> String {
        self.cell_label(mv.index()).to_string()
    }

    fn help(&self) -> String {
        let labels: String = (0..9).map(|i| self.cell_label(i)).collect();
        let (first, last) = (self.cell_label(0), self.cell_label(8));

        let mut lines = vec![
            "How to play:".to_string(),
            "- Choose a move by entering a number corresponding to the board position.".to_string(),
            "- Positions are numbered as shown below:".to_string(),
            self.display_snapshot(&labels),
            format!("- For example, '{first}' is the top-left cell, '{last}' is the bottom-right."),
        ];
        if self.layout == Layout::Keypad {
            lines.push("- Press [Enter] without typing anything to let the AI play for you.".to_string());
        }
        lines.push("- Type '?' or 'help' to display these instructions again.".to_string());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TurnOrder;
    use crate::search::{Minimax, SearchConfig};

    const X: Marker = Marker('X');
    const O: Marker = Marker('O');

    fn order() -> TurnOrder {
        TurnOrder::new([X, O]).unwrap()
    }

    #[test]
    fn test_parse_board_roundtrip() {
        let board = TicTacToe::parse_board("XO.X O  X").unwrap();
        assert_eq!(board.get(0), Some(X));
        assert_eq!(board.get(2), None);
        assert_eq!(board.filled(), 5);
        assert_eq!(board.to_string(), "XO X O  X");

        assert!(matches!(
            TicTacToe::parse_board("XO"),
            Err(Error::InvalidSnapshot { .. })
        ));
    }

    #[test]
    fn test_cell_parsing() {
        assert_eq!("4".parse::<Cell>(), Ok(Cell(4)));
        assert!("9".parse::<Cell>().is_err());
        assert!("x".parse::<Cell>().is_err());
    }

    #[test]
    fn test_apply_move_leaves_input_untouched() {
        let game = TicTacToe::new();
        let board = Board::new();
        let next = game.apply_move(&board, &Cell(4), X).unwrap();
        assert_eq!(board, Board::new());
        assert_eq!(next.get(4), Some(X));
    }

    #[test]
    fn test_occupied_cell_is_invalid() {
        let game = TicTacToe::new();
        let board = TicTacToe::parse_board("    X    ").unwrap();
        assert!(matches!(
            game.apply_move(&board, &Cell(4), O),
            Err(Error::InvalidMove { .. })
        ));
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let game = TicTacToe::new();
        let board = TicTacToe::parse_board("XOXXOOOXX").unwrap();
        assert!(game.is_terminal(&board));
        assert_eq!(game.winner(&board), None);
        assert!(game.possible_moves(&board).is_empty());
    }

    #[test]
    fn test_won_board_has_no_moves() {
        let game = TicTacToe::new();
        let board = TicTacToe::parse_board("XXXOO    ").unwrap();
        assert!(game.is_terminal(&board));
        assert_eq!(game.winner(&board), Some(X));
        assert!(game.possible_moves(&board).is_empty());
    }

    #[test]
    fn test_terminal_score_ordering() {
        let game = TicTacToe::new();
        let won = TicTacToe::parse_board("XXXOO    ").unwrap();
        let drawn = TicTacToe::parse_board("XOXXOOOXX").unwrap();

        assert_eq!(game.terminal_score(&won, X, 5), 50);
        assert_eq!(game.terminal_score(&won, O, 5), -50);
        assert!(game.terminal_score(&won, X, 3) > game.terminal_score(&won, X, 7));
        assert!(game.terminal_score(&won, O, 7) > game.terminal_score(&won, O, 3));

        // X holds corners 0, 2 and 8; O holds the center.
        assert_eq!(game.terminal_score(&drawn, X, 9), 3);
        assert_eq!(game.terminal_score(&drawn, O, 9), 6);
        assert!(game.terminal_score(&won, X, 9) > game.terminal_score(&drawn, X, 9));
        assert!(game.terminal_score(&drawn, O, 9) > game.terminal_score(&won, O, 9));
    }

    #[test]
    fn test_heuristic_counts_open_pairs_and_center() {
        let game = TicTacToe::new();
        let board = TicTacToe::parse_board("XX  O    ").unwrap();
        // X: open pair on the top row; O: center.
        assert_eq!(game.heuristic(&board, X, 2), 0);
        let board = TicTacToe::parse_board("XX  X O O").unwrap();
        // X: top row, middle column and center; O: bottom row.
        assert_eq!(game.heuristic(&board, X, 2), 1 + 1 + 1 - 1);
        assert_eq!(game.heuristic(&board, O, 2), -2);
    }

    #[test]
    fn test_fast_pruning_threshold() {
        let board = Board::new();
        assert!(!TicTacToe::new().early_pruning(&board, 5, 50, None, None));
        let fast = TicTacToe::new().with_fast_pruning();
        assert!(fast.early_pruning(&board, 5, 50, None, Some(X)));
        assert!(fast.early_pruning(&board, 5, -50, None, None));
        assert!(!fast.early_pruning(&board, 4, 60, None, None));
    }

    #[test]
    fn test_keypad_layout() {
        let game = TicTacToe::new().with_layout(Layout::Keypad);
        let board = Board::new();
        assert_eq!(game.parse_move(&board, "7"), Some(Cell(0)));
        assert_eq!(game.parse_move(&board, "5"), Some(Cell(4)));
        assert_eq!(game.parse_move(&board, "3"), Some(Cell(8)));
        assert_eq!(game.parse_move(&board, "0"), None);
        assert_eq!(game.describe_move(&Cell(6)), "1");
        assert!(game.help().contains("Press [Enter]"));

        let plain = TicTacToe::new();
        assert_eq!(plain.parse_move(&board, "0"), Some(Cell(0)));
        assert_eq!(plain.describe_move(&Cell(6)), "6");
        assert!(!plain.help().contains("Press [Enter]"));
    }

    #[test]
    fn test_display_snapshot_draws_grid() {
        let game = TicTacToe::new();
        let grid = game.display_snapshot("XO  X   O");
        assert_eq!(grid.lines().count(), 7);
        assert!(grid.contains("║ X ║ O ║   ║"));
        assert!(grid.contains("║   ║   ║ O ║"));
    }

    #[test]
    fn test_takes_immediate_win() {
        let game = TicTacToe::new();
        let order = order();
        let board = TicTacToe::parse_board("XX       ").unwrap();
        let search = Minimax::new(&game, &order, SearchConfig::default());
        assert_eq!(search.best_move(&board, X, None).unwrap(), Cell(2));
    }

    #[test]
    fn test_blocks_opponent_line() {
        let game = TicTacToe::new();
        let order = order();
        let board = TicTacToe::parse_board("XX  O    ").unwrap();
        let search = Minimax::new(&game, &order, SearchConfig::default());
        assert_eq!(search.best_move(&board, O, None).unwrap(), Cell(2));
    }
}
