//! Tic-tac-toe for two participants.
//!
//! Cells are numbered 0..=8, left to right and top to bottom:
//!
//! ```text
//! ╔═══╦═══╦═══╗
//! ║ 0 ║ 1 ║ 2 ║
//! ╠═══╬═══╬═══╣
//! ║ 3 ║ 4 ║ 5 ║
//! ╠═══╬═══╬═══╣
//! ║ 6 ║ 7 ║ 8 ║
//! ╚═══╩═══╩═══╝
//! ```
//!
//! With [`Layout::Keypad`] humans type moves as on a numeric keypad
//! (7 is top-left, 3 is bottom-right). Scoring favors quick wins, slow
//! losses and, on draws, occupying the center and corners.

mod game;

pub use game::{Board, Cell, Layout, TicTacToe, WINNING_LINES};
