//! Concrete games built on the rules contract.
//!
//! - `tictactoe`: classic two-participant tic-tac-toe
//! - `nim`: multi-pile Nim for two to eight participants

pub mod nim;
pub mod tictactoe;

pub use nim::Nim;
pub use tictactoe::TicTacToe;
