//! Minimax search for rust-tbg.
//!
//! ## Overview
//!
//! - **Two semantics**: adversarial (zero-sum around a reference
//!   participant) and selfish (each participant maximizes its own score)
//! - **N-Participant Support**: turn rotation comes from `TurnOrder`
//! - **Depth Limit**: optional cutoff scored by the game heuristic
//! - **Early Pruning Hook**: optional, unsound sibling cut-off per node
//!
//! ## Usage
//!
//! ```rust
//! use rust_tbg::core::{Marker, TurnOrder};
//! use rust_tbg::games::tictactoe::TicTacToe;
//! use rust_tbg::search::{Minimax, SearchConfig};
//!
//! let game = TicTacToe::new();
//! let order = TurnOrder::new([Marker('X'), Marker('O')]).unwrap();
//! let board = TicTacToe::parse_board("XX O O   ").unwrap();
//!
//! let search = Minimax::new(&game, &order, SearchConfig::default().with_max_depth(4));
//! let mv = search.best_move(&board, Marker('X'), None).unwrap();
//! assert_eq!(mv.index(), 2);
//! ```

pub mod config;
pub mod minimax;
pub mod stats;

pub use config::{SearchConfig, SearchMode};
pub use minimax::{Evaluation, Minimax, SearchResult};
pub use stats::SearchStats;
