//! Match driving and session bookkeeping.
//!
//! ## Overview
//!
//! - **Match**: one playthrough, `NotStarted -> InProgress -> Terminal`
//! - **Session**: repeated matches over one roster with a cumulative
//!   score table and rotating starting participant
//! - **Logging**: `SessionLogger` observers, JSON or bincode summaries
//! - **Replay**: rebuild a session's story from a saved summary
//!
//! ## Usage
//!
//! ```rust
//! use rust_tbg::core::GameRng;
//! use rust_tbg::games::tictactoe::{Board, TicTacToe};
//! use rust_tbg::players::ParticipantSpec;
//! use rust_tbg::session::{Session, SessionConfig};
//!
//! let mut session = Session::builder(TicTacToe::new(), Board::new())
//!     .config(SessionConfig::new().with_max_depth(2))
//!     .participant(ParticipantSpec::search())
//!     .participant(ParticipantSpec::random(GameRng::new(7)))
//!     .build()
//!     .unwrap();
//!
//! session.play(2).unwrap();
//! assert_eq!(session.scores().total(), 2);
//! ```

pub mod config;
pub mod driver;
pub mod log;
pub mod replay;
#[allow(clippy::module_inception)]
pub mod session;
pub mod scores;

pub use config::SessionConfig;
pub use driver::{Match, MatchPhase, MatchRecord, MoveEvent};
pub use log::{
    load_summary, save_summary, FileLogger, LogFormat, MemoryLogger, SessionLogger, SessionSummary,
};
pub use replay::render_replay;
pub use scores::{ScoreTable, Standings};
pub use session::{Session, SessionBuilder};
