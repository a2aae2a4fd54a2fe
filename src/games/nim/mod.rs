//! Multi-pile Nim for two to eight participants.
//!
//! Participants take turns removing stones from a single pile. Whoever
//! takes the last stone wins. Piles live in a persistent `im::Vector`, so
//! every successor state shares structure with its parent.

mod game;

pub use game::{Nim, NimState, Take};
