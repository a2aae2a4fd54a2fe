//! Core engine types: markers, turn order, RNG, default naming.
//!
//! These building blocks are game-agnostic. Games describe themselves
//! through `rules::GameRules` rather than modifying the core.

pub mod marker;
pub mod names;
pub mod rng;
pub mod turn_order;

pub use marker::Marker;
pub use names::NameSequence;
pub use rng::GameRng;
pub use turn_order::TurnOrder;
