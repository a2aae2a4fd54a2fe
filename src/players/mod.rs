//! Participants: identity plus a move-selection strategy.
//!
//! - `input`: line-based channels to human participants
//! - `participant`: strategies, participants and their specs

pub mod input;
pub mod participant;

pub use input::{ConsoleInput, LineReader, MoveInput, ScriptedInput, SharedStdin};
pub use participant::{
    MoveRequest, Participant, ParticipantInfo, ParticipantKind, ParticipantSpec, Strategy,
};
