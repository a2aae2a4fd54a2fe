//! Error types for rust-tbg.

use thiserror::Error;

use crate::core::Marker;

/// Problems detected while configuring a session or its roster.
///
/// These surface at setup time and abort startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("{game} supports {min}..={max} participants, got {got}")]
    PlayerCount {
        game: String,
        min: usize,
        max: usize,
        got: usize,
    },

    #[error("marker '{marker}' is used by more than one participant")]
    DuplicateMarker { marker: Marker },

    #[error("invalid marker '{marker}' (expected a single visible character)")]
    InvalidMarker { marker: String },

    #[error("participant '{name}' has no move strategy bound")]
    MissingStrategy { name: String },

    #[error("no participant with marker '{marker}'")]
    UnknownMarker { marker: Marker },

    #[error("at least one participant must remain active")]
    NoActiveParticipants,

    #[error("turn order has {markers} markers but {flags} active flags")]
    TurnOrderMismatch { markers: usize, flags: usize },
}

/// Main error type for rust-tbg.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move '{action}' for '{marker}'")]
    InvalidMove { action: String, marker: Marker },

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("search requested on a state with no legal moves")]
    NoLegalMoves,

    #[error("move input closed before a move was supplied")]
    InputClosed,

    #[error("match is not in progress")]
    MatchNotInProgress,

    #[error("invalid snapshot '{snapshot}': {reason}")]
    InvalidSnapshot { snapshot: String, reason: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary encoding error: {0}")]
    Bincode(#[from] bincode::Error),
}

impl Error {
    /// Build an invalid-move error from any displayable move.
    pub fn invalid_move(action: impl std::fmt::Display, marker: Marker) -> Self {
        Error::InvalidMove {
            action: action.to_string(),
            marker,
        }
    }

    /// Wrap an IO error with the operation that failed.
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            operation: operation.into(),
            source,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

/// Convenience type alias for Results using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
