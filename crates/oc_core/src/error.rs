use thiserror::Error;

/// Errors from session operations. Every variant rejects the operation
/// before any state mutates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown player: {player_id}")]
    UnknownPlayer { player_id: String },

    #[error("invalid roster input: {field} must not be empty")]
    InvalidRosterInput { field: &'static str },
}

pub type Result<T> = std::result::Result<T, SessionError>;
