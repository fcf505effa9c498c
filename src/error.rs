//! Error types surfaced by the battle engine and progression stores.

use thiserror::Error;

use crate::battle::types::{BattleAction, BattlePhase, Side};

/// Message returned when no eligible opponent remains in the roster.
pub const NO_OPPONENTS_MESSAGE: &str = "No opponents available for battle!";

/// Errors raised by battle session operations.
///
/// None of these corrupt the session: a rejected call leaves the state as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("action {action} is not allowed during the {phase} phase")]
    ActionNotAllowed {
        action: BattleAction,
        phase: BattlePhase,
    },

    #[error("creature {0} is not ready for battle")]
    CreatureNotReady(String),

    #[error("creature {0} cannot battle itself")]
    SameCreature(String),

    #[error("{}", NO_OPPONENTS_MESSAGE)]
    NoOpponents,

    #[error("both creatures must be selected before the battle starts")]
    MissingCreature,

    #[error("session token {given} is stale (current {current})")]
    StaleSession { given: u64, current: u64 },

    #[error("it is the {expected} turn, not the {attempted} turn")]
    WrongTurn { expected: Side, attempted: Side },

    #[error("battle is not active")]
    BattleInactive,
}

/// Errors raised by progression stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted record: {0}")]
    CorruptedRecord(String),

    #[error("store lock was poisoned")]
    LockPoisoned,

    #[error("could not determine home directory")]
    NoHomeDir,
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
