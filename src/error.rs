//! Error types for the odds engine.
//!
//! Validation failures are surfaced before any enumeration starts; a
//! cancelled query is not an error (it returns a partial result with
//! `completed = false`), but `Cancelled` exists for consumers that want
//! to convert that state.

use thiserror::Error;

use crate::cards::Card;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OddsError {
    #[error("card {0} appears more than once across seats and table")]
    DuplicateCard(Card),

    #[error("seat {seat} has {count} hole cards (expected 2)")]
    WrongHoleCount { seat: usize, count: usize },

    #[error("table has {0} cards (expected 0, 3, 4, or 5)")]
    IllegalTableSize(usize),

    #[error("need at least 2 seats, got {0}")]
    InsufficientSeats(usize),

    #[error("at most 10 seats supported, got {0}")]
    TooManySeats(usize),

    #[error("calculation was cancelled")]
    Cancelled,

    #[error("unable to parse card notation '{0}'")]
    ParseCard(String),
}

pub type OddsResult<T> = Result<T, OddsError>;
