//! A module containing the [`LeagueError`] enum, which contains various basic error types.

use deadpool_redis::PoolError;
use entity::types::MatchStatus;
use sea_orm::TransactionError;

use crate::ledger::StatName;

/// Represents any type of error that could happen when using this crate.
#[derive(thiserror::Error, Debug)]
#[rustfmt::skip]
pub enum LeagueError {
    // --------
    // --- Internal server errors
    // --------

    /// An error from the database.
    #[error(transparent)]
    DbError(#[from] sea_orm::DbErr),
    /// An error that happened when interacting with the Redis database.
    #[error(transparent)]
    Redis(#[from] deadpool_redis::redis::RedisError),
    /// An error that happened when using the Redis pool.
    #[error(transparent)]
    PoolError(#[from] PoolError),
    /// An internal error.
    #[error("internal error: {0}")]
    Internal(String),
    /// The state of the database doesn't allow the operation, although the input is valid.
    #[error("{0}")]
    InvalidState(&'static str),

    // --------
    // --- Validation errors
    // --------

    /// The input is malformed or missing.
    #[error("{0}")]
    Validation(String),
    /// The stat counter is already at 0 and can't be decremented.
    #[error("{0} can't go below 0")]
    StatFloor(StatName),

    // --------
    // --- Not found errors
    // --------

    /// The player with the provided ID was not found.
    #[error("player `{0}` not found")]
    PlayerNotFound(
        /// The player ID.
        String,
    ),
    /// The identity with the provided ID was not found.
    #[error("user `{0}` not found")]
    UserNotFound(
        /// The identity ID.
        String,
    ),
    /// The match with the provided ID was not found.
    #[error("match `{0}` not found")]
    MatchNotFound(
        /// The match ID.
        i32,
    ),
    /// The stats row with the provided ID was not found.
    #[error("stats `{0}` not found")]
    StatsNotFound(
        /// The stats ID.
        i32,
    ),

    // --------
    // --- Conflicts
    // --------

    /// The player is already owned by a real user.
    #[error("player not unclaimed")]
    PlayerNotUnclaimed,
    /// The phone number of the caller doesn't match the one of the placeholder.
    #[error("phone mismatch")]
    PhoneMismatch,
    /// The caller already owns a player.
    #[error("caller already owns a player")]
    CallerAlreadyOwnsPlayer,
    /// Another claim on the same player succeeded first.
    #[error("player claimed concurrently")]
    ConcurrentClaim,
    /// The match isn't in the `ONGOING` state.
    #[error("match is {0}, stats can only change while it is ONGOING")]
    MatchNotOngoing(MatchStatus),
    /// The requested status change isn't allowed.
    #[error("cannot change match status from {from} to {to}")]
    IllegalTransition {
        /// The current status.
        from: MatchStatus,
        /// The requested status.
        to: MatchStatus,
    },
    /// The status of the match changed while it was being updated.
    #[error("match status changed concurrently")]
    ConcurrentStatusChange,
    /// A team with the same name already exists.
    #[error("team `{0}` already exists")]
    TeamAlreadyExists(
        /// The team name.
        String,
    ),
}

/// The category of a [`LeagueError`], used to map it to a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed or missing input.
    Validation,
    /// A referenced entity is absent.
    NotFound,
    /// A precondition of the operation was violated.
    Conflict,
    /// The database is in a state the operation can't work with.
    InvalidState,
    /// Unexpected failure.
    Internal,
}

impl LeagueError {
    /// Returns the category of the error.
    pub fn category(&self) -> ErrorCategory {
        use ErrorCategory as C;

        match self {
            Self::DbError(_)
            | Self::Redis(_)
            | Self::PoolError(_)
            | Self::Internal(_) => C::Internal,
            Self::InvalidState(_) => C::InvalidState,
            Self::Validation(_) | Self::StatFloor(_) => C::Validation,
            Self::PlayerNotFound(_)
            | Self::UserNotFound(_)
            | Self::MatchNotFound(_)
            | Self::StatsNotFound(_) => C::NotFound,
            Self::PlayerNotUnclaimed
            | Self::PhoneMismatch
            | Self::CallerAlreadyOwnsPlayer
            | Self::ConcurrentClaim
            | Self::MatchNotOngoing(_)
            | Self::IllegalTransition { .. }
            | Self::ConcurrentStatusChange
            | Self::TeamAlreadyExists(_) => C::Conflict,
        }
    }
}

impl AsRef<LeagueError> for LeagueError {
    fn as_ref(&self) -> &LeagueError {
        self
    }
}

/// Shortcut for creating an internal error, by formatting a message.
///
/// See [`LeagueError::Internal`].
#[macro_export]
macro_rules! internal {
    ($($t:tt)*) => {{
        $crate::error::LeagueError::Internal($crate::error::__private::format!($($t)*))
    }};
}

#[doc(hidden)]
pub mod __private {
    pub use std::format;
}

impl<E> From<TransactionError<E>> for LeagueError
where
    LeagueError: From<E>,
{
    fn from(value: TransactionError<E>) -> Self {
        match value {
            TransactionError::Connection(db_err) => From::from(db_err),
            TransactionError::Transaction(e) => From::from(e),
        }
    }
}

/// Represents the result of a computation that could return a [`LeagueError`].
pub type LeagueResult<T = ()> = Result<T, LeagueError>;
