//! Why a move is illegal.
//!
//! `Game::is_valid_move` collapses these to a bool for hosts that only
//! highlight legal destinations; `Game::make_move` returns the concrete
//! reason so hosts can explain a rejected move.

use thiserror::Error;

/// Reasons a move is rejected, in the order the rules are evaluated.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveError {
    /// The dice have not been rolled this turn.
    #[error("dice have not been rolled this turn")]
    NotRolled,

    /// The turn is already over; only `advance_turn` is meaningful now.
    #[error("the turn is already over")]
    TurnOver,

    /// The active side has men on the bar; only bar re-entry may move.
    #[error("men on the bar must re-enter before any other move")]
    MustEnterFromBar,

    /// The origin is not occupied by the active side's men.
    #[error("point {0} holds no man of the active side")]
    NotYourPoint(i32),

    /// The destination is off the playable board and this is not a legal
    /// bear-off.
    #[error("destination {0} is outside the playable board")]
    OutOfRange(i32),

    /// The destination holds two or more opposing men.
    #[error("point {0} is blocked by opposing men")]
    Blocked(i32),

    /// Bearing off past the edge is only legal from the farthest-back
    /// occupied point of the home quadrant.
    #[error("a man sits farther back in the home quadrant")]
    NotRearmost,

    /// No die in the pool covers the move's distance.
    #[error("no die in the pool matches this move")]
    NoMatchingDie,
}
