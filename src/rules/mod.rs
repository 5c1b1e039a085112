//! The rules engine: turn sequencing and move legality.

pub mod error;
pub mod game;

pub use error::MoveError;
pub use game::{Game, GameBuilder, MoveOutcome, Phase};
