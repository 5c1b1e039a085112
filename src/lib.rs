//! # bg-engine
//!
//! A backgammon rules engine. It owns the board state, dice state, turn
//! sequencing, and the complete legality logic for moves, hits, re-entry
//! from the bar, and bearing off.
//!
//! ## Design Principles
//!
//! 1. **Query before mutate**: hosts check legality through the query
//!    surface (`is_valid_move`, `can_move`, `has_move`, ...) and then drive
//!    the engine through three mutations: `roll`, `make_move`,
//!    `advance_turn`. `make_move` still re-validates and reports a
//!    [`MoveError`](rules::MoveError) rather than corrupting state.
//!
//! 2. **Deterministic**: all randomness flows through a seeded
//!    [`GameRng`](core::GameRng); the same seed replays the same game.
//!
//! 3. **Single aggregate**: one [`Game`](rules::Game) value owns the board,
//!    the dice pool, and both sides' bar stacks. No globals, no interior
//!    locking; hosts serialize access per game session.
//!
//! ## Board addressing
//!
//! Indices 1..=24 are the playable points. Indices 0 and 25 are sentinels:
//! each is one side's off-board anchor and the *other* side's bar, which
//! keeps the direction-generic move arithmetic uniform. One side moves from
//! low indices to high (+1), the other from high to low (-1).
//!
//! ## Modules
//!
//! - `core`: sides, dice, points, the board, RNG
//! - `rules`: the `Game` state machine and move legality

pub mod core;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Board, Die, DicePool, GameRng, GameRngState, Point, Side, SidePair, BOARD_SLOTS, MEN_PER_SIDE,
    NUM_POINTS,
};

pub use crate::rules::{Game, GameBuilder, MoveError, MoveOutcome, Phase};
