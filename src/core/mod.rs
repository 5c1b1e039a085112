//! Core engine types: sides, dice, points, the board, RNG.
//!
//! These are passive data holders. All rule enforcement beyond single-point
//! occupancy lives in the `rules` module.

pub mod board;
pub mod dice;
pub mod point;
pub mod rng;
pub mod side;

pub use board::{Board, BLACK_ON_TOP, BOARD_SLOTS, MEN_PER_SIDE, NUM_POINTS};
pub use dice::{Die, DicePool, BASE_DICE, DIE_SIDES};
pub use point::Point;
pub use rng::{GameRng, GameRngState};
pub use side::{Side, SidePair};
