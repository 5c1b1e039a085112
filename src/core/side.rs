//! Side identity and per-side data storage.
//!
//! ## Side
//!
//! One of the two participants. The value doubles as the identity of that
//! side's men: a point occupied by `Side::Black` men reports
//! `Some(Side::Black)` as its occupant.
//!
//! ## SidePair
//!
//! Per-side data storage indexed by `Side`. Mutable per-side state (bar
//! stacks in particular) lives in a `SidePair` owned by the game aggregate,
//! never on the `Side` enum itself.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Black,
    White,
}

impl Side {
    /// The opposing side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// Both sides, in a fixed order.
    #[must_use]
    pub const fn both() -> [Side; 2] {
        [Side::Black, Side::White]
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Black => write!(f, "Black"),
            Side::White => write!(f, "White"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use bg_engine::core::{Side, SidePair};
///
/// let mut pips: SidePair<u32> = SidePair::with_value(167);
/// pips[Side::White] -= 5;
/// assert_eq!(pips[Side::Black], 167);
/// assert_eq!(pips[Side::White], 162);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SidePair<T> {
    black: T,
    white: T,
}

impl<T> SidePair<T> {
    /// Create a pair from explicit per-side values.
    pub fn new(black: T, white: T) -> Self {
        Self { black, white }
    }

    /// Create a pair with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            black: value.clone(),
            white: value,
        }
    }

    /// Get a reference to one side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Black => &self.black,
            Side::White => &self.white,
        }
    }

    /// Get a mutable reference to one side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Black => &mut self.black,
            Side::White => &mut self.white,
        }
    }

    /// Iterate over (Side, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [(Side::Black, &self.black), (Side::White, &self.white)].into_iter()
    }
}

impl<T> Index<Side> for SidePair<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SidePair<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
