//! A single board location: an ordered stack of same-side men.
//!
//! `add` is the sole enforcement point for the occupancy invariants: a
//! non-empty point only ever accepts men of the side already on it, so a
//! point can never hold men of both sides and a move onto two-plus enemy
//! men can never slip through a mutation path.

use serde::{Deserialize, Serialize};

use super::side::Side;

/// One board location holding a stack of men, all of one side.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    men: Vec<Side>,
}

impl Point {
    /// An empty point.
    #[must_use]
    pub const fn new() -> Self {
        Self { men: Vec::new() }
    }

    /// A point preloaded with `count` men of one side.
    #[must_use]
    pub fn with_men(side: Side, count: usize) -> Self {
        Self {
            men: vec![side; count],
        }
    }

    /// The side occupying this point, or `None` if empty.
    ///
    /// Derived from the top of the stack; every man below is the same side
    /// by the `add` invariant.
    #[must_use]
    pub fn occupant(&self) -> Option<Side> {
        self.men.last().copied()
    }

    /// Number of men on the point.
    #[must_use]
    pub fn count(&self) -> usize {
        self.men.len()
    }

    /// Whether the point holds no men.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.men.is_empty()
    }

    /// Push a man onto the point.
    ///
    /// Succeeds iff the point is empty or already occupied by `side`.
    /// Returns whether the man was added.
    pub fn add(&mut self, side: Side) -> bool {
        match self.occupant() {
            None => {
                self.men.push(side);
                true
            }
            Some(occupant) if occupant == side => {
                self.men.push(side);
                true
            }
            Some(_) => false,
        }
    }

    /// Pop the top man off the point, or `None` if empty.
    pub fn remove(&mut self) -> Option<Side> {
        self.men.pop()
    }
}
