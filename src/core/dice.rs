//! Dice: a single die and the per-turn dice pool.
//!
//! A [`Die`] starts face-down (`value()` is `None`) and shows a face only
//! after being rolled or constructed with a fixed value. The [`DicePool`]
//! is the ordered multiset of dice still usable this turn: two dice
//! normally, four identical dice after a double. Making a move consumes
//! exactly one die whose face covers the move's distance.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::rng::GameRng;

/// Number of faces on a die.
pub const DIE_SIDES: u8 = 6;

/// Number of dice in a freshly seeded pool.
pub const BASE_DICE: usize = 2;

/// Largest pool size (a double).
pub const MAX_DICE: usize = 4;

/// A six-sided die.
///
/// Face-down until first rolled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    value: Option<u8>,
}

impl Die {
    /// Create a face-down die.
    #[must_use]
    pub const fn new() -> Self {
        Self { value: None }
    }

    /// Create a die fixed to the given face.
    ///
    /// Used for the two extra dice a double grants; those are fixed to the
    /// rolled value, not re-rolled.
    #[must_use]
    pub fn with_value(value: u8) -> Self {
        assert!(
            (1..=DIE_SIDES).contains(&value),
            "die face must be in 1..=6, got {value}"
        );
        Self { value: Some(value) }
    }

    /// Roll the die, overwriting its current face.
    pub fn roll(&mut self, rng: &mut GameRng) -> u8 {
        let face = rng.roll_die();
        self.value = Some(face);
        face
    }

    /// The face-up value, or `None` if the die has not been rolled.
    #[must_use]
    pub const fn value(self) -> Option<u8> {
        self.value
    }
}

/// The ordered multiset of dice usable by the active side this turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicePool {
    dice: SmallVec<[Die; MAX_DICE]>,
}

impl DicePool {
    /// A fresh pool of two face-down dice, as seeded at the start of each
    /// turn.
    #[must_use]
    pub fn fresh() -> Self {
        Self {
            dice: (0..BASE_DICE).map(|_| Die::new()).collect(),
        }
    }

    /// A pool of dice fixed to the given faces, in order.
    ///
    /// Used for the opening roll (the tie-breaking dice double as the first
    /// pool) and for setting up known positions.
    #[must_use]
    pub fn from_values(values: &[u8]) -> Self {
        Self {
            dice: values.iter().copied().map(Die::with_value).collect(),
        }
    }

    /// Roll every die in the pool, then expand a double.
    ///
    /// If the two base dice come up equal, two more dice fixed to that value
    /// are appended: a double grants four playable dice of one value.
    pub fn roll_all(&mut self, rng: &mut GameRng) {
        for die in &mut self.dice {
            die.roll(rng);
        }

        if self.dice.len() == BASE_DICE && self.dice[0].value() == self.dice[1].value() {
            if let Some(face) = self.dice[0].value() {
                self.dice.push(Die::with_value(face));
                self.dice.push(Die::with_value(face));
            }
        }
    }

    /// Rolled faces in pool order. Face-down dice are skipped.
    pub fn values(&self) -> impl Iterator<Item = u8> + '_ {
        self.dice.iter().filter_map(|die| die.value())
    }

    /// Remove the first die showing `value`.
    ///
    /// Returns whether a die was consumed.
    pub fn consume(&mut self, value: u8) -> bool {
        match self.dice.iter().position(|die| die.value() == Some(value)) {
            Some(index) => {
                self.dice.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of dice remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dice.len()
    }

    /// Whether the pool is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Discard all remaining dice (turn forfeited or ended).
    pub fn clear(&mut self) {
        self.dice.clear();
    }
}
