//! The board: 26 addressable locations and the standard start layout.
//!
//! Slots 1..=24 are the playable points. Slots 0 and 25 are the sentinel
//! anchors used by the direction-generic move arithmetic: each one is the
//! off-board destination for the side bearing off toward it and the bar
//! origin for the side entering away from it. Setup leaves both sentinels
//! empty; borne-off men accumulate on them during play.

use serde::{Deserialize, Serialize};

use super::point::Point;
use super::side::Side;

/// Number of playable points.
pub const NUM_POINTS: usize = 24;

/// Number of men per side.
pub const MEN_PER_SIDE: usize = 15;

/// Playable points plus the two sentinel slots.
pub const BOARD_SLOTS: usize = NUM_POINTS + 2;

/// Which side's home sits at the top of the numbering.
///
/// The top side moves from low indices to high (+1) and bears off past
/// slot 25; the bottom side moves high to low (-1) and bears off past
/// slot 0.
pub const BLACK_ON_TOP: bool = true;

/// The side moving upward (+1), home on points 19..=24.
#[must_use]
pub const fn top_side() -> Side {
    if BLACK_ON_TOP {
        Side::Black
    } else {
        Side::White
    }
}

/// The side moving downward (-1), home on points 1..=6.
#[must_use]
pub const fn bottom_side() -> Side {
    top_side().opponent()
}

/// The playing board: a fixed array of 26 points.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Board {
    points: [Point; BOARD_SLOTS],
}

impl Board {
    /// A board in the standard backgammon starting position.
    ///
    /// Each side starts with 2/5/3/5 men on its four start points, mirrored
    /// across the board for the opposing side.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        let top = top_side();
        let bottom = bottom_side();

        for (offset, count) in [(1, 2), (6, 5), (8, 3), (12, 5)] {
            let mirror = BOARD_SLOTS - 1 - offset;
            // The 2-stack and the midpoint 5-stack belong to the side whose
            // home lies across the board from them.
            let (near, far) = if offset == 1 || offset == 12 {
                (top, bottom)
            } else {
                (bottom, top)
            };
            board.points[offset] = Point::with_men(near, count);
            board.points[mirror] = Point::with_men(far, count);
        }

        board
    }

    /// A board with no men anywhere. Setup path for arbitrary positions.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            points: std::array::from_fn(|_| Point::new()),
        }
    }

    /// The point at `index`.
    ///
    /// ## Panics
    ///
    /// Panics if `index` is outside `0..=25`. Indices reaching the board
    /// are engine-derived from validated arithmetic, so an out-of-range
    /// index is a programming error, not a recoverable condition.
    #[must_use]
    pub fn point(&self, index: usize) -> &Point {
        &self.points[index]
    }

    /// Mutable access to the point at `index`.
    ///
    /// ## Panics
    ///
    /// Panics if `index` is outside `0..=25`.
    pub fn point_mut(&mut self, index: usize) -> &mut Point {
        &mut self.points[index]
    }

    /// Stack `count` men of `side` onto the point at `index`.
    ///
    /// Setup path for arbitrary positions; subject to the same occupancy
    /// enforcement as any other mutation. Returns whether all men were
    /// added.
    pub fn place(&mut self, index: usize, side: Side, count: usize) -> bool {
        (0..count).all(|_| self.points[index].add(side))
    }

    /// Total men of `side` on the playable points (sentinels excluded).
    #[must_use]
    pub fn men_on_points(&self, side: Side) -> usize {
        (1..=NUM_POINTS)
            .filter(|&i| self.points[i].occupant() == Some(side))
            .map(|i| self.points[i].count())
            .sum()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Board> for Vec<Point> {
    fn from(board: Board) -> Self {
        board.points.into()
    }
}

impl TryFrom<Vec<Point>> for Board {
    type Error = String;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        let len = points.len();
        let points: [Point; BOARD_SLOTS] = points
            .try_into()
            .map_err(|_| format!("board requires {BOARD_SLOTS} points, got {len}"))?;
        Ok(Self { points })
    }
}
