//! The game aggregate: turn order, dice pool, move legality, captures,
//! bearing off, and win detection.
//!
//! ## Turn state machine
//!
//! Each turn moves through three phases:
//!
//! - `AwaitingRoll` --`roll()`--> `AwaitingMove`, or straight to `TurnOver`
//!   when the roll leaves no legal move anywhere.
//! - `AwaitingMove` --`make_move()`--> `AwaitingMove` while usable dice and
//!   a legal move remain, otherwise `TurnOver`.
//! - `TurnOver` --`advance_turn()`--> `AwaitingRoll` for the other side
//!   with a fresh two-die pool.
//!
//! The phases are derived from two flags (`has_rolled`, `has_moved`) rather
//! than stored, so they can never disagree with the flags the legality
//! rules consult.
//!
//! ## Addressing
//!
//! The move API works in `i32` board indices. The side whose home is at the
//! top of the numbering moves +1 per pip toward slot 25; the other side
//! moves -1 toward slot 0. Bear-off arithmetic deliberately carries past
//! the sentinels, so intermediate destinations may fall outside `0..=25`
//! and are validated, never used to index the board directly.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::board::{top_side, Board, NUM_POINTS};
use crate::core::dice::DicePool;
use crate::core::rng::GameRng;
use crate::core::side::{Side, SidePair};

use super::error::MoveError;

/// Where the active side's turn currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Dice not yet rolled this turn.
    AwaitingRoll,
    /// Dice rolled; legal moves remain.
    AwaitingMove,
    /// Dice exhausted or forfeited; waiting on `advance_turn`.
    TurnOver,
}

/// What a successfully applied move did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// The die face consumed.
    pub die: u8,
    /// A lone opposing man was hit to the bar.
    pub capture: bool,
    /// The man was borne off the board.
    pub bear_off: bool,
    /// No legal move remained afterwards; the turn is over.
    pub turn_over: bool,
}

/// A validated move: which die covers it and whether it bears off.
#[derive(Clone, Copy, Debug)]
struct ValidMove {
    die: u8,
    bear_off: bool,
}

/// A complete game of backgammon.
///
/// The single mutable aggregate: the board, the active side's dice pool,
/// both sides' bar stacks, and the turn flags. Hosts hold one `Game` per
/// session and drive it through `roll` / `make_move` / `advance_turn`.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    dice: DicePool,
    rng: GameRng,
    active: Side,
    has_rolled: bool,
    has_moved: bool,
    /// Men hit and awaiting re-entry, per side.
    bars: SidePair<Vec<Side>>,
}

impl Game {
    /// Start a game with the opening roll.
    ///
    /// Each side rolls one die; ties are discarded and re-rolled. The side
    /// with the higher die moves first, and the tie-breaking pair doubles
    /// as that side's opening pool (no extra roll). If the opening pool
    /// leaves no legal move the turn is forfeited through the same path as
    /// mid-game, repeating until some side can move.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = GameRng::new(seed);

        let (black_die, white_die) = loop {
            let black_die = rng.roll_die();
            let white_die = rng.roll_die();
            if black_die != white_die {
                break (black_die, white_die);
            }
        };
        let active = if black_die > white_die {
            Side::Black
        } else {
            Side::White
        };

        let mut game = Self {
            board: Board::new(),
            dice: DicePool::from_values(&[black_die, white_die]),
            rng,
            active,
            has_rolled: true,
            has_moved: false,
            bars: SidePair::default(),
        };
        debug!(side = %game.active, black_die, white_die, "opening roll");

        while !game.has_move() {
            game.end_turn();
            game.advance_turn();
            game.roll_pool();
        }

        game
    }

    // === Addressing ===

    /// The direction `side`'s men travel: +1 (toward slot 25) or -1
    /// (toward slot 0).
    #[must_use]
    pub fn direction(&self, side: Side) -> i32 {
        if side == top_side() {
            1
        } else {
            -1
        }
    }

    /// The index bounding `side`'s home quadrant: 19 for the side moving
    /// up (home 19..=24), 6 for the side moving down (home 1..=6).
    #[must_use]
    pub fn home_start(&self, side: Side) -> i32 {
        let points = NUM_POINTS as i32;
        if side == top_side() {
            (points + 1) - points / 4
        } else {
            points / 4
        }
    }

    /// The sentinel index `side`'s men bear off onto: 25 for the side
    /// moving up, 0 for the side moving down.
    #[must_use]
    pub fn offboard(&self, side: Side) -> i32 {
        if side == top_side() {
            NUM_POINTS as i32 + 1
        } else {
            0
        }
    }

    /// The sentinel index `side`'s hit men re-enter from: the opponent's
    /// off-board anchor.
    #[must_use]
    pub fn bar(&self, side: Side) -> i32 {
        self.offboard(side.opponent())
    }

    // === Queries ===

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side whose turn it is.
    #[must_use]
    pub fn active_side(&self) -> Side {
        self.active
    }

    /// The active side's opponent.
    #[must_use]
    pub fn opponent(&self) -> Side {
        self.active.opponent()
    }

    /// Where the active side's turn stands.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.has_moved {
            Phase::TurnOver
        } else if self.has_rolled {
            Phase::AwaitingMove
        } else {
            Phase::AwaitingRoll
        }
    }

    /// Whether the active side has rolled this turn.
    #[must_use]
    pub fn has_rolled(&self) -> bool {
        self.has_rolled
    }

    /// Whether the active side's turn is over.
    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Faces of the dice still usable this turn, in pool order.
    #[must_use]
    pub fn dice_values(&self) -> Vec<u8> {
        self.dice.values().collect()
    }

    /// Men of `side` on the bar awaiting re-entry.
    #[must_use]
    pub fn bar_count(&self, side: Side) -> usize {
        self.bars[side].len()
    }

    /// Men of `side` borne off so far.
    ///
    /// Derived from the stack on that side's off-board sentinel; the
    /// engine tracks no separate counter.
    #[must_use]
    pub fn borne_off_count(&self, side: Side) -> usize {
        self.board.point(self.offboard(side) as usize).count()
    }

    /// Whether moving `from` -> `to` is legal for the active side right
    /// now.
    #[must_use]
    pub fn is_valid_move(&self, from: i32, to: i32) -> bool {
        self.validate_move(from, to).is_ok()
    }

    /// Whether `from` -> `to` is a legal move that hits a lone opposing
    /// man.
    #[must_use]
    pub fn is_capture(&self, from: i32, to: i32) -> bool {
        if !self.is_valid_move(from, to) {
            return false;
        }
        if !Self::on_playable_board(to) {
            // Bear-off destinations never hold opposing men.
            return false;
        }
        let dest = self.board.point(to as usize);
        dest.occupant() == Some(self.active.opponent()) && dest.count() == 1
    }

    /// Whether `from` -> `to` is a legal move that bears a man off.
    #[must_use]
    pub fn is_bearing_off_move(&self, from: i32, to: i32) -> bool {
        self.validate_move(from, to)
            .map(|mv| mv.bear_off)
            .unwrap_or(false)
    }

    /// Whether any die enables a move from the point at `index`.
    #[must_use]
    pub fn can_move(&self, index: i32) -> bool {
        let dir = self.direction(self.active);
        self.dice
            .values()
            .any(|die| self.is_valid_move(index, index + dir * i32::from(die)))
    }

    /// Whether the active side has any legal move anywhere.
    #[must_use]
    pub fn has_move(&self) -> bool {
        for index in 1..=NUM_POINTS as i32 {
            if self.can_move(index) {
                return true;
            }
        }
        !self.bars[self.active].is_empty() && self.can_move(self.bar(self.active))
    }

    /// Whether the active side may bear off.
    #[must_use]
    pub fn can_bear_off(&self) -> bool {
        self.side_can_bear_off(self.active)
    }

    /// Whether `side` may bear off: no men on the bar and none outside its
    /// home quadrant.
    #[must_use]
    pub fn side_can_bear_off(&self, side: Side) -> bool {
        if !self.bars[side].is_empty() {
            return false;
        }

        let dir = self.direction(side);
        let home_start = self.home_start(side);
        let mut index = self.bar(side) + dir;
        while index != home_start {
            if self.board.point(index as usize).occupant() == Some(side) {
                return false;
            }
            index += dir;
        }
        true
    }

    /// Whether the game is decided: men of at most one side remain on the
    /// playable points.
    #[must_use]
    pub fn is_over(&self) -> bool {
        let mut black_found = false;
        let mut white_found = false;
        for index in 1..=NUM_POINTS {
            match self.board.point(index).occupant() {
                Some(Side::Black) => black_found = true,
                Some(Side::White) => white_found = true,
                None => {}
            }
            if black_found && white_found {
                return false;
            }
        }
        true
    }

    /// The winning side, once the game is over.
    ///
    /// The winner is the side with no men left on the playable points,
    /// having borne all fifteen off.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        if !self.is_over() {
            return None;
        }
        (1..=NUM_POINTS)
            .find_map(|index| self.board.point(index).occupant())
            .map(Side::opponent)
    }

    // === Mutations ===

    /// Roll the dice for this turn.
    ///
    /// No-op if already rolled. A double expands the pool to four dice of
    /// the rolled value. If the roll leaves no legal move anywhere the
    /// unused dice are forfeited and the turn is marked over.
    pub fn roll(&mut self) {
        if self.has_rolled {
            return;
        }
        self.roll_pool();

        if !self.has_move() {
            debug!(side = %self.active, "no legal move after roll; turn forfeited");
            self.end_turn();
        }
    }

    /// Apply a move of the active side's man from `from` to `to`.
    ///
    /// Validates the move, lifts the man (popping the bar instead of the
    /// board when `from` is the active side's bar), hits a lone opposing
    /// man to the bar, places the mover's man (bear-off destinations clamp
    /// to the side's off-board sentinel), and consumes the first die in
    /// pool order that covers the move. If no legal move remains with the
    /// residual pool, the turn is marked over.
    pub fn make_move(&mut self, from: i32, to: i32) -> Result<MoveOutcome, MoveError> {
        let mv = self.validate_move(from, to)?;
        let side = self.active;
        let opponent = side.opponent();

        // Lift the mover's man.
        if from == self.bar(side) && !self.bars[side].is_empty() {
            self.bars[side].pop();
        } else {
            self.board.point_mut(from as usize).remove();
        }

        // Overshooting bear-off arithmetic lands past the sentinel; the
        // man still comes to rest on the sentinel itself.
        let dest = if mv.bear_off { self.offboard(side) } else { to };
        let dest = dest as usize;

        // A lone opposing man on the destination is hit to the bar first.
        let mut capture = false;
        let dest_point = self.board.point_mut(dest);
        if dest_point.occupant() == Some(opponent) && dest_point.count() == 1 {
            if let Some(man) = dest_point.remove() {
                self.bars[opponent].push(man);
                capture = true;
            }
        }

        self.board.point_mut(dest).add(side);
        self.dice.consume(mv.die);
        debug!(
            side = %side,
            from,
            to,
            die = mv.die,
            capture,
            bear_off = mv.bear_off,
            "move applied"
        );

        let mut turn_over = false;
        if !self.has_move() {
            self.end_turn();
            turn_over = true;
        }

        Ok(MoveOutcome {
            die: mv.die,
            capture,
            bear_off: mv.bear_off,
            turn_over,
        })
    }

    /// Advance to the other side's turn.
    ///
    /// No-op unless the current turn is over. Reseeds a fresh face-down
    /// two-die pool and resets the turn flags.
    pub fn advance_turn(&mut self) {
        if !self.has_moved {
            return;
        }
        self.active = self.active.opponent();
        self.dice = DicePool::fresh();
        self.has_rolled = false;
        self.has_moved = false;
        debug!(side = %self.active, "turn advanced");
    }

    // === Internals ===

    fn on_playable_board(index: i32) -> bool {
        (1..=NUM_POINTS as i32).contains(&index)
    }

    fn roll_pool(&mut self) {
        self.dice.roll_all(&mut self.rng);
        self.has_rolled = true;
        debug!(side = %self.active, dice = ?self.dice_values(), "rolled");
    }

    fn end_turn(&mut self) {
        self.dice.clear();
        self.has_moved = true;
    }

    /// The legality rules, evaluated strictly in order; the first decisive
    /// rule wins.
    fn validate_move(&self, from: i32, to: i32) -> Result<ValidMove, MoveError> {
        let side = self.active;
        let opponent = side.opponent();
        let dir = self.direction(side);

        if !self.has_rolled {
            return Err(MoveError::NotRolled);
        }
        if self.has_moved {
            return Err(MoveError::TurnOver);
        }

        // Hit men re-enter before anything else moves.
        if !self.bars[side].is_empty() && from != self.bar(side) {
            return Err(MoveError::MustEnterFromBar);
        }

        // The origin must carry a man of the active side: its bar (with
        // men waiting) or a point it occupies.
        if from == 0 || from == NUM_POINTS as i32 + 1 {
            if from != self.bar(side) || self.bars[side].is_empty() {
                return Err(MoveError::NotYourPoint(from));
            }
        } else if !Self::on_playable_board(from)
            || self.board.point(from as usize).occupant() != Some(side)
        {
            return Err(MoveError::NotYourPoint(from));
        }

        let off = self.offboard(side);

        // Bear-off, exact: a die lands the man exactly on the edge.
        if to == off && self.can_bear_off() {
            for die in self.dice.values() {
                if from + dir * i32::from(die) == to {
                    return Ok(ValidMove { die, bear_off: true });
                }
            }
        }

        // Bear-off, overshoot: the arithmetic carries at or past the edge.
        // Only legal from the farthest-back occupied point of the home
        // quadrant; then any die that carries at least that far serves.
        let at_or_past_edge = if dir == 1 { to >= off } else { to <= off };
        if at_or_past_edge && self.can_bear_off() {
            let mut index = from - dir;
            while index != self.home_start(side) - dir {
                if self.board.point(index as usize).occupant() == Some(side) {
                    return Err(MoveError::NotRearmost);
                }
                index -= dir;
            }
            for die in self.dice.values() {
                let landing = from + dir * i32::from(die);
                let carries = if dir == 1 { landing >= to } else { landing <= to };
                if carries {
                    return Ok(ValidMove { die, bear_off: true });
                }
            }
            return Err(MoveError::NoMatchingDie);
        }

        // Anything else must land on a playable point.
        if !Self::on_playable_board(to) {
            return Err(MoveError::OutOfRange(to));
        }

        // Two or more opposing men block the point.
        let dest = self.board.point(to as usize);
        if dest.occupant() == Some(opponent) && dest.count() > 1 {
            return Err(MoveError::Blocked(to));
        }

        // A die must cover the exact distance in this side's direction.
        for die in self.dice.values() {
            if from + dir * i32::from(die) == to {
                return Ok(ValidMove {
                    die,
                    bear_off: false,
                });
            }
        }
        Err(MoveError::NoMatchingDie)
    }
}

/// Assembles a [`Game`] from an arbitrary position.
///
/// `Game::new` is the canonical opening-roll constructor; the builder is
/// the setup path for tests and for hosts presenting mid-game positions.
///
/// ## Example
///
/// ```
/// use bg_engine::core::{Board, Side};
/// use bg_engine::rules::GameBuilder;
///
/// let mut board = Board::empty();
/// board.place(20, Side::Black, 15);
/// board.place(6, Side::White, 15);
///
/// let game = GameBuilder::new()
///     .board(board)
///     .active(Side::Black)
///     .dice(&[6, 6, 6, 6])
///     .build();
/// assert!(game.can_bear_off());
/// ```
pub struct GameBuilder {
    board: Board,
    active: Side,
    dice: Vec<u8>,
    bars: SidePair<Vec<Side>>,
    seed: u64,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            board: Board::new(),
            active: top_side(),
            dice: Vec::new(),
            bars: SidePair::default(),
            seed: 0,
        }
    }
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given board instead of the standard starting position.
    pub fn board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Which side is to act. Defaults to the side moving upward.
    pub fn active(mut self, side: Side) -> Self {
        self.active = side;
        self
    }

    /// Fix the rolled dice pool. Leaving it unset builds a game awaiting
    /// its roll.
    pub fn dice(mut self, values: &[u8]) -> Self {
        self.dice = values.to_vec();
        self
    }

    /// Put `count` of `side`'s men on the bar.
    pub fn bar_men(mut self, side: Side, count: usize) -> Self {
        self.bars[side] = vec![side; count];
        self
    }

    /// Seed for subsequent rolls. Defaults to 0.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Build the game.
    #[must_use]
    pub fn build(self) -> Game {
        let has_rolled = !self.dice.is_empty();
        Game {
            board: self.board,
            dice: if has_rolled {
                DicePool::from_values(&self.dice)
            } else {
                DicePool::fresh()
            },
            rng: GameRng::new(self.seed),
            active: self.active,
            has_rolled,
            has_moved: false,
            bars: self.bars,
        }
    }
}
