//! Rules scenarios: opening roll, bar priority, captures, bearing off,
//! doubles, and turn sequencing, driven through the public surface.

use bg_engine::core::{Board, GameRng, Side, NUM_POINTS};
use bg_engine::rules::{GameBuilder, MoveError, Phase};
use bg_engine::Game;

/// Replay the opening procedure: each side rolls one die, ties re-rolled.
fn expected_opening(seed: u64) -> (u8, u8, Side) {
    let mut rng = GameRng::new(seed);
    loop {
        let black = rng.roll_die();
        let white = rng.roll_die();
        if black != white {
            let first = if black > white { Side::Black } else { Side::White };
            return (black, white, first);
        }
    }
}

/// Test the winner of the opening roll moves first with exactly that roll
/// as its pool.
#[test]
fn test_opening_roll_winner_moves_first() {
    for seed in 0..50 {
        let game = Game::new(seed);
        let (black, white, first) = expected_opening(seed);

        assert_eq!(game.active_side(), first, "seed {seed}");
        assert_eq!(game.dice_values(), vec![black, white], "seed {seed}");
        assert_eq!(game.phase(), Phase::AwaitingMove, "seed {seed}");
    }
}

/// Test a double always expands the pool to four dice of one value, and
/// anything else leaves two.
#[test]
fn test_doubles_yield_four_dice() {
    let mut doubles = 0;

    for seed in 0..100 {
        let mut game = GameBuilder::new().seed(seed).build();
        game.roll();

        // Every roll from the standard start has a legal move, so the pool
        // is never forfeited here.
        let dice = game.dice_values();
        if dice[0] == dice[1] {
            assert_eq!(dice.len(), 4, "seed {seed}");
            assert!(dice.iter().all(|&d| d == dice[0]), "seed {seed}");
            doubles += 1;
        } else {
            assert_eq!(dice.len(), 2, "seed {seed}");
        }
    }

    assert!(doubles > 0, "no double in 100 seeds");
}

/// Test that with a man on the bar, only bar re-entry may move.
#[test]
fn test_bar_priority() {
    let game = GameBuilder::new()
        .active(Side::Black)
        .bar_men(Side::Black, 1)
        .dice(&[2, 4])
        .build();

    let bar = game.bar(Side::Black);
    assert!(game.can_move(bar));

    for from in 1..=NUM_POINTS as i32 {
        for die in game.dice_values() {
            let to = from + game.direction(Side::Black) * i32::from(die);
            assert!(!game.is_valid_move(from, to), "from {from} to {to}");
        }
    }

    // The concrete rejection is the bar rule, not the occupancy rule.
    assert_eq!(
        GameBuilder::new()
            .active(Side::Black)
            .bar_men(Side::Black, 1)
            .dice(&[2, 4])
            .build()
            .make_move(1, 3),
        Err(MoveError::MustEnterFromBar)
    );
}

/// Test re-entry from the bar lands on the entry quadrant and comes off
/// the bar stack.
#[test]
fn test_bar_reentry() {
    let mut game = GameBuilder::new()
        .active(Side::Black)
        .bar_men(Side::Black, 1)
        .dice(&[2, 4])
        .build();

    let bar = game.bar(Side::Black);
    let outcome = game.make_move(bar, 2).expect("entry should be legal");

    assert_eq!(outcome.die, 2);
    assert!(!outcome.capture);
    assert_eq!(game.bar_count(Side::Black), 0);
    assert_eq!(game.board().point(2).occupant(), Some(Side::Black));
}

/// Test entry is forfeited outright when every entry point is blocked.
#[test]
fn test_blocked_entry_forfeits_turn() {
    let mut board = Board::empty();
    // White owns the whole entry quadrant with made points.
    for point in 1..=6 {
        board.place(point, Side::White, 2);
    }
    board.place(13, Side::White, 3);
    board.place(20, Side::Black, 14);

    let mut game = GameBuilder::new()
        .board(board)
        .active(Side::Black)
        .bar_men(Side::Black, 1)
        .seed(9)
        .build();

    assert_eq!(game.phase(), Phase::AwaitingRoll);
    game.roll();

    assert_eq!(game.phase(), Phase::TurnOver);
    assert!(!game.has_move());
    assert!(game.dice_values().is_empty());
    assert_eq!(game.make_move(game.bar(Side::Black), 2), Err(MoveError::TurnOver));
}

/// Test landing on a lone opposing man hits it to the bar and takes the
/// point.
#[test]
fn test_capture_sends_man_to_bar() {
    let mut board = Board::empty();
    board.place(1, Side::Black, 2);
    board.place(3, Side::White, 1);
    board.place(13, Side::Black, 13);
    board.place(24, Side::White, 14);

    let mut game = GameBuilder::new()
        .board(board)
        .active(Side::Black)
        .dice(&[2, 5])
        .build();

    assert!(game.is_capture(1, 3));
    let outcome = game.make_move(1, 3).expect("capture should be legal");

    assert!(outcome.capture);
    assert_eq!(game.bar_count(Side::White), 1);
    assert_eq!(game.board().point(3).occupant(), Some(Side::Black));
    assert_eq!(game.board().point(3).count(), 1);
}

/// Test a made point (two or more opposing men) cannot be landed on.
#[test]
fn test_blocked_point() {
    let mut board = Board::empty();
    board.place(1, Side::Black, 15);
    board.place(3, Side::White, 2);
    board.place(24, Side::White, 13);

    let mut game = GameBuilder::new()
        .board(board)
        .active(Side::Black)
        .dice(&[2, 5])
        .build();

    assert!(!game.is_capture(1, 3));
    assert_eq!(game.make_move(1, 3), Err(MoveError::Blocked(3)));
}

/// Test bearing off with an exact die.
#[test]
fn test_bear_off_exact() {
    let mut board = Board::empty();
    board.place(19, Side::Black, 10);
    board.place(24, Side::Black, 5);
    board.place(3, Side::White, 15);

    let mut game = GameBuilder::new()
        .board(board)
        .active(Side::Black)
        .dice(&[6, 2])
        .build();

    let off = game.offboard(Side::Black);
    assert!(game.is_bearing_off_move(19, off));

    let outcome = game.make_move(19, off).expect("exact bear-off");
    assert!(outcome.bear_off);
    assert_eq!(outcome.die, 6);
    assert_eq!(game.borne_off_count(Side::Black), 1);
    assert_eq!(game.board().men_on_points(Side::Black), 14);
}

/// Test the overshoot rule: all men home, dice {6,6,6,6}, the
/// farthest-back man can bear off with any die at least the distance.
#[test]
fn test_bear_off_overshoot_from_rearmost() {
    let mut board = Board::empty();
    board.place(20, Side::Black, 15);
    board.place(3, Side::White, 15);

    let mut game = GameBuilder::new()
        .board(board)
        .active(Side::Black)
        .dice(&[6, 6, 6, 6])
        .build();

    let off = game.offboard(Side::Black);
    assert!(game.is_valid_move(20, off));
    assert!(game.is_bearing_off_move(20, off));

    let outcome = game.make_move(20, off).expect("overshoot bear-off");
    assert!(outcome.bear_off);
    assert_eq!(outcome.die, 6);
    assert_eq!(game.borne_off_count(Side::Black), 1);
}

/// Test overshoot is refused while a man sits farther back in the home
/// quadrant.
#[test]
fn test_bear_off_overshoot_requires_rearmost() {
    let mut board = Board::empty();
    board.place(19, Side::Black, 1);
    board.place(21, Side::Black, 14);
    board.place(3, Side::White, 15);

    let mut game = GameBuilder::new()
        .board(board)
        .active(Side::Black)
        .dice(&[6, 6, 6, 6])
        .build();

    let off = game.offboard(Side::Black);
    // 21 + 6 carries past the edge, but 19 still holds a man.
    assert_eq!(game.make_move(21, off), Err(MoveError::NotRearmost));
    // The rearmost man itself bears off (19 + 6 lands exactly).
    assert!(game.is_valid_move(19, off));
}

/// Test the die-consumption policy: the first die in pool order that
/// covers the overshoot is the one consumed.
#[test]
fn test_overshoot_consumes_first_qualifying_die() {
    let mut board = Board::empty();
    board.place(21, Side::Black, 15);
    board.place(3, Side::White, 15);

    let mut game = GameBuilder::new()
        .board(board)
        .active(Side::Black)
        .dice(&[5, 6])
        .build();

    // Distance to the edge is 4; both dice overshoot, pool order wins.
    let outcome = game.make_move(21, game.offboard(Side::Black)).expect("bear-off");
    assert_eq!(outcome.die, 5);
    assert_eq!(game.dice_values(), vec![6]);
}

/// Test bear-off is rejected without eligibility even when a die fits the
/// distance.
#[test]
fn test_no_bear_off_outside_home() {
    let mut board = Board::empty();
    board.place(19, Side::Black, 14);
    board.place(10, Side::Black, 1);
    board.place(3, Side::White, 15);

    let mut game = GameBuilder::new()
        .board(board)
        .active(Side::Black)
        .dice(&[6, 3])
        .build();

    let off = game.offboard(Side::Black);
    assert!(!game.can_bear_off());
    assert_eq!(game.make_move(19, off), Err(MoveError::OutOfRange(off)));
}

/// Test exhausting the last usable die marks the turn over without an
/// explicit end-turn call.
#[test]
fn test_turn_ends_when_dice_exhausted() {
    let mut board = Board::empty();
    board.place(22, Side::Black, 1);
    board.place(25, Side::Black, 14);
    board.place(1, Side::White, 15);

    let mut game = GameBuilder::new()
        .board(board)
        .active(Side::Black)
        .dice(&[3])
        .build();

    let off = game.offboard(Side::Black);
    let outcome = game.make_move(22, off).expect("final bear-off");

    assert!(outcome.turn_over);
    assert!(!game.has_move());
    assert_eq!(game.phase(), Phase::TurnOver);
    assert!(game.dice_values().is_empty());

    // That was the last man: the game is decided.
    assert!(game.is_over());
    assert_eq!(game.winner(), Some(Side::Black));
}

/// Test the precondition errors surface with their concrete reasons.
#[test]
fn test_move_error_taxonomy() {
    // Not rolled yet.
    let mut game = GameBuilder::new().active(Side::Black).build();
    assert_eq!(game.make_move(1, 3), Err(MoveError::NotRolled));

    // Origin without the active side's men.
    let mut game = GameBuilder::new().active(Side::Black).dice(&[2, 3]).build();
    assert_eq!(game.make_move(2, 4), Err(MoveError::NotYourPoint(2)));
    assert_eq!(game.make_move(6, 8), Err(MoveError::NotYourPoint(6)));

    // Sentinel origin with an empty bar.
    assert_eq!(game.make_move(0, 2), Err(MoveError::NotYourPoint(0)));
    assert_eq!(game.make_move(25, 23), Err(MoveError::NotYourPoint(25)));

    // No die covers the distance.
    assert_eq!(game.make_move(1, 5), Err(MoveError::NoMatchingDie));

    // Destination off the playable board without bear-off eligibility.
    let mut game = GameBuilder::new().active(Side::White).dice(&[6, 6, 6, 6]).build();
    assert_eq!(game.make_move(6, 0), Err(MoveError::OutOfRange(0)));
}

/// Test a game snapshot query set stays consistent through a full turn.
#[test]
fn test_turn_cycle_state_consistency() {
    let mut game = Game::new(42);
    let first = game.active_side();

    // Play out the opening pool.
    while game.phase() == Phase::AwaitingMove {
        let mv = legal_moves(&game)
            .into_iter()
            .next()
            .expect("engine reports moves remain");
        game.make_move(mv.0, mv.1).expect("listed move applies");
    }

    assert_eq!(game.phase(), Phase::TurnOver);
    game.advance_turn();
    assert_eq!(game.active_side(), first.opponent());
    assert_eq!(game.phase(), Phase::AwaitingRoll);

    game.roll();
    assert!(game.phase() == Phase::AwaitingMove || game.phase() == Phase::TurnOver);
}

/// All (from, to) pairs the active side can play right now.
fn legal_moves(game: &Game) -> Vec<(i32, i32)> {
    let side = game.active_side();
    let dir = game.direction(side);
    let mut origins: Vec<i32> = (1..=NUM_POINTS as i32).collect();
    origins.push(game.bar(side));

    let mut moves = Vec::new();
    for from in origins {
        for die in game.dice_values() {
            let to = from + dir * i32::from(die);
            if game.is_valid_move(from, to) && !moves.contains(&(from, to)) {
                moves.push((from, to));
            }
        }
    }
    moves
}
