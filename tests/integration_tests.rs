//! Integration tests covering end-to-end engine behavior: the rules engine
//! driven through full games, MCTS determinism, and the exhaustive solver's
//! forced-win guarantee.

use go5x5_engine::board::{parse_coord, GameState, MoveError, Player, Point};
use go5x5_engine::inference::UniformPriorEngine;
use go5x5_engine::mcts::Mcts;
use go5x5_engine::search;
use go5x5_engine::solver::Solver;

fn play_all(state: &mut GameState, moves: &[&str]) {
    for mv in moves {
        let p = parse_coord(mv).unwrap_or_else(|| panic!("bad coordinate {mv}"));
        state.play(p).unwrap_or_else(|e| panic!("illegal move {mv}: {e}"));
    }
}

#[test]
fn empty_board_offers_all_25_points_as_legal_placements() {
    let state = GameState::new();
    assert_eq!(state.possible_placements().len(), 25);
    assert_eq!(state.side_to_move, Player::Black);
    assert_eq!(state.move_count, 0);
    assert!(!state.terminal);
}

#[test]
fn a_full_game_of_passes_from_the_opening_ends_immediately_and_white_wins_by_komi() {
    let mut state = GameState::new();
    state.play(Point::Pass).unwrap();
    state.play(Point::Pass).unwrap();
    assert!(state.terminal);
    assert_eq!(state.judge_winner(), Player::White);
}

#[test]
fn single_stone_ko_cannot_be_immediately_retaken() {
    // Corner ko: White's lone stone at B5 is walled in by Black at C5 and
    // B4, leaving A5 as its only liberty; White also holds A4, so Black's
    // capturing stone at A5 itself ends up with exactly one liberty.
    let mut state = GameState::new();
    play_all(
        &mut state,
        &[
            "C5", // Black
            "B5", // White (the ko stone)
            "B4", // Black
            "A4", // White
            "A5", // Black captures White's stone at B5
        ],
    );
    assert_eq!(
        state.board.get(0, 1),
        go5x5_engine::board::Stone::Empty
    );

    // White immediately trying to retake at B5 is a ko violation.
    let result = state.play(parse_coord("B5").unwrap());
    assert_eq!(result, Err(MoveError::Ko));

    // After White tenukis and Black tenukis back, the recapture is legal.
    play_all(&mut state, &["E1", "E2"]);
    assert!(state.is_legal(parse_coord("B5").unwrap(), Player::White.stone()));
}

#[test]
fn suicide_moves_are_rejected_with_the_suicide_error() {
    let mut state = GameState::new();
    // White builds a ring around A5 (row 0, col 0) with Black passing between.
    play_all(&mut state, &["pass", "A4", "pass", "B5"]);
    // Black to move: A5 would be suicide.
    let result = state.play(parse_coord("A5").unwrap());
    assert_eq!(result, Err(MoveError::Suicide));
}

#[test]
fn mcts_is_deterministic_given_a_seeded_rng_and_a_fixed_tree_shape() {
    fastrand::seed(42);
    let state = GameState::new();
    let engine = UniformPriorEngine;
    let mut tree_a = Mcts::new(state.clone(), &engine);
    tree_a.run(100);

    fastrand::seed(42);
    let mut tree_b = Mcts::new(state.clone(), &engine);
    tree_b.run(100);

    // Root visits alone would be 100 regardless of rollout choices or tree
    // shape, since `run` calls `select(ROOT)` exactly `iterations` times and
    // `select` unconditionally bumps the visited node's count — compare the
    // visit-share distribution instead, which only matches if the RNG
    // stream and resulting tree shape were actually reproduced.
    assert_eq!(tree_a.visit_share(), tree_b.visit_share());
    assert_eq!(tree_a.best_move(), tree_b.best_move());
}

#[test]
fn fixed_driver_always_returns_a_move_the_state_considers_legal_or_pass() {
    let state = GameState::new();
    let engine = UniformPriorEngine;
    let mv = search::fixed_move(&state, &engine);
    match mv {
        Point::Pass => {}
        Point::Coord(_, _) => assert!(state.possible_placements().contains(&mv)),
    }
}

#[test]
fn solver_declines_to_answer_before_the_minimum_move_count() {
    let state = GameState::new();
    let solver = Solver::new();
    assert_eq!(solver.get_must_win_move(&state), None);
}

#[test]
fn solver_proves_a_forced_win_one_ply_from_the_move_cap() {
    // Twelve Black stones, no White stones, one ply left before the move
    // cap forces termination — any move Black makes (including Pass)
    // yields a terminal position Black wins by area count.
    let mut state = GameState::new();
    for row in 0..2 {
        for col in 0..5 {
            state.place_stone(row, col, go5x5_engine::board::Stone::Black);
        }
    }
    state.place_stone(2, 0, go5x5_engine::board::Stone::Black);
    state.place_stone(2, 1, go5x5_engine::board::Stone::Black);
    state.previous_board = state.board.clone();
    state.move_count = go5x5_engine::constants::MAX_MOVES - 1;
    state.side_to_move = Player::Black;

    let solver = Solver::new();
    assert_eq!(solver.get_must_win_move(&state), Some(Point::Pass));
}

#[test]
fn lowering_the_expansion_cap_leaves_an_otherwise_answerable_position_unresolved() {
    // Same position `solver_proves_a_forced_win_one_ply_from_the_move_cap`
    // resolves instantly at the full budget; starved down to 10 expansions
    // the solver must give up instead of fabricating an answer.
    let mut state = GameState::new();
    for row in 0..2 {
        for col in 0..5 {
            state.place_stone(row, col, go5x5_engine::board::Stone::Black);
        }
    }
    state.previous_board = state.board.clone();
    state.move_count = go5x5_engine::constants::SOLVER_MIN_MOVE_COUNT;
    state.side_to_move = Player::Black;

    let solver = Solver::with_max_expansions(10);
    assert_eq!(solver.get_must_win_move(&state), None);
}

#[test]
fn a_playthrough_that_fills_the_move_cap_terminates_the_game() {
    let mut state = GameState::new();
    for _ in 0..go5x5_engine::constants::MAX_MOVES {
        if state.terminal {
            break;
        }
        // Alternate a corner placement with a pass so the move count
        // advances without running into illegal-move edge cases.
        let mv = state
            .possible_placements()
            .first()
            .copied()
            .unwrap_or(Point::Pass);
        state.play(mv).unwrap();
    }
    assert!(state.terminal);
}
