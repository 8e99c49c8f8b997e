//! Search drivers: fixed-iteration play, fast play, training-data recording,
//! and the time-limited driver that races MCTS against the exhaustive solver.

use std::thread;
use std::time::Duration;

use crate::board::{GameState, Point};
use crate::constants::{MAX_STEPS, MTC_STEPS, POLICY_LEN};
use crate::inference::{extract_features, FeatureTensor, InferenceEngine, UniformPriorEngine};
use crate::mcts::Mcts;
use crate::solver::Solver;

/// Number of iterations the "fast" driver runs — a fifth of the default,
/// for contexts that can't afford a full search.
pub const FAST_STEPS: usize = MTC_STEPS / 5;

/// Run `MTC_STEPS` PUCT iterations from `state` and return the chosen move.
pub fn fixed_move(state: &GameState, engine: &dyn InferenceEngine) -> Point {
    let mut tree = Mcts::new(state.clone(), engine);
    tree.run(MTC_STEPS);
    tree.best_move()
}

/// Run `FAST_STEPS` PUCT iterations from `state` and return the chosen move.
pub fn fast_move(state: &GameState, engine: &dyn InferenceEngine) -> Point {
    let mut tree = Mcts::new(state.clone(), engine);
    tree.run(FAST_STEPS);
    tree.best_move()
}

/// A training example: the input feature tensor at `state`, the visit-share
/// policy target the search produced, and the move actually chosen.
pub struct Recorded {
    pub features: FeatureTensor,
    pub policy_target: [f32; POLICY_LEN],
    pub chosen: Point,
}

/// Run a full search from `state` and return both the chosen move and the
/// data needed to train a policy network on this position.
pub fn recorded_move(state: &GameState, engine: &dyn InferenceEngine) -> Recorded {
    let mut tree = Mcts::new(state.clone(), engine);
    tree.run(MTC_STEPS);
    Recorded {
        features: extract_features(state),
        policy_target: tree.visit_share(),
        chosen: tree.best_move(),
    }
}

/// Default wall-clock budget handed to the time-limited driver by callers
/// (the GTP front-end) that don't have a more specific figure of their own.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(10);

/// Run MCTS for up to `time_limit` (or `MAX_STEPS` iterations, whichever
/// comes first) while an exhaustive solver searches the same position
/// concurrently on its own thread. The solver's answer always preempts
/// MCTS's once it resolves, since a proven forced win is never worse than
/// a heuristic choice.
pub fn time_limited_move(
    state: &GameState,
    engine: &dyn InferenceEngine,
    time_limit: Duration,
) -> Point {
    let solver = Solver::new();
    let solver_handle = solver.clone();
    let solver_state = state.clone();
    let solver_thread = thread::spawn(move || solver_handle.get_must_win_move(&solver_state));

    let mut tree = Mcts::with_force_select(state.clone(), engine, true);
    let deadline = std::time::Instant::now() + time_limit;
    for _ in 0..MAX_STEPS {
        if std::time::Instant::now() >= deadline {
            break;
        }
        tree.run(1);
    }

    solver.stop();
    let must_win = solver_thread.join().unwrap_or(None);

    must_win.unwrap_or_else(|| tree.best_move())
}

/// Like `time_limited_move`, but also returns an estimate of Black's win
/// probability at the chosen child (`Wᵦ/N` of the root's most-visited
/// child, not the root's own average).
pub fn evaluate_move(
    state: &GameState,
    engine: &dyn InferenceEngine,
    time_limit: Duration,
) -> (Point, f32) {
    let solver = Solver::new();
    let solver_handle = solver.clone();
    let solver_state = state.clone();
    let solver_thread = thread::spawn(move || solver_handle.get_must_win_move(&solver_state));

    let mut tree = Mcts::with_force_select(state.clone(), engine, true);
    let deadline = std::time::Instant::now() + time_limit;
    for _ in 0..MAX_STEPS {
        if std::time::Instant::now() >= deadline {
            break;
        }
        tree.run(1);
    }

    let black_win_rate = tree.best_child_black_win_rate();
    solver.stop();
    let must_win = solver_thread.join().unwrap_or(None);

    let chosen = must_win.unwrap_or_else(|| tree.best_move());
    let estimate = match (state.side_to_move, &must_win) {
        (crate::board::Player::Black, Some(_)) => 1.0,
        (crate::board::Player::White, Some(_)) => 0.0,
        _ => black_win_rate,
    };
    (chosen, estimate)
}

/// Convenience: a fixed-iteration search using the always-available
/// uniform-prior fallback, for callers with no trained network.
pub fn fixed_move_uniform(state: &GameState) -> Point {
    fixed_move(state, &UniformPriorEngine)
}
