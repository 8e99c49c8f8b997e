//! Exhaustive AND/OR endgame solver.
//!
//! A bounded depth-first forced-win proof search: a shared atomic node
//! counter bounds total work, a shared atomic flag lets the time-limited
//! driver cancel the search from another thread, and the search
//! short-circuits the instant it proves a forced win for the side to move
//! at the point it was invoked from.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::board::{GameState, Player, Point};
use crate::constants::{MAX_EXPANSIONS, SOLVER_MIN_MOVE_COUNT};

/// Exhaustive solver state shared across a single `get_must_win_move` call
/// (and, for the time-limited driver, shared with the thread that may call
/// `stop()` concurrently).
#[derive(Clone)]
pub struct Solver {
    expansions: Arc<AtomicUsize>,
    finished: Arc<AtomicBool>,
    max_expansions: usize,
}

impl Solver {
    pub fn new() -> Solver {
        Solver::with_max_expansions(MAX_EXPANSIONS)
    }

    /// Like `new`, but overrides the node-construction budget instead of
    /// using `MAX_EXPANSIONS` — lets tests exercise the cap-exhausted path
    /// with a small cap instead of the full production budget.
    pub fn with_max_expansions(max_expansions: usize) -> Solver {
        Solver {
            expansions: Arc::new(AtomicUsize::new(0)),
            finished: Arc::new(AtomicBool::new(false)),
            max_expansions,
        }
    }

    /// Cancel an in-progress `get_must_win_move` call from another thread.
    pub fn stop(&self) {
        self.finished.store(true, Ordering::SeqCst);
    }

    /// Prove whether the side to move at `state` can force a win, returning
    /// the winning move if so. Requires at least `SOLVER_MIN_MOVE_COUNT`
    /// moves already played — below that the branching factor makes the
    /// expansion budget unreachable. Returns `None` both when no forced win
    /// exists and when the budget is exhausted before the question is
    /// resolved either way.
    pub fn get_must_win_move(&self, state: &GameState) -> Option<Point> {
        if state.terminal || state.move_count < SOLVER_MIN_MOVE_COUNT {
            return None;
        }
        // A `stop()` observed before this call starts must still cancel
        // it: `finished` is only ever cleared by a fresh `Solver`, never
        // reset here, so a prior cancellation is never silently undone.
        if self.finished.load(Ordering::SeqCst) {
            return None;
        }
        self.expansions.store(0, Ordering::SeqCst);

        let mover = state.side_to_move;
        for action in candidate_actions(state) {
            if self.finished.load(Ordering::SeqCst) {
                return None;
            }
            let mut child = state.clone();
            child.play(action).expect("candidate action must be legal");
            if self.solve(&child) == Some(mover) {
                return Some(action);
            }
        }
        None
    }

    /// Returns the forced winner from `state`, or `None` if unresolved
    /// (budget exhausted or cancelled) before a proof completed.
    fn solve(&self, state: &GameState) -> Option<Player> {
        if self.finished.load(Ordering::Relaxed) {
            return None;
        }
        let expansions_so_far = self.expansions.fetch_add(1, Ordering::Relaxed);
        if expansions_so_far >= self.max_expansions {
            return None;
        }
        if state.terminal {
            return Some(state.judge_winner());
        }

        let mover = state.side_to_move;
        let mut all_resolved = true;
        for action in candidate_actions(state) {
            if self.finished.load(Ordering::Relaxed) {
                return None;
            }
            let mut child = state.clone();
            child.play(action).expect("candidate action must be legal");
            match self.solve(&child) {
                Some(winner) if winner == mover => return Some(mover),
                Some(_) => {}
                None => all_resolved = false,
            }
        }

        if all_resolved {
            Some(mover.opponent())
        } else {
            None
        }
    }
}

impl Default for Solver {
    fn default() -> Solver {
        Solver::new()
    }
}

/// Pass is tried first, then every board placement in row-major order.
fn candidate_actions(state: &GameState) -> Vec<Point> {
    let mut actions = vec![Point::Pass];
    actions.extend(state.possible_placements());
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solver_refuses_below_minimum_move_count() {
        let state = GameState::new();
        let solver = Solver::new();
        assert_eq!(solver.get_must_win_move(&state), None);
    }

    #[test]
    fn solver_finds_a_forced_winning_pass_when_one_ply_from_game_end() {
        // Twelve Black stones, no White stones, and only a single ply left
        // before the move cap forces termination: whatever Black plays
        // (including Pass) the resulting board is judged with Black far
        // ahead, so the solver should prove Pass a forced win in one level
        // of recursion.
        let mut state = GameState::new();
        for row in 0..2 {
            for col in 0..5 {
                state.place_stone(row, col, crate::board::Stone::Black);
            }
        }
        state.place_stone(2, 0, crate::board::Stone::Black);
        state.place_stone(2, 1, crate::board::Stone::Black);
        state.previous_board = state.board.clone();
        state.move_count = crate::constants::MAX_MOVES - 1;
        state.side_to_move = crate::board::Player::Black;

        let solver = Solver::new();
        let result = solver.get_must_win_move(&state);
        assert_eq!(result, Some(Point::Pass));
    }

    #[test]
    fn stop_cancels_an_in_progress_solve_immediately() {
        let state = GameState::new();
        let solver = Solver::new();
        solver.stop();
        assert_eq!(solver.solve(&state), None);
    }

    #[test]
    fn stop_called_before_get_must_win_move_yields_none() {
        let mut state = GameState::new();
        state.move_count = SOLVER_MIN_MOVE_COUNT;
        let solver = Solver::new();
        solver.stop();
        assert_eq!(solver.get_must_win_move(&state), None);
    }

    #[test]
    fn a_lowered_expansion_cap_leaves_the_question_unresolved() {
        let mut state = GameState::new();
        state.move_count = SOLVER_MIN_MOVE_COUNT;
        let solver = Solver::with_max_expansions(10);
        assert_eq!(solver.get_must_win_move(&state), None);
    }
}
