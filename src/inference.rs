//! Neural network feature extraction and the inference contract.
//!
//! The core never links against a concrete neural network binding — it only
//! depends on the `InferenceEngine` trait below. A real ONNX Runtime adapter
//! is an external integration; this crate ships only the always-available
//! uniform-prior fallback.

use crate::board::{GameState, Player, Point, Stone};
use crate::constants::{NUM_CHANNELS, N, PASS_INDEX, POLICY_LEN};

/// The five-channel, 5x5 feature tensor fed to the policy network:
/// black stones, white stones, black-group liberties, white-group
/// liberties, and the side-to-move's legal-move map.
pub type FeatureTensor = [[[f32; N]; N]; NUM_CHANNELS];

/// Flat policy vector: 25 board points in row-major order, plus Pass at
/// `PASS_INDEX`.
pub type PolicyVector = [f32; POLICY_LEN];

/// Build the feature tensor for `state`.
pub fn extract_features(state: &GameState) -> FeatureTensor {
    let mut tensor = [[[0.0_f32; N]; N]; NUM_CHANNELS];

    for row in 0..N {
        for col in 0..N {
            match state.board.get(row, col) {
                Stone::Black => tensor[BLACK_CHANNEL][row][col] = 1.0,
                Stone::White => tensor[WHITE_CHANNEL][row][col] = 1.0,
                Stone::Empty => {}
            }
            if state.board.get(row, col) != Stone::Empty {
                let libs = state.groups.liberty_count((row, col));
                match state.board.get(row, col) {
                    Stone::Black => tensor[2][row][col] = libs as f32,
                    Stone::White => tensor[3][row][col] = libs as f32,
                    Stone::Empty => unreachable!(),
                }
            }
        }
    }

    let sign = match state.side_to_move {
        Player::Black => 1.0,
        Player::White => -1.0,
    };
    for p in state.possible_placements() {
        if let Point::Coord(row, col) = p {
            tensor[4][row][col] = sign;
        }
    }

    tensor
}

/// A source of move priors: given a position, returns one prior weight per
/// legal move (indexed the way the consumer decides — `mcts` reads this via
/// `policy_for`, below).
pub trait InferenceEngine {
    /// Full 26-length policy (25 board points + Pass), matching the
    /// `(gameBoard) -> (policy)` contract's shape. Implementations need not
    /// use `state.side_to_move` for anything but feature extraction.
    fn infer(&self, state: &GameState) -> PolicyVector;
}

/// Always-available fallback: uniform priors over all legal moves (including
/// Pass). Used whenever "no network is used" is specified — rollout
/// sampling, the `Fixed`/`Fast` drivers run without a supplied engine, and
/// deterministic tests.
pub struct UniformPriorEngine;

impl InferenceEngine for UniformPriorEngine {
    fn infer(&self, state: &GameState) -> PolicyVector {
        let legal = state.possible_placements();
        let count = legal.len() + 1; // +1 for Pass, always legal
        let prior = 1.0 / count as f32;

        let mut policy = [0.0_f32; POLICY_LEN];
        for p in legal {
            policy[p.index()] = prior;
        }
        policy[PASS_INDEX] = prior;
        policy
    }
}

/// Read the prior for a specific move out of a policy vector.
pub fn policy_for(policy: &PolicyVector, action: Point) -> f32 {
    match action {
        Point::Pass => policy[PASS_INDEX],
        Point::Coord(_, _) => policy[action.index()],
    }
}

/// Which player's stones occupy channel 0 vs. channel 1.
pub const BLACK_CHANNEL: usize = 0;
pub const WHITE_CHANNEL: usize = 1;
