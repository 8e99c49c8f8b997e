//! Constants for board geometry, MCTS parameters, and search budgets.
//!
//! The board is fixed at 5x5 — this engine plays one size only.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board width and height.
pub const N: usize = 5;

/// Number of points on the board.
pub const BOARD_AREA: usize = N * N;

/// Komi: compensation added to White's score. Non-integer, so no ties.
pub const KOMI: f32 = 2.5;

/// Game ends unconditionally once this many moves have been played.
pub const MAX_MOVES: usize = N * N - 1;

// =============================================================================
// Neural network feature / policy shapes
// =============================================================================

/// Number of feature-tensor channels fed to the policy network.
pub const NUM_CHANNELS: usize = 5;

/// Length of the flat policy output vector: one entry per board point, plus Pass.
pub const POLICY_LEN: usize = BOARD_AREA + 1;

/// Index of the Pass prior/visit-share within a policy vector.
pub const PASS_INDEX: usize = BOARD_AREA;

pub const INPUT_TENSOR_NAME: &str = "gameBoard";
pub const OUTPUT_TENSOR_NAME: &str = "policy";

// =============================================================================
// MCTS parameters
// =============================================================================

/// PUCT exploration constant.
pub const C_PUCT: f64 = 1.1;

/// Root-level force-select exploration coefficient.
pub const FORCE_SELECT_K: f64 = 0.5;

// =============================================================================
// Search driver budgets
// =============================================================================

/// Default iteration count for the Fixed driver.
pub const MTC_STEPS: usize = 400;

/// Hard iteration ceiling for the time-limited driver.
pub const MAX_STEPS: usize = 1_000_000;

// =============================================================================
// Exhaustive solver
// =============================================================================

/// Node-construction budget before the solver gives up and reports "unresolved".
pub const MAX_EXPANSIONS: usize = 500_000;

/// The solver refuses to run before this many moves have been played — below
/// it the branching factor makes the expansion cap unreachable.
pub const SOLVER_MIN_MOVE_COUNT: usize = 14;
