//! go5x5-engine: a 5x5 Go engine combining a neural-guided PUCT MCTS with
//! an exhaustive AND/OR endgame solver.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, MCTS parameters, search budgets
//! - [`board`] - Stones, players, points, the board grid, group index, and game state
//! - [`inference`] - Feature tensor extraction and the `InferenceEngine` contract
//! - [`mcts`] - Arena-based PUCT search tree
//! - [`search`] - Fixed/Fast/Recording/TimeLimited search drivers
//! - [`solver`] - Exhaustive endgame forced-win prover
//! - [`gtp`] - Go Text Protocol front-end
//!
//! ## Example
//!
//! ```
//! use go5x5_engine::board::GameState;
//! use go5x5_engine::inference::UniformPriorEngine;
//! use go5x5_engine::search;
//!
//! let state = GameState::new();
//! let engine = UniformPriorEngine;
//! let best = search::fixed_move(&state, &engine);
//! println!("{best:?}");
//! ```

pub mod board;
pub mod constants;
pub mod gtp;
pub mod inference;
pub mod mcts;
pub mod search;
pub mod solver;
