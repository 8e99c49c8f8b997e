//! PUCT-guided Monte Carlo Tree Search over an arena of nodes.
//!
//! Nodes live in a flat arena (`Vec<Node>` indexed by `NodeId`) with parent
//! links by id, so backprop is a loop walking parent ids to the root
//! rather than a graph of owning pointers.

use crate::board::{GameState, Player, Point};
use crate::constants::{C_PUCT, FORCE_SELECT_K, PASS_INDEX, POLICY_LEN};
use crate::inference::{policy_for, InferenceEngine};

pub type NodeId = usize;

/// One node in the search tree: the game state it represents, how it was
/// reached, and its accumulated visit/win statistics.
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub action: Point,
    pub state: GameState,
    pub prior: f64,
    pub visits: u64,
    pub black_wins: u64,
    pub white_wins: u64,
}

/// An arena-backed PUCT search tree rooted at a single `GameState`.
pub struct Mcts<'a> {
    nodes: Vec<Node>,
    engine: &'a dyn InferenceEngine,
    force_select: bool,
}

impl<'a> Mcts<'a> {
    pub fn new(root_state: GameState, engine: &'a dyn InferenceEngine) -> Mcts<'a> {
        Self::with_force_select(root_state, engine, false)
    }

    /// Like `new`, but with the root-level force-select override enabled
    /// or disabled explicitly. The time-limited driver always enables it.
    pub fn with_force_select(
        root_state: GameState,
        engine: &'a dyn InferenceEngine,
        force_select: bool,
    ) -> Mcts<'a> {
        let root = Node {
            parent: None,
            children: Vec::new(),
            action: Point::Pass,
            state: root_state,
            prior: 1.0,
            visits: 0,
            black_wins: 0,
            white_wins: 0,
        };
        Mcts {
            nodes: vec![root],
            engine,
            force_select,
        }
    }

    pub const ROOT: NodeId = 0;

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn root_state(&self) -> &GameState {
        &self.nodes[Self::ROOT].state
    }

    /// Run `iterations` select/expand/rollout/backprop cycles from the root.
    pub fn run(&mut self, iterations: usize) {
        for _ in 0..iterations {
            self.select(Self::ROOT);
        }
    }

    fn select(&mut self, id: NodeId) {
        self.nodes[id].visits += 1;

        if self.nodes[id].state.terminal {
            let winner = self.nodes[id].state.judge_winner();
            self.backpropagate(id, winner);
            return;
        }

        if self.nodes[id].children.is_empty() {
            if self.nodes[id].visits == 1 {
                let winner = self.rollout(id);
                self.backpropagate(id, winner);
            } else {
                self.expand(id);
                let best = self.select_best_child(id);
                self.select(best);
            }
        } else {
            let best = self.select_best_child(id);
            self.select(best);
        }
    }

    /// Build one child per legal action (plus Pass), priors from the
    /// inference engine (network policy, or uniform if none is supplied).
    fn expand(&mut self, id: NodeId) {
        let policy = self.engine.infer(&self.nodes[id].state);

        let mut actions = self.nodes[id].state.possible_placements();
        actions.push(Point::Pass);

        for action in actions {
            let mut child_state = self.nodes[id].state.clone();
            child_state
                .play(action)
                .expect("expand only considers actions returned as legal");
            let prior = policy_for(&policy, action) as f64;

            let child = Node {
                parent: Some(id),
                children: Vec::new(),
                action,
                state: child_state,
                prior,
                visits: 0,
                black_wins: 0,
                white_wins: 0,
            };
            let child_id = self.nodes.len();
            self.nodes.push(child);
            self.nodes[id].children.push(child_id);
        }
    }

    /// Play out `self.nodes[id].state` to completion by sampling actions
    /// proportionally to the inference engine's policy (cumulative-weight
    /// draw), returning the resulting winner.
    fn rollout(&self, id: NodeId) -> Player {
        let mut state = self.nodes[id].state.clone();
        while !state.terminal {
            let action = self.sample_action(&state);
            state
                .play(action)
                .expect("sampled action must be legal");
        }
        state.judge_winner()
    }

    fn sample_action(&self, state: &GameState) -> Point {
        let policy = self.engine.infer(state);
        let mut actions = state.possible_placements();
        actions.push(Point::Pass);

        let weights: Vec<f64> = actions.iter().map(|&a| policy_for(&policy, a) as f64).collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Point::Pass;
        }

        let mut draw = fastrand::f64() * total;
        for (i, w) in weights.iter().enumerate() {
            draw -= w;
            if draw <= 0.0 {
                return actions[i];
            }
        }
        *actions.last().unwrap()
    }

    fn backpropagate(&mut self, mut id: NodeId, winner: Player) {
        loop {
            match winner {
                Player::Black => self.nodes[id].black_wins += 1,
                Player::White => self.nodes[id].white_wins += 1,
            }
            match self.nodes[id].parent {
                Some(parent) => id = parent,
                None => break,
            }
        }
    }

    /// Select the best child of `id`: at the root, when force-select is
    /// enabled, the first child under-visited relative to
    /// `sqrt(FORCE_SELECT_K * N(root))` is picked regardless of PUCT;
    /// otherwise the PUCT-maximizing child is chosen.
    fn select_best_child(&self, id: NodeId) -> NodeId {
        let parent_visits = self.nodes[id].visits as f64;
        let parent_player = self.nodes[id].state.side_to_move;
        let children = &self.nodes[id].children;

        if id == Self::ROOT && self.force_select {
            let threshold = (FORCE_SELECT_K * parent_visits).sqrt();
            if let Some(&c) = children
                .iter()
                .find(|&&c| (self.nodes[c].visits as f64) < threshold)
            {
                return c;
            }
        }

        // Ties broken by first-encountered order, so this walks forward
        // and only replaces the incumbent on a strict improvement (a plain
        // `max_by` would keep the *last* of equal-scoring children).
        let mut best = children[0];
        let mut best_score = self.puct_score(best, parent_player, parent_visits);
        for &c in &children[1..] {
            let score = self.puct_score(c, parent_player, parent_visits);
            if score > best_score {
                best = c;
                best_score = score;
            }
        }
        best
    }

    fn puct_score(&self, child_id: NodeId, parent_player: Player, parent_visits: f64) -> f64 {
        let node = &self.nodes[child_id];
        let q = if node.visits == 0 {
            0.0
        } else {
            let wins = match parent_player {
                Player::Black => node.black_wins,
                Player::White => node.white_wins,
            };
            wins as f64 / node.visits as f64
        };
        let u = C_PUCT * node.prior * parent_visits.sqrt() / (1.0 + node.visits as f64);
        q + u
    }

    /// The root's most-visited child — ties broken by first-encountered
    /// (stable) child order (`max_by_key` would keep the *last* of equally
    /// visited children instead).
    fn best_child(&self) -> NodeId {
        let root = &self.nodes[Self::ROOT];
        let mut children = root.children.iter().copied();
        let mut best = children
            .next()
            .expect("best_move called before any iterations expanded the root");
        let mut best_visits = self.nodes[best].visits;
        for c in children {
            if self.nodes[c].visits > best_visits {
                best = c;
                best_visits = self.nodes[c].visits;
            }
        }
        best
    }

    /// The root's most-visited child's action — the search's chosen move.
    pub fn best_move(&self) -> Point {
        self.nodes[self.best_child()].action
    }

    /// Black's estimated win rate at the chosen (most-visited) child,
    /// `Wᵦ/N` of that child rather than the root's own average — used by
    /// the time-limited driver's `evaluate_move`. Safe to call even if the
    /// deadline tripped before the root was ever expanded (0.5, same as an
    /// unvisited child).
    pub fn best_child_black_win_rate(&self) -> f32 {
        if self.nodes[Self::ROOT].children.is_empty() {
            return 0.5;
        }
        let child = &self.nodes[self.best_child()];
        if child.visits == 0 {
            return 0.5;
        }
        child.black_wins as f32 / child.visits as f32
    }

    /// Print one line per child of `id` to stderr: the move, visit count,
    /// win tally, and win rate, all from the perspective of `id`'s side to
    /// move (the same convention `puct_score` uses for `Q`). Meant to be
    /// called by hand while chasing down a search that picked a move that
    /// looks wrong.
    pub fn dump_children(&self, id: NodeId) {
        let node = &self.nodes[id];
        let mover = node.state.side_to_move;
        for &c in &node.children {
            let child = &self.nodes[c];
            let wins = match mover {
                Player::Black => child.black_wins,
                Player::White => child.white_wins,
            };
            eprintln!(
                "move {} v={} w={} wr={:.3}",
                crate::board::str_coord(child.action),
                child.visits,
                wins,
                if child.visits == 0 {
                    0.0
                } else {
                    wins as f64 / child.visits as f64
                },
            );
        }
    }

    /// Visit-share policy target over the root's children, used by the
    /// Recording driver to produce a training label.
    pub fn visit_share(&self) -> [f32; POLICY_LEN] {
        let root = &self.nodes[Self::ROOT];
        let total: u64 = root.children.iter().map(|&c| self.nodes[c].visits).sum();
        let mut out = [0.0_f32; POLICY_LEN];
        if total == 0 {
            return out;
        }
        for &c in &root.children {
            let child = &self.nodes[c];
            let idx = match child.action {
                Point::Pass => PASS_INDEX,
                Point::Coord(_, _) => child.action.index(),
            };
            out[idx] = child.visits as f32 / total as f32;
        }
        out
    }
}
