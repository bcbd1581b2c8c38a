//! Core MCTS search algorithm.
//!
//! Each iteration runs four phases against a tree owned by the call:
//! 1. Selection: descend from the root with the selection policy until a
//!    node without children is reached
//! 2. Expansion: add one child per legal action, then pick one of them
//!    uniformly at random as the node to evaluate
//! 3. Evaluation: a terminal node yields its stored reward, anything else is
//!    the mean of several random playouts
//! 4. Backpropagation: update visits and values from the evaluated node up
//!    to the root

use std::time::Instant;

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::core::{GameRng, PlayerId};
use crate::rules::TwoPlayerGame;

use super::config::MCTSConfig;
use super::error::SearchError;
use super::node::{Edge, MCTSNode, NodeId};
use super::policy::{RandomRollout, SelectionPolicy, SimulationPolicy, UCB1};
use super::stats::SearchStats;
use super::tree::MCTSTree;

/// Search tree specialised to a game's state and action types.
pub type GameTree<G> = MCTSTree<<G as TwoPlayerGame>::State, <G as TwoPlayerGame>::Action>;

/// Main MCTS search context.
///
/// Generic over the game type. Owns the game, configuration and RNG; every
/// call to [`MCTSSearch::search`] builds and returns a fresh tree.
pub struct MCTSSearch<G: TwoPlayerGame> {
    /// The game rules.
    game: G,

    /// Search configuration.
    config: MCTSConfig,

    /// RNG for tie-breaking, expansion picks and rollouts.
    rng: GameRng,

    /// Selection policy.
    selection: Box<dyn SelectionPolicy>,

    /// Simulation policy.
    simulation: Box<dyn SimulationPolicy<G>>,

    /// Statistics of the most recent search.
    stats: SearchStats,
}

impl<G: TwoPlayerGame> MCTSSearch<G> {
    /// Create a new MCTS search context.
    ///
    /// Fails if the configuration is invalid. A zero exploration constant is
    /// accepted with a warning.
    pub fn new(game: G, config: MCTSConfig) -> Result<Self, SearchError> {
        config.validate()?;
        if config.is_pure_exploitation() {
            warn!("exploration constant is 0, UCT degrades to pure exploitation");
        }

        Ok(Self {
            game,
            rng: GameRng::new(config.seed),
            config,
            selection: Box::new(UCB1),
            simulation: Box::new(RandomRollout),
            stats: SearchStats::default(),
        })
    }

    /// Replace the RNG seeded from the config.
    pub fn with_rng(mut self, rng: GameRng) -> Self {
        self.rng = rng;
        self
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<S: SimulationPolicy<G> + 'static>(mut self, simulation: S) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Run exactly `iterations` MCTS iterations from `state` with `to_move`
    /// to act, evaluating each new leaf with `rollouts` random playouts.
    ///
    /// Returns the finished tree. Any error aborts the search; the partial
    /// tree is dropped.
    pub fn search(
        &mut self,
        state: &G::State,
        to_move: PlayerId,
        iterations: u32,
        rollouts: u32,
    ) -> Result<GameTree<G>, SearchError> {
        if rollouts == 0 {
            return Err(SearchError::ZeroRollouts);
        }

        let start = Instant::now();
        self.stats.reset();
        debug!(iterations, rollouts, player = %to_move, "starting search");

        let mut tree = MCTSTree::new(state.clone(), to_move);
        for iteration in 0..iterations {
            self.iteration(&mut tree, rollouts)?;
            self.stats.iterations += 1;
            trace!(iteration, nodes = tree.len(), "iteration complete");
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            nodes = tree.len(),
            simulations = self.stats.simulations,
            max_depth = self.stats.max_depth,
            time_us = self.stats.time_us,
            "search finished"
        );

        Ok(tree)
    }

    /// Search from `state` and return the root action whose child has the
    /// lowest mean value.
    ///
    /// Fails with [`SearchError::NoLegalActions`] when `to_move` has nothing
    /// to play, and with [`SearchError::ZeroIterations`] when no iteration
    /// would run.
    pub fn pick_best_action(
        &mut self,
        state: &G::State,
        to_move: PlayerId,
        iterations: u32,
        rollouts: u32,
    ) -> Result<G::Action, SearchError> {
        if self.game.legal_actions(to_move, state).is_empty() {
            return Err(SearchError::NoLegalActions { player: to_move });
        }
        if iterations == 0 {
            return Err(SearchError::ZeroIterations);
        }

        let tree = self.search(state, to_move, iterations, rollouts)?;
        tree.best_action()
            .copied()
            .ok_or(SearchError::NoLegalActions { player: to_move })
    }

    /// Single MCTS iteration: select, expand, evaluate, backpropagate.
    fn iteration(&mut self, tree: &mut GameTree<G>, rollouts: u32) -> Result<(), SearchError> {
        let leaf = self.select(tree);

        let target = if tree.get(leaf).is_terminal() {
            leaf
        } else {
            self.expand(tree, leaf)?;
            let edges = tree.get(leaf).edges();
            edges[self.rng.pick_index(edges.len())].child
        };

        let value = self.evaluate(tree, target, rollouts)?;
        Self::backpropagate(tree, target, value);
        Ok(())
    }

    /// Descend from the root until a node without children.
    fn select(&mut self, tree: &GameTree<G>) -> NodeId {
        let mut current = tree.root();

        while tree.get(current).is_expanded() {
            let children = tree.child_stats(current);
            let idx = self.selection.select(
                tree.get(current).visits(),
                &children,
                self.config.exploration_constant,
                &mut self.rng,
            );
            current = tree.edge(current, idx).child;
        }

        current
    }

    /// Add one child per legal action of a non-terminal leaf.
    fn expand(&mut self, tree: &mut GameTree<G>, node_id: NodeId) -> Result<(), SearchError> {
        let node = tree.get(node_id);
        let player = node.to_move();
        let depth = node.depth().saturating_add(1);
        let actions = self.game.legal_actions(player, node.state());

        if actions.is_empty() {
            return Err(SearchError::NoLegalActions { player });
        }

        let mut edges = SmallVec::with_capacity(actions.len());
        for action in actions {
            let transition = self
                .game
                .apply_action(player, action, tree.get(node_id).state())
                .map_err(SearchError::game)?;

            let child = tree.alloc(MCTSNode::new(
                transition.state,
                player.opponent(),
                node_id,
                depth,
                transition.done,
                transition.reward,
            ));
            edges.push(Edge { action, child });
        }
        tree.get_mut(node_id).set_edges(edges);

        self.stats.nodes_expanded += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        Ok(())
    }

    /// Value of a node: its terminal reward, or the mean of `rollouts`
    /// random playouts.
    fn evaluate(&mut self, tree: &GameTree<G>, node_id: NodeId, rollouts: u32) -> Result<f64, SearchError> {
        let node = tree.get(node_id);
        if node.is_terminal() {
            self.stats.terminal_evaluations += 1;
            return Ok(node.terminal_reward());
        }

        let mut sim_rng = self.rng.fork();
        let mut total = 0.0;
        for _ in 0..rollouts {
            total += self
                .simulation
                .simulate(&self.game, node.state(), node.to_move(), &mut sim_rng)?;
            self.stats.simulations += 1;
        }

        Ok(total / rollouts as f64)
    }

    /// Record `value` on every node from `node_id` up to the root.
    fn backpropagate(tree: &mut GameTree<G>, node_id: NodeId, value: f64) {
        let mut current = node_id;
        while !current.is_none() {
            let node = tree.get_mut(current);
            node.record(value);
            current = node.parent();
        }
    }

    /// Get search statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the game reference.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Get the configuration.
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }
}
