//! MCTS integration tests using tic-tac-toe.

use proptest::prelude::*;
use tracing_subscriber::EnvFilter;

use two_player_mcts::core::{GameRng, PlayerId};
use two_player_mcts::games::tictactoe::{Board, TicTacToe, TicTacToeError};
use two_player_mcts::mcts::{GameTree, MCTSConfig, MCTSSearch, SearchError};
use two_player_mcts::rules::{Transition, TwoPlayerGame};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn search_with_seed(seed: u64) -> MCTSSearch<TicTacToe> {
    MCTSSearch::new(TicTacToe::new(), MCTSConfig::default().with_seed(seed)).unwrap()
}

/// Check the structural invariants every finished tree must satisfy.
fn assert_tree_invariants(tree: &GameTree<TicTacToe>, iterations: u32) {
    assert_eq!(tree.root_node().visits(), iterations);

    for (id, node) in tree.iter() {
        if node.visits() == 0 {
            assert_eq!(node.accumulated_value(), 0.0, "unvisited {} has value", id);
        }

        if node.is_terminal() {
            assert!(!node.is_expanded(), "terminal {} was expanded", id);
            let expected = node.visits() as f64 * node.to_move().sign() * node.terminal_reward();
            assert_eq!(node.accumulated_value(), expected, "terminal {} was averaged", id);
        }

        let child_visits: u32 = tree.children(id).map(|(_, child)| child.visits()).sum();
        assert!(child_visits <= node.visits());

        if !node.parent().is_none() {
            let parent = tree.get(node.parent());
            assert!(node.visits() <= parent.visits());
            assert_eq!(node.to_move(), parent.to_move().opponent());
            assert_eq!(node.depth(), parent.depth() + 1);
        }
    }
}

// =============================================================================
// Basic Search Tests
// =============================================================================

#[test]
fn test_mcts_returns_action() {
    let game = TicTacToe::new();
    let (board, to_move) = game.initial_state();

    let mut search = MCTSSearch::new(game, MCTSConfig::default()).unwrap();
    let action = search.pick_best_action(&board, to_move, 100, 5).unwrap();

    assert!(action < 9, "MCTS should return a board cell");
}

#[test]
fn test_root_visits_equal_budget() {
    let mut search = search_with_seed(3);
    let tree = search.search(&Board::new(), PlayerId::FIRST, 500, 2).unwrap();

    assert_tree_invariants(&tree, 500);
    assert_eq!(search.stats().iterations, 500);
}

#[test]
fn test_single_iteration_visits_one_child() {
    let mut search = search_with_seed(11);
    let tree = search.search(&Board::new(), PlayerId::FIRST, 1, 1).unwrap();

    let visits = tree.action_visits();
    assert_eq!(visits.len(), 9);
    assert_eq!(visits.iter().filter(|(_, v)| *v == 1).count(), 1);
    assert_eq!(visits.iter().filter(|(_, v)| *v == 0).count(), 8);
    assert_eq!(tree.root_node().visits(), 1);

    let stats = search.stats();
    assert_eq!(stats.nodes_expanded, 1);
    assert_eq!(stats.simulations, 1);
}

#[test]
fn test_second_iteration_explores_unvisited_child_uniformly() {
    // After two iterations exactly two distinct root children carry one
    // visit each; across seeds every cell should be hit about 2/9 of the time.
    let mut counts = [0u32; 9];
    for seed in 0..900 {
        let mut search = search_with_seed(seed);
        let tree = search.search(&Board::new(), PlayerId::FIRST, 2, 1).unwrap();

        let visited: Vec<usize> = tree
            .action_visits()
            .into_iter()
            .filter(|(_, v)| *v > 0)
            .map(|(a, v)| {
                assert_eq!(v, 1);
                *a
            })
            .collect();
        assert_eq!(visited.len(), 2);
        for cell in visited {
            counts[cell] += 1;
        }
    }

    for count in counts {
        assert!((140..=260).contains(&count), "counts {:?}", counts);
    }
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[test]
fn test_mcts_deterministic_with_seed() {
    let mut search1 = search_with_seed(12345);
    let mut search2 = search_with_seed(12345);

    let tree1 = search1.search(&Board::new(), PlayerId::FIRST, 300, 3).unwrap();
    let tree2 = search2.search(&Board::new(), PlayerId::FIRST, 300, 3).unwrap();

    assert_eq!(
        serde_json::to_string(&tree1).unwrap(),
        serde_json::to_string(&tree2).unwrap(),
        "Same seed should produce the same tree"
    );
}

#[test]
fn test_mcts_different_seeds_differ() {
    let mut search1 = search_with_seed(111);
    let mut search2 = search_with_seed(222);

    let tree1 = search1.search(&Board::new(), PlayerId::FIRST, 300, 3).unwrap();
    let tree2 = search2.search(&Board::new(), PlayerId::FIRST, 300, 3).unwrap();

    assert_ne!(tree1, tree2);
}

#[test]
fn test_injected_rng() {
    let mut search1 = search_with_seed(0).with_rng(GameRng::new(77));
    let mut search2 = search_with_seed(77);

    let tree1 = search1.search(&Board::new(), PlayerId::FIRST, 100, 2).unwrap();
    let tree2 = search2.search(&Board::new(), PlayerId::FIRST, 100, 2).unwrap();

    assert_eq!(tree1, tree2);
}

// =============================================================================
// Terminal Handling
// =============================================================================

#[test]
fn test_terminal_child_is_never_expanded_or_rolled_out() {
    // X X .
    // O O X
    // X O O    X to move: the only cell wins.
    let board = Board::from_rows([[1, 1, 0], [2, 2, 1], [1, 2, 2]]);
    let mut search = search_with_seed(5);
    let tree = search.search(&board, PlayerId::FIRST, 5, 3).unwrap();

    assert_eq!(tree.len(), 2);
    let (action, child) = tree.children(tree.root()).next().unwrap();
    assert_eq!(*action, 2);
    assert!(child.is_terminal());
    assert!(!child.is_expanded());
    assert_eq!(child.terminal_reward(), 1.0);
    assert_eq!(child.visits(), 5);
    assert_eq!(child.accumulated_value(), -5.0);
    assert_eq!(tree.root_node().accumulated_value(), 5.0);

    let stats = search.stats();
    assert_eq!(stats.simulations, 0);
    assert_eq!(stats.terminal_evaluations, 5);
}

#[test]
fn test_immediate_win_is_taken() {
    // . X X
    // O O .
    // . . .    X to move and can win at 0.
    let board = Board::from_rows([[0, 1, 1], [2, 2, 0], [0, 0, 0]]);
    let mut search = search_with_seed(8);

    let action = search.pick_best_action(&board, PlayerId::FIRST, 1000, 5).unwrap();
    assert_eq!(action, 0);
}

// =============================================================================
// Blocking
// =============================================================================

fn block_frequency(board: Board, to_move: PlayerId, block: usize) -> usize {
    (0..10)
        .filter(|&seed| {
            let mut search = search_with_seed(seed);
            search.pick_best_action(&board, to_move, 2000, 5).unwrap() == block
        })
        .count()
}

#[test]
fn test_player_one_blocks_two_in_a_row() {
    // X X .
    // . O .
    // . . .    O to move must block at 2.
    let board = Board::from_rows([[1, 1, 0], [0, 2, 0], [0, 0, 0]]);
    let hits = block_frequency(board, PlayerId::SECOND, 2);
    assert!(hits >= 9, "blocked in only {} of 10 runs", hits);
}

#[test]
fn test_player_zero_blocks_two_in_a_row() {
    // O O .
    // . X .
    // . . X    X to move must block at 2.
    let board = Board::from_rows([[2, 2, 0], [0, 1, 0], [0, 0, 1]]);
    let hits = block_frequency(board, PlayerId::FIRST, 2);
    assert!(hits >= 9, "blocked in only {} of 10 runs", hits);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_negative_exploration_rejected() {
    let config = MCTSConfig::default().with_exploration(-0.1);
    let err = MCTSSearch::new(TicTacToe::new(), config).err().unwrap();
    assert!(matches!(err, SearchError::Config(_)));
}

#[test]
fn test_zero_exploration_still_searches() {
    init_tracing();
    let config = MCTSConfig::default().with_exploration(0.0);
    let mut search = MCTSSearch::new(TicTacToe::new(), config).unwrap();

    let tree = search.search(&Board::new(), PlayerId::FIRST, 200, 2).unwrap();
    assert_tree_invariants(&tree, 200);
}

#[test]
fn test_mcts_config_serialization() {
    let config = MCTSConfig::default().with_exploration(2.0).with_seed(999);

    let json = serde_json::to_string(&config).unwrap();
    let deserialized: MCTSConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(config, deserialized);
}

// =============================================================================
// Contract Violations
// =============================================================================

#[test]
fn test_no_legal_actions_at_root() {
    let full = Board::from_rows([[1, 2, 1], [1, 2, 2], [2, 1, 1]]);
    let mut search = search_with_seed(1);

    let err = search.pick_best_action(&full, PlayerId::FIRST, 10, 1).unwrap_err();
    assert!(matches!(
        err,
        SearchError::NoLegalActions { player } if player == PlayerId::FIRST
    ));

    // Searching a non-terminal root with no moves is also a contract violation.
    let err = search.search(&full, PlayerId::FIRST, 10, 1).unwrap_err();
    assert!(matches!(err, SearchError::NoLegalActions { .. }));
}

/// Tic-tac-toe that always claims cell 0 is legal.
struct StuckOnZero(TicTacToe);

impl TwoPlayerGame for StuckOnZero {
    type State = Board;
    type Action = usize;
    type Error = TicTacToeError;

    fn initial_state(&self) -> (Board, PlayerId) {
        self.0.initial_state()
    }

    fn legal_actions(&self, _player: PlayerId, _state: &Board) -> Vec<usize> {
        vec![0]
    }

    fn apply_action(&self, player: PlayerId, action: usize, state: &Board) -> Result<Transition<Board>, TicTacToeError> {
        self.0.apply_action(player, action, state)
    }
}

#[test]
fn test_illegal_transition_surfaces_game_error() {
    let mut search = MCTSSearch::new(StuckOnZero(TicTacToe::new()), MCTSConfig::default()).unwrap();
    let err = search.search(&Board::new(), PlayerId::FIRST, 10, 1).unwrap_err();

    let source = match err {
        SearchError::Game(source) => source,
        other => panic!("expected a game error, got {:?}", other),
    };
    let cause = source.downcast_ref::<TicTacToeError>().unwrap();
    assert_eq!(cause, &TicTacToeError::CellOccupied { row: 0, col: 0 });
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_tree_invariants_hold(seed in any::<u64>(), iterations in 1u32..150, rollouts in 1u32..4) {
        let mut search = search_with_seed(seed);
        let tree = search.search(&Board::new(), PlayerId::FIRST, iterations, rollouts).unwrap();
        assert_tree_invariants(&tree, iterations);
    }

    #[test]
    fn prop_player_one_root_invariants_hold(seed in any::<u64>(), iterations in 1u32..150) {
        let board = Board::from_rows([[1, 0, 0], [0, 0, 0], [0, 0, 0]]);
        let mut search = search_with_seed(seed);
        let tree = search.search(&board, PlayerId::SECOND, iterations, 1).unwrap();
        assert_tree_invariants(&tree, iterations);
    }
}
