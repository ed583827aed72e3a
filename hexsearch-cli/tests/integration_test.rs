//! Integration tests for the HEXSEARCH engine
//!
//! Tests the full stack: board model, hashing, evaluation, ordering and search

use hexsearch_core::{
    board::{Board, Player},
    ai::{find_best_move, negamax, search, AlphaBetaAI, TranspositionCache, INFINITY},
    config::SearchConfig,
    eval::{evaluate, shortest_connection_distance, WIN_SCORE},
    ordering::score_moves,
    zobrist::{ZobristTable, DEFAULT_SEED},
    HexError,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Board with the given stones applied in order
fn board_with(size: usize, stones: &[(usize, Player)]) -> Board {
    let mut board = Board::new(size).unwrap();
    for &(cell, player) in stones {
        board.apply(cell, player).unwrap();
    }
    board
}

/// Random non-terminal position: `pairs` stones for each player on a 4x4 board
fn random_position(rng: &mut ChaCha8Rng, pairs: usize) -> Board {
    let mut cells: Vec<usize> = (0..16).collect();
    cells.shuffle(rng);
    let mut board = Board::new(4).unwrap();
    for (i, &cell) in cells.iter().take(pairs * 2).enumerate() {
        let player = if i % 2 == 0 { Player::One } else { Player::Two };
        board.apply(cell, player).unwrap();
    }
    board
}

// ============================================================================
// BOARD MODEL TESTS
// ============================================================================

#[test]
fn test_win_detection_row_chain() {
    let full = board_with(
        4,
        &[(0, Player::Two), (1, Player::Two), (2, Player::Two), (3, Player::Two)],
    );
    assert!(full.check_winner(Player::Two), "chain reaching column 3 wins");

    let short = board_with(4, &[(0, Player::Two), (1, Player::Two), (2, Player::Two)]);
    assert!(!short.check_winner(Player::Two), "chain stopping at column 2 does not");
}

#[test]
fn test_illegal_move_rejected() {
    let mut board = board_with(4, &[(7, Player::One)]);
    let err = board.apply(7, Player::Two).unwrap_err();
    assert!(matches!(err, HexError::IllegalMove { cell: 7 }));
    assert_eq!(err.to_string(), "Illegal move: cell 7 is already occupied");
}

// ============================================================================
// HASHING TESTS
// ============================================================================

#[test]
fn test_hash_order_independence() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let zobrist = ZobristTable::new(16, DEFAULT_SEED);

    let mut stones: Vec<(usize, Player)> = (0..8)
        .map(|i| (i * 2, if i % 2 == 0 { Player::One } else { Player::Two }))
        .collect();
    let reference = zobrist.hash(&board_with(4, &stones));

    for _ in 0..10 {
        stones.shuffle(&mut rng);
        assert_eq!(zobrist.hash(&board_with(4, &stones)), reference);
    }
}

// ============================================================================
// EVALUATION & ORDERING TESTS
// ============================================================================

#[test]
fn test_connection_distance_scenarios() {
    let top_row = board_with(
        4,
        &[(0, Player::One), (1, Player::One), (2, Player::One), (3, Player::One)],
    );
    assert_eq!(shortest_connection_distance(&top_row, Player::One), None);
    assert_eq!(evaluate(&top_row, Player::One), 0);

    let column = board_with(
        4,
        &[(1, Player::One), (5, Player::One), (9, Player::One), (13, Player::One)],
    );
    assert_eq!(shortest_connection_distance(&column, Player::One), Some(3));
}

#[test]
fn test_ordering_center_vs_corner() {
    let mut board = Board::new(4).unwrap();
    let moves = board.legal_moves();
    let scores = score_moves(&mut board, &moves, Player::One);
    let score = |cell: usize| scores.iter().find(|(c, _)| *c == cell).map(|(_, s)| *s).unwrap();

    for corner in [0, 3, 12, 15] {
        for center in [5, 6, 9, 10] {
            assert!(score(center) >= score(corner));
        }
    }
}

// ============================================================================
// SEARCH TESTS
// ============================================================================

#[test]
fn test_search_restores_random_positions() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let zobrist = ZobristTable::new(16, DEFAULT_SEED);

    for _ in 0..5 {
        let mut board = random_position(&mut rng, 2);
        let before = board.clone();
        let mv = find_best_move(&mut board, Player::One, 2, &zobrist, None);
        assert_eq!(board, before);
        assert!(mv.map_or(false, |cell| board.is_legal(cell)));
    }
}

#[test]
fn test_pruning_equivalence_random_positions() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for _ in 0..5 {
        let mut board = random_position(&mut rng, 2);
        let zobrist = ZobristTable::for_board(&board, DEFAULT_SEED);
        for player in [Player::One, Player::Two] {
            let pruned = search(
                &mut board,
                player,
                &SearchConfig::with_depth(2),
                &zobrist,
                &mut TranspositionCache::default(),
            );
            let full = search(
                &mut board,
                player,
                &SearchConfig::with_depth(2).full_width(),
                &zobrist,
                &mut TranspositionCache::default(),
            );
            assert_eq!(pruned.score, full.score);
        }
    }
}

#[test]
fn test_terminal_reported_for_loser() {
    // Player Two owns row 1 end to end
    let mut board = board_with(
        4,
        &[(4, Player::Two), (5, Player::Two), (6, Player::Two), (7, Player::Two)],
    );
    let zobrist = ZobristTable::for_board(&board, DEFAULT_SEED);

    for depth in 1..=3 {
        let mut cache = TranspositionCache::default();
        let (score, mv) = negamax(&mut board, depth, -INFINITY, INFINITY, Player::One, &zobrist, &mut cache);
        assert_eq!(score, -WIN_SCORE + depth as i32);
        assert_eq!(mv, None);
    }
}

#[test]
fn test_provided_cache_is_filled() {
    let mut board = board_with(4, &[(5, Player::One), (10, Player::Two)]);
    let zobrist = ZobristTable::for_board(&board, DEFAULT_SEED);
    let mut cache = TranspositionCache::default();

    let first = find_best_move(&mut board, Player::One, 2, &zobrist, Some(&mut cache));
    let hash = zobrist.hash(&board);
    assert!(cache.contains_key(&(hash, Player::One, 2)));

    let second = find_best_move(&mut board, Player::One, 2, &zobrist, Some(&mut cache));
    assert_eq!(first, second);
}

#[test]
fn test_self_play_has_a_winner() {
    let mut ai = AlphaBetaAI::new(3, SearchConfig::with_depth(3));
    let (board, history) = ai.play_game(Board::new(3).unwrap(), Player::One);

    let last_mover = if history.len() % 2 == 1 { Player::One } else { Player::Two };
    assert!(board.check_winner(last_mover));
    assert!(!board.check_winner(last_mover.opponent()));
}
