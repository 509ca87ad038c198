//! Mate-finding battery: positions with a forced mate in one.

use rookery::engine::Engine;
use rookery::search::SearchLimits;

fn best_move(fen: &str) -> String {
    let mut engine = Engine::with_tt_size(16);
    engine.set_position(fen).expect("test FEN should parse");
    engine
        .think(&SearchLimits::depth(3), None)
        .expect("position has legal moves")
        .to_string()
}

#[test]
fn back_rank_with_rook() {
    assert_eq!(best_move("6k1/5ppp/8/8/8/8/8/R6K w - - 0 1"), "a1a8");
}

#[test]
fn queen_supported_by_bishop() {
    // Scholar's mate strike
    assert_eq!(
        best_move("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 0 4"),
        "h5f7"
    );
}

#[test]
fn promotion_delivers_mate() {
    // Promoting on f8 mates the cornered king; rook and queen both do,
    // so assert the outcome rather than the exact piece
    let mut engine = Engine::with_tt_size(16);
    engine.set_position("7k/5P2/6K1/8/8/8/8/8 w - - 0 1").unwrap();
    let best = engine
        .think(&SearchLimits::depth(3), None)
        .expect("position has legal moves");
    assert!(best.is_promotion(), "expected a promotion, got {best}");
    assert!(engine.apply_move(best));
    assert!(engine.is_checkmate());
}

#[test]
fn black_mates_too() {
    // Mirror of the back-rank pattern, black to move
    assert_eq!(best_move("r6k/8/8/8/8/8/5PPP/6K1 b - - 0 1"), "a8a1");
}
