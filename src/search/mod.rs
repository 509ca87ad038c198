//! Iterative-deepening negamax alpha-beta search.
//!
//! The searcher walks the game tree with fail-hard alpha-beta, drops
//! into a captures-only quiescence search at the horizon, orders moves
//! with the transposition-table move followed by MVV-LVA captures and
//! promotions, and reports the best move of the deepest fully completed
//! iteration. Time and external stop requests are observed through a
//! shared atomic flag polled on a fixed node cadence.

use std::sync::Arc;
use std::time::Instant;

use crate::board::{Board, Move, MoveList, Piece, ScoredMoveList, StateInfo, PIECE_VALUES};
use crate::sync::StopFlag;
use crate::tt::{Bound, TranspositionTable, DEFAULT_TT_MB};

/// Mate score magnitude; mate-in-n is `VALUE_MATE - n`.
pub const VALUE_MATE: i32 = 32000;
/// Larger than any reachable score; used as the open alpha-beta window.
pub const VALUE_INFINITE: i32 = 32001;
/// Draw score.
pub const VALUE_DRAW: i32 = 0;
/// Scores at or above this magnitude are mate scores.
pub const MATE_IN_MAX_PLY: i32 = VALUE_MATE - 256;

/// Is `value` a mate-distance score?
#[inline]
#[must_use]
pub fn is_mate_score(value: i32) -> bool {
    value.abs() >= MATE_IN_MAX_PLY
}

/// Wall-clock is checked every this many node increments (power of two).
const CHECK_NODES: u64 = 2048;

const TT_MOVE_SCORE: i32 = 1_000_000;
const CAPTURE_SCORE: i32 = 100_000;
const PROMOTION_SCORE: i32 = 90_000;

/// Limits for one search invocation.
#[derive(Clone, Copy, Debug)]
pub struct SearchLimits {
    /// Maximum iterative-deepening depth.
    pub max_depth: u32,
    /// Wall-clock budget in milliseconds; 0 means no time limit.
    pub time_ms: u64,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            max_depth: 64,
            time_ms: 5000,
        }
    }
}

impl SearchLimits {
    /// Depth-only limits (no clock), e.g. for analysis and tests.
    #[must_use]
    pub fn depth(max_depth: u32) -> Self {
        SearchLimits {
            max_depth,
            time_ms: 0,
        }
    }
}

/// Per-iteration report passed to the info callback.
#[derive(Clone, Copy, Debug)]
pub struct SearchInfo {
    /// Completed depth.
    pub depth: u32,
    /// Score in centipawns from the side to move (mate scores per
    /// [`VALUE_MATE`] convention).
    pub score: i32,
    /// Best move of this iteration.
    pub best_move: Move,
    /// Nodes searched so far.
    pub nodes: u64,
}

/// Callback invoked from the search thread after each completed
/// iteration. Implementations that touch shared state must synchronise
/// themselves.
pub type InfoCallback = Arc<dyn Fn(&SearchInfo) + Send + Sync>;

/// The search worker. Owns the transposition table and the stop flag.
pub struct Searcher {
    tt: TranspositionTable,
    stop: StopFlag,
    nodes: u64,
    start: Instant,
    time_limit_ms: u64,
}

impl Searcher {
    #[must_use]
    pub fn new() -> Self {
        Self::with_tt_size(DEFAULT_TT_MB)
    }

    /// Create a searcher with a transposition table of the given size in
    /// MiB.
    #[must_use]
    pub fn with_tt_size(tt_mb: usize) -> Self {
        Searcher {
            tt: TranspositionTable::new(tt_mb),
            stop: StopFlag::new(),
            nodes: 0,
            start: Instant::now(),
            time_limit_ms: 0,
        }
    }

    /// A handle to the stop flag, safe to signal from another thread.
    #[must_use]
    pub fn stop_flag(&self) -> StopFlag {
        self.stop.clone()
    }

    /// Request the current search to stop.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Nodes searched by the last (or running) search.
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Resize the transposition table, clearing it.
    pub fn resize_tt(&mut self, size_mb: usize) {
        self.tt.resize(size_mb);
    }

    /// Clear the transposition table.
    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    /// Search the position with iterative deepening.
    ///
    /// Returns the best move of the deepest completed iteration, or
    /// `None` when the position has no legal moves or the very first
    /// iteration was aborted. Snapshots for the played-out lines are
    /// pushed onto and popped from `states`.
    pub fn search(
        &mut self,
        board: &mut Board,
        limits: &SearchLimits,
        states: &mut Vec<StateInfo>,
        info_cb: Option<&InfoCallback>,
    ) -> Option<Move> {
        self.stop.reset();
        self.nodes = 0;
        self.start = Instant::now();
        self.time_limit_ms = limits.time_ms;

        let mut best_move = None;

        for depth in 1..=limits.max_depth {
            let moves = board.legal_moves();
            if moves.is_empty() {
                break;
            }

            let tt_move = self.tt.probe(board.hash()).and_then(|e| e.best_move());
            let mut ordered = order_moves(board, &moves, tt_move);
            ordered.sort_by_score_desc();

            let mut alpha = -VALUE_INFINITE;
            let beta = VALUE_INFINITE;
            let mut iter_best = ordered.as_slice()[0].mv;
            let mut iter_score = -VALUE_INFINITE;

            for scored in ordered.iter() {
                let mv = scored.mv;
                states.push(board.make_move(mv));
                let score = -self.alpha_beta(board, -beta, -alpha, depth as i32 - 1, 1, states);
                let prev = states.pop().expect("search: state stack underflow");
                board.unmake_move(mv, prev);

                if self.stop.is_stopped() {
                    break;
                }
                if score > iter_score {
                    iter_score = score;
                    iter_best = mv;
                }
                if score > alpha {
                    alpha = score;
                }
            }

            if !self.stop.is_stopped() {
                best_move = Some(iter_best);
                #[cfg(feature = "logging")]
                log::debug!(
                    "depth {depth}: best {iter_best} score {iter_score} nodes {}",
                    self.nodes
                );
                if let Some(cb) = info_cb {
                    cb(&SearchInfo {
                        depth,
                        score: iter_score,
                        best_move: iter_best,
                        nodes: self.nodes,
                    });
                }
            }

            if self.stop.is_stopped() {
                break;
            }
            // A forced mate cannot improve with more depth
            if is_mate_score(alpha) {
                break;
            }
        }

        best_move
    }

    fn alpha_beta(
        &mut self,
        board: &mut Board,
        mut alpha: i32,
        beta: i32,
        depth: i32,
        ply: i32,
        states: &mut Vec<StateInfo>,
    ) -> i32 {
        if self.should_stop() {
            return 0;
        }

        let mut tt_move = None;
        if let Some(entry) = self.tt.probe(board.hash()) {
            tt_move = entry.best_move();
            if entry.depth() >= depth {
                match entry.bound() {
                    Bound::Exact => return entry.score(),
                    Bound::Upper if entry.score() <= alpha => return alpha,
                    Bound::Lower if entry.score() >= beta => return beta,
                    _ => {}
                }
            }
        }

        if depth <= 0 {
            return self.quiescence(board, alpha, beta, ply, states);
        }

        self.nodes += 1;

        let moves = board.legal_moves();
        if moves.is_empty() {
            // The ply offset makes nearer mates score higher
            return if board.in_check() {
                -VALUE_MATE + ply
            } else {
                VALUE_DRAW
            };
        }
        if board.halfmove_clock() >= 100 {
            return VALUE_DRAW;
        }

        let mut ordered = order_moves(board, &moves, tt_move);
        ordered.sort_by_score_desc();

        let mut best_move = ordered.as_slice()[0].mv;
        let mut bound = Bound::Upper;

        for scored in ordered.iter() {
            let mv = scored.mv;
            states.push(board.make_move(mv));
            let score = -self.alpha_beta(board, -beta, -alpha, depth - 1, ply + 1, states);
            let prev = states.pop().expect("search: state stack underflow");
            board.unmake_move(mv, prev);

            if self.stop.is_stopped() {
                return 0;
            }
            if score >= beta {
                self.tt.store(board.hash(), beta, depth, Bound::Lower, Some(mv));
                return beta;
            }
            if score > alpha {
                alpha = score;
                best_move = mv;
                bound = Bound::Exact;
            }
        }

        self.tt
            .store(board.hash(), alpha, depth, bound, Some(best_move));
        alpha
    }

    fn quiescence(
        &mut self,
        board: &mut Board,
        mut alpha: i32,
        beta: i32,
        ply: i32,
        states: &mut Vec<StateInfo>,
    ) -> i32 {
        if self.should_stop() {
            return 0;
        }
        self.nodes += 1;

        let stand_pat = board.evaluate();
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let captures = board.legal_captures();
        let mut ordered = order_moves(board, &captures, None);
        ordered.sort_by_score_desc();

        for scored in ordered.iter() {
            let mv = scored.mv;
            states.push(board.make_move(mv));
            let score = -self.quiescence(board, -beta, -alpha, ply + 1, states);
            let prev = states.pop().expect("quiescence: state stack underflow");
            board.unmake_move(mv, prev);

            if self.stop.is_stopped() {
                break;
            }
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }

    /// Poll the stop flag; on the node cadence, also check the clock and
    /// latch a timeout into the flag.
    fn should_stop(&mut self) -> bool {
        if self.stop.is_stopped() {
            return true;
        }
        if self.time_limit_ms > 0 && self.nodes & (CHECK_NODES - 1) == 0 {
            let elapsed = self.start.elapsed().as_millis() as u64;
            if elapsed >= self.time_limit_ms {
                self.stop.stop();
                return true;
            }
        }
        false
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Most-Valuable-Victim / Least-Valuable-Attacker capture score.
fn mvv_lva(board: &Board, mv: Move) -> i32 {
    let attacker = board
        .piece_at(mv.from())
        .map_or(Piece::Pawn, |(_, piece)| piece);
    let victim = if mv.is_en_passant() {
        Piece::Pawn
    } else {
        board
            .piece_at(mv.to())
            .map_or(Piece::Pawn, |(_, piece)| piece)
    };
    10 * PIECE_VALUES[victim.index()] - PIECE_VALUES[attacker.index()]
}

/// Score moves for ordering: TT move, then captures by MVV-LVA, then
/// promotions, then quiets.
fn order_moves(board: &Board, moves: &MoveList, tt_move: Option<Move>) -> ScoredMoveList {
    let mut scored = ScoredMoveList::new();
    for &mv in moves {
        let score = if Some(mv) == tt_move {
            TT_MOVE_SCORE
        } else if mv.is_capture() {
            CAPTURE_SCORE + mvv_lva(board, mv)
        } else if mv.is_promotion() {
            PROMOTION_SCORE
        } else {
            0
        };
        scored.push(mv, score);
    }
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn search_depth(fen: &str, depth: u32) -> Option<Move> {
        let mut board = Board::from_fen(fen);
        let mut searcher = Searcher::with_tt_size(16);
        let mut states = Vec::new();
        searcher.search(&mut board, &SearchLimits::depth(depth), &mut states, None)
    }

    #[test]
    fn test_finds_back_rank_mate() {
        let best = search_depth("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1", 4);
        assert_eq!(best.unwrap().to_string(), "e1e8");
    }

    #[test]
    fn test_no_move_when_checkmated() {
        let best = search_depth(
            "rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 3",
            4,
        );
        assert!(best.is_none());
    }

    #[test]
    fn test_no_move_when_stalemated() {
        let best = search_depth("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 4);
        assert!(best.is_none());
    }

    #[test]
    fn test_captures_free_queen() {
        // Undefended queen on d5 must be taken
        let best = search_depth("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1", 4);
        assert_eq!(best.unwrap().to_string(), "e4d5");
    }

    #[test]
    fn test_search_leaves_board_intact() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let mut board = Board::from_fen(fen);
        let mut searcher = Searcher::with_tt_size(16);
        let mut states = Vec::new();
        searcher.search(&mut board, &SearchLimits::depth(3), &mut states, None);
        assert_eq!(board.to_fen(), fen);
        assert!(states.is_empty());
    }

    #[test]
    fn test_mate_score_reported_through_callback() {
        use std::sync::atomic::{AtomicI32, Ordering};

        let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1");
        let mut searcher = Searcher::with_tt_size(16);
        let mut states = Vec::new();

        let last_score = Arc::new(AtomicI32::new(0));
        let sink = Arc::clone(&last_score);
        let cb: InfoCallback = Arc::new(move |info: &SearchInfo| {
            sink.store(info.score, Ordering::Relaxed);
        });
        searcher.search(
            &mut board,
            &SearchLimits::depth(4),
            &mut states,
            Some(&cb),
        );
        let score = last_score.load(Ordering::Relaxed);
        assert!(is_mate_score(score), "expected mate score, got {score}");
    }

    #[test]
    fn test_depth_only_search_is_deterministic() {
        let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";
        let first = search_depth(fen, 4);
        let second = search_depth(fen, 4);
        assert_eq!(first, second);
    }

    #[test]
    fn test_prefers_faster_mate() {
        // Mate in one available: score must be VALUE_MATE - 1
        let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1");
        let mut searcher = Searcher::with_tt_size(16);
        let mut states = Vec::new();
        let mv = board.legal_moves();
        let mate = mv.iter().find(|m| m.to_string() == "e1e8").copied().unwrap();
        states.push(board.make_move(mate));
        let moves_after = board.legal_moves();
        assert!(moves_after.is_empty() && board.in_check());
        let prev = states.pop().unwrap();
        board.unmake_move(mate, prev);
        // Direct search confirms the convention
        let cb_score = {
            use std::sync::atomic::{AtomicI32, Ordering};
            let last = Arc::new(AtomicI32::new(0));
            let sink = Arc::clone(&last);
            let cb: InfoCallback = Arc::new(move |info: &SearchInfo| {
                sink.store(info.score, Ordering::Relaxed);
            });
            searcher.search(&mut board, &SearchLimits::depth(3), &mut states, Some(&cb));
            last.load(Ordering::Relaxed)
        };
        assert_eq!(cb_score, VALUE_MATE - 1);
    }
}
