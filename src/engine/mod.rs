//! Engine façade.
//!
//! Owns the board, the searcher (with its transposition table) and the
//! growable snapshot stack. A front end or protocol adaptor drives the
//! game exclusively through this type: set a position, query legal
//! moves, apply a chosen move, or start a search.
//!
//! Threading contract: `think` may run on a worker thread while another
//! thread signals [`Engine::stop_handle`]; no other engine operation may
//! be invoked concurrently with a running search.

use crate::board::{Board, FenError, Move, MoveList, StateInfo};
use crate::search::{InfoCallback, SearchLimits, Searcher};
use crate::sync::StopFlag;
use crate::tt::DEFAULT_TT_MB;

/// A chess engine: board, searcher and per-ply snapshot stack.
pub struct Engine {
    board: Board,
    searcher: Searcher,
    states: Vec<StateInfo>,
}

impl Engine {
    /// Engine with the default transposition-table size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tt_size(DEFAULT_TT_MB)
    }

    /// Engine with a transposition table of the given size in MiB.
    #[must_use]
    pub fn with_tt_size(tt_mb: usize) -> Self {
        Engine {
            board: Board::new(),
            searcher: Searcher::with_tt_size(tt_mb),
            states: Vec::new(),
        }
    }

    /// Reset to the initial position and clear the transposition table.
    pub fn new_game(&mut self) {
        self.set_startpos();
        self.searcher.clear_tt();
    }

    /// Reset the board to the initial position, keeping the table.
    pub fn set_startpos(&mut self) {
        self.board = Board::new();
        self.states.clear();
    }

    /// Set the position from a FEN string. On error the current position
    /// is left unchanged.
    pub fn set_position(&mut self, fen: &str) -> Result<(), FenError> {
        let board = Board::try_from_fen(fen)?;
        self.board = board;
        self.states.clear();
        Ok(())
    }

    /// Apply a move if it is legal. Returns `false` (leaving the board
    /// unchanged) otherwise.
    pub fn apply_move(&mut self, mv: Move) -> bool {
        if !self.board.legal_moves().contains(mv) {
            return false;
        }
        let prev = self.board.make_move(mv);
        self.states.push(prev);
        true
    }

    /// Parse a UCI move string and apply it if legal.
    pub fn apply_uci_move(&mut self, uci: &str) -> bool {
        match Move::from_uci(uci, &self.board) {
            Ok(mv) => self.apply_move(mv),
            Err(_) => false,
        }
    }

    /// Legal moves in the current position.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        self.board.legal_moves()
    }

    /// Search the current position. Returns the best move of the deepest
    /// completed iteration, or `None` from a terminal position.
    pub fn think(&mut self, limits: &SearchLimits, info_cb: Option<InfoCallback>) -> Option<Move> {
        self.searcher
            .search(&mut self.board, limits, &mut self.states, info_cb.as_ref())
    }

    /// Signal a running search to stop.
    pub fn stop_thinking(&self) {
        self.searcher.stop();
    }

    /// A stop handle that can be cloned out before moving the engine to
    /// a worker thread.
    #[must_use]
    pub fn stop_handle(&self) -> StopFlag {
        self.searcher.stop_flag()
    }

    /// The current position. Not safe to read concurrently with a
    /// running search: the searcher mutates the board in place.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Resize the transposition table, clearing it.
    pub fn resize_tt(&mut self, size_mb: usize) {
        self.searcher.resize_tt(size_mb);
    }

    /// No legal moves and the king is attacked.
    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.board.legal_moves().is_empty() && self.board.in_check()
    }

    /// No legal moves and the king is not attacked.
    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        self.board.legal_moves().is_empty() && !self.board.in_check()
    }

    /// Stalemate or the fifty-move rule.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.is_stalemate() || self.board.halfmove_clock() >= 100
    }

    /// The game has ended: no legal moves, or the fifty-move rule.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.board.legal_moves().is_empty() || self.board.halfmove_clock() >= 100
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
