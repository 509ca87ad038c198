//! Board representation, move generation and evaluation.

mod attack_tables;
mod error;
mod eval;
mod fen;
mod make_unmake;
mod movegen;
mod pst;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::{FenError, MoveParseError, SquareError};
pub use state::{Board, StateInfo};
pub use types::{
    Bitboard, CastlingRights, Color, Move, MoveList, Piece, ScoredMove, ScoredMoveList, Square,
};

pub(crate) use pst::PIECE_VALUES;
