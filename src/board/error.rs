//! Errors surfaced while parsing positions, squares and moves.

use std::fmt;

/// Reasons a FEN string is rejected.
///
/// The placement-field problems come first, then the per-field ones in
/// the order the fields appear in a FEN string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// The placement field named more than eight ranks
    RankOverflow { rank: usize },
    /// A rank in the placement field ran past the h-file
    FileOverflow { rank: usize },
    /// A letter in the placement field named no piece
    UnknownPiece { letter: char },
    /// Fewer than the four mandatory fields were present
    MissingFields { found: usize },
    /// The side-to-move field was neither `w` nor `b`
    BadSideToMove { field: String },
    /// A castling flag other than `K`, `Q`, `k`, `q` or `-`
    UnknownCastlingFlag { letter: char },
    /// The en passant field named no parseable square
    BadEnPassantSquare { field: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::RankOverflow { rank } => {
                write!(f, "FEN placement holds more than eight ranks (rank index {rank})")
            }
            FenError::FileOverflow { rank } => {
                write!(f, "rank {rank} of the FEN placement runs past the h-file")
            }
            FenError::UnknownPiece { letter } => {
                write!(f, "'{letter}' names no piece in the FEN placement")
            }
            FenError::MissingFields { found } => {
                write!(f, "a FEN needs its four mandatory fields, got {found}")
            }
            FenError::BadSideToMove { field } => {
                write!(f, "side to move must be 'w' or 'b', got '{field}'")
            }
            FenError::UnknownCastlingFlag { letter } => {
                write!(f, "'{letter}' is not a castling flag")
            }
            FenError::BadEnPassantSquare { field } => {
                write!(f, "'{field}' is not an en passant square")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Reasons a UCI move string is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// UCI moves are four characters, five with a promotion piece
    WrongLength { len: usize },
    /// One of the two square names did not parse
    BadSquare { text: String },
    /// The trailing character named no promotable piece
    BadPromotionPiece { letter: char },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::WrongLength { len } => {
                write!(f, "a UCI move has 4 or 5 characters, got {len}")
            }
            MoveParseError::BadSquare { text } => {
                write!(f, "'{text}' does not name two board squares")
            }
            MoveParseError::BadPromotionPiece { letter } => {
                write!(f, "cannot promote a pawn to '{letter}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Reason an algebraic square name is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Not a file letter `a`-`h` followed by a rank digit `1`-`8`
    NotASquare { text: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let SquareError::NotASquare { text } = self;
        write!(f, "'{text}' is not a square in a1..h8 form")
    }
}

impl std::error::Error for SquareError {}
