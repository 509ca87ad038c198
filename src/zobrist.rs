//! Zobrist hashing keys.
//!
//! One key per (color, piece, square), one per castling-rights vector,
//! one per en-passant file and one for the side to move. The tables are
//! filled from a fixed-seed PRNG so every process computes identical
//! hashes; this keeps transposition tables and test fixtures reproducible.

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{CastlingRights, Color, Piece, Square};

const ZOBRIST_SEED: u64 = 0xBEEF1234CAFE5678;

/// The full Zobrist key set.
pub struct ZobristKeys {
    piece_square: [[[u64; 64]; 6]; 2],
    castling: [u64; 16],
    en_passant_file: [u64; 8],
    side: u64,
}

pub static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(|| {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color.iter_mut() {
            for key in piece.iter_mut() {
                *key = rng.gen();
            }
        }
    }
    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = rng.gen();
    }
    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.gen();
    }
    ZobristKeys {
        piece_square,
        castling,
        en_passant_file,
        side: rng.gen(),
    }
});

impl ZobristKeys {
    /// Key for a piece of the given color on a square.
    #[inline]
    #[must_use]
    pub fn piece(&self, color: Color, piece: Piece, sq: Square) -> u64 {
        self.piece_square[color.index()][piece.index()][sq.index()]
    }

    /// Key for a castling-rights vector.
    #[inline]
    #[must_use]
    pub fn castling(&self, rights: CastlingRights) -> u64 {
        self.castling[rights.index()]
    }

    /// Key for the file of an en-passant target square.
    #[inline]
    #[must_use]
    pub fn en_passant(&self, sq: Square) -> u64 {
        self.en_passant_file[sq.file()]
    }

    /// Key toggled when black is to move.
    #[inline]
    #[must_use]
    pub fn side(&self) -> u64 {
        self.side
    }
}
