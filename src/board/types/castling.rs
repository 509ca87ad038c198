//! Castling rights bit set.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;
use super::square::Square;

/// Castling availability for both sides, packed into four bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KING: CastlingRights = CastlingRights(1);
    pub const WHITE_QUEEN: CastlingRights = CastlingRights(2);
    pub const BLACK_KING: CastlingRights = CastlingRights(4);
    pub const BLACK_QUEEN: CastlingRights = CastlingRights(8);
    pub const ALL: CastlingRights = CastlingRights(15);

    /// Returns true if every right in `other` is present.
    #[inline]
    #[must_use]
    pub const fn has(self, other: CastlingRights) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Add rights.
    #[inline]
    #[must_use]
    pub const fn with(self, other: CastlingRights) -> Self {
        CastlingRights(self.0 | other.0)
    }

    /// Remove rights.
    #[inline]
    #[must_use]
    pub const fn without(self, other: CastlingRights) -> Self {
        CastlingRights(self.0 & !other.0)
    }

    /// Kingside right for a color.
    #[inline]
    #[must_use]
    pub const fn kingside(color: Color) -> Self {
        match color {
            Color::White => Self::WHITE_KING,
            Color::Black => Self::BLACK_KING,
        }
    }

    /// Queenside right for a color.
    #[inline]
    #[must_use]
    pub const fn queenside(color: Color) -> Self {
        match color {
            Color::White => Self::WHITE_QUEEN,
            Color::Black => Self::BLACK_QUEEN,
        }
    }

    /// Index into the 16-entry Zobrist castling key table.
    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CastlingRights {
    /// Canonical FEN form: `KQkq` subset in that order, or `-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        if self.has(Self::WHITE_KING) {
            write!(f, "K")?;
        }
        if self.has(Self::WHITE_QUEEN) {
            write!(f, "Q")?;
        }
        if self.has(Self::BLACK_KING) {
            write!(f, "k")?;
        }
        if self.has(Self::BLACK_QUEEN) {
            write!(f, "q")?;
        }
        Ok(())
    }
}

/// Rights cleared when a piece moves from or to the given square.
///
/// Only the six squares whose traffic can affect castling carry a mask:
/// the rook homes and the king homes.
pub(crate) const fn rights_mask(sq: Square) -> CastlingRights {
    match sq.index() {
        0 => CastlingRights::WHITE_QUEEN,                              // a1
        4 => CastlingRights(1 | 2),                                    // e1
        7 => CastlingRights::WHITE_KING,                               // h1
        56 => CastlingRights::BLACK_QUEEN,                             // a8
        60 => CastlingRights(4 | 8),                                   // e8
        63 => CastlingRights::BLACK_KING,                              // h8
        _ => CastlingRights::NONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rights_display_canonical() {
        assert_eq!(CastlingRights::ALL.to_string(), "KQkq");
        assert_eq!(CastlingRights::NONE.to_string(), "-");
        let partial = CastlingRights::WHITE_QUEEN.with(CastlingRights::BLACK_KING);
        assert_eq!(partial.to_string(), "Qk");
    }

    #[test]
    fn test_rights_monotonic_removal() {
        let mut rights = CastlingRights::ALL;
        rights = rights.without(rights_mask(Square::new(0, 7))); // h1 rook moves
        assert_eq!(rights.to_string(), "Qkq");
        rights = rights.without(rights_mask(Square::new(0, 4))); // e1 king moves
        assert_eq!(rights.to_string(), "kq");
        rights = rights.without(rights_mask(Square::new(7, 4))); // e8 king moves
        assert!(rights.is_empty());
    }

    #[test]
    fn test_rights_mask_only_corner_squares() {
        let affected: Vec<usize> = (0..64)
            .filter(|&i| !rights_mask(Square::from_index(i)).is_empty())
            .collect();
        assert_eq!(affected, vec![0, 4, 7, 56, 60, 63]);
    }
}
