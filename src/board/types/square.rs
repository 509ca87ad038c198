//! Square type and utilities.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

pub(crate) fn file_to_index(file: char) -> usize {
    file as usize - ('a' as usize)
}

pub(crate) fn rank_to_index(rank: char) -> usize {
    (rank as usize) - ('0' as usize) - 1
}

/// A square on the chess board, stored as a compact 0-63 index.
///
/// Index layout: rank * 8 + file, where a1=0, b1=1, ..., h8=63.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(u8);

impl Square {
    /// Create a new square from rank and file (both 0-7).
    #[inline]
    #[must_use]
    pub const fn new(rank: usize, file: usize) -> Self {
        Square((rank * 8 + file) as u8)
    }

    /// Get the rank (0-7, where 0 = rank 1)
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        (self.0 / 8) as usize
    }

    /// Get the file (0-7, where 0 = file a)
    #[inline]
    #[must_use]
    pub const fn file(self) -> usize {
        (self.0 % 8) as usize
    }

    /// Flip the square vertically (e.g., a1 <-> a8)
    #[inline]
    #[must_use]
    pub const fn flip_vertical(self) -> Self {
        Square(self.0 ^ 56)
    }

    /// Get the square's index (0-63, a1=0, b1=1, ..., h8=63)
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Create a square from an index (0-63)
    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize) -> Self {
        Square(idx as u8)
    }

    /// Rank from the given color's point of view (0 = back rank)
    #[inline]
    #[must_use]
    pub const fn relative_rank(self, white: bool) -> usize {
        if white {
            self.rank()
        } else {
            7 - self.rank()
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (self.file() as u8 + b'a') as char,
            self.rank() + 1
        )
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(SquareError::NotASquare {
                text: s.to_string(),
            });
        };
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(SquareError::NotASquare {
                text: s.to_string(),
            });
        }
        Ok(Square::new(rank_to_index(rank), file_to_index(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_index_layout() {
        assert_eq!(Square::new(0, 0).index(), 0); // a1
        assert_eq!(Square::new(0, 7).index(), 7); // h1
        assert_eq!(Square::new(7, 7).index(), 63); // h8
    }

    #[test]
    fn test_square_display() {
        assert_eq!(Square::new(0, 0).to_string(), "a1");
        assert_eq!(Square::new(3, 4).to_string(), "e4");
        assert_eq!(Square::new(7, 7).to_string(), "h8");
    }

    #[test]
    fn test_square_from_str() {
        assert_eq!("e4".parse::<Square>().unwrap(), Square::new(3, 4));
        assert!("z9".parse::<Square>().is_err());
        assert!("e44".parse::<Square>().is_err());
    }

    #[test]
    fn test_square_flip_vertical() {
        assert_eq!(Square::new(0, 0).flip_vertical(), Square::new(7, 0));
        assert_eq!(Square::new(3, 4).flip_vertical(), Square::new(4, 4));
    }

    #[test]
    fn test_relative_rank() {
        let e2 = Square::new(1, 4);
        assert_eq!(e2.relative_rank(true), 1);
        assert_eq!(e2.relative_rank(false), 6);
    }
}
