//! FEN parsing/emission and UCI move decoding.

use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::state::STARTPOS_FEN;
use super::types::{file_to_index, rank_to_index, CastlingRights, Color, Move, Piece, Square};
use super::Board;

impl Board {
    /// Parse a position from FEN notation.
    ///
    /// The first four fields are required; the halfmove clock and
    /// fullmove number default to 0 and 1 when absent. Returns an error
    /// (and builds nothing) if the string is malformed.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Board::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::MissingFields { found: parts.len() });
        }

        // Piece placement, rank 8 down to rank 1
        for (rank_idx, rank_str) in parts[0].split('/').enumerate() {
            if rank_idx >= 8 {
                return Err(FenError::RankOverflow { rank: rank_idx });
            }
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    file += digit as usize;
                } else {
                    let color = if c.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let piece = Piece::from_char(c).ok_or(FenError::UnknownPiece { letter: c })?;
                    if file >= 8 {
                        return Err(FenError::FileOverflow { rank: rank_idx });
                    }
                    board.put_piece(Square::new(7 - rank_idx, file), color, piece);
                    file += 1;
                }
            }
        }

        // Side to move
        board.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::BadSideToMove {
                    field: other.to_string(),
                })
            }
        };

        // Castling rights
        for c in parts[2].chars() {
            board.state.castling = match c {
                'K' => board.state.castling.with(CastlingRights::WHITE_KING),
                'Q' => board.state.castling.with(CastlingRights::WHITE_QUEEN),
                'k' => board.state.castling.with(CastlingRights::BLACK_KING),
                'q' => board.state.castling.with(CastlingRights::BLACK_QUEEN),
                '-' => board.state.castling,
                _ => return Err(FenError::UnknownCastlingFlag { letter: c }),
            };
        }

        // En passant target
        board.state.ep_square = if parts[3] == "-" {
            None
        } else {
            match parts[3].parse::<Square>() {
                Ok(sq) => Some(sq),
                Err(_) => {
                    return Err(FenError::BadEnPassantSquare {
                        field: parts[3].to_string(),
                    })
                }
            }
        };

        // Optional clocks
        if parts.len() >= 5 {
            board.state.halfmove_clock = parts[4].parse().unwrap_or(0);
        }
        if parts.len() >= 6 {
            board.fullmove_number = parts[5].parse().unwrap_or(1).max(1);
        }

        board.game_ply = 2 * (board.fullmove_number - 1)
            + u32::from(board.side_to_move == Color::Black);
        board.state.hash = board.recompute_hash();
        Ok(board)
    }

    /// Parse a position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for
    /// fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid FEN string")
    }

    /// Emit the position in canonical FEN notation.
    ///
    /// Castling rights appear in `KQkq` order and empty fields are `-`,
    /// so equal positions produce byte-identical strings.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.piece_at(Square::new(rank, file)) {
                    Some((color, piece)) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
            if rank > 0 {
                placement.push('/');
            }
        }

        let side = if self.side_to_move == Color::White {
            "w"
        } else {
            "b"
        };
        let ep = self
            .state
            .ep_square
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{placement} {side} {} {ep} {} {}",
            self.state.castling, self.state.halfmove_clock, self.fullmove_number
        )
    }

    /// The standard starting-position FEN.
    #[must_use]
    pub fn startpos_fen() -> &'static str {
        STARTPOS_FEN
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}

impl Move {
    /// Decode a UCI move string (`e2e4`, `e7e8q`, ...) against a board.
    ///
    /// The board supplies the context the text lacks: whether the move
    /// captures, castles, double-pushes or takes en passant. The result
    /// is *not* checked for legality; feed it to `Engine::apply_move` or
    /// match it against `legal_moves()`. A promoting pawn push without a
    /// promotion letter decodes as a plain move and is rejected by that
    /// later legality check.
    pub fn from_uci(uci: &str, board: &Board) -> Result<Move, MoveParseError> {
        let chars: Vec<char> = uci.chars().collect();
        if chars.len() < 4 || chars.len() > 5 {
            return Err(MoveParseError::WrongLength { len: chars.len() });
        }

        let parse_square = |file: char, rank: char| -> Result<Square, MoveParseError> {
            if ('a'..='h').contains(&file) && ('1'..='8').contains(&rank) {
                Ok(Square::new(rank_to_index(rank), file_to_index(file)))
            } else {
                Err(MoveParseError::BadSquare {
                    text: uci.to_string(),
                })
            }
        };
        let from = parse_square(chars[0], chars[1])?;
        let to = parse_square(chars[2], chars[3])?;

        let is_capture = board.piece_at(to).is_some();

        if chars.len() == 5 {
            let promo = match chars[4] {
                'n' => Piece::Knight,
                'b' => Piece::Bishop,
                'r' => Piece::Rook,
                'q' => Piece::Queen,
                other => return Err(MoveParseError::BadPromotionPiece { letter: other }),
            };
            return Ok(if is_capture {
                Move::new_promotion_capture(from, to, promo)
            } else {
                Move::new_promotion(from, to, promo)
            });
        }

        let piece = board.piece_at(from).map(|(_, p)| p);

        if piece == Some(Piece::King)
            && from.file() == 4
            && (from.rank() == 0 || from.rank() == 7)
            && from.rank() == to.rank()
        {
            if to.file() == 6 {
                return Ok(Move::castle_kingside(from, to));
            }
            if to.file() == 2 {
                return Ok(Move::castle_queenside(from, to));
            }
        }

        if piece == Some(Piece::Pawn) {
            let delta = to.index() as i32 - from.index() as i32;
            if delta.abs() == 16 {
                return Ok(Move::double_push(from, to));
            }
            if board.ep_square() == Some(to) {
                return Ok(Move::en_passant(from, to));
            }
        }

        Ok(if is_capture {
            Move::capture(from, to)
        } else {
            Move::quiet(from, to)
        })
    }
}
