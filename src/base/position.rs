/*
  Vantage, a chess-position search and tuning engine.
  Copyright (C) 2026 Vantage Contributors.

  Vantage is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  Vantage is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! Position state: piece placement, side to move, rights, and the
//! apply/revert move idiom the search descends and backs out through.

use std::fmt::{self, Display, Formatter};

use super::{
    bitboard::Bitboard,
    castling::CastleRights,
    color::Color,
    moves::{Move, MoveKind},
    piece::Piece,
    square::Square,
    zobrist,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A FEN string that does not describe a valid position.
pub enum FenError {
    WrongFieldCount,
    BadPlacement,
    BadSideToMove,
    BadCastleRights,
    BadEnPassant,
    BadHalfmoveClock,
}

impl Display for FenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let msg = match self {
            FenError::WrongFieldCount => "expected 6 space-separated FEN fields",
            FenError::BadPlacement => "malformed piece placement field",
            FenError::BadSideToMove => "side to move must be 'w' or 'b'",
            FenError::BadCastleRights => "malformed castling availability field",
            FenError::BadEnPassant => "malformed en passant target square",
            FenError::BadHalfmoveClock => "halfmove clock is not a valid number",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for FenError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Everything needed to exactly reverse one `apply_move` call.
struct Undo {
    captured: Option<Piece>,
    castle_rights: CastleRights,
    en_passant_file: Option<u8>,
    halfmove_clock: u16,
    zobrist_key: u64,
}

#[derive(Debug, Clone)]
/// A chess position: piece placement plus the metadata needed to make and
/// unmake moves and to identify the position for repetition detection.
pub struct Position {
    /// Piece occupancy by color.
    sides: [Bitboard; 2],
    /// Piece occupancy by piece type, colorless.
    pieces: [Bitboard; Piece::NUM],
    /// Direct square lookup, kept alongside the bitboards for O(1)
    /// `piece_at` queries.
    mailbox: [Option<(Color, Piece)>; 64],
    side_to_move: Color,
    castle_rights: CastleRights,
    /// File of a pawn that just double-stepped, if any.
    en_passant_file: Option<u8>,
    halfmove_clock: u16,
    zobrist_key: u64,
    undo_stack: Vec<Undo>,
}

impl Position {
    #[must_use]
    /// The standard chess starting position.
    pub fn startpos() -> Position {
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .expect("startpos FEN is well-formed")
    }

    /// Parse a position from Forsyth-Edwards Notation.
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(FenError::WrongFieldCount);
        }

        let mut sides = [Bitboard::EMPTY; 2];
        let mut pieces = [Bitboard::EMPTY; Piece::NUM];
        let mut mailbox = [None; 64];

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::BadPlacement);
        }
        for (rank_from_top, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_from_top as u8;
            let mut file = 0u8;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as u8;
                } else {
                    let color = if c.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let piece = Piece::from_code(c).ok_or(FenError::BadPlacement)?;
                    if file > 7 {
                        return Err(FenError::BadPlacement);
                    }
                    let sq = Square::new(rank, file).ok_or(FenError::BadPlacement)?;
                    sides[color as usize].insert(sq);
                    pieces[piece as usize].insert(sq);
                    mailbox[sq as usize] = Some((color, piece));
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::BadPlacement);
            }
        }

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenError::BadSideToMove),
        };

        let mut castle_rights = CastleRights::NONE;
        if fields[2] != "-" {
            for c in fields[2].chars() {
                castle_rights.0 |= match c {
                    'K' => CastleRights::WHITE_KING,
                    'Q' => CastleRights::WHITE_QUEEN,
                    'k' => CastleRights::BLACK_KING,
                    'q' => CastleRights::BLACK_QUEEN,
                    _ => return Err(FenError::BadCastleRights),
                };
            }
        }

        let en_passant_file = if fields[3] == "-" {
            None
        } else {
            let sq = Square::try_from(fields[3]).map_err(|()| FenError::BadEnPassant)?;
            Some(sq.file())
        };

        let halfmove_clock = fields
            .get(4)
            .map_or(Ok(0), |s| s.parse::<u16>())
            .map_err(|_| FenError::BadHalfmoveClock)?;

        let mut pos = Position {
            sides,
            pieces,
            mailbox,
            side_to_move,
            castle_rights,
            en_passant_file,
            halfmove_clock,
            zobrist_key: 0,
            undo_stack: Vec::new(),
        };
        pos.zobrist_key = pos.compute_zobrist_key();
        Ok(pos)
    }

    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[must_use]
    pub fn castle_rights(&self) -> CastleRights {
        self.castle_rights
    }

    #[must_use]
    pub fn en_passant_file(&self) -> Option<u8> {
        self.en_passant_file
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn zobrist_key(&self) -> u64 {
        self.zobrist_key
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.mailbox[sq as usize]
    }

    #[must_use]
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.sides[color as usize]
    }

    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.sides[0] | self.sides[1]
    }

    #[must_use]
    pub fn piece_bitboard(&self, piece: Piece) -> Bitboard {
        self.pieces[piece as usize]
    }

    #[must_use]
    pub fn pieces_of(&self, color: Color, piece: Piece) -> Bitboard {
        self.sides[color as usize] & self.pieces[piece as usize]
    }

    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        self.pieces_of(color, Piece::King)
            .lowest()
            .expect("a legal position always has a king of each color")
    }

    /// Recompute the zobrist key from scratch: xor of piece keys over
    /// occupied squares, castle key, en-passant key (only when a pawn of
    /// the side to move could legally capture onto it), and turn key if
    /// Black to move.
    fn compute_zobrist_key(&self) -> u64 {
        let mut key = 0u64;
        for sq in self.occupied() {
            let (color, piece) = self.mailbox[sq as usize].expect("square reported occupied");
            key ^= zobrist::piece_key(color, piece, sq);
        }
        key ^= zobrist::castle_key(self.castle_rights);
        if let Some(file) = self.en_passant_capturable_file() {
            key ^= zobrist::en_passant_key(file);
        }
        if self.side_to_move == Color::Black {
            key ^= zobrist::turn_key();
        }
        key
    }

    /// The en-passant file, but only if a pawn of the side to move actually
    /// sits beside it (i.e. the capture is legally available this turn, not
    /// merely that some pawn double-stepped last move).
    fn en_passant_capturable_file(&self) -> Option<u8> {
        let file = self.en_passant_file?;
        let capture_rank = match self.side_to_move {
            Color::White => 4,
            Color::Black => 3,
        };
        let our_pawns = self.pieces_of(self.side_to_move, Piece::Pawn);
        for df in [-1i8, 1] {
            let f = file as i8 + df;
            if (0..8).contains(&f)
                && Square::new(capture_rank, f as u8).is_some_and(|sq| our_pawns.contains(sq))
            {
                return Some(file);
            }
        }
        None
    }

    fn place(&mut self, color: Color, piece: Piece, sq: Square) {
        self.sides[color as usize].insert(sq);
        self.pieces[piece as usize].insert(sq);
        self.mailbox[sq as usize] = Some((color, piece));
        self.zobrist_key ^= zobrist::piece_key(color, piece, sq);
    }

    fn remove(&mut self, color: Color, piece: Piece, sq: Square) {
        self.sides[color as usize].remove(sq);
        self.pieces[piece as usize].remove(sq);
        self.mailbox[sq as usize] = None;
        self.zobrist_key ^= zobrist::piece_key(color, piece, sq);
    }

    /// Apply a pseudo-legal move in place. Must be paired with `revert_move`
    /// in LIFO order; `apply_move`/`revert_move` are exact inverses,
    /// including the zobrist key.
    pub fn apply_move(&mut self, m: Move) {
        let mover = self.side_to_move;
        let from = m.from_square();
        let to = m.to_square();
        let piece = m.piece();

        let undo = Undo {
            captured: m.captured(),
            castle_rights: self.castle_rights,
            en_passant_file: self.en_passant_file,
            halfmove_clock: self.halfmove_clock,
            zobrist_key: self.zobrist_key,
        };
        self.undo_stack.push(undo);

        // Clear the old en-passant key contribution before it changes.
        if let Some(file) = self.en_passant_capturable_file() {
            self.zobrist_key ^= zobrist::en_passant_key(file);
        }

        match m.kind() {
            MoveKind::EnPassant => {
                let captured_sq = Square::new(from.rank(), to.file())
                    .expect("en passant target rank/file is always on board");
                self.remove(!mover, Piece::Pawn, captured_sq);
            }
            _ => {
                if let Some(captured) = m.captured() {
                    self.remove(!mover, captured, to);
                }
            }
        }

        self.remove(mover, piece, from);
        match m.promotion() {
            Some(promo) => self.place(mover, promo, to),
            None => self.place(mover, piece, to),
        }

        if m.kind().is_castle() {
            let rank = from.rank();
            let (rook_from, rook_to) = match m.kind() {
                MoveKind::CastleKingside => (
                    Square::new(rank, 7).unwrap(),
                    Square::new(rank, 5).unwrap(),
                ),
                MoveKind::CastleQueenside => (
                    Square::new(rank, 0).unwrap(),
                    Square::new(rank, 3).unwrap(),
                ),
                _ => unreachable!(),
            };
            self.remove(mover, Piece::Rook, rook_from);
            self.place(mover, Piece::Rook, rook_to);
        }

        self.zobrist_key ^= zobrist::castle_key(self.castle_rights);
        self.update_castle_rights(from, to, piece);
        self.zobrist_key ^= zobrist::castle_key(self.castle_rights);

        self.en_passant_file = (m.kind() == MoveKind::DoublePawnPush).then_some(from.file());
        if let Some(file) = self.en_passant_capturable_file() {
            self.zobrist_key ^= zobrist::en_passant_key(file);
        }

        self.halfmove_clock = if piece == Piece::Pawn || m.is_capture() {
            0
        } else {
            self.halfmove_clock + 1
        };

        self.zobrist_key ^= zobrist::turn_key();
        self.side_to_move = !mover;
    }

    fn update_castle_rights(&mut self, from: Square, to: Square, piece: Piece) {
        if piece == Piece::King {
            self.castle_rights.remove_all(self.side_to_move);
        }
        for (sq, color, kingside) in [
            (Square::A1, Color::White, false),
            (Square::H1, Color::White, true),
            (Square::A8, Color::Black, false),
            (Square::H8, Color::Black, true),
        ] {
            if from == sq || to == sq {
                if kingside {
                    self.castle_rights.remove_kingside(color);
                } else {
                    self.castle_rights.remove_queenside(color);
                }
            }
        }
    }

    /// Undo the most recently applied move. Panics if the undo stack is
    /// empty, as that indicates a caller bug (unmatched apply/revert).
    pub fn revert_move(&mut self, m: Move) {
        let undo = self
            .undo_stack
            .pop()
            .expect("revert_move called without a matching apply_move");

        let mover = !self.side_to_move;
        let from = m.from_square();
        let to = m.to_square();
        let piece = m.piece();

        match m.promotion() {
            Some(promo) => self.remove(mover, promo, to),
            None => self.remove(mover, piece, to),
        }
        self.place(mover, piece, from);

        match m.kind() {
            MoveKind::EnPassant => {
                let captured_sq = Square::new(from.rank(), to.file())
                    .expect("en passant target rank/file is always on board");
                self.place(!mover, Piece::Pawn, captured_sq);
            }
            _ => {
                if let Some(captured) = undo.captured {
                    self.place(!mover, captured, to);
                }
            }
        }

        if m.kind().is_castle() {
            let rank = from.rank();
            let (rook_from, rook_to) = match m.kind() {
                MoveKind::CastleKingside => (
                    Square::new(rank, 7).unwrap(),
                    Square::new(rank, 5).unwrap(),
                ),
                MoveKind::CastleQueenside => (
                    Square::new(rank, 0).unwrap(),
                    Square::new(rank, 3).unwrap(),
                ),
                _ => unreachable!(),
            };
            self.remove(mover, Piece::Rook, rook_to);
            self.place(mover, Piece::Rook, rook_from);
        }

        self.castle_rights = undo.castle_rights;
        self.en_passant_file = undo.en_passant_file;
        self.halfmove_clock = undo.halfmove_clock;
        self.zobrist_key = undo.zobrist_key;
        self.side_to_move = mover;
    }

    #[must_use]
    /// Whether `color`'s king is *not* currently attacked — the legality
    /// filter applied after a pseudo-legal move is applied.
    pub fn is_not_in_check(&self, color: Color) -> bool {
        !self.square_attacked_by(self.king_square(color), !color)
    }

    #[must_use]
    /// Whether any piece of `by` attacks `sq`, via classical ray-casting for
    /// sliders and lookup tables for leapers.
    pub fn square_attacked_by(&self, sq: Square, by: Color) -> bool {
        use super::direction::{
            leaper_attacks, ray_attacks, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS,
            ROOK_DIRECTIONS,
        };

        let occ = self.occupied();

        let knights = self.pieces_of(by, Piece::Knight);
        if !(leaper_attacks(sq, &KNIGHT_OFFSETS) & knights).is_empty() {
            return true;
        }
        let king = self.pieces_of(by, Piece::King);
        if !(leaper_attacks(sq, &KING_OFFSETS) & king).is_empty() {
            return true;
        }

        let pawn_step = -(by.pawn_rank_step());
        for df in [-1i8, 1] {
            if let Some(from) = sq.offset(pawn_step, df) {
                if self.pieces_of(by, Piece::Pawn).contains(from) {
                    return true;
                }
            }
        }

        // `ray_attacks` stops at (and includes) the first occupied square in
        // the ray, so intersecting with the attacker's sliders tells us
        // whether that blocker is one of them.
        let bishop_like = self.pieces_of(by, Piece::Bishop) | self.pieces_of(by, Piece::Queen);
        for dir in BISHOP_DIRECTIONS {
            if !(ray_attacks(sq, dir, occ) & bishop_like).is_empty() {
                return true;
            }
        }
        let rook_like = self.pieces_of(by, Piece::Rook) | self.pieces_of(by, Piece::Queen);
        for dir in ROOK_DIRECTIONS {
            if !(ray_attacks(sq, dir, occ) & rook_like).is_empty() {
                return true;
            }
        }

        false
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let sq = Square::new(rank, file).unwrap();
                let c = match self.piece_at(sq) {
                    Some((Color::White, p)) => p.code(),
                    Some((Color::Black, p)) => p.code().to_ascii_lowercase(),
                    None => '.',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_has_32_pieces() {
        let pos = Position::startpos();
        assert_eq!(pos.occupied().len(), 32);
        assert_eq!(pos.side_to_move(), Color::White);
    }

    #[test]
    fn fen_round_trips_zobrist_after_apply_revert() {
        let mut pos = Position::startpos();
        let start_key = pos.zobrist_key();

        let e2e4 = Move::new(
            Square::E2,
            Square::E4,
            Piece::Pawn,
            None,
            None,
            MoveKind::DoublePawnPush,
        );
        pos.apply_move(e2e4);
        assert_ne!(pos.zobrist_key(), start_key);
        pos.revert_move(e2e4);
        assert_eq!(pos.zobrist_key(), start_key);
        assert_eq!(pos.side_to_move(), Color::White);
    }

    #[test]
    fn rejects_malformed_fen() {
        assert_eq!(Position::from_fen("not a fen"), Err(FenError::WrongFieldCount));
    }

    #[test]
    fn king_in_check_detected() {
        // White king on e1, black rook on e8: open file check.
        let pos = Position::from_fen("4r3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(!pos.is_not_in_check(Color::White));
    }
}
