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

//! Zobrist hashing: incremental position keys used for repetition detection.
//!
//! Keys are generated once at process start by a fixed xorshift64 generator
//! seeded deterministically, so the same position always hashes to the same
//! key across runs (useful when comparing search traces).

use once_cell::sync::Lazy;

use super::{castling::CastleRights, color::Color, piece::Piece, square::Square};

struct Xorshift64(u64);

impl Xorshift64 {
    const fn new(seed: u64) -> Xorshift64 {
        Xorshift64(seed)
    }

    fn next(&mut self) -> u64 {
        // http://vigna.di.unimi.it/ftp/papers/xorshift.pdf
        self.0 ^= self.0 >> 12;
        self.0 ^= self.0 << 25;
        self.0 ^= self.0 >> 27;
        self.0.wrapping_mul(2685821657736338717)
    }
}

struct ZobristTables {
    /// Indexed `[color][piece][square]`.
    pieces: [[[u64; 64]; Piece::NUM]; 2],
    /// Indexed `[color * Piece::NUM + piece][square]`, but only the pawn and
    /// king rows are ever populated; the rest stay zero and unused. Shares
    /// its values with `pieces` rather than drawing its own randomness, so a
    /// pawn-and-king-only hash (for a future pawn-structure cache) agrees
    /// with the full position key on where pawns and kings sit.
    pawn_king: [[u64; 64]; 2 * Piece::NUM],
    /// Indexed by en passant file, `0..8`.
    en_passant: [u64; 8],
    /// Indexed by the full `CastleRights` bitmask, `0..16`.
    castle: [u64; 16],
    turn: u64,
}

static TABLES: Lazy<ZobristTables> = Lazy::new(|| {
    let mut rng = Xorshift64::new(1_070_372);

    let mut pieces = [[[0u64; 64]; Piece::NUM]; 2];
    for piece in Piece::ALL {
        for sq in 0..64usize {
            pieces[Color::White as usize][piece as usize][sq] = rng.next();
            pieces[Color::Black as usize][piece as usize][sq] = rng.next();
        }
    }

    let mut pawn_king = [[0u64; 64]; 2 * Piece::NUM];
    for color in [Color::White, Color::Black] {
        for piece in [Piece::Pawn, Piece::King] {
            let row = pawn_king_index(color, piece);
            pawn_king[row] = pieces[color as usize][piece as usize];
        }
    }

    let mut en_passant = [0u64; 8];
    for key in &mut en_passant {
        *key = rng.next();
    }

    let white_king = rng.next();
    let white_queen = rng.next();
    let black_king = rng.next();
    let black_queen = rng.next();

    let mut castle = [0u64; 16];
    for (cr, key) in castle.iter_mut().enumerate() {
        let cr = cr as u8;
        if cr & CastleRights::WHITE_KING != 0 {
            *key ^= white_king;
        }
        if cr & CastleRights::WHITE_QUEEN != 0 {
            *key ^= white_queen;
        }
        if cr & CastleRights::BLACK_KING != 0 {
            *key ^= black_king;
        }
        if cr & CastleRights::BLACK_QUEEN != 0 {
            *key ^= black_queen;
        }
    }

    let turn = rng.next();

    ZobristTables {
        pieces,
        pawn_king,
        en_passant,
        castle,
        turn,
    }
});

fn pawn_king_index(color: Color, piece: Piece) -> usize {
    color as usize * Piece::NUM + piece as usize
}

#[must_use]
pub fn piece_key(color: Color, piece: Piece, sq: Square) -> u64 {
    TABLES.pieces[color as usize][piece as usize][sq as usize]
}

#[must_use]
/// The pawn/king-only key for `(color, piece)` at `sq`, equal to
/// [`piece_key`] for `Pawn`/`King` and zero for any other piece.
pub fn pawn_king_key(color: Color, piece: Piece, sq: Square) -> u64 {
    TABLES.pawn_king[pawn_king_index(color, piece)][sq as usize]
}

#[must_use]
pub fn en_passant_key(file: u8) -> u64 {
    TABLES.en_passant[file as usize]
}

#[must_use]
pub fn castle_key(rights: CastleRights) -> u64 {
    TABLES.castle[rights.0 as usize]
}

#[must_use]
pub fn turn_key() -> u64 {
    TABLES.turn
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_deterministic_across_calls() {
        let a = piece_key(Color::White, Piece::Pawn, Square::E2);
        let b = piece_key(Color::White, Piece::Pawn, Square::E2);
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_squares_get_distinct_keys() {
        let a = piece_key(Color::White, Piece::Pawn, Square::E2);
        let b = piece_key(Color::White, Piece::Pawn, Square::E4);
        assert_ne!(a, b);
    }

    #[test]
    fn castle_key_is_xor_of_component_rights() {
        let both = castle_key(CastleRights(
            CastleRights::WHITE_KING | CastleRights::BLACK_QUEEN,
        ));
        let wk = castle_key(CastleRights(CastleRights::WHITE_KING));
        let bq = castle_key(CastleRights(CastleRights::BLACK_QUEEN));
        assert_eq!(both, wk ^ bq);
    }

    #[test]
    fn no_rights_hashes_to_zero() {
        assert_eq!(castle_key(CastleRights::NONE), 0);
    }

    #[test]
    fn pawn_king_key_shares_values_with_piece_key() {
        assert_eq!(
            pawn_king_key(Color::White, Piece::Pawn, Square::E2),
            piece_key(Color::White, Piece::Pawn, Square::E2)
        );
        assert_eq!(
            pawn_king_key(Color::Black, Piece::King, Square::G8),
            piece_key(Color::Black, Piece::King, Square::G8)
        );
    }

    #[test]
    fn pawn_king_key_is_zero_for_other_pieces() {
        assert_eq!(pawn_king_key(Color::White, Piece::Queen, Square::D1), 0);
    }
}
