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

//! Ray directions and leaper offsets used by move generation and by the
//! classical (non-magic) sliding-attack fallback.

use super::{bitboard::Bitboard, square::Square};

/// The eight compass rays a bishop, rook, or queen can slide along, as
/// `(d_rank, d_file)` pairs.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// The eight relative offsets a knight can leap to.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// The eight relative offsets a king can step to.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (1, -1),
    (-1, 0),
    (-1, 1),
    (-1, -1),
    (0, 1),
    (0, -1),
];

#[must_use]
/// Cast a ray from `sq` along `direction`, stopping (inclusive) at the first
/// occupied square, or the board edge. This is the classical sliding-attack
/// fallback used where a magic-bitboard table would otherwise sit; it is
/// slower but needs no precomputed attack database.
pub fn ray_attacks(sq: Square, direction: (i8, i8), occupied: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    let mut cur = sq;
    while let Some(next) = cur.offset(direction.0, direction.1) {
        attacks.insert(next);
        if occupied.contains(next) {
            break;
        }
        cur = next;
    }
    attacks
}

#[must_use]
pub fn leaper_attacks(sq: Square, offsets: &[(i8, i8)]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &(dr, df) in offsets {
        if let Some(to) = sq.offset(dr, df) {
            attacks.insert(to);
        }
    }
    attacks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_stops_at_occupied_square() {
        let occ = Bitboard::from_square(Square::A4);
        let attacks = ray_attacks(Square::A1, (1, 0), occ);
        assert!(attacks.contains(Square::A4));
        assert!(!attacks.contains(Square::A5));
    }

    #[test]
    fn knight_offsets_from_corner() {
        let attacks = leaper_attacks(Square::A1, &KNIGHT_OFFSETS);
        assert_eq!(attacks.len(), 2);
        assert!(attacks.contains(Square::B3));
        assert!(attacks.contains(Square::C2));
    }
}
