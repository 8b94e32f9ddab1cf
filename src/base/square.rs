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

//! Squares: the 64 addressable locations on a chessboard.

use std::fmt::{self, Display, Formatter};

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// One of the 64 squares of a chessboard, numbered from A1 = 0 in
/// little-endian rank-file order (so H8 = 63).
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

/// All 64 squares, in index order.
pub const ALL_SQUARES: [Square; 64] = {
    use Square::*;
    [
        A1, B1, C1, D1, E1, F1, G1, H1,
        A2, B2, C2, D2, E2, F2, G2, H2,
        A3, B3, C3, D3, E3, F3, G3, H3,
        A4, B4, C4, D4, E4, F4, G4, H4,
        A5, B5, C5, D5, E5, F5, G5, H5,
        A6, B6, C6, D6, E6, F6, G6, H6,
        A7, B7, C7, D7, E7, F7, G7, H7,
        A8, B8, C8, D8, E8, F8, G8, H8,
    ]
};

impl Square {
    #[must_use]
    /// Build a square from a 0-indexed rank and file, each in `0..8`.
    pub const fn new(rank: u8, file: u8) -> Option<Square> {
        if rank > 7 || file > 7 {
            return None;
        }
        Some(Square::from_index(rank * 8 + file))
    }

    #[must_use]
    /// Build a square from a packed index in `0..64`. Panics in debug builds
    /// on out-of-range input.
    pub const fn from_index(idx: u8) -> Square {
        debug_assert!(idx < 64);
        // SAFETY: `Square` is `repr(u8)` and densely populated over 0..64.
        unsafe { std::mem::transmute(idx) }
    }

    #[must_use]
    /// The rank (0-indexed, 0 = rank 1) of this square.
    pub const fn rank(self) -> u8 {
        self as u8 >> 3
    }

    #[must_use]
    /// The file (0-indexed, 0 = file A) of this square.
    pub const fn file(self) -> u8 {
        self as u8 & 7
    }

    #[must_use]
    /// This square, mirrored across the board's horizontal midline. Used to
    /// share piece-square tables between colors.
    pub const fn mirror(self) -> Square {
        Square::from_index(self as u8 ^ 56)
    }

    #[must_use]
    /// Offset this square by `(d_rank, d_file)`, returning `None` if the
    /// result would fall off the board.
    pub const fn offset(self, d_rank: i8, d_file: i8) -> Option<Square> {
        let rank = self.rank() as i8 + d_rank;
        let file = self.file() as i8 + d_file;
        if rank < 0 || rank > 7 || file < 0 || file > 7 {
            return None;
        }
        Square::new(rank as u8, file as u8)
    }

    #[must_use]
    /// Chebyshev (king-move) distance between two squares.
    pub fn chebyshev_to(self, rhs: Square) -> u8 {
        let dr = (self.rank() as i8 - rhs.rank() as i8).unsigned_abs();
        let df = (self.file() as i8 - rhs.file() as i8).unsigned_abs();
        dr.max(df)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        write!(f, "{file}{rank}")
    }
}

impl TryFrom<&str> for Square {
    type Error = ();

    fn try_from(s: &str) -> Result<Square, ()> {
        let mut chars = s.chars();
        let file = chars.next().ok_or(())?;
        let rank = chars.next().ok_or(())?;
        if chars.next().is_some() {
            return Err(());
        }
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(());
        }
        Square::new(rank as u8 - b'1', file as u8 - b'a').ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_algebraic() {
        for &sq in &ALL_SQUARES {
            let s = sq.to_string();
            assert_eq!(Square::try_from(s.as_str()).unwrap(), sq);
        }
    }

    #[test]
    fn mirror_is_involution() {
        for &sq in &ALL_SQUARES {
            assert_eq!(sq.mirror().mirror(), sq);
        }
    }

    #[test]
    fn rank_file_round_trip() {
        for &sq in &ALL_SQUARES {
            assert_eq!(Square::new(sq.rank(), sq.file()), Some(sq));
        }
    }
}
