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

//! Castling-rights tracking.

use super::color::Color;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
/// A 4-bit mask of castling rights: bit 0 is White kingside, bit 1 White
/// queenside, bit 2 Black kingside, bit 3 Black queenside.
pub struct CastleRights(pub u8);

impl CastleRights {
    pub const WHITE_KING: u8 = 1 << 0;
    pub const WHITE_QUEEN: u8 = 1 << 1;
    pub const BLACK_KING: u8 = 1 << 2;
    pub const BLACK_QUEEN: u8 = 1 << 3;

    /// No rights remain for anyone.
    pub const NONE: CastleRights = CastleRights(0);
    /// Every right, as at the start of a game.
    pub const ALL: CastleRights = CastleRights(0b1111);

    #[must_use]
    pub const fn kingside(self, color: Color) -> bool {
        let bit = match color {
            Color::White => Self::WHITE_KING,
            Color::Black => Self::BLACK_KING,
        };
        self.0 & bit != 0
    }

    #[must_use]
    pub const fn queenside(self, color: Color) -> bool {
        let bit = match color {
            Color::White => Self::WHITE_QUEEN,
            Color::Black => Self::BLACK_QUEEN,
        };
        self.0 & bit != 0
    }

    pub fn remove_kingside(&mut self, color: Color) {
        self.0 &= !match color {
            Color::White => Self::WHITE_KING,
            Color::Black => Self::BLACK_KING,
        };
    }

    pub fn remove_queenside(&mut self, color: Color) {
        self.0 &= !match color {
            Color::White => Self::WHITE_QUEEN,
            Color::Black => Self::BLACK_QUEEN,
        };
    }

    pub fn remove_all(&mut self, color: Color) {
        match color {
            Color::White => self.0 &= !(Self::WHITE_KING | Self::WHITE_QUEEN),
            Color::Black => self.0 &= !(Self::BLACK_KING | Self::BLACK_QUEEN),
        }
    }
}
