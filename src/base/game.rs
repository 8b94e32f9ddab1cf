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

//! A position plus the zobrist-key history needed for repetition and
//! fifty-move draw detection. Search itself only needs `Position`; `Game`
//! is the thin wrapper a UCI-style front end drives move by move.

use super::{moves::Move, position::Position};

#[derive(Debug, Clone)]
pub struct Game {
    pub position: Position,
    /// One zobrist key per position seen so far, including the current one,
    /// in play order. Used for threefold-repetition detection.
    history: Vec<u64>,
}

impl Game {
    #[must_use]
    pub fn new(position: Position) -> Game {
        let key = position.zobrist_key();
        Game {
            position,
            history: vec![key],
        }
    }

    pub fn make_move(&mut self, m: Move) {
        self.position.apply_move(m);
        self.history.push(self.position.zobrist_key());
    }

    /// Undo the most recent move made through `make_move`.
    pub fn unmake_move(&mut self, m: Move) {
        self.history.pop();
        self.position.revert_move(m);
    }

    #[must_use]
    /// Whether the current position has occurred at least three times in
    /// this game's history (draw by threefold repetition).
    pub fn is_threefold_repetition(&self) -> bool {
        let current = self.position.zobrist_key();
        self.history.iter().filter(|&&k| k == current).count() >= 3
    }

    #[must_use]
    /// Whether fifty full moves (100 halfmoves) have passed without a
    /// capture or pawn push.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.position.halfmove_clock() >= 100
    }

    #[must_use]
    pub fn is_drawn(&self) -> bool {
        self.is_threefold_repetition() || self.is_fifty_move_draw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{
        moves::MoveKind,
        piece::Piece,
        square::Square,
    };

    #[test]
    fn fresh_game_is_not_drawn() {
        let game = Game::new(Position::startpos());
        assert!(!game.is_drawn());
    }

    #[test]
    fn repetition_shuttle_triggers_threefold() {
        let mut game = Game::new(Position::startpos());
        let out_and_back = [
            Move::new(Square::G1, Square::F3, Piece::Knight, None, None, MoveKind::Quiet),
            Move::new(Square::G8, Square::F6, Piece::Knight, None, None, MoveKind::Quiet),
            Move::new(Square::F3, Square::G1, Piece::Knight, None, None, MoveKind::Quiet),
            Move::new(Square::F6, Square::G8, Piece::Knight, None, None, MoveKind::Quiet),
        ];
        for _ in 0..2 {
            for m in out_and_back {
                game.make_move(m);
            }
        }
        assert!(game.is_threefold_repetition());
    }
}
