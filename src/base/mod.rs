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

//! The board representation and move generator: piece sets, squares, moves,
//! zobrist keys, and the position/game wrappers built on top of them.
//!
//! This layer is treated as an external collaborator by the search and
//! tuner: the algorithms above only ever call through the handful of
//! functions re-exported here (`apply_move`, `revert_move`,
//! `is_not_in_check`, `gen_all_moves`, `gen_all_captures`).

pub mod bitboard;
pub mod castling;
pub mod color;
pub mod direction;
pub mod game;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod position;
pub mod square;
pub mod zobrist;

pub use bitboard::Bitboard;
pub use castling::CastleRights;
pub use color::Color;
pub use game::Game;
pub use movegen::{gen_all_captures, gen_all_moves, has_legal_move};
pub use moves::{Move, MoveKind};
pub use piece::Piece;
pub use position::{FenError, Position};
pub use square::Square;
