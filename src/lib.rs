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

//! Vantage: an iterative-deepening alpha-beta chess search over a classical
//! board representation, paired with a Texel-style parameter tuner.
//!
//! `base` is the board representation and move generator; `engine` is the
//! evaluator and search; `tuner` fits evaluation weights against a file of
//! labeled positions.

pub mod base;
pub mod engine;
pub mod tuner;
