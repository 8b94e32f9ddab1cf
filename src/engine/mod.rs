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

//! Search and evaluation: the static evaluator, time control, and the
//! iterative-deepening alpha-beta driver built on top of `base`.

pub mod config;
pub mod eval;
pub mod limit;
pub mod search;

pub use config::{SearchConfig, MATE, MAX_DEPTH};
pub use eval::{evaluate, evaluate_with, Eval, Score, Trace, Weights};
pub use limit::SearchLimit;
pub use search::{get_best_move, SearchError};
