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

//! Search a single position from the command line.
//!
//! Usage: `vantage <fen> [seconds]`. Prints the iterative-deepening
//! diagnostics `get_best_move` emits along the way, then the chosen move.
//! FEN parsing and argument handling are deliberately minimal here; a
//! protocol front-end (UCI or otherwise) is not this crate's concern.

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use vantage::base::Position;
use vantage::engine::{evaluate, get_best_move, SearchConfig};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let fen = match args.len() {
        0 | 1 => {
            eprintln!("error: a FEN string must be given");
            return ExitCode::FAILURE;
        }
        _ => &args[1],
    };
    let seconds: f64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(5.0);

    let mut pos = match Position::from_fen(fen) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: could not parse FEN: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("info string static eval {}", evaluate(&pos).value());

    let weights = vantage::engine::eval::default_weights();
    let budget = Duration::from_secs_f64(seconds.max(0.0));
    match get_best_move(&mut pos, &weights, budget, SearchConfig::default()) {
        Ok(m) => println!("bestmove {m}"),
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
