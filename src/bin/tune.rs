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

//! Fit evaluation weights against a file of FEN-plus-result lines.
//!
//! The first argument must be the path to the labeled position file, one
//! `<fen> <result>` per line where result is `1-0`, `0-1`, or `1/2-1/2`.
//! Optionally, a second argument caps the number of training epochs; by
//! default the tuner runs until killed.

use std::env;
use std::path::Path;
use std::process::ExitCode;

use vantage::engine::eval::default_weights;
use vantage::tuner::{format_parameters, TrainingSet, TuningConfig};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let path_str = match args.len() {
        0 | 1 => {
            eprintln!("error: path to a labeled position file must be given");
            return ExitCode::FAILURE;
        }
        2 => &args[1],
        _ => {
            eprintln!("warning: extraneous arguments are being ignored");
            &args[1]
        }
    };
    let max_epochs = args.get(2).and_then(|s| s.parse().ok());

    let base_weights = default_weights();
    let mut set = match TrainingSet::load(Path::new(path_str), &base_weights) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if set.is_empty() {
        eprintln!("error: no usable positions were loaded from {path_str}");
        return ExitCode::FAILURE;
    }
    println!("loaded {} positions", set.len());

    let config = TuningConfig::default();
    let k = set.compute_optimal_k(config.k_precision);
    println!("optimal K = {k}");

    let tuned = set.train(&base_weights, k, config, max_epochs);
    println!("{}", format_parameters(&tuned));
    ExitCode::SUCCESS
}
