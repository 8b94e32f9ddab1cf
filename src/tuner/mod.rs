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

//! Texel-style parameter tuner: fits the evaluator's `(mg, eg)` weight
//! table against a file of labeled positions by batch gradient descent on
//! the sigmoid-scaled evaluation error.

mod arena;

use std::fmt;
use std::fs;
use std::path::Path;

use arena::{TupleArena, TupleHandle};

use crate::base::Position;
use crate::engine::eval::{self, evaluate_trace, phase_of, Score, Weights};
use crate::engine::limit::SearchLimit;
use crate::engine::search::{quiescence, SearchContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A line from the training file, a game outcome label from White's
/// perspective.
enum Outcome {
    WhiteWin,
    BlackWin,
    Draw,
}

impl Outcome {
    fn as_result(self) -> f64 {
        match self {
            Outcome::WhiteWin => 1.0,
            Outcome::BlackWin => 0.0,
            Outcome::Draw => 0.5,
        }
    }

    fn parse(line: &str) -> Option<Outcome> {
        if line.contains("1-0") {
            Some(Outcome::WhiteWin)
        } else if line.contains("0-1") {
            Some(Outcome::BlackWin)
        } else if line.contains("1/2") {
            Some(Outcome::Draw)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A failure loading the training set: every line must parse as a FEN
/// carrying a recognized result token.
pub enum TunerError {
    Io,
    UnreadableLine(usize),
    UnrecognizedResult(usize),
}

impl fmt::Display for TunerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TunerError::Io => write!(f, "could not read the training file"),
            TunerError::UnreadableLine(n) => write!(f, "line {n}: not a valid FEN"),
            TunerError::UnrecognizedResult(n) => {
                write!(f, "line {n}: missing or unrecognized result token")
            }
        }
    }
}

impl std::error::Error for TunerError {}

/// One resolved, quiet training position: its game outcome, phase, and the
/// sparse white-relative coefficient trace against the default weights.
struct TexelEntry {
    result: f64,
    phase: i32,
    fmg: f64,
    feg: f64,
    base_eval: f64,
    tuples: TupleHandle,
}

fn resolve_to_quiet(pos: &Position, weights: &Weights) -> Position {
    let mut quiet = pos.clone();
    let mut ctx = SearchContext::new(weights, SearchLimit::infinite());
    if let Some((_, pv)) = quiescence(&mut quiet, &mut ctx, eval::Eval::NEG_INFINITY, eval::Eval::INFINITY) {
        for m in pv {
            quiet.apply_move(m);
        }
    }
    quiet
}

/// A loaded, quiescence-resolved training set plus the arena backing its
/// per-entry sparse coefficient tuples. Constructed once via [`TrainingSet::load`]
/// and then reused across `compute_optimal_k`/`train` calls.
pub struct TrainingSet {
    entries: Vec<TexelEntry>,
    arena: TupleArena,
}

impl TrainingSet {
    /// Parse the training file and resolve every FEN to a quiet position,
    /// building one coefficient tuple per line against `weights`.
    pub fn load(path: &Path, weights: &Weights) -> Result<TrainingSet, TunerError> {
        let text = fs::read_to_string(path).map_err(|_| TunerError::Io)?;
        let mut entries = Vec::new();
        let mut arena = TupleArena::new();

        for (lineno, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let outcome = Outcome::parse(trimmed).ok_or(TunerError::UnrecognizedResult(lineno + 1))?;
            let pos = Position::from_fen(trimmed).map_err(|_| TunerError::UnreadableLine(lineno + 1))?;
            let quiet = resolve_to_quiet(&pos, weights);

            let (phase, fmg, feg) = phase_of(&quiet);
            let (white_relative, trace) = evaluate_trace(&quiet, weights);
            let base_eval = f64::from(white_relative.value());
            let handle = arena.alloc(&trace.entries);

            entries.push(TexelEntry {
                result: outcome.as_result(),
                phase,
                fmg,
                feg,
                base_eval,
                tuples: handle,
            });
        }

        Ok(TrainingSet { entries, arena })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Refine the logistic scale `K` by `precision` rounds of window-shrinking
    /// scan.
    #[must_use]
    pub fn compute_optimal_k(&self, precision: u32) -> f64 {
        let mut start = -10.0;
        let mut end = 10.0;
        let mut delta = 1.0;
        let mut best = self.complete_evaluation_error(start);

        for _ in 0..precision {
            let mut curr = start;
            while curr < end {
                curr += delta;
                let error = self.complete_evaluation_error(curr);
                if error <= best {
                    best = error;
                    start = curr;
                }
            }
            end = start + delta;
            start -= delta;
            delta /= 10.0;
        }

        start
    }

    fn complete_evaluation_error(&self, k: f64) -> f64 {
        let total: f64 = self
            .entries
            .iter()
            .map(|e| (e.result - sigmoid(k, e.base_eval)).powi(2))
            .sum();
        total / self.entries.len() as f64
    }

    fn complete_linear_error(&self, params: &FloatWeights, k: f64) -> f64 {
        let total: f64 = self
            .entries
            .iter()
            .map(|e| (e.result - sigmoid(k, self.linear_evaluation(e, params))).powi(2))
            .sum();
        total / self.entries.len() as f64
    }

    /// `base_eval + blend(delta-from-default contributed by `params`)`, i.e.
    /// the candidate evaluation under `base_weights + params`. `params` is
    /// kept in `f64` throughout training so the sub-1.0 per-entry gradient
    /// contributions below don't round away to nothing before they accumulate.
    fn linear_evaluation(&self, entry: &TexelEntry, params: &FloatWeights) -> f64 {
        let mut mg = 0.0;
        let mut eg = 0.0;
        for &(index, coeff) in self.arena.get(entry.tuples) {
            let (term_mg, term_eg) = params[index as usize];
            mg += f64::from(coeff) * term_mg;
            eg += f64::from(coeff) * term_eg;
        }
        let eg_weight = f64::from(entry.phase);
        let mg_weight = 256.0 - eg_weight;
        entry.base_eval + (mg * mg_weight + eg * eg_weight) / 256.0
    }

    fn single_linear_error(&self, entry: &TexelEntry, params: &FloatWeights, k: f64) -> f64 {
        let sigm = sigmoid(k, self.linear_evaluation(entry, params));
        (entry.result - sigm) * sigm * (1.0 - sigm)
    }

    /// Pair-swap shuffle: `n` iterations of swapping two independently drawn
    /// random indices. Not a textbook Fisher-Yates (it may no-op on a given
    /// iteration, and is not guaranteed uniform) but matches the shuffling
    /// discipline the training dynamics below were tuned against.
    fn shuffle(&mut self) {
        let n = self.entries.len();
        if n == 0 {
            return;
        }
        for _ in 0..n {
            let a = fastrand::usize(0..n);
            let b = fastrand::usize(0..n);
            self.entries.swap(a, b);
        }
    }

    /// Accumulate one batch's gradient into `gradient`. The `2/batch_size`
    /// scale factor is applied once by the caller, not per-entry. Kept in
    /// `f64`: `err * fmg/feg * coeff` is a fraction well under 1.0 for almost
    /// every entry, so summing in `i32` would round nearly every
    /// contribution to zero before the batch total ever formed.
    fn accumulate_batch_gradient(
        &self,
        range: std::ops::Range<usize>,
        params: &FloatWeights,
        k: f64,
        gradient: &mut FloatWeights,
    ) {
        for entry in &self.entries[range] {
            let err = self.single_linear_error(entry, params, k);
            for &(index, coeff) in self.arena.get(entry.tuples) {
                let term = &mut gradient[index as usize];
                term.0 += err * entry.fmg * f64::from(coeff);
                term.1 += err * entry.feg * f64::from(coeff);
            }
        }
    }

    /// Run the batch-SGD training loop. `max_epochs` bounds the run for
    /// testability and for CLI users who want a finite tuning session;
    /// parameters are flushed to stdout on every reporting tick so no
    /// progress is lost if the run is killed early.
    pub fn train(&mut self, cparams: &Weights, k: f64, config: TuningConfig, max_epochs: Option<u64>) -> Weights {
        let nterms = cparams.len();
        let mut params = zero_float_weights(nterms);
        let mut rate = config.learning_rate;
        let mut best = f64::MAX;
        let mut epoch = 0u64;

        loop {
            if let Some(max) = max_epochs {
                if epoch >= max {
                    break;
                }
            }
            self.shuffle();

            if epoch % u64::from(config.reporting_interval) == 0 {
                let error = self.complete_linear_error(&params, k);
                if error > best {
                    rate /= config.lr_drop_rate;
                }
                best = error;
                println!("iteration [{epoch}] error = {best}");
            }

            let batch_size = config.batch_size.max(1);
            let batches = (self.entries.len() + batch_size - 1) / batch_size;
            for batch in 0..batches {
                let start = batch * batch_size;
                let end = (start + batch_size).min(self.entries.len());
                let mut gradient = zero_float_weights(nterms);
                self.accumulate_batch_gradient(start..end, &params, k, &mut gradient);

                let scale = 2.0 / (end - start).max(1) as f64;
                for (p, g) in params.iter_mut().zip(gradient.iter()) {
                    p.0 += scale * rate * g.0;
                    p.1 += scale * rate * g.1;
                }
            }

            epoch += 1;
        }

        // Only rounded to i32 here, at the single point the trained deltas
        // are folded into the starting weights for output.
        params
            .iter()
            .zip(cparams.iter())
            .map(|(p, c)| Score::new(p.0.round() as i32 + c.mg, p.1.round() as i32 + c.eg))
            .collect()
    }
}

#[must_use]
/// `sigma(K, S) = 1 / (1 + 10^(-K*S/400))`.
pub fn sigmoid(k: f64, s: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf(-k * s / 400.0))
}

#[derive(Debug, Clone, Copy)]
/// Compile-time-ish knobs for one tuning run.
pub struct TuningConfig {
    pub batch_size: usize,
    pub learning_rate: f64,
    pub lr_drop_rate: f64,
    pub reporting_interval: u32,
    pub k_precision: u32,
}

impl Default for TuningConfig {
    fn default() -> TuningConfig {
        TuningConfig {
            batch_size: 16_384,
            learning_rate: 0.01,
            lr_drop_rate: 1.5,
            reporting_interval: 10,
            k_precision: 10,
        }
    }
}

/// Per-term `(mg, eg)` deltas in flight during training, kept as `f64`
/// rather than [`Weights`]: gradient contributions are fractions with
/// magnitude well under 1.0, and `Score`'s `i32` fields would truncate
/// nearly every one of them to zero before a batch ever finished summing.
type FloatWeights = Vec<(f64, f64)>;

fn zero_float_weights(n: usize) -> FloatWeights {
    vec![(0.0, 0.0); n]
}

/// Emit the tuned weight table as paste-compilable-looking declarations,
/// one per term index grouped by the evaluator submodule that owns it.
/// Terms are not all individually named outside their own module, so this
/// emits `<module>[<local index>] = S(mg, eg);` rather than inventing
/// per-square names that don't exist elsewhere in the evaluator.
#[must_use]
pub fn format_parameters(weights: &Weights) -> String {
    use std::fmt::Write;
    let ranges: [(&str, usize, usize); 6] = [
        ("MATERIAL", eval::MATERIAL_BASE, eval::PST_BASE),
        ("PST", eval::PST_BASE, eval::PAWNS_BASE),
        ("PAWNS", eval::PAWNS_BASE, eval::PIECES_BASE),
        ("PIECES", eval::PIECES_BASE, eval::KING_SAFETY_BASE),
        ("KING_SAFETY", eval::KING_SAFETY_BASE, eval::THREATS_BASE),
        ("THREATS", eval::THREATS_BASE, eval::NTERMS),
    ];
    let mut out = String::new();
    for (name, start, end) in ranges {
        for (local, idx) in (start..end).enumerate() {
            let s = weights[idx];
            let _ = writeln!(out, "const int {name}[{local}] = S({}, {});", s.mg, s.eg);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_bounded_and_centered() {
        assert!((sigmoid(1.0, 0.0) - 0.5).abs() < 1e-12);
        assert!((sigmoid(1.0, 1e9) - 1.0).abs() < 1e-12);
        assert!((sigmoid(1.0, -1e9) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn sigmoid_is_monotone_increasing_for_positive_k() {
        let low = sigmoid(1.0, -50.0);
        let high = sigmoid(1.0, 50.0);
        assert!(high > low);
    }

    #[test]
    fn outcome_parses_results_and_ignores_trailing_tokens() {
        assert_eq!(Outcome::parse("... w KQkq - 0 1 1-0"), Some(Outcome::WhiteWin));
        assert_eq!(Outcome::parse("... b - - 0 1 0-1"), Some(Outcome::BlackWin));
        assert_eq!(Outcome::parse("... w - - 0 1 1/2-1/2"), Some(Outcome::Draw));
        assert_eq!(Outcome::parse("garbage line"), None);
    }

    fn toy_set(results: &[f64]) -> TrainingSet {
        let mut arena = TupleArena::new();
        let entries = results
            .iter()
            .map(|&result| TexelEntry {
                result,
                phase: 0,
                fmg: 1.0,
                feg: 0.0,
                base_eval: 0.0,
                tuples: arena.alloc(&[]),
            })
            .collect();
        TrainingSet { entries, arena }
    }

    #[test]
    fn shuffle_is_a_permutation_of_the_same_elements() {
        let mut set = toy_set(&[0.0, 1.0, 0.5, 1.0, 0.0, 0.5, 1.0, 0.0]);
        let mut before: Vec<i64> = set.entries.iter().map(|e| (e.result * 10.0) as i64).collect();
        set.shuffle();
        let mut after: Vec<i64> = set.entries.iter().map(|e| (e.result * 10.0) as i64).collect();
        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
    }

    #[test]
    fn zero_coefficient_entries_have_zero_linear_evaluation_delta() {
        let set = toy_set(&[1.0]);
        let params = zero_float_weights(eval::NTERMS);
        let v = set.linear_evaluation(&set.entries[0], &params);
        assert_eq!(v, 0.0);
    }

    #[test]
    fn batch_gradient_accumulates_fractional_contributions_without_truncation() {
        let mut arena = TupleArena::new();
        let entry = TexelEntry {
            result: 1.0,
            phase: 0,
            fmg: 1.0,
            feg: 0.0,
            base_eval: 0.0,
            tuples: arena.alloc(&[(0, 1)]),
        };
        let set = TrainingSet {
            entries: vec![entry],
            arena,
        };

        let params = zero_float_weights(1);
        let mut gradient = zero_float_weights(1);
        set.accumulate_batch_gradient(0..1, &params, 1.0, &mut gradient);

        // A single entry's contribution here is err * fmg * coeff, a fraction
        // with magnitude under 1.0; an i32 accumulator would round this to 0.
        assert_ne!(gradient[0].0, 0.0);
        assert!(gradient[0].0.abs() < 1.0);
        assert_eq!(gradient[0].1, 0.0);
    }
}
