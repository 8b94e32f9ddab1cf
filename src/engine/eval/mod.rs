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

//! Static position evaluation.
//!
//! The evaluator sums a collection of terms, each contributing a `(mg, eg)`
//! pair, then blends middlegame and endgame values by the game's phase.
//! Every term is also recorded, white-relative, into a sparse coefficient
//! trace when one is requested — that trace is what the Texel tuner
//! regresses against game outcomes.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::base::{Color, Piece, Position};

pub mod king_safety;
pub mod material;
pub mod pawns;
pub mod pieces;
pub mod pst;
pub mod threats;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
/// A centipawn evaluation, positive favoring White.
///
/// Magnitudes above [`Eval::MATE_CUTOFF`] encode mate distances: `MATE - ply`
/// for a White mate in `ply` plies, negated for Black. This makes deeper
/// mates score strictly worse than shallow ones, so minimax prefers the
/// fastest mate and avoids the slowest loss.
pub struct Eval(i32);

impl Eval {
    /// The mate-in-0 sentinel.
    pub const MATE: i32 = 32_000;
    /// Magnitudes above this are mate scores, not material scores.
    pub const MATE_CUTOFF: i32 = 31_000;

    pub const DRAW: Eval = Eval(0);
    pub const ZERO: Eval = Eval(0);
    /// Bound comfortably outside any real evaluation, used to seed
    /// alpha-beta's initial window.
    pub const INFINITY: Eval = Eval(Eval::MATE + 1000);
    pub const NEG_INFINITY: Eval = Eval(-(Eval::MATE + 1000));

    #[must_use]
    pub const fn centipawns(v: i32) -> Eval {
        Eval(v)
    }

    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    #[must_use]
    /// A mate for the side to move, delivered in `ply` plies from here.
    pub const fn mate_in(ply: i32) -> Eval {
        Eval(Eval::MATE - ply)
    }

    #[must_use]
    pub const fn is_mate(self) -> bool {
        self.0 > Eval::MATE_CUTOFF || self.0 < -Eval::MATE_CUTOFF
    }

    #[must_use]
    /// Moves until mate, assuming perfect play, or `None` if this is not a
    /// mate score.
    pub const fn moves_to_mate(self) -> Option<i32> {
        if !self.is_mate() {
            return None;
        }
        Some(if self.0 > 0 {
            (Eval::MATE - self.0 + 1) / 2
        } else {
            (Eval::MATE + self.0 + 1) / 2
        })
    }

    #[must_use]
    /// Step a mate score back (further from the mating ply) by one
    /// recursion level, as the score propagates up from a child node to its
    /// parent. Ordinary material scores are unaffected.
    pub const fn step_back_by_one(self) -> Eval {
        if self.0 > Eval::MATE_CUTOFF {
            Eval(self.0 - 1)
        } else if self.0 < -Eval::MATE_CUTOFF {
            Eval(self.0 + 1)
        } else {
            self
        }
    }

    #[must_use]
    pub const fn in_perspective(self, side: Color) -> Eval {
        match side {
            Color::White => self,
            Color::Black => Eval(-self.0),
        }
    }
}

impl Neg for Eval {
    type Output = Eval;
    fn neg(self) -> Eval {
        Eval(-self.0)
    }
}
impl Add for Eval {
    type Output = Eval;
    fn add(self, rhs: Eval) -> Eval {
        Eval(self.0 + rhs.0)
    }
}
impl Sub for Eval {
    type Output = Eval;
    fn sub(self, rhs: Eval) -> Eval {
        Eval(self.0 - rhs.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// A pair of middlegame/endgame centipawn contributions, as used for every
/// tuned evaluation term.
pub struct Score {
    pub mg: i32,
    pub eg: i32,
}

impl Score {
    pub const ZERO: Score = Score { mg: 0, eg: 0 };

    #[must_use]
    pub const fn new(mg: i32, eg: i32) -> Score {
        Score { mg, eg }
    }
}

impl Add for Score {
    type Output = Score;
    fn add(self, rhs: Score) -> Score {
        Score::new(self.mg + rhs.mg, self.eg + rhs.eg)
    }
}
impl AddAssign for Score {
    fn add_assign(&mut self, rhs: Score) {
        self.mg += rhs.mg;
        self.eg += rhs.eg;
    }
}
impl Sub for Score {
    type Output = Score;
    fn sub(self, rhs: Score) -> Score {
        Score::new(self.mg - rhs.mg, self.eg - rhs.eg)
    }
}
impl SubAssign for Score {
    fn sub_assign(&mut self, rhs: Score) {
        self.mg -= rhs.mg;
        self.eg -= rhs.eg;
    }
}
impl Mul<i32> for Score {
    type Output = Score;
    fn mul(self, rhs: i32) -> Score {
        Score::new(self.mg * rhs, self.eg * rhs)
    }
}
impl Neg for Score {
    type Output = Score;
    fn neg(self) -> Score {
        Score::new(-self.mg, -self.eg)
    }
}

/// A sparse record of nonzero term coefficients, white-relative, collected
/// during one evaluation pass. `add(term, white_count - black_count)` is
/// called once per term that applies at all; zero net contributions are not
/// recorded, matching the Texel tuner's expectation of a sparse vector.
#[derive(Debug, Default, Clone)]
pub struct Trace {
    pub entries: Vec<(usize, i32)>,
}

impl Trace {
    #[must_use]
    pub fn new() -> Trace {
        Trace::default()
    }

    pub fn add(&mut self, term: usize, coefficient: i32) {
        if coefficient != 0 {
            self.entries.push((term, coefficient));
        }
    }
}

/// All per-term weights, dense `NTERMS x (mg, eg)`, as tuned by the Texel
/// tuner: a flat array the tuner reads and writes directly by term index.
pub type Weights = Vec<Score>;

#[must_use]
/// The default (hand-tuned) weight table, used when no tuned parameter file
/// is loaded.
pub fn default_weights() -> Weights {
    let mut w = vec![Score::ZERO; NTERMS];
    material::install_defaults(&mut w);
    pst::install_defaults(&mut w);
    pawns::install_defaults(&mut w);
    pieces::install_defaults(&mut w);
    king_safety::install_defaults(&mut w);
    threats::install_defaults(&mut w);
    w
}

// Term-index layout: each sub-module owns a contiguous range and exposes
// `const BASE` plus a `count()` so ranges never overlap.
pub const MATERIAL_BASE: usize = 0;
pub const PST_BASE: usize = MATERIAL_BASE + material::COUNT;
pub const PAWNS_BASE: usize = PST_BASE + pst::COUNT;
pub const PIECES_BASE: usize = PAWNS_BASE + pawns::COUNT;
pub const KING_SAFETY_BASE: usize = PIECES_BASE + pieces::COUNT;
pub const THREATS_BASE: usize = KING_SAFETY_BASE + king_safety::COUNT;
pub const NTERMS: usize = THREATS_BASE + threats::COUNT;

#[must_use]
/// The material-derived phase scalar in `[0, 256]`, with `0` meaning full
/// middlegame and `256` full endgame, plus the fractional `(fmg, feg)`
/// factors the tuner uses for gradient weighting (`fmg + feg = 1`).
pub fn phase_of(pos: &Position) -> (i32, f64, f64) {
    let queens = pos.piece_bitboard(Piece::Queen).len() as i32;
    let rooks = pos.piece_bitboard(Piece::Rook).len() as i32;
    let minors =
        (pos.piece_bitboard(Piece::Bishop).len() + pos.piece_bitboard(Piece::Knight).len()) as i32;
    let material = (4 * queens + 2 * rooks + minors).min(24);
    let phase_raw = 24 - material;
    let phase = (phase_raw * 256 + 12) / 24;
    let fmg = 1.0 - f64::from(phase_raw) / 24.0;
    let feg = f64::from(phase_raw) / 24.0;
    (phase, fmg, feg)
}

#[must_use]
/// Blend a `(mg, eg)` score pair by phase: `(mg*(256-phase) + eg*phase)/256`.
pub fn blend(score: Score, phase: i32) -> i32 {
    (score.mg * (256 - phase) + score.eg * phase) / 256
}

fn evaluate_impl(pos: &Position, weights: &Weights, mut trace: Option<&mut Trace>) -> Score {
    let mut total = Score::ZERO;
    total += material::evaluate(pos, weights, trace.as_deref_mut());
    total += pst::evaluate(pos, weights, trace.as_deref_mut());
    total += pawns::evaluate(pos, weights, trace.as_deref_mut());
    total += pieces::evaluate(pos, weights, trace.as_deref_mut());
    total += king_safety::evaluate(pos, weights, trace.as_deref_mut());
    total += threats::evaluate(pos, weights, trace.as_deref_mut());
    total
}

#[must_use]
/// `evaluate(position) -> centipawn_score`, side-to-move relative, using the
/// default weight table.
pub fn evaluate(pos: &Position) -> Eval {
    evaluate_with(pos, &default_weights())
}

#[must_use]
pub fn evaluate_with(pos: &Position, weights: &Weights) -> Eval {
    let (phase, _, _) = phase_of(pos);
    let white_relative = evaluate_impl(pos, weights, None);
    Eval::centipawns(blend(white_relative, phase)).in_perspective(pos.side_to_move())
}

#[must_use]
/// `evaluate_trace(position) -> (score, coeff_vector)`. Score and
/// coefficients are white-relative, the convention the tuner regresses
/// against.
pub fn evaluate_trace(pos: &Position, weights: &Weights) -> (Eval, Trace) {
    let mut trace = Trace::new();
    let (phase, _, _) = phase_of(pos);
    let white_relative = evaluate_impl(pos, weights, Some(&mut trace));
    (Eval::centipawns(blend(white_relative, phase)), trace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mate_scores_rank_shallower_mate_higher() {
        assert!(Eval::mate_in(1) > Eval::mate_in(3));
        assert!(Eval::mate_in(1).is_mate());
        assert!(!Eval::DRAW.is_mate());
    }

    #[test]
    fn perspective_flips_for_black() {
        let e = Eval::centipawns(150);
        assert_eq!(e.in_perspective(Color::White), e);
        assert_eq!(e.in_perspective(Color::Black), Eval::centipawns(-150));
    }

    #[test]
    fn startpos_is_roughly_balanced() {
        let pos = Position::startpos();
        let e = evaluate(&pos);
        assert!(e.value().abs() < 50, "startpos should be near-zero, got {e:?}");
    }

    #[test]
    fn phase_is_zero_with_full_material_and_256_with_none() {
        let full = Position::startpos();
        let (phase, _, _) = phase_of(&full);
        assert_eq!(phase, 0);

        let bare = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let (phase, _, _) = phase_of(&bare);
        assert_eq!(phase, 256);
    }
}
