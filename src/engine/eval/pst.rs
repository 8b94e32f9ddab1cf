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

//! Piece-square tables: a tunable `(mg, eg)` term per `(piece, square)` pair
//! for queen/rook/bishop/knight/pawn, plus a king table as an enrichment
//! (king safety alone does not capture centralization in the endgame).
//!
//! Tables are indexed from White's perspective, A1 = 0. A Black piece's
//! contribution is looked up at the vertically mirrored square, since the
//! board is symmetric about the midline for positional purposes.

use crate::base::{Color, Piece, Position, Square};

use super::{Score, Trace, Weights, PST_BASE};

pub const COUNT: usize = Piece::NUM * 64;

fn term_index(piece: Piece, sq: Square) -> usize {
    PST_BASE + piece as usize * 64 + sq as usize
}

/// Seed values: modest centralization bonuses, flat for pieces where the
/// tuner is expected to do the real work. Written rank-by-rank from White's
/// first rank upward.
const PAWN_MG: [i32; 64] = [
    0, 0, 0, 0, 0, 0, 0, 0,
    5, 10, 10, -20, -20, 10, 10, 5,
    5, -5, -10, 0, 0, -10, -5, 5,
    0, 0, 0, 20, 20, 0, 0, 0,
    5, 5, 10, 25, 25, 10, 5, 5,
    10, 10, 20, 30, 30, 20, 10, 10,
    50, 50, 50, 50, 50, 50, 50, 50,
    0, 0, 0, 0, 0, 0, 0, 0,
];

const KNIGHT_MG: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20, 0, 5, 5, 0, -20, -40,
    -30, 5, 10, 15, 15, 10, 5, -30,
    -30, 0, 15, 20, 20, 15, 0, -30,
    -30, 5, 15, 20, 20, 15, 5, -30,
    -30, 0, 10, 15, 15, 10, 0, -30,
    -40, -20, 0, 0, 0, 0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

const BISHOP_MG: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10, 5, 0, 0, 0, 0, 5, -10,
    -10, 10, 10, 10, 10, 10, 10, -10,
    -10, 0, 10, 10, 10, 10, 0, -10,
    -10, 5, 5, 10, 10, 5, 5, -10,
    -10, 0, 5, 10, 10, 5, 0, -10,
    -10, 0, 0, 0, 0, 0, 0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

const ROOK_MG: [i32; 64] = [
    0, 0, 0, 5, 5, 0, 0, 0,
    -5, 0, 0, 0, 0, 0, 0, -5,
    -5, 0, 0, 0, 0, 0, 0, -5,
    -5, 0, 0, 0, 0, 0, 0, -5,
    -5, 0, 0, 0, 0, 0, 0, -5,
    -5, 0, 0, 0, 0, 0, 0, -5,
    5, 10, 10, 10, 10, 10, 10, 5,
    0, 0, 0, 0, 0, 0, 0, 0,
];

const QUEEN_MG: [i32; 64] = [
    -20, -10, -10, -5, -5, -10, -10, -20,
    -10, 0, 5, 0, 0, 0, 0, -10,
    -10, 5, 5, 5, 5, 5, 0, -10,
    0, 0, 5, 5, 5, 5, 0, -5,
    -5, 0, 5, 5, 5, 5, 0, -5,
    -10, 0, 5, 5, 5, 5, 0, -10,
    -10, 0, 0, 0, 0, 0, 0, -10,
    -20, -10, -10, -5, -5, -10, -10, -20,
];

const KING_MG: [i32; 64] = [
    20, 30, 10, 0, 0, 10, 30, 20,
    20, 20, 0, 0, 0, 0, 20, 20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
];

const KING_EG: [i32; 64] = [
    -50, -30, -30, -30, -30, -30, -30, -50,
    -30, -30, 0, 0, 0, 0, -30, -30,
    -30, -10, 20, 30, 30, 20, -10, -30,
    -30, -10, 30, 40, 40, 30, -10, -30,
    -30, -10, 30, 40, 40, 30, -10, -30,
    -30, -10, 20, 30, 30, 20, -10, -30,
    -30, -20, -10, 0, 0, -10, -20, -30,
    -50, -40, -30, -20, -20, -30, -40, -50,
];

fn flat_eg_like(mg: &[i32; 64], shrink: i32) -> [i32; 64] {
    let mut eg = [0i32; 64];
    for i in 0..64 {
        eg[i] = mg[i] * shrink / 100;
    }
    eg
}

pub fn install_defaults(weights: &mut Weights) {
    let tables: [(Piece, [i32; 64], [i32; 64]); 6] = [
        (Piece::Pawn, PAWN_MG, flat_eg_like(&PAWN_MG, 80)),
        (Piece::Knight, KNIGHT_MG, flat_eg_like(&KNIGHT_MG, 90)),
        (Piece::Bishop, BISHOP_MG, flat_eg_like(&BISHOP_MG, 90)),
        (Piece::Rook, ROOK_MG, flat_eg_like(&ROOK_MG, 100)),
        (Piece::Queen, QUEEN_MG, flat_eg_like(&QUEEN_MG, 100)),
        (Piece::King, KING_MG, KING_EG),
    ];
    for (piece, mg, eg) in tables {
        for sq in 0..64 {
            weights[PST_BASE + piece as usize * 64 + sq] = Score::new(mg[sq], eg[sq]);
        }
    }
}

pub fn evaluate(pos: &Position, weights: &Weights, mut trace: Option<&mut Trace>) -> Score {
    let mut total = Score::ZERO;
    for piece in Piece::ALL {
        for sq in pos.pieces_of(Color::White, piece) {
            let idx = term_index(piece, sq);
            total += weights[idx];
            if let Some(t) = trace.as_deref_mut() {
                t.add(idx, 1);
            }
        }
        for sq in pos.pieces_of(Color::Black, piece) {
            let idx = term_index(piece, sq.mirror());
            total -= weights[idx];
            if let Some(t) = trace.as_deref_mut() {
                t.add(idx, -1);
            }
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_pst_is_symmetric() {
        let pos = Position::startpos();
        let mut weights = vec![Score::ZERO; super::super::NTERMS];
        install_defaults(&mut weights);
        let score = evaluate(&pos, &weights, None);
        assert_eq!(score, Score::ZERO);
    }
}
