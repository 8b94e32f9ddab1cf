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

//! Material term: one tunable `(mg, eg)` weight per non-king piece type.

use crate::base::{Color, Piece, Position};

use super::{Score, Trace, Weights, MATERIAL_BASE};

/// Pawn, knight, bishop, rook, queen — the king has no material value.
pub const COUNT: usize = 5;

const ORDER: [Piece; COUNT] = [
    Piece::Pawn,
    Piece::Knight,
    Piece::Bishop,
    Piece::Rook,
    Piece::Queen,
];

fn term_index(piece: Piece) -> usize {
    MATERIAL_BASE
        + ORDER
            .iter()
            .position(|&p| p == piece)
            .expect("king has no material term")
}

pub fn install_defaults(weights: &mut Weights) {
    let defaults = [
        Score::new(96, 94),
        Score::new(305, 296),
        Score::new(321, 314),
        Score::new(470, 450),
        Score::new(915, 890),
    ];
    for (i, score) in defaults.into_iter().enumerate() {
        weights[MATERIAL_BASE + i] = score;
    }
}

pub fn evaluate(pos: &Position, weights: &Weights, mut trace: Option<&mut Trace>) -> Score {
    let mut total = Score::ZERO;
    for piece in ORDER {
        let white = pos.pieces_of(Color::White, piece).len() as i32;
        let black = pos.pieces_of(Color::Black, piece).len() as i32;
        let net = white - black;
        total += weights[term_index(piece)] * net;
        if let Some(t) = trace.as_deref_mut() {
            t.add(term_index(piece), net);
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_material_is_balanced() {
        let pos = Position::startpos();
        let weights = {
            let mut w = vec![Score::ZERO; super::super::NTERMS];
            install_defaults(&mut w);
            w
        };
        let score = evaluate(&pos, &weights, None);
        assert_eq!(score, Score::ZERO);
    }
}
