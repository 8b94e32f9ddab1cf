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

//! King safety: defenders, pawn shelter and storm indexed by file-slot and
//! rank distance (folded in from the original's `KingShelter`/`KingStorm`
//! tables), and a composite attack-units term.

use crate::base::{
    direction::{KING_OFFSETS, leaper_attacks},
    Bitboard, Color, Piece, Position, Square,
};

use super::{Score, Trace, Weights, KING_SAFETY_BASE};

const DEFENDERS: usize = 0;
const SHELTER_BASE: usize = DEFENDERS + 1; // 3 file-slots x 8 ranks
const SHELTER_SLOTS: usize = 3;
const SHELTER_RANKS: usize = 8;
const STORM_BASE: usize = SHELTER_BASE + SHELTER_SLOTS * SHELTER_RANKS;
const ATTACK_UNITS: usize = STORM_BASE + SHELTER_SLOTS * SHELTER_RANKS;

pub const COUNT: usize = ATTACK_UNITS + 1;

pub fn install_defaults(weights: &mut Weights) {
    weights[KING_SAFETY_BASE + DEFENDERS] = Score::new(6, 2);
    for slot in 0..SHELTER_SLOTS {
        for rank in 0..SHELTER_RANKS {
            // Pawns one step from the king shelter best; farther or absent
            // pawns shelter less.
            let value = 16 - (rank as i32) * 2;
            weights[KING_SAFETY_BASE + SHELTER_BASE + slot * SHELTER_RANKS + rank] =
                Score::new(value.max(-8), 0);
            let storm_value = -(rank as i32) * 3;
            weights[KING_SAFETY_BASE + STORM_BASE + slot * SHELTER_RANKS + rank] =
                Score::new(storm_value, 0);
        }
    }
    weights[KING_SAFETY_BASE + ATTACK_UNITS] = Score::new(-4, 0);
}

fn file_mask(file: u8) -> Bitboard {
    const A_FILE: u64 = 0x0101_0101_0101_0101;
    Bitboard::new(A_FILE << file)
}

/// Which of the three shelter slots (far queenside/center/far kingside
/// relative to the king) `file` falls into.
fn shelter_slot(king_file: u8, file: u8) -> usize {
    match file as i8 - king_file as i8 {
        d if d <= -1 => 0,
        0 => 1,
        _ => 2,
    }
}

/// Rank distance (0..=7) from the king's rank to the nearest pawn on
/// `file`, in the king's forward direction; `7` if there is none.
fn nearest_pawn_rank_distance(pawns: Bitboard, file: u8, king_sq: Square, color: Color) -> usize {
    let candidates = pawns & file_mask(file);
    let mut best = 7usize;
    for p in candidates {
        let dist = match color {
            Color::White => (p.rank() as i32 - king_sq.rank() as i32).max(0),
            Color::Black => (king_sq.rank() as i32 - p.rank() as i32).max(0),
        };
        best = best.min(dist as usize);
    }
    best
}

struct Accum<'a> {
    total: Score,
    trace: Option<&'a mut Trace>,
}

impl Accum<'_> {
    fn add(&mut self, weights: &Weights, term: usize, net: i32) {
        if net == 0 {
            return;
        }
        self.total += weights[KING_SAFETY_BASE + term] * net;
        if let Some(t) = self.trace.as_deref_mut() {
            t.add(KING_SAFETY_BASE + term, net);
        }
    }
}

pub fn evaluate(pos: &Position, weights: &Weights, trace: Option<&mut Trace>) -> Score {
    let mut acc = Accum {
        total: Score::ZERO,
        trace,
    };

    for color in Color::ALL {
        let sign = if color == Color::White { 1 } else { -1 };
        let king_sq = pos.king_square(color);
        let own = pos.occupied_by(color);
        let own_pawns = pos.pieces_of(color, Piece::Pawn);
        let enemy_pawns = pos.pieces_of(!color, Piece::Pawn);

        let defenders = (leaper_attacks(king_sq, &KING_OFFSETS) & own
            & !pos.pieces_of(color, Piece::Pawn))
        .len() as i32;
        acc.add(weights, DEFENDERS, sign * defenders);

        let king_file = king_sq.file();
        for df in [-1i8, 0, 1] {
            let Some(file) = king_file.checked_add_signed(df) else { continue };
            if file > 7 {
                continue;
            }
            let slot = shelter_slot(king_file, file);
            let shelter_rank = nearest_pawn_rank_distance(own_pawns, file, king_sq, color);
            acc.add(weights, SHELTER_BASE + slot * SHELTER_RANKS + shelter_rank, sign);

            let storm_rank = nearest_pawn_rank_distance(enemy_pawns, file, king_sq, color);
            acc.add(weights, STORM_BASE + slot * SHELTER_RANKS + storm_rank, sign);
        }

        let attackers = (leaper_attacks(king_sq, &KING_OFFSETS) & pos.occupied_by(!color)).len() as i32;
        acc.add(weights, ATTACK_UNITS, sign * attackers);
    }

    acc.total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights() -> Weights {
        let mut w = vec![Score::ZERO; super::super::NTERMS];
        install_defaults(&mut w);
        w
    }

    #[test]
    fn startpos_king_safety_is_symmetric() {
        let pos = Position::startpos();
        assert_eq!(evaluate(&pos, &weights(), None), Score::ZERO);
    }

    #[test]
    fn exposed_king_is_penalized_relative_to_sheltered_king() {
        let sheltered = Position::from_fen("8/8/8/8/8/8/PPP5/1K6 w - - 0 1").unwrap();
        let exposed = Position::from_fen("8/8/8/8/8/8/8/1K6 w - - 0 1").unwrap();
        let a = evaluate(&sheltered, &weights(), None);
        let b = evaluate(&exposed, &weights(), None);
        assert!(a.mg > b.mg);
    }
}
