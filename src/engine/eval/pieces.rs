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

//! Minor-piece outposts, the bishop pair, rook file/rank placement, and
//! mobility by piece type.

use crate::base::{
    direction::{leaper_attacks, ray_attacks, BISHOP_DIRECTIONS, KNIGHT_OFFSETS, ROOK_DIRECTIONS},
    Bitboard, Color, Piece, Position, Square,
};

use super::{Score, Trace, Weights, PIECES_BASE};

const KNIGHT_OUTPOST: usize = 0;
const BISHOP_OUTPOST: usize = 1;
const KNIGHT_BEHIND_PAWN: usize = 2;
const BISHOP_BEHIND_PAWN: usize = 3;
const BISHOP_PAIR: usize = 4;
const ROOK_OPEN_FILE: usize = 5;
const ROOK_SEMI_OPEN_FILE: usize = 6;
const ROOK_ON_SEVENTH: usize = 7;
const MOBILITY_KNIGHT: usize = 8;
const MOBILITY_BISHOP: usize = 9;
const MOBILITY_ROOK: usize = 10;
const MOBILITY_QUEEN: usize = 11;

pub const COUNT: usize = MOBILITY_QUEEN + 1;

pub fn install_defaults(weights: &mut Weights) {
    weights[PIECES_BASE + KNIGHT_OUTPOST] = Score::new(18, 10);
    weights[PIECES_BASE + BISHOP_OUTPOST] = Score::new(14, 8);
    weights[PIECES_BASE + KNIGHT_BEHIND_PAWN] = Score::new(4, 2);
    weights[PIECES_BASE + BISHOP_BEHIND_PAWN] = Score::new(4, 2);
    weights[PIECES_BASE + BISHOP_PAIR] = Score::new(28, 42);
    weights[PIECES_BASE + ROOK_OPEN_FILE] = Score::new(20, 10);
    weights[PIECES_BASE + ROOK_SEMI_OPEN_FILE] = Score::new(10, 6);
    weights[PIECES_BASE + ROOK_ON_SEVENTH] = Score::new(14, 24);
    weights[PIECES_BASE + MOBILITY_KNIGHT] = Score::new(4, 4);
    weights[PIECES_BASE + MOBILITY_BISHOP] = Score::new(4, 5);
    weights[PIECES_BASE + MOBILITY_ROOK] = Score::new(2, 4);
    weights[PIECES_BASE + MOBILITY_QUEEN] = Score::new(1, 2);
}

fn file_mask(file: u8) -> Bitboard {
    const A_FILE: u64 = 0x0101_0101_0101_0101;
    Bitboard::new(A_FILE << file)
}

/// Whether an enemy pawn could ever challenge this square by advancing,
/// i.e. no enemy pawn sits on an adjacent file at or ahead of this rank
/// (from the enemy's perspective, "ahead" means toward us).
fn is_outpost_square(pos: &Position, sq: Square, color: Color) -> bool {
    let enemy_pawns = pos.pieces_of(!color, Piece::Pawn);
    for df in [-1i8, 1] {
        let Some(file_sq) = sq.offset(0, df) else { continue };
        let file = file_sq.file();
        for p in enemy_pawns & file_mask(file) {
            let behind_us = match color {
                Color::White => p.rank() >= sq.rank(),
                Color::Black => p.rank() <= sq.rank(),
            };
            if behind_us {
                return false;
            }
        }
    }
    let defended_by_own_pawn = {
        let back = -(color.pawn_rank_step());
        [-1i8, 1]
            .into_iter()
            .any(|df| sq.offset(back, df).is_some_and(|from| pos.pieces_of(color, Piece::Pawn).contains(from)))
    };
    defended_by_own_pawn
}

fn is_behind_own_pawn(pos: &Position, sq: Square, color: Color) -> bool {
    let back = -(color.pawn_rank_step());
    sq.offset(back, 0)
        .is_some_and(|from| pos.pieces_of(color, Piece::Pawn).contains(from))
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
        self.total += weights[PIECES_BASE + term] * net;
        if let Some(t) = self.trace.as_deref_mut() {
            t.add(PIECES_BASE + term, net);
        }
    }
}

pub fn evaluate(pos: &Position, weights: &Weights, trace: Option<&mut Trace>) -> Score {
    let mut acc = Accum {
        total: Score::ZERO,
        trace,
    };
    let occ = pos.occupied();

    for color in Color::ALL {
        let sign = if color == Color::White { 1 } else { -1 };
        let own = pos.occupied_by(color);
        let own_pawns = pos.pieces_of(color, Piece::Pawn);
        let enemy_pawns = pos.pieces_of(!color, Piece::Pawn);

        for sq in pos.pieces_of(color, Piece::Knight) {
            if is_outpost_square(pos, sq, color) {
                acc.add(weights, KNIGHT_OUTPOST, sign);
            }
            if is_behind_own_pawn(pos, sq, color) {
                acc.add(weights, KNIGHT_BEHIND_PAWN, sign);
            }
            let mobility = (leaper_attacks(sq, &KNIGHT_OFFSETS) & !own).len() as i32;
            acc.add(weights, MOBILITY_KNIGHT, sign * mobility);
        }

        let bishops = pos.pieces_of(color, Piece::Bishop);
        if bishops.len() >= 2 {
            acc.add(weights, BISHOP_PAIR, sign);
        }
        for sq in bishops {
            if is_outpost_square(pos, sq, color) {
                acc.add(weights, BISHOP_OUTPOST, sign);
            }
            if is_behind_own_pawn(pos, sq, color) {
                acc.add(weights, BISHOP_BEHIND_PAWN, sign);
            }
            let mut attacks = Bitboard::EMPTY;
            for dir in BISHOP_DIRECTIONS {
                attacks |= ray_attacks(sq, dir, occ);
            }
            acc.add(weights, MOBILITY_BISHOP, sign * (attacks & !own).len() as i32);
        }

        let seventh_rank = match color {
            Color::White => 6,
            Color::Black => 1,
        };
        for sq in pos.pieces_of(color, Piece::Rook) {
            let file = sq.file();
            if (own_pawns & file_mask(file)).is_empty() {
                if (enemy_pawns & file_mask(file)).is_empty() {
                    acc.add(weights, ROOK_OPEN_FILE, sign);
                } else {
                    acc.add(weights, ROOK_SEMI_OPEN_FILE, sign);
                }
            }
            if sq.rank() == seventh_rank {
                acc.add(weights, ROOK_ON_SEVENTH, sign);
            }
            let mut attacks = Bitboard::EMPTY;
            for dir in ROOK_DIRECTIONS {
                attacks |= ray_attacks(sq, dir, occ);
            }
            acc.add(weights, MOBILITY_ROOK, sign * (attacks & !own).len() as i32);
        }

        for sq in pos.pieces_of(color, Piece::Queen) {
            let mut attacks = Bitboard::EMPTY;
            for dir in ROOK_DIRECTIONS {
                attacks |= ray_attacks(sq, dir, occ);
            }
            for dir in BISHOP_DIRECTIONS {
                attacks |= ray_attacks(sq, dir, occ);
            }
            acc.add(weights, MOBILITY_QUEEN, sign * (attacks & !own).len() as i32);
        }
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
    fn startpos_has_zero_mobility_imbalance() {
        let pos = Position::startpos();
        assert_eq!(evaluate(&pos, &weights(), None), Score::ZERO);
    }

    #[test]
    fn bishop_pair_is_rewarded() {
        let with_pair = Position::from_fen("4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1").unwrap();
        let without_pair = Position::from_fen("4k3/8/8/8/8/8/8/3BK3 w - - 0 1").unwrap();
        let a = evaluate(&with_pair, &weights(), None);
        let b = evaluate(&without_pair, &weights(), None);
        assert!(a.mg > b.mg);
    }
}
