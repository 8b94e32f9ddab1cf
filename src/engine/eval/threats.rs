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

//! Threat terms, folded in from the original evaluator's `evaluate.h`
//! externs: weak pawns, minors and majors under attack by something
//! cheaper, overloaded defenders, and the threat of a pawn push.

use crate::base::{
    direction::{
        leaper_attacks, ray_attacks, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS,
        ROOK_DIRECTIONS,
    },
    Bitboard, Color, Piece, Position, Square,
};

use super::{Score, Trace, Weights, THREATS_BASE};

const WEAK_PAWN: usize = 0;
const MINOR_ATTACKED_BY_PAWN: usize = 1;
const MINOR_ATTACKED_BY_MINOR: usize = 2;
const MINOR_ATTACKED_BY_MAJOR: usize = 3;
const ROOK_ATTACKED_BY_LESSER: usize = 4;
const QUEEN_ATTACKED_BY_ONE: usize = 5;
const OVERLOADED: usize = 6;
const THREAT_BY_PAWN_PUSH: usize = 7;

pub const COUNT: usize = THREAT_BY_PAWN_PUSH + 1;

pub fn install_defaults(weights: &mut Weights) {
    weights[THREATS_BASE + WEAK_PAWN] = Score::new(-10, -6);
    weights[THREATS_BASE + MINOR_ATTACKED_BY_PAWN] = Score::new(-40, -32);
    weights[THREATS_BASE + MINOR_ATTACKED_BY_MINOR] = Score::new(-18, -14);
    weights[THREATS_BASE + MINOR_ATTACKED_BY_MAJOR] = Score::new(-14, -10);
    weights[THREATS_BASE + ROOK_ATTACKED_BY_LESSER] = Score::new(-44, -36);
    weights[THREATS_BASE + QUEEN_ATTACKED_BY_ONE] = Score::new(-50, -40);
    weights[THREATS_BASE + OVERLOADED] = Score::new(-8, -6);
    weights[THREATS_BASE + THREAT_BY_PAWN_PUSH] = Score::new(12, 10);
}

fn pawn_attacks(pawns: Bitboard, color: Color) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for sq in pawns {
        for df in [-1i8, 1] {
            if let Some(to) = sq.offset(color.pawn_rank_step(), df) {
                attacks.insert(to);
            }
        }
    }
    attacks
}

fn all_attacks(pos: &Position, color: Color, occ: Bitboard) -> Bitboard {
    let mut attacks = pawn_attacks(pos.pieces_of(color, Piece::Pawn), color);
    for sq in pos.pieces_of(color, Piece::Knight) {
        attacks |= leaper_attacks(sq, &KNIGHT_OFFSETS);
    }
    for sq in pos.pieces_of(color, Piece::King) {
        attacks |= leaper_attacks(sq, &KING_OFFSETS);
    }
    for sq in pos.pieces_of(color, Piece::Bishop) | pos.pieces_of(color, Piece::Queen) {
        for dir in BISHOP_DIRECTIONS {
            attacks |= ray_attacks(sq, dir, occ);
        }
    }
    for sq in pos.pieces_of(color, Piece::Rook) | pos.pieces_of(color, Piece::Queen) {
        for dir in ROOK_DIRECTIONS {
            attacks |= ray_attacks(sq, dir, occ);
        }
    }
    attacks
}

fn attackers_of(pos: &Position, sq: Square, by: Color, occ: Bitboard) -> Bitboard {
    let mut attackers = Bitboard::EMPTY;
    let pawn_back = -(by.pawn_rank_step());
    for df in [-1i8, 1] {
        if let Some(from) = sq.offset(pawn_back, df) {
            if pos.pieces_of(by, Piece::Pawn).contains(from) {
                attackers.insert(from);
            }
        }
    }
    attackers |= leaper_attacks(sq, &KNIGHT_OFFSETS) & pos.pieces_of(by, Piece::Knight);
    attackers |= leaper_attacks(sq, &KING_OFFSETS) & pos.pieces_of(by, Piece::King);
    let bishop_like = pos.pieces_of(by, Piece::Bishop) | pos.pieces_of(by, Piece::Queen);
    for dir in BISHOP_DIRECTIONS {
        attackers |= ray_attacks(sq, dir, occ) & bishop_like;
    }
    let rook_like = pos.pieces_of(by, Piece::Rook) | pos.pieces_of(by, Piece::Queen);
    for dir in ROOK_DIRECTIONS {
        attackers |= ray_attacks(sq, dir, occ) & rook_like;
    }
    attackers
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
        self.total += weights[THREATS_BASE + term] * net;
        if let Some(t) = self.trace.as_deref_mut() {
            t.add(THREATS_BASE + term, net);
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
        let enemy = !color;
        let enemy_pawn_attacks = pawn_attacks(pos.pieces_of(enemy, Piece::Pawn), enemy);
        let enemy_minor_attacks = {
            let mut a = Bitboard::EMPTY;
            for sq in pos.pieces_of(enemy, Piece::Knight) {
                a |= leaper_attacks(sq, &KNIGHT_OFFSETS);
            }
            for sq in pos.pieces_of(enemy, Piece::Bishop) {
                for dir in BISHOP_DIRECTIONS {
                    a |= ray_attacks(sq, dir, occ);
                }
            }
            a
        };
        let enemy_major_attacks = {
            let mut a = Bitboard::EMPTY;
            for sq in pos.pieces_of(enemy, Piece::Rook) | pos.pieces_of(enemy, Piece::Queen) {
                for dir in ROOK_DIRECTIONS {
                    a |= ray_attacks(sq, dir, occ);
                }
                for dir in BISHOP_DIRECTIONS {
                    if pos.piece_at(sq).is_some_and(|(_, p)| p == Piece::Queen) {
                        a |= ray_attacks(sq, dir, occ);
                    }
                }
            }
            a
        };

        let own_pawns = pos.pieces_of(color, Piece::Pawn);
        let defended_pawns = pawn_attacks(own_pawns, color) & own_pawns;
        let weak_pawns = own_pawns & !defended_pawns & all_attacks(pos, enemy, occ);
        acc.add(weights, WEAK_PAWN, sign * weak_pawns.len() as i32);

        let minors = pos.pieces_of(color, Piece::Knight) | pos.pieces_of(color, Piece::Bishop);
        acc.add(
            weights,
            MINOR_ATTACKED_BY_PAWN,
            sign * (minors & enemy_pawn_attacks).len() as i32,
        );
        acc.add(
            weights,
            MINOR_ATTACKED_BY_MINOR,
            sign * (minors & enemy_minor_attacks).len() as i32,
        );
        acc.add(
            weights,
            MINOR_ATTACKED_BY_MAJOR,
            sign * (minors & enemy_major_attacks).len() as i32,
        );

        let rooks = pos.pieces_of(color, Piece::Rook);
        let lesser_attacks = enemy_pawn_attacks | enemy_minor_attacks;
        acc.add(
            weights,
            ROOK_ATTACKED_BY_LESSER,
            sign * (rooks & lesser_attacks).len() as i32,
        );

        let queens = pos.pieces_of(color, Piece::Queen);
        let any_enemy_attack = all_attacks(pos, enemy, occ);
        acc.add(
            weights,
            QUEEN_ATTACKED_BY_ONE,
            sign * (queens & any_enemy_attack).len() as i32,
        );

        // Overloaded: an own piece defending two or more friendly pieces
        // that are themselves under enemy attack.
        let mut overloaded = 0i32;
        for sq in pos.occupied_by(color) {
            if pos.piece_at(sq).is_some_and(|(_, p)| p == Piece::King) {
                continue;
            }
            let defended_and_attacked = (0..64u8)
                .filter_map(|i| {
                    let target = Square::from_index(i);
                    (target != sq
                        && pos.occupied_by(color).contains(target)
                        && attackers_of(pos, target, color, occ).contains(sq)
                        && !attackers_of(pos, target, enemy, occ).is_empty())
                    .then_some(target)
                })
                .count();
            if defended_and_attacked >= 2 {
                overloaded += 1;
            }
        }
        acc.add(weights, OVERLOADED, sign * overloaded);

        // Threat by pawn push: a pawn that could step forward one square
        // next move into a square attacking an enemy minor or major.
        let enemy_minor_major = pos.pieces_of(enemy, Piece::Knight)
            | pos.pieces_of(enemy, Piece::Bishop)
            | pos.pieces_of(enemy, Piece::Rook)
            | pos.pieces_of(enemy, Piece::Queen);
        let mut push_threats = 0i32;
        for sq in own_pawns {
            let Some(step) = sq.offset(color.pawn_rank_step(), 0) else { continue };
            if pos.piece_at(step).is_some() {
                continue;
            }
            let reach = pawn_attacks(Bitboard::from_square(step), color);
            if !(reach & enemy_minor_major).is_empty() {
                push_threats += 1;
            }
        }
        acc.add(weights, THREAT_BY_PAWN_PUSH, sign * push_threats);
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
    fn startpos_has_no_threats() {
        let pos = Position::startpos();
        assert_eq!(evaluate(&pos, &weights(), None), Score::ZERO);
    }

    #[test]
    fn hanging_minor_is_penalized() {
        // Black knight on e4 attacked by white pawn on d3/f3? use a simple pawn attack.
        let pos = Position::from_fen("4k3/8/8/8/4n3/3P4/8/4K3 w - - 0 1").unwrap();
        let score = evaluate(&pos, &weights(), None);
        assert!(score.mg > 0, "white should be ahead due to the hanging knight");
    }
}
