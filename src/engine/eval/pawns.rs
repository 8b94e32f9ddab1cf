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

//! Pawn-structure terms: isolated, doubled, backward, connected, candidate
//! passers, and passed pawns (by rank, with king-distance and
//! safe-promotion-path bonuses, folded in from the original evaluator).

use crate::base::{Bitboard, Color, Piece, Position, Square};

use super::{Score, Trace, Weights, PAWNS_BASE};

const ISOLATED: usize = 0;
const DOUBLED: usize = 1;
const BACKWARD: usize = 2;
const CONNECTED: usize = 3;
const CANDIDATE: usize = 4;
const PASSED_BY_RANK: usize = 5; // occupies 8 slots, one per relative rank
const PASSED_FRIENDLY_KING_DIST: usize = PASSED_BY_RANK + 8;
const PASSED_ENEMY_KING_DIST: usize = PASSED_FRIENDLY_KING_DIST + 1;
const PASSED_SAFE_PROMOTION_PATH: usize = PASSED_ENEMY_KING_DIST + 1;

pub const COUNT: usize = PASSED_SAFE_PROMOTION_PATH + 1;

pub fn install_defaults(weights: &mut Weights) {
    weights[PAWNS_BASE + ISOLATED] = Score::new(-12, -10);
    weights[PAWNS_BASE + DOUBLED] = Score::new(-8, -16);
    weights[PAWNS_BASE + BACKWARD] = Score::new(-10, -6);
    weights[PAWNS_BASE + CONNECTED] = Score::new(6, 4);
    weights[PAWNS_BASE + CANDIDATE] = Score::new(10, 14);
    let passed_by_rank: [Score; 8] = [
        Score::new(0, 0),
        Score::new(2, 4),
        Score::new(4, 8),
        Score::new(8, 16),
        Score::new(16, 32),
        Score::new(32, 56),
        Score::new(52, 84),
        Score::new(0, 0),
    ];
    for (rank, score) in passed_by_rank.into_iter().enumerate() {
        weights[PAWNS_BASE + PASSED_BY_RANK + rank] = score;
    }
    weights[PAWNS_BASE + PASSED_FRIENDLY_KING_DIST] = Score::new(0, 6);
    weights[PAWNS_BASE + PASSED_ENEMY_KING_DIST] = Score::new(0, -4);
    weights[PAWNS_BASE + PASSED_SAFE_PROMOTION_PATH] = Score::new(0, 20);
}

fn file_mask(file: u8) -> Bitboard {
    const A_FILE: u64 = 0x0101_0101_0101_0101;
    Bitboard::new(A_FILE << file)
}

fn adjacent_files_mask(file: u8) -> Bitboard {
    let mut mask = Bitboard::EMPTY;
    if file > 0 {
        mask |= file_mask(file - 1);
    }
    if file < 7 {
        mask |= file_mask(file + 1);
    }
    mask
}

/// Squares strictly ahead of `sq` (in `color`'s direction of travel) on the
/// given files.
fn ahead_mask(sq: Square, color: Color, files: Bitboard) -> Bitboard {
    let mut mask = Bitboard::EMPTY;
    for s in files {
        let ahead = match color {
            Color::White => s.rank() > sq.rank(),
            Color::Black => s.rank() < sq.rank(),
        };
        if ahead {
            mask.insert(s);
        }
    }
    mask
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
        self.total += weights[PAWNS_BASE + term] * net;
        if let Some(t) = self.trace.as_deref_mut() {
            t.add(PAWNS_BASE + term, net);
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
        let own_pawns = pos.pieces_of(color, Piece::Pawn);
        let enemy_pawns = pos.pieces_of(!color, Piece::Pawn);
        let enemy_king = pos.king_square(!color);
        let own_king = pos.king_square(color);

        for sq in own_pawns {
            let file = sq.file();
            let own_file_count = (own_pawns & file_mask(file)).len();
            let has_adjacent_friendly = !(own_pawns & adjacent_files_mask(file)).is_empty();

            if !has_adjacent_friendly {
                acc.add(weights, ISOLATED, sign);
            }
            if own_file_count > 1 {
                acc.add(weights, DOUBLED, sign);
            }

            let defended = {
                let back = -(color.pawn_rank_step());
                [-1i8, 1].into_iter().any(|df| {
                    sq.offset(back, df)
                        .is_some_and(|from| own_pawns.contains(from))
                })
            };
            if defended {
                acc.add(weights, CONNECTED, sign);
            }

            let ahead_adjacent_enemy = ahead_mask(sq, color, adjacent_files_mask(file)) & enemy_pawns;
            let ahead_own_file_enemy = ahead_mask(sq, color, file_mask(file)) & enemy_pawns;
            let is_passed = ahead_adjacent_enemy.is_empty() && ahead_own_file_enemy.is_empty();

            if !defended && !has_adjacent_friendly && !is_passed {
                // A pawn with no support and no friendly pawn beside it that
                // also cannot be defended going forward is backward.
                let stop = sq.offset(color.pawn_rank_step(), 0);
                let stop_attacked_by_enemy_pawn = stop.is_some_and(|stop_sq| {
                    let back = -(color.pawn_rank_step());
                    [-1i8, 1].into_iter().any(|df| {
                        stop_sq
                            .offset(back, df)
                            .is_some_and(|from| enemy_pawns.contains(from))
                    })
                });
                if stop_attacked_by_enemy_pawn {
                    acc.add(weights, BACKWARD, sign);
                }
            }

            if is_passed {
                let relative_rank = match color {
                    Color::White => sq.rank(),
                    Color::Black => 7 - sq.rank(),
                };
                acc.add(weights, PASSED_BY_RANK + relative_rank as usize, sign);

                let friendly_dist = i32::from(sq.chebyshev_to(own_king));
                let enemy_dist = i32::from(sq.chebyshev_to(enemy_king));
                acc.add(weights, PASSED_FRIENDLY_KING_DIST, sign * friendly_dist);
                acc.add(weights, PASSED_ENEMY_KING_DIST, sign * enemy_dist);

                let promotion_path_clear = ahead_mask(sq, color, file_mask(file))
                    .into_iter()
                    .all(|s| pos.piece_at(s).is_none());
                if promotion_path_clear {
                    acc.add(weights, PASSED_SAFE_PROMOTION_PATH, sign);
                }
            } else {
                // Candidate passer: no enemy pawn directly ahead on this
                // file, and at least as many friendly helpers as enemy
                // blockers on the adjacent files ahead.
                if ahead_own_file_enemy.is_empty() {
                    let friendly_helpers =
                        (ahead_mask(sq, !color, adjacent_files_mask(file)) & own_pawns).len();
                    let enemy_blockers = ahead_adjacent_enemy.len();
                    if friendly_helpers >= enemy_blockers {
                        acc.add(weights, CANDIDATE, sign);
                    }
                }
            }
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
    fn startpos_has_no_pawn_structure_terms() {
        let pos = Position::startpos();
        assert_eq!(evaluate(&pos, &weights(), None), Score::ZERO);
    }

    #[test]
    fn isolated_doubled_pawn_is_penalized() {
        // White pawns on a2 and a3: doubled and isolated (no b-pawn).
        let pos = Position::from_fen("4k3/8/8/8/8/P7/P7/4K3 w - - 0 1").unwrap();
        let score = evaluate(&pos, &weights(), None);
        assert!(score.mg < 0);
    }

    #[test]
    fn lone_passed_pawn_scores_positive_in_endgame() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/P7/4K3 w - - 0 1").unwrap();
        let score = evaluate(&pos, &weights(), None);
        assert!(score.eg > 0);
    }
}
