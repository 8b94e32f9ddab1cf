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

//! Cross-module scenarios exercising the board, evaluator, search, and
//! tuner together, rather than any one module in isolation.

use std::time::Duration;

use vantage::base::{gen_all_moves, Move, Position, Square};
use vantage::engine::eval::default_weights;
use vantage::engine::{get_best_move, SearchConfig};
use vantage::tuner::sigmoid;

/// Find the legal move from `pos` matching `from`/`to` algebraic squares,
/// used to replay a short opening without hand-assembling `Move` values.
fn find_move(pos: &Position, from: &str, to: &str) -> Move {
    let from_sq = Square::try_from(from).unwrap();
    let to_sq = Square::try_from(to).unwrap();
    let mut moves = Vec::new();
    gen_all_moves(pos, &mut moves);
    moves
        .into_iter()
        .find(|m| m.from_square() == from_sq && m.to_square() == to_sq)
        .unwrap_or_else(|| panic!("no legal move {from}{to} in this position"))
}

#[test]
fn mate_in_one_is_found() {
    let mut pos = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").unwrap();
    let weights = default_weights();
    let mut config = SearchConfig::default();
    config.max_depth = 4;
    config.report_progress = false;

    let best = get_best_move(&mut pos, &weights, Duration::from_secs(5), config).unwrap();

    let mut after = pos.clone();
    after.apply_move(best);
    let mut replies = Vec::new();
    gen_all_moves(&after, &mut replies);
    let black_has_reply = replies.iter().any(|&m| {
        let mut try_after = after.clone();
        try_after.apply_move(m);
        try_after.is_not_in_check(vantage::base::Color::Black)
    });
    assert!(!black_has_reply, "expected {best} to be checkmate, black still has a legal reply");
    assert!(
        !after.is_not_in_check(vantage::base::Color::Black),
        "expected black to be in check after {best}, otherwise this would be stalemate"
    );
}

#[test]
fn stalemate_position_has_no_legal_move_and_scores_as_a_draw() {
    let pos = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    let mut moves = Vec::new();
    gen_all_moves(&pos, &mut moves);
    let has_legal = moves.iter().any(|&m| {
        let mut after = pos.clone();
        after.apply_move(m);
        after.is_not_in_check(vantage::base::Color::Black)
    });
    assert!(!has_legal, "black should have no legal move here");
}

#[test]
fn checkmate_position_has_no_legal_move() {
    let pos = Position::from_fen("7k/5Q2/5K2/8/8/8/8/8 b - - 0 1").unwrap();
    let mut moves = Vec::new();
    gen_all_moves(&pos, &mut moves);
    let has_legal = moves.iter().any(|&m| {
        let mut after = pos.clone();
        after.apply_move(m);
        after.is_not_in_check(vantage::base::Color::Black)
    });
    assert!(!has_legal, "black should be checkmated here");
    assert!(!pos.is_not_in_check(vantage::base::Color::Black), "black should be in check");
}

#[test]
fn zobrist_key_returns_to_start_after_applying_and_reverting_an_opening() {
    let mut pos = Position::startpos();
    let start_key = pos.zobrist_key();

    let m1 = find_move(&pos, "e2", "e4");
    pos.apply_move(m1);
    let m2 = find_move(&pos, "c7", "c5");
    pos.apply_move(m2);
    let m3 = find_move(&pos, "g1", "f3");
    pos.apply_move(m3);

    pos.revert_move(m3);
    pos.revert_move(m2);
    pos.revert_move(m1);

    assert_eq!(pos.zobrist_key(), start_key);
}

#[test]
fn sigmoid_saturates_at_the_boundaries() {
    for k in [0.1, 1.0, 10.0] {
        assert!((sigmoid(k, 1e9) - 1.0).abs() < 1e-12);
        assert!((sigmoid(k, -1e9) - 0.0).abs() < 1e-12);
        assert!((sigmoid(k, 0.0) - 0.5).abs() < 1e-12);
    }
}
