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

//! Fail-soft negamax with PV-search, backed by a quiescence search over
//! captures. Time control, killer moves and the PV are all carried as
//! explicit state in [`SearchContext`] rather than thread-global statics,
//! so the whole search is a single owned borrow chain from
//! [`get_best_move`] down.
//!
//! Abort propagates as `None` through every recursive call: once the clock
//! expires, every frame on the stack returns `None` immediately instead of
//! unwinding a sentinel score, and the caller that owns the iteration
//! discards whatever partial work it had rather than committing it.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::base::{gen_all_captures, gen_all_moves, Move, Piece, Position};
use crate::engine::config::SearchConfig;
use crate::engine::eval::{evaluate_with, Eval, Weights};
use crate::engine::limit::SearchLimit;

const KILLER_SLOTS: usize = 3;
const KILLER_BONUS: [i32; KILLER_SLOTS] = [1500, 1000, 500];
const PV_MOVE_BONUS: i32 = 30_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A terminal failure of [`get_best_move`]: the position had no legal move
/// to offer in the first place (it should have been detected as drawn or
/// lost before search was ever invoked).
pub enum SearchError {
    NoLegalMove,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::NoLegalMove => write!(f, "position has no legal move to search"),
        }
    }
}

impl std::error::Error for SearchError {}

/// A rough, fixed piece value used only for move-ordering heuristics; not
/// the tuned material table, which is scaled and phase-dependent.
fn ordering_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => 100,
        Piece::Knight | Piece::Bishop => 300,
        Piece::Rook => 500,
        Piece::Queen => 900,
        Piece::King => 10_000,
    }
}

/// MVV/LVA-approximate capture score, plus killer and PV-move bonuses for
/// quiet moves, as used to order both quiescence captures and full-width
/// moves.
fn basic_heuristic(m: Move, killers: &[Move; KILLER_SLOTS], pv_move: Option<Move>) -> i32 {
    let mut score = 0;
    if pv_move == Some(m) {
        score += PV_MOVE_BONUS;
    }
    if m.is_capture() {
        let victim = m.captured().map_or(0, ordering_value);
        let attacker = ordering_value(m.piece()).max(1);
        score += victim / attacker;
    } else {
        for (slot, &k) in killers.iter().enumerate() {
            if k == m {
                score += KILLER_BONUS[slot];
                break;
            }
        }
    }
    score
}

/// Owned search state threaded through the whole recursion: the clock, the
/// weight table, node counters, the killer table, and the previous
/// iteration's PV and root-move scores used for move ordering.
pub(crate) struct SearchContext<'w> {
    weights: &'w Weights,
    limit: SearchLimit,
    ply: usize,
    nodes: u64,
    ab_nodes: u64,
    qs_nodes: u64,
    killers: Vec<[Move; KILLER_SLOTS]>,
    previous_pv: Vec<Move>,
    root_scores: HashMap<Move, i32>,
}

impl<'w> SearchContext<'w> {
    pub(crate) fn new(weights: &'w Weights, limit: SearchLimit) -> SearchContext<'w> {
        SearchContext {
            weights,
            limit,
            ply: 0,
            nodes: 0,
            ab_nodes: 0,
            qs_nodes: 0,
            killers: Vec::new(),
            previous_pv: Vec::new(),
            root_scores: HashMap::new(),
        }
    }

    fn killers_at(&self, ply: usize) -> [Move; KILLER_SLOTS] {
        self.killers
            .get(ply)
            .copied()
            .unwrap_or([Move::NONE; KILLER_SLOTS])
    }

    /// Shift `m` into killer slot 0 at `ply`, evicting the oldest slot. A
    /// no-op for captures and promotions: killers are a quiet-move table.
    fn record_killer(&mut self, ply: usize, m: Move) {
        if !m.is_quiet() {
            return;
        }
        if self.killers.len() <= ply {
            self.killers.resize(ply + 1, [Move::NONE; KILLER_SLOTS]);
        }
        let slot = &mut self.killers[ply];
        if slot[0] == m {
            return;
        }
        slot[2] = slot[1];
        slot[1] = slot[0];
        slot[0] = m;
    }

    fn pv_move_at(&self, ply: usize) -> Option<Move> {
        self.previous_pv.get(ply).copied()
    }
}

/// Resolve a position to quiescence, exploring only captures until the
/// stand-pat score is a local maximum. Returns the side-to-move-relative
/// score and the capture sequence that reaches the resolved leaf; `None`
/// signals the search clock expired mid-recursion.
pub(crate) fn quiescence(
    pos: &mut Position,
    ctx: &mut SearchContext,
    mut alpha: Eval,
    beta: Eval,
) -> Option<(Eval, Vec<Move>)> {
    ctx.nodes += 1;
    ctx.qs_nodes += 1;
    if ctx.limit.poll() {
        return None;
    }

    let stand_pat = evaluate_with(pos, ctx.weights);
    let mut best = stand_pat;
    let mut best_pv: Vec<Move> = Vec::new();
    if best > alpha {
        alpha = best;
    }
    if alpha >= beta {
        return Some((best, best_pv));
    }

    let mut captures = Vec::new();
    gen_all_captures(pos, &mut captures);
    let killers = ctx.killers_at(ctx.ply);
    let pv_move = ctx.pv_move_at(ctx.ply);
    captures.sort_by_key(|&m| std::cmp::Reverse(basic_heuristic(m, &killers, pv_move)));

    for m in captures {
        let mover = pos.side_to_move();
        pos.apply_move(m);
        if !pos.is_not_in_check(mover) {
            pos.revert_move(m);
            continue;
        }
        ctx.ply += 1;
        let child = quiescence(pos, ctx, -beta, -alpha);
        ctx.ply -= 1;
        pos.revert_move(m);

        let Some((child_score, child_pv)) = child else {
            return None;
        };
        let v = -child_score;
        if v > best {
            best = v;
            if best > alpha {
                alpha = best;
                best_pv = std::iter::once(m).chain(child_pv).collect();
            }
        }
        if alpha >= beta {
            // Captures are never quiet, so this is always a no-op; kept to
            // mirror the cutoff handling in `alpha_beta` exactly.
            ctx.record_killer(ctx.ply, m);
            break;
        }
    }

    Some((best, best_pv))
}

/// Fail-soft negamax with a PV-search null-window scout. `is_root` selects
/// root-specific move ordering (by the previous iteration's per-move
/// scores) over the general `basic_heuristic`.
fn alpha_beta(
    pos: &mut Position,
    ctx: &mut SearchContext,
    depth: u8,
    mut alpha: Eval,
    beta: Eval,
    is_root: bool,
) -> Option<(Eval, Vec<Move>)> {
    ctx.nodes += 1;
    if ctx.limit.poll() {
        return None;
    }
    if depth == 0 {
        let (v, pv) = quiescence(pos, ctx, alpha, beta)?;
        return Some((v, pv));
    }
    ctx.ab_nodes += 1;

    let side = pos.side_to_move();
    let in_check = !pos.is_not_in_check(side);

    let mut moves = Vec::new();
    gen_all_moves(pos, &mut moves);

    let pv_move = ctx.pv_move_at(ctx.ply);
    if is_root {
        moves.sort_by_key(|&m| {
            std::cmp::Reverse(ctx.root_scores.get(&m).copied().unwrap_or(i32::MIN))
        });
    } else {
        let killers = ctx.killers_at(ctx.ply);
        moves.sort_by_key(|&m| std::cmp::Reverse(basic_heuristic(m, &killers, pv_move)));
    }
    let first_is_pv = moves.first().is_some_and(|&m| Some(m) == pv_move);

    let mut best = Eval::NEG_INFINITY;
    let mut best_pv: Vec<Move> = Vec::new();
    let mut legal_moves = 0u32;

    for &m in &moves {
        let mover = pos.side_to_move();
        pos.apply_move(m);
        if !pos.is_not_in_check(mover) {
            pos.revert_move(m);
            continue;
        }
        legal_moves += 1;

        ctx.ply += 1;
        let result = if legal_moves > 1 && first_is_pv {
            let null_alpha = Eval::centipawns(-alpha.value() - 1);
            let null_beta = -alpha;
            match alpha_beta(pos, ctx, depth - 1, null_alpha, null_beta, false) {
                None => None,
                Some((scout_score, _)) => {
                    let v = -scout_score;
                    if v > alpha && v < beta {
                        alpha_beta(pos, ctx, depth - 1, -beta, -v, false)
                            .map(|(re_score, re_pv)| (-re_score, re_pv))
                    } else {
                        Some((v, Vec::new()))
                    }
                }
            }
        } else {
            alpha_beta(pos, ctx, depth - 1, -beta, -alpha, false).map(|(s, pv)| (-s, pv))
        };
        ctx.ply -= 1;
        pos.revert_move(m);

        let Some((v, child_pv)) = result else {
            return None;
        };

        if is_root {
            ctx.root_scores.insert(m, v.value());
        }

        if v > best {
            best = v;
            if best > alpha {
                alpha = best;
                best_pv = std::iter::once(m).chain(child_pv).collect();
            }
        }

        if alpha >= beta {
            ctx.record_killer(ctx.ply, m);
            break;
        }
    }

    if legal_moves == 0 {
        let terminal = if in_check {
            -Eval::mate_in(ctx.ply as i32)
        } else {
            Eval::DRAW
        };
        return Some((terminal, Vec::new()));
    }

    Some((best, best_pv))
}

fn pv_to_string(pv: &[Move]) -> String {
    pv.iter().map(Move::to_string).collect::<Vec<_>>().join(" ")
}

/// Iterative-deepening driver: search depth `1, 2, ...` up to
/// `config.max_depth` or until `time_budget` is spent, returning the first
/// move of the deepest *completed* iteration's principal variation. An
/// iteration that aborts mid-search never overwrites the last commit.
pub fn get_best_move(
    pos: &mut Position,
    weights: &Weights,
    time_budget: Duration,
    config: SearchConfig,
) -> Result<Move, SearchError> {
    let mut ctx = SearchContext::new(weights, SearchLimit::new(time_budget, config.node_check_interval));
    let mut committed_pv: Vec<Move> = Vec::new();

    for depth in 1..=config.max_depth {
        ctx.ply = 0;
        ctx.previous_pv = committed_pv.clone();

        let Some((score, pv)) = alpha_beta(pos, &mut ctx, depth, Eval::NEG_INFINITY, Eval::INFINITY, true)
        else {
            break;
        };

        committed_pv = pv;
        if config.report_progress {
            println!(
                "info depth {depth} nodes {} score cp {} pv {}",
                ctx.nodes,
                score.value(),
                pv_to_string(&committed_pv),
            );
        }

        if committed_pv.is_empty() || ctx.limit.is_expired() {
            break;
        }
    }

    committed_pv.first().copied().ok_or(SearchError::NoLegalMove)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::eval::default_weights;

    fn search(fen: &str, depth: u8) -> (Move, Vec<Move>) {
        let mut pos = Position::from_fen(fen).unwrap();
        let weights = default_weights();
        let mut ctx = SearchContext::new(&weights, SearchLimit::infinite());
        let (_, pv) = alpha_beta(
            &mut pos,
            &mut ctx,
            depth,
            Eval::NEG_INFINITY,
            Eval::INFINITY,
            true,
        )
        .unwrap();
        (pv[0], pv)
    }

    #[test]
    fn finds_mate_in_one() {
        let (_, pv) = search("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1", 3);
        assert_eq!(pv[0], Move::new(
            crate::base::Square::A1,
            crate::base::Square::A8,
            Piece::Rook,
            None,
            None,
            crate::base::MoveKind::Quiet,
        ));
    }

    #[test]
    fn stalemate_scores_as_draw() {
        let mut pos = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let weights = default_weights();
        let mut ctx = SearchContext::new(&weights, SearchLimit::infinite());
        let (score, pv) = alpha_beta(&mut pos, &mut ctx, 1, Eval::NEG_INFINITY, Eval::INFINITY, true).unwrap();
        assert_eq!(score, Eval::DRAW);
        assert!(pv.is_empty());
    }

    #[test]
    fn checkmate_scores_as_a_loss_for_the_mated_side() {
        let mut pos = Position::from_fen("7k/5Q2/5K2/8/8/8/8/8 b - - 0 1").unwrap();
        let weights = default_weights();
        let mut ctx = SearchContext::new(&weights, SearchLimit::infinite());
        let (score, pv) = alpha_beta(&mut pos, &mut ctx, 1, Eval::NEG_INFINITY, Eval::INFINITY, true).unwrap();
        assert!(score.is_mate());
        assert!(score.value() < 0);
        assert!(pv.is_empty());
    }

    #[test]
    fn quiescence_does_not_take_a_hanging_queen_that_loses_to_recapture() {
        // White queen on d5 attacks a black queen on d8, but a black rook on
        // d3 would recapture for free; quiescence should stand pat rather
        // than chase the losing capture.
        let mut pos = Position::from_fen("3q1k2/8/8/3Q4/8/3r4/8/5K2 w - - 0 1").unwrap();
        let weights = default_weights();
        let stand_pat = evaluate_with(&pos, &weights);
        let mut ctx = SearchContext::new(&weights, SearchLimit::infinite());
        let (score, _) = quiescence(&mut pos, &mut ctx, Eval::NEG_INFINITY, Eval::INFINITY).unwrap();
        assert_eq!(score, stand_pat);
    }

    #[test]
    fn get_best_move_returns_a_legal_root_move() {
        let mut pos = Position::startpos();
        let weights = default_weights();
        let mut config = SearchConfig::default();
        config.max_depth = 3;
        config.report_progress = false;
        let m = get_best_move(&mut pos, &weights, Duration::from_secs(5), config).unwrap();
        assert_ne!(m, Move::NONE);
    }
}
