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

//! Pseudo-legal move generation. Legality (own king left in check) is
//! filtered by the caller via `Position::is_not_in_check`, not here.

use super::{
    bitboard::Bitboard,
    castling::CastleRights,
    color::Color,
    direction::{
        leaper_attacks, ray_attacks, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS,
        ROOK_DIRECTIONS,
    },
    moves::{Move, MoveKind},
    piece::Piece,
    position::Position,
    square::Square,
};

fn slider_attacks(sq: Square, dirs: &[(i8, i8)], occ: Bitboard) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    for &dir in dirs {
        bb |= ray_attacks(sq, dir, occ);
    }
    bb
}

fn attacks_for(piece: Piece, sq: Square, occ: Bitboard) -> Bitboard {
    match piece {
        Piece::Knight => leaper_attacks(sq, &KNIGHT_OFFSETS),
        Piece::King => leaper_attacks(sq, &KING_OFFSETS),
        Piece::Bishop => slider_attacks(sq, &BISHOP_DIRECTIONS, occ),
        Piece::Rook => slider_attacks(sq, &ROOK_DIRECTIONS, occ),
        Piece::Queen => {
            slider_attacks(sq, &BISHOP_DIRECTIONS, occ) | slider_attacks(sq, &ROOK_DIRECTIONS, occ)
        }
        Piece::Pawn => unreachable!("pawn moves are generated specially"),
    }
}

/// Append every pseudo-legal move available to the side to move into `out`.
/// Mirrors `gen_all_moves(pos, out_buffer, &out_count)` from the external
/// interface contract.
pub fn gen_all_moves(pos: &Position, out: &mut Vec<Move>) {
    gen_moves_impl(pos, out, false);
}

/// Append every pseudo-legal capture (including promotions and en passant)
/// into `out`. Mirrors `gen_all_captures`.
pub fn gen_all_captures(pos: &Position, out: &mut Vec<Move>) {
    gen_moves_impl(pos, out, true);
}

fn gen_moves_impl(pos: &Position, out: &mut Vec<Move>, captures_only: bool) {
    let us = pos.side_to_move();
    let occ = pos.occupied();
    let own = pos.occupied_by(us);
    let enemy = pos.occupied_by(!us);

    gen_pawn_moves(pos, out, captures_only);

    for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen, Piece::King] {
        for from in pos.pieces_of(us, piece) {
            let attacks = attacks_for(piece, from, occ) & !own;
            for to in attacks {
                if enemy.contains(to) {
                    let (_, captured) = pos.piece_at(to).expect("enemy occupancy implies a piece");
                    out.push(Move::new(from, to, piece, Some(captured), None, MoveKind::Capture));
                } else if !captures_only {
                    out.push(Move::new(from, to, piece, None, None, MoveKind::Quiet));
                }
            }
        }
    }

    if !captures_only {
        gen_castles(pos, out);
    }
}

fn gen_pawn_moves(pos: &Position, out: &mut Vec<Move>, captures_only: bool) {
    let us = pos.side_to_move();
    let occ = pos.occupied();
    let enemy = pos.occupied_by(!us);
    let step = us.pawn_rank_step();
    let promo_rank = us.promotion_rank();

    for from in pos.pieces_of(us, Piece::Pawn) {
        // Single and double pushes.
        if !captures_only {
            if let Some(one) = from.offset(step, 0) {
                if !occ.contains(one) {
                    push_pawn_move(out, from, one, None, MoveKind::Quiet, promo_rank);
                    if from.rank() == us.pawn_home_rank() {
                        if let Some(two) = one.offset(step, 0) {
                            if !occ.contains(two) {
                                out.push(Move::new(
                                    from,
                                    two,
                                    Piece::Pawn,
                                    None,
                                    None,
                                    MoveKind::DoublePawnPush,
                                ));
                            }
                        }
                    }
                }
            }
        }

        // Captures, including en passant.
        for df in [-1i8, 1] {
            let Some(to) = from.offset(step, df) else { continue };
            if enemy.contains(to) {
                let (_, captured) = pos.piece_at(to).expect("enemy occupancy implies a piece");
                push_pawn_move(out, from, to, Some(captured), MoveKind::Capture, promo_rank);
            } else if pos.en_passant_file() == Some(to.file()) && to.rank() == ep_capture_rank(us) {
                out.push(Move::new(
                    from,
                    to,
                    Piece::Pawn,
                    Some(Piece::Pawn),
                    None,
                    MoveKind::EnPassant,
                ));
            }
        }
    }
}

fn ep_capture_rank(us: Color) -> u8 {
    match us {
        Color::White => 5,
        Color::Black => 2,
    }
}

fn push_pawn_move(
    out: &mut Vec<Move>,
    from: Square,
    to: Square,
    captured: Option<Piece>,
    plain_kind: MoveKind,
    promo_rank: u8,
) {
    if to.rank() == promo_rank {
        let promo_kind = if captured.is_some() {
            MoveKind::PromotionCapture
        } else {
            MoveKind::Promotion
        };
        for promo in Piece::PROMOTABLE {
            out.push(Move::new(from, to, Piece::Pawn, captured, Some(promo), promo_kind));
        }
    } else {
        out.push(Move::new(from, to, Piece::Pawn, captured, None, plain_kind));
    }
}

fn gen_castles(pos: &Position, out: &mut Vec<Move>) {
    let us = pos.side_to_move();
    let rank = match us {
        Color::White => 0,
        Color::Black => 7,
    };
    let occ = pos.occupied();
    let rights = pos.castle_rights();

    let kingside = match us {
        Color::White => rights.0 & CastleRights::WHITE_KING != 0,
        Color::Black => rights.0 & CastleRights::BLACK_KING != 0,
    };
    if kingside {
        let f = Square::new(rank, 5).unwrap();
        let g = Square::new(rank, 6).unwrap();
        if !occ.contains(f)
            && !occ.contains(g)
            && pos.is_not_in_check(us)
            && !pos.square_attacked_by(f, !us)
            && !pos.square_attacked_by(g, !us)
        {
            out.push(Move::new(
                Square::new(rank, 4).unwrap(),
                g,
                Piece::King,
                None,
                None,
                MoveKind::CastleKingside,
            ));
        }
    }

    let queenside = match us {
        Color::White => rights.0 & CastleRights::WHITE_QUEEN != 0,
        Color::Black => rights.0 & CastleRights::BLACK_QUEEN != 0,
    };
    if queenside {
        let d = Square::new(rank, 3).unwrap();
        let c = Square::new(rank, 2).unwrap();
        let b = Square::new(rank, 1).unwrap();
        if !occ.contains(d)
            && !occ.contains(c)
            && !occ.contains(b)
            && pos.is_not_in_check(us)
            && !pos.square_attacked_by(d, !us)
            && !pos.square_attacked_by(c, !us)
        {
            out.push(Move::new(
                Square::new(rank, 4).unwrap(),
                c,
                Piece::King,
                None,
                None,
                MoveKind::CastleQueenside,
            ));
        }
    }
}

#[must_use]
/// Whether the side to move has at least one legal move, used to
/// distinguish stalemate from an ordinary quiet position.
pub fn has_legal_move(pos: &Position) -> bool {
    let mut moves = Vec::with_capacity(64);
    gen_all_moves(pos, &mut moves);
    let mut pos = pos.clone();
    for m in moves {
        pos.apply_move(m);
        let legal = pos.is_not_in_check(!pos.side_to_move());
        pos.revert_move(m);
        if legal {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_has_twenty_moves() {
        let pos = Position::startpos();
        let mut moves = Vec::new();
        gen_all_moves(&pos, &mut moves);
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn captures_only_excludes_quiet_moves() {
        let pos = Position::startpos();
        let mut moves = Vec::new();
        gen_all_captures(&pos, &mut moves);
        assert!(moves.is_empty());
    }

    #[test]
    fn stalemate_position_has_no_legal_moves() {
        let pos = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(!has_legal_move(&pos));
    }

    #[test]
    fn mate_in_one_capture_is_generated() {
        let pos = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").unwrap();
        let mut moves = Vec::new();
        gen_all_moves(&pos, &mut moves);
        assert!(moves.iter().any(|m| m.to_square() == Square::A8));
    }
}
