//! Reversible move application.
//!
//! `make_move` pushes an `UndoState` and mutates the position in place;
//! `unmake_move` must receive the same move and restores the exact prior
//! state. Calls nest in strict LIFO order.

use crate::game_state::chess_rules::{
    castling_rook_squares, en_passant_captured_square, CASTLING_KEEP_MASK,
};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::game_state::undo_state::UndoState;
use crate::moves::chess_move::{Move, MoveFlag};

pub fn make_move(position: &mut Position, mv: Move) {
    let us = position.side_to_move;
    let moved_piece = position
        .piece_at(mv.from)
        .expect("make_move from an empty square");

    let captured_piece = if mv.flag == MoveFlag::EnPassantCapture {
        Some(position.remove_piece(en_passant_captured_square(us, mv.to)))
    } else if position.piece_at(mv.to).is_some() {
        Some(position.remove_piece(mv.to))
    } else {
        None
    };

    position.undo_stack.push(UndoState {
        mv,
        moved_piece,
        captured_piece,
        prev_castling_rights: position.castling_rights,
        prev_ep_file: position.ep_file,
        prev_halfmove_clock: position.halfmove_clock,
    });

    position.move_piece(mv.from, mv.to);

    if let Some(kind) = mv.flag.promotion_piece() {
        position.remove_piece(mv.to);
        position.put_piece(mv.to, Piece::new(us, kind));
    }

    if mv.flag == MoveFlag::Castle {
        if let Some((rook_from, rook_to)) = castling_rook_squares(mv.to) {
            position.move_piece(rook_from, rook_to);
        }
    }

    position.castling_rights &=
        CASTLING_KEEP_MASK[mv.from as usize] & CASTLING_KEEP_MASK[mv.to as usize];

    position.ep_file = if mv.flag == MoveFlag::DoublePawnPush {
        file_of(mv.from)
    } else {
        0
    };

    if moved_piece.kind == PieceKind::Pawn || captured_piece.is_some() {
        position.halfmove_clock = 0;
    } else {
        position.halfmove_clock = position.halfmove_clock.saturating_add(1);
    }
    if us == Color::Black {
        position.fullmove_number = position.fullmove_number.saturating_add(1);
    }

    position.side_to_move = us.opposite();
    position.ply += 1;
}

pub fn unmake_move(position: &mut Position, mv: Move) {
    let undo = position
        .undo_stack
        .pop()
        .expect("unmake_move without a matching make_move");
    debug_assert_eq!(undo.mv, mv, "unmake_move called out of order");

    position.side_to_move = position.side_to_move.opposite();
    position.ply -= 1;
    let us = position.side_to_move;
    if us == Color::Black {
        position.fullmove_number -= 1;
    }

    position.castling_rights = undo.prev_castling_rights;
    position.ep_file = undo.prev_ep_file;
    position.halfmove_clock = undo.prev_halfmove_clock;

    if mv.flag == MoveFlag::Castle {
        if let Some((rook_from, rook_to)) = castling_rook_squares(mv.to) {
            position.move_piece(rook_to, rook_from);
        }
    }

    if mv.flag.is_promotion() {
        position.remove_piece(mv.to);
        position.put_piece(mv.to, undo.moved_piece);
    }

    position.move_piece(mv.to, mv.from);

    if let Some(captured) = undo.captured_piece {
        let square = if mv.flag == MoveFlag::EnPassantCapture {
            en_passant_captured_square(us, mv.to)
        } else {
            mv.to
        };
        position.put_piece(square, captured);
    }
}
