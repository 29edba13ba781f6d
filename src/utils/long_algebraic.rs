//! UCI long algebraic move text (`e2e4`, `e7e8q`).
//!
//! Parsing derives the move flag from the position: the notation itself does
//! not mark castling, double pushes or en passant. Whether the move is legal
//! is left to `validate_move`.

use crate::game_state::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::promotion_rank;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::validate_move;
use crate::moves::chess_move::{Move, MoveFlag};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_uci_move(position: &Position, text: &str) -> ChessResult<Move> {
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessError::InvalidMove(format!(
            "expected 4 or 5 characters: {text}"
        )));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;

    let mut flag = MoveFlag::NoFlag;
    if let Some(ch) = text[4..].chars().next() {
        flag = MoveFlag::from_promotion_char(ch).ok_or_else(|| {
            ChessError::InvalidMove(format!("invalid promotion piece '{ch}' in {text}"))
        })?;
    }

    if flag.is_promotion() {
        let promotes = position.piece_at(from).is_some_and(|piece| {
            piece.kind == PieceKind::Pawn && rank_of(to) == promotion_rank(piece.color)
        });
        if !promotes {
            return Err(ChessError::InvalidMove(format!(
                "promotion suffix without a pawn reaching the last rank: {text}"
            )));
        }
        return Ok(Move::new(from, to, flag));
    }

    if let Some(piece) = position.piece_at(from) {
        match piece.kind {
            PieceKind::Pawn if from.abs_diff(to) == 16 => flag = MoveFlag::DoublePawnPush,
            PieceKind::Pawn
                if file_of(from) != file_of(to)
                    && position.piece_at(to).is_none()
                    && position.ep_square() == Some(to) =>
            {
                flag = MoveFlag::EnPassantCapture
            }
            PieceKind::King if file_of(from).abs_diff(file_of(to)) == 2 => flag = MoveFlag::Castle,
            _ => {}
        }
    }

    Ok(Move::new(from, to, flag))
}

/// Parses `text` and checks it against the legal moves of `position`.
pub fn parse_legal_uci_move(position: &Position, text: &str) -> ChessResult<Move> {
    let mv = parse_uci_move(position, text)?;
    validate_move(position, mv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promotion_suffix_sets_flag() {
        let position = Position::from_fen("7k/4P3/8/8/8/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        let mv = parse_uci_move(&position, "e7e8q").expect("move should parse");
        assert_eq!(mv, Move::new(53, 61, MoveFlag::PromoteQueen));
        assert_eq!(mv.to_string(), "e7e8q");
    }

    #[test]
    fn derives_special_flags_from_position() {
        let position = Position::from_fen("r3k2r/8/8/3pP3/8/8/4P3/R3K2R w KQkq d6 0 1")
            .expect("FEN should parse");
        let castle = parse_uci_move(&position, "e1g1").expect("parses");
        assert_eq!(castle.flag, MoveFlag::Castle);
        let ep = parse_uci_move(&position, "e5d6").expect("parses");
        assert_eq!(ep.flag, MoveFlag::EnPassantCapture);
        let double = parse_uci_move(&position, "e2e4").expect("parses");
        assert_eq!(double.flag, MoveFlag::DoublePawnPush);
        let quiet = parse_uci_move(&position, "e1f1").expect("parses");
        assert_eq!(quiet.flag, MoveFlag::NoFlag);
    }

    #[test]
    fn rejects_malformed_text() {
        let position = Position::new_game();
        for text in ["", "e2", "e2e", "e2e4qq", "z2e4", "e2e9", "e7e8k", "é2e4"] {
            assert!(
                matches!(parse_uci_move(&position, text), Err(ChessError::InvalidMove(_))),
                "should reject {text:?}"
            );
        }
    }

    #[test]
    fn promotion_suffix_needs_pawn_on_last_rank() {
        let position = Position::from_fen("r3k2r/1P6/8/8/8/8/4P3/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        for text in ["e2e4q", "e2e3n", "e1g1q", "a1a2r"] {
            assert!(
                matches!(parse_uci_move(&position, text), Err(ChessError::InvalidMove(_))),
                "should reject {text:?}"
            );
        }
        assert!(parse_legal_uci_move(&position, "b7b8n").is_ok());
    }

    #[test]
    fn legal_parse_combines_syntax_and_legality() {
        let position = Position::new_game();
        assert!(parse_legal_uci_move(&position, "e2e4").is_ok());
        assert!(matches!(
            parse_legal_uci_move(&position, "e2e5"),
            Err(ChessError::IllegalMove(_))
        ));
    }
}
