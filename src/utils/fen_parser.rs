//! FEN-to-Position parser.
//!
//! Accepts the full 6-field form and the 4-field EPD-style form (clocks
//! default to `0 1`). Every failure is a `ChessError::MalformedFen`; nothing
//! is built until all fields have been checked.

use crate::game_state::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{en_passant_captured_square, en_passant_target_rank};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<Position> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    let (halfmove_part, fullmove_part) = match parts.len() {
        6 => (parts[4], parts[5]),
        4 => ("0", "1"),
        n => return Err(malformed(format!("expected 4 or 6 fields, found {n}"))),
    };

    let board = parse_board(parts[0])?;
    let side_to_move = parse_side_to_move(parts[1])?;
    let castling_rights = parse_castling_rights(parts[2])?;
    let ep_file = parse_en_passant_file(parts[3], side_to_move, &board)?;
    let halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| malformed(format!("invalid halfmove clock: {halfmove_part}")))?;
    let fullmove_number = fullmove_part
        .parse::<u16>()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| malformed(format!("invalid fullmove number: {fullmove_part}")))?;

    for color in [Color::White, Color::Black] {
        let kings = board
            .iter()
            .filter(|p| **p == Some(Piece::new(color, PieceKind::King)))
            .count();
        if kings != 1 {
            return Err(malformed(format!(
                "{color:?} must have exactly one king, found {kings}"
            )));
        }
    }

    Ok(Position::from_parts(
        board,
        side_to_move,
        castling_rights,
        ep_file,
        halfmove_clock,
        fullmove_number,
    ))
}

fn malformed(message: String) -> ChessError {
    ChessError::MalformedFen(message)
}

fn parse_board(board_part: &str) -> ChessResult<[Option<Piece>; 65]> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(malformed("board layout must contain 8 ranks".to_owned()));
    }

    let mut board = [None; 65];

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 8 - fen_rank_idx as u8;
        let mut file = 1u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(malformed(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 9 {
                    return Err(malformed(format!("rank {rank} has too many files")));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| malformed(format!("invalid piece character '{ch}'")))?;

            if file > 8 {
                return Err(malformed(format!("rank {rank} has too many files")));
            }

            board[make_square(file, rank) as usize] = Some(piece);
            file += 1;
        }

        if file != 9 {
            return Err(malformed(format!("rank {rank} does not sum to 8 files")));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(malformed(format!("invalid side-to-move field: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_WHITE_KINGSIDE,
            'Q' => rights |= CASTLE_WHITE_QUEENSIDE,
            'k' => rights |= CASTLE_BLACK_KINGSIDE,
            'q' => rights |= CASTLE_BLACK_QUEENSIDE,
            _ => return Err(malformed(format!("invalid castling rights character: {ch}"))),
        }
    }

    Ok(rights)
}

fn parse_en_passant_file(
    en_passant_part: &str,
    side_to_move: Color,
    board: &[Option<Piece>; 65],
) -> ChessResult<u8> {
    if en_passant_part == "-" {
        return Ok(0);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| malformed(format!("invalid en-passant square: {en_passant_part}")))?;
    let expected_rank = en_passant_target_rank(side_to_move);
    if rank_of(square) != expected_rank {
        return Err(malformed(format!(
            "en-passant square {en_passant_part} is not on rank {expected_rank}"
        )));
    }
    if board[square as usize].is_some() {
        return Err(malformed(format!(
            "en-passant square {en_passant_part} is occupied"
        )));
    }
    let passed_pawn = Piece::new(side_to_move.opposite(), PieceKind::Pawn);
    if board[en_passant_captured_square(side_to_move, square) as usize] != Some(passed_pawn) {
        return Err(malformed(format!(
            "no pawn to capture en passant on {en_passant_part}"
        )));
    }

    Ok(file_of(square))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::game_state::chess_errors::ChessError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;
    use crate::utils::render_game_state::render_game_state;

    #[test]
    fn parse_starting_fen_and_render_board() {
        let position = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        println!("\n{}", render_game_state(&position));

        assert_eq!(position.side_to_move, Color::White);
        assert_eq!(position.fullmove_number, 1);
        assert_eq!(position.halfmove_clock, 0);
        assert_eq!(position.piece_at(E1), Some(Piece::new(Color::White, PieceKind::King)));
        assert_eq!(position.piece_at(D8), Some(Piece::new(Color::Black, PieceKind::Queen)));
    }

    #[test]
    fn accepts_four_field_form_and_multi_digit_clocks() {
        let short = parse_fen("4k3/8/8/8/8/8/8/4K3 w - -").expect("4-field FEN should parse");
        assert_eq!(short.halfmove_clock, 0);
        assert_eq!(short.fullmove_number, 1);

        let long = parse_fen("4k3/8/8/8/8/8/8/4K3 b - - 47 123").expect("FEN should parse");
        assert_eq!(long.halfmove_clock, 47);
        assert_eq!(long.fullmove_number, 123);
    }

    #[test]
    fn rejects_malformed_input() {
        let cases = [
            "",
            "4k3/8/8/8/8/8/8/4K3 w - - 0",
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra",
            "4k3/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K4 w - - 0 1",
            "4k3/8/8/8/8/8/8/4X3 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 x - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w Z - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - e4 0 1",
            "4k3/8/8/3P4/8/8/8/4K3 w - e6 0 1",
            "4k3/8/4n3/3Pp3/8/8/8/4K3 w - e6 0 1",
            "4k3/8/8/3PP3/8/8/8/4K3 w - e6 0 1",
            "4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - - a 1",
            "8/8/8/8/8/8/8/4K3 w - - 0 1",
            "4kk2/8/8/8/8/8/8/4K3 w - - 0 1",
        ];
        for fen in cases {
            assert!(
                matches!(parse_fen(fen), Err(ChessError::MalformedFen(_))),
                "should reject: {fen:?}"
            );
        }
    }
}
