//! Crate root module declarations for the Tactix chess engine.
//!
//! This file exposes all top-level subsystems (board state, move generation,
//! search, engines, UCI protocol handling and text utilities) so the binary,
//! benchmarks and tests can import stable module paths.

pub mod game_state {
    pub mod bitboard;
    pub mod chess_errors;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod position;
    pub mod undo_state;
}

pub mod moves {
    pub mod chess_move;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_list;
    pub mod move_tables;
    pub mod pawn_moves;
    pub mod pseudo_legal;
    pub mod sliding_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legality_masks;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod move_ordering;
}
pub mod tables {
    pub mod opening_book;
}
pub mod uci {
    pub mod uci_top;
}
pub mod engines {
    pub mod engine_iterative;
    pub mod engine_trait;
    pub mod time_management;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
}
