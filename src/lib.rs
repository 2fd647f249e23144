//! Crate root module declarations for the chess rules engine.
//!
//! Exposes the game state machine, per-piece movement rules, legal move
//! generation and terminal detection, opponent engines, game-mode sessions
//! and notation helpers under stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;

    #[cfg(test)]
    mod scenario_tests;
}

pub mod moves {
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod piece_moves;
    pub mod sliding_moves;
}

pub mod move_generation {
    pub mod game_termination;
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod perft;
    pub mod special_moves;
}

pub mod engines {
    pub mod background_search;
    pub mod engine_random;
    pub mod engine_trait;
    pub mod uci_engine;
}

pub mod session {
    pub mod chess_session;
    pub mod relay;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
}
