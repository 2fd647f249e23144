//! Whole-game rule scenarios driven through the public `GameState` protocol.

use crate::game_state::chess_types::{Color, DrawReason, EndReason, PieceKind, Square};
use crate::game_state::game_state::{Activation, GameState};

fn sq(row: i8, col: i8) -> Square {
    Square::new(row, col)
}

fn play_all(game: &mut GameState, moves: &[((i8, i8), (i8, i8))]) {
    for &((fr, fc), (tr, tc)) in moves {
        assert_eq!(
            game.play_move(sq(fr, fc), sq(tr, tc)),
            Activation::Moved,
            "move ({fr},{fc}) -> ({tr},{tc}) should be accepted"
        );
    }
}

fn fen(text: &str) -> GameState {
    GameState::from_fen(text).expect("FEN should parse")
}

fn fools_mate() -> GameState {
    let mut game = GameState::new_game();
    play_all(
        &mut game,
        &[((6, 5), (5, 5)), ((1, 4), (3, 4)), ((6, 6), (4, 6)), ((0, 3), (4, 7))],
    );
    game
}

#[test]
fn opening_position_offers_twenty_moves() {
    let game = GameState::new_game();
    assert_eq!(game.all_legal_moves().len(), 20);
    assert!(!game.is_game_over());
    assert!(!game.in_check(Color::White));
}

#[test]
fn en_passant_removes_the_passed_pawn() {
    let mut game = GameState::new_game();
    play_all(
        &mut game,
        &[((6, 4), (4, 4)), ((1, 0), (2, 0)), ((4, 4), (3, 4)), ((1, 3), (3, 3))],
    );

    assert_eq!(game.activate(sq(3, 4)), Activation::Selected);
    assert!(game.legal_targets().contains(&sq(2, 3)));
    assert_eq!(game.activate(sq(2, 3)), Activation::Moved);

    assert!(game.board().get(sq(3, 3)).is_none(), "passed pawn captured");
    let pawn = game.board().get(sq(2, 3)).expect("capturing pawn landed");
    assert_eq!(pawn.color, Color::White);
    assert_eq!(game.halfmove_clock(), 0);
}

#[test]
fn en_passant_expires_after_one_turn() {
    let mut game = GameState::new_game();
    play_all(
        &mut game,
        &[
            ((6, 4), (4, 4)),
            ((1, 0), (2, 0)),
            ((4, 4), (3, 4)),
            ((1, 3), (3, 3)),
            ((7, 6), (5, 5)),
            ((2, 0), (3, 0)),
        ],
    );
    game.activate(sq(3, 4));
    assert!(!game.legal_targets().contains(&sq(2, 3)));
}

#[test]
fn castling_both_ways_with_clear_squares() {
    let mut game = fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    game.activate(sq(7, 4));
    assert!(game.legal_targets().contains(&sq(7, 6)));
    assert!(game.legal_targets().contains(&sq(7, 2)));

    assert_eq!(game.activate(sq(7, 6)), Activation::Moved);
    let rook = game.board().get(sq(7, 5)).expect("rook hopped over");
    assert_eq!(rook.kind, PieceKind::Rook);
    assert!(game.board().get(sq(7, 7)).is_none());
    assert_eq!(game.halfmove_clock(), 1);

    assert_eq!(game.play_move(sq(0, 4), sq(0, 2)), Activation::Moved);
    let rook = game.board().get(sq(0, 3)).expect("rook hopped over");
    assert_eq!(rook.color, Color::Black);
    assert!(game.board().get(sq(0, 0)).is_none());
}

#[test]
fn castling_waits_for_the_squares_between_to_clear() {
    let mut game = GameState::new_game();
    play_all(
        &mut game,
        &[((6, 4), (4, 4)), ((1, 4), (3, 4)), ((7, 6), (5, 5)), ((0, 1), (2, 2))],
    );
    game.activate(sq(7, 4));
    assert!(!game.legal_targets().contains(&sq(7, 6)), "bishop still on f1");
    game.clear_selection();

    play_all(&mut game, &[((7, 5), (4, 2)), ((0, 6), (2, 5))]);
    game.activate(sq(7, 4));
    assert!(game.legal_targets().contains(&sq(7, 6)));
    assert_eq!(game.activate(sq(7, 6)), Activation::Moved);
    assert_eq!(
        game.board().get(sq(7, 5)).map(|piece| piece.kind),
        Some(PieceKind::Rook)
    );
}

#[test]
fn castling_through_an_attacked_square_is_refused() {
    let mut game = fen("4k3/8/8/8/8/8/5r2/R3K2R w KQ - 0 1");
    game.activate(sq(7, 4));
    assert!(!game.legal_targets().contains(&sq(7, 6)));
    assert!(game.legal_targets().contains(&sq(7, 2)));
}

#[test]
fn castling_out_of_check_is_refused() {
    let mut game = fen("4k3/8/8/8/8/8/4r3/R3K2R w KQ - 0 1");
    assert!(game.in_check(Color::White));
    game.activate(sq(7, 4));
    assert!(!game.legal_targets().contains(&sq(7, 6)));
    assert!(!game.legal_targets().contains(&sq(7, 2)));
}

#[test]
fn rook_that_moved_and_returned_cannot_castle() {
    let mut game = fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    play_all(
        &mut game,
        &[((7, 7), (6, 7)), ((0, 4), (0, 3)), ((6, 7), (7, 7)), ((0, 3), (0, 4))],
    );
    game.activate(sq(7, 4));
    assert!(!game.legal_targets().contains(&sq(7, 6)));
    assert!(game.legal_targets().contains(&sq(7, 2)));
}

#[test]
fn pinned_piece_has_no_moves() {
    let mut game = fen("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1");
    assert_eq!(game.activate(sq(6, 4)), Activation::Selected);
    assert!(game.legal_targets().is_empty());
}

#[test]
fn no_legal_move_leaves_the_mover_in_check() {
    let positions = [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1",
    ];
    for text in positions {
        let game = fen(text);
        let mover = game.current_turn();
        for mv in game.all_legal_moves() {
            let mut next = game.clone();
            assert!(next.apply_remote(mv.from, mv.to, None).board_changed());
            assert!(!next.in_check(mover), "{text}: {mv:?} leaves king attacked");
        }
    }
}

#[test]
fn fifty_quiet_moves_draw() {
    let mut game = fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 1");
    assert!(!game.is_game_over());
    assert_eq!(game.play_move(sq(7, 0), sq(6, 0)), Activation::Moved);
    let outcome = game.outcome().expect("clock reached the limit");
    assert_eq!(outcome.reason, EndReason::Draw(DrawReason::FiftyMoveRule));
    assert_eq!(outcome.winner, None);
}

#[test]
fn capture_resets_the_fifty_move_clock() {
    let mut game = fen("4k3/8/8/8/8/8/p7/R3K3 w - - 99 1");
    assert_eq!(game.play_move(sq(7, 0), sq(6, 0)), Activation::Moved);
    assert_eq!(game.halfmove_clock(), 0);
    assert!(!game.is_game_over());
    assert_eq!(game.position_history().len(), 1);
}

#[test]
fn knight_shuffle_is_a_threefold_draw() {
    let mut game = GameState::new_game();
    let shuffle = [((7, 6), (5, 5)), ((0, 6), (2, 5)), ((5, 5), (7, 6)), ((2, 5), (0, 6))];

    play_all(&mut game, &shuffle);
    assert!(!game.is_game_over(), "start position seen twice");

    play_all(&mut game, &shuffle[..3]);
    assert!(!game.is_game_over());
    play_all(&mut game, &shuffle[3..]);

    let outcome = game.outcome().expect("start position seen three times");
    assert_eq!(outcome.reason, EndReason::Draw(DrawReason::Repetition));
    assert_eq!(game.halfmove_clock(), 8);
}

#[test]
fn bare_kings_are_drawn_on_setup() {
    let game = fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    let outcome = game.outcome().expect("nothing can mate");
    assert_eq!(outcome.reason, EndReason::Draw(DrawReason::InsufficientMaterial));
}

#[test]
fn fools_mate_is_won_by_black() {
    let game = fools_mate();
    let outcome = game.outcome().expect("white is mated");
    assert_eq!(outcome.reason, EndReason::Checkmate);
    assert_eq!(outcome.winner, Some(Color::Black));
    assert!(game.in_check(Color::White));
}

#[test]
fn queen_boxing_in_a_bare_king_is_stalemate() {
    let mut game = fen("k7/8/8/2Q5/8/8/8/7K w - - 0 1");
    assert_eq!(game.play_move(sq(3, 2), sq(2, 1)), Activation::Moved);
    let outcome = game.outcome().expect("black cannot move");
    assert_eq!(outcome.reason, EndReason::Stalemate);
    assert_eq!(outcome.winner, None);
    assert!(!game.in_check(Color::Black));
}

#[test]
fn finished_game_ignores_further_input() {
    let mut game = fools_mate();
    let before = game.board().fingerprint();
    let history = game.position_history().len();

    assert_eq!(game.activate(sq(6, 0)), Activation::Ignored);
    assert_eq!(game.play_move(sq(6, 0), sq(5, 0)), Activation::Ignored);
    assert!(!game.resolve_promotion(PieceKind::Queen));

    assert_eq!(game.board().fingerprint(), before);
    assert_eq!(game.position_history().len(), history);
    assert_eq!(game.selected_square(), None);
}

#[test]
fn promotion_suspends_the_turn_until_resolved() {
    let mut game = fen("7k/P7/8/8/8/8/8/KR6 w - - 0 1");
    game.activate(sq(1, 0));
    assert_eq!(game.activate(sq(0, 0)), Activation::PromotionPending);

    let pending = game.pending_promotion().expect("pawn awaiting choice");
    assert_eq!(pending.square, sq(0, 0));
    assert_eq!(pending.color, Color::White);
    assert_eq!(game.current_turn(), Color::White);

    assert_eq!(game.activate(sq(7, 0)), Activation::Ignored);
    assert_eq!(game.selected_square(), None);

    assert!(game.resolve_promotion(PieceKind::Knight));
    let knight = game.board().get(sq(0, 0)).expect("promoted piece");
    assert_eq!(knight.kind, PieceKind::Knight);
    assert_eq!(knight.color, Color::White);
    assert!(game.pending_promotion().is_none());
    assert_eq!(game.current_turn(), Color::Black);
}

#[test]
fn invalid_promotion_choices_become_queens() {
    for choice in [PieceKind::King, PieceKind::Pawn] {
        let mut game = fen("7k/P7/8/8/8/8/8/KR6 w - - 0 1");
        game.play_move(sq(1, 0), sq(0, 0));
        assert!(game.resolve_promotion(choice));
        let piece = game.board().get(sq(0, 0)).expect("promoted piece");
        assert_eq!(piece.kind, PieceKind::Queen);
    }
}

#[test]
fn promotion_can_deliver_mate() {
    let mut game = fen("6k1/1P3ppp/8/8/8/8/R7/K7 w - - 0 1");
    assert_eq!(game.play_move(sq(1, 1), sq(0, 1)), Activation::PromotionPending);
    assert!(!game.is_game_over());

    assert!(game.resolve_promotion(PieceKind::Rook));
    let outcome = game.outcome().expect("back-rank mate");
    assert_eq!(outcome.reason, EndReason::Checkmate);
    assert_eq!(outcome.winner, Some(Color::White));
}
