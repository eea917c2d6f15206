use twinboard_core::rules::{RulesEngine, ShakmatyRules};
use twinboard_core::types::{Color, Piece, PieceType, Square};

fn sq(name: &str) -> Square {
    Square::parse(name).expect("valid square")
}

fn dests(rules: &ShakmatyRules, from: &str) -> Vec<String> {
    let mut out: Vec<String> = rules.moves(sq(from)).iter().map(Square::to_string).collect();
    out.sort();
    out
}

#[test]
fn standard_start_has_expected_pieces() {
    let rules = ShakmatyRules::new();
    assert_eq!(
        rules.get(sq("e1")),
        Some(Piece::new(PieceType::King, Color::White))
    );
    assert_eq!(
        rules.get(sq("d8")),
        Some(Piece::new(PieceType::Queen, Color::Black))
    );
    assert_eq!(
        rules.get(sq("a1")),
        Some(Piece::new(PieceType::Rook, Color::White))
    );
    assert_eq!(
        rules.get(sq("e2")),
        Some(Piece::new(PieceType::Pawn, Color::White))
    );
    assert_eq!(rules.get(sq("e4")), None);
    assert_eq!(rules.turn(), Color::White);
}

#[test]
fn opening_destinations_per_square() {
    let rules = ShakmatyRules::new();
    assert_eq!(dests(&rules, "e2"), vec!["e3", "e4"]);
    assert_eq!(dests(&rules, "b1"), vec!["a3", "c3"]);
    // Black is not on move, and empty squares have no moves.
    assert!(rules.moves(sq("e7")).is_empty());
    assert!(rules.moves(sq("e4")).is_empty());
}

#[test]
fn twenty_legal_moves_at_the_start() {
    let rules = ShakmatyRules::new();
    let total: usize = Square::all().map(|square| rules.moves(square).len()).sum();
    assert_eq!(total, 20);
}

#[test]
fn illegal_move_leaves_state_unchanged() {
    let mut rules = ShakmatyRules::new();
    assert_eq!(rules.try_move(sq("e2"), sq("e5"), PieceType::Queen), None);
    assert_eq!(rules.try_move(sq("e7"), sq("e5"), PieceType::Queen), None);
    assert_eq!(
        rules.get(sq("e2")),
        Some(Piece::new(PieceType::Pawn, Color::White))
    );
    assert_eq!(rules.turn(), Color::White);
    assert_eq!(dests(&rules, "e2"), vec!["e3", "e4"]);
}

#[test]
fn legal_move_mutates_and_flips_turn() {
    let mut rules = ShakmatyRules::new();
    let played = rules
        .try_move(sq("e2"), sq("e4"), PieceType::Queen)
        .expect("e4 is legal");

    assert_eq!(played.color, Color::White);
    assert_eq!(played.piece, PieceType::Pawn);
    assert_eq!(played.from, sq("e2"));
    assert_eq!(played.to, sq("e4"));
    assert_eq!(played.captured, None);
    assert_eq!(played.promotion, None);

    assert_eq!(rules.get(sq("e2")), None);
    assert_eq!(
        rules.get(sq("e4")),
        Some(Piece::new(PieceType::Pawn, Color::White))
    );
    assert_eq!(rules.turn(), Color::Black);
}

#[test]
fn capture_reports_captured_type() {
    let mut rules = ShakmatyRules::new();
    rules.try_move(sq("e2"), sq("e4"), PieceType::Queen).unwrap();
    rules.try_move(sq("d7"), sq("d5"), PieceType::Queen).unwrap();
    let played = rules
        .try_move(sq("e4"), sq("d5"), PieceType::Queen)
        .expect("exd5 is legal");

    assert_eq!(played.captured, Some(PieceType::Pawn));
    assert_eq!(
        rules.get(sq("d5")),
        Some(Piece::new(PieceType::Pawn, Color::White))
    );
    assert_eq!(rules.get(sq("e4")), None);
}

#[test]
fn en_passant_appears_and_captures() {
    let mut rules = ShakmatyRules::new();
    rules.try_move(sq("e2"), sq("e4"), PieceType::Queen).unwrap();
    rules.try_move(sq("a7"), sq("a6"), PieceType::Queen).unwrap();
    rules.try_move(sq("e4"), sq("e5"), PieceType::Queen).unwrap();
    rules.try_move(sq("d7"), sq("d5"), PieceType::Queen).unwrap();

    assert!(rules.moves(sq("e5")).contains(&sq("d6")));
    let played = rules
        .try_move(sq("e5"), sq("d6"), PieceType::Queen)
        .expect("exd6 e.p. is legal");

    assert_eq!(played.captured, Some(PieceType::Pawn));
    assert_eq!(rules.get(sq("d5")), None);
    assert_eq!(
        rules.get(sq("d6")),
        Some(Piece::new(PieceType::Pawn, Color::White))
    );
}

#[test]
fn castling_is_clicked_king_to_king_destination() {
    let mut rules = ShakmatyRules::new();
    rules.try_move(sq("g1"), sq("f3"), PieceType::Queen).unwrap();
    rules.try_move(sq("g8"), sq("f6"), PieceType::Queen).unwrap();
    rules.try_move(sq("g2"), sq("g3"), PieceType::Queen).unwrap();
    rules.try_move(sq("g7"), sq("g6"), PieceType::Queen).unwrap();
    rules.try_move(sq("f1"), sq("g2"), PieceType::Queen).unwrap();
    rules.try_move(sq("f8"), sq("g7"), PieceType::Queen).unwrap();

    assert!(rules.moves(sq("e1")).contains(&sq("g1")));
    let played = rules
        .try_move(sq("e1"), sq("g1"), PieceType::Queen)
        .expect("kingside castle is legal");

    assert_eq!(played.piece, PieceType::King);
    assert_eq!(played.captured, None);
    assert_eq!(
        rules.get(sq("g1")),
        Some(Piece::new(PieceType::King, Color::White))
    );
    assert_eq!(
        rules.get(sq("f1")),
        Some(Piece::new(PieceType::Rook, Color::White))
    );
    assert_eq!(rules.get(sq("e1")), None);
    assert_eq!(rules.get(sq("h1")), None);
}

#[test]
fn promotion_honors_requested_piece() {
    let mut rules = ShakmatyRules::empty();
    rules.put(Piece::new(PieceType::King, Color::White), sq("e1"));
    rules.put(Piece::new(PieceType::King, Color::Black), sq("e8"));
    rules.put(Piece::new(PieceType::Pawn, Color::White), sq("a7"));

    // The four promotion choices collapse to a single destination.
    assert_eq!(dests(&rules, "a7"), vec!["a8"]);

    let played = rules
        .try_move(sq("a7"), sq("a8"), PieceType::Knight)
        .expect("promotion is legal");
    assert_eq!(played.promotion, Some(PieceType::Knight));
    assert_eq!(
        rules.get(sq("a8")),
        Some(Piece::new(PieceType::Knight, Color::White))
    );
}

#[test]
fn position_without_kings_has_no_legal_moves() {
    let mut rules = ShakmatyRules::empty();
    assert!(Square::all().all(|square| rules.moves(square).is_empty()));

    rules.put(Piece::new(PieceType::Pawn, Color::White), sq("e2"));
    assert!(rules.moves(sq("e2")).is_empty());
    assert_eq!(rules.try_move(sq("e2"), sq("e4"), PieceType::Queen), None);
    // The force-placed piece is still there.
    assert_eq!(
        rules.get(sq("e2")),
        Some(Piece::new(PieceType::Pawn, Color::White))
    );
}

#[test]
fn clear_empties_the_board() {
    let mut rules = ShakmatyRules::new();
    rules.clear();
    assert!(Square::all().all(|square| rules.get(square).is_none()));
    assert_eq!(rules.turn(), Color::White);
}

#[test]
fn put_replaces_an_existing_occupant() {
    let mut rules = ShakmatyRules::new();
    let knight = Piece::new(PieceType::Knight, Color::Black);
    rules.put(knight, sq("e2"));
    assert_eq!(rules.get(sq("e2")), Some(knight));
}
