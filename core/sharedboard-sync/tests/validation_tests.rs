use sharedboard_types::{Color, PieceKind, Square};
use sharedboard_sync::validation::{
    is_board_square, validate_create, validate_move, validate_remove, validate_reset,
};
use sharedboard_sync::{
    CreatePieceRequest, MovePieceRequest, NewPiece, Rejection, ResetRequest, Variant,
};

fn create(kind: &str, color: &str, position: &str) -> CreatePieceRequest {
    CreatePieceRequest {
        kind: kind.into(),
        color: color.into(),
        position: position.into(),
    }
}

fn mv(id: &str, to: &str) -> MovePieceRequest {
    MovePieceRequest {
        piece_id: id.into(),
        new_position: to.into(),
    }
}

// ── Positions ────────────────────────────────────────────────────

#[test]
fn square_pattern() {
    assert!(is_board_square("a1"));
    assert!(is_board_square("h8"));
    assert!(!is_board_square("offboard"));
    assert!(!is_board_square("z9"));
    assert!(!is_board_square("e4;"));
}

// ── Move ─────────────────────────────────────────────────────────

#[test]
fn valid_move() {
    let ok = validate_move(&mv("wp1", "e4")).unwrap();
    assert_eq!(ok.piece_id.as_str(), "wp1");
    assert_eq!(ok.target, Square::parse("e4").unwrap());
}

#[test]
fn move_to_offboard_is_rejected() {
    assert_eq!(
        validate_move(&mv("wp1", "offboard")),
        Err(Rejection::InvalidPosition("offboard".into()))
    );
}

#[test]
fn move_to_garbage_is_rejected() {
    assert!(matches!(validate_move(&mv("wp1", "e9")), Err(Rejection::InvalidPosition(_))));
    assert!(matches!(validate_move(&mv("wp1", "")), Err(Rejection::InvalidPosition(_))));
}

#[test]
fn move_with_empty_id_is_rejected() {
    assert_eq!(validate_move(&mv("", "e4")), Err(Rejection::EmptyPieceId));
}

// ── Remove ───────────────────────────────────────────────────────

#[test]
fn remove() {
    assert_eq!(validate_remove("bq").unwrap().as_str(), "bq");
    assert_eq!(validate_remove(""), Err(Rejection::EmptyPieceId));
}

// ── Create ───────────────────────────────────────────────────────

#[test]
fn valid_create() {
    assert_eq!(
        validate_create(&create("knight", "black", "e5")),
        Ok(NewPiece {
            kind: PieceKind::Knight,
            color: Color::Black,
            square: Square::parse("e5").unwrap(),
        })
    );
}

#[test]
fn fairy_and_special_create() {
    let ok = validate_create(&create("dragon", "special", "a1")).unwrap();
    assert_eq!(ok.kind, PieceKind::Dragon);
    assert_eq!(ok.color, Color::Special);
}

#[test]
fn create_with_bad_position_is_rejected() {
    assert_eq!(
        validate_create(&create("dragon", "white", "z9")),
        Err(Rejection::InvalidPosition("z9".into()))
    );
    assert!(validate_create(&create("rook", "white", "offboard")).is_err());
}

#[test]
fn create_with_unknown_type_or_color_is_rejected() {
    assert_eq!(
        validate_create(&create("wyvern", "white", "a1")),
        Err(Rejection::UnknownKind("wyvern".into()))
    );
    assert_eq!(
        validate_create(&create("rook", "green", "a1")),
        Err(Rejection::UnknownColor("green".into()))
    );
    assert!(validate_create(&create("<script>", "white", "a1")).is_err());
}

// ── Reset ────────────────────────────────────────────────────────

#[test]
fn reset_defaults_and_names() {
    assert_eq!(validate_reset(&ResetRequest::default(), Variant::Horde), Ok(Variant::Horde));
    let named = ResetRequest {
        variant: Some("standard".into()),
    };
    assert_eq!(validate_reset(&named, Variant::Horde), Ok(Variant::Standard));
}

#[test]
fn reset_to_unknown_variant_is_rejected() {
    let req = ResetRequest {
        variant: Some("chess960".into()),
    };
    assert_eq!(
        validate_reset(&req, Variant::Standard),
        Err(Rejection::UnknownVariant("chess960".into()))
    );
}
