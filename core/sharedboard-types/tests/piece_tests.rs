use pretty_assertions::assert_eq;
use sharedboard_types::{Color, Error, Piece, PieceKind, Position, Square};
use std::str::FromStr;

#[test]
fn catalog_has_standard_and_fairy_kinds() {
    assert_eq!(PieceKind::ALL.len(), 21);
    let standard: Vec<_> = PieceKind::ALL.iter().filter(|k| !k.is_fairy()).collect();
    assert_eq!(standard.len(), 6);
    assert!(PieceKind::Dragon.is_fairy());
    assert!(!PieceKind::Pawn.is_fairy());
}

#[test]
fn kind_names_roundtrip() {
    for kind in PieceKind::ALL {
        assert_eq!(PieceKind::from_str(kind.as_str()).unwrap(), kind);
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, format!("\"{}\"", kind.as_str()));
    }
}

#[test]
fn unknown_kind_is_rejected() {
    assert_eq!(
        PieceKind::from_str("wyvern"),
        Err(Error::UnknownPieceKind("wyvern".into()))
    );
    assert!(PieceKind::from_str("King").is_err());
    assert!(serde_json::from_str::<PieceKind>(r#""wyvern""#).is_err());
}

#[test]
fn colors() {
    assert_eq!(Color::from_str("white").unwrap(), Color::White);
    assert_eq!(Color::from_str("special").unwrap(), Color::Special);
    assert_eq!(Color::from_str("red"), Err(Error::UnknownColor("red".into())));
    assert_eq!(Color::Black.initial(), 'b');
}

#[test]
fn piece_wire_format_uses_type_key() {
    let piece = Piece::new("wp5", PieceKind::Pawn, Color::White, Square::parse("e2").unwrap());
    let value = serde_json::to_value(&piece).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"id": "wp5", "type": "pawn", "color": "white", "position": "e2"})
    );

    let back: Piece = serde_json::from_value(value).unwrap();
    assert_eq!(back, piece);
}

#[test]
fn piece_offboard_wire_format() {
    let piece = Piece::new("sd1", PieceKind::Dragon, Color::Special, Position::Offboard);
    let json = serde_json::to_string(&piece).unwrap();
    assert!(json.contains(r#""position":"offboard""#));
    assert!(!piece.is_on(Square::parse("a1").unwrap()));
}

#[test]
fn piece_with_bad_position_does_not_deserialize() {
    let json = r#"{"id":"x","type":"rook","color":"black","position":"k9"}"#;
    assert!(serde_json::from_str::<Piece>(json).is_err());
}
