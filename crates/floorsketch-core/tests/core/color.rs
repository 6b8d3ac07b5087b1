use floorsketch_core::{Color, Error, SketchError};

#[test]
fn test_color_serializes_as_hex_string() {
    let color = Color::from_hex("#1E40AF").unwrap();
    let json = serde_json::to_string(&color).unwrap();
    assert_eq!(json, "\"#1e40af\"");
}

#[test]
fn test_color_deserializes_from_hex_string() {
    let color: Color = serde_json::from_str("\"#ef4444\"").unwrap();
    assert_eq!(color, Color::rgb(0xef, 0x44, 0x44));
}

#[test]
fn test_color_deserialize_rejects_names() {
    let result: Result<Color, _> = serde_json::from_str("\"red\"");
    assert!(result.is_err());
}

#[test]
fn test_invalid_color_error_kind() {
    let err = Color::from_hex("#12345").unwrap_err();
    assert!(matches!(
        err,
        Error::Sketch(SketchError::InvalidColor { ref value }) if value == "#12345"
    ));
}
