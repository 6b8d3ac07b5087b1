use floorsketch_core::Point;

#[test]
fn test_point_from_tuple() {
    let p: Point = (12.5, -3.0).into();
    assert_eq!(p.x, 12.5);
    assert_eq!(p.y, -3.0);
}

#[test]
fn test_point_serde_shape() {
    let json = serde_json::to_string(&Point::new(100.0, 100.0)).unwrap();
    assert_eq!(json, r#"{"x":100.0,"y":100.0}"#);
}

#[test]
fn test_point_display() {
    assert_eq!(Point::new(1.24, 2.0).to_string(), "(1.2, 2.0)");
}
