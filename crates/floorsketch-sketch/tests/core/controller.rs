use floorsketch_sketch::{
    Color, ElementKind, InteractionState, MarkerKind, PendingLabel, Point, SketchController, Tool,
    MEASUREMENT_ACCENT,
};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn test_marker_commits_on_start_with_table_color() {
    let mut c = SketchController::default();
    c.set_tool(Tool::Marker);
    c.set_marker(MarkerKind::Water);
    assert!(c.pointer_start(p(100.0, 100.0)));

    assert_eq!(c.elements().len(), 1);
    let marker = c.elements().last().unwrap();
    assert_eq!(marker.kind().marker_type(), Some(MarkerKind::Water));
    assert_eq!(marker.points(), vec![p(100.0, 100.0)]);
    assert_eq!(marker.color().to_hex(), "#3b82f6");
    assert_eq!(c.state(), &InteractionState::Idle);

    c.undo();
    assert!(c.elements().is_empty());
}

#[test]
fn test_rect_uses_latest_point() {
    let mut c = SketchController::default();
    c.pointer_start(p(10.0, 10.0));
    c.pointer_move(p(40.0, 30.0));
    c.pointer_move(p(60.0, 50.0));
    c.pointer_end();

    let rect = c.elements().last().unwrap();
    assert_eq!(
        rect.kind(),
        &ElementKind::Rect {
            start: p(10.0, 10.0),
            end: p(60.0, 50.0)
        }
    );
    assert_eq!(rect.color().to_hex(), "#1e40af");
}

#[test]
fn test_freehand_samples_every_move() {
    let mut c = SketchController::default();
    c.set_tool(Tool::Freehand);
    c.pointer_start(p(0.0, 0.0));
    for i in 1..=5 {
        c.pointer_move(p(i as f64, i as f64 * 2.0));
    }
    c.pointer_end();

    assert_eq!(c.elements().last().unwrap().points().len(), 6);
}

#[test]
fn test_freehand_single_point_commits_nothing() {
    let mut c = SketchController::default();
    c.set_tool(Tool::Freehand);
    c.pointer_start(p(5.0, 5.0));
    c.pointer_end();
    assert!(c.elements().is_empty());
    assert_eq!(c.state(), &InteractionState::Idle);
}

#[test]
fn test_measurement_waits_for_label() {
    let mut c = SketchController::default();
    c.set_tool(Tool::Measurement);
    c.pointer_start(p(10.0, 10.0));
    c.pointer_move(p(110.0, 10.0));
    c.pointer_end();

    assert!(c.elements().is_empty());
    assert_eq!(
        c.pending_label(),
        Some(&PendingLabel::Measurement {
            start: p(10.0, 10.0),
            end: p(110.0, 10.0)
        })
    );

    assert!(c.confirm_label("2,00 m"));
    let m = c.elements().last().unwrap();
    assert_eq!(m.points(), vec![p(10.0, 10.0), p(110.0, 10.0)]);
    assert_eq!(m.kind().text(), Some("2,00 m"));
    assert_eq!(m.color(), MEASUREMENT_ACCENT);
}

#[test]
fn test_measurement_cancel_commits_nothing() {
    let mut c = SketchController::default();
    c.set_tool(Tool::Measurement);
    c.pointer_start(p(10.0, 10.0));
    c.pointer_move(p(110.0, 10.0));
    c.pointer_end();
    assert!(c.cancel_label());
    assert!(c.elements().is_empty());
    assert!(c.pending_label().is_none());
}

#[test]
fn test_text_cancel_commits_nothing() {
    let mut c = SketchController::default();
    c.set_tool(Tool::Marker);
    c.pointer_start(p(5.0, 5.0));
    let before = c.elements().len();

    c.set_tool(Tool::Text);
    c.pointer_start(p(40.0, 60.0));
    assert!(c.pending_label().is_some());
    assert!(c.cancel_label());

    assert_eq!(c.elements().len(), before);
    assert_eq!(c.state(), &InteractionState::Idle);
}

#[test]
fn test_blank_label_discards() {
    let mut c = SketchController::default();
    c.set_tool(Tool::Text);
    c.pointer_start(p(20.0, 20.0));
    assert!(!c.confirm_label("   "));
    assert!(c.elements().is_empty());
    assert_eq!(c.state(), &InteractionState::Idle);
}

#[test]
fn test_pointer_ignored_while_prompt_open() {
    let mut c = SketchController::default();
    c.set_tool(Tool::Text);
    c.pointer_start(p(20.0, 20.0));
    assert!(!c.pointer_start(p(50.0, 50.0)));
    assert!(!c.pointer_move(p(60.0, 60.0)));
    assert!(!c.pointer_end());
    assert_eq!(
        c.pending_label(),
        Some(&PendingLabel::Text {
            anchor: p(20.0, 20.0)
        })
    );
}

#[test]
fn test_text_uses_active_color() {
    let mut c = SketchController::default();
    let red = Color::rgb(0xdc, 0x26, 0x26);
    c.set_color(red);
    c.set_tool(Tool::Text);
    c.pointer_start(p(30.0, 40.0));
    c.confirm_label("Küche");

    let text = c.elements().last().unwrap();
    assert_eq!(text.color(), red);
    assert_eq!(text.points(), vec![p(30.0, 40.0)]);
}

#[test]
fn test_color_change_keeps_committed_colors() {
    let mut c = SketchController::default();
    c.set_tool(Tool::Line);
    c.pointer_start(p(0.0, 0.0));
    c.pointer_move(p(10.0, 0.0));
    c.pointer_end();
    c.set_color(Color::rgb(0x16, 0xa3, 0x4a));

    assert_eq!(c.elements().last().unwrap().color().to_hex(), "#1e40af");
}

#[test]
fn test_clear_requires_confirmation() {
    let mut c = SketchController::default();
    c.set_tool(Tool::Marker);
    c.pointer_start(p(1.0, 1.0));
    c.pointer_start(p(2.0, 2.0));

    assert!(!c.clear(false));
    assert_eq!(c.elements().len(), 2);
    assert!(c.clear(true));
    assert!(c.elements().is_empty());
}

#[test]
fn test_undo_on_empty_is_noop() {
    let mut c = SketchController::default();
    assert!(c.undo().is_none());
    assert!(c.elements().is_empty());
}

#[test]
fn test_measurement_preview_has_no_label() {
    let mut c = SketchController::default();
    c.set_tool(Tool::Measurement);
    c.pointer_start(p(0.0, 0.0));
    c.pointer_move(p(30.0, 40.0));
    match c.draft_preview() {
        Some(ElementKind::Measurement { text, end, .. }) => {
            assert!(text.is_empty());
            assert_eq!(end, p(30.0, 40.0));
        }
        other => panic!("unexpected preview {:?}", other),
    }
}
