use chrono::NaiveDate;
use floorsketch_sketch::{
    MarkerKind, MouseInput, Point, SessionOptions, SessionStatus, SketchHost, SketchSession, Tool,
    TouchInput,
};

#[derive(Default)]
struct TestHost {
    saved: Vec<String>,
    closed: usize,
    clear_answers: Vec<bool>,
    clear_asked: usize,
}

impl SketchHost for TestHost {
    fn on_save(&mut self, data_uri: String) {
        self.saved.push(data_uri);
    }

    fn on_close(&mut self) {
        self.closed += 1;
    }

    fn confirm_clear(&mut self) -> bool {
        self.clear_asked += 1;
        self.clear_answers.pop().unwrap_or(false)
    }
}

fn mounted(host: TestHost) -> SketchSession<TestHost> {
    let mut session = SketchSession::new(host, SessionOptions::default());
    session.mount().unwrap();
    session
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

#[test]
fn test_marker_through_zoomed_viewport() {
    let mut session = mounted(TestHost::default());
    session.set_surface_offset(50.0, 20.0);
    session.zoom_in();
    session.select_tool(Tool::Marker);
    session.select_marker(MarkerKind::Water);

    let scale = session.viewport().scale();
    session.pointer_down(&MouseInput {
        client_x: 50.0 + 100.0 * scale,
        client_y: 20.0 + 100.0 * scale,
    });

    let marker = session.controller().elements().last().unwrap();
    let at = marker.points()[0];
    assert!((at.x - 100.0).abs() < 1e-9);
    assert!((at.y - 100.0).abs() < 1e-9);
    assert_eq!(marker.color().to_hex(), "#3b82f6");

    session.undo();
    assert!(session.controller().elements().is_empty());
}

#[test]
fn test_oversized_export_frame_is_skipped() {
    let mut options = SessionOptions::default();
    options.export.padding = u32::MAX / 2;
    let mut session = SketchSession::new(TestHost::default(), options);
    session.mount().unwrap();

    assert!(session.commit_on(date()).is_none());
    assert!(session.is_open());
    assert!(session.host().saved.is_empty());
}

#[test]
fn test_empty_touch_is_ignored() {
    let mut session = mounted(TestHost::default());
    session.select_tool(Tool::Marker);
    session.pointer_down(&TouchInput::default());
    assert!(session.controller().elements().is_empty());
}

#[test]
fn test_measurement_flow() {
    let mut session = mounted(TestHost::default());
    session.select_tool(Tool::Measurement);
    session.pointer_down(&(10.0, 10.0));
    session.pointer_move(&(110.0, 10.0));
    session.pointer_up();
    session.confirm_label("2,00 m");

    let m = session.controller().elements().last().unwrap();
    assert_eq!(m.points(), vec![Point::new(10.0, 10.0), Point::new(110.0, 10.0)]);
    assert_eq!(m.kind().text(), Some("2,00 m"));
}

#[test]
fn test_clear_declined_keeps_elements() {
    let mut session = mounted(TestHost::default());
    session.select_tool(Tool::Marker);
    session.pointer_down(&(10.0, 10.0));
    session.pointer_down(&(20.0, 20.0));

    session.clear();
    assert_eq!(session.controller().elements().len(), 2);
    assert_eq!(session.host().clear_asked, 1);
}

#[test]
fn test_clear_confirmed_empties() {
    let host = TestHost {
        clear_answers: vec![true],
        ..Default::default()
    };
    let mut session = mounted(host);
    session.select_tool(Tool::Marker);
    session.pointer_down(&(10.0, 10.0));
    session.clear();
    assert!(session.controller().elements().is_empty());
}

#[test]
fn test_commit_delivers_data_uri() {
    let mut session = mounted(TestHost::default());
    session.select_tool(Tool::Line);
    session.pointer_down(&(0.0, 0.0));
    session.pointer_move(&(300.0, 200.0));
    session.pointer_up();

    let artifact = session.commit_on(date()).unwrap();
    assert_eq!((artifact.width, artifact.height), (880, 780));
    assert_eq!(session.status(), SessionStatus::Saved);

    let host = session.into_host();
    assert_eq!(host.saved.len(), 1);
    assert!(host.saved[0].starts_with("data:image/png;base64,"));
    assert_eq!(host.saved[0], artifact.data_uri);
    assert_eq!(host.closed, 0);
}

#[test]
fn test_commit_before_mount_is_noop() {
    let mut session = SketchSession::new(TestHost::default(), SessionOptions::default());
    assert!(session.commit_on(date()).is_none());
    assert!(session.host().saved.is_empty());
    assert!(session.is_open());
}

#[test]
fn test_existing_sketch_is_not_loaded() {
    let mut session = SketchSession::with_existing_sketch(
        TestHost::default(),
        SessionOptions::default(),
        Some("data:image/png;base64,AAAA"),
    );
    session.mount().unwrap();
    assert!(session.controller().elements().is_empty());
}

#[test]
fn test_grid_toggle_redraws_surface() {
    let mut session = mounted(TestHost::default());
    assert!(session.grid_visible());
    session.toggle_grid();
    assert!(!session.grid_visible());

    let surface = session.surface().unwrap();
    assert!(surface.pixels().iter().all(|p| p.red() == 255 && p.green() == 255));
}

#[test]
fn test_close_notifies_host() {
    let mut session = mounted(TestHost::default());
    session.close();
    assert_eq!(session.status(), SessionStatus::Closed);
    assert!(session.commit_on(date()).is_none());

    let host = session.into_host();
    assert_eq!(host.closed, 1);
    assert!(host.saved.is_empty());
}
