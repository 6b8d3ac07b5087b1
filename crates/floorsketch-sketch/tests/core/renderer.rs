use floorsketch_sketch::typography::{measure_text, FontWeight, TextStyle};
use floorsketch_sketch::{
    Color, DrawnElement, ElementCollection, ElementKind, MarkerKind, Point, SketchRenderer,
    MEASUREMENT_ACCENT,
};
use tiny_skia::Pixmap;

fn surface() -> Pixmap {
    Pixmap::new(200, 160).unwrap()
}

fn is_white(pixmap: &Pixmap, x: u32, y: u32) -> bool {
    let px = pixmap.pixel(x, y).unwrap();
    px.red() == 255 && px.green() == 255 && px.blue() == 255
}

fn close_to(pixmap: &Pixmap, x: u32, y: u32, color: Color) -> bool {
    let px = pixmap.pixel(x, y).unwrap().demultiply();
    let near = |a: u8, b: u8| (a as i16 - b as i16).abs() <= 3;
    near(px.red(), color.r) && near(px.green(), color.g) && near(px.blue(), color.b)
}

#[test]
fn test_grid_toggle() {
    let mut renderer = SketchRenderer::default();
    let mut pixmap = surface();
    let elements = ElementCollection::new();

    renderer.redraw(&mut pixmap, &elements, None, Color::BLACK);
    assert!((18..=21).any(|x| !is_white(&pixmap, x, 10)));

    renderer.set_grid_visible(false);
    renderer.redraw(&mut pixmap, &elements, None, Color::BLACK);
    assert!(pixmap.pixels().iter().all(|p| p.red() == 255 && p.blue() == 255));
}

#[test]
fn test_rect_drawn_in_any_drag_direction() {
    let renderer = SketchRenderer::default().with_grid(false, 20.0);
    let color = Color::rgb(0x1e, 0x40, 0xaf);
    let mut elements = ElementCollection::new();
    elements.push(DrawnElement::new(
        ElementKind::Rect {
            start: Point::new(100.0, 80.0),
            end: Point::new(20.0, 10.0),
        },
        color,
    ));

    let mut pixmap = surface();
    renderer.redraw(&mut pixmap, &elements, None, Color::BLACK);

    assert!(close_to(&pixmap, 20, 40, color));
    assert!(close_to(&pixmap, 60, 80, color));
    assert!(is_white(&pixmap, 60, 40));
}

#[test]
fn test_marker_disc_uses_table_color() {
    let renderer = SketchRenderer::default().with_grid(false, 20.0);
    let mut elements = ElementCollection::new();
    elements.push(DrawnElement::new(
        ElementKind::Marker {
            at: Point::new(100.0, 100.0),
            marker_type: MarkerKind::Water,
        },
        Color::BLACK,
    ));

    let mut pixmap = surface();
    renderer.redraw(&mut pixmap, &elements, None, Color::BLACK);

    assert!(close_to(&pixmap, 100, 112, Color::rgb(0x3b, 0x82, 0xf6)));
    assert!(is_white(&pixmap, 100, 130));
}

#[test]
fn test_draft_drawn_on_top() {
    let renderer = SketchRenderer::default().with_grid(false, 20.0);
    let draft_color = Color::rgb(0xdc, 0x26, 0x26);
    let draft = ElementKind::Line {
        start: Point::new(0.0, 50.5),
        end: Point::new(200.0, 50.5),
    };

    let mut pixmap = surface();
    renderer.redraw(&mut pixmap, &ElementCollection::new(), Some(&draft), draft_color);
    assert!(close_to(&pixmap, 100, 50, draft_color));

    renderer.redraw(&mut pixmap, &ElementCollection::new(), None, draft_color);
    assert!(is_white(&pixmap, 100, 50));
}

#[test]
fn test_single_point_freehand_draws_nothing() {
    let renderer = SketchRenderer::default().with_grid(false, 20.0);
    let mut elements = ElementCollection::new();
    elements.push(DrawnElement::new(
        ElementKind::Freehand {
            points: vec![Point::new(50.0, 50.0)],
        },
        Color::BLACK,
    ));

    let mut pixmap = surface();
    renderer.redraw(&mut pixmap, &elements, None, Color::BLACK);
    assert!(pixmap.pixels().iter().all(|p| p.red() == 255));
}

#[test]
fn test_measurement_line_is_accent_colored() {
    let renderer = SketchRenderer::default().with_grid(false, 20.0);
    let mut elements = ElementCollection::new();
    elements.push(DrawnElement::new(
        ElementKind::Measurement {
            start: Point::new(10.0, 100.0),
            end: Point::new(190.0, 100.0),
            text: String::new(),
        },
        Color::BLACK,
    ));

    let mut pixmap = surface();
    renderer.redraw(&mut pixmap, &elements, None, Color::BLACK);

    // End cap at the start point spans eight units above and below.
    assert!(!is_white(&pixmap, 10, 94));
    assert!(!is_white(&pixmap, 10, 105));
    assert!(is_white(&pixmap, 10, 120));
}

#[test]
fn test_measurement_label_box_covers_elements_below() {
    let renderer = SketchRenderer::default().with_grid(false, 20.0);
    let mut elements = ElementCollection::new();
    elements.push(DrawnElement::new(
        ElementKind::Line {
            start: Point::new(0.0, 95.5),
            end: Point::new(200.0, 95.5),
        },
        Color::BLACK,
    ));
    elements.push(DrawnElement::new(
        ElementKind::Measurement {
            start: Point::new(10.0, 100.0),
            end: Point::new(190.0, 100.0),
            text: "2,00 m".to_string(),
        },
        MEASUREMENT_ACCENT,
    ));

    let mut pixmap = surface();
    renderer.redraw(&mut pixmap, &elements, None, Color::BLACK);

    // Label box is centered on the midpoint (100, 100), 20 high.
    let style = TextStyle::new(12.0, FontWeight::Bold, MEASUREMENT_ACCENT);
    let text_width = measure_text("2,00 m", &style);
    let box_left = 100.0 - text_width / 2.0 - 4.0;
    let inside_padding = (box_left + 2.0).floor() as u32;

    // The black line runs through the box but is hidden inside its padding.
    assert!(close_to(&pixmap, 5, 95, Color::BLACK));
    assert!(is_white(&pixmap, inside_padding, 95));

    // Top edge of the box sits at y = 90.
    let outline = pixmap.pixel(100, 89).unwrap().demultiply();
    assert!(outline.red() < 200);
    assert!(outline.blue() as i16 - outline.red() as i16 > 60);
}

#[test]
fn test_text_stays_near_its_anchor() {
    let renderer = SketchRenderer::default().with_grid(false, 20.0);
    let color = Color::rgb(0xdc, 0x26, 0x26);
    let mut elements = ElementCollection::new();
    elements.push(DrawnElement::new(
        ElementKind::Text {
            anchor: Point::new(20.0, 50.0),
            text: "Küche".to_string(),
        },
        color,
    ));

    let mut pixmap = surface();
    renderer.redraw(&mut pixmap, &elements, None, Color::BLACK);

    let width = measure_text("Küche", &TextStyle::new(14.0, FontWeight::Bold, color));
    let right = (20.0 + width + 4.0).ceil() as u32;
    for y in 0..pixmap.height() {
        for x in 0..pixmap.width() {
            if !is_white(&pixmap, x, y) {
                assert!((18..=right).contains(&x), "pixel at x={} outside text run", x);
                assert!((32..=56).contains(&y), "pixel at y={} outside text line", y);
            }
        }
    }
}
