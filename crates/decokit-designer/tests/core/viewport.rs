use decokit_core::Point;
use decokit_designer::viewport::ZoomController;

#[test]
fn test_zoom_defaults() {
    let zoom = ZoomController::default();
    assert_eq!(zoom.zoom(), 1.0);
    assert_eq!(zoom.min(), 0.5);
    assert_eq!(zoom.max(), 2.0);
    assert_eq!(zoom.step(), 0.1);
}

#[test]
fn test_zoom_in_steps_and_clamps() {
    let mut zoom = ZoomController::default();
    for _ in 0..6 {
        zoom.zoom_in();
    }
    assert_eq!(zoom.zoom(), 1.6);

    zoom.zoom_in();
    assert_eq!(zoom.zoom(), 1.7);

    for _ in 0..10 {
        zoom.zoom_in();
    }
    assert_eq!(zoom.zoom(), 2.0);
    assert!(zoom.is_at_max());
}

#[test]
fn test_zoom_out_clamps_at_min() {
    let mut zoom = ZoomController::default();
    for _ in 0..20 {
        zoom.zoom_out();
    }
    assert_eq!(zoom.zoom(), 0.5);
    assert!(zoom.is_at_min());

    assert_eq!(zoom.reset(), 1.0);
}

#[test]
fn test_set_zoom_clamps() {
    let mut zoom = ZoomController::default();
    assert_eq!(zoom.set_zoom(5.0), 2.0);
    assert_eq!(zoom.set_zoom(0.01), 0.5);
    assert_eq!(zoom.set_zoom(1.234), 1.234);
}

#[test]
fn test_custom_bounds() {
    let mut zoom = ZoomController::new(0.25, 4.0, 0.25);
    zoom.zoom_in();
    assert_eq!(zoom.zoom(), 1.25);
    assert_eq!(zoom.to_string(), "125%");
}

#[test]
fn test_sub_percent_step_is_not_swallowed() {
    let mut zoom = ZoomController::new(0.5, 2.0, 0.004);
    for _ in 0..25 {
        zoom.zoom_in();
    }
    assert_eq!(zoom.zoom(), 1.1);
    assert_eq!(zoom.to_string(), "110%");
}

#[test]
fn test_zoom_does_not_move_canvas_points() {
    let mut zoom = ZoomController::default();
    let p = Point::new(123.0, 45.0);
    zoom.set_zoom(1.5);
    let back = zoom.screen_to_canvas(zoom.canvas_to_screen(p));
    assert!((back.x - p.x).abs() < 1e-9);
    assert!((back.y - p.y).abs() < 1e-9);
}
