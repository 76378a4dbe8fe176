use super::*;
use crate::foundation::core::{Point, Rgba};
use crate::raster::context::Blend;

fn tri() -> BezPath {
    let mut p = BezPath::new();
    p.move_to(Point::new(0.0, 0.0));
    p.line_to(Point::new(4.0, 0.0));
    p.line_to(Point::new(0.0, 4.0));
    p.close_path();
    p
}

#[test]
fn ops_carry_the_state_they_were_issued_under() {
    let mut c = RecordingCanvas::new(20.0, 20.0);
    c.save();
    c.set_global_alpha(0.4);
    c.set_blend(Blend::Plus);
    c.fill_path(&tri(), &Paint::Solid(Rgba::WHITE));
    c.restore();
    c.stroke_path(&tri(), &Paint::Solid(Rgba::BLACK), &LineStyle::new(2.0));

    let ops = c.ops();
    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0].state.global_alpha, 0.4);
    assert_eq!(ops[0].state.blend, Blend::Plus);
    assert_eq!(ops[0].depth, 1);
    assert!(ops[1].state.is_pristine());
    assert_eq!(ops[1].depth, 0);
}

#[test]
fn identical_call_sequences_share_a_fingerprint() {
    let draw = |c: &mut RecordingCanvas, alpha: f64| {
        c.set_global_alpha(alpha);
        c.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), &Paint::Solid(Rgba::WHITE));
    };
    let mut a = RecordingCanvas::new(8.0, 8.0);
    let mut b = RecordingCanvas::new(8.0, 8.0);
    draw(&mut a, 1.0);
    draw(&mut b, 1.0);
    assert_eq!(a, b);
    assert_eq!(a.fingerprint(), b.fingerprint());

    let mut d = RecordingCanvas::new(8.0, 8.0);
    draw(&mut d, 0.9);
    assert_ne!(a.fingerprint(), d.fingerprint());
}

#[test]
fn clear_log_keeps_state() {
    let mut c = RecordingCanvas::new(8.0, 8.0);
    c.set_line_dash(&[1.0, 1.0]);
    c.clear_rect(Rect::new(0.0, 0.0, 8.0, 8.0));
    c.clear_log();
    assert!(c.ops().is_empty());
    assert_eq!(c.line_dash(), &[1.0, 1.0]);
}
