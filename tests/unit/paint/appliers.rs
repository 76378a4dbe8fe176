use super::*;
use crate::params::resolve::resolve;
use crate::params::schema::ParameterSchema;
use crate::raster::record::{DrawCall, RecordingCanvas};
use serde_json::{Value, json};

fn params(raw: Value) -> ResolvedParams {
    resolve(&raw, &ParameterSchema::default().with_universal(), 200.0, 100.0, 0.0)
}

fn square() -> BezPath {
    crate::geometry::path::build_polygon_path([
        Point::new(10.0, 10.0),
        Point::new(50.0, 10.0),
        Point::new(50.0, 50.0),
        Point::new(10.0, 50.0),
    ])
    .unwrap()
}

#[test]
fn transparent_background_only_clears() {
    let mut c = RecordingCanvas::new(200.0, 100.0);
    apply_background(&mut c, 200.0, 100.0, &params(json!({})));
    assert_eq!(c.ops().len(), 1);
    assert!(matches!(c.ops()[0].call, DrawCall::ClearRect { .. }));
}

#[test]
fn solid_background_fills_the_full_rect() {
    let mut c = RecordingCanvas::new(200.0, 100.0);
    apply_background(
        &mut c,
        200.0,
        100.0,
        &params(json!({"backgroundType": "solid", "backgroundColor": "#ff0000"})),
    );
    let DrawCall::FillRect { rect, paint } = &c.ops()[1].call else {
        panic!("expected fill");
    };
    assert_eq!(*rect, Rect::new(0.0, 0.0, 200.0, 100.0));
    assert_eq!(*paint, Paint::Solid(Rgba::rgba(1.0, 0.0, 0.0, 1.0)));
}

#[test]
fn gradient_background_spans_the_diagonal_around_the_center() {
    let mut c = RecordingCanvas::new(200.0, 100.0);
    apply_background(
        &mut c,
        200.0,
        100.0,
        &params(json!({
            "backgroundType": "gradient",
            "backgroundGradientDirection": 0,
            "backgroundGradientUseMid": true,
        })),
    );
    let DrawCall::FillRect {
        paint: Paint::Linear(g),
        ..
    } = &c.ops()[1].call
    else {
        panic!("expected linear gradient");
    };
    let half = 200f64.hypot(100.0) / 2.0;
    assert!((g.start.x - (100.0 - half)).abs() < 1e-9);
    assert!((g.end.x - (100.0 + half)).abs() < 1e-9);
    assert!((g.start.y - 50.0).abs() < 1e-9);
    assert_eq!(g.stops.len(), 3);
}

#[test]
fn background_ignores_the_current_transform() {
    let mut c = RecordingCanvas::new(200.0, 100.0);
    c.scale(3.0);
    apply_background(&mut c, 200.0, 100.0, &params(json!({"backgroundType": "solid"})));
    assert_eq!(c.ops()[1].state.transform, Affine::IDENTITY);
    assert_eq!(c.transform(), Affine::scale(3.0));
}

#[test]
fn fill_none_draws_nothing_and_solid_uses_opacity() {
    let mut c = RecordingCanvas::new(100.0, 100.0);
    apply_fill(&mut c, &square(), &params(json!({"fillType": "none"})));
    assert!(c.ops().is_empty());

    apply_fill(
        &mut c,
        &square(),
        &params(json!({"fillType": "solid", "fillOpacity": 0.25})),
    );
    assert_eq!(c.ops()[0].state.global_alpha, 0.25);
    assert_eq!(c.global_alpha(), 1.0);
}

#[test]
fn radial_fill_centers_on_the_shape_bounds() {
    let mut c = RecordingCanvas::new(100.0, 100.0);
    FillSettings::from_resolved(&params(json!({"fillType": "gradient"})))
        .radial()
        .apply(&mut c, &square());
    let DrawCall::FillPath {
        paint: Paint::Radial(g),
        ..
    } = &c.ops()[0].call
    else {
        panic!("expected radial gradient");
    };
    assert_eq!(g.end_center, Point::new(30.0, 30.0));
    assert_eq!(g.end_radius, 20.0);
}

#[test]
fn dash_patterns_scale_with_width_and_always_reset() {
    for (kind, expected) in [("dashed", vec![12.0, 8.0]), ("dotted", vec![4.0, 6.0])] {
        let mut c = RecordingCanvas::new(100.0, 100.0);
        apply_stroke(
            &mut c,
            &square(),
            &params(json!({"strokeType": kind, "strokeWidth": 4})),
        );
        assert_eq!(c.ops()[0].state.line_dash.as_slice(), expected.as_slice());
        assert!(c.line_dash().is_empty());
    }
}

#[test]
fn solid_stroke_clears_a_dash_inherited_from_the_caller() {
    let mut c = RecordingCanvas::new(100.0, 100.0);
    c.set_line_dash(&[5.0, 5.0]);
    apply_stroke(&mut c, &square(), &params(json!({"strokeType": "solid"})));
    assert!(c.ops()[0].state.line_dash.is_empty());
}

#[test]
fn stroke_none_or_zero_width_is_a_no_op() {
    let mut c = RecordingCanvas::new(100.0, 100.0);
    apply_stroke(&mut c, &square(), &params(json!({"strokeType": "none"})));
    apply_stroke(&mut c, &square(), &params(json!({"strokeWidth": 0})));
    assert!(c.ops().is_empty());
}
