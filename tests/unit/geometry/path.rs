use super::*;
use kurbo::PathEl;

fn square() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 10.0),
    ]
}

#[test]
fn smooth_path_needs_enough_points() {
    assert!(build_smooth_path(square().into_iter().take(2), true, 0.5).is_none());
    assert!(build_smooth_path(square().into_iter().take(2), false, 0.5).is_some());
    assert!(build_smooth_path(square().into_iter().take(1), false, 0.5).is_none());
    assert!(build_smooth_path(Vec::new(), true, 0.5).is_none());
}

#[test]
fn closed_smooth_path_passes_through_every_point() {
    let path = build_smooth_path(square(), true, 1.0).unwrap();
    let ends: Vec<Point> = path
        .elements()
        .iter()
        .filter_map(|el| match el {
            PathEl::CurveTo(_, _, p) => Some(*p),
            _ => None,
        })
        .collect();
    assert_eq!(ends.len(), 4);
    assert_eq!(ends[3], Point::new(0.0, 0.0));
    assert!(matches!(path.elements().last(), Some(PathEl::ClosePath)));
}

#[test]
fn zero_smoothing_keeps_controls_on_the_endpoints() {
    let path = build_smooth_path(square(), true, 0.0).unwrap();
    let PathEl::CurveTo(c1, c2, p) = path.elements()[1] else {
        panic!("expected curve");
    };
    assert_eq!(c1, Point::new(0.0, 0.0));
    assert_eq!(c2, p);
}

#[test]
fn polygon_and_open_paths_reject_degenerate_input() {
    assert!(build_polygon_path(square().into_iter().take(2)).is_none());
    assert_eq!(build_polygon_path(square()).unwrap().elements().len(), 5);
    assert!(build_open_path([Point::ZERO]).is_none());
    assert!(build_open_path(square()).is_some());
}

#[test]
fn bounds_cover_all_points() {
    let b = bounds(square()).unwrap();
    assert_eq!(b, Rect::new(0.0, 0.0, 10.0, 10.0));
    assert!(bounds(Vec::new()).is_none());
}

#[test]
fn star_alternates_radii() {
    let star = star_path(Point::ZERO, 10.0, 4.0, 5, 0.0);
    let b = star.bounding_box();
    assert!((b.x1 - 10.0).abs() < 1e-9);
    assert_eq!(star.elements().len(), 11);
}
