use super::*;

#[test]
fn point_count_floors_and_never_goes_negative() {
    assert_eq!(point_count(8.0, 0.5, 24.0), 20);
    assert_eq!(point_count(4.0, 0.0, 8.0), 4);
    assert_eq!(point_count(4.0, 1.0, 8.0), 12);
    assert_eq!(point_count(2.0, -5.0, 1.0), 0);
    assert_eq!(point_count(3.0, f64::NAN, 10.0), 3);
}

#[test]
fn ring_samples_evenly_around_the_center() {
    let c = Point::new(50.0, 50.0);
    let pts = ring(c, 4, |_, _| (10.0, ()));
    assert_eq!(pts.len(), 4);
    assert!((pts[0].x - 60.0).abs() < 1e-9);
    assert!((pts[1].y - 60.0).abs() < 1e-9);
    assert!((pts[2].angle - std::f64::consts::PI).abs() < 1e-12);
    assert!(ring(c, 0, |_, _| (1.0, ())).is_empty());
}

#[test]
fn integer_harmonics_close_the_ring() {
    let r = |a: f64| 40.0 + harmonics(a, &[(5.0, 3.0, 0.7), (2.0, 7.0, 1.3)]);
    assert!(closure_gap(r) < 1e-9);
    let open = |a: f64| 40.0 + harmonics(a, &[(5.0, 2.5, 0.5)]);
    assert!(closure_gap(open) > 1.0);
}
