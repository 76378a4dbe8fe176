use kurbo::Shape;

use crate::foundation::core::{BezPath, Point, Rect, Vec2};

/// Minimum points for a closed path.
pub const MIN_CLOSED_POINTS: usize = 3;

/// Smooth path through `points` using Catmull-Rom tangents converted to cubic Béziers.
///
/// `smoothing` in `[0, 1]` scales the control-point offset: `1` is a classic Catmull-Rom
/// spline, `0` collapses to a polyline. Returns `None` for fewer than 3 points when `closed`,
/// fewer than 2 otherwise.
pub fn build_smooth_path(
    points: impl IntoIterator<Item = Point>,
    closed: bool,
    smoothing: f64,
) -> Option<BezPath> {
    let pts: Vec<Point> = points.into_iter().collect();
    let n = pts.len();
    if n < if closed { MIN_CLOSED_POINTS } else { 2 } {
        return None;
    }
    let k = if smoothing.is_finite() {
        smoothing.clamp(0.0, 1.0) / 6.0
    } else {
        0.0
    };
    let at = |i: isize| -> Point {
        if closed {
            pts[i.rem_euclid(n as isize) as usize]
        } else {
            pts[i.clamp(0, n as isize - 1) as usize]
        }
    };

    let mut path = BezPath::new();
    path.move_to(pts[0]);
    let segments = if closed { n } else { n - 1 };
    for i in 0..segments as isize {
        let (p0, p1, p2, p3) = (at(i - 1), at(i), at(i + 1), at(i + 2));
        let c1 = p1 + (p2 - p0) * k;
        let c2 = p2 - (p3 - p1) * k;
        path.curve_to(c1, c2, p2);
    }
    if closed {
        path.close_path();
    }
    Some(path)
}

/// Closed polygon through `points`; `None` below 3 points.
pub fn build_polygon_path(points: impl IntoIterator<Item = Point>) -> Option<BezPath> {
    let mut it = points.into_iter();
    let first = it.next()?;
    let mut path = BezPath::new();
    path.move_to(first);
    let mut count = 1;
    for p in it {
        path.line_to(p);
        count += 1;
    }
    if count < MIN_CLOSED_POINTS {
        return None;
    }
    path.close_path();
    Some(path)
}

/// Open polyline; `None` below 2 points.
pub fn build_open_path(points: impl IntoIterator<Item = Point>) -> Option<BezPath> {
    let mut it = points.into_iter();
    let first = it.next()?;
    let mut path = BezPath::new();
    path.move_to(first);
    let mut any = false;
    for p in it {
        path.line_to(p);
        any = true;
    }
    any.then_some(path)
}

/// Axis-aligned bounds of `points`, or `None` when empty.
pub fn bounds(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
    let mut it = points.into_iter();
    let first = it.next()?;
    Some(it.fold(Rect::from_points(first, first), |r, p| r.union_pt(p)))
}

pub fn circle_path(center: Point, radius: f64) -> BezPath {
    kurbo::Circle::new(center, radius.max(0.0)).to_path(0.1)
}

pub fn line_path(from: Point, to: Point) -> BezPath {
    let mut p = BezPath::new();
    p.move_to(from);
    p.line_to(to);
    p
}

/// Star with `spikes` points alternating between `outer` and `inner` radius.
pub fn star_path(center: Point, outer: f64, inner: f64, spikes: usize, rotation: f64) -> BezPath {
    let spikes = spikes.max(2);
    let step = std::f64::consts::PI / spikes as f64;
    let pts = (0..spikes * 2).map(|i| {
        let r = if i % 2 == 0 { outer } else { inner };
        let a = rotation + i as f64 * step;
        center + Vec2::from_angle(a) * r
    });
    build_polygon_path(pts).unwrap_or_default()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/path.rs"]
mod tests;
