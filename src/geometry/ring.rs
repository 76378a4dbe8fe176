use std::f64::consts::TAU;

use crate::foundation::core::Point;
use crate::geometry::point::GeometryPoint;

/// `floor(base + complexity * range)`, never negative. Non-finite complexity counts as zero.
pub fn point_count(base: f64, complexity: f64, range: f64) -> usize {
    let c = if complexity.is_finite() { complexity } else { 0.0 };
    (base + c * range).floor().max(0.0) as usize
}

/// Angle of sample `i` of an `n`-point closed ring.
pub fn ring_angle(i: usize, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    i as f64 / n as f64 * TAU
}

/// Sample a closed ring of `n` points around `center`.
///
/// `sample(i, angle)` returns the radius and per-point extras for that angle.
pub fn ring<T>(
    center: Point,
    n: usize,
    mut sample: impl FnMut(usize, f64) -> (f64, T),
) -> Vec<GeometryPoint<T>> {
    (0..n)
        .map(|i| {
            let angle = ring_angle(i, n);
            let (r, extra) = sample(i, angle);
            GeometryPoint::polar(center, angle, r, extra)
        })
        .collect()
}

/// `|r(2π) - r(0)|` for a radius function; zero for a seamless ring.
pub fn closure_gap(radius_at: impl Fn(f64) -> f64) -> f64 {
    (radius_at(TAU) - radius_at(0.0)).abs()
}

/// Sum of `(amplitude, frequency, phase)` harmonics of `angle`. Integer frequencies keep the
/// sum periodic in `2π`.
pub fn harmonics(angle: f64, terms: &[(f64, f64, f64)]) -> f64 {
    terms
        .iter()
        .map(|&(amp, freq, phase)| amp * (angle * freq + phase).sin())
        .sum()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/ring.rs"]
mod tests;
