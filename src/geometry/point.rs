use crate::foundation::core::Point;

/// One vertex of a generated ring or path.
///
/// `extra` holds the template-specific per-point scalars that later passes read
/// (facet intensity, tension, organic flow, pencil pressure...).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometryPoint<T = ()> {
    pub x: f64,
    pub y: f64,
    /// Parameter the point was generated from: polar angle for rings, path parameter for
    /// open paths.
    pub angle: f64,
    /// Distance from the generating center.
    pub radius: f64,
    pub extra: T,
}

impl<T> GeometryPoint<T> {
    /// Point at `radius` along `angle` from `center`.
    pub fn polar(center: Point, angle: f64, radius: f64, extra: T) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            x: center.x + c * radius,
            y: center.y + s * radius,
            angle,
            radius,
            extra,
        }
    }

    pub fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
