//! Universal background, fill and stroke treatments shared by every template.

use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba, Vec2};
use crate::params::resolve::ResolvedParams;
use crate::raster::context::{ColorStop, LineCap, LineStyle, Paint, RasterContext};

const FALLBACK_BACKGROUND: Rgba = Rgba::WHITE;
const FALLBACK_FILL: Rgba = Rgba::BLACK;

/// Decoded `background*` parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum BackgroundSettings {
    Transparent,
    Solid(Rgba),
    Gradient {
        start: Rgba,
        mid: Option<Rgba>,
        end: Rgba,
        /// Axis direction in radians.
        direction: f64,
    },
}

impl BackgroundSettings {
    pub fn from_resolved(p: &ResolvedParams) -> Self {
        match p.text("backgroundType") {
            Some("solid") => Self::Solid(p.color_or("backgroundColor", FALLBACK_BACKGROUND)),
            Some("gradient") => Self::Gradient {
                start: p.color_or("backgroundGradientStart", FALLBACK_BACKGROUND),
                mid: p
                    .flag_or("backgroundGradientUseMid", false)
                    .then(|| p.color_or("backgroundGradientMid", FALLBACK_BACKGROUND)),
                end: p.color_or("backgroundGradientEnd", FALLBACK_BACKGROUND),
                direction: p.number_or("backgroundGradientDirection", 0.0),
            },
            _ => Self::Transparent,
        }
    }

    /// Paint the whole `width x height` surface in device space. Always clears first.
    pub fn apply(&self, ctx: &mut dyn RasterContext, width: f64, height: f64) {
        let rect = Rect::new(0.0, 0.0, width, height);
        ctx.save();
        ctx.set_transform(Affine::IDENTITY);
        ctx.set_global_alpha(1.0);
        ctx.clear_rect(rect);
        match self {
            Self::Transparent => {}
            Self::Solid(c) => ctx.fill_rect(rect, &Paint::Solid(*c)),
            Self::Gradient {
                start,
                mid,
                end,
                direction,
            } => {
                let mut stops = vec![ColorStop::new(0.0, *start)];
                if let Some(m) = mid {
                    stops.push(ColorStop::new(0.5, *m));
                }
                stops.push(ColorStop::new(1.0, *end));
                let (a, b) = gradient_axis(rect, *direction);
                ctx.fill_rect(rect, &Paint::linear(a, b, stops));
            }
        }
        ctx.restore();
    }
}

/// Endpoints of a linear gradient through the center of `rect` along `direction`
/// (radians), spanning the rect diagonal.
pub fn gradient_axis(rect: Rect, direction: f64) -> (Point, Point) {
    let c = rect.center();
    let half = rect.width().hypot(rect.height()) / 2.0;
    let d = if direction.is_finite() {
        Vec2::from_angle(direction) * half
    } else {
        Vec2::new(half, 0.0)
    };
    (c - d, c + d)
}

/// Geometry of a gradient fill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GradientShape {
    /// Direction-parameterized axis over the shape bounds.
    #[default]
    Linear,
    /// Centered on the shape bounds.
    Radial,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FillKind {
    None,
    Solid(Rgba),
    Gradient {
        start: Rgba,
        end: Rgba,
        direction: f64,
    },
}

/// Decoded `fill*` parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct FillSettings {
    pub kind: FillKind,
    pub opacity: f64,
    pub shape: GradientShape,
}

impl FillSettings {
    pub fn from_resolved(p: &ResolvedParams) -> Self {
        let kind = match p.text("fillType") {
            Some("solid") => FillKind::Solid(p.color_or("fillColor", FALLBACK_FILL)),
            Some("gradient") => FillKind::Gradient {
                start: p.color_or("fillGradientStart", FALLBACK_FILL),
                end: p.color_or("fillGradientEnd", FALLBACK_FILL),
                direction: p.number_or("fillGradientDirection", 0.0),
            },
            _ => FillKind::None,
        };
        Self {
            kind,
            opacity: p.number_or("fillOpacity", 1.0).clamp(0.0, 1.0),
            shape: GradientShape::Linear,
        }
    }

    /// Use a radial gradient instead of the linear default.
    pub fn radial(mut self) -> Self {
        self.shape = GradientShape::Radial;
        self
    }

    pub fn apply(&self, ctx: &mut dyn RasterContext, path: &BezPath) {
        use kurbo::Shape;

        let paint = match &self.kind {
            FillKind::None => return,
            FillKind::Solid(c) => Paint::Solid(*c),
            FillKind::Gradient {
                start,
                end,
                direction,
            } => {
                let b = path.bounding_box();
                let stops = [ColorStop::new(0.0, *start), ColorStop::new(1.0, *end)];
                match self.shape {
                    GradientShape::Linear => {
                        let (a, z) = gradient_axis(b, *direction);
                        Paint::linear(a, z, stops)
                    }
                    GradientShape::Radial => {
                        Paint::radial(b.center(), b.width().max(b.height()) / 2.0, stops)
                    }
                }
            }
        };
        ctx.save();
        let alpha = ctx.global_alpha() * self.opacity;
        ctx.set_global_alpha(alpha);
        ctx.fill_path(path, &paint);
        ctx.restore();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeKind {
    None,
    Solid,
    Dashed,
    Dotted,
}

/// Decoded `stroke*` parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeSettings {
    pub kind: StrokeKind,
    pub color: Rgba,
    pub width: f64,
    pub opacity: f64,
}

impl StrokeSettings {
    pub fn from_resolved(p: &ResolvedParams) -> Self {
        let kind = match p.text("strokeType") {
            Some("solid") => StrokeKind::Solid,
            Some("dashed") => StrokeKind::Dashed,
            Some("dotted") => StrokeKind::Dotted,
            _ => StrokeKind::None,
        };
        Self {
            kind,
            color: p.color_or("strokeColor", Rgba::BLACK),
            width: p.number_or("strokeWidth", 1.0).max(0.0),
            opacity: p.number_or("strokeOpacity", 1.0).clamp(0.0, 1.0),
        }
    }

    /// Dash pattern for this stroke kind, proportional to the stroke width.
    pub fn dash_pattern(&self) -> Option<[f64; 2]> {
        let w = self.width;
        match self.kind {
            StrokeKind::Dashed => Some([w * 3.0, w * 2.0]),
            StrokeKind::Dotted => Some([w, w * 1.5]),
            StrokeKind::None | StrokeKind::Solid => None,
        }
    }

    /// Stroke `path`. The dash pattern is always reset to solid afterwards.
    pub fn apply(&self, ctx: &mut dyn RasterContext, path: &BezPath) {
        if self.kind == StrokeKind::None || self.width <= 0.0 {
            return;
        }
        ctx.save();
        let alpha = ctx.global_alpha() * self.opacity;
        ctx.set_global_alpha(alpha);
        let mut style = LineStyle::round(self.width);
        if self.kind == StrokeKind::Dashed {
            style = style.with_cap(LineCap::Butt);
        }
        match self.dash_pattern() {
            Some(pattern) => ctx.set_line_dash(&pattern),
            None => ctx.set_line_dash(&[]),
        }
        ctx.stroke_path(path, &Paint::Solid(self.color), &style);
        ctx.set_line_dash(&[]);
        ctx.restore();
    }
}

/// Apply the universal background to the full canvas.
pub fn apply_background(
    ctx: &mut dyn RasterContext,
    width: f64,
    height: f64,
    params: &ResolvedParams,
) {
    BackgroundSettings::from_resolved(params).apply(ctx, width, height);
}

/// Apply the universal fill to `path`.
pub fn apply_fill(ctx: &mut dyn RasterContext, path: &BezPath, params: &ResolvedParams) {
    FillSettings::from_resolved(params).apply(ctx, path);
}

/// Apply the universal stroke to `path`.
pub fn apply_stroke(ctx: &mut dyn RasterContext, path: &BezPath, params: &ResolvedParams) {
    StrokeSettings::from_resolved(params).apply(ctx, path);
}

#[cfg(test)]
#[path = "../../tests/unit/paint/appliers.rs"]
mod tests;
