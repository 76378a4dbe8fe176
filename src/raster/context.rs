use smallvec::SmallVec;

use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba, Vec2};

/// Compositing mode applied to subsequent draws.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Blend {
    /// Source-over.
    #[default]
    Normal,
    /// Additive (`lighter`).
    Plus,
    /// Screen.
    Screen,
    /// Multiply.
    Multiply,
    /// Overlay.
    Overlay,
    /// Soft light.
    SoftLight,
}

/// Stroke end cap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineCap {
    /// Flat, flush with the endpoint.
    #[default]
    Butt,
    /// Half-disc.
    Round,
    /// Half-square.
    Square,
}

/// Stroke corner join.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineJoin {
    /// Sharp corner.
    #[default]
    Miter,
    /// Rounded corner.
    Round,
    /// Cut corner.
    Bevel,
}

/// Stroke geometry. Dashing lives in [`DrawState`], not here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl LineStyle {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            cap: LineCap::default(),
            join: LineJoin::default(),
        }
    }

    pub fn round(width: f64) -> Self {
        Self {
            width,
            cap: LineCap::Round,
            join: LineJoin::Round,
        }
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }
}

/// One gradient stop; `offset` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

impl ColorStop {
    pub fn new(offset: f64, color: Rgba) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            color,
        }
    }
}

pub type Stops = SmallVec<[ColorStop; 4]>;

/// Linear gradient along `start -> end`, in user space.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: Stops,
}

/// Two-circle radial gradient, in user space.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    pub start_center: Point,
    pub start_radius: f64,
    pub end_center: Point,
    pub end_radius: f64,
    pub stops: Stops,
}

/// What a fill or stroke is painted with.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
    Radial(RadialGradient),
}

impl Paint {
    pub fn linear(start: Point, end: Point, stops: impl IntoIterator<Item = ColorStop>) -> Self {
        Self::Linear(LinearGradient {
            start,
            end,
            stops: stops.into_iter().collect(),
        })
    }

    /// Radial gradient growing from a point to a circle of `radius` around the same center.
    pub fn radial(center: Point, radius: f64, stops: impl IntoIterator<Item = ColorStop>) -> Self {
        Self::radial_two_point(center, 0.0, center, radius, stops)
    }

    pub fn radial_two_point(
        start_center: Point,
        start_radius: f64,
        end_center: Point,
        end_radius: f64,
        stops: impl IntoIterator<Item = ColorStop>,
    ) -> Self {
        Self::Radial(RadialGradient {
            start_center,
            start_radius: start_radius.max(0.0),
            end_center,
            end_radius: end_radius.max(0.0),
            stops: stops.into_iter().collect(),
        })
    }

    /// Same paint with every color's alpha multiplied by `k`.
    pub fn faded(&self, k: f64) -> Self {
        let fade = |stops: &Stops| -> Stops {
            stops
                .iter()
                .map(|s| ColorStop::new(s.offset, s.color.fade(k)))
                .collect()
        };
        match self {
            Self::Solid(c) => Self::Solid(c.fade(k)),
            Self::Linear(g) => Self::Linear(LinearGradient {
                stops: fade(&g.stops),
                ..g.clone()
            }),
            Self::Radial(g) => Self::Radial(RadialGradient {
                stops: fade(&g.stops),
                ..g.clone()
            }),
        }
    }
}

impl From<Rgba> for Paint {
    fn from(c: Rgba) -> Self {
        Self::Solid(c)
    }
}

/// Graphics state that `save`/`restore` bracket.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawState {
    pub global_alpha: f64,
    pub blend: Blend,
    pub line_dash: SmallVec<[f64; 4]>,
    pub transform: Affine,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            global_alpha: 1.0,
            blend: Blend::Normal,
            line_dash: SmallVec::new(),
            transform: Affine::IDENTITY,
        }
    }
}

impl DrawState {
    /// Whether every field still has its initial value.
    pub fn is_pristine(&self) -> bool {
        self.global_alpha == 1.0
            && self.blend == Blend::Normal
            && self.line_dash.is_empty()
            && self.transform == Affine::IDENTITY
    }
}

/// Current draw state plus the saved stack.
///
/// `restore` with nothing saved is a no-op, as on an HTML canvas.
#[derive(Clone, Debug, Default)]
pub struct StateStack {
    current: DrawState,
    saved: Vec<DrawState>,
}

impl StateStack {
    pub fn current(&self) -> &DrawState {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut DrawState {
        &mut self.current
    }

    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    pub fn restore(&mut self) {
        if let Some(prev) = self.saved.pop() {
            self.current = prev;
        }
    }

    /// Number of unmatched `save` calls.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

/// Mutable 2D drawing surface shared by every pass of one draw.
///
/// Implementors supply the primitives and the state stack; state management is provided.
/// Paints are given in user space and transformed by the current transform. Implementations
/// multiply every paint by the current global alpha.
pub trait RasterContext {
    /// Surface width in pixels.
    fn width(&self) -> f64;
    /// Surface height in pixels.
    fn height(&self) -> f64;

    fn state(&self) -> &StateStack;
    fn state_mut(&mut self) -> &mut StateStack;

    fn fill_path(&mut self, path: &BezPath, paint: &Paint);
    fn stroke_path(&mut self, path: &BezPath, paint: &Paint, style: &LineStyle);
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);
    /// Reset `rect` to transparent, ignoring blend and alpha.
    fn clear_rect(&mut self, rect: Rect);

    fn save(&mut self) {
        self.state_mut().save();
    }

    fn restore(&mut self) {
        self.state_mut().restore();
    }

    fn global_alpha(&self) -> f64 {
        self.state().current().global_alpha
    }

    /// Non-finite values are ignored; others are clamped into `[0, 1]`.
    fn set_global_alpha(&mut self, alpha: f64) {
        if alpha.is_finite() {
            self.state_mut().current_mut().global_alpha = alpha.clamp(0.0, 1.0);
        }
    }

    fn line_dash(&self) -> &[f64] {
        &self.state().current().line_dash
    }

    /// Patterns with negative or non-finite entries are ignored; odd-length patterns are
    /// repeated once so they alternate dash/gap consistently.
    fn set_line_dash(&mut self, pattern: &[f64]) {
        if pattern.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return;
        }
        let mut dash: SmallVec<[f64; 4]> = pattern.iter().copied().collect();
        if dash.len() % 2 == 1 {
            dash.extend_from_slice(pattern);
        }
        self.state_mut().current_mut().line_dash = dash;
    }

    fn blend(&self) -> Blend {
        self.state().current().blend
    }

    fn set_blend(&mut self, blend: Blend) {
        self.state_mut().current_mut().blend = blend;
    }

    fn transform(&self) -> Affine {
        self.state().current().transform
    }

    fn set_transform(&mut self, transform: Affine) {
        self.state_mut().current_mut().transform = transform;
    }

    /// Post-multiply the current transform.
    fn transform_by(&mut self, t: Affine) {
        let cur = self.transform();
        self.set_transform(cur * t);
    }

    fn translate(&mut self, d: Vec2) {
        self.transform_by(Affine::translate(d));
    }

    fn rotate(&mut self, radians: f64) {
        self.transform_by(Affine::rotate(radians));
    }

    fn scale(&mut self, s: f64) {
        self.transform_by(Affine::scale(s));
    }

    /// Whole surface in device space.
    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width(), self.height())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/context.rs"]
mod tests;
