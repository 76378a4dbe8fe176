use vello_cpu::kurbo as vk;
use vello_cpu::peniko::{self, BlendMode, Compose, Mix};

use crate::foundation::core::{Affine, BezPath, FrameRGBA, Point, Rect, Rgba};
use crate::foundation::error::{LogoError, LogoResult};
use crate::raster::context::{
    Blend, LineCap, LineJoin, LineStyle, Paint, RasterContext, StateStack, Stops,
};

/// [`RasterContext`] backed by `vello_cpu`.
pub struct CpuCanvas {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
    state: StateStack,
}

impl CpuCanvas {
    /// Create a transparent canvas. Both dimensions must be in `1..=u16::MAX`.
    pub fn new(width: u32, height: u32) -> LogoResult<Self> {
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(LogoError::render(format!(
                "canvas {width}x{height} exceeds {}x{}",
                u16::MAX,
                u16::MAX
            )));
        };
        if w == 0 || h == 0 {
            return Err(LogoError::render("canvas dimensions must be non-zero"));
        }
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            width: w,
            height: h,
            state: StateStack::default(),
        })
    }

    /// Rasterize everything drawn so far into a premultiplied RGBA8 frame.
    pub fn snapshot(&mut self) -> FrameRGBA {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn prepare(&mut self, paint: &Paint) -> bool {
        let state = self.state.current();
        let alpha = state.global_alpha;
        if alpha <= 0.0 {
            return false;
        }
        self.ctx.set_transform(affine_to_cpu(state.transform));
        self.ctx.set_paint_transform(vk::Affine::IDENTITY);
        self.ctx.set_blend_mode(blend_to_cpu(state.blend));
        match paint {
            Paint::Solid(c) => self.ctx.set_paint(color_to_cpu(c.fade(alpha))),
            Paint::Linear(g) => self.ctx.set_paint(
                peniko::Gradient::new_linear(point_to_cpu(g.start), point_to_cpu(g.end))
                    .with_stops(stops_to_cpu(&g.stops, alpha).as_slice()),
            ),
            Paint::Radial(g) => self.ctx.set_paint(
                peniko::Gradient::new_two_point_radial(
                    point_to_cpu(g.start_center),
                    g.start_radius as f32,
                    point_to_cpu(g.end_center),
                    g.end_radius as f32,
                )
                .with_stops(stops_to_cpu(&g.stops, alpha).as_slice()),
            ),
        }
        true
    }

    fn covers_surface(&self, rect: Rect) -> bool {
        let t = self.state.current().transform;
        let full = Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height));
        let dev = t.transform_rect_bbox(rect);
        t.as_coeffs()[1] == 0.0
            && t.as_coeffs()[2] == 0.0
            && dev.x0 <= full.x0
            && dev.y0 <= full.y0
            && dev.x1 >= full.x1
            && dev.y1 >= full.y1
    }
}

impl RasterContext for CpuCanvas {
    fn width(&self) -> f64 {
        f64::from(self.width)
    }

    fn height(&self) -> f64 {
        f64::from(self.height)
    }

    fn state(&self) -> &StateStack {
        &self.state
    }

    fn state_mut(&mut self) -> &mut StateStack {
        &mut self.state
    }

    fn fill_path(&mut self, path: &BezPath, paint: &Paint) {
        if path.elements().is_empty() || !self.prepare(paint) {
            return;
        }
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    fn stroke_path(&mut self, path: &BezPath, paint: &Paint, style: &LineStyle) {
        if path.elements().is_empty() || !(style.width > 0.0) || !self.prepare(paint) {
            return;
        }
        let mut stroke = vk::Stroke::new(style.width)
            .with_caps(cap_to_cpu(style.cap))
            .with_join(join_to_cpu(style.join));
        let dash = &self.state.current().line_dash;
        if dash.iter().any(|d| *d > 0.0) {
            stroke = stroke.with_dashes(0.0, dash.iter().copied());
        }
        self.ctx.set_stroke(stroke);
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        if !self.prepare(paint) {
            return;
        }
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    fn clear_rect(&mut self, rect: Rect) {
        if self.covers_surface(rect) {
            self.ctx.reset();
            return;
        }
        self.ctx
            .set_transform(affine_to_cpu(self.state.current().transform));
        self.ctx
            .set_blend_mode(BlendMode::new(Mix::Normal, Compose::Clear));
        self.ctx.set_paint(color_to_cpu(Rgba::BLACK));
        self.ctx.fill_rect(&rect_to_cpu(rect));
        self.ctx.set_blend_mode(BlendMode::default());
    }
}

fn blend_to_cpu(b: Blend) -> BlendMode {
    match b {
        Blend::Normal => BlendMode::default(),
        Blend::Plus => BlendMode::new(Mix::Normal, Compose::Plus),
        Blend::Screen => BlendMode::new(Mix::Screen, Compose::SrcOver),
        Blend::Multiply => BlendMode::new(Mix::Multiply, Compose::SrcOver),
        Blend::Overlay => BlendMode::new(Mix::Overlay, Compose::SrcOver),
        Blend::SoftLight => BlendMode::new(Mix::SoftLight, Compose::SrcOver),
    }
}

fn cap_to_cpu(c: LineCap) -> vk::Cap {
    match c {
        LineCap::Butt => vk::Cap::Butt,
        LineCap::Round => vk::Cap::Round,
        LineCap::Square => vk::Cap::Square,
    }
}

fn join_to_cpu(j: LineJoin) -> vk::Join {
    match j {
        LineJoin::Miter => vk::Join::Miter,
        LineJoin::Round => vk::Join::Round,
        LineJoin::Bevel => vk::Join::Bevel,
    }
}

fn color_to_cpu(c: Rgba) -> peniko::Color {
    let [r, g, b, a] = c.to_rgba8();
    peniko::Color::from_rgba8(r, g, b, a)
}

fn stops_to_cpu(stops: &Stops, alpha: f64) -> Vec<(f32, peniko::Color)> {
    stops
        .iter()
        .map(|s| (s.offset as f32, color_to_cpu(s.color.fade(alpha))))
        .collect()
}

fn affine_to_cpu(a: Affine) -> vk::Affine {
    vk::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vk::Point {
    vk::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vk::Rect {
    vk::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vk::BezPath {
    use kurbo::PathEl;

    let mut out = vk::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/raster/cpu.rs"]
mod tests;
