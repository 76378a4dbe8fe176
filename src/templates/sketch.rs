//! Hand Drawn: a wobbly outline inked in pressure-varying segments over a hatched wash.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::color::palette::{Hsl, Palette};
use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::hash01;
use crate::foundation::rng::RandomSource;
use crate::geometry::path::{build_smooth_path, circle_path, line_path};
use crate::geometry::point::GeometryPoint;
use crate::geometry::ring::{harmonics, point_count, ring};
use crate::params::resolve::{ResolvedParams, Variant};
use crate::params::schema::{ParameterDefinition as Def, ParameterSchema};
use crate::raster::context::{Blend, ColorStop, LineCap, LineStyle, Paint, RasterContext};
use crate::render::pass::{Frame, PassKind, PassReport, PassSpec, life, run_passes};
use crate::templates::{Template, TemplateMetadata, paint_body, strip};

const BREAK_SEED: u64 = 0x5CE7_C4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SketchStyle {
    Pencil,
    Ink,
    Charcoal,
    Marker,
}

impl Variant for SketchStyle {
    const ALL: &'static [Self] = &[Self::Pencil, Self::Ink, Self::Charcoal, Self::Marker];
}

impl SketchStyle {
    /// `(alpha, width multiplier)` of an inked segment.
    fn look(self) -> (f64, f64) {
        match self {
            Self::Pencil => (0.75, 0.8),
            Self::Ink => (1.0, 1.0),
            Self::Charcoal => (0.6, 1.6),
            Self::Marker => (0.85, 2.2),
        }
    }

    fn cap(self) -> LineCap {
        match self {
            Self::Marker => LineCap::Square,
            Self::Pencil | Self::Ink | Self::Charcoal => LineCap::Round,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SketchParams {
    pub detail: f64,
    pub style: SketchStyle,
    pub wobble: f64,
    pub size: f64,
    pub line_weight: f64,
    pub draw_speed: f64,
    pub hue: f64,
    pub saturation: f64,
    pub break_chance: f64,
    pub hatching: f64,
    pub hatch_angle: f64,
    pub layers: f64,
    pub tip: f64,
    pub smudges: f64,
}

impl SketchParams {
    pub fn from_resolved(p: &ResolvedParams) -> Self {
        Self {
            detail: p.number_or("detail", 0.5),
            style: p.variant("sketchStyle"),
            wobble: p.number_or("wobble", 0.4),
            size: p.number_or("size", 100.0),
            line_weight: p.number_or("lineWeight", 2.0),
            draw_speed: p.number_or("drawSpeed", 0.5),
            hue: p.number_or("inkHue", 220.0),
            saturation: p.number_or("inkSaturation", 0.3),
            break_chance: p.number_or("breakChance", 0.15),
            hatching: p.number_or("hatching", 0.5),
            hatch_angle: p.number_or("hatchAngle", std::f64::consts::FRAC_PI_4),
            layers: p.number_or("strokeLayers", 0.6),
            tip: p.number_or("pencilTip", 0.6),
            smudges: p.number_or("smudges", 0.3),
        }
    }

    pub fn point_count(&self) -> usize {
        point_count(16.0, self.detail, 48.0)
    }
}

pub fn schema() -> ParameterSchema {
    ParameterSchema::default()
        .with("detail", Def::slider("Detail", 0.0, 1.0, 0.01, 0.5).category("Line"))
        .with(
            "sketchStyle",
            Def::selector("Medium", SketchStyle::ALL.len(), 0).category("Line"),
        )
        .with("wobble", Def::slider("Wobble", 0.0, 1.0, 0.01, 0.4).category("Line"))
        .with("size", Def::slider("Size", 20.0, 200.0, 1.0, 100.0).category("Line"))
        .with(
            "lineWeight",
            Def::slider("Line Weight", 0.5, 6.0, 0.1, 2.0).category("Line"),
        )
        .with(
            "drawSpeed",
            Def::slider("Draw Speed", 0.0, 3.0, 0.05, 0.5).category("Line"),
        )
        .with(
            "breakChance",
            Def::slider("Line Breaks", 0.0, 1.0, 0.01, 0.15).category("Line"),
        )
        .with("inkHue", Def::slider("Ink Hue", 0.0, 360.0, 1.0, 220.0).category("Color"))
        .with(
            "inkSaturation",
            Def::slider("Ink Saturation", 0.0, 1.0, 0.01, 0.3).category("Color"),
        )
        .with(
            "hatching",
            Def::slider("Hatching", 0.0, 1.0, 0.01, 0.5).category("Effects"),
        )
        .with(
            "hatchAngle",
            Def::slider("Hatch Angle", 0.0, 180.0, 1.0, 45.0)
                .degrees()
                .category("Effects")
                .show_if(|p| p.number_or("hatching", 0.0) > 0.0),
        )
        .with(
            "strokeLayers",
            Def::slider("Stroke Layers", 0.0, 1.0, 0.01, 0.6).category("Effects"),
        )
        .with(
            "pencilTip",
            Def::slider("Pencil Tip", 0.0, 1.0, 0.01, 0.6).category("Effects"),
        )
        .with("smudges", Def::slider("Smudges", 0.0, 1.0, 0.01, 0.3).category("Effects"))
        .with_universal()
        .with_default("strokeType", "none")
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pen {
    /// Pencil pressure in `[0.4, 1]`.
    pub pressure: f64,
    /// The segment leaving this point is left undrawn.
    pub is_break: bool,
}

pub fn radius_at(p: &SketchParams, radius: f64, angle: f64, phase: f64) -> f64 {
    let jitter = harmonics(
        angle,
        &[
            (0.05, 3.0, phase),
            (0.03, 7.0, -0.7 * phase),
            (0.015, 13.0, 2.0 * phase),
        ],
    );
    radius * (1.0 + p.wobble * jitter)
}

pub fn generate(
    p: &SketchParams,
    center: Point,
    radius: f64,
    phase: f64,
) -> Vec<GeometryPoint<Pen>> {
    ring(center, p.point_count(), |i, a| {
        let pen = Pen {
            pressure: 0.7 + 0.3 * (a * 3.0 + phase).sin(),
            is_break: hash01(BREAK_SEED, i as u64) < p.break_chance * 0.5,
        };
        (radius_at(p, radius, a, phase), pen)
    })
}

pub fn palette(p: &SketchParams) -> Palette {
    let ink = Hsl::new(p.hue, p.saturation * 60.0, 22.0, 1.0);
    let paper = Hsl::new(45.0, 30.0, 94.0, 1.0);
    Palette::derive(ink, 180.0, paper)
}

type SketchFrame<'a> = Frame<'a, SketchParams, Pen>;

fn passes<'a>(p: &SketchParams) -> Vec<PassSpec<SketchFrame<'a>>> {
    vec![
        PassSpec::always(PassKind::Body, "body", draw_body),
        PassSpec::new(PassKind::Structure, "hatching", p.hatching, draw_hatching),
        PassSpec::new(PassKind::Structure, "strokes", p.layers, draw_strokes),
        PassSpec::new(PassKind::Accent, "pencil-tip", p.tip, draw_tip),
        PassSpec::imperfection("smudges", p.smudges, draw_smudges),
    ]
}

fn draw_body(ctx: &mut dyn RasterContext, f: &SketchFrame<'_>) {
    let Some(path) = build_smooth_path(f.positions(), true, 1.0) else {
        return;
    };
    let wash = Paint::Solid(f.palette.special.rgba().fade(0.6));
    paint_body(ctx, &path, &wash, f.resolved);
}

fn draw_hatching(ctx: &mut dyn RasterContext, f: &SketchFrame<'_>) {
    let r = f.geometry.iter().map(|pt| pt.radius).fold(f64::INFINITY, f64::min) * 0.8;
    if !r.is_finite() || r <= 0.0 {
        return;
    }
    let s = f.params.hatching;
    let (alpha, width_k) = f.params.style.look();
    let ink = f.palette.primary.rgba().fade(alpha * 0.35 * s);
    let along = Vec2::from_angle(f.params.hatch_angle);
    let across = Vec2::new(-along.y, along.x);
    let spacing = (6.0 - 3.0 * s).max(2.0) * f.resolved.base_scale.max(0.25);
    let style = LineStyle::round(0.6 * width_k * f.resolved.base_scale.max(0.25));
    let mut d = -r + spacing / 2.0;
    while d < r {
        let half = (r * r - d * d).sqrt();
        let mid = f.center + across * d;
        ctx.stroke_path(
            &line_path(mid - along * half, mid + along * half),
            &Paint::Solid(ink),
            &style,
        );
        d += spacing;
    }
}

fn draw_strokes(ctx: &mut dyn RasterContext, f: &SketchFrame<'_>) {
    let n = f.geometry.len();
    if n < 2 {
        return;
    }
    let (alpha, width_k) = f.params.style.look();
    let ink = f.palette.primary.rgba();
    let weight = f.params.line_weight * width_k * f.resolved.base_scale.max(0.25);
    let layers = if f.params.layers > 0.5 { 2 } else { 1 };
    for layer in 0..layers {
        let offset = Vec2::new(0.6, -0.4) * (layer as f64 * weight);
        let fade = if layer == 0 { 1.0 } else { 0.5 * f.params.layers };
        for (i, pt) in f.geometry.iter().enumerate() {
            if pt.extra.is_break {
                continue;
            }
            let next = &f.geometry[(i + 1) % n];
            let style = LineStyle::new(weight * pt.extra.pressure)
                .with_cap(f.params.style.cap());
            ctx.stroke_path(
                &line_path(pt.pos() + offset, next.pos() + offset),
                &Paint::Solid(ink.fade(alpha * fade * pt.extra.pressure)),
                &style,
            );
        }
    }
}

fn draw_tip(ctx: &mut dyn RasterContext, f: &SketchFrame<'_>) {
    let n = f.geometry.len();
    if n == 0 {
        return;
    }
    let progress = (f.time * f.params.draw_speed).rem_euclid(1.0);
    let idx = ((progress * n as f64) as usize).min(n - 1);
    let pt = &f.geometry[idx];
    let r = (1.5 + 2.0 * f.params.tip) * f.resolved.base_scale.max(0.25);
    // Zero at both ends of the loop.
    let l = life(progress * TAU - FRAC_PI_2);
    ctx.fill_path(
        &circle_path(pt.pos(), r),
        &Paint::Solid(f.palette.dark.rgba().fade(0.9 * f.params.tip * l)),
    );
}

fn draw_smudges(ctx: &mut dyn RasterContext, f: &SketchFrame<'_>, rng: &mut dyn RandomSource) {
    let amount = f.params.smudges;
    let ink = f.palette.primary.rgba();
    ctx.set_blend(Blend::Multiply);
    for _ in 0..(amount * 8.0).round() as usize {
        let at =
            f.center + Vec2::from_angle(rng.range(0.0, TAU)) * (rng.range(0.5, 1.1) * f.radius);
        let r = rng.range(6.0, 18.0) * f.resolved.base_scale;
        ctx.fill_path(
            &circle_path(at, r),
            &Paint::radial(
                at,
                r.max(0.5),
                [
                    ColorStop::new(0.0, ink.fade(0.12 * amount)),
                    ColorStop::new(1.0, ink.with_alpha(0.0)),
                ],
            ),
        );
    }
}

pub fn render(
    ctx: &mut dyn RasterContext,
    frame: &SketchFrame<'_>,
    rng: &mut dyn RandomSource,
) -> PassReport {
    run_passes(ctx, frame, passes(frame.params), rng)
}

pub struct HandDrawn {
    schema: ParameterSchema,
}

impl HandDrawn {
    pub fn new() -> Self {
        Self { schema: schema() }
    }
}

impl Default for HandDrawn {
    fn default() -> Self {
        Self::new()
    }
}

fn layout(resolved: &ResolvedParams, p: &SketchParams) -> (Point, f64, f64) {
    (
        resolved.center(),
        p.size * resolved.base_scale,
        resolved.anim_time * p.draw_speed,
    )
}

impl Template for HandDrawn {
    fn metadata(&self) -> TemplateMetadata {
        TemplateMetadata {
            id: "sketch",
            name: "Hand Drawn",
            category: "Artistic",
            description: "Wobbly pencil outline with hatching, layered strokes and smudges",
        }
    }

    fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    fn outline(&self, resolved: &ResolvedParams) -> Vec<GeometryPoint> {
        let p = SketchParams::from_resolved(resolved);
        let (center, radius, phase) = layout(resolved, &p);
        strip(&generate(&p, center, radius, phase))
    }

    fn radius_at(&self, resolved: &ResolvedParams, angle: f64) -> Option<f64> {
        let p = SketchParams::from_resolved(resolved);
        let (_, radius, phase) = layout(resolved, &p);
        Some(radius_at(&p, radius, angle, phase))
    }

    fn render(
        &self,
        ctx: &mut dyn RasterContext,
        resolved: &ResolvedParams,
        rng: &mut dyn RandomSource,
    ) -> PassReport {
        let p = SketchParams::from_resolved(resolved);
        let (center, radius, phase) = layout(resolved, &p);
        let geometry = generate(&p, center, radius, phase);
        let palette = palette(&p);
        let frame = Frame {
            params: &p,
            resolved,
            geometry: &geometry,
            palette: &palette,
            center,
            radius,
            phase,
            time: resolved.anim_time,
        };
        render(ctx, &frame, rng)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/templates/sketch.rs"]
mod tests;
