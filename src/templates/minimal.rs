//! Minimal Line: one clean primitive, an echo ring and a breathing dot.

use std::f64::consts::{FRAC_PI_3, TAU};

use crate::color::palette::{Hsl, Palette};
use crate::foundation::core::{BezPath, Point};
use crate::foundation::rng::RandomSource;
use crate::geometry::path::{build_polygon_path, build_smooth_path, circle_path};
use crate::geometry::point::GeometryPoint;
use crate::geometry::ring::{point_count, ring};
use crate::params::resolve::{ResolvedParams, Variant};
use crate::params::schema::{ParameterDefinition as Def, ParameterSchema};
use crate::raster::context::{LineStyle, Paint, RasterContext};
use crate::render::pass::{Frame, PassKind, PassReport, PassSpec, life, run_passes};
use crate::templates::{Template, TemplateMetadata, paint_body};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MinimalStyle {
    Circle,
    Square,
    Triangle,
    Blob,
}

impl Variant for MinimalStyle {
    const ALL: &'static [Self] = &[Self::Circle, Self::Square, Self::Triangle, Self::Blob];
}

impl MinimalStyle {
    /// Corners are kept sharp; the others are splined.
    fn is_polygonal(self) -> bool {
        matches!(self, Self::Square | Self::Triangle)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MinimalParams {
    pub simplicity: f64,
    pub style: MinimalStyle,
    pub size: f64,
    pub rotation: f64,
    pub breathing: f64,
    pub hue: f64,
    pub saturation: f64,
    pub solidity: f64,
    pub echo: f64,
    pub dot: f64,
}

impl MinimalParams {
    pub fn from_resolved(p: &ResolvedParams) -> Self {
        Self {
            simplicity: p.number_or("simplicity", 0.5),
            style: p.variant("minimalStyle"),
            size: p.number_or("size", 90.0),
            rotation: p.number_or("rotation", 0.0),
            breathing: p.number_or("breathing", 0.3),
            hue: p.number_or("hue", 210.0),
            saturation: p.number_or("saturation", 0.6),
            solidity: p.number_or("solidity", 0.15),
            echo: p.number_or("echoStrength", 0.4),
            dot: p.number_or("dotStrength", 0.6),
        }
    }

    /// Fewer points as simplicity rises.
    pub fn point_count(&self) -> usize {
        point_count(4.0, 1.0 - self.simplicity, 8.0)
    }
}

pub fn schema() -> ParameterSchema {
    ParameterSchema::default()
        .with(
            "simplicity",
            Def::slider("Simplicity", 0.0, 1.0, 0.01, 0.5).category("Form"),
        )
        .with(
            "minimalStyle",
            Def::selector("Shape", MinimalStyle::ALL.len(), 0).category("Form"),
        )
        .with("size", Def::slider("Size", 20.0, 200.0, 1.0, 90.0).category("Form"))
        .with(
            "rotation",
            Def::slider("Rotation", 0.0, 360.0, 1.0, 0.0)
                .degrees()
                .category("Form"),
        )
        .with(
            "breathing",
            Def::slider("Breathing", 0.0, 1.0, 0.01, 0.3).category("Form"),
        )
        .with("hue", Def::slider("Hue", 0.0, 360.0, 1.0, 210.0).category("Color"))
        .with(
            "saturation",
            Def::slider("Saturation", 0.0, 1.0, 0.01, 0.6).category("Color"),
        )
        .with(
            "solidity",
            Def::slider("Solidity", 0.0, 1.0, 0.01, 0.15).category("Color"),
        )
        .with(
            "echoStrength",
            Def::slider("Echo", 0.0, 1.0, 0.01, 0.4).category("Effects"),
        )
        .with(
            "dotStrength",
            Def::slider("Center Dot", 0.0, 1.0, 0.01, 0.6).category("Effects"),
        )
        .with_universal()
        .with_default("strokeWidth", 3.0)
}

/// Unit-radius outline at `angle` (already rotated).
fn outline_factor(style: MinimalStyle, a: f64, phase: f64) -> f64 {
    match style {
        MinimalStyle::Circle => 1.0,
        MinimalStyle::Square => 0.85 / a.cos().abs().max(a.sin().abs()),
        MinimalStyle::Triangle => {
            let sector = TAU / 3.0;
            0.5 / ((a - FRAC_PI_3 / 2.0).rem_euclid(sector) - FRAC_PI_3).cos()
        }
        MinimalStyle::Blob => 1.0 + 0.1 * (2.0 * a + phase).sin() + 0.06 * (3.0 * a - phase).sin(),
    }
}

pub fn radius_at(p: &MinimalParams, radius: f64, angle: f64, phase: f64) -> f64 {
    let breath = 1.0 + 0.05 * p.breathing * phase.sin();
    radius * breath * outline_factor(p.style, angle - p.rotation, phase)
}

pub fn generate(p: &MinimalParams, center: Point, radius: f64, phase: f64) -> Vec<GeometryPoint> {
    ring(center, p.point_count(), |_, a| (radius_at(p, radius, a, phase), ()))
}

pub fn palette(p: &MinimalParams) -> Palette {
    let base = Hsl::new(p.hue, p.saturation * 70.0, 50.0, 1.0);
    Palette::derive(base, 180.0, base.lighten(30.0).alpha(0.5))
}

type MinimalFrame<'a> = Frame<'a, MinimalParams, ()>;

fn passes<'a>(p: &MinimalParams) -> Vec<PassSpec<MinimalFrame<'a>>> {
    vec![
        PassSpec::new(PassKind::Ambient, "echo", p.echo, draw_echo),
        PassSpec::always(PassKind::Body, "body", draw_body),
        PassSpec::new(PassKind::Accent, "breathing-dot", p.dot, draw_dot),
    ]
}

fn shape_path(f: &MinimalFrame<'_>, scale: f64) -> Option<BezPath> {
    if f.params.style == MinimalStyle::Circle {
        return (!f.geometry.is_empty()).then(|| circle_path(f.center, f.radius * scale));
    }
    let pts = f.geometry.iter().map(|pt| f.center + (pt.pos() - f.center) * scale);
    if f.params.style.is_polygonal() {
        build_polygon_path(pts)
    } else {
        build_smooth_path(pts, true, 1.0)
    }
}

fn draw_echo(ctx: &mut dyn RasterContext, f: &MinimalFrame<'_>) {
    let Some(path) = shape_path(f, 1.18 + 0.04 * f.resolved.breathing_phase.sin()) else {
        return;
    };
    let w = 1.5 * f.resolved.base_scale.max(0.25);
    ctx.stroke_path(
        &path,
        &Paint::Solid(f.palette.accent.rgba().fade(0.5 * f.params.echo)),
        &LineStyle::round(w),
    );
}

fn draw_body(ctx: &mut dyn RasterContext, f: &MinimalFrame<'_>) {
    let Some(path) = shape_path(f, 1.0) else {
        return;
    };
    let native = Paint::Solid(f.palette.primary.rgba().fade(f.params.solidity));
    paint_body(ctx, &path, &native, f.resolved);
}

fn draw_dot(ctx: &mut dyn RasterContext, f: &MinimalFrame<'_>) {
    let pulse = 0.8 + 0.2 * f.resolved.breathing_phase.sin();
    let r = f.radius * 0.08 * pulse;
    let l = life(f.resolved.breathing_phase);
    ctx.fill_path(
        &circle_path(f.center, r),
        &Paint::Solid(f.palette.accent.rgba().fade(f.params.dot * l)),
    );
}

pub fn render(
    ctx: &mut dyn RasterContext,
    frame: &MinimalFrame<'_>,
    rng: &mut dyn RandomSource,
) -> PassReport {
    run_passes(ctx, frame, passes(frame.params), rng)
}

pub struct MinimalLine {
    schema: ParameterSchema,
}

impl MinimalLine {
    pub fn new() -> Self {
        Self { schema: schema() }
    }
}

impl Default for MinimalLine {
    fn default() -> Self {
        Self::new()
    }
}

fn layout(resolved: &ResolvedParams, p: &MinimalParams) -> (Point, f64, f64) {
    (
        resolved.center(),
        p.size * resolved.base_scale,
        resolved.breathing_phase,
    )
}

impl Template for MinimalLine {
    fn metadata(&self) -> TemplateMetadata {
        TemplateMetadata {
            id: "minimal",
            name: "Minimal Line",
            category: "Minimal",
            description: "Single clean primitive with an echo ring and a breathing center dot",
        }
    }

    fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    fn outline(&self, resolved: &ResolvedParams) -> Vec<GeometryPoint> {
        let p = MinimalParams::from_resolved(resolved);
        let (center, radius, phase) = layout(resolved, &p);
        generate(&p, center, radius, phase)
    }

    fn radius_at(&self, resolved: &ResolvedParams, angle: f64) -> Option<f64> {
        let p = MinimalParams::from_resolved(resolved);
        let (_, radius, phase) = layout(resolved, &p);
        Some(radius_at(&p, radius, angle, phase))
    }

    fn render(
        &self,
        ctx: &mut dyn RasterContext,
        resolved: &ResolvedParams,
        rng: &mut dyn RandomSource,
    ) -> PassReport {
        let p = MinimalParams::from_resolved(resolved);
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
#[path = "../../tests/unit/templates/minimal.rs"]
mod tests;
