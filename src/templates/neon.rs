//! Neon Wave: an open glowing tube tracing a periodic waveform across the canvas.
//!
//! Unlike the ring templates the geometry is an open path, so `radius_at` has no meaning
//! here and the universal fill is not applied. The tube honors the host viewport.

use std::f64::consts::TAU;

use crate::color::palette::{Hsl, Palette};
use crate::foundation::core::{BezPath, Point};
use crate::foundation::rng::RandomSource;
use crate::geometry::path::{build_smooth_path, circle_path, line_path};
use crate::geometry::point::GeometryPoint;
use crate::geometry::ring::point_count;
use crate::paint::appliers::StrokeSettings;
use crate::params::resolve::{ResolvedParams, Variant};
use crate::params::schema::{ParameterDefinition as Def, ParameterSchema};
use crate::raster::context::{Blend, LineStyle, Paint, RasterContext};
use crate::render::pass::{Frame, PassKind, PassReport, PassSpec, accent_phase, life, run_passes};
use crate::templates::{Template, TemplateMetadata, strip};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Pulse,
}

impl Variant for Waveform {
    const ALL: &'static [Self] = &[Self::Sine, Self::Square, Self::Sawtooth, Self::Pulse];
}

impl Waveform {
    /// Sample at phase `u` (radians); output in `[-1, 1]`.
    pub fn sample(self, u: f64) -> f64 {
        match self {
            Self::Sine => u.sin(),
            Self::Square => (6.0 * u.sin()).tanh() / 6.0_f64.tanh(),
            Self::Sawtooth => 2.0 * (u / TAU).rem_euclid(1.0) - 1.0,
            Self::Pulse => {
                let x = (u / TAU).rem_euclid(1.0) - 0.5;
                2.0 * (-(x * 6.0).powi(2)).exp() - 1.0
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NeonParams {
    pub detail: f64,
    pub waveform: Waveform,
    pub amplitude: f64,
    pub cycles: f64,
    pub span: f64,
    pub speed: f64,
    pub hue: f64,
    pub hue_drift: f64,
    pub tube_width: f64,
    pub glow: f64,
    pub core: f64,
    pub sparks: f64,
    pub spark_speed: f64,
    pub flicker: f64,
}

impl NeonParams {
    pub fn from_resolved(p: &ResolvedParams) -> Self {
        Self {
            detail: p.number_or("detail", 0.5),
            waveform: p.variant("neonStyle"),
            amplitude: p.number_or("amplitude", 60.0),
            cycles: p.number_or("frequency", 2.0),
            span: p.number_or("waveWidth", 0.8),
            speed: p.number_or("waveSpeed", 1.0),
            hue: p.number_or("neonHue", 300.0),
            hue_drift: p.number_or("hueDrift", 0.3),
            tube_width: p.number_or("tubeWidth", 4.0),
            glow: p.number_or("glowStrength", 0.7),
            core: p.number_or("coreStrength", 0.8),
            sparks: p.number_or("sparkStrength", 0.5),
            spark_speed: p.number_or("sparkSpeed", 2.0),
            flicker: p.number_or("flicker", 0.2),
        }
    }

    pub fn point_count(&self) -> usize {
        point_count(32.0, self.detail, 160.0)
    }
}

pub fn schema() -> ParameterSchema {
    ParameterSchema::default()
        .with("detail", Def::slider("Detail", 0.0, 1.0, 0.01, 0.5).category("Wave"))
        .with(
            "neonStyle",
            Def::selector("Waveform", Waveform::ALL.len(), 0).category("Wave"),
        )
        .with(
            "amplitude",
            Def::slider("Amplitude", 10.0, 150.0, 1.0, 60.0).category("Wave"),
        )
        .with(
            "frequency",
            Def::slider("Cycles", 0.5, 8.0, 0.1, 2.0).category("Wave"),
        )
        .with(
            "waveWidth",
            Def::slider("Span", 0.2, 1.0, 0.01, 0.8).category("Wave"),
        )
        .with(
            "waveSpeed",
            Def::slider("Wave Speed", 0.0, 5.0, 0.1, 1.0).category("Wave"),
        )
        .with("neonHue", Def::slider("Hue", 0.0, 360.0, 1.0, 300.0).category("Color"))
        .with(
            "hueDrift",
            Def::slider("Hue Drift", 0.0, 1.0, 0.01, 0.3).category("Color"),
        )
        .with(
            "tubeWidth",
            Def::slider("Tube Width", 1.0, 16.0, 0.5, 4.0).category("Color"),
        )
        .with(
            "glowStrength",
            Def::slider("Glow", 0.0, 1.0, 0.01, 0.7).category("Effects"),
        )
        .with(
            "coreStrength",
            Def::slider("Hot Core", 0.0, 1.0, 0.01, 0.8).category("Effects"),
        )
        .with(
            "sparkStrength",
            Def::slider("Sparks", 0.0, 1.0, 0.01, 0.5).category("Effects"),
        )
        .with(
            "sparkSpeed",
            Def::slider("Spark Speed", 0.0, 5.0, 0.1, 2.0)
                .category("Effects")
                .show_if(|p| p.number_or("sparkStrength", 0.0) > 0.0),
        )
        .with(
            "flicker",
            Def::slider("Flicker", 0.0, 1.0, 0.01, 0.2).category("Effects"),
        )
        .with_universal()
        .with_default("backgroundType", "solid")
        .with_default("backgroundColor", "#0b0b14")
        .with_default("strokeType", "none")
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Path parameter in `[0, 1]`.
    pub t: f64,
    /// Waveform value in `[-1, 1]`.
    pub wave: f64,
}

/// Sample the waveform across `span` canvas widths, centered on `center`.
pub fn generate(
    p: &NeonParams,
    center: Point,
    width: f64,
    amplitude: f64,
    phase: f64,
) -> Vec<GeometryPoint<Sample>> {
    let n = p.point_count();
    let span = width * p.span;
    (0..n)
        .map(|i| {
            let t = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.5 };
            let wave = p.waveform.sample(t * p.cycles * TAU + phase);
            let x = center.x - span / 2.0 + t * span;
            let y = center.y - amplitude * wave;
            GeometryPoint {
                x,
                y,
                angle: t,
                radius: Point::new(x, y).distance(center),
                extra: Sample { t, wave },
            }
        })
        .collect()
}

/// Palette at `time`; the hue swings by up to 60 degrees with `hueDrift`.
pub fn palette(p: &NeonParams, time: f64) -> Palette {
    let hue = p.hue + p.hue_drift * 60.0 * (time * 0.5).sin();
    let base = Hsl::new(hue, 100.0, 55.0, 1.0);
    let glow = Hsl::new(hue, 100.0, 60.0, 1.0);
    Palette::derive(base, 120.0, glow)
}

type NeonFrame<'a> = Frame<'a, NeonParams, Sample>;

fn passes<'a>(p: &NeonParams) -> Vec<PassSpec<NeonFrame<'a>>> {
    vec![
        PassSpec::new(PassKind::Ambient, "glow", p.glow, draw_glow),
        PassSpec::always(PassKind::Body, "tube", draw_tube),
        PassSpec::new(PassKind::Highlight, "hot-core", p.core, draw_core),
        PassSpec::new(PassKind::Accent, "sparks", p.sparks, draw_sparks),
        PassSpec::imperfection("flicker", p.flicker, draw_flicker),
    ]
}

fn tube_path(f: &NeonFrame<'_>) -> Option<BezPath> {
    build_smooth_path(f.positions(), false, 1.0)
}

fn tube_width(f: &NeonFrame<'_>) -> f64 {
    f.params.tube_width * f.resolved.base_scale.max(0.25)
}

fn draw_glow(ctx: &mut dyn RasterContext, f: &NeonFrame<'_>) {
    let Some(path) = tube_path(f) else {
        return;
    };
    let s = f.params.glow;
    let glow = f.palette.special.rgba();
    let w = tube_width(f);
    ctx.set_blend(Blend::Plus);
    for (k, a) in [(6.0, 0.12), (3.0, 0.25)] {
        ctx.stroke_path(&path, &Paint::Solid(glow.fade(a * s)), &LineStyle::round(w * k));
    }
}

fn draw_tube(ctx: &mut dyn RasterContext, f: &NeonFrame<'_>) {
    let Some(path) = tube_path(f) else {
        return;
    };
    ctx.stroke_path(
        &path,
        &Paint::Solid(f.palette.primary.rgba()),
        &LineStyle::round(tube_width(f)),
    );
    StrokeSettings::from_resolved(f.resolved).apply(ctx, &path);
}

fn draw_core(ctx: &mut dyn RasterContext, f: &NeonFrame<'_>) {
    let Some(path) = tube_path(f) else {
        return;
    };
    ctx.set_blend(Blend::Screen);
    ctx.stroke_path(
        &path,
        &Paint::Solid(f.palette.highlight.rgba().fade(f.params.core)),
        &LineStyle::round(tube_width(f) * 0.35),
    );
}

fn draw_sparks(ctx: &mut dyn RasterContext, f: &NeonFrame<'_>) {
    let n = f.geometry.len();
    if n == 0 {
        return;
    }
    let s = f.params.sparks;
    let hl = f.palette.highlight.rgba();
    let glow = f.palette.special.rgba();
    ctx.set_blend(Blend::Plus);
    for i in 0..5 {
        let phase = accent_phase(f.time, f.params.spark_speed, i, 1.9);
        let travel = (phase / TAU).rem_euclid(1.0);
        let pt = &f.geometry[((travel * n as f64) as usize).min(n - 1)];
        let l = life(phase * 3.0);
        let r = (1.5 + 2.5 * s) * f.resolved.base_scale.max(0.25) * (0.5 + 0.5 * l);
        ctx.fill_path(&circle_path(pt.pos(), r * 2.0), &Paint::Solid(glow.fade(0.3 * s)));
        ctx.fill_path(&circle_path(pt.pos(), r), &Paint::Solid(hl.fade(s * (0.5 + 0.5 * l))));
    }
}

fn draw_flicker(ctx: &mut dyn RasterContext, f: &NeonFrame<'_>, rng: &mut dyn RandomSource) {
    let n = f.geometry.len();
    if n < 2 {
        return;
    }
    let amount = f.params.flicker;
    let dim = f.palette.dark.rgba();
    let w = tube_width(f) * 1.1;
    for _ in 0..(amount * 10.0).round() as usize {
        let i = ((rng.next_f64() * (n - 1) as f64) as usize).min(n - 2);
        let a = rng.range(0.2, 0.7) * amount;
        ctx.stroke_path(
            &line_path(f.geometry[i].pos(), f.geometry[i + 1].pos()),
            &Paint::Solid(dim.fade(a)),
            &LineStyle::round(w),
        );
    }
}

pub fn render(
    ctx: &mut dyn RasterContext,
    frame: &NeonFrame<'_>,
    rng: &mut dyn RandomSource,
) -> PassReport {
    run_passes(ctx, frame, passes(frame.params), rng)
}

pub struct NeonWave {
    schema: ParameterSchema,
}

impl NeonWave {
    pub fn new() -> Self {
        Self { schema: schema() }
    }
}

impl Default for NeonWave {
    fn default() -> Self {
        Self::new()
    }
}

fn layout(resolved: &ResolvedParams, p: &NeonParams) -> (f64, f64) {
    (p.amplitude * resolved.base_scale, resolved.anim_time * p.speed)
}

impl Template for NeonWave {
    fn metadata(&self) -> TemplateMetadata {
        TemplateMetadata {
            id: "neon",
            name: "Neon Wave",
            category: "Tech",
            description: "Glowing neon tube tracing an animated waveform",
        }
    }

    fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    fn supports_viewport(&self) -> bool {
        true
    }

    fn outline(&self, resolved: &ResolvedParams) -> Vec<GeometryPoint> {
        let p = NeonParams::from_resolved(resolved);
        let (amplitude, phase) = layout(resolved, &p);
        strip(&generate(&p, resolved.center(), resolved.width, amplitude, phase))
    }

    fn radius_at(&self, _resolved: &ResolvedParams, _angle: f64) -> Option<f64> {
        None
    }

    fn render(
        &self,
        ctx: &mut dyn RasterContext,
        resolved: &ResolvedParams,
        rng: &mut dyn RandomSource,
    ) -> PassReport {
        let p = NeonParams::from_resolved(resolved);
        let (amplitude, phase) = layout(resolved, &p);
        let center = resolved.center();
        let geometry = generate(&p, center, resolved.width, amplitude, phase);
        let palette = palette(&p, resolved.anim_time);
        let frame = Frame {
            params: &p,
            resolved,
            geometry: &geometry,
            palette: &palette,
            center,
            radius: amplitude,
            phase,
            time: resolved.anim_time,
        };
        render(ctx, &frame, rng)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/templates/neon.rs"]
mod tests;
