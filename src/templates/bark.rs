//! Organic Bark: a noisy trunk cross-section cut by regular furrows.
//!
//! The silhouette is seeded value noise on the ring plus `furrowCount` evenly spaced
//! grooves. Both terms are exactly periodic in the angle, so the outline always closes.

use std::f64::consts::TAU;

use crate::color::palette::{Hsl, MaterialAdjust, Palette, PaletteShape};
use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::{ring_fbm, ring_noise};
use crate::foundation::rng::RandomSource;
use crate::geometry::path::{build_smooth_path, circle_path, line_path, star_path};
use crate::geometry::point::GeometryPoint;
use crate::geometry::ring::{point_count, ring};
use crate::params::resolve::{ResolvedParams, Variant};
use crate::params::schema::{ParameterDefinition as Def, ParameterSchema};
use crate::raster::context::{Blend, ColorStop, LineStyle, Paint, RasterContext};
use crate::render::pass::{Frame, PassKind, PassReport, PassSpec, accent_phase, life, run_passes};
use crate::templates::{Template, TemplateMetadata, hsla, paint_body, strip};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarkType {
    Oak,
    Birch,
    Pine,
    Willow,
    Cedar,
}

impl Variant for BarkType {
    const ALL: &'static [Self] = &[Self::Oak, Self::Birch, Self::Pine, Self::Willow, Self::Cedar];
}

impl BarkType {
    fn adjust(self) -> MaterialAdjust {
        match self {
            Self::Oak => MaterialAdjust::NEUTRAL,
            Self::Birch => MaterialAdjust::new(0.0, 0.15, 1.8),
            Self::Pine => MaterialAdjust::new(-10.0, 1.1, 0.8),
            Self::Willow => MaterialAdjust::new(40.0, 0.6, 1.1),
            Self::Cedar => MaterialAdjust::new(-15.0, 1.2, 0.9),
        }
    }

    /// Noise lattice size; finer for smooth-barked species.
    fn cells(self) -> u32 {
        match self {
            Self::Birch => 10,
            Self::Willow => 14,
            Self::Oak | Self::Pine | Self::Cedar => 18,
        }
    }
}

const SHAPE: PaletteShape = PaletteShape {
    sat_k: 55.0,
    light_base: 22.0,
    light_k: 25.0,
};

#[derive(Clone, Debug, PartialEq)]
pub struct BarkParams {
    pub detail: f64,
    pub bark: BarkType,
    pub seed: u64,
    pub roughness: f64,
    pub furrow_count: u32,
    pub furrow_depth: f64,
    pub size: f64,
    pub growth_speed: f64,
    pub hue: f64,
    pub richness: f64,
    pub moisture: f64,
    pub furrows: f64,
    pub side_light: f64,
    pub sap: f64,
    pub sap_speed: f64,
    pub weathering: f64,
}

impl BarkParams {
    pub fn from_resolved(p: &ResolvedParams) -> Self {
        Self {
            detail: p.number_or("detail", 0.5),
            bark: p.variant("barkType"),
            seed: p.number_or("barkSeed", 42.0).round().max(0.0) as u64,
            roughness: p.number_or("roughness", 0.5),
            furrow_count: p.number_or("furrowCount", 8.0).round().max(0.0) as u32,
            furrow_depth: p.number_or("furrowDepth", 0.5),
            size: p.number_or("size", 100.0),
            growth_speed: p.number_or("growthSpeed", 0.2),
            hue: p.number_or("barkHue", 30.0),
            richness: p.number_or("colorRichness", 0.6),
            moisture: p.number_or("moisture", 0.4),
            furrows: p.number_or("furrowStrength", 0.7),
            side_light: p.number_or("sideLight", 0.5),
            sap: p.number_or("sapGlints", 0.3),
            sap_speed: p.number_or("sapSpeed", 0.8),
            weathering: p.number_or("weathering", 0.4),
        }
    }

    pub fn point_count(&self) -> usize {
        point_count(32.0, self.detail, 64.0)
    }

    /// Groove profile at `angle`, in `[0, 1]`; peaks at each furrow center.
    pub fn furrow(&self, angle: f64, phase: f64) -> f64 {
        if self.furrow_count == 0 {
            return 0.0;
        }
        let k = f64::from(self.furrow_count);
        (((k * angle + phase * 0.1).cos() + 1.0) / 2.0).powi(6)
    }
}

pub fn schema() -> ParameterSchema {
    ParameterSchema::default()
        .with("detail", Def::slider("Detail", 0.0, 1.0, 0.01, 0.5).category("Growth"))
        .with(
            "barkType",
            Def::selector("Bark", BarkType::ALL.len(), 0).category("Growth"),
        )
        .with(
            "barkSeed",
            Def::slider("Seed", 0.0, 9999.0, 1.0, 42.0).category("Growth"),
        )
        .with(
            "roughness",
            Def::slider("Roughness", 0.0, 1.0, 0.01, 0.5).category("Growth"),
        )
        .with(
            "furrowCount",
            Def::slider("Furrows", 0.0, 24.0, 1.0, 8.0).category("Growth"),
        )
        .with(
            "furrowDepth",
            Def::slider("Furrow Depth", 0.0, 1.0, 0.01, 0.5)
                .category("Growth")
                .show_if(|p| p.number_or("furrowCount", 0.0) > 0.0),
        )
        .with("size", Def::slider("Size", 20.0, 200.0, 1.0, 100.0).category("Growth"))
        .with(
            "growthSpeed",
            Def::slider("Growth Speed", 0.0, 2.0, 0.05, 0.2).category("Growth"),
        )
        .with("barkHue", Def::slider("Hue", 0.0, 360.0, 1.0, 30.0).category("Color"))
        .with(
            "colorRichness",
            Def::slider("Richness", 0.0, 1.0, 0.01, 0.6).category("Color"),
        )
        .with(
            "moisture",
            Def::slider("Moisture", 0.0, 1.0, 0.01, 0.4).category("Color"),
        )
        .with(
            "furrowStrength",
            Def::slider("Furrow Lines", 0.0, 1.0, 0.01, 0.7).category("Effects"),
        )
        .with(
            "sideLight",
            Def::slider("Side Light", 0.0, 1.0, 0.01, 0.5).category("Effects"),
        )
        .with(
            "sapGlints",
            Def::slider("Sap Glints", 0.0, 1.0, 0.01, 0.3).category("Effects"),
        )
        .with(
            "sapSpeed",
            Def::slider("Sap Speed", 0.0, 5.0, 0.1, 0.8)
                .category("Effects")
                .show_if(|p| p.number_or("sapGlints", 0.0) > 0.0),
        )
        .with(
            "weathering",
            Def::slider("Weathering", 0.0, 1.0, 0.01, 0.4).category("Effects"),
        )
        .with_universal()
        .with_default("strokeColor", "#3f2a1a")
        .with_default("strokeWidth", 1.5)
}

/// Per-point bark scalars.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grain {
    /// Fiber tension in `[0, 1]`.
    pub tension: f64,
    /// Groove profile in `[0, 1]`.
    pub furrow: f64,
}

pub fn radius_at(p: &BarkParams, radius: f64, angle: f64, phase: f64) -> f64 {
    let noise = ring_fbm(p.seed, p.bark.cells(), angle, phase * 0.2);
    let groove = p.furrow(angle, phase);
    radius * (1.0 + 0.12 * p.roughness * noise - 0.08 * p.furrow_depth * groove)
}

pub fn generate(
    p: &BarkParams,
    center: Point,
    radius: f64,
    phase: f64,
) -> Vec<GeometryPoint<Grain>> {
    ring(center, p.point_count(), |_, a| {
        let tension = ring_noise(p.seed ^ 0x51, 8, a, phase * 0.1) * 0.5 + 0.5;
        let grain = Grain {
            tension,
            furrow: p.furrow(a, phase),
        };
        (radius_at(p, radius, a, phase), grain)
    })
}

pub fn palette(p: &BarkParams) -> Palette {
    let base = SHAPE.base(p.hue, p.richness, p.moisture, p.bark.adjust());
    let lichen = Hsl::new(85.0, 35.0, 50.0, 0.7);
    Palette::derive(base, 25.0, lichen)
}

type BarkFrame<'a> = Frame<'a, BarkParams, Grain>;

fn passes<'a>(p: &BarkParams) -> Vec<PassSpec<BarkFrame<'a>>> {
    vec![
        PassSpec::always(PassKind::Body, "body", draw_body),
        PassSpec::new(PassKind::Structure, "furrows", p.furrows, draw_furrows),
        PassSpec::new(PassKind::Highlight, "side-light", p.side_light, draw_side_light),
        PassSpec::new(PassKind::Accent, "sap", p.sap, draw_sap),
        PassSpec::imperfection("weathering", p.weathering, draw_weathering),
    ]
}

fn draw_body(ctx: &mut dyn RasterContext, f: &BarkFrame<'_>) {
    let Some(path) = build_smooth_path(f.positions(), true, 0.5) else {
        return;
    };
    let native = Paint::radial(
        f.center,
        f.radius.max(1.0),
        [
            ColorStop::new(0.0, f.palette.light.rgba()),
            ColorStop::new(0.7, f.palette.primary.rgba()),
            ColorStop::new(1.0, f.palette.dark.rgba()),
        ],
    );
    paint_body(ctx, &path, &native, f.resolved);
}

fn draw_furrows(ctx: &mut dyn RasterContext, f: &BarkFrame<'_>) {
    let s = f.params.furrows;
    let dark = f.palette.dark.rgba();
    let w = f.resolved.base_scale.max(0.25);
    for pt in f.geometry.iter().filter(|pt| pt.extra.furrow > 0.5) {
        let depth = 0.6 + 0.25 * (1.0 - pt.extra.tension);
        let inner = f.center + Vec2::from_angle(pt.angle) * (pt.radius * depth);
        ctx.stroke_path(
            &line_path(pt.pos(), inner),
            &Paint::Solid(dark.fade(s * pt.extra.furrow)),
            &LineStyle::round(w * (1.0 + pt.extra.tension)),
        );
    }
    for scale in [0.3, 0.55, 0.8] {
        let pts = f
            .geometry
            .iter()
            .map(|pt| f.center + Vec2::from_angle(pt.angle) * (pt.radius * scale));
        if let Some(growth) = build_smooth_path(pts, true, 0.5) {
            ctx.stroke_path(&growth, &Paint::Solid(dark.fade(0.35 * s)), &LineStyle::new(w * 0.7));
        }
    }
}

fn draw_side_light(ctx: &mut dyn RasterContext, f: &BarkFrame<'_>) {
    let Some(path) = build_smooth_path(f.positions(), true, 0.5) else {
        return;
    };
    let s = f.params.side_light;
    let hl = f.palette.highlight.rgba();
    let left = f.center - Vec2::new(f.radius, 0.0);
    let right = f.center + Vec2::new(f.radius, 0.0);
    ctx.set_blend(Blend::SoftLight);
    ctx.fill_path(
        &path,
        &Paint::linear(
            left,
            right,
            [
                ColorStop::new(0.0, hl.fade(0.6 * s)),
                ColorStop::new(0.6, hl.with_alpha(0.0)),
            ],
        ),
    );
}

fn draw_sap(ctx: &mut dyn RasterContext, f: &BarkFrame<'_>) {
    let s = f.params.sap;
    let amber = hsla(f.params.hue + 10.0, 90.0, 55.0, 1.0);
    ctx.set_blend(Blend::Plus);
    for (i, pt) in f.geometry.iter().filter(|pt| pt.extra.furrow > 0.8).enumerate() {
        let l = life(accent_phase(f.time, f.params.sap_speed, i, 2.3));
        if l < 0.1 {
            continue;
        }
        let at = f.center + Vec2::from_angle(pt.angle) * (pt.radius * 0.9);
        let size = (1.5 + 2.5 * s) * f.resolved.base_scale * l;
        ctx.fill_path(
            &star_path(at, size, size * 0.4, 4, pt.angle),
            &Paint::Solid(amber.fade(l * s)),
        );
    }
}

fn draw_weathering(ctx: &mut dyn RasterContext, f: &BarkFrame<'_>, rng: &mut dyn RandomSource) {
    let amount = f.params.weathering;
    let lichen = f.palette.special.rgba();
    let crack = f.palette.dark.rgba();
    let w = f.resolved.base_scale.max(0.25) * 0.6;
    for _ in 0..(amount * 8.0).round() as usize {
        let at =
            f.center + Vec2::from_angle(rng.range(0.0, TAU)) * (rng.range(0.4, 0.95) * f.radius);
        let r = rng.range(2.0, 6.0) * f.resolved.base_scale;
        ctx.fill_path(&circle_path(at, r), &Paint::Solid(lichen.fade(0.5 * amount)));
    }
    for _ in 0..(amount * 6.0).round() as usize {
        let at =
            f.center + Vec2::from_angle(rng.range(0.0, TAU)) * (rng.range(0.1, 0.8) * f.radius);
        let dir =
            Vec2::from_angle(rng.range(0.0, TAU)) * (rng.range(3.0, 10.0) * f.resolved.base_scale);
        ctx.stroke_path(
            &line_path(at, at + dir),
            &Paint::Solid(crack.fade(0.6 * amount)),
            &LineStyle::round(w),
        );
    }
}

pub fn render(
    ctx: &mut dyn RasterContext,
    frame: &BarkFrame<'_>,
    rng: &mut dyn RandomSource,
) -> PassReport {
    run_passes(ctx, frame, passes(frame.params), rng)
}

pub struct OrganicBark {
    schema: ParameterSchema,
}

impl OrganicBark {
    pub fn new() -> Self {
        Self { schema: schema() }
    }
}

impl Default for OrganicBark {
    fn default() -> Self {
        Self::new()
    }
}

fn layout(resolved: &ResolvedParams, p: &BarkParams) -> (Point, f64, f64) {
    (
        resolved.center(),
        p.size * resolved.base_scale,
        resolved.anim_time * p.growth_speed,
    )
}

impl Template for OrganicBark {
    fn metadata(&self) -> TemplateMetadata {
        TemplateMetadata {
            id: "bark",
            name: "Organic Bark",
            category: "Organic",
            description: "Trunk cross-section with furrows, growth rings and weathering",
        }
    }

    fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    fn outline(&self, resolved: &ResolvedParams) -> Vec<GeometryPoint> {
        let p = BarkParams::from_resolved(resolved);
        let (center, radius, phase) = layout(resolved, &p);
        strip(&generate(&p, center, radius, phase))
    }

    fn radius_at(&self, resolved: &ResolvedParams, angle: f64) -> Option<f64> {
        let p = BarkParams::from_resolved(resolved);
        let (_, radius, phase) = layout(resolved, &p);
        Some(radius_at(&p, radius, angle, phase))
    }

    fn render(
        &self,
        ctx: &mut dyn RasterContext,
        resolved: &ResolvedParams,
        rng: &mut dyn RandomSource,
    ) -> PassReport {
        let p = BarkParams::from_resolved(resolved);
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
#[path = "../../tests/unit/templates/bark.rs"]
mod tests;
