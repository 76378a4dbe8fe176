//! Dynamic Diamond: an angular cut gem with crown facets, table brilliance and fire.

use std::f64::consts::TAU;

use crate::color::palette::{Hsl, MaterialAdjust, Palette, PaletteShape};
use crate::foundation::core::{Point, Vec2};
use crate::foundation::rng::RandomSource;
use crate::geometry::path::{build_polygon_path, circle_path, line_path, star_path};
use crate::geometry::point::GeometryPoint;
use crate::geometry::ring::{point_count, ring};
use crate::params::resolve::{ResolvedParams, Variant};
use crate::params::schema::{ParameterDefinition as Def, ParameterSchema};
use crate::raster::context::{Blend, ColorStop, LineStyle, Paint, RasterContext};
use crate::render::pass::{Frame, PassKind, PassReport, PassSpec, accent_phase, life, run_passes};
use crate::templates::{Template, TemplateMetadata, hsla, paint_body, strip};

/// Cut outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiamondStyle {
    Brilliant,
    Princess,
    Emerald,
    Marquise,
    Pear,
}

impl Variant for DiamondStyle {
    const ALL: &'static [Self] = &[
        Self::Brilliant,
        Self::Princess,
        Self::Emerald,
        Self::Marquise,
        Self::Pear,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GemType {
    Diamond,
    Ruby,
    Sapphire,
    Emerald,
    Topaz,
}

impl Variant for GemType {
    const ALL: &'static [Self] = &[
        Self::Diamond,
        Self::Ruby,
        Self::Sapphire,
        Self::Emerald,
        Self::Topaz,
    ];
}

impl GemType {
    /// The hue shift is absolute: the luxury palette starts from hue 0.
    fn adjust(self) -> MaterialAdjust {
        match self {
            Self::Diamond => MaterialAdjust::new(200.0, 0.1, 1.35),
            Self::Ruby => MaterialAdjust::new(350.0, 1.1, 0.85),
            Self::Sapphire => MaterialAdjust::new(220.0, 1.1, 0.8),
            Self::Emerald => MaterialAdjust::new(145.0, 1.0, 0.85),
            Self::Topaz => MaterialAdjust::new(38.0, 1.0, 1.05),
        }
    }
}

const SHAPE: PaletteShape = PaletteShape {
    sat_k: 90.0,
    light_base: 40.0,
    light_k: 35.0,
};

#[derive(Clone, Debug, PartialEq)]
pub struct DiamondParams {
    pub cut_precision: f64,
    pub style: DiamondStyle,
    pub size: f64,
    pub rotation_speed: f64,
    pub gem: GemType,
    pub color_intensity: f64,
    pub brilliance: f64,
    pub facets: f64,
    pub halo: f64,
    pub fire: f64,
    pub fire_speed: f64,
    pub flaws: f64,
}

impl DiamondParams {
    pub fn from_resolved(p: &ResolvedParams) -> Self {
        Self {
            cut_precision: p.number_or("cutPrecision", 0.5),
            style: p.variant("diamondStyle"),
            size: p.number_or("size", 110.0),
            rotation_speed: p.number_or("rotationSpeed", 0.3),
            gem: p.variant("gemType"),
            color_intensity: p.number_or("colorIntensity", 0.7),
            brilliance: p.number_or("brilliance", 0.8),
            facets: p.number_or("facetStrength", 0.7),
            halo: p.number_or("haloStrength", 0.4),
            fire: p.number_or("fireIntensity", 0.6),
            fire_speed: p.number_or("fireSpeed", 1.2),
            flaws: p.number_or("clarityFlaws", 0.2),
        }
    }

    pub fn point_count(&self) -> usize {
        point_count(8.0, self.cut_precision, 24.0)
    }
}

pub fn schema() -> ParameterSchema {
    ParameterSchema::default()
        .with(
            "cutPrecision",
            Def::slider("Cut Precision", 0.0, 1.0, 0.01, 0.5).category("Cut"),
        )
        .with(
            "diamondStyle",
            Def::selector("Cut Style", DiamondStyle::ALL.len(), 0).category("Cut"),
        )
        .with("size", Def::slider("Size", 20.0, 200.0, 1.0, 110.0).category("Cut"))
        .with(
            "rotationSpeed",
            Def::slider("Rotation Speed", 0.0, 2.0, 0.05, 0.3).category("Cut"),
        )
        .with(
            "gemType",
            Def::selector("Gem", GemType::ALL.len(), 0).category("Color"),
        )
        .with(
            "colorIntensity",
            Def::slider("Color Intensity", 0.0, 1.0, 0.01, 0.7).category("Color"),
        )
        .with(
            "brilliance",
            Def::slider("Brilliance", 0.0, 1.0, 0.01, 0.8).category("Effects"),
        )
        .with(
            "facetStrength",
            Def::slider("Crown Facets", 0.0, 1.0, 0.01, 0.7).category("Effects"),
        )
        .with(
            "haloStrength",
            Def::slider("Fire Halo", 0.0, 1.0, 0.01, 0.4).category("Effects"),
        )
        .with(
            "fireIntensity",
            Def::slider("Fire", 0.0, 1.0, 0.01, 0.6).category("Effects"),
        )
        .with(
            "fireSpeed",
            Def::slider("Fire Speed", 0.0, 5.0, 0.1, 1.2)
                .category("Effects")
                .show_if(|p| p.number_or("fireIntensity", 0.0) > 0.0),
        )
        .with(
            "clarityFlaws",
            Def::slider("Clarity Flaws", 0.0, 1.0, 0.01, 0.2).category("Effects"),
        )
        .with_universal()
        .with_default("strokeColor", "rgba(255, 255, 255, 0.8)")
        .with_default("strokeWidth", 1.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cut {
    /// Facet flash strength in `[0, 1]`.
    pub flash: f64,
}

fn superellipse(a: f64, rx: f64, ry: f64, n: f64) -> f64 {
    let c = (a.cos().abs() / rx).powf(n);
    let s = (a.sin().abs() / ry).powf(n);
    (c + s).powf(-1.0 / n)
}

/// Unit-radius outline for `style` at angle `a` (already rotated).
fn outline_factor(style: DiamondStyle, a: f64) -> f64 {
    match style {
        DiamondStyle::Brilliant => 1.0 + 0.04 * (8.0 * a).cos(),
        DiamondStyle::Princess => 0.9 * superellipse(a, 1.0, 1.0, 4.0),
        DiamondStyle::Emerald => superellipse(a, 1.0, 0.7, 6.0),
        DiamondStyle::Marquise => 0.55 + 0.45 * a.cos().abs().powf(0.6),
        DiamondStyle::Pear => (0.75 + 0.25 * a.cos()) * (1.0 + 0.1 * (2.0 * a).cos()),
    }
}

pub fn radius_at(p: &DiamondParams, radius: f64, angle: f64, phase: f64) -> f64 {
    radius * (1.0 + 0.02 * (phase * 2.0).sin()) * outline_factor(p.style, angle - phase)
}

pub fn generate(
    p: &DiamondParams,
    center: Point,
    radius: f64,
    phase: f64,
) -> Vec<GeometryPoint<Cut>> {
    let n = p.point_count();
    ring(center, n, |_, a| {
        let flash = (a * n as f64 / 2.0 + phase * 3.0).sin().abs();
        (radius_at(p, radius, a, phase), Cut { flash })
    })
}

pub fn palette(p: &DiamondParams) -> Palette {
    let base = SHAPE.base(0.0, p.color_intensity, p.brilliance, p.gem.adjust());
    let fire = Hsl::new(base.h + 30.0, 100.0, 60.0, 1.0);
    Palette::derive(base, 150.0, fire)
}

type DiamondFrame<'a> = Frame<'a, DiamondParams, Cut>;

fn passes<'a>(p: &DiamondParams) -> Vec<PassSpec<DiamondFrame<'a>>> {
    vec![
        PassSpec::new(PassKind::Ambient, "fire-halo", p.halo, draw_halo),
        PassSpec::always(PassKind::Body, "body", draw_body),
        PassSpec::new(PassKind::Structure, "crown-facets", p.facets, draw_crown),
        PassSpec::new(PassKind::Highlight, "table", p.brilliance, draw_table),
        PassSpec::new(PassKind::Accent, "fire", p.fire, draw_fire),
        PassSpec::imperfection("clarity-flaws", p.flaws, draw_flaws),
    ]
}

fn table_points<'a>(f: &'a DiamondFrame<'a>) -> impl Iterator<Item = Point> + 'a {
    let step = TAU / f.geometry.len().max(1) as f64 / 2.0;
    f.geometry
        .iter()
        .map(move |pt| f.center + Vec2::from_angle(pt.angle + step) * (pt.radius * 0.5))
}

fn draw_halo(ctx: &mut dyn RasterContext, f: &DiamondFrame<'_>) {
    let s = f.params.halo;
    let w = 3.0 * f.resolved.base_scale.max(0.25);
    ctx.set_blend(Blend::Screen);
    for k in 0..3u32 {
        let hue = f64::from(k) * 120.0 + f.phase * 40.0;
        let r = f.radius * 1.1 + f64::from(k) * w * 1.5;
        ctx.stroke_path(
            &circle_path(f.center, r),
            &Paint::Solid(hsla(hue, 100.0, 65.0, 0.15 * s)),
            &LineStyle::new(w),
        );
    }
}

fn draw_body(ctx: &mut dyn RasterContext, f: &DiamondFrame<'_>) {
    let Some(path) = build_polygon_path(f.positions()) else {
        return;
    };
    let d = Vec2::new(f.radius, f.radius);
    let native = Paint::linear(
        f.center - d,
        f.center + d,
        [
            ColorStop::new(0.0, f.palette.light.rgba()),
            ColorStop::new(0.5, f.palette.primary.rgba()),
            ColorStop::new(1.0, f.palette.dark.rgba()),
        ],
    );
    paint_body(ctx, &path, &native, f.resolved);
}

fn draw_crown(ctx: &mut dyn RasterContext, f: &DiamondFrame<'_>) {
    let Some(table) = build_polygon_path(table_points(f)) else {
        return;
    };
    let s = f.params.facets;
    let w = f.resolved.base_scale.max(0.25) * 0.8;
    let edge = f.palette.highlight.rgba();
    for (pt, inner) in f.geometry.iter().zip(table_points(f)) {
        let a = (0.25 + 0.5 * pt.extra.flash) * s;
        ctx.stroke_path(
            &line_path(pt.pos(), inner),
            &Paint::Solid(edge.fade(a)),
            &LineStyle::new(w),
        );
    }
    ctx.stroke_path(&table, &Paint::Solid(edge.fade(0.6 * s)), &LineStyle::new(w));
}

fn draw_table(ctx: &mut dyn RasterContext, f: &DiamondFrame<'_>) {
    let Some(table) = build_polygon_path(table_points(f)) else {
        return;
    };
    let s = f.params.brilliance;
    let hl = f.palette.highlight.rgba();
    let c = f.center + Vec2::new(-0.15, -0.2) * f.radius;
    ctx.set_blend(Blend::Screen);
    ctx.fill_path(
        &table,
        &Paint::radial(
            c,
            f.radius.max(1.0) * 0.55,
            [
                ColorStop::new(0.0, hl.fade(0.8 * s)),
                ColorStop::new(1.0, hl.with_alpha(0.0)),
            ],
        ),
    );
}

fn draw_fire(ctx: &mut dyn RasterContext, f: &DiamondFrame<'_>) {
    let n = f.geometry.len();
    if n == 0 {
        return;
    }
    let s = f.params.fire;
    let fire = f.palette.special.rgba();
    ctx.set_blend(Blend::Plus);
    for i in 0..8 {
        let pt = &f.geometry[(i * n / 8) % n];
        let phase = accent_phase(f.time, f.params.fire_speed, i, 0.9);
        let l = life(phase);
        if l < 0.05 {
            continue;
        }
        let size = (3.0 + 5.0 * s) * f.resolved.base_scale * l;
        let tint = hsla(i as f64 * 45.0 + f.phase * 60.0, 100.0, 65.0, 1.0).mix(fire, 0.4);
        let star = star_path(pt.pos(), size, size * 0.25, 4, phase * 0.3);
        ctx.fill_path(&star, &Paint::Solid(tint.fade(l * s)));
    }
}

fn draw_flaws(ctx: &mut dyn RasterContext, f: &DiamondFrame<'_>, rng: &mut dyn RandomSource) {
    let amount = f.params.flaws;
    let count = (amount * 10.0).round() as usize;
    let dark = f.palette.dark.rgba();
    let w = f.resolved.base_scale.max(0.25) * 0.5;
    for _ in 0..count {
        let c = f.center + Vec2::from_angle(rng.range(0.0, TAU)) * (rng.range(0.0, 0.6) * f.radius);
        let r = rng.range(0.3, 1.2) * f.resolved.base_scale;
        ctx.fill_path(&circle_path(c, r), &Paint::Solid(dark.fade(0.3 + 0.3 * amount)));
        let feather = Vec2::from_angle(rng.range(0.0, TAU)) * (r * 4.0);
        ctx.stroke_path(
            &line_path(c, c + feather),
            &Paint::Solid(dark.fade(0.2 * amount)),
            &LineStyle::new(w),
        );
    }
}

pub fn render(
    ctx: &mut dyn RasterContext,
    frame: &DiamondFrame<'_>,
    rng: &mut dyn RandomSource,
) -> PassReport {
    run_passes(ctx, frame, passes(frame.params), rng)
}

pub struct DynamicDiamond {
    schema: ParameterSchema,
}

impl DynamicDiamond {
    pub fn new() -> Self {
        Self { schema: schema() }
    }
}

impl Default for DynamicDiamond {
    fn default() -> Self {
        Self::new()
    }
}

fn layout(resolved: &ResolvedParams, p: &DiamondParams) -> (Point, f64, f64) {
    (
        resolved.center(),
        p.size * resolved.base_scale,
        resolved.anim_time * p.rotation_speed,
    )
}

impl Template for DynamicDiamond {
    fn metadata(&self) -> TemplateMetadata {
        TemplateMetadata {
            id: "diamond",
            name: "Dynamic Diamond",
            category: "Luxury",
            description: "Cut gemstone with crown facets, table brilliance and fire flashes",
        }
    }

    fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    fn outline(&self, resolved: &ResolvedParams) -> Vec<GeometryPoint> {
        let p = DiamondParams::from_resolved(resolved);
        let (center, radius, phase) = layout(resolved, &p);
        strip(&generate(&p, center, radius, phase))
    }

    fn radius_at(&self, resolved: &ResolvedParams, angle: f64) -> Option<f64> {
        let p = DiamondParams::from_resolved(resolved);
        let (_, radius, phase) = layout(resolved, &p);
        Some(radius_at(&p, radius, angle, phase))
    }

    fn render(
        &self,
        ctx: &mut dyn RasterContext,
        resolved: &ResolvedParams,
        rng: &mut dyn RandomSource,
    ) -> PassReport {
        let p = DiamondParams::from_resolved(resolved);
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
#[path = "../../tests/unit/templates/diamond.rs"]
mod tests;
