//! Crystal Lattice: a faceted gem ring whose silhouette follows the lattice system.

use crate::color::palette::{Hsl, MaterialAdjust, Palette, PaletteShape};
use crate::foundation::core::{BezPath, Point, Vec2};
use crate::foundation::rng::RandomSource;
use crate::geometry::path::{build_smooth_path, circle_path, line_path, star_path};
use crate::geometry::point::GeometryPoint;
use crate::geometry::ring::{harmonics, ring};
use crate::params::resolve::{ResolvedParams, Variant};
use crate::params::schema::{ParameterDefinition as Def, ParameterSchema};
use crate::raster::context::{Blend, ColorStop, LineStyle, Paint, RasterContext};
use crate::render::pass::{Frame, PassKind, PassReport, PassSpec, accent_phase, life, run_passes};
use crate::templates::{Template, TemplateMetadata, hsla, paint_body, strip};

/// Crystal system; selects the harmonic mix of the silhouette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lattice {
    Cubic,
    Hexagonal,
    Trigonal,
    Tetragonal,
    Monoclinic,
}

impl Variant for Lattice {
    const ALL: &'static [Self] = &[
        Self::Cubic,
        Self::Hexagonal,
        Self::Trigonal,
        Self::Tetragonal,
        Self::Monoclinic,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrystalMaterial {
    Quartz,
    Amethyst,
    Sapphire,
    Emerald,
    Diamond,
}

impl Variant for CrystalMaterial {
    const ALL: &'static [Self] = &[
        Self::Quartz,
        Self::Amethyst,
        Self::Sapphire,
        Self::Emerald,
        Self::Diamond,
    ];
}

impl CrystalMaterial {
    fn adjust(self) -> MaterialAdjust {
        match self {
            Self::Quartz => MaterialAdjust::new(0.0, 0.35, 1.15),
            Self::Amethyst => MaterialAdjust::new(80.0, 1.1, 0.9),
            Self::Sapphire => MaterialAdjust::new(20.0, 1.2, 0.8),
            Self::Emerald => MaterialAdjust::new(-60.0, 1.1, 0.85),
            Self::Diamond => MaterialAdjust::new(0.0, 0.1, 1.3),
        }
    }
}

const SHAPE: PaletteShape = PaletteShape {
    sat_k: 80.0,
    light_base: 45.0,
    light_k: 30.0,
};

/// Typed view of the resolved crystal parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct CrystalParams {
    pub facet_count: usize,
    pub frequency: f64,
    pub amplitude: f64,
    pub lattice: Lattice,
    pub order: f64,
    pub precision: f64,
    pub symmetry: f64,
    pub hue: f64,
    pub purity: f64,
    pub transparency: f64,
    pub material: CrystalMaterial,
    pub dispersion: f64,
    pub facets: f64,
    pub refraction: f64,
    pub sparkle: f64,
    pub sparkle_speed: f64,
    pub inclusions: f64,
}

impl CrystalParams {
    pub fn from_resolved(p: &ResolvedParams) -> Self {
        Self {
            facet_count: p.number_or("facetCount", 8.0).round().max(0.0) as usize,
            frequency: p.number_or("frequency", 1.0),
            amplitude: p.number_or("amplitude", 100.0),
            lattice: p.variant("latticeType"),
            order: p.number_or("order", 0.5),
            precision: p.number_or("precision", 0.7),
            symmetry: p.number_or("symmetry", 6.0).round(),
            hue: p.number_or("crystalHue", 200.0),
            purity: p.number_or("purity", 0.8),
            transparency: p.number_or("transparency", 0.5),
            material: p.variant("crystalMaterial"),
            dispersion: p.number_or("dispersionStrength", 0.5),
            facets: p.number_or("facetStrength", 0.7),
            refraction: p.number_or("refractionStrength", 0.6),
            sparkle: p.number_or("sparkleIntensity", 0.5),
            sparkle_speed: p.number_or("sparkleSpeed", 1.5),
            inclusions: p.number_or("inclusionAmount", 0.3),
        }
    }
}

pub fn schema() -> ParameterSchema {
    ParameterSchema::default()
        .with(
            "facetCount",
            Def::slider("Facet Count", 3.0, 24.0, 1.0, 8.0).category("Geometry"),
        )
        .with(
            "frequency",
            Def::slider("Frequency", 0.1, 3.0, 0.05, 1.0).category("Geometry"),
        )
        .with(
            "amplitude",
            Def::slider("Size", 20.0, 200.0, 1.0, 100.0).category("Geometry"),
        )
        .with(
            "latticeType",
            Def::selector("Lattice", Lattice::ALL.len(), 0).category("Geometry"),
        )
        .with(
            "order",
            Def::slider("Order", 0.0, 1.0, 0.01, 0.5).category("Geometry"),
        )
        .with(
            "precision",
            Def::slider("Precision", 0.0, 1.0, 0.01, 0.7).category("Geometry"),
        )
        .with(
            "symmetry",
            Def::slider("Symmetry", 1.0, 12.0, 1.0, 6.0).category("Geometry"),
        )
        .with(
            "crystalHue",
            Def::slider("Hue", 0.0, 360.0, 1.0, 200.0).category("Color"),
        )
        .with(
            "purity",
            Def::slider("Purity", 0.0, 1.0, 0.01, 0.8).category("Color"),
        )
        .with(
            "transparency",
            Def::slider("Transparency", 0.0, 1.0, 0.01, 0.5).category("Color"),
        )
        .with(
            "crystalMaterial",
            Def::selector("Material", CrystalMaterial::ALL.len(), 0).category("Color"),
        )
        .with(
            "dispersionStrength",
            Def::slider("Dispersion", 0.0, 1.0, 0.01, 0.5).category("Effects"),
        )
        .with(
            "facetStrength",
            Def::slider("Facets", 0.0, 1.0, 0.01, 0.7).category("Effects"),
        )
        .with(
            "refractionStrength",
            Def::slider("Refraction", 0.0, 1.0, 0.01, 0.6).category("Effects"),
        )
        .with(
            "sparkleIntensity",
            Def::slider("Sparkle", 0.0, 1.0, 0.01, 0.5).category("Effects"),
        )
        .with(
            "sparkleSpeed",
            Def::slider("Sparkle Speed", 0.0, 5.0, 0.1, 1.5)
                .category("Effects")
                .show_if(|p| p.number_or("sparkleIntensity", 0.0) > 0.0),
        )
        .with(
            "inclusionAmount",
            Def::slider("Inclusions", 0.0, 1.0, 0.01, 0.3).category("Effects"),
        )
        .with_universal()
        .with_default("strokeColor", "rgba(255, 255, 255, 0.6)")
        .with_default("strokeWidth", 1.5)
}

/// Per-point facet brightness driver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Facet {
    /// `0.3 + sin(angle * symmetry + phase) * 0.7`; may dip below zero.
    pub intensity: f64,
}

/// Unit-radius silhouette at `angle`.
fn shape_factor(p: &CrystalParams, angle: f64, phase: f64) -> f64 {
    let o = p.order;
    let terms: &[(f64, f64, f64)] = match p.lattice {
        Lattice::Cubic => &[(0.12 * o, 4.0, phase), (0.04, 8.0, 2.0 * phase)],
        Lattice::Hexagonal => &[(0.10 * o, 6.0, phase), (0.03, 12.0, -phase)],
        Lattice::Trigonal => &[(0.16 * o, 3.0, phase), (0.05, 6.0, 0.5 * phase)],
        Lattice::Tetragonal => &[(0.14 * o, 4.0, phase), (0.06, 2.0, 0.5 * phase)],
        Lattice::Monoclinic => &[
            (0.10 * o, 2.0, phase),
            (0.08 * o, 5.0, -0.7 * phase),
            (0.04, 7.0, 1.3 * phase),
        ],
    };
    1.0 + 0.03 * phase.sin() + harmonics(angle, terms)
}

/// Ring radius at `angle` for a shape of nominal `radius`.
pub fn radius_at(p: &CrystalParams, radius: f64, angle: f64, phase: f64) -> f64 {
    radius * shape_factor(p, angle, phase)
}

/// Generate the `facetCount`-point ring.
pub fn generate(
    p: &CrystalParams,
    center: Point,
    radius: f64,
    phase: f64,
) -> Vec<GeometryPoint<Facet>> {
    ring(center, p.facet_count, |_, a| {
        let intensity = 0.3 + (a * p.symmetry + phase).sin() * 0.7;
        (radius_at(p, radius, a, phase), Facet { intensity })
    })
}

pub fn palette(p: &CrystalParams) -> Palette {
    let base = SHAPE.base(p.hue, p.purity, p.transparency, p.material.adjust());
    let special = Hsl::new(base.h + 180.0, 90.0, 65.0, 0.6);
    Palette::derive(base, 40.0, special)
}

type CrystalFrame<'a> = Frame<'a, CrystalParams, Facet>;

fn passes<'a>(p: &CrystalParams) -> Vec<PassSpec<CrystalFrame<'a>>> {
    vec![
        PassSpec::new(PassKind::Ambient, "dispersion", p.dispersion, draw_dispersion),
        PassSpec::always(PassKind::Body, "body", draw_body),
        PassSpec::new(PassKind::Structure, "facets", p.facets, draw_facets),
        PassSpec::new(PassKind::Highlight, "refraction", p.refraction, draw_refraction),
        PassSpec::new(PassKind::Accent, "sparkle", p.sparkle, draw_sparkle),
        PassSpec::imperfection("inclusions", p.inclusions, draw_inclusions),
    ]
}

fn body_path(f: &CrystalFrame<'_>) -> Option<BezPath> {
    build_smooth_path(f.positions(), true, 1.0 - f.params.precision)
}

fn draw_dispersion(ctx: &mut dyn RasterContext, f: &CrystalFrame<'_>) {
    let s = f.params.dispersion;
    ctx.set_blend(Blend::Screen);
    for k in 0..6 {
        let a = f64::from(k) * std::f64::consts::FRAC_PI_3 + f.phase * 0.3;
        let c = f.center + Vec2::from_angle(a) * (f.radius * 0.15 * s);
        let color = hsla(f.params.hue + f64::from(k) * 60.0, 90.0, 60.0, 0.14 * s);
        let paint = Paint::radial(
            c,
            f.radius * 1.2,
            [
                ColorStop::new(0.0, color),
                ColorStop::new(1.0, color.with_alpha(0.0)),
            ],
        );
        ctx.fill_path(&circle_path(c, f.radius * 1.2), &paint);
    }
}

fn draw_body(ctx: &mut dyn RasterContext, f: &CrystalFrame<'_>) {
    let Some(path) = body_path(f) else {
        return;
    };
    let alpha = 0.55 + (1.0 - f.params.transparency) * 0.45;
    let light = f.center + Vec2::new(-0.3, -0.3) * f.radius;
    let native = Paint::radial_two_point(
        light,
        0.0,
        f.center,
        f.radius.max(1.0) * 1.2,
        [
            ColorStop::new(0.0, f.palette.light.rgba().fade(alpha)),
            ColorStop::new(0.55, f.palette.primary.rgba().fade(alpha)),
            ColorStop::new(1.0, f.palette.dark.rgba().fade(alpha)),
        ],
    );
    paint_body(ctx, &path, &native, f.resolved);
}

fn draw_facets(ctx: &mut dyn RasterContext, f: &CrystalFrame<'_>) {
    let n = f.geometry.len();
    if n < 3 {
        return;
    }
    let s = f.params.facets;
    let w = f.resolved.base_scale.max(0.25);
    let highlight = f.palette.highlight.rgba();
    let light = f.palette.light.rgba();
    for (i, pt) in f.geometry.iter().enumerate() {
        let a = pt.extra.intensity.clamp(0.0, 1.0) * s * 0.6;
        if a > 0.0 {
            ctx.stroke_path(
                &line_path(f.center, pt.pos()),
                &Paint::Solid(highlight.fade(a)),
                &LineStyle::new(w),
            );
        }
        let across = &f.geometry[(i + 2) % n];
        ctx.stroke_path(
            &line_path(pt.pos(), across.pos()),
            &Paint::Solid(light.fade(0.25 * s)),
            &LineStyle::new(w * 0.6),
        );
    }
}

fn draw_refraction(ctx: &mut dyn RasterContext, f: &CrystalFrame<'_>) {
    let Some(path) = body_path(f) else {
        return;
    };
    let s = f.params.refraction;
    let c = f.center + Vec2::new(-0.35, -0.35) * f.radius;
    let hl = f.palette.highlight.rgba();
    ctx.set_blend(Blend::Screen);
    let paint = Paint::radial(
        c,
        f.radius.max(1.0) * 0.6,
        [
            ColorStop::new(0.0, hl.fade(0.7 * s)),
            ColorStop::new(1.0, hl.with_alpha(0.0)),
        ],
    );
    ctx.fill_path(&path, &paint);
}

fn draw_sparkle(ctx: &mut dyn RasterContext, f: &CrystalFrame<'_>) {
    let n = f.geometry.len();
    if n == 0 {
        return;
    }
    let intensity = f.params.sparkle;
    let hl = f.palette.highlight.rgba();
    ctx.set_blend(Blend::Plus);
    for i in 0..n.min(12) {
        let pt = &f.geometry[(i * 3) % n];
        let phase = accent_phase(f.time, f.params.sparkle_speed, i, 1.7);
        let l = life(phase);
        if l < 0.05 {
            continue;
        }
        let size = (2.0 + 4.0 * intensity) * f.resolved.base_scale * l;
        let star = star_path(pt.pos(), size, size * 0.3, 4, phase * 0.2);
        ctx.fill_path(&star, &Paint::Solid(hl.fade(l * intensity)));
    }
}

fn draw_inclusions(ctx: &mut dyn RasterContext, f: &CrystalFrame<'_>, rng: &mut dyn RandomSource) {
    let amount = f.params.inclusions;
    let count = (amount * 12.0).round() as usize;
    let dark = f.palette.dark.rgba();
    for _ in 0..count {
        let a = rng.range(0.0, std::f64::consts::TAU);
        let d = rng.range(0.0, 0.7) * f.radius;
        let r = rng.range(0.5, 2.0) * f.resolved.base_scale;
        let alpha = 0.25 * amount + rng.next_f64() * 0.2;
        let c = f.center + Vec2::from_angle(a) * d;
        ctx.fill_path(&circle_path(c, r), &Paint::Solid(dark.fade(alpha)));
    }
}

/// Render a prepared crystal frame.
pub fn render(
    ctx: &mut dyn RasterContext,
    frame: &CrystalFrame<'_>,
    rng: &mut dyn RandomSource,
) -> PassReport {
    run_passes(ctx, frame, passes(frame.params), rng)
}

pub struct CrystalLattice {
    schema: ParameterSchema,
}

impl CrystalLattice {
    pub fn new() -> Self {
        Self { schema: schema() }
    }
}

impl Default for CrystalLattice {
    fn default() -> Self {
        Self::new()
    }
}

fn layout(resolved: &ResolvedParams, p: &CrystalParams) -> (Point, f64, f64) {
    (
        resolved.center(),
        p.amplitude * resolved.base_scale,
        resolved.anim_time * p.frequency,
    )
}

impl Template for CrystalLattice {
    fn metadata(&self) -> TemplateMetadata {
        TemplateMetadata {
            id: "crystal",
            name: "Crystal Lattice",
            category: "Geometric",
            description: "Faceted crystal ring with dispersion, refraction and sparkle",
        }
    }

    fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    fn outline(&self, resolved: &ResolvedParams) -> Vec<GeometryPoint> {
        let p = CrystalParams::from_resolved(resolved);
        let (center, radius, phase) = layout(resolved, &p);
        strip(&generate(&p, center, radius, phase))
    }

    fn radius_at(&self, resolved: &ResolvedParams, angle: f64) -> Option<f64> {
        let p = CrystalParams::from_resolved(resolved);
        let (_, radius, phase) = layout(resolved, &p);
        Some(radius_at(&p, radius, angle, phase))
    }

    fn render(
        &self,
        ctx: &mut dyn RasterContext,
        resolved: &ResolvedParams,
        rng: &mut dyn RandomSource,
    ) -> PassReport {
        let p = CrystalParams::from_resolved(resolved);
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
#[path = "../../tests/unit/templates/crystal.rs"]
mod tests;
