//! Liquid Fluid: a viscous blob whose surface ripples with damped turbulence.

use std::f64::consts::TAU;

use crate::color::palette::{Hsl, MaterialAdjust, Palette, PaletteShape};
use crate::foundation::core::{BezPath, Point, Vec2};
use crate::foundation::rng::RandomSource;
use crate::geometry::path::{build_smooth_path, circle_path};
use crate::geometry::point::GeometryPoint;
use crate::geometry::ring::{harmonics, point_count, ring};
use crate::params::resolve::{ResolvedParams, Variant};
use crate::params::schema::{ParameterDefinition as Def, ParameterSchema};
use crate::raster::context::{Blend, ColorStop, LineStyle, Paint, RasterContext};
use crate::render::pass::{Frame, PassKind, PassReport, PassSpec, accent_phase, life, run_passes};
use crate::templates::{Template, TemplateMetadata, paint_body, strip};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiquidType {
    Water,
    Honey,
    Mercury,
    Lava,
    Ink,
}

impl Variant for LiquidType {
    const ALL: &'static [Self] = &[Self::Water, Self::Honey, Self::Mercury, Self::Lava, Self::Ink];
}

impl LiquidType {
    fn adjust(self) -> MaterialAdjust {
        match self {
            Self::Water => MaterialAdjust::NEUTRAL,
            Self::Honey => MaterialAdjust::new(-160.0, 1.1, 0.9),
            Self::Mercury => MaterialAdjust::new(0.0, 0.05, 1.2),
            Self::Lava => MaterialAdjust::new(-185.0, 1.3, 0.8),
            Self::Ink => MaterialAdjust::new(60.0, 0.9, 0.45),
        }
    }
}

const SHAPE: PaletteShape = PaletteShape {
    sat_k: 85.0,
    light_base: 35.0,
    light_k: 30.0,
};

#[derive(Clone, Debug, PartialEq)]
pub struct FluidParams {
    pub complexity: f64,
    pub liquid: LiquidType,
    pub viscosity: f64,
    pub surface_tension: f64,
    pub turbulence: f64,
    pub size: f64,
    pub flow_speed: f64,
    pub hue: f64,
    pub intensity: f64,
    pub depth: f64,
    pub caustics: f64,
    pub flow_lines: f64,
    pub shine: f64,
    pub droplets: f64,
    pub droplet_speed: f64,
    pub bubbles: f64,
}

impl FluidParams {
    pub fn from_resolved(p: &ResolvedParams) -> Self {
        Self {
            complexity: p.number_or("waveComplexity", 0.5),
            liquid: p.variant("liquidType"),
            viscosity: p.number_or("viscosity", 0.4),
            surface_tension: p.number_or("surfaceTension", 0.6),
            turbulence: p.number_or("turbulence", 0.5),
            size: p.number_or("size", 100.0),
            flow_speed: p.number_or("flowSpeed", 1.0),
            hue: p.number_or("liquidHue", 200.0),
            intensity: p.number_or("colorIntensity", 0.7),
            depth: p.number_or("depth", 0.6),
            caustics: p.number_or("causticStrength", 0.5),
            flow_lines: p.number_or("flowLines", 0.6),
            shine: p.number_or("shineStrength", 0.7),
            droplets: p.number_or("dropletAmount", 0.4),
            droplet_speed: p.number_or("dropletSpeed", 1.0),
            bubbles: p.number_or("bubbleAmount", 0.3),
        }
    }

    pub fn point_count(&self) -> usize {
        point_count(24.0, self.complexity, 48.0)
    }

    /// Surface agitation after viscous damping.
    pub fn agitation(&self) -> f64 {
        self.turbulence * (1.0 - 0.7 * self.viscosity.clamp(0.0, 1.0))
    }
}

pub fn schema() -> ParameterSchema {
    ParameterSchema::default()
        .with(
            "waveComplexity",
            Def::slider("Wave Complexity", 0.0, 1.0, 0.01, 0.5).category("Flow"),
        )
        .with(
            "liquidType",
            Def::selector("Liquid", LiquidType::ALL.len(), 0).category("Flow"),
        )
        .with(
            "viscosity",
            Def::slider("Viscosity", 0.0, 1.0, 0.01, 0.4).category("Flow"),
        )
        .with(
            "surfaceTension",
            Def::slider("Surface Tension", 0.0, 1.0, 0.01, 0.6).category("Flow"),
        )
        .with(
            "turbulence",
            Def::slider("Turbulence", 0.0, 1.0, 0.01, 0.5).category("Flow"),
        )
        .with("size", Def::slider("Size", 20.0, 200.0, 1.0, 100.0).category("Flow"))
        .with(
            "flowSpeed",
            Def::slider("Flow Speed", 0.0, 3.0, 0.05, 1.0).category("Flow"),
        )
        .with(
            "liquidHue",
            Def::slider("Hue", 0.0, 360.0, 1.0, 200.0).category("Color"),
        )
        .with(
            "colorIntensity",
            Def::slider("Color Intensity", 0.0, 1.0, 0.01, 0.7).category("Color"),
        )
        .with("depth", Def::slider("Depth", 0.0, 1.0, 0.01, 0.6).category("Color"))
        .with(
            "causticStrength",
            Def::slider("Caustics", 0.0, 1.0, 0.01, 0.5).category("Effects"),
        )
        .with(
            "flowLines",
            Def::slider("Flow Lines", 0.0, 1.0, 0.01, 0.6).category("Effects"),
        )
        .with(
            "shineStrength",
            Def::slider("Shine", 0.0, 1.0, 0.01, 0.7).category("Effects"),
        )
        .with(
            "dropletAmount",
            Def::slider("Droplets", 0.0, 1.0, 0.01, 0.4).category("Effects"),
        )
        .with(
            "dropletSpeed",
            Def::slider("Droplet Speed", 0.0, 5.0, 0.1, 1.0)
                .category("Effects")
                .show_if(|p| p.number_or("dropletAmount", 0.0) > 0.0),
        )
        .with(
            "bubbleAmount",
            Def::slider("Bubbles", 0.0, 1.0, 0.01, 0.3).category("Effects"),
        )
        .with_universal()
        .with_default("strokeType", "none")
}

/// Per-point surface motion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Flow {
    /// Organic flow in `[0, 1]`.
    pub flow: f64,
}

pub fn radius_at(p: &FluidParams, radius: f64, angle: f64, phase: f64) -> f64 {
    let ripple = harmonics(
        angle,
        &[
            (0.08, 3.0, phase),
            (0.05, 5.0, -1.3 * phase),
            (0.03, 8.0, 2.1 * phase),
        ],
    );
    radius * (1.0 + p.agitation() * ripple)
}

pub fn generate(
    p: &FluidParams,
    center: Point,
    radius: f64,
    phase: f64,
) -> Vec<GeometryPoint<Flow>> {
    ring(center, p.point_count(), |_, a| {
        let flow = (a * 4.0 + phase * 1.5).sin() * 0.5 + 0.5;
        (radius_at(p, radius, a, phase), Flow { flow })
    })
}

pub fn palette(p: &FluidParams) -> Palette {
    let base = SHAPE.base(p.hue, p.intensity, p.depth, p.liquid.adjust());
    let caustic = Hsl::new(base.h + 20.0, 80.0, 75.0, 0.5);
    Palette::derive(base, -30.0, caustic)
}

type FluidFrame<'a> = Frame<'a, FluidParams, Flow>;

fn passes<'a>(p: &FluidParams) -> Vec<PassSpec<FluidFrame<'a>>> {
    vec![
        PassSpec::new(PassKind::Ambient, "caustics", p.caustics, draw_caustics),
        PassSpec::always(PassKind::Body, "body", draw_body),
        PassSpec::new(PassKind::Structure, "flow-lines", p.flow_lines, draw_flow_lines),
        PassSpec::new(PassKind::Highlight, "shine", p.shine, draw_shine),
        PassSpec::new(PassKind::Accent, "droplets", p.droplets, draw_droplets),
        PassSpec::imperfection("bubbles", p.bubbles, draw_bubbles),
    ]
}

fn surface(f: &FluidFrame<'_>, scale: f64, twist: f64) -> Option<BezPath> {
    let pts = f.geometry.iter().map(|pt| {
        let wobble = 1.0 + 0.04 * (pt.extra.flow - 0.5);
        f.center + Vec2::from_angle(pt.angle + twist) * (pt.radius * scale * wobble)
    });
    build_smooth_path(pts, true, f.params.surface_tension)
}

fn draw_caustics(ctx: &mut dyn RasterContext, f: &FluidFrame<'_>) {
    let s = f.params.caustics;
    let c = f.palette.special.rgba();
    ctx.set_blend(Blend::Screen);
    for k in 0..5u32 {
        let a = f64::from(k) * TAU / 5.0 + f.phase * 0.4;
        let at = f.center + Vec2::from_angle(a) * (f.radius * 0.35);
        let r = f.radius.max(1.0) * (0.5 + 0.1 * (f.phase + f64::from(k)).sin());
        ctx.fill_path(
            &circle_path(at, r),
            &Paint::radial(
                at,
                r,
                [
                    ColorStop::new(0.0, c.fade(0.5 * s)),
                    ColorStop::new(1.0, c.with_alpha(0.0)),
                ],
            ),
        );
    }
}

fn draw_body(ctx: &mut dyn RasterContext, f: &FluidFrame<'_>) {
    let Some(path) = surface(f, 1.0, 0.0) else {
        return;
    };
    let alpha = 0.7 + 0.3 * f.params.depth;
    let top = f.center - Vec2::new(0.0, f.radius);
    let bottom = f.center + Vec2::new(0.0, f.radius);
    let native = Paint::linear(
        top,
        bottom,
        [
            ColorStop::new(0.0, f.palette.light.rgba().fade(alpha)),
            ColorStop::new(0.45, f.palette.primary.rgba().fade(alpha)),
            ColorStop::new(1.0, f.palette.dark.rgba().fade(alpha)),
        ],
    );
    paint_body(ctx, &path, &native, f.resolved);
}

fn draw_flow_lines(ctx: &mut dyn RasterContext, f: &FluidFrame<'_>) {
    let s = f.params.flow_lines;
    let light = f.palette.light.rgba();
    let w = f.resolved.base_scale.max(0.25) * 1.2;
    let mean_flow = if f.geometry.is_empty() {
        0.0
    } else {
        f.geometry.iter().map(|pt| pt.extra.flow).sum::<f64>() / f.geometry.len() as f64
    };
    for (k, scale) in [0.75, 0.55, 0.35].into_iter().enumerate() {
        let twist = 0.15 * (f.phase + k as f64).sin();
        let Some(path) = surface(f, scale, twist) else {
            return;
        };
        let a = s * (0.2 + 0.2 * mean_flow) * (1.0 - 0.2 * k as f64);
        ctx.stroke_path(&path, &Paint::Solid(light.fade(a)), &LineStyle::round(w));
    }
}

fn draw_shine(ctx: &mut dyn RasterContext, f: &FluidFrame<'_>) {
    let s = f.params.shine;
    let hl = f.palette.highlight.rgba();
    let at = f.center + Vec2::new(-0.3, -0.4) * f.radius;
    let r = f.radius.max(1.0) * 0.3;
    ctx.set_blend(Blend::Screen);
    ctx.fill_path(
        &circle_path(at, r),
        &Paint::radial(
            at,
            r,
            [
                ColorStop::new(0.0, hl.fade(0.85 * s)),
                ColorStop::new(1.0, hl.with_alpha(0.0)),
            ],
        ),
    );
}

fn draw_droplets(ctx: &mut dyn RasterContext, f: &FluidFrame<'_>) {
    let n = f.geometry.len();
    if n == 0 {
        return;
    }
    let s = f.params.droplets;
    let color = f.palette.primary.rgba();
    let hl = f.palette.highlight.rgba();
    for i in 0..6 {
        let pt = &f.geometry[(i * n / 6) % n];
        let l = life(accent_phase(f.time, f.params.droplet_speed, i, 1.1));
        let at = f.center + Vec2::from_angle(pt.angle) * (pt.radius * (1.05 + 0.15 * l));
        let r = (2.0 + 2.0 * s) * f.resolved.base_scale * (0.5 + 0.5 * l);
        ctx.fill_path(&circle_path(at, r), &Paint::Solid(color.fade(s * (0.4 + 0.6 * l))));
        ctx.fill_path(
            &circle_path(at - Vec2::new(r, r) * 0.3, r * 0.35),
            &Paint::Solid(hl.fade(0.7 * s * l)),
        );
    }
}

fn draw_bubbles(ctx: &mut dyn RasterContext, f: &FluidFrame<'_>, rng: &mut dyn RandomSource) {
    let amount = f.params.bubbles;
    let count = (amount * 14.0).round() as usize;
    let hl = f.palette.highlight.rgba();
    let w = f.resolved.base_scale.max(0.25) * 0.6;
    for _ in 0..count {
        let at =
            f.center + Vec2::from_angle(rng.range(0.0, TAU)) * (rng.range(0.0, 0.8) * f.radius);
        let r = rng.range(1.0, 3.5) * f.resolved.base_scale;
        ctx.stroke_path(
            &circle_path(at, r),
            &Paint::Solid(hl.fade(0.3 + 0.4 * amount)),
            &LineStyle::new(w),
        );
    }
}

pub fn render(
    ctx: &mut dyn RasterContext,
    frame: &FluidFrame<'_>,
    rng: &mut dyn RandomSource,
) -> PassReport {
    run_passes(ctx, frame, passes(frame.params), rng)
}

pub struct LiquidFluid {
    schema: ParameterSchema,
}

impl LiquidFluid {
    pub fn new() -> Self {
        Self { schema: schema() }
    }
}

impl Default for LiquidFluid {
    fn default() -> Self {
        Self::new()
    }
}

fn layout(resolved: &ResolvedParams, p: &FluidParams) -> (Point, f64, f64) {
    (
        resolved.center(),
        p.size * resolved.base_scale,
        resolved.anim_time * p.flow_speed,
    )
}

impl Template for LiquidFluid {
    fn metadata(&self) -> TemplateMetadata {
        TemplateMetadata {
            id: "fluid",
            name: "Liquid Fluid",
            category: "Organic",
            description: "Rippling liquid blob with caustics, shine and droplets",
        }
    }

    fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    fn outline(&self, resolved: &ResolvedParams) -> Vec<GeometryPoint> {
        let p = FluidParams::from_resolved(resolved);
        let (center, radius, phase) = layout(resolved, &p);
        strip(&generate(&p, center, radius, phase))
    }

    fn radius_at(&self, resolved: &ResolvedParams, angle: f64) -> Option<f64> {
        let p = FluidParams::from_resolved(resolved);
        let (_, radius, phase) = layout(resolved, &p);
        Some(radius_at(&p, radius, angle, phase))
    }

    fn render(
        &self,
        ctx: &mut dyn RasterContext,
        resolved: &ResolvedParams,
        rng: &mut dyn RandomSource,
    ) -> PassReport {
        let p = FluidParams::from_resolved(resolved);
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
#[path = "../../tests/unit/templates/fluid.rs"]
mod tests;
