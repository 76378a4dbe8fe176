use smallvec::SmallVec;

use crate::color::palette::Palette;
use crate::foundation::core::Point;
use crate::foundation::rng::RandomSource;
use crate::geometry::point::GeometryPoint;
use crate::params::resolve::ResolvedParams;
use crate::raster::context::RasterContext;

/// Passes with a strength below this are skipped entirely.
pub const PASS_EPSILON: f64 = 0.1;

/// Stage of a template renderer, in canonical draw order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassKind {
    /// Background ambience (dispersion, caustics, halos).
    Ambient,
    /// Main silhouette fill and stroke.
    Body,
    /// Facets, furrows, hatching.
    Structure,
    /// Light-source glows and brilliance.
    Highlight,
    /// Time-animated sparkles, fire, sparks.
    Accent,
    /// Random texture; the only pass handed a [`RandomSource`].
    Imperfection,
}

/// Everything a pass reads for one draw. Built fresh per draw and never mutated.
pub struct Frame<'a, P, T> {
    /// Typed template parameters.
    pub params: &'a P,
    pub resolved: &'a ResolvedParams,
    pub geometry: &'a [GeometryPoint<T>],
    pub palette: &'a Palette,
    pub center: Point,
    /// Nominal shape radius in pixels.
    pub radius: f64,
    /// Geometry phase the silhouette was generated at.
    pub phase: f64,
    /// Animation clock (`animTime`).
    pub time: f64,
}

impl<P, T> Frame<'_, P, T> {
    /// Geometry point positions.
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.geometry.iter().map(GeometryPoint::pos)
    }
}

pub type DrawFn<F> = fn(&mut dyn RasterContext, &F);
pub type TextureFn<F> = fn(&mut dyn RasterContext, &F, &mut dyn RandomSource);

enum PassBody<F> {
    Deterministic(DrawFn<F>),
    Textured(TextureFn<F>),
}

impl<F> Clone for PassBody<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for PassBody<F> {}

/// One named, strength-gated stage of a renderer.
pub struct PassSpec<F> {
    pub kind: PassKind,
    pub name: &'static str,
    pub strength: f64,
    body: PassBody<F>,
}

impl<F> PassSpec<F> {
    /// Deterministic pass gated by `strength`.
    pub fn new(kind: PassKind, name: &'static str, strength: f64, draw: DrawFn<F>) -> Self {
        Self {
            kind,
            name,
            strength,
            body: PassBody::Deterministic(draw),
        }
    }

    /// Deterministic pass that always runs.
    pub fn always(kind: PassKind, name: &'static str, draw: DrawFn<F>) -> Self {
        Self::new(kind, name, 1.0, draw)
    }

    /// Randomized texture pass. Always sorted last.
    pub fn imperfection(name: &'static str, strength: f64, draw: TextureFn<F>) -> Self {
        Self {
            kind: PassKind::Imperfection,
            name,
            strength,
            body: PassBody::Textured(draw),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.strength >= PASS_EPSILON
    }
}

/// Which passes ran and which were skipped, in execution order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PassReport {
    pub executed: SmallVec<[&'static str; 8]>,
    pub skipped: SmallVec<[&'static str; 8]>,
}

impl PassReport {
    pub fn ran(&self, name: &str) -> bool {
        self.executed.iter().any(|n| *n == name)
    }
}

/// Run `passes` in canonical order, each bracketed by `save`/`restore`.
///
/// Ties keep declaration order. State left behind by a pass (unbalanced saves included) is
/// discarded before the next one starts.
pub fn run_passes<F>(
    ctx: &mut dyn RasterContext,
    frame: &F,
    mut passes: Vec<PassSpec<F>>,
    rng: &mut dyn RandomSource,
) -> PassReport {
    passes.sort_by_key(|p| p.kind);
    let mut report = PassReport::default();
    for pass in &passes {
        if !pass.is_enabled() {
            tracing::debug!(pass = pass.name, strength = pass.strength, "pass skipped");
            report.skipped.push(pass.name);
            continue;
        }
        let depth = ctx.state().depth();
        let entry = ctx.state().current().clone();
        ctx.save();
        match pass.body {
            PassBody::Deterministic(draw) => draw(ctx, frame),
            PassBody::Textured(draw) => draw(ctx, frame, rng),
        }
        while ctx.state().depth() > depth {
            ctx.restore();
        }
        *ctx.state_mut().current_mut() = entry;
        tracing::trace!(pass = pass.name, kind = ?pass.kind, "pass done");
        report.executed.push(pass.name);
    }
    report
}

/// Phase of accent instance `index`: `time * speed + index * offset`.
pub fn accent_phase(time: f64, speed: f64, index: usize, offset: f64) -> f64 {
    time * speed + index as f64 * offset
}

/// Fade envelope `(sin(phase) + 1) / 2`, in `[0, 1]`.
pub fn life(phase: f64) -> f64 {
    (phase.sin() + 1.0) / 2.0
}

#[cfg(test)]
#[path = "../../tests/unit/render/pass.rs"]
mod tests;
