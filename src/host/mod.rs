//! Host entry points: one draw onto any raster context, and batch jobs onto CPU frames.

pub(crate) mod job;

use serde_json::Value;

use crate::foundation::core::Affine;
use crate::foundation::rng::RandomSource;
use crate::paint::appliers::apply_background;
use crate::params::resolve::{Viewport, resolve};
use crate::raster::context::RasterContext;
use crate::render::pass::PassReport;
use crate::templates::Template;

/// Canvas-space transform for a pan/zoom viewport: `screen = (world - offset) * zoom`.
pub fn viewport_transform(vp: &Viewport) -> Affine {
    Affine::scale(vp.zoom) * Affine::translate((-vp.offset_x, -vp.offset_y))
}

/// Draw one frame of `template` onto `ctx`.
///
/// Resolves `raw` against the template schema, paints the universal background in device
/// space, then runs the template passes; viewport-aware templates draw under
/// [`viewport_transform`]. Total: every input produces pixels.
#[tracing::instrument(
    level = "debug",
    skip(template, ctx, raw, rng),
    fields(template = template.metadata().id)
)]
pub fn draw(
    template: &dyn Template,
    ctx: &mut dyn RasterContext,
    width: f64,
    height: f64,
    raw: &Value,
    time: f64,
    rng: &mut dyn RandomSource,
) -> PassReport {
    let resolved = resolve(raw, template.schema(), width, height, time);
    apply_background(ctx, width, height, &resolved);

    ctx.save();
    if template.supports_viewport()
        && let Some(vp) = &resolved.viewport
    {
        tracing::debug!(zoom = vp.zoom, "drawing under viewport");
        ctx.transform_by(viewport_transform(vp));
    }
    let report = template.render(ctx, &resolved, rng);
    ctx.restore();
    report
}

#[cfg(test)]
#[path = "../../tests/unit/host/draw.rs"]
mod tests;
