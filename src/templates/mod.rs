//! Built-in templates and the registry that exposes them.
//!
//! Each template is a schema + generator + palette + pass list. Templates share nothing
//! mutable; the helpers here are pure functions over their arguments.

pub(crate) mod bark;
pub(crate) mod crystal;
pub(crate) mod diamond;
pub(crate) mod fluid;
pub(crate) mod minimal;
pub(crate) mod neon;
pub(crate) mod sketch;

use serde::Serialize;

use crate::color::palette::Hsl;
use crate::foundation::core::{BezPath, Rgba};
use crate::foundation::error::{LogoError, LogoResult};
use crate::foundation::rng::RandomSource;
use crate::geometry::point::GeometryPoint;
use crate::paint::appliers::{FillSettings, StrokeSettings};
use crate::params::resolve::ResolvedParams;
use crate::params::schema::ParameterSchema;
use crate::raster::context::{Paint, RasterContext};
use crate::render::pass::PassReport;

/// Identity and UI description of a template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TemplateMetadata {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
}

/// One procedural logo motif.
///
/// `render` draws onto a surface whose background has already been applied. Everything but
/// the imperfection pass is a pure function of `resolved`.
pub trait Template: Send + Sync {
    fn metadata(&self) -> TemplateMetadata;

    fn schema(&self) -> &ParameterSchema;

    /// Whether the template draws under the host `_viewport` transform.
    fn supports_viewport(&self) -> bool {
        false
    }

    /// The silhouette for `resolved`, with template-specific extras dropped.
    fn outline(&self, resolved: &ResolvedParams) -> Vec<GeometryPoint>;

    /// Closed-form ring radius at `angle`, or `None` for open-path templates.
    fn radius_at(&self, resolved: &ResolvedParams, angle: f64) -> Option<f64>;

    fn render(
        &self,
        ctx: &mut dyn RasterContext,
        resolved: &ResolvedParams,
        rng: &mut dyn RandomSource,
    ) -> PassReport;

    /// Every schema default in its declared unit.
    fn default_params(&self) -> serde_json::Map<String, serde_json::Value> {
        self.schema().defaults_json()
    }
}

/// Serializable registry row used to populate UIs.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEntry<'a> {
    #[serde(flatten)]
    pub metadata: TemplateMetadata,
    pub parameters: &'a ParameterSchema,
    pub default_params: serde_json::Map<String, serde_json::Value>,
}

/// Ordered set of templates addressable by id.
pub struct TemplateRegistry {
    templates: Vec<Box<dyn Template>>,
}

impl TemplateRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            templates: Vec::new(),
        }
    }

    /// Every built-in template.
    pub fn builtin() -> Self {
        let mut r = Self::new();
        r.register(crystal::CrystalLattice::new());
        r.register(diamond::DynamicDiamond::new());
        r.register(fluid::LiquidFluid::new());
        r.register(bark::OrganicBark::new());
        r.register(sketch::HandDrawn::new());
        r.register(minimal::MinimalLine::new());
        r.register(neon::NeonWave::new());
        r
    }

    /// Add a template; a later registration with the same id shadows the earlier one.
    pub fn register(&mut self, template: impl Template + 'static) {
        let id = template.metadata().id;
        self.templates.retain(|t| t.metadata().id != id);
        self.templates.push(Box::new(template));
    }

    pub fn get(&self, id: &str) -> LogoResult<&dyn Template> {
        self.templates
            .iter()
            .find(|t| t.metadata().id == id)
            .map(|t| t.as_ref())
            .ok_or_else(|| {
                LogoError::template(format!(
                    "unknown template '{id}' (known: {})",
                    self.ids().collect::<Vec<_>>().join(", ")
                ))
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Template> {
        self.templates.iter().map(|t| t.as_ref())
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.templates.iter().map(|t| t.metadata().id)
    }

    pub fn entries(&self) -> Vec<TemplateEntry<'_>> {
        self.iter()
            .map(|t| TemplateEntry {
                metadata: t.metadata(),
                parameters: t.schema(),
                default_params: t.default_params(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Body pass shared by ring templates: the template's own material paint, then the universal
/// fill and stroke on top.
pub(crate) fn paint_body(
    ctx: &mut dyn RasterContext,
    path: &BezPath,
    native: &Paint,
    resolved: &ResolvedParams,
) {
    ctx.fill_path(path, native);
    FillSettings::from_resolved(resolved).apply(ctx, path);
    StrokeSettings::from_resolved(resolved).apply(ctx, path);
}

pub(crate) fn hsla(h: f64, s: f64, l: f64, a: f64) -> Rgba {
    Hsl::new(h, s, l, a).to_rgba()
}

pub(crate) fn strip<T>(points: &[GeometryPoint<T>]) -> Vec<GeometryPoint> {
    points
        .iter()
        .map(|p| GeometryPoint {
            x: p.x,
            y: p.y,
            angle: p.angle,
            radius: p.radius,
            extra: (),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/templates/registry.rs"]
mod tests;
