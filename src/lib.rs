//! Logoforge is a procedural logo generator.
//!
//! A template is a parameter schema, a deterministic geometry generator, a palette derivation
//! and an ordered list of render passes. The public API is draw-oriented:
//!
//! - Pick a [`Template`] from the [`TemplateRegistry`]
//! - [`draw`] it onto any [`RasterContext`] ([`CpuCanvas`] for pixels, [`RecordingCanvas`] for
//!   an op log)
//! - Or describe a [`RenderJob`] and render single frames or a parallel frame series
//!
//! Everything except the imperfection pass is a pure function of `(params, width, height,
//! time)`; the imperfection pass draws from the [`RandomSource`] it is handed.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod color;
pub(crate) mod geometry;
pub(crate) mod host;
pub(crate) mod paint;
pub(crate) mod params;
pub(crate) mod raster;
pub(crate) mod render;
pub(crate) mod templates;

pub use crate::foundation::core::{Affine, BezPath, FrameRGBA, Point, Rect, Rgba, Vec2};
pub use crate::foundation::error::{LogoError, LogoResult};
pub use crate::foundation::math::{Rng64, hash01, lerp, ring_fbm, ring_noise, smoothstep};
pub use crate::foundation::rng::{FixedSequence, RandomSource, SeededRandom};

pub use crate::color::css::{hsla_to_rgba, parse_css_color};
pub use crate::color::palette::{Hsl, MaterialAdjust, Palette, PaletteColor, PaletteShape};

pub use crate::params::resolve::{
    LEGACY_GROUP, PARAM_GROUPS, ResolvedParams, Theme, VIEWPORT_KEY, Variant, Viewport, resolve,
};
pub use crate::params::schema::{
    DEFAULT_NOMINAL_SIZE, ParamKind, ParameterDefinition, ParameterSchema, SelectOption, ShowIf,
    Unit,
};
pub use crate::params::value::ParamValue;

pub use crate::raster::context::{
    Blend, ColorStop, DrawState, LineCap, LineJoin, LineStyle, LinearGradient, Paint,
    RadialGradient, RasterContext, StateStack, Stops,
};
pub use crate::raster::cpu::CpuCanvas;
pub use crate::raster::record::{DrawCall, RecordedOp, RecordingCanvas};

pub use crate::geometry::path::{
    MIN_CLOSED_POINTS, bounds, build_open_path, build_polygon_path, build_smooth_path,
    circle_path, line_path, star_path,
};
pub use crate::geometry::point::GeometryPoint;
pub use crate::geometry::ring::{closure_gap, harmonics, point_count, ring, ring_angle};

pub use crate::paint::appliers::{
    BackgroundSettings, FillKind, FillSettings, GradientShape, StrokeKind, StrokeSettings,
    apply_background, apply_fill, apply_stroke, gradient_axis,
};

pub use crate::render::pass::{
    DrawFn, Frame, PASS_EPSILON, PassKind, PassReport, PassSpec, TextureFn, accent_phase, life,
    run_passes,
};

pub use crate::templates::{Template, TemplateEntry, TemplateMetadata, TemplateRegistry};

pub use crate::host::job::{FrameSeries, RenderJob, RenderedFrame, render_job, render_series};
pub use crate::host::{draw, viewport_transform};
