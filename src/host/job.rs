use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rayon::prelude::*;

use crate::foundation::core::FrameRGBA;
use crate::foundation::error::{LogoError, LogoResult};
use crate::foundation::rng::SeededRandom;
use crate::host::draw;
use crate::raster::cpu::CpuCanvas;
use crate::render::pass::PassReport;
use crate::templates::TemplateRegistry;

fn default_size() -> u32 {
    512
}

/// Frame series settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrameSeries {
    pub count: u32,
    pub fps: f64,
}

impl FrameSeries {
    /// Clock value of frame `index`, offset from the job start time.
    pub fn time_of(&self, start: f64, index: u32) -> f64 {
        start + f64::from(index) / self.fps
    }
}

/// JSON-facing description of what to render.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderJob {
    pub template: String,
    #[serde(default = "default_size")]
    pub width: u32,
    #[serde(default = "default_size")]
    pub height: u32,
    #[serde(default)]
    pub time: f64,
    /// Seed for the imperfection pass; `0` when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Raw parameter bag, resolved against the template schema at draw time.
    #[serde(default)]
    pub params: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frames: Option<FrameSeries>,
}

impl RenderJob {
    /// Job with default size, time and an empty parameter bag.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            width: default_size(),
            height: default_size(),
            time: 0.0,
            seed: None,
            params: serde_json::Value::Null,
            frames: None,
        }
    }

    pub fn from_reader<R: std::io::Read>(r: R) -> LogoResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| LogoError::serde(format!("parse render job JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> LogoResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            LogoError::validation(format!("open render job '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check canvas bounds, the template id and the frame series against `registry`.
    pub fn validate(&self, registry: &TemplateRegistry) -> LogoResult<()> {
        let max = u32::from(u16::MAX);
        if self.width == 0 || self.height == 0 {
            return Err(LogoError::validation("canvas width/height must be > 0"));
        }
        if self.width > max || self.height > max {
            return Err(LogoError::validation(format!(
                "canvas {}x{} exceeds {max}x{max}",
                self.width, self.height
            )));
        }
        if !self.time.is_finite() {
            return Err(LogoError::validation("time must be finite"));
        }
        if !(self.params.is_null() || self.params.is_object()) {
            return Err(LogoError::validation("params must be a JSON object"));
        }
        if let Some(series) = &self.frames {
            if series.count == 0 {
                return Err(LogoError::validation("frames.count must be > 0"));
            }
            if !(series.fps.is_finite() && series.fps > 0.0) {
                return Err(LogoError::validation("frames.fps must be > 0"));
            }
        }
        registry.get(&self.template)?;
        Ok(())
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(0)
    }
}

/// A rendered frame and the passes that produced it.
#[derive(Clone, Debug)]
pub struct RenderedFrame {
    pub frame: FrameRGBA,
    pub report: PassReport,
}

fn render_at(
    registry: &TemplateRegistry,
    job: &RenderJob,
    time: f64,
    seed: u64,
) -> LogoResult<RenderedFrame> {
    let template = registry.get(&job.template)?;
    let mut canvas = CpuCanvas::new(job.width, job.height)?;
    let mut rng = SeededRandom::new(seed);
    let report = draw(
        template,
        &mut canvas,
        f64::from(job.width),
        f64::from(job.height),
        &job.params,
        time,
        &mut rng,
    );
    Ok(RenderedFrame {
        frame: canvas.snapshot(),
        report,
    })
}

/// Render the single frame at `job.time`.
#[tracing::instrument(level = "debug", skip(registry, job), fields(template = %job.template))]
pub fn render_job(registry: &TemplateRegistry, job: &RenderJob) -> LogoResult<RenderedFrame> {
    job.validate(registry)?;
    render_at(registry, job, job.time, job.seed())
}

/// Render every frame of `job.frames` in parallel, in frame order.
///
/// Frame `i` draws at `time + i / fps` with its own canvas and `SeededRandom(seed ^ i)`, so the
/// output does not depend on scheduling.
#[tracing::instrument(level = "debug", skip(registry, job), fields(template = %job.template))]
pub fn render_series(
    registry: &TemplateRegistry,
    job: &RenderJob,
) -> LogoResult<Vec<RenderedFrame>> {
    job.validate(registry)?;
    let series = job
        .frames
        .ok_or_else(|| LogoError::validation("job has no 'frames' section"))?;
    let seed = job.seed();
    let rendered = (0..series.count)
        .into_par_iter()
        .map(|i| render_at(registry, job, series.time_of(job.time, i), seed ^ u64::from(i)))
        .collect::<Vec<_>>();
    tracing::debug!(frames = rendered.len(), "series rendered");
    rendered.into_iter().collect()
}

#[cfg(test)]
#[path = "../../tests/unit/host/job.rs"]
mod tests;
