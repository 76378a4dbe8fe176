use crate::foundation::core::{BezPath, Rect};
use crate::raster::context::{DrawState, LineStyle, Paint, RasterContext, StateStack};

/// Primitive recorded by [`RecordingCanvas`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    FillPath { path: BezPath, paint: Paint },
    StrokePath {
        path: BezPath,
        paint: Paint,
        style: LineStyle,
    },
    FillRect { rect: Rect, paint: Paint },
    ClearRect { rect: Rect },
}

/// A recorded primitive plus the graphics state it was issued under.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedOp {
    pub call: DrawCall,
    pub state: DrawState,
    /// Unmatched `save` depth at the time of the call.
    pub depth: usize,
}

/// Raster context that keeps an op log instead of pixels.
///
/// Two canvases that saw the same calls under the same state compare equal and share a
/// [`RecordingCanvas::fingerprint`].
#[derive(Clone, Debug)]
pub struct RecordingCanvas {
    width: f64,
    height: f64,
    state: StateStack,
    ops: Vec<RecordedOp>,
}

impl RecordingCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            state: StateStack::default(),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[RecordedOp] {
        &self.ops
    }

    /// Drop the log but keep the current graphics state.
    pub fn clear_log(&mut self) {
        self.ops.clear();
    }

    pub fn save_depth(&self) -> usize {
        self.state.depth()
    }

    /// Stable 64-bit hash of the op log.
    pub fn fingerprint(&self) -> u64 {
        xxhash_rust::xxh3::xxh3_64(format!("{:?}", self.ops).as_bytes())
    }

    fn push(&mut self, call: DrawCall) {
        self.ops.push(RecordedOp {
            call,
            state: self.state.current().clone(),
            depth: self.state.depth(),
        });
    }
}

impl PartialEq for RecordingCanvas {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.ops == other.ops
    }
}

impl RasterContext for RecordingCanvas {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn state(&self) -> &StateStack {
        &self.state
    }

    fn state_mut(&mut self) -> &mut StateStack {
        &mut self.state
    }

    fn fill_path(&mut self, path: &BezPath, paint: &Paint) {
        self.push(DrawCall::FillPath {
            path: path.clone(),
            paint: paint.clone(),
        });
    }

    fn stroke_path(&mut self, path: &BezPath, paint: &Paint, style: &LineStyle) {
        self.push(DrawCall::StrokePath {
            path: path.clone(),
            paint: paint.clone(),
            style: *style,
        });
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.push(DrawCall::FillRect {
            rect,
            paint: paint.clone(),
        });
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.push(DrawCall::ClearRect { rect });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/record.rs"]
mod tests;
