//! Degenerate shape for substances with no usable duration data.
//!
//! Renders nothing itself; the aggregator still emits a point marker at
//! the ingestion time so the dose stays visible on the chart.

use crate::timeline::path::TimelinePath;

use super::{ShapeContext, TimelineDrawable};

#[derive(Clone, Copy, Debug, Default)]
pub struct NoTimeline;

impl TimelineDrawable for NoTimeline {
    fn width_seconds(&self) -> f64 {
        0.0
    }

    fn raw_height(&self) -> f64 {
        0.0
    }

    fn stroke_path(&self, _ctx: &ShapeContext) -> Option<TimelinePath> {
        None
    }

    fn band_path(&self, _ctx: &ShapeContext) -> Option<TimelinePath> {
        None
    }

    fn peak_window(&self, _start_seconds: f64) -> Option<(f64, f64)> {
        None
    }
}
