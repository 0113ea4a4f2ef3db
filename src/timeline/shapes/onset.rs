//! Onset only: a baseline segment covering the expected delay.
//!
//! Nothing is known past the onset, so the stroke never leaves the
//! baseline and there is no uncertainty band to fill.

use crate::duration::{DurationRange, RoaDuration};
use crate::timeline::path::TimelinePath;

use super::{RISE_WEIGHT, ShapeContext, TimelineDrawable};

#[derive(Clone, Debug)]
pub struct OnsetTimeline {
    onset: DurationRange,
    height: f64,
}

impl OnsetTimeline {
    pub fn new(d: &RoaDuration, height: f64, _weight: f64) -> Option<Self> {
        Some(Self { onset: d.onset.clone()?, height })
    }
}

impl TimelineDrawable for OnsetTimeline {
    fn width_seconds(&self) -> f64 {
        self.onset.max_seconds()
    }

    fn raw_height(&self) -> f64 {
        self.height
    }

    fn stroke_path(&self, ctx: &ShapeContext) -> Option<TimelinePath> {
        let mut p = TimelinePath::new();
        p.move_to(ctx.x(0.0), 0.0);
        p.line_to(ctx.x(self.onset.interpolate(RISE_WEIGHT)), 0.0);
        Some(p)
    }

    fn band_path(&self, _ctx: &ShapeContext) -> Option<TimelinePath> {
        // Min and max both sit on the baseline; the band is degenerate.
        None
    }

    fn peak_window(&self, _start_seconds: f64) -> Option<(f64, f64)> {
        None
    }
}
