//! Full model: onset + comeup + peak + offset all present.
//!
//! The richest geometry: flat along the baseline during onset, linear rise
//! over comeup, plateau over peak, linear fall over offset. Onset and
//! comeup interpolate at 0.5; peak and offset at the ingestion's
//! horizontal weight.

use crate::duration::{DurationRange, RoaDuration};
use crate::timeline::path::TimelinePath;

use super::{RISE_WEIGHT, ShapeContext, TimelineDrawable};

#[derive(Clone, Debug)]
pub struct FullTimeline {
    onset: DurationRange,
    comeup: DurationRange,
    peak: DurationRange,
    offset: DurationRange,
    height: f64,
    weight: f64,
}

impl FullTimeline {
    pub fn new(d: &RoaDuration, height: f64, weight: f64) -> Option<Self> {
        Some(Self {
            onset: d.onset.clone()?,
            comeup: d.comeup.clone()?,
            peak: d.peak.clone()?,
            offset: d.offset.clone()?,
            height,
            weight,
        })
    }

    /// Breakpoints of the interpolated trapezoid, relative to the shape
    /// origin: baseline until comeup starts, raw height across the peak
    /// plateau, baseline again after offset. This is the unit the overlap
    /// aggregator sums when several ingestions share one profile.
    pub fn trapezoid_knots(&self, start_seconds: f64) -> [(f64, f64); 5] {
        let onset = self.onset.interpolate(RISE_WEIGHT);
        let comeup = self.comeup.interpolate(RISE_WEIGHT);
        let peak = self.peak.interpolate(self.weight);
        let offset = self.offset.interpolate(self.weight);
        [
            (start_seconds, 0.0),
            (start_seconds + onset, 0.0),
            (start_seconds + onset + comeup, self.height),
            (start_seconds + onset + comeup + peak, self.height),
            (start_seconds + onset + comeup + peak + offset, 0.0),
        ]
    }
}

impl TimelineDrawable for FullTimeline {
    fn width_seconds(&self) -> f64 {
        self.onset.max_seconds()
            + self.comeup.max_seconds()
            + self.peak.max_seconds()
            + self.offset.max_seconds()
    }

    fn raw_height(&self) -> f64 {
        self.height
    }

    fn stroke_path(&self, ctx: &ShapeContext) -> Option<TimelinePath> {
        let mut p = TimelinePath::new();
        for (i, (t, h)) in self.trapezoid_knots(0.0).into_iter().enumerate() {
            let (x, y) = (ctx.x(t), ctx.y(h));
            if i == 0 {
                p.move_to(x, y);
            } else {
                p.line_to(x, y);
            }
        }
        Some(p)
    }

    fn band_path(&self, ctx: &ShapeContext) -> Option<TimelinePath> {
        // Quadrilateral between the earliest possible curve (all minima)
        // and the latest (all maxima), closed along the baseline.
        let top = ctx.y(self.height);
        let rise_min = self.onset.min_seconds();
        let top_min = rise_min + self.comeup.min_seconds();
        let top_max =
            self.onset.max_seconds() + self.comeup.max_seconds() + self.peak.max_seconds();
        let fall_max = top_max + self.offset.max_seconds();

        let mut p = TimelinePath::new();
        p.move_to(ctx.x(rise_min), 0.0);
        p.line_to(ctx.x(top_min), top);
        p.line_to(ctx.x(top_max), top);
        p.line_to(ctx.x(fall_max), 0.0);
        p.close();
        Some(p)
    }

    fn peak_window(&self, start_seconds: f64) -> Option<(f64, f64)> {
        let knots = self.trapezoid_knots(start_seconds);
        Some((knots[2].0, knots[3].0))
    }
}
