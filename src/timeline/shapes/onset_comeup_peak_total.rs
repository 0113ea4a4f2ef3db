//! Onset/comeup/peak with a known total but no offset.
//!
//! Rise and plateau are drawn like the Full model; the unknown fall is a
//! smoothed quadratic from the end of the plateau down to the total
//! duration, so the chart does not imply precision about offset timing.

use crate::duration::{DurationRange, RoaDuration};
use crate::timeline::path::TimelinePath;

use super::{RISE_WEIGHT, ShapeContext, TimelineDrawable};

#[derive(Clone, Debug)]
pub struct OnsetComeupPeakTotalTimeline {
    onset: DurationRange,
    comeup: DurationRange,
    peak: DurationRange,
    total: DurationRange,
    height: f64,
    weight: f64,
}

impl OnsetComeupPeakTotalTimeline {
    pub fn new(d: &RoaDuration, height: f64, weight: f64) -> Option<Self> {
        Some(Self {
            onset: d.onset.clone()?,
            comeup: d.comeup.clone()?,
            peak: d.peak.clone()?,
            total: d.total.clone()?,
            height,
            weight,
        })
    }

    fn plateau(&self) -> (f64, f64) {
        let start = self.onset.interpolate(RISE_WEIGHT) + self.comeup.interpolate(RISE_WEIGHT);
        (start, start + self.peak.interpolate(self.weight))
    }
}

impl TimelineDrawable for OnsetComeupPeakTotalTimeline {
    fn width_seconds(&self) -> f64 {
        self.total.max_seconds()
    }

    fn raw_height(&self) -> f64 {
        self.height
    }

    fn stroke_path(&self, ctx: &ShapeContext) -> Option<TimelinePath> {
        let top = ctx.y(self.height);
        let (plateau_start, plateau_end) = self.plateau();
        let total = self.total.interpolate(self.weight);

        let mut p = TimelinePath::new();
        p.move_to(ctx.x(0.0), 0.0);
        p.line_to(ctx.x(self.onset.interpolate(RISE_WEIGHT)), 0.0);
        p.line_to(ctx.x(plateau_start), top);
        p.line_to(ctx.x(plateau_end), top);
        p.start_smooth_line_to(
            ctx.smoothness,
            (ctx.x(plateau_end), top),
            (ctx.x(total.max(plateau_end)), 0.0),
        );
        Some(p)
    }

    fn band_path(&self, ctx: &ShapeContext) -> Option<TimelinePath> {
        let top = ctx.y(self.height);
        let rise_min = self.onset.min_seconds();
        let top_min = rise_min + self.comeup.min_seconds();
        let top_max =
            self.onset.max_seconds() + self.comeup.max_seconds() + self.peak.max_seconds();
        let fall_max = self.total.max_seconds().max(top_max);

        let mut p = TimelinePath::new();
        p.move_to(ctx.x(rise_min), 0.0);
        p.line_to(ctx.x(top_min), top);
        p.line_to(ctx.x(top_max), top);
        p.start_smooth_line_to(ctx.smoothness, (ctx.x(top_max), top), (ctx.x(fall_max), 0.0));
        p.close();
        Some(p)
    }

    fn peak_window(&self, start_seconds: f64) -> Option<(f64, f64)> {
        let (a, b) = self.plateau();
        Some((start_seconds + a, start_seconds + b))
    }
}
