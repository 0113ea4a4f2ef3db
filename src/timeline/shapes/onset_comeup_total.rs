//! Onset and comeup with a known total; no peak or offset data.
//!
//! The curve rises like the Full model but has no plateau: it tops out at
//! the end of comeup and falls smoothly to the total duration.

use crate::duration::{DurationRange, RoaDuration};
use crate::timeline::path::TimelinePath;

use super::{RISE_WEIGHT, ShapeContext, TimelineDrawable};

#[derive(Clone, Debug)]
pub struct OnsetComeupTotalTimeline {
    onset: DurationRange,
    comeup: DurationRange,
    total: DurationRange,
    height: f64,
    weight: f64,
}

impl OnsetComeupTotalTimeline {
    pub fn new(d: &RoaDuration, height: f64, weight: f64) -> Option<Self> {
        Some(Self {
            onset: d.onset.clone()?,
            comeup: d.comeup.clone()?,
            total: d.total.clone()?,
            height,
            weight,
        })
    }
}

impl TimelineDrawable for OnsetComeupTotalTimeline {
    fn width_seconds(&self) -> f64 {
        self.total.max_seconds()
    }

    fn raw_height(&self) -> f64 {
        self.height
    }

    fn stroke_path(&self, ctx: &ShapeContext) -> Option<TimelinePath> {
        let top = ctx.y(self.height);
        let onset = self.onset.interpolate(RISE_WEIGHT);
        let crest = onset + self.comeup.interpolate(RISE_WEIGHT);
        let total = self.total.interpolate(self.weight).max(crest);

        let mut p = TimelinePath::new();
        p.move_to(ctx.x(0.0), 0.0);
        p.line_to(ctx.x(onset), 0.0);
        p.line_to(ctx.x(crest), top);
        p.start_smooth_line_to(ctx.smoothness, (ctx.x(crest), top), (ctx.x(total), 0.0));
        Some(p)
    }

    fn band_path(&self, ctx: &ShapeContext) -> Option<TimelinePath> {
        let top = ctx.y(self.height);
        let rise_min = self.onset.min_seconds();
        let top_min = rise_min + self.comeup.min_seconds();
        let top_max = self.onset.max_seconds() + self.comeup.max_seconds();
        let fall_max = self.total.max_seconds().max(top_max);

        let mut p = TimelinePath::new();
        p.move_to(ctx.x(rise_min), 0.0);
        p.line_to(ctx.x(top_min), top);
        p.line_to(ctx.x(top_max), top);
        p.start_smooth_line_to(ctx.smoothness, (ctx.x(top_max), top), (ctx.x(fall_max), 0.0));
        p.close();
        Some(p)
    }

    /// No peak phase: the crest is an instant, not a window.
    fn peak_window(&self, _start_seconds: f64) -> Option<(f64, f64)> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{ctx, full_profile};
    use super::*;
    use crate::timeline::path::PathCmd;

    fn profile() -> RoaDuration {
        let mut d = full_profile();
        d.peak = None;
        d.offset = None;
        d
    }

    #[test]
    fn width_and_no_peak_window() {
        let shape = OnsetComeupTotalTimeline::new(&profile(), 1.0, 0.5).unwrap();
        assert_eq!(shape.width_seconds(), 18000.0);
        assert!(shape.peak_window(0.0).is_none());
    }

    #[test]
    fn crest_at_comeup_end() {
        let shape = OnsetComeupTotalTimeline::new(&profile(), 1.0, 0.5).unwrap();
        let path = shape.stroke_path(&ctx()).unwrap();
        assert_eq!(path.cmds()[2], PathCmd::LineTo { x: 3150.0, y: 1.0 });
        assert!(matches!(path.cmds()[3], PathCmd::QuadTo { x, .. } if x == 14400.0));
    }
}
