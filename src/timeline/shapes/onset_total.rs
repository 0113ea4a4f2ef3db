//! Onset plus total only: a smoothed dome after the onset delay.
//!
//! With no comeup/peak/offset data the internal shape is unknown, so both
//! the rise and the fall are quadratic blends meeting at the midpoint
//! between onset end and total end.

use crate::duration::{DurationRange, RoaDuration};
use crate::timeline::path::TimelinePath;

use super::{RISE_WEIGHT, ShapeContext, TimelineDrawable};

#[derive(Clone, Debug)]
pub struct OnsetTotalTimeline {
    onset: DurationRange,
    total: DurationRange,
    height: f64,
    weight: f64,
}

impl OnsetTotalTimeline {
    pub fn new(d: &RoaDuration, height: f64, weight: f64) -> Option<Self> {
        Some(Self {
            onset: d.onset.clone()?,
            total: d.total.clone()?,
            height,
            weight,
        })
    }
}

impl TimelineDrawable for OnsetTotalTimeline {
    fn width_seconds(&self) -> f64 {
        self.total.max_seconds()
    }

    fn raw_height(&self) -> f64 {
        self.height
    }

    fn stroke_path(&self, ctx: &ShapeContext) -> Option<TimelinePath> {
        let top = ctx.y(self.height);
        let onset = self.onset.interpolate(RISE_WEIGHT);
        let total = self.total.interpolate(self.weight).max(onset);
        let crest = (onset + total) / 2.0;

        let mut p = TimelinePath::new();
        p.move_to(ctx.x(0.0), 0.0);
        p.line_to(ctx.x(onset), 0.0);
        p.end_smooth_line_to(ctx.smoothness, (ctx.x(onset), 0.0), (ctx.x(crest), top));
        p.start_smooth_line_to(ctx.smoothness, (ctx.x(crest), top), (ctx.x(total), 0.0));
        Some(p)
    }

    fn band_path(&self, ctx: &ShapeContext) -> Option<TimelinePath> {
        let top = ctx.y(self.height);
        let rise_min = self.onset.min_seconds();
        let total_max = self.total.max_seconds().max(rise_min);
        // Earliest possible crest vs latest possible crest bound the flat
        // top of the envelope.
        let crest_min = (rise_min + self.total.min_seconds().max(rise_min)) / 2.0;
        let crest_max = (self.onset.max_seconds() + total_max) / 2.0;

        let mut p = TimelinePath::new();
        p.move_to(ctx.x(rise_min), 0.0);
        p.end_smooth_line_to(ctx.smoothness, (ctx.x(rise_min), 0.0), (ctx.x(crest_min), top));
        p.line_to(ctx.x(crest_max.max(crest_min)), top);
        p.start_smooth_line_to(
            ctx.smoothness,
            (ctx.x(crest_max.max(crest_min)), top),
            (ctx.x(total_max), 0.0),
        );
        p.close();
        Some(p)
    }

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
        d.comeup = None;
        d.peak = None;
        d.offset = None;
        d
    }

    #[test]
    fn width_is_total_max() {
        let shape = OnsetTotalTimeline::new(&profile(), 1.0, 0.5).unwrap();
        assert_eq!(shape.width_seconds(), 18000.0);
        assert!(shape.peak_window(100.0).is_none());
    }

    #[test]
    fn dome_crests_midway() {
        let shape = OnsetTotalTimeline::new(&profile(), 1.0, 0.5).unwrap();
        let path = shape.stroke_path(&ctx()).unwrap();
        // Onset midpoint 1800s, total at weight 0.5 is 14400s, crest at 8100s.
        match path.cmds()[2] {
            PathCmd::QuadTo { x, y, .. } => {
                assert_eq!(x, 8100.0);
                assert_eq!(y, 1.0);
            }
            other => panic!("expected smoothed rise, got {:?}", other),
        }
        match path.cmds()[3] {
            PathCmd::QuadTo { x, y, .. } => {
                assert_eq!(x, 14400.0);
                assert_eq!(y, 0.0);
            }
            other => panic!("expected smoothed fall, got {:?}", other),
        }
    }
}
