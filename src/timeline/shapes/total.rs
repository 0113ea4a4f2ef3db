//! Total duration alone: a symmetric smoothed dome.
//!
//! Only the overall window is known, so the curve rises and falls with
//! quadratic blends around the halfway point rather than implying any
//! internal phase timing.

use crate::duration::{DurationRange, RoaDuration};
use crate::timeline::path::TimelinePath;

use super::{ShapeContext, TimelineDrawable};

#[derive(Clone, Debug)]
pub struct TotalTimeline {
    total: DurationRange,
    height: f64,
    weight: f64,
}

impl TotalTimeline {
    pub fn new(d: &RoaDuration, height: f64, weight: f64) -> Option<Self> {
        Some(Self { total: d.total.clone()?, height, weight })
    }
}

impl TimelineDrawable for TotalTimeline {
    fn width_seconds(&self) -> f64 {
        self.total.max_seconds()
    }

    fn raw_height(&self) -> f64 {
        self.height
    }

    fn stroke_path(&self, ctx: &ShapeContext) -> Option<TimelinePath> {
        let top = ctx.y(self.height);
        let total = self.total.interpolate(self.weight);
        let crest = total / 2.0;

        let mut p = TimelinePath::new();
        p.move_to(ctx.x(0.0), 0.0);
        p.end_smooth_line_to(ctx.smoothness, (ctx.x(0.0), 0.0), (ctx.x(crest), top));
        p.start_smooth_line_to(ctx.smoothness, (ctx.x(crest), top), (ctx.x(total), 0.0));
        Some(p)
    }

    fn band_path(&self, ctx: &ShapeContext) -> Option<TimelinePath> {
        let top = ctx.y(self.height);
        let crest_min = self.total.min_seconds() / 2.0;
        let crest_max = self.total.max_seconds() / 2.0;
        let fall_max = self.total.max_seconds();

        let mut p = TimelinePath::new();
        p.move_to(ctx.x(0.0), 0.0);
        p.end_smooth_line_to(ctx.smoothness, (ctx.x(0.0), 0.0), (ctx.x(crest_min), top));
        p.line_to(ctx.x(crest_max), top);
        p.start_smooth_line_to(ctx.smoothness, (ctx.x(crest_max), top), (ctx.x(fall_max), 0.0));
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
        RoaDuration { total: full_profile().total, ..Default::default() }
    }

    #[test]
    fn width_is_total_max() {
        let shape = TotalTimeline::new(&profile(), 1.0, 0.5).unwrap();
        assert_eq!(shape.width_seconds(), 18000.0);
        assert!(shape.peak_window(0.0).is_none());
    }

    #[test]
    fn symmetric_dome() {
        let shape = TotalTimeline::new(&profile(), 0.5, 0.5).unwrap();
        let path = shape.stroke_path(&ctx()).unwrap();
        // Total at weight 0.5 = 4h; crest at 2h with the scaled height.
        match path.cmds()[1] {
            PathCmd::QuadTo { x, y, .. } => {
                assert_eq!(x, 7200.0);
                assert_eq!(y, 0.5);
            }
            other => panic!("expected smoothed rise, got {:?}", other),
        }
        match path.cmds()[2] {
            PathCmd::QuadTo { x, y, .. } => {
                assert_eq!(x, 14400.0);
                assert_eq!(y, 0.0);
            }
            other => panic!("expected smoothed fall, got {:?}", other),
        }
    }
}
