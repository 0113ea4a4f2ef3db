//! Onset and comeup only: baseline delay, then a rise that ends open.

use crate::duration::{DurationRange, RoaDuration};
use crate::timeline::path::TimelinePath;

use super::{RISE_WEIGHT, ShapeContext, TimelineDrawable};

#[derive(Clone, Debug)]
pub struct OnsetComeupTimeline {
    onset: DurationRange,
    comeup: DurationRange,
    height: f64,
}

impl OnsetComeupTimeline {
    pub fn new(d: &RoaDuration, height: f64, _weight: f64) -> Option<Self> {
        Some(Self {
            onset: d.onset.clone()?,
            comeup: d.comeup.clone()?,
            height,
        })
    }
}

impl TimelineDrawable for OnsetComeupTimeline {
    fn width_seconds(&self) -> f64 {
        self.onset.max_seconds() + self.comeup.max_seconds()
    }

    fn raw_height(&self) -> f64 {
        self.height
    }

    fn stroke_path(&self, ctx: &ShapeContext) -> Option<TimelinePath> {
        let top = ctx.y(self.height);
        let onset = self.onset.interpolate(RISE_WEIGHT);
        let crest = onset + self.comeup.interpolate(RISE_WEIGHT);

        let mut p = TimelinePath::new();
        p.move_to(ctx.x(0.0), 0.0);
        p.line_to(ctx.x(onset), 0.0);
        p.line_to(ctx.x(crest), top);
        Some(p)
    }

    fn band_path(&self, ctx: &ShapeContext) -> Option<TimelinePath> {
        let top = ctx.y(self.height);
        let rise_min = self.onset.min_seconds();
        let top_min = rise_min + self.comeup.min_seconds();
        let right = self.width_seconds();

        let mut p = TimelinePath::new();
        p.move_to(ctx.x(rise_min), 0.0);
        p.line_to(ctx.x(top_min), top);
        p.line_to(ctx.x(right), top);
        p.line_to(ctx.x(right), 0.0);
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
        RoaDuration {
            onset: full_profile().onset,
            comeup: full_profile().comeup,
            ..Default::default()
        }
    }

    #[test]
    fn width_is_sum_of_two_maxima() {
        let shape = OnsetComeupTimeline::new(&profile(), 1.0, 0.5).unwrap();
        assert_eq!(shape.width_seconds(), 4200.0); // (40+30)m
    }

    #[test]
    fn rise_ends_open_at_crest() {
        let shape = OnsetComeupTimeline::new(&profile(), 1.0, 0.5).unwrap();
        let path = shape.stroke_path(&ctx()).unwrap();
        assert_eq!(*path.cmds().last().unwrap(), PathCmd::LineTo { x: 3150.0, y: 1.0 });
        assert!(shape.peak_window(0.0).is_none());
    }
}
