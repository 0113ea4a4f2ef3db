//! Onset, comeup and peak with no total or offset: an open-ended plateau.
//!
//! The stroke ends at the plateau's right edge; nothing is known about
//! the fall, so none is drawn.

use crate::duration::{DurationRange, RoaDuration};
use crate::timeline::path::TimelinePath;

use super::{RISE_WEIGHT, ShapeContext, TimelineDrawable};

#[derive(Clone, Debug)]
pub struct OnsetComeupPeakTimeline {
    onset: DurationRange,
    comeup: DurationRange,
    peak: DurationRange,
    height: f64,
    weight: f64,
}

impl OnsetComeupPeakTimeline {
    pub fn new(d: &RoaDuration, height: f64, weight: f64) -> Option<Self> {
        Some(Self {
            onset: d.onset.clone()?,
            comeup: d.comeup.clone()?,
            peak: d.peak.clone()?,
            height,
            weight,
        })
    }
}

impl TimelineDrawable for OnsetComeupPeakTimeline {
    fn width_seconds(&self) -> f64 {
        self.onset.max_seconds() + self.comeup.max_seconds() + self.peak.max_seconds()
    }

    fn raw_height(&self) -> f64 {
        self.height
    }

    fn stroke_path(&self, ctx: &ShapeContext) -> Option<TimelinePath> {
        let top = ctx.y(self.height);
        let onset = self.onset.interpolate(RISE_WEIGHT);
        let crest = onset + self.comeup.interpolate(RISE_WEIGHT);
        let plateau_end = crest + self.peak.interpolate(self.weight);

        let mut p = TimelinePath::new();
        p.move_to(ctx.x(0.0), 0.0);
        p.line_to(ctx.x(onset), 0.0);
        p.line_to(ctx.x(crest), top);
        p.line_to(ctx.x(plateau_end), top);
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

    fn peak_window(&self, start_seconds: f64) -> Option<(f64, f64)> {
        let start =
            self.onset.interpolate(RISE_WEIGHT) + self.comeup.interpolate(RISE_WEIGHT);
        let end = start + self.peak.interpolate(self.weight);
        Some((start_seconds + start, start_seconds + end))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{ctx, full_profile};
    use super::*;
    use crate::timeline::path::PathCmd;

    fn profile() -> RoaDuration {
        let mut d = full_profile();
        d.offset = None;
        d.total = None;
        d
    }

    #[test]
    fn width_is_sum_of_three_maxima() {
        let shape = OnsetComeupPeakTimeline::new(&profile(), 1.0, 0.5).unwrap();
        // (40 + 30 + 150) minutes = 13200 seconds.
        assert_eq!(shape.width_seconds(), 13200.0);
    }

    #[test]
    fn stroke_ends_on_plateau() {
        let shape = OnsetComeupPeakTimeline::new(&profile(), 1.0, 0.5).unwrap();
        let path = shape.stroke_path(&ctx()).unwrap();
        let last = *path.cmds().last().unwrap();
        assert_eq!(last, PathCmd::LineTo { x: 10350.0, y: 1.0 });
        assert_eq!(shape.peak_window(0.0), Some((3150.0, 10350.0)));
    }
}
