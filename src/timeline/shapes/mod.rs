//! The closed family of timeline geometry models.
//!
//! One file per variant. Each shape is constructed from whatever subset of
//! the six duration phases the reference data carries and is immutable
//! afterwards; a shape constructor returns `None` when its required phases
//! are missing, which is how the selector's fallback chain probes them.
//!
//! Shapes emit geometry through [`TimelineDrawable`]: total horizontal
//! extent in seconds, the midpoint-interpolated stroke path, the min/max
//! uncertainty band, and the plateau window (for shapes that have one).

use enum_dispatch::enum_dispatch;

use crate::timeline::path::TimelinePath;

mod full;
mod no_timeline;
mod onset;
mod onset_comeup;
mod onset_comeup_peak;
mod onset_comeup_peak_total;
mod onset_comeup_total;
mod onset_total;
mod total;

pub use full::FullTimeline;
pub use no_timeline::NoTimeline;
pub use onset::OnsetTimeline;
pub use onset_comeup::OnsetComeupTimeline;
pub use onset_comeup_peak::OnsetComeupPeakTimeline;
pub use onset_comeup_peak_total::OnsetComeupPeakTotalTimeline;
pub use onset_comeup_total::OnsetComeupTotalTimeline;
pub use onset_total::OnsetTotalTimeline;
pub use total::TotalTimeline;

/// Fixed interpolation weight for onset and comeup. Peak, offset and total
/// interpolate at the ingestion's horizontal weight instead.
pub(crate) const RISE_WEIGHT: f64 = 0.5;

/// Per-render drawing parameters shared by every shape.
///
/// `height_scale` is the normalization divisor from the aggregator's
/// second pass, applied here as a multiplier; shapes themselves only know
/// their raw dose-derived height.
#[derive(Clone, Copy, Debug)]
pub struct ShapeContext {
    /// Shape origin in seconds from the chart's left edge.
    pub start_seconds: f64,
    /// Horizontal zoom supplied by the caller.
    pub pixels_per_second: f64,
    /// Normalization factor for this shape's group.
    pub height_scale: f64,
    /// Quadratic blend fraction for smoothed rises and falls.
    pub smoothness: f64,
}

impl ShapeContext {
    /// Pixel x for an instant measured from the shape's own origin.
    pub fn x(&self, seconds: f64) -> f64 {
        (self.start_seconds + seconds) * self.pixels_per_second
    }

    /// Normalized y (0..=1, baseline-up) for a raw height.
    pub fn y(&self, raw_height: f64) -> f64 {
        raw_height * self.height_scale
    }
}

/// Shared contract of every timeline geometry model.
#[enum_dispatch]
pub trait TimelineDrawable {
    /// Total horizontal extent in seconds from the shape's local origin.
    fn width_seconds(&self) -> f64;

    /// Raw (unnormalized) dose-derived height, 0 for point markers.
    fn raw_height(&self) -> f64;

    /// Expected-effects path at the interpolated phase midpoints, or
    /// `None` for shapes with no line to draw.
    fn stroke_path(&self, ctx: &ShapeContext) -> Option<TimelinePath>;

    /// Filled min/max uncertainty region, or `None` when the shape has no
    /// meaningful spread.
    fn band_path(&self, ctx: &ShapeContext) -> Option<TimelinePath>;

    /// Plateau interval in chart-relative seconds, or `None` for shapes
    /// without a distinct peak phase.
    fn peak_window(&self, start_seconds: f64) -> Option<(f64, f64)>;
}

/// Variant tags in richness order; the selector's chain iterates these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ShapeKind {
    Full,
    OnsetComeupPeakTotal,
    OnsetComeupTotal,
    OnsetTotal,
    Total,
    OnsetComeupPeak,
    OnsetComeup,
    Onset,
    NoTimeline,
}

/// Closed sum type over the nine geometry models. Exhaustive matching
/// keeps the fallback chain total; no open subclassing.
#[enum_dispatch(TimelineDrawable)]
#[derive(Clone, Debug)]
pub enum TimelineShape {
    Full(FullTimeline),
    OnsetComeupPeakTotal(OnsetComeupPeakTotalTimeline),
    OnsetComeupTotal(OnsetComeupTotalTimeline),
    OnsetTotal(OnsetTotalTimeline),
    Total(TotalTimeline),
    OnsetComeupPeak(OnsetComeupPeakTimeline),
    OnsetComeup(OnsetComeupTimeline),
    Onset(OnsetTimeline),
    NoTimeline(NoTimeline),
}

impl TimelineShape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            TimelineShape::Full(_) => ShapeKind::Full,
            TimelineShape::OnsetComeupPeakTotal(_) => ShapeKind::OnsetComeupPeakTotal,
            TimelineShape::OnsetComeupTotal(_) => ShapeKind::OnsetComeupTotal,
            TimelineShape::OnsetTotal(_) => ShapeKind::OnsetTotal,
            TimelineShape::Total(_) => ShapeKind::Total,
            TimelineShape::OnsetComeupPeak(_) => ShapeKind::OnsetComeupPeak,
            TimelineShape::OnsetComeup(_) => ShapeKind::OnsetComeup,
            TimelineShape::Onset(_) => ShapeKind::Onset,
            TimelineShape::NoTimeline(_) => ShapeKind::NoTimeline,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::duration::{DurationRange, RoaDuration, TimeUnit};

    /// The concrete reference profile from the chart's canonical scenario:
    /// onset 20-40m, comeup 15-30m, peak 1.5-2.5h, offset 1-1.5h,
    /// total 3-5h, afterglow 12-48h.
    pub fn full_profile() -> RoaDuration {
        RoaDuration {
            onset: Some(DurationRange::exact(20.0, 40.0, TimeUnit::Minutes)),
            comeup: Some(DurationRange::exact(15.0, 30.0, TimeUnit::Minutes)),
            peak: Some(DurationRange::exact(1.5, 2.5, TimeUnit::Hours)),
            offset: Some(DurationRange::exact(1.0, 1.5, TimeUnit::Hours)),
            total: Some(DurationRange::exact(3.0, 5.0, TimeUnit::Hours)),
            afterglow: Some(DurationRange::exact(12.0, 48.0, TimeUnit::Hours)),
        }
    }

    pub fn ctx() -> super::ShapeContext {
        super::ShapeContext {
            start_seconds: 0.0,
            pixels_per_second: 1.0,
            height_scale: 1.0,
            smoothness: 0.5,
        }
    }
}
