//! Shape selection: the ordered fallback chain.
//!
//! Different substances report different subsets of the six phases, so
//! the chart degrades gracefully instead of failing: the chain is probed
//! top to bottom and the first variant whose required phases are all
//! present wins. Data beyond what a variant needs is ignored by it.
//!
//! The chain is a plain array of (kind, constructor) steps so its order
//! is a testable value, not an artifact of code layout.

use crate::duration::RoaDuration;

use super::shapes::{
    FullTimeline, NoTimeline, OnsetComeupPeakTimeline, OnsetComeupPeakTotalTimeline,
    OnsetComeupTimeline, OnsetComeupTotalTimeline, OnsetTimeline, OnsetTotalTimeline,
    ShapeKind, TimelineShape, TotalTimeline,
};

/// Constructor probe: `None` when the profile lacks a required phase.
pub type ShapeCtor = fn(&RoaDuration, f64, f64) -> Option<TimelineShape>;

/// One step of the fallback chain.
pub struct FallbackStep {
    pub kind: ShapeKind,
    pub build: ShapeCtor,
}

/// The chain, most geometrically complete model first. The final step
/// always succeeds.
pub const FALLBACK_CHAIN: [FallbackStep; 9] = [
    FallbackStep {
        kind: ShapeKind::Full,
        build: |d, h, w| FullTimeline::new(d, h, w).map(TimelineShape::Full),
    },
    FallbackStep {
        kind: ShapeKind::OnsetComeupPeakTotal,
        build: |d, h, w| {
            OnsetComeupPeakTotalTimeline::new(d, h, w).map(TimelineShape::OnsetComeupPeakTotal)
        },
    },
    FallbackStep {
        kind: ShapeKind::OnsetComeupTotal,
        build: |d, h, w| OnsetComeupTotalTimeline::new(d, h, w).map(TimelineShape::OnsetComeupTotal),
    },
    FallbackStep {
        kind: ShapeKind::OnsetTotal,
        build: |d, h, w| OnsetTotalTimeline::new(d, h, w).map(TimelineShape::OnsetTotal),
    },
    FallbackStep {
        kind: ShapeKind::Total,
        build: |d, h, w| TotalTimeline::new(d, h, w).map(TimelineShape::Total),
    },
    FallbackStep {
        kind: ShapeKind::OnsetComeupPeak,
        build: |d, h, w| OnsetComeupPeakTimeline::new(d, h, w).map(TimelineShape::OnsetComeupPeak),
    },
    FallbackStep {
        kind: ShapeKind::OnsetComeup,
        build: |d, h, w| OnsetComeupTimeline::new(d, h, w).map(TimelineShape::OnsetComeup),
    },
    FallbackStep {
        kind: ShapeKind::Onset,
        build: |d, h, w| OnsetTimeline::new(d, h, w).map(TimelineShape::Onset),
    },
    FallbackStep {
        kind: ShapeKind::NoTimeline,
        build: |_, _, _| Some(TimelineShape::NoTimeline(NoTimeline)),
    },
];

/// Pick one shape for an ingestion. Missing data is the common case, not
/// an error: a fully absent profile yields the point-marker shape.
pub fn select_shape(duration: Option<&RoaDuration>, height: f64, weight: f64) -> TimelineShape {
    let Some(d) = duration else {
        return TimelineShape::NoTimeline(NoTimeline);
    };
    for step in &FALLBACK_CHAIN {
        if let Some(shape) = (step.build)(d, height, weight) {
            return shape;
        }
    }
    // The chain ends with NoTimeline, which always constructs.
    unreachable!("fallback chain is total")
}

#[cfg(test)]
mod tests {
    use super::super::shapes::test_support::full_profile;
    use super::*;

    fn kind_of(d: &RoaDuration) -> ShapeKind {
        select_shape(Some(d), 1.0, 0.5).kind()
    }

    fn richness(kind: ShapeKind) -> usize {
        FALLBACK_CHAIN.iter().position(|s| s.kind == kind).unwrap()
    }

    #[test]
    fn chain_is_in_richness_order() {
        let kinds: Vec<ShapeKind> = FALLBACK_CHAIN.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![
            ShapeKind::Full,
            ShapeKind::OnsetComeupPeakTotal,
            ShapeKind::OnsetComeupTotal,
            ShapeKind::OnsetTotal,
            ShapeKind::Total,
            ShapeKind::OnsetComeupPeak,
            ShapeKind::OnsetComeup,
            ShapeKind::Onset,
            ShapeKind::NoTimeline,
        ]);
    }

    #[test]
    fn complete_profile_always_yields_full() {
        assert_eq!(kind_of(&full_profile()), ShapeKind::Full);
    }

    #[test]
    fn each_subset_selects_its_variant() {
        let full = full_profile();
        let d = RoaDuration { offset: None, ..full.clone() };
        assert_eq!(kind_of(&d), ShapeKind::OnsetComeupPeakTotal);

        let d = RoaDuration { offset: None, peak: None, ..full.clone() };
        assert_eq!(kind_of(&d), ShapeKind::OnsetComeupTotal);

        let d = RoaDuration {
            onset: full.onset.clone(),
            total: full.total.clone(),
            ..Default::default()
        };
        assert_eq!(kind_of(&d), ShapeKind::OnsetTotal);

        let d = RoaDuration { total: full.total.clone(), ..Default::default() };
        assert_eq!(kind_of(&d), ShapeKind::Total);

        let d = RoaDuration { offset: None, total: None, afterglow: None, ..full.clone() };
        assert_eq!(kind_of(&d), ShapeKind::OnsetComeupPeak);

        let d = RoaDuration {
            onset: full.onset.clone(),
            comeup: full.comeup.clone(),
            ..Default::default()
        };
        assert_eq!(kind_of(&d), ShapeKind::OnsetComeup);

        let d = RoaDuration { onset: full.onset.clone(), ..Default::default() };
        assert_eq!(kind_of(&d), ShapeKind::Onset);

        assert_eq!(kind_of(&RoaDuration::default()), ShapeKind::NoTimeline);
        assert_eq!(select_shape(None, 1.0, 0.5).kind(), ShapeKind::NoTimeline);
    }

    #[test]
    fn orphan_phases_degrade_to_marker() {
        // Peak and offset without onset/comeup/total satisfy no variant.
        let full = full_profile();
        let d = RoaDuration {
            peak: full.peak.clone(),
            offset: full.offset.clone(),
            ..Default::default()
        };
        assert_eq!(kind_of(&d), ShapeKind::NoTimeline);
    }

    #[test]
    fn adding_phases_never_degrades_selection() {
        let full = full_profile();
        // OnsetComeupTotal profile...
        let base = RoaDuration { offset: None, peak: None, ..full.clone() };
        let base_rank = richness(kind_of(&base));

        // ...plus peak must move up the chain, never down.
        let with_peak = RoaDuration { peak: full.peak.clone(), ..base.clone() };
        assert_eq!(kind_of(&with_peak), ShapeKind::OnsetComeupPeakTotal);
        assert!(richness(kind_of(&with_peak)) <= base_rank);

        // ...plus peak and offset reaches Full.
        let with_both = RoaDuration {
            peak: full.peak.clone(),
            offset: full.offset.clone(),
            ..base
        };
        assert_eq!(kind_of(&with_both), ShapeKind::Full);
    }
}
