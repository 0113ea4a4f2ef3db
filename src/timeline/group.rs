//! Overlap aggregation: one composed drawable per substance.
//!
//! All ingestions of one substance/route pair in the rendering window
//! form a group.
//! When the reference profile carries the full onset/comeup/peak/offset
//! set, the group is drawn as one shared envelope - the pointwise sum of
//! each ingestion's interpolated trapezoid - which models cumulative
//! redosing. Otherwise every ingestion gets its own shape from the same
//! step of the fallback chain, so one substance never mixes models.
//!
//! Heights are resolved in two explicit passes: `RawGroup::build` leaves
//! heights unnormalized, `normalize` scales every group by the chart-wide
//! maximum (or its own maximum in independent-heights mode). No shape is
//! drawable until the second pass has run.

use log::debug;

use crate::duration::RoaDuration;
use crate::timeline::path::{DrawCall, TimelinePath};
use crate::timeline::selector::FALLBACK_CHAIN;
use crate::timeline::shapes::{
    FullTimeline, NoTimeline, ShapeContext, TimelineDrawable, TimelineShape,
};

/// Per-ingestion chart parameters (WeightedIngestionPoint). Ephemeral,
/// rebuilt for every render pass.
#[derive(Clone, Copy, Debug)]
pub struct IngestionPoint {
    /// Offset from the chart's time origin, seconds.
    pub start_seconds: f64,
    /// Dose-derived relative intensity, 0..=1, unnormalized.
    pub height: f64,
    /// Where within uncertain intervals the representative instant falls.
    pub weight: f64,
    /// Dose was a guess; markers render hollow.
    pub is_estimate: bool,
}

/// Shared-envelope model: the pointwise sum of per-ingestion trapezoids.
///
/// Piecewise-linear curves sum exactly at the union of their breakpoints,
/// so the envelope is stored as a knot list with no sampling grid.
#[derive(Clone, Debug)]
pub struct GroupEnvelope {
    shapes: Vec<(IngestionPoint, FullTimeline)>,
    knots: Vec<(f64, f64)>,
}

impl GroupEnvelope {
    /// Requires the full onset/comeup/peak/offset set and at least one
    /// point; `None` otherwise (the caller falls back per point).
    pub fn build(duration: &RoaDuration, points: &[IngestionPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let shapes: Vec<(IngestionPoint, FullTimeline)> = points
            .iter()
            .map(|pt| FullTimeline::new(duration, pt.height, pt.weight).map(|s| (*pt, s)))
            .collect::<Option<_>>()?;

        let curves: Vec<[(f64, f64); 5]> = shapes
            .iter()
            .map(|(pt, s)| s.trapezoid_knots(pt.start_seconds))
            .collect();
        Some(Self { knots: sum_piecewise(&curves), shapes })
    }

    pub fn knots(&self) -> &[(f64, f64)] {
        &self.knots
    }

    fn raw_height(&self) -> f64 {
        self.knots.iter().map(|&(_, h)| h).fold(0.0, f64::max)
    }

    fn end_seconds(&self) -> f64 {
        self.shapes
            .iter()
            .map(|(pt, s)| pt.start_seconds + s.width_seconds())
            .fold(0.0, f64::max)
    }
}

/// Evaluate a piecewise-linear curve at `t`; zero outside its span.
fn eval_polyline(knots: &[(f64, f64)], t: f64) -> f64 {
    let first = knots.first().copied().unwrap_or((0.0, 0.0));
    let last = knots.last().copied().unwrap_or((0.0, 0.0));
    if t <= first.0 || t >= last.0 {
        // Trapezoids start and end on the baseline.
        return 0.0;
    }
    for pair in knots.windows(2) {
        let (t0, h0) = pair[0];
        let (t1, h1) = pair[1];
        if t >= t0 && t <= t1 {
            if t1 == t0 {
                return h0.max(h1);
            }
            return h0 + (h1 - h0) * (t - t0) / (t1 - t0);
        }
    }
    0.0
}

/// Sum several piecewise-linear curves at the union of their breakpoints.
fn sum_piecewise(curves: &[[(f64, f64); 5]]) -> Vec<(f64, f64)> {
    let mut xs: Vec<f64> = curves.iter().flatten().map(|&(t, _)| t).collect();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    xs.dedup();
    xs.into_iter()
        .map(|t| (t, curves.iter().map(|c| eval_polyline(c, t)).sum()))
        .collect()
}

/// How a group's ingestions are composed.
#[derive(Clone, Debug)]
pub enum GroupModel {
    /// One shared summed envelope plus per-point uncertainty bands.
    Envelope(GroupEnvelope),
    /// One shape per point, all from the same fallback-chain step.
    PerPoint(Vec<(IngestionPoint, TimelineShape)>),
}

/// First normalization pass output: heights still unnormalized.
#[derive(Clone, Debug)]
pub struct RawGroup {
    pub substance_name: String,
    pub model: GroupModel,
    /// Tallest unnormalized point of the whole group.
    pub raw_height: f64,
    /// Furthest-right extent in seconds (endOfLine).
    pub end_seconds: f64,
    /// Whether any two ingestions' peak windows intersect.
    pub overlapping_peaks: bool,
}

impl RawGroup {
    /// Compose all of one substance/route pair's points into a group.
    pub fn build(
        substance_name: String,
        duration: Option<&RoaDuration>,
        points: Vec<IngestionPoint>,
    ) -> Self {
        let model = match duration {
            Some(d) => match GroupEnvelope::build(d, &points) {
                Some(envelope) => GroupModel::Envelope(envelope),
                None => per_point_model(d, &points),
            },
            None => GroupModel::PerPoint(
                points
                    .iter()
                    .map(|pt| (*pt, TimelineShape::NoTimeline(NoTimeline)))
                    .collect(),
            ),
        };

        let (raw_height, end_seconds) = match &model {
            GroupModel::Envelope(env) => (env.raw_height(), env.end_seconds()),
            GroupModel::PerPoint(shapes) => (
                shapes.iter().map(|(_, s)| s.raw_height()).fold(0.0, f64::max),
                shapes
                    .iter()
                    .map(|(pt, s)| pt.start_seconds + s.width_seconds())
                    .fold(0.0, f64::max),
            ),
        };

        let overlapping_peaks = peaks_coincide(&model);
        Self { substance_name, model, raw_height, end_seconds, overlapping_peaks }
    }
}

/// Per-point fallback: probe the chain below Full uniformly across the
/// whole set, so every dose of one substance renders with the same model.
/// (Full is probed by the envelope path; with one shared profile it can
/// never succeed per point after failing there.)
fn per_point_model(duration: &RoaDuration, points: &[IngestionPoint]) -> GroupModel {
    for step in &FALLBACK_CHAIN[1..] {
        let shapes: Option<Vec<(IngestionPoint, TimelineShape)>> = points
            .iter()
            .map(|pt| (step.build)(duration, pt.height, pt.weight).map(|s| (*pt, s)))
            .collect();
        if let Some(shapes) = shapes {
            return GroupModel::PerPoint(shapes);
        }
    }
    unreachable!("fallback chain is total")
}

/// Time-window containment test over the group's peak plateaus.
fn peaks_coincide(model: &GroupModel) -> bool {
    let windows: Vec<(f64, f64)> = match model {
        GroupModel::Envelope(env) => env
            .shapes
            .iter()
            .filter_map(|(pt, s)| s.peak_window(pt.start_seconds))
            .collect(),
        GroupModel::PerPoint(shapes) => shapes
            .iter()
            .filter_map(|(pt, s)| s.peak_window(pt.start_seconds))
            .collect(),
    };
    for (i, a) in windows.iter().enumerate() {
        for b in &windows[i + 1..] {
            if a.0 <= b.1 && b.0 <= a.1 {
                return true;
            }
        }
    }
    false
}

/// Second normalization pass output: carries the final height scale.
#[derive(Clone, Debug)]
pub struct NormalizedGroup {
    pub substance_name: String,
    pub model: GroupModel,
    pub raw_height: f64,
    /// Multiplier applied to every raw height at draw time.
    pub height_scale: f64,
    pub end_seconds: f64,
    pub overlapping_peaks: bool,
}

/// Scale all groups so the tallest curve in the chart spans full height.
/// In independent mode each group is scaled by its own maximum instead.
/// Pure: re-running over the same raw input yields the same result.
pub fn normalize(groups: Vec<RawGroup>, independent_heights: bool) -> Vec<NormalizedGroup> {
    let global_max = groups.iter().map(|g| g.raw_height).fold(0.0, f64::max);
    debug!(
        "normalizing {} groups, chart max {:.3}, independent={}",
        groups.len(),
        global_max,
        independent_heights
    );
    groups
        .into_iter()
        .map(|g| {
            let divisor = if independent_heights { g.raw_height } else { global_max };
            let height_scale = if divisor > 0.0 { 1.0 / divisor } else { 1.0 };
            NormalizedGroup {
                substance_name: g.substance_name,
                model: g.model,
                raw_height: g.raw_height,
                height_scale,
                end_seconds: g.end_seconds,
                overlapping_peaks: g.overlapping_peaks,
            }
        })
        .collect()
}

impl NormalizedGroup {
    /// Emit this group's draw calls: uncertainty bands first, strokes on
    /// top, one marker per ingestion.
    pub fn draw_calls(&self, pixels_per_second: f64, smoothness: f64) -> Vec<DrawCall> {
        let mut calls = Vec::new();
        let ctx_for = |pt: &IngestionPoint| ShapeContext {
            start_seconds: pt.start_seconds,
            pixels_per_second,
            height_scale: self.height_scale,
            smoothness,
        };

        match &self.model {
            GroupModel::Envelope(env) => {
                for (pt, shape) in &env.shapes {
                    if let Some(band) = shape.band_path(&ctx_for(pt)) {
                        calls.push(DrawCall::Band(band));
                    }
                }
                let mut stroke = TimelinePath::new();
                for (i, &(t, h)) in env.knots().iter().enumerate() {
                    let (x, y) = (t * pixels_per_second, h * self.height_scale);
                    if i == 0 {
                        stroke.move_to(x, y);
                    } else {
                        stroke.line_to(x, y);
                    }
                }
                calls.push(DrawCall::Stroke(stroke));
                for (pt, _) in &env.shapes {
                    calls.push(DrawCall::Marker {
                        x: pt.start_seconds * pixels_per_second,
                        hollow: pt.is_estimate,
                    });
                }
            }
            GroupModel::PerPoint(shapes) => {
                for (pt, shape) in shapes {
                    if let Some(band) = shape.band_path(&ctx_for(pt)) {
                        calls.push(DrawCall::Band(band));
                    }
                }
                for (pt, shape) in shapes {
                    if let Some(stroke) = shape.stroke_path(&ctx_for(pt)) {
                        calls.push(DrawCall::Stroke(stroke));
                    }
                    calls.push(DrawCall::Marker {
                        x: pt.start_seconds * pixels_per_second,
                        hollow: pt.is_estimate,
                    });
                }
            }
        }
        calls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::{DurationRange, TimeUnit};

    /// Exact-bound profile so envelope sums are deterministic:
    /// onset 30m, comeup 30m, peak 2h, offset 1h.
    fn exact_profile() -> RoaDuration {
        RoaDuration {
            onset: Some(DurationRange::exact(30.0, 30.0, TimeUnit::Minutes)),
            comeup: Some(DurationRange::exact(30.0, 30.0, TimeUnit::Minutes)),
            peak: Some(DurationRange::exact(2.0, 2.0, TimeUnit::Hours)),
            offset: Some(DurationRange::exact(1.0, 1.0, TimeUnit::Hours)),
            ..Default::default()
        }
    }

    fn point(start_seconds: f64, height: f64) -> IngestionPoint {
        IngestionPoint { start_seconds, height, weight: 0.5, is_estimate: false }
    }

    #[test]
    fn overlapping_plateaus_sum() {
        // Second dose one hour after the first; plateaus overlap over
        // 7200..10800s, where the summed curve reaches 2.0.
        let g = RawGroup::build(
            "x".into(),
            Some(&exact_profile()),
            vec![point(0.0, 1.0), point(3600.0, 1.0)],
        );
        assert!(matches!(g.model, GroupModel::Envelope(_)));
        assert_eq!(g.raw_height, 2.0);
        assert!(g.overlapping_peaks);

        let GroupModel::Envelope(env) = &g.model else { unreachable!() };
        assert_eq!(eval_polyline(env.knots(), 7200.0), 2.0);
        assert_eq!(eval_polyline(env.knots(), 10800.0), 2.0);
        // Only the first dose is active here.
        assert_eq!(eval_polyline(env.knots(), 3600.0), 1.0);
        // First dose back at baseline while the second still plateaus.
        assert_eq!(eval_polyline(env.knots(), 14400.0), 1.0);
    }

    #[test]
    fn disjoint_plateaus_do_not_sum() {
        // Four hours apart: the first dose is back at baseline before the
        // second plateaus, so the group never exceeds a single height.
        let g = RawGroup::build(
            "x".into(),
            Some(&exact_profile()),
            vec![point(0.0, 1.0), point(14400.0, 1.0)],
        );
        assert_eq!(g.raw_height, 1.0);
        assert!(!g.overlapping_peaks);
        // endOfLine: second start + full width (30m+30m+2h+1h = 14400s).
        assert_eq!(g.end_seconds, 28800.0);
    }

    #[test]
    fn single_point_group_matches_general_case() {
        let g = RawGroup::build("x".into(), Some(&exact_profile()), vec![point(0.0, 0.7)]);
        assert_eq!(g.raw_height, 0.7);
        assert_eq!(g.end_seconds, 14400.0);
    }

    #[test]
    fn uniform_fallback_across_points() {
        // Total-only profile: every point must get a Total shape.
        let d = RoaDuration {
            total: Some(DurationRange::exact(3.0, 5.0, TimeUnit::Hours)),
            ..Default::default()
        };
        let g = RawGroup::build("x".into(), Some(&d), vec![point(0.0, 1.0), point(600.0, 0.4)]);
        let GroupModel::PerPoint(shapes) = &g.model else {
            panic!("expected per-point fallback")
        };
        assert_eq!(shapes.len(), 2);
        for (_, s) in shapes {
            assert_eq!(s.kind(), crate::timeline::shapes::ShapeKind::Total);
        }
        assert_eq!(g.raw_height, 1.0);
        assert_eq!(g.end_seconds, 600.0 + 18000.0);
    }

    #[test]
    fn missing_profile_degrades_to_markers() {
        let g = RawGroup::build("x".into(), None, vec![point(0.0, 1.0)]);
        let GroupModel::PerPoint(shapes) = &g.model else { unreachable!() };
        assert_eq!(shapes[0].1.kind(), crate::timeline::shapes::ShapeKind::NoTimeline);
        assert_eq!(g.raw_height, 0.0);
        assert_eq!(g.end_seconds, 0.0);

        let groups = normalize(vec![g], false);
        let calls = groups[0].draw_calls(1.0, 0.5);
        assert_eq!(calls.len(), 1);
        assert!(matches!(calls[0], DrawCall::Marker { x, .. } if x == 0.0));
    }

    #[test]
    fn chart_wide_normalization() {
        let tall = RawGroup::build(
            "tall".into(),
            Some(&exact_profile()),
            vec![point(0.0, 1.0), point(3600.0, 1.0)],
        );
        let short = RawGroup::build("short".into(), Some(&exact_profile()), vec![point(0.0, 0.5)]);

        let groups = normalize(vec![tall.clone(), short.clone()], false);
        // Tallest group (raw 2.0) defines full scale.
        assert_eq!(groups[0].height_scale, 0.5);
        assert_eq!(groups[0].raw_height * groups[0].height_scale, 1.0);
        assert_eq!(groups[1].raw_height * groups[1].height_scale, 0.25);

        // Independent mode scales each group to its own maximum.
        let groups = normalize(vec![tall, short], true);
        assert_eq!(groups[0].raw_height * groups[0].height_scale, 1.0);
        assert_eq!(groups[1].raw_height * groups[1].height_scale, 1.0);
    }

    #[test]
    fn normalization_is_idempotent() {
        let a = RawGroup::build("a".into(), Some(&exact_profile()), vec![point(0.0, 0.8)]);
        let b = RawGroup::build("b".into(), Some(&exact_profile()), vec![point(0.0, 0.4)]);

        let once = normalize(vec![a.clone(), b.clone()], false);
        let twice = normalize(vec![a, b], false);
        for (x, y) in once.iter().zip(&twice) {
            assert_eq!(x.height_scale, y.height_scale);
        }
        // Feeding already-normalized heights back through yields scale 1
        // for the tallest and preserves every final height.
        let renorm_input: Vec<RawGroup> = once
            .iter()
            .map(|g| RawGroup {
                substance_name: g.substance_name.clone(),
                model: g.model.clone(),
                raw_height: g.raw_height * g.height_scale,
                end_seconds: g.end_seconds,
                overlapping_peaks: g.overlapping_peaks,
            })
            .collect();
        let renorm = normalize(renorm_input, false);
        for (x, y) in once.iter().zip(&renorm) {
            assert_eq!(
                x.raw_height * x.height_scale,
                y.raw_height * y.height_scale
            );
        }
    }

    #[test]
    fn zero_height_chart_keeps_unit_scale() {
        let g = RawGroup::build("x".into(), None, vec![point(0.0, 1.0)]);
        let groups = normalize(vec![g], false);
        assert_eq!(groups[0].height_scale, 1.0);
    }

    #[test]
    fn envelope_draw_order_bands_then_stroke() {
        let g = RawGroup::build(
            "x".into(),
            Some(&exact_profile()),
            vec![point(0.0, 1.0), point(3600.0, 1.0)],
        );
        let g = normalize(vec![g], false).remove(0);
        let calls = g.draw_calls(0.01, 0.5);
        assert!(matches!(calls[0], DrawCall::Band(_)));
        assert!(matches!(calls[1], DrawCall::Band(_)));
        assert!(matches!(calls[2], DrawCall::Stroke(_)));
        assert!(matches!(calls[3], DrawCall::Marker { .. }));
        assert!(matches!(calls[4], DrawCall::Marker { .. }));
    }
}
