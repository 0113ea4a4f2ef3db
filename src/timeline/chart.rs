//! Chart assembly: the single synchronous entry point.
//!
//! One call per render pass turns ingestion records plus reference data
//! into everything a renderer needs: per-substance draw calls, axis
//! gridlines and the total pixel width. The computation is pure and
//! deterministic; upstream data changes simply trigger a fresh call.

use chrono::{DateTime, Utc};
use log::debug;

use crate::config::ChartStyle;
use crate::journal::Ingestion;
use crate::reference::SubstanceIndex;
use crate::timeline::axis::{AxisGridline, hour_gridlines};
use crate::timeline::group::{IngestionPoint, RawGroup, normalize};
use crate::timeline::path::DrawCall;

/// One substance's composed drawable.
#[derive(Clone, Debug)]
pub struct ChartGroup {
    pub substance_name: String,
    pub calls: Vec<DrawCall>,
    /// At least two of this substance's peak windows intersect.
    pub overlapping_peaks: bool,
}

/// Everything one render pass needs. Immutable once produced.
#[derive(Clone, Debug, Default)]
pub struct ChartDrawInstructions {
    pub groups: Vec<ChartGroup>,
    pub gridlines: Vec<AxisGridline>,
    /// Chart time origin (earliest ingestion), absent for empty charts.
    pub start_time: Option<DateTime<Utc>>,
    /// Furthest extent across all groups, seconds.
    pub total_seconds: f64,
    pub total_width_px: f64,
}

/// Build the full chart model for one set of ingestions.
///
/// Heights are resolved in two passes: groups are built with raw
/// dose-derived heights first, then scaled by the chart-wide maximum
/// (or per group when `independent_heights` is set) before any draw
/// call is emitted.
pub fn build_chart_model(
    ingestions: &[Ingestion],
    reference: &SubstanceIndex,
    pixels_per_second: f64,
    independent_heights: bool,
    style: &ChartStyle,
) -> ChartDrawInstructions {
    let Some(origin) = ingestions.iter().map(|i| i.time).min() else {
        return ChartDrawInstructions::default();
    };

    // Group by substance/route pair, preserving first-seen order for
    // stable output. Duration profiles are keyed per pair, so the same
    // substance taken two ways charts as two groups with their own timing.
    let mut order: Vec<(String, String)> = Vec::new();
    let mut by_pair: Vec<(String, Vec<&Ingestion>)> = Vec::new();
    for ing in ingestions {
        let key = (
            ing.substance_name.trim().to_ascii_lowercase(),
            ing.route.trim().to_ascii_lowercase(),
        );
        match order.iter().position(|k| *k == key) {
            Some(idx) => by_pair[idx].1.push(ing),
            None => {
                order.push(key);
                by_pair.push((ing.substance_name.clone(), vec![ing]));
            }
        }
    }

    // Pass one: unnormalized groups.
    let raw_groups: Vec<RawGroup> = by_pair
        .into_iter()
        .map(|(display_name, ings)| {
            let route = &ings[0].route;
            let points: Vec<IngestionPoint> = ings
                .iter()
                .map(|ing| {
                    let intensity =
                        reference.dose_classification(&ing.substance_name, &ing.route, ing.dose);
                    IngestionPoint {
                        start_seconds: (ing.time - origin).num_seconds() as f64,
                        height: intensity,
                        weight: intensity,
                        is_estimate: ing.is_estimate,
                    }
                })
                .collect();
            let duration = reference.duration_profile(&display_name, route);
            RawGroup::build(display_name, duration, points)
        })
        .collect();

    // Pass two: scale by the chart-wide (or per-group) maximum.
    let groups = normalize(raw_groups, independent_heights);

    let total_seconds = groups.iter().map(|g| g.end_seconds).fold(0.0, f64::max);
    let gridlines = hour_gridlines(
        origin,
        total_seconds,
        pixels_per_second,
        style.min_gridline_spacing_px,
    );

    let chart_groups: Vec<ChartGroup> = groups
        .into_iter()
        .map(|g| ChartGroup {
            calls: g.draw_calls(pixels_per_second, style.smoothness),
            substance_name: g.substance_name,
            overlapping_peaks: g.overlapping_peaks,
        })
        .collect();

    debug!(
        "chart model: {} groups, {:.0}s window, {} gridlines",
        chart_groups.len(),
        total_seconds,
        gridlines.len()
    );

    ChartDrawInstructions {
        groups: chart_groups,
        gridlines,
        start_time: Some(origin),
        total_seconds,
        total_width_px: total_seconds * pixels_per_second,
    }
}
