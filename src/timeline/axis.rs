//! Horizontal time axis: human-readable hour gridlines.
//!
//! Stateless and recomputed per render. Picks the smallest whole-hour
//! step whose pixel spacing clears the configured minimum, then walks
//! every on-the-hour instant from the first full hour at or after the
//! chart start through the end of the window.

use chrono::{DateTime, DurationRound, TimeDelta, TimeZone};

/// One vertical gridline with its clock label.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisGridline {
    /// Pixel offset from the chart's left edge.
    pub x_px: f64,
    /// Clock-face label, e.g. "21:00".
    pub label: String,
}

/// Smallest integer hour step that keeps gridlines at least
/// `min_spacing_px` apart at the given zoom.
pub fn hour_step(pixels_per_second: f64, min_spacing_px: f64) -> i64 {
    let px_per_hour = 3600.0 * pixels_per_second;
    if px_per_hour <= 0.0 {
        return 1;
    }
    (min_spacing_px / px_per_hour).ceil().max(1.0) as i64
}

/// Enumerate hour gridlines across `[start, start + total_seconds]`.
pub fn hour_gridlines<Tz: TimeZone>(
    start: DateTime<Tz>,
    total_seconds: f64,
    pixels_per_second: f64,
    min_spacing_px: f64,
) -> Vec<AxisGridline>
where
    Tz::Offset: std::fmt::Display,
{
    let step = hour_step(pixels_per_second, min_spacing_px);

    let Ok(mut t) = start.clone().duration_trunc(TimeDelta::hours(1)) else {
        return Vec::new();
    };
    if t < start {
        t += TimeDelta::hours(1);
    }

    let mut lines = Vec::new();
    loop {
        let offset = (t.clone() - start.clone()).num_seconds() as f64;
        if offset > total_seconds {
            break;
        }
        lines.push(AxisGridline {
            x_px: offset * pixels_per_second,
            label: t.format("%H:%M").to_string(),
        });
        t += TimeDelta::hours(step);
    }
    lines
}
