//! Duration reference model: uncertain phase intervals and unit math.
//!
//! A `DurationRange` is an interval with optional bounds in one physical
//! time unit. A `RoaDuration` is the six-phase profile (onset, comeup,
//! peak, offset, total, afterglow) for one substance/route pair - every
//! phase independently optional, because the source reference data rarely
//! reports all six.

/// Physical time unit of a reference interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Seconds-per-unit conversion factor.
    pub fn in_seconds(self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Hours => 3600.0,
            TimeUnit::Days => 86400.0,
        }
    }

    /// Parse a reference-data unit string. Unknown strings yield `None`;
    /// the caller drops the whole range (reference-data validation, not a
    /// runtime error).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "sec" | "secs" | "second" | "seconds" => Some(TimeUnit::Seconds),
            "m" | "min" | "mins" | "minute" | "minutes" => Some(TimeUnit::Minutes),
            "h" | "hr" | "hrs" | "hour" | "hours" => Some(TimeUnit::Hours),
            "d" | "day" | "days" => Some(TimeUnit::Days),
            _ => None,
        }
    }

    /// Short suffix for display text.
    pub fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "m",
            TimeUnit::Hours => "h",
            TimeUnit::Days => "d",
        }
    }
}

/// Uncertain interval in one physical unit.
///
/// A missing bound is treated as equal to the present bound, so a
/// single-sided range behaves as a zero-width interval. Construction
/// guarantees at least one bound is present.
#[derive(Clone, Debug, PartialEq)]
pub struct DurationRange {
    min: Option<f64>,
    max: Option<f64>,
    unit: TimeUnit,
}

impl DurationRange {
    /// Build a range; `None` when both bounds are absent.
    pub fn new(min: Option<f64>, max: Option<f64>, unit: TimeUnit) -> Option<Self> {
        if min.is_none() && max.is_none() {
            return None;
        }
        Some(Self { min, max, unit })
    }

    /// Exact range helper (both bounds known).
    pub fn exact(min: f64, max: f64, unit: TimeUnit) -> Self {
        Self { min: Some(min), max: Some(max), unit }
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Lower bound in seconds. Falls back to the upper bound when absent.
    pub fn min_seconds(&self) -> f64 {
        let v = self.min.or(self.max).unwrap_or(0.0);
        v * self.unit.in_seconds()
    }

    /// Upper bound in seconds. Falls back to the lower bound when absent.
    pub fn max_seconds(&self) -> f64 {
        let v = self.max.or(self.min).unwrap_or(0.0);
        v * self.unit.in_seconds()
    }

    /// Linear interpolation between the bounds, in seconds.
    ///
    /// `weight` is assumed to be in 0..=1 (callers clamp, not checked
    /// here). Single-sided ranges return the present bound for any weight.
    pub fn interpolate(&self, weight: f64) -> f64 {
        let lo = self.min_seconds();
        let hi = self.max_seconds();
        lo + weight * (hi - lo)
    }

    /// Display text in the native unit: `"{min}-{max}{suffix}"`, no
    /// embedded whitespace. Single-sided ranges print the one bound.
    pub fn text(&self) -> String {
        match (self.min, self.max) {
            (Some(lo), Some(hi)) => format!("{}-{}{}", trim_num(lo), trim_num(hi), self.unit.suffix()),
            (Some(v), None) | (None, Some(v)) => format!("{}{}", trim_num(v), self.unit.suffix()),
            (None, None) => unreachable!("DurationRange::new rejects empty ranges"),
        }
    }
}

/// Format a number without a trailing ".0" for whole values.
fn trim_num(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

/// Six-phase duration profile for one substance/route pair (RoaDuration).
///
/// Owned by the reference dataset, read-only to the timeline core. Any
/// subset of phases may be present; shape selection degrades gracefully
/// over whatever is available.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoaDuration {
    pub onset: Option<DurationRange>,
    pub comeup: Option<DurationRange>,
    pub peak: Option<DurationRange>,
    pub offset: Option<DurationRange>,
    pub total: Option<DurationRange>,
    pub afterglow: Option<DurationRange>,
}

impl RoaDuration {
    /// True when no phase carries any data.
    pub fn is_empty(&self) -> bool {
        self.onset.is_none()
            && self.comeup.is_none()
            && self.peak.is_none()
            && self.offset.is_none()
            && self.total.is_none()
            && self.afterglow.is_none()
    }
}
