//! Bundled substance reference dataset.
//!
//! Deserializes the substances JSON into an indexed, validated form:
//! per substance, per route of administration, an optional six-phase
//! duration profile plus optional dose bands. Malformed units inside an
//! otherwise valid file collapse the affected range to absence and log a
//! warning; they never fail the load.

use log::{info, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::duration::{DurationRange, RoaDuration, TimeUnit};

/// File-level load failure (IO or JSON). Everything below file level is
/// modeled as absence, not error.
#[derive(Debug)]
pub enum ReferenceError {
    Io(String),
    Json(String),
}

impl std::fmt::Display for ReferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceError::Io(e) => write!(f, "reference IO error: {}", e),
            ReferenceError::Json(e) => write!(f, "reference JSON error: {}", e),
        }
    }
}

impl std::error::Error for ReferenceError {}

// ===== Raw serde schema (matches the bundled JSON) =====

#[derive(Deserialize)]
struct RawFile {
    substances: Vec<RawSubstance>,
}

#[derive(Deserialize)]
struct RawSubstance {
    name: String,
    #[serde(default)]
    roas: Vec<RawRoa>,
}

#[derive(Deserialize)]
struct RawRoa {
    name: String,
    duration: Option<RawDuration>,
    dose: Option<RawDose>,
}

#[derive(Deserialize, Default)]
struct RawDuration {
    onset: Option<RawRange>,
    comeup: Option<RawRange>,
    peak: Option<RawRange>,
    offset: Option<RawRange>,
    total: Option<RawRange>,
    afterglow: Option<RawRange>,
}

#[derive(Deserialize)]
struct RawRange {
    min: Option<f64>,
    max: Option<f64>,
    units: String,
}

#[derive(Deserialize)]
struct RawDose {
    #[serde(default)]
    units: Option<String>,
    threshold: Option<f64>,
    light: Option<RawBounds>,
    common: Option<RawBounds>,
    strong: Option<RawBounds>,
    heavy: Option<f64>,
}

#[derive(Deserialize)]
struct RawBounds {
    min: Option<f64>,
    max: Option<f64>,
}

// ===== Validated model =====

/// Dose bands for one substance/route pair.
///
/// Bands map to relative chart heights: threshold 0.2, light 0.4,
/// common 0.6, strong 0.8, heavy 1.0, linear inside each band.
#[derive(Clone, Debug, Default)]
pub struct RoaDose {
    pub units: Option<String>,
    pub threshold: Option<f64>,
    pub light_max: Option<f64>,
    pub common_max: Option<f64>,
    pub strong_max: Option<f64>,
    pub heavy: Option<f64>,
}

/// Floor below which a classified dose still renders visibly.
const MIN_RELATIVE_HEIGHT: f64 = 0.05;

impl RoaDose {
    /// Map a dose onto a 0..1 relative intensity from its band position.
    ///
    /// Band ceilings are 0.2/0.4/0.6/0.8/1.0 in reference order; the dose
    /// interpolates linearly inside the band that contains it. Doses past
    /// the heavy bound saturate at 1.0.
    pub fn relative_height(&self, dose: f64) -> f64 {
        let edges: Vec<(f64, f64)> = [
            (self.threshold, 0.2),
            (self.light_max, 0.4),
            (self.common_max, 0.6),
            (self.strong_max, 0.8),
            (self.heavy, 1.0),
        ]
        .into_iter()
        .filter_map(|(bound, ceiling)| bound.map(|b| (b, ceiling)))
        .collect();

        if edges.is_empty() {
            return 1.0;
        }

        let mut prev_dose = 0.0;
        let mut prev_height = 0.0;
        for (edge_dose, ceiling) in edges {
            if edge_dose <= prev_dose {
                // Degenerate or out-of-order reference bounds, skip.
                prev_height = ceiling;
                continue;
            }
            if dose <= edge_dose {
                let t = (dose - prev_dose) / (edge_dose - prev_dose);
                let h = prev_height + t * (ceiling - prev_height);
                return h.clamp(MIN_RELATIVE_HEIGHT, 1.0);
            }
            prev_dose = edge_dose;
            prev_height = ceiling;
        }
        1.0
    }
}

/// One route of administration of one substance.
#[derive(Clone, Debug)]
pub struct SubstanceRoa {
    pub route: String,
    pub duration: Option<RoaDuration>,
    pub dose: Option<RoaDose>,
}

/// One reference substance with all its routes.
#[derive(Clone, Debug)]
pub struct SubstanceEntry {
    pub name: String,
    pub roas: Vec<SubstanceRoa>,
}

impl SubstanceEntry {
    fn roa(&self, route: &str) -> Option<&SubstanceRoa> {
        let route = normalize(route);
        self.roas.iter().find(|r| r.route == route)
    }
}

/// Indexed reference dataset; the lookup side of the chart core.
pub struct SubstanceIndex {
    by_name: HashMap<String, SubstanceEntry>,
}

impl SubstanceIndex {
    /// Empty index: every lookup degrades to absence.
    pub fn empty() -> Self {
        Self { by_name: HashMap::new() }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ReferenceError> {
        let raw: RawFile =
            serde_json::from_str(json).map_err(|e| ReferenceError::Json(e.to_string()))?;

        let mut by_name = HashMap::with_capacity(raw.substances.len());
        for sub in raw.substances {
            let roas = sub
                .roas
                .into_iter()
                .map(|roa| SubstanceRoa {
                    route: normalize(&roa.name),
                    duration: roa.duration.map(|d| convert_duration(&sub.name, d)),
                    dose: roa.dose.map(convert_dose),
                })
                .collect();
            by_name.insert(normalize(&sub.name), SubstanceEntry { name: sub.name, roas });
        }

        info!("Loaded reference dataset: {} substances", by_name.len());
        Ok(Self { by_name })
    }

    pub fn from_path(path: &Path) -> Result<Self, ReferenceError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ReferenceError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn substance(&self, name: &str) -> Option<&SubstanceEntry> {
        self.by_name.get(&normalize(name))
    }

    /// Six-phase duration profile for a substance/route pair, if the
    /// reference data carries one.
    pub fn duration_profile(&self, substance: &str, route: &str) -> Option<&RoaDuration> {
        self.substance(substance)?.roa(route)?.duration.as_ref()
    }

    /// Relative intensity (0..1) for a dose, from its band position.
    /// Missing dose or missing reference bands render full-strength.
    pub fn dose_classification(&self, substance: &str, route: &str, dose: Option<f64>) -> f64 {
        let Some(dose) = dose else { return 1.0 };
        match self.substance(substance).and_then(|s| s.roa(route)).and_then(|r| r.dose.as_ref()) {
            Some(bands) => bands.relative_height(dose),
            None => 1.0,
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase()
}

/// Validate one raw range. Unknown unit strings or fully absent bounds
/// collapse the range to `None`.
fn convert_range(substance: &str, phase: &str, raw: RawRange) -> Option<DurationRange> {
    let Some(unit) = TimeUnit::parse(&raw.units) else {
        warn!(
            "{}: dropping {} range with unrecognized unit '{}'",
            substance, phase, raw.units
        );
        return None;
    };
    DurationRange::new(raw.min, raw.max, unit)
}

fn convert_duration(substance: &str, raw: RawDuration) -> RoaDuration {
    RoaDuration {
        onset: raw.onset.and_then(|r| convert_range(substance, "onset", r)),
        comeup: raw.comeup.and_then(|r| convert_range(substance, "comeup", r)),
        peak: raw.peak.and_then(|r| convert_range(substance, "peak", r)),
        offset: raw.offset.and_then(|r| convert_range(substance, "offset", r)),
        total: raw.total.and_then(|r| convert_range(substance, "total", r)),
        afterglow: raw.afterglow.and_then(|r| convert_range(substance, "afterglow", r)),
    }
}

fn convert_dose(raw: RawDose) -> RoaDose {
    RoaDose {
        units: raw.units,
        threshold: raw.threshold,
        light_max: raw.light.as_ref().and_then(|b| b.max.or(b.min)),
        common_max: raw.common.as_ref().and_then(|b| b.max.or(b.min)),
        strong_max: raw.strong.as_ref().and_then(|b| b.max.or(b.min)),
        heavy: raw.heavy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "substances": [
            {
                "name": "Examplamine",
                "roas": [
                    {
                        "name": "Oral",
                        "duration": {
                            "onset": {"min": 20, "max": 40, "units": "minutes"},
                            "comeup": {"min": 15, "max": 30, "units": "minutes"},
                            "peak": {"min": 1.5, "max": 2.5, "units": "hours"},
                            "offset": {"min": 1, "max": 1.5, "units": "hours"},
                            "total": {"min": 3, "max": 5, "units": "hours"},
                            "afterglow": {"min": 12, "max": 48, "units": "hours"}
                        },
                        "dose": {
                            "units": "mg",
                            "threshold": 10,
                            "light": {"min": 10, "max": 40},
                            "common": {"min": 40, "max": 90},
                            "strong": {"min": 90, "max": 150},
                            "heavy": 200
                        }
                    }
                ]
            },
            {
                "name": "Brokenium",
                "roas": [
                    {
                        "name": "Oral",
                        "duration": {
                            "onset": {"min": 5, "max": 10, "units": "lightyears"},
                            "total": {"min": 1, "max": 2, "units": "hours"}
                        }
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn loads_and_indexes() {
        let idx = SubstanceIndex::from_json_str(SAMPLE).unwrap();
        assert_eq!(idx.len(), 2);
        // Lookup is case/space-insensitive.
        let profile = idx.duration_profile("examplamine", "ORAL").unwrap();
        assert_eq!(profile.onset.as_ref().unwrap().min_seconds(), 1200.0);
        assert_eq!(profile.total.as_ref().unwrap().max_seconds(), 18000.0);
    }

    #[test]
    fn bad_unit_collapses_range_only() {
        let idx = SubstanceIndex::from_json_str(SAMPLE).unwrap();
        let profile = idx.duration_profile("Brokenium", "oral").unwrap();
        // The malformed onset is dropped; the valid total survives.
        assert!(profile.onset.is_none());
        assert!(profile.total.is_some());
    }

    #[test]
    fn missing_substance_is_absence() {
        let idx = SubstanceIndex::from_json_str(SAMPLE).unwrap();
        assert!(idx.duration_profile("Unobtainium", "oral").is_none());
        assert_eq!(idx.dose_classification("Unobtainium", "oral", Some(50.0)), 1.0);
    }

    #[test]
    fn dose_band_heights() {
        let idx = SubstanceIndex::from_json_str(SAMPLE).unwrap();
        // Band ceilings: 10mg -> 0.2, 40 -> 0.4, 90 -> 0.6, 150 -> 0.8, 200 -> 1.0.
        assert_eq!(idx.dose_classification("Examplamine", "oral", Some(10.0)), 0.2);
        assert_eq!(idx.dose_classification("Examplamine", "oral", Some(40.0)), 0.4);
        // Linear inside a band: midway between 40 and 90.
        let mid = idx.dose_classification("Examplamine", "oral", Some(65.0));
        assert!((mid - 0.5).abs() < 1e-9);
        // Past heavy saturates.
        assert_eq!(idx.dose_classification("Examplamine", "oral", Some(500.0)), 1.0);
        // Unknown dose renders full-strength.
        assert_eq!(idx.dose_classification("Examplamine", "oral", None), 1.0);
    }

    #[test]
    fn tiny_dose_keeps_visible_floor() {
        let idx = SubstanceIndex::from_json_str(SAMPLE).unwrap();
        let h = idx.dose_classification("Examplamine", "oral", Some(0.1));
        assert!(h >= 0.05);
    }
}
