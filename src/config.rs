//! Crate-wide defaults and the chart style parameter.
//!
//! Style travels as an explicit value into the chart build and the widget;
//! there are no global style singletons.

/// Stroke width of the expected-effects line, px.
pub const DEFAULT_STROKE_WIDTH: f32 = 3.0;
/// Alpha applied to the uncertainty band fill.
pub const DEFAULT_BAND_ALPHA: f32 = 0.25;
/// Radius of ingestion point markers, px.
pub const DEFAULT_MARKER_RADIUS: f32 = 4.0;
/// Fraction of a smoothed segment given to the quadratic blend.
pub const DEFAULT_SMOOTHNESS: f64 = 0.5;
/// Minimum pixel spacing between hour gridlines.
pub const MIN_GRIDLINE_SPACING_PX: f64 = 70.0;
/// Default horizontal zoom for the demo app.
pub const DEFAULT_PIXELS_PER_HOUR: f64 = 72.0;

/// Rendering knobs consumed by the chart build and the egui widget.
#[derive(Clone, Debug)]
pub struct ChartStyle {
    pub stroke_width: f32,
    pub band_alpha: f32,
    pub marker_radius: f32,
    /// 0..1 blend fraction for smoothed (quadratic) rises and falls.
    pub smoothness: f64,
    pub min_gridline_spacing_px: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH,
            band_alpha: DEFAULT_BAND_ALPHA,
            marker_radius: DEFAULT_MARKER_RADIUS,
            smoothness: DEFAULT_SMOOTHNESS,
            min_gridline_spacing_px: MIN_GRIDLINE_SPACING_PX,
        }
    }
}
