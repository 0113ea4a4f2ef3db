//! Abstract render target: path commands and draw calls.
//!
//! The timeline core never touches a concrete drawing surface. It emits
//! `TimelinePath` command lists in chart coordinates - x in pixels from
//! the chart's left edge (`seconds * pixels_per_second`), y in 0..=1 with
//! 0 at the baseline and 1 at full chart height. A renderer maps y onto
//! its own vertical extent and flips it into screen space.

/// One path command on the abstract 2D surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    /// Quadratic bezier to (x, y) via control point (cx, cy).
    QuadTo { cx: f64, cy: f64, x: f64, y: f64 },
    Close,
}

/// Ordered command list plus smoothing helpers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimelinePath {
    cmds: Vec<PathCmd>,
}

impl TimelinePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cmds(&self) -> &[PathCmd] {
        &self.cmds
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.cmds.push(PathCmd::MoveTo { x, y });
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.cmds.push(PathCmd::LineTo { x, y });
    }

    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.cmds.push(PathCmd::QuadTo { cx, cy, x, y });
    }

    pub fn close(&mut self) {
        self.cmds.push(PathCmd::Close);
    }

    /// Smoothed segment that leaves `start` tangentially (control point at
    /// the start height). Used where a curve departs a plateau.
    pub fn start_smooth_line_to(
        &mut self,
        smoothness: f64,
        start: (f64, f64),
        end: (f64, f64),
    ) {
        let cx = start.0 + (end.0 - start.0) * smoothness;
        self.quad_to(cx, start.1, end.0, end.1);
    }

    /// Smoothed segment that lands on `end` tangentially (control point at
    /// the end height). Used where a curve approaches a plateau.
    pub fn end_smooth_line_to(&mut self, smoothness: f64, start: (f64, f64), end: (f64, f64)) {
        let cx = end.0 - (end.0 - start.0) * smoothness;
        self.quad_to(cx, end.1, end.0, end.1);
    }
}

/// One drawable unit the renderer consumes. Color comes from the owning
/// group's substance identity; alpha and stroke width from `ChartStyle`.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    /// Expected-effects line (midpoint-interpolated).
    Stroke(TimelinePath),
    /// Filled, semi-transparent min/max uncertainty region.
    Band(TimelinePath),
    /// Ingestion tick at pixel offset `x` on the baseline. `hollow` marks
    /// estimated doses.
    Marker { x: f64, hollow: bool },
}
