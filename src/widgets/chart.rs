//! Effect-timeline chart widget: hour ruler on top, one colored curve
//! family per substance below.
//!
//! The widget is a thin adapter: all geometry arrives as abstract draw
//! calls from the timeline core; this module only maps chart coordinates
//! (x pixels from the left edge, y in 0..=1 baseline-up) into screen
//! space and epaint shapes.

use eframe::egui::{self, Color32, Pos2, Rect, Sense, Ui, Vec2};

use crate::config::ChartStyle;
use crate::timeline::chart::ChartDrawInstructions;
use crate::timeline::path::{DrawCall, PathCmd, TimelinePath};

/// Segments used to flatten one quadratic blend into line points.
const QUAD_STEPS: usize = 16;

/// Configuration for the chart widget.
#[derive(Clone, Debug)]
pub struct ChartConfig {
    pub chart_height: f32,
    pub ruler_height: f32,
    pub show_labels: bool,
    pub show_legend: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            chart_height: 220.0,
            ruler_height: 20.0,
            show_labels: true,
            show_legend: true,
        }
    }
}

/// Render one chart model. Scrolls horizontally when the effect window
/// is wider than the available space.
pub fn render_chart(
    ui: &mut Ui,
    chart: &ChartDrawInstructions,
    style: &ChartStyle,
    config: &ChartConfig,
) -> egui::Response {
    let width = (chart.total_width_px as f32).max(ui.available_width());
    let height = config.chart_height + config.ruler_height;

    egui::ScrollArea::horizontal()
        .id_salt("effect_chart_scroll")
        .auto_shrink([false, true])
        .show(ui, |ui| {
            let (rect, response) =
                ui.allocate_exact_size(Vec2::new(width, height), Sense::hover());
            if !ui.is_rect_visible(rect) {
                return response;
            }
            let painter = ui.painter();

            let ruler_rect =
                Rect::from_min_size(rect.min, Vec2::new(rect.width(), config.ruler_height));
            let chart_rect = Rect::from_min_max(
                Pos2::new(rect.min.x, rect.min.y + config.ruler_height),
                rect.max,
            );

            painter.rect_filled(ruler_rect, 0.0, Color32::from_gray(25));
            painter.rect_filled(chart_rect, 0.0, Color32::from_gray(30));

            draw_gridlines(painter, chart, config, ruler_rect, chart_rect);

            for group in &chart.groups {
                let color = hash_color(&group.substance_name);
                draw_group_calls(painter, &group.calls, color, style, chart_rect);
            }

            if config.show_legend {
                draw_legend(painter, chart, chart_rect);
            }

            response
        })
        .inner
}

fn draw_gridlines(
    painter: &egui::Painter,
    chart: &ChartDrawInstructions,
    config: &ChartConfig,
    ruler_rect: Rect,
    chart_rect: Rect,
) {
    for line in &chart.gridlines {
        let x = chart_rect.min.x + line.x_px as f32;
        painter.line_segment(
            [Pos2::new(x, chart_rect.min.y), Pos2::new(x, chart_rect.max.y)],
            (1.0, Color32::from_gray(60)),
        );
        painter.line_segment(
            [Pos2::new(x, ruler_rect.max.y - 5.0), Pos2::new(x, ruler_rect.max.y)],
            (1.0, Color32::from_gray(100)),
        );
        if config.show_labels {
            painter.text(
                Pos2::new(x, ruler_rect.min.y + 2.0),
                egui::Align2::CENTER_TOP,
                &line.label,
                egui::FontId::monospace(9.0),
                Color32::from_gray(150),
            );
        }
    }
}

fn draw_group_calls(
    painter: &egui::Painter,
    calls: &[DrawCall],
    color: Color32,
    style: &ChartStyle,
    chart_rect: Rect,
) {
    for call in calls {
        match call {
            DrawCall::Band(path) => {
                let points = flatten_path(path, chart_rect);
                if points.len() >= 2 {
                    let fill = color.gamma_multiply(style.band_alpha);
                    for strip in band_strips(&points, chart_rect.max.y) {
                        painter.add(egui::Shape::convex_polygon(
                            strip,
                            fill,
                            (0.0, Color32::TRANSPARENT),
                        ));
                    }
                }
            }
            DrawCall::Stroke(path) => {
                let points = flatten_path(path, chart_rect);
                if points.len() >= 2 {
                    painter.add(egui::Shape::line(points, (style.stroke_width, color)));
                }
            }
            DrawCall::Marker { x, hollow } => {
                let center = Pos2::new(chart_rect.min.x + *x as f32, chart_rect.max.y);
                if *hollow {
                    painter.circle_stroke(center, style.marker_radius, (1.5, color));
                } else {
                    painter.circle_filled(center, style.marker_radius, color);
                }
            }
        }
    }
}

fn draw_legend(painter: &egui::Painter, chart: &ChartDrawInstructions, chart_rect: Rect) {
    for (idx, group) in chart.groups.iter().enumerate() {
        let label = if group.overlapping_peaks {
            format!("{} (redosed)", group.substance_name)
        } else {
            group.substance_name.clone()
        };
        painter.text(
            Pos2::new(chart_rect.min.x + 8.0, chart_rect.min.y + 4.0 + idx as f32 * 14.0),
            egui::Align2::LEFT_TOP,
            label,
            egui::FontId::proportional(11.0),
            hash_color(&group.substance_name),
        );
    }
}

/// Split a band's top boundary into per-segment quads dropped to the
/// baseline. The boundary runs left to right but may curve concavely
/// after quad flattening, so the region is filled as a row of convex
/// strips rather than one polygon.
fn band_strips(top: &[Pos2], baseline_y: f32) -> Vec<Vec<Pos2>> {
    top.windows(2)
        .map(|pair| {
            vec![
                Pos2::new(pair[0].x, baseline_y),
                pair[0],
                pair[1],
                Pos2::new(pair[1].x, baseline_y),
            ]
        })
        .collect()
}

/// Chart coordinates -> screen points, flattening quadratic blends.
fn flatten_path(path: &TimelinePath, chart_rect: Rect) -> Vec<Pos2> {
    let to_screen = |x: f64, y: f64| {
        Pos2::new(
            chart_rect.min.x + x as f32,
            chart_rect.max.y - (y as f32).clamp(0.0, 1.0) * chart_rect.height(),
        )
    };

    let mut points: Vec<Pos2> = Vec::new();
    for cmd in path.cmds() {
        match *cmd {
            PathCmd::MoveTo { x, y } | PathCmd::LineTo { x, y } => points.push(to_screen(x, y)),
            PathCmd::QuadTo { cx, cy, x, y } => {
                let Some(start) = points.last().copied() else {
                    points.push(to_screen(x, y));
                    continue;
                };
                let control = to_screen(cx, cy);
                let end = to_screen(x, y);
                for i in 1..=QUAD_STEPS {
                    let t = i as f32 / QUAD_STEPS as f32;
                    let u = 1.0 - t;
                    let px = u * u * start.x + 2.0 * u * t * control.x + t * t * end.x;
                    let py = u * u * start.y + 2.0 * u * t * control.y + t * t * end.y;
                    points.push(Pos2::new(px, py));
                }
            }
            // Fills and closed strokes wrap around on their own.
            PathCmd::Close => {}
        }
    }
    points
}

/// Generate stable color from a substance name using hash.
fn hash_color(s: &str) -> Color32 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    s.to_ascii_lowercase().hash(&mut hasher);
    let hash = hasher.finish();

    let hue = (hash % 360) as f32;
    // Fixed saturation and value for consistent look
    hsv_to_rgb(hue, 0.65, 0.8)
}

/// Convert HSV to RGB (for color generation)
fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Color32 {
    let c = v * s;
    let h_prime = h / 60.0;
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h_prime < 1.0 {
        (c, x, 0.0)
    } else if h_prime < 2.0 {
        (x, c, 0.0)
    } else if h_prime < 3.0 {
        (0.0, c, x)
    } else if h_prime < 4.0 {
        (0.0, x, c)
    } else if h_prime < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Color32::from_rgb(
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    )
}
