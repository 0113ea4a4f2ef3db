//! egui widgets consuming the timeline core's draw instructions.

pub mod chart;

pub use chart::{ChartConfig, render_chart};
