//! DOSELINE - substance journal effect-timeline library
//!
//! Computes normalized, composable effect curves (onset/comeup/peak/
//! offset) from logged ingestions plus a bundled reference dataset, and
//! renders them with egui. The timeline core is pure and synchronous;
//! everything else feeds it or draws its output.

// Timeline core (shapes, selector chain, aggregation, axis, chart)
pub mod timeline;

// App modules
pub mod cli;
pub mod config;
pub mod duration;
pub mod journal;
pub mod reference;
pub mod widgets;

// Re-export commonly used types
pub use config::ChartStyle;
pub use duration::{DurationRange, RoaDuration, TimeUnit};
pub use journal::{Experience, Ingestion};
pub use reference::SubstanceIndex;
pub use timeline::{ChartDrawInstructions, TimelineShape, build_chart_model, select_shape};
