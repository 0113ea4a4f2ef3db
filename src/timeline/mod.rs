//! Effect-timeline core: pure, synchronous chart-model computation.
//!
//! Dependency order, leaves first: path commands -> shape variants ->
//! selector chain -> overlap aggregation -> axis -> chart assembly.
//! Everything here is CPU-bound transformation of in-memory data; no IO,
//! no shared state across invocations.

pub mod axis;
pub mod chart;
pub mod group;
pub mod path;
pub mod selector;
pub mod shapes;

pub use axis::{AxisGridline, hour_gridlines};
pub use chart::{ChartDrawInstructions, ChartGroup, build_chart_model};
pub use group::{GroupModel, IngestionPoint, NormalizedGroup, RawGroup, normalize};
pub use path::{DrawCall, PathCmd, TimelinePath};
pub use selector::{FALLBACK_CHAIN, select_shape};
pub use shapes::{ShapeContext, ShapeKind, TimelineDrawable, TimelineShape};
