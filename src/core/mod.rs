pub mod axis_range;
pub mod entry;
pub mod matrix;
pub mod transformer;
pub mod types;
pub mod viewport;

pub use axis_range::AxisRange;
pub use entry::{
    ChartData, Entry, EntrySet, Rounding, Series, SeriesKind, StackRange, StackValues,
};
pub use matrix::Matrix;
pub use transformer::{AxisOrientation, Transformer};
pub use types::{AxisDependency, ChartDimensions, DataPoint, PixelPoint, Rect};
pub use viewport::{DragOffsets, MAX_CHART_DIMENSION, ScaleLimits, ViewportHandler, ZOOM_STEP};
