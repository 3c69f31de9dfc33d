use thiserror::Error;

use crate::core::AxisDependency;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// The chart was configured without the requested axis.
    #[error("chart has no {axis:?} axis")]
    AxisUnavailable { axis: AxisDependency },
}
