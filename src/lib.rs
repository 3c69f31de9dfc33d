//! chart-viewport: pan/zoom viewport and coordinate-transform engine for
//! interactive 2D charts.
//!
//! The crate maps series data onto a drawing surface under live pan/zoom
//! state, clamps that state to scale and drag limits, drives eased viewport
//! animations from a host clock, and resolves pointer positions back to the
//! nearest data value. Drawing itself stays with the host.

pub mod animation;
pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod telemetry;

pub use api::{ChartViewport, ViewportConfig};
pub use error::{ChartError, ChartResult};
