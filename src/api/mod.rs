mod chart_layout;
mod chart_viewport;
mod highlight_controller;
mod invalidation;
mod json_contract;
mod navigation;
mod validation;
mod viewport_config;
mod visible_range;

pub use chart_layout::{AxisSlot, ChartLayout};
pub use chart_viewport::ChartViewport;
pub use invalidation::{Invalidation, InvalidationLevel, InvalidationTopic, InvalidationTopics};
pub use json_contract::{VIEWPORT_CONFIG_JSON_SCHEMA_V1, ViewportConfigJsonContractV1};
pub use viewport_config::{AxisConfig, ViewportConfig};
