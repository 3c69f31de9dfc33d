//! Pointer-driven value selection.

pub mod highlight;
pub mod highlighter;

pub use highlight::Highlight;
pub use highlighter::{HighlightContext, Highlighter, HighlighterConfig, SelectionMetric};
