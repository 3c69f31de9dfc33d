//! Deferred and animated viewport changes.

pub mod easing;
pub mod job;
pub mod queue;

pub use easing::Easing;
pub use job::{AnimationStep, JobContext, RunningAnimation, ViewAnchor, ViewportJob};
pub use queue::{JobReport, JobState, JobTarget, ViewportJobQueue};
