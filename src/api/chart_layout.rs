use crate::animation::{JobContext, JobTarget};
use crate::core::{AxisDependency, AxisOrientation, AxisRange, Transformer, ViewportHandler};
use crate::interaction::HighlightContext;

/// One value axis: its data range and the transformer built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSlot {
    pub(super) range: AxisRange,
    pub(super) transformer: Transformer,
}

impl AxisSlot {
    pub(super) fn new(orientation: AxisOrientation, inverted: bool) -> Self {
        Self {
            range: AxisRange::default(),
            transformer: Transformer::new(orientation, inverted),
        }
    }

    #[must_use]
    pub fn range(&self) -> AxisRange {
        self.range
    }

    #[must_use]
    pub fn transformer(&self) -> &Transformer {
        &self.transformer
    }
}

/// Viewport state and axes that jobs and gestures act on.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub(super) handler: ViewportHandler,
    pub(super) x_range: AxisRange,
    pub(super) left: Option<AxisSlot>,
    pub(super) right: Option<AxisSlot>,
}

impl ChartLayout {
    #[must_use]
    pub fn handler(&self) -> &ViewportHandler {
        &self.handler
    }

    #[must_use]
    pub fn x_range(&self) -> AxisRange {
        self.x_range
    }

    #[must_use]
    pub fn slot(&self, axis: AxisDependency) -> Option<&AxisSlot> {
        match axis {
            AxisDependency::Left => self.left.as_ref(),
            AxisDependency::Right => self.right.as_ref(),
        }
    }

    pub(super) fn slot_mut(&mut self, axis: AxisDependency) -> Option<&mut AxisSlot> {
        match axis {
            AxisDependency::Left => self.left.as_mut(),
            AxisDependency::Right => self.right.as_mut(),
        }
    }

    /// Left axis when present, right otherwise.
    pub(super) fn primary_axis(&self) -> AxisDependency {
        if self.left.is_some() {
            AxisDependency::Left
        } else {
            AxisDependency::Right
        }
    }

    /// Rebuilds every transformer from the current ranges and content bounds.
    pub(super) fn prepare(&mut self) {
        let handler = &self.handler;
        let x_range = self.x_range;
        for slot in [self.left.as_mut(), self.right.as_mut()]
            .into_iter()
            .flatten()
        {
            slot.transformer.prepare(x_range, slot.range, handler);
        }
    }

    pub(super) fn highlight_context(&self) -> HighlightContext<'_> {
        HighlightContext {
            handler: &self.handler,
            left: self.left.as_ref().map(|slot| &slot.transformer),
            right: self.right.as_ref().map(|slot| &slot.transformer),
        }
    }
}

impl JobTarget for ChartLayout {
    fn has_chart_dimens(&self) -> bool {
        self.handler.has_chart_dimens()
    }

    fn job_context(&mut self, axis: AxisDependency) -> Option<JobContext<'_>> {
        let slot = match axis {
            AxisDependency::Left => self.left.as_ref(),
            AxisDependency::Right => self.right.as_ref(),
        }?;
        Some(JobContext {
            handler: &mut self.handler,
            transformer: &slot.transformer,
        })
    }
}
