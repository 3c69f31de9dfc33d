use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{
    AxisDependency, AxisOrientation, Entry, PixelPoint, Rounding, Series, SeriesKind, StackRange,
    Transformer, ViewportHandler,
};
use crate::interaction::Highlight;

/// How the distance between the pointer and a candidate is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SelectionMetric {
    /// Straight-line pixel distance.
    #[default]
    Euclidean,
    /// Distance along the pixel axis that data x runs on. Suits bars, where
    /// the whole column is a hit target.
    AlongX,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlighterConfig {
    /// Candidates at or beyond this many pixels are never selected.
    #[serde(default = "default_max_highlight_distance")]
    pub max_highlight_distance: f64,
    #[serde(default)]
    pub metric: SelectionMetric,
    /// Kinds listed here win distance ties in list order; unlisted kinds
    /// rank after them in draw order.
    #[serde(default)]
    pub series_kind_priority: Vec<SeriesKind>,
}

impl Default for HighlighterConfig {
    fn default() -> Self {
        Self {
            max_highlight_distance: default_max_highlight_distance(),
            metric: SelectionMetric::default(),
            series_kind_priority: Vec::new(),
        }
    }
}

fn default_max_highlight_distance() -> f64 {
    500.0
}

/// Borrowed mapping state the highlighter resolves pixels against.
#[derive(Debug, Clone, Copy)]
pub struct HighlightContext<'a> {
    pub handler: &'a ViewportHandler,
    pub left: Option<&'a Transformer>,
    pub right: Option<&'a Transformer>,
}

impl<'a> HighlightContext<'a> {
    #[must_use]
    pub fn transformer(&self, axis: AxisDependency) -> Option<&'a Transformer> {
        match axis {
            AxisDependency::Left => self.left,
            AxisDependency::Right => self.right,
        }
    }

    fn primary(&self) -> Option<&'a Transformer> {
        self.left.or(self.right)
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate<'e> {
    data_set_index: usize,
    entry: &'e Entry,
    axis: AxisDependency,
    kind: SeriesKind,
    pixel: PixelPoint,
}

/// Resolves a pointer position to the nearest selectable value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Highlighter {
    config: HighlighterConfig,
}

impl Highlighter {
    #[must_use]
    pub fn new(config: HighlighterConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &HighlighterConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: HighlighterConfig) {
        self.config = config;
    }

    /// Nearest highlight-enabled value to pixel `(px, py)`, or `None` when
    /// nothing lies within the configured distance.
    ///
    /// `sets` are visited in draw order; their position is the resulting
    /// `data_set_index`.
    pub fn highlight_at<'s, S, I>(
        &self,
        sets: I,
        ctx: &HighlightContext<'_>,
        px: f64,
        py: f64,
    ) -> Option<Highlight>
    where
        S: Series + 's,
        I: IntoIterator<Item = &'s S>,
    {
        let primary = ctx.primary()?;
        if !primary.is_prepared() || !px.is_finite() || !py.is_finite() {
            return None;
        }
        let orientation = primary.orientation();
        let touched_x = primary.values_by_touch_point(ctx.handler, px, py).x;

        let candidates = collect_candidates(sets, ctx, touched_x);
        let axis = closest_axis(&candidates, orientation, px, py)?;

        let (distance, best) = candidates
            .iter()
            .filter(|candidate| candidate.axis == axis)
            .map(|candidate| (self.distance(candidate.pixel, orientation, px, py), candidate))
            .min_by_key(|(distance, candidate)| {
                (OrderedFloat(*distance), self.priority_rank(candidate.kind))
            })?;

        if !(distance < self.config.max_highlight_distance) {
            trace!(
                distance,
                max = self.config.max_highlight_distance,
                "highlight candidate too far from pointer"
            );
            return None;
        }

        let transformer = ctx.transformer(axis)?;
        let entry = best.entry;
        let (stack_index, pixel) = if entry.is_stacked() {
            let touched_y = transformer.values_by_touch_point(ctx.handler, px, py).y;
            let ranges = entry.stack_ranges();
            let index = stack_index_for(&ranges, touched_y);
            let top = ranges.get(index).map_or(entry.y, |range| range.to);
            (
                Some(index),
                transformer.pixel_for_values(ctx.handler, entry.x, top),
            )
        } else {
            (None, best.pixel)
        };

        Some(Highlight {
            x: entry.x,
            y: entry.y,
            pixel_x: pixel.x,
            pixel_y: pixel.y,
            data_set_index: best.data_set_index,
            stack_index,
            axis,
            distance,
        })
    }

    fn distance(&self, pixel: PixelPoint, orientation: AxisOrientation, px: f64, py: f64) -> f64 {
        match (self.config.metric, orientation) {
            (SelectionMetric::Euclidean, _) => (pixel.x - px).hypot(pixel.y - py),
            (SelectionMetric::AlongX, AxisOrientation::Vertical) => (pixel.x - px).abs(),
            (SelectionMetric::AlongX, AxisOrientation::Horizontal) => (pixel.y - py).abs(),
        }
    }

    fn priority_rank(&self, kind: SeriesKind) -> usize {
        let priority = &self.config.series_kind_priority;
        priority
            .iter()
            .position(|ranked| *ranked == kind)
            .unwrap_or(priority.len())
    }
}

/// Entries at the x closest to `touched_x`, one group per enabled set.
fn collect_candidates<'s, S, I>(
    sets: I,
    ctx: &HighlightContext<'_>,
    touched_x: f64,
) -> Vec<Candidate<'s>>
where
    S: Series + 's,
    I: IntoIterator<Item = &'s S>,
{
    let mut candidates = Vec::new();
    for (data_set_index, set) in sets.into_iter().enumerate() {
        if !set.is_highlight_enabled() {
            continue;
        }
        let axis = set.axis();
        let Some(transformer) = ctx.transformer(axis) else {
            continue;
        };
        let Some(closest) = set.entry_for_x(touched_x, f64::NAN, Rounding::Closest) else {
            continue;
        };

        for entry in set.entries_for_x(closest.x) {
            let pixel = transformer.pixel_for_values(ctx.handler, entry.x, entry.y);
            if !pixel.x.is_finite() || !pixel.y.is_finite() {
                continue;
            }
            candidates.push(Candidate {
                data_set_index,
                entry,
                axis,
                kind: set.kind(),
                pixel,
            });
        }
    }
    candidates
}

/// Axis whose candidates lie closest to the pointer along the value axis.
/// Ties go to the left axis.
fn closest_axis(
    candidates: &[Candidate<'_>],
    orientation: AxisOrientation,
    px: f64,
    py: f64,
) -> Option<AxisDependency> {
    let value_gap = |pixel: PixelPoint| match orientation {
        AxisOrientation::Vertical => (pixel.y - py).abs(),
        AxisOrientation::Horizontal => (pixel.x - px).abs(),
    };
    let nearest_on = |axis: AxisDependency| {
        candidates
            .iter()
            .filter(|candidate| candidate.axis == axis)
            .map(|candidate| OrderedFloat(value_gap(candidate.pixel)))
            .min()
    };

    match (
        nearest_on(AxisDependency::Left),
        nearest_on(AxisDependency::Right),
    ) {
        (Some(left), Some(right)) if right < left => Some(AxisDependency::Right),
        (Some(_), _) => Some(AxisDependency::Left),
        (None, Some(_)) => Some(AxisDependency::Right),
        (None, None) => None,
    }
}

/// Stack value containing `value`; above the last range picks the last
/// index, anything else falls back to the first.
fn stack_index_for(ranges: &SmallVec<[StackRange; 4]>, value: f64) -> usize {
    if let Some(index) = ranges.iter().position(|range| range.contains(value)) {
        return index;
    }
    match ranges.last() {
        Some(last) if last.is_larger(value) => ranges.len() - 1,
        _ => 0,
    }
}
