use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::AxisDependency;
use crate::error::{ChartError, ChartResult};

/// Stack values stored inline for the common small-stack case.
pub type StackValues = SmallVec<[f64; 4]>;

/// One data sample.
///
/// Stacked entries carry their individual values in `stack`; `y` is then
/// the sum of those values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<StackValues>,
}

impl Entry {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, stack: None }
    }

    #[must_use]
    pub fn stacked(x: f64, values: &[f64]) -> Self {
        Self {
            x,
            y: values.iter().sum(),
            stack: Some(values.iter().copied().collect()),
        }
    }

    /// Builds an entry from a wall-clock timestamp (unix seconds) and a
    /// decimal value.
    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> ChartResult<Self> {
        let y = value.to_f64().ok_or_else(|| {
            ChartError::InvalidData("entry value cannot be represented as f64".to_owned())
        })?;
        Ok(Self::new(time.timestamp_millis() as f64 / 1000.0, y))
    }

    #[must_use]
    pub fn is_stacked(&self) -> bool {
        self.stack.as_ref().is_some_and(|values| !values.is_empty())
    }

    /// Cumulative ranges of the stack values.
    ///
    /// Negative values stack downward from zero, positive values upward, so
    /// each range keeps the sign of its value.
    #[must_use]
    pub fn stack_ranges(&self) -> SmallVec<[StackRange; 4]> {
        let Some(values) = self.stack.as_ref() else {
            return SmallVec::new();
        };

        let negative_sum: f64 = values.iter().filter(|v| **v < 0.0).map(|v| v.abs()).sum();
        let mut neg_remain = -negative_sum;
        let mut pos_remain = 0.0;

        values
            .iter()
            .map(|value| {
                if *value < 0.0 {
                    let range = StackRange::new(neg_remain, neg_remain - value);
                    neg_remain -= value;
                    range
                } else {
                    let range = StackRange::new(pos_remain, pos_remain + value);
                    pos_remain += value;
                    range
                }
            })
            .collect()
    }
}

/// Half-open `(from, to]` range covered by one stack value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackRange {
    pub from: f64,
    pub to: f64,
}

impl StackRange {
    #[must_use]
    pub const fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value > self.from && value <= self.to
    }

    #[must_use]
    pub fn is_larger(self, value: f64) -> bool {
        value > self.to
    }
}

/// Rounding policy for nearest-entry lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Rounding {
    /// Entry whose x is nearest the query.
    #[default]
    Closest,
    /// First entry at or after the query when the nearest lies before it.
    Up,
    /// Last entry at or before the query when the nearest lies after it.
    Down,
}

/// Visual kind of a data set. Drives highlight priority in combined charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SeriesKind {
    #[default]
    Line,
    Bar,
    Scatter,
    Candle,
    Bubble,
}

/// Read-only view of a data set consumed by the highlighter.
///
/// Implementors only supply the ordered entries and metadata; lookups are
/// provided on top of `entries()`, which must be sorted by `x`.
pub trait Series {
    fn entries(&self) -> &[Entry];

    fn axis(&self) -> AxisDependency {
        AxisDependency::Left
    }

    fn kind(&self) -> SeriesKind {
        SeriesKind::Line
    }

    fn is_highlight_enabled(&self) -> bool {
        true
    }

    /// Binary search for the entry nearest `x`, adjusted by `rounding`.
    ///
    /// When `closest_to_y` is not NaN and several entries share the resolved
    /// x, the one whose y is nearest `closest_to_y` wins.
    fn entry_index_for_x(&self, x: f64, closest_to_y: f64, rounding: Rounding) -> Option<usize> {
        let entries = self.entries();
        if entries.is_empty() || x.is_nan() {
            return None;
        }

        let mut low = 0;
        let mut high = entries.len() - 1;
        while low < high {
            let mid = low + (high - low) / 2;
            let d1 = entries[mid].x - x;
            let d2 = entries[mid + 1].x - x;
            let (ad1, ad2) = (d1.abs(), d2.abs());

            if ad2 < ad1 {
                low = mid + 1;
            } else if ad1 < ad2 || d1 >= 0.0 {
                high = mid;
            } else {
                low = mid + 1;
            }
        }

        let mut closest = high;
        let closest_x = entries[closest].x;
        match rounding {
            Rounding::Up if closest_x < x && closest + 1 < entries.len() => closest += 1,
            Rounding::Down if closest_x > x && closest > 0 => closest -= 1,
            _ => {}
        }

        if !closest_to_y.is_nan() {
            let closest_x = entries[closest].x;
            while closest > 0 && entries[closest - 1].x == closest_x {
                closest -= 1;
            }

            let mut best = closest;
            let mut best_distance = (entries[closest].y - closest_to_y).abs();
            for (idx, entry) in entries.iter().enumerate().skip(closest + 1) {
                if entry.x != closest_x {
                    break;
                }
                let distance = (entry.y - closest_to_y).abs();
                if distance <= best_distance {
                    best = idx;
                    best_distance = distance;
                }
            }
            closest = best;
        }

        Some(closest)
    }

    fn entry_for_x(&self, x: f64, closest_to_y: f64, rounding: Rounding) -> Option<&Entry> {
        self.entry_index_for_x(x, closest_to_y, rounding)
            .and_then(|idx| self.entries().get(idx))
    }

    /// All entries whose x equals `x` exactly, in order.
    fn entries_for_x(&self, x: f64) -> &[Entry] {
        let entries = self.entries();
        let start = entries.partition_point(|entry| entry.x < x);
        let end = start + entries[start..].partition_point(|entry| entry.x == x);
        &entries[start..end]
    }

    /// Inclusive index window covering `[low_x, high_x]`.
    ///
    /// The low bound rounds down and the high bound rounds up so entries
    /// just outside the window are included.
    fn visible_index_range(&self, low_x: f64, high_x: f64) -> Option<RangeInclusive<usize>> {
        let (low_x, high_x) = (low_x.min(high_x), low_x.max(high_x));
        let from = self.entry_index_for_x(low_x, f64::NAN, Rounding::Down)?;
        let to = self.entry_index_for_x(high_x, f64::NAN, Rounding::Up)?;
        Some(from..=to)
    }
}

/// Owned, x-sorted data set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntrySet {
    entries: Vec<Entry>,
    #[serde(default)]
    axis: AxisDependency,
    #[serde(default)]
    kind: SeriesKind,
    #[serde(default = "default_highlight_enabled")]
    highlight_enabled: bool,
}

fn default_highlight_enabled() -> bool {
    true
}

impl EntrySet {
    /// Builds a data set, dropping non-finite samples and sorting by x.
    #[must_use]
    pub fn new(entries: Vec<Entry>) -> Self {
        let original_count = entries.len();
        let mut entries: Vec<Entry> = entries
            .into_iter()
            .filter(|entry| entry.x.is_finite() && entry.y.is_finite())
            .collect();
        entries.sort_by(|a, b| a.x.total_cmp(&b.x));
        if entries.len() != original_count {
            debug!(
                original_count,
                canonical_count = entries.len(),
                "dropped non-finite entries"
            );
        }

        Self {
            entries,
            axis: AxisDependency::Left,
            kind: SeriesKind::Line,
            highlight_enabled: true,
        }
    }

    #[must_use]
    pub fn from_xy(points: &[(f64, f64)]) -> Self {
        Self::new(points.iter().map(|(x, y)| Entry::new(*x, *y)).collect())
    }

    #[must_use]
    pub fn with_axis(mut self, axis: AxisDependency) -> Self {
        self.axis = axis;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: SeriesKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_highlight_enabled(mut self, enabled: bool) -> Self {
        self.highlight_enabled = enabled;
        self
    }

    pub fn set_highlight_enabled(&mut self, enabled: bool) {
        self.highlight_enabled = enabled;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Min/max of x and y over all entries.
    #[must_use]
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let first = self.entries.first()?;
        let last = self.entries.last()?;
        let (y_min, y_max) = self
            .entries
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), entry| {
                (lo.min(entry.y), hi.max(entry.y))
            });
        Some(((first.x, last.x), (y_min, y_max)))
    }
}

impl Series for EntrySet {
    fn entries(&self) -> &[Entry] {
        &self.entries
    }

    fn axis(&self) -> AxisDependency {
        self.axis
    }

    fn kind(&self) -> SeriesKind {
        self.kind
    }

    fn is_highlight_enabled(&self) -> bool {
        self.highlight_enabled
    }
}

/// Label-keyed collection of data sets; insertion order is draw order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    sets: IndexMap<String, EntrySet>,
}

impl ChartData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a data set. A replaced set keeps its draw slot.
    pub fn insert(&mut self, label: impl Into<String>, set: EntrySet) -> usize {
        self.sets.insert_full(label.into(), set).0
    }

    #[must_use]
    pub fn with_set(mut self, label: impl Into<String>, set: EntrySet) -> Self {
        self.insert(label, set);
        self
    }

    pub fn remove(&mut self, label: &str) -> Option<EntrySet> {
        self.sets.shift_remove(label)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&EntrySet> {
        self.sets.get_index(index).map(|(_, set)| set)
    }

    #[must_use]
    pub fn by_label(&self, label: &str) -> Option<&EntrySet> {
        self.sets.get(label)
    }

    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.sets.get_index_of(label)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntrySet> {
        self.sets.values()
    }

    /// Combined x range and per-axis y ranges of all sets.
    #[must_use]
    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        self.iter()
            .filter_map(EntrySet::bounds)
            .map(|(x, _)| x)
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }

    #[must_use]
    pub fn y_bounds(&self, axis: AxisDependency) -> Option<(f64, f64)> {
        self.iter()
            .filter(|set| set.axis() == axis)
            .filter_map(EntrySet::bounds)
            .map(|(_, y)| y)
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }
}
