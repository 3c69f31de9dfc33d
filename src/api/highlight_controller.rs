use tracing::debug;

use crate::core::{ChartData, Series};
use crate::interaction::{Highlight, HighlighterConfig};

use super::{ChartViewport, Invalidation};

impl ChartViewport {
    /// Resolves pixel `(px, py)` against `data` and stores the result as the
    /// current highlight.
    pub fn highlight_at_pixel(&mut self, data: &ChartData, px: f64, py: f64) -> Option<Highlight> {
        let ctx = self.layout.highlight_context();
        let highlight = self.highlighter.highlight_at(data.iter(), &ctx, px, py);
        self.set_highlighted(highlight);
        highlight
    }

    /// Highlights every value at `x` in one data set.
    ///
    /// A NaN `x` or an unknown data set clears the highlight instead.
    pub fn highlight_value(
        &mut self,
        data: &ChartData,
        x: f64,
        data_set_index: usize,
        stack_index: Option<usize>,
    ) -> Option<Highlight> {
        let highlight = data
            .get(data_set_index)
            .filter(|_| !x.is_nan())
            .map(|set| Highlight {
                axis: set.axis(),
                ..Highlight::for_value(x, data_set_index, stack_index)
            });
        self.set_highlighted(highlight);
        highlight
    }

    pub fn clear_highlight(&mut self) {
        self.set_highlighted(None);
    }

    #[must_use]
    pub fn highlighted(&self) -> Option<Highlight> {
        self.highlighted
    }

    #[must_use]
    pub fn highlighter_config(&self) -> &HighlighterConfig {
        self.highlighter.config()
    }

    pub fn set_highlighter_config(&mut self, config: HighlighterConfig) {
        self.highlighter.set_config(config);
    }

    fn set_highlighted(&mut self, highlight: Option<Highlight>) {
        let changed = match (&self.highlighted, &highlight) {
            (None, None) => false,
            (Some(previous), Some(next)) => !previous.same_selection(next),
            _ => true,
        };
        self.highlighted = highlight;
        if changed {
            debug!(
                data_set_index = highlight.map(|h| h.data_set_index),
                x = highlight.map(|h| h.x),
                "highlight changed"
            );
            self.invalidate(Invalidation::highlight());
        }
    }
}
