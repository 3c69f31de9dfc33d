use serde::{Deserialize, Serialize};

use super::ChartViewport;

/// Ordered repaint classes, cheapest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum InvalidationLevel {
    #[default]
    None,
    /// Only the highlight overlay moved.
    Cursor,
    /// The viewport transform changed; geometry must be re-projected.
    Light,
    /// Layout changed or an animation finished.
    Full,
}

impl InvalidationLevel {
    #[must_use]
    pub const fn max(self, other: Self) -> Self {
        if self as u8 >= other as u8 {
            self
        } else {
            other
        }
    }
}

/// What part of the chart a repaint request concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidationTopic {
    Viewport,
    Highlight,
    Layout,
}

impl InvalidationTopic {
    const fn bit(self) -> u8 {
        match self {
            Self::Viewport => 1 << 0,
            Self::Highlight => 1 << 1,
            Self::Layout => 1 << 2,
        }
    }
}

/// Bitmask of invalidation topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InvalidationTopics {
    bits: u8,
}

impl InvalidationTopics {
    const ALL_BITS: u8 = InvalidationTopic::Viewport.bit()
        | InvalidationTopic::Highlight.bit()
        | InvalidationTopic::Layout.bit();

    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            bits: Self::ALL_BITS,
        }
    }

    #[must_use]
    pub const fn from_topic(topic: InvalidationTopic) -> Self {
        Self { bits: topic.bit() }
    }

    #[must_use]
    pub const fn with_topic(self, topic: InvalidationTopic) -> Self {
        Self {
            bits: self.bits | topic.bit(),
        }
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    #[must_use]
    pub const fn contains_topic(self, topic: InvalidationTopic) -> bool {
        (self.bits & topic.bit()) != 0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }
}

/// Coalesced redraw request drained by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Invalidation {
    level: InvalidationLevel,
    #[serde(default)]
    topics: InvalidationTopics,
}

impl Invalidation {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            level: InvalidationLevel::None,
            topics: InvalidationTopics::none(),
        }
    }

    #[must_use]
    pub const fn highlight() -> Self {
        Self {
            level: InvalidationLevel::Cursor,
            topics: InvalidationTopics::from_topic(InvalidationTopic::Highlight),
        }
    }

    #[must_use]
    pub const fn viewport() -> Self {
        Self {
            level: InvalidationLevel::Light,
            topics: InvalidationTopics::from_topic(InvalidationTopic::Viewport),
        }
    }

    /// Animation finalization: full relayout of the moved viewport.
    #[must_use]
    pub const fn viewport_settled() -> Self {
        Self {
            level: InvalidationLevel::Full,
            topics: InvalidationTopics::from_topic(InvalidationTopic::Viewport)
                .with_topic(InvalidationTopic::Layout),
        }
    }

    #[must_use]
    pub const fn layout() -> Self {
        Self {
            level: InvalidationLevel::Full,
            topics: InvalidationTopics::all(),
        }
    }

    #[must_use]
    pub const fn level(self) -> InvalidationLevel {
        self.level
    }

    #[must_use]
    pub const fn topics(self) -> InvalidationTopics {
        self.topics
    }

    #[must_use]
    pub const fn has_topic(self, topic: InvalidationTopic) -> bool {
        self.topics.contains_topic(topic)
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self.level, InvalidationLevel::None)
    }

    pub fn merge(&mut self, other: Self) {
        self.level = self.level.max(other.level);
        self.topics = self.topics.union(other.topics);
    }
}

impl ChartViewport {
    /// Redraw request accumulated since the last
    /// [`ChartViewport::take_pending_invalidation`].
    #[must_use]
    pub fn pending_invalidation(&self) -> Invalidation {
        self.pending
    }

    pub fn take_pending_invalidation(&mut self) -> Invalidation {
        std::mem::take(&mut self.pending)
    }

    pub(super) fn invalidate(&mut self, invalidation: Invalidation) {
        self.pending.merge(invalidation);
    }
}

#[cfg(test)]
mod tests {
    use super::{Invalidation, InvalidationLevel, InvalidationTopic};

    #[test]
    fn merge_keeps_highest_level_and_all_topics() {
        let mut pending = Invalidation::none();
        pending.merge(Invalidation::viewport());
        pending.merge(Invalidation::highlight());

        assert_eq!(pending.level(), InvalidationLevel::Light);
        assert!(pending.has_topic(InvalidationTopic::Viewport));
        assert!(pending.has_topic(InvalidationTopic::Highlight));
        assert!(!pending.has_topic(InvalidationTopic::Layout));
    }

    #[test]
    fn levels_are_ordered() {
        assert!(InvalidationLevel::None < InvalidationLevel::Cursor);
        assert!(InvalidationLevel::Cursor < InvalidationLevel::Light);
        assert!(InvalidationLevel::Light < InvalidationLevel::Full);
        assert_eq!(
            InvalidationLevel::Full.max(InvalidationLevel::Cursor),
            InvalidationLevel::Full
        );
    }
}
