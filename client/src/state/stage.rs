//! Pipeline stages and the tabs that display them.

#[cfg(test)]
#[path = "stage_test.rs"]
mod stage_test;

/// One step of the production pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Order,
    Knitting,
    Dyeing,
    Stenter,
    Compactor,
    Feedback,
}

/// Stages in navigation order.
pub const PIPELINE: [Stage; 6] = [
    Stage::Order,
    Stage::Knitting,
    Stage::Dyeing,
    Stage::Stenter,
    Stage::Compactor,
    Stage::Feedback,
];

impl Stage {
    /// Wire/DOM name (`"order"`, `"knitting"`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Knitting => "knitting",
            Self::Dyeing => "dyeing",
            Self::Stenter => "stenter",
            Self::Compactor => "compactor",
            Self::Feedback => "feedback",
        }
    }

    /// Tab caption.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Order => "Order",
            Self::Knitting => "Knitting",
            Self::Dyeing => "Dyeing",
            Self::Stenter => "Stenter",
            Self::Compactor => "Compactor",
            Self::Feedback => "Feedback",
        }
    }

    /// Parse a wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        PIPELINE.into_iter().find(|stage| stage.as_str() == name)
    }

    /// Whether the stage's form is built from the fetched model schema.
    #[must_use]
    pub fn is_dynamic(self) -> bool {
        matches!(self, Self::Knitting | Self::Stenter | Self::Compactor)
    }

    /// Whether the stage posts to a predict endpoint (feedback submits instead).
    #[must_use]
    pub fn has_prediction(self) -> bool {
        self != Self::Feedback
    }

    /// The following stage in pipeline order, `None` at the final stage.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        let index = PIPELINE.iter().position(|s| *s == self)?;
        PIPELINE.get(index + 1).copied()
    }
}

/// A tab in the top navigation bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tab {
    Stage(Stage),
    History,
}

impl Default for Tab {
    fn default() -> Self {
        Self::Stage(Stage::Order)
    }
}

impl Tab {
    /// Every tab in display order.
    #[must_use]
    pub fn all() -> Vec<Self> {
        PIPELINE.into_iter().map(Self::Stage).chain(std::iter::once(Self::History)).collect()
    }

    /// Panel element id.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Stage(stage) => stage.as_str(),
            Self::History => "history",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Stage(stage) => stage.label(),
            Self::History => "History",
        }
    }
}
