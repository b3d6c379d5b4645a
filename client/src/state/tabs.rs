#[cfg(test)]
#[path = "tabs_test.rs"]
mod tabs_test;

use super::stage::{Stage, Tab};

/// Which tab panel is visible. Exactly one tab is active at a time.
#[derive(Clone, Debug, Default)]
pub struct TabState {
    active: Tab,
}

impl TabState {
    #[must_use]
    pub fn active(&self) -> Tab {
        self.active
    }

    #[must_use]
    pub fn is_active(&self, tab: Tab) -> bool {
        self.active == tab
    }

    /// Activate `tab`, deactivating every other tab.
    ///
    /// Returns `true` when the history view was activated and must reload.
    pub fn show(&mut self, tab: Tab) -> bool {
        self.active = tab;
        tab == Tab::History
    }

    /// Move to the stage after `from`. A no-op returning `None` at the final
    /// stage.
    pub fn advance(&mut self, from: Stage) -> Option<Tab> {
        let next = Tab::Stage(from.next()?);
        self.show(next);
        Some(next)
    }
}
