//! Tab bar behaviour, minus the rendering.

use std::sync::Arc;

use crate::domain::navigation::{resolve_active_tab, NavItem, NAV_ITEMS};
use crate::ports::Navigator;

/// Bottom navigation bound to a router.
pub struct TabBar {
    navigator: Arc<dyn Navigator>,
}

impl TabBar {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self { navigator }
    }

    pub fn items(&self) -> &'static [NavItem] {
        &NAV_ITEMS
    }

    /// Item to highlight for the router's current location.
    pub fn active(&self) -> Option<&'static NavItem> {
        resolve_active_tab(&self.navigator.current_location(), &NAV_ITEMS)
    }

    /// Switches tabs with a replace so the stack never grows.
    pub fn press(&self, item: &NavItem) {
        tracing::debug!(tab = item.label, "Tab pressed");
        self.navigator.replace(&item.route());
    }
}
