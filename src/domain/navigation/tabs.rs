//! Tab-bar items and active-tab resolution.

use super::route::{Route, DECIDE, HISTORY, PROTECTED_INDEX, PROTECTED_ROOT, SETTINGS};

/// One entry of the bottom navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub icon: &'static str,
    pub active_icon: &'static str,
    pub route: &'static str,
}

impl NavItem {
    /// Whether this item should render as selected for `location`.
    ///
    /// The protected root also matches its implicit `/index` alias.
    pub fn is_active(&self, location: &Route) -> bool {
        location == self.route || (self.route == PROTECTED_ROOT && location == PROTECTED_INDEX)
    }

    pub fn icon_for(&self, active: bool) -> &'static str {
        if active {
            self.active_icon
        } else {
            self.icon
        }
    }

    pub fn route(&self) -> Route {
        Route::new(self.route)
    }
}

/// Bottom navigation items, in display order.
pub static NAV_ITEMS: [NavItem; 4] = [
    NavItem {
        label: "Home",
        icon: "home-outline",
        active_icon: "home",
        route: PROTECTED_ROOT,
    },
    NavItem {
        label: "Decide",
        icon: "help-buoy-outline",
        active_icon: "help-buoy",
        route: DECIDE,
    },
    NavItem {
        label: "History",
        icon: "time-outline",
        active_icon: "time",
        route: HISTORY,
    },
    NavItem {
        label: "Settings",
        icon: "settings-outline",
        active_icon: "settings",
        route: SETTINGS,
    },
];

/// Returns the first item that is active for `location`, if any.
pub fn resolve_active_tab<'a>(location: &Route, items: &'a [NavItem]) -> Option<&'a NavItem> {
    items.iter().find(|item| item.is_active(location))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::navigation::WELCOME;

    fn label_for(path: &str) -> Option<&'static str> {
        resolve_active_tab(&Route::new(path), &NAV_ITEMS).map(|item| item.label)
    }

    #[test]
    fn index_alias_resolves_to_home() {
        assert_eq!(label_for("/(app)/(protected)/index"), Some("Home"));
    }

    #[test]
    fn protected_root_resolves_to_home() {
        assert_eq!(label_for("/(app)/(protected)"), Some("Home"));
    }

    #[test]
    fn each_tab_route_resolves_to_its_item() {
        assert_eq!(label_for("/(app)/(protected)/decide"), Some("Decide"));
        assert_eq!(label_for("/(app)/(protected)/history"), Some("History"));
        assert_eq!(label_for("/(app)/(protected)/settings"), Some("Settings"));
    }

    #[test]
    fn unrecognised_location_has_no_active_tab() {
        assert_eq!(label_for(WELCOME), None);
        assert_eq!(label_for("/(app)/(protected)/decide/step-2"), None);
        assert_eq!(label_for("/(app)/(protected)/index/extra"), None);
    }

    #[test]
    fn index_alias_only_applies_to_protected_root() {
        let decide = NAV_ITEMS[1];
        assert!(!decide.is_active(&Route::new(PROTECTED_INDEX)));
    }

    #[test]
    fn icon_switches_with_active_state() {
        let home = NAV_ITEMS[0];
        assert_eq!(home.icon_for(true), "home");
        assert_eq!(home.icon_for(false), "home-outline");
    }
}
