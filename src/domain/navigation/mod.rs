//! Navigation domain: route locations, the redirect rule and the tab bar.

mod redirect;
mod route;
mod tabs;

pub use redirect::{decide_redirect, RedirectDecision};
pub use route::{
    Route, RouteGroup, DECIDE, HISTORY, PROTECTED_INDEX, PROTECTED_ROOT, SETTINGS, WELCOME,
};
pub use tabs::{resolve_active_tab, NavItem, NAV_ITEMS};
