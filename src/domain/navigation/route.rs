//! Route locations as handed out by the navigation substrate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default screen of the protected area.
pub const PROTECTED_ROOT: &str = "/(app)/(protected)";

/// Implicit index alias the router reports for [`PROTECTED_ROOT`].
pub const PROTECTED_INDEX: &str = "/(app)/(protected)/index";

pub const DECIDE: &str = "/(app)/(protected)/decide";
pub const HISTORY: &str = "/(app)/(protected)/history";
pub const SETTINGS: &str = "/(app)/(protected)/settings";

/// Public entry point for signed-out users.
pub const WELCOME: &str = "/(app)/welcome";

/// Segment name that marks the protected route group.
const PROTECTED_GROUP_SEGMENT: &str = "(protected)";

/// Which side of the session gate a location sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGroup {
    Protected,
    Public,
}

/// Opaque path value from the router.
///
/// Routes are compared structurally, by string equality or by path segment,
/// and are never interpreted further.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route(String);

impl Route {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn protected_root() -> Self {
        Self::new(PROTECTED_ROOT)
    }

    pub fn welcome() -> Self {
        Self::new(WELCOME)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-empty path segments, in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|segment| !segment.is_empty())
    }

    /// A location is protected when its second segment is the protected group,
    /// e.g. `/(app)/(protected)/decide`.
    pub fn group(&self) -> RouteGroup {
        match self.segments().nth(1) {
            Some(PROTECTED_GROUP_SEGMENT) => RouteGroup::Protected,
            _ => RouteGroup::Public,
        }
    }

    pub fn is_protected(&self) -> bool {
        self.group() == RouteGroup::Protected
    }

    pub fn is_welcome(&self) -> bool {
        self.0 == WELCOME
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Route {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl PartialEq<str> for Route {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Route {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_screens_are_in_protected_group() {
        for path in [PROTECTED_ROOT, PROTECTED_INDEX, DECIDE, HISTORY, SETTINGS] {
            assert!(Route::new(path).is_protected(), "{path} should be protected");
        }
    }

    #[test]
    fn public_screens_are_not_protected() {
        for path in [WELCOME, "/", "", "/(app)", "/(app)/sign-in", "/(protected)/decide"] {
            assert_eq!(Route::new(path).group(), RouteGroup::Public, "{path}");
        }
    }

    #[test]
    fn group_match_is_exact_segment_equality() {
        assert!(!Route::new("/(app)/(protected)x/decide").is_protected());
        assert!(!Route::new("/(app)/protected/decide").is_protected());
    }

    #[test]
    fn segments_skip_empty_parts() {
        let route = Route::new("//(app)//welcome/");
        assert_eq!(route.segments().collect::<Vec<_>>(), vec!["(app)", "welcome"]);
    }

    #[test]
    fn welcome_is_recognised_by_string_equality() {
        assert!(Route::welcome().is_welcome());
        assert!(!Route::new("/(app)/welcome/").is_welcome());
        assert_eq!(Route::welcome(), WELCOME);
    }
}
