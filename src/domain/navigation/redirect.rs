//! Session/location consistency rule applied by the route guard.

use super::route::Route;
use crate::domain::readiness::ReadinessFlags;

/// Outcome of one guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectDecision {
    /// Startup has not finished; the shell is still on its splash screen.
    Hold,
    /// Location already agrees with the session.
    Stay,
    /// Replace the current location with this route.
    Redirect(Route),
}

impl RedirectDecision {
    pub fn target(&self) -> Option<&Route> {
        match self {
            RedirectDecision::Redirect(route) => Some(route),
            _ => None,
        }
    }
}

/// Decides where the user belongs.
///
/// - signed in, outside the protected group: protected root
/// - signed out, anywhere but welcome: welcome
/// - otherwise stay put
///
/// Nothing is decided until both readiness latches are set.
pub fn decide_redirect(
    flags: ReadinessFlags,
    has_session: bool,
    location: &Route,
) -> RedirectDecision {
    if !flags.all_ready() {
        return RedirectDecision::Hold;
    }

    match (has_session, location.is_protected()) {
        (true, false) => RedirectDecision::Redirect(Route::protected_root()),
        (false, _) if !location.is_welcome() => RedirectDecision::Redirect(Route::welcome()),
        _ => RedirectDecision::Stay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::navigation::{DECIDE, PROTECTED_ROOT, WELCOME};
    use crate::domain::readiness::Readiness;

    fn ready() -> ReadinessFlags {
        ReadinessFlags::both_ready()
    }

    #[test]
    fn holds_until_both_flags_are_ready() {
        let partial = [
            ReadinessFlags::default(),
            ReadinessFlags {
                provider: Readiness::Ready,
                shell: Readiness::Pending,
            },
            ReadinessFlags {
                provider: Readiness::Pending,
                shell: Readiness::Ready,
            },
        ];
        for flags in partial {
            for has_session in [true, false] {
                assert_eq!(
                    decide_redirect(flags, has_session, &Route::new("/")),
                    RedirectDecision::Hold
                );
            }
        }
    }

    #[test]
    fn signed_in_outside_protected_group_goes_to_protected_root() {
        let decision = decide_redirect(ready(), true, &Route::welcome());
        assert_eq!(decision, RedirectDecision::Redirect(Route::new(PROTECTED_ROOT)));
    }

    #[test]
    fn signed_in_inside_protected_group_stays() {
        assert_eq!(
            decide_redirect(ready(), true, &Route::new(DECIDE)),
            RedirectDecision::Stay
        );
    }

    #[test]
    fn signed_out_anywhere_goes_to_welcome() {
        for path in [DECIDE, PROTECTED_ROOT, "/", "/(app)/sign-in"] {
            let decision = decide_redirect(ready(), false, &Route::new(path));
            assert_eq!(decision.target(), Some(&Route::new(WELCOME)), "{path}");
        }
    }

    #[test]
    fn signed_out_on_welcome_stays() {
        assert_eq!(
            decide_redirect(ready(), false, &Route::welcome()),
            RedirectDecision::Stay
        );
    }
}
