//! Screen-stack navigator.
//!
//! Models a stack router: `push` grows history, `replace` swaps the top
//! entry. Every replacement is recorded so tests can assert on exactly
//! which redirects the guard issued.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::navigation::Route;
use crate::ports::Navigator;

#[derive(Debug)]
struct StackState {
    stack: Vec<Route>,
    replacements: Vec<Route>,
}

/// In-process stack router.
#[derive(Debug)]
pub struct StackNavigator {
    state: Mutex<StackState>,
}

impl StackNavigator {
    /// Starts with `initial` as the only screen.
    pub fn new(initial: Route) -> Self {
        Self {
            state: Mutex::new(StackState {
                stack: vec![initial],
                replacements: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StackState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// History-growing transition, as a user tapping into a screen.
    pub fn push(&self, route: Route) {
        tracing::trace!(route = %route, "push");
        self.lock().stack.push(route);
    }

    /// Pops the top screen. The root screen is never popped.
    pub fn back(&self) -> Option<Route> {
        let mut state = self.lock();
        if state.stack.len() > 1 {
            state.stack.pop()
        } else {
            None
        }
    }

    /// Number of screens in history.
    pub fn depth(&self) -> usize {
        self.lock().stack.len()
    }

    /// Every route passed to `replace`, oldest first.
    pub fn replacements(&self) -> Vec<Route> {
        self.lock().replacements.clone()
    }
}

impl Navigator for StackNavigator {
    fn replace(&self, route: &Route) {
        tracing::trace!(route = %route, "replace");
        let mut state = self.lock();
        match state.stack.last_mut() {
            Some(top) => *top = route.clone(),
            None => state.stack.push(route.clone()),
        }
        state.replacements.push(route.clone());
    }

    fn current_location(&self) -> Route {
        self.lock()
            .stack
            .last()
            .cloned()
            .unwrap_or_else(|| Route::new("/"))
    }
}
