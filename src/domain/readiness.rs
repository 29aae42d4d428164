//! One-way readiness latches gating the route guard.

use crate::domain::foundation::StateMachine;

/// A startup phase that completes at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Readiness {
    #[default]
    Pending,
    Ready,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        *self == Readiness::Ready
    }
}

impl StateMachine for Readiness {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!((self, target), (Readiness::Pending, Readiness::Ready))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            Readiness::Pending => vec![Readiness::Ready],
            Readiness::Ready => vec![],
        }
    }
}

/// Both latches the guard waits on.
///
/// `provider` flips once the initial session fetch (and its profile check)
/// has finished; `shell` flips once the presentation layer is prepared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadinessFlags {
    pub provider: Readiness,
    pub shell: Readiness,
}

impl ReadinessFlags {
    pub fn both_ready() -> Self {
        Self {
            provider: Readiness::Ready,
            shell: Readiness::Ready,
        }
    }

    /// The guard may act only when this is true.
    pub fn all_ready(&self) -> bool {
        self.provider.is_ready() && self.shell.is_ready()
    }
}
