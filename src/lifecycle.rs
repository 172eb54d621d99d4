//! Component lifecycle.
//!
//! Every component instance moves through an explicit state machine:
//!
//! ```text
//! Created --> Mounted <--> Updating
//!    |           |            |
//!    +-----------+------------+--> Unmounted
//! ```
//!
//! Each transition names the [`Hook`]s fired around it.
//! Resources acquired on [`Hook::Mounted`] are released on the transition to
//! [`LifecycleState::Unmounted`].

use std::fmt;
use thiserror::Error;

/// State of a component instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Composed at least once, not yet committed to the host.
    #[default]
    Created,
    /// Committed to the host and idle.
    Mounted,
    /// Re-rendering after a state change.
    Updating,
    /// Torn down. Terminal.
    Unmounted,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Created => "created",
            Self::Mounted => "mounted",
            Self::Updating => "updating",
            Self::Unmounted => "unmounted",
        };
        f.write_str(name)
    }
}

/// Lifecycle hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hook {
    /// Before the first view is committed.
    BeforeMount,
    /// After the first view is committed.
    Mounted,
    /// Before re-rendering.
    BeforeUpdate,
    /// After the re-rendered view is committed.
    Updated,
    /// Before resources are released.
    BeforeUnmount,
    /// After resources are released.
    Unmounted,
}

/// Hooks fired around a transition.
///
/// `before` runs prior to the transition's effect (rendering, committing or releasing),
/// `after` runs once the effect is complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// State being left.
    pub from: LifecycleState,
    /// State being entered.
    pub to: LifecycleState,
    /// Hook fired before the effect.
    pub before: Option<Hook>,
    /// Hook fired after the effect.
    pub after: Option<Hook>,
}

/// Invalid lifecycle transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("invalid lifecycle transition from {from} to {to}")]
pub struct TransitionError {
    /// Current state.
    pub from: LifecycleState,
    /// Requested state.
    pub to: LifecycleState,
}

/// Lifecycle state machine of a single component instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Lifecycle {
    state: LifecycleState,
}

impl Lifecycle {
    /// Create a new lifecycle in the [`LifecycleState::Created`] state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Returns `true` if this lifecycle reached its terminal state.
    pub fn is_unmounted(&self) -> bool {
        self.state == LifecycleState::Unmounted
    }

    /// Describe the transition to `to` without applying it.
    pub fn plan(&self, to: LifecycleState) -> Result<Transition, TransitionError> {
        use LifecycleState::*;

        let (before, after) = match (self.state, to) {
            (Created, Mounted) => (Some(Hook::BeforeMount), Some(Hook::Mounted)),
            (Mounted, Updating) => (Some(Hook::BeforeUpdate), None),
            (Updating, Mounted) => (None, Some(Hook::Updated)),
            (Created | Mounted | Updating, Unmounted) => {
                (Some(Hook::BeforeUnmount), Some(Hook::Unmounted))
            }
            (from, to) => return Err(TransitionError { from, to }),
        };

        Ok(Transition {
            from: self.state,
            to,
            before,
            after,
        })
    }

    /// Move to `to`, returning the hooks to fire around the transition.
    pub fn transition(&mut self, to: LifecycleState) -> Result<Transition, TransitionError> {
        let transition = self.plan(to)?;
        self.state = to;
        Ok(transition)
    }
}
