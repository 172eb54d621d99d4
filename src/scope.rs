//! Components and the scopes they compose in.

use crate::{
    lifecycle::{Hook, Lifecycle, LifecycleState, Transition, TransitionError},
    view::View,
};
use hashbrown::HashMap;
use std::{
    any::Any,
    borrow::Cow,
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

/// A component.
///
/// Components are re-run whenever any state they observe is changed.
/// When a component is re-run, we call that "recomposition".
/// On the initial composition hooks initialize their state,
/// then on recomposition hooks return the state from their slot.
pub trait Component: 'static {
    /// Compose this component into a view.
    fn compose(&self, cx: &Scope) -> View;

    /// Name of this component, used for diagnostics.
    fn name(&self) -> Cow<'static, str> {
        let name = std::any::type_name::<Self>();
        name.split('<')
            .next()
            .unwrap_or(name)
            .split("::")
            .last()
            .unwrap_or(name)
            .into()
    }
}

struct Child {
    key: Cow<'static, str>,
    scope: Rc<Scope>,
    is_seen: Cell<bool>,
}

/// State of a single component instance.
pub struct Scope {
    name: Cow<'static, str>,
    pub(crate) hooks: RefCell<Vec<Rc<dyn Any>>>,
    pub(crate) hook_idx: Cell<usize>,
    pub(crate) callbacks: RefCell<HashMap<Hook, Vec<Rc<dyn Fn()>>>>,
    pub(crate) drops: RefCell<Vec<Box<dyn FnOnce()>>>,
    lifecycle: Cell<Lifecycle>,
    children: RefCell<Vec<Child>>,
}

impl Scope {
    pub(crate) fn new(name: Cow<'static, str>) -> Self {
        Self {
            name,
            hooks: RefCell::default(),
            hook_idx: Cell::new(0),
            callbacks: RefCell::default(),
            drops: RefCell::default(),
            lifecycle: Cell::new(Lifecycle::new()),
            children: RefCell::default(),
        }
    }

    /// Name of the component this scope belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.lifecycle.get().state()
    }

    /// Compose a nested component identified by `key`.
    ///
    /// The child keeps its state for as long as its parent composes it under the same key.
    /// A child that is skipped during a composition is unmounted.
    pub fn child(&self, key: impl Into<Cow<'static, str>>, content: impl Component) -> View {
        let key = key.into();

        let existing = self
            .children
            .borrow()
            .iter()
            .find(|child| child.key == key)
            .map(|child| {
                child.is_seen.set(true);
                child.scope.clone()
            });

        let scope = existing.unwrap_or_else(|| {
            let scope = Rc::new(Scope::new(content.name()));
            self.children.borrow_mut().push(Child {
                key,
                scope: scope.clone(),
                is_seen: Cell::new(true),
            });
            scope
        });

        scope.compose(&content)
    }

    /// Number of live child components.
    pub fn child_count(&self) -> usize {
        self.children.borrow().len()
    }

    pub(crate) fn compose(&self, content: &dyn Component) -> View {
        #[cfg(feature = "tracing")]
        tracing::trace!("Compose: {}", self.name);

        self.hook_idx.set(0);
        for child in self.children.borrow().iter() {
            child.is_seen.set(false);
        }

        let view = content.compose(self);

        let skipped: Vec<_> = {
            let mut children = self.children.borrow_mut();
            let mut skipped = Vec::new();
            children.retain(|child| {
                if child.is_seen.get() {
                    true
                } else {
                    skipped.push(child.scope.clone());
                    false
                }
            });
            skipped
        };

        for scope in skipped {
            // Children are always live while attached to a parent.
            if let Err(_error) = scope.unmount() {
                #[cfg(feature = "tracing")]
                tracing::warn!("Failed to unmount {}: {}", scope.name, _error);
            }
        }

        view
    }

    pub(crate) fn transition(&self, to: LifecycleState) -> Result<Transition, TransitionError> {
        let mut lifecycle = self.lifecycle.get();
        let transition = lifecycle.transition(to)?;
        self.lifecycle.set(lifecycle);

        #[cfg(feature = "tracing")]
        tracing::debug!("{}: {} -> {}", self.name, transition.from, transition.to);

        Ok(transition)
    }

    pub(crate) fn emit(&self, hook: Hook) {
        let callbacks = self
            .callbacks
            .borrow()
            .get(&hook)
            .cloned()
            .unwrap_or_default();

        for f in callbacks {
            f()
        }
    }

    /// Visit this scope and its descendants, parents before children.
    pub(crate) fn visit(&self, f: &mut dyn FnMut(&Scope)) {
        f(self);

        let children: Vec<_> = self
            .children
            .borrow()
            .iter()
            .map(|child| child.scope.clone())
            .collect();
        for child in children {
            child.visit(f);
        }
    }

    /// Visit this scope and its descendants, children before parents.
    pub(crate) fn visit_rev(&self, f: &mut dyn FnMut(&Scope)) {
        let children: Vec<_> = self
            .children
            .borrow()
            .iter()
            .map(|child| child.scope.clone())
            .collect();
        for child in children {
            child.visit_rev(f);
        }

        f(self);
    }

    /// Tear down this scope and its descendants.
    ///
    /// Fires [`Hook::BeforeUnmount`] parents first, releases every resource held by hooks,
    /// then fires [`Hook::Unmounted`] children first.
    pub(crate) fn unmount(&self) -> Result<(), TransitionError> {
        let mut result = Ok(());
        self.visit(&mut |scope| {
            if result.is_ok() {
                result = scope.lifecycle.get().plan(LifecycleState::Unmounted).map(|_| ());
            }
        });
        result?;

        self.visit(&mut |scope| scope.emit(Hook::BeforeUnmount));

        let mut result = Ok(());
        self.visit_rev(&mut |scope| {
            scope.release();
            match scope.transition(LifecycleState::Unmounted) {
                Ok(_) => scope.emit(Hook::Unmounted),
                Err(error) => result = Err(error),
            }
            scope.callbacks.borrow_mut().clear();
        });
        self.children.borrow_mut().clear();

        result
    }

    fn release(&self) {
        let drops: Vec<_> = self.drops.borrow_mut().drain(..).collect();
        for f in drops {
            f()
        }

        let hooks = std::mem::take(&mut *self.hooks.borrow_mut());
        drop(hooks);
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("name", &self.name)
            .field("state", &self.state())
            .field("hooks", &self.hooks.borrow().len())
            .field("children", &self.child_count())
            .finish()
    }
}
