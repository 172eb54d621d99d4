//! # reactive-showcase
//! Small reactive components built on explicit observable stores, an explicit
//! lifecycle state machine and scoped timers.
//!
//! ## Hooks
//! Functions that begin with `use_` are called `hooks`.
//! Hooks are used to manage state and side effects in components.
//!
//! Hooks must be used in the same order for every re-compose.
//! Don’t use hooks inside loops, conditions, nested functions, or match blocks.
//! Instead, always use hooks at the top level of your component, before any early returns.
//!
//! ```
//! use reactive_showcase::prelude::*;
//!
//! struct Counter;
//!
//! impl Component for Counter {
//!     fn compose(&self, cx: &Scope) -> View {
//!         let count = use_store(cx, || 0);
//!
//!         View::group([
//!             View::text(format!("Count: {}", count.get())),
//!             View::button("increment", "+", move || count.update(|x| *x += 1)),
//!         ])
//!     }
//! }
//!
//! let mut composer = Composer::new(Counter);
//! composer.mount().unwrap();
//! composer.dispatch(Event::click("increment")).unwrap();
//! assert!(composer.view().unwrap().contains_text("Count: 1"));
//! ```

#![deny(missing_docs)]

use std::{any::Any, rc::Rc};

/// Prelude of commonly-used hooks, components and types.
/// `use reactive_showcase::prelude::*;`
pub mod prelude {
    pub use crate::{
        composer::{ComposeError, Composer, Event, TryComposeError},
        lifecycle::{Hook, LifecycleState},
        list::{Item, ListManager},
        scope::{Component, Scope},
        signal::{use_computed, use_store, use_subscription, use_watch, Computed, Store},
        timer::use_interval,
        use_drop, use_hook, use_ref,
        view::View,
    };
}

pub mod components;

pub mod composer;

pub mod lifecycle;

pub mod list;

mod scope;
pub use self::scope::{Component, Scope};

pub mod signal;

pub mod timer;

pub mod view;

use self::lifecycle::Hook;

/// Use an immutable reference to a value of type `T`.
///
/// `make_value` will only be called once to initialize the value.
///
/// # Panics
/// Panics if the hook order changed between compositions.
pub fn use_ref<T: 'static>(cx: &Scope, make_value: impl FnOnce() -> T) -> Rc<T> {
    let hooks = cx.hooks.borrow();

    let idx = cx.hook_idx.get();
    cx.hook_idx.set(idx + 1);

    let any: Rc<dyn Any> = if let Some(hook) = hooks.get(idx) {
        hook.clone()
    } else {
        // `make_value` must not call other hooks on this scope.
        drop(hooks);
        let value: Rc<dyn Any> = Rc::new(make_value());
        cx.hooks.borrow_mut().push(value.clone());
        value
    };

    any.downcast().unwrap_or_else(|_| {
        panic!(
            "hook {idx} of `{}` changed type between compositions",
            cx.name()
        )
    })
}

/// Use a callback that will be called when the component is torn down.
///
/// Teardown callbacks run after [`Hook::BeforeUnmount`] and before [`Hook::Unmounted`],
/// in the order they were registered.
pub fn use_drop(cx: &Scope, f: impl FnOnce() + 'static) {
    let mut f_cell = Some(f);

    use_ref(cx, || {
        if let Some(f) = f_cell.take() {
            cx.drops.borrow_mut().push(Box::new(f));
        }
    });
}

/// Use a lifecycle callback.
///
/// The callback is registered on the first composition and is called every time the
/// component passes through `hook`.
///
/// ```
/// use reactive_showcase::prelude::*;
/// use std::{cell::RefCell, rc::Rc};
///
/// struct App {
///     log: Rc<RefCell<Vec<Hook>>>,
/// }
///
/// impl Component for App {
///     fn compose(&self, cx: &Scope) -> View {
///         let log = self.log.clone();
///         use_hook(cx, Hook::Mounted, move || log.borrow_mut().push(Hook::Mounted));
///
///         View::text("Hello")
///     }
/// }
///
/// let log = Rc::new(RefCell::new(Vec::new()));
/// let mut composer = Composer::new(App { log: log.clone() });
/// composer.mount().unwrap();
/// assert_eq!(*log.borrow(), [Hook::Mounted]);
/// ```
pub fn use_hook(cx: &Scope, hook: Hook, f: impl Fn() + 'static) {
    let mut f_cell = Some(f);

    use_ref(cx, || {
        if let Some(f) = f_cell.take() {
            cx.callbacks
                .borrow_mut()
                .entry(hook)
                .or_default()
                .push(Rc::new(f));
        }
    });
}
