//! Observable stores.
//!
//! A [`Store`] is a shared holder that notifies its subscribers synchronously after every
//! change. Components observe stores through hooks, which mark the composition as changed
//! so the host re-renders before the next event is processed.
//!
//! Writes issued while a [`Composer`](crate::composer::Composer) is rendering are queued
//! and applied right after the render pass.

use crate::{composer::Runtime, use_ref, Scope};
use slotmap::{DefaultKey, SlotMap};
use std::{
    cell::{Cell, Ref, RefCell},
    fmt,
    rc::{Rc, Weak},
};

type Subscriber<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: RefCell<T>,
    subscribers: RefCell<SlotMap<DefaultKey, Subscriber<T>>>,
    version: Cell<u64>,
}

/// Observable value.
///
/// Cloning a store returns another handle to the same value.
pub struct Store<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static> Store<T> {
    /// Create a new store holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                subscribers: RefCell::new(SlotMap::new()),
                version: Cell::new(0),
            }),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner.value.borrow().clone()
    }

    /// Borrow the current value.
    ///
    /// # Panics
    /// Panics if called from inside [`Store::update`] on the same store.
    pub fn borrow(&self) -> Ref<'_, T> {
        self.inner.value.borrow()
    }

    /// Run `f` with a reference to the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.inner.value.borrow())
    }

    /// Number of changes applied to this store.
    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    /// Replace the current value.
    pub fn set(&self, value: T) {
        self.update(move |current| *current = value)
    }

    /// Modify the current value and notify subscribers.
    ///
    /// Subscribers must not write to the store they observe.
    pub fn update(&self, f: impl FnOnce(&mut T) + 'static) {
        if let Some(rt) = Runtime::try_current() {
            if rt.is_composing() {
                let store = self.clone();
                rt.update(move || store.apply(f));
                return;
            }
        }

        self.apply(f)
    }

    fn apply(&self, f: impl FnOnce(&mut T)) {
        f(&mut *self.inner.value.borrow_mut());
        self.inner.version.set(self.inner.version.get() + 1);

        self.notify();
    }

    fn notify(&self) {
        let subscribers: Vec<_> = self.inner.subscribers.borrow().values().cloned().collect();

        #[cfg(feature = "tracing")]
        tracing::trace!(
            "Notify {} subscriber(s) at version {}",
            subscribers.len(),
            self.version()
        );

        let value = self.inner.value.borrow();
        for subscriber in subscribers {
            subscriber(&*value)
        }
    }

    /// Subscribe to changes of this store.
    ///
    /// `f` is called after every change until the returned [`Subscription`] is dropped.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
        let key = self.inner.subscribers.borrow_mut().insert(Rc::new(f));

        let inner: Weak<Inner<T>> = Rc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = inner.upgrade() {
                    inner.subscribers.borrow_mut().remove(key);
                }
            })),
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    /// Watch this store, calling `f` with the previous and current value after every change.
    pub fn watch(&self, f: impl Fn(&T, &T) + 'static) -> Subscription
    where
        T: Clone,
    {
        let last = RefCell::new(self.get());
        self.subscribe(move |value| {
            let old = last.replace(value.clone());
            f(&old, value)
        })
    }

    /// Derive a read-only value from this store.
    ///
    /// The derived value is recomputed synchronously after every change of this store.
    pub fn map<U: 'static>(&self, f: impl Fn(&T) -> U + 'static) -> Computed<U> {
        let value = Store::new(self.with(&f));

        let target = value.clone();
        let subscription = self.subscribe(move |source| target.apply(|out| *out = f(source)));

        Computed {
            value,
            _subscription: Rc::new(subscription),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("value", &*self.inner.value.borrow())
            .field("version", &self.inner.version.get())
            .finish()
    }
}

/// Derived, read-only value created with [`Store::map`].
pub struct Computed<T> {
    value: Store<T>,
    _subscription: Rc<Subscription>,
}

impl<T> Clone for Computed<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _subscription: self._subscription.clone(),
        }
    }
}

impl<T: 'static> Computed<T> {
    /// Get a clone of the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.value.get()
    }

    /// Borrow the current value.
    pub fn borrow(&self) -> Ref<'_, T> {
        self.value.borrow()
    }

    /// Run `f` with a reference to the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.value.with(f)
    }

    /// Number of times this value was recomputed.
    pub fn version(&self) -> u64 {
        self.value.version()
    }

    /// Subscribe to changes of this value.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
        self.value.subscribe(f)
    }
}

impl<T: fmt::Debug> fmt::Debug for Computed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Computed")
            .field(&*self.value.inner.value.borrow())
            .finish()
    }
}

/// Subscription to a [`Store`].
///
/// Dropping this value unsubscribes.
#[must_use = "Subscriptions are cancelled when dropped."]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(f) = self.unsubscribe.take() {
            f()
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

/// Use a store owned by this component.
///
/// `make_value` is only called on the first composition.
/// Every change of the store recomposes the component.
///
/// # Panics
/// Panics if called outside of a runtime.
pub fn use_store<T: 'static>(cx: &Scope, make_value: impl FnOnce() -> T) -> Store<T> {
    let store = use_ref(cx, || {
        let store = Store::new(make_value());
        let rt = Runtime::current();
        let subscription = store.subscribe(move |_| rt.set_changed());
        (store, subscription)
    });

    store.0.clone()
}

/// Subscribe this component to a store it does not own.
///
/// The subscription is released when the component is torn down.
///
/// # Panics
/// Panics if called outside of a runtime.
pub fn use_subscription<T: 'static>(cx: &Scope, store: &Store<T>) {
    use_ref(cx, || {
        let rt = Runtime::current();
        store.subscribe(move |_| rt.set_changed())
    });
}

/// Use a value derived from `store`.
///
/// The derivation is created once and kept up to date for the lifetime of the component.
pub fn use_computed<T: 'static, U: 'static>(
    cx: &Scope,
    store: &Store<T>,
    f: impl Fn(&T) -> U + 'static,
) -> Computed<U> {
    let computed = use_ref(cx, || store.map(f));
    (*computed).clone()
}

/// Watch `store` for the lifetime of this component.
pub fn use_watch<T: Clone + 'static>(cx: &Scope, store: &Store<T>, f: impl Fn(&T, &T) + 'static) {
    use_ref(cx, || store.watch(f));
}
