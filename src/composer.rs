//! Host for components.
//!
//! A [`Composer`] owns the root [`Scope`] of a component tree, renders it into a [`View`],
//! routes [`Event`]s to the handlers found in that view and drives the lifecycle of every
//! component in the tree.

use crate::{
    lifecycle::{Hook, LifecycleState, TransitionError},
    scope::{Component, Scope},
    timer::Timers,
    view::View,
};
use crossbeam_queue::SegQueue;
use std::{
    borrow::Cow,
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};
use thiserror::Error;

/// Runtime for a [`Composer`].
#[derive(Clone, Default)]
pub struct Runtime {
    /// Queue for updates issued while composing.
    update_queue: Rc<SegQueue<Box<dyn FnOnce()>>>,

    /// Intervals owned by components of this runtime.
    timers: Timers,

    /// Set when any observed state changed since the last composition.
    is_changed: Rc<Cell<bool>>,

    is_composing: Rc<Cell<bool>>,
}

impl Runtime {
    /// Get the current [`Runtime`].
    ///
    /// # Panics
    /// Panics if called outside of a runtime.
    pub fn current() -> Self {
        Self::try_current().expect("Runtime::current() called outside of a runtime")
    }

    /// Get the current [`Runtime`], if any.
    pub fn try_current() -> Option<Self> {
        RUNTIME.with(|runtime| runtime.borrow().clone())
    }

    /// Enter this runtime, making it available to [`Runtime::current`].
    pub fn enter(&self) {
        RUNTIME.with(|runtime| {
            *runtime.borrow_mut() = Some(self.clone());
        });
    }

    /// Queue an update to run after the current composition.
    pub fn update(&self, f: impl FnOnce() + 'static) {
        self.update_queue.push(Box::new(f));
    }

    /// Mark the composition as changed, scheduling a recomposition.
    pub fn set_changed(&self) {
        self.is_changed.set(true);
    }

    /// Returns `true` if the composition changed since it was last composed.
    pub fn is_changed(&self) -> bool {
        self.is_changed.get()
    }

    /// Returns `true` while a composition is running.
    pub fn is_composing(&self) -> bool {
        self.is_composing.get()
    }

    /// Timers of this runtime.
    pub fn timers(&self) -> Timers {
        self.timers.clone()
    }

    fn flush(&self) -> usize {
        let mut count = 0;
        while let Some(update) = self.update_queue.pop() {
            update();
            count += 1;
        }
        count
    }
}

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
}

/// Event sent from the host to a composition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Click the button with the given key.
    Click(Cow<'static, str>),
    /// Replace the value of the input with the given key.
    Input(Cow<'static, str>, String),
}

impl Event {
    /// Create a click event.
    pub fn click(key: impl Into<Cow<'static, str>>) -> Self {
        Self::Click(key.into())
    }

    /// Create an input event.
    pub fn input(key: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        Self::Input(key.into(), value.into())
    }

    /// Key of the element this event targets.
    pub fn key(&self) -> &str {
        match self {
            Self::Click(key) | Self::Input(key, _) => key,
        }
    }
}

/// Maximum number of compositions [`Composer::compose`] runs in a row.
pub const MAX_PASSES: usize = 100;

/// Error returned by a [`Composer`].
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The composition is not mounted.
    #[error("composition is not mounted")]
    NotMounted,
    /// No element in the current view matches the event.
    #[error("no element with key `{0}` in the current view")]
    UnknownTarget(String),
    /// A component attempted an invalid lifecycle transition.
    #[error(transparent)]
    Transition(#[from] TransitionError),
    /// State kept changing after [`MAX_PASSES`] compositions.
    #[error("composition did not settle after {} passes", MAX_PASSES)]
    TooManyUpdates,
}

/// Error returned by [`Composer::try_compose`].
#[derive(Debug, Error)]
pub enum TryComposeError {
    /// Nothing changed since the last composition.
    #[error("composition is pending")]
    Pending,
    /// The composition failed.
    #[error(transparent)]
    Error(#[from] ComposeError),
}

impl From<TransitionError> for TryComposeError {
    fn from(error: TransitionError) -> Self {
        Self::Error(error.into())
    }
}

/// Composer for a component tree.
pub struct Composer {
    content: Box<dyn Component>,
    scope: Rc<Scope>,
    rt: Runtime,
    view: Option<View>,
}

impl Composer {
    /// Create a new [`Composer`] for the given content.
    ///
    /// Nothing is composed until [`Composer::mount`] is called.
    pub fn new(content: impl Component) -> Self {
        let scope = Rc::new(Scope::new(content.name()));

        Self {
            content: Box::new(content),
            scope,
            rt: Runtime::default(),
            view: None,
        }
    }

    /// Runtime of this composer.
    pub fn runtime(&self) -> &Runtime {
        &self.rt
    }

    /// Lifecycle state of the root component.
    pub fn state(&self) -> LifecycleState {
        self.scope.state()
    }

    /// Last committed view, if mounted.
    pub fn view(&self) -> Option<&View> {
        self.view.as_ref()
    }

    /// Root scope of the composition.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Compose the content for the first time and commit it to the host.
    ///
    /// Fires [`Hook::BeforeMount`] before the view is committed and [`Hook::Mounted`] after.
    pub fn mount(&mut self) -> Result<&View, ComposeError> {
        self.rt.enter();

        let state = self.state();
        if state != LifecycleState::Created {
            return Err(TransitionError {
                from: state,
                to: LifecycleState::Mounted,
            }
            .into());
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("Mount {}", self.scope.name());

        let view = self.render();
        self.commit(view)?;

        self.view.as_ref().ok_or(ComposeError::NotMounted)
    }

    /// Try to recompose the content if any observed state changed.
    ///
    /// Fires [`Hook::BeforeUpdate`] on every mounted component before rendering and
    /// [`Hook::Updated`] after the new view is committed.
    /// Returns [`TryComposeError::Pending`] if nothing changed since the last composition.
    pub fn try_compose(&mut self) -> Result<&View, TryComposeError> {
        self.rt.enter();

        if self.state() != LifecycleState::Mounted {
            return Err(ComposeError::NotMounted.into());
        }

        self.rt.flush();
        if !self.rt.is_changed() {
            return Err(TryComposeError::Pending);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!("Start composition");

        let mut result = Ok(());
        self.scope.visit(&mut |scope| {
            if result.is_err() || scope.state() != LifecycleState::Mounted {
                return;
            }

            match scope.transition(LifecycleState::Updating) {
                Ok(transition) => {
                    if let Some(hook) = transition.before {
                        scope.emit(hook);
                    }
                }
                Err(error) => result = Err(error),
            }
        });
        result?;

        let view = self.render();
        self.commit(view)?;

        Ok(self.view.as_ref().ok_or(ComposeError::NotMounted)?)
    }

    /// Recompose until no more state changes are pending.
    ///
    /// Returns the number of compositions run, or [`ComposeError::TooManyUpdates`]
    /// if state is still changing after [`MAX_PASSES`] compositions.
    pub fn compose(&mut self) -> Result<usize, ComposeError> {
        let mut count = 0;
        while count < MAX_PASSES {
            match self.try_compose() {
                Ok(_) => count += 1,
                Err(TryComposeError::Pending) => return Ok(count),
                Err(TryComposeError::Error(error)) => return Err(error),
            }
        }

        #[cfg(feature = "tracing")]
        tracing::warn!(
            "{} did not settle after {} compositions",
            self.scope.name(),
            MAX_PASSES
        );

        Err(ComposeError::TooManyUpdates)
    }

    /// Send an event to the element with the event's key, then recompose.
    pub fn dispatch(&mut self, event: Event) -> Result<&View, ComposeError> {
        self.rt.enter();

        let view = self.view.as_ref().ok_or(ComposeError::NotMounted)?;

        #[cfg(feature = "tracing")]
        tracing::debug!("Dispatch {:?}", event);

        match event {
            Event::Click(key) => {
                let on_click = view
                    .find_button(&key)
                    .ok_or_else(|| ComposeError::UnknownTarget(key.into_owned()))?;
                on_click();
            }
            Event::Input(key, value) => {
                let on_input = view
                    .find_input(&key)
                    .ok_or_else(|| ComposeError::UnknownTarget(key.into_owned()))?;
                on_input(value);
            }
        }

        self.compose()?;
        self.view.as_ref().ok_or(ComposeError::NotMounted)
    }

    /// Move time forward, running every interval that falls due, then recompose.
    ///
    /// Returns the number of interval callbacks run.
    pub fn advance(&mut self, elapsed: Duration) -> Result<usize, ComposeError> {
        self.rt.enter();

        let fired = self.rt.timers.advance(elapsed);
        if self.state() == LifecycleState::Mounted {
            self.compose()?;
        }
        Ok(fired)
    }

    /// Tear down the composition.
    ///
    /// Fires [`Hook::BeforeUnmount`], releases every resource held by components
    /// (subscriptions, timers, teardown callbacks), then fires [`Hook::Unmounted`].
    pub fn unmount(&mut self) -> Result<(), ComposeError> {
        self.rt.enter();

        #[cfg(feature = "tracing")]
        tracing::debug!("Unmount {}", self.scope.name());

        self.scope.unmount()?;
        self.view = None;

        // Updates queued by teardown callbacks target released state.
        self.rt.flush();
        self.rt.is_changed.set(false);

        Ok(())
    }

    fn render(&mut self) -> View {
        self.rt.is_changed.set(false);
        self.rt.is_composing.set(true);

        let view = self.scope.compose(&*self.content);

        self.rt.is_composing.set(false);
        view
    }

    fn commit(&mut self, view: View) -> Result<(), TransitionError> {
        self.scope.visit(&mut |scope| {
            if scope.state() == LifecycleState::Created {
                scope.emit(Hook::BeforeMount);
            }
        });

        self.view = Some(view);

        let mut result = Ok(());
        self.scope.visit_rev(&mut |scope| {
            if result.is_err() {
                return;
            }

            let to = match scope.state() {
                LifecycleState::Created | LifecycleState::Updating => LifecycleState::Mounted,
                _ => return,
            };
            match scope.transition(to) {
                Ok(transition) => {
                    if let Some(hook) = transition.after {
                        scope.emit(hook);
                    }
                }
                Err(error) => result = Err(error),
            }
        });

        self.rt.flush();
        result
    }
}

impl Drop for Composer {
    fn drop(&mut self) {
        if self.state() != LifecycleState::Unmounted {
            let _ = self.unmount();
        }
    }
}

#[cfg(feature = "rt")]
#[cfg_attr(docsrs, doc(cfg(feature = "rt")))]
impl Composer {
    /// Run this composition until `events` is exhausted, then unmount it.
    ///
    /// Time advances by `tick` on every tick of a [`tokio::time::Interval`],
    /// so the interval callbacks of components follow the tokio clock.
    pub async fn run<S>(&mut self, tick: Duration, mut events: S) -> Result<(), ComposeError>
    where
        S: futures::Stream<Item = Event> + Unpin,
    {
        use futures::StreamExt;

        if self.state() == LifecycleState::Created {
            self.mount()?;
        }

        let mut interval = tokio::time::interval(tick);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.advance(tick)?;
                }
                event = events.next() => match event {
                    Some(event) => {
                        self.dispatch(event)?;
                    }
                    None => break,
                }
            }
        }

        self.unmount()
    }
}
