use super::{Counter, SignupForm, StatusToggle, TodoList};
use crate::prelude::*;
use std::{borrow::Cow, time::Duration};

/// Banner shown while offline.
pub const OFFLINE_BANNER: &str = "You are offline. Sign-up is unavailable.";

/// Configuration of a [`Page`].
#[derive(Clone, Debug)]
pub struct PageConfig {
    /// Page heading.
    pub title: Cow<'static, str>,
    /// Period of the counter's automatic increment.
    pub tick: Duration,
    /// Texts the todo list starts with.
    pub seed: Vec<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: Cow::Borrowed("Reactive showcase"),
            tick: Counter::default().interval,
            seed: TodoList::default().seed,
        }
    }
}

/// Page wiring every component together.
///
/// The sign-up form is unmounted while the status is offline.
#[derive(Clone, Debug, Default)]
pub struct Page {
    config: PageConfig,
}

impl Page {
    /// Create a page with the given configuration.
    pub fn new(config: PageConfig) -> Self {
        Self { config }
    }

    /// Configuration of this page.
    pub fn config(&self) -> &PageConfig {
        &self.config
    }
}

impl Component for Page {
    fn compose(&self, cx: &Scope) -> View {
        let online = use_store(cx, || true);
        let is_online = online.get();

        View::group([
            View::heading(self.config.title.clone()),
            View::when(!is_online, || View::text(OFFLINE_BANNER)),
            cx.child(
                "counter",
                Counter {
                    interval: self.config.tick,
                },
            ),
            cx.child("status", StatusToggle { online }),
            cx.child(
                "todo",
                TodoList {
                    seed: self.config.seed.clone(),
                },
            ),
            View::when(is_online, || cx.child("form", SignupForm)),
        ])
    }
}
