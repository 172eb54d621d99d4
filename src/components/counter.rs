use crate::prelude::*;
use std::time::Duration;

/// Counter that increments itself while mounted.
///
/// Buttons: `counter.increment`, `counter.decrement`, `counter.reset`.
#[derive(Clone, Debug)]
pub struct Counter {
    /// Period of the automatic increment.
    pub interval: Duration,
}

impl Default for Counter {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
        }
    }
}

impl Component for Counter {
    fn compose(&self, cx: &Scope) -> View {
        let count = use_store(cx, || 0i64);
        let double = use_computed(cx, &count, |x| x * 2);

        let last_change = use_store(cx, || None::<(i64, i64)>);
        let last_change_handle = last_change.clone();
        use_watch(cx, &count, move |old, new| {
            #[cfg(feature = "tracing")]
            tracing::debug!("Count changed from {} to {}", old, new);

            last_change_handle.set(Some((*old, *new)));
        });

        let tick = count.clone();
        use_interval(cx, self.interval, move || tick.update(|x| *x += 1));

        use_hook(cx, Hook::Mounted, || {
            #[cfg(feature = "tracing")]
            tracing::info!("Counter mounted");
        });
        use_hook(cx, Hook::Unmounted, || {
            #[cfg(feature = "tracing")]
            tracing::info!("Counter unmounted");
        });

        let value = count.get();
        let increment = count.clone();
        let decrement = count.clone();
        let reset = count.clone();

        View::group([
            View::heading("Counter"),
            View::text(format!("Count: {value}")),
            View::text(format!("Double: {}", double.get())),
            View::when(value < 0, || View::text("Below zero!")),
            match last_change.get() {
                Some((old, new)) => View::text(format!("Last change: {old} -> {new}")),
                None => View::Empty,
            },
            View::button("counter.increment", "+", move || {
                increment.update(|x| *x += 1)
            }),
            View::button("counter.decrement", "-", move || {
                decrement.update(|x| *x -= 1)
            }),
            View::button("counter.reset", "Reset", move || reset.set(0)),
        ])
    }
}
