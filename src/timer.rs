//! Scoped timers.
//!
//! Time is driven explicitly by the host through [`Timers::advance`],
//! so interval callbacks run on the same thread as every other event.

use crate::{composer::Runtime, lifecycle::Hook, use_hook, use_ref, Scope};
use slotmap::{DefaultKey, SlotMap};
use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
    time::Duration,
};

/// Shortest supported interval period.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Most callbacks a single [`Timers::advance`] runs.
///
/// Ticks missed past this limit are skipped and each overdue interval restarts
/// one period after the new time.
pub const MAX_CATCH_UP: usize = 1024;

struct Interval {
    period: Duration,
    next: Duration,
    f: Rc<dyn Fn()>,
}

#[derive(Default)]
struct Queue {
    now: Duration,
    intervals: SlotMap<DefaultKey, Interval>,
}

/// Interval scheduler.
///
/// Cloning returns another handle to the same scheduler.
#[derive(Clone, Default)]
pub struct Timers {
    queue: Rc<RefCell<Queue>>,
}

impl Timers {
    /// Create an empty scheduler at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since this scheduler was created.
    pub fn now(&self) -> Duration {
        self.queue.borrow().now
    }

    /// Number of active intervals.
    pub fn len(&self) -> usize {
        self.queue.borrow().intervals.len()
    }

    /// Returns `true` if no interval is active.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call `f` every `period` until the returned handle is dropped.
    ///
    /// Periods shorter than [`MIN_PERIOD`] are rounded up.
    pub fn set_interval(&self, period: Duration, f: impl Fn() + 'static) -> TimerHandle {
        let period = period.max(MIN_PERIOD);

        let mut queue = self.queue.borrow_mut();
        let next = queue.now.saturating_add(period);
        let key = queue.intervals.insert(Interval {
            period,
            next,
            f: Rc::new(f),
        });

        #[cfg(feature = "tracing")]
        tracing::trace!("Set interval {:?} every {:?}", key, period);

        TimerHandle {
            key,
            queue: Rc::downgrade(&self.queue),
        }
    }

    /// Move time forward by `elapsed`, running every interval that falls due in order.
    ///
    /// Returns the number of callbacks run.
    pub fn advance(&self, elapsed: Duration) -> usize {
        let target = self.queue.borrow().now.saturating_add(elapsed);
        let mut fired = 0;

        loop {
            if fired == MAX_CATCH_UP {
                self.skip_overdue(target);
                break;
            }

            let f = {
                let mut queue = self.queue.borrow_mut();
                let due = queue
                    .intervals
                    .iter()
                    .filter(|(_, interval)| is_due(interval, target))
                    .min_by_key(|(_, interval)| interval.next)
                    .map(|(key, _)| key);

                let Some(key) = due else {
                    break;
                };

                let interval = &mut queue.intervals[key];
                let at = interval.next;
                interval.next = interval.next.saturating_add(interval.period);
                let f = interval.f.clone();
                queue.now = at;
                f
            };

            f();
            fired += 1;
        }

        self.queue.borrow_mut().now = target;
        fired
    }

    fn skip_overdue(&self, target: Duration) {
        let mut queue = self.queue.borrow_mut();
        for (_key, interval) in queue.intervals.iter_mut() {
            if is_due(interval, target) {
                #[cfg(feature = "tracing")]
                tracing::warn!("Interval {:?} fell behind, skipping missed ticks", _key);

                interval.next = target.saturating_add(interval.period);
            }
        }
    }
}

// An interval saturated at `Duration::MAX` never fires again.
fn is_due(interval: &Interval, target: Duration) -> bool {
    interval.next <= target && interval.next < Duration::MAX
}

impl fmt::Debug for Timers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timers")
            .field("now", &self.now())
            .field("intervals", &self.len())
            .finish()
    }
}

/// Handle to an interval created with [`Timers::set_interval`].
///
/// Dropping this handle cancels the interval.
#[must_use = "Intervals are cancelled when their handle is dropped."]
pub struct TimerHandle {
    key: DefaultKey,
    queue: Weak<RefCell<Queue>>,
}

impl TimerHandle {
    /// Returns `true` if the interval is still scheduled.
    pub fn is_active(&self) -> bool {
        self.queue
            .upgrade()
            .is_some_and(|queue| queue.borrow().intervals.contains_key(self.key))
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(queue) = self.queue.upgrade() {
            queue.borrow_mut().intervals.remove(self.key);

            #[cfg(feature = "tracing")]
            tracing::trace!("Cancel interval {:?}", self.key);
        }
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("key", &self.key)
            .field("is_active", &self.is_active())
            .finish()
    }
}

/// Use an interval that runs while this component is mounted.
///
/// The interval starts on [`Hook::Mounted`] and is cancelled when the component is torn down.
/// Only the callback from the first composition is used.
///
/// # Panics
/// Panics if called outside of a runtime.
pub fn use_interval(cx: &Scope, period: Duration, f: impl Fn() + 'static) {
    let handle = use_ref(cx, || RefCell::new(None::<TimerHandle>));

    // The slot owns the handle, so releasing the scope's hooks cancels the interval.
    let handle = Rc::downgrade(&handle);
    let timers = Runtime::current().timers();
    let f = Rc::new(f);
    use_hook(cx, Hook::Mounted, move || {
        let Some(handle) = handle.upgrade() else {
            return;
        };

        let mut handle = handle.borrow_mut();
        if handle.is_none() {
            let f = f.clone();
            *handle = Some(timers.set_interval(period, move || f()));
        }
    });
}
