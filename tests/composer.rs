use reactive_showcase::prelude::*;
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

type Log = Rc<RefCell<Vec<String>>>;

const HOOKS: [Hook; 6] = [
    Hook::BeforeMount,
    Hook::Mounted,
    Hook::BeforeUpdate,
    Hook::Updated,
    Hook::BeforeUnmount,
    Hook::Unmounted,
];

fn use_log(cx: &Scope, name: &'static str, log: &Log) {
    for hook in HOOKS {
        let log = log.clone();
        use_hook(cx, hook, move || log.borrow_mut().push(format!("{name}:{hook:?}")));
    }

    let log = log.clone();
    use_drop(cx, move || log.borrow_mut().push(format!("{name}:drop")));
}

fn take(log: &Log) -> Vec<String> {
    log.borrow_mut().drain(..).collect()
}

struct Child {
    log: Log,
}

impl Component for Child {
    fn compose(&self, cx: &Scope) -> View {
        use_log(cx, "child", &self.log);
        View::text("child")
    }
}

struct Parent {
    log: Log,
    count: Store<i32>,
}

impl Component for Parent {
    fn compose(&self, cx: &Scope) -> View {
        use_log(cx, "parent", &self.log);
        use_subscription(cx, &self.count);

        View::group([
            View::text(format!("count: {}", self.count.get())),
            cx.child("child", Child {
                log: self.log.clone(),
            }),
        ])
    }
}

#[test]
fn it_fires_lifecycle_hooks_in_order() {
    let log = Log::default();
    let count = Store::new(0);
    let mut composer = Composer::new(Parent {
        log: log.clone(),
        count: count.clone(),
    });
    assert_eq!(composer.state(), LifecycleState::Created);

    composer.mount().unwrap();
    assert_eq!(composer.state(), LifecycleState::Mounted);
    assert_eq!(
        take(&log),
        [
            "parent:BeforeMount",
            "child:BeforeMount",
            "child:Mounted",
            "parent:Mounted"
        ]
    );

    count.set(1);
    let view = composer.try_compose().unwrap();
    assert!(view.contains_text("count: 1"));
    assert_eq!(
        take(&log),
        [
            "parent:BeforeUpdate",
            "child:BeforeUpdate",
            "child:Updated",
            "parent:Updated"
        ]
    );

    composer.unmount().unwrap();
    assert_eq!(composer.state(), LifecycleState::Unmounted);
    assert!(composer.view().is_none());
    assert_eq!(
        take(&log),
        [
            "parent:BeforeUnmount",
            "child:BeforeUnmount",
            "child:drop",
            "child:Unmounted",
            "parent:drop",
            "parent:Unmounted"
        ]
    );
}

#[test]
fn it_skips_recomposition_without_changes() {
    let log = Log::default();
    let mut composer = Composer::new(Parent {
        log: log.clone(),
        count: Store::new(0),
    });
    composer.mount().unwrap();
    take(&log);

    assert!(matches!(
        composer.try_compose(),
        Err(TryComposeError::Pending)
    ));
    assert_eq!(composer.compose().unwrap(), 0);
    assert!(take(&log).is_empty());
}

#[test]
fn it_rejects_invalid_transitions() {
    let mut composer = Composer::new(Child {
        log: Log::default(),
    });

    assert!(matches!(
        composer.try_compose(),
        Err(TryComposeError::Error(ComposeError::NotMounted))
    ));
    assert!(matches!(
        composer.dispatch(Event::click("missing")),
        Err(ComposeError::NotMounted)
    ));

    composer.mount().unwrap();
    assert!(matches!(composer.mount(), Err(ComposeError::Transition(_))));

    composer.unmount().unwrap();
    assert!(matches!(composer.unmount(), Err(ComposeError::Transition(_))));
}

#[test]
fn it_defers_writes_during_composition() {
    struct Eager;

    impl Component for Eager {
        fn compose(&self, cx: &Scope) -> View {
            let count = use_store(cx, || 0);
            if count.get() == 0 {
                count.set(1);
            }

            View::text(format!("count: {}", count.get()))
        }
    }

    let mut composer = Composer::new(Eager);
    let view = composer.mount().unwrap();
    assert!(view.contains_text("count: 0"));

    let view = composer.try_compose().unwrap();
    assert!(view.contains_text("count: 1"));

    assert!(matches!(
        composer.try_compose(),
        Err(TryComposeError::Pending)
    ));
}

#[test]
fn it_unmounts_skipped_children() {
    struct Toggle {
        show: Store<bool>,
        dropped: Rc<Cell<usize>>,
    }

    struct Leaf {
        dropped: Rc<Cell<usize>>,
    }

    impl Component for Leaf {
        fn compose(&self, cx: &Scope) -> View {
            let dropped = self.dropped.clone();
            use_drop(cx, move || dropped.set(dropped.get() + 1));

            let clicks = use_store(cx, || 0);
            let increment = clicks.clone();

            View::group([
                View::text(format!("clicks: {}", clicks.get())),
                View::button("leaf.click", "Click", move || increment.update(|x| *x += 1)),
            ])
        }
    }

    impl Component for Toggle {
        fn compose(&self, cx: &Scope) -> View {
            use_subscription(cx, &self.show);

            let dropped = self.dropped.clone();
            View::when(self.show.get(), || cx.child("leaf", Leaf { dropped }))
        }
    }

    let show = Store::new(true);
    let dropped = Rc::new(Cell::new(0));
    let mut composer = Composer::new(Toggle {
        show: show.clone(),
        dropped: dropped.clone(),
    });

    composer.mount().unwrap();
    composer.dispatch(Event::click("leaf.click")).unwrap();
    assert!(composer.view().unwrap().contains_text("clicks: 1"));
    assert_eq!(composer.scope().child_count(), 1);

    show.set(false);
    let view = composer.try_compose().unwrap();
    assert!(view.is_empty());
    assert_eq!(dropped.get(), 1);
    assert_eq!(composer.scope().child_count(), 0);

    // A remounted child starts from fresh state.
    show.set(true);
    let view = composer.try_compose().unwrap();
    assert!(view.contains_text("clicks: 0"));
}

#[test]
fn it_stops_updates_that_never_settle() {
    struct Runaway {
        count: Store<u32>,
    }

    impl Component for Runaway {
        fn compose(&self, cx: &Scope) -> View {
            use_subscription(cx, &self.count);

            let bump = self.count.clone();
            use_hook(cx, Hook::Updated, move || bump.update(|x| *x += 1));

            let go = self.count.clone();
            View::button("go", "Go", move || go.update(|x| *x += 1))
        }
    }

    let count = Store::new(0);
    let mut composer = Composer::new(Runaway {
        count: count.clone(),
    });
    composer.mount().unwrap();

    assert!(matches!(
        composer.dispatch(Event::click("go")),
        Err(ComposeError::TooManyUpdates)
    ));
    assert_eq!(composer.state(), LifecycleState::Mounted);
    assert_eq!(
        count.get(),
        1 + reactive_showcase::composer::MAX_PASSES as u32
    );
}

#[test]
fn it_releases_timers_when_dropped() {
    struct Ticker {
        ticks: Store<u32>,
    }

    impl Component for Ticker {
        fn compose(&self, cx: &Scope) -> View {
            let ticks = self.ticks.clone();
            use_interval(cx, Duration::from_millis(100), move || {
                ticks.update(|x| *x += 1)
            });

            View::Empty
        }
    }

    let ticks = Store::new(0);
    let mut composer = Composer::new(Ticker {
        ticks: ticks.clone(),
    });

    let timers = composer.runtime().timers();
    assert!(timers.is_empty());

    composer.mount().unwrap();
    assert_eq!(timers.len(), 1);

    composer.advance(Duration::from_millis(350)).unwrap();
    assert_eq!(ticks.get(), 3);

    drop(composer);
    assert!(timers.is_empty());

    timers.advance(Duration::from_secs(1));
    assert_eq!(ticks.get(), 3);
}

#[cfg(feature = "rt")]
#[tokio::test(start_paused = true)]
async fn it_runs_from_an_event_stream() {
    use futures::StreamExt;

    struct Ticker {
        ticks: Store<u32>,
    }

    impl Component for Ticker {
        fn compose(&self, cx: &Scope) -> View {
            use_subscription(cx, &self.ticks);

            let ticks = self.ticks.clone();
            use_interval(cx, Duration::from_secs(1), move || ticks.update(|x| *x += 1));

            let ticks = self.ticks.clone();
            View::button("bump", "Bump", move || ticks.update(|x| *x += 10))
        }
    }

    let ticks = Store::new(0);
    let mut composer = Composer::new(Ticker {
        ticks: ticks.clone(),
    });

    let events = Box::pin(futures::stream::iter([Event::click("bump")]).then(|event| async move {
        tokio::time::sleep(Duration::from_millis(2500)).await;
        event
    }));

    composer.run(Duration::from_secs(1), events).await.unwrap();

    assert_eq!(ticks.get(), 12);
    assert_eq!(composer.state(), LifecycleState::Unmounted);
    assert!(composer.runtime().timers().is_empty());
}
