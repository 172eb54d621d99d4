// Showcase page driven by a scripted list of events.

use reactive_showcase::{components::Page, prelude::*};
use std::time::Duration;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<(), ComposeError> {
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(LevelFilter::DEBUG)
            .finish(),
    )
    .unwrap();

    let mut composer = Composer::new(Page::default());
    println!("{}", composer.mount()?);

    let script = [
        Event::click("counter.increment"),
        Event::input("todo.new", "Fourth item"),
        Event::click("todo.add"),
        Event::click("todo.remove.2"),
        Event::input("todo.query", "item"),
        Event::input("form.name", "Ada"),
        Event::input("form.email", "ada@example"),
        Event::click("form.submit"),
        Event::input("form.email", "ada@example.com"),
        Event::click("form.submit"),
        Event::click("status.toggle"),
    ];

    for event in script {
        println!("> {event:?}");
        println!("{}", composer.dispatch(event)?);
    }

    composer.advance(Duration::from_secs(3))?;
    println!("> 3 seconds later");
    if let Some(view) = composer.view() {
        println!("{view}");
    }

    composer.unmount()
}
