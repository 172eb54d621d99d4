// Counter driven by the tokio clock, with clicks arriving over a channel.

use futures::{channel::mpsc, SinkExt};
use reactive_showcase::{components::Counter, prelude::*};
use std::time::Duration;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::FmtSubscriber;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ComposeError> {
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(LevelFilter::TRACE)
            .finish(),
    )
    .unwrap();

    let (mut tx, rx) = mpsc::unbounded();
    tokio::spawn(async move {
        for _ in 0..3 {
            tokio::time::sleep(Duration::from_millis(750)).await;
            let _ = tx.send(Event::click("counter.increment")).await;
        }
    });

    let mut composer = Composer::new(Counter {
        interval: Duration::from_millis(500),
    });
    composer.run(Duration::from_millis(100), rx).await
}
