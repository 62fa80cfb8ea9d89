//! Deferred evaluation with and without caching.
//!
//! Run with `RUST_LOG=info cargo run --example lazy_value` to see timings.

use std::thread;
use std::time::Duration;

use idiomata::control::{Deferred, DeferredCell};
use idiomata::timing::ScopeTimer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[allow(clippy::cast_precision_loss)]
fn calculate(input: i32) -> f32 {
    thread::sleep(Duration::from_millis(100));
    input as f32 / 2.0
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazy_value=info,idiomata=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let input = 42;

    {
        let timer = ScopeTimer::start("recomputed");
        let value = Deferred::new(|| calculate(input));

        timer.checkpoint("before first use");
        println!("Value = {:.6}", value.read());
        timer.checkpoint("before second use");
        println!("Value = {:.6}", value.read());
    }

    {
        let timer = ScopeTimer::start("cached");
        let value = DeferredCell::new(|| calculate(input));

        timer.checkpoint("before first use");
        println!("Value = {:.6}", *value);
        timer.checkpoint("before second use");
        println!("Value = {:.6}", *value);
    }
}
