//! A slow two-argument function, called directly and through `Memoized`.
//!
//! The inputs are skewed towards small numbers, so many calls repeat and the
//! memoized version skips most of the artificial delay.

use std::thread;
use std::time::Duration;

use idiomata::memo::memoize;
use idiomata::timing::ScopeTimer;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const NUMBER_OF_INPUT_VALUES: u32 = 100;
const INPUT_SEED: u64 = 42;

/// Absolute values drawn from `Normal(0, 2)`, truncated towards zero.
///
/// Most inputs land in `0..=3`. The generator is seeded so every run sees the
/// same inputs.
#[allow(clippy::cast_possible_truncation)]
fn generate_input_values() -> Vec<(i32, i32)> {
    let mut rng = StdRng::seed_from_u64(INPUT_SEED);
    let distribution =
        Normal::new(0.0_f64, 2.0).expect("standard deviation is finite and positive");
    let mut draw = move || distribution.sample(&mut rng).abs() as i32;
    (0..NUMBER_OF_INPUT_VALUES)
        .map(|_| (draw(), draw()))
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn func(first: i32, second: i32) -> f32 {
    let result = first as f32 / second as f32;
    thread::sleep(Duration::from_millis(10));
    result
}

fn run(name: &str, inputs: &[(i32, i32)], function: impl Fn(i32, i32) -> f32) {
    println!("\n{name}:");
    let _timer = ScopeTimer::start(name);
    for &(first, second) in inputs {
        function(first, second);
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memoized_function=info,idiomata=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let inputs = generate_input_values();
    let func_memoized = memoize(|(first, second): (i32, i32)| func(first, second));

    run("Regular function", &inputs, func);
    run("Memoized function", &inputs, |first, second| {
        func_memoized.call((first, second))
    });

    println!("\n{func_memoized:?}");
}
