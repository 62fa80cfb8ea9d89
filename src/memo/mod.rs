//! Memoization of pure functions.
//!
//! [`Memoized`] wraps a function and caches each result under the argument
//! that produced it. Functions of several arguments are memoized over a tuple.
//!
//! # Examples
//!
//! ```rust
//! use idiomata::memo::memoize;
//!
//! fn divide(numerator: i32, denominator: i32) -> f32 {
//!     numerator as f32 / denominator as f32
//! }
//!
//! let memoized = memoize(|(numerator, denominator): (i32, i32)| divide(numerator, denominator));
//!
//! assert_eq!(memoized.call((1, 2)), 0.5);
//! assert_eq!(memoized.call((1, 2)), 0.5);
//! assert_eq!(memoized.stats().misses, 1);
//! assert_eq!(memoized.stats().hits, 1);
//! ```
//!
//! # Hashing
//!
//! The cache is a `std::collections::HashMap`. With the `fxhash` feature it is
//! a `rustc_hash::FxHashMap`, which is faster for small integer keys.

mod memoized;

pub use memoized::{MemoStats, Memoized, memoize};
