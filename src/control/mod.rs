//! Deferred evaluation, with and without caching.
//!
//! This module provides three ways to postpone a computation until its value
//! is first needed:
//!
//! - [`Deferred`]: runs the computation on every read, caches nothing
//! - [`LocalDeferredCell`]: caches the first successful result, single thread
//! - [`DeferredCell`]: caches the first successful result, shareable between
//!   threads, computation runs at most once per successful population
//!
//! Caching cells never cache a failure. When a computation returns `Err`
//! (surfaced as [`ComputationFailure`]) or panics, the cell stays empty and
//! the next read runs the computation again.
//!
//! # Examples
//!
//! ## Recomputing vs caching
//!
//! ```rust
//! use idiomata::control::{Deferred, DeferredCell};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! fn calculate(input: i32, calls: &AtomicUsize) -> f32 {
//!     calls.fetch_add(1, Ordering::SeqCst);
//!     input as f32 / 2.0
//! }
//!
//! let calls = AtomicUsize::new(0);
//! let recomputed = Deferred::new(|| calculate(42, &calls));
//! assert_eq!(recomputed.read(), 21.0);
//! assert_eq!(recomputed.read(), 21.0);
//! assert_eq!(calls.load(Ordering::SeqCst), 2);
//!
//! let calls = AtomicUsize::new(0);
//! let cached = DeferredCell::new(|| calculate(42, &calls));
//! assert_eq!(*cached, 21.0);
//! assert_eq!(*cached, 21.0);
//! assert_eq!(calls.load(Ordering::SeqCst), 1);
//! ```

mod deferred;
mod deferred_cell;
mod error;
mod local_cell;

pub use deferred::Deferred;
pub use deferred_cell::DeferredCell;
pub use error::ComputationFailure;
pub use local_cell::LocalDeferredCell;
