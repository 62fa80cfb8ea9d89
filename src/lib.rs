//! # idiomata
//!
//! Functional programming idioms for Rust: deferred evaluation with optional
//! caching, memoization, currying and the Maybe vocabulary over `Option`.
//!
//! ## Overview
//!
//! - **Control**: [`Deferred`](control::Deferred) (recomputes on every read),
//!   [`LocalDeferredCell`](control::LocalDeferredCell) (caches, single thread) and
//!   [`DeferredCell`](control::DeferredCell) (caches, exactly-once across threads)
//! - **Memoization**: [`Memoized`](memo::Memoized) caches results keyed by argument
//! - **Currying**: [`Curried`](curry::Curried) accumulates arguments until saturated
//! - **Maybe**: [`MaybeExt`](maybe::MaybeExt) and [`lift`](maybe::lift) on `Option`
//! - **Timing**: [`ScopeTimer`](timing::ScopeTimer) reports elapsed time through `tracing`
//!
//! ## Feature Flags
//!
//! - `control`: Deferred values and cells
//! - `memo`: Memoized functions
//! - `curry`: Runtime currying
//! - `maybe`: Maybe helpers for `Option`
//! - `timing`: Scope timer
//! - `fxhash`: Use `FxHashMap` for memo caches
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use idiomata::prelude::*;
//!
//! let half = DeferredCell::new(|| 42.0_f32 / 2.0);
//! assert!(!half.is_initialized());
//! assert_eq!(*half, 21.0);
//! assert!(half.is_initialized());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use idiomata::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "memo")]
    pub use crate::memo::*;

    #[cfg(feature = "curry")]
    pub use crate::curry::*;

    #[cfg(feature = "maybe")]
    pub use crate::maybe::*;

    #[cfg(feature = "timing")]
    pub use crate::timing::*;
}

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "memo")]
pub mod memo;

#[cfg(feature = "curry")]
pub mod curry;

#[cfg(feature = "maybe")]
pub mod maybe;

#[cfg(feature = "timing")]
pub mod timing;
