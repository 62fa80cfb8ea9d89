//! The Maybe vocabulary on top of `Option`.
//!
//! `Option<T>` already is the Maybe type: `Some` is `Just`, `None` is
//! `Nothing`, and `Option::map` is the functor map. This module adds the
//! pieces that `Option` does not have out of the box:
//!
//! - [`MaybeExt`]: `is_just`, `is_nothing`, checked [`value`](MaybeExt::value)
//!   access and `Just(x)` / `Nothing` rendering through [`show`](MaybeExt::show)
//! - [`lift`]: turns `A -> B` into `Option<A> -> Option<B>` (the curried `map`)
//!
//! # Examples
//!
//! ```rust
//! use idiomata::maybe::{MaybeExt, lift};
//!
//! fn length(text: String) -> usize {
//!     text.len()
//! }
//!
//! fn is_even(number: usize) -> bool {
//!     number % 2 == 0
//! }
//!
//! let input = Some(String::from("Functional-style Rust"));
//! let nothing: Option<String> = None;
//!
//! let length_is_even = |maybe| lift(is_even)(lift(length)(maybe));
//!
//! assert_eq!(length_is_even(input).show().to_string(), "Just(false)");
//! assert_eq!(length_is_even(nothing).show().to_string(), "Nothing");
//! ```

mod option_ext;

pub use option_ext::{MaybeExt, NothingError, ShowMaybe, lift};
