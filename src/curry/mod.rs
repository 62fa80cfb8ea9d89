//! Currying and partial application as an explicit builder.
//!
//! A [`Curried`] value holds a function, its arity and the arguments captured
//! so far. [`Curried::apply`] never changes the value it is called on: it
//! returns an [`Application`], which is either
//!
//! - [`Application::Partial`]: a new `Curried` with more captured arguments, or
//! - [`Application::Complete`]: the function's result once the arity is met.
//!
//! Because partial applications are immutable they can be reused to finish
//! several different calls.
//!
//! # Examples
//!
//! ```rust
//! use idiomata::curry::{Application, Curried};
//!
//! fn api(arguments: Vec<i32>) -> String {
//!     format!("{}, {}, {}", arguments[0], arguments[1], arguments[2])
//! }
//!
//! let api_curried = Curried::new(3, api)?;
//!
//! let request1 = api_curried.apply_one(17)?.partial().unwrap();
//! let request2 = request1.apply_one(42)?.partial().unwrap();
//!
//! assert_eq!(request1.apply([42, 56])?.complete().as_deref(), Some("17, 42, 56"));
//! assert_eq!(request2.apply_one(56)?.complete().as_deref(), Some("17, 42, 56"));
//! assert!(matches!(api_curried.apply([17, 42, 56])?, Application::Complete(_)));
//! # Ok::<(), idiomata::curry::CurryError>(())
//! ```

mod curried;

pub use curried::{Application, Curried, CurryError, curry};
