//! Maybe-style accessors and lifting for `Option`.

use std::fmt;

use thiserror::Error;

/// The value of `Nothing` was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("trying to get the value of Nothing")]
pub struct NothingError;

/// Maybe-style accessors for `Option`.
pub trait MaybeExt<T> {
    /// Returns `true` for `Just` (`Some`).
    fn is_just(&self) -> bool;

    /// Returns `true` for `Nothing` (`None`).
    fn is_nothing(&self) -> bool;

    /// Returns the contained value.
    ///
    /// # Errors
    ///
    /// Returns [`NothingError`] for `Nothing`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use idiomata::maybe::{MaybeExt, NothingError};
    ///
    /// assert_eq!(Some(3).value(), Ok(&3));
    /// assert_eq!(None::<i32>.value(), Err(NothingError));
    /// ```
    fn value(&self) -> Result<&T, NothingError>;

    /// Returns a display adapter rendering `Just(x)` or `Nothing`.
    fn show(&self) -> ShowMaybe<'_, T>;
}

impl<T> MaybeExt<T> for Option<T> {
    #[inline]
    fn is_just(&self) -> bool {
        self.is_some()
    }

    #[inline]
    fn is_nothing(&self) -> bool {
        self.is_none()
    }

    #[inline]
    fn value(&self) -> Result<&T, NothingError> {
        self.as_ref().ok_or(NothingError)
    }

    #[inline]
    fn show(&self) -> ShowMaybe<'_, T> {
        ShowMaybe(self)
    }
}

/// Renders an `Option` as `Just(x)` or `Nothing`.
///
/// Created by [`MaybeExt::show`]. `Display` uses the value's `Display`,
/// `Debug` uses its `Debug`.
#[derive(Clone, Copy)]
pub struct ShowMaybe<'a, T>(&'a Option<T>);

impl<T: fmt::Display> fmt::Display for ShowMaybe<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(formatter, "Just({value})"),
            None => formatter.write_str("Nothing"),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ShowMaybe<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => formatter.debug_tuple("Just").field(value).finish(),
            None => formatter.write_str("Nothing"),
        }
    }
}

/// Lifts `function` into a function over `Option`.
///
/// `lift(f)(Some(a))` is `Some(f(a))`; `lift(f)(None)` is `None`. The lifted
/// function can be called any number of times.
///
/// # Examples
///
/// ```rust
/// use idiomata::maybe::lift;
///
/// let to_upper = lift(|text: &str| text.to_uppercase());
///
/// assert_eq!(to_upper(Some("abc")), Some(String::from("ABC")));
/// assert_eq!(to_upper(None), None);
/// ```
pub fn lift<A, B, F>(function: F) -> impl Fn(Option<A>) -> Option<B>
where
    F: Fn(A) -> B,
{
    move |maybe: Option<A>| maybe.map(&function)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("Functional-style Rust"), "Just(Functional-style Rust)")]
    #[case(None, "Nothing")]
    fn test_show_display(#[case] maybe: Option<&str>, #[case] expected: &str) {
        assert_eq!(maybe.show().to_string(), expected);
    }

    #[rstest]
    fn test_show_debug() {
        assert_eq!(format!("{:?}", Some("x").show()), "Just(\"x\")");
        assert_eq!(format!("{:?}", None::<u8>.show()), "Nothing");
    }

    #[rstest]
    fn test_just_and_nothing() {
        assert!(Some(1).is_just());
        assert!(!Some(1).is_nothing());
        assert!(None::<i32>.is_nothing());
    }

    #[rstest]
    fn test_value_of_nothing_is_an_error() {
        assert_eq!(
            None::<String>.value().unwrap_err().to_string(),
            "trying to get the value of Nothing"
        );
    }

    #[rstest]
    fn test_lift_is_reusable() {
        let double = lift(|x: i32| x * 2);
        assert_eq!(double(Some(2)), Some(4));
        assert_eq!(double(Some(5)), Some(10));
        assert_eq!(double(None), None);
    }
}
