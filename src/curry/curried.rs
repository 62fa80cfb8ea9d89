//! Runtime currying over homogeneous argument lists.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use thiserror::Error;
use tracing::trace;

/// Errors raised while building or applying a [`Curried`] function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CurryError {
    /// A curried function must take at least one argument.
    #[error("a curried function needs an arity of at least one")]
    ZeroArity,

    /// More arguments were supplied than the function takes.
    #[error("too many arguments: arity is {arity}, at least {supplied} supplied")]
    TooManyArguments {
        /// The function's arity.
        arity: usize,
        /// The number of arguments captured plus supplied, counted up to one
        /// past the arity.
        supplied: usize,
    },
}

/// A function of fixed arity together with the arguments captured so far.
///
/// The function receives all of its arguments at once as a `Vec<A>` of
/// length `arity`. Use an enum for `A` when arguments have different types.
///
/// # Type Parameters
///
/// * `A` - The argument type
/// * `R` - The result type
/// * `F` - The wrapped function
pub struct Curried<A, R, F> {
    function: Rc<F>,
    arity: usize,
    captured: Vec<A>,
    output: PhantomData<fn() -> R>,
}

/// The result of applying arguments to a [`Curried`] function.
pub enum Application<A, R, F> {
    /// Not enough arguments yet; apply more to the contained value.
    Partial(Curried<A, R, F>),
    /// The function ran with exactly `arity` arguments.
    Complete(R),
}

impl<A, R, F> Curried<A, R, F>
where
    A: Clone,
    F: Fn(Vec<A>) -> R,
{
    /// Wraps `function` with no captured arguments.
    ///
    /// # Errors
    ///
    /// Returns [`CurryError::ZeroArity`] when `arity` is zero.
    pub fn new(arity: usize, function: F) -> Result<Self, CurryError> {
        if arity == 0 {
            return Err(CurryError::ZeroArity);
        }
        Ok(Self {
            function: Rc::new(function),
            arity,
            captured: Vec::new(),
            output: PhantomData,
        })
    }

    /// Appends `arguments` to a copy of the captured list.
    ///
    /// Returns a partial application while arguments are missing, and runs
    /// the function once there are exactly `arity` of them. `self` is left
    /// unchanged, and applying nothing returns an equivalent partial.
    ///
    /// # Errors
    ///
    /// Returns [`CurryError::TooManyArguments`] when the total exceeds the arity.
    /// At most one argument past the arity is pulled from `arguments`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use idiomata::curry::{Curried, CurryError};
    ///
    /// let add = Curried::new(2, |arguments: Vec<i32>| arguments.iter().sum::<i32>())?;
    ///
    /// assert_eq!(add.apply([1, 2])?.complete(), Some(3));
    /// assert_eq!(
    ///     add.apply([1, 2, 3]).err(),
    ///     Some(CurryError::TooManyArguments { arity: 2, supplied: 3 })
    /// );
    /// # Ok::<(), CurryError>(())
    /// ```
    pub fn apply<I>(&self, arguments: I) -> Result<Application<A, R, F>, CurryError>
    where
        I: IntoIterator<Item = A>,
    {
        let mut captured = self.captured.clone();
        captured.extend(arguments.into_iter().take(self.remaining() + 1));

        match captured.len().cmp(&self.arity) {
            Ordering::Less => {
                trace!(
                    captured = captured.len(),
                    arity = self.arity,
                    "partial application"
                );
                Ok(Application::Partial(Self {
                    function: Rc::clone(&self.function),
                    arity: self.arity,
                    captured,
                    output: PhantomData,
                }))
            }
            Ordering::Equal => Ok(Application::Complete((self.function)(captured))),
            Ordering::Greater => Err(CurryError::TooManyArguments {
                arity: self.arity,
                supplied: captured.len(),
            }),
        }
    }

    /// Applies a single argument.
    ///
    /// # Errors
    ///
    /// Returns [`CurryError::TooManyArguments`] when the function is already
    /// saturated, which cannot happen for a value obtained from `new` or from
    /// a partial application.
    #[inline]
    pub fn apply_one(&self, argument: A) -> Result<Application<A, R, F>, CurryError> {
        self.apply(std::iter::once(argument))
    }
}

impl<A, R, F> Curried<A, R, F> {
    /// Returns the arguments captured so far.
    #[inline]
    pub fn captured(&self) -> &[A] {
        &self.captured
    }

    /// Returns the number of arguments the function takes.
    #[inline]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// Returns the number of arguments still missing.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.arity - self.captured.len()
    }
}

impl<A: Clone, R, F> Clone for Curried<A, R, F> {
    fn clone(&self) -> Self {
        Self {
            function: Rc::clone(&self.function),
            arity: self.arity,
            captured: self.captured.clone(),
            output: PhantomData,
        }
    }
}

impl<A: fmt::Debug, R, F> fmt::Debug for Curried<A, R, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Curried")
            .field("arity", &self.arity)
            .field("captured", &self.captured)
            .finish_non_exhaustive()
    }
}

impl<A, R, F> Application<A, R, F> {
    /// Returns `true` if the function ran.
    #[inline]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    /// Returns the result if the function ran.
    #[inline]
    pub fn complete(self) -> Option<R> {
        match self {
            Self::Complete(result) => Some(result),
            Self::Partial(_) => None,
        }
    }

    /// Returns the partial application if arguments are still missing.
    #[inline]
    pub fn partial(self) -> Option<Curried<A, R, F>> {
        match self {
            Self::Partial(curried) => Some(curried),
            Self::Complete(_) => None,
        }
    }
}

impl<A: fmt::Debug, R: fmt::Debug, F> fmt::Debug for Application<A, R, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Partial(curried) => formatter.debug_tuple("Partial").field(curried).finish(),
            Self::Complete(result) => formatter.debug_tuple("Complete").field(result).finish(),
        }
    }
}

/// Wraps `function` of the given arity in a [`Curried`].
///
/// Shorthand for [`Curried::new`].
///
/// # Errors
///
/// Returns [`CurryError::ZeroArity`] when `arity` is zero.
pub fn curry<A, R, F>(arity: usize, function: F) -> Result<Curried<A, R, F>, CurryError>
where
    A: Clone,
    F: Fn(Vec<A>) -> R,
{
    Curried::new(arity, function)
}
