//! The error reported by caching cells when their computation fails.

use thiserror::Error;

/// A computation wrapped by a cell returned an error.
///
/// The cell never produces errors of its own: this type only carries the
/// computation's error back to the caller of
/// [`DeferredCell::try_force`](super::DeferredCell::try_force) or
/// [`LocalDeferredCell::try_force`](super::LocalDeferredCell::try_force).
/// Nothing is cached when this is returned, so the next read runs the
/// computation again. The wrapped error is also reported as the
/// [`source`](std::error::Error::source) of the failure.
///
/// # Examples
///
/// ```rust
/// use idiomata::control::{ComputationFailure, DeferredCell};
///
/// let cell = DeferredCell::fallible(|| "x".parse::<i32>());
/// let failure: ComputationFailure<_> = cell.try_force().unwrap_err();
/// assert_eq!(failure.inner().to_string(), "invalid digit found in string");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("deferred computation failed: {0}")]
pub struct ComputationFailure<E>(#[source] pub E);

impl<E> ComputationFailure<E> {
    /// Returns a reference to the computation's error.
    #[inline]
    pub const fn inner(&self) -> &E {
        &self.0
    }

    /// Consumes the failure and returns the computation's error.
    #[inline]
    pub fn into_inner(self) -> E {
        self.0
    }
}
