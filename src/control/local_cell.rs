//! Single-threaded deferred evaluation with caching.
//!
//! [`LocalDeferredCell`] is the `!Sync` counterpart of
//! [`DeferredCell`](super::DeferredCell). It needs no lock: the value lives in
//! a `OnceCell` and the computation in a `RefCell`.

use std::cell::{OnceCell, RefCell};
use std::convert::Infallible;
use std::fmt;
use std::ops::Deref;

use static_assertions::assert_not_impl_any;
use tracing::{debug, trace};

use super::ComputationFailure;

/// A write-once cache in front of a zero-argument computation, for one thread.
///
/// The computation runs on the first read and its result is cached. If it
/// fails, nothing is cached and the next read retries.
///
/// # Examples
///
/// ```rust
/// use idiomata::control::LocalDeferredCell;
/// use std::cell::Cell;
///
/// let call_count = Cell::new(0);
/// let cell = LocalDeferredCell::new(|| {
///     call_count.set(call_count.get() + 1);
///     42
/// });
///
/// assert_eq!(call_count.get(), 0);
/// assert_eq!(*cell.force(), 42);
/// assert_eq!(*cell.force(), 42);
/// assert_eq!(call_count.get(), 1);
/// ```
pub struct LocalDeferredCell<T, F = fn() -> T> {
    value: OnceCell<T>,
    computation: RefCell<Option<F>>,
}

assert_not_impl_any!(LocalDeferredCell<i32>: Sync);

impl<T, F: FnMut() -> T> LocalDeferredCell<T, F> {
    /// Creates a cell for an infallible computation.
    #[inline]
    pub const fn new(computation: F) -> Self {
        Self {
            value: OnceCell::new(),
            computation: RefCell::new(Some(computation)),
        }
    }

    /// Returns the cached value, running the computation first if needed.
    ///
    /// # Panics
    ///
    /// - If the computation panics. The cell stays empty and a later call
    ///   retries.
    /// - If called from inside this cell's own computation.
    pub fn force(&self) -> &T {
        let Ok(value) = self.populate(|computation| Ok::<_, Infallible>(computation()));
        value
    }
}

impl<T, F> LocalDeferredCell<T, F> {
    /// Creates a cell for a computation that can fail.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use idiomata::control::LocalDeferredCell;
    ///
    /// let cell = LocalDeferredCell::fallible(|| "0x2a".parse::<i32>());
    /// assert!(cell.try_force().is_err());
    /// assert!(cell.get().is_none());
    /// ```
    #[inline]
    pub const fn fallible<E>(computation: F) -> Self
    where
        F: FnMut() -> Result<T, E>,
    {
        Self {
            value: OnceCell::new(),
            computation: RefCell::new(Some(computation)),
        }
    }

    /// Returns the cached value, running the fallible computation first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ComputationFailure`] wrapping the computation's error. The
    /// cell stays empty.
    ///
    /// # Panics
    ///
    /// Panics if called from inside this cell's own computation.
    pub fn try_force<E>(&self) -> Result<&T, ComputationFailure<E>>
    where
        F: FnMut() -> Result<T, E>,
    {
        self.populate(|computation| computation().map_err(ComputationFailure))
    }

    fn populate<E>(&self, run: impl FnOnce(&mut F) -> Result<T, E>) -> Result<&T, E> {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let Ok(mut slot) = self.computation.try_borrow_mut() else {
            panic!("LocalDeferredCell: reentrant initialization");
        };
        let Some(computation) = slot.as_mut() else {
            unreachable!("computation is released only after the value is stored");
        };

        match run(computation) {
            Ok(computed) => {
                let value = self.value.get_or_init(|| computed);
                *slot = None;
                trace!("local deferred cell populated");
                Ok(value)
            }
            Err(error) => {
                debug!("local deferred computation failed, cell left empty");
                Err(error)
            }
        }
    }

    /// Returns the cached value without running the computation.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.value.get()
    }

    /// Returns whether the value has been computed and cached.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.value.get().is_some()
    }

    /// Consumes the cell and returns the cached value, if any.
    #[inline]
    pub fn into_inner(self) -> Option<T> {
        self.value.into_inner()
    }
}

impl<T> LocalDeferredCell<T> {
    /// Creates a cell that already holds `value`.
    #[inline]
    pub fn with_value(value: T) -> Self {
        Self {
            value: OnceCell::from(value),
            computation: RefCell::new(None),
        }
    }
}

impl<T: Default> Default for LocalDeferredCell<T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T, F: FnMut() -> T> Deref for LocalDeferredCell<T, F> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        self.force()
    }
}

impl<T: fmt::Debug, F> fmt::Debug for LocalDeferredCell<T, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.get() {
            Some(value) => formatter
                .debug_tuple("LocalDeferredCell")
                .field(value)
                .finish(),
            None => formatter
                .debug_tuple("LocalDeferredCell")
                .field(&format_args!("<uninit>"))
                .finish(),
        }
    }
}
