//! Thread-safe deferred evaluation with caching.
//!
//! [`DeferredCell`] runs its computation on first read and caches the result.
//! Any number of threads may read the same cell; the computation runs at most
//! once per successful population and every reader observes the same value.
//!
//! # Population
//!
//! - Reads of an already-populated cell are lock-free (`OnceLock::get`).
//! - Otherwise the reader takes the cell's guard, checks again, and runs the
//!   computation while holding it. Readers arriving meanwhile block on the
//!   guard and then see the stored value.
//! - If the computation fails (returns `Err` or panics), nothing is stored and
//!   the guard is released. The next read runs the computation again. The cell
//!   is never poisoned.
//! - Once the value is stored, the computation is dropped.
//!
//! # Re-entry
//!
//! Reading a cell from inside its own computation on the same thread panics
//! with "reentrant initialization" rather than deadlocking.
//!
//! # Examples
//!
//! ```rust
//! use idiomata::control::DeferredCell;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::thread;
//!
//! let calls = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&calls);
//! let cell = Arc::new(DeferredCell::new(move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//!     42
//! }));
//!
//! let handles: Vec<_> = (0..10)
//!     .map(|_| {
//!         let cell = Arc::clone(&cell);
//!         thread::spawn(move || *cell.force())
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     assert_eq!(handle.join().unwrap(), 42);
//! }
//! assert_eq!(calls.load(Ordering::SeqCst), 1);
//! ```

use std::cell::RefCell;
use std::convert::Infallible;
use std::fmt;
use std::ops::Deref;
use std::sync::OnceLock;

use parking_lot::ReentrantMutex;
use static_assertions::assert_impl_all;
use tracing::{debug, trace};

use super::ComputationFailure;

/// A thread-safe, write-once cache in front of a zero-argument computation.
///
/// `DeferredCell<T, F>` defers its computation until the value is first read
/// through [`force`](Self::force), [`try_force`](Self::try_force) or `Deref`.
/// The result is cached; later reads return it without recomputing.
///
/// # Type Parameters
///
/// * `T` - The type of the computed value
/// * `F` - The type of the computation (defaults to `fn() -> T`)
///
/// # Thread Safety
///
/// `DeferredCell` is `Send + Sync` when `T: Send + Sync` and `F: Send`.
///
/// # Examples
///
/// ## Reading like an eager value
///
/// ```rust
/// use idiomata::control::DeferredCell;
///
/// let input = 42;
/// let half = DeferredCell::new(move || input as f32 / 2.0);
///
/// assert_eq!(format!("{:.1}", *half), "21.0");
/// assert!(half.is_finite());
/// ```
///
/// ## Retrying after a failure
///
/// ```rust
/// use idiomata::control::DeferredCell;
/// use std::cell::Cell;
///
/// let attempts = Cell::new(0);
/// let cell = DeferredCell::fallible(|| {
///     attempts.set(attempts.get() + 1);
///     if attempts.get() == 1 { Err("not yet") } else { Ok(7) }
/// });
///
/// assert!(cell.try_force().is_err());
/// assert!(!cell.is_initialized());
/// assert_eq!(cell.try_force(), Ok(&7));
/// ```
pub struct DeferredCell<T, F = fn() -> T> {
    value: OnceLock<T>,
    guard: ReentrantMutex<RefCell<Option<F>>>,
}

assert_impl_all!(DeferredCell<i32>: Send, Sync);
assert_impl_all!(DeferredCell<String, Box<dyn FnMut() -> String + Send>>: Send, Sync);

impl<T, F: FnMut() -> T> DeferredCell<T, F> {
    /// Creates a cell for an infallible computation.
    ///
    /// The computation will not run until the cell is read.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use idiomata::control::DeferredCell;
    ///
    /// let cell = DeferredCell::new(|| vec![1, 2, 3]);
    /// assert!(cell.get().is_none());
    /// ```
    #[inline]
    pub fn new(computation: F) -> Self {
        Self::from_computation(computation)
    }

    /// Returns the cached value, running the computation first if needed.
    ///
    /// # Panics
    ///
    /// - If the computation panics. The cell stays empty and a later call
    ///   retries.
    /// - If called from inside this cell's own computation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use idiomata::control::DeferredCell;
    ///
    /// let cell = DeferredCell::new(|| "hello".to_uppercase());
    /// assert_eq!(cell.force(), "HELLO");
    /// ```
    pub fn force(&self) -> &T {
        let Ok(value) = self.populate(|computation| Ok::<_, Infallible>(computation()));
        value
    }

    /// Builds a cell whose value is `function` applied to this cell's value.
    ///
    /// The new cell owns `self`; forcing it forces `self` first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use idiomata::control::DeferredCell;
    ///
    /// let length = DeferredCell::new(|| String::from("functional")).map(|text| text.len());
    /// assert_eq!(*length.force(), 10);
    /// ```
    pub fn map<U, G>(self, mut function: G) -> DeferredCell<U, impl FnMut() -> U>
    where
        G: FnMut(&T) -> U,
    {
        DeferredCell::new(move || function(self.force()))
    }
}

impl<T, F> DeferredCell<T, F> {
    /// Creates a cell for a computation that can fail.
    ///
    /// Read it with [`try_force`](Self::try_force).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use idiomata::control::DeferredCell;
    ///
    /// let cell = DeferredCell::fallible(|| "42".parse::<u8>());
    /// assert_eq!(cell.try_force(), Ok(&42));
    /// ```
    #[inline]
    pub fn fallible<E>(computation: F) -> Self
    where
        F: FnMut() -> Result<T, E>,
    {
        Self::from_computation(computation)
    }

    fn from_computation(computation: F) -> Self {
        Self {
            value: OnceLock::new(),
            guard: ReentrantMutex::new(RefCell::new(Some(computation))),
        }
    }

    /// Returns the cached value, running the fallible computation first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ComputationFailure`] wrapping the computation's error. Nothing
    /// is cached in that case, so a later call runs the computation again.
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

    /// Check-and-populate under the guard.
    fn populate<E>(&self, run: impl FnOnce(&mut F) -> Result<T, E>) -> Result<&T, E> {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let guard = self.guard.lock();

        // Another reader may have populated the cell while we waited.
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let Ok(mut slot) = guard.try_borrow_mut() else {
            panic!("DeferredCell: reentrant initialization");
        };
        let Some(computation) = slot.as_mut() else {
            unreachable!("computation is released only after the value is stored");
        };

        match run(computation) {
            Ok(computed) => {
                let value = self.value.get_or_init(|| computed);
                *slot = None;
                trace!("deferred cell populated");
                Ok(value)
            }
            Err(error) => {
                debug!("deferred computation failed, cell left empty");
                Err(error)
            }
        }
    }

    /// Returns the cached value without running the computation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use idiomata::control::DeferredCell;
    ///
    /// let cell = DeferredCell::new(|| 42);
    /// assert!(cell.get().is_none());
    ///
    /// let _ = cell.force();
    /// assert_eq!(cell.get(), Some(&42));
    /// ```
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
    ///
    /// The computation is not run.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use idiomata::control::DeferredCell;
    ///
    /// let cell = DeferredCell::new(|| 42);
    /// let _ = cell.force();
    /// assert_eq!(cell.into_inner(), Some(42));
    ///
    /// let untouched = DeferredCell::new(|| 42);
    /// assert_eq!(untouched.into_inner(), None);
    /// ```
    #[inline]
    pub fn into_inner(self) -> Option<T> {
        self.value.into_inner()
    }
}

impl<T> DeferredCell<T> {
    /// Creates a cell that already holds `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use idiomata::control::DeferredCell;
    ///
    /// let cell = DeferredCell::with_value(42);
    /// assert!(cell.is_initialized());
    /// ```
    #[inline]
    pub fn with_value(value: T) -> Self {
        Self {
            value: OnceLock::from(value),
            guard: ReentrantMutex::new(RefCell::new(None)),
        }
    }
}

impl<T: Default> Default for DeferredCell<T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T, F: FnMut() -> T> Deref for DeferredCell<T, F> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        self.force()
    }
}

impl<T: fmt::Debug, F> fmt::Debug for DeferredCell<T, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.get() {
            Some(value) => formatter.debug_tuple("DeferredCell").field(value).finish(),
            None => formatter
                .debug_tuple("DeferredCell")
                .field(&format_args!("<uninit>"))
                .finish(),
        }
    }
}

impl<T: fmt::Display, F> fmt::Display for DeferredCell<T, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.get() {
            Some(value) => fmt::Display::fmt(value, formatter),
            None => formatter.write_str("<uninit>"),
        }
    }
}
