//! Argument-keyed result caching for pure functions.

use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use static_assertions::assert_impl_all;
use tracing::trace;

#[cfg(feature = "fxhash")]
type Cache<A, R> = rustc_hash::FxHashMap<A, R>;

#[cfg(not(feature = "fxhash"))]
type Cache<A, R> = std::collections::HashMap<A, R>;

/// Hit and miss counters of a [`Memoized`] function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoStats {
    /// Calls answered from the cache.
    pub hits: u64,
    /// Calls that ran the wrapped function.
    pub misses: u64,
}

/// A function whose results are cached by argument.
///
/// `Memoized` is safe to share between threads. The cache lock is held only
/// for lookups and inserts; the wrapped function runs outside it. Two threads
/// missing on the same argument at the same time may both run the function,
/// in which case the first stored result is returned to both.
///
/// # Type Parameters
///
/// * `A` - The argument type (use a tuple for several arguments)
/// * `R` - The result type
/// * `F` - The wrapped function
///
/// # Examples
///
/// ```rust
/// use idiomata::memo::Memoized;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let calls = AtomicUsize::new(0);
/// let square = Memoized::new(|x: u64| {
///     calls.fetch_add(1, Ordering::SeqCst);
///     x * x
/// });
///
/// assert_eq!(square.call(12), 144);
/// assert_eq!(square.call(12), 144);
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// ```
pub struct Memoized<A, R, F> {
    function: F,
    cache: Mutex<Cache<A, R>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

assert_impl_all!(Memoized<u32, String, fn(u32) -> String>: Send, Sync);

impl<A, R, F> Memoized<A, R, F>
where
    A: Eq + Hash + Clone,
    R: Clone,
    F: Fn(A) -> R,
{
    /// Wraps `function` with an empty cache.
    pub fn new(function: F) -> Self {
        Self {
            function,
            cache: Mutex::new(Cache::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the result for `argument`, computing and caching it on a miss.
    pub fn call(&self, argument: A) -> R {
        let cached = self.cache.lock().get(&argument).cloned();
        if let Some(result) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!("memo cache hit");
            return result;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!("memo cache miss");
        let result = (self.function)(argument.clone());

        self.cache.lock().entry(argument).or_insert(result).clone()
    }

    /// Borrows the memoized function as a plain closure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use idiomata::memo::Memoized;
    ///
    /// let double = Memoized::new(|x: i32| x * 2);
    /// let doubled: Vec<_> = [1, 2, 1].into_iter().map(double.as_fn()).collect();
    ///
    /// assert_eq!(doubled, vec![2, 4, 2]);
    /// assert_eq!(double.cached_len(), 2);
    /// ```
    pub fn as_fn(&self) -> impl Fn(A) -> R + '_ {
        move |argument| self.call(argument)
    }
}

impl<A, R, F> Memoized<A, R, F>
where
    A: Eq + Hash,
{
    /// Returns whether a result for `argument` is cached.
    pub fn is_cached(&self, argument: &A) -> bool {
        self.cache.lock().contains_key(argument)
    }

    /// Returns the number of cached results.
    pub fn cached_len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Drops every cached result. Counters are kept.
    pub fn clear(&self) {
        self.cache.lock().clear();
    }

    /// Returns the hit and miss counters.
    pub fn stats(&self) -> MemoStats {
        MemoStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<A, R, F> fmt::Debug for Memoized<A, R, F>
where
    A: Eq + Hash,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Memoized")
            .field("cached", &self.cached_len())
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

/// Wraps `function` in a [`Memoized`].
///
/// Shorthand for [`Memoized::new`].
pub fn memoize<A, R, F>(function: F) -> Memoized<A, R, F>
where
    A: Eq + Hash + Clone,
    R: Clone,
    F: Fn(A) -> R,
{
    Memoized::new(function)
}
