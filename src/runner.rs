//! The execution wrapper: run a thunk, contain its failure, hand back an [`Outcome`].

use core::fmt;
use core::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};

use futures_util::FutureExt;

use crate::error::Error;
use crate::normalize::{Cause, DefaultNormalizer, Normalize};
use crate::outcome::Outcome;
use crate::settle::Settle;

/// Process-wide context, see [`Try::install`].
static GLOBAL: OnceLock<Try> = OnceLock::new();

/// Execution context: the normalization policy every failure goes through.
///
/// Cloning is cheap (the policy is shared). Build one explicitly and pass it
/// where it is needed, or [`install`](Try::install) one process-wide at
/// startup for the free functions ([`run`](crate::run), [`catch`](crate::catch), ...)
/// and for [`Outcome::or`].
///
/// Which entry point to use is decided by the thunk's signature:
///
/// | thunk | entry point | failure comes from |
/// |-------|-------------|--------------------|
/// | `FnOnce() -> T` | [`run`](Try::run) | panic |
/// | `FnOnce() -> Result<T, E>` | [`catch`](Try::catch) | `Err` or panic |
/// | `FnOnce() -> impl Future<Output = T>` | [`run_async`](Try::run_async) | panic while building or polling |
/// | `FnOnce() -> impl Future<Output = Result<T, E>>` | [`catch_async`](Try::catch_async) | `Err` or panic |
///
/// Nothing is logged. Caught panics still pass through the process panic
/// hook, which this crate never touches.
#[derive(Clone)]
pub struct Try {
    normalizer: Arc<dyn Normalize>,
}

impl Try {
    /// Context with the default policy ([`normalize`](crate::normalize)).
    pub fn new() -> Self {
        Self::with_normalizer(DefaultNormalizer)
    }

    /// Context with a custom policy.
    pub fn with_normalizer(normalizer: impl Normalize) -> Self {
        Self {
            normalizer: Arc::new(normalizer),
        }
    }

    /// The process-wide context: the one passed to [`install`](Try::install),
    /// or the default policy if none was.
    pub fn global() -> &'static Try {
        GLOBAL.get_or_init(Try::new)
    }

    /// Make `self` the process-wide context.
    ///
    /// Works once, before anything has read [`Try::global`]. Later calls hand
    /// the context back unchanged.
    pub fn install(self) -> Result<(), Try> {
        GLOBAL.set(self)
    }

    /// Apply this context's policy to a cause.
    #[inline]
    pub fn normalize(&self, cause: Cause) -> Error {
        self.normalizer.normalize(cause)
    }

    // ========================================
    // Synchronous
    // ========================================

    /// Run an infallible thunk. A panic becomes a failure; any returned
    /// value, an error value included, is a success.
    ///
    /// ```
    /// use catch_this::Try;
    ///
    /// let t = Try::new();
    /// assert_eq!(t.run(|| 7).unwrap(), 7);
    ///
    /// let failed = t.run(|| -> i32 { panic!("boom") });
    /// assert_eq!(failed.error().unwrap().message(), "boom");
    /// ```
    pub fn run<T, F>(&self, thunk: F) -> Outcome<T>
    where
        F: FnOnce() -> T,
    {
        match panic::catch_unwind(AssertUnwindSafe(thunk)) {
            Ok(v) => Outcome::Ok(v),
            Err(payload) => Outcome::Err(self.normalize(Cause::Panicked(payload))),
        }
    }

    /// Run a fallible thunk. `Err` and panics both become failures; `?`
    /// inside the thunk raises.
    ///
    /// ```
    /// use catch_this::{Error, Try};
    ///
    /// let t = Try::new();
    /// let port = t.catch(|| {
    ///     let raw = "80a";
    ///     Ok::<_, Error>(raw.parse::<u16>()?)
    /// });
    /// assert!(port.error().unwrap().is::<std::num::ParseIntError>());
    /// ```
    pub fn catch<T, E, F>(&self, thunk: F) -> Outcome<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<Error>,
    {
        match panic::catch_unwind(AssertUnwindSafe(thunk)) {
            Ok(Ok(v)) => Outcome::Ok(v),
            Ok(Err(e)) => Outcome::Err(self.normalize(Cause::Returned(e.into()))),
            Err(payload) => Outcome::Err(self.normalize(Cause::Panicked(payload))),
        }
    }

    // ========================================
    // Chaining
    // ========================================

    /// [`Outcome::or`] under this context: on failure, run `thunk` with this
    /// policy; on success, keep `outcome` and never call `thunk`.
    ///
    /// ```
    /// use catch_this::{Cause, Error, Try};
    ///
    /// let strict = Try::with_normalizer(|_: Cause| Error::msg("replica failed"));
    /// let first = strict.run(|| -> u8 { panic!("primary down") });
    /// let second = strict.or(first, || panic!("replica down"));
    /// assert_eq!(second.error().unwrap().message(), "replica failed");
    /// ```
    pub fn or<T, F>(&self, outcome: Outcome<T>, thunk: F) -> Outcome<T>
    where
        F: FnOnce() -> T,
    {
        match outcome {
            Outcome::Ok(v) => Outcome::Ok(v),
            Outcome::Err(_) => self.run(thunk),
        }
    }

    /// [`Outcome::or_catch`] under this context.
    pub fn or_catch<T, E, F>(&self, outcome: Outcome<T>, thunk: F) -> Outcome<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<Error>,
    {
        match outcome {
            Outcome::Ok(v) => Outcome::Ok(v),
            Outcome::Err(_) => self.catch(thunk),
        }
    }

    // ========================================
    // Deferred
    // ========================================

    /// Run a thunk producing a future.
    ///
    /// The thunk is called right away. If that call panics, the returned
    /// [`Settle`] is already settled with the failure. Otherwise it wraps the
    /// future, which only makes progress when the `Settle` is polled; panics
    /// raised while polling become failures.
    ///
    /// ```
    /// use catch_this::Try;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let outcome = Try::new().run_async(|| async { 456 }).await;
    /// assert_eq!(outcome.unwrap(), 456);
    /// # }
    /// ```
    pub fn run_async<F, Fut>(&self, thunk: F) -> Settle<impl Future<Output = Outcome<Fut::Output>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future,
    {
        match panic::catch_unwind(AssertUnwindSafe(thunk)) {
            Ok(fut) => {
                let ctx = self.clone();
                Settle::pending(AssertUnwindSafe(fut).catch_unwind().map(move |polled| match polled {
                    Ok(v) => Outcome::Ok(v),
                    Err(payload) => Outcome::Err(ctx.normalize(Cause::Panicked(payload))),
                }))
            }
            Err(payload) => Settle::settled(Outcome::Err(self.normalize(Cause::Panicked(payload)))),
        }
    }

    /// Run a thunk producing a future of `Result`. Like
    /// [`run_async`](Try::run_async), with `Err` outputs as failures too.
    pub fn catch_async<T, E, F, Fut>(&self, thunk: F) -> Settle<impl Future<Output = Outcome<T>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<Error>,
    {
        match panic::catch_unwind(AssertUnwindSafe(thunk)) {
            Ok(fut) => {
                let ctx = self.clone();
                Settle::pending(AssertUnwindSafe(fut).catch_unwind().map(move |polled| match polled {
                    Ok(Ok(v)) => Outcome::Ok(v),
                    Ok(Err(e)) => Outcome::Err(ctx.normalize(Cause::Returned(e.into()))),
                    Err(payload) => Outcome::Err(ctx.normalize(Cause::Panicked(payload))),
                }))
            }
            Err(payload) => Settle::settled(Outcome::Err(self.normalize(Cause::Panicked(payload)))),
        }
    }
}

impl Default for Try {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Try {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Try").finish_non_exhaustive()
    }
}
