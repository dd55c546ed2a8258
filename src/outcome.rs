//! The value-or-error container returned by every wrapper entry point.

use core::fmt;
use std::panic;

use crate::error::Error;
use crate::runner::Try;

/// Success XOR failure.
///
/// An `Outcome` is built once, by [`Outcome::ok`]/[`Outcome::err`] or by one of
/// the [`Try`] entry points, and never changes afterwards. Matching on the
/// variants is the narrowing check: inside `Outcome::Ok(v)` the value is there
/// and the error is not, and the other way round.
///
/// It can be read three ways over the same storage:
///
/// ```
/// use catch_this::Outcome;
///
/// let outcome = Outcome::ok(0);
///
/// // named
/// assert_eq!(outcome.value(), Some(&0));
/// assert!(outcome.error().is_none());
///
/// // positional: slot 0 is the value, slot 1 the error
/// let (value, error) = outcome.to_pair();
/// assert_eq!(value, Some(&0));
/// assert!(error.is_none());
///
/// // variant
/// match outcome {
///     Outcome::Ok(v) => assert_eq!(v, 0),
///     Outcome::Err(e) => panic!("unexpected failure: {e}"),
/// }
/// ```
#[must_use = "this `Outcome` may hold a failure, which should be handled"]
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    /// The thunk produced a value. Any value counts, including `()`, `0`,
    /// `None`, or an error value that was returned rather than raised.
    Ok(T),
    /// The thunk panicked or returned `Err`.
    Err(Error),
}

impl<T> Outcome<T> {
    // ========================================
    // Construction
    // ========================================

    /// Success holding `value`.
    #[inline]
    pub fn ok(value: T) -> Self {
        Outcome::Ok(value)
    }

    /// Failure holding `cause`, converted through `Into<Error>`.
    ///
    /// Structured errors keep their concrete type:
    ///
    /// ```
    /// use catch_this::Outcome;
    /// use std::io;
    ///
    /// let outcome: Outcome<()> = Outcome::err(io::Error::new(io::ErrorKind::TimedOut, "slow"));
    /// assert!(outcome.error().unwrap().is::<io::Error>());
    /// ```
    #[inline]
    pub fn err(cause: impl Into<Error>) -> Self {
        Outcome::Err(cause.into())
    }

    // ========================================
    // Accessors
    // ========================================

    /// The success payload, if any.
    #[inline]
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Ok(v) => Some(v),
            Outcome::Err(_) => None,
        }
    }

    /// The failure record, if any.
    #[inline]
    pub fn error(&self) -> Option<&Error> {
        match self {
            Outcome::Ok(_) => None,
            Outcome::Err(e) => Some(e),
        }
    }

    /// The success payload by value, dropping any error.
    #[inline]
    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::Ok(v) => Some(v),
            Outcome::Err(_) => None,
        }
    }

    /// The failure record by value, dropping any payload.
    #[inline]
    pub fn into_error(self) -> Option<Error> {
        match self {
            Outcome::Ok(_) => None,
            Outcome::Err(e) => Some(e),
        }
    }

    /// True iff there is no error.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }

    /// True iff there is an error. Always the negation of [`is_success`](Self::is_success).
    #[inline]
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Positional view: `(slot 0, slot 1)` = `(value, error)`. Exactly one is `Some`.
    #[inline]
    pub fn to_pair(&self) -> (Option<&T>, Option<&Error>) {
        (self.value(), self.error())
    }

    /// Owned positional view, for `let (value, error) = outcome.into_pair();`.
    #[inline]
    pub fn into_pair(self) -> (Option<T>, Option<Error>) {
        match self {
            Outcome::Ok(v) => (Some(v), None),
            Outcome::Err(e) => (None, Some(e)),
        }
    }

    /// Borrow the payload, sharing the error record.
    #[inline]
    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Outcome::Ok(v) => Outcome::Ok(v),
            Outcome::Err(e) => Outcome::Err(e.clone()),
        }
    }

    /// Borrowing view as a std `Result`.
    #[inline]
    pub fn as_result(&self) -> Result<&T, &Error> {
        match self {
            Outcome::Ok(v) => Ok(v),
            Outcome::Err(e) => Err(e),
        }
    }

    /// Hand the failure to `?`.
    ///
    /// ```
    /// use catch_this::{run, Error};
    ///
    /// fn parse_port(raw: &str) -> Result<u16, Error> {
    ///     let port = run(|| raw.parse::<u16>()).into_result()?;
    ///     Ok(port?)
    /// }
    /// assert_eq!(parse_port("8080").unwrap(), 8080);
    /// assert!(parse_port("http").is_err());
    /// ```
    #[inline]
    pub fn into_result(self) -> Result<T, Error> {
        match self {
            Outcome::Ok(v) => Ok(v),
            Outcome::Err(e) => Err(e),
        }
    }

    // ========================================
    // Unwrapping
    // ========================================

    /// The payload, or panic with the stored [`Error`] as panic payload.
    ///
    /// The panic carries the error itself, not a rendering of it, so an outer
    /// [`Try`] that catches it gets back the very same record.
    ///
    /// ```
    /// use catch_this::{catch, run, Error};
    ///
    /// let inner = catch(|| Err::<i32, _>(Error::msg("inner")));
    /// let original = inner.error().unwrap().clone();
    ///
    /// let outer = run(move || inner.unwrap());
    /// assert!(outer.error().unwrap().ptr_eq(&original));
    /// ```
    #[track_caller]
    #[inline]
    pub fn unwrap(self) -> T {
        match self {
            Outcome::Ok(v) => v,
            Outcome::Err(e) => panic::panic_any(e),
        }
    }

    /// The payload on success, `fallback` on failure.
    ///
    /// Only the variant decides: a falsy payload such as `0`, `false` or
    /// `None` is still returned.
    #[inline]
    pub fn unwrap_or(self, fallback: T) -> T {
        match self {
            Outcome::Ok(v) => v,
            Outcome::Err(_) => fallback,
        }
    }

    /// The payload on success, `f(error)` on failure.
    #[inline]
    pub fn unwrap_or_else<F: FnOnce(Error) -> T>(self, f: F) -> T {
        match self {
            Outcome::Ok(v) => v,
            Outcome::Err(e) => f(e),
        }
    }

    /// The payload on success, `T::default()` on failure.
    #[inline]
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.unwrap_or_else(|_| T::default())
    }

    // ========================================
    // Chaining
    // ========================================

    /// On failure, run `thunk` through the process-wide context
    /// ([`Try::global`]) and return its outcome. On success, keep `self` and
    /// never call `thunk`.
    ///
    /// The context that produced `self` is not remembered. To chain under an
    /// explicit policy, use [`Try::or`].
    ///
    /// ```
    /// use catch_this::run;
    ///
    /// let value = run(|| -> i32 { panic!("primary down") })
    ///     .or(|| panic!("replica down"))
    ///     .or(|| 42)
    ///     .or(|| unreachable!("already recovered"))
    ///     .unwrap_or(-1);
    /// assert_eq!(value, 42);
    /// ```
    pub fn or<F>(self, thunk: F) -> Outcome<T>
    where
        F: FnOnce() -> T,
    {
        Try::global().or(self, thunk)
    }

    /// Like [`or`](Self::or) with a fallible alternative. Also runs through
    /// the process-wide context; see [`Try::or_catch`] for an explicit one.
    pub fn or_catch<F, E>(self, thunk: F) -> Outcome<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<Error>,
    {
        Try::global().or_catch(self, thunk)
    }

    /// Recover from the failure with access to it.
    #[inline]
    pub fn or_else<F>(self, f: F) -> Outcome<T>
    where
        F: FnOnce(Error) -> Outcome<T>,
    {
        match self {
            Outcome::Ok(v) => Outcome::Ok(v),
            Outcome::Err(e) => f(e),
        }
    }

    /// Transform the payload, leaving a failure untouched.
    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Ok(v) => Outcome::Ok(f(v)),
            Outcome::Err(e) => Outcome::Err(e),
        }
    }

    /// Transform the error record, leaving a success untouched.
    #[inline]
    pub fn map_err<F: FnOnce(Error) -> Error>(self, f: F) -> Outcome<T> {
        match self {
            Outcome::Ok(v) => Outcome::Ok(v),
            Outcome::Err(e) => Outcome::Err(f(e)),
        }
    }

    /// Continue with another outcome-producing step on success.
    #[inline]
    pub fn and_then<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self {
            Outcome::Ok(v) => f(v),
            Outcome::Err(e) => Outcome::Err(e),
        }
    }
}

// ============================================================
// Display
// ============================================================

/// `Result.Ok(<value>)` or `Result.Error(<message>)`. A failure with an
/// empty message shows its kind instead, or `error` when it has none.
impl<T: fmt::Display> fmt::Display for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ok(v) => write!(f, "Result.Ok({})", v),
            Outcome::Err(e) => {
                let label = match e.message() {
                    "" => e.kind().unwrap_or("error"),
                    msg => msg,
                };
                write!(f, "Result.Error({})", label)
            }
        }
    }
}

// ============================================================
// Conversions
// ============================================================

impl<T, E: Into<Error>> From<Result<T, E>> for Outcome<T> {
    fn from(r: Result<T, E>) -> Self {
        match r {
            Ok(v) => Outcome::Ok(v),
            Err(e) => Outcome::Err(e.into()),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, Error> {
    fn from(o: Outcome<T>) -> Self {
        o.into_result()
    }
}

impl<T> From<Outcome<T>> for (Option<T>, Option<Error>) {
    fn from(o: Outcome<T>) -> Self {
        o.into_pair()
    }
}

// ============================================================
// Serde support
// ============================================================

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    #[serde(rename_all = "lowercase")]
    enum OutcomeRef<'a, T> {
        Ok(&'a T),
        Error(&'a Error),
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "lowercase")]
    enum OutcomeRepr<T> {
        Ok(T),
        Error(Error),
    }

    /// `{"ok": <value>}` or `{"error": {"message": .., "kind": ..}}`.
    impl<T: Serialize> Serialize for Outcome<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Outcome::Ok(v) => OutcomeRef::Ok(v),
                Outcome::Err(e) => OutcomeRef::Error(e),
            }
            .serialize(serializer)
        }
    }

    impl<'de, T: Deserialize<'de>> Deserialize<'de> for Outcome<T> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Ok(match OutcomeRepr::deserialize(deserializer)? {
                OutcomeRepr::Ok(v) => Outcome::Ok(v),
                OutcomeRepr::Error(e) => Outcome::Err(e),
            })
        }
    }
}
