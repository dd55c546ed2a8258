//! Turning raw failure causes into [`Error`] records.

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;

use crate::error::Error;

/// Text used for panic payloads that are neither strings nor errors.
/// Matches what the std panic hook prints for them.
const OPAQUE_PAYLOAD: &str = "Box<dyn Any>";

/// A failure as it left the thunk, before normalization.
pub enum Cause {
    /// An `Err` returned by a fallible thunk, already converted through
    /// `Into<Error>`.
    Returned(Error),
    /// A raw panic payload caught at the wrapper boundary.
    Panicked(Box<dyn Any + Send + 'static>),
}

impl fmt::Debug for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::Returned(e) => f.debug_tuple("Returned").field(e).finish(),
            Cause::Panicked(p) => f
                .debug_tuple("Panicked")
                .field(&panic_message(p.as_ref()).unwrap_or(OPAQUE_PAYLOAD))
                .finish(),
        }
    }
}

/// Strategy for converting a [`Cause`] into an [`Error`].
///
/// Implemented for any `Fn(Cause) -> Error`, so a closure can be handed
/// straight to [`Try::with_normalizer`](crate::Try::with_normalizer):
///
/// ```
/// use catch_this::{normalize, Cause, Error, Try};
///
/// let tagged = Try::with_normalizer(|cause: Cause| match cause {
///     Cause::Panicked(_) => Error::msg("worker crashed"),
///     other => normalize(other),
/// });
///
/// let outcome = tagged.run(|| -> u8 { panic!("index out of range") });
/// assert_eq!(outcome.error().unwrap().message(), "worker crashed");
/// ```
pub trait Normalize: Send + Sync + 'static {
    /// Build the error record stored in the failed [`Outcome`](crate::Outcome).
    fn normalize(&self, cause: Cause) -> Error;
}

impl<F> Normalize for F
where
    F: Fn(Cause) -> Error + Send + Sync + 'static,
{
    #[inline]
    fn normalize(&self, cause: Cause) -> Error {
        self(cause)
    }
}

/// The built-in policy, see [`normalize`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNormalizer;

impl Normalize for DefaultNormalizer {
    #[inline]
    fn normalize(&self, cause: Cause) -> Error {
        normalize(cause)
    }
}

/// Default normalization.
///
/// - `Returned` errors pass through unchanged.
/// - A panic carrying an [`Error`] (what [`Outcome::unwrap`] raises) yields
///   that same error.
/// - A panic carrying a boxed `std::error::Error` stays structured.
/// - `&str` and `String` payloads become a message error.
/// - Anything else becomes a message error reading `Box<dyn Any>`.
///
/// A panic payload can only be recognized as an error through one of the two
/// shapes above. `panic_any(io_error)` with a bare concrete error type, or a
/// non-string value such as `panic_any(42)`, comes back as `Box<dyn Any>`
/// with no kind. To keep the kind of a raised error, panic with an [`Error`]
/// or a `Box<dyn std::error::Error + Send + Sync>`.
///
/// [`Outcome::unwrap`]: crate::Outcome::unwrap
pub fn normalize(cause: Cause) -> Error {
    match cause {
        Cause::Returned(e) => e,
        Cause::Panicked(payload) => from_payload(payload),
    }
}

fn from_payload(payload: Box<dyn Any + Send + 'static>) -> Error {
    let payload = match payload.downcast::<Error>() {
        Ok(e) => return *e,
        Err(p) => p,
    };
    let payload = match payload.downcast::<Box<dyn StdError + Send + Sync + 'static>>() {
        Ok(e) => return Error::from_box(*e),
        Err(p) => p,
    };
    Error::msg(panic_message(payload.as_ref()).unwrap_or(OPAQUE_PAYLOAD))
}

/// The message of a string panic payload (`panic!("..")` produces either a
/// `&'static str` or a `String`).
pub fn panic_message<'a>(payload: &'a (dyn Any + Send + 'static)) -> Option<&'a str> {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        Some(*s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        Some(s.as_str())
    } else {
        None
    }
}
