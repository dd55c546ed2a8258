//! The normalized failure record stored in a failed [`Outcome`](crate::Outcome).

use std::any::type_name;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::sync::{Arc, OnceLock};

// ============================================================
// Error
// ============================================================

/// Type-erased failure record.
///
/// `Error` wraps any `std::error::Error` behind an `Arc`, so cloning an
/// [`Outcome`](crate::Outcome) never clones the underlying error. Two kinds of
/// errors end up here:
///
/// - **Structured** errors (`Error::new`, or `?` on any `std::error::Error`):
///   the concrete type is kept and can be recovered with [`downcast_ref`] or
///   tested with [`is`]. [`kind`] reports its type name.
/// - **Message** errors (`Error::msg`, panics with a string payload): a plain
///   [`StringError`] with no kind.
///
/// `Error` does NOT implement `std::error::Error` itself. That keeps the
/// blanket `From<E: std::error::Error>` impl coherent, which is what lets `?`
/// convert any error inside a fallible thunk.
///
/// [`downcast_ref`]: Error::downcast_ref
/// [`is`]: Error::is
/// [`kind`]: Error::kind
#[derive(Clone)]
pub struct Error {
    inner: Arc<dyn StdError + Send + Sync + 'static>,
    kind: Option<Cow<'static, str>>,
    /// Lazy message - only computed when accessed via `message()`.
    message: OnceLock<String>,
}

impl Error {
    /// Wrap a structured error, keeping its concrete type.
    #[inline]
    pub fn new<E: StdError + Send + Sync + 'static>(e: E) -> Self {
        Self {
            inner: Arc::new(e),
            kind: Some(Cow::Borrowed(type_name::<E>())),
            message: OnceLock::new(),
        }
    }

    /// Create a generic error from a message.
    /// Message is pre-initialized since we already have it.
    #[inline]
    pub fn msg(message: impl Into<String>) -> Self {
        let message = message.into();
        let lock = OnceLock::new();
        let _ = lock.set(message.clone());
        Self {
            inner: Arc::new(StringError(message)),
            kind: None,
            message: lock,
        }
    }

    /// Wrap an already boxed error.
    ///
    /// The concrete type survives for `downcast_ref`, but its name is no
    /// longer known statically, so `kind()` reports `dyn Error`.
    #[inline]
    pub fn from_box(e: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        let kind = if e.is::<StringError>() {
            None
        } else {
            Some(Cow::Borrowed("dyn Error"))
        };
        Self {
            inner: Arc::from(e),
            kind,
            message: OnceLock::new(),
        }
    }

    #[cfg(feature = "serde")]
    pub(crate) fn with_kind(mut self, kind: Option<Cow<'static, str>>) -> Self {
        self.kind = kind;
        self
    }

    /// Human-readable message, computed lazily on first access.
    pub fn message(&self) -> &str {
        self.message.get_or_init(|| self.inner.to_string())
    }

    /// Type name of the original structured error, `None` for message errors.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// Whether the stored error is of type `E`.
    #[inline]
    pub fn is<E: StdError + 'static>(&self) -> bool {
        self.inner.is::<E>()
    }

    /// Try to downcast to a specific error type.
    #[inline]
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }

    /// Get the inner error as a trait object reference.
    #[inline]
    pub fn as_dyn_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.inner.as_ref()
    }

    /// Whether both records share the same underlying error.
    ///
    /// Clones of one `Error` compare equal here, which is how a failure raised
    /// by [`Outcome::unwrap`](crate::Outcome::unwrap) and caught again by an
    /// outer wrapper can be recognized as the same error.
    #[inline]
    pub fn ptr_eq(&self, other: &Error) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Convert an `anyhow::Error`, keeping its rendered message.
    #[cfg(feature = "anyhow")]
    pub fn from_anyhow(e: anyhow::Error) -> Self {
        let boxed: Box<dyn StdError + Send + Sync + 'static> = e.into();
        Self::from_box(boxed)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Error");
        if let Some(kind) = self.kind() {
            s.field("kind", &kind);
        }
        s.field("message", &self.message()).finish()
    }
}

// From impl for Error - enables ? operator in fallible thunks.
// This doesn't conflict with From<T> for T because Error doesn't implement Error.
impl<E: StdError + Send + Sync + 'static> From<E> for Error {
    fn from(e: E) -> Self {
        Error::new(e)
    }
}

/// Bridge back into std error handling, e.g. `outcome.into_result()?` in a
/// function returning `Box<dyn Error + Send + Sync>`.
impl From<Error> for Box<dyn StdError + Send + Sync + 'static> {
    fn from(e: Error) -> Self {
        Box::new(Shared(e))
    }
}

#[cfg(feature = "anyhow")]
impl From<Error> for anyhow::Error {
    fn from(e: Error) -> Self {
        anyhow::Error::new(Shared(e))
    }
}

/// `std::error::Error` view over a shared record. Kept private so `Error`
/// itself never satisfies the blanket `From` bound above.
struct Shared(Error);

impl fmt::Debug for Shared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for Shared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.message())
    }
}

impl StdError for Shared {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.inner.source()
    }
}

// ============================================================
// StringError
// ============================================================

/// Generic error record carrying only a message.
///
/// Produced for every cause that was not already a structured error: string
/// panics, non-string panic payloads, and [`Error::msg`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringError(pub(crate) String);

impl StringError {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for StringError {}

// ============================================================
// Serde support
// ============================================================

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct SerializedError {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
    }

    impl Serialize for Error {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            SerializedError {
                message: self.message().to_string(),
                kind: self.kind().map(str::to_string),
            }
            .serialize(serializer)
        }
    }

    // The concrete type cannot be rebuilt, so the record comes back
    // message-backed with its kind name preserved.
    impl<'de> Deserialize<'de> for Error {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let serialized = SerializedError::deserialize(deserializer)?;
            Ok(Error::msg(serialized.message).with_kind(serialized.kind.map(Cow::Owned)))
        }
    }
}
