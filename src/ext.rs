//! Extension trait for std `Result` types.

use crate::error::Error;
use crate::outcome::Outcome;

/// Convert a std `Result` into an [`Outcome`].
pub trait IntoOutcome<T> {
    fn into_outcome(self) -> Outcome<T>;
}

impl<T, E: Into<Error>> IntoOutcome<T> for Result<T, E> {
    #[inline]
    fn into_outcome(self) -> Outcome<T> {
        Outcome::from(self)
    }
}
