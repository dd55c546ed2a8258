//! The `throw!` macro - early failure from a fallible thunk.

/// Return early with an [`Error`](crate::Error).
///
/// - `throw!("text {}", arg)` raises a message error.
/// - `throw!(value)` raises `value` converted through `Into<Error>`,
///   keeping its concrete type.
///
/// ```
/// use catch_this::{catch, throw, Error};
/// use std::io;
///
/// let outcome = catch(|| -> Result<u8, Error> {
///     throw!("limit is {}", 3);
/// });
/// assert_eq!(outcome.error().unwrap().message(), "limit is 3");
///
/// let outcome = catch(|| -> Result<u8, Error> {
///     throw!(io::Error::new(io::ErrorKind::TimedOut, "slow"));
/// });
/// assert!(outcome.error().unwrap().is::<io::Error>());
/// ```
#[macro_export]
macro_rules! throw {
    ($msg:literal $(,)?) => {
        return ::core::result::Result::Err($crate::Error::msg(::std::format!($msg)))
    };
    ($fmt:literal, $($arg:tt)+) => {
        return ::core::result::Result::Err($crate::Error::msg(::std::format!($fmt, $($arg)+)))
    };
    ($err:expr $(,)?) => {
        return ::core::result::Result::Err(::core::convert::Into::<$crate::Error>::into($err))
    };
}
