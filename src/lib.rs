//! catch-this - turn panics and errors into explicit outcomes
//!
//! # Overview
//!
//! `catch-this` runs one fallible unit of work, synchronous or asynchronous,
//! and hands back an [`Outcome`]: either the value it produced or the
//! [`Error`] it failed with. Nothing escapes the wrapper, nothing is logged.
//!
//! # Quick Start
//!
//! ```
//! use catch_this::{catch, run, Error};
//!
//! // A panic is contained.
//! let outcome = run(|| -> u32 { panic!("disk on fire") });
//! assert_eq!(outcome.error().unwrap().message(), "disk on fire");
//!
//! // So is an `Err`, and `?` works inside the thunk.
//! let outcome = catch(|| Ok::<_, Error>("42".parse::<u32>()? + 1));
//! assert_eq!(outcome.unwrap_or(0), 43);
//! ```
//!
//! # Entry points
//!
//! | Thunk | Function | Returns |
//! |-------|----------|---------|
//! | `\|\| value` | [`run`] | `Outcome<T>` |
//! | `\|\| Ok(value)` / `Err(e)` | [`catch`] | `Outcome<T>` |
//! | `\|\| async { value }` | [`run_async`] | [`Settle`] resolving to `Outcome<T>` |
//! | `\|\| async { Ok(value) }` | [`catch_async`] | [`Settle`] resolving to `Outcome<T>` |
//! | `#[catching] fn ..` | [`catching`] | function returns `Outcome<T>` |
//! | `attempt! { try { .. } }` | [`attempt!`] | `Outcome<T>` |
//!
//! The free functions go through [`Try::global`]. Build a [`Try`] with a
//! custom [`Normalize`] policy to change how failures become errors, either
//! locally or once per process with [`Try::install`].
//!
//! # Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | `Serialize`/`Deserialize` for `Outcome` and `Error` |
//! | `anyhow` | conversions between `Error` and `anyhow::Error` |

// ============================================================
// Modules
// ============================================================

mod error;
mod ext;
mod macros;
mod normalize;
mod outcome;
mod runner;
mod settle;

// ============================================================
// Re-exports
// ============================================================

pub use error::{Error, StringError};
pub use ext::IntoOutcome;
pub use normalize::{normalize, panic_message, Cause, DefaultNormalizer, Normalize};
pub use outcome::Outcome;
pub use runner::Try;
pub use settle::Settle;

pub use catch_this_macros::catching;

use core::future::Future;

// ============================================================
// Global entry points
// ============================================================

/// [`Try::run`] with the process-wide context.
#[inline]
pub fn run<T, F>(thunk: F) -> Outcome<T>
where
    F: FnOnce() -> T,
{
    Try::global().run(thunk)
}

/// [`Try::catch`] with the process-wide context.
#[inline]
pub fn catch<T, E, F>(thunk: F) -> Outcome<T>
where
    F: FnOnce() -> Result<T, E>,
    E: Into<Error>,
{
    Try::global().catch(thunk)
}

/// [`Try::run_async`] with the process-wide context.
#[inline]
pub fn run_async<F, Fut>(thunk: F) -> Settle<impl Future<Output = Outcome<Fut::Output>>>
where
    F: FnOnce() -> Fut,
    Fut: Future,
{
    Try::global().run_async(thunk)
}

/// [`Try::catch_async`] with the process-wide context.
#[inline]
pub fn catch_async<T, E, F, Fut>(thunk: F) -> Settle<impl Future<Output = Outcome<T>>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<Error>,
{
    Try::global().catch_async(thunk)
}
