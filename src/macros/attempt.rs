//! The `attempt!` macro - block syntax over the fallible entry points.

/// Run a block through the installed [`Try`](crate::Try), with `?` raising.
///
/// The block's value is the success payload. Any `?` converts its error
/// through `Into<Error>` and turns the whole block into a failure; so does a
/// panic.
///
/// # Patterns
///
/// ## Sync
/// ```
/// use catch_this::{attempt, Outcome};
///
/// let port: Outcome<u16> = attempt! { try { "8080".parse::<u16>()? } };
/// assert_eq!(port.unwrap(), 8080);
///
/// let port: Outcome<u16> = attempt! { try { "http".parse::<u16>()? } };
/// assert!(port.is_failure());
/// ```
///
/// ## Async
/// ```
/// use catch_this::attempt;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let answer = attempt! { async try { async { 41 }.await + 1 } }.await;
/// assert_eq!(answer.unwrap(), 42);
/// # }
/// ```
#[macro_export]
macro_rules! attempt {
    // async try { }
    (async try { $($body:tt)* }) => {
        $crate::Try::global().catch_async(|| async move {
            ::core::result::Result::Ok::<_, $crate::Error>({ $($body)* })
        })
    };

    // try { }
    (try { $($body:tt)* }) => {
        $crate::Try::global().catch(|| {
            ::core::result::Result::Ok::<_, $crate::Error>({ $($body)* })
        })
    };

    ($($other:tt)*) => {
        ::core::compile_error!("expected `attempt! { try { .. } }` or `attempt! { async try { .. } }`")
    };
}
