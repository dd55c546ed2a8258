//! Proc macros for the catch-this crate.
//!
//! Provides the `#[catching]` attribute, which moves a function body behind
//! the execution wrapper so the function returns an `Outcome`.

use proc_macro::TokenStream;

mod catching;
mod signature;

/// Run a function's body through `catch_this::Try::global()`.
///
/// The return type `T` becomes `catch_this::Outcome<T>`. The entry point is
/// picked from the signature:
///
/// | Signature | Body runs through |
/// |-----------|-------------------|
/// | `fn f() -> T` | `Try::run` |
/// | `fn f() -> Result<T, E>` | `Try::catch` (`?` raises) |
/// | `async fn f() -> T` | `Try::run_async` |
/// | `async fn f() -> Result<T, E>` | `Try::catch_async` |
///
/// Any return type whose last path segment is `Result` counts as fallible,
/// so aliases such as `io::Result<T>` work too.
///
/// ```ignore
/// use catch_this::{catching, Outcome};
///
/// #[catching]
/// fn parse(raw: &str) -> Result<u16, std::num::ParseIntError> {
///     raw.parse()
/// }
///
/// let port: Outcome<u16> = parse("8080");
/// ```
#[proc_macro_attribute]
pub fn catching(attr: TokenStream, item: TokenStream) -> TokenStream {
    catching::expand(attr.into(), item.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
