//! Declarative macros for catch-this.

// Both macros are #[macro_export]ed, which places them at the crate root.
#[macro_use]
mod attempt;
#[macro_use]
mod throw;
