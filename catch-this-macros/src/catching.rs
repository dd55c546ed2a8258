//! Expansion of `#[catching]`.
//!
//! The original body moves into a `move` closure (or `async move` block) that
//! is handed to the matching `Try` entry point. Arguments, `self` included,
//! are captured by that closure, and `return` inside the body returns from
//! the closure, so the body keeps its meaning.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, Error, ItemFn, Result};

use crate::signature::{self, Shape};

/// Rewrite one annotated function.
pub fn expand(attr: TokenStream, item: TokenStream) -> Result<TokenStream> {
    if !attr.is_empty() {
        return Err(Error::new_spanned(attr, "`#[catching]` takes no arguments"));
    }

    let mut func: ItemFn = syn::parse2(item).map_err(|e| {
        Error::new(e.span(), "`#[catching]` can only be applied to functions")
    })?;

    if let Some(constness) = &func.sig.constness {
        return Err(Error::new_spanned(
            constness,
            "`#[catching]` cannot be applied to a `const fn`; unwinding is not available in const contexts",
        ));
    }

    let shape = signature::classify(&func.sig.output);
    let body = wrap_body(&func, &shape);
    let payload = shape.payload();

    func.sig.output = parse_quote!(-> ::catch_this::Outcome<#payload>);
    func.block = Box::new(parse_quote!({ #body }));

    Ok(quote! { #func })
}

fn wrap_body(func: &ItemFn, shape: &Shape) -> TokenStream {
    let block = &func.block;
    let is_async = func.sig.asyncness.is_some();

    match (shape, is_async) {
        (Shape::Infallible(_), false) => quote! {
            ::catch_this::Try::global().run(move || #block)
        },
        (Shape::Fallible { declared, .. }, false) => quote! {
            ::catch_this::Try::global().catch(move || -> #declared #block)
        },
        (Shape::Infallible(_), true) => quote! {
            ::catch_this::Try::global().run_async(move || async move #block).await
        },
        // The declared type pins the error type for `?` inside the block.
        (Shape::Fallible { declared, .. }, true) => quote! {
            ::catch_this::Try::global()
                .catch_async(move || async move {
                    let __catching_result: #declared = #block;
                    __catching_result
                })
                .await
        },
    }
}
