//! Return type classification for `#[catching]`.

use syn::{parse_quote, GenericArgument, PathArguments, ReturnType, Type};

/// What a function body produces, as far as the wrapper cares.
#[derive(Debug, Clone)]
pub enum Shape {
    /// The body yields a plain value; only panics fail.
    Infallible(Type),
    /// The body yields `Result<ok, _>`; `Err` fails as well.
    Fallible {
        /// The success type, first generic argument of the `Result`.
        ok: Type,
        /// The declared return type, unchanged.
        declared: Type,
    },
}

impl Shape {
    /// Payload type of the `Outcome` the rewritten function returns.
    pub fn payload(&self) -> &Type {
        match self {
            Shape::Infallible(ty) => ty,
            Shape::Fallible { ok, .. } => ok,
        }
    }
}

/// Classify a declared return type.
///
/// `-> Result<T, ..>` (matched on the last path segment) is fallible,
/// everything else is infallible. No return type means `()`.
pub fn classify(output: &ReturnType) -> Shape {
    let ty = match output {
        ReturnType::Default => return Shape::Infallible(parse_quote!(())),
        ReturnType::Type(_, ty) => ty.as_ref(),
    };

    match result_ok_type(ty) {
        Some(ok) => Shape::Fallible {
            ok: ok.clone(),
            declared: ty.clone(),
        },
        None => Shape::Infallible(ty.clone()),
    }
}

fn result_ok_type(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let last = path.path.segments.last()?;
    if last.ident != "Result" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}
