//! Rust type inspection for attribute kind inference.

use quote::quote;
use syn::Type;

/// If the type is `Option<T>`, returns `Some(&T)`. Otherwise `None`.
pub(crate) fn unwrap_option_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty {
        let segment = type_path.path.segments.last()?;
        if segment.ident == "Option" {
            if let syn::PathArguments::AngleBracketed(ref args) = segment.arguments {
                if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                    return Some(inner);
                }
            }
        }
    }
    None
}

/// Converts a `syn::Type` to a string for matching.
pub(crate) fn type_to_string(ty: &Type) -> String {
    quote!(#ty).to_string()
}

/// The attribute kinds a field can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    String,
    Integer,
    Date,
    Time,
    TimeOfDay,
}

impl Kind {
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "date" => Some(Self::Date),
            "time" => Some(Self::Time),
            "time_of_day" => Some(Self::TimeOfDay),
            _ => None,
        }
    }

    /// The `AttributeDecl` constructor for this kind.
    pub(crate) const fn constructor(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Date => "date",
            Self::Time => "time",
            Self::TimeOfDay => "time_of_day",
        }
    }

    /// Infers the kind from a field's Rust type, looking through `Option<T>`.
    ///
    /// Only the last path segment is compared, so `chrono::NaiveDate`
    /// matches as well as `NaiveDate`.
    pub(crate) fn infer(ty: &Type) -> Option<Self> {
        let inner = unwrap_option_type(ty).unwrap_or(ty);
        let Type::Path(type_path) = inner else {
            return None;
        };
        let last = type_path.path.segments.last()?.ident.to_string();

        match last.as_str() {
            "String" => Some(Self::String),
            "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" | "u64" | "isize" | "usize" => {
                Some(Self::Integer)
            }
            "NaiveDate" => Some(Self::Date),
            "DateTime" => Some(Self::Time),
            "TimeOfDay" => Some(Self::TimeOfDay),
            _ => None,
        }
    }
}
