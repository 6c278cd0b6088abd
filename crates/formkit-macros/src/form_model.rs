//! `#[derive(FormModel)]` implementation.
//!
//! Generates a cached attribute schema for the struct, constructors for a
//! `FormModel` over that schema, and a `TryFrom<&FormModel<S>>` impl that
//! extracts the struct back out of a model.

use darling::{FromDeriveInput, FromField, FromMeta};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::DeriveInput;

use crate::meta::{LiteralList, Number};
use crate::types::{type_to_string, Kind};

/// Struct-level attributes from `#[form_model(...)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(form_model), supports(struct_named))]
pub struct FormModelOpts {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub data: darling::ast::Data<(), AttributeOpts>,

    /// The model name; defaults to the struct name.
    #[darling(default)]
    pub name: Option<String>,

    /// Path to the forms crate in generated code.
    #[darling(default, rename = "crate")]
    pub krate: Option<syn::Path>,
}

/// `length(minimum = .., maximum = .., is = ..)`
#[derive(Debug, Default, FromMeta)]
pub struct LengthOpts {
    #[darling(default)]
    pub minimum: Option<usize>,
    #[darling(default)]
    pub maximum: Option<usize>,
    #[darling(default)]
    pub is: Option<usize>,
}

/// `numericality(greater_than = .., odd, ..)`
#[derive(Debug, Default, FromMeta)]
pub struct NumericalityOpts {
    #[darling(default)]
    pub only_integer: bool,
    #[darling(default)]
    pub greater_than: Option<Number>,
    #[darling(default)]
    pub greater_than_or_equal_to: Option<Number>,
    #[darling(default)]
    pub equal_to: Option<Number>,
    #[darling(default)]
    pub less_than: Option<Number>,
    #[darling(default)]
    pub less_than_or_equal_to: Option<Number>,
    #[darling(default)]
    pub odd: bool,
    #[darling(default)]
    pub even: bool,
}

/// Per-field attributes from `#[attribute(...)]`.
#[derive(Debug, FromField)]
#[darling(attributes(attribute))]
pub struct AttributeOpts {
    pub ident: Option<syn::Ident>,
    pub ty: syn::Type,

    /// Leaves the field out of the schema; it is filled with `Default` on extraction.
    #[darling(default)]
    pub skip: bool,

    /// Explicit kind ("string", "integer", "date", "time", "time_of_day").
    #[darling(default)]
    pub kind: Option<String>,

    /// Overrides the attribute name; defaults to the field name.
    #[darling(default)]
    pub rename: Option<String>,

    /// Human-readable label.
    #[darling(default)]
    pub label: Option<String>,

    #[darling(default)]
    pub presence: bool,

    #[darling(default)]
    pub length: Option<LengthOpts>,

    #[darling(default)]
    pub numericality: Option<NumericalityOpts>,

    /// A regular expression the value's text must match.
    #[darling(default)]
    pub format: Option<String>,

    #[darling(default)]
    pub inclusion: Option<LiteralList>,

    /// Fixed lower bound, `"YYYY-MM-DD"`.
    #[darling(default)]
    pub earliest: Option<String>,

    /// Fixed upper bound, `"YYYY-MM-DD"`.
    #[darling(default)]
    pub latest: Option<String>,

    /// A `fn() -> NaiveDate` evaluated as the lower bound at validation time.
    #[darling(default)]
    pub earliest_fn: Option<syn::Path>,

    /// A `fn() -> NaiveDate` evaluated as the upper bound at validation time.
    #[darling(default)]
    pub latest_fn: Option<syn::Path>,
}

/// Generates the form model implementations for the struct.
pub fn derive_form_model_impl(input: DeriveInput) -> TokenStream {
    let opts = match FormModelOpts::from_derive_input(&input) {
        Ok(o) => o,
        Err(e) => return e.write_errors(),
    };
    match expand(&opts) {
        Ok(tokens) => tokens,
        Err(e) => e.write_errors(),
    }
}

fn expand(opts: &FormModelOpts) -> darling::Result<TokenStream> {
    let struct_name = &opts.ident;
    if !opts.generics.params.is_empty() {
        return Err(darling::Error::custom(
            "#[derive(FormModel)] does not support generic structs",
        )
        .with_span(&opts.generics));
    }

    let krate = opts
        .krate
        .clone()
        .unwrap_or_else(|| syn::parse_quote!(::formkit_forms));
    let model_name = opts
        .name
        .clone()
        .unwrap_or_else(|| struct_name.to_string());

    let Some(fields) = opts.data.as_ref().take_struct() else {
        return Err(darling::Error::unsupported_shape("only named structs are supported"));
    };

    let mut errors = darling::Error::accumulator();
    let mut decls = Vec::new();
    let mut extractions = Vec::new();

    for field in fields.fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        if field.skip {
            extractions.push(quote! { #ident: ::core::default::Default::default() });
            continue;
        }

        let name = field.rename.clone().unwrap_or_else(|| ident.to_string());
        let ty = &field.ty;
        if let Some(decl) = errors.handle(attribute_decl(&krate, &name, field)) {
            decls.push(decl);
        }
        extractions.push(quote! { #ident: model.typed::<#ty>(#name)? });
    }
    errors.finish()?;

    Ok(quote! {
        impl #krate::schema::FormSchema for #struct_name {
            fn schema() -> ::std::sync::Arc<#krate::schema::Schema> {
                static SCHEMA: ::std::sync::OnceLock<::std::sync::Arc<#krate::schema::Schema>> =
                    ::std::sync::OnceLock::new();
                ::std::sync::Arc::clone(SCHEMA.get_or_init(|| {
                    #krate::schema::Schema::builder(#model_name)
                        #(.attribute(#decls))*
                        .build()
                }))
            }
        }

        impl #struct_name {
            /// Returns an empty form model for this struct's schema.
            pub fn form() -> #krate::model::FormModel {
                #krate::model::FormModel::new(
                    <Self as #krate::schema::FormSchema>::schema(),
                )
            }

            /// Returns a form model with each pair assigned in iteration order.
            pub fn form_from<I, K, V>(attributes: I) -> #krate::FormResult<#krate::model::FormModel>
            where
                I: ::core::iter::IntoIterator<Item = (K, V)>,
                K: ::core::convert::AsRef<str>,
                V: ::core::convert::Into<#krate::value::Value>,
            {
                #krate::model::FormModel::from_attributes(
                    <Self as #krate::schema::FormSchema>::schema(),
                    attributes,
                )
            }
        }

        impl<S: #krate::store::AttributeStore> ::core::convert::TryFrom<&#krate::model::FormModel<S>>
            for #struct_name
        {
            type Error = #krate::FormError;

            fn try_from(model: &#krate::model::FormModel<S>) -> ::core::result::Result<Self, Self::Error> {
                ::core::result::Result::Ok(Self {
                    #(#extractions),*
                })
            }
        }
    })
}

/// Builds the `AttributeDecl` expression for one field.
fn attribute_decl(
    krate: &syn::Path,
    name: &str,
    field: &AttributeOpts,
) -> darling::Result<TokenStream> {
    let kind = match &field.kind {
        Some(k) => Kind::parse(k).ok_or_else(|| {
            darling::Error::custom(format!(
                "unknown attribute kind `{k}`; expected string, integer, date, time, or time_of_day"
            ))
            .with_span(&field.ty)
        })?,
        None => Kind::infer(&field.ty).ok_or_else(|| {
            darling::Error::custom(format!(
                "cannot infer an attribute kind for `{}`; add `kind = \"...\"`",
                type_to_string(&field.ty)
            ))
            .with_span(&field.ty)
        })?,
    };

    let has_bounds = field.earliest.is_some()
        || field.latest.is_some()
        || field.earliest_fn.is_some()
        || field.latest_fn.is_some();
    if has_bounds && kind != Kind::Date {
        return Err(darling::Error::custom(
            "earliest and latest bounds only apply to date attributes",
        )
        .with_span(&field.ty));
    }
    if field.earliest.is_some() && field.earliest_fn.is_some() {
        return Err(darling::Error::custom("use either `earliest` or `earliest_fn`, not both")
            .with_span(&field.ty));
    }
    if field.latest.is_some() && field.latest_fn.is_some() {
        return Err(darling::Error::custom("use either `latest` or `latest_fn`, not both")
            .with_span(&field.ty));
    }

    let constructor = format_ident!("{}", kind.constructor());
    let mut chain = Vec::new();

    if let Some(label) = &field.label {
        chain.push(quote! { .label(#label) });
    }
    if field.presence {
        chain.push(quote! { .presence() });
    }
    if let Some(length) = &field.length {
        let mut options = quote! { #krate::validators::LengthOptions::default() };
        if let Some(n) = length.minimum {
            options = quote! { #options.minimum(#n) };
        }
        if let Some(n) = length.maximum {
            options = quote! { #options.maximum(#n) };
        }
        if let Some(n) = length.is {
            options = quote! { #options.is(#n) };
        }
        chain.push(quote! { .length(#options) });
    }
    if let Some(numericality) = &field.numericality {
        let options = numericality_options(krate, numericality);
        chain.push(quote! { .numericality(#options) });
    }
    if let Some(pattern) = &field.format {
        regex::Regex::new(pattern).map_err(|e| {
            darling::Error::custom(format!("invalid format pattern: {e}")).with_span(&field.ty)
        })?;
        chain.push(quote! {
            .format(#krate::validators::regex_literal(#pattern))
        });
    }
    if let Some(LiteralList(members)) = &field.inclusion {
        chain.push(quote! { .inclusion([#(#members),*]) });
    }
    if let Some(date) = &field.earliest {
        let date = date_literal(krate, date, &field.ty)?;
        chain.push(quote! { .earliest(#date) });
    }
    if let Some(date) = &field.latest {
        let date = date_literal(krate, date, &field.ty)?;
        chain.push(quote! { .latest(#date) });
    }
    if let Some(path) = &field.earliest_fn {
        chain.push(quote! { .earliest(#krate::temporal::DateBound::computed(#path)) });
    }
    if let Some(path) = &field.latest_fn {
        chain.push(quote! { .latest(#krate::temporal::DateBound::computed(#path)) });
    }

    Ok(quote! {
        #krate::attribute::AttributeDecl::#constructor(#name)
            #(#chain)*
    })
}

fn numericality_options(krate: &syn::Path, opts: &NumericalityOpts) -> TokenStream {
    let mut options = quote! { #krate::validators::NumericalityOptions::default() };
    if opts.only_integer {
        options = quote! { #options.only_integer() };
    }
    let bounds = [
        ("greater_than", opts.greater_than),
        ("greater_than_or_equal_to", opts.greater_than_or_equal_to),
        ("equal_to", opts.equal_to),
        ("less_than", opts.less_than),
        ("less_than_or_equal_to", opts.less_than_or_equal_to),
    ];
    for (method, bound) in bounds {
        if let Some(Number(n)) = bound {
            let method = format_ident!("{method}");
            options = quote! { #options.#method(#n) };
        }
    }
    if opts.odd {
        options = quote! { #options.odd() };
    }
    if opts.even {
        options = quote! { #options.even() };
    }
    options
}

/// Checks a `"YYYY-MM-DD"` literal and emits the matching `NaiveDate`.
fn date_literal(krate: &syn::Path, text: &str, ty: &syn::Type) -> darling::Result<TokenStream> {
    use chrono::Datelike;

    let date = chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|e| {
        darling::Error::custom(format!("invalid date `{text}` (expected YYYY-MM-DD): {e}"))
            .with_span(ty)
    })?;
    let (y, m, d) = (date.year(), date.month(), date.day());
    Ok(quote! {
        #krate::temporal::fixed_date(#y, #m, #d)
    })
}
