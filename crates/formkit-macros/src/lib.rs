//! # formkit-macros
//!
//! Procedural macros for formkit. Provides `#[derive(FormModel)]`, which
//! turns a plain struct into a declared form model: a static attribute
//! schema, constructors for the model, and typed extraction back into the
//! struct.
//!
//! This crate is independent of the other formkit crates because proc-macro
//! crates cannot depend on crates that use them. Generated code refers to
//! `::formkit_forms` unless `#[form_model(crate = "...")]` says otherwise.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod form_model;
mod meta;
mod types;

/// Derives a form model from a struct with named fields.
///
/// ```ignore
/// use chrono::NaiveDate;
/// use formkit_macros::FormModel;
///
/// #[derive(FormModel)]
/// #[form_model(name = "EventForm")]
/// struct Event {
///     #[attribute(presence, length(maximum = 60))]
///     title: String,
///     #[attribute(numericality(greater_than = 0))]
///     guests: Option<i64>,
///     #[attribute(earliest = "2020-01-01", label = "Start date")]
///     start_on: Option<NaiveDate>,
/// }
///
/// let form = Event::form_from([("title", "Launch"), ("guests", "abc")]).unwrap();
/// ```
#[proc_macro_derive(FormModel, attributes(form_model, attribute))]
pub fn derive_form_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    form_model::derive_form_model_impl(input).into()
}
