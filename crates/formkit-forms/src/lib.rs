//! # formkit-forms
//!
//! Typed form models for formkit. Attributes are declared once on a
//! [`Schema`](schema::Schema) with a semantic type (string, integer, date,
//! time, time of day) and a set of validation rules. Writing an attribute
//! coerces the input; input that does not parse is kept exactly as supplied
//! so that validation can report it.
//!
//! ## Modules
//!
//! - [`value`] - Raw and typed attribute values, semantic types
//! - [`time_of_day`] - Wall-clock time type and its parser
//! - [`coercion`] - Best-effort conversion into semantic types
//! - [`attribute`] - Attribute declarations and their builder
//! - [`schema`] - The per-model attribute table
//! - [`store`] - Attribute storage, standalone and record-backed
//! - [`validators`] - The validator trait and the generic rules
//! - [`temporal`] - Date, time, and time-of-day validators
//! - [`errors`] - The per-model error collection
//! - [`validation`] - The validation pipeline
//! - [`naming`] - Model naming conventions
//! - [`model`] - [`FormModel`](model::FormModel) and its traits
//! - [`extract`] - Typed extraction of stored values

pub mod attribute;
pub mod coercion;
pub mod errors;
pub mod extract;
pub mod model;
pub mod naming;
pub mod schema;
pub mod store;
pub mod temporal;
pub mod time_of_day;
pub mod validation;
pub mod validators;
pub mod value;

pub use attribute::{Attribute, AttributeDecl};
pub use coercion::Coerced;
pub use errors::Errors;
pub use extract::FromValue;
pub use model::{FormModel, Validatable};
pub use naming::{ModelName, Named};
pub use schema::{FormSchema, Schema, SchemaBuilder};
pub use store::{AttributeRead, AttributeStore, RecordStore, TransientStore};
pub use temporal::{DateBound, DateValidator, TimeOfDayValidator, TimeValidator};
pub use time_of_day::TimeOfDay;
pub use validators::{
    EachValidator, FormatValidator, InclusionValidator, LengthOptions, LengthValidator,
    NumericalityOptions, NumericalityValidator, PresenceValidator,
};
pub use value::{AttributeType, Value};

// Used by code generated with `#[derive(FormModel)]`.
pub use chrono;
pub use formkit_core::{FormError, FormResult, ValidationError};
