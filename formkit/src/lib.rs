//! # formkit
//!
//! Typed form models for Rust.
//!
//! This is the meta-crate that re-exports the formkit sub-crates. Depend on
//! `formkit` for everything, or on the individual crates for finer-grained
//! control.
//!
//! ```
//! use formkit::prelude::*;
//!
//! let schema = Schema::builder("SignupForm")
//!     .attribute(AttributeDecl::string("email").presence())
//!     .attribute(AttributeDecl::integer("age"))
//!     .build();
//!
//! let form = FormModel::from_attributes(schema, [("age", "abc")]).unwrap();
//! assert_eq!(form.get("age").unwrap(), &Value::from("abc"));
//!
//! let errors = form.validate();
//! assert_eq!(errors.full_messages(form.schema()), vec![
//!     "Email can't be blank",
//!     "Age is not a number",
//! ]);
//! ```
//!
//! With the `macros` feature, `#[derive(FormModel)]` declares the same
//! schema from a struct. Point the generated code at this crate with
//! `#[form_model(crate = "formkit::forms")]`.

/// Error types, settings, logging, and text helpers.
pub use formkit_core as core;

/// Values, coercion, attributes, stores, validators, and form models.
pub use formkit_forms as forms;

/// `#[derive(FormModel)]`.
#[cfg(feature = "macros")]
pub use formkit_macros as macros;

pub use chrono;
pub use serde_json;
pub use tracing;

/// The types most form code needs.
pub mod prelude {
    pub use formkit_core::{FormError, FormResult, Settings, ValidationError, SETTINGS};
    pub use formkit_forms::{
        AttributeDecl, AttributeType, DateBound, Errors, FormModel, FormSchema, LengthOptions,
        ModelName, Named, NumericalityOptions, RecordStore, Schema, TimeOfDay, TransientStore,
        Validatable, Value,
    };

    #[cfg(feature = "macros")]
    pub use formkit_macros::FormModel;
}
