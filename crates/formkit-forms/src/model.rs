//! Form model instances.
//!
//! A [`FormModel`] pairs a shared [`Schema`] with an [`AttributeStore`].
//! Every write goes through the attribute's coercing mutator: the input is
//! parsed into the declared type if possible and kept as supplied if not.
//! Nothing is validated until [`Validatable::validate`] is called.
//!
//! # Examples
//!
//! ```
//! use formkit_forms::attribute::AttributeDecl;
//! use formkit_forms::model::{FormModel, Validatable};
//! use formkit_forms::schema::Schema;
//! use formkit_forms::value::Value;
//!
//! let schema = Schema::builder("BookingForm")
//!     .attribute(AttributeDecl::integer("guests"))
//!     .attribute(AttributeDecl::date("start_on"))
//!     .build();
//!
//! let form = FormModel::from_attributes(
//!     schema,
//!     [("guests", "abc"), ("start_on", "03/14/2024")],
//! )
//! .unwrap();
//!
//! assert_eq!(form.get("guests").unwrap(), &Value::from("abc"));
//! assert!(form.get("start_on").unwrap().as_date().is_some());
//! assert_eq!(form.validate().messages("guests"), vec!["is not a number"]);
//! ```

use std::fmt;
use std::sync::Arc;

use formkit_core::{FormError, FormResult, SETTINGS};

use crate::coercion::coerce;
use crate::errors::Errors;
use crate::extract::FromValue;
use crate::naming::{ModelName, Named};
use crate::schema::Schema;
use crate::store::{AttributeStore, TransientStore};
use crate::validation::run_validations;
use crate::value::{Value, NULL};

/// Types that validate on demand.
pub trait Validatable {
    /// Runs every rule and returns the errors found.
    fn validate(&self) -> Errors;

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates, converting any errors into [`FormError::Invalid`].
    fn ensure_valid(&self) -> FormResult<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(FormError::Invalid(errors.into_validation_error()))
        }
    }
}

/// An instance of a form model.
pub struct FormModel<S: AttributeStore = TransientStore> {
    schema: Arc<Schema>,
    store: S,
}

impl FormModel<TransientStore> {
    /// Creates a standalone model with every attribute unset.
    pub fn new(schema: Arc<Schema>) -> Self {
        Self::with_store(schema, TransientStore::new())
    }

    /// Creates a standalone model and assigns each pair in iteration order.
    pub fn from_attributes<I, K, V>(schema: Arc<Schema>, attributes: I) -> FormResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut model = Self::new(schema);
        model.assign_attributes(attributes)?;
        Ok(model)
    }

    /// Creates a standalone model from a JSON object.
    ///
    /// Keys are assigned in the object's iteration order.
    pub fn from_json(schema: Arc<Schema>, json: &serde_json::Value) -> FormResult<Self> {
        let mut model = Self::new(schema);
        model.assign_json(json)?;
        Ok(model)
    }
}

impl<S: AttributeStore> FormModel<S> {
    /// Creates a model writing through the given store.
    pub const fn with_store(schema: Arc<Schema>, store: S) -> Self {
        Self { schema, store }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn ensure_declared(&self, name: &str) -> FormResult<()> {
        if self.schema.contains(name) {
            Ok(())
        } else {
            Err(FormError::UnknownAttribute(name.to_string()))
        }
    }

    /// Returns the stored value: typed, or raw after a failed coercion.
    ///
    /// A declared attribute that was never written reads as `Null`.
    pub fn get(&self, name: &str) -> FormResult<&Value> {
        self.ensure_declared(name)?;
        Ok(self.store.read_attribute(name).unwrap_or(&NULL))
    }

    /// Coerces `raw` into the attribute's type and stores the outcome.
    pub fn set(&mut self, name: &str, raw: impl Into<Value>) -> FormResult<()> {
        let attribute = self
            .schema
            .attribute(name)
            .ok_or_else(|| FormError::UnknownAttribute(name.to_string()))?;
        let raw = raw.into();
        let offset = SETTINGS.offset();
        let coerced = coerce(attribute.kind(), &raw, offset);

        if !coerced.is_parsed() {
            tracing::debug!(
                model = %self.schema.model_name().name,
                attribute = name,
                kind = %attribute.kind(),
                input = raw.variant_name(),
                "coercion failed; keeping raw input"
            );
        }
        self.store.write_attribute(name, raw, coerced);
        Ok(())
    }

    /// Assigns each pair in iteration order, stopping at the first unknown name.
    pub fn assign_attributes<I, K, V>(&mut self, attributes: I) -> FormResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (name, raw) in attributes {
            self.set(name.as_ref(), raw)?;
        }
        Ok(())
    }

    /// Assigns the members of a JSON object.
    pub fn assign_json(&mut self, json: &serde_json::Value) -> FormResult<()> {
        let object = json.as_object().ok_or_else(|| {
            FormError::SerializationError(format!(
                "expected a JSON object of attributes, got {json}"
            ))
        })?;
        self.assign_attributes(object.iter().map(|(k, v)| (k.as_str(), Value::from(v))))
    }

    /// Returns the raw input last written to the attribute.
    ///
    /// Stores without a raw slot return the stored value.
    pub fn before_type_cast(&self, name: &str) -> FormResult<&Value> {
        self.ensure_declared(name)?;
        Ok(self
            .store
            .read_attribute_before_type_cast(name)
            .or_else(|| self.store.read_attribute(name))
            .unwrap_or(&NULL))
    }

    /// Reads an attribute as a Rust type.
    pub fn typed<T: FromValue>(&self, name: &str) -> FormResult<T> {
        let value = self.get(name)?;
        T::from_value(value).ok_or_else(|| FormError::TypeMismatch {
            attribute: name.to_string(),
            expected: T::EXPECTED.to_string(),
        })
    }

    /// Iterates over `(name, value)` in declaration order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema.attributes().iter().map(|a| {
            (
                a.name(),
                self.store.read_attribute(a.name()).unwrap_or(&NULL),
            )
        })
    }

    /// Returns `true` if the backing record has been saved.
    pub fn persisted(&self) -> bool {
        self.store.is_persisted()
    }

    /// The record key, or `None` unless persisted.
    pub fn to_key(&self) -> Option<Vec<Value>> {
        if self.persisted() {
            self.store.key()
        } else {
            None
        }
    }

    /// The key joined with `-`, or `None` unless persisted.
    pub fn to_param(&self) -> Option<String> {
        self.to_key().map(|key| {
            key.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("-")
        })
    }
}

impl<S: AttributeStore> Validatable for FormModel<S> {
    fn validate(&self) -> Errors {
        run_validations(&self.schema, &self.store)
    }
}

impl<S: AttributeStore> Named for FormModel<S> {
    fn model_name(&self) -> &ModelName {
        self.schema.model_name()
    }
}

impl<S: AttributeStore + Clone> Clone for FormModel<S> {
    fn clone(&self) -> Self {
        Self {
            schema: Arc::clone(&self.schema),
            store: self.store.clone(),
        }
    }
}

impl<S: AttributeStore> fmt::Debug for FormModel<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, value) in self.values() {
            map.entry(&name, value);
        }
        map.finish()
    }
}
