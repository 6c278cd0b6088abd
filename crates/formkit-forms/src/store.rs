//! Attribute storage.
//!
//! A form model does not own its values directly; it writes through an
//! [`AttributeStore`]. Two stores are provided:
//!
//! - [`TransientStore`] for standalone form models. One slot per attribute,
//!   holding either the coerced value or, when coercion failed, the raw input.
//! - [`RecordStore`] for models backed by a persisted record. Two slots per
//!   attribute: a typed slot that only ever holds a successfully cast value,
//!   and a before-type-cast slot that always holds the raw input.
//!
//! Validators see a store only through [`AttributeRead`].

use std::collections::HashMap;

use crate::coercion::Coerced;
use crate::value::Value;

/// Read access to stored attribute values.
pub trait AttributeRead {
    /// Returns the current value of an attribute, or `None` if it was never written.
    fn read_attribute(&self, name: &str) -> Option<&Value>;

    /// Returns the raw input last written to an attribute, before coercion.
    ///
    /// Stores that keep no separate raw slot return `None`.
    fn read_attribute_before_type_cast(&self, name: &str) -> Option<&Value> {
        let _ = name;
        None
    }
}

/// Write access to attribute values.
pub trait AttributeStore: AttributeRead {
    /// Records the outcome of coercing `raw` for attribute `name`.
    fn write_attribute(&mut self, name: &str, raw: Value, coerced: Coerced);

    /// Returns `true` if the backing record has been saved.
    fn is_persisted(&self) -> bool {
        false
    }

    /// The record's key, if it has one.
    fn key(&self) -> Option<Vec<Value>> {
        None
    }
}

/// Storage for a standalone form model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransientStore {
    values: HashMap<String, Value>,
}

impl TransientStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttributeRead for TransientStore {
    fn read_attribute(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

impl AttributeStore for TransientStore {
    fn write_attribute(&mut self, name: &str, _raw: Value, coerced: Coerced) {
        self.values.insert(name.to_string(), coerced.into_value());
    }
}

/// Storage for a model backed by a persisted record.
///
/// The typed slot behaves like a typed column: a value that failed to cast
/// is stored as `Null`. The raw input is always available through
/// [`read_attribute_before_type_cast`](AttributeRead::read_attribute_before_type_cast).
///
/// # Examples
///
/// ```
/// use formkit_forms::coercion::Coerced;
/// use formkit_forms::store::{AttributeRead, AttributeStore, RecordStore};
/// use formkit_forms::value::Value;
///
/// let mut store = RecordStore::new();
/// store.write_attribute("age", Value::from("abc"), Coerced::Raw(Value::from("abc")));
///
/// assert_eq!(store.read_attribute("age"), Some(&Value::Null));
/// assert_eq!(store.read_attribute_before_type_cast("age"), Some(&Value::from("abc")));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    typed: HashMap<String, Value>,
    before_type_cast: HashMap<String, Value>,
    key: Option<Vec<Value>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the record as saved under the given key.
    #[must_use]
    pub fn persisted(mut self, key: impl Into<Value>) -> Self {
        self.mark_persisted(key);
        self
    }

    /// Marks the record as saved under the given key.
    pub fn mark_persisted(&mut self, key: impl Into<Value>) {
        self.key = Some(vec![key.into()]);
    }

    /// Loads a previously saved, already typed value without a raw input.
    ///
    /// This is how a record is hydrated from storage: the before-type-cast
    /// slot is set to the same value.
    pub fn load(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        self.before_type_cast.insert(name.clone(), value.clone());
        self.typed.insert(name, value);
    }
}

impl AttributeRead for RecordStore {
    fn read_attribute(&self, name: &str) -> Option<&Value> {
        self.typed.get(name)
    }

    fn read_attribute_before_type_cast(&self, name: &str) -> Option<&Value> {
        self.before_type_cast.get(name)
    }
}

impl AttributeStore for RecordStore {
    fn write_attribute(&mut self, name: &str, raw: Value, coerced: Coerced) {
        let typed = match coerced {
            Coerced::Parsed(v) => v,
            Coerced::Raw(_) => Value::Null,
        };
        self.typed.insert(name.to_string(), typed);
        self.before_type_cast.insert(name.to_string(), raw);
    }

    fn is_persisted(&self) -> bool {
        self.key.is_some()
    }

    fn key(&self) -> Option<Vec<Value>> {
        self.key.clone()
    }
}
