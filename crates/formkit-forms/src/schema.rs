//! The per-model attribute table.
//!
//! A [`Schema`] is built once per model and shared through an [`Arc`]. It
//! owns the model's name and its attributes in declaration order.

use std::collections::HashMap;
use std::sync::Arc;

use crate::attribute::{Attribute, AttributeDecl};
use crate::naming::ModelName;

/// Types that carry a static schema, usually through `#[derive(FormModel)]`.
pub trait FormSchema {
    fn schema() -> Arc<Schema>;
}

/// The attribute table of a form model.
///
/// # Examples
///
/// ```
/// use formkit_forms::attribute::AttributeDecl;
/// use formkit_forms::schema::Schema;
///
/// let schema = Schema::builder("EventForm")
///     .attribute(AttributeDecl::string("title").presence())
///     .attribute(AttributeDecl::date("start_on"))
///     .build();
///
/// assert_eq!(schema.model_name().param_key, "event_form");
/// assert!(schema.contains("start_on"));
/// assert_eq!(schema.attribute_names(), vec!["title", "start_on"]);
/// ```
#[derive(Debug)]
pub struct Schema {
    model_name: ModelName,
    attributes: Vec<Attribute>,
    index: HashMap<String, usize>,
}

impl Schema {
    pub fn builder(model_name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            model_name: model_name.into(),
            attributes: Vec::new(),
        }
    }

    pub const fn model_name(&self) -> &ModelName {
        &self.model_name
    }

    /// Looks up a declared attribute.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.index.get(name).map(|&i| &self.attributes[i])
    }

    /// The attributes in declaration order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(Attribute::name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Collects attribute declarations for a [`Schema`].
#[derive(Debug)]
pub struct SchemaBuilder {
    model_name: String,
    attributes: Vec<AttributeDecl>,
}

impl SchemaBuilder {
    /// Declares an attribute.
    ///
    /// Declaring a name again replaces the earlier declaration in place.
    #[must_use]
    pub fn attribute(mut self, decl: AttributeDecl) -> Self {
        if let Some(existing) = self
            .attributes
            .iter_mut()
            .find(|existing| existing.name() == decl.name())
        {
            tracing::debug!(
                model = %self.model_name,
                attribute = decl.name(),
                "attribute redeclared; replacing earlier declaration"
            );
            *existing = decl;
        } else {
            self.attributes.push(decl);
        }
        self
    }

    pub fn build(self) -> Arc<Schema> {
        let attributes: Vec<Attribute> =
            self.attributes.into_iter().map(AttributeDecl::build).collect();
        let index = attributes
            .iter()
            .enumerate()
            .map(|(i, a)| (a.name().to_string(), i))
            .collect();
        Arc::new(Schema {
            model_name: ModelName::new(&self.model_name),
            attributes,
            index,
        })
    }
}
