//! The per-model error collection.

use std::collections::HashMap;
use std::fmt;

use formkit_core::utils::text::humanize;
use formkit_core::ValidationError;

use crate::schema::Schema;

/// Validation errors keyed by attribute, in the order they were recorded.
///
/// # Examples
///
/// ```
/// use formkit_core::ValidationError;
/// use formkit_forms::errors::Errors;
///
/// let mut errors = Errors::new();
/// errors.add("start_on", ValidationError::new("is too early", "too_early"));
///
/// assert_eq!(errors.messages("start_on"), vec!["is too early"]);
/// assert_eq!(errors.to_string(), "Start on is too early");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Errors {
    entries: Vec<(String, ValidationError)>,
}

impl Errors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error on an attribute.
    pub fn add(&mut self, attribute: impl Into<String>, error: ValidationError) {
        self.entries.push((attribute.into(), error));
    }

    /// Returns the errors recorded on `attribute`.
    pub fn on(&self, attribute: &str) -> Vec<&ValidationError> {
        self.entries
            .iter()
            .filter(|(attr, _)| attr == attribute)
            .map(|(_, e)| e)
            .collect()
    }

    /// Returns the messages recorded on `attribute`.
    pub fn messages(&self, attribute: &str) -> Vec<&str> {
        self.on(attribute)
            .into_iter()
            .map(|e| e.message.as_str())
            .collect()
    }

    /// Returns `true` if `attribute` has an error with the given code.
    pub fn has_code(&self, attribute: &str, code: &str) -> bool {
        self.on(attribute).iter().any(|e| e.code == code)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationError)> {
        self.entries.iter().map(|(a, e)| (a.as_str(), e))
    }

    /// The attributes that have errors, each once, in first-error order.
    pub fn attributes(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for (attr, _) in &self.entries {
            if !seen.contains(&attr.as_str()) {
                seen.push(attr);
            }
        }
        seen
    }

    /// Messages prefixed with the attribute's human name ("Start on is too early").
    ///
    /// The schema supplies declared labels; undeclared or unlabeled
    /// attributes fall back to the humanized name.
    pub fn full_messages(&self, schema: &Schema) -> Vec<String> {
        self.entries
            .iter()
            .map(|(attr, e)| {
                let human = schema
                    .attribute(attr)
                    .map_or_else(|| humanize(attr), |a| a.human_name());
                format!("{human} {}", e.message)
            })
            .collect()
    }

    /// Groups the messages by attribute.
    pub fn to_map(&self) -> HashMap<String, Vec<String>> {
        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for (attr, e) in &self.entries {
            map.entry(attr.clone()).or_default().push(e.message.clone());
        }
        map
    }

    /// Converts the collection into a single compound [`ValidationError`].
    pub fn into_validation_error(self) -> ValidationError {
        let mut field_errors: HashMap<String, Vec<ValidationError>> = HashMap::new();
        for (attr, e) in self.entries {
            field_errors.entry(attr).or_default().push(e);
        }
        ValidationError::with_field_errors(field_errors)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (attr, e)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{} {}", humanize(attr), e.message)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Errors {
    type Item = &'a (String, ValidationError);
    type IntoIter = std::slice::Iter<'a, (String, ValidationError)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeDecl;

    fn err(msg: &str, code: &str) -> ValidationError {
        ValidationError::new(msg, code)
    }

    #[test]
    fn test_add_and_lookup() {
        let mut errors = Errors::new();
        assert!(errors.is_empty());

        errors.add("age", err("is not a number", "not_a_number"));
        errors.add("start_on", err("is too early", "too_early"));
        errors.add("age", err("can't be blank", "blank"));

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.messages("age"), vec!["is not a number", "can't be blank"]);
        assert!(errors.has_code("start_on", "too_early"));
        assert!(!errors.has_code("start_on", "too_late"));
        assert!(errors.on("missing").is_empty());
        assert_eq!(errors.attributes(), vec!["age", "start_on"]);
    }

    #[test]
    fn test_full_messages_use_labels() {
        let schema = Schema::builder("Event")
            .attribute(AttributeDecl::date("start_on"))
            .attribute(AttributeDecl::integer("head_count").label("Guests"))
            .build();

        let mut errors = Errors::new();
        errors.add("start_on", err("is too early", "too_early"));
        errors.add("head_count", err("is not a number", "not_a_number"));
        errors.add("owner_id", err("can't be blank", "blank"));

        assert_eq!(
            errors.full_messages(&schema),
            vec![
                "Start on is too early",
                "Guests is not a number",
                "Owner can't be blank",
            ]
        );
    }

    #[test]
    fn test_to_map_and_compound_error() {
        let mut errors = Errors::new();
        errors.add("age", err("is not a number", "not_a_number"));
        errors.add("age", err("must be odd", "odd"));

        let map = errors.to_map();
        assert_eq!(map["age"], vec!["is not a number", "must be odd"]);

        let compound = errors.into_validation_error();
        assert_eq!(compound.field_errors["age"].len(), 2);
        assert_eq!(compound.to_string(), "age: is not a number; age: must be odd");
    }

    #[test]
    fn test_display_and_clear() {
        let mut errors = Errors::new();
        errors.add("start_on", err("is too early", "too_early"));
        errors.add("ends_at", err("is not a time", "not_a_time"));
        assert_eq!(errors.to_string(), "Start on is too early; Ends at is not a time");

        errors.clear();
        assert!(errors.is_empty());
        assert_eq!(errors.to_string(), "");
    }
}
