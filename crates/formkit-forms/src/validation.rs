//! Validation pipeline for form models.
//!
//! Every declared attribute is validated in declaration order and its rules
//! run in rule order. Errors accumulate rather than short-circuiting, so all
//! problems are reported at once.

use formkit_core::logging::form_span;

use crate::errors::Errors;
use crate::schema::Schema;
use crate::store::AttributeRead;
use crate::value::NULL;

/// Runs all attribute rules of `schema` against the values in `record`.
///
/// An attribute that was never written is validated as `Null`.
pub fn run_validations(schema: &Schema, record: &dyn AttributeRead) -> Errors {
    let span = form_span(&schema.model_name().name);
    let _guard = span.enter();

    let mut errors = Errors::new();
    for attribute in schema.attributes() {
        let value = record.read_attribute(attribute.name()).unwrap_or(&NULL);
        let before = errors.len();
        attribute.validate(record, value, &mut errors);
        tracing::trace!(
            attribute = attribute.name(),
            value = value.variant_name(),
            rules = attribute.rules().len(),
            errors = errors.len() - before,
            "validated attribute"
        );
    }

    tracing::debug!(
        attributes = schema.len(),
        errors = errors.len(),
        "validation finished"
    );
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeDecl;
    use crate::coercion::Coerced;
    use crate::store::{AttributeStore, RecordStore, TransientStore};
    use crate::value::Value;

    fn schema() -> std::sync::Arc<Schema> {
        Schema::builder("Booking")
            .attribute(AttributeDecl::string("name").presence())
            .attribute(AttributeDecl::integer("guests"))
            .attribute(AttributeDecl::date("start_on"))
            .build()
    }

    #[test]
    fn test_unwritten_attributes_validate_as_null() {
        let errors = run_validations(&schema(), &TransientStore::new());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.messages("name"), vec!["can't be blank"]);
    }

    #[test]
    fn test_errors_accumulate_across_attributes() {
        let mut store = TransientStore::new();
        store.write_attribute("guests", Value::from("many"), Coerced::Raw(Value::from("many")));
        store.write_attribute(
            "start_on",
            Value::from("2020-01-01"),
            Coerced::Raw(Value::from("2020-01-01")),
        );

        let errors = run_validations(&schema(), &store);
        assert_eq!(errors.attributes(), vec!["name", "guests", "start_on"]);
        assert_eq!(errors.messages("guests"), vec!["is not a number"]);
        assert_eq!(errors.messages("start_on"), vec!["is not a date"]);
    }

    #[test]
    fn test_record_store_failed_cast_reported_from_raw_slot() {
        let mut store = RecordStore::new();
        store.write_attribute("name", Value::from("Ada"), Coerced::Parsed(Value::from("Ada")));
        store.write_attribute("guests", Value::from("4.5"), Coerced::Raw(Value::from("4.5")));

        let errors = run_validations(&schema(), &store);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.messages("guests"), vec!["must be an integer"]);
    }
}
