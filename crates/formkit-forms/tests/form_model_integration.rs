//! Integration tests for form models.
//!
//! These exercise the full path a caller takes: declare a schema, build a
//! model from raw input, read values back, and validate.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};
use formkit_core::FormError;
use formkit_forms::{
    AttributeDecl, AttributeType, DateBound, FormModel, NumericalityOptions, RecordStore,
    Schema, TimeOfDay, Validatable, Value,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn event_schema() -> Arc<Schema> {
    Schema::builder("EventForm")
        .attribute(AttributeDecl::string("title"))
        .attribute(AttributeDecl::integer("guests"))
        .attribute(
            AttributeDecl::date("start_on")
                .earliest(ymd(2020, 1, 1))
                .latest(ymd(2020, 12, 31)),
        )
        .attribute(AttributeDecl::time("ends_at"))
        .attribute(AttributeDecl::time_of_day("doors_at"))
        .build()
}

fn event(pairs: &[(&str, &str)]) -> FormModel {
    FormModel::from_attributes(event_schema(), pairs.iter().copied()).unwrap()
}

// ── Parseable input ─────────────────────────────────────────────────────

#[test]
fn test_round_trip_of_valid_input() {
    let form = event(&[
        ("title", "Launch party"),
        ("guests", "42"),
        ("start_on", "06/15/2020"),
        ("ends_at", "2020-06-15T23:30:00+02:00"),
        ("doors_at", "7:30pm"),
    ]);

    assert_eq!(form.get("title").unwrap(), &Value::from("Launch party"));
    assert_eq!(form.get("guests").unwrap(), &Value::Int(42));
    assert_eq!(form.get("start_on").unwrap(), &Value::Date(ymd(2020, 6, 15)));

    let ends_at: DateTime<FixedOffset> = form.typed("ends_at").unwrap();
    assert_eq!((ends_at.hour(), ends_at.minute()), (23, 30));
    assert_eq!(ends_at.offset().local_minus_utc(), 7200);

    assert_eq!(
        form.typed::<TimeOfDay>("doors_at").unwrap(),
        TimeOfDay::new(19, 30, 0).unwrap()
    );
    assert!(form.validate().is_empty());
}

// ── Unparseable input ───────────────────────────────────────────────────

#[test]
fn test_unparseable_input_is_kept_and_reported_once() {
    let cases = [
        ("guests", "abc", "is not a number"),
        ("start_on", "2020-06-15", "is not a date"),
        ("ends_at", "whenever", "is not a time"),
        ("doors_at", "after lunch", "is not a time of day"),
    ];
    for (attribute, raw, message) in cases {
        let form = event(&[(attribute, raw)]);
        assert_eq!(form.get(attribute).unwrap(), &Value::from(raw), "{attribute}");

        let errors = form.validate();
        assert_eq!(errors.len(), 1, "{attribute}: {errors}");
        assert_eq!(errors.messages(attribute), vec![message]);
    }
}

#[test]
fn test_edge_input_is_kept_and_reported_once() {
    let cases = [
        ("guests", "99999999999999999999", "is out of range"),
        ("guests", "١٢", "is not a number"),
        ("start_on", "٠٦/١٥/٢٠٢٠", "is not a date"),
        ("ends_at", "٢٠٢٠-٠٦-١٥", "is not a time"),
        ("doors_at", "٩", "is not a time of day"),
        ("doors_at", "١٢:٣٠", "is not a time of day"),
    ];
    for (attribute, raw, message) in cases {
        let form = event(&[(attribute, raw)]);
        assert_eq!(form.get(attribute).unwrap(), &Value::from(raw), "{raw}");

        let errors = form.validate();
        assert_eq!(errors.len(), 1, "{raw}: {errors}");
        assert_eq!(errors.messages(attribute), vec![message], "{raw}");
    }

    let form = event(&[("guests", "99999999999999999999")]);
    assert!(matches!(
        form.typed::<i64>("guests"),
        Err(FormError::TypeMismatch { .. })
    ));
}

#[test]
fn test_surrounding_whitespace_is_ignored() {
    let form = event(&[
        ("guests", " 12 "),
        ("start_on", "\t06/15/2020 "),
        ("doors_at", "  7:30 pm\n"),
    ]);
    assert_eq!(form.get("guests").unwrap(), &Value::Int(12));
    assert_eq!(form.get("start_on").unwrap(), &Value::Date(ymd(2020, 6, 15)));
    assert_eq!(
        form.typed::<TimeOfDay>("doors_at").unwrap(),
        TimeOfDay::new(19, 30, 0).unwrap()
    );
    assert!(form.validate().is_empty());
}

// ── Empty input ─────────────────────────────────────────────────────────

#[test]
fn test_empty_input_never_errors() {
    for attribute in ["title", "guests", "start_on", "ends_at", "doors_at"] {
        let form = event(&[(attribute, "")]);
        assert!(form.validate().is_empty(), "{attribute}");

        let form = event(&[(attribute, "   ")]);
        assert!(form.validate().is_empty(), "{attribute}");
    }
    assert!(FormModel::new(event_schema()).is_valid());
}

// ── Date bounds ─────────────────────────────────────────────────────────

#[test]
fn test_earliest_bound() {
    let errors = event(&[("start_on", "12/31/2019")]).validate();
    assert_eq!(errors.messages("start_on"), vec!["is too early"]);

    assert!(event(&[("start_on", "01/01/2020")]).is_valid());
}

#[test]
fn test_latest_bound() {
    let errors = event(&[("start_on", "01/01/2021")]).validate();
    assert_eq!(errors.messages("start_on"), vec!["is too late"]);

    assert!(event(&[("start_on", "12/31/2020")]).is_valid());
}

#[test]
fn test_computed_bound() {
    let schema = Schema::builder("ReminderForm")
        .attribute(AttributeDecl::date("remind_on").earliest(DateBound::today()))
        .build();

    let mut form = FormModel::new(schema);
    form.set("remind_on", Value::Date(ymd(2000, 1, 1))).unwrap();
    assert_eq!(form.validate().messages("remind_on"), vec!["is too early"]);

    form.set("remind_on", Value::Date(ymd(2999, 1, 1))).unwrap();
    assert!(form.is_valid());
}

// ── Integer rules ───────────────────────────────────────────────────────

#[test]
fn test_integer_numericality_is_merged() {
    let schema = Schema::builder("TicketForm")
        .attribute(
            AttributeDecl::integer("quantity")
                .presence()
                .numericality(NumericalityOptions::default().greater_than(0.0).less_than(10.0)),
        )
        .build();

    let form = FormModel::from_attributes(Arc::clone(&schema), [("quantity", "2.5")]).unwrap();
    assert_eq!(form.validate().messages("quantity"), vec!["must be an integer"]);

    let form = FormModel::from_attributes(Arc::clone(&schema), [("quantity", "12")]).unwrap();
    assert_eq!(form.validate().messages("quantity"), vec!["must be less than 10"]);

    let form = FormModel::from_attributes(Arc::clone(&schema), [("quantity", "")]).unwrap();
    assert_eq!(form.validate().messages("quantity"), vec!["can't be blank"]);

    let form = FormModel::from_attributes(schema, [("quantity", "3")]).unwrap();
    assert!(form.is_valid());
}

// ── Record-backed models ────────────────────────────────────────────────

#[test]
fn test_record_store_reports_from_raw_slot() {
    let mut form = FormModel::with_store(event_schema(), RecordStore::new());
    form.assign_attributes([("start_on", "not a date"), ("guests", "abc")])
        .unwrap();

    assert_eq!(form.get("start_on").unwrap(), &Value::Null);
    assert_eq!(
        form.before_type_cast("start_on").unwrap(),
        &Value::from("not a date")
    );

    let errors = form.validate();
    assert_eq!(errors.messages("start_on"), vec!["is not a date"]);
    assert_eq!(errors.messages("guests"), vec!["is not a number"]);
    assert!(!form.persisted());
}

#[test]
fn test_persisted_record() {
    let mut store = RecordStore::new();
    store.load("title", Value::from("Saved"));
    store.mark_persisted(3_i64);

    let form = FormModel::with_store(event_schema(), store);
    assert!(form.persisted());
    assert_eq!(form.to_param().as_deref(), Some("3"));
    assert_eq!(form.get("title").unwrap(), &Value::from("Saved"));
}

// ── Errors ──────────────────────────────────────────────────────────────

#[test]
fn test_full_messages() {
    let form = event(&[("guests", "many"), ("start_on", "12/31/2019")]);
    let errors = form.validate();
    assert_eq!(
        errors.full_messages(form.schema()),
        vec!["Guests is not a number", "Start on is too early"]
    );
}

#[test]
fn test_ensure_valid_and_unknown_attribute() {
    let form = event(&[("doors_at", "25:00")]);
    let err = form.ensure_valid().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Validation failed: doors_at: is not a time of day"
    );

    let result = FormModel::from_attributes(event_schema(), [("venue", "Hall")]);
    assert!(matches!(result, Err(FormError::UnknownAttribute(name)) if name == "venue"));
}

#[test]
fn test_schema_reports_types() {
    let schema = event_schema();
    let kinds: Vec<AttributeType> = schema.attributes().iter().map(|a| a.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            AttributeType::String,
            AttributeType::Integer,
            AttributeType::Date,
            AttributeType::Time,
            AttributeType::TimeOfDay,
        ]
    );
}
