//! Type checks for date, time, and time-of-day attributes.
//!
//! These validators are what make a failed coercion visible. When an
//! attribute's stored value is not of the declared type, they look at the
//! raw input the caller supplied and report it, so a value that did not
//! parse is never lost silently.
//!
//! [`DateValidator`] can also bound a date on either side. Bounds are
//! inclusive, and either may be computed when validation runs.

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use formkit_core::{ValidationError, SETTINGS};

use crate::errors::Errors;
use crate::store::AttributeRead;
use crate::validators::EachValidator;
use crate::value::{AttributeType, Value};

/// An inclusive limit on a date attribute.
#[derive(Clone)]
pub enum DateBound {
    /// A fixed date.
    Fixed(NaiveDate),
    /// A date computed each time validation runs.
    Computed(Arc<dyn Fn() -> NaiveDate + Send + Sync>),
}

impl DateBound {
    /// A bound computed by `f` at validation time.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn() -> NaiveDate + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    /// Today's date in the configured offset, evaluated at validation time.
    pub fn today() -> Self {
        Self::computed(|| {
            Utc::now()
                .with_timezone(&SETTINGS.offset())
                .date_naive()
        })
    }

    /// The date this bound stands for right now.
    pub fn resolve(&self) -> NaiveDate {
        match self {
            Self::Fixed(d) => *d,
            Self::Computed(f) => f(),
        }
    }
}

impl From<NaiveDate> for DateBound {
    fn from(d: NaiveDate) -> Self {
        Self::Fixed(d)
    }
}

impl fmt::Debug for DateBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(d) => f.debug_tuple("Fixed").field(d).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A fixed bound from a date literal already checked by `#[derive(FormModel)]`.
///
/// # Panics
///
/// Panics if the components do not form a valid date.
#[doc(hidden)]
pub fn fixed_date(year: i32, month: u32, day: u32) -> DateBound {
    NaiveDate::from_ymd_opt(year, month, day)
        .map(DateBound::Fixed)
        .expect("date literal is checked when the form model is derived")
}

/// Picks the value a type check should look at.
///
/// A stored value of the right type is used as is. Otherwise the raw
/// input is preferred, falling back to the stored value when the store
/// keeps no raw slot.
fn candidate<'a>(
    ty: AttributeType,
    record: &'a dyn AttributeRead,
    attribute: &str,
    value: &'a Value,
) -> &'a Value {
    if ty.matches(value) {
        return value;
    }
    record
        .read_attribute_before_type_cast(attribute)
        .unwrap_or(value)
}

/// Runs the shared part of a temporal check.
///
/// Returns the candidate when it is present and of type `ty`, recording
/// "is not a ..." when it is present but of another type.
fn checked<'a>(
    ty: AttributeType,
    record: &'a dyn AttributeRead,
    attribute: &str,
    value: &'a Value,
    errors: &mut Errors,
) -> Option<&'a Value> {
    let candidate = candidate(ty, record, attribute, value);
    if candidate.is_blank() {
        return None;
    }
    if !ty.matches(candidate) {
        let label = ty.label();
        errors.add(
            attribute,
            ValidationError::new(format!("is not a {label}"), format!("not_a_{ty}")),
        );
        return None;
    }
    Some(candidate)
}

/// Requires a date, optionally within inclusive bounds.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use formkit_forms::errors::Errors;
/// use formkit_forms::store::TransientStore;
/// use formkit_forms::temporal::DateValidator;
/// use formkit_forms::validators::EachValidator;
/// use formkit_forms::value::Value;
///
/// let v = DateValidator::new().earliest(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
/// let mut errors = Errors::new();
/// let value = Value::Date(NaiveDate::from_ymd_opt(2019, 12, 31).unwrap());
/// v.validate_each(&TransientStore::new(), "start_on", &value, &mut errors);
/// assert_eq!(errors.messages("start_on"), vec!["is too early"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DateValidator {
    pub earliest: Option<DateBound>,
    pub latest: Option<DateBound>,
}

impl DateValidator {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn earliest(mut self, bound: impl Into<DateBound>) -> Self {
        self.earliest = Some(bound.into());
        self
    }

    #[must_use]
    pub fn latest(mut self, bound: impl Into<DateBound>) -> Self {
        self.latest = Some(bound.into());
        self
    }
}

impl EachValidator for DateValidator {
    fn validate_each(
        &self,
        record: &dyn AttributeRead,
        attribute: &str,
        value: &Value,
        errors: &mut Errors,
    ) {
        let Some(date) = checked(AttributeType::Date, record, attribute, value, errors)
            .and_then(Value::as_date)
        else {
            return;
        };

        if let Some(bound) = &self.earliest {
            let earliest = bound.resolve();
            if date < earliest {
                errors.add(
                    attribute,
                    ValidationError::new("is too early", "too_early")
                        .with_param("earliest", earliest.to_string()),
                );
            }
        }
        if let Some(bound) = &self.latest {
            let latest = bound.resolve();
            if date > latest {
                errors.add(
                    attribute,
                    ValidationError::new("is too late", "too_late")
                        .with_param("latest", latest.to_string()),
                );
            }
        }
    }

    fn kind(&self) -> &'static str {
        "date"
    }
}

/// Requires a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeValidator;

impl EachValidator for TimeValidator {
    fn validate_each(
        &self,
        record: &dyn AttributeRead,
        attribute: &str,
        value: &Value,
        errors: &mut Errors,
    ) {
        checked(AttributeType::Time, record, attribute, value, errors);
    }

    fn kind(&self) -> &'static str {
        "time"
    }
}

/// Requires a time of day.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeOfDayValidator;

impl EachValidator for TimeOfDayValidator {
    fn validate_each(
        &self,
        record: &dyn AttributeRead,
        attribute: &str,
        value: &Value,
        errors: &mut Errors,
    ) {
        checked(AttributeType::TimeOfDay, record, attribute, value, errors);
    }

    fn kind(&self) -> &'static str {
        "time_of_day"
    }
}
