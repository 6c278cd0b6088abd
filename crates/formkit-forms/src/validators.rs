//! Validation rules.
//!
//! Every rule implements [`EachValidator`]: it is handed one attribute's
//! stored value, plus read access to the rest of the record for rules that
//! need the raw input, and records any failures on an [`Errors`]
//! collection. Rules never fail in any other way.
//!
//! Blank values (`Null` or whitespace-only text) pass every rule here
//! except [`PresenceValidator`].

use std::fmt;

use formkit_core::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::Errors;
use crate::store::AttributeRead;
use crate::value::Value;

static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("valid regex"));
static DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").expect("valid regex")
});

/// A rule applied to a single attribute.
///
/// # Examples
///
/// ```
/// use formkit_core::ValidationError;
/// use formkit_forms::errors::Errors;
/// use formkit_forms::store::{AttributeRead, TransientStore};
/// use formkit_forms::validators::EachValidator;
/// use formkit_forms::value::Value;
///
/// #[derive(Debug)]
/// struct Uppercase;
///
/// impl EachValidator for Uppercase {
///     fn validate_each(
///         &self,
///         _record: &dyn AttributeRead,
///         attribute: &str,
///         value: &Value,
///         errors: &mut Errors,
///     ) {
///         if let Some(s) = value.as_str() {
///             if s != s.to_uppercase() {
///                 errors.add(attribute, ValidationError::new("must be uppercase", "uppercase"));
///             }
///         }
///     }
///
///     fn kind(&self) -> &'static str {
///         "uppercase"
///     }
/// }
///
/// let mut errors = Errors::new();
/// Uppercase.validate_each(&TransientStore::new(), "code", &Value::from("abc"), &mut errors);
/// assert_eq!(errors.messages("code"), vec!["must be uppercase"]);
/// ```
pub trait EachValidator: Send + Sync + fmt::Debug {
    /// Checks `value`, the stored value of `attribute`, and records failures.
    fn validate_each(
        &self,
        record: &dyn AttributeRead,
        attribute: &str,
        value: &Value,
        errors: &mut Errors,
    );

    /// A short name for the rule, used in logs.
    fn kind(&self) -> &'static str;
}

/// Formats a bound for a message: whole numbers print without a fraction.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

fn characters(n: usize) -> &'static str {
    if n == 1 {
        "character"
    } else {
        "characters"
    }
}

// ── Presence ──────────────────────────────────────────────────────────

/// Requires a non-blank value.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresenceValidator;

impl EachValidator for PresenceValidator {
    fn validate_each(
        &self,
        _record: &dyn AttributeRead,
        attribute: &str,
        value: &Value,
        errors: &mut Errors,
    ) {
        if value.is_blank() {
            errors.add(attribute, ValidationError::new("can't be blank", "blank"));
        }
    }

    fn kind(&self) -> &'static str {
        "presence"
    }
}

// ── Length ────────────────────────────────────────────────────────────

/// Bounds on the character count of a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LengthOptions {
    pub minimum: Option<usize>,
    pub maximum: Option<usize>,
    pub is: Option<usize>,
}

impl LengthOptions {
    #[must_use]
    pub const fn minimum(mut self, n: usize) -> Self {
        self.minimum = Some(n);
        self
    }

    #[must_use]
    pub const fn maximum(mut self, n: usize) -> Self {
        self.maximum = Some(n);
        self
    }

    #[must_use]
    pub const fn is(mut self, n: usize) -> Self {
        self.is = Some(n);
        self
    }
}

/// Checks the character count of a value's text.
#[derive(Debug, Clone)]
pub struct LengthValidator {
    pub options: LengthOptions,
}

impl LengthValidator {
    pub const fn new(options: LengthOptions) -> Self {
        Self { options }
    }
}

impl EachValidator for LengthValidator {
    fn validate_each(
        &self,
        _record: &dyn AttributeRead,
        attribute: &str,
        value: &Value,
        errors: &mut Errors,
    ) {
        if value.is_null() {
            return;
        }
        let len = value.to_string().chars().count();
        let LengthOptions {
            minimum,
            maximum,
            is,
        } = self.options;

        if let Some(n) = is {
            if len != n {
                errors.add(
                    attribute,
                    ValidationError::new(
                        format!("is the wrong length (should be {n} {})", characters(n)),
                        "wrong_length",
                    )
                    .with_param("count", n.to_string()),
                );
            }
        }
        if let Some(n) = minimum {
            if len < n {
                errors.add(
                    attribute,
                    ValidationError::new(
                        format!("is too short (minimum is {n} {})", characters(n)),
                        "too_short",
                    )
                    .with_param("count", n.to_string()),
                );
            }
        }
        if let Some(n) = maximum {
            if len > n {
                errors.add(
                    attribute,
                    ValidationError::new(
                        format!("is too long (maximum is {n} {})", characters(n)),
                        "too_long",
                    )
                    .with_param("count", n.to_string()),
                );
            }
        }
    }

    fn kind(&self) -> &'static str {
        "length"
    }
}

// ── Numericality ──────────────────────────────────────────────────────

/// Constraints on a numeric value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumericalityOptions {
    pub only_integer: bool,
    pub greater_than: Option<f64>,
    pub greater_than_or_equal_to: Option<f64>,
    pub equal_to: Option<f64>,
    pub less_than: Option<f64>,
    pub less_than_or_equal_to: Option<f64>,
    pub odd: bool,
    pub even: bool,
}

impl NumericalityOptions {
    #[must_use]
    pub const fn only_integer(mut self) -> Self {
        self.only_integer = true;
        self
    }

    #[must_use]
    pub const fn greater_than(mut self, n: f64) -> Self {
        self.greater_than = Some(n);
        self
    }

    #[must_use]
    pub const fn greater_than_or_equal_to(mut self, n: f64) -> Self {
        self.greater_than_or_equal_to = Some(n);
        self
    }

    #[must_use]
    pub const fn equal_to(mut self, n: f64) -> Self {
        self.equal_to = Some(n);
        self
    }

    #[must_use]
    pub const fn less_than(mut self, n: f64) -> Self {
        self.less_than = Some(n);
        self
    }

    #[must_use]
    pub const fn less_than_or_equal_to(mut self, n: f64) -> Self {
        self.less_than_or_equal_to = Some(n);
        self
    }

    #[must_use]
    pub const fn odd(mut self) -> Self {
        self.odd = true;
        self
    }

    #[must_use]
    pub const fn even(mut self) -> Self {
        self.even = true;
        self
    }
}

/// Requires a numeric value, optionally integral and within bounds.
///
/// The raw input is checked rather than the coerced value, so `"4.5"` on
/// an integer attribute reports "must be an integer" instead of passing
/// as a truncated 4.
#[derive(Debug, Clone)]
pub struct NumericalityValidator {
    pub options: NumericalityOptions,
}

impl NumericalityValidator {
    pub const fn new(options: NumericalityOptions) -> Self {
        Self { options }
    }

    /// Reads `raw` as a number, recording the reason when it is not one.
    #[allow(clippy::cast_precision_loss)]
    fn parse(&self, raw: &Value) -> Result<f64, ValidationError> {
        let not_a_number = || ValidationError::new("is not a number", "not_a_number");
        let not_an_integer = || ValidationError::new("must be an integer", "not_an_integer");

        match raw {
            Value::Int(i) => Ok(*i as f64),
            Value::Float(f) if f.is_finite() => {
                if self.options.only_integer && f.fract() != 0.0 {
                    Err(not_an_integer())
                } else {
                    Ok(*f)
                }
            }
            Value::String(s) => {
                let s = s.trim();
                if self.options.only_integer {
                    if INTEGER.is_match(s) {
                        s.parse::<i64>().map(|i| i as f64).map_err(|_| {
                            ValidationError::new("is out of range", "out_of_range")
                                .with_param("min", i64::MIN.to_string())
                                .with_param("max", i64::MAX.to_string())
                        })
                    } else if DECIMAL.is_match(s) {
                        Err(not_an_integer())
                    } else {
                        Err(not_a_number())
                    }
                } else if DECIMAL.is_match(s) {
                    s.parse::<f64>().map_err(|_| not_a_number())
                } else {
                    Err(not_a_number())
                }
            }
            _ => Err(not_a_number()),
        }
    }
}

impl EachValidator for NumericalityValidator {
    fn validate_each(
        &self,
        record: &dyn AttributeRead,
        attribute: &str,
        value: &Value,
        errors: &mut Errors,
    ) {
        let raw = record
            .read_attribute_before_type_cast(attribute)
            .unwrap_or(value);
        if raw.is_blank() {
            return;
        }

        let number = match self.parse(raw) {
            Ok(n) => n,
            Err(e) => {
                errors.add(attribute, e);
                return;
            }
        };

        let o = &self.options;
        let checks: [(Option<f64>, fn(f64, f64) -> bool, &str, &str); 5] = [
            (o.greater_than, |n, b| n > b, "must be greater than", "greater_than"),
            (
                o.greater_than_or_equal_to,
                |n, b| n >= b,
                "must be greater than or equal to",
                "greater_than_or_equal_to",
            ),
            (o.equal_to, |n, b| (n - b).abs() < f64::EPSILON, "must be equal to", "equal_to"),
            (o.less_than, |n, b| n < b, "must be less than", "less_than"),
            (
                o.less_than_or_equal_to,
                |n, b| n <= b,
                "must be less than or equal to",
                "less_than_or_equal_to",
            ),
        ];
        for (bound, holds, message, code) in checks {
            if let Some(b) = bound {
                if !holds(number, b) {
                    let shown = format_number(b);
                    errors.add(
                        attribute,
                        ValidationError::new(format!("{message} {shown}"), code)
                            .with_param("count", shown),
                    );
                }
            }
        }

        if o.odd && number.rem_euclid(2.0) != 1.0 {
            errors.add(attribute, ValidationError::new("must be odd", "odd"));
        }
        if o.even && number.rem_euclid(2.0) != 0.0 {
            errors.add(attribute, ValidationError::new("must be even", "even"));
        }
    }

    fn kind(&self) -> &'static str {
        "numericality"
    }
}

// ── Format ────────────────────────────────────────────────────────────

/// Requires the value's text to match a pattern.
#[derive(Debug, Clone)]
pub struct FormatValidator {
    pub with: Regex,
}

impl FormatValidator {
    pub const fn new(with: Regex) -> Self {
        Self { with }
    }
}

impl EachValidator for FormatValidator {
    fn validate_each(
        &self,
        _record: &dyn AttributeRead,
        attribute: &str,
        value: &Value,
        errors: &mut Errors,
    ) {
        if value.is_blank() {
            return;
        }
        if !self.with.is_match(&value.to_string()) {
            errors.add(attribute, ValidationError::new("is invalid", "invalid"));
        }
    }

    fn kind(&self) -> &'static str {
        "format"
    }
}

/// Compiles a pattern already checked by `#[derive(FormModel)]`.
///
/// # Panics
///
/// Panics if `pattern` is not a valid regular expression.
#[doc(hidden)]
pub fn regex_literal(pattern: &str) -> Regex {
    Regex::new(pattern).expect("format pattern is checked when the form model is derived")
}

// ── Inclusion ─────────────────────────────────────────────────────────

/// Requires the value to be one of a fixed set.
///
/// Members are compared by their text, so `Value::Int(1)` and `"1"` match.
#[derive(Debug, Clone)]
pub struct InclusionValidator {
    pub within: Vec<Value>,
}

impl InclusionValidator {
    pub fn new<I, V>(within: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            within: within.into_iter().map(Into::into).collect(),
        }
    }
}

impl EachValidator for InclusionValidator {
    fn validate_each(
        &self,
        _record: &dyn AttributeRead,
        attribute: &str,
        value: &Value,
        errors: &mut Errors,
    ) {
        if value.is_blank() {
            return;
        }
        let text = value.to_string();
        if !self
            .within
            .iter()
            .any(|member| member == value || member.to_string() == text)
        {
            errors.add(
                attribute,
                ValidationError::new("is not included in the list", "inclusion"),
            );
        }
    }

    fn kind(&self) -> &'static str {
        "inclusion"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coercion::Coerced;
    use crate::store::{AttributeStore, RecordStore, TransientStore};

    fn run(v: &dyn EachValidator, value: Value) -> Vec<String> {
        let mut errors = Errors::new();
        v.validate_each(&TransientStore::new(), "field", &value, &mut errors);
        errors
            .messages("field")
            .into_iter()
            .map(String::from)
            .collect()
    }

    // ── presence ─────────────────────────────────────────────────────

    #[test]
    fn test_presence() {
        assert_eq!(run(&PresenceValidator, Value::Null), vec!["can't be blank"]);
        assert_eq!(run(&PresenceValidator, Value::from("  ")), vec!["can't be blank"]);
        assert!(run(&PresenceValidator, Value::from("x")).is_empty());
        assert!(run(&PresenceValidator, Value::Int(0)).is_empty());
    }

    // ── length ───────────────────────────────────────────────────────

    #[test]
    fn test_length_bounds() {
        let v = LengthValidator::new(LengthOptions::default().minimum(2).maximum(4));
        assert_eq!(run(&v, Value::from("a")), vec!["is too short (minimum is 2 characters)"]);
        assert_eq!(
            run(&v, Value::from("abcde")),
            vec!["is too long (maximum is 4 characters)"]
        );
        assert!(run(&v, Value::from("abc")).is_empty());
    }

    #[test]
    fn test_length_is_and_singular() {
        let v = LengthValidator::new(LengthOptions::default().is(1));
        assert_eq!(
            run(&v, Value::from("ab")),
            vec!["is the wrong length (should be 1 character)"]
        );
        assert!(run(&v, Value::from("é")).is_empty());
    }

    #[test]
    fn test_length_skips_null_only() {
        let v = LengthValidator::new(LengthOptions::default().minimum(1));
        assert!(run(&v, Value::Null).is_empty());
        assert_eq!(run(&v, Value::from("")), vec!["is too short (minimum is 1 character)"]);
    }

    // ── numericality ─────────────────────────────────────────────────

    #[test]
    fn test_numericality_not_a_number() {
        let v = NumericalityValidator::new(NumericalityOptions::default());
        assert_eq!(run(&v, Value::from("abc")), vec!["is not a number"]);
        assert_eq!(run(&v, Value::from("1.2.3")), vec!["is not a number"]);
        assert_eq!(run(&v, Value::from("NaN")), vec!["is not a number"]);
        assert_eq!(run(&v, Value::Bool(true)), vec!["is not a number"]);
        assert!(run(&v, Value::from("4.5")).is_empty());
        assert!(run(&v, Value::from("-1e3")).is_empty());
        assert!(run(&v, Value::Int(3)).is_empty());
    }

    #[test]
    fn test_numericality_only_integer() {
        let v = NumericalityValidator::new(NumericalityOptions::default().only_integer());
        assert_eq!(run(&v, Value::from("4.5")), vec!["must be an integer"]);
        assert_eq!(run(&v, Value::Float(4.5)), vec!["must be an integer"]);
        assert_eq!(run(&v, Value::from("abc")), vec!["is not a number"]);
        assert!(run(&v, Value::from(" 42 ")).is_empty());
        assert!(run(&v, Value::Int(42)).is_empty());
    }

    #[test]
    fn test_numericality_only_integer_out_of_range() {
        let v = NumericalityValidator::new(NumericalityOptions::default().only_integer());
        assert_eq!(run(&v, Value::from("99999999999999999999")), vec!["is out of range"]);
        assert_eq!(run(&v, Value::from("-9223372036854775809")), vec!["is out of range"]);
        assert!(run(&v, Value::from("9223372036854775807")).is_empty());

        let any = NumericalityValidator::new(NumericalityOptions::default());
        assert!(run(&any, Value::from("99999999999999999999")).is_empty());
    }

    #[test]
    fn test_numericality_rejects_non_ascii_digits() {
        let v = NumericalityValidator::new(NumericalityOptions::default().only_integer());
        assert_eq!(run(&v, Value::from("١٢")), vec!["is not a number"]);
        assert_eq!(run(&v, Value::from("４２")), vec!["is not a number"]);

        let any = NumericalityValidator::new(NumericalityOptions::default());
        assert_eq!(run(&any, Value::from("٣.٥")), vec!["is not a number"]);
    }

    #[test]
    fn test_numericality_blank_passes() {
        let v = NumericalityValidator::new(NumericalityOptions::default().only_integer());
        assert!(run(&v, Value::Null).is_empty());
        assert!(run(&v, Value::from("")).is_empty());
    }

    #[test]
    fn test_numericality_comparisons() {
        let v = NumericalityValidator::new(
            NumericalityOptions::default()
                .greater_than(0.0)
                .less_than_or_equal_to(10.0),
        );
        assert_eq!(run(&v, Value::Int(0)), vec!["must be greater than 0"]);
        assert_eq!(run(&v, Value::Int(11)), vec!["must be less than or equal to 10"]);
        assert!(run(&v, Value::Int(10)).is_empty());

        let v = NumericalityValidator::new(
            NumericalityOptions::default()
                .greater_than_or_equal_to(1.5)
                .less_than(3.0)
                .equal_to(2.0),
        );
        assert_eq!(
            run(&v, Value::Int(1)),
            vec!["must be greater than or equal to 1.5", "must be equal to 2"]
        );
        assert_eq!(
            run(&v, Value::Int(3)),
            vec!["must be equal to 2", "must be less than 3"]
        );
    }

    #[test]
    fn test_numericality_odd_even() {
        let odd = NumericalityValidator::new(NumericalityOptions::default().odd());
        let even = NumericalityValidator::new(NumericalityOptions::default().even());
        assert_eq!(run(&odd, Value::Int(4)), vec!["must be odd"]);
        assert!(run(&odd, Value::Int(-3)).is_empty());
        assert_eq!(run(&even, Value::Int(3)), vec!["must be even"]);
        assert!(run(&even, Value::Int(-4)).is_empty());
    }

    #[test]
    fn test_numericality_reads_raw_slot() {
        let mut store = RecordStore::new();
        store.write_attribute("age", Value::from("4.5"), Coerced::Raw(Value::from("4.5")));

        let v = NumericalityValidator::new(NumericalityOptions::default().only_integer());
        let mut errors = Errors::new();
        let stored = store.read_attribute("age").cloned().unwrap_or(Value::Null);
        v.validate_each(&store, "age", &stored, &mut errors);
        assert_eq!(errors.messages("age"), vec!["must be an integer"]);
    }

    // ── format ───────────────────────────────────────────────────────

    #[test]
    fn test_format() {
        let v = FormatValidator::new(Regex::new(r"^\d{5}$").unwrap());
        assert_eq!(run(&v, Value::from("abcde")), vec!["is invalid"]);
        assert!(run(&v, Value::from("12345")).is_empty());
        assert!(run(&v, Value::Int(12345)).is_empty());
        assert!(run(&v, Value::from("")).is_empty());
    }

    // ── inclusion ────────────────────────────────────────────────────

    #[test]
    fn test_inclusion() {
        let v = InclusionValidator::new(["small", "large"]);
        assert_eq!(run(&v, Value::from("medium")), vec!["is not included in the list"]);
        assert!(run(&v, Value::from("small")).is_empty());
        assert!(run(&v, Value::Null).is_empty());

        let v = InclusionValidator::new([1_i64, 2, 3]);
        assert!(run(&v, Value::Int(2)).is_empty());
        assert!(run(&v, Value::from("3")).is_empty());
        assert_eq!(run(&v, Value::Int(4)), vec!["is not included in the list"]);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(PresenceValidator.kind(), "presence");
        assert_eq!(
            NumericalityValidator::new(NumericalityOptions::default()).kind(),
            "numericality"
        );
    }
}
