//! Attribute declarations.
//!
//! An [`AttributeDecl`] is a builder describing one typed attribute: its
//! name, semantic type, optional label, and validation rules. It is turned
//! into an immutable [`Attribute`] when the owning schema is built.
//!
//! # Rule order
//!
//! Rules run in the order they were declared, with two adjustments tied to
//! the attribute's type:
//!
//! - `integer` attributes always carry a numericality rule with
//!   `only_integer` set. User numericality options are merged into it and
//!   it keeps the position where they were declared; otherwise it runs last.
//! - `date`, `time`, and `time_of_day` attributes always end with their
//!   type check. For dates, `earliest` and `latest` are part of that check.

use std::fmt;
use std::sync::Arc;

use formkit_core::utils::text::humanize;
use regex::Regex;

use crate::errors::Errors;
use crate::store::AttributeRead;
use crate::temporal::{DateBound, DateValidator, TimeOfDayValidator, TimeValidator};
use crate::validators::{
    EachValidator, FormatValidator, InclusionValidator, LengthOptions, LengthValidator,
    NumericalityOptions, NumericalityValidator, PresenceValidator,
};
use crate::value::{AttributeType, Value};

/// A declared attribute, ready to validate.
#[derive(Clone)]
pub struct Attribute {
    name: String,
    kind: AttributeType,
    label: Option<String>,
    rules: Vec<Arc<dyn EachValidator>>,
}

impl Attribute {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn kind(&self) -> AttributeType {
        self.kind
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The declared label, or the humanized name.
    pub fn human_name(&self) -> String {
        self.label.clone().unwrap_or_else(|| humanize(&self.name))
    }

    /// The rules in the order they run.
    pub fn rules(&self) -> &[Arc<dyn EachValidator>] {
        &self.rules
    }

    /// Runs every rule against `value`, the attribute's stored value.
    pub fn validate(&self, record: &dyn AttributeRead, value: &Value, errors: &mut Errors) {
        for rule in &self.rules {
            rule.validate_each(record, &self.name, value, errors);
        }
    }
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("label", &self.label)
            .field(
                "rules",
                &self.rules.iter().map(|r| r.kind()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// A builder for a typed attribute.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use formkit_forms::attribute::AttributeDecl;
/// use formkit_forms::validators::LengthOptions;
///
/// let name = AttributeDecl::string("name")
///     .presence()
///     .length(LengthOptions::default().maximum(40))
///     .build();
/// assert_eq!(name.rules().len(), 2);
///
/// let start = AttributeDecl::date("start_on")
///     .label("Start date")
///     .earliest(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
///     .build();
/// assert_eq!(start.human_name(), "Start date");
/// ```
#[derive(Debug, Clone)]
pub struct AttributeDecl {
    name: String,
    kind: AttributeType,
    label: Option<String>,
    rules: Vec<Arc<dyn EachValidator>>,
    numericality: Option<(usize, NumericalityOptions)>,
    earliest: Option<DateBound>,
    latest: Option<DateBound>,
}

impl AttributeDecl {
    /// Creates a declaration of the given semantic type.
    pub fn new(name: impl Into<String>, kind: AttributeType) -> Self {
        Self {
            name: name.into(),
            kind,
            label: None,
            rules: Vec::new(),
            numericality: None,
            earliest: None,
            latest: None,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, AttributeType::String)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, AttributeType::Integer)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, AttributeType::Date)
    }

    pub fn time(name: impl Into<String>) -> Self {
        Self::new(name, AttributeType::Time)
    }

    pub fn time_of_day(name: impl Into<String>) -> Self {
        Self::new(name, AttributeType::TimeOfDay)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn kind(&self) -> AttributeType {
        self.kind
    }

    /// Sets the label used in full error messages.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn presence(self) -> Self {
        self.validates(PresenceValidator)
    }

    #[must_use]
    pub fn length(self, options: LengthOptions) -> Self {
        self.validates(LengthValidator::new(options))
    }

    /// Adds numericality constraints.
    ///
    /// Declaring numericality twice keeps the later options.
    #[must_use]
    pub fn numericality(mut self, options: NumericalityOptions) -> Self {
        let position = self
            .numericality
            .map_or(self.rules.len(), |(position, _)| position);
        self.numericality = Some((position, options));
        self
    }

    #[must_use]
    pub fn format(self, with: Regex) -> Self {
        self.validates(FormatValidator::new(with))
    }

    #[must_use]
    pub fn inclusion<I, V>(self, within: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.validates(InclusionValidator::new(within))
    }

    /// Sets the inclusive lower bound of a date attribute.
    ///
    /// Ignored for attributes of other types.
    #[must_use]
    pub fn earliest(mut self, bound: impl Into<DateBound>) -> Self {
        self.earliest = Some(bound.into());
        self
    }

    /// Sets the inclusive upper bound of a date attribute.
    ///
    /// Ignored for attributes of other types.
    #[must_use]
    pub fn latest(mut self, bound: impl Into<DateBound>) -> Self {
        self.latest = Some(bound.into());
        self
    }

    /// Adds a custom rule.
    #[must_use]
    pub fn validates(mut self, rule: impl EachValidator + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Finishes the declaration, adding the rules its type requires.
    pub fn build(self) -> Attribute {
        let Self {
            name,
            kind,
            label,
            mut rules,
            numericality,
            earliest,
            latest,
        } = self;

        let numericality = match (kind, numericality) {
            (AttributeType::Integer, Some((position, options))) => {
                Some((position, options.only_integer()))
            }
            (AttributeType::Integer, None) => {
                Some((rules.len(), NumericalityOptions::default().only_integer()))
            }
            (_, other) => other,
        };
        if let Some((position, options)) = numericality {
            let rule: Arc<dyn EachValidator> = Arc::new(NumericalityValidator::new(options));
            rules.insert(position.min(rules.len()), rule);
        }

        if kind != AttributeType::Date && (earliest.is_some() || latest.is_some()) {
            tracing::warn!(
                attribute = %name,
                kind = %kind,
                "earliest/latest only apply to date attributes; ignoring"
            );
        }

        match kind {
            AttributeType::Date => rules.push(Arc::new(DateValidator { earliest, latest })),
            AttributeType::Time => rules.push(Arc::new(TimeValidator)),
            AttributeType::TimeOfDay => rules.push(Arc::new(TimeOfDayValidator)),
            AttributeType::String | AttributeType::Integer => {}
        }

        Attribute {
            name,
            kind,
            label,
            rules,
        }
    }
}
