//! Model naming conventions.
//!
//! [`ModelName`] derives the keys a form model is known by from its type
//! name: `"SignupForm"` has param key `signup_form` and route key
//! `signup_forms`. A `::`-separated namespace is folded into the keys but
//! dropped from the element and human names.

use formkit_core::utils::text::{humanize, pluralize, underscore};
use serde::Serialize;

/// The derived names of a form model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelName {
    /// The model name as given (`"Admin::SignupForm"`).
    pub name: String,
    /// `admin_signup_form`
    pub singular: String,
    /// `admin_signup_forms`
    pub plural: String,
    /// `signup_form`
    pub element: String,
    /// `Signup form`
    pub human: String,
    /// The key form parameters are nested under: `admin_signup_form`.
    pub param_key: String,
    /// The key collection routes use: `admin_signup_forms`.
    pub route_key: String,
}

impl ModelName {
    /// Derives every name from a type name.
    ///
    /// # Examples
    ///
    /// ```
    /// use formkit_forms::naming::ModelName;
    ///
    /// let name = ModelName::new("Admin::SignupForm");
    /// assert_eq!(name.singular, "admin_signup_form");
    /// assert_eq!(name.element, "signup_form");
    /// assert_eq!(name.human, "Signup form");
    /// assert_eq!(name.route_key, "admin_signup_forms");
    /// ```
    pub fn new(name: &str) -> Self {
        let segments: Vec<&str> = name.split("::").filter(|s| !s.is_empty()).collect();
        let last = segments.last().copied().unwrap_or(name);

        let singular = segments
            .iter()
            .map(|s| underscore(s))
            .collect::<Vec<_>>()
            .join("_");
        let plural = pluralize(&singular);
        let route_key = if plural == singular {
            format!("{plural}_index")
        } else {
            plural.clone()
        };

        Self {
            name: name.to_string(),
            element: underscore(last),
            human: humanize(last),
            param_key: singular.clone(),
            route_key,
            plural,
            singular,
        }
    }
}

/// Types that expose a [`ModelName`].
pub trait Named {
    fn model_name(&self) -> &ModelName;
}
