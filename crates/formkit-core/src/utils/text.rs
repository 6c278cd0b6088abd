//! String inflection helpers.
//!
//! These cover the handful of inflections the forms layer needs: turning a
//! type name into a snake-case key, pluralizing that key, and turning an
//! attribute name into a human-readable label.

use once_cell::sync::Lazy;
use regex::Regex;

static ACRONYM_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z\d]+)([A-Z][a-z])").expect("valid regex"));
static WORD_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z\d])([A-Z])").expect("valid regex"));

/// Converts a `CamelCase` name to `snake_case`.
///
/// # Examples
///
/// ```
/// use formkit_core::utils::text::underscore;
///
/// assert_eq!(underscore("SignupForm"), "signup_form");
/// assert_eq!(underscore("HTTPRequestForm"), "http_request_form");
/// assert_eq!(underscore("already_snake"), "already_snake");
/// ```
pub fn underscore(s: &str) -> String {
    let s = ACRONYM_BOUNDARY.replace_all(s, "${1}_${2}");
    let s = WORD_BOUNDARY.replace_all(&s, "${1}_${2}");
    s.replace('-', "_").to_lowercase()
}

/// Pluralizes a lowercase English word with the regular rules.
///
/// # Examples
///
/// ```
/// use formkit_core::utils::text::pluralize;
///
/// assert_eq!(pluralize("form"), "forms");
/// assert_eq!(pluralize("address"), "addresses");
/// assert_eq!(pluralize("entry"), "entries");
/// assert_eq!(pluralize("day"), "days");
/// ```
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    if ["s", "x", "z", "ch", "sh"].iter().any(|suffix| word.ends_with(suffix)) {
        return format!("{word}es");
    }
    if let Some(stem) = word.strip_suffix('y') {
        let before = stem.chars().last();
        if before.is_some_and(|c| !"aeiou".contains(c)) {
            return format!("{stem}ies");
        }
    }
    format!("{word}s")
}

/// Turns an attribute name into a human-readable label.
///
/// Underscores become spaces, a trailing `_id` is dropped, and only the
/// first letter is capitalized.
///
/// # Examples
///
/// ```
/// use formkit_core::utils::text::humanize;
///
/// assert_eq!(humanize("start_on"), "Start on");
/// assert_eq!(humanize("author_id"), "Author");
/// assert_eq!(humanize("SignupForm"), "Signup form");
/// ```
pub fn humanize(s: &str) -> String {
    let snake = underscore(s);
    let trimmed = snake.strip_suffix("_id").unwrap_or(&snake);
    let words = trimmed.replace('_', " ");
    capfirst(words.trim())
}

/// Capitalizes the first character of a string.
///
/// # Examples
///
/// ```
/// use formkit_core::utils::text::capfirst;
///
/// assert_eq!(capfirst("hello"), "Hello");
/// assert_eq!(capfirst(""), "");
/// assert_eq!(capfirst("HELLO"), "HELLO");
/// ```
pub fn capfirst(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |c| {
        let mut result = c.to_uppercase().to_string();
        result.extend(chars);
        result
    })
}
