//! Field validation for the entity forms
//!
//! One predicate per field, no cross-field rules. Each check returns the
//! message shown under the field; [`FieldErrors`] collects them per form.

use std::collections::BTreeMap;
use std::fmt;

// ── Limits ──────────────────────────────────────────────────────────

/// Minimum name length, in characters
pub const MIN_NAME_LEN: usize = 2;

/// Salary bounds, inclusive
pub const MIN_SALARY: i64 = 1_000_000;
pub const MAX_SALARY: i64 = 10_000_000;

/// Digits in a national mobile number
const USER_PHONE_DIGITS: usize = 10;

/// Country calling code accepted in front of user phones
const COUNTRY_CODE: &str = "57";

// ── Per-form error collection ───────────────────────────────────────

/// Validation messages keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one field check
    pub fn check(&mut self, field: &'static str, result: Result<(), String>) {
        match result {
            Ok(()) => {
                self.0.remove(field);
            }
            Err(message) => {
                self.0.insert(field, message);
            }
        }
    }

    /// Single-field error set
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.0.insert(field, message.into());
        errors
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

// ── Field checks ────────────────────────────────────────────────────

fn required(value: &str, label: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{label} is required"));
    }
    Ok(())
}

fn min_length(value: &str, label: &str) -> Result<(), String> {
    if value.trim().chars().count() < MIN_NAME_LEN {
        return Err(format!("{label} must be at least {MIN_NAME_LEN} characters"));
    }
    Ok(())
}

/// Letters (ASCII and Latin-1 accented) or whitespace
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || ('\u{00C0}'..='\u{00FF}').contains(&c) || c.is_whitespace()
}

/// Employee name: required, two characters, letters and spaces only
pub fn employee_name(value: &str) -> Result<(), String> {
    required(value, "Name")?;
    min_length(value, "Name")?;
    if !value.trim().chars().all(is_name_char) {
        return Err("Name may only contain letters and spaces".to_string());
    }
    Ok(())
}

/// User name: required, two characters
pub fn user_name(value: &str) -> Result<(), String> {
    required(value, "Name")?;
    min_length(value, "Name")
}

pub fn position(value: &str) -> Result<(), String> {
    required(value, "Position")
}

/// Parse and bound-check a salary
///
/// The whole (trimmed) text must be an integer.
pub fn parse_salary(value: &str) -> Result<i64, String> {
    required(value, "Salary")?;
    let salary: i64 = value
        .trim()
        .parse()
        .map_err(|_| "Salary must be a whole number".to_string())?;
    if salary < MIN_SALARY {
        return Err(format!(
            "Salary must be at least ${}",
            shared::util::format_thousands(MIN_SALARY)
        ));
    }
    if salary > MAX_SALARY {
        return Err(format!(
            "Salary cannot exceed ${}",
            shared::util::format_thousands(MAX_SALARY)
        ));
    }
    Ok(salary)
}

pub fn salary(value: &str) -> Result<(), String> {
    parse_salary(value).map(|_| ())
}

/// Employee phone: optional leading `+`, then digits, spaces, `-`, `(`, `)`
pub fn employee_phone(value: &str) -> Result<(), String> {
    required(value, "Phone")?;
    let value = value.trim();
    let body = value.strip_prefix('+').unwrap_or(value);
    let valid = !body.is_empty()
        && body
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '-' | '(' | ')'));
    if !valid {
        return Err("Invalid phone format".to_string());
    }
    Ok(())
}

/// User phone: ten digits, optionally prefixed by `57` or `+57`
///
/// Whitespace anywhere is ignored.
pub fn user_phone(value: &str) -> Result<(), String> {
    required(value, "Phone")?;
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    let unprefixed = compact.strip_prefix('+').unwrap_or(&compact);
    let digits = if unprefixed.len() == COUNTRY_CODE.len() + USER_PHONE_DIGITS {
        unprefixed.strip_prefix(COUNTRY_CODE)
    } else if unprefixed.len() == compact.len() {
        Some(unprefixed)
    } else {
        // `+` without the country code
        None
    };
    let valid = digits.is_some_and(|d| {
        d.len() == USER_PHONE_DIGITS && d.chars().all(|c| c.is_ascii_digit())
    });
    if !valid {
        return Err("Phone must have 10 digits (optionally prefixed by 57 or +57)".to_string());
    }
    Ok(())
}

/// Email: one `@`, non-empty local part, dotted domain, no whitespace
pub fn email(value: &str) -> Result<(), String> {
    required(value, "Email")?;
    let value = value.trim();
    let invalid = || Err("Invalid email format".to_string());

    if value.chars().any(char::is_whitespace) {
        return invalid();
    }
    let Some((local, domain)) = value.split_once('@') else {
        return invalid();
    };
    if local.is_empty() || domain.contains('@') {
        return invalid();
    }
    let dotted = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
    if !dotted {
        return invalid();
    }
    Ok(())
}
