//! Request validation.
//!
//! Request types implement [`Validate`]; the [`crate::extract`] extractors
//! run it after deserializing and turn failures into a 400 response listing
//! every offending field.

use std::collections::BTreeMap;
use std::fmt;

/// Field-level validation failures, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: Vec<(String, Vec<String>)>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        if let Some((_, messages)) = self.fields.iter_mut().find(|(name, _)| name == field) {
            messages.push(message);
        } else {
            self.fields.push((field.to_string(), vec![message]));
        }
    }

    /// Record a failure for `field` unless `ok` holds.
    pub fn check(&mut self, ok: bool, field: &str, message: impl Into<String>) {
        if !ok {
            self.add(field, message);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages for one field.
    #[must_use]
    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    /// Failures keyed by field.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, Vec<String>> {
        self.fields.iter().cloned().collect()
    }

    /// `Ok` when nothing was recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one failure was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// `field: msg1, msg2 | other: msg`
impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            if !first {
                f.write_str(" | ")?;
            }
            first = false;
            write!(f, "{field}: {}", messages.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A request that can check its own fields.
pub trait Validate {
    /// # Errors
    ///
    /// Returns every field failure found.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Check a required text field: not blank, and its length in characters
/// within `min..=max`.
pub fn check_text(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    value: &str,
    min: usize,
    max: usize,
) {
    if value.trim().is_empty() {
        errors.add(field, format!("{label} is required"));
        return;
    }

    let length = value.chars().count();
    if length < min || length > max {
        let message = if min <= 1 {
            format!("{label} must not exceed {max} characters")
        } else {
            format!("{label} must be between {min} and {max} characters")
        };
        errors.add(field, message);
    }
}
