//! Field-keyed validation messages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping from form field name to one or more human-readable messages.
///
/// Fields are kept in name order so serialised payloads are stable.
///
/// # Examples
/// ```
/// use shops::domain::FieldErrors;
///
/// let mut errors = FieldErrors::new();
/// errors.add("title", "The title field is required.");
/// errors.add("title", "The title may not be blank.");
/// assert_eq!(errors.messages("title").map(<[String]>::len), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// An empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// A mapping holding a single message for `field`.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Append `message` to the messages recorded for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Messages recorded for `field`, if any.
    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Whether no field has messages.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

impl<F, M> FromIterator<(F, M)> for FieldErrors
where
    F: Into<String>,
    M: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (F, M)>>(iter: I) -> Self {
        let mut errors = Self::new();
        for (field, message) in iter {
            errors.add(field, message);
        }
        errors
    }
}
