use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// A guest's full name as typed into the form. Any non-blank text is accepted.
#[derive(Debug, PartialEq, Clone)]
pub struct PersonName(String);

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PersonName {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(ValidationError::MissingField("fullName"));
        }
        Ok(Self(value.to_string()))
    }
}
