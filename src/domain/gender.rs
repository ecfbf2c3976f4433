use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// The gender a guest selected. Only used to pick an attire recommendation,
/// so anything other than `male` is accepted and treated alike.
#[derive(Debug, PartialEq, Clone)]
pub struct Gender(String);

impl Gender {
    pub fn is_male(&self) -> bool {
        self.0 == "male"
    }
}

impl AsRef<str> for Gender {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(ValidationError::MissingField("gender"));
        }
        Ok(Self(value.to_string()))
    }
}
