use std::fmt;
use std::str::FromStr;

use regex::Regex;

use unicode_segmentation::UnicodeSegmentation;

use crate::error::ValidationError;

const FIELD: &str = "email";
const MAX_LEN: usize = 256;

/// A user supplied email-address
#[derive(Debug, PartialEq, Clone)]
pub struct EmailAddress(String);

impl FromStr for EmailAddress {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        lazy_static::lazy_static! {
            static ref EMAIL_REGEX: Regex =
                Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap();
        }

        let value = value.trim();

        if value.is_empty() {
            return Err(ValidationError::MissingField(FIELD));
        }
        if value.graphemes(true).count() > MAX_LEN {
            return Err(ValidationError::InvalidFormat(FIELD));
        }
        if !EMAIL_REGEX.is_match(value) {
            return Err(ValidationError::InvalidFormat(FIELD));
        }

        Ok(Self(value.to_string()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
