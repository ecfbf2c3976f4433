use serde_json::{Map, Value};

use crate::domain::{EmailAddress, Gender, PersonName};
use crate::error::ValidationError;

/// A guest who confirmed they are attending
#[derive(Debug, Clone, PartialEq)]
pub struct Guest {
    pub name: PersonName,
    pub email: EmailAddress,
    pub gender: Gender,
}

/// One validated RSVP
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Attending(Guest),
    Declined,
}

impl TryFrom<&Value> for Submission {
    type Error = ValidationError;

    fn try_from(payload: &Value) -> Result<Self, Self::Error> {
        let fields = payload
            .as_object()
            .ok_or(ValidationError::MalformedPayload)?;

        let attending =
            string_field(fields, "attending").ok_or(ValidationError::MissingField("attending"))?;
        if attending != "yes" {
            return Ok(Self::Declined);
        }

        // Every field must be present before any format is checked
        let name = required(fields, "fullName")?;
        let email = required(fields, "email")?;
        let gender = required(fields, "gender")?;

        Ok(Self::Attending(Guest {
            name: name.parse()?,
            email: email.parse()?,
            gender: gender.parse()?,
        }))
    }
}

/// A field's value if present and a string. Any other JSON type counts as absent.
fn string_field<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    fields.get(name).and_then(Value::as_str)
}

/// A present, non-blank string field
fn required<'a>(
    fields: &'a Map<String, Value>,
    name: &'static str,
) -> Result<&'a str, ValidationError> {
    string_field(fields, name)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ValidationError::MissingField(name))
}
