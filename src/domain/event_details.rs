use serde::Deserialize;

use crate::domain::Gender;

/// Details of the event guests are RSVPing to, loaded once from settings
#[derive(Debug, Clone, Deserialize)]
pub struct EventDetails {
    pub name: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub attire_male: String,
    pub attire_female: String,
    pub location: String,
    pub map_link: String,
}

impl EventDetails {
    /// The attire recommended for a guest of the given gender
    pub fn attire_for(&self, gender: &Gender) -> &str {
        if gender.is_male() {
            &self.attire_male
        } else {
            &self.attire_female
        }
    }
}
