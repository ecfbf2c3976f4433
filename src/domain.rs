mod email_address;
mod event_details;
mod gender;
mod person_name;
mod submission;

pub use email_address::EmailAddress;
pub use event_details::EventDetails;
pub use gender::Gender;
pub use person_name::PersonName;
pub use submission::{Guest, Submission};

#[cfg(test)]
pub(crate) use event_details::tests::test_event_details;
