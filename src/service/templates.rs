use ammonia::clean_text;

use chrono::{DateTime, Utc};

use crate::client::Email;
use crate::domain::{EmailAddress, EventDetails, Guest};

const CONFIRMATION_TAG: &str = "rsvp-confirmation";
const ADMIN_NOTICE_TAG: &str = "rsvp-admin-notice";

/// Confirmation sent to a guest who is attending
pub fn guest_confirmation(event: &EventDetails, guest: &Guest) -> Email {
    let attire = event.attire_for(&guest.gender);

    let subject = format!("Your {} RSVP Confirmation", event.name);

    let html_body = format!(
        r#"<div style="font-family: 'Segoe UI', Tahoma, sans-serif; max-width: 600px; margin: 0 auto; color: #1f2937;">
<h1 style="background-color: #1f2937; color: #ffffff; padding: 30px 20px; text-align: center; margin: 0;">Your RSVP is Confirmed!</h1>
<div style="padding: 30px 20px; border: 1px solid #e5e7eb;">
<p>Dear {name},</p>
<p>Thank you for confirming your attendance to {event}! We're excited to have you join us.</p>
<div style="background-color: #f9fafb; padding: 20px; border-radius: 6px; border: 1px solid #e5e7eb;">
<h2 style="margin-top: 0;">Event Details</h2>
<p><strong>Date:</strong> {date}</p>
<p><strong>Time:</strong> {time}</p>
<p><strong>Venue:</strong> {venue}</p>
<p><strong>Attire:</strong> {attire}</p>
<p><strong>Location:</strong> {location}</p>
</div>
<p style="text-align: center;"><a href="{map_link}" style="display: inline-block; background-color: #1f2937; color: #ffffff; padding: 12px 24px; border-radius: 6px; text-decoration: none;">View Map Location</a></p>
<p>We look forward to seeing you!</p>
</div>
<p style="text-align: center; color: #6b7280; font-size: 0.8em;">This is an automated confirmation email.</p>
</div>"#,
        name = clean_text(guest.name.as_ref()),
        event = clean_text(&event.name),
        date = clean_text(&event.date),
        time = clean_text(&event.time),
        venue = clean_text(&event.venue),
        attire = clean_text(attire),
        location = clean_text(&event.location),
        map_link = clean_text(&event.map_link),
    );

    let text_body = format!(
        "Dear {name},\n\n\
         Thank you for confirming your attendance to {event}! We're excited to have you join us.\n\n\
         Date: {date}\n\
         Time: {time}\n\
         Venue: {venue}\n\
         Attire: {attire}\n\
         Location: {location}\n\
         Map: {map_link}\n\n\
         We look forward to seeing you!\n",
        name = guest.name,
        event = event.name,
        date = event.date,
        time = event.time,
        venue = event.venue,
        location = event.location,
        map_link = event.map_link,
    );

    Email {
        recipient: guest.email.clone(),
        subject,
        html_body,
        text_body,
        tag: Some(CONFIRMATION_TAG),
    }
}

/// Notice sent to the organizer when a guest confirms
pub fn admin_notice(
    event: &EventDetails,
    guest: &Guest,
    admin: &EmailAddress,
    submitted_at: DateTime<Utc>,
) -> Email {
    let attire = event.attire_for(&guest.gender);
    let submitted_at = submitted_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();

    let subject = format!("New {} RSVP Received", event.name);

    let html_body = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #e0e0e0; border-radius: 5px;">
<h2 style="color: #333; text-align: center;">New RSVP Received</h2>
<p><strong>Name:</strong> {name}</p>
<p><strong>Email:</strong> {email}</p>
<p><strong>Gender:</strong> {gender}</p>
<p><strong>Attire Assigned:</strong> {attire}</p>
<p><strong>Time Submitted:</strong> {submitted_at}</p>
</div>"#,
        name = clean_text(guest.name.as_ref()),
        email = clean_text(guest.email.as_ref()),
        gender = clean_text(guest.gender.as_ref()),
        attire = clean_text(attire),
    );

    let text_body = format!(
        "New RSVP received\n\n\
         Name: {name}\n\
         Email: {email}\n\
         Gender: {gender}\n\
         Attire Assigned: {attire}\n\
         Time Submitted: {submitted_at}\n",
        name = guest.name,
        email = guest.email,
        gender = guest.gender,
    );

    Email {
        recipient: admin.clone(),
        subject,
        html_body,
        text_body,
        tag: Some(ADMIN_NOTICE_TAG),
    }
}
