use std::net::TcpListener;

use anyhow::Context;

use rsvp::app;
use rsvp::service::{Dispatcher, Notifier};
use rsvp::settings::Settings;
use rsvp::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init(
        telemetry::env_filter(telemetry::DEFAULT_FILTER)?,
        std::io::stdout,
    )?;

    let settings = Settings::load()?;

    let notifier = Notifier::new(
        settings.email.client()?,
        settings.email.admin()?,
        settings.event.clone(),
    );
    let rsvp_log = settings.rsvp_log()?;
    if !rsvp_log.is_enabled() {
        tracing::info!("No spreadsheet configured, RSVPs will not be recorded");
    }
    let dispatcher = Dispatcher::new(notifier, rsvp_log);

    let listener = TcpListener::bind(settings.app.addr())?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    app::run(listener, dispatcher)?
        .await
        .context("Failed to run app")
}
