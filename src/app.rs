use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{get, HttpResponse, Responder};
use actix_web::{web, App, HttpServer};

use tracing_actix_web::TracingLogger;

use crate::controller::rsvp;
use crate::service::Dispatcher;

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/health_check")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("I am alive")
}

/// Run the application on a specified TCP listener
pub fn run(listener: TcpListener, dispatcher: Dispatcher) -> anyhow::Result<Server> {
    // Wrap application data
    let dispatcher = web::Data::new(dispatcher);

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(dispatcher.clone())
            .service(health_check)
            .service(rsvp::scope())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
