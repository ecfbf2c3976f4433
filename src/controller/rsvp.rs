use actix_web::dev::HttpServiceFactory;
use actix_web::error::JsonPayloadError;
use actix_web::{post, web, HttpRequest, HttpResponse};

use serde::Serialize;

use serde_json::Value;

use crate::domain::Submission;
use crate::error::{RestError, RestResult, ValidationError};
use crate::service::Dispatcher;

const DECLINED_MESSAGE: &str = "RSVP received. Thank you for your response!";
const ATTENDING_MESSAGE: &str = "RSVP received successfully!";

#[derive(Debug, Serialize)]
struct SubmitResponse {
    success: bool,
    message: &'static str,
}

impl SubmitResponse {
    fn ok(message: &'static str) -> HttpResponse {
        HttpResponse::Ok().json(Self {
            success: true,
            message,
        })
    }
}

/// RSVP submission endpoint. Responds as soon as the payload is validated;
/// notifications for attending guests run after the response in the background.
#[tracing::instrument(name = "Submit an RSVP", skip(dispatcher, payload))]
#[post("")]
async fn submit(
    dispatcher: web::Data<Dispatcher>,
    payload: web::Json<Value>,
) -> RestResult<HttpResponse> {
    let submission = Submission::try_from(&payload.0)?;

    match submission {
        Submission::Declined => Ok(SubmitResponse::ok(DECLINED_MESSAGE)),
        Submission::Attending(guest) => {
            // Detached, the response does not wait on delivery
            let _ = dispatcher.dispatch(guest);
            Ok(SubmitResponse::ok(ATTENDING_MESSAGE))
        }
    }
}

/// Body extraction failures. Bad JSON is the client's fault, a broken payload stream is not.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let err = match err {
        JsonPayloadError::Payload(e) => {
            RestError::Internal(anyhow::anyhow!("Failed to read request payload: {}", e))
        }
        _ => RestError::BadRequest(ValidationError::MalformedPayload),
    };
    err.into()
}

/// RSVP API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/submit-rsvp")
        .app_data(
            web::JsonConfig::default()
                .content_type_required(false)
                .error_handler(json_error),
        )
        .service(submit)
}
