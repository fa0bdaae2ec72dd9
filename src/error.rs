use actix_web::{
    Error, HttpResponse, ResponseError,
    body::{BoxBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    error::InternalError,
    http::StatusCode,
    middleware::Next,
};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;

pub const USER_NOT_FOUND: &str = "Could not find the user.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", USER_NOT_FOUND)]
    UserNotFound,

    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("{0}")]
    BadRequest(String),

    #[error("Cannot {method} {path}")]
    UnknownRoute { method: String, path: String },

    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// What an error tells the client, before the envelope is put around it.
#[derive(Debug, PartialEq)]
pub enum ErrorDetail {
    Message(String),
    Structured(Map<String, Value>),
}

/// Envelope for errors that carry a single message.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = 404)]
    pub status_code: u16,
    #[schema(example = "/users/1f0c2a57-8a45-4ef1-9a84-31f4a5a2b7c1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[schema(example = "Could not find the user.")]
    pub message: String,
}

/// Detail carried by a rejected creation payload; the envelope adds `success: false`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationDetail {
    #[schema(example = 400)]
    pub status_code: u16,
    #[schema(example = json!(["name should not be empty"]))]
    pub message: Vec<String>,
    #[schema(example = "Bad Request")]
    pub error: String,
}

impl AppError {
    pub fn detail(&self) -> ErrorDetail {
        match self {
            AppError::Validation(messages) => {
                let detail = ValidationDetail {
                    status_code: StatusCode::BAD_REQUEST.as_u16(),
                    message: messages.clone(),
                    error: "Bad Request".to_string(),
                };
                match serde_json::to_value(detail) {
                    Ok(Value::Object(map)) => ErrorDetail::Structured(map),
                    _ => ErrorDetail::Message(self.to_string()),
                }
            }
            // details stay in the log
            AppError::Store(_) | AppError::PasswordHash(_) => {
                ErrorDetail::Message("Internal server error".to_string())
            }
            other => ErrorDetail::Message(other.to_string()),
        }
    }
}

impl ErrorDetail {
    pub fn envelope(self, status: StatusCode, path: Option<&str>) -> Value {
        match self {
            ErrorDetail::Message(message) => serde_json::to_value(ErrorEnvelope {
                success: false,
                status_code: status.as_u16(),
                path: path.map(str::to_string),
                message,
            })
            .unwrap_or(Value::Null),
            ErrorDetail::Structured(detail) => {
                let mut body = Map::new();
                body.insert("success".to_string(), Value::Bool(false));
                body.extend(detail);
                Value::Object(body)
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::UserNotFound | AppError::UnknownRoute { .. } => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // error_envelope adds the request path on the way out
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(self.detail().envelope(status, None))
    }
}

/// Turns every error response into the JSON envelope and logs it.
///
/// Errors raised by handlers and extractors arrive attached to the response;
/// errors raised by inner middleware (rate limiting) arrive as `Err` and leave
/// as `Err`, carrying the rendered envelope as their response.
///
/// The request must not be cloned before `next.call`: routing needs sole
/// ownership of it to record the matched path.
pub async fn error_envelope(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let path = req.uri().to_string();

    let res = match next.call(req).await {
        Ok(res) => res,
        Err(err) => {
            let response = render(&err, &path);
            return Err(InternalError::from_response(err.to_string(), response).into());
        }
    };

    let response = match res.response().error() {
        Some(err) => render(err, &path),
        None => return Ok(res.map_into_boxed_body()),
    };

    Ok(res.into_response(response))
}

fn render(err: &Error, path: &str) -> HttpResponse {
    let status = err.as_response_error().status_code();
    let detail = match err.as_error::<AppError>() {
        Some(app_err) => app_err.detail(),
        None => ErrorDetail::Message(err.to_string()),
    };

    if status.is_server_error() {
        error!(status = status.as_u16(), path, error = %err, "Request failed");
    } else {
        warn!(status = status.as_u16(), path, error = %err, "Request rejected");
    }

    HttpResponse::build(status).json(detail.envelope(status, Some(path)))
}
