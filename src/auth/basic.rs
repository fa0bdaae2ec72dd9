use crate::config::{AdminCredentials, Config};
use actix_web::{
    Error, HttpResponse,
    body::{BoxBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::header,
    web::Data,
};
use actix_web::middleware::Next;
use base64::{Engine, engine::general_purpose::STANDARD};
use tracing::debug;

/// Paths served by the Swagger UI and the OpenAPI document.
pub const DOCS_PREFIX: &str = "/docs";

/// HTTP basic auth in front of the API docs; every other path passes through.
pub async fn docs_basic_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    if !req.path().starts_with(DOCS_PREFIX) {
        return next.call(req).await.map(ServiceResponse::map_into_boxed_body);
    }

    let config = req
        .app_data::<Data<Config>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App config missing"))?;

    let authorized = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|value| is_admin(value, &config.admin));

    if !authorized {
        debug!(path = %req.path(), "Docs access challenged");
        let resp = HttpResponse::Unauthorized()
            .insert_header((header::WWW_AUTHENTICATE, r#"Basic realm="docs""#))
            .finish();
        return Ok(req.into_response(resp));
    }

    next.call(req).await.map(ServiceResponse::map_into_boxed_body)
}

fn is_admin(header_value: &str, admin: &AdminCredentials) -> bool {
    let Some(encoded) = header_value.strip_prefix("Basic ") else {
        return false;
    };
    let Ok(decoded) = STANDARD.decode(encoded.trim()) else {
        return false;
    };
    let Ok(credentials) = String::from_utf8(decoded) else {
        return false;
    };

    match credentials.split_once(':') {
        Some((username, password)) => username == admin.username && password == admin.password,
        None => false,
    }
}
