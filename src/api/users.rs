use crate::{
    api::validation::validate_create_user,
    error::{AppError, ErrorEnvelope, ValidationDetail},
    model::user::User,
    service::UserService,
};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;
use validator::Validate;

/// Fields are optional so that absent and empty values are reported the same way.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(
        required(message = "name should not be empty"),
        length(min = 1, message = "name should not be empty")
    )]
    #[schema(example = "Alice", value_type = String)]
    pub name: Option<String>,

    #[validate(
        required(message = "department should not be empty"),
        length(min = 1, message = "department should not be empty")
    )]
    #[schema(example = "Eng", value_type = String)]
    pub department: Option<String>,

    // checked in api::validation, which can report two rules for one field
    #[schema(example = "secret1", value_type = String, min_length = 6, format = Password)]
    pub password: Option<String>,
}

/// Bodies that are not JSON, or have wrongly typed fields, become a plain 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// List Users
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Every stored user", body = [User]),
        (status = 500, description = "Store failure", body = ErrorEnvelope)
    ),
    tag = "Users"
)]
pub async fn list_users(service: web::Data<UserService>) -> Result<HttpResponse, AppError> {
    let users = service.list_users().await?;

    debug!(count = users.len(), "Listed users");
    Ok(HttpResponse::Ok().json(users))
}

/// Get User by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found", body = ErrorEnvelope, example = json!({
            "success": false,
            "statusCode": 404,
            "path": "/users/1f0c2a57-8a45-4ef1-9a84-31f4a5a2b7c1",
            "message": "Could not find the user."
        }))
    ),
    tag = "Users"
)]
pub async fn get_user(
    service: web::Data<UserService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user = service.get_user(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(user))
}

/// Create User
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid payload, every violation listed", body = ValidationDetail, example = json!({
            "success": false,
            "statusCode": 400,
            "message": ["password must be longer than or equal to 6 characters"],
            "error": "Bad Request"
        }))
    ),
    tag = "Users"
)]
pub async fn create_user(
    service: web::Data<UserService>,
    payload: web::Json<CreateUser>,
) -> Result<HttpResponse, AppError> {
    let new_user = validate_create_user(payload.into_inner())?;
    let user = service.create_user(new_user).await?;

    Ok(HttpResponse::Created().json(user))
}

/// Delete User
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "The deleted user, or null when there was none", body = User)
    ),
    tag = "Users"
)]
pub async fn delete_user(
    service: web::Data<UserService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let deleted = service.delete_user(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(deleted))
}
