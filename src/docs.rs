use crate::api::users::CreateUser;
use crate::error::{ErrorEnvelope, ValidationDetail};
use crate::model::common::Timestamps;
use crate::model::user::User;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        version = "0.1.0",
        description = r#"
## User Management API

Create, list, look up and delete users. Each user belongs to a department.

### 📦 Response Format
- JSON in and out
- Passwords are accepted on creation and never returned
- Errors share one envelope: `{ success: false, statusCode, path, message }`,
  or `{ success: false, statusCode, message: [..], error }` for rejected payloads

### 🔐 Security
The user endpoints are open. These docs sit behind HTTP basic auth.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::users::list_users,
        crate::api::users::get_user,
        crate::api::users::create_user,
        crate::api::users::delete_user
    ),
    components(
        schemas(
            User,
            Timestamps,
            CreateUser,
            ErrorEnvelope,
            ValidationDetail
        )
    ),
    tags(
        (name = "Users", description = "User management APIs"),
    )
)]
pub struct ApiDoc;
