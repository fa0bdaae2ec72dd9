use serde::Serialize;
use utoipa::ToSchema;

use crate::model::common::Timestamps;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": "1f0c2a57-8a45-4ef1-9a84-31f4a5a2b7c1",
        "name": "Alice",
        "department": "Eng",
        "createdAt": "2024-01-01T09:30:00Z",
        "updatedAt": "2024-01-01T09:30:00Z"
    })
)]
pub struct User {
    #[schema(example = "1f0c2a57-8a45-4ef1-9a84-31f4a5a2b7c1")]
    pub id: String,

    #[schema(example = "Alice")]
    pub name: String,

    #[schema(example = "Eng")]
    pub department: String,

    /// Argon2 hash, never sent to clients.
    #[serde(skip_serializing)]
    pub password: String,

    #[serde(flatten)]
    #[sqlx(flatten)]
    pub timestamps: Timestamps,
}

/// A user that passed validation and is ready to be stored.
///
/// `password` holds plaintext until the service swaps it for its hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub department: String,
    pub password: String,
}
