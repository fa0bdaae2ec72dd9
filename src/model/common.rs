use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Bookkeeping columns shared by every table, maintained by the store.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Timestamps {
    #[schema(example = "2024-01-01T09:30:00Z", value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,

    #[schema(example = "2024-01-01T09:30:00Z", value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}
