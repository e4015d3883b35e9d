use chrono::{DateTime, Utc};
use serde::Serialize;

/// A stored form submission. Wire names are camelCase to match the
/// front-end payloads.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
