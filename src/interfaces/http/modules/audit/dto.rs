use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::AuditEntry;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuditEntryDto {
    pub actor: String,
    /// Create, Edit, Update or Print
    pub category: String,
    pub message: String,
    pub recorded_at: DateTime<Utc>,
}

impl From<AuditEntry> for AuditEntryDto {
    fn from(e: AuditEntry) -> Self {
        Self {
            actor: e.actor,
            category: e.category.to_string(),
            message: e.message,
            recorded_at: e.recorded_at,
        }
    }
}
