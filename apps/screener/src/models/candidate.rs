use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted screening outcome. Columns added after the first release are
/// nullable so older rows still load.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: String,
    pub ats_score: Option<f64>,
    pub interview_at: Option<DateTime<Utc>>,
    pub meeting_link: Option<String>,
    pub created_at: DateTime<Utc>,
}
