use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::CandidateRow;

/// Fields written for a newly screened candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCandidate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: String,
    pub ats_score: f64,
    pub interview_at: Option<DateTime<Utc>>,
    pub meeting_link: Option<String>,
}

/// Storage for screened candidates. Carried in `AppState` as
/// `Arc<dyn CandidateStore>`.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    async fn insert(&self, candidate: NewCandidate) -> Result<CandidateRow, AppError>;

    /// All candidates, oldest first.
    async fn list(&self) -> Result<Vec<CandidateRow>, AppError>;
}

pub struct PgCandidateStore {
    pool: PgPool,
}

impl PgCandidateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateStore for PgCandidateStore {
    async fn insert(&self, candidate: NewCandidate) -> Result<CandidateRow, AppError> {
        let row: CandidateRow = sqlx::query_as(
            r#"
            INSERT INTO candidates
                (id, name, email, phone, status, ats_score, interview_at, meeting_link)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, email, phone, status, ats_score, interview_at, meeting_link, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&candidate.name)
        .bind(&candidate.email)
        .bind(&candidate.phone)
        .bind(&candidate.status)
        .bind(candidate.ats_score)
        .bind(candidate.interview_at)
        .bind(&candidate.meeting_link)
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted candidate {} with status {}", row.id, row.status);
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<CandidateRow>, AppError> {
        let rows = sqlx::query_as(
            r#"
            SELECT id, name, email, phone, status, ats_score, interview_at, meeting_link, created_at
            FROM candidates
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
