use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;

use crate::errors::AppError;
use crate::gateway::GatewayOutcome;
use crate::models::candidate::CandidateRow;
use crate::screening::criteria::ScoringCriteria;
use crate::screening::pipeline::screen_pdf;
use crate::screening::profile::CandidateProfile;
use crate::screening::scoring::Tier;
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";

#[derive(Debug, Serialize)]
pub struct ScreeningResponse {
    pub profile: CandidateProfile,
    pub ats_score: f64,
    pub breakdown: Vec<String>,
    pub tier: Tier,
    #[serde(flatten)]
    pub outcome: GatewayOutcome,
}

/// POST /api/v1/screenings
pub async fn handle_screen_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScreeningResponse>, AppError> {
    let upload = read_resume_upload(&mut multipart).await?;
    let screening = screen_pdf(upload, state.extractor.clone(), state.criteria.clone()).await?;
    let outcome = state
        .gateway
        .dispatch(&screening, &state.criteria.name, Utc::now())
        .await?;

    Ok(Json(ScreeningResponse {
        profile: screening.profile,
        ats_score: screening.result.total_score,
        breakdown: screening.result.breakdown,
        tier: screening.result.tier,
        outcome,
    }))
}

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
) -> Result<Json<Vec<CandidateRow>>, AppError> {
    let rows = state.gateway.store().list().await?;
    Ok(Json(rows))
}

/// GET /api/v1/rubric
pub async fn handle_get_rubric(State(state): State<AppState>) -> Json<ScoringCriteria> {
    Json(state.criteria.as_ref().clone())
}

/// Pulls the PDF bytes out of the `resume` multipart field.
async fn read_resume_upload(multipart: &mut Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(AppError::Validation("No file selected".to_string()));
        }
        if !is_pdf_filename(&filename) {
            return Err(AppError::Validation("Please upload a PDF file".to_string()));
        }

        return field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")));
    }

    Err(AppError::Validation("No file uploaded".to_string()))
}

fn is_pdf_filename(filename: &str) -> bool {
    filename.to_ascii_lowercase().ends_with(".pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_filename_check() {
        assert!(is_pdf_filename("resume.pdf"));
        assert!(is_pdf_filename("RESUME.PDF"));
        assert!(!is_pdf_filename("resume.docx"));
        assert!(!is_pdf_filename("pdf"));
    }
}
