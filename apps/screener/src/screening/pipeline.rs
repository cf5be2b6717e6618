use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::screening::criteria::ScoringCriteria;
use crate::screening::extractor::FieldExtractor;
use crate::screening::profile::CandidateProfile;
use crate::screening::scoring::{score_profile, ScoreResult};
use crate::screening::text::{extract_text, DocumentReadError, PagedDocument, PdfDocument};

/// Everything derived from one document.
#[derive(Debug, Clone)]
pub struct Screening {
    pub profile: CandidateProfile,
    pub result: ScoreResult,
}

/// Extracts and scores already-flattened resume text.
pub fn screen_text(
    text: &str,
    extractor: &FieldExtractor,
    criteria: &ScoringCriteria,
) -> Result<Screening, AppError> {
    let profile = extractor.extract(text);
    debug!(
        name_found = profile.name.is_some(),
        email_found = profile.email.is_some(),
        phone_found = profile.phone.is_some(),
        skills = profile.skills.len(),
        "Fields extracted"
    );
    let result = score_profile(&profile, criteria)?;
    Ok(Screening { profile, result })
}

pub fn screen_document<D: PagedDocument + ?Sized>(
    doc: &D,
    extractor: &FieldExtractor,
    criteria: &ScoringCriteria,
) -> Result<Screening, AppError> {
    let text = extract_text(doc);
    screen_text(&text, extractor, criteria)
}

/// Runs the whole pipeline for an uploaded PDF on a blocking worker thread.
///
/// A panic inside the PDF parser is reported as an unreadable document.
pub async fn screen_pdf(
    bytes: Bytes,
    extractor: Arc<FieldExtractor>,
    criteria: Arc<ScoringCriteria>,
) -> Result<Screening, AppError> {
    let size = bytes.len();
    let screening = tokio::task::spawn_blocking(move || {
        let doc = PdfDocument::from_bytes(&bytes)?;
        screen_document(&doc, &extractor, &criteria)
    })
    .await
    .map_err(|e| {
        if e.is_panic() {
            AppError::DocumentRead(DocumentReadError::Aborted(
                "the PDF parser crashed on this file".to_string(),
            ))
        } else {
            AppError::Internal(anyhow::anyhow!("screening task cancelled: {e}"))
        }
    })??;

    info!(
        bytes = size,
        score = screening.result.total_score,
        tier = %screening.result.tier,
        "Resume screened"
    );
    Ok(screening)
}
