use std::sync::Arc;

use crate::config::Config;
use crate::gateway::Gateway;
use crate::screening::criteria::ScoringCriteria;
use crate::screening::extractor::FieldExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is immutable after startup, so concurrent uploads never
/// observe each other.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub extractor: Arc<FieldExtractor>,
    /// The active rubric.
    pub criteria: Arc<ScoringCriteria>,
    /// Persistence and notification for finished screenings.
    pub gateway: Arc<Gateway>,
}
