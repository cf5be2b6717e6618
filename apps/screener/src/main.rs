mod config;
mod db;
mod errors;
mod gateway;
mod models;
mod routes;
mod screening;
mod state;

use anyhow::{Context, Result};
use chrono::Duration;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::gateway::notifier::{LogNotifier, Notifier, WebhookNotifier};
use crate::gateway::store::PgCandidateStore;
use crate::gateway::{Gateway, InterviewPolicy};
use crate::routes::build_router;
use crate::screening::criteria::ScoringCriteria;
use crate::screening::extractor::{FieldExtractor, SkillVocabulary};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    // Rubric: an invalid file stops startup rather than failing every upload
    let criteria = match &config.rubric_path {
        Some(path) => ScoringCriteria::from_json_file(path)?,
        None => ScoringCriteria::default(),
    };
    info!(
        "Rubric '{}': {} required, {} preferred, min academic score {}",
        criteria.name,
        criteria.required_skills.len(),
        criteria.preferred_skills.len(),
        criteria.min_academic_score
    );

    // Every skill the rubric scores must also be searchable
    let vocabulary = config
        .skill_vocabulary
        .as_deref()
        .map(SkillVocabulary::from_csv)
        .unwrap_or_default()
        .with_tokens(criteria.skill_tokens());
    let extractor = FieldExtractor::new(vocabulary).context("Failed to compile extraction rules")?;
    info!("Skill vocabulary: {} tokens", extractor.vocabulary().tokens().len());

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    // Initialize notifier (logs invitations when no relay is configured)
    let notifier: Arc<dyn Notifier> = match &config.notify_webhook_url {
        Some(url) => {
            info!("Invitations will be relayed to {url}");
            Arc::new(WebhookNotifier::new(
                url.clone(),
                config.notify_webhook_token.clone(),
                config.notify_from.clone(),
            )?)
        }
        None => {
            info!("NOTIFY_WEBHOOK_URL not set; invitations will only be logged");
            Arc::new(LogNotifier)
        }
    };

    let gateway = Gateway::new(
        Arc::new(PgCandidateStore::new(db)),
        notifier,
        InterviewPolicy {
            lead: Duration::days(config.interview_lead_days),
            meeting_link: config.meeting_link.clone(),
        },
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        extractor: Arc::new(extractor),
        criteria: Arc::new(criteria),
        gateway: Arc::new(gateway),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
