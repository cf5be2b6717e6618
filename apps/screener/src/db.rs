use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Schema steps, applied in order on every start. Each is idempotent; new
/// columns are only ever added, and nullable, so older rows stay readable.
const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS candidates (
        id UUID PRIMARY KEY,
        name TEXT,
        email TEXT,
        phone TEXT,
        status TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "ALTER TABLE candidates ADD COLUMN IF NOT EXISTS interview_at TIMESTAMPTZ",
    "ALTER TABLE candidates ADD COLUMN IF NOT EXISTS meeting_link TEXT",
    "ALTER TABLE candidates ADD COLUMN IF NOT EXISTS ats_score DOUBLE PRECISION",
];

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Brings the candidates table up to the current shape.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    for (step, sql) in MIGRATIONS.iter().enumerate() {
        sqlx::query(sql)
            .execute(pool)
            .await
            .with_context(|| format!("Migration step {step} failed"))?;
    }
    info!("Applied {} schema steps", MIGRATIONS.len());
    Ok(())
}
