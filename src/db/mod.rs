//! Database module for SQLite persistence.
//!
//! SQLite is the source of truth for all committed tenant data.

mod repository;

pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    // Run embedded migrations
    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS companies (
            id TEXT PRIMARY KEY,
            slug TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            headline TEXT NOT NULL,
            subheadline TEXT,
            mission TEXT,
            story TEXT,
            headquarters TEXT,
            website TEXT,
            size_range TEXT,
            industries TEXT NOT NULL DEFAULT '[]',
            show_salary INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS themes (
            id TEXT PRIMARY KEY,
            company_id TEXT NOT NULL UNIQUE REFERENCES companies(id) ON DELETE CASCADE,
            primary_color TEXT NOT NULL,
            secondary_color TEXT NOT NULL,
            accent_color TEXT NOT NULL,
            background_color TEXT NOT NULL,
            hero_background TEXT,
            banner_image_url TEXT,
            logo_url TEXT,
            culture_video_url TEXT,
            eyebrow TEXT
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sections (
            id TEXT PRIMARY KEY,
            company_id TEXT NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            slug TEXT NOT NULL,
            summary TEXT,
            content TEXT NOT NULL,
            sort_order INTEGER NOT NULL DEFAULT 100,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id TEXT PRIMARY KEY,
            company_id TEXT NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            slug TEXT NOT NULL,
            status TEXT NOT NULL,
            location TEXT NOT NULL,
            job_type TEXT NOT NULL,
            work_setting TEXT NOT NULL,
            department TEXT NOT NULL,
            experience_level TEXT NOT NULL,
            salary_range TEXT NOT NULL,
            description TEXT NOT NULL,
            apply_url TEXT NOT NULL,
            tags TEXT NOT NULL DEFAULT '[]',
            featured INTEGER NOT NULL DEFAULT 0,
            published_at TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recruiters (
            id TEXT PRIMARY KEY,
            company_id TEXT NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            passcode_hash TEXT NOT NULL,
            role TEXT NOT NULL,
            last_login_at TEXT,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes for common queries
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_sections_company_order ON sections(company_id, sort_order);
        CREATE INDEX IF NOT EXISTS idx_jobs_company_listing ON jobs(company_id, featured, created_at);
        CREATE INDEX IF NOT EXISTS idx_jobs_company_status ON jobs(company_id, status);
        CREATE INDEX IF NOT EXISTS idx_recruiters_company ON recruiters(company_id);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
