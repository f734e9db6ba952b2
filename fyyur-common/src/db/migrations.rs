//! Database schema migrations
//!
//! Versioned, idempotent schema upgrades tracked in the `schema_version`
//! table. Base tables are created with their current shape by
//! [`crate::db::init`]; migrations bring older databases up to that shape.
//!
//! # Migration Guidelines
//!
//! 1. **Never modify existing migrations** - databases in the field may already carry them
//! 2. **Always add new migrations** - one function per schema change
//! 3. **Check before altering** - every step must be a no-op when already applied
//! 4. **Use ALTER TABLE** - prefer it over DROP/CREATE to preserve data

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::Result;

/// Current schema version
///
/// **IMPORTANT:** Increment this when adding new migrations
pub const CURRENT_SCHEMA_VERSION: i32 = 2;

/// Get current schema version from database
///
/// Returns 0 if schema_version table doesn't exist or has no rows
pub async fn get_schema_version(pool: &SqlitePool) -> Result<i32> {
    let table_exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM sqlite_master
            WHERE type='table' AND name='schema_version'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> =
        sqlx::query_scalar("SELECT version FROM schema_version ORDER BY version DESC LIMIT 1")
            .fetch_optional(pool)
            .await?;

    Ok(version.unwrap_or(0))
}

async fn set_schema_version(pool: &SqlitePool, version: i32) -> Result<()> {
    sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
        .bind(version)
        .execute(pool)
        .await?;

    Ok(())
}

/// Run all pending migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let current_version = get_schema_version(pool).await?;

    if current_version == CURRENT_SCHEMA_VERSION {
        info!("Database schema is up to date (v{})", current_version);
        return Ok(());
    }

    if current_version > CURRENT_SCHEMA_VERSION {
        warn!(
            "Database schema version ({}) is newer than code version ({})",
            current_version, CURRENT_SCHEMA_VERSION
        );
        return Ok(());
    }

    info!(
        "Running database migrations: v{} -> v{}",
        current_version, CURRENT_SCHEMA_VERSION
    );

    if current_version < 1 {
        migrate_v1(pool).await?;
        set_schema_version(pool, 1).await?;
        info!("✓ Migration v1 completed");
    }

    if current_version < 2 {
        migrate_v2(pool).await?;
        set_schema_version(pool, 2).await?;
        info!("✓ Migration v2 completed");
    }

    Ok(())
}

/// Migration v1: listing fields on venue and artist
///
/// The first deployments stored only contact details. Website, seeking flags
/// and seeking descriptions were added later.
async fn migrate_v1(pool: &SqlitePool) -> Result<()> {
    info!("Running migration v1: Add website and seeking columns");

    add_column_if_missing(pool, "venue", "website", "TEXT").await?;
    add_column_if_missing(pool, "venue", "seeking_talent", "INTEGER NOT NULL DEFAULT 0").await?;
    add_column_if_missing(pool, "venue", "seeking_description", "TEXT").await?;
    add_column_if_missing(pool, "artist", "website", "TEXT").await?;
    add_column_if_missing(pool, "artist", "seeking_venue", "INTEGER NOT NULL DEFAULT 0").await?;
    add_column_if_missing(pool, "artist", "seeking_description", "TEXT").await?;

    Ok(())
}

/// Migration v2: indexes backing the upcoming/past show queries
async fn migrate_v2(pool: &SqlitePool) -> Result<()> {
    info!("Running migration v2: Add show lookup indexes");

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_show_venue_start ON show (venue_id, start_time)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_show_artist_start ON show (artist_id, start_time)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn add_column_if_missing(
    pool: &SqlitePool,
    table: &str,
    column: &str,
    definition: &str,
) -> Result<()> {
    let has_column: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM pragma_table_info(?) WHERE name = ?")
            .bind(table)
            .bind(column)
            .fetch_one(pool)
            .await?;

    if has_column > 0 {
        return Ok(());
    }

    let sql = format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, definition);
    match sqlx::query(&sql).execute(pool).await {
        Ok(_) => {
            info!("  ✓ Added {} column to {} table", column, table);
            Ok(())
        }
        Err(sqlx::Error::Database(db_err)) if db_err.message().contains("duplicate column") => {
            info!("  {}.{} added concurrently - skipping", table, column);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init::{init_memory_database, prepare_schema};
    use sqlx::sqlite::SqlitePoolOptions;

    #[tokio::test]
    async fn test_fresh_database_reaches_current_version() {
        let pool = init_memory_database().await.unwrap();
        assert_eq!(get_schema_version(&pool).await.unwrap(), CURRENT_SCHEMA_VERSION);
    }

    #[tokio::test]
    async fn test_legacy_tables_gain_missing_columns() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            "CREATE TABLE venue (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL, address TEXT NOT NULL, city TEXT NOT NULL,
                state TEXT NOT NULL, phone TEXT NOT NULL,
                facebook_link TEXT, image_link TEXT
            )",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO venue (name, address, city, state, phone)
             VALUES ('Old Hall', '1 Main St', 'Austin', 'TX', '512-555-0100')",
        )
        .execute(&pool)
        .await
        .unwrap();

        prepare_schema(&pool).await.expect("migration should succeed");

        let seeking: bool = sqlx::query_scalar("SELECT seeking_talent FROM venue WHERE name = 'Old Hall'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert!(!seeking, "existing rows default to not seeking");

        let website: Option<String> = sqlx::query_scalar("SELECT website FROM venue")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert!(website.is_none());
    }

    #[tokio::test]
    async fn test_rerun_does_not_duplicate_versions() {
        let pool = init_memory_database().await.unwrap();
        run_migrations(&pool).await.unwrap();

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_version")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, CURRENT_SCHEMA_VERSION as i64);
    }
}
