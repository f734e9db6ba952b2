//! Tests for on-disk database initialization

use fyyur_common::db::init::init_database;
use fyyur_common::db::migrations::{get_schema_version, CURRENT_SCHEMA_VERSION};

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("fyyur.db");

    let result = init_database(&db_path).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("fyyur.db");

    let pool1 = init_database(&db_path).await.expect("first open");
    sqlx::query(
        "INSERT INTO venue (name, address, city, state, phone)
         VALUES ('The Musical Hop', '1015 Folsom Street', 'San Francisco', 'CA', '123-123-1234')",
    )
    .execute(&pool1)
    .await
    .unwrap();
    pool1.close().await;

    let pool2 = init_database(&db_path).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.as_ref().err());
    let pool2 = pool2.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM venue")
        .fetch_one(&pool2)
        .await
        .unwrap();
    assert_eq!(count, 1, "data should survive reopening");
}

#[tokio::test]
async fn test_schema_version_recorded_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("fyyur.db");

    let pool = init_database(&db_path).await.unwrap();

    assert_eq!(get_schema_version(&pool).await.unwrap(), CURRENT_SCHEMA_VERSION);
}

#[tokio::test]
async fn test_foreign_keys_enforced_on_every_connection() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("fyyur.db");
    let pool = init_database(&db_path).await.unwrap();

    // Hold several connections at once so the insert may land on any of them
    let mut held = Vec::new();
    for _ in 0..3 {
        held.push(pool.acquire().await.unwrap());
    }
    for conn in held.iter_mut() {
        let result = sqlx::query("INSERT INTO show (artist_id, venue_id, start_time) VALUES (1, 1, '2035-01-01 20:00:00')")
            .execute(&mut **conn)
            .await;
        assert!(result.is_err(), "show with missing artist/venue must be rejected");
    }
}
