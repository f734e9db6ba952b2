//! Show queries and mutations

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;

use fyyur_common::db::{ShowInput, ShowListing};
use fyyur_common::{Error, Result};

fn show_listing_from_row(row: &SqliteRow) -> Result<ShowListing> {
    Ok(ShowListing {
        id: row.try_get("id")?,
        venue_id: row.try_get("venue_id")?,
        venue_name: row.try_get("venue_name")?,
        artist_id: row.try_get("artist_id")?,
        artist_name: row.try_get("artist_name")?,
        artist_image_link: row.try_get("artist_image_link")?,
        start_time: row.try_get("start_time")?,
    })
}

/// Every show with its venue and artist names, by start time
pub async fn list_shows(pool: &SqlitePool) -> Result<Vec<ShowListing>> {
    let rows = sqlx::query(
        r#"
        SELECT s.id, s.venue_id, v.name AS venue_name, s.artist_id, a.name AS artist_name,
               a.image_link AS artist_image_link, s.start_time
        FROM show s
        JOIN venue v ON v.id = s.venue_id
        JOIN artist a ON a.id = s.artist_id
        ORDER BY s.start_time, s.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(show_listing_from_row).collect()
}

/// Schedule a show
///
/// A reference to a missing artist or venue is reported as
/// [`Error::InvalidInput`].
pub async fn create_show(pool: &SqlitePool, input: &ShowInput) -> Result<i64> {
    let result = sqlx::query("INSERT INTO show (artist_id, venue_id, start_time) VALUES (?, ?, ?)")
        .bind(input.artist_id)
        .bind(input.venue_id)
        .bind(input.start_time)
        .execute(pool)
        .await
        .map_err(|e| {
            let err = Error::from(e);
            if err.is_foreign_key_violation() {
                Error::InvalidInput(format!(
                    "Artist {} or venue {} does not exist",
                    input.artist_id, input.venue_id
                ))
            } else {
                err
            }
        })?;

    let id = result.last_insert_rowid();
    info!(
        show_id = id,
        artist_id = input.artist_id,
        venue_id = input.venue_id,
        start_time = %input.start_time,
        "Show listed"
    );
    Ok(id)
}
