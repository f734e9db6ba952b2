//! Query and mutation layer
//!
//! Free functions over a [`sqlx::SqlitePool`]. Every mutation runs in a
//! single transaction and returns a typed [`fyyur_common::Error`].

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use fyyur_common::db::{EntityRef, SearchResults};
use fyyur_common::Result;

pub mod artists;
pub mod genres;
pub mod seed;
pub mod shows;
pub mod venues;

pub use artists::{
    artist_detail, create_artist, delete_artist, find_artist, list_artists, list_recent_artists,
    search_artists, update_artist,
};
pub use genres::{dedup_genres, GenreOwner};
pub use seed::seed_demo_data;
pub use shows::{create_show, list_shows};
pub use venues::{
    create_venue, delete_venue, find_venue, list_recent_venues, list_venue_areas, list_venue_choices,
    search_venues, update_venue, venue_detail,
};

pub(crate) fn entity_ref_from_row(row: &SqliteRow) -> Result<EntityRef> {
    Ok(EntityRef {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

/// Keep the `{id, name}` rows whose name contains `term`, ignoring case
///
/// Folding happens here rather than in SQL because SQLite's `lower()` only
/// folds ASCII letters.
pub(crate) fn name_matches(rows: &[SqliteRow], term: &str) -> Result<SearchResults> {
    let needle = term.trim().to_lowercase();
    let mut data = Vec::new();
    for row in rows {
        let entity = entity_ref_from_row(row)?;
        if entity.name.to_lowercase().contains(&needle) {
            data.push(entity);
        }
    }
    Ok(SearchResults::from(data))
}
