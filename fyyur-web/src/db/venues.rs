//! Venue queries and mutations

use chrono::NaiveDateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use fyyur_common::db::{Area, ArtistShow, EntityRef, SearchResults, Venue, VenueDetail, VenueInput, VenueSummary};
use fyyur_common::{Error, Result};

use super::{entity_ref_from_row, name_matches};
use super::genres::{load_genres, replace_genres, GenreOwner};

const VENUE_COLUMNS: &str = "id, name, address, city, state, phone, website, facebook_link, \
     seeking_talent, seeking_description, image_link";

fn venue_from_row(row: &SqliteRow) -> Result<Venue> {
    Ok(Venue {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        address: row.try_get("address")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        phone: row.try_get("phone")?,
        website: row.try_get("website")?,
        facebook_link: row.try_get("facebook_link")?,
        seeking_talent: row.try_get("seeking_talent")?,
        seeking_description: row.try_get("seeking_description")?,
        image_link: row.try_get("image_link")?,
        genres: Vec::new(),
    })
}

fn artist_show_from_row(row: &SqliteRow) -> Result<ArtistShow> {
    Ok(ArtistShow {
        artist_id: row.try_get("artist_id")?,
        artist_name: row.try_get("artist_name")?,
        artist_image_link: row.try_get("artist_image_link")?,
        start_time: row.try_get("start_time")?,
    })
}

/// Venues grouped by (city, state) with their upcoming show counts
///
/// Only shows starting strictly after `now` are counted. Venues without
/// any such show report zero.
pub async fn list_venue_areas(pool: &SqlitePool, now: NaiveDateTime) -> Result<Vec<Area>> {
    let rows = sqlx::query(
        r#"
        SELECT v.id, v.name, v.city, v.state, COALESCE(upcoming.num_shows, 0) AS num_upcoming_shows
        FROM venue v
        LEFT OUTER JOIN (
            SELECT venue_id, COUNT(*) AS num_shows
            FROM show
            WHERE start_time > ?
            GROUP BY venue_id
        ) upcoming ON upcoming.venue_id = v.id
        ORDER BY v.state, v.city, v.id
        "#,
    )
    .bind(now)
    .fetch_all(pool)
    .await?;

    let mut areas: Vec<Area> = Vec::new();
    for row in rows {
        let city: String = row.try_get("city")?;
        let state: String = row.try_get("state")?;
        let venue = VenueSummary {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            num_upcoming_shows: row.try_get("num_upcoming_shows")?,
        };

        match areas.last_mut() {
            Some(area) if area.city == city && area.state == state => area.venues.push(venue),
            _ => areas.push(Area {
                city,
                state,
                venues: vec![venue],
            }),
        }
    }

    debug!("Listed {} venue areas", areas.len());
    Ok(areas)
}

/// Case-insensitive substring search on venue names
pub async fn search_venues(pool: &SqlitePool, term: &str) -> Result<SearchResults> {
    let rows = sqlx::query("SELECT id, name FROM venue ORDER BY id")
        .fetch_all(pool)
        .await?;

    name_matches(&rows, term)
}

/// Most recently listed venues, newest first
pub async fn list_recent_venues(pool: &SqlitePool, limit: i64) -> Result<Vec<EntityRef>> {
    let rows = sqlx::query("SELECT id, name FROM venue ORDER BY id DESC LIMIT ?")
        .bind(limit)
        .fetch_all(pool)
        .await?;

    rows.iter().map(entity_ref_from_row).collect()
}

/// Every venue as an `{id, name}` pair, by name
pub async fn list_venue_choices(pool: &SqlitePool) -> Result<Vec<EntityRef>> {
    let rows = sqlx::query("SELECT id, name FROM venue ORDER BY name, id")
        .fetch_all(pool)
        .await?;

    rows.iter().map(entity_ref_from_row).collect()
}

/// Load a venue with its genres
pub async fn find_venue(pool: &SqlitePool, id: i64) -> Result<Option<Venue>> {
    let sql = format!("SELECT {} FROM venue WHERE id = ?", VENUE_COLUMNS);
    let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let mut venue = venue_from_row(&row)?;
    venue.genres = load_genres(pool, GenreOwner::Venue, id).await?;
    Ok(Some(venue))
}

/// Venue page data: the venue plus its shows split around `now`
pub async fn venue_detail(pool: &SqlitePool, id: i64, now: NaiveDateTime) -> Result<Option<VenueDetail>> {
    let Some(venue) = find_venue(pool, id).await? else {
        return Ok(None);
    };

    let rows = sqlx::query(
        r#"
        SELECT a.id AS artist_id, a.name AS artist_name, a.image_link AS artist_image_link, s.start_time
        FROM show s
        JOIN artist a ON a.id = s.artist_id
        WHERE s.venue_id = ?
        ORDER BY s.start_time, s.id
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let shows = rows.iter().map(artist_show_from_row).collect::<Result<Vec<_>>>()?;

    let (past_shows, upcoming_shows): (Vec<_>, Vec<_>) =
        shows.into_iter().partition(|show| show.start_time < now);

    Ok(Some(VenueDetail {
        venue,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}

/// Insert a venue and its genre tags in one transaction
pub async fn create_venue(pool: &SqlitePool, input: &VenueInput) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO venue (name, address, city, state, phone, website, facebook_link,
                           seeking_talent, seeking_description, image_link)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.name)
    .bind(&input.address)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.phone)
    .bind(&input.website)
    .bind(&input.facebook_link)
    .bind(input.seeking_talent)
    .bind(&input.seeking_description)
    .bind(&input.image_link)
    .execute(&mut *tx)
    .await?;

    let id = result.last_insert_rowid();
    replace_genres(&mut tx, GenreOwner::Venue, id, &input.genres).await?;

    tx.commit().await?;

    info!(venue_id = id, name = %input.name, "Venue created");
    Ok(id)
}

/// Overwrite a venue's fields and genre tags in one transaction
pub async fn update_venue(pool: &SqlitePool, id: i64, input: &VenueInput) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE venue
        SET name = ?, address = ?, city = ?, state = ?, phone = ?, website = ?,
            facebook_link = ?, seeking_talent = ?, seeking_description = ?, image_link = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.name)
    .bind(&input.address)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.phone)
    .bind(&input.website)
    .bind(&input.facebook_link)
    .bind(input.seeking_talent)
    .bind(&input.seeking_description)
    .bind(&input.image_link)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Venue {} not found", id)));
    }

    replace_genres(&mut tx, GenreOwner::Venue, id, &input.genres).await?;
    tx.commit().await?;

    info!(venue_id = id, name = %input.name, "Venue updated");
    Ok(())
}

/// Delete a venue and its genre tags
///
/// Refused with [`Error::Conflict`] while any show still references it.
pub async fn delete_venue(pool: &SqlitePool, id: i64) -> Result<()> {
    let mut tx = pool.begin().await?;

    let shows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM show WHERE venue_id = ?")
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
    if shows > 0 {
        return Err(Error::Conflict(format!(
            "Venue {} still has {} scheduled show(s)",
            id, shows
        )));
    }

    let result = sqlx::query("DELETE FROM venue WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            let err = Error::from(e);
            if err.is_foreign_key_violation() {
                Error::Conflict(format!("Venue {} is still referenced by shows", id))
            } else {
                err
            }
        })?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Venue {} not found", id)));
    }

    tx.commit().await?;

    info!(venue_id = id, "Venue deleted");
    Ok(())
}
