//! Artist queries and mutations

use chrono::NaiveDateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;

use fyyur_common::db::{Artist, ArtistDetail, ArtistInput, EntityRef, SearchResults, VenueShow};
use fyyur_common::{Error, Result};

use super::{entity_ref_from_row, name_matches};
use super::genres::{load_genres, replace_genres, GenreOwner};

const ARTIST_COLUMNS: &str = "id, name, city, state, phone, image_link, facebook_link, website, \
     seeking_venue, seeking_description";

fn artist_from_row(row: &SqliteRow) -> Result<Artist> {
    Ok(Artist {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        phone: row.try_get("phone")?,
        image_link: row.try_get("image_link")?,
        facebook_link: row.try_get("facebook_link")?,
        website: row.try_get("website")?,
        seeking_venue: row.try_get("seeking_venue")?,
        seeking_description: row.try_get("seeking_description")?,
        genres: Vec::new(),
    })
}

fn venue_show_from_row(row: &SqliteRow) -> Result<VenueShow> {
    Ok(VenueShow {
        venue_id: row.try_get("venue_id")?,
        venue_name: row.try_get("venue_name")?,
        venue_image_link: row.try_get("venue_image_link")?,
        start_time: row.try_get("start_time")?,
    })
}

/// All artists as `{id, name}` pairs
pub async fn list_artists(pool: &SqlitePool) -> Result<Vec<EntityRef>> {
    let rows = sqlx::query("SELECT id, name FROM artist ORDER BY id")
        .fetch_all(pool)
        .await?;

    rows.iter().map(entity_ref_from_row).collect()
}

/// Most recently listed artists, newest first
pub async fn list_recent_artists(pool: &SqlitePool, limit: i64) -> Result<Vec<EntityRef>> {
    let rows = sqlx::query("SELECT id, name FROM artist ORDER BY id DESC LIMIT ?")
        .bind(limit)
        .fetch_all(pool)
        .await?;

    rows.iter().map(entity_ref_from_row).collect()
}

/// Case-insensitive substring search on artist names
pub async fn search_artists(pool: &SqlitePool, term: &str) -> Result<SearchResults> {
    let rows = sqlx::query("SELECT id, name FROM artist ORDER BY id")
        .fetch_all(pool)
        .await?;

    name_matches(&rows, term)
}

/// Load an artist with its genres
pub async fn find_artist(pool: &SqlitePool, id: i64) -> Result<Option<Artist>> {
    let sql = format!("SELECT {} FROM artist WHERE id = ?", ARTIST_COLUMNS);
    let Some(row) = sqlx::query(&sql).bind(id).fetch_optional(pool).await? else {
        return Ok(None);
    };

    let mut artist = artist_from_row(&row)?;
    artist.genres = load_genres(pool, GenreOwner::Artist, id).await?;
    Ok(Some(artist))
}

/// Artist page data: the artist plus its shows split around `now`
pub async fn artist_detail(pool: &SqlitePool, id: i64, now: NaiveDateTime) -> Result<Option<ArtistDetail>> {
    let Some(artist) = find_artist(pool, id).await? else {
        return Ok(None);
    };

    let rows = sqlx::query(
        r#"
        SELECT v.id AS venue_id, v.name AS venue_name, v.image_link AS venue_image_link, s.start_time
        FROM show s
        JOIN venue v ON v.id = s.venue_id
        WHERE s.artist_id = ?
        ORDER BY s.start_time, s.id
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let shows = rows.iter().map(venue_show_from_row).collect::<Result<Vec<_>>>()?;
    let (past_shows, upcoming_shows): (Vec<_>, Vec<_>) =
        shows.into_iter().partition(|show| show.start_time < now);

    Ok(Some(ArtistDetail {
        artist,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}

/// Insert an artist and its genre tags in one transaction
pub async fn create_artist(pool: &SqlitePool, input: &ArtistInput) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO artist (name, city, state, phone, image_link, facebook_link, website,
                            seeking_venue, seeking_description)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.name)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.phone)
    .bind(&input.image_link)
    .bind(&input.facebook_link)
    .bind(&input.website)
    .bind(input.seeking_venue)
    .bind(&input.seeking_description)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    replace_genres(&mut tx, GenreOwner::Artist, id, &input.genres).await?;
    tx.commit().await?;

    info!(artist_id = id, name = %input.name, "Artist created");
    Ok(id)
}

/// Overwrite an artist's fields and genre tags in one transaction
pub async fn update_artist(pool: &SqlitePool, id: i64, input: &ArtistInput) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE artist
        SET name = ?, city = ?, state = ?, phone = ?, image_link = ?, facebook_link = ?,
            website = ?, seeking_venue = ?, seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.name)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.phone)
    .bind(&input.image_link)
    .bind(&input.facebook_link)
    .bind(&input.website)
    .bind(input.seeking_venue)
    .bind(&input.seeking_description)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Artist {} not found", id)));
    }

    replace_genres(&mut tx, GenreOwner::Artist, id, &input.genres).await?;
    tx.commit().await?;

    info!(artist_id = id, name = %input.name, "Artist updated");
    Ok(())
}

/// Delete an artist; its genre tags go with it
///
/// Refused with [`Error::Conflict`] while any show still references it.
pub async fn delete_artist(pool: &SqlitePool, id: i64) -> Result<()> {
    let mut tx = pool.begin().await?;

    let shows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM show WHERE artist_id = ?")
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
    if shows > 0 {
        return Err(Error::Conflict(format!(
            "Artist {} still has {} scheduled show(s)",
            id, shows
        )));
    }

    let result = sqlx::query("DELETE FROM artist WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Artist {} not found", id)));
    }

    tx.commit().await?;

    info!(artist_id = id, "Artist deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fyyur_common::db::init_memory_database;

    fn artist_input(name: &str, genres: &[&str]) -> ArtistInput {
        ArtistInput {
            name: name.to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: "326-123-5000".to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            ..Default::default()
        }
    }

    async fn tag_rows(pool: &SqlitePool, artist_id: i64) -> Vec<String> {
        sqlx::query_scalar("SELECT genre FROM artist_genre_tags WHERE artist_id = ? ORDER BY rowid")
            .bind(artist_id)
            .fetch_all(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_and_search() {
        let pool = init_memory_database().await.unwrap();
        let guns = create_artist(&pool, &artist_input("Guns N Petals", &["Rock n Roll"])).await.unwrap();
        let matt = create_artist(&pool, &artist_input("Matt Quevedo", &["Jazz"])).await.unwrap();
        let sax = create_artist(&pool, &artist_input("The Wild Sax Band", &["Jazz", "Classical"]))
            .await
            .unwrap();

        let all = list_artists(&pool).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "Guns N Petals");

        let results = search_artists(&pool, "A").await.unwrap();
        let ids: Vec<i64> = results.data.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![guns, matt, sax]);

        let results = search_artists(&pool, "band").await.unwrap();
        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].name, "The Wild Sax Band");
    }

    #[tokio::test]
    async fn test_update_genres_leaves_single_row() {
        let pool = init_memory_database().await.unwrap();
        let id = create_artist(&pool, &artist_input("Matt Quevedo", &["Jazz"])).await.unwrap();

        update_artist(&pool, id, &artist_input("Matt Quevedo", &["Rock"])).await.unwrap();

        assert_eq!(tag_rows(&pool, id).await, vec!["Rock"]);
    }

    #[tokio::test]
    async fn test_update_missing_artist_is_not_found() {
        let pool = init_memory_database().await.unwrap();
        let err = update_artist(&pool, 3, &artist_input("Nobody", &[])).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_all_tag_rows() {
        let pool = init_memory_database().await.unwrap();
        let id = create_artist(&pool, &artist_input("The Wild Sax Band", &["Jazz", "Classical"]))
            .await
            .unwrap();
        let kept = create_artist(&pool, &artist_input("Guns N Petals", &["Rock n Roll"])).await.unwrap();

        delete_artist(&pool, id).await.unwrap();

        assert!(find_artist(&pool, id).await.unwrap().is_none());
        assert!(tag_rows(&pool, id).await.is_empty());
        assert_eq!(tag_rows(&pool, kept).await, vec!["Rock n Roll"]);
    }

    #[tokio::test]
    async fn test_delete_with_shows_is_refused() {
        let pool = init_memory_database().await.unwrap();
        let artist = create_artist(&pool, &artist_input("Guns N Petals", &[])).await.unwrap();
        let venue = sqlx::query(
            "INSERT INTO venue (name, address, city, state, phone) VALUES ('The Musical Hop', '1015 Folsom Street', 'San Francisco', 'CA', '123-123-1234')",
        )
        .execute(&pool)
        .await
        .unwrap()
        .last_insert_rowid();
        sqlx::query("INSERT INTO show (artist_id, venue_id, start_time) VALUES (?, ?, '2019-05-21 21:30:00')")
            .bind(artist)
            .bind(venue)
            .execute(&pool)
            .await
            .unwrap();

        let err = delete_artist(&pool, artist).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
        assert!(find_artist(&pool, artist).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_detail_splits_shows() {
        let pool = init_memory_database().await.unwrap();
        let now = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let artist = create_artist(&pool, &artist_input("The Wild Sax Band", &["Jazz"])).await.unwrap();
        let venue = sqlx::query(
            "INSERT INTO venue (name, address, city, state, phone, image_link) VALUES ('Park Square Live Music & Coffee', '34 Whiskey Moore Ave', 'San Francisco', 'CA', '415-000-1234', 'https://example.com/park.jpg')",
        )
        .execute(&pool)
        .await
        .unwrap()
        .last_insert_rowid();
        for start in ["2019-06-15 23:00:00", "2035-04-01 20:00:00", "2035-04-08 20:00:00"] {
            sqlx::query("INSERT INTO show (artist_id, venue_id, start_time) VALUES (?, ?, ?)")
                .bind(artist)
                .bind(venue)
                .bind(start)
                .execute(&pool)
                .await
                .unwrap();
        }

        let detail = artist_detail(&pool, artist, now).await.unwrap().unwrap();
        assert_eq!(detail.past_shows_count, 1);
        assert_eq!(detail.upcoming_shows_count, 2);
        assert_eq!(detail.upcoming_shows[0].venue_name, "Park Square Live Music & Coffee");
        assert_eq!(
            detail.upcoming_shows[0].venue_image_link.as_deref(),
            Some("https://example.com/park.jpg")
        );
    }
}
