//! Genre tag storage shared by venues and artists
//!
//! Tags are never diffed: every write deletes the owner's tag set and
//! inserts the new list inside the caller's transaction.

use sqlx::{Executor, QueryBuilder, Sqlite, Transaction};

use fyyur_common::Result;

/// Which join table a tag set lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreOwner {
    Venue,
    Artist,
}

impl GenreOwner {
    fn table(self) -> &'static str {
        match self {
            GenreOwner::Venue => "venue_genre_tags",
            GenreOwner::Artist => "artist_genre_tags",
        }
    }

    fn owner_column(self) -> &'static str {
        match self {
            GenreOwner::Venue => "venue_id",
            GenreOwner::Artist => "artist_id",
        }
    }
}

/// Trim, drop blanks and remove repeats, keeping first-seen order
pub fn dedup_genres(genres: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(genres.len());
    for genre in genres {
        let genre = genre.trim();
        if !genre.is_empty() && !unique.iter().any(|g| g == genre) {
            unique.push(genre.to_string());
        }
    }
    unique
}

/// Load an owner's genres in insertion order
pub async fn load_genres<'e, E>(executor: E, owner: GenreOwner, owner_id: i64) -> Result<Vec<String>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "SELECT genre FROM {} WHERE {} = ? ORDER BY rowid",
        owner.table(),
        owner.owner_column()
    );

    let genres = sqlx::query_scalar(&sql)
        .bind(owner_id)
        .fetch_all(executor)
        .await?;

    Ok(genres)
}

/// Replace an owner's tag set with `genres`
pub async fn replace_genres(
    tx: &mut Transaction<'_, Sqlite>,
    owner: GenreOwner,
    owner_id: i64,
    genres: &[String],
) -> Result<()> {
    let delete = format!("DELETE FROM {} WHERE {} = ?", owner.table(), owner.owner_column());
    sqlx::query(&delete)
        .bind(owner_id)
        .execute(&mut **tx)
        .await?;

    let genres = dedup_genres(genres);
    if genres.is_empty() {
        return Ok(());
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
        "INSERT INTO {} ({}, genre) ",
        owner.table(),
        owner.owner_column()
    ));
    builder.push_values(genres.iter(), |mut row, genre| {
        row.push_bind(owner_id).push_bind(genre.as_str());
    });
    builder.build().execute(&mut **tx).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fyyur_common::db::init_memory_database;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_dedup_keeps_first_seen_order() {
        let genres = strings(&["Jazz", " Blues ", "Jazz", "", "Folk", "Blues"]);
        assert_eq!(dedup_genres(&genres), strings(&["Jazz", "Blues", "Folk"]));
    }

    #[tokio::test]
    async fn test_replace_rewrites_whole_set() {
        let pool = init_memory_database().await.unwrap();
        sqlx::query(
            "INSERT INTO artist (id, name, city, state, phone) VALUES (7, 'Matt Quevedo', 'New York', 'NY', '300-400-5000')",
        )
        .execute(&pool)
        .await
        .unwrap();

        let mut tx = pool.begin().await.unwrap();
        replace_genres(&mut tx, GenreOwner::Artist, 7, &strings(&["Jazz", "Blues"]))
            .await
            .unwrap();
        replace_genres(&mut tx, GenreOwner::Artist, 7, &strings(&["Rock n Roll"]))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let genres = load_genres(&pool, GenreOwner::Artist, 7).await.unwrap();
        assert_eq!(genres, strings(&["Rock n Roll"]));
    }

    #[tokio::test]
    async fn test_repeated_genre_does_not_violate_key() {
        let pool = init_memory_database().await.unwrap();
        sqlx::query(
            "INSERT INTO venue (id, name, address, city, state, phone) VALUES (3, 'Hall', '1 Main', 'Austin', 'TX', '512-555-0100')",
        )
        .execute(&pool)
        .await
        .unwrap();

        let mut tx = pool.begin().await.unwrap();
        replace_genres(&mut tx, GenreOwner::Venue, 3, &strings(&["Jazz", "Jazz"]))
            .await
            .expect("duplicates are collapsed before insert");
        tx.commit().await.unwrap();

        let genres = load_genres(&pool, GenreOwner::Venue, 3).await.unwrap();
        assert_eq!(genres, strings(&["Jazz"]));
    }
}
