//! Demo listings for a fresh database

use chrono::{NaiveDate, NaiveDateTime};
use sqlx::SqlitePool;
use tracing::info;

use fyyur_common::db::{ArtistInput, ShowInput, VenueInput};
use fyyur_common::{Error, Result};

use super::{create_artist, create_show, create_venue};

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn link(url: &str) -> Option<String> {
    Some(url.to_string())
}

fn start(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .ok_or_else(|| Error::InvalidInput(format!("Bad demo date {}-{}-{}", year, month, day)))
}

/// Insert demo venues, artists and shows
///
/// Does nothing unless both the venue and artist tables are empty. Returns
/// whether data was inserted.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<bool> {
    let existing: i64 = sqlx::query_scalar("SELECT (SELECT COUNT(*) FROM venue) + (SELECT COUNT(*) FROM artist)")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        info!("Database already has listings, skipping demo data");
        return Ok(false);
    }

    let musical_hop = create_venue(
        pool,
        &VenueInput {
            name: "The Musical Hop".to_string(),
            address: "1015 Folsom Street".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: "123-123-1234".to_string(),
            website: link("https://www.themusicalhop.com"),
            facebook_link: link("https://www.facebook.com/TheMusicalHop"),
            seeking_talent: true,
            seeking_description: link("We are on the lookout for a local artist to play every two weeks. Please call us."),
            image_link: link("https://images.unsplash.com/photo-1543900694-133f37abaaa5?w=400"),
            genres: owned(&["Jazz", "Reggae", "Classical", "Folk"]),
        },
    )
    .await?;

    create_venue(
        pool,
        &VenueInput {
            name: "The Dueling Pianos Bar".to_string(),
            address: "335 Delancey Street".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            phone: "914-003-1132".to_string(),
            website: link("https://www.theduelingpianos.com"),
            facebook_link: link("https://www.facebook.com/theduelingpianos"),
            seeking_talent: false,
            seeking_description: None,
            image_link: link("https://images.unsplash.com/photo-1497032205916-ac775f0649ae?w=750"),
            genres: owned(&["Classical", "R&B", "Hip-Hop"]),
        },
    )
    .await?;

    let park_square = create_venue(
        pool,
        &VenueInput {
            name: "Park Square Live Music & Coffee".to_string(),
            address: "34 Whiskey Moore Ave".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: "415-000-1234".to_string(),
            website: link("https://www.parksquarelivemusicandcoffee.com"),
            facebook_link: link("https://www.facebook.com/ParkSquareLiveMusicAndCoffee"),
            seeking_talent: false,
            seeking_description: None,
            image_link: link("https://images.unsplash.com/photo-1485686531765-ba63b07845a7?w=747"),
            genres: owned(&["Rock n Roll", "Jazz", "Classical", "Folk"]),
        },
    )
    .await?;

    let guns_n_petals = create_artist(
        pool,
        &ArtistInput {
            name: "Guns N Petals".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: "326-123-5000".to_string(),
            image_link: link("https://images.unsplash.com/photo-1549213783-8284d0336c4f?w=300"),
            facebook_link: link("https://www.facebook.com/GunsNPetals"),
            website: link("https://www.gunsnpetalsband.com"),
            seeking_venue: true,
            seeking_description: link("Looking for shows to perform at in the San Francisco Bay Area!"),
            genres: owned(&["Rock n Roll"]),
        },
    )
    .await?;

    let matt_quevedo = create_artist(
        pool,
        &ArtistInput {
            name: "Matt Quevedo".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            phone: "300-400-5000".to_string(),
            image_link: link("https://images.unsplash.com/photo-1495223153807-b916f75de8c5?w=334"),
            facebook_link: link("https://www.facebook.com/mattquevedo923251523"),
            website: None,
            seeking_venue: false,
            seeking_description: None,
            genres: owned(&["Jazz"]),
        },
    )
    .await?;

    let wild_sax_band = create_artist(
        pool,
        &ArtistInput {
            name: "The Wild Sax Band".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: "432-325-5432".to_string(),
            image_link: link("https://images.unsplash.com/photo-1558369981-f9ca78462e61?w=794"),
            facebook_link: None,
            website: None,
            seeking_venue: false,
            seeking_description: None,
            genres: owned(&["Jazz", "Classical"]),
        },
    )
    .await?;

    let shows = [
        (guns_n_petals, musical_hop, start(2019, 5, 21, 21, 30)?),
        (matt_quevedo, park_square, start(2019, 6, 15, 23, 0)?),
        (wild_sax_band, park_square, start(2035, 4, 1, 20, 0)?),
        (wild_sax_band, park_square, start(2035, 4, 8, 20, 0)?),
        (wild_sax_band, park_square, start(2035, 4, 15, 20, 0)?),
    ];
    for (artist_id, venue_id, start_time) in shows {
        create_show(pool, &ShowInput { artist_id, venue_id, start_time }).await?;
    }

    info!("✓ Demo data loaded (3 venues, 3 artists, {} shows)", shows.len());
    Ok(true)
}
