use axum::{extract::State, response::Html};
use axum_extra::extract::cookie::CookieJar;

use crate::db;
use crate::error::PageResult;
use crate::flash::take_flash;
use crate::pages::home::home_page;
use crate::AppState;

/// How many recent venues and artists the home page shows
const RECENT_LIMIT: i64 = 10;

/// GET /
pub async fn index(State(state): State<AppState>, jar: CookieJar) -> PageResult<(CookieJar, Html<String>)> {
    let recent_venues = db::list_recent_venues(&state.db, RECENT_LIMIT).await?;
    let recent_artists = db::list_recent_artists(&state.db, RECENT_LIMIT).await?;

    let (jar, flash) = take_flash(jar);
    Ok((jar, Html(home_page(flash.as_deref(), &recent_venues, &recent_artists))))
}
