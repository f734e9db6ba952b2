//! Artist pages and mutations

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::{cookie::CookieJar, Form};
use tracing::{error, warn};
use validator::Validate;

use fyyur_common::time;
use fyyur_common::Error;

use super::{invalid_form_message, RecordId};
use crate::db;
use crate::error::{PageError, PageResult};
use crate::flash::{set_flash, take_flash};
use crate::forms::{ArtistForm, SearchForm};
use crate::pages::forms::artist_form_page;
use crate::pages::search_results;
use crate::pages::artists::{artist_page, artists_page};
use crate::AppState;

/// GET /artists
pub async fn list_artists(State(state): State<AppState>, jar: CookieJar) -> PageResult<(CookieJar, Html<String>)> {
    let artists = db::list_artists(&state.db).await?;

    let (jar, flash) = take_flash(jar);
    Ok((jar, Html(artists_page(flash.as_deref(), &artists))))
}

/// POST /artists/search
pub async fn search_artists(State(state): State<AppState>, Form(form): Form<SearchForm>) -> PageResult<Html<String>> {
    let results = db::search_artists(&state.db, &form.search_term).await?;
    Ok(Html(search_results("Artist search", "/artists", &form.search_term, &results)))
}

/// GET /artists/:id
pub async fn show_artist(
    State(state): State<AppState>,
    jar: CookieJar,
    RecordId(artist_id): RecordId,
) -> PageResult<(CookieJar, Html<String>)> {
    let detail = db::artist_detail(&state.db, artist_id, time::now())
        .await?
        .ok_or_else(|| PageError::NotFound(format!("Artist {}", artist_id)))?;

    let (jar, flash) = take_flash(jar);
    Ok((jar, Html(artist_page(flash.as_deref(), &detail))))
}

/// GET /artists/create
pub async fn create_artist_form() -> Html<String> {
    Html(artist_form_page("List a new artist", "/artists/create", None, &ArtistForm::default()))
}

/// POST /artists/create
pub async fn create_artist_submission(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(mut form): Form<ArtistForm>,
) -> Response {
    form.normalize();
    if let Err(errors) = form.validate() {
        let message = invalid_form_message("Artist", &errors);
        warn!("Rejected artist submission: {}", errors);
        let page = artist_form_page("List a new artist", "/artists/create", Some(&message), &form);
        return (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response();
    }

    let name = form.name.clone();
    let jar = match db::create_artist(&state.db, &form.into_input()).await {
        Ok(_) => set_flash(jar, format!("Artist {} was successfully listed!", name)),
        Err(e) => {
            error!(error = %e, artist = %name, "Failed to list artist");
            set_flash(jar, format!("An error occurred. Artist {} could not be listed.", name))
        }
    };

    (jar, Redirect::to("/")).into_response()
}

/// GET /artists/:id/edit
pub async fn edit_artist_form(
    State(state): State<AppState>,
    RecordId(artist_id): RecordId,
) -> PageResult<Html<String>> {
    let artist = db::find_artist(&state.db, artist_id)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("Artist {}", artist_id)))?;

    let action = format!("/artists/{}/edit", artist_id);
    let title = format!("Edit artist {}", artist.name);
    Ok(Html(artist_form_page(&title, &action, None, &ArtistForm::from(&artist))))
}

/// POST /artists/:id/edit
pub async fn edit_artist_submission(
    State(state): State<AppState>,
    jar: CookieJar,
    RecordId(artist_id): RecordId,
    Form(mut form): Form<ArtistForm>,
) -> PageResult<Response> {
    form.normalize();
    if let Err(errors) = form.validate() {
        let message = invalid_form_message("Artist", &errors);
        warn!(artist_id, "Rejected artist edit: {}", errors);
        let action = format!("/artists/{}/edit", artist_id);
        let page = artist_form_page("Edit artist", &action, Some(&message), &form);
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response());
    }

    let name = form.name.clone();
    let jar = match db::update_artist(&state.db, artist_id, &form.into_input()).await {
        Ok(()) => set_flash(jar, format!("Artist {} was successfully updated!", name)),
        Err(Error::NotFound(msg)) => return Err(PageError::NotFound(msg)),
        Err(e) => {
            error!(error = %e, artist_id, "Failed to update artist");
            set_flash(jar, format!("An error occurred. Artist {} could not be updated.", name))
        }
    };

    Ok((jar, Redirect::to(&format!("/artists/{}", artist_id))).into_response())
}

/// DELETE /artists/:id and POST /artists/:id/delete
pub async fn delete_artist(
    State(state): State<AppState>,
    jar: CookieJar,
    RecordId(artist_id): RecordId,
) -> PageResult<(CookieJar, Redirect)> {
    let artist = db::find_artist(&state.db, artist_id)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("Artist {}", artist_id)))?;

    match db::delete_artist(&state.db, artist_id).await {
        Ok(()) => {
            let jar = set_flash(jar, format!("Artist {} was successfully deleted.", artist.name));
            Ok((jar, Redirect::to("/artists")))
        }
        Err(Error::NotFound(msg)) => Err(PageError::NotFound(msg)),
        Err(Error::Conflict(msg)) => {
            warn!(artist_id, "{}", msg);
            let jar = set_flash(
                jar,
                format!("Artist {} could not be deleted while it has shows listed.", artist.name),
            );
            Ok((jar, Redirect::to(&format!("/artists/{}", artist_id))))
        }
        Err(e) => {
            error!(error = %e, artist_id, "Failed to delete artist");
            let jar = set_flash(jar, format!("An error occurred. Artist {} could not be deleted.", artist.name));
            Ok((jar, Redirect::to(&format!("/artists/{}", artist_id))))
        }
    }
}
