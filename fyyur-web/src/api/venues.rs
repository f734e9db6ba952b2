//! Venue pages and mutations

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
use crate::forms::{SearchForm, VenueForm};
use crate::pages::forms::venue_form_page;
use crate::pages::search_results;
use crate::pages::venues::{venue_page, venues_page};
use crate::AppState;

/// GET /venues
pub async fn list_venues(State(state): State<AppState>, jar: CookieJar) -> PageResult<(CookieJar, Html<String>)> {
    let areas = db::list_venue_areas(&state.db, time::now()).await?;

    let (jar, flash) = take_flash(jar);
    Ok((jar, Html(venues_page(flash.as_deref(), &areas))))
}

/// POST /venues/search
pub async fn search_venues(State(state): State<AppState>, Form(form): Form<SearchForm>) -> PageResult<Html<String>> {
    let results = db::search_venues(&state.db, &form.search_term).await?;
    Ok(Html(search_results("Venue search", "/venues", &form.search_term, &results)))
}

/// GET /venues/:id
pub async fn show_venue(
    State(state): State<AppState>,
    jar: CookieJar,
    RecordId(venue_id): RecordId,
) -> PageResult<(CookieJar, Html<String>)> {
    let detail = db::venue_detail(&state.db, venue_id, time::now())
        .await?
        .ok_or_else(|| PageError::NotFound(format!("Venue {}", venue_id)))?;

    let (jar, flash) = take_flash(jar);
    Ok((jar, Html(venue_page(flash.as_deref(), &detail))))
}

/// GET /venues/create
pub async fn create_venue_form() -> Html<String> {
    Html(venue_form_page("List a new venue", "/venues/create", None, &VenueForm::default()))
}

/// POST /venues/create
pub async fn create_venue_submission(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(mut form): Form<VenueForm>,
) -> Response {
    form.normalize();
    if let Err(errors) = form.validate() {
        let message = invalid_form_message("Venue", &errors);
        warn!("Rejected venue submission: {}", errors);
        let page = venue_form_page("List a new venue", "/venues/create", Some(&message), &form);
        return (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response();
    }

    let name = form.name.clone();
    let jar = match db::create_venue(&state.db, &form.into_input()).await {
        Ok(_) => set_flash(jar, format!("Venue {} was successfully listed!", name)),
        Err(e) => {
            error!(error = %e, venue = %name, "Failed to list venue");
            set_flash(jar, format!("An error occurred. Venue {} could not be listed.", name))
        }
    };

    (jar, Redirect::to("/")).into_response()
}

/// GET /venues/:id/edit
pub async fn edit_venue_form(
    State(state): State<AppState>,
    RecordId(venue_id): RecordId,
) -> PageResult<Html<String>> {
    let venue = db::find_venue(&state.db, venue_id)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("Venue {}", venue_id)))?;

    let action = format!("/venues/{}/edit", venue_id);
    let title = format!("Edit venue {}", venue.name);
    Ok(Html(venue_form_page(&title, &action, None, &VenueForm::from(&venue))))
}

/// POST /venues/:id/edit
pub async fn edit_venue_submission(
    State(state): State<AppState>,
    jar: CookieJar,
    RecordId(venue_id): RecordId,
    Form(mut form): Form<VenueForm>,
) -> PageResult<Response> {
    form.normalize();
    if let Err(errors) = form.validate() {
        let message = invalid_form_message("Venue", &errors);
        warn!(venue_id, "Rejected venue edit: {}", errors);
        let action = format!("/venues/{}/edit", venue_id);
        let page = venue_form_page("Edit venue", &action, Some(&message), &form);
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response());
    }

    let name = form.name.clone();
    let jar = match db::update_venue(&state.db, venue_id, &form.into_input()).await {
        Ok(()) => set_flash(jar, format!("Venue {} was successfully updated!", name)),
        Err(Error::NotFound(msg)) => return Err(PageError::NotFound(msg)),
        Err(e) => {
            error!(error = %e, venue_id, "Failed to update venue");
            set_flash(jar, format!("An error occurred. Venue {} could not be updated.", name))
        }
    };

    Ok((jar, Redirect::to(&format!("/venues/{}", venue_id))).into_response())
}

/// DELETE /venues/:id and POST /venues/:id/delete
pub async fn delete_venue(
    State(state): State<AppState>,
    jar: CookieJar,
    RecordId(venue_id): RecordId,
) -> PageResult<(CookieJar, Redirect)> {
    let venue = db::find_venue(&state.db, venue_id)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("Venue {}", venue_id)))?;

    match db::delete_venue(&state.db, venue_id).await {
        Ok(()) => {
            let jar = set_flash(jar, format!("Venue {} was successfully deleted.", venue.name));
            Ok((jar, Redirect::to("/venues")))
        }
        Err(Error::NotFound(msg)) => Err(PageError::NotFound(msg)),
        Err(Error::Conflict(msg)) => {
            warn!(venue_id, "{}", msg);
            let jar = set_flash(
                jar,
                format!("Venue {} could not be deleted while it has shows listed.", venue.name),
            );
            Ok((jar, Redirect::to(&format!("/venues/{}", venue_id))))
        }
        Err(e) => {
            error!(error = %e, venue_id, "Failed to delete venue");
            let jar = set_flash(jar, format!("An error occurred. Venue {} could not be deleted.", venue.name));
            Ok((jar, Redirect::to(&format!("/venues/{}", venue_id))))
        }
    }
}
