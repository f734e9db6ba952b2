//! Show listing and scheduling

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

use super::invalid_form_message;
use crate::db;
use crate::error::PageResult;
use crate::flash::{set_flash, take_flash};
use crate::forms::ShowForm;
use crate::pages::forms::show_form_page;
use crate::pages::shows::shows_page;
use crate::AppState;

/// GET /shows
pub async fn list_shows(State(state): State<AppState>, jar: CookieJar) -> PageResult<(CookieJar, Html<String>)> {
    let shows = db::list_shows(&state.db).await?;

    let (jar, flash) = take_flash(jar);
    Ok((jar, Html(shows_page(flash.as_deref(), &shows))))
}

async fn render_show_form(state: &AppState, flash: Option<&str>, form: &ShowForm) -> PageResult<String> {
    let artists = db::list_artists(&state.db).await?;
    let venues = db::list_venue_choices(&state.db).await?;
    Ok(show_form_page(flash, form, &artists, &venues))
}

/// GET /shows/create
pub async fn create_show_form(State(state): State<AppState>) -> PageResult<Html<String>> {
    let form = ShowForm::starting_at(time::now());
    Ok(Html(render_show_form(&state, None, &form).await?))
}

/// POST /shows/create
pub async fn create_show_submission(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(mut form): Form<ShowForm>,
) -> PageResult<Response> {
    form.normalize();
    let input = match form.validate() {
        Ok(()) => form.to_input(),
        Err(errors) => {
            let message = invalid_form_message("Show", &errors);
            warn!("Rejected show submission: {}", errors);
            let page = render_show_form(&state, Some(&message), &form).await?;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response());
        }
    };
    let Some(input) = input else {
        let page = render_show_form(&state, Some("An error occurred. Show fields are invalid"), &form).await?;
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response());
    };

    let jar = match db::create_show(&state.db, &input).await {
        Ok(_) => set_flash(jar, "Show was successfully listed!"),
        Err(Error::InvalidInput(msg)) => {
            warn!("Rejected show: {}", msg);
            set_flash(jar, "An error occurred. Show could not be listed: unknown artist or venue.")
        }
        Err(e) => {
            error!(error = %e, "Failed to list show");
            set_flash(jar, "An error occurred. Show could not be listed.")
        }
    };

    Ok((jar, Redirect::to("/shows")).into_response())
}
