//! HTTP handlers

use axum::async_trait;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use tracing::debug;
use validator::ValidationErrors;

use crate::error::PageError;
use crate::forms::invalid_fields;
use crate::pages::errors::not_found_page;

pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

pub use health::health_routes;

/// Numeric record id taken from the path
///
/// An id that does not parse as an integer names no record, so it renders
/// the 404 page instead of a plain-text rejection.
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(RecordId(id)),
            Err(rejection) => {
                debug!("Unparseable record id in {}: {}", parts.uri.path(), rejection);
                Err(PageError::NotFound(parts.uri.path().to_string()))
            }
        }
    }
}

/// Flash shown when a form fails validation
pub(crate) fn invalid_form_message(entity: &str, errors: &ValidationErrors) -> String {
    format!(
        "An error occurred. {} {} fields are invalid",
        entity,
        invalid_fields(errors).join(", ")
    )
}

/// Fallback for unknown routes
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(not_found_page()))
}
