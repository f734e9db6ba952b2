//! Error type for page handlers
//!
//! Not-found conditions render the 404 page; everything else is logged and
//! renders the 500 page. Mutation failures never reach this type: handlers
//! turn them into flash messages.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::pages::errors::{not_found_page, server_error_page};

#[derive(Debug, Error)]
pub enum PageError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Store or other internal failure (500)
    #[error(transparent)]
    Common(#[from] fyyur_common::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound(_) | PageError::Common(fyyur_common::Error::NotFound(_)) => {
                (StatusCode::NOT_FOUND, Html(not_found_page())).into_response()
            }
            PageError::Common(err) => {
                error!("Request failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, Html(server_error_page())).into_response()
            }
        }
    }
}

/// Result type for page handlers
pub type PageResult<T> = Result<T, PageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let response = PageError::NotFound("venue 9".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = PageError::from(fyyur_common::Error::NotFound("artist 2".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = PageError::from(fyyur_common::Error::Config("boom".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
