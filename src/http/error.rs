//! Maps service errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::ErrorBody;
use crate::utils::error::{ErrorCategory, TimetableError};

pub const INTERNAL_ERROR_MESSAGE: &str = "Interner Serverfehler beim Abrufen der Daten";

/// Error type for HTTP handlers.
#[derive(Debug)]
pub struct AppError(pub TimetableError);

impl From<TimetableError> for AppError {
    fn from(err: TimetableError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, message) = match (err.category(), &err) {
            (ErrorCategory::NotFound, TimetableError::ClassNotFound { name }) => (
                StatusCode::NOT_FOUND,
                format!("Klasse '{}' nicht gefunden", name),
            ),
            (ErrorCategory::Upstream, TimetableError::Provider(provider)) => {
                tracing::error!("WebUntis error: {}", provider);
                (
                    StatusCode::BAD_GATEWAY,
                    format!("Fehler bei der Untis-Verbindung: {}", provider),
                )
            }
            _ => {
                // Detail stays in the log.
                tracing::error!("Unexpected error while fetching timetable: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
