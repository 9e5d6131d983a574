use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;

use super::dto::{HealthResponse, TimetableQuery};
use super::error::AppError;
use super::state::AppState;
use crate::domain::model::TimetableResponse;

pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /json?date=YYYY-MM-DD
///
/// Timetable of the configured class for the week containing `date`, or the current week.
pub async fn timetable_json(
    State(state): State<AppState>,
    Query(query): Query<TimetableQuery>,
) -> HandlerResult<TimetableResponse> {
    let anchor = parse_anchor(query.date.as_deref());
    let response = state.service.fetch_week(anchor).await?;
    Ok(Json(response))
}

/// An unparseable date is not an error: it is logged and the current week is served.
pub fn parse_anchor(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            tracing::warn!("Invalid date format '{}', using today", raw);
            None
        }
    }
}
