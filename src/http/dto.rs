//! Request and response bodies specific to the HTTP surface.

use serde::{Deserialize, Serialize};

/// Query string of `GET /json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimetableQuery {
    /// Any day of the wanted week, `YYYY-MM-DD`.
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
