pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod http;
pub mod utils;

pub use crate::config::{CliConfig, UntisConfig};
pub use crate::core::service::TimetableService;
pub use crate::domain::model::TimetableResponse;
pub use crate::http::{create_router, AppState};
pub use crate::utils::error::{Result, TimetableError};
