pub mod normalize;
pub mod resolve;
pub mod service;
pub mod week;

pub use crate::domain::model::{TimetableResponse, WeekRange};
pub use crate::domain::ports::{Clock, ProviderSession, TimetableProvider};
pub use crate::utils::error::Result;
