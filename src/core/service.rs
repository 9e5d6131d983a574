use crate::core::normalize::normalize;
use crate::core::week::resolve_week;
use crate::domain::model::{Directories, TimetableResponse, WeekRange};
use crate::domain::ports::{Clock, Credentials, ProviderSession, SystemClock, TimetableProvider};
use crate::domain::raw::RawTimetable;
use crate::utils::error::{Result, TimetableError};
use chrono::NaiveDate;
use std::sync::Arc;

/// Fetches and normalizes one week of the configured class's timetable.
///
/// Every call opens its own provider session and logs it out again, whatever the outcome.
pub struct TimetableService {
    provider: Arc<dyn TimetableProvider>,
    credentials: Credentials,
    class_name: String,
    clock: Arc<dyn Clock>,
}

impl TimetableService {
    pub fn new(
        provider: Arc<dyn TimetableProvider>,
        credentials: Credentials,
        class_name: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            credentials,
            class_name: class_name.into(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub async fn fetch_week(&self, anchor: Option<NaiveDate>) -> Result<TimetableResponse> {
        let week = resolve_week(anchor, self.clock.as_ref());
        tracing::info!(
            "Fetching timetable for class {} ({} to {})",
            self.class_name,
            week.start,
            week.end
        );

        let session = self.provider.login(&self.credentials).await?;
        let outcome = self.fetch_with_session(session.as_ref(), &week).await;

        if let Err(e) = session.logout().await {
            tracing::warn!("Logout from provider failed: {}", e);
        }

        outcome
    }

    async fn fetch_with_session(
        &self,
        session: &dyn ProviderSession,
        week: &WeekRange,
    ) -> Result<TimetableResponse> {
        let class = session
            .classes()
            .await?
            .into_iter()
            .find(|class| class.name == self.class_name)
            .ok_or_else(|| {
                tracing::error!("Class {} not found, check MYCLASS", self.class_name);
                TimetableError::ClassNotFound {
                    name: self.class_name.clone(),
                }
            })?;

        let directories = Directories::from_listings(
            session.subjects().await?,
            session.teachers().await?,
            session.rooms().await?,
        );
        if directories.teachers.is_empty() {
            tracing::warn!("Teacher directory is empty, teachers will show as unknown");
        }
        tracing::debug!(
            "Loaded {} subjects, {} teachers, {} rooms",
            directories.subjects.len(),
            directories.teachers.len(),
            directories.rooms.len()
        );

        let periods = session.timetable(&class, week).await?;
        let raw = RawTimetable::from_periods(periods)?;
        tracing::debug!(
            "Grouped {} periods into {} slots",
            raw.period_count(),
            raw.rows.len()
        );

        let normalized = normalize(&raw, &directories)?;
        Ok(TimetableResponse::new(&self.class_name, *week, normalized))
    }
}
