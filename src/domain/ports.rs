use crate::domain::model::{Room, SchoolClass, Subject, Teacher, WeekRange};
use crate::domain::raw::RawPeriodEntry;
use crate::utils::error::ProviderError;
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use std::fmt;

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Entry point to the scheduling provider: trades credentials for a session.
#[async_trait]
pub trait TimetableProvider: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> ProviderResult<Box<dyn ProviderSession>>;
}

/// An authenticated provider session. Callers must finish with [`ProviderSession::logout`].
#[async_trait]
pub trait ProviderSession: Send + Sync {
    async fn classes(&self) -> ProviderResult<Vec<SchoolClass>>;
    async fn subjects(&self) -> ProviderResult<Vec<Subject>>;
    async fn teachers(&self) -> ProviderResult<Vec<Teacher>>;
    async fn rooms(&self) -> ProviderResult<Vec<Room>>;
    async fn timetable(
        &self,
        class: &SchoolClass,
        week: &WeekRange,
    ) -> ProviderResult<Vec<RawPeriodEntry>>;
    async fn logout(self: Box<Self>) -> ProviderResult<()>;
}

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
