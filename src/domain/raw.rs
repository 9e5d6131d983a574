//! Provider-native timetable records, parsed at the boundary.
//!
//! WebUntis mixes representations freely: times arrive as packed `HHMM` integers or as
//! clock strings, and element references may be bare ids or objects carrying `id` and/or
//! `orgid`. Everything here captures those shapes as enums so the rest of the crate only
//! ever deals with one canonical form.

use crate::domain::model::EntityId;
use crate::utils::error::NormalizeError;
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawTime {
    /// `715` means 07:15.
    Packed(i64),
    Text(String),
}

impl RawTime {
    pub fn to_time(&self) -> Result<NaiveTime, NormalizeError> {
        match self {
            RawTime::Packed(value) => unpack_time(*value),
            RawTime::Text(text) => NaiveTime::parse_from_str(text, "%H:%M")
                .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
                .map_err(|_| NormalizeError::InvalidTime(text.clone())),
        }
    }
}

pub fn unpack_time(value: i64) -> Result<NaiveTime, NormalizeError> {
    if value < 0 {
        return Err(NormalizeError::InvalidPackedTime(value));
    }
    let hours = u32::try_from(value / 100).map_err(|_| NormalizeError::InvalidPackedTime(value))?;
    let minutes = (value % 100) as u32;
    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or(NormalizeError::InvalidPackedTime(value))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    /// `20261012` means 2026-10-12.
    Packed(i64),
    Iso(NaiveDate),
}

impl RawDate {
    pub fn to_date(&self) -> Result<NaiveDate, NormalizeError> {
        match self {
            RawDate::Packed(value) => {
                let invalid = || NormalizeError::InvalidPackedDate(*value);
                let year = i32::try_from(value / 10_000).map_err(|_| invalid())?;
                let month = u32::try_from(value / 100 % 100).map_err(|_| invalid())?;
                let day = u32::try_from(value % 100).map_err(|_| invalid())?;
                NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
            }
            RawDate::Iso(date) => Ok(*date),
        }
    }
}

/// One element reference inside a period's `su`/`te`/`ro`/`kl` list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RefEntry {
    Id(EntityId),
    Text(String),
    Object {
        #[serde(default)]
        id: Option<EntityId>,
        #[serde(default)]
        orgid: Option<EntityId>,
    },
    Malformed(serde_json::Value),
}

/// Which object key wins when an entry carries both `id` and `orgid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPreference {
    IdFirst,
    OrgIdFirst,
}

/// Canonical form of a reference after shape extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference<'a> {
    Id(EntityId),
    Display(&'a str),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported reference shape: {0}")]
pub struct MalformedRef(pub String);

impl RefEntry {
    pub fn is_object(&self) -> bool {
        matches!(self, RefEntry::Object { .. })
    }

    /// `Ok(None)` for an object carrying neither `id` nor `orgid`; callers skip those.
    pub fn reference(
        &self,
        preference: IdPreference,
    ) -> Result<Option<Reference<'_>>, MalformedRef> {
        match self {
            RefEntry::Id(id) => Ok(Some(Reference::Id(*id))),
            RefEntry::Text(text) => Ok(Some(Reference::Display(text))),
            RefEntry::Object { id, orgid } => {
                let picked = match preference {
                    IdPreference::IdFirst => id.or(*orgid),
                    IdPreference::OrgIdFirst => orgid.or(*id),
                };
                Ok(picked.map(Reference::Id))
            }
            RefEntry::Malformed(value) => Err(MalformedRef(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPeriodEntry {
    pub id: EntityId,
    pub date: RawDate,
    pub start_time: RawTime,
    pub end_time: RawTime,
    #[serde(default)]
    pub su: Vec<RefEntry>,
    #[serde(default)]
    pub te: Vec<RefEntry>,
    #[serde(default)]
    pub ro: Vec<RefEntry>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default)]
    pub subst_text: Option<String>,
    #[serde(default)]
    pub lstext: Option<String>,
}

impl RawPeriodEntry {
    /// Provider status code, `None` when absent or blank.
    pub fn status_code(&self) -> Option<&str> {
        non_blank(self.code.as_deref())
    }

    /// Lesson info, falling back to the substitution text, then the lesson text.
    pub fn info_text(&self) -> Option<&str> {
        non_blank(self.info.as_deref())
            .or_else(|| non_blank(self.subst_text.as_deref()))
            .or_else(|| non_blank(self.lstext.as_deref()))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateCell {
    pub date: NaiveDate,
    pub periods: Vec<RawPeriodEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotRow {
    pub start: NaiveTime,
    pub cells: Vec<DateCell>,
}

/// Periods grouped first by slot start time, then by date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTimetable {
    pub rows: Vec<SlotRow>,
}

impl RawTimetable {
    /// Lays a flat period list out as a slot x date grid.
    ///
    /// Rows are the distinct start times and columns the distinct dates, both ascending.
    /// Every row carries a cell for every date, so a cell may be empty; within a cell the
    /// provider's period order is kept.
    pub fn from_periods(periods: Vec<RawPeriodEntry>) -> Result<Self, NormalizeError> {
        let mut dates = BTreeSet::new();
        let mut grouped: BTreeMap<NaiveTime, BTreeMap<NaiveDate, Vec<RawPeriodEntry>>> =
            BTreeMap::new();

        for period in periods {
            let start = period.start_time.to_time()?;
            let date = period.date.to_date()?;
            dates.insert(date);
            grouped
                .entry(start)
                .or_default()
                .entry(date)
                .or_default()
                .push(period);
        }

        let rows = grouped
            .into_iter()
            .map(|(start, mut by_date)| SlotRow {
                start,
                cells: dates
                    .iter()
                    .map(|date| DateCell {
                        date: *date,
                        periods: by_date.remove(date).unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect();

        Ok(Self { rows })
    }

    pub fn period_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| &row.cells)
            .map(|cell| cell.periods.len())
            .sum()
    }
}
