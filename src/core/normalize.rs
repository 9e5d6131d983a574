use crate::core::resolve::{resolve_names, resolve_teachers};
use crate::domain::model::{DaySlot, Directories, NormalizedPeriod, NormalizedWeek};
use crate::domain::raw::{RawPeriodEntry, RawTimetable};
use crate::utils::error::NormalizeError;
use chrono::NaiveTime;
use std::collections::{BTreeMap, BTreeSet};

pub const NO_SUBJECT: &str = "Kein Fach";
pub const NO_ROOM: &str = "Kein Raum";
pub const REGULAR_STATUS: &str = "regular";

fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Denormalizes a slot x date grid into per-day slot lists with resolved names.
///
/// Each (slot, date) cell becomes one [`DaySlot`] under its ISO date, and each day's slots
/// end up ordered by slot time regardless of the order the rows came in.
pub fn normalize(
    raw: &RawTimetable,
    directories: &Directories,
) -> Result<NormalizedWeek, NormalizeError> {
    let mut times = BTreeSet::new();
    let mut days: BTreeMap<String, Vec<DaySlot>> = BTreeMap::new();

    for row in &raw.rows {
        let slot_time = format_time(row.start);

        for cell in &row.cells {
            let periods = cell
                .periods
                .iter()
                .map(|period| normalize_period(period, directories))
                .collect::<Result<Vec<_>, _>>()?;

            days.entry(cell.date.format("%Y-%m-%d").to_string())
                .or_default()
                .push(DaySlot {
                    slot_time: slot_time.clone(),
                    periods,
                });
            times.insert(slot_time.clone());
        }
    }

    // "HH:MM" sorts lexically in time order; the sort is stable for duplicate slots.
    for slots in days.values_mut() {
        slots.sort_by(|a, b| a.slot_time.cmp(&b.slot_time));
    }

    Ok(NormalizedWeek {
        times: times.into_iter().collect(),
        days,
    })
}

pub fn normalize_period(
    period: &RawPeriodEntry,
    directories: &Directories,
) -> Result<NormalizedPeriod, NormalizeError> {
    let time_start = format_time(period.start_time.to_time()?);
    let time_end = format_time(period.end_time.to_time()?);

    Ok(NormalizedPeriod {
        id: period.id,
        time_start,
        time_end,
        subject: resolve_names(&period.su, &directories.subjects, NO_SUBJECT).into_inner(),
        teacher: resolve_teachers(&period.te, &directories.teachers, Vec::new()).into_inner(),
        room: resolve_names(&period.ro, &directories.rooms, NO_ROOM).into_inner(),
        status: period
            .status_code()
            .unwrap_or(REGULAR_STATUS)
            .to_string(),
        info: period.info_text().map(str::to_string),
    })
}
