use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Provider-assigned identifier of a class, subject, teacher or room.
pub type EntityId = i64;

/// Monday through Saturday of one calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekRange {
    pub fn containing(date: NaiveDate) -> Self {
        let offset = u64::from(date.weekday().num_days_from_monday());
        let start = date - Days::new(offset);
        Self {
            start,
            end: start + Days::new(5),
        }
    }
}

/// Read-only id -> display value mapping built from one provider directory listing.
#[derive(Debug, Clone)]
pub struct Directory<T> {
    entries: HashMap<EntityId, T>,
}

impl<T> Directory<T> {
    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Directory<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> FromIterator<(EntityId, T)> for Directory<T> {
    fn from_iter<I: IntoIterator<Item = (EntityId, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherInfo {
    pub name: String,
    pub fore_name: String,
    pub long_name: String,
}

/// A resolved teacher, or a placeholder for an id missing from the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TeacherEntry {
    Known(TeacherInfo),
    Unknown { id: EntityId, name: String },
}

impl TeacherEntry {
    pub fn unknown(id: EntityId) -> Self {
        TeacherEntry::Unknown {
            id,
            name: format!("Unbekannt (#{})", id),
        }
    }
}

/// The three lookups needed to denormalize one week of periods.
#[derive(Debug, Clone, Default)]
pub struct Directories {
    pub subjects: Directory<String>,
    pub teachers: Directory<TeacherInfo>,
    pub rooms: Directory<String>,
}

impl Directories {
    pub fn from_listings(subjects: Vec<Subject>, teachers: Vec<Teacher>, rooms: Vec<Room>) -> Self {
        Self {
            subjects: subjects
                .into_iter()
                .map(|s| {
                    let display = if s.long_name.trim().is_empty() {
                        s.name
                    } else {
                        s.long_name
                    };
                    (s.id, display)
                })
                .collect(),
            teachers: teachers
                .into_iter()
                .map(|t| {
                    (
                        t.id,
                        TeacherInfo {
                            name: t.name,
                            fore_name: t.fore_name,
                            long_name: t.long_name,
                        },
                    )
                })
                .collect(),
            rooms: rooms.into_iter().map(|r| (r.id, r.name)).collect(),
        }
    }
}

// Provider directory listings. WebUntis omits empty name fields, hence the defaults.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolClass {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub long_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub long_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub fore_name: String,
    #[serde(default)]
    pub long_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub long_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedPeriod {
    pub id: EntityId,
    pub time_start: String,
    pub time_end: String,
    pub subject: String,
    pub teacher: Vec<TeacherEntry>,
    pub room: String,
    pub status: String,
    pub info: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySlot {
    pub slot_time: String,
    pub periods: Vec<NormalizedPeriod>,
}

/// Output of the normalizer: every slot time seen, and the slots of each ISO date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedWeek {
    pub times: Vec<String>,
    pub days: BTreeMap<String, Vec<DaySlot>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimetableResponse {
    #[serde(rename = "class")]
    pub class_name: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub times: Vec<String>,
    pub days: BTreeMap<String, Vec<DaySlot>>,
}

impl TimetableResponse {
    pub fn new(class_name: impl Into<String>, week: WeekRange, normalized: NormalizedWeek) -> Self {
        Self {
            class_name: class_name.into(),
            from: week.start,
            to: week.end,
            times: normalized.times,
            days: normalized.days,
        }
    }
}
