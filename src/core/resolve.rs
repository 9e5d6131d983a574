//! Turns a period's element references into display values.
//!
//! Neither resolver fails: a missing id becomes a placeholder, an object without any id is
//! skipped, and an empty list or an entry of unsupported shape yields the caller's fallback,
//! tagged as such in the returned [`Resolution`].

use crate::domain::model::{Directory, TeacherEntry, TeacherInfo};
use crate::domain::raw::{IdPreference, MalformedRef, RefEntry, Reference};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    Resolved(T),
    Fallback(T),
}

impl<T> Resolution<T> {
    pub fn into_inner(self) -> T {
        match self {
            Resolution::Resolved(value) | Resolution::Fallback(value) => value,
        }
    }
}

/// Resolves subjects or rooms to a `", "`-joined name list.
///
/// Object entries use `id` before `orgid`; bare integers are looked up, bare strings are
/// taken verbatim. Ids absent from `lookup` render as `#<id>`.
pub fn resolve_names(
    entries: &[RefEntry],
    lookup: &Directory<String>,
    fallback: &str,
) -> Resolution<String> {
    if entries.is_empty() {
        return Resolution::Fallback(fallback.to_string());
    }

    let mut names = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry.reference(IdPreference::IdFirst) {
            Ok(Some(Reference::Id(id))) => names.push(
                lookup
                    .get(id)
                    .cloned()
                    .unwrap_or_else(|| format!("#{}", id)),
            ),
            Ok(Some(Reference::Display(text))) => names.push(text.to_string()),
            Ok(None) => tracing::debug!("Skipping reference without id: {:?}", entry),
            Err(e) => return malformed(e, fallback.to_string()),
        }
    }

    Resolution::Resolved(names.join(", "))
}

/// Resolves teacher references to full teacher records.
///
/// Only object entries count, and `orgid` (the originally scheduled teacher) wins over
/// `id`. Unknown ids become an "Unbekannt" placeholder instead of being dropped.
pub fn resolve_teachers(
    entries: &[RefEntry],
    lookup: &Directory<TeacherInfo>,
    fallback: Vec<TeacherEntry>,
) -> Resolution<Vec<TeacherEntry>> {
    if entries.is_empty() {
        return Resolution::Fallback(fallback);
    }

    let mut teachers = Vec::with_capacity(entries.len());
    for entry in entries.iter().filter(|e| e.is_object()) {
        match entry.reference(IdPreference::OrgIdFirst) {
            Ok(Some(Reference::Id(id))) => teachers.push(
                lookup
                    .get(id)
                    .cloned()
                    .map(TeacherEntry::Known)
                    .unwrap_or_else(|| TeacherEntry::unknown(id)),
            ),
            Ok(Some(Reference::Display(_))) => {}
            Ok(None) => tracing::debug!("Skipping teacher reference without id"),
            Err(e) => return malformed(e, fallback),
        }
    }

    Resolution::Resolved(teachers)
}

fn malformed<T: std::fmt::Debug>(err: MalformedRef, fallback: T) -> Resolution<T> {
    tracing::warn!("Could not resolve references, using {:?}: {}", fallback, err);
    Resolution::Fallback(fallback)
}
