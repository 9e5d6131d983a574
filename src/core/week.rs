use crate::domain::model::WeekRange;
use crate::domain::ports::Clock;
use chrono::NaiveDate;

/// Monday to Saturday of the week containing `anchor`, or of the current week.
pub fn resolve_week(anchor: Option<NaiveDate>, clock: &dyn Clock) -> WeekRange {
    let anchor = anchor.unwrap_or_else(|| clock.today());
    WeekRange::containing(anchor)
}
