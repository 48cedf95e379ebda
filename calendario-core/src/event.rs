//! Calendar event record and day-granularity helpers.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;

/// One row of the calendar feed.
///
/// Dates are calendar days without a time component. A date that could not
/// be parsed is `None` and makes the event invisible to every date query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// Activity name (`Atividade`)
    pub activity: String,
    /// Offering the event belongs to (`Produto`)
    pub product: String,
    /// Type of activity (`Categoria`)
    pub category: String,
    /// Academic period code (`Modulo`)
    pub module: String,
    pub start: Option<NaiveDate>,
    /// Inclusive end day
    pub end: Option<NaiveDate>,
    /// Display order used for tie-breaking in listings (`Ordem`)
    pub order: i32,
    pub visible: bool,
}

impl Event {
    /// Both dates parsed, regardless of whether they form a sensible range.
    pub fn has_valid_dates(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Whether `day` falls inside `[start, end]`.
    ///
    /// Invalid dates and inverted ranges never match.
    pub fn contains_day(&self, day: NaiveDate) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= day && day <= end,
            _ => false,
        }
    }

    /// Case-insensitive search for `marker` in the category or activity text.
    pub fn mentions(&self, marker: &str) -> bool {
        let marker = marker.to_lowercase();
        self.category.to_lowercase().contains(&marker)
            || self.activity.to_lowercase().contains(&marker)
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.activity)
    }
}

/// Anything that can be reduced to a calendar day.
///
/// Time of day is dropped, so every query compares at day granularity no
/// matter what the caller passes in.
pub trait CalendarDay {
    fn calendar_day(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

/// The day as seen in the datetime's own timezone.
impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

impl<T: CalendarDay + ?Sized> CalendarDay for &T {
    fn calendar_day(&self) -> NaiveDate {
        (**self).calendar_day()
    }
}

#[cfg(test)]
pub(crate) fn test_event(
    activity: &str,
    product: &str,
    category: &str,
    module: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    order: i32,
) -> Event {
    Event {
        activity: activity.to_string(),
        product: product.to_string(),
        category: category.to_string(),
        module: module.to_string(),
        start,
        end,
        order,
        visible: true,
    }
}

#[cfg(test)]
pub(crate) fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_contains_day_is_inclusive() {
        let event = test_event("Prova", "EAD", "Avaliação", "2026-51", Some(ymd(2026, 2, 5)), Some(ymd(2026, 2, 10)), 0);

        assert!(event.contains_day(ymd(2026, 2, 5)));
        assert!(event.contains_day(ymd(2026, 2, 10)));
        assert!(!event.contains_day(ymd(2026, 2, 4)));
        assert!(!event.contains_day(ymd(2026, 2, 11)));
    }

    #[test]
    fn test_inverted_or_invalid_range_never_matches() {
        let inverted = test_event("X", "EAD", "C", "M", Some(ymd(2026, 3, 10)), Some(ymd(2026, 3, 1)), 0);
        let invalid = test_event("X", "EAD", "C", "M", None, Some(ymd(2026, 3, 1)), 0);

        assert!(!inverted.contains_day(ymd(2026, 3, 5)));
        assert!(!invalid.contains_day(ymd(2026, 3, 1)));
        assert!(!invalid.has_valid_dates());
    }

    #[test]
    fn test_mentions_ignores_case_with_accents() {
        let event = test_event("Início do PERÍODO LETIVO", "EAD", "Marco", "M", None, None, 0);

        assert!(event.mentions("período letivo"));
        assert!(!event.mentions("matrícula"));
    }

    #[test]
    fn test_calendar_day_drops_time_of_day() {
        let late = ymd(2026, 2, 1).and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(late.calendar_day(), ymd(2026, 2, 1));

        let utc = Utc.with_ymd_and_hms(2026, 2, 1, 12, 30, 0).unwrap();
        assert_eq!(utc.calendar_day(), ymd(2026, 2, 1));

        // 01:00 in UTC-03:00 is still the 1st there
        let brt = FixedOffset::west_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 2, 1, 1, 0, 0)
            .unwrap();
        assert_eq!(brt.calendar_day(), ymd(2026, 2, 1));
    }
}
