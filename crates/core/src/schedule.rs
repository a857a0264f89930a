//! Calendar-day classification driving labels and reward ceilings.

use chrono::{Datelike, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Category of the current calendar day.
///
/// Classified once at startup and held for the lifetime of the run;
/// a session crossing midnight keeps the day type it started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    /// Regular school day: work through new material.
    Weekday,
    /// Thursday: dedicated to reviewing mistakes.
    Thursday,
    /// Saturday: catch-up study, fixed game-time ceiling.
    Saturday,
    /// Sunday: catch-up study, fixed game-time ceiling.
    Sunday,
}

impl DayType {
    /// Classify a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sun => DayType::Sunday,
            Weekday::Sat => DayType::Saturday,
            Weekday::Thu => DayType::Thursday,
            _ => DayType::Weekday,
        }
    }

    /// Classify today according to the local clock.
    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// Saturdays and Sundays use the fixed weekend game-time ceiling.
    pub fn is_weekend(self) -> bool {
        matches!(self, DayType::Saturday | DayType::Sunday)
    }

    /// Banner label shown on the home screen.
    pub fn label(self) -> &'static str {
        match self {
            DayType::Weekday => "Lesson progress",
            DayType::Thursday => "Review mistakes day",
            DayType::Saturday | DayType::Sunday => "Catch-up study",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn classifies_each_weekday_index() {
        // 2024-01-07 is a Sunday; walk the following week.
        assert_eq!(DayType::from_date(date(2024, 1, 7)), DayType::Sunday);
        assert_eq!(DayType::from_date(date(2024, 1, 8)), DayType::Weekday);
        assert_eq!(DayType::from_date(date(2024, 1, 9)), DayType::Weekday);
        assert_eq!(DayType::from_date(date(2024, 1, 10)), DayType::Weekday);
        assert_eq!(DayType::from_date(date(2024, 1, 11)), DayType::Thursday);
        assert_eq!(DayType::from_date(date(2024, 1, 12)), DayType::Weekday);
        assert_eq!(DayType::from_date(date(2024, 1, 13)), DayType::Saturday);
    }

    #[test]
    fn weekend_flag_matches_classification() {
        assert!(DayType::Saturday.is_weekend());
        assert!(DayType::Sunday.is_weekend());
        assert!(!DayType::Thursday.is_weekend());
        assert!(!DayType::Weekday.is_weekend());
    }

    #[test]
    fn labels_are_distinct_per_category() {
        assert_eq!(DayType::Weekday.label(), "Lesson progress");
        assert_eq!(DayType::Thursday.label(), "Review mistakes day");
        assert_eq!(DayType::Saturday.label(), DayType::Sunday.label());
    }
}
