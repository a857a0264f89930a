//! Weekly study history shown on the stats screen.
//!
//! Real aggregation is out of scope; the screen renders whatever a
//! [`WeekHistory`] provider hands it. The bundled [`SampleWeek`] serves
//! fixed illustrative data.

use serde::{Deserialize, Serialize};

/// Days with at least this many pages count toward the weekly goal.
pub const GOAL_PAGES: u32 = 20;

/// One day's recorded study.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySummary {
    /// Short day label ("Mon" .. "Sun").
    pub label: String,
    /// Minutes studied that day.
    pub study_minutes: u32,
    /// Pages finished that day.
    pub pages: u32,
}

impl DaySummary {
    fn new(label: &str, study_minutes: u32, pages: u32) -> Self {
        Self {
            label: label.to_string(),
            study_minutes,
            pages,
        }
    }
}

/// Source of the week's per-day history.
pub trait WeekHistory {
    /// Seven entries, Monday first.
    fn days(&self) -> Vec<DaySummary>;
}

/// Fixed placeholder week used until real tracking exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleWeek;

impl WeekHistory for SampleWeek {
    fn days(&self) -> Vec<DaySummary> {
        vec![
            DaySummary::new("Mon", 180, 20),
            DaySummary::new("Tue", 200, 24),
            DaySummary::new("Wed", 150, 18),
            DaySummary::new("Thu", 120, 12),
            DaySummary::new("Fri", 190, 22),
            DaySummary::new("Sat", 60, 8),
            DaySummary::new("Sun", 0, 0),
        ]
    }
}

/// Aggregates for the weekly summary panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekTotals {
    /// Whole hours studied across the week.
    pub hours: u32,
    /// Pages finished across the week.
    pub pages: u32,
    /// Days that met the page goal.
    pub goal_days: u32,
}

/// Fold a week of summaries into totals.
pub fn week_totals(days: &[DaySummary]) -> WeekTotals {
    let minutes: u32 = days.iter().map(|day| day.study_minutes).sum();
    WeekTotals {
        hours: minutes / 60,
        pages: days.iter().map(|day| day.pages).sum(),
        goal_days: days.iter().filter(|day| day.pages >= GOAL_PAGES).count() as u32,
    }
}

/// Largest study-minutes value in the week, floored at 1 so chart
/// scaling never divides by zero.
pub fn max_study_minutes(days: &[DaySummary]) -> u32 {
    days.iter()
        .map(|day| day.study_minutes)
        .max()
        .unwrap_or(0)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_week_has_seven_days() {
        let days = SampleWeek.days();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].label, "Mon");
        assert_eq!(days[6].label, "Sun");
    }

    #[test]
    fn totals_match_the_sample_data() {
        let totals = week_totals(&SampleWeek.days());
        // 900 minutes floor to 15 whole hours.
        assert_eq!(totals.hours, 15);
        assert_eq!(totals.pages, 104);
        // Mon, Tue, and Fri hit the 20-page goal.
        assert_eq!(totals.goal_days, 3);
    }

    #[test]
    fn chart_scale_never_hits_zero() {
        assert_eq!(max_study_minutes(&[]), 1);
        let quiet = vec![DaySummary::new("Mon", 0, 0)];
        assert_eq!(max_study_minutes(&quiet), 1);
        assert_eq!(max_study_minutes(&SampleWeek.days()), 200);
    }
}
