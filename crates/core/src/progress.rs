//! Per-subject page tracking and the completion celebration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// How many 1 Hz ticks a celebration stays on screen.
const CELEBRATION_TICKS: u8 = 2;

/// Result of checking off a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The count advanced but the subject is not yet done.
    Advanced {
        /// Pages finished so far for the subject.
        pages: u8,
    },
    /// This page filled the subject's quota; a celebration was raised.
    SubjectComplete,
    /// The subject was already at its quota; nothing changed.
    AlreadyComplete,
}

/// Transient acknowledgment shown when a subject hits its quota.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Celebration {
    /// Subject that was just finished.
    pub subject: String,
    ticks_remaining: u8,
}

/// Completed-page counters for the configured subjects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressBook {
    subjects: Vec<String>,
    pages_per_subject: u8,
    pages: HashMap<String, u8>,
    celebration: Option<Celebration>,
}

impl ProgressBook {
    /// Create an empty book over the given ordered subjects.
    pub fn new(subjects: Vec<String>, pages_per_subject: u8) -> Self {
        Self {
            subjects,
            pages_per_subject,
            pages: HashMap::new(),
            celebration: None,
        }
    }

    /// Ordered subject list.
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    /// Daily page quota per subject.
    pub fn pages_per_subject(&self) -> u8 {
        self.pages_per_subject
    }

    /// Pages finished so far for a subject.
    pub fn pages(&self, subject: &str) -> u8 {
        self.pages.get(subject).copied().unwrap_or(0)
    }

    /// Whether the subject has hit its quota for the day.
    pub fn is_complete(&self, subject: &str) -> bool {
        self.pages(subject) >= self.pages_per_subject
    }

    /// Check off one page. Saturates silently at the quota; completing
    /// the final page raises a celebration that `tick()` later clears.
    pub fn complete_page(&mut self, subject: &str) -> CompletionOutcome {
        if !self.subjects.iter().any(|s| s == subject) {
            tracing::debug!(subject, "Page completion for unknown subject ignored");
            return CompletionOutcome::AlreadyComplete;
        }
        let current = self.pages(subject);
        if current >= self.pages_per_subject {
            return CompletionOutcome::AlreadyComplete;
        }
        let next = current + 1;
        self.pages.insert(subject.to_string(), next);
        if next == self.pages_per_subject {
            self.celebration = Some(Celebration {
                subject: subject.to_string(),
                ticks_remaining: CELEBRATION_TICKS,
            });
            tracing::info!(subject, "Subject finished for the day");
            CompletionOutcome::SubjectComplete
        } else {
            CompletionOutcome::Advanced { pages: next }
        }
    }

    /// Active celebration, if its display window is still open.
    pub fn celebration(&self) -> Option<&Celebration> {
        self.celebration.as_ref()
    }

    /// Advance the celebration display window by one second.
    pub fn tick(&mut self) {
        if let Some(celebration) = self.celebration.as_mut() {
            celebration.ticks_remaining = celebration.ticks_remaining.saturating_sub(1);
            if celebration.ticks_remaining == 0 {
                self.celebration = None;
            }
        }
    }

    /// Total pages finished across all subjects.
    pub fn total_pages(&self) -> u32 {
        self.subjects
            .iter()
            .map(|subject| u32::from(self.pages(subject)))
            .sum()
    }

    /// Maximum finishable pages across all subjects.
    pub fn total_quota(&self) -> u32 {
        self.subjects.len() as u32 * u32::from(self.pages_per_subject)
    }

    /// Overall completion percentage, rounded to the nearest integer.
    pub fn percent(&self) -> u8 {
        let quota = self.total_quota();
        if quota == 0 {
            return 0;
        }
        ((f64::from(self.total_pages()) / f64::from(quota)) * 100.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> ProgressBook {
        ProgressBook::new(
            vec!["Korean".to_string(), "Math".to_string()],
            6,
        )
    }

    #[test]
    fn counts_saturate_at_the_quota() {
        let mut book = book();
        for calls in 1..=9u8 {
            let outcome = book.complete_page("Math");
            match calls.cmp(&6) {
                std::cmp::Ordering::Less => {
                    assert_eq!(outcome, CompletionOutcome::Advanced { pages: calls });
                }
                std::cmp::Ordering::Equal => {
                    assert_eq!(outcome, CompletionOutcome::SubjectComplete);
                }
                std::cmp::Ordering::Greater => {
                    assert_eq!(outcome, CompletionOutcome::AlreadyComplete);
                }
            }
            assert_eq!(book.pages("Math"), calls.min(6));
        }
        assert!(book.is_complete("Math"));
    }

    #[test]
    fn unknown_subjects_are_ignored() {
        let mut book = book();
        assert_eq!(
            book.complete_page("Recess"),
            CompletionOutcome::AlreadyComplete
        );
        assert_eq!(book.total_pages(), 0);
    }

    #[test]
    fn celebration_clears_after_its_window() {
        let mut book = book();
        for _ in 0..5 {
            book.complete_page("Korean");
        }
        assert!(book.celebration().is_none());
        assert_eq!(
            book.complete_page("Korean"),
            CompletionOutcome::SubjectComplete
        );
        let celebration = book.celebration().expect("celebration raised");
        assert_eq!(celebration.subject, "Korean");

        book.tick();
        assert!(book.celebration().is_some());
        book.tick();
        assert!(book.celebration().is_none());

        // The window closing changes nothing else.
        assert_eq!(book.pages("Korean"), 6);
        assert_eq!(
            book.complete_page("Korean"),
            CompletionOutcome::AlreadyComplete
        );
    }

    #[test]
    fn percent_spans_zero_to_hundred() {
        let mut book = book();
        assert_eq!(book.percent(), 0);
        book.complete_page("Korean");
        // 1 of 12 pages ≈ 8%.
        assert_eq!(book.percent(), 8);
        for _ in 0..6 {
            book.complete_page("Korean");
            book.complete_page("Math");
        }
        assert_eq!(book.total_pages(), 12);
        assert_eq!(book.percent(), 100);
    }
}
