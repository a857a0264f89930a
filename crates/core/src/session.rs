//! Study session timer state.
//!
//! The session is a caller-driven counter: it holds no thread or timer
//! of its own. The frontend schedules `tick()` roughly once per second
//! while running, which lets tests drive time deterministically.

use serde::{Deserialize, Serialize};

/// Elapsed-time counter for the day's study, plus the active subject.
///
/// `elapsed_seconds` only ever increases; switching subjects keeps the
/// accumulated total.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudySession {
    elapsed_seconds: u64,
    active: bool,
    subject: Option<String>,
}

impl StudySession {
    /// Total studied seconds accumulated this run.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Whether the timer is currently counting.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Subject currently being studied, if any.
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Start studying the given subject; the timer begins immediately.
    pub fn begin(&mut self, subject: impl Into<String>) {
        self.subject = Some(subject.into());
        self.active = true;
    }

    /// Stop counting without leaving the session.
    pub fn pause(&mut self) {
        self.active = false;
    }

    /// Resume counting after a pause.
    pub fn resume(&mut self) {
        self.active = true;
    }

    /// Leave the current subject. Elapsed time is preserved.
    pub fn end(&mut self) {
        self.active = false;
        self.subject = None;
    }

    /// Advance the timer by one second, if active.
    pub fn tick(&mut self) {
        if self.active {
            self.elapsed_seconds += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_only_count_while_active() {
        let mut session = StudySession::default();
        session.tick();
        session.tick();
        assert_eq!(session.elapsed_seconds(), 0);

        session.begin("Math");
        assert!(session.is_active());
        assert_eq!(session.subject(), Some("Math"));
        for _ in 0..5 {
            session.tick();
        }
        assert_eq!(session.elapsed_seconds(), 5);
    }

    #[test]
    fn pause_and_resume_do_not_double_count() {
        let mut session = StudySession::default();
        session.begin("English");
        session.tick();
        session.pause();
        session.tick();
        session.tick();
        assert_eq!(session.elapsed_seconds(), 1);
        session.resume();
        session.tick();
        assert_eq!(session.elapsed_seconds(), 2);
    }

    #[test]
    fn ending_preserves_elapsed_time() {
        let mut session = StudySession::default();
        session.begin("Korean");
        session.tick();
        session.tick();
        session.end();
        assert!(!session.is_active());
        assert_eq!(session.subject(), None);
        assert_eq!(session.elapsed_seconds(), 2);

        // A fresh subject keeps the day's running total.
        session.begin("Math");
        session.tick();
        assert_eq!(session.elapsed_seconds(), 3);
    }
}
