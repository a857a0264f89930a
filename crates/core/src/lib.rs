#![warn(clippy::all, missing_docs)]

//! Core domain logic for the StudyTUI daily study scheduler.
//!
//! This crate hosts the configuration handling, day classification,
//! session timing, page-progress tracking, reward derivation, and
//! weekly history models used by the terminal UI and any future
//! frontends.

pub mod clock;
pub mod config;
pub mod progress;
pub mod rewards;
pub mod schedule;
pub mod session;
pub mod stats;

pub use config::{AppConfig, RewardSettings};
pub use progress::{Celebration, CompletionOutcome, ProgressBook};
pub use rewards::{Currency, RewardLedger, RewardPolicy, SpendAmount};
pub use schedule::DayType;
pub use session::StudySession;
pub use stats::{max_study_minutes, week_totals, DaySummary, SampleWeek, WeekHistory, WeekTotals};
