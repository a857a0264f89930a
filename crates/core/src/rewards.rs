//! Leisure-time budgets earned from study and the spend ledger.

use serde::{Deserialize, Serialize};

use crate::config::RewardSettings;
use crate::schedule::DayType;

/// Reward currency being spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    /// Game time, earned from study (capped on weekends).
    Game,
    /// Video time, a fixed daily allowance.
    Video,
}

impl Currency {
    /// User-facing name.
    pub fn label(self) -> &'static str {
        match self {
            Currency::Game => "game",
            Currency::Video => "video",
        }
    }
}

/// Spendable denominations offered by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpendAmount {
    /// A ten-minute block.
    Ten,
    /// A thirty-minute block.
    Thirty,
}

impl SpendAmount {
    /// Minutes requested by this denomination.
    pub fn minutes(self) -> u32 {
        match self {
            SpendAmount::Ten => 10,
            SpendAmount::Thirty => 30,
        }
    }

    /// Whether the denomination's control is enabled for the given
    /// remaining availability. Ten needs any remainder at all; thirty
    /// needs the full block.
    pub fn can_spend(self, available: u32) -> bool {
        match self {
            SpendAmount::Ten => available > 0,
            SpendAmount::Thirty => available >= 30,
        }
    }
}

/// Derivation rules for reward budgets. All methods are pure; earned
/// time is recomputed from elapsed seconds on every read rather than
/// stored, so it can never drift from the timer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardPolicy {
    earn_percent: u8,
    weekend_game_minutes: u32,
    daily_video_minutes: u32,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self::from_settings(&RewardSettings::default())
    }
}

impl RewardPolicy {
    /// Build a policy from configuration.
    pub fn from_settings(settings: &RewardSettings) -> Self {
        Self {
            earn_percent: settings.earn_percent,
            weekend_game_minutes: settings.weekend_game_minutes,
            daily_video_minutes: settings.daily_video_minutes,
        }
    }

    /// Game minutes earned from elapsed study seconds:
    /// `floor(seconds / 60 * percent / 100)` in exact integer form.
    pub fn earned_minutes(&self, elapsed_seconds: u64) -> u32 {
        (elapsed_seconds * u64::from(self.earn_percent) / 6000) as u32
    }

    /// Earn rate as a percentage, for captions.
    pub fn earn_percent(&self) -> u8 {
        self.earn_percent
    }

    /// Game-time ceiling for the day. Weekends grant a fixed allowance
    /// regardless of study; other days can spend exactly what they earned.
    pub fn game_ceiling(&self, day: DayType, earned_minutes: u32) -> u32 {
        if day.is_weekend() {
            self.weekend_game_minutes
        } else {
            earned_minutes
        }
    }

    /// Video-time ceiling, identical every day.
    pub fn video_ceiling(&self) -> u32 {
        self.daily_video_minutes
    }
}

/// Minutes already spent today, per currency. Only ever increases.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RewardLedger {
    used_game: u32,
    used_video: u32,
}

impl RewardLedger {
    /// Minutes spent so far in a currency.
    pub fn used(&self, currency: Currency) -> u32 {
        match currency {
            Currency::Game => self.used_game,
            Currency::Video => self.used_video,
        }
    }

    /// Remaining spendable minutes under the given ceiling.
    pub fn available(&self, currency: Currency, ceiling: u32) -> u32 {
        ceiling.saturating_sub(self.used(currency))
    }

    /// Spend a denomination, clamped so the used total never exceeds
    /// the ceiling. Returns the minutes actually granted.
    pub fn spend(&mut self, currency: Currency, amount: SpendAmount, ceiling: u32) -> u32 {
        let used = match currency {
            Currency::Game => &mut self.used_game,
            Currency::Video => &mut self.used_video,
        };
        let before = *used;
        // A ceiling below the current total must not roll the ledger back.
        *used = (*used + amount.minutes()).min(ceiling).max(before);
        let granted = *used - before;
        tracing::info!(
            currency = currency.label(),
            requested = amount.minutes(),
            granted,
            "Reward minutes spent"
        );
        granted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earned_minutes_matches_the_reference_ratio() {
        let policy = RewardPolicy::default();
        // Ten studied minutes earn three game minutes.
        assert_eq!(policy.earned_minutes(600), 3);
        // Under the first earnable minute everything floors to zero.
        assert_eq!(policy.earned_minutes(0), 0);
        assert_eq!(policy.earned_minutes(199), 0);
        assert_eq!(policy.earned_minutes(200), 1);
    }

    #[test]
    fn earned_minutes_is_non_decreasing() {
        let policy = RewardPolicy::default();
        let mut last = 0;
        for seconds in (0..7200).step_by(37) {
            let earned = policy.earned_minutes(seconds);
            assert!(earned >= last);
            last = earned;
        }
    }

    #[test]
    fn weekday_ceiling_is_the_earned_amount() {
        let policy = RewardPolicy::default();
        assert_eq!(policy.game_ceiling(DayType::Weekday, 3), 3);
        assert_eq!(policy.game_ceiling(DayType::Thursday, 45), 45);
        assert_eq!(policy.game_ceiling(DayType::Saturday, 3), 120);
        assert_eq!(policy.game_ceiling(DayType::Sunday, 0), 120);
        assert_eq!(policy.video_ceiling(), 120);
    }

    #[test]
    fn overspending_clamps_to_the_ceiling() {
        let policy = RewardPolicy::default();
        let mut ledger = RewardLedger::default();
        // Weekday with three earned minutes: a ten-minute request only
        // gets what is left under the ceiling.
        let ceiling = policy.game_ceiling(DayType::Weekday, 3);
        let granted = ledger.spend(Currency::Game, SpendAmount::Ten, ceiling);
        assert_eq!(granted, 3);
        assert_eq!(ledger.used(Currency::Game), 3);
        assert_eq!(ledger.available(Currency::Game, ceiling), 0);

        // Further spends grant nothing and never push used past the cap.
        assert_eq!(ledger.spend(Currency::Game, SpendAmount::Thirty, ceiling), 0);
        assert_eq!(ledger.used(Currency::Game), 3);
    }

    #[test]
    fn video_ledger_is_independent_of_game_spend() {
        let policy = RewardPolicy::default();
        let mut ledger = RewardLedger::default();
        ledger.spend(Currency::Video, SpendAmount::Thirty, policy.video_ceiling());
        assert_eq!(ledger.used(Currency::Video), 30);
        assert_eq!(ledger.used(Currency::Game), 0);
        assert_eq!(
            ledger.available(Currency::Video, policy.video_ceiling()),
            90
        );
    }

    #[test]
    fn denominations_gate_on_availability() {
        assert!(SpendAmount::Ten.can_spend(1));
        assert!(!SpendAmount::Ten.can_spend(0));
        assert!(SpendAmount::Thirty.can_spend(30));
        assert!(!SpendAmount::Thirty.can_spend(29));
    }
}
