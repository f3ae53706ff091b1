use anchor_lang::prelude::*;

use crate::errors::AdRewardsError;
use crate::utils;

// ---------------------------
// Accounts: State
// ---------------------------

/// One immutable log entry describing a completed reward event.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq)]
pub struct Activity {
    // String in account: 4 bytes for length + MAX_DESC_LEN bytes reserved
    pub description: String, // 4 + MAX_DESC_LEN bytes
    pub amount: u64,         // 8 bytes - reward credited, in cents
    pub timestamp: i64,      // 8 bytes - unix time, display formatting is a client concern
}

impl Activity {
    /// Long enough for a full slot title plus the "<title> Watched (+$<amount>)"
    /// suffix at the largest representable amount.
    pub const MAX_DESC_LEN: usize = 128;

    pub const SIZE: usize = 4 + Self::MAX_DESC_LEN + 8 + 8;
}

/// Per-wallet rewards session: balances, counters and the rolling
/// activity log rendered by the frontend.
#[account]
#[derive(Debug, Default, PartialEq)]
pub struct UserSession {
    pub owner: Pubkey,         // 32 bytes
    pub total_earnings: u64,   // 8 bytes - lifetime earnings in cents, never decreases
    pub today_earnings: u64,   // 8 bytes - zeroed once per calendar day
    pub ads_watched: u64,      // 8 bytes
    pub last_reset_day: u64,   // 8 bytes - day number (unix_timestamp / 86_400) of last reset
    // String in account: 4 bytes for length + MAX_REFERRAL_LEN bytes reserved
    pub referral_code: String, // 4 + MAX_REFERRAL_LEN bytes
    // Vec in account: 4 bytes for length + MAX_ACTIVITIES entries reserved
    pub activities: Vec<Activity>, // 4 + MAX_ACTIVITIES * Activity::SIZE bytes
    pub bump: u8,              // 1 byte
}

impl UserSession {
    pub const MAX_REFERRAL_LEN: usize = 16;
    pub const MAX_ACTIVITIES: usize = 10;

    /// Space calculation:
    /// - owner: 32
    /// - total_earnings: 8
    /// - today_earnings: 8
    /// - ads_watched: 8
    /// - last_reset_day: 8
    /// - referral_code: 4 (len) + MAX_REFERRAL_LEN
    /// - activities: 4 (len) + MAX_ACTIVITIES * Activity::SIZE
    /// - bump: 1
    pub const SIZE: usize = 32
        + 8
        + 8
        + 8
        + 8
        + 4
        + Self::MAX_REFERRAL_LEN
        + 4
        + Self::MAX_ACTIVITIES * Activity::SIZE
        + 1;

    /// Default state for a freshly created session: zeroed balances, the
    /// constant referral code, one seeded demo activity and a reset
    /// marker at the current day.
    pub fn bootstrap(&mut self, owner: Pubkey, now: i64, bump: u8) {
        self.owner = owner;
        self.total_earnings = 0;
        self.today_earnings = 0;
        self.ads_watched = 0;
        self.last_reset_day = utils::day_number(now);
        self.referral_code = utils::DEFAULT_REFERRAL_CODE.to_string();
        self.activities = vec![Activity {
            description: utils::DEMO_ACTIVITY_DESCRIPTION.to_string(),
            amount: utils::DEMO_ACTIVITY_REWARD,
            timestamp: now,
        }];
        self.bump = bump;
    }

    /// Credit a completed ad view: both balances grow by exactly `amount`
    /// and the watch counter by exactly 1.
    pub fn credit(&mut self, amount: u64) -> Result<()> {
        self.total_earnings = self
            .total_earnings
            .checked_add(amount)
            .ok_or(AdRewardsError::Overflow)?;
        self.today_earnings = self
            .today_earnings
            .checked_add(amount)
            .ok_or(AdRewardsError::Overflow)?;
        self.ads_watched = self
            .ads_watched
            .checked_add(1)
            .ok_or(AdRewardsError::Overflow)?;
        Ok(())
    }

    /// Prepend an activity entry, dropping the oldest beyond the cap.
    pub fn record_activity(&mut self, description: String, amount: u64, timestamp: i64) {
        self.activities.insert(
            0,
            Activity {
                description,
                amount,
                timestamp,
            },
        );
        self.activities.truncate(Self::MAX_ACTIVITIES);
    }

    /// Zero `today_earnings` when the calendar day has changed since the
    /// last reset. Returns whether a reset happened. `total_earnings` is
    /// never touched.
    pub fn maybe_daily_reset(&mut self, now: i64) -> bool {
        let today = utils::day_number(now);
        if today == self.last_reset_day {
            return false;
        }
        self.today_earnings = 0;
        self.last_reset_day = today;
        true
    }

    pub fn can_withdraw(&self) -> bool {
        self.total_earnings >= utils::MIN_WITHDRAWAL_CENTS
    }
}

/// One watchable ad card: the reward amount and title the frontend
/// attaches to its "watch" button.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct AdSlot {
    // String in account: 4 bytes for length + MAX_TITLE_LEN bytes reserved
    pub title: String, // 4 + MAX_TITLE_LEN bytes
    pub reward: u64,   // 8 bytes - cents credited per completed view
}

impl AdSlot {
    pub const MAX_TITLE_LEN: usize = 64;

    pub const SIZE: usize = 4 + Self::MAX_TITLE_LEN + 8;
}

/// Singleton ad inventory: which cards are on display and when they were
/// last rotated by the ad authority.
#[account]
pub struct AdBoard {
    pub authority: Pubkey,     // 32 bytes - who may refresh the inventory
    // Vec in account: 4 bytes for length + MAX_SLOTS entries reserved
    pub slots: Vec<AdSlot>,    // 4 + MAX_SLOTS * AdSlot::SIZE bytes
    pub last_refresh: i64,     // 8 bytes
    pub refresh_count: u64,    // 8 bytes
    pub bump: u8,              // 1 byte
}

impl AdBoard {
    pub const MAX_SLOTS: usize = 8;

    /// Space = 32 + 4 + MAX_SLOTS * AdSlot::SIZE + 8 + 8 + 1
    pub const SIZE: usize = 32 + 4 + Self::MAX_SLOTS * AdSlot::SIZE + 8 + 8 + 1;
}

/// In-flight countdown for a single ad card. Its existence doubles as
/// the disabled state of that card's watch button; it is closed back to
/// the user when the view completes.
#[account]
pub struct AdView {
    pub session: Pubkey,  // 32 bytes - session this view belongs to
    pub slot_index: u8,   // 1 byte
    // String in account: 4 bytes for length + AdSlot::MAX_TITLE_LEN bytes reserved
    pub title: String,    // 4 + AdSlot::MAX_TITLE_LEN bytes - snapshot of the slot title
    pub reward: u64,      // 8 bytes - snapshot of the slot reward, in cents
    pub started_at: i64,  // 8 bytes
    pub deadline: i64,    // 8 bytes - started_at + countdown duration
    pub bump: u8,         // 1 byte
}

impl AdView {
    /// Space = 32 + 1 + 4 + MAX_TITLE_LEN + 8 + 8 + 8 + 1
    pub const SIZE: usize = 32 + 1 + 4 + AdSlot::MAX_TITLE_LEN + 8 + 8 + 8 + 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fresh_session() -> UserSession {
        UserSession {
            referral_code: utils::DEFAULT_REFERRAL_CODE.to_string(),
            ..UserSession::default()
        }
    }

    #[test]
    fn fresh_session_has_one_demo_activity_and_zero_balances() {
        let mut session = UserSession::default();
        let now = 1_700_000_000;
        session.bootstrap(Pubkey::new_unique(), now, 255);

        assert_eq!(session.total_earnings, 0);
        assert_eq!(session.today_earnings, 0);
        assert_eq!(session.ads_watched, 0);
        assert_eq!(session.referral_code, utils::DEFAULT_REFERRAL_CODE);
        assert_eq!(session.activities.len(), 1);
        assert_eq!(
            session.activities[0].description,
            utils::DEMO_ACTIVITY_DESCRIPTION
        );
        assert_eq!(session.activities[0].amount, utils::DEMO_ACTIVITY_REWARD);
        // A session never daily-resets on the day it was created.
        assert!(!session.maybe_daily_reset(now + 60));
    }

    #[test]
    fn credit_bumps_both_balances_and_counter() {
        let mut session = fresh_session();
        session.credit(5).unwrap();
        assert_eq!(session.total_earnings, 5);
        assert_eq!(session.today_earnings, 5);
        assert_eq!(session.ads_watched, 1);

        session.credit(25).unwrap();
        assert_eq!(session.total_earnings, 30);
        assert_eq!(session.today_earnings, 30);
        assert_eq!(session.ads_watched, 2);
    }

    #[test]
    fn credit_rejects_overflow() {
        let mut session = fresh_session();
        session.total_earnings = u64::MAX;
        assert!(session.credit(1).is_err());
    }

    #[test]
    fn activity_log_is_newest_first() {
        let mut session = fresh_session();
        session.record_activity("first".to_string(), 1, 100);
        session.record_activity("second".to_string(), 2, 200);
        assert_eq!(session.activities[0].description, "second");
        assert_eq!(session.activities[1].description, "first");
    }

    #[test]
    fn activity_log_caps_at_ten_entries() {
        let mut session = fresh_session();
        for i in 0..25u64 {
            session.record_activity(format!("entry {i}"), i, i as i64);
        }
        assert_eq!(session.activities.len(), UserSession::MAX_ACTIVITIES);
        assert_eq!(session.activities[0].description, "entry 24");
        // Oldest surviving entry is the cap-th most recent one.
        assert_eq!(session.activities[9].description, "entry 15");
    }

    #[test]
    fn daily_reset_zeroes_only_today() {
        let mut session = fresh_session();
        session.total_earnings = 500;
        session.today_earnings = 120;
        session.last_reset_day = utils::day_number(1_700_000_000);

        // Same day: nothing happens.
        assert!(!session.maybe_daily_reset(1_700_000_000 + 60));
        assert_eq!(session.today_earnings, 120);

        // Next day: today is zeroed, total is untouched.
        let next_day = 1_700_000_000 + utils::SECONDS_PER_DAY;
        assert!(session.maybe_daily_reset(next_day));
        assert_eq!(session.today_earnings, 0);
        assert_eq!(session.total_earnings, 500);
        assert_eq!(session.last_reset_day, utils::day_number(next_day));

        // Re-running on the new day is a no-op.
        assert!(!session.maybe_daily_reset(next_day + 60));
    }

    #[test]
    fn withdrawal_gate_is_inclusive_at_the_minimum() {
        let mut session = fresh_session();
        session.total_earnings = 999;
        assert!(!session.can_withdraw());
        session.total_earnings = 1_000;
        assert!(session.can_withdraw());
    }

    #[test]
    fn session_round_trips_through_borsh() {
        let mut session = fresh_session();
        session.owner = Pubkey::new_unique();
        session.last_reset_day = 20_000;
        session.bump = 254;
        session.credit(5).unwrap();
        session.credit(15).unwrap();
        session.record_activity("Video Advertisement Watched (+$0.05)".to_string(), 5, 1_700_000_000);
        session.record_activity("Banner Advertisement Watched (+$0.15)".to_string(), 15, 1_700_000_030);

        let mut bytes = Vec::new();
        session.serialize(&mut bytes).unwrap();
        let restored = UserSession::deserialize(&mut bytes.as_slice()).unwrap();

        assert_eq!(restored, session);
    }

    proptest! {
        #[test]
        fn activity_log_never_exceeds_cap(
            amounts in proptest::collection::vec(0u64..10_000, 0..40)
        ) {
            let mut session = fresh_session();
            for (i, amount) in amounts.iter().enumerate() {
                session.record_activity(format!("ad {i}"), *amount, i as i64);
                prop_assert!(session.activities.len() <= UserSession::MAX_ACTIVITIES);
                prop_assert_eq!(session.activities[0].amount, *amount);
            }
        }

        #[test]
        fn credit_sequence_keeps_balances_consistent(
            rewards in proptest::collection::vec(1u64..1_000, 1..50)
        ) {
            let mut session = fresh_session();
            for reward in &rewards {
                session.credit(*reward).unwrap();
            }
            let sum: u64 = rewards.iter().sum();
            prop_assert_eq!(session.total_earnings, sum);
            prop_assert_eq!(session.today_earnings, sum);
            prop_assert_eq!(session.ads_watched, rewards.len() as u64);
        }
    }
}
