use anchor_lang::prelude::*;

use crate::errors::AdRewardsError;
use crate::states::{AdBoard, AdSlot};

pub const SECONDS_PER_DAY: i64 = 86_400;
pub const CENTS_PER_DOLLAR: u64 = 100;

/// $10.00, the fixed withdrawal floor.
pub const MIN_WITHDRAWAL_CENTS: u64 = 1_000;

/// Minimum seconds between two ad board refreshes.
pub const BOARD_REFRESH_COOLDOWN: i64 = 60;

pub const DEFAULT_REFERRAL_CODE: &str = "EARN2024ADX";

/// Seeded into every fresh session so the activity list is never empty.
pub const DEMO_ACTIVITY_DESCRIPTION: &str = "Video Advertisement Watched";
pub const DEMO_ACTIVITY_REWARD: u64 = 5;

pub const MAX_BASE_URL_LEN: usize = 128;

/// Countdown length in seconds for an ad card, selected by title
/// substring. "Video" wins over the later rules when a title matches
/// more than one.
pub fn view_duration(title: &str) -> i64 {
    if title.contains("Video") {
        30
    } else if title.contains("Banner") {
        15
    } else if title.contains("Interactive") {
        20
    } else {
        45
    }
}

/// Calendar day number used for the daily reset, derived from cluster
/// time. Clamped so a pre-epoch clock cannot underflow.
pub fn day_number(unix_timestamp: i64) -> u64 {
    (unix_timestamp / SECONDS_PER_DAY).max(0) as u64
}

/// Render cents the way the page displays balances: two decimal places,
/// no thousands separators.
pub fn format_cents(amount: u64) -> String {
    format!(
        "{}.{:02}",
        amount / CENTS_PER_DOLLAR,
        amount % CENTS_PER_DOLLAR
    )
}

pub fn referral_link(base_url: &str, code: &str) -> String {
    format!("{base_url}?ref={code}")
}

/// Shared validation for the slot lists accepted by `initialize_board`
/// and `refresh_ad_board`.
pub fn validate_slots(slots: &[AdSlot]) -> Result<()> {
    require!(!slots.is_empty(), AdRewardsError::EmptyBoard);
    require!(
        slots.len() <= AdBoard::MAX_SLOTS,
        AdRewardsError::TooManySlots
    );
    for slot in slots {
        require!(
            !slot.title.is_empty() && slot.title.as_bytes().len() <= AdSlot::MAX_TITLE_LEN,
            AdRewardsError::InvalidTitle
        );
        require!(slot.reward > 0, AdRewardsError::InvalidRewardAmount);
    }
    Ok(())
}
