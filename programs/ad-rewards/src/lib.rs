use anchor_lang::prelude::*;
use solana_security_txt::security_txt;

pub mod errors;
pub mod states;
pub mod utils;

use errors::AdRewardsError;
use states::*;

declare_id!("G8aNDgsPzh8bjd9jGMhYQBXLvHHpKQ8PWVdrRsJPug9G");

security_txt! {
    name: "AdEarn Rewards Program",
    project_url: "https://adearn.example",
    contacts: "mailto:security@adearn.example",
    policy: "#/blob/main/SECURITY.md",
    preferred_languages: "en",
    source_code: "unavailable"
}

#[program]
pub mod ad_rewards {
    use super::*;

    /// Publish the initial ad inventory.
    ///
    /// This should be called once by the ad authority after deploy.
    /// Every slot carries the reward amount (in cents) and the title the
    /// frontend attaches to its watch button; the title also selects the
    /// countdown length when a view is started.
    pub fn initialize_board(ctx: Context<InitializeBoard>, slots: Vec<AdSlot>) -> Result<()> {
        utils::validate_slots(&slots)?;

        let board = &mut ctx.accounts.board;
        board.authority = ctx.accounts.authority.key();
        board.last_refresh = Clock::get()?.unix_timestamp;
        board.refresh_count = 0;
        board.bump = ctx.bumps.board;

        msg!("Ad board initialized with {} slots", slots.len());
        board.slots = slots;

        Ok(())
    }

    /// Rotate the ad inventory.
    ///
    /// Counterpart of the page's periodic external ad-slot refresh: the
    /// authority may replace the slot list at most once per
    /// `BOARD_REFRESH_COOLDOWN` seconds. Sessions and in-flight views are
    /// not affected; a running view keeps the reward and title it
    /// snapshotted at start.
    pub fn refresh_ad_board(ctx: Context<RefreshAdBoard>, slots: Vec<AdSlot>) -> Result<()> {
        utils::validate_slots(&slots)?;

        let board = &mut ctx.accounts.board;
        let now = Clock::get()?.unix_timestamp;

        require!(
            now - board.last_refresh >= utils::BOARD_REFRESH_COOLDOWN,
            AdRewardsError::RefreshTooSoon
        );

        board.slots = slots;
        board.last_refresh = now;
        board.refresh_count = board
            .refresh_count
            .checked_add(1)
            .ok_or(AdRewardsError::Overflow)?;

        emit!(AdBoardRefreshed {
            authority: ctx.accounts.authority.key(),
            slot_count: board.slots.len() as u8,
            refresh_count: board.refresh_count,
            timestamp: now,
        });

        Ok(())
    }

    /// Create the caller's rewards session with default state.
    ///
    /// - All balances and counters start at zero.
    /// - The referral code is a fixed constant for the life of the session.
    /// - Exactly one demo activity is seeded so the activity list is never
    ///   rendered empty on first load.
    /// - The daily-reset marker starts at the current day, so a fresh
    ///   session never resets on the day it was created.
    pub fn initialize_session(ctx: Context<InitializeSession>) -> Result<()> {
        let session = &mut ctx.accounts.session;
        let now = Clock::get()?.unix_timestamp;

        session.bootstrap(ctx.accounts.user.key(), now, ctx.bumps.session);

        Ok(())
    }

    /// Begin watching the ad in `slot_index`.
    ///
    /// Creates the view countdown with a deadline selected by the slot
    /// title (Video 30s, Banner 15s, Interactive 20s, otherwise 45s). The
    /// view account doubles as the disabled state of that card's button:
    /// starting the same slot again fails at account creation, while
    /// views on other slots can run concurrently. There is no way to
    /// abort a started view.
    pub fn start_ad_view(ctx: Context<StartAdView>, slot_index: u8) -> Result<()> {
        let board = &ctx.accounts.board;
        let slot = board
            .slots
            .get(slot_index as usize)
            .ok_or(AdRewardsError::InvalidSlotIndex)?
            .clone();

        let now = Clock::get()?.unix_timestamp;
        let duration = utils::view_duration(&slot.title);

        let view = &mut ctx.accounts.view;
        view.session = ctx.accounts.session.key();
        view.slot_index = slot_index;
        view.title = slot.title;
        view.reward = slot.reward;
        view.started_at = now;
        view.deadline = now + duration;
        view.bump = ctx.bumps.view;

        emit!(AdViewStarted {
            user: ctx.accounts.user.key(),
            slot_index,
            title: view.title.clone(),
            reward: view.reward,
            started_at: now,
            deadline: view.deadline,
        });

        Ok(())
    }

    /// Finish a view whose countdown has elapsed and credit the reward.
    ///
    /// Atomically (within this instruction):
    /// - bumps `total_earnings` and `today_earnings` by the snapshotted
    ///   reward and `ads_watched` by 1
    /// - prepends an activity entry whose description embeds the reward
    ///   amount, truncating the list to its cap
    /// - emits the two cosmetic notifications (`AdViewCompleted` for the
    ///   toast, `RewardCredited` for the celebration animation)
    /// - closes the view account back to the user, re-enabling the card
    ///   (enforced by `close = user` in the accounts struct)
    ///
    /// Completing before the deadline fails and leaves the view intact.
    pub fn complete_ad_view(ctx: Context<CompleteAdView>) -> Result<()> {
        let session = &mut ctx.accounts.session;
        let view = &ctx.accounts.view;

        let now = Clock::get()?.unix_timestamp;
        require!(now >= view.deadline, AdRewardsError::AdStillInProgress);

        session.credit(view.reward)?;

        let description = format!(
            "{} Watched (+${})",
            view.title,
            utils::format_cents(view.reward)
        );
        session.record_activity(description, view.reward, now);

        emit!(AdViewCompleted {
            user: ctx.accounts.user.key(),
            slot_index: view.slot_index,
            title: view.title.clone(),
            reward: view.reward,
            timestamp: now,
        });

        emit!(RewardCredited {
            user: ctx.accounts.user.key(),
            total_earnings: session.total_earnings,
            today_earnings: session.today_earnings,
            ads_watched: session.ads_watched,
            timestamp: now,
        });

        Ok(())
    }

    /// Zero the daily counter when the calendar day has changed.
    ///
    /// Mirrors the page's load-time check: nothing triggers this
    /// implicitly, so a session left untouched across midnight keeps its
    /// daily counter until the next explicit check. Same-day calls are
    /// silent no-ops. `total_earnings` is never touched.
    pub fn check_daily_reset(ctx: Context<CheckDailyReset>) -> Result<()> {
        let session = &mut ctx.accounts.session;
        let now = Clock::get()?.unix_timestamp;

        let previous = session.today_earnings;
        if session.maybe_daily_reset(now) {
            emit!(DailyReset {
                user: ctx.accounts.user.key(),
                previous_today_earnings: previous,
                reset_day: session.last_reset_day,
                timestamp: now,
            });
        }

        Ok(())
    }

    /// Build and publish the referral link for this session.
    ///
    /// The link is `base_url + "?ref=" + referral_code`. Copying it to a
    /// clipboard or handing it to a native share sheet is a client
    /// concern; the chain surface is the code stored on the session plus
    /// the emitted event.
    pub fn share_referral_link(ctx: Context<ShareReferralLink>, base_url: String) -> Result<()> {
        require!(
            base_url.as_bytes().len() <= utils::MAX_BASE_URL_LEN,
            AdRewardsError::BaseUrlTooLong
        );

        let session = &ctx.accounts.session;
        let link = utils::referral_link(&base_url, &session.referral_code);

        emit!(ReferralLinkShared {
            user: ctx.accounts.user.key(),
            referral_code: session.referral_code.clone(),
            link,
        });

        Ok(())
    }

    /// Request a withdrawal of the accumulated balance.
    ///
    /// Below the $10.00 minimum this fails with
    /// `WithdrawalBelowMinimum`. At or above it, the request is only
    /// acknowledged: no transfer happens, nothing is recorded, and no
    /// session field changes either way. The balance is read from the
    /// session account, not from whatever the page happens to display.
    pub fn request_withdrawal(ctx: Context<RequestWithdrawal>) -> Result<()> {
        let session = &ctx.accounts.session;

        require!(
            session.can_withdraw(),
            AdRewardsError::WithdrawalBelowMinimum
        );

        let now = Clock::get()?.unix_timestamp;
        msg!(
            "Withdrawal request submitted for ${} (simulated, no transfer)",
            utils::format_cents(session.total_earnings)
        );

        emit!(WithdrawalRequested {
            user: ctx.accounts.user.key(),
            amount: session.total_earnings,
            timestamp: now,
        });

        Ok(())
    }

    /// Publish the full activity list for the history view. Read-only.
    pub fn show_history(ctx: Context<ShowSession>) -> Result<()> {
        let session = &ctx.accounts.session;

        emit!(EarningsHistory {
            user: ctx.accounts.user.key(),
            activities: session.activities.clone(),
        });

        Ok(())
    }

    /// Publish the profile summary. Read-only.
    pub fn show_profile(ctx: Context<ShowSession>) -> Result<()> {
        let session = &ctx.accounts.session;

        emit!(ProfileSnapshot {
            user: ctx.accounts.user.key(),
            total_earnings: session.total_earnings,
            ads_watched: session.ads_watched,
            referral_code: session.referral_code.clone(),
        });

        Ok(())
    }
}

// ---------------------------
// Accounts: Instructions
// ---------------------------

#[derive(Accounts)]
pub struct InitializeBoard<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + AdBoard::SIZE,
        seeds = [b"ad_board"],
        bump
    )]
    pub board: Account<'info, AdBoard>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct RefreshAdBoard<'info> {
    #[account(
        mut,
        seeds = [b"ad_board"],
        bump = board.bump,
        has_one = authority @ AdRewardsError::NotBoardAuthority
    )]
    pub board: Account<'info, AdBoard>,

    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct InitializeSession<'info> {
    /// Session PDA. One per wallet.
    #[account(
        init,
        payer = user,
        space = 8 + UserSession::SIZE,
        seeds = [
            b"session",
            user.key().as_ref(),
        ],
        bump
    )]
    pub session: Account<'info, UserSession>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(slot_index: u8)]
pub struct StartAdView<'info> {
    #[account(
        seeds = [b"ad_board"],
        bump = board.bump
    )]
    pub board: Account<'info, AdBoard>,

    #[account(
        seeds = [
            b"session",
            user.key().as_ref(),
        ],
        bump = session.bump
    )]
    pub session: Account<'info, UserSession>,

    /// View PDA. One PDA per (session, slot_index), so a card that is
    /// already counting down cannot be started again.
    #[account(
        init,
        payer = user,
        space = 8 + AdView::SIZE,
        seeds = [
            b"ad_view",
            session.key().as_ref(),
            &[slot_index],
        ],
        bump
    )]
    pub view: Account<'info, AdView>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct CompleteAdView<'info> {
    #[account(
        mut,
        seeds = [
            b"session",
            user.key().as_ref(),
        ],
        bump = session.bump
    )]
    pub session: Account<'info, UserSession>,

    /// View to complete.
    ///
    /// `close = user` burns the view account after the instruction
    /// completes successfully, sending the rent back to the user.
    #[account(
        mut,
        has_one = session @ AdRewardsError::ViewSessionMismatch,
        close = user
    )]
    pub view: Account<'info, AdView>,

    #[account(mut)]
    pub user: Signer<'info>,
}

#[derive(Accounts)]
pub struct CheckDailyReset<'info> {
    #[account(
        mut,
        seeds = [
            b"session",
            user.key().as_ref(),
        ],
        bump = session.bump
    )]
    pub session: Account<'info, UserSession>,

    pub user: Signer<'info>,
}

#[derive(Accounts)]
pub struct ShareReferralLink<'info> {
    #[account(
        seeds = [
            b"session",
            user.key().as_ref(),
        ],
        bump = session.bump
    )]
    pub session: Account<'info, UserSession>,

    pub user: Signer<'info>,
}

/// Withdrawal never mutates the session, so the account is not `mut`.
#[derive(Accounts)]
pub struct RequestWithdrawal<'info> {
    #[account(
        seeds = [
            b"session",
            user.key().as_ref(),
        ],
        bump = session.bump
    )]
    pub session: Account<'info, UserSession>,

    pub user: Signer<'info>,
}

/// Shared by the read-only history and profile views.
#[derive(Accounts)]
pub struct ShowSession<'info> {
    #[account(
        seeds = [
            b"session",
            user.key().as_ref(),
        ],
        bump = session.bump
    )]
    pub session: Account<'info, UserSession>,

    pub user: Signer<'info>,
}

// ---------------------------
// Events
// ---------------------------

/// Emitted when a countdown begins so the frontend can disable the card
/// and render the ticking counter client-side.
#[event]
pub struct AdViewStarted {
    pub user: Pubkey,
    pub slot_index: u8,
    pub title: String,
    pub reward: u64,
    pub started_at: i64,
    pub deadline: i64,
}

/// The "you earned $X" toast.
#[event]
pub struct AdViewCompleted {
    pub user: Pubkey,
    pub slot_index: u8,
    pub title: String,
    pub reward: u64,
    pub timestamp: i64,
}

/// The celebration animation, carrying the fresh balances.
#[event]
pub struct RewardCredited {
    pub user: Pubkey,
    pub total_earnings: u64,
    pub today_earnings: u64,
    pub ads_watched: u64,
    pub timestamp: i64,
}

#[event]
pub struct DailyReset {
    pub user: Pubkey,
    pub previous_today_earnings: u64,
    pub reset_day: u64,
    pub timestamp: i64,
}

#[event]
pub struct ReferralLinkShared {
    pub user: Pubkey,
    pub referral_code: String,
    pub link: String,
}

#[event]
pub struct WithdrawalRequested {
    pub user: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct EarningsHistory {
    pub user: Pubkey,
    pub activities: Vec<Activity>,
}

#[event]
pub struct ProfileSnapshot {
    pub user: Pubkey,
    pub total_earnings: u64,
    pub ads_watched: u64,
    pub referral_code: String,
}

#[event]
pub struct AdBoardRefreshed {
    pub authority: Pubkey,
    pub slot_count: u8,
    pub refresh_count: u64,
    pub timestamp: i64,
}
