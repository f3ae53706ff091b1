use anchor_lang::prelude::*;

#[error_code]
pub enum AdRewardsError {
    #[msg("Ad slot index is out of range")]
    InvalidSlotIndex,
    #[msg("Ad view countdown has not finished yet")]
    AdStillInProgress,
    #[msg("Ad view does not belong to this session")]
    ViewSessionMismatch,
    #[msg("Withdrawal minimum is $10.00")]
    WithdrawalBelowMinimum,
    #[msg("Arithmetic overflow")]
    Overflow,
    #[msg("Ad title is empty or too long")]
    InvalidTitle,
    #[msg("Ad reward must be greater than zero")]
    InvalidRewardAmount,
    #[msg("Ad board must have at least one slot")]
    EmptyBoard,
    #[msg("Too many ad slots")]
    TooManySlots,
    #[msg("Ad board was refreshed too recently")]
    RefreshTooSoon,
    #[msg("Signer is not the board authority")]
    NotBoardAuthority,
    #[msg("Referral base URL is too long")]
    BaseUrlTooLong,
}
