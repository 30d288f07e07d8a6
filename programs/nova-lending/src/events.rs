use anchor_lang::prelude::*;

// === Admin Events ===

#[event]
pub struct LendingInitialized {
    pub admin: Pubkey,
    pub registry_authority: Pubkey,
    pub stable_mint: Pubkey,
}

#[event]
pub struct AdminTransferStarted {
    pub current_admin: Pubkey,
    pub pending_admin: Pubkey,
}

#[event]
pub struct AdminTransferred {
    pub previous_admin: Pubkey,
    pub new_admin: Pubkey,
}

#[event]
pub struct PausedSet {
    pub paused: bool,
}

#[event]
pub struct CollateralRatiosSet {
    pub liquidation_ratio_bps: u64,
    pub target_ratio_bps: u64,
}

#[event]
pub struct LiquidationBonusSet {
    pub bonus_bps: u64,
}

#[event]
pub struct PenaltyRatioSet {
    pub penalty_ratio_bps: u64,
}

#[event]
pub struct GracePeriodSet {
    pub grace_period: i64,
}

#[event]
pub struct RateTierSet {
    pub duration: i64,
    pub rate_bps: u64,
}

#[event]
pub struct DebtAssetEnabled {
    pub mint: Pubkey,
    pub decimals: u8,
}

#[event]
pub struct DebtAssetStatusSet {
    pub mint: Pubkey,
    pub enabled: bool,
}

// === Oracle Events ===

#[event]
pub struct PriceFeedInitialized {
    pub mint: Pubkey,
    pub authority: Pubkey,
}

#[event]
pub struct PricePosted {
    pub mint: Pubkey,
    pub price: u128,
    pub timestamp: i64,
}

// === Registry Events ===

#[event]
pub struct CollateralRegistered {
    pub collateral_id: u64,
    pub owner: Pubkey,
    pub amount: u128,
    pub controller: Pubkey,
}

/// Notifies the collateral-accounting controller that a liquidation
/// reduced the locked amount backing this receipt.
#[event]
pub struct CollateralReduced {
    pub collateral_id: u64,
    pub controller: Pubkey,
    pub new_remaining_amount: u128,
}

// === Loan Events ===

#[event]
pub struct Borrowed {
    pub collateral_id: u64,
    pub borrower: Pubkey,
    pub debt_mint: Pubkey,
    pub amount: u128,
    pub duration: i64,
    pub rate_bps: u64,
    pub end_time: i64,
}

#[event]
pub struct Repaid {
    pub collateral_id: u64,
    pub payer: Pubkey,
    pub penalty_paid: u128,
    pub interest_paid: u128,
    pub principal_paid: u128,
    pub remaining_principal: u128,
}

#[event]
pub struct LoanClosed {
    pub collateral_id: u64,
    pub borrower: Pubkey,
}

#[event]
pub struct AccrualSettled {
    pub collateral_id: u64,
    pub accrued_interest: u128,
    pub accrued_penalty: u128,
}

// === Liquidation Events ===

#[event]
pub struct Liquidated {
    pub collateral_id: u64,
    pub liquidator: Pubkey,
    pub borrower: Pubkey,
    pub repaid_amount: u128,
    pub reward_stable: u128,
    pub remaining_principal: u128,
    pub remaining_collateral: u128,
}

#[event]
pub struct OverdueCollateralSeized {
    pub collateral_id: u64,
    pub admin: Pubkey,
    pub borrower: Pubkey,
}
