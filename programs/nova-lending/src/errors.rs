use anchor_lang::prelude::*;

#[error_code]
pub enum LendingError {
    // === Authorization Errors (6000-6009) ===
    #[msg("Caller is not authorized to perform this action")]
    Unauthorized = 6000,

    #[msg("Caller does not own the collateral receipt")]
    NotReceiptOwner = 6001,

    // === Input Validation Errors (6010-6029) ===
    #[msg("Amount must be greater than zero")]
    ZeroAmount = 6010,

    #[msg("Debt asset is not enabled for borrowing")]
    AssetNotEnabled = 6011,

    #[msg("No interest rate tier configured for this duration")]
    RateTierNotFound = 6012,

    #[msg("Rate tier table is full")]
    RateTierTableFull = 6013,

    #[msg("Collateral ratios must satisfy 10000 <= liquidation < target")]
    InvalidCollateralRatios = 6014,

    #[msg("Loan duration must be greater than zero")]
    InvalidDuration = 6015,

    #[msg("Debt asset decimals exceed the supported maximum of 18")]
    UnsupportedDecimals = 6016,

    #[msg("Stable mint must have 6 decimals")]
    InvalidStableMint = 6017,

    #[msg("Account mint does not match the loan's debt asset")]
    WrongDebtMint = 6018,

    // === Receipt / Registry Errors (6030-6039) ===
    #[msg("Collateral receipt is not active")]
    ReceiptInactive = 6030,

    #[msg("Collateral receipt is already held in custody")]
    ReceiptInCustody = 6031,

    #[msg("Collateral receipt is not held in custody")]
    ReceiptNotInCustody = 6032,

    // === Loan State Errors (6040-6049) ===
    #[msg("A loan is already active for this collateral")]
    LoanAlreadyActive = 6040,

    #[msg("No active loan for this collateral")]
    LoanNotActive = 6041,

    #[msg("Borrow amount exceeds the collateral ceiling")]
    ExceedsBorrowCeiling = 6042,

    #[msg("Loan is past the grace period; repayment is closed")]
    LoanPastGracePeriod = 6043,

    #[msg("Loan is not past the grace period; seizure unavailable")]
    LoanNotPastGracePeriod = 6044,

    // === Oracle Errors (6050-6059) ===
    #[msg("Oracle price is stale")]
    PriceStale = 6050,

    #[msg("Oracle returned a zero price")]
    PriceZero = 6051,

    // === Liquidation Errors (6060-6069) ===
    #[msg("Position is healthy, cannot liquidate")]
    PositionHealthy = 6060,

    #[msg("Target ratio leaves no room for the liquidation bonus")]
    LiquidationInfeasible = 6061,

    #[msg("Position is already at or above the target ratio")]
    PositionAboveTarget = 6062,

    #[msg("Computed liquidation repay amount is zero")]
    LiquidationTooSmall = 6063,

    #[msg("Computed liquidation repay amount exceeds outstanding principal")]
    LiquidationExceedsPrincipal = 6064,

    #[msg("Computed liquidation repay amount exceeds the caller's cap")]
    ExceedsMaxRepay = 6065,

    #[msg("Liquidation reward exceeds the remaining collateral")]
    RewardExceedsCollateral = 6066,

    // === Pause Errors (6070-6079) ===
    #[msg("Protocol is paused")]
    ProtocolPaused = 6070,

    // === Math Errors (6080-6089) ===
    #[msg("Math overflow")]
    MathOverflow = 6080,

    #[msg("Math underflow")]
    MathUnderflow = 6081,

    #[msg("Division by zero")]
    DivisionByZero = 6082,

    #[msg("Amount exceeds u64 maximum")]
    AmountOverflow = 6083,
}
