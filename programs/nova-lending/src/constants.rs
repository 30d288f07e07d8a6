//! Protocol constants and configuration parameters

/// Program-specific seed prefix for all PDAs
pub const PROGRAM_SEED_PREFIX: &[u8] = b"nova_v1";

// === Fixed-Point Constants ===

/// WAD = 1e18 (standard DeFi fixed-point)
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Basis points denominator
pub const BPS: u64 = 10_000;

// === Unit Constants ===

/// The stable unit (nUSD) is a 6-decimal token
pub const STABLE_DECIMALS: u8 = 6;

/// Scale factor from stable units to WAD (10^(18-6))
pub const STABLE_TO_WAD: u128 = 1_000_000_000_000;

/// Debt assets with more than 18 decimals cannot be normalized to WAD
pub const MAX_DEBT_DECIMALS: u8 = 18;

// === Time Constants ===

/// Seconds per year for annualized rate conversions
pub const SECONDS_PER_YEAR: u128 = 31_536_000;

/// Seconds per day, penalty accrual granularity
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Oracle prices older than this are rejected
pub const MAX_PRICE_AGE: i64 = 3_600;

/// Delay after the due date before penalties start accruing.
/// Distinct from the configurable grace period that gates seizure.
pub const PENALTY_DELAY: i64 = 3 * SECONDS_PER_DAY;

// === Configuration Limits ===

/// Collateral ratios below 100% are rejected
pub const MIN_COLLATERAL_RATIO_BPS: u64 = 10_000;

/// Maximum number of per-duration interest rate tiers
pub const MAX_RATE_TIERS: usize = 16;

// === Safe Math Constants ===

/// Maximum value that fits in u64
pub const MAX_U64: u128 = u64::MAX as u128;
