//! Per-debt-asset configuration account
//!
//! One account per mint allowed as a borrow asset. Decimals are cached
//! at enablement; mints above 18 decimals are rejected there.

use anchor_lang::prelude::*;
use crate::constants::PROGRAM_SEED_PREFIX;

/// Borrowable asset record
///
/// PDA Seeds: [PROGRAM_SEED_PREFIX, b"debt_asset", mint]
#[account]
pub struct DebtAssetConfig {
    /// PDA bump seed
    pub bump: u8,

    /// The debt token mint
    pub mint: Pubkey,

    /// Debt token decimals (cached)
    pub decimals: u8,

    /// Whether borrowing this asset is currently allowed
    pub enabled: bool,

    /// Bump for this asset's vault PDA
    pub vault_bump: u8,

    /// Reserved for future use
    pub reserved: [u8; 32],
}

impl DebtAssetConfig {
    pub const SEED: &'static [u8] = b"debt_asset";
    pub const VAULT_SEED: &'static [u8] = b"debt_vault";

    pub fn space() -> usize {
        8 +     // discriminator
        1 +     // bump
        32 +    // mint
        1 +     // decimals
        1 +     // enabled
        1 +     // vault_bump
        32      // reserved
    }
}

/// Derive debt asset config PDA
pub fn derive_debt_asset(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[PROGRAM_SEED_PREFIX, DebtAssetConfig::SEED, mint.as_ref()],
        program_id,
    )
}

/// Derive debt vault PDA
pub fn derive_debt_vault(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[PROGRAM_SEED_PREFIX, DebtAssetConfig::VAULT_SEED, mint.as_ref()],
        program_id,
    )
}
