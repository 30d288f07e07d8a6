//! Price feed interface
//!
//! Each debt asset has one feed holding the stable-unit value of a
//! whole debt unit, WAD-scaled (e.g. 1e18 = exactly 1 nUSD per unit).
//! Reads fail closed: a zero price or a price older than MAX_PRICE_AGE
//! rejects the whole operation rather than quoting a default.

use anchor_lang::prelude::*;
use crate::constants::{MAX_PRICE_AGE, PROGRAM_SEED_PREFIX};
use crate::errors::LendingError;

/// Posted price for one debt asset
///
/// PDA Seeds: [PROGRAM_SEED_PREFIX, b"price_feed", mint]
#[account]
pub struct PriceFeed {
    /// PDA bump seed
    pub bump: u8,

    /// Debt asset this feed prices
    pub mint: Pubkey,

    /// Authority allowed to post updates
    pub authority: Pubkey,

    /// Stable units per whole debt unit, WAD-scaled
    pub price: u128,

    /// Unix time of the last post
    pub updated_at: i64,

    /// Reserved for future use
    pub reserved: [u8; 32],
}

impl PriceFeed {
    pub const SEED: &'static [u8] = b"price_feed";

    pub fn space() -> usize {
        8 +     // discriminator
        1 +     // bump
        32 +    // mint
        32 +    // authority
        16 +    // price
        8 +     // updated_at
        32      // reserved
    }

    /// The current price, or an error if it is zero or stale
    pub fn validated_price(&self, now: i64) -> Result<u128> {
        require!(self.price > 0, LendingError::PriceZero);
        require!(
            now.saturating_sub(self.updated_at) <= MAX_PRICE_AGE,
            LendingError::PriceStale
        );
        Ok(self.price)
    }
}

/// Derive price feed PDA
pub fn derive_price_feed(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[PROGRAM_SEED_PREFIX, PriceFeed::SEED, mint.as_ref()],
        program_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WAD;

    fn feed(price: u128, updated_at: i64) -> PriceFeed {
        PriceFeed {
            bump: 0,
            mint: Pubkey::default(),
            authority: Pubkey::default(),
            price,
            updated_at,
            reserved: [0u8; 32],
        }
    }

    #[test]
    fn test_fresh_price_passes() {
        let f = feed(WAD, 1_000);
        assert_eq!(f.validated_price(1_000 + MAX_PRICE_AGE).unwrap(), WAD);
    }

    #[test]
    fn test_stale_price_fails_closed() {
        let f = feed(WAD, 1_000);
        assert!(f.validated_price(1_000 + MAX_PRICE_AGE + 1).is_err());
    }

    #[test]
    fn test_zero_price_fails_closed() {
        let f = feed(0, 1_000);
        assert!(f.validated_price(1_000).is_err());
    }
}
