//! Collateral receipt registration
//!
//! The deposit flow that locks the underlying position lives outside
//! this program; its registry authority records receipts here so the
//! lending engine can read ownership and locked amounts.

use anchor_lang::prelude::*;
use crate::constants::PROGRAM_SEED_PREFIX;
use crate::errors::LendingError;
use crate::events::CollateralRegistered;
use crate::state::{CollateralReceipt, LendingConfig};

#[derive(Accounts)]
#[instruction(collateral_id: u64)]
pub struct RegisterCollateral<'info> {
    #[account(mut)]
    pub registry_authority: Signer<'info>,

    #[account(
        seeds = [PROGRAM_SEED_PREFIX, LendingConfig::SEED],
        bump = config.bump,
        constraint = config.registry_authority == registry_authority.key()
            @ LendingError::Unauthorized,
    )]
    pub config: Account<'info, LendingConfig>,

    #[account(
        init,
        payer = registry_authority,
        space = CollateralReceipt::space(),
        seeds = [
            PROGRAM_SEED_PREFIX,
            CollateralReceipt::SEED,
            &collateral_id.to_le_bytes(),
        ],
        bump,
    )]
    pub receipt: Account<'info, CollateralReceipt>,

    pub system_program: Program<'info, System>,
}

pub fn register_collateral(
    ctx: Context<RegisterCollateral>,
    collateral_id: u64,
    owner: Pubkey,
    amount: u128,
    controller: Pubkey,
) -> Result<()> {
    require!(amount > 0, LendingError::ZeroAmount);

    let receipt = &mut ctx.accounts.receipt;
    receipt.bump = ctx.bumps.receipt;
    receipt.id = collateral_id;
    receipt.owner = owner;
    receipt.amount = amount;
    receipt.active = true;
    receipt.in_custody = false;
    receipt.controller = controller;

    emit!(CollateralRegistered {
        collateral_id,
        owner,
        amount,
        controller,
    });
    Ok(())
}
