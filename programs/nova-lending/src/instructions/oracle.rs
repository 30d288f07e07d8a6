//! Price feed maintenance instructions

use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;
use crate::constants::PROGRAM_SEED_PREFIX;
use crate::errors::LendingError;
use crate::events::{PriceFeedInitialized, PricePosted};
use crate::interfaces::PriceFeed;
use crate::state::LendingConfig;

#[derive(Accounts)]
pub struct InitPriceFeed<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        seeds = [PROGRAM_SEED_PREFIX, LendingConfig::SEED],
        bump = config.bump,
        constraint = config.admin == admin.key() @ LendingError::Unauthorized,
    )]
    pub config: Account<'info, LendingConfig>,

    #[account(
        init,
        payer = admin,
        space = PriceFeed::space(),
        seeds = [PROGRAM_SEED_PREFIX, PriceFeed::SEED, mint.key().as_ref()],
        bump,
    )]
    pub price_feed: Account<'info, PriceFeed>,

    pub mint: InterfaceAccount<'info, Mint>,

    pub system_program: Program<'info, System>,
}

pub fn init_price_feed(ctx: Context<InitPriceFeed>, authority: Pubkey) -> Result<()> {
    let feed = &mut ctx.accounts.price_feed;
    feed.bump = ctx.bumps.price_feed;
    feed.mint = ctx.accounts.mint.key();
    feed.authority = authority;
    feed.price = 0;
    feed.updated_at = 0;

    emit!(PriceFeedInitialized {
        mint: feed.mint,
        authority,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct PostPrice<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [PROGRAM_SEED_PREFIX, PriceFeed::SEED, price_feed.mint.as_ref()],
        bump = price_feed.bump,
        constraint = price_feed.authority == authority.key() @ LendingError::Unauthorized,
    )]
    pub price_feed: Account<'info, PriceFeed>,
}

pub fn post_price(ctx: Context<PostPrice>, price: u128) -> Result<()> {
    require!(price > 0, LendingError::PriceZero);

    let now = Clock::get()?.unix_timestamp;
    let feed = &mut ctx.accounts.price_feed;
    feed.price = price;
    feed.updated_at = now;

    emit!(PricePosted {
        mint: feed.mint,
        price,
        timestamp: now,
    });
    Ok(())
}
