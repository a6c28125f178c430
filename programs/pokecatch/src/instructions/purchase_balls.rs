use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::errors::GameError;
use crate::events::BallPurchased;
use crate::state::*;

#[derive(Accounts)]
pub struct PurchaseBalls<'info> {
    #[account(mut)]
    pub player: Signer<'info>,

    #[account(
        mut,
        seeds = [GAME_CONFIG_SEED],
        bump = game_config.bump,
        constraint = game_config.is_initialized @ GameError::NotInitialized,
    )]
    pub game_config: Box<Account<'info, GameConfig>>,

    /// Player's SolBalls account, debited for the purchase.
    #[account(
        mut,
        constraint = player_token_account.owner == player.key(),
        constraint = player_token_account.mint == game_config.solballs_mint,
    )]
    pub player_token_account: Account<'info, TokenAccount>,

    /// Game revenue account (GameConfig PDA's ATA).
    #[account(
        mut,
        constraint = game_solballs_account.owner == game_config.key(),
        constraint = game_solballs_account.mint == game_config.solballs_mint,
    )]
    pub game_solballs_account: Account<'info, TokenAccount>,

    /// Created lazily on the player's first purchase.
    #[account(
        init_if_needed,
        payer = player,
        space = PlayerInventory::LEN,
        seeds = [PLAYER_INV_SEED, player.key().as_ref()],
        bump,
    )]
    pub player_inventory: Account<'info, PlayerInventory>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

/// Total purchase cost, guarded against overflow.
fn purchase_cost(price_per_ball: u64, quantity: u32) -> Result<u64> {
    price_per_ball
        .checked_mul(quantity as u64)
        .ok_or_else(|| error!(GameError::MathOverflow))
}

pub fn handler(ctx: Context<PurchaseBalls>, ball_type: u8, quantity: u32) -> Result<()> {
    require!(
        (ball_type as usize) < NUM_BALL_TYPES,
        GameError::InvalidBallType
    );
    require!(quantity > 0, GameError::ZeroQuantity);
    require!(
        quantity <= MAX_PURCHASE_QUANTITY,
        GameError::PurchaseExceedsMax
    );

    let price = ctx.accounts.game_config.ball_prices[ball_type as usize];
    let total_cost = purchase_cost(price, quantity)?;

    require!(
        ctx.accounts.player_token_account.amount >= total_cost,
        GameError::InsufficientSolBalls
    );

    let transfer_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        Transfer {
            from: ctx.accounts.player_token_account.to_account_info(),
            to: ctx.accounts.game_solballs_account.to_account_info(),
            authority: ctx.accounts.player.to_account_info(),
        },
    );
    token::transfer(transfer_ctx, total_cost)?;

    let inventory = &mut ctx.accounts.player_inventory;
    if inventory.player == Pubkey::default() {
        // First purchase for this wallet.
        inventory.player = ctx.accounts.player.key();
        inventory.bump = ctx.bumps.player_inventory;
    }
    inventory.add_balls(ball_type as usize, quantity)?;

    let game_config = &mut ctx.accounts.game_config;
    game_config.total_revenue = game_config
        .total_revenue
        .checked_add(total_cost)
        .ok_or(GameError::MathOverflow)?;

    emit!(BallPurchased {
        buyer: ctx.accounts.player.key(),
        ball_type,
        quantity,
        total_cost,
    });

    msg!(
        "{} bought {} tier-{} balls for {} SolBalls",
        ctx.accounts.player.key(),
        quantity,
        ball_type,
        total_cost
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_scales_price_by_quantity() {
        assert_eq!(purchase_cost(1_000_000_000, 3).unwrap(), 3_000_000_000);
        assert_eq!(
            purchase_cost(49_900_000_000, MAX_PURCHASE_QUANTITY).unwrap(),
            4_940_100_000_000
        );
    }

    #[test]
    fn cost_overflow_is_surfaced() {
        let err = purchase_cost(u64::MAX, 2).unwrap_err();
        assert_eq!(err, error!(GameError::MathOverflow));
    }

    #[test]
    fn saturated_inventory_fails_instead_of_wrapping() {
        let mut inventory = PlayerInventory {
            player: Pubkey::new_unique(),
            balls: [u32::MAX, 0, 0, 0],
            total_purchased: 0,
            total_throws: 0,
            total_catches: 0,
            bump: 255,
        };
        let err = inventory.add_balls(0, 1).unwrap_err();
        assert_eq!(err, error!(GameError::MathOverflow));
        assert_eq!(inventory.balls[0], u32::MAX);
        assert_eq!(inventory.total_purchased, 0);
    }

    #[test]
    fn add_balls_credits_tier_and_lifetime_counter() {
        let mut inventory = PlayerInventory {
            player: Pubkey::new_unique(),
            balls: [0; 4],
            total_purchased: 0,
            total_throws: 0,
            total_catches: 0,
            bump: 255,
        };
        inventory.add_balls(2, 5).unwrap();
        inventory.add_balls(2, 4).unwrap();
        assert_eq!(inventory.balls, [0, 0, 9, 0]);
        assert_eq!(inventory.total_purchased, 9);
    }
}
