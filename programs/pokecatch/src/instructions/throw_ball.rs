use anchor_lang::prelude::*;
use orao_solana_vrf::program::OraoVrf;
use orao_solana_vrf::CONFIG_ACCOUNT_SEED;

use crate::constants::*;
use crate::errors::GameError;
use crate::events::ThrowAttempted;
use crate::state::*;
use crate::vrf::make_vrf_seed;

#[derive(Accounts)]
#[instruction(slot_index: u8)]
pub struct ThrowBall<'info> {
    #[account(mut)]
    pub player: Signer<'info>,

    #[account(
        mut,
        seeds = [GAME_CONFIG_SEED],
        bump = game_config.bump,
        constraint = game_config.is_initialized @ GameError::NotInitialized,
    )]
    pub game_config: Box<Account<'info, GameConfig>>,

    #[account(
        seeds = [POKEMON_SLOTS_SEED],
        bump = pokemon_slots.bump,
    )]
    pub pokemon_slots: Box<Account<'info, PokemonSlots>>,

    #[account(
        mut,
        seeds = [PLAYER_INV_SEED, player.key().as_ref()],
        bump = player_inventory.bump,
        constraint = player_inventory.player == player.key() @ GameError::Unauthorized,
    )]
    pub player_inventory: Account<'info, PlayerInventory>,

    /// Tracks this throw until consume_randomness resolves it.
    #[account(
        init,
        payer = player,
        space = VrfRequest::LEN,
        seeds = [VRF_REQ_SEED, game_config.vrf_counter.to_le_bytes().as_ref()],
        bump,
    )]
    pub vrf_request: Account<'info, VrfRequest>,

    /// ORAO VRF network state.
    /// CHECK: Validated by the ORAO VRF program CPI.
    #[account(
        mut,
        seeds = [CONFIG_ACCOUNT_SEED],
        bump,
        seeds::program = orao_vrf.key(),
    )]
    pub vrf_config: AccountInfo<'info>,

    /// ORAO randomness account, created by the CPI.
    /// CHECK: Created and validated by the ORAO VRF program.
    #[account(mut)]
    pub vrf_randomness: AccountInfo<'info>,

    /// ORAO fee treasury.
    /// CHECK: Validated by the ORAO VRF program CPI.
    #[account(mut)]
    pub vrf_treasury: AccountInfo<'info>,

    pub orao_vrf: Program<'info, OraoVrf>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<ThrowBall>, slot_index: u8, ball_type: u8) -> Result<()> {
    let slot_idx = slot_index as usize;
    require!(slot_idx < MAX_POKEMON_SLOTS, GameError::InvalidSlotIndex);
    require!(
        (ball_type as usize) < NUM_BALL_TYPES,
        GameError::InvalidBallType
    );

    let slot = ctx.accounts.pokemon_slots.slot(slot_idx)?;
    require!(slot.is_active, GameError::SlotNotActive);
    require!(
        slot.throw_attempts < MAX_THROW_ATTEMPTS,
        GameError::MaxAttemptsReached
    );
    let pokemon_id = slot.pokemon_id;

    // The ball is spent at request time, win or lose.
    let inventory = &mut ctx.accounts.player_inventory;
    inventory.spend_ball(ball_type as usize)?;
    inventory.total_throws = inventory
        .total_throws
        .checked_add(1)
        .ok_or(GameError::MathOverflow)?;

    let seed = make_vrf_seed(ctx.accounts.game_config.vrf_counter, VRF_TYPE_THROW);

    let cpi_ctx = CpiContext::new(
        ctx.accounts.orao_vrf.to_account_info(),
        orao_solana_vrf::cpi::accounts::RequestV2 {
            payer: ctx.accounts.player.to_account_info(),
            network_state: ctx.accounts.vrf_config.to_account_info(),
            treasury: ctx.accounts.vrf_treasury.to_account_info(),
            request: ctx.accounts.vrf_randomness.to_account_info(),
            system_program: ctx.accounts.system_program.to_account_info(),
        },
    );
    orao_solana_vrf::cpi::request_v2(cpi_ctx, seed)?;

    let vrf_request = &mut ctx.accounts.vrf_request;
    vrf_request.request_type = VRF_TYPE_THROW;
    vrf_request.player = ctx.accounts.player.key();
    vrf_request.slot_index = slot_index;
    vrf_request.ball_type = ball_type;
    vrf_request.seed = seed;
    vrf_request.is_fulfilled = false;
    vrf_request.bump = ctx.bumps.vrf_request;

    ctx.accounts.game_config.advance_vrf_counter()?;

    emit!(ThrowAttempted {
        thrower: ctx.accounts.player.key(),
        pokemon_id,
        ball_type,
        slot_index,
        vrf_seed: seed,
    });

    msg!(
        "{} threw a tier-{} ball at Pokemon {} in slot {}",
        ctx.accounts.player.key(),
        ball_type,
        pokemon_id,
        slot_index
    );

    Ok(())
}
