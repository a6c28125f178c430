use anchor_lang::prelude::*;
use orao_solana_vrf::program::OraoVrf;
use orao_solana_vrf::CONFIG_ACCOUNT_SEED;

use crate::constants::*;
use crate::errors::GameError;
use crate::state::*;
use crate::vrf::make_vrf_seed;

#[derive(Accounts)]
#[instruction(slot_index: u8)]
pub struct SpawnPokemon<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [GAME_CONFIG_SEED],
        bump = game_config.bump,
        constraint = game_config.is_initialized @ GameError::NotInitialized,
        constraint = game_config.is_authority(&authority.key()) @ GameError::Unauthorized,
    )]
    pub game_config: Box<Account<'info, GameConfig>>,

    #[account(
        seeds = [POKEMON_SLOTS_SEED],
        bump = pokemon_slots.bump,
    )]
    pub pokemon_slots: Box<Account<'info, PokemonSlots>>,

    /// Tracks this spawn request until consume_randomness resolves it.
    #[account(
        init,
        payer = authority,
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

pub fn handler(ctx: Context<SpawnPokemon>, slot_index: u8) -> Result<()> {
    let slot_idx = slot_index as usize;
    require!(slot_idx < MAX_POKEMON_SLOTS, GameError::InvalidSlotIndex);

    let pokemon_slots = &ctx.accounts.pokemon_slots;
    require!(
        !pokemon_slots.slots[slot_idx].is_active,
        GameError::SlotAlreadyOccupied
    );
    require!(
        pokemon_slots.active_count < ctx.accounts.game_config.max_active_pokemon,
        GameError::MaxActivePokemonReached
    );

    let seed = make_vrf_seed(ctx.accounts.game_config.vrf_counter, VRF_TYPE_SPAWN);

    let cpi_ctx = CpiContext::new(
        ctx.accounts.orao_vrf.to_account_info(),
        orao_solana_vrf::cpi::accounts::RequestV2 {
            payer: ctx.accounts.authority.to_account_info(),
            network_state: ctx.accounts.vrf_config.to_account_info(),
            treasury: ctx.accounts.vrf_treasury.to_account_info(),
            request: ctx.accounts.vrf_randomness.to_account_info(),
            system_program: ctx.accounts.system_program.to_account_info(),
        },
    );
    orao_solana_vrf::cpi::request_v2(cpi_ctx, seed)?;

    let vrf_request = &mut ctx.accounts.vrf_request;
    vrf_request.request_type = VRF_TYPE_SPAWN;
    vrf_request.player = ctx.accounts.authority.key();
    vrf_request.slot_index = slot_index;
    vrf_request.ball_type = 0;
    vrf_request.seed = seed;
    vrf_request.is_fulfilled = false;
    vrf_request.bump = ctx.bumps.vrf_request;

    ctx.accounts.game_config.advance_vrf_counter()?;

    msg!("VRF spawn requested for slot {}, seed {:?}", slot_index, seed);

    Ok(())
}
