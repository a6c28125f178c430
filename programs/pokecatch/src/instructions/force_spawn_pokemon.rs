use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::GameError;
use crate::events::PokemonSpawned;
use crate::state::*;

#[derive(Accounts)]
pub struct ForceSpawnPokemon<'info> {
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
        mut,
        seeds = [POKEMON_SLOTS_SEED],
        bump = pokemon_slots.bump,
    )]
    pub pokemon_slots: Box<Account<'info, PokemonSlots>>,
}

pub fn handler(
    ctx: Context<ForceSpawnPokemon>,
    slot_index: u8,
    pos_x: u16,
    pos_y: u16,
) -> Result<()> {
    let slot_idx = slot_index as usize;
    require!(slot_idx < MAX_POKEMON_SLOTS, GameError::InvalidSlotIndex);
    require!(pos_x <= MAX_COORDINATE, GameError::InvalidCoordinate);
    require!(pos_y <= MAX_COORDINATE, GameError::InvalidCoordinate);
    require!(
        ctx.accounts.pokemon_slots.active_count < ctx.accounts.game_config.max_active_pokemon,
        GameError::MaxActivePokemonReached
    );

    let pokemon_id = ctx.accounts.game_config.next_pokemon_id()?;
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts
        .pokemon_slots
        .activate(slot_idx, pokemon_id, pos_x, pos_y, now)?;

    emit!(PokemonSpawned {
        pokemon_id,
        slot_index,
        pos_x,
        pos_y,
    });

    msg!(
        "Force spawned Pokemon {} in slot {} at ({}, {})",
        pokemon_id,
        slot_index,
        pos_x,
        pos_y
    );

    Ok(())
}
