use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::GameError;
use crate::events::PokemonRelocated;
use crate::state::*;

#[derive(Accounts)]
pub struct RepositionPokemon<'info> {
    pub authority: Signer<'info>,

    #[account(
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
    ctx: Context<RepositionPokemon>,
    slot_index: u8,
    new_pos_x: u16,
    new_pos_y: u16,
) -> Result<()> {
    let slot_idx = slot_index as usize;
    require!(slot_idx < MAX_POKEMON_SLOTS, GameError::InvalidSlotIndex);
    require!(new_pos_x <= MAX_COORDINATE, GameError::InvalidCoordinate);
    require!(new_pos_y <= MAX_COORDINATE, GameError::InvalidCoordinate);

    let pokemon_slots = &mut ctx.accounts.pokemon_slots;
    require!(
        pokemon_slots.slots[slot_idx].is_active,
        GameError::SlotNotActive
    );

    let pokemon_id = pokemon_slots.slots[slot_idx].pokemon_id;
    let (old_x, old_y) = pokemon_slots.relocate(slot_idx, new_pos_x, new_pos_y);

    emit!(PokemonRelocated {
        pokemon_id,
        slot_index,
        old_x,
        old_y,
        new_x: new_pos_x,
        new_y: new_pos_y,
    });

    msg!(
        "Repositioned Pokemon {} from ({}, {}) to ({}, {})",
        pokemon_id,
        old_x,
        old_y,
        new_pos_x,
        new_pos_y
    );

    Ok(())
}
