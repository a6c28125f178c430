use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, Transfer};
use orao_solana_vrf::state::RandomnessAccountData;
use orao_solana_vrf::RANDOMNESS_ACCOUNT_SEED;

use crate::constants::*;
use crate::errors::GameError;
use crate::events::*;
use crate::state::*;
use crate::vrf;

#[derive(Accounts)]
pub struct ConsumeRandomness<'info> {
    /// Anyone can crank this, typically the player or a backend service.
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        mut,
        seeds = [GAME_CONFIG_SEED],
        bump = game_config.bump,
    )]
    pub game_config: Box<Account<'info, GameConfig>>,

    #[account(
        mut,
        seeds = [POKEMON_SLOTS_SEED],
        bump = pokemon_slots.bump,
    )]
    pub pokemon_slots: Box<Account<'info, PokemonSlots>>,

    #[account(
        mut,
        seeds = [NFT_VAULT_SEED],
        bump = nft_vault.bump,
    )]
    pub nft_vault: Box<Account<'info, NftVault>>,

    #[account(
        mut,
        constraint = !vrf_request.is_fulfilled @ GameError::VrfAlreadyFulfilled,
    )]
    pub vrf_request: Account<'info, VrfRequest>,

    /// ORAO randomness account. The seeds re-derive its address from
    /// the seed stored in vrf_request under the ORAO program, so a
    /// mismatched account cannot pass.
    /// CHECK: Address is fixed by the seed derivation; the data is a
    /// tagged union deserialized manually in the handler.
    #[account(
        seeds = [RANDOMNESS_ACCOUNT_SEED, vrf_request.seed.as_ref()],
        bump,
        seeds::program = orao_solana_vrf::ID,
    )]
    pub vrf_randomness: AccountInfo<'info>,

    /// Lifetime stats for throw resolutions. When supplied it must
    /// belong to the player who threw.
    #[account(
        mut,
        constraint = player_inventory.player == vrf_request.player @ GameError::Unauthorized,
    )]
    pub player_inventory: Option<Account<'info, PlayerInventory>>,

    /// The winning wallet, when the caller chooses to pass it along.
    /// CHECK: Only ever compared against the request's player.
    #[account(constraint = winner.key() == vrf_request.player @ GameError::Unauthorized)]
    pub winner: Option<AccountInfo<'info>>,

    pub token_program: Program<'info, Token>,
    // remaining_accounts: {mint, vault token account, recipient token
    // account} triples, one per vault candidate. Recipient accounts
    // must exist before this instruction runs.
}

/// The state transition a throw resolution must apply, decided purely
/// from the randomness buffer, the tier's catch rate, and the miss
/// count so far.
#[derive(Debug, PartialEq, Eq)]
pub enum ThrowOutcome {
    Caught,
    Missed { attempts: u8 },
    MissedAndRelocated { new_x: u16, new_y: u16 },
}

pub fn resolve_throw_outcome(
    randomness: &[u8; 64],
    catch_rate: u8,
    attempts_before: u8,
) -> ThrowOutcome {
    if vrf::catch_roll(randomness) < catch_rate {
        return ThrowOutcome::Caught;
    }
    let attempts = attempts_before.saturating_add(1);
    if attempts >= MAX_THROW_ATTEMPTS {
        let (new_x, new_y) = vrf::relocation_position(randomness);
        ThrowOutcome::MissedAndRelocated { new_x, new_y }
    } else {
        ThrowOutcome::Missed { attempts }
    }
}

/// Scan the extra accounts for the triple whose mint matches. A
/// trailing partial group is ignored.
fn find_transfer_group<'info>(
    accounts: &[AccountInfo<'info>],
    mint: &Pubkey,
) -> Option<(AccountInfo<'info>, AccountInfo<'info>)> {
    accounts
        .chunks_exact(3)
        .find(|group| group[0].key() == *mint)
        .map(|group| (group[1].clone(), group[2].clone()))
}

pub fn handler<'info>(
    mut ctx: Context<'_, '_, 'info, 'info, ConsumeRandomness<'info>>,
) -> Result<()> {
    // The oracle account is a tagged union, not an Anchor account.
    // Copy the 64 bytes out and release the borrow before touching
    // any game state.
    let randomness: [u8; 64] = {
        let data = ctx.accounts.vrf_randomness.try_borrow_data()?;
        let account = RandomnessAccountData::try_deserialize(&mut data.as_ref())
            .map_err(|_| GameError::VrfNotFulfilled)?;
        *account
            .fulfilled_randomness()
            .ok_or(GameError::VrfNotFulfilled)?
    };

    match ctx.accounts.vrf_request.request_type {
        VRF_TYPE_SPAWN => resolve_spawn(&mut ctx, &randomness)?,
        VRF_TYPE_THROW => resolve_throw(&mut ctx, &randomness)?,
        _ => return Err(GameError::InvalidVrfRequestType.into()),
    }

    // Consumed exactly once; a retry of this transaction now fails
    // the VrfAlreadyFulfilled constraint.
    ctx.accounts.vrf_request.mark_fulfilled()?;

    Ok(())
}

/// Spawn resolution: place the Pokemon at the derived position. The
/// force-spawn preconditions are re-checked because the table may
/// have changed between request and fulfillment.
fn resolve_spawn<'info>(
    ctx: &mut Context<'_, '_, 'info, 'info, ConsumeRandomness<'info>>,
    randomness: &[u8; 64],
) -> Result<()> {
    let slot_index = ctx.accounts.vrf_request.slot_index;
    let slot_idx = slot_index as usize;
    require!(slot_idx < MAX_POKEMON_SLOTS, GameError::InvalidSlotIndex);
    require!(
        ctx.accounts.pokemon_slots.active_count < ctx.accounts.game_config.max_active_pokemon,
        GameError::MaxActivePokemonReached
    );

    let (pos_x, pos_y) = vrf::spawn_position(randomness);
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
        "VRF spawn: Pokemon {} in slot {} at ({}, {})",
        pokemon_id,
        slot_index,
        pos_x,
        pos_y
    );

    Ok(())
}

fn resolve_throw<'info>(
    ctx: &mut Context<'_, '_, 'info, 'info, ConsumeRandomness<'info>>,
    randomness: &[u8; 64],
) -> Result<()> {
    let slot_index = ctx.accounts.vrf_request.slot_index;
    let slot_idx = slot_index as usize;
    let ball_type = ctx.accounts.vrf_request.ball_type as usize;
    let player = ctx.accounts.vrf_request.player;
    require!(ball_type < NUM_BALL_TYPES, GameError::InvalidBallType);

    let slot = ctx.accounts.pokemon_slots.slot(slot_idx)?;
    require!(slot.is_active, GameError::SlotNotActive);
    let pokemon_id = slot.pokemon_id;
    let attempts_before = slot.throw_attempts;

    let catch_rate = ctx.accounts.game_config.catch_rates[ball_type];

    match resolve_throw_outcome(randomness, catch_rate, attempts_before) {
        ThrowOutcome::Caught => {
            if let Some(inventory) = ctx.accounts.player_inventory.as_mut() {
                inventory.total_catches = inventory
                    .total_catches
                    .checked_add(1)
                    .ok_or(GameError::MathOverflow)?;
            }

            let mut awarded_mint = Pubkey::default();
            if ctx.accounts.nft_vault.count > 0 {
                let draw = vrf::vault_draw(randomness, ctx.accounts.nft_vault.count);
                // The pop precedes the transfer attempt. Whatever
                // happens below, this mint is no longer awardable.
                awarded_mint = ctx.accounts.nft_vault.take_at(draw)?;

                match find_transfer_group(ctx.remaining_accounts, &awarded_mint) {
                    Some((vault_token_account, recipient_token_account)) => {
                        let vault_seeds: &[&[u8]] =
                            &[NFT_VAULT_SEED, &[ctx.accounts.nft_vault.bump]];
                        let signer_seeds = &[vault_seeds];
                        let transfer_ctx = CpiContext::new_with_signer(
                            ctx.accounts.token_program.to_account_info(),
                            Transfer {
                                from: vault_token_account,
                                to: recipient_token_account,
                                authority: ctx.accounts.nft_vault.to_account_info(),
                            },
                            signer_seeds,
                        );
                        token::transfer(transfer_ctx, 1)?;
                    }
                    None => {
                        // Caller did not supply the winning candidate.
                        // The NFT stays parked in the vault token
                        // account for the off-chain sweeper.
                        msg!("No transfer accounts for mint {}, NFT parked", awarded_mint);
                    }
                }
            }

            emit!(CaughtPokemon {
                catcher: player,
                pokemon_id,
                slot_index,
                nft_mint: awarded_mint,
            });
            if awarded_mint != Pubkey::default() {
                emit!(NftAwarded {
                    winner: player,
                    nft_mint: awarded_mint,
                    vault_remaining: ctx.accounts.nft_vault.count,
                });
            }

            ctx.accounts.pokemon_slots.deactivate(slot_idx);
            emit!(PokemonDespawned {
                pokemon_id,
                slot_index,
            });

            msg!("Pokemon {} caught by {}", pokemon_id, player);
        }
        ThrowOutcome::Missed { attempts } => {
            ctx.accounts.pokemon_slots.slots[slot_idx].throw_attempts = attempts;
            emit!(FailedCatch {
                thrower: player,
                pokemon_id,
                slot_index,
                attempts_remaining: MAX_THROW_ATTEMPTS - attempts,
            });
            msg!(
                "Pokemon {} not caught, {} attempts remaining",
                pokemon_id,
                MAX_THROW_ATTEMPTS - attempts
            );
        }
        ThrowOutcome::MissedAndRelocated { new_x, new_y } => {
            // Third miss: the Pokemon slips away to a new spot and
            // becomes a fresh encounter.
            let (old_x, old_y) = ctx.accounts.pokemon_slots.relocate(slot_idx, new_x, new_y);
            emit!(PokemonRelocated {
                pokemon_id,
                slot_index,
                old_x,
                old_y,
                new_x,
                new_y,
            });
            emit!(FailedCatch {
                thrower: player,
                pokemon_id,
                slot_index,
                attempts_remaining: MAX_THROW_ATTEMPTS,
            });
            msg!(
                "Pokemon {} escaped to ({}, {}) after a third miss",
                pokemon_id,
                new_x,
                new_y
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn randomness(roll: u64, draw: u64, reloc_x: u32, reloc_y: u32) -> [u8; 64] {
        let mut r = [0u8; 64];
        r[0..8].copy_from_slice(&roll.to_le_bytes());
        r[8..16].copy_from_slice(&draw.to_le_bytes());
        r[16..20].copy_from_slice(&reloc_x.to_le_bytes());
        r[20..24].copy_from_slice(&reloc_y.to_le_bytes());
        r
    }

    #[test]
    fn roll_below_rate_catches() {
        let r = randomness(0, 0, 0, 0);
        assert_eq!(resolve_throw_outcome(&r, 50, 0), ThrowOutcome::Caught);
        // Roll 49 against rate 50 still catches; 50 does not.
        let r = randomness(49, 0, 0, 0);
        assert_eq!(resolve_throw_outcome(&r, 50, 2), ThrowOutcome::Caught);
        let r = randomness(50, 0, 0, 0);
        assert_ne!(resolve_throw_outcome(&r, 50, 0), ThrowOutcome::Caught);
    }

    #[test]
    fn early_misses_count_attempts() {
        let r = randomness(99, 0, 0, 0);
        assert_eq!(
            resolve_throw_outcome(&r, 2, 0),
            ThrowOutcome::Missed { attempts: 1 }
        );
        assert_eq!(
            resolve_throw_outcome(&r, 2, 1),
            ThrowOutcome::Missed { attempts: 2 }
        );
    }

    #[test]
    fn third_miss_relocates_with_derived_position() {
        let r = randomness(97, 0, 1640, 2123);
        assert_eq!(
            resolve_throw_outcome(&r, 2, 2),
            ThrowOutcome::MissedAndRelocated {
                new_x: 640,
                new_y: 123,
            }
        );
    }

    #[test]
    fn three_consecutive_misses_drive_a_relocation() {
        // Rates and rolls from the three-misses scenario: rolls 99,
        // 98, 97 against a 2% Poke Ball.
        let mut attempts = 0u8;
        for roll in [99u64, 98] {
            match resolve_throw_outcome(&randomness(roll, 0, 0, 0), 2, attempts) {
                ThrowOutcome::Missed { attempts: a } => attempts = a,
                other => panic!("unexpected outcome {:?}", other),
            }
        }
        assert_eq!(attempts, 2);
        match resolve_throw_outcome(&randomness(97, 0, 100, 900), 2, attempts) {
            ThrowOutcome::MissedAndRelocated { new_x, new_y } => {
                assert_eq!((new_x, new_y), (100, 900));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    fn table_with(slot: usize, pokemon_id: u64, x: u16, y: u16) -> PokemonSlots {
        let mut slots = PokemonSlots {
            slots: [PokemonSlot::default(); MAX_POKEMON_SLOTS],
            active_count: 0,
            bump: 255,
        };
        slots.activate(slot, pokemon_id, x, y, 0).unwrap();
        slots
    }

    fn vault_with(mints: &[Pubkey]) -> NftVault {
        let mut vault = NftVault {
            authority: Pubkey::new_unique(),
            mints: [Pubkey::default(); MAX_POKEMON_SLOTS],
            count: 0,
            max_size: MAX_VAULT_SIZE,
            bump: 255,
        };
        for mint in mints {
            vault.push(*mint).unwrap();
        }
        vault
    }

    #[test]
    fn happy_catch_drains_vault_and_clears_slot() {
        // Ultra Ball (50%) thrown at slot 3 with all-zero randomness:
        // roll 0 catches, draw 0 picks the only vault entry.
        let mut slots = table_with(3, 1, 500, 500);
        let mint = Pubkey::new_unique();
        let mut vault = vault_with(&[mint]);
        let r = randomness(0, 0, 0, 0);

        assert_eq!(resolve_throw_outcome(&r, 50, 0), ThrowOutcome::Caught);
        let awarded = vault.take_at(vrf::vault_draw(&r, vault.count)).unwrap();
        assert_eq!(awarded, mint);
        assert_eq!(vault.count, 0);
        slots.deactivate(3);
        assert_eq!(slots.active_count, 0);
        assert!(!slots.slots[3].is_active);
    }

    #[test]
    fn empty_vault_catch_awards_nothing() {
        // Master Ball (99%) with roll 0: the catch still succeeds and
        // the slot still clears, there is just no mint to hand out.
        let mut slots = table_with(0, 9, 10, 10);
        let vault = vault_with(&[]);
        let r = randomness(0, 0, 0, 0);

        assert_eq!(resolve_throw_outcome(&r, 99, 0), ThrowOutcome::Caught);
        assert_eq!(vault.count, 0);
        slots.deactivate(0);
        assert!(!slots.slots[0].is_active);
    }

    #[test]
    fn second_consume_of_a_fulfilled_request_is_rejected() {
        let mut request = VrfRequest {
            request_type: VRF_TYPE_THROW,
            player: Pubkey::new_unique(),
            slot_index: 3,
            ball_type: 2,
            seed: [7u8; 32],
            is_fulfilled: false,
            bump: 255,
        };
        request.mark_fulfilled().unwrap();
        assert!(request.is_fulfilled);
        let err = request.mark_fulfilled().unwrap_err();
        assert_eq!(err, error!(GameError::VrfAlreadyFulfilled));
        // The flag never transitions back.
        assert!(request.is_fulfilled);
    }

    #[test]
    fn pop_happens_even_when_candidate_group_is_absent() {
        // Three entries, winner is the middle one, caller supplied no
        // matching accounts: the winner must still leave the live set.
        let m: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
        let mut vault = vault_with(&m);
        let r = randomness(0, 1, 0, 0);

        let draw = vrf::vault_draw(&r, vault.count);
        assert_eq!(draw, 1);
        let awarded = vault.take_at(draw).unwrap();
        assert_eq!(awarded, m[1]);
        assert!(find_transfer_group(&[], &awarded).is_none());
        assert_eq!(vault.count, 2);
        assert_eq!(vault.index_of(&m[1]), None);
        assert_eq!(vault.mints[1], m[2]);
    }

    #[test]
    fn transfer_group_matching_by_mint() {
        let owner = Pubkey::new_unique();
        let keys: Vec<Pubkey> = (0..6).map(|_| Pubkey::new_unique()).collect();
        let mut lamports: Vec<u64> = vec![0; 6];
        let mut datas: Vec<Vec<u8>> = vec![Vec::new(); 6];
        let infos: Vec<AccountInfo> = keys
            .iter()
            .zip(lamports.iter_mut())
            .zip(datas.iter_mut())
            .map(|((key, lamports), data)| {
                AccountInfo::new(key, false, false, lamports, data, &owner, false, 0)
            })
            .collect();

        // Two triples: {keys[0], keys[1], keys[2]} and {keys[3], keys[4], keys[5]}.
        let (vault_acc, recipient_acc) = find_transfer_group(&infos, &keys[3]).unwrap();
        assert_eq!(vault_acc.key(), keys[4]);
        assert_eq!(recipient_acc.key(), keys[5]);

        assert!(find_transfer_group(&infos, &Pubkey::new_unique()).is_none());
        // A trailing partial group never matches.
        assert!(find_transfer_group(&infos[..5], &keys[3]).is_none());
        assert!(find_transfer_group(&[], &keys[0]).is_none());
    }
}
