use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod vrf;

use instructions::*;

declare_id!("895CjSpNLuxLNNorXaE6sRicEcFcS1EXBAceQSyH6Q5v");

#[program]
pub mod pokecatch {
    use super::*;

    /// One-time setup by the authority. Creates GameConfig,
    /// PokemonSlots, NftVault, TreasuryConfig and the game's SolBalls
    /// token account.
    pub fn initialize(
        ctx: Context<Initialize>,
        treasury: Pubkey,
        solballs_mint: Pubkey,
        usdc_mint: Pubkey,
        ball_prices: [u64; 4],
        catch_rates: [u8; 4],
    ) -> Result<()> {
        instructions::initialize::handler(
            ctx,
            treasury,
            solballs_mint,
            usdc_mint,
            ball_prices,
            catch_rates,
        )
    }

    /// Player buys balls with SolBalls. Creates the inventory PDA on
    /// first purchase.
    pub fn purchase_balls(ctx: Context<PurchaseBalls>, ball_type: u8, quantity: u32) -> Result<()> {
        instructions::purchase_balls::handler(ctx, ball_type, quantity)
    }

    /// Authority requests a randomly placed spawn via ORAO VRF. The
    /// slot is written later by consume_randomness.
    pub fn spawn_pokemon(ctx: Context<SpawnPokemon>, slot_index: u8) -> Result<()> {
        instructions::spawn_pokemon::handler(ctx, slot_index)
    }

    /// Authority spawns at explicit coordinates, no VRF round-trip.
    pub fn force_spawn_pokemon(
        ctx: Context<ForceSpawnPokemon>,
        slot_index: u8,
        pos_x: u16,
        pos_y: u16,
    ) -> Result<()> {
        instructions::force_spawn_pokemon::handler(ctx, slot_index, pos_x, pos_y)
    }

    /// Authority moves an active Pokemon. Attempts reset.
    pub fn reposition_pokemon(
        ctx: Context<RepositionPokemon>,
        slot_index: u8,
        new_pos_x: u16,
        new_pos_y: u16,
    ) -> Result<()> {
        instructions::reposition_pokemon::handler(ctx, slot_index, new_pos_x, new_pos_y)
    }

    /// Authority clears a slot.
    pub fn despawn_pokemon(ctx: Context<DespawnPokemon>, slot_index: u8) -> Result<()> {
        instructions::despawn_pokemon::handler(ctx, slot_index)
    }

    /// Player spends a ball on a throw. Requests ORAO VRF; the
    /// outcome lands in consume_randomness.
    pub fn throw_ball(ctx: Context<ThrowBall>, slot_index: u8, ball_type: u8) -> Result<()> {
        instructions::throw_ball::handler(ctx, slot_index, ball_type)
    }

    /// Crankable by anyone once the oracle has fulfilled. Resolves a
    /// pending spawn or throw exactly once.
    pub fn consume_randomness<'info>(
        ctx: Context<'_, '_, 'info, 'info, ConsumeRandomness<'info>>,
    ) -> Result<()> {
        instructions::consume_randomness::handler(ctx)
    }

    /// Authority stocks the vault with an NFT.
    pub fn deposit_nft(ctx: Context<DepositNft>) -> Result<()> {
        instructions::deposit_nft::handler(ctx)
    }

    /// Authority pulls an NFT back out of the vault by mint.
    pub fn withdraw_nft(ctx: Context<WithdrawNft>) -> Result<()> {
        instructions::withdraw_nft::handler(ctx)
    }

    /// Authority updates the price of one ball tier.
    pub fn set_ball_price(ctx: Context<AdminConfig>, ball_type: u8, new_price: u64) -> Result<()> {
        instructions::admin::set_ball_price_handler(ctx, ball_type, new_price)
    }

    /// Authority updates the catch rate of one ball tier.
    pub fn set_catch_rate(ctx: Context<AdminConfig>, ball_type: u8, new_rate: u8) -> Result<()> {
        instructions::admin::set_catch_rate_handler(ctx, ball_type, new_rate)
    }

    /// Authority adjusts the active-Pokemon soft cap.
    pub fn set_max_active_pokemon(ctx: Context<AdminConfig>, new_max: u8) -> Result<()> {
        instructions::admin::set_max_active_pokemon_handler(ctx, new_max)
    }

    /// Authority withdraws purchase revenue for off-chain processing.
    pub fn withdraw_revenue(ctx: Context<WithdrawRevenue>, amount: u64) -> Result<()> {
        instructions::withdraw_revenue::handler(ctx, amount)
    }
}
