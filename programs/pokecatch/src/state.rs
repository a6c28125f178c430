use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::GameError;

/// Global game configuration. One PDA per deployment.
#[account]
pub struct GameConfig {
    /// Admin wallet: manages spawns, prices, vault, revenue.
    pub authority: Pubkey,
    /// Treasury wallet consumed by the off-chain revenue processor.
    pub treasury: Pubkey,
    /// SolBalls utility token mint (9 decimals).
    pub solballs_mint: Pubkey,
    /// USDC mint (6 decimals). Stored for the revenue processor; the
    /// program itself never moves USDC.
    pub usdc_mint: Pubkey,
    /// Ball prices in SolBalls atomic units: [poke, great, ultra, master].
    pub ball_prices: [u64; 4],
    /// Catch rates in percent, 0-100: [poke, great, ultra, master].
    pub catch_rates: [u8; 4],
    /// Soft cap on active Pokemon (1-20).
    pub max_active_pokemon: u8,
    /// Monotonic Pokemon ID source.
    pub pokemon_id_counter: u64,
    /// Lifetime SolBalls taken in from purchases.
    pub total_revenue: u64,
    pub is_initialized: bool,
    /// Monotonic counter naming every VRF request ever made.
    pub vrf_counter: u64,
    pub bump: u8,
}

impl GameConfig {
    pub const LEN: usize = 8  // discriminator
        + 32  // authority
        + 32  // treasury
        + 32  // solballs_mint
        + 32  // usdc_mint
        + (8 * 4)  // ball_prices
        + (1 * 4)  // catch_rates
        + 1   // max_active_pokemon
        + 8   // pokemon_id_counter
        + 8   // total_revenue
        + 1   // is_initialized
        + 8   // vrf_counter
        + 1;  // bump

    /// Mint the next Pokemon ID.
    pub fn next_pokemon_id(&mut self) -> Result<u64> {
        self.pokemon_id_counter = self
            .pokemon_id_counter
            .checked_add(1)
            .ok_or(GameError::MathOverflow)?;
        Ok(self.pokemon_id_counter)
    }

    /// Advance the VRF counter after a request has been issued under
    /// the current value.
    pub fn advance_vrf_counter(&mut self) -> Result<()> {
        self.vrf_counter = self
            .vrf_counter
            .checked_add(1)
            .ok_or(GameError::MathOverflow)?;
        Ok(())
    }

    /// Admin gate shared by every authority-only instruction.
    pub fn is_authority(&self, key: &Pubkey) -> bool {
        self.authority == *key
    }
}

/// One cell of the spawn table.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug)]
pub struct PokemonSlot {
    pub is_active: bool,
    /// Unique ID minted from GameConfig.pokemon_id_counter.
    pub pokemon_id: u64,
    /// Position on the 1000x1000 grid.
    pub pos_x: u16,
    pub pos_y: u16,
    /// Misses so far against this Pokemon, 0-3.
    pub throw_attempts: u8,
    pub spawn_timestamp: i64,
}

impl PokemonSlot {
    pub const LEN: usize = 1  // is_active
        + 8   // pokemon_id
        + 2   // pos_x
        + 2   // pos_y
        + 1   // throw_attempts
        + 8;  // spawn_timestamp
}

/// The full 20-cell spawn table. Boxed in every context (it is the
/// largest account and stack frames are capped at 4 KB).
#[account]
pub struct PokemonSlots {
    pub slots: [PokemonSlot; MAX_POKEMON_SLOTS],
    /// Invariant: equals the number of slots with is_active set.
    pub active_count: u8,
    pub bump: u8,
}

impl PokemonSlots {
    pub const LEN: usize = 8  // discriminator
        + (PokemonSlot::LEN * MAX_POKEMON_SLOTS)
        + 1   // active_count
        + 1;  // bump

    /// Bounds-checked slot access.
    pub fn slot(&self, index: usize) -> Result<&PokemonSlot> {
        self.slots
            .get(index)
            .ok_or_else(|| error!(GameError::InvalidSlotIndex))
    }

    /// Place a Pokemon into an empty cell.
    pub fn activate(
        &mut self,
        index: usize,
        pokemon_id: u64,
        pos_x: u16,
        pos_y: u16,
        now: i64,
    ) -> Result<()> {
        require!(index < MAX_POKEMON_SLOTS, GameError::InvalidSlotIndex);
        require!(
            !self.slots[index].is_active,
            GameError::SlotAlreadyOccupied
        );
        self.slots[index] = PokemonSlot {
            is_active: true,
            pokemon_id,
            pos_x,
            pos_y,
            throw_attempts: 0,
            spawn_timestamp: now,
        };
        self.active_count = self
            .active_count
            .checked_add(1)
            .ok_or(GameError::MathOverflow)?;
        Ok(())
    }

    /// Empty a cell. No-op on the counter if the cell was already empty.
    pub fn deactivate(&mut self, index: usize) {
        if self.slots[index].is_active {
            self.active_count = self.active_count.saturating_sub(1);
        }
        self.slots[index] = PokemonSlot::default();
    }

    /// Move an active Pokemon and reset its throw attempts. A moved
    /// Pokemon is a fresh encounter. Returns the old position.
    pub fn relocate(&mut self, index: usize, new_x: u16, new_y: u16) -> (u16, u16) {
        let slot = &mut self.slots[index];
        let old = (slot.pos_x, slot.pos_y);
        slot.pos_x = new_x;
        slot.pos_y = new_y;
        slot.throw_attempts = 0;
        old
    }
}

/// Per-player ball inventory and lifetime counters.
#[account]
pub struct PlayerInventory {
    pub player: Pubkey,
    /// Ball counts per tier: [poke, great, ultra, master].
    pub balls: [u32; 4],
    pub total_purchased: u64,
    pub total_throws: u64,
    pub total_catches: u64,
    pub bump: u8,
}

impl PlayerInventory {
    pub const LEN: usize = 8  // discriminator
        + 32  // player
        + (4 * 4)  // balls
        + 8   // total_purchased
        + 8   // total_throws
        + 8   // total_catches
        + 1;  // bump

    /// Consume one ball of the given tier.
    pub fn spend_ball(&mut self, ball_type: usize) -> Result<()> {
        self.balls[ball_type] = self.balls[ball_type]
            .checked_sub(1)
            .ok_or(GameError::InsufficientBalls)?;
        Ok(())
    }

    /// Credit a purchase to the tier count and the lifetime counter.
    pub fn add_balls(&mut self, ball_type: usize, quantity: u32) -> Result<()> {
        self.balls[ball_type] = self.balls[ball_type]
            .checked_add(quantity)
            .ok_or(GameError::MathOverflow)?;
        self.total_purchased = self
            .total_purchased
            .checked_add(quantity as u64)
            .ok_or(GameError::MathOverflow)?;
        Ok(())
    }
}

/// Registry of NFT mints the game can award. The tokens themselves
/// sit in one PDA-owned ATA per mint; this account only tracks the
/// live set. Boxed in every context.
#[account]
pub struct NftVault {
    pub authority: Pubkey,
    /// The first `count` entries are the live set; the rest are the
    /// default pubkey.
    pub mints: [Pubkey; MAX_POKEMON_SLOTS],
    pub count: u8,
    pub max_size: u8,
    pub bump: u8,
}

impl NftVault {
    pub const LEN: usize = 8  // discriminator
        + 32  // authority
        + (32 * MAX_POKEMON_SLOTS)
        + 1   // count
        + 1   // max_size
        + 1;  // bump

    /// Append a mint to the live set.
    pub fn push(&mut self, mint: Pubkey) -> Result<()> {
        require!(self.count < self.max_size, GameError::VaultFull);
        self.mints[self.count as usize] = mint;
        self.count = self
            .count
            .checked_add(1)
            .ok_or(GameError::MathOverflow)?;
        Ok(())
    }

    /// Position of a mint within the live set.
    pub fn index_of(&self, mint: &Pubkey) -> Option<usize> {
        self.mints[..self.count as usize]
            .iter()
            .position(|m| m == mint)
    }

    /// Swap-and-pop removal. Overwrites `index` with the tail entry,
    /// clears the tail, shrinks the live set. Returns the removed mint.
    pub fn take_at(&mut self, index: usize) -> Result<Pubkey> {
        require!(index < self.count as usize, GameError::InvalidNftIndex);
        let removed = self.mints[index];
        let last = (self.count - 1) as usize;
        if index != last {
            self.mints[index] = self.mints[last];
        }
        self.mints[last] = Pubkey::default();
        self.count -= 1;
        Ok(removed)
    }
}

/// Revenue-withdrawal bookkeeping.
#[account]
pub struct TreasuryConfig {
    pub treasury_wallet: Pubkey,
    /// Lifetime SolBalls released to the revenue processor.
    pub total_withdrawn: u64,
    pub bump: u8,
}

impl TreasuryConfig {
    pub const LEN: usize = 8  // discriminator
        + 32  // treasury_wallet
        + 8   // total_withdrawn
        + 1;  // bump
}

/// In-flight VRF request, keyed by the vrf_counter value at request
/// time. Consumed exactly once; stays storage-resident afterwards.
#[account]
pub struct VrfRequest {
    /// VRF_TYPE_SPAWN or VRF_TYPE_THROW.
    pub request_type: u8,
    /// The thrower, or the authority for spawn requests.
    pub player: Pubkey,
    pub slot_index: u8,
    /// Tier thrown (spawn requests leave this zero).
    pub ball_type: u8,
    /// The 32-byte seed handed to the oracle.
    pub seed: [u8; 32],
    pub is_fulfilled: bool,
    pub bump: u8,
}

impl VrfRequest {
    pub const LEN: usize = 8  // discriminator
        + 1   // request_type
        + 32  // player
        + 1   // slot_index
        + 1   // ball_type
        + 32  // seed
        + 1   // is_fulfilled
        + 1;  // bump

    /// Flip the consumed flag. Exactly one call succeeds; the flag
    /// never goes back.
    pub fn mark_fulfilled(&mut self) -> Result<()> {
        require!(!self.is_fulfilled, GameError::VrfAlreadyFulfilled);
        self.is_fulfilled = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PokemonSlots {
        PokemonSlots {
            slots: [PokemonSlot::default(); MAX_POKEMON_SLOTS],
            active_count: 0,
            bump: 255,
        }
    }

    fn vault() -> NftVault {
        NftVault {
            authority: Pubkey::new_unique(),
            mints: [Pubkey::default(); MAX_POKEMON_SLOTS],
            count: 0,
            max_size: MAX_VAULT_SIZE,
            bump: 255,
        }
    }

    fn live_flags(slots: &PokemonSlots) -> u8 {
        slots.slots.iter().filter(|s| s.is_active).count() as u8
    }

    #[test]
    fn activate_fills_slot_and_counts() {
        let mut slots = table();
        slots.activate(3, 7, 500, 500, 1_700_000_000).unwrap();
        assert!(slots.slots[3].is_active);
        assert_eq!(slots.slots[3].pokemon_id, 7);
        assert_eq!((slots.slots[3].pos_x, slots.slots[3].pos_y), (500, 500));
        assert_eq!(slots.slots[3].throw_attempts, 0);
        assert_eq!(slots.active_count, 1);
        assert_eq!(slots.active_count, live_flags(&slots));
    }

    #[test]
    fn activate_rejects_occupied_slot() {
        let mut slots = table();
        slots.activate(0, 1, 10, 10, 0).unwrap();
        let err = slots.activate(0, 2, 20, 20, 0).unwrap_err();
        assert_eq!(err, error!(GameError::SlotAlreadyOccupied));
        assert_eq!(slots.active_count, 1);
    }

    #[test]
    fn activate_rejects_out_of_range_index() {
        let mut slots = table();
        let err = slots
            .activate(MAX_POKEMON_SLOTS, 1, 0, 0, 0)
            .unwrap_err();
        assert_eq!(err, error!(GameError::InvalidSlotIndex));
    }

    #[test]
    fn deactivate_clears_and_recounts() {
        let mut slots = table();
        slots.activate(0, 1, 1, 1, 0).unwrap();
        slots.activate(5, 2, 2, 2, 0).unwrap();
        slots.deactivate(0);
        assert!(!slots.slots[0].is_active);
        assert_eq!(slots.slots[0].pokemon_id, 0);
        assert_eq!(slots.active_count, 1);
        assert_eq!(slots.active_count, live_flags(&slots));
        // Clearing an already-empty cell must not drift the counter.
        slots.deactivate(0);
        assert_eq!(slots.active_count, 1);
    }

    #[test]
    fn relocate_resets_attempts_and_returns_old_position() {
        let mut slots = table();
        slots.activate(2, 9, 100, 100, 0).unwrap();
        slots.slots[2].throw_attempts = 3;
        let old = slots.relocate(2, 640, 123);
        assert_eq!(old, (100, 100));
        assert_eq!((slots.slots[2].pos_x, slots.slots[2].pos_y), (640, 123));
        assert_eq!(slots.slots[2].throw_attempts, 0);
        assert!(slots.slots[2].is_active);
    }

    #[test]
    fn vault_push_appends_in_order() {
        let mut v = vault();
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        v.push(a).unwrap();
        v.push(b).unwrap();
        assert_eq!(v.count, 2);
        assert_eq!(v.mints[0], a);
        assert_eq!(v.mints[1], b);
        assert_eq!(v.index_of(&b), Some(1));
    }

    #[test]
    fn vault_push_rejects_when_full() {
        let mut v = vault();
        for _ in 0..MAX_VAULT_SIZE {
            v.push(Pubkey::new_unique()).unwrap();
        }
        let err = v.push(Pubkey::new_unique()).unwrap_err();
        assert_eq!(err, error!(GameError::VaultFull));
        assert_eq!(v.count, MAX_VAULT_SIZE);
    }

    #[test]
    fn take_at_swaps_tail_into_hole() {
        let mut v = vault();
        let m: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
        for mint in &m {
            v.push(*mint).unwrap();
        }
        // Remove the middle entry: the tail must take its place.
        let removed = v.take_at(1).unwrap();
        assert_eq!(removed, m[1]);
        assert_eq!(v.count, 2);
        assert_eq!(v.mints[0], m[0]);
        assert_eq!(v.mints[1], m[2]);
        assert_eq!(v.mints[2], Pubkey::default());
        assert_eq!(v.index_of(&m[1]), None);
    }

    #[test]
    fn take_at_tail_entry_just_pops() {
        let mut v = vault();
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        v.push(a).unwrap();
        v.push(b).unwrap();
        assert_eq!(v.take_at(1).unwrap(), b);
        assert_eq!(v.mints[0], a);
        assert_eq!(v.mints[1], Pubkey::default());
    }

    #[test]
    fn index_of_misses_on_empty_vault() {
        let v = vault();
        assert_eq!(v.index_of(&Pubkey::new_unique()), None);
    }

    #[test]
    fn take_at_rejects_dead_range() {
        let mut v = vault();
        v.push(Pubkey::new_unique()).unwrap();
        let err = v.take_at(1).unwrap_err();
        assert_eq!(err, error!(GameError::InvalidNftIndex));
    }

    #[test]
    fn deposit_then_withdraw_restores_count() {
        let mut v = vault();
        v.push(Pubkey::new_unique()).unwrap();
        v.push(Pubkey::new_unique()).unwrap();
        let before = v.count;
        let m = Pubkey::new_unique();
        v.push(m).unwrap();
        let idx = v.index_of(&m).unwrap();
        v.take_at(idx).unwrap();
        assert_eq!(v.count, before);
        // Everything past the live range is the default sentinel.
        assert!(v.mints[v.count as usize..]
            .iter()
            .all(|m| *m == Pubkey::default()));
        assert!(v.mints[..v.count as usize]
            .iter()
            .all(|m| *m != Pubkey::default()));
    }

    #[test]
    fn spend_ball_decrements_and_bottoms_out() {
        let mut inv = PlayerInventory {
            player: Pubkey::new_unique(),
            balls: [1, 0, 0, 0],
            total_purchased: 1,
            total_throws: 0,
            total_catches: 0,
            bump: 254,
        };
        inv.spend_ball(0).unwrap();
        assert_eq!(inv.balls[0], 0);
        let err = inv.spend_ball(0).unwrap_err();
        assert_eq!(err, error!(GameError::InsufficientBalls));
    }

    #[test]
    fn pokemon_ids_are_strictly_increasing() {
        let mut config = GameConfig {
            authority: Pubkey::new_unique(),
            treasury: Pubkey::new_unique(),
            solballs_mint: Pubkey::new_unique(),
            usdc_mint: Pubkey::new_unique(),
            ball_prices: DEFAULT_BALL_PRICES,
            catch_rates: DEFAULT_CATCH_RATES,
            max_active_pokemon: MAX_POKEMON_SLOTS as u8,
            pokemon_id_counter: 0,
            total_revenue: 0,
            is_initialized: true,
            vrf_counter: 0,
            bump: 255,
        };
        assert_eq!(config.next_pokemon_id().unwrap(), 1);
        assert_eq!(config.next_pokemon_id().unwrap(), 2);
        config.advance_vrf_counter().unwrap();
        config.advance_vrf_counter().unwrap();
        assert_eq!(config.vrf_counter, 2);
    }
}
