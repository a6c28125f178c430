/// Number of cells in the spawn table. Hard cap on simultaneous Pokemon.
pub const MAX_POKEMON_SLOTS: usize = 20;

/// Coordinates live on a 1000x1000 grid, 0-999 per axis.
pub const MAX_COORDINATE: u16 = 999;

/// Throws allowed against one Pokemon before it relocates.
pub const MAX_THROW_ATTEMPTS: u8 = 3;

/// NFT vault capacity.
pub const MAX_VAULT_SIZE: u8 = 20;

/// Ball tiers: Poke, Great, Ultra, Master.
pub const NUM_BALL_TYPES: usize = 4;

/// Largest ball quantity accepted in a single purchase.
pub const MAX_PURCHASE_QUANTITY: u32 = 99;

/// VRF request type discriminators (stored in byte 8 of the seed).
pub const VRF_TYPE_SPAWN: u8 = 0;
pub const VRF_TYPE_THROW: u8 = 1;

/// Domain tag occupying the last 8 bytes of every VRF seed.
pub const VRF_SEED_DOMAIN: &[u8; 8] = b"pkblgame";

/// PDA seeds.
pub const GAME_CONFIG_SEED: &[u8] = b"game_config";
pub const POKEMON_SLOTS_SEED: &[u8] = b"pokemon_slots";
pub const PLAYER_INV_SEED: &[u8] = b"player_inv";
pub const NFT_VAULT_SEED: &[u8] = b"nft_vault";
pub const TREASURY_SEED: &[u8] = b"treasury";
pub const VRF_REQ_SEED: &[u8] = b"vrf_req";

/// Default ball prices in SolBalls atomic units (9 decimals), admin-configurable.
pub const DEFAULT_BALL_PRICES: [u64; 4] = [
    1_000_000_000,  // Poke Ball: 1 SolBalls
    10_000_000_000, // Great Ball: 10 SolBalls
    25_000_000_000, // Ultra Ball: 25 SolBalls
    49_900_000_000, // Master Ball: 49.90 SolBalls
];

/// Default catch rates in percent per tier.
pub const DEFAULT_CATCH_RATES: [u8; 4] = [2, 20, 50, 99];
