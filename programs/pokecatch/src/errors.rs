use anchor_lang::prelude::*;

#[error_code]
pub enum GameError {
    // Lifecycle
    #[msg("Game is already initialized")]
    AlreadyInitialized,
    #[msg("Game is not initialized")]
    NotInitialized,

    // Argument validation
    #[msg("Ball type must be 0-3 (Poke, Great, Ultra, Master)")]
    InvalidBallType,
    #[msg("Catch rate must be 0-100 percent")]
    InvalidCatchRate,
    #[msg("Slot index must be 0-19")]
    InvalidSlotIndex,
    #[msg("Coordinate must be 0-999")]
    InvalidCoordinate,
    #[msg("Max active Pokemon must be 1-20")]
    InvalidMaxActivePokemon,
    #[msg("Purchase quantity must be greater than zero")]
    ZeroQuantity,
    #[msg("Ball price must be greater than zero")]
    ZeroBallPrice,
    #[msg("Purchase quantity exceeds the per-transaction maximum")]
    PurchaseExceedsMax,
    #[msg("Withdrawal amount is zero or exceeds the game balance")]
    InsufficientWithdrawalAmount,

    // State preconditions
    #[msg("No active Pokemon in this slot")]
    SlotNotActive,
    #[msg("Slot already holds an active Pokemon")]
    SlotAlreadyOccupied,
    #[msg("This Pokemon has no throw attempts left")]
    MaxAttemptsReached,
    #[msg("Active Pokemon limit reached")]
    MaxActivePokemonReached,
    #[msg("Not enough balls of this type in the inventory")]
    InsufficientBalls,
    #[msg("Not enough SolBalls to cover this purchase")]
    InsufficientSolBalls,
    #[msg("NFT vault is full")]
    VaultFull,
    #[msg("NFT vault is empty")]
    VaultEmpty,
    #[msg("NFT mint is not tracked by the vault")]
    NftNotInVault,
    #[msg("NFT index is out of the vault's live range")]
    InvalidNftIndex,

    // VRF
    #[msg("VRF request was already consumed")]
    VrfAlreadyFulfilled,
    #[msg("Oracle has not fulfilled this randomness request yet")]
    VrfNotFulfilled,
    #[msg("Unknown VRF request type")]
    InvalidVrfRequestType,

    // Authorization
    #[msg("Only the game authority may call this instruction")]
    Unauthorized,

    // Arithmetic
    #[msg("Arithmetic overflow")]
    MathOverflow,

    // Extra-accounts protocol (strict mode only; the consumer runs graceful)
    #[msg("No mint/vault/recipient account group supplied for the awarded mint")]
    NftTransferAccountsMissing,
}
