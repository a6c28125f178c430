use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::errors::GameError;
use crate::events::NftDeposited;
use crate::state::*;

#[derive(Accounts)]
pub struct DepositNft<'info> {
    #[account(mut)]
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
        seeds = [NFT_VAULT_SEED],
        bump = nft_vault.bump,
    )]
    pub nft_vault: Box<Account<'info, NftVault>>,

    /// Metaplex NFT mint: an SPL mint with 0 decimals and supply 1.
    pub nft_mint: Account<'info, Mint>,

    /// Authority's token account holding the NFT.
    #[account(
        mut,
        constraint = source_nft_account.owner == authority.key(),
        constraint = source_nft_account.mint == nft_mint.key(),
        constraint = source_nft_account.amount == 1,
    )]
    pub source_nft_account: Account<'info, TokenAccount>,

    /// Vault's token account for this mint, one ATA per deposited NFT.
    #[account(
        init_if_needed,
        payer = authority,
        associated_token::mint = nft_mint,
        associated_token::authority = nft_vault,
    )]
    pub vault_nft_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<DepositNft>) -> Result<()> {
    require!(
        ctx.accounts.nft_vault.count < ctx.accounts.nft_vault.max_size,
        GameError::VaultFull
    );

    let nft_mint_key = ctx.accounts.nft_mint.key();

    let transfer_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        Transfer {
            from: ctx.accounts.source_nft_account.to_account_info(),
            to: ctx.accounts.vault_nft_account.to_account_info(),
            authority: ctx.accounts.authority.to_account_info(),
        },
    );
    token::transfer(transfer_ctx, 1)?;

    let nft_vault = &mut ctx.accounts.nft_vault;
    nft_vault.push(nft_mint_key)?;

    emit!(NftDeposited {
        nft_mint: nft_mint_key,
        vault_count: nft_vault.count,
    });

    msg!(
        "NFT {} deposited, vault holds {}",
        nft_mint_key,
        nft_vault.count
    );

    Ok(())
}
