use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::errors::GameError;
use crate::events::NftWithdrawn;
use crate::state::*;

#[derive(Accounts)]
pub struct WithdrawNft<'info> {
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

    /// The mint being recovered. Identifies the vault entry.
    pub nft_mint: Account<'info, Mint>,

    /// Vault's token account for the mint.
    #[account(
        mut,
        constraint = vault_nft_account.owner == nft_vault.key(),
        constraint = vault_nft_account.mint == nft_mint.key(),
        constraint = vault_nft_account.amount == 1,
    )]
    pub vault_nft_account: Account<'info, TokenAccount>,

    /// Authority's token account for the mint.
    #[account(
        init_if_needed,
        payer = authority,
        associated_token::mint = nft_mint,
        associated_token::authority = authority,
    )]
    pub authority_nft_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<WithdrawNft>) -> Result<()> {
    let nft_mint_key = ctx.accounts.nft_mint.key();

    // An empty vault falls through here too: the mint is absent from
    // an empty live range.
    let nft_vault = &mut ctx.accounts.nft_vault;
    let index = nft_vault
        .index_of(&nft_mint_key)
        .ok_or(GameError::NftNotInVault)?;

    // Same discipline as the award path: drop the entry first, then
    // move the token.
    nft_vault.take_at(index)?;

    let vault_seeds: &[&[u8]] = &[NFT_VAULT_SEED, &[ctx.accounts.nft_vault.bump]];
    let signer_seeds = &[vault_seeds];
    let transfer_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        Transfer {
            from: ctx.accounts.vault_nft_account.to_account_info(),
            to: ctx.accounts.authority_nft_account.to_account_info(),
            authority: ctx.accounts.nft_vault.to_account_info(),
        },
        signer_seeds,
    );
    token::transfer(transfer_ctx, 1)?;

    emit!(NftWithdrawn {
        nft_mint: nft_mint_key,
        vault_count: ctx.accounts.nft_vault.count,
    });

    msg!(
        "NFT {} withdrawn, vault holds {}",
        nft_mint_key,
        ctx.accounts.nft_vault.count
    );

    Ok(())
}
