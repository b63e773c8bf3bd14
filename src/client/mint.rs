use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_signer::Signer;

use super::TokenClient;
use crate::error::ToolResult;
use crate::program::instructions::{build_create_mint_ixs, mint_account_size};
use crate::program::types::{MintParams, TokenProgram, TransferFeeParams};
use crate::program::utils::validate_basis_points;
use crate::rpc::LedgerRpc;

/// Mint to create. The payer becomes mint authority.
#[derive(Debug, Clone, Default)]
pub struct CreateMintRequest {
    pub decimals: u8,
    pub freeze_authority: Option<Pubkey>,
    /// Present for the transfer-fee variant (Token-2022).
    pub transfer_fee: Option<TransferFeeParams>,
}

#[derive(Debug, Clone)]
pub struct CreatedMint {
    pub mint: Pubkey,
    pub token_program: TokenProgram,
    pub signature: Signature,
    pub account_size: usize,
    pub rent_lamports: u64,
}

impl<R: LedgerRpc> TokenClient<R> {
    /// Create a mint under a freshly generated keypair.
    pub async fn create_mint(&self, request: &CreateMintRequest) -> ToolResult<CreatedMint> {
        self.create_mint_with_keypair(request, &Keypair::new()).await
    }

    /// Create a mint at the address of `mint_keypair`.
    ///
    /// Account creation, fee-extension initialization and mint
    /// initialization go out in that order in a single transaction.
    pub async fn create_mint_with_keypair(
        &self,
        request: &CreateMintRequest,
        mint_keypair: &Keypair,
    ) -> ToolResult<CreatedMint> {
        if let Some(fee) = &request.transfer_fee {
            validate_basis_points(fee.basis_points, "transfer fee")?;
        }

        let payer = self.payer_pubkey();
        let params = MintParams {
            payer,
            mint: mint_keypair.pubkey(),
            mint_authority: payer,
            freeze_authority: request.freeze_authority,
            decimals: request.decimals,
            transfer_fee: request.transfer_fee.clone(),
        };

        let account_size = mint_account_size(params.transfer_fee.is_some())?;
        let rent_lamports = self
            .rpc
            .minimum_balance_for_rent_exemption(account_size)
            .await?;
        tracing::debug!(
            mint = %params.mint,
            account_size,
            rent_lamports,
            "Creating mint account"
        );

        let instructions = build_create_mint_ixs(&params, rent_lamports)?;
        let signature = self.send(&instructions, &[mint_keypair]).await?;

        Ok(CreatedMint {
            mint: params.mint,
            token_program: params.token_program(),
            signature,
            account_size,
            rent_lamports,
        })
    }
}
