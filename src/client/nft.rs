use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_signer::Signer;

use super::TokenClient;
use crate::error::ToolResult;
use crate::program::instructions::{build_create_metadata_ix, build_mint_asset_ix};
use crate::program::pda::{get_associated_token_address, get_master_edition_pda, get_metadata_pda};
use crate::program::types::{CreateMetadataParams, Creator, PrintSupply, TokenProgram, TokenStandard};
use crate::program::utils::{validate_basis_points, validate_metadata_uri, validate_name_symbol};
use crate::rpc::LedgerRpc;

/// 5.5%
pub const DEFAULT_ROYALTY_BASIS_POINTS: u16 = 550;

#[derive(Debug, Clone)]
pub struct MintNftRequest {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub royalty_basis_points: u16,
    pub is_mutable: bool,
}

#[derive(Debug, Clone)]
pub struct MintedNft {
    pub mint: Pubkey,
    pub metadata: Pubkey,
    pub master_edition: Pubkey,
    pub holding_account: Pubkey,
    pub signature: Signature,
}

impl<R: LedgerRpc> TokenClient<R> {
    /// Mint a one-of-one NFT to the payer under a fresh mint keypair.
    pub async fn mint_nft(&self, request: &MintNftRequest) -> ToolResult<MintedNft> {
        self.mint_nft_with_keypair(request, &Keypair::new()).await
    }

    /// Mint a one-of-one NFT at the address of `mint_keypair`.
    ///
    /// `CreateV1` and `MintV1` share one transaction, so the mint, holding
    /// account, metadata and master edition appear together or not at all.
    pub async fn mint_nft_with_keypair(
        &self,
        request: &MintNftRequest,
        mint_keypair: &Keypair,
    ) -> ToolResult<MintedNft> {
        validate_name_symbol(&request.name, &request.symbol)?;
        validate_metadata_uri(&request.uri)?;
        validate_basis_points(request.royalty_basis_points, "royalty")?;

        let payer = self.payer_pubkey();
        let mint = mint_keypair.pubkey();
        let token_program = TokenProgram::Classic;

        let create = build_create_metadata_ix(&CreateMetadataParams {
            mint,
            authority: payer,
            payer,
            update_authority: payer,
            mint_is_signer: true,
            name: request.name.clone(),
            symbol: request.symbol.clone(),
            uri: request.uri.clone(),
            seller_fee_basis_points: request.royalty_basis_points,
            creators: Some(vec![Creator {
                address: payer,
                verified: true,
                share: 100,
            }]),
            is_mutable: request.is_mutable,
            token_standard: TokenStandard::NonFungible,
            decimals: Some(0),
            print_supply: Some(PrintSupply::Zero),
            token_program,
        })?;
        let mint_one = build_mint_asset_ix(&mint, &payer, &payer, &payer, 1, token_program)?;

        let (metadata, _) = get_metadata_pda(&mint);
        let (master_edition, _) = get_master_edition_pda(&mint);
        let holding_account = get_associated_token_address(&payer, &mint, &token_program.id());
        tracing::debug!(%mint, %metadata, %master_edition, "Minting NFT");

        let signature = self.send(&[create, mint_one], &[mint_keypair]).await?;

        Ok(MintedNft {
            mint,
            metadata,
            master_edition,
            holding_account,
            signature,
        })
    }
}
