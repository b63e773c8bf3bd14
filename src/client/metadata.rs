use solana_pubkey::Pubkey;
use solana_signature::Signature;

use super::TokenClient;
use crate::error::{classify_metadata_error, ToolError, ToolResult};
use crate::program::instructions::build_create_metadata_ix;
use crate::program::pda::get_metadata_pda;
use crate::program::types::{CreateMetadataParams, TokenStandard};
use crate::program::utils::{validate_metadata_uri, validate_name_symbol};
use crate::rpc::LedgerRpc;
use crate::storage::{FungibleMetadataDocument, Uploader};

/// Where the metadata URI comes from.
#[derive(Debug, Clone)]
pub enum MetadataSource {
    /// Upload a generated document and use the returned URI.
    Upload { description: String },
    /// Use an already-uploaded document.
    Uri(String),
}

#[derive(Debug, Clone)]
pub struct FungibleMetadataRequest {
    pub mint: Pubkey,
    pub name: String,
    pub symbol: String,
    pub source: MetadataSource,
    pub is_mutable: bool,
}

#[derive(Debug, Clone)]
pub struct MetadataOutcome {
    pub metadata: Pubkey,
    pub uri: String,
    pub signature: Signature,
}

impl<R: LedgerRpc> TokenClient<R> {
    /// Publish a fungible metadata record for an existing mint.
    ///
    /// Name, symbol and an operator-supplied URI are validated before any
    /// network call. `uploader` is only consulted for [`MetadataSource::Upload`].
    pub async fn create_fungible_metadata(
        &self,
        request: &FungibleMetadataRequest,
        uploader: Option<&dyn Uploader>,
    ) -> ToolResult<MetadataOutcome> {
        validate_name_symbol(&request.name, &request.symbol)?;
        if let MetadataSource::Uri(uri) = &request.source {
            validate_metadata_uri(uri)?;
        }

        let payer = self.payer_pubkey();
        let mint = self.get_mint(&request.mint).await?;
        if mint.mint_authority != Some(payer) {
            return Err(ToolError::Validation(format!(
                "{} is not the mint authority of {}",
                payer, request.mint
            )));
        }

        let (metadata, _) = get_metadata_pda(&request.mint);
        if self.account_exists(&metadata).await? {
            return Err(ToolError::MetadataExists(metadata.to_string()));
        }

        let uri = match &request.source {
            MetadataSource::Uri(uri) => uri.clone(),
            MetadataSource::Upload { description } => {
                let uploader = uploader.ok_or_else(|| {
                    ToolError::Validation("no uploader configured for document upload".to_string())
                })?;
                let document = FungibleMetadataDocument {
                    name: request.name.clone(),
                    symbol: request.symbol.clone(),
                    description: description.clone(),
                };
                let uri = uploader
                    .upload_json(&serde_json::to_value(&document)?)
                    .await?;
                validate_metadata_uri(&uri)?;
                uri
            }
        };

        let ix = build_create_metadata_ix(&CreateMetadataParams {
            mint: request.mint,
            authority: payer,
            payer,
            update_authority: payer,
            mint_is_signer: false,
            name: request.name.clone(),
            symbol: request.symbol.clone(),
            uri: uri.clone(),
            seller_fee_basis_points: 0,
            creators: None,
            is_mutable: request.is_mutable,
            token_standard: TokenStandard::Fungible,
            decimals: Some(mint.decimals),
            print_supply: None,
            token_program: mint.token_program,
        })?;
        tracing::debug!(%metadata, %uri, "Creating fungible metadata");

        let signature = self.send(&[ix], &[]).await.map_err(classify_metadata_error)?;

        Ok(MetadataOutcome {
            metadata,
            uri,
            signature,
        })
    }
}
