use solana_pubkey::Pubkey;
use solana_signature::Signature;

use super::TokenClient;
use crate::error::ToolResult;
use crate::program::instructions::{build_create_ata_ix, build_mint_to_ix};
use crate::program::pda::get_associated_token_address;
use crate::program::utils::to_base_units;
use crate::rpc::LedgerRpc;

#[derive(Debug, Clone)]
pub struct MintOutcome {
    pub holding_account: Pubkey,
    /// Whether this run had to create the holding account.
    pub created_holding_account: bool,
    /// Amount minted, in base units.
    pub base_units: u64,
    pub decimals: u8,
    pub signature: Signature,
}

impl<R: LedgerRpc> TokenClient<R> {
    /// Mint `amount` whole tokens into the payer's holding account.
    ///
    /// The holding account is created in its own transaction when missing,
    /// so a rerun after a failed mint skips straight to `MintTo`.
    pub async fn mint_to_owner(&self, mint: &Pubkey, amount: u64) -> ToolResult<MintOutcome> {
        let owner = self.payer_pubkey();
        let mint_state = self.get_mint(mint).await?;
        let token_program = mint_state.token_program;
        let base_units = to_base_units(amount, mint_state.decimals)?;

        let holding_account = get_associated_token_address(&owner, mint, &token_program.id());
        let created_holding_account = if self.account_exists(&holding_account).await? {
            false
        } else {
            tracing::info!(%holding_account, "Creating holding account");
            let ix = build_create_ata_ix(&owner, &owner, mint, token_program);
            self.send(&[ix], &[]).await?;
            true
        };

        let ix = build_mint_to_ix(mint, &holding_account, &owner, base_units, token_program)?;
        let signature = self.send(&[ix], &[]).await?;

        Ok(MintOutcome {
            holding_account,
            created_holding_account,
            base_units,
            decimals: mint_state.decimals,
            signature,
        })
    }
}
