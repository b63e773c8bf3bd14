//! `TokenClient`: the signing payer plus a ledger connection.
//!
//! Each operation lives in its own file as an `impl` block:
//!
//! - `fund`: balance check and faucet airdrop
//! - `mint`: mint creation, with or without a transfer-fee extension
//! - `supply`: minting supply into the owner's holding account
//! - `transfer`: fee-aware transfers
//! - `metadata`: fungible metadata records
//! - `nft`: one-transaction NFT mint

mod fund;
mod metadata;
mod mint;
mod nft;
mod supply;
mod transfer;

pub use fund::{FundOptions, FundOutcome};
pub use metadata::{FungibleMetadataRequest, MetadataOutcome, MetadataSource};
pub use mint::{CreateMintRequest, CreatedMint};
pub use nft::{MintNftRequest, MintedNft, DEFAULT_ROYALTY_BASIS_POINTS};
pub use supply::MintOutcome;
pub use transfer::{TransferOutcome, TransferRequest};

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_instruction::Instruction;
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_signer::Signer;
use solana_transaction::Transaction;

use crate::config::Config;
use crate::error::{ToolError, ToolResult};
use crate::keys::load_keypair;
use crate::program::accounts::{AccountData, HoldingState, MintState};
use crate::program::pda::get_associated_token_address;
use crate::rpc::{self, LedgerRpc};

/// Client for the token operations, generic over the ledger connection.
pub struct TokenClient<R: LedgerRpc = RpcClient> {
    rpc: R,
    payer: Keypair,
}

impl TokenClient<RpcClient> {
    /// Connect to `config.rpc_url` and load the payer from `config.keypair_path`.
    pub fn from_config(config: &Config) -> ToolResult<Self> {
        let payer = load_keypair(&config.keypair_path)?;
        Ok(Self::new(rpc::connect(&config.rpc_url), payer))
    }
}

impl<R: LedgerRpc> TokenClient<R> {
    pub fn new(rpc: R, payer: Keypair) -> Self {
        Self { rpc, payer }
    }

    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    pub fn payer(&self) -> &Keypair {
        &self.payer
    }

    pub fn payer_pubkey(&self) -> Pubkey {
        self.payer.pubkey()
    }

    // ========================================================================
    // Account Fetchers
    // ========================================================================

    /// Fetch and decode a mint.
    ///
    /// Missing accounts are `AccountNotFound`; accounts owned by anything
    /// other than a token program are `NotAMint`.
    pub async fn get_mint(&self, mint: &Pubkey) -> ToolResult<MintState> {
        let account = self.require_account(mint, "mint").await?;
        MintState::from_account(mint, &account)
    }

    /// Fetch a holding account, `None` if it does not exist yet.
    pub async fn get_holding(
        &self,
        owner: &Pubkey,
        mint: &MintState,
    ) -> ToolResult<Option<HoldingState>> {
        let address = get_associated_token_address(owner, &mint.address, &mint.token_program.id());
        match self.rpc.get_account(&address).await? {
            Some(account) => Ok(Some(HoldingState::from_account(&address, &account)?)),
            None => Ok(None),
        }
    }

    pub async fn account_exists(&self, address: &Pubkey) -> ToolResult<bool> {
        Ok(self.rpc.get_account(address).await?.is_some())
    }

    async fn require_account(&self, address: &Pubkey, what: &str) -> ToolResult<AccountData> {
        self.rpc
            .get_account(address)
            .await?
            .ok_or_else(|| ToolError::AccountNotFound(format!("{} {}", what, address)))
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Sign `instructions` with the payer plus `extra_signers` and submit them
    /// as one transaction.
    pub(crate) async fn send(
        &self,
        instructions: &[Instruction],
        extra_signers: &[&Keypair],
    ) -> ToolResult<Signature> {
        let blockhash = self.rpc.latest_blockhash().await?;

        let mut signers: Vec<&Keypair> = Vec::with_capacity(extra_signers.len() + 1);
        signers.push(&self.payer);
        signers.extend_from_slice(extra_signers);

        let transaction = Transaction::new_signed_with_payer(
            instructions,
            Some(&self.payer.pubkey()),
            &signers,
            blockhash,
        );

        tracing::debug!(
            instructions = instructions.len(),
            signers = signers.len(),
            "Submitting transaction"
        );
        let signature = self.rpc.send_and_confirm(&transaction).await?;
        tracing::info!(%signature, "Transaction confirmed");
        Ok(signature)
    }
}
