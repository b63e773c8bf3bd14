//! Ledger access behind a trait.
//!
//! Every network round-trip the operations make goes through [`LedgerRpc`].
//! The production implementation is the nonblocking `RpcClient`; tests plug in
//! a recording double.

use async_trait::async_trait;
use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_request::{RpcError, RpcResponseErrorData};
use solana_commitment_config::CommitmentConfig;
use solana_hash::Hash;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_transaction::Transaction;

use crate::error::{ToolError, ToolResult};
use crate::program::accounts::AccountData;

/// The subset of JSON-RPC the operations need.
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Endpoint description, used in log lines.
    fn url(&self) -> String;

    async fn get_balance(&self, address: &Pubkey) -> ToolResult<u64>;

    async fn request_airdrop(&self, address: &Pubkey, lamports: u64) -> ToolResult<Signature>;

    /// Whether the signature has reached the client's commitment level.
    async fn confirm_signature(&self, signature: &Signature) -> ToolResult<bool>;

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> ToolResult<u64>;

    /// Current epoch, which selects the transfer fee in force.
    async fn get_epoch(&self) -> ToolResult<u64>;

    /// Fetch an account, `None` when it does not exist.
    async fn get_account(&self, address: &Pubkey) -> ToolResult<Option<AccountData>>;

    async fn latest_blockhash(&self) -> ToolResult<Hash>;

    /// Submit a signed transaction and wait for confirmation.
    async fn send_and_confirm(&self, transaction: &Transaction) -> ToolResult<Signature>;
}

/// Build an RPC client at `confirmed` commitment.
pub fn connect(rpc_url: &str) -> RpcClient {
    RpcClient::new_with_commitment(rpc_url.to_string(), CommitmentConfig::confirmed())
}

#[async_trait]
impl LedgerRpc for RpcClient {
    fn url(&self) -> String {
        RpcClient::url(self)
    }

    async fn get_balance(&self, address: &Pubkey) -> ToolResult<u64> {
        Ok(RpcClient::get_balance(self, address).await?)
    }

    async fn request_airdrop(&self, address: &Pubkey, lamports: u64) -> ToolResult<Signature> {
        Ok(RpcClient::request_airdrop(self, address, lamports).await?)
    }

    async fn confirm_signature(&self, signature: &Signature) -> ToolResult<bool> {
        Ok(self.confirm_transaction(signature).await?)
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> ToolResult<u64> {
        Ok(self.get_minimum_balance_for_rent_exemption(data_len).await?)
    }

    async fn get_epoch(&self) -> ToolResult<u64> {
        Ok(self.get_epoch_info().await?.epoch)
    }

    async fn get_account(&self, address: &Pubkey) -> ToolResult<Option<AccountData>> {
        let response = self
            .get_account_with_commitment(address, self.commitment())
            .await?;
        Ok(response.value.map(|account| AccountData {
            owner: account.owner,
            lamports: account.lamports,
            data: account.data,
        }))
    }

    async fn latest_blockhash(&self) -> ToolResult<Hash> {
        Ok(self.get_latest_blockhash().await?)
    }

    async fn send_and_confirm(&self, transaction: &Transaction) -> ToolResult<Signature> {
        self.send_and_confirm_transaction(transaction)
            .await
            .map_err(|e| ToolError::Transaction(describe_send_error(&e)))
    }
}

/// Flatten a send error, appending preflight program logs when present.
fn describe_send_error(error: &ClientError) -> String {
    let mut message = error.to_string();
    if let ClientErrorKind::RpcError(RpcError::RpcResponseError {
        data: RpcResponseErrorData::SendTransactionPreflightFailure(result),
        ..
    }) = error.kind()
    {
        if let Some(logs) = &result.logs {
            for line in logs {
                message.push('\n');
                message.push_str(line);
            }
        }
    }
    message
}
