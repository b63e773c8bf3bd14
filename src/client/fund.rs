use std::time::Duration;

use solana_signature::Signature;

use super::TokenClient;
use crate::error::{is_rate_limited, ToolError, ToolResult};
use crate::program::constants::LAMPORTS_PER_SOL;
use crate::rpc::LedgerRpc;

/// Thresholds and polling for [`TokenClient::ensure_funded`].
#[derive(Debug, Clone)]
pub struct FundOptions {
    /// Balance at or above which no airdrop is requested.
    pub threshold_lamports: u64,
    /// Amount requested from the faucet.
    pub airdrop_lamports: u64,
    pub confirm_attempts: u32,
    pub poll_interval: Duration,
}

impl Default for FundOptions {
    fn default() -> Self {
        Self {
            threshold_lamports: LAMPORTS_PER_SOL / 2,
            airdrop_lamports: LAMPORTS_PER_SOL,
            confirm_attempts: 30,
            poll_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FundOutcome {
    /// Balance was already at the threshold; nothing was requested.
    AlreadyFunded { balance: u64 },
    Airdropped {
        signature: Signature,
        previous_balance: u64,
        balance: u64,
    },
}

impl FundOutcome {
    pub fn balance(&self) -> u64 {
        match self {
            FundOutcome::AlreadyFunded { balance } | FundOutcome::Airdropped { balance, .. } => {
                *balance
            }
        }
    }
}

impl<R: LedgerRpc> TokenClient<R> {
    /// Top up the payer from the faucet when its balance is below the threshold.
    ///
    /// Faucet failures are not retried; rate limiting surfaces as
    /// [`ToolError::FaucetRateLimited`].
    pub async fn ensure_funded(&self, options: &FundOptions) -> ToolResult<FundOutcome> {
        let payer = self.payer_pubkey();
        let balance = self.rpc.get_balance(&payer).await?;
        tracing::info!(%payer, balance, "Current balance");

        if balance >= options.threshold_lamports {
            return Ok(FundOutcome::AlreadyFunded { balance });
        }

        let signature = match self
            .rpc
            .request_airdrop(&payer, options.airdrop_lamports)
            .await
        {
            Ok(signature) => signature,
            Err(e) if is_rate_limited(&e.to_string()) => {
                tracing::warn!(error = %e, "Faucet rate limited");
                return Err(ToolError::FaucetRateLimited(e.to_string()));
            }
            Err(e) => return Err(e),
        };
        tracing::info!(%signature, lamports = options.airdrop_lamports, "Airdrop requested");

        self.wait_for_confirmation(&signature, options).await?;

        let new_balance = self.rpc.get_balance(&payer).await?;
        Ok(FundOutcome::Airdropped {
            signature,
            previous_balance: balance,
            balance: new_balance,
        })
    }

    async fn wait_for_confirmation(
        &self,
        signature: &Signature,
        options: &FundOptions,
    ) -> ToolResult<()> {
        for attempt in 1..=options.confirm_attempts {
            if self.rpc.confirm_signature(signature).await? {
                tracing::debug!(attempt, "Airdrop confirmed");
                return Ok(());
            }
            tokio::time::sleep(options.poll_interval).await;
        }
        Err(ToolError::AirdropNotConfirmed {
            signature: signature.to_string(),
            attempts: options.confirm_attempts,
        })
    }
}
