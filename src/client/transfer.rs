use solana_pubkey::Pubkey;
use solana_signature::Signature;

use super::TokenClient;
use crate::error::{ToolError, ToolResult};
use crate::program::instructions::{build_create_ata_idempotent_ix, build_transfer_ix};
use crate::program::pda::get_associated_token_address;
use crate::program::types::TransferParams;
use crate::program::utils::{calculate_transfer_fee, to_base_units, transfer_fee_is_exact};
use crate::rpc::LedgerRpc;

#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub mint: Pubkey,
    /// Recipient wallet; its holding account is derived.
    pub recipient: Pubkey,
    /// Whole tokens.
    pub amount: u64,
}

#[derive(Debug, Clone)]
pub struct TransferOutcome {
    pub signature: Signature,
    pub source: Pubkey,
    pub destination: Pubkey,
    pub created_destination: bool,
    pub base_units: u64,
    pub decimals: u8,
    /// Fee asserted in the instruction.
    pub expected_fee: u64,
    /// Fee withheld on the destination account as read back after confirmation.
    pub withheld_amount: u64,
}

impl<R: LedgerRpc> TokenClient<R> {
    /// Transfer from the payer to `recipient`, asserting the transfer fee.
    ///
    /// The fee is computed locally from the fee configuration in force at the
    /// current epoch. Amounts whose fee the token program would round up are
    /// refused before anything is submitted.
    pub async fn transfer_with_fee(&self, request: &TransferRequest) -> ToolResult<TransferOutcome> {
        let owner = self.payer_pubkey();
        let mint = self.get_mint(&request.mint).await?;
        let token_program = mint.token_program;
        let base_units = to_base_units(request.amount, mint.decimals)?;

        let expected_fee = match mint.transfer_fee {
            Some(schedule) => {
                let epoch = self.rpc.get_epoch().await?;
                let fee = schedule.fee_at(epoch);
                if !transfer_fee_is_exact(base_units, fee.basis_points, fee.maximum_fee) {
                    return Err(ToolError::Validation(format!(
                        "{} base units at {} bps does not divide evenly and the token program \
                         would round the fee up; transfer a multiple of {} base units",
                        base_units,
                        fee.basis_points,
                        exact_fee_step(fee.basis_points)
                    )));
                }
                tracing::debug!(epoch, bps = fee.basis_points, "Transfer fee in force");
                calculate_transfer_fee(base_units, fee.basis_points, fee.maximum_fee)
            }
            None => 0,
        };

        let source = get_associated_token_address(&owner, &request.mint, &token_program.id());
        let holding = self.get_holding(&owner, &mint).await?.ok_or_else(|| {
            ToolError::AccountNotFound(format!("sender holding account {}", source))
        })?;
        if holding.amount < base_units {
            return Err(ToolError::Validation(format!(
                "insufficient balance: holding {} base units, transferring {}",
                holding.amount, base_units
            )));
        }

        let destination =
            get_associated_token_address(&request.recipient, &request.mint, &token_program.id());
        let created_destination = !self.account_exists(&destination).await?;

        let mut instructions = Vec::with_capacity(2);
        if created_destination {
            tracing::info!(%destination, "Creating recipient holding account");
            instructions.push(build_create_ata_idempotent_ix(
                &owner,
                &request.recipient,
                &request.mint,
                token_program,
            ));
        }
        instructions.push(build_transfer_ix(&TransferParams {
            owner,
            mint: request.mint,
            recipient: request.recipient,
            amount: base_units,
            decimals: mint.decimals,
            expected_fee,
            token_program,
        })?);

        tracing::debug!(base_units, expected_fee, "Transferring with fee");
        let signature = self.send(&instructions, &[]).await?;

        let withheld_amount = self
            .get_holding(&request.recipient, &mint)
            .await?
            .map(|h| h.withheld_amount)
            .unwrap_or(0);

        Ok(TransferOutcome {
            signature,
            source,
            destination,
            created_destination,
            base_units,
            decimals: mint.decimals,
            expected_fee,
            withheld_amount,
        })
    }
}

/// Smallest amount step whose fee is a whole number of base units.
fn exact_fee_step(basis_points: u16) -> u64 {
    let bps = u64::from(basis_points.max(1));
    10_000 / gcd(10_000, bps)
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}
