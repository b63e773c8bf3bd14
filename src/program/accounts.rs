//! Decoded views of remote token accounts.
//!
//! Both classic SPL Token and Token-2022 accounts are decoded through
//! `spl_token_2022`'s `StateWithExtensions`, which accepts the base layout
//! with or without trailing extensions.

use solana_pubkey::Pubkey;
use spl_token_2022::extension::transfer_fee::{TransferFee, TransferFeeAmount, TransferFeeConfig};
use spl_token_2022::extension::{BaseStateWithExtensions, StateWithExtensions};
use spl_token_2022::state::{Account, Mint};

use crate::error::{ToolError, ToolResult};
use crate::program::types::TokenProgram;

/// Raw account as returned by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountData {
    pub owner: Pubkey,
    pub lamports: u64,
    pub data: Vec<u8>,
}

/// One entry of a mint's transfer-fee schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpochFee {
    /// First epoch this fee applies to.
    pub epoch: u64,
    pub basis_points: u16,
    pub maximum_fee: u64,
}

/// Transfer-fee schedule of a mint.
///
/// A fee change only takes effect from `newer.epoch`; until then transfers
/// are charged the `older` fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferFeeState {
    pub older: EpochFee,
    pub newer: EpochFee,
    /// Fees harvested into the mint, not yet withdrawn
    pub withheld_amount: u64,
}

impl TransferFeeState {
    /// The fee charged for transfers in `epoch`.
    pub fn fee_at(&self, epoch: u64) -> EpochFee {
        if epoch >= self.newer.epoch {
            self.newer
        } else {
            self.older
        }
    }
}

/// Mint account
#[derive(Debug, Clone)]
pub struct MintState {
    pub address: Pubkey,
    pub token_program: TokenProgram,
    pub decimals: u8,
    pub supply: u64,
    pub mint_authority: Option<Pubkey>,
    pub freeze_authority: Option<Pubkey>,
    pub transfer_fee: Option<TransferFeeState>,
}

impl MintState {
    /// Decode from a fetched account, checking the owning program.
    pub fn from_account(address: &Pubkey, account: &AccountData) -> ToolResult<Self> {
        let token_program =
            TokenProgram::try_from(&account.owner).map_err(|_| ToolError::NotAMint {
                address: address.to_string(),
                owner: account.owner.to_string(),
            })?;

        let state = StateWithExtensions::<Mint>::unpack(&account.data)
            .map_err(|e| ToolError::Validation(format!("mint {}: {}", address, e)))?;

        let transfer_fee = state
            .get_extension::<TransferFeeConfig>()
            .ok()
            .map(|config| TransferFeeState {
                older: epoch_fee(&config.older_transfer_fee),
                newer: epoch_fee(&config.newer_transfer_fee),
                withheld_amount: u64::from(config.withheld_amount),
            });

        Ok(Self {
            address: *address,
            token_program,
            decimals: state.base.decimals,
            supply: state.base.supply,
            mint_authority: state.base.mint_authority.into(),
            freeze_authority: state.base.freeze_authority.into(),
            transfer_fee,
        })
    }
}

fn epoch_fee(fee: &TransferFee) -> EpochFee {
    EpochFee {
        epoch: u64::from(fee.epoch),
        basis_points: u16::from(fee.transfer_fee_basis_points),
        maximum_fee: u64::from(fee.maximum_fee),
    }
}

/// Holding (token) account
#[derive(Debug, Clone)]
pub struct HoldingState {
    pub address: Pubkey,
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    /// Transfer fees withheld on this account (Token-2022 only)
    pub withheld_amount: u64,
}

impl HoldingState {
    /// Decode from a fetched account.
    pub fn from_account(address: &Pubkey, account: &AccountData) -> ToolResult<Self> {
        TokenProgram::try_from(&account.owner)?;

        let state = StateWithExtensions::<Account>::unpack(&account.data)
            .map_err(|e| ToolError::Validation(format!("token account {}: {}", address, e)))?;

        let withheld_amount = state
            .get_extension::<TransferFeeAmount>()
            .map(|ext| u64::from(ext.withheld_amount))
            .unwrap_or(0);

        Ok(Self {
            address: *address,
            mint: state.base.mint,
            owner: state.base.owner,
            amount: state.base.amount,
            withheld_amount,
        })
    }
}
