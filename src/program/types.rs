//! Type definitions for token-program interaction.
//!
//! This module contains enums, parameter structs, and the borsh argument
//! layouts used by the Metaplex token-metadata instructions.

use borsh::BorshSerialize;
use solana_pubkey::Pubkey;

use crate::error::ToolError;
use crate::program::constants::{TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID};

// ============================================================================
// Enums
// ============================================================================

/// Which token program owns a mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenProgram {
    /// Classic SPL Token program
    Classic,
    /// Token-2022 (extensions, e.g. transfer fees)
    Token2022,
}

impl TokenProgram {
    /// Program ID for this token program.
    pub fn id(&self) -> Pubkey {
        match self {
            TokenProgram::Classic => TOKEN_PROGRAM_ID,
            TokenProgram::Token2022 => TOKEN_2022_PROGRAM_ID,
        }
    }
}

impl TryFrom<&Pubkey> for TokenProgram {
    type Error = ToolError;

    fn try_from(owner: &Pubkey) -> Result<Self, Self::Error> {
        if *owner == TOKEN_PROGRAM_ID {
            Ok(TokenProgram::Classic)
        } else if *owner == TOKEN_2022_PROGRAM_ID {
            Ok(TokenProgram::Token2022)
        } else {
            Err(ToolError::Validation(format!(
                "{} is not a token program",
                owner
            )))
        }
    }
}

/// Metaplex token standard
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum TokenStandard {
    NonFungible = 0,
    FungibleAsset = 1,
    Fungible = 2,
    NonFungibleEdition = 3,
    ProgrammableNonFungible = 4,
    ProgrammableNonFungibleEdition = 5,
}

/// Edition print supply for a master edition
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize)]
pub enum PrintSupply {
    Zero,
    Limited(u64),
    Unlimited,
}

// ============================================================================
// Parameter Structs
// ============================================================================

/// Transfer-fee extension configuration for a new mint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferFeeParams {
    /// Fee rate in basis points (0-10000)
    pub basis_points: u16,
    /// Maximum fee per transfer in base units
    pub maximum_fee: u64,
    /// Authority allowed to change the fee configuration
    pub config_authority: Option<Pubkey>,
    /// Authority allowed to withdraw withheld fees
    pub withdraw_authority: Option<Pubkey>,
}

/// Parameters for creating a mint
#[derive(Debug, Clone)]
pub struct MintParams {
    /// Payer funding the mint account
    pub payer: Pubkey,
    /// New mint address (its keypair signs the transaction)
    pub mint: Pubkey,
    /// Authority allowed to mint supply
    pub mint_authority: Pubkey,
    /// Optional freeze authority
    pub freeze_authority: Option<Pubkey>,
    /// Number of decimals
    pub decimals: u8,
    /// Transfer-fee extension; requires Token-2022 when present
    pub transfer_fee: Option<TransferFeeParams>,
}

impl MintParams {
    /// Token program this mint will be created under.
    pub fn token_program(&self) -> TokenProgram {
        if self.transfer_fee.is_some() {
            TokenProgram::Token2022
        } else {
            TokenProgram::Classic
        }
    }
}

/// Parameters for a fee-aware transfer
#[derive(Debug, Clone)]
pub struct TransferParams {
    /// Owner of the source holding account
    pub owner: Pubkey,
    /// Mint being transferred
    pub mint: Pubkey,
    /// Recipient wallet (not the holding account)
    pub recipient: Pubkey,
    /// Amount in base units
    pub amount: u64,
    /// Mint decimals
    pub decimals: u8,
    /// Fee the ledger is expected to withhold
    pub expected_fee: u64,
    /// Token program owning the mint
    pub token_program: TokenProgram,
}

/// A verified or unverified creator entry on a metadata record
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize)]
pub struct Creator {
    pub address: Pubkey,
    pub verified: bool,
    /// Share of royalties in percent (all creators sum to 100)
    pub share: u8,
}

/// Parameters for a Metaplex `Create` instruction
#[derive(Debug, Clone)]
pub struct CreateMetadataParams {
    pub mint: Pubkey,
    /// Mint authority (signer)
    pub authority: Pubkey,
    pub payer: Pubkey,
    pub update_authority: Pubkey,
    /// Whether the mint account is created by this instruction
    pub mint_is_signer: bool,
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub creators: Option<Vec<Creator>>,
    pub is_mutable: bool,
    pub token_standard: TokenStandard,
    pub decimals: Option<u8>,
    pub print_supply: Option<PrintSupply>,
    pub token_program: TokenProgram,
}

// ============================================================================
// Instruction Argument Layouts
// ============================================================================

/// Collection reference (always `None` here, kept for layout)
#[derive(Debug, Clone, BorshSerialize)]
pub struct Collection {
    pub verified: bool,
    pub key: Pubkey,
}

/// Metaplex `AssetData`
#[derive(Debug, Clone, BorshSerialize)]
pub struct AssetData {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub creators: Option<Vec<Creator>>,
    pub primary_sale_happened: bool,
    pub is_mutable: bool,
    pub token_standard: TokenStandard,
    pub collection: Option<Collection>,
    /// `Uses` is never set; `()` keeps the `None` tag byte
    pub uses: Option<()>,
    /// `CollectionDetails` is never set
    pub collection_details: Option<()>,
    pub rule_set: Option<Pubkey>,
}

/// Metaplex `CreateArgs`
#[derive(Debug, Clone, BorshSerialize)]
pub enum CreateArgs {
    V1 {
        asset_data: AssetData,
        decimals: Option<u8>,
        print_supply: Option<PrintSupply>,
    },
}

/// Metaplex `MintArgs`
#[derive(Debug, Clone, BorshSerialize)]
pub enum MintArgs {
    V1 {
        amount: u64,
        /// `AuthorizationData` is never set
        authorization_data: Option<()>,
    },
}
