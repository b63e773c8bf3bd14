//! Constants for the token programs this crate talks to.
//!
//! This module contains program IDs, seeds, discriminators, and size constants
//! matching the on-chain programs exactly.

use solana_pubkey::Pubkey;
use std::str::FromStr;

// ============================================================================
// Program IDs
// ============================================================================

lazy_static::lazy_static! {
    /// Metaplex Token Metadata Program ID
    pub static ref METADATA_PROGRAM_ID: Pubkey = Pubkey::from_str("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s").unwrap();
}

/// SPL Token Program ID
pub const TOKEN_PROGRAM_ID: Pubkey = spl_token::ID;

/// Token-2022 Program ID (required for the transfer-fee extension)
pub const TOKEN_2022_PROGRAM_ID: Pubkey = spl_token_2022::ID;

/// Associated Token Account Program ID
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey = spl_associated_token_account::ID;

/// System Program ID
pub const SYSTEM_PROGRAM_ID: Pubkey = solana_sdk_ids::system_program::ID;

/// Instructions Sysvar ID (read by Metaplex `Create`/`Mint`)
pub const INSTRUCTIONS_SYSVAR_ID: Pubkey = solana_sdk_ids::sysvar::instructions::ID;

// ============================================================================
// Instruction Discriminators
// ============================================================================

/// Metaplex token-metadata instruction discriminators (single byte indices)
pub mod metadata_instruction {
    pub const CREATE: u8 = 42;
    pub const MINT: u8 = 43;
}

/// Associated-token-account instruction discriminators
pub mod ata_instruction {
    pub const CREATE: u8 = 0;
    pub const CREATE_IDEMPOTENT: u8 = 1;
}

/// Token program instruction tags used when inspecting built transactions
pub mod token_instruction {
    pub const INITIALIZE_MINT: u8 = 0;
    pub const MINT_TO: u8 = 7;
    pub const TRANSFER_FEE_EXTENSION: u8 = 26;

    /// Sub-instruction tags under `TRANSFER_FEE_EXTENSION`
    pub const INITIALIZE_TRANSFER_FEE_CONFIG: u8 = 0;
    pub const TRANSFER_CHECKED_WITH_FEE: u8 = 1;
}

// ============================================================================
// PDA Seeds
// ============================================================================

/// Metadata PDA seed
pub const METADATA_SEED: &[u8] = b"metadata";
/// Master edition PDA seed suffix
pub const EDITION_SEED: &[u8] = b"edition";

// ============================================================================
// Account Sizes
// ============================================================================

/// Base mint account size in bytes (no extensions)
pub const MINT_SIZE: usize = 82;
/// Base token account size in bytes (no extensions)
pub const TOKEN_ACCOUNT_SIZE: usize = 165;

// ============================================================================
// Amounts
// ============================================================================

/// Lamports in one SOL
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Basis points denominator (100%)
pub const MAX_BASIS_POINTS: u16 = 10_000;

// ============================================================================
// Metadata Limits
// ============================================================================

/// Maximum metadata name length in bytes
pub const MAX_NAME_LENGTH: usize = 32;
/// Maximum metadata symbol length in bytes
pub const MAX_SYMBOL_LENGTH: usize = 10;
/// Maximum metadata URI length in bytes
pub const MAX_URI_LENGTH: usize = 200;
/// Maximum creators in a metadata record
pub const MAX_CREATORS: usize = 5;
