//! PDA (Program Derived Address) derivation functions.
//!
//! Holding accounts live under the associated-token program; metadata and
//! master-edition records live under the Metaplex token-metadata program.

use solana_pubkey::Pubkey;

use crate::program::constants::{
    ASSOCIATED_TOKEN_PROGRAM_ID, EDITION_SEED, METADATA_PROGRAM_ID, METADATA_SEED,
};

/// Get the associated token account (holding account) for a wallet and mint.
///
/// Seeds: [wallet, token_program, mint] under the associated-token program
pub fn get_associated_token_address(
    wallet: &Pubkey,
    mint: &Pubkey,
    token_program_id: &Pubkey,
) -> Pubkey {
    Pubkey::find_program_address(
        &[wallet.as_ref(), token_program_id.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
    .0
}

/// Get the Metadata PDA for a mint.
///
/// Seeds: ["metadata", metadata_program, mint]
pub fn get_metadata_pda(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[METADATA_SEED, METADATA_PROGRAM_ID.as_ref(), mint.as_ref()],
        &METADATA_PROGRAM_ID,
    )
}

/// Get the Master Edition PDA for a mint.
///
/// Seeds: ["metadata", metadata_program, mint, "edition"]
pub fn get_master_edition_pda(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            METADATA_SEED,
            METADATA_PROGRAM_ID.as_ref(),
            mint.as_ref(),
            EDITION_SEED,
        ],
        &METADATA_PROGRAM_ID,
    )
}
