//! Instruction builders for mint creation, supply, transfers, and metadata.
//!
//! Token-program instructions come from the published `spl_token_2022`
//! builders (which accept both the classic and the 2022 program id where the
//! instruction is shared). Associated-token and Metaplex instructions are laid
//! out here by hand.

use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;
use spl_token_2022::extension::transfer_fee::instruction::{
    initialize_transfer_fee_config, transfer_checked_with_fee,
};
use spl_associated_token_account::instruction::{
    create_associated_token_account, create_associated_token_account_idempotent,
};
use spl_token_2022::extension::ExtensionType;

use crate::error::{ToolError, ToolResult};
use crate::program::constants::{
    metadata_instruction, token_instruction, ASSOCIATED_TOKEN_PROGRAM_ID,
    INSTRUCTIONS_SYSVAR_ID, METADATA_PROGRAM_ID, MINT_SIZE, SYSTEM_PROGRAM_ID,
};
use crate::program::pda::{get_associated_token_address, get_master_edition_pda, get_metadata_pda};
use crate::program::types::{
    AssetData, CreateArgs, CreateMetadataParams, MintArgs, MintParams, TokenProgram,
    TokenStandard, TransferParams,
};
use crate::program::utils::{
    validate_basis_points, validate_creators, validate_metadata_uri, validate_name_symbol,
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Create an account meta for a signer+writable account.
fn signer_mut(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new(pubkey, true)
}

/// Create an account meta for a read-only signer.
fn signer(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new_readonly(pubkey, true)
}

/// Create an account meta for a writable account.
fn writable(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new(pubkey, false)
}

/// Create an account meta for a read-only account.
fn readonly(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new_readonly(pubkey, false)
}

/// Placeholder for an omitted optional Metaplex account.
fn omitted() -> AccountMeta {
    readonly(*METADATA_PROGRAM_ID)
}

fn instruction_error(e: impl std::fmt::Display) -> ToolError {
    ToolError::Instruction(e.to_string())
}

// ============================================================================
// Mint Creation
// ============================================================================

/// Size of a mint account, with room for the transfer-fee extension if requested.
pub fn mint_account_size(with_transfer_fee: bool) -> ToolResult<usize> {
    if !with_transfer_fee {
        return Ok(MINT_SIZE);
    }
    ExtensionType::try_calculate_account_len::<spl_token_2022::state::Mint>(&[
        ExtensionType::TransferFeeConfig,
    ])
    .map_err(instruction_error)
}

/// Build the system `create_account` instruction for a new mint.
pub fn build_create_mint_account_ix(
    payer: &Pubkey,
    mint: &Pubkey,
    lamports: u64,
    space: usize,
    token_program: TokenProgram,
) -> Instruction {
    solana_system_interface::instruction::create_account(
        payer,
        mint,
        lamports,
        space as u64,
        &token_program.id(),
    )
}

/// Build the full mint-creation instruction list.
///
/// Order:
/// 0. system create_account
/// 1. initialize_transfer_fee_config (fee mints only)
/// 2. initialize_mint
///
/// The token program requires extensions to be initialized before the mint.
pub fn build_create_mint_ixs(params: &MintParams, lamports: u64) -> ToolResult<Vec<Instruction>> {
    let token_program = params.token_program();
    let space = mint_account_size(params.transfer_fee.is_some())?;

    let mut ixs = vec![build_create_mint_account_ix(
        &params.payer,
        &params.mint,
        lamports,
        space,
        token_program,
    )];

    if let Some(fee) = &params.transfer_fee {
        validate_basis_points(fee.basis_points, "transfer fee")?;
        ixs.push(
            initialize_transfer_fee_config(
                &token_program.id(),
                &params.mint,
                fee.config_authority.as_ref(),
                fee.withdraw_authority.as_ref(),
                fee.basis_points,
                fee.maximum_fee,
            )
            .map_err(instruction_error)?,
        );
    }

    ixs.push(
        spl_token_2022::instruction::initialize_mint(
            &token_program.id(),
            &params.mint,
            &params.mint_authority,
            params.freeze_authority.as_ref(),
            params.decimals,
        )
        .map_err(instruction_error)?,
    );

    verify_mint_instruction_order(&ixs)?;
    Ok(ixs)
}

fn is_token_program(program_id: &Pubkey) -> bool {
    TokenProgram::try_from(program_id).is_ok()
}

/// Check that any transfer-fee initialization precedes mint initialization.
pub fn verify_mint_instruction_order(ixs: &[Instruction]) -> ToolResult<()> {
    let init_mint = ixs.iter().position(|ix| {
        is_token_program(&ix.program_id)
            && ix.data.first() == Some(&token_instruction::INITIALIZE_MINT)
    });
    let init_fee = ixs.iter().position(|ix| {
        is_token_program(&ix.program_id)
            && ix.data.first() == Some(&token_instruction::TRANSFER_FEE_EXTENSION)
            && ix.data.get(1) == Some(&token_instruction::INITIALIZE_TRANSFER_FEE_CONFIG)
    });

    match (init_fee, init_mint) {
        (Some(fee), Some(mint)) if fee > mint => Err(ToolError::Instruction(format!(
            "transfer fee config initialized at {} after mint initialization at {}",
            fee, mint
        ))),
        _ => Ok(()),
    }
}

// ============================================================================
// Holding Accounts & Supply
// ============================================================================

/// Build an associated-token-account Create instruction for `wallet`,
/// funded by `payer`.
pub fn build_create_ata_ix(
    payer: &Pubkey,
    wallet: &Pubkey,
    mint: &Pubkey,
    token_program: TokenProgram,
) -> Instruction {
    create_associated_token_account(payer, wallet, mint, &token_program.id())
}

/// Same as [`build_create_ata_ix`] but succeeds if the account already exists.
pub fn build_create_ata_idempotent_ix(
    payer: &Pubkey,
    wallet: &Pubkey,
    mint: &Pubkey,
    token_program: TokenProgram,
) -> Instruction {
    create_associated_token_account_idempotent(payer, wallet, mint, &token_program.id())
}

/// Build a MintTo instruction crediting `destination` (a holding account).
pub fn build_mint_to_ix(
    mint: &Pubkey,
    destination: &Pubkey,
    authority: &Pubkey,
    amount: u64,
    token_program: TokenProgram,
) -> ToolResult<Instruction> {
    spl_token_2022::instruction::mint_to(
        &token_program.id(),
        mint,
        destination,
        authority,
        &[],
        amount,
    )
    .map_err(instruction_error)
}

/// Build a transfer that asserts the withheld fee.
///
/// Token-2022 mints get `TransferCheckedWithFee`; the ledger recomputes the
/// fee and rejects the transaction if it differs from `expected_fee`.
/// Classic mints carry no fee and get a plain `TransferChecked`.
pub fn build_transfer_ix(params: &TransferParams) -> ToolResult<Instruction> {
    let token_program_id = params.token_program.id();
    let source = get_associated_token_address(&params.owner, &params.mint, &token_program_id);
    let destination =
        get_associated_token_address(&params.recipient, &params.mint, &token_program_id);

    match params.token_program {
        TokenProgram::Token2022 => transfer_checked_with_fee(
            &token_program_id,
            &source,
            &params.mint,
            &destination,
            &params.owner,
            &[],
            params.amount,
            params.decimals,
            params.expected_fee,
        )
        .map_err(instruction_error),
        TokenProgram::Classic => {
            if params.expected_fee != 0 {
                return Err(ToolError::Validation(
                    "classic SPL Token mints cannot withhold transfer fees".to_string(),
                ));
            }
            spl_token_2022::instruction::transfer_checked(
                &token_program_id,
                &source,
                &params.mint,
                &destination,
                &params.owner,
                &[],
                params.amount,
                params.decimals,
            )
            .map_err(instruction_error)
        }
    }
}

// ============================================================================
// Metaplex Token Metadata
// ============================================================================

/// Build a Metaplex `Create` (V1) instruction.
///
/// Accounts:
/// 0. metadata (mut) - Metadata PDA
/// 1. master_edition (mut, optional) - NonFungible only
/// 2. mint (mut, signer when created here)
/// 3. authority (signer) - Mint authority
/// 4. payer (signer, mut)
/// 5. update_authority (signer)
/// 6. system_program (readonly)
/// 7. sysvar_instructions (readonly)
/// 8. spl_token_program (readonly)
pub fn build_create_metadata_ix(params: &CreateMetadataParams) -> ToolResult<Instruction> {
    validate_name_symbol(&params.name, &params.symbol)?;
    validate_metadata_uri(&params.uri)?;
    validate_basis_points(params.seller_fee_basis_points, "seller fee")?;
    if let Some(creators) = &params.creators {
        validate_creators(creators)?;
    }

    let (metadata, _) = get_metadata_pda(&params.mint);
    let master_edition = match params.token_standard {
        TokenStandard::NonFungible | TokenStandard::ProgrammableNonFungible => {
            writable(get_master_edition_pda(&params.mint).0)
        }
        _ => omitted(),
    };
    let mint = if params.mint_is_signer {
        signer_mut(params.mint)
    } else {
        writable(params.mint)
    };

    let args = CreateArgs::V1 {
        asset_data: AssetData {
            name: params.name.clone(),
            symbol: params.symbol.clone(),
            uri: params.uri.clone(),
            seller_fee_basis_points: params.seller_fee_basis_points,
            creators: params.creators.clone(),
            primary_sale_happened: false,
            is_mutable: params.is_mutable,
            token_standard: params.token_standard,
            collection: None,
            uses: None,
            collection_details: None,
            rule_set: None,
        },
        decimals: params.decimals,
        print_supply: params.print_supply,
    };

    let mut data = vec![metadata_instruction::CREATE];
    data.extend(borsh::to_vec(&args).map_err(instruction_error)?);

    Ok(Instruction {
        program_id: *METADATA_PROGRAM_ID,
        accounts: vec![
            writable(metadata),
            master_edition,
            mint,
            signer(params.authority),
            signer_mut(params.payer),
            signer(params.update_authority),
            readonly(SYSTEM_PROGRAM_ID),
            readonly(INSTRUCTIONS_SYSVAR_ID),
            readonly(params.token_program.id()),
        ],
        data,
    })
}

/// Build a Metaplex `Mint` (V1) instruction for a non-programmable asset.
///
/// Accounts:
/// 0. token (mut) - Holding account, created if missing
/// 1. token_owner (readonly)
/// 2. metadata (readonly)
/// 3. master_edition (readonly)
/// 4. token_record (omitted)
/// 5. mint (mut)
/// 6. authority (signer) - Mint authority
/// 7. delegate_record (omitted)
/// 8. payer (signer, mut)
/// 9. system_program (readonly)
/// 10. sysvar_instructions (readonly)
/// 11. spl_token_program (readonly)
/// 12. spl_ata_program (readonly)
/// 13. authorization_rules_program (omitted)
/// 14. authorization_rules (omitted)
pub fn build_mint_asset_ix(
    mint: &Pubkey,
    owner: &Pubkey,
    authority: &Pubkey,
    payer: &Pubkey,
    amount: u64,
    token_program: TokenProgram,
) -> ToolResult<Instruction> {
    let token_program_id = token_program.id();
    let token = get_associated_token_address(owner, mint, &token_program_id);
    let (metadata, _) = get_metadata_pda(mint);
    let (master_edition, _) = get_master_edition_pda(mint);

    let args = MintArgs::V1 {
        amount,
        authorization_data: None,
    };
    let mut data = vec![metadata_instruction::MINT];
    data.extend(borsh::to_vec(&args).map_err(instruction_error)?);

    Ok(Instruction {
        program_id: *METADATA_PROGRAM_ID,
        accounts: vec![
            writable(token),
            readonly(*owner),
            readonly(metadata),
            readonly(master_edition),
            omitted(),
            writable(*mint),
            signer(*authority),
            omitted(),
            signer_mut(*payer),
            readonly(SYSTEM_PROGRAM_ID),
            readonly(INSTRUCTIONS_SYSVAR_ID),
            readonly(token_program_id),
            readonly(ASSOCIATED_TOKEN_PROGRAM_ID),
            omitted(),
            omitted(),
        ],
        data,
    })
}
