//! In-memory ledger and uploader doubles for the integration tests.
//!
//! `MockLedger` keeps a semantic model of lamport balances, mints, holding
//! accounts and metadata records, and serves them back in the on-chain byte
//! layouts. Submitted transactions are recorded and then applied atomically:
//! if any instruction fails, nothing changes.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use mintforge::client::TokenClient;
use mintforge::error::{ToolError, ToolResult};
use mintforge::program::accounts::AccountData;
use mintforge::program::constants::{
    ASSOCIATED_TOKEN_PROGRAM_ID, LAMPORTS_PER_SOL, METADATA_PROGRAM_ID, MINT_SIZE,
    SYSTEM_PROGRAM_ID, TOKEN_2022_PROGRAM_ID, TOKEN_ACCOUNT_SIZE, TOKEN_PROGRAM_ID,
};
use mintforge::program::pda::get_associated_token_address;
use mintforge::rpc::LedgerRpc;
use mintforge::storage::Uploader;
use solana_hash::Hash;
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_signer::Signer;
use spl_token_2022::extension::transfer_fee::TransferFee;
use solana_transaction::Transaction;

/// Size of a mint carrying the transfer-fee extension.
pub const FEE_MINT_SIZE: usize = 278;

const TRANSFER_FEE_CONFIG_LEN: usize = 108;

pub fn rent_for(len: usize) -> u64 {
    (128 + len as u64) * 6_960
}

// ============================================================================
// Model
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedInstruction {
    pub program_id: Pubkey,
    pub accounts: Vec<Pubkey>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockFee {
    pub epoch: u64,
    pub basis_points: u16,
    pub maximum_fee: u64,
}

#[derive(Debug, Clone)]
pub struct FeeConfig {
    pub older: MockFee,
    pub newer: MockFee,
    pub config_authority: Option<Pubkey>,
    pub withdraw_authority: Option<Pubkey>,
    pub withheld: u64,
}

#[derive(Debug, Clone)]
pub struct MockMint {
    pub token_program: Pubkey,
    pub space: usize,
    pub lamports: u64,
    pub initialized: bool,
    pub decimals: u8,
    pub mint_authority: Option<Pubkey>,
    pub freeze_authority: Option<Pubkey>,
    pub supply: u64,
    pub transfer_fee: Option<FeeConfig>,
}

#[derive(Debug, Clone)]
pub struct MockHolding {
    pub token_program: Pubkey,
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub withheld: u64,
    pub with_fee_extension: bool,
}

#[derive(Debug, Clone)]
enum Entry {
    Raw(AccountData),
    Mint(MockMint),
    Holding(MockHolding),
}

#[derive(Debug, Clone, Default)]
struct State {
    epoch: u64,
    lamports: HashMap<Pubkey, u64>,
    accounts: HashMap<Pubkey, Entry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirdropMode {
    Grant,
    RateLimited,
    NeverConfirms,
}

// ============================================================================
// MockLedger
// ============================================================================

pub struct MockLedger {
    state: Mutex<State>,
    transactions: Mutex<Vec<Vec<RecordedInstruction>>>,
    calls: AtomicUsize,
    airdrop_requests: AtomicUsize,
    airdrop_mode: Mutex<AirdropMode>,
    metadata_rejection: Mutex<Option<String>>,
    fail_metadata_mint: AtomicBool,
}

impl Default for MockLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            transactions: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            airdrop_requests: AtomicUsize::new(0),
            airdrop_mode: Mutex::new(AirdropMode::Grant),
            metadata_rejection: Mutex::new(None),
            fail_metadata_mint: AtomicBool::new(false),
        }
    }

    pub fn with_balance(self, address: Pubkey, lamports: u64) -> Self {
        self.state.lock().unwrap().lamports.insert(address, lamports);
        self
    }

    pub fn set_airdrop_mode(&self, mode: AirdropMode) {
        *self.airdrop_mode.lock().unwrap() = mode;
    }

    /// Fail every metadata `Create` with `message`.
    pub fn reject_metadata_with(&self, message: &str) {
        *self.metadata_rejection.lock().unwrap() = Some(message.to_string());
    }

    /// Fail every metadata `Mint`.
    pub fn fail_metadata_mint(&self) {
        self.fail_metadata_mint.store(true, Ordering::SeqCst);
    }

    pub fn set_epoch(&self, epoch: u64) {
        self.state.lock().unwrap().epoch = epoch;
    }

    /// Schedule a new transfer fee for `mint` from `epoch` on, keeping the fee
    /// in force now as the older entry.
    pub fn schedule_fee_change(&self, mint: &Pubkey, basis_points: u16, maximum_fee: u64, epoch: u64) {
        let mut state = self.state.lock().unwrap();
        let current_epoch = state.epoch;
        let Some(Entry::Mint(mock_mint)) = state.accounts.get_mut(mint) else {
            panic!("{} is not a mint", mint);
        };
        let config = mock_mint
            .transfer_fee
            .as_mut()
            .expect("mint has no transfer fee");
        config.older = if current_epoch >= config.newer.epoch {
            config.newer
        } else {
            config.older
        };
        config.newer = MockFee {
            epoch,
            basis_points,
            maximum_fee,
        };
    }

    pub fn insert_raw(&self, address: Pubkey, account: AccountData) {
        self.state
            .lock()
            .unwrap()
            .accounts
            .insert(address, Entry::Raw(account));
    }

    /// Total RPC calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn airdrop_count(&self) -> usize {
        self.airdrop_requests.load(Ordering::SeqCst)
    }

    /// Every submitted transaction, including rejected ones.
    pub fn transactions(&self) -> Vec<Vec<RecordedInstruction>> {
        self.transactions.lock().unwrap().clone()
    }

    pub fn balance(&self, address: &Pubkey) -> u64 {
        self.state
            .lock()
            .unwrap()
            .lamports
            .get(address)
            .copied()
            .unwrap_or(0)
    }

    pub fn exists(&self, address: &Pubkey) -> bool {
        self.state.lock().unwrap().accounts.contains_key(address)
    }

    pub fn mint(&self, address: &Pubkey) -> Option<MockMint> {
        match self.state.lock().unwrap().accounts.get(address) {
            Some(Entry::Mint(mint)) => Some(mint.clone()),
            _ => None,
        }
    }

    pub fn holding(&self, address: &Pubkey) -> Option<MockHolding> {
        match self.state.lock().unwrap().accounts.get(address) {
            Some(Entry::Holding(holding)) => Some(holding.clone()),
            _ => None,
        }
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn execute(&self, state: &mut State, ix: &RecordedInstruction, signers: &[Pubkey]) -> Result<(), String> {
        let program = ix.program_id;
        if program == SYSTEM_PROGRAM_ID {
            apply_system(state, ix, signers)
        } else if program == TOKEN_PROGRAM_ID || program == TOKEN_2022_PROGRAM_ID {
            apply_token(state, ix, signers)
        } else if program == ASSOCIATED_TOKEN_PROGRAM_ID {
            apply_associated_token(state, ix)
        } else if program == *METADATA_PROGRAM_ID {
            let rejection = self.metadata_rejection.lock().unwrap().clone();
            let fail_mint = self.fail_metadata_mint.load(Ordering::SeqCst);
            apply_metadata(state, ix, signers, rejection, fail_mint)
        } else {
            Err(format!("unknown program {}", program))
        }
    }
}

#[async_trait]
impl LedgerRpc for MockLedger {
    fn url(&self) -> String {
        "mock://ledger".to_string()
    }

    async fn get_balance(&self, address: &Pubkey) -> ToolResult<u64> {
        self.tick();
        Ok(self.balance(address))
    }

    async fn request_airdrop(&self, address: &Pubkey, lamports: u64) -> ToolResult<Signature> {
        self.tick();
        self.airdrop_requests.fetch_add(1, Ordering::SeqCst);
        match *self.airdrop_mode.lock().unwrap() {
            AirdropMode::RateLimited => Err(ToolError::Transaction(
                "HTTP status client error (429 Too Many Requests)".to_string(),
            )),
            AirdropMode::Grant => {
                *self
                    .state
                    .lock()
                    .unwrap()
                    .lamports
                    .entry(*address)
                    .or_insert(0) += lamports;
                Ok(airdrop_signature())
            }
            AirdropMode::NeverConfirms => Ok(airdrop_signature()),
        }
    }

    async fn confirm_signature(&self, _signature: &Signature) -> ToolResult<bool> {
        self.tick();
        Ok(*self.airdrop_mode.lock().unwrap() != AirdropMode::NeverConfirms)
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> ToolResult<u64> {
        self.tick();
        Ok(rent_for(data_len))
    }

    async fn get_epoch(&self) -> ToolResult<u64> {
        self.tick();
        Ok(self.state.lock().unwrap().epoch)
    }

    async fn get_account(&self, address: &Pubkey) -> ToolResult<Option<AccountData>> {
        self.tick();
        let state = self.state.lock().unwrap();
        let account = match state.accounts.get(address) {
            Some(Entry::Raw(raw)) => Some(raw.clone()),
            Some(Entry::Mint(mint)) => Some(AccountData {
                owner: mint.token_program,
                lamports: mint.lamports,
                data: encode_mint(mint),
            }),
            Some(Entry::Holding(holding)) => Some(AccountData {
                owner: holding.token_program,
                lamports: rent_for(TOKEN_ACCOUNT_SIZE),
                data: encode_holding(holding),
            }),
            None => state.lamports.get(address).map(|lamports| AccountData {
                owner: SYSTEM_PROGRAM_ID,
                lamports: *lamports,
                data: Vec::new(),
            }),
        };
        Ok(account)
    }

    async fn latest_blockhash(&self) -> ToolResult<Hash> {
        self.tick();
        Ok(Hash::new_from_array([7u8; 32]))
    }

    async fn send_and_confirm(&self, transaction: &Transaction) -> ToolResult<Signature> {
        self.tick();
        let message = &transaction.message;
        let keys = &message.account_keys;
        let signers: Vec<Pubkey> = keys
            .iter()
            .take(message.header.num_required_signatures as usize)
            .copied()
            .collect();

        let instructions: Vec<RecordedInstruction> = message
            .instructions
            .iter()
            .map(|ix| RecordedInstruction {
                program_id: keys[ix.program_id_index as usize],
                accounts: ix.accounts.iter().map(|i| keys[*i as usize]).collect(),
                data: ix.data.clone(),
            })
            .collect();
        self.transactions.lock().unwrap().push(instructions.clone());

        let mut state = self.state.lock().unwrap();
        let mut working = state.clone();
        for (index, ix) in instructions.iter().enumerate() {
            self.execute(&mut working, ix, &signers).map_err(|e| {
                ToolError::Transaction(format!("Error processing Instruction {}: {}", index, e))
            })?;
        }
        *state = working;

        Ok(transaction.signatures[0])
    }
}

fn airdrop_signature() -> Signature {
    Keypair::new().sign_message(b"airdrop")
}

// ============================================================================
// Instruction Effects
// ============================================================================

fn debit(state: &mut State, payer: &Pubkey, lamports: u64) -> Result<(), String> {
    let balance = state.lamports.entry(*payer).or_insert(0);
    if *balance < lamports {
        return Err(format!("insufficient funds for rent: {} < {}", balance, lamports));
    }
    *balance -= lamports;
    Ok(())
}

fn require_signer(signers: &[Pubkey], key: &Pubkey, role: &str) -> Result<(), String> {
    if signers.contains(key) {
        Ok(())
    } else {
        Err(format!("missing required signature for {} {}", role, key))
    }
}

fn apply_system(state: &mut State, ix: &RecordedInstruction, signers: &[Pubkey]) -> Result<(), String> {
    let tag = u32::from_le_bytes(ix.data[0..4].try_into().map_err(|_| "short data")?);
    if tag != 0 {
        return Err(format!("unsupported system instruction {}", tag));
    }
    let lamports = read_u64(&ix.data, 4)?;
    let space = read_u64(&ix.data, 12)? as usize;
    let owner = read_pubkey(&ix.data, 20)?;
    let (from, to) = (ix.accounts[0], ix.accounts[1]);

    require_signer(signers, &from, "funder")?;
    require_signer(signers, &to, "new account")?;
    if state.accounts.contains_key(&to) {
        return Err(format!("account {} already in use", to));
    }
    debit(state, &from, lamports)?;

    let entry = if owner == TOKEN_PROGRAM_ID || owner == TOKEN_2022_PROGRAM_ID {
        Entry::Mint(MockMint {
            token_program: owner,
            space,
            lamports,
            initialized: false,
            decimals: 0,
            mint_authority: None,
            freeze_authority: None,
            supply: 0,
            transfer_fee: None,
        })
    } else {
        Entry::Raw(AccountData {
            owner,
            lamports,
            data: vec![0; space],
        })
    };
    state.accounts.insert(to, entry);
    Ok(())
}

fn apply_token(state: &mut State, ix: &RecordedInstruction, signers: &[Pubkey]) -> Result<(), String> {
    match (ix.data[0], ix.data.get(1).copied()) {
        // InitializeMint
        (0, _) => {
            let mint_key = ix.accounts[0];
            let mint = mint_mut(state, &mint_key)?;
            if mint.token_program != ix.program_id {
                return Err("incorrect program id for mint".to_string());
            }
            if mint.initialized {
                return Err("mint already initialized".to_string());
            }
            let expected = if mint.transfer_fee.is_some() {
                FEE_MINT_SIZE
            } else {
                MINT_SIZE
            };
            if mint.space != expected {
                return Err(format!(
                    "invalid account data: {} bytes with uninitialized extensions",
                    mint.space
                ));
            }
            let mut offset = 1;
            mint.decimals = ix.data[offset];
            offset += 1;
            mint.mint_authority = Some(read_pubkey(&ix.data, offset)?);
            offset += 32;
            mint.freeze_authority = read_opt_pubkey(&ix.data, &mut offset)?;
            mint.initialized = true;
            Ok(())
        }
        // InitializeTransferFeeConfig
        (26, Some(0)) => {
            if ix.program_id != TOKEN_2022_PROGRAM_ID {
                return Err("transfer fees need Token-2022".to_string());
            }
            let mint = mint_mut(state, &ix.accounts[0])?;
            if mint.initialized {
                return Err("extension must be initialized before the mint".to_string());
            }
            let mut offset = 2;
            let config_authority = read_opt_pubkey(&ix.data, &mut offset)?;
            let withdraw_authority = read_opt_pubkey(&ix.data, &mut offset)?;
            let basis_points = u16::from_le_bytes([ix.data[offset], ix.data[offset + 1]]);
            let maximum_fee = read_u64(&ix.data, offset + 2)?;
            let fee = MockFee {
                epoch: 0,
                basis_points,
                maximum_fee,
            };
            mint.transfer_fee = Some(FeeConfig {
                older: fee,
                newer: fee,
                config_authority,
                withdraw_authority,
                withheld: 0,
            });
            Ok(())
        }
        // MintTo
        (7, _) => {
            let (mint_key, dest, authority) = (ix.accounts[0], ix.accounts[1], ix.accounts[2]);
            let amount = read_u64(&ix.data, 1)?;
            require_signer(signers, &authority, "mint authority")?;
            let mint = mint_mut(state, &mint_key)?;
            if mint.mint_authority != Some(authority) {
                return Err("owner does not match".to_string());
            }
            mint.supply = mint.supply.checked_add(amount).ok_or("overflow")?;
            let holding = holding_mut(state, &dest)?;
            if holding.mint != mint_key {
                return Err("account not associated with this mint".to_string());
            }
            holding.amount += amount;
            Ok(())
        }
        // TransferChecked
        (12, _) => {
            let amount = read_u64(&ix.data, 1)?;
            let decimals = ix.data[9];
            apply_transfer(state, ix, signers, amount, decimals, None)
        }
        // TransferCheckedWithFee
        (26, Some(1)) => {
            let amount = read_u64(&ix.data, 2)?;
            let decimals = ix.data[10];
            let fee = read_u64(&ix.data, 11)?;
            apply_transfer(state, ix, signers, amount, decimals, Some(fee))
        }
        (tag, _) => Err(format!("unsupported token instruction {}", tag)),
    }
}

fn apply_transfer(
    state: &mut State,
    ix: &RecordedInstruction,
    signers: &[Pubkey],
    amount: u64,
    decimals: u8,
    asserted_fee: Option<u64>,
) -> Result<(), String> {
    let (source, mint_key, dest, owner) =
        (ix.accounts[0], ix.accounts[1], ix.accounts[2], ix.accounts[3]);
    require_signer(signers, &owner, "owner")?;

    let state_epoch = state.epoch;
    let mint = mint_mut(state, &mint_key)?;
    if mint.decimals != decimals {
        return Err("mint decimals mismatch".to_string());
    }
    let fee = match &mint.transfer_fee {
        Some(config) => token_program_fee(config, state_epoch, amount)?,
        None => 0,
    };
    if let Some(asserted) = asserted_fee {
        if asserted != fee {
            return Err(format!("fee mismatch: asserted {}, calculated {}", asserted, fee));
        }
    }

    let from = holding_mut(state, &source)?;
    if from.owner != owner {
        return Err("owner does not match".to_string());
    }
    if from.amount < amount {
        return Err("insufficient funds".to_string());
    }
    from.amount -= amount;

    let to = holding_mut(state, &dest)?;
    to.amount += amount - fee;
    to.withheld += fee;
    Ok(())
}

/// Fee as the token program charges it: the schedule entry in force at
/// `epoch`, rounded up.
fn token_program_fee(config: &FeeConfig, epoch: u64, amount: u64) -> Result<u64, String> {
    let fee = if epoch >= config.newer.epoch {
        config.newer
    } else {
        config.older
    };
    let schedule = TransferFee {
        epoch: fee.epoch.into(),
        maximum_fee: fee.maximum_fee.into(),
        transfer_fee_basis_points: fee.basis_points.into(),
    };
    schedule
        .calculate_fee(amount)
        .ok_or_else(|| "fee calculation overflow".to_string())
}

fn apply_associated_token(state: &mut State, ix: &RecordedInstruction) -> Result<(), String> {
    let idempotent = match ix.data.first() {
        None | Some(0) => false,
        Some(1) => true,
        Some(other) => return Err(format!("unsupported ATA instruction {}", other)),
    };
    let (payer, ata, wallet, mint_key, token_program) = (
        ix.accounts[0],
        ix.accounts[1],
        ix.accounts[2],
        ix.accounts[3],
        ix.accounts[5],
    );
    if get_associated_token_address(&wallet, &mint_key, &token_program) != ata {
        return Err("invalid seeds for associated token account".to_string());
    }
    if state.accounts.contains_key(&ata) {
        return if idempotent {
            Ok(())
        } else {
            Err(format!("account {} already in use", ata))
        };
    }
    create_holding(state, &payer, ata, wallet, mint_key, token_program)
}

fn create_holding(
    state: &mut State,
    payer: &Pubkey,
    address: Pubkey,
    owner: Pubkey,
    mint_key: Pubkey,
    token_program: Pubkey,
) -> Result<(), String> {
    let with_fee_extension = match state.accounts.get(&mint_key) {
        Some(Entry::Mint(mint)) if mint.token_program == token_program => {
            mint.transfer_fee.is_some()
        }
        Some(_) => return Err("invalid mint for holding account".to_string()),
        None => return Err(format!("mint {} not found", mint_key)),
    };
    debit(state, payer, rent_for(TOKEN_ACCOUNT_SIZE))?;
    state.accounts.insert(
        address,
        Entry::Holding(MockHolding {
            token_program,
            mint: mint_key,
            owner,
            amount: 0,
            withheld: 0,
            with_fee_extension,
        }),
    );
    Ok(())
}

fn apply_metadata(
    state: &mut State,
    ix: &RecordedInstruction,
    signers: &[Pubkey],
    rejection: Option<String>,
    fail_mint: bool,
) -> Result<(), String> {
    match ix.data[0] {
        // Create
        42 => {
            if let Some(message) = rejection {
                return Err(message);
            }
            let (metadata, edition, mint_key, authority, payer, token_program) = (
                ix.accounts[0],
                ix.accounts[1],
                ix.accounts[2],
                ix.accounts[3],
                ix.accounts[4],
                ix.accounts[8],
            );
            require_signer(signers, &authority, "authority")?;
            if state.accounts.contains_key(&metadata) {
                return Err(format!("metadata account {} already in use", metadata));
            }
            match state.accounts.get(&mint_key) {
                Some(Entry::Mint(mint)) => {
                    if mint.mint_authority != Some(authority) {
                        return Err("mint authority does not match".to_string());
                    }
                }
                Some(_) => return Err("Invalid mint account".to_string()),
                None => {
                    require_signer(signers, &mint_key, "mint")?;
                    debit(state, &payer, rent_for(MINT_SIZE))?;
                    state.accounts.insert(
                        mint_key,
                        Entry::Mint(MockMint {
                            token_program,
                            space: MINT_SIZE,
                            lamports: rent_for(MINT_SIZE),
                            initialized: true,
                            decimals: 0,
                            mint_authority: Some(authority),
                            freeze_authority: Some(authority),
                            supply: 0,
                            transfer_fee: None,
                        }),
                    );
                }
            }
            state.accounts.insert(
                metadata,
                Entry::Raw(AccountData {
                    owner: *METADATA_PROGRAM_ID,
                    lamports: rent_for(ix.data.len()),
                    data: ix.data.clone(),
                }),
            );
            if edition != *METADATA_PROGRAM_ID {
                state.accounts.insert(
                    edition,
                    Entry::Raw(AccountData {
                        owner: *METADATA_PROGRAM_ID,
                        lamports: rent_for(282),
                        data: vec![6],
                    }),
                );
            }
            Ok(())
        }
        // Mint
        43 => {
            if fail_mint {
                return Err("simulated mint failure".to_string());
            }
            let (token, owner, edition, mint_key, payer, token_program) = (
                ix.accounts[0],
                ix.accounts[1],
                ix.accounts[3],
                ix.accounts[5],
                ix.accounts[8],
                ix.accounts[11],
            );
            let amount = read_u64(&ix.data, 2)?;
            if !state.accounts.contains_key(&token) {
                create_holding(state, &payer, token, owner, mint_key, token_program)?;
            }
            let edition_exists = state.accounts.contains_key(&edition);
            let mint = mint_mut(state, &mint_key)?;
            mint.supply += amount;
            if edition_exists {
                // the master edition takes over both authorities
                mint.mint_authority = Some(edition);
                mint.freeze_authority = Some(edition);
            }
            holding_mut(state, &token)?.amount += amount;
            Ok(())
        }
        other => Err(format!("unsupported metadata instruction {}", other)),
    }
}

fn mint_mut<'a>(state: &'a mut State, address: &Pubkey) -> Result<&'a mut MockMint, String> {
    match state.accounts.get_mut(address) {
        Some(Entry::Mint(mint)) => Ok(mint),
        _ => Err(format!("{} is not a mint", address)),
    }
}

fn holding_mut<'a>(state: &'a mut State, address: &Pubkey) -> Result<&'a mut MockHolding, String> {
    match state.accounts.get_mut(address) {
        Some(Entry::Holding(holding)) => Ok(holding),
        _ => Err(format!("{} is not a token account", address)),
    }
}

// ============================================================================
// Byte Layouts
// ============================================================================

fn read_u64(data: &[u8], offset: usize) -> Result<u64, String> {
    data.get(offset..offset + 8)
        .and_then(|s| s.try_into().ok())
        .map(u64::from_le_bytes)
        .ok_or_else(|| format!("short data reading u64 at {}", offset))
}

fn read_pubkey(data: &[u8], offset: usize) -> Result<Pubkey, String> {
    data.get(offset..offset + 32)
        .and_then(|s| <[u8; 32]>::try_from(s).ok())
        .map(Pubkey::new_from_array)
        .ok_or_else(|| format!("short data reading pubkey at {}", offset))
}

/// One tag byte, then 32 bytes when the tag is 1.
fn read_opt_pubkey(data: &[u8], offset: &mut usize) -> Result<Option<Pubkey>, String> {
    let tag = *data.get(*offset).ok_or("short data reading option tag")?;
    *offset += 1;
    match tag {
        0 => Ok(None),
        1 => {
            let key = read_pubkey(data, *offset)?;
            *offset += 32;
            Ok(Some(key))
        }
        other => Err(format!("invalid option tag {}", other)),
    }
}

fn push_coption_pubkey(buf: &mut Vec<u8>, key: Option<Pubkey>) {
    match key {
        Some(key) => {
            buf.extend_from_slice(&1u32.to_le_bytes());
            buf.extend_from_slice(key.as_ref());
        }
        None => buf.extend_from_slice(&[0u8; 36]),
    }
}

fn push_optional_nonzero(buf: &mut Vec<u8>, key: Option<Pubkey>) {
    buf.extend_from_slice(key.map(|k| k.to_bytes()).unwrap_or([0u8; 32]).as_ref());
}

fn encode_mint(mint: &MockMint) -> Vec<u8> {
    if !mint.initialized {
        return vec![0; mint.space];
    }
    let mut data = Vec::with_capacity(mint.space);
    push_coption_pubkey(&mut data, mint.mint_authority);
    data.extend_from_slice(&mint.supply.to_le_bytes());
    data.push(mint.decimals);
    data.push(1);
    push_coption_pubkey(&mut data, mint.freeze_authority);

    if let Some(fee) = &mint.transfer_fee {
        data.resize(TOKEN_ACCOUNT_SIZE, 0);
        data.push(1); // AccountType::Mint
        data.extend_from_slice(&1u16.to_le_bytes()); // TransferFeeConfig
        data.extend_from_slice(&(TRANSFER_FEE_CONFIG_LEN as u16).to_le_bytes());
        push_optional_nonzero(&mut data, fee.config_authority);
        push_optional_nonzero(&mut data, fee.withdraw_authority);
        data.extend_from_slice(&fee.withheld.to_le_bytes());
        for entry in [fee.older, fee.newer] {
            data.extend_from_slice(&entry.epoch.to_le_bytes());
            data.extend_from_slice(&entry.maximum_fee.to_le_bytes());
            data.extend_from_slice(&entry.basis_points.to_le_bytes());
        }
    }
    data.resize(mint.space.max(data.len()), 0);
    data
}

fn encode_holding(holding: &MockHolding) -> Vec<u8> {
    let mut data = Vec::with_capacity(TOKEN_ACCOUNT_SIZE + 13);
    data.extend_from_slice(holding.mint.as_ref());
    data.extend_from_slice(holding.owner.as_ref());
    data.extend_from_slice(&holding.amount.to_le_bytes());
    push_coption_pubkey(&mut data, None); // delegate
    data.push(1); // initialized
    data.extend_from_slice(&[0u8; 12]); // is_native
    data.extend_from_slice(&0u64.to_le_bytes()); // delegated_amount
    push_coption_pubkey(&mut data, None); // close_authority
    debug_assert_eq!(data.len(), TOKEN_ACCOUNT_SIZE);

    if holding.with_fee_extension {
        data.push(2); // AccountType::Account
        data.extend_from_slice(&2u16.to_le_bytes()); // TransferFeeAmount
        data.extend_from_slice(&8u16.to_le_bytes());
        data.extend_from_slice(&holding.withheld.to_le_bytes());
    }
    data
}

// ============================================================================
// Fixtures
// ============================================================================

/// A client whose payer starts with `sol` SOL on a fresh ledger.
pub fn client_with_sol(sol: u64) -> TokenClient<MockLedger> {
    let payer = Keypair::new();
    let ledger = MockLedger::new().with_balance(payer.pubkey(), sol * LAMPORTS_PER_SOL);
    TokenClient::new(ledger, payer)
}

/// Uploader that stores documents in memory and hands out sequential URIs.
#[derive(Default)]
pub struct MockUploader {
    pub uploads: Mutex<Vec<(Vec<u8>, String)>>,
}

impl MockUploader {
    pub fn uploaded_json(&self, index: usize) -> serde_json::Value {
        let uploads = self.uploads.lock().unwrap();
        serde_json::from_slice(&uploads[index].0).unwrap()
    }

    pub fn count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl Uploader for MockUploader {
    async fn upload(&self, bytes: Vec<u8>, content_type: &str) -> ToolResult<String> {
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push((bytes, content_type.to_string()));
        Ok(format!("https://gateway.test/{}", uploads.len()))
    }
}
