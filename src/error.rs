//! Unified error types.

use thiserror::Error;

/// Top-level error for every operation in this crate.
#[derive(Error, Debug)]
pub enum ToolError {
    /// RPC client error
    #[error("RPC error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Key file did not contain a valid keypair
    #[error("Invalid keypair: {0}")]
    Keypair(String),

    #[error("Invalid pubkey: {0}")]
    InvalidPubkey(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account exists but is not owned by a token program
    #[error("Account {address} is not a token mint (owner {owner})")]
    NotAMint { address: String, owner: String },

    #[error("Metadata account {0} already exists for this mint")]
    MetadataExists(String),

    /// The ledger rejected metadata creation because of a token-standard mismatch
    #[error("Token standard mismatch: {0}")]
    TokenStandardMismatch(String),

    #[error("Faucet rate limited: {0}")]
    FaucetRateLimited(String),

    #[error("Airdrop {signature} not confirmed after {attempts} attempts")]
    AirdropNotConfirmed { signature: String, attempts: u32 },

    /// Transaction rejected by the ledger
    #[error("Transaction failed: {0}")]
    Transaction(String),

    /// Instruction could not be built
    #[error("Instruction error: {0}")]
    Instruction(String),

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),
}

/// Result type alias for crate operations
pub type ToolResult<T> = Result<T, ToolError>;

/// Storage-gateway upload errors.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unexpected response: {0}")]
    BadResponse(String),

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

impl ToolError {
    /// Short troubleshooting list printed by the binaries next to the error.
    pub fn troubleshooting(&self) -> Vec<&'static str> {
        match self {
            ToolError::Rpc(_) | ToolError::Transaction(_) => vec![
                "Check that RPC_URL points at a reachable cluster",
                "Make sure the payer has enough SOL (run fund-wallet)",
                "Re-run the command; nothing is retried automatically",
            ],
            ToolError::Io(_) | ToolError::Keypair(_) => vec![
                "Run generate-keypair first or point KEYPAIR_PATH at an existing key file",
                "The key file must be a JSON array of 64 bytes or a base58 secret key",
            ],
            ToolError::Json(_) => vec!["Check that the input file is valid JSON"],
            ToolError::InvalidPubkey(_) => vec!["Addresses must be base58-encoded public keys"],
            ToolError::Validation(_) => vec![
                "Fix the flagged input and re-run",
                "URIs must be real uploaded URIs, not placeholders",
            ],
            ToolError::AccountNotFound(_) => vec![
                "Check that the address was copied correctly from the previous step",
                "Make sure the account exists on the cluster RPC_URL points at",
            ],
            ToolError::NotAMint { .. } => vec![
                "Pass the mint address, not a wallet or holding-account address",
            ],
            ToolError::MetadataExists(_) => vec![
                "Metadata records are created once per mint",
                "Use a new mint or update the existing record instead",
            ],
            ToolError::TokenStandardMismatch(_) => vec![
                "This mint already carries NFT-style metadata or is not a fungible mint",
                "Fungible metadata needs a mint with decimals > 0 or a fresh mint",
                "Create a new mint with create-mint and publish metadata for it",
            ],
            ToolError::FaucetRateLimited(_) | ToolError::AirdropNotConfirmed { .. } => vec![
                "The devnet faucet limits requests per wallet and per IP",
                "Request SOL manually at https://faucet.solana.com",
                "Wait a while and run fund-wallet again",
            ],
            ToolError::Instruction(_) | ToolError::Overflow(_) => vec![
                "Check the amount, decimals and fee parameters",
            ],
            ToolError::Upload(_) => vec![
                "UPLOAD_URL must accept a raw-bytes POST; storage-node /upload routes expect signed data items",
                "Check that UPLOAD_URL is reachable",
                "Retry the upload; content-addressed uploads are safe to repeat",
            ],
        }
    }
}

/// Map a failed metadata transaction to a distinguished error when the ledger
/// reports a token-standard mismatch.
pub fn classify_metadata_error(error: ToolError) -> ToolError {
    let message = error.to_string();
    let lowered = message.to_lowercase();
    let mismatch = lowered.contains("invalid token standard")
        || lowered.contains("incorrect token standard")
        || lowered.contains("mint is not a fungible")
        || lowered.contains("invalid mint account");
    if mismatch {
        ToolError::TokenStandardMismatch(message)
    } else {
        error
    }
}

/// Whether an airdrop failure looks like faucet rate-limiting.
pub fn is_rate_limited(message: &str) -> bool {
    let lowered = message.to_lowercase();
    lowered.contains("429")
        || lowered.contains("rate limit")
        || lowered.contains("too many requests")
        || lowered.contains("airdrop request limit")
}
