//! # mintforge
//!
//! One-shot Solana token tooling: key files, faucet top-ups, mints with and
//! without a transfer-fee extension, supply, fee-aware transfers, fungible
//! metadata and one-of-one NFTs.
//!
//! ## Architecture
//!
//! 1. **Program**: instruction builders, PDAs, account decoding (no I/O)
//! 2. **Ledger**: the `LedgerRpc` trait and its `RpcClient` implementation
//! 3. **Storage**: content-addressed uploads and metadata documents
//! 4. **Client**: `TokenClient`, one method per operation
//! 5. **Binaries**: thin wrappers in `src/bin/`, one per operation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mintforge::prelude::*;
//!
//! let client = TokenClient::from_config(&Config::from_env())?;
//! client.ensure_funded(&FundOptions::default()).await?;
//! let created = client.create_mint(&CreateMintRequest { decimals: 9, ..Default::default() }).await?;
//! client.mint_to_owner(&created.mint, 1_000).await?;
//! ```

// ── Core ─────────────────────────────────────────────────────────────────────

/// On-chain program interaction: instructions, PDAs, accounts.
pub mod program;

/// Unified error types.
pub mod error;

/// Network defaults and explorer links.
pub mod network;

/// Key file handling.
pub mod keys;

/// Configuration from flags, environment and `.env`.
pub mod config;

pub mod logging;

// ── I/O ──────────────────────────────────────────────────────────────────────

/// Ledger access trait.
pub mod rpc;

/// Upload gateway client and metadata documents.
pub mod storage;

/// `TokenClient`, the primary entry point.
pub mod client;

/// Helpers shared by the binaries.
pub mod cli;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    pub use crate::client::{
        CreateMintRequest, CreatedMint, FundOptions, FundOutcome, FungibleMetadataRequest,
        MetadataOutcome, MetadataSource, MintNftRequest, MintOutcome, MintedNft, TokenClient,
        TransferOutcome, TransferRequest, DEFAULT_ROYALTY_BASIS_POINTS,
    };
    pub use crate::config::Config;
    pub use crate::error::{ToolError, ToolResult, UploadError};
    pub use crate::keys::{generate_keypair_file, load_keypair};
    pub use crate::program::{
        calculate_transfer_fee, HoldingState, MintState, TokenProgram, TransferFeeParams,
    };
    pub use crate::rpc::LedgerRpc;
    pub use crate::storage::{
        FungibleMetadataDocument, HttpUploader, NftMetadataDocument, Uploader,
    };
}
