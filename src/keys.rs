//! Key files.
//!
//! A key file is a JSON array of the 64 secret-key bytes, the format the
//! Solana CLI reads and writes. Loading also accepts a base58 secret key as
//! exported by browser wallets.

use std::fs;
use std::path::Path;

use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signer::Signer;

use crate::error::{ToolError, ToolResult};

/// Load a keypair from a JSON byte-array or base58 key file.
pub fn load_keypair(path: impl AsRef<Path>) -> ToolResult<Keypair> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        ToolError::Keypair(format!("cannot read key file {}: {}", path.display(), e))
    })?;
    let trimmed = contents.trim();
    if trimmed.starts_with('[') {
        let bytes: Vec<u8> = serde_json::from_str(trimmed)?;
        keypair_from_bytes(&bytes)
    } else {
        keypair_from_base58(trimmed)
    }
}

pub fn keypair_from_base58(encoded: &str) -> ToolResult<Keypair> {
    let bytes = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| ToolError::Keypair(format!("invalid base58 secret key: {}", e)))?;
    keypair_from_bytes(&bytes)
}

pub fn keypair_from_bytes(bytes: &[u8]) -> ToolResult<Keypair> {
    if bytes.len() != 64 {
        return Err(ToolError::Keypair(format!(
            "expected 64 secret-key bytes, found {}",
            bytes.len()
        )));
    }
    Keypair::try_from(bytes).map_err(|e| ToolError::Keypair(e.to_string()))
}

/// Write `keypair` to `path`, creating parent directories.
///
/// An existing file is only replaced when `overwrite` is set.
pub fn write_keypair_file(
    keypair: &Keypair,
    path: impl AsRef<Path>,
    overwrite: bool,
) -> ToolResult<()> {
    let path = path.as_ref();
    if path.exists() && !overwrite {
        return Err(ToolError::Validation(format!(
            "{} already exists; pass --force to replace it",
            path.display()
        )));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string(&keypair.to_bytes().to_vec())?;
    fs::write(path, json)?;
    Ok(())
}

/// Generate a new keypair and persist it, returning its public key.
pub fn generate_keypair_file(path: impl AsRef<Path>, overwrite: bool) -> ToolResult<Pubkey> {
    let keypair = Keypair::new();
    write_keypair_file(&keypair, path.as_ref(), overwrite)?;
    tracing::info!(path = %path.as_ref().display(), "Wrote key file");
    Ok(keypair.pubkey())
}
