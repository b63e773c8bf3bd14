//! Shared plumbing for the binaries.

use std::process::ExitCode;
use std::str::FromStr;

use solana_pubkey::Pubkey;

use crate::error::{ToolError, ToolResult};

/// Load `.env` and install logging. Call first thing in `main`.
pub fn init() {
    crate::config::load_dotenv();
    crate::logging::init();
}

/// Print the error with its troubleshooting hints and map to an exit code.
pub fn finish(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report_failure(&error);
            ExitCode::FAILURE
        }
    }
}

pub fn report_failure(error: &anyhow::Error) {
    eprintln!("\nError: {:#}", error);
    if let Some(tool_error) = error.downcast_ref::<ToolError>() {
        eprintln!("\nTroubleshooting:");
        for hint in tool_error.troubleshooting() {
            eprintln!("  - {}", hint);
        }
    }
}

/// Parse a base58 address flag.
pub fn parse_pubkey(raw: &str) -> ToolResult<Pubkey> {
    Pubkey::from_str(raw.trim()).map_err(|e| ToolError::InvalidPubkey(format!("{}: {}", raw, e)))
}
