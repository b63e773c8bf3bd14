//! Utility functions: fee math, amount scaling, and input validation.

use crate::error::{ToolError, ToolResult};
use crate::program::constants::{
    MAX_BASIS_POINTS, MAX_CREATORS, MAX_NAME_LENGTH, MAX_SYMBOL_LENGTH, MAX_URI_LENGTH,
};
use crate::program::types::Creator;

// ============================================================================
// Fee Math
// ============================================================================

/// Expected transfer fee for `amount` base units.
///
/// ```text
/// fee = min(floor(amount * basis_points / 10_000), maximum_fee)
/// ```
///
/// The product is computed in `u128`, so this never overflows.
pub fn calculate_transfer_fee(amount: u64, basis_points: u16, maximum_fee: u64) -> u64 {
    let raw = (amount as u128) * (basis_points as u128) / (MAX_BASIS_POINTS as u128);
    // raw <= amount, so it always fits in u64
    (raw as u64).min(maximum_fee)
}

/// Whether the floor above agrees with the token program, which rounds the
/// uncapped fee up.
///
/// They differ exactly when `amount * basis_points` leaves a remainder and the
/// floored fee is still below `maximum_fee`.
pub fn transfer_fee_is_exact(amount: u64, basis_points: u16, maximum_fee: u64) -> bool {
    let product = (amount as u128) * (basis_points as u128);
    let divisor = MAX_BASIS_POINTS as u128;
    product % divisor == 0 || product / divisor >= maximum_fee as u128
}

// ============================================================================
// Amount Scaling
// ============================================================================

/// Scale a whole-token amount to base units: `amount * 10^decimals`.
pub fn to_base_units(amount: u64, decimals: u8) -> ToolResult<u64> {
    let multiplier = 10u64
        .checked_pow(decimals as u32)
        .ok_or_else(|| ToolError::Overflow(format!("10^{} overflow", decimals)))?;
    amount
        .checked_mul(multiplier)
        .ok_or_else(|| ToolError::Overflow(format!("{} * 10^{}", amount, decimals)))
}

/// Format base units as a decimal token amount, e.g. `1500000000` at 9 → `1.5`.
pub fn format_base_units(amount: u64, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    let divisor = 10u128.pow(decimals as u32);
    let whole = amount as u128 / divisor;
    let frac = amount as u128 % divisor;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = decimals as usize);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

// ============================================================================
// Validation Helpers
// ============================================================================

/// Validate a basis-point value (0-10000).
pub fn validate_basis_points(basis_points: u16, name: &str) -> ToolResult<()> {
    if basis_points > MAX_BASIS_POINTS {
        return Err(ToolError::Validation(format!(
            "{} must be at most {} basis points, got {}",
            name, MAX_BASIS_POINTS, basis_points
        )));
    }
    Ok(())
}

/// Whether a URI is empty or still holds a template placeholder.
pub fn is_placeholder_uri(uri: &str) -> bool {
    let trimmed = uri.trim();
    if trimmed.is_empty() {
        return true;
    }
    let upper = trimmed.to_uppercase();
    upper.contains("YOUR_")
        || upper.contains("REPLACE")
        || upper.contains("PLACEHOLDER")
        || (trimmed.contains('<') && trimmed.contains('>'))
        || trimmed.contains("example.com")
}

/// Validate a metadata URI before any network call.
pub fn validate_metadata_uri(uri: &str) -> ToolResult<()> {
    if is_placeholder_uri(uri) {
        return Err(ToolError::Validation(format!(
            "metadata URI {:?} is empty or a placeholder",
            uri
        )));
    }
    if !(uri.starts_with("https://") || uri.starts_with("http://") || uri.starts_with("ar://")) {
        return Err(ToolError::Validation(format!(
            "metadata URI {:?} must be an http(s) or ar:// URI",
            uri
        )));
    }
    if uri.len() > MAX_URI_LENGTH {
        return Err(ToolError::Validation(format!(
            "metadata URI is {} bytes (max {})",
            uri.len(),
            MAX_URI_LENGTH
        )));
    }
    Ok(())
}

/// Validate name and symbol lengths for a metadata record.
pub fn validate_name_symbol(name: &str, symbol: &str) -> ToolResult<()> {
    if name.trim().is_empty() {
        return Err(ToolError::Validation("name must not be empty".to_string()));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(ToolError::Validation(format!(
            "name is {} bytes (max {})",
            name.len(),
            MAX_NAME_LENGTH
        )));
    }
    if symbol.len() > MAX_SYMBOL_LENGTH {
        return Err(ToolError::Validation(format!(
            "symbol is {} bytes (max {})",
            symbol.len(),
            MAX_SYMBOL_LENGTH
        )));
    }
    Ok(())
}

/// Validate a creator list: at most 5 entries, shares summing to 100.
pub fn validate_creators(creators: &[Creator]) -> ToolResult<()> {
    if creators.is_empty() {
        return Ok(());
    }
    if creators.len() > MAX_CREATORS {
        return Err(ToolError::Validation(format!(
            "{} creators (max {})",
            creators.len(),
            MAX_CREATORS
        )));
    }
    let total: u32 = creators.iter().map(|c| c.share as u32).sum();
    if total != 100 {
        return Err(ToolError::Validation(format!(
            "creator shares sum to {} (must be 100)",
            total
        )));
    }
    Ok(())
}
