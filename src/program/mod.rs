//! On-chain program interaction.
//!
//! Instruction builders, address derivation and account decoding for the
//! SPL Token, Token-2022, associated-token and Metaplex token-metadata
//! programs. Nothing in this module touches the network.

pub mod accounts;
pub mod constants;
pub mod instructions;
pub mod pda;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use accounts::{AccountData, EpochFee, HoldingState, MintState, TransferFeeState};
pub use constants::*;
pub use instructions::*;
pub use pda::*;
pub use types::*;
pub use utils::*;
