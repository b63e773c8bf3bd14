//! Network defaults and explorer links.

use std::fmt::Display;

/// Default JSON-RPC endpoint.
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

/// Default read gateway for uploaded content.
///
/// There is no default upload endpoint: the gateway must accept raw unsigned
/// bytes, which storage-network nodes' own `/upload` routes do not.
pub const DEFAULT_GATEWAY_URL: &str = "https://gateway.irys.xyz";

pub const DEFAULT_KEYPAIR_PATH: &str = "keys/secret-key.json";

pub const DEFAULT_CLUSTER: &str = "devnet";

const EXPLORER_URL: &str = "https://explorer.solana.com";

pub fn explorer_tx_url(signature: impl Display, cluster: &str) -> String {
    format!("{}/tx/{}{}", EXPLORER_URL, signature, cluster_query(cluster))
}

pub fn explorer_address_url(address: impl Display, cluster: &str) -> String {
    format!("{}/address/{}{}", EXPLORER_URL, address, cluster_query(cluster))
}

fn cluster_query(cluster: &str) -> String {
    match cluster {
        "" | "mainnet" | "mainnet-beta" => String::new(),
        other => format!("?cluster={}", other),
    }
}
