//! Runtime configuration.
//!
//! Precedence: command-line flag, then environment variable (a `.env` file is
//! loaded into the environment first), then the defaults in [`crate::network`].

use std::path::PathBuf;

use clap::Args;

use crate::error::{ToolError, ToolResult};
use crate::network::{DEFAULT_CLUSTER, DEFAULT_GATEWAY_URL, DEFAULT_KEYPAIR_PATH, DEFAULT_RPC_URL};

/// Upload attempts after the first, unless configured.
pub const DEFAULT_UPLOAD_MAX_RETRIES: u32 = 3;

/// Settings shared by every binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rpc_url: String,
    pub keypair_path: PathBuf,
    /// Cluster name used in explorer links.
    pub cluster: String,
    /// Raw-bytes upload endpoint; required only by operations that upload.
    pub upload_url: Option<String>,
    pub gateway_url: String,
    pub upload_max_retries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            keypair_path: PathBuf::from(DEFAULT_KEYPAIR_PATH),
            cluster: DEFAULT_CLUSTER.to_string(),
            upload_url: None,
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            upload_max_retries: DEFAULT_UPLOAD_MAX_RETRIES,
        }
    }
}

impl Config {
    /// Build from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; unset or empty values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            rpc_url: get("RPC_URL").unwrap_or(defaults.rpc_url),
            keypair_path: get("KEYPAIR_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.keypair_path),
            cluster: get("CLUSTER").unwrap_or(defaults.cluster),
            upload_url: get("UPLOAD_URL"),
            gateway_url: get("GATEWAY_URL").unwrap_or(defaults.gateway_url),
            upload_max_retries: get("UPLOAD_MAX_RETRIES")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.upload_max_retries),
        }
    }

    /// The upload endpoint, or a validation error naming the missing setting.
    pub fn upload_url(&self) -> ToolResult<&str> {
        self.upload_url.as_deref().ok_or_else(|| {
            ToolError::Validation(
                "no upload endpoint: set UPLOAD_URL or --upload-url to a gateway that accepts \
                 raw unsigned bytes"
                    .to_string(),
            )
        })
    }
}

/// Load `.env` from the working directory if present.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

/// Ledger connection flags.
#[derive(Debug, Clone, Args)]
pub struct ConnectionArgs {
    /// JSON-RPC endpoint
    #[arg(long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Payer key file (JSON array of 64 bytes)
    #[arg(long, env = "KEYPAIR_PATH", default_value = DEFAULT_KEYPAIR_PATH)]
    pub keypair_path: PathBuf,

    /// Cluster name for explorer links
    #[arg(long, env = "CLUSTER", default_value = DEFAULT_CLUSTER)]
    pub cluster: String,
}

/// Storage gateway flags.
#[derive(Debug, Clone, Args)]
pub struct StorageArgs {
    /// Upload endpoint taking a raw-bytes POST (no default). Storage-network
    /// node `/upload` routes expect signed data items and will reject it.
    #[arg(long, env = "UPLOAD_URL")]
    pub upload_url: Option<String>,

    /// Read gateway that uploaded ids resolve under
    #[arg(long, env = "GATEWAY_URL", default_value = DEFAULT_GATEWAY_URL)]
    pub gateway_url: String,

    /// Upload retries on 429, 502-504 and transport errors; 0 disables
    #[arg(long, env = "UPLOAD_MAX_RETRIES", default_value_t = DEFAULT_UPLOAD_MAX_RETRIES)]
    pub upload_max_retries: u32,
}

impl From<ConnectionArgs> for Config {
    fn from(args: ConnectionArgs) -> Self {
        Self {
            rpc_url: args.rpc_url,
            keypair_path: args.keypair_path,
            cluster: args.cluster,
            ..Self::default()
        }
    }
}

impl Config {
    pub fn with_storage(mut self, storage: StorageArgs) -> Self {
        self.upload_url = storage.upload_url;
        self.gateway_url = storage.gateway_url;
        self.upload_max_retries = storage.upload_max_retries;
        self
    }
}
