//! Publish a fungible metadata record for an existing mint.

use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use mintforge::cli::{self, parse_pubkey};
use mintforge::client::{FungibleMetadataRequest, MetadataSource, TokenClient};
use mintforge::config::{Config, ConnectionArgs, StorageArgs};
use mintforge::network::{explorer_address_url, explorer_tx_url};
use mintforge::storage::{HttpUploader, Uploader};
use solana_pubkey::Pubkey;

#[derive(Parser, Debug)]
#[command(about = "Attach name, symbol and URI metadata to a fungible mint")]
struct Args {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(flatten)]
    storage: StorageArgs,

    /// Mint address
    #[arg(long, env = "MINT_ADDRESS", value_parser = parse_pubkey)]
    mint: Pubkey,

    #[arg(long, default_value = "Forge Token")]
    name: String,

    #[arg(long, default_value = "FRG")]
    symbol: String,

    /// URI of an already-uploaded metadata document
    #[arg(long, env = "METADATA_URI")]
    uri: Option<String>,

    /// Upload a generated metadata document; takes precedence over --uri
    #[arg(long)]
    upload: bool,

    /// Description for the uploaded document
    #[arg(long, default_value = "A fungible token")]
    description: String,

    /// Lock the record against later updates
    #[arg(long)]
    immutable: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    cli::init();
    cli::finish(run(Args::parse()).await)
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::from(args.connection).with_storage(args.storage);
    let client = TokenClient::from_config(&config).context("loading payer")?;

    let source = if args.upload {
        MetadataSource::Upload {
            description: args.description,
        }
    } else {
        MetadataSource::Uri(args.uri.unwrap_or_default())
    };
    let uploader = if args.upload {
        Some(HttpUploader::from_config(&config)?)
    } else {
        None
    };

    let request = FungibleMetadataRequest {
        mint: args.mint,
        name: args.name,
        symbol: args.symbol,
        source,
        is_mutable: !args.immutable,
    };
    let outcome = client
        .create_fungible_metadata(&request, uploader.as_ref().map(|u| u as &dyn Uploader))
        .await?;

    println!("Created metadata {}", outcome.metadata);
    println!("  Name:   {}", request.name);
    println!("  Symbol: {}", request.symbol);
    println!("  URI:    {}", outcome.uri);
    println!("  {}", explorer_tx_url(outcome.signature, &config.cluster));
    println!("  {}", explorer_address_url(args.mint, &config.cluster));
    Ok(())
}
