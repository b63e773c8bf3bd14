//! NFT step 3: mint a one-of-one NFT with metadata and master edition.

use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use mintforge::cli;
use mintforge::client::{MintNftRequest, TokenClient, DEFAULT_ROYALTY_BASIS_POINTS};
use mintforge::config::{Config, ConnectionArgs};
use mintforge::network::{explorer_address_url, explorer_tx_url};

#[derive(Parser, Debug)]
#[command(about = "Mint an NFT to the payer in a single transaction")]
struct Args {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// URI printed by upload-nft-metadata
    #[arg(long, env = "METADATA_URI")]
    uri: String,

    #[arg(long, default_value = "Forge #1")]
    name: String,

    #[arg(long, default_value = "FRG")]
    symbol: String,

    /// Secondary-sale royalty in basis points
    #[arg(long, default_value_t = DEFAULT_ROYALTY_BASIS_POINTS)]
    royalty_basis_points: u16,

    /// Lock the metadata against later updates
    #[arg(long)]
    immutable: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    cli::init();
    cli::finish(run(Args::parse()).await)
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::from(args.connection);
    let client = TokenClient::from_config(&config).context("loading payer")?;

    let minted = client
        .mint_nft(&MintNftRequest {
            name: args.name,
            symbol: args.symbol,
            uri: args.uri,
            royalty_basis_points: args.royalty_basis_points,
            is_mutable: !args.immutable,
        })
        .await?;

    println!("Minted NFT {}", minted.mint);
    println!("  Metadata:       {}", minted.metadata);
    println!("  Master edition: {}", minted.master_edition);
    println!("  Held in:        {}", minted.holding_account);
    println!("  {}", explorer_tx_url(minted.signature, &config.cluster));
    println!("  {}", explorer_address_url(minted.mint, &config.cluster));
    Ok(())
}
