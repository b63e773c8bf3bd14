//! Create a plain SPL Token mint owned by the payer.

use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use mintforge::cli;
use mintforge::client::{CreateMintRequest, TokenClient};
use mintforge::config::{Config, ConnectionArgs};
use mintforge::network::{explorer_address_url, explorer_tx_url};

#[derive(Parser, Debug)]
#[command(about = "Create a token mint with the payer as mint authority")]
struct Args {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[arg(long, default_value_t = 9)]
    decimals: u8,

    /// Also make the payer freeze authority
    #[arg(long)]
    freeze_authority: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    cli::init();
    cli::finish(run(Args::parse()).await)
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::from(args.connection);
    let client = TokenClient::from_config(&config).context("loading payer")?;
    let payer = client.payer_pubkey();

    let request = CreateMintRequest {
        decimals: args.decimals,
        freeze_authority: args.freeze_authority.then_some(payer),
        transfer_fee: None,
    };
    let created = client.create_mint(&request).await?;

    println!("Created mint {}", created.mint);
    println!("  Decimals:       {}", args.decimals);
    println!("  Mint authority: {}", payer);
    println!("  Rent:           {} lamports", created.rent_lamports);
    println!("  {}", explorer_tx_url(created.signature, &config.cluster));
    println!("  {}", explorer_address_url(created.mint, &config.cluster));
    println!("\nNext: mint-tokens --mint {}", created.mint);
    Ok(())
}
