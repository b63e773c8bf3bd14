//! Mint supply into the payer's holding account.

use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use mintforge::cli::{self, parse_pubkey};
use mintforge::client::TokenClient;
use mintforge::config::{Config, ConnectionArgs};
use mintforge::network::explorer_tx_url;
use mintforge::program::utils::format_base_units;
use solana_pubkey::Pubkey;

#[derive(Parser, Debug)]
#[command(about = "Mint tokens to the payer, creating its holding account if needed")]
struct Args {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Mint address
    #[arg(long, env = "MINT_ADDRESS", value_parser = parse_pubkey)]
    mint: Pubkey,

    /// Whole tokens to mint
    #[arg(long, default_value_t = 1_000)]
    amount: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    cli::init();
    cli::finish(run(Args::parse()).await)
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::from(args.connection);
    let client = TokenClient::from_config(&config).context("loading payer")?;

    let outcome = client.mint_to_owner(&args.mint, args.amount).await?;

    if outcome.created_holding_account {
        println!("Created holding account {}", outcome.holding_account);
    } else {
        println!("Using existing holding account {}", outcome.holding_account);
    }
    println!(
        "Minted {} tokens ({} base units)",
        format_base_units(outcome.base_units, outcome.decimals),
        outcome.base_units
    );
    println!("  {}", explorer_tx_url(outcome.signature, &config.cluster));
    Ok(())
}
