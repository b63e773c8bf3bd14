//! Transfer tokens while asserting the mint's transfer fee.

use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use mintforge::cli::{self, parse_pubkey};
use mintforge::client::{TokenClient, TransferRequest};
use mintforge::config::{Config, ConnectionArgs};
use mintforge::network::explorer_tx_url;
use mintforge::program::utils::format_base_units;
use solana_pubkey::Pubkey;

#[derive(Parser, Debug)]
#[command(about = "Transfer tokens from the payer, withholding the transfer fee")]
struct Args {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Mint address
    #[arg(long, env = "MINT_ADDRESS", value_parser = parse_pubkey)]
    mint: Pubkey,

    /// Recipient wallet address
    #[arg(long, env = "RECIPIENT", value_parser = parse_pubkey)]
    recipient: Pubkey,

    /// Whole tokens to send
    #[arg(long, default_value_t = 100)]
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

    let outcome = client
        .transfer_with_fee(&TransferRequest {
            mint: args.mint,
            recipient: args.recipient,
            amount: args.amount,
        })
        .await?;

    let decimals = outcome.decimals;
    if outcome.created_destination {
        println!("Created recipient holding account {}", outcome.destination);
    }
    println!("Transferred {} tokens", format_base_units(outcome.base_units, decimals));
    println!("  Expected fee: {}", format_base_units(outcome.expected_fee, decimals));
    println!(
        "  Received:     {}",
        format_base_units(outcome.base_units.saturating_sub(outcome.expected_fee), decimals)
    );
    println!(
        "  Withheld on recipient account: {}",
        format_base_units(outcome.withheld_amount, decimals)
    );
    println!("  {}", explorer_tx_url(outcome.signature, &config.cluster));
    Ok(())
}
