//! Top up the payer from the faucet when its balance is low.

use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use mintforge::cli;
use mintforge::client::{FundOptions, FundOutcome, TokenClient};
use mintforge::config::{Config, ConnectionArgs};
use mintforge::network::{explorer_address_url, explorer_tx_url};
use mintforge::program::utils::format_base_units;

#[derive(Parser, Debug)]
#[command(about = "Request a faucet airdrop if the payer balance is below a threshold")]
struct Args {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Skip the airdrop at or above this balance (lamports)
    #[arg(long, default_value_t = 500_000_000)]
    threshold_lamports: u64,

    /// Amount to request (lamports)
    #[arg(long, default_value_t = 1_000_000_000)]
    airdrop_lamports: u64,
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

    println!("Wallet: {}", payer);
    println!("RPC:    {}", config.rpc_url);

    let options = FundOptions {
        threshold_lamports: args.threshold_lamports,
        airdrop_lamports: args.airdrop_lamports,
        ..FundOptions::default()
    };

    match client.ensure_funded(&options).await? {
        FundOutcome::AlreadyFunded { balance } => {
            println!(
                "\nBalance {} SOL is at or above {} SOL; no airdrop needed.",
                format_base_units(balance, 9),
                format_base_units(options.threshold_lamports, 9)
            );
        }
        FundOutcome::Airdropped {
            signature,
            previous_balance,
            balance,
        } => {
            println!(
                "\nAirdropped {} SOL ({} -> {} SOL)",
                format_base_units(options.airdrop_lamports, 9),
                format_base_units(previous_balance, 9),
                format_base_units(balance, 9)
            );
            println!("  {}", explorer_tx_url(signature, &config.cluster));
        }
    }
    println!("  {}", explorer_address_url(payer, &config.cluster));
    Ok(())
}
