//! Create a Token-2022 mint carrying a transfer-fee extension.

use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use mintforge::cli;
use mintforge::client::{CreateMintRequest, TokenClient};
use mintforge::config::{Config, ConnectionArgs};
use mintforge::network::{explorer_address_url, explorer_tx_url};
use mintforge::program::types::TransferFeeParams;
use mintforge::program::utils::{format_base_units, to_base_units};

#[derive(Parser, Debug)]
#[command(about = "Create a Token-2022 mint that withholds a fee on every transfer")]
struct Args {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[arg(long, default_value_t = 9)]
    decimals: u8,

    /// Fee rate in basis points (100 = 1%)
    #[arg(long, default_value_t = 100)]
    fee_basis_points: u16,

    /// Maximum fee per transfer, in whole tokens
    #[arg(long, default_value_t = 1)]
    max_fee: u64,
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

    let maximum_fee = to_base_units(args.max_fee, args.decimals)?;
    let request = CreateMintRequest {
        decimals: args.decimals,
        freeze_authority: None,
        transfer_fee: Some(TransferFeeParams {
            basis_points: args.fee_basis_points,
            maximum_fee,
            config_authority: Some(payer),
            withdraw_authority: Some(payer),
        }),
    };
    let created = client.create_mint(&request).await?;

    println!("Created fee mint {}", created.mint);
    println!("  Decimals:     {}", args.decimals);
    println!(
        "  Transfer fee: {} bps, capped at {} tokens",
        args.fee_basis_points,
        format_base_units(maximum_fee, args.decimals)
    );
    println!("  Account size: {} bytes", created.account_size);
    println!("  {}", explorer_tx_url(created.signature, &config.cluster));
    println!("  {}", explorer_address_url(created.mint, &config.cluster));
    println!("\nNext: mint-tokens --mint {}", created.mint);
    Ok(())
}
