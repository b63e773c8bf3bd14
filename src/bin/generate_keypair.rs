//! Generate a payer key file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mintforge::cli;
use mintforge::keys::generate_keypair_file;
use mintforge::network::DEFAULT_KEYPAIR_PATH;

#[derive(Parser, Debug)]
#[command(about = "Generate a keypair and save it as a JSON byte array")]
struct Args {
    /// Where to write the key file
    #[arg(long, env = "KEYPAIR_PATH", default_value = DEFAULT_KEYPAIR_PATH)]
    path: PathBuf,

    /// Replace an existing key file
    #[arg(long)]
    force: bool,
}

fn main() -> ExitCode {
    cli::init();
    cli::finish(run(Args::parse()))
}

fn run(args: Args) -> anyhow::Result<()> {
    let pubkey = generate_keypair_file(&args.path, args.force)?;

    println!("Generated new keypair");
    println!("  Public key: {}", pubkey);
    println!("  Saved to:   {}", args.path.display());
    println!("\nKeep this file secret. Anyone holding it controls the wallet.");
    Ok(())
}
