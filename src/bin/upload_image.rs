//! NFT step 1: upload the image.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use mintforge::cli;
use mintforge::config::{Config, StorageArgs};
use mintforge::storage::{content_type_for_path, HttpUploader, Uploader};

#[derive(Parser, Debug)]
#[command(about = "Upload an image and print its permanent URI")]
struct Args {
    #[command(flatten)]
    storage: StorageArgs,

    /// Image file to upload
    #[arg(long, env = "IMAGE_PATH", default_value = "assets/nft.png")]
    image: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    cli::init();
    cli::finish(run(Args::parse()).await)
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::default().with_storage(args.storage);
    let bytes = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("reading {}", args.image.display()))?;
    let content_type = content_type_for_path(&args.image);

    let uploader = HttpUploader::from_config(&config)?;
    let uri = uploader.upload(bytes, content_type).await?;

    println!("Uploaded {} ({})", args.image.display(), content_type);
    println!("  Image URI: {}", uri);
    println!("\nNext: upload-nft-metadata --image-uri {}", uri);
    Ok(())
}
