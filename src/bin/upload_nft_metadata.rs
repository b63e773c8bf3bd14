//! NFT step 2: upload the metadata document referencing the image.

use std::process::ExitCode;

use clap::Parser;
use mintforge::cli;
use mintforge::config::{Config, StorageArgs};
use mintforge::program::utils::validate_metadata_uri;
use mintforge::storage::{
    default_nft_attributes, parse_attribute, HttpUploader, NftMetadataDocument, Uploader,
};

#[derive(Parser, Debug)]
#[command(about = "Upload an NFT metadata document and print its URI")]
struct Args {
    #[command(flatten)]
    storage: StorageArgs,

    /// URI printed by upload-image
    #[arg(long, env = "IMAGE_URI")]
    image_uri: String,

    /// Content type of the image
    #[arg(long, default_value = "image/png")]
    image_type: String,

    #[arg(long, default_value = "Forge #1")]
    name: String,

    #[arg(long, default_value = "FRG")]
    symbol: String,

    #[arg(long, default_value = "A one-of-one forged NFT")]
    description: String,

    /// Attribute as key=value; repeat to replace the default set
    #[arg(long = "attribute")]
    attributes: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    cli::init();
    cli::finish(run(Args::parse()).await)
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::default().with_storage(args.storage);
    validate_metadata_uri(&args.image_uri)?;

    let attributes = if args.attributes.is_empty() {
        default_nft_attributes()
    } else {
        args.attributes
            .iter()
            .map(|raw| parse_attribute(raw))
            .collect::<Result<Vec<_>, _>>()?
    };
    let document = NftMetadataDocument::new(
        args.name,
        args.symbol,
        args.description,
        args.image_uri,
        args.image_type,
        attributes,
    );

    let uploader = HttpUploader::from_config(&config)?;
    let uri = uploader
        .upload_json(&serde_json::to_value(&document)?)
        .await?;

    println!("Uploaded metadata for {:?}", document.name);
    println!("  Metadata URI: {}", uri);
    println!("\nNext: mint-nft --uri {}", uri);
    Ok(())
}
