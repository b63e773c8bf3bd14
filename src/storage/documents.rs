//! Off-chain metadata documents.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ToolError, ToolResult};

/// Document referenced by a fungible token's metadata URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FungibleMetadataDocument {
    pub name: String,
    pub symbol: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftFile {
    pub uri: String,
    #[serde(rename = "type")]
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftProperties {
    pub files: Vec<NftFile>,
    pub category: String,
}

/// Document referenced by an NFT's metadata URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftMetadataDocument {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image: String,
    pub attributes: Vec<Attribute>,
    pub properties: NftProperties,
}

impl NftMetadataDocument {
    /// Build an image NFT document; the image is also listed under `properties.files`.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        description: impl Into<String>,
        image_uri: impl Into<String>,
        image_content_type: impl Into<String>,
        attributes: Vec<Attribute>,
    ) -> Self {
        let image = image_uri.into();
        Self {
            name: name.into(),
            symbol: symbol.into(),
            description: description.into(),
            image: image.clone(),
            attributes,
            properties: NftProperties {
                files: vec![NftFile {
                    uri: image,
                    content_type: image_content_type.into(),
                }],
                category: "image".to_string(),
            },
        }
    }
}

pub fn default_nft_attributes() -> Vec<Attribute> {
    [("Background", "Blue"), ("Rarity", "Common"), ("Edition", "1")]
        .into_iter()
        .map(|(trait_type, value)| Attribute {
            trait_type: trait_type.to_string(),
            value: value.to_string(),
        })
        .collect()
}

/// Parse a `key=value` attribute flag.
pub fn parse_attribute(raw: &str) -> ToolResult<Attribute> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok(Attribute {
            trait_type: key.trim().to_string(),
            value: value.trim().to_string(),
        }),
        _ => Err(ToolError::Validation(format!(
            "attribute {:?} must look like key=value",
            raw
        ))),
    }
}

/// Content type inferred from a file extension.
pub fn content_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}
