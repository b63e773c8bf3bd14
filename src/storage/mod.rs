//! Content-addressed uploads and the metadata documents stored there.

pub mod client;
pub mod documents;
pub mod retry;

pub use client::HttpUploader;
pub use documents::{
    content_type_for_path, default_nft_attributes, parse_attribute, Attribute,
    FungibleMetadataDocument, NftFile, NftMetadataDocument, NftProperties,
};
pub use retry::{RetryConfig, RetryPolicy};

use async_trait::async_trait;

use crate::error::ToolResult;

/// A store that accepts bytes and answers with a permanent URI.
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Upload raw bytes, returning the URI they can be fetched from.
    async fn upload(&self, bytes: Vec<u8>, content_type: &str) -> ToolResult<String>;

    /// Upload a JSON document.
    async fn upload_json(&self, document: &serde_json::Value) -> ToolResult<String> {
        let bytes = serde_json::to_vec(document)?;
        self.upload(bytes, "application/json").await
    }
}
