//! DTOs for the image-search API.
//!
//! # Design
//! Field names on the wire follow the image-search API (`totalHits`,
//! `pageURL`, ...). The mock-server defines its own copies of these shapes;
//! the integration tests catch any drift between the two.

use serde::{Deserialize, Serialize};

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub total: u64,
    pub total_hits: u64,
    pub hits: Vec<Photo>,
}

/// A single image returned by a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: u64,
    #[serde(rename = "pageURL")]
    pub page_url: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Comma-separated tag list.
    pub tags: String,
    #[serde(rename = "previewURL")]
    pub preview_url: String,
    #[serde(rename = "previewWidth", default)]
    pub preview_width: u32,
    #[serde(rename = "previewHeight", default)]
    pub preview_height: u32,
    #[serde(rename = "webformatURL")]
    pub webformat_url: String,
    #[serde(rename = "largeImageURL", default, skip_serializing_if = "Option::is_none")]
    pub large_image_url: Option<String>,
    #[serde(rename = "imageWidth", default)]
    pub image_width: u32,
    #[serde(rename = "imageHeight", default)]
    pub image_height: u32,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub user: String,
}

impl Photo {
    pub fn tag_list(&self) -> impl Iterator<Item = &str> {
        self.tags.split(',').map(str::trim).filter(|t| !t.is_empty())
    }
}

/// Kind of image to search for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageType {
    #[default]
    All,
    Photo,
    Illustration,
    Vector,
}

impl ImageType {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageType::All => "all",
            ImageType::Photo => "photo",
            ImageType::Illustration => "illustration",
            ImageType::Vector => "vector",
        }
    }
}
