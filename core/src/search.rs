//! Image-search client built on the request executor.
//!
//! # Design
//! `PhotoSearch` holds only its configuration. `build_endpoint` turns a
//! query into the endpoint string the executor expects, rejecting empty input
//! before anything touches the network. `search` runs that endpoint through
//! the callback convention's `execute`.

use serde::Deserialize;
use url::Url;

use crate::codec::JsonCodec;
use crate::error::{QueryError, SearchError};
use crate::executor::RequestExecutor;
use crate::http::HttpMethod;
use crate::transport::Transport;
use crate::types::{ImageType, SearchResponse};

pub const DEFAULT_BASE_URL: &str = "https://pixabay.com/api/";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Where to search and with which key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub api_key: String,
}

impl SearchConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// A single search request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    pub term: String,
    pub image_type: Option<ImageType>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    pub fn image_type(mut self, image_type: ImageType) -> Self {
        self.image_type = Some(image_type);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }
}

#[derive(Debug, Clone)]
pub struct PhotoSearch {
    config: SearchConfig,
}

impl PhotoSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Build the endpoint URL for `query`.
    ///
    /// The term is trimmed; an empty term is rejected. A trailing `?` on the
    /// configured base URL is tolerated.
    pub fn build_endpoint(&self, query: &SearchQuery) -> Result<String, QueryError> {
        let term = query.term.trim();
        if term.is_empty() {
            return Err(QueryError::EmptyInput);
        }

        let base = self.config.base_url.trim_end_matches(['?', '&']);
        let mut url = Url::parse(base).map_err(|e| QueryError::InvalidBaseUrl(e.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.config.api_key);
            pairs.append_pair("q", term);
            if let Some(image_type) = query.image_type {
                pairs.append_pair("image_type", image_type.as_str());
            }
            if let Some(page) = query.page {
                pairs.append_pair("page", &page.to_string());
            }
            if let Some(per_page) = query.per_page {
                pairs.append_pair("per_page", &per_page.to_string());
            }
        }
        Ok(url.into())
    }

    pub async fn search<X, J>(
        &self,
        executor: &RequestExecutor<X, J>,
        query: &SearchQuery,
    ) -> Result<SearchResponse, SearchError>
    where
        X: Transport,
        J: JsonCodec,
    {
        let endpoint = self.build_endpoint(query)?;
        Ok(executor.execute(&endpoint, HttpMethod::Get).await?)
    }
}
