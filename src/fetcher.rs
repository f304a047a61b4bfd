use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{AccessPath, FeedConfig};
use crate::error::SiteResult;
use crate::parser;
use crate::post::PostRecord;

/// Why a single access path, or the whole fetch, came up empty.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with {status}")]
    BadResponse { url: String, status: StatusCode },

    #[error("no posts could be parsed from {url}")]
    ParseMiss { url: String },

    #[error("feed unavailable after trying {attempts} access paths")]
    Unavailable { attempts: usize },
}

pub struct Fetcher {
    client: Client,
    feed_url: String,
    access_paths: Vec<AccessPath>,
}

impl Fetcher {
    pub fn new(config: &FeedConfig) -> SiteResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent("AdjacentSite/1.0 (Recent Posts)")
            .build()?;

        Ok(Self {
            client,
            feed_url: config.url.clone(),
            access_paths: config.access_paths.clone(),
        })
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// Try each access path in order and return the first non-empty result.
    ///
    /// Paths are attempted one at a time with no retries.
    pub async fn fetch_posts(&self) -> Result<Vec<PostRecord>, FeedError> {
        for path in &self.access_paths {
            match self.attempt(path).await {
                Ok(posts) => {
                    debug!("Loaded {} posts via {:?}", posts.len(), path);
                    return Ok(posts);
                }
                Err(e) => warn!("Access path {:?} failed: {}", path, e),
            }
        }

        Err(FeedError::Unavailable {
            attempts: self.access_paths.len(),
        })
    }

    async fn attempt(&self, path: &AccessPath) -> Result<Vec<PostRecord>, FeedError> {
        let url = path.url_for(&self.feed_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FeedError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::BadResponse { url, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FeedError::Transport {
                url: url.clone(),
                source,
            })?;

        let posts = parser::parse(&body);
        if posts.is_empty() {
            return Err(FeedError::ParseMiss { url });
        }

        Ok(posts)
    }
}
