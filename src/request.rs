use async_trait::async_trait;
use reqwest::Client;

use crate::{Error, Result};

/// Anything that can turn a page index into raw page HTML.
///
/// The scraping pipeline only talks to the archive through this trait, so
/// tests can swap the live source for canned pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, index: usize) -> Result<String>;
}

/// The live surname index, `{base_url}/i{index}.htm`.
///
/// One instance is shared by all workers for the duration of a run. The
/// inner `reqwest::Client` pools connections and is internally reference
/// counted, so sharing is cheap.
pub struct RecordSource {
    client: Client,
    base_url: String,
    max_page: usize,
}

impl RecordSource {
    pub fn new(base_url: impl Into<String>, max_page: usize) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            max_page,
        }
    }

    pub fn max_page(&self) -> usize {
        self.max_page
    }
}

#[async_trait]
impl PageFetcher for RecordSource {
    /// Requests an index page and returns its HTML.
    ///
    /// The index is validated against `1..=max_page` before any request is
    /// built, so an out-of-range index never touches the network.
    async fn fetch(&self, index: usize) -> Result<String> {
        if index < 1 || index > self.max_page {
            return Err(Error::PageOutOfRange {
                index,
                max_page: self.max_page,
            });
        }
        let response = self
            .client
            .get(format!("{}/i{index}.htm", self.base_url))
            .send()
            .await?;
        let html = response.text().await?;
        Ok(html)
    }
}
