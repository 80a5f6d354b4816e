//! HTTP access to the product list endpoint

use reqwest::Client;
use shared::ProductPage;

use crate::config::Config;
use crate::error::{FetchError, FetchResult};

/// Thin client for the paginated product list endpoint.
///
/// Pages are addressed as `{base}/{api_key}/{page_number}/{page_size}`.
/// The embedded payload status is not interpreted here; the paginator
/// decides whether to accept a decoded page.
#[derive(Debug, Clone)]
pub struct ProductsApi {
    client: Client,
    base_url: String,
    api_key: String,
    page_size: u32,
}

impl ProductsApi {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            page_size: config.page_size,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    fn page_url(&self, page_number: u32) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url, self.api_key, page_number, self.page_size
        )
    }

    /// Fetch one page starting at the given record number.
    pub async fn fetch_page(&self, page_number: u32) -> FetchResult<ProductPage> {
        let url = self.page_url(page_number);
        tracing::debug!(%url, "requesting product page");

        let response = self.client.get(&url).send().await?;
        let bytes = response.bytes().await?;

        if bytes.is_empty() {
            return Err(FetchError::EmptyPayload);
        }

        let page: ProductPage = serde_json::from_slice(&bytes)?;
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn api(base_url: &str) -> ProductsApi {
        let config = Config::new(base_url, "test-key", "/tmp/cache")
            .with_page_size(25)
            .with_timeout(Duration::from_secs(5));
        ProductsApi::new(&config)
    }

    #[test]
    fn composes_page_url() {
        let api = api("https://host/api/products/v1");
        assert_eq!(
            api.page_url(26),
            "https://host/api/products/v1/test-key/26/25"
        );
    }

    #[test]
    fn trims_trailing_slash_from_base() {
        let api = api("https://host/api/products/v1/");
        assert_eq!(
            api.page_url(1),
            "https://host/api/products/v1/test-key/1/25"
        );
    }
}
