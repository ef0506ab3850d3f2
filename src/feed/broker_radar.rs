use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::feed::{FeedError, QuoteSource, SpreadQuote};

#[derive(Debug, Deserialize)]
struct SpreadsResponse {
    best_spreads: Vec<SpreadQuote>,
}

/// HTTP client for the public best-spreads endpoint.
pub struct BrokerRadarClient {
    client: Client,
    url: String,
}

impl BrokerRadarClient {
    pub fn new(cfg: &Config) -> Result<Self, FeedError> {
        let client = Client::builder().timeout(cfg.request_timeout()).build()?;
        Ok(Self {
            client,
            url: cfg.quote_url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Decodes a `{ "best_spreads": [...] }` body.
pub fn parse_spreads(body: &str) -> Result<Vec<SpreadQuote>, FeedError> {
    let data: SpreadsResponse = serde_json::from_str(body)?;
    Ok(data.best_spreads)
}

#[async_trait]
impl QuoteSource for BrokerRadarClient {
    async fn fetch_spreads(&self) -> Result<Vec<SpreadQuote>, FeedError> {
        let resp = self.client.get(&self.url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FeedError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let spreads = parse_spreads(&body)?;
        debug!("Quote service returned {} spreads", spreads.len());
        Ok(spreads)
    }
}
