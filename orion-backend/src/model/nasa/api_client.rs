///! NASA API client for the NeoWs feed and APOD endpoints
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use orion_common::{ApodEntry, Feed};
use reqwest::Url;
use std::time::Duration;

use super::error::FeedError;
use super::schema::{decode_apod, decode_feed};
use crate::config::NasaConfig;

/// Widest inclusive window the feed endpoint accepts in one request
pub const MAX_FEED_WINDOW_DAYS: i64 = 7;

/// Source of NEO feed data
#[async_trait]
pub trait NeoSource: Send + Sync {
    /// Fetch the feed for `[start, end]` inclusive.
    async fn fetch_feed(&self, start: NaiveDate, end: NaiveDate) -> Result<Feed, FeedError>;
}

/// Source of the Astronomy Picture of the Day
#[async_trait]
pub trait ApodSource: Send + Sync {
    async fn fetch_apod(&self) -> Result<ApodEntry, FeedError>;
}

/// Reject inverted ranges and windows wider than the upstream allows.
pub fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<(), FeedError> {
    let reason = if end < start {
        Some("end date precedes start date".to_string())
    } else if (end - start).num_days() + 1 > MAX_FEED_WINDOW_DAYS {
        Some(format!("window exceeds {} days", MAX_FEED_WINDOW_DAYS))
    } else {
        None
    };

    match reason {
        Some(reason) => Err(FeedError::InvalidRange { start, end, reason }),
        None => Ok(()),
    }
}

/// HTTP client for `api.nasa.gov`
#[derive(Debug, Clone)]
pub struct NasaClient {
    client: reqwest::Client,
    api_key: String,
    apod_base_url: String,
    neo_base_url: String,
}

impl NasaClient {
    pub fn new(config: &NasaConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("orion-backend/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            apod_base_url: config.apod_base_url.trim_end_matches('/').to_string(),
            neo_base_url: config.neo_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn feed_endpoint(&self) -> String {
        format!("{}/feed", self.neo_base_url)
    }

    /// GET `endpoint` with query `params` plus the API key and return the body.
    ///
    /// `endpoint` is used in errors and logs; the key never is.
    async fn get_body(&self, endpoint: &str, params: &[(&str, String)]) -> Result<String, FeedError> {
        let mut query: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        query.push(("api_key", self.api_key.as_str()));

        let url = Url::parse_with_params(endpoint, &query)
            .map_err(|e| FeedError::transport(endpoint, format!("invalid endpoint URL: {}", e)))?;

        tracing::debug!("GET {}", endpoint);

        let response = self.client.get(url).send().await.map_err(|e| FeedError::Transport {
            endpoint: endpoint.to_string(),
            status: e.status().map(|s| s.as_u16()),
            message: e.without_url().to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Transport {
                endpoint: endpoint.to_string(),
                status: Some(status.as_u16()),
                message: status.canonical_reason().unwrap_or("unexpected status").to_string(),
            });
        }

        response.text().await.map_err(|e| FeedError::Transport {
            endpoint: endpoint.to_string(),
            status: Some(status.as_u16()),
            message: format!("failed to read body: {}", e.without_url()),
        })
    }
}

#[async_trait]
impl NeoSource for NasaClient {
    async fn fetch_feed(&self, start: NaiveDate, end: NaiveDate) -> Result<Feed, FeedError> {
        validate_range(start, end)?;

        let endpoint = self.feed_endpoint();
        let params = [
            ("start_date", start.format("%Y-%m-%d").to_string()),
            ("end_date", end.format("%Y-%m-%d").to_string()),
        ];
        let body = self.get_body(&endpoint, &params).await?;

        let feed = decode_feed(&body).map_err(|message| FeedError::Validation {
            endpoint: endpoint.clone(),
            message,
        })?;

        tracing::debug!(
            "Fetched feed {}..={}: {} objects over {} days",
            start,
            end,
            feed.element_count,
            feed.near_earth_objects.len()
        );
        Ok(feed)
    }
}

#[async_trait]
impl ApodSource for NasaClient {
    async fn fetch_apod(&self) -> Result<ApodEntry, FeedError> {
        let endpoint = self.apod_base_url.clone();
        let body = self.get_body(&endpoint, &[]).await?;

        let apod = decode_apod(&body).map_err(|message| FeedError::Validation {
            endpoint: endpoint.clone(),
            message,
        })?;

        tracing::debug!("Fetched APOD for {}: {}", apod.date, apod.title);
        Ok(apod)
    }
}
