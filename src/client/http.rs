//! # HTTP Auction API Client
//!
//! reqwest implementation of [`AuctionApi`] against the auction results backend.

use super::error::{ClientError, ClientResult};
use super::traits::{AuctionApi, Credentials};
use crate::config::ApiConfig;
use crate::constants::endpoints;
use crate::models::{AuctionResultSet, JobId, JobSnapshot, JobTicket};
use async_trait::async_trait;
use reqwest::{header, Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct HttpAuctionApi {
    client: Client,
    base_url: Url,
}

impl std::fmt::Debug for HttpAuctionApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAuctionApi")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl HttpAuctionApi {
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let base_url = normalize_base_url(&config.base_url)?;
        let client = Client::builder().timeout(config.timeout()).build()?;

        debug!(base_url = %base_url, timeout_ms = config.timeout_ms, "Created HttpAuctionApi");

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("{path}: {e}")))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            return Ok(serde_json::from_str(&body)?);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ClientError::from_response_body(status.as_u16(), &body);
        warn!(status = status.as_u16(), error = %error, "Backend returned an error response");
        Err(error)
    }
}

/// Parse the base URL and make sure relative joins append to its path
fn normalize_base_url(raw: &str) -> ClientResult<Url> {
    let mut url = Url::parse(raw).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[async_trait]
impl AuctionApi for HttpAuctionApi {
    async fn list_auction_results(&self) -> ClientResult<Vec<AuctionResultSet>> {
        let url = self.endpoint(endpoints::AUCTION_RESULTS)?;
        debug!(url = %url, "Fetching auction results");

        let response = self.client.get(url).send().await?;
        Self::decode(response).await
    }

    async fn submit_refresh(&self, credentials: &Credentials) -> ClientResult<JobTicket> {
        let url = self.endpoint(endpoints::REFRESH)?;
        debug!(url = %url, has_token = credentials.csrf_token().is_some(), "Submitting refresh job");

        let mut request = self.client.post(url).json(&serde_json::json!({}));
        if let Some(token) = credentials.csrf_token() {
            request = request
                .header(endpoints::CSRF_HEADER, token)
                .header(header::COOKIE, format!("{}={token}", endpoints::CSRF_COOKIE));
        }

        let response = request.send().await?;
        Self::decode(response).await
    }

    async fn job_status(&self, job_id: &JobId) -> ClientResult<JobSnapshot> {
        let url = self.endpoint(&format!("{}/{}", endpoints::TASKS, job_id))?;
        debug!(url = %url, job_id = %job_id, "Checking job status");

        let response = self.client.get(url).send().await?;
        Self::decode(response).await
    }
}
