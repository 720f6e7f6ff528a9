//! solved.ac HTTP client

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::instrument;

use streak_common::JudgeConfig;
use streak_core::error::DomainError;
use streak_core::traits::{JudgeClient, JudgeProfile, RepoResult, SolvedPage};

use crate::wire::{SearchPage, UserShow};

const USER_AGENT: &str = concat!("solve-streak/", env!("CARGO_PKG_VERSION"));

/// Client for the solved.ac v3 API
#[derive(Debug, Clone)]
pub struct SolvedAcClient {
    http: Client,
    base_url: String,
}

impl SolvedAcClient {
    /// Build a client from configuration
    ///
    /// # Errors
    /// Returns `DomainError::InternalError` if the HTTP client cannot be built
    pub fn new(config: &JudgeConfig) -> Result<Self, DomainError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DomainError::InternalError(format!("http client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T, Q>(&self, path: &str, query: &Q) -> RepoResult<T>
    where
        T: DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| DomainError::UpstreamError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, path, "Judge request rejected");
            return Err(DomainError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| DomainError::UpstreamError(format!("decode {path}: {e}")))
    }
}

#[async_trait]
impl JudgeClient for SolvedAcClient {
    #[instrument(skip(self))]
    async fn fetch_profile(&self, handle: &str) -> RepoResult<JudgeProfile> {
        let body: UserShow = self.get_json("/user/show", &[("handle", handle)]).await?;
        JudgeProfile::try_from(body)
    }

    #[instrument(skip(self))]
    async fn fetch_solved_page(&self, handle: &str, page: u32) -> RepoResult<SolvedPage> {
        let query = format!("@{handle}");
        let page = page.to_string();
        let body: SearchPage = self
            .get_json(
                "/search/problem",
                &[
                    ("query", query.as_str()),
                    ("direction", "asc"),
                    ("page", page.as_str()),
                    ("sort", "id"),
                ],
            )
            .await?;
        SolvedPage::try_from(body)
    }
}
