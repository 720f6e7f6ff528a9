//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers against the in-memory store and
//! a scripted judge, and for making HTTP requests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use mockito::{Matcher, Mock, ServerGuard};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use streak_api::{create_app, create_app_state};
use streak_common::AppConfig;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::fixtures::{judge_profile, judge_solved, ErrorBody, TaskResponse};

/// Header carrying the requesting account
pub const REQUESTER_HEADER: &str = "x-account-id";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    judge: ServerGuard,
    mocks: Vec<Mock>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        Self::start_with(&[]).await
    }

    /// Start a test server with extra configuration variables
    pub async fn start_with(overrides: &[(&str, &str)]) -> Result<Self> {
        let judge = mockito::Server::new_async().await;
        let config = test_config(&judge.url(), overrides)?;

        // Create app state
        let state = create_app_state(config).await?;

        // Build application
        let app = create_app(state);

        // Bind to an ephemeral port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        // Spawn server task
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Create HTTP client
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            judge,
            mocks: Vec::new(),
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    // ------------------------------------------------------------------
    // Judge stand-in
    // ------------------------------------------------------------------

    /// Serve a profile for `handle`
    pub async fn judge_profile(&mut self, handle: &str, tier: i64) {
        let mock = self
            .judge
            .mock("GET", "/user/show")
            .match_query(Matcher::UrlEncoded("handle".into(), handle.into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(judge_profile(handle, tier).to_string())
            .create_async()
            .await;
        self.mocks.push(mock);
    }

    /// Serve a solved-problem list for `handle`
    pub async fn judge_solved(&mut self, handle: &str, problems: &[(i64, i64)]) {
        let mock = self
            .judge
            .mock("GET", "/search/problem")
            .match_query(Matcher::UrlEncoded("query".into(), format!("@{handle}")))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(judge_solved(problems).to_string())
            .create_async()
            .await;
        self.mocks.push(mock);
    }

    // ------------------------------------------------------------------
    // Requests
    // ------------------------------------------------------------------

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request on behalf of an account
    pub async fn get_as(&self, path: &str, account_id: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .header(REQUESTER_HEADER, account_id)
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request without a body
    pub async fn post_empty(&self, path: &str) -> Result<Response> {
        Ok(self.client.post(self.url(path)).send().await?)
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.put(self.url(path)).json(body).send().await?)
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).send().await?)
    }

    /// Poll a background task until it leaves the running state
    pub async fn wait_for_task(&self, task_id: Uuid) -> Result<TaskResponse> {
        for _ in 0..100 {
            let response = self.get(&format!("/api/v1/tasks/{task_id}")).await?;
            let task: TaskResponse = assert_json(response, StatusCode::OK).await?;
            if task.state != "running" {
                return Ok(task);
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("Task {task_id} did not finish")
    }
}

/// Create a test configuration backed by the in-memory store
pub fn test_config(judge_url: &str, overrides: &[(&str, &str)]) -> Result<AppConfig> {
    let mut vars: HashMap<String, String> = [
        ("API_PORT", "0"),
        ("DATABASE_URL", "memory://"),
        ("JUDGE_TIMEOUT_SECS", "5"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    vars.insert("JUDGE_BASE_URL".to_string(), judge_url.to_string());
    for (key, value) in overrides {
        vars.insert((*key).to_string(), (*value).to_string());
    }

    AppConfig::from_lookup(|name| vars.get(name).cloned())
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}

/// Assert an error response with the given status and code
pub async fn assert_error(response: Response, expected_status: StatusCode, code: &str) -> Result<ErrorBody> {
    let body: ErrorBody = assert_json(response, expected_status).await?;
    if body.error.code != code {
        anyhow::bail!("Expected error code {}, got {}", code, body.error.code);
    }
    Ok(body)
}
