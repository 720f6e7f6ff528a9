//! Requesting account extractor
//!
//! Chat-platform account ids arrive in a header set by the bot front end.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::response::ApiError;

/// Header carrying the requesting chat-platform account id
pub const REQUESTER_HEADER: &str = "x-account-id";

/// Account id of whoever issued the request
#[derive(Debug, Clone)]
pub struct Requester(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for Requester
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let account = parts
            .headers
            .get(REQUESTER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ApiError::MissingHeader(REQUESTER_HEADER))?;

        Ok(Requester(account.to_string()))
    }
}
