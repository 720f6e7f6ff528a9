//! Path parameter extractors
//!
//! Typed extraction of member and task ids from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use std::collections::HashMap;
use streak_core::MemberId;
use uuid::Uuid;

use crate::response::ApiError;

/// Read one named segment from the matched route
async fn segment<S>(parts: &mut Parts, state: &S, name: &'static str) -> Result<String, ApiError>
where
    S: Send + Sync,
{
    let Path(mut params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
        .await
        .map_err(|e| ApiError::invalid_path(e.body_text()))?;

    params
        .remove(name)
        .ok_or_else(|| ApiError::invalid_path(format!("Missing {name}")))
}

/// `:member_id` parsed as a [`MemberId`]
#[derive(Debug, Clone, Copy)]
pub struct MemberIdPath(pub MemberId);

#[async_trait]
impl<S> FromRequestParts<S> for MemberIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = segment(parts, state, "member_id").await?;
        MemberId::parse(&raw)
            .map(MemberIdPath)
            .map_err(|_| ApiError::invalid_path("Invalid member_id format"))
    }
}

/// `:task_id` parsed as a UUID
#[derive(Debug, Clone, Copy)]
pub struct TaskIdPath(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for TaskIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = segment(parts, state, "task_id").await?;
        Uuid::parse_str(&raw)
            .map(TaskIdPath)
            .map_err(|_| ApiError::invalid_path("Invalid task_id format"))
    }
}
