//! Query parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use chrono::NaiveDate;
use streak_core::parse_date;
use streak_service::{DateQuery, SyncMode, SyncQuery};

use crate::response::ApiError;

/// Optional `?date=YYYY-MM-DD`; absent means "now"
#[derive(Debug, Clone, Copy, Default)]
pub struct DateParam(pub Option<NaiveDate>);

#[async_trait]
impl<S> FromRequestParts<S> for DateParam
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<DateQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        match query.date.as_deref().map(str::trim) {
            None | Some("") => Ok(DateParam(None)),
            Some(raw) => parse_date(raw)
                .map(|date| DateParam(Some(date)))
                .map_err(|_| ApiError::InvalidDate(raw.to_string())),
        }
    }
}

/// `?mode=normal|initial`, defaulting to normal
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeParam(pub SyncMode);

#[async_trait]
impl<S> FromRequestParts<S> for ModeParam
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<SyncQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Ok(ModeParam(query.mode))
    }
}
