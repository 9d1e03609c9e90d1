use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use upwait_core::model::{Item, PopularItem, VoteDirection};

use crate::{
    error::ApiError,
    state::{with_services, AppState},
};

#[derive(Serialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<Item>,
}

#[derive(Serialize)]
pub struct TrendingResponse {
    pub trending: Vec<Item>,
}

#[derive(Serialize)]
pub struct PopularResponse {
    pub popular: Vec<PopularItem>,
}

/// Body of a vote request.
///
/// Both fields are optional here so that a missing field and a wrong value
/// produce the same 400 instead of a deserializer-specific rejection.
#[derive(Deserialize)]
pub struct VoteRequest {
    name: Option<String>,
    #[serde(rename = "voteType")]
    vote_type: Option<String>,
}

impl VoteRequest {
    fn validate(self) -> Result<(String, VoteDirection), ApiError> {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(ApiError::invalid_vote)?;
        let direction = self
            .vote_type
            .as_deref()
            .and_then(|v| v.parse().ok())
            .ok_or_else(ApiError::invalid_vote)?;

        Ok((name, direction))
    }
}

/// Dispatch a GET on its query parameter.
///
/// Precedence: `suggest`, `trending`, `popular_devices`, then `search`.
#[tracing::instrument(skip(state))]
pub async fn query_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    if let Some(term) = params.get("suggest").cloned() {
        let suggestions = with_services(state, move |s| s.queries().suggest(&term)).await?;
        return Ok(Json(SuggestResponse { suggestions }).into_response());
    }

    if params.contains_key("trending") {
        let trending = with_services(state, |s| s.queries().trending()).await?;
        return Ok(Json(TrendingResponse { trending }).into_response());
    }

    if params.contains_key("popular_devices") {
        let popular = with_services(state, |s| s.queries().popular_devices()).await?;
        return Ok(Json(PopularResponse { popular }).into_response());
    }

    let term = params
        .get("search")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(ApiError::search_term_required)?;

    let item = with_services(state, move |s| s.queries().lookup_exact(&term)).await?;
    Ok(Json(item).into_response())
}

#[tracing::instrument(skip(state, body))]
pub async fn vote_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Item>, ApiError> {
    let request: VoteRequest =
        serde_json::from_slice(&body).map_err(|_| ApiError::invalid_vote())?;
    let (name, direction) = request.validate()?;

    let item = with_services(state, move |s| s.votes().cast(&name, direction)).await?;
    Ok(Json(item))
}

pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
