//! HTTP client for the upwait endpoint.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use upwait_core::model::{Item, PopularItem, VoteDirection};

/// Default endpoint when neither `--api-url` nor `UPWAIT_API_URL` is set.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8787/api/updates";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors talking to the endpoint.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, timeout, or body decoding failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("server returned {status}: {message}")]
    Status { status: StatusCode, message: String },
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct SuggestBody {
    suggestions: Vec<Item>,
}

#[derive(Deserialize)]
struct TrendingBody {
    trending: Vec<Item>,
}

#[derive(Deserialize)]
struct PopularBody {
    popular: Vec<PopularItem>,
}

#[derive(Serialize)]
struct VoteBody<'a> {
    name: &'a str,
    #[serde(rename = "voteType")]
    vote_type: VoteDirection,
}

/// Typed client for one endpoint URL.
#[derive(Debug, Clone)]
pub struct UpwaitClient {
    http: Client,
    api_url: String,
}

impl UpwaitClient {
    /// Build a client for `api_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(api_url: &str) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_url: api_url.to_string(),
        })
    }

    /// Exact lookup. `Ok(None)` when the endpoint answers 404.
    ///
    /// # Errors
    ///
    /// Transport failures and any other non-2xx status.
    pub async fn search(&self, name: &str) -> Result<Option<Item>, ClientError> {
        let response = self
            .http
            .get(&self.api_url)
            .query(&[("search", name)])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(response).await.map(Some)
    }

    /// Ranked suggestions for a partial name.
    ///
    /// # Errors
    ///
    /// Transport failures and non-2xx statuses.
    pub async fn suggest(&self, term: &str) -> Result<Vec<Item>, ClientError> {
        let body: SuggestBody = self.get_with(&[("suggest", term)]).await?;
        Ok(body.suggestions)
    }

    /// Most recently voted items.
    ///
    /// # Errors
    ///
    /// Transport failures and non-2xx statuses.
    pub async fn trending(&self) -> Result<Vec<Item>, ClientError> {
        let body: TrendingBody = self.get_with(&[("trending", "")]).await?;
        Ok(body.trending)
    }

    /// Most voted items.
    ///
    /// # Errors
    ///
    /// Transport failures and non-2xx statuses.
    pub async fn popular(&self) -> Result<Vec<PopularItem>, ClientError> {
        let body: PopularBody = self.get_with(&[("popular_devices", "")]).await?;
        Ok(body.popular)
    }

    /// Cast one vote and return the updated item.
    ///
    /// # Errors
    ///
    /// Transport failures and non-2xx statuses.
    pub async fn vote(&self, name: &str, direction: VoteDirection) -> Result<Item, ClientError> {
        let response = self
            .http
            .post(&self.api_url)
            .json(&VoteBody {
                name,
                vote_type: direction,
            })
            .send()
            .await?;
        decode(response).await
    }

    async fn get_with<T: DeserializeOwned>(&self, query: &[(&str, &str)]) -> Result<T, ClientError> {
        let response = self.http.get(&self.api_url).query(query).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    Err(ClientError::Status { status, message })
}
