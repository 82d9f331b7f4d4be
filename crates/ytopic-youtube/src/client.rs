//! HTTP client for the `YouTube` Data API v3.
//!
//! Wraps `reqwest` with API key management, typed response deserialization,
//! and error-envelope detection. `YouTube` reports failures as a JSON body of
//! the form `{"error": {"code": 403, "message": "..."}}`, usually alongside a
//! 4xx status; those surface as [`YoutubeError::Api`] with the message passed
//! through.

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, Url};

use crate::error::YoutubeError;
use crate::types::{SearchListResponse, Video, VideoListResponse};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Page size for `search` and `videos`; also the API maximum.
pub const MAX_RESULTS: u32 = 50;

/// Client for the `YouTube` Data API.
///
/// Use [`YoutubeClient::new`] for production or
/// [`YoutubeClient::with_base_url`] to point at a mock server in tests.
#[derive(Clone)]
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for YoutubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoutubeClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl YoutubeClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YoutubeError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("ytopic/0.1 (keyword-analysis)")
            .build()?;

        // Exactly one trailing slash so `Url::join` appends the endpoint
        // instead of replacing the last path segment (`/youtube/v3`).
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| YoutubeError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: parsed,
        })
    }

    /// Searches videos matching `query` published after `published_after`.
    ///
    /// Returns up to [`MAX_RESULTS`] video ids in relevance order. Non-video
    /// hits are dropped.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::Api`] if the response carries an error object.
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn search_video_ids(
        &self,
        query: &str,
        published_after: DateTime<Utc>,
    ) -> Result<Vec<String>, YoutubeError> {
        let published_after = published_after.to_rfc3339_opts(SecondsFormat::Secs, true);
        let max_results = MAX_RESULTS.to_string();
        let url = self.build_url(
            "search",
            &[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", &max_results),
                ("publishedAfter", &published_after),
            ],
        )?;

        let body = self.request_json("search", url).await?;
        let parsed: SearchListResponse =
            serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                context: format!("search(q={query})"),
                source: e,
            })?;

        let ids: Vec<String> = parsed
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .filter(|id| !id.is_empty())
            .collect();

        tracing::debug!(query, count = ids.len(), "youtube search returned video ids");
        Ok(ids)
    }

    /// Fetches snippet, statistics and content details for `ids`.
    ///
    /// An empty id list returns an empty result without a request.
    ///
    /// # Errors
    ///
    /// Same as [`YoutubeClient::search_video_ids`].
    pub async fn list_videos(&self, ids: &[String]) -> Result<Vec<Video>, YoutubeError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids.join(",");
        let url = self.build_url(
            "videos",
            &[("part", "snippet,statistics,contentDetails"), ("id", &joined)],
        )?;

        let body = self.request_json("videos", url).await?;
        let parsed: VideoListResponse =
            serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                context: format!("videos(ids={})", ids.len()),
                source: e,
            })?;

        Ok(parsed.items)
    }

    /// Fetches the most-popular chart for `region_code` (e.g. `"KR"`).
    ///
    /// # Errors
    ///
    /// Same as [`YoutubeClient::search_video_ids`].
    pub async fn most_popular(
        &self,
        region_code: &str,
        max_results: u32,
    ) -> Result<Vec<Video>, YoutubeError> {
        let max_results = max_results.clamp(1, MAX_RESULTS).to_string();
        let url = self.build_url(
            "videos",
            &[
                ("part", "snippet,statistics,contentDetails"),
                ("chart", "mostPopular"),
                ("regionCode", region_code),
                ("maxResults", &max_results),
            ],
        )?;

        let body = self.request_json("videos", url).await?;
        let parsed: VideoListResponse =
            serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                context: format!("videos(chart=mostPopular, region={region_code})"),
                source: e,
            })?;

        Ok(parsed.items)
    }

    /// Builds `<base>/<endpoint>?<params>&key=<api key>` with every value
    /// percent-encoded.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, YoutubeError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| YoutubeError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request and returns the JSON body.
    ///
    /// The error envelope is checked before the HTTP status so the API's own
    /// message wins over a bare status code.
    async fn request_json(
        &self,
        endpoint: &str,
        url: Url,
    ) -> Result<serde_json::Value, YoutubeError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        let body: serde_json::Value = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(YoutubeError::UnexpectedStatus {
                    status: status.as_u16(),
                    endpoint: endpoint.to_string(),
                });
            }
            Err(e) => {
                return Err(YoutubeError::Deserialize {
                    context: endpoint.to_string(),
                    source: e,
                });
            }
        };

        Self::check_api_error(&body)?;

        if !status.is_success() {
            return Err(YoutubeError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        Ok(body)
    }

    fn check_api_error(body: &serde_json::Value) -> Result<(), YoutubeError> {
        let Some(error) = body.get("error") else {
            return Ok(());
        };
        if error.is_null() {
            return Ok(());
        }
        let message = error
            .get("message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        tracing::warn!(message = %message, "youtube api returned an error");
        Err(YoutubeError::Api(message))
    }
}
