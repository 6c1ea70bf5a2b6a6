//! HTTP client for the embed-url route.
//!
//! One call per fetch: no retries, no caching, no locally enforced
//! timeout — timeout behavior is whatever the underlying HTTP stack and
//! server impose.

use serde::{Deserialize, Serialize};

use omni_embed_core::{EmbedUser, RawSelection};

use crate::error::EmbedClientError;

/// Wire body for `POST /api/embed-url`.
#[derive(Serialize)]
struct EmbedUrlBody<'a> {
    config: &'a RawSelection,
    user: &'a EmbedUser,
}

/// Response envelope shared by success and error answers.
#[derive(Deserialize)]
struct Envelope {
    success: bool,
    data: Option<UrlData>,
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct UrlData {
    url: String,
}

#[derive(Deserialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Client for the embed demo server.
#[derive(Debug, Clone)]
pub struct EmbedApi {
    base_url: String,
    http: reqwest::Client,
}

impl EmbedApi {
    /// Create a client for a server base URL (e.g. `http://127.0.0.1:3000`).
    ///
    /// # Errors
    ///
    /// Returns `EmbedClientError::Network` if the HTTP client cannot be
    /// constructed.
    pub fn new(base_url: &str) -> Result<Self, EmbedClientError> {
        let http = reqwest::Client::builder()
            .user_agent("omni-embed-client/0.1.0")
            .build()
            .map_err(EmbedClientError::Network)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http,
        })
    }

    /// Fetch a signed embed URL for one user/content pair.
    ///
    /// A non-success HTTP status and a `success:false` body are treated
    /// identically: both surface the server-provided code and message.
    ///
    /// # Errors
    ///
    /// Returns an [`EmbedClientError`] on network failure, an error
    /// envelope, or an unparseable body.
    pub async fn fetch_embed_url(
        &self,
        config: &RawSelection,
        user: &EmbedUser,
    ) -> Result<String, EmbedClientError> {
        let url = format!("{}/api/embed-url", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&EmbedUrlBody { config, user })
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        let envelope: Envelope = serde_json::from_str(&text).map_err(|_| {
            if status.is_success() {
                EmbedClientError::UnexpectedBody(truncate(&text))
            } else {
                EmbedClientError::Api {
                    code: format!("HTTP_{}", status.as_u16()),
                    message: status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_owned(),
                }
            }
        })?;

        if envelope.success {
            envelope
                .data
                .map(|d| d.url)
                .ok_or_else(|| EmbedClientError::UnexpectedBody(truncate(&text)))
        } else {
            let (code, message) = envelope.error.map_or_else(
                || (format!("HTTP_{}", status.as_u16()), "request failed".to_owned()),
                |e| (e.code, e.message),
            );
            Err(EmbedClientError::Api { code, message })
        }
    }
}

fn truncate(text: &str) -> String {
    text.chars().take(200).collect()
}
