use reqwest::Client;
use serde::de::DeserializeOwned;
use std::future::Future;

use crate::errors::SubmissionError;
use crate::models::FormSubmission;

/// Endpoint computing the premium.
pub const CALCUL_PRIME_PATH: &str = "/calcul_prime";

/// Sends a submission to the server.
///
/// Sending and reading the body are separate steps so a caller can look at the
/// status before any parsing happens.
pub trait Transport: Send + Sync {
    type Response: TransportResponse;

    /// POSTs `body` as JSON to `path`.
    fn post_json(
        &self,
        path: &str,
        body: &FormSubmission,
    ) -> impl Future<Output = Result<Self::Response, SubmissionError>> + Send;
}

pub trait TransportResponse: Send {
    fn status(&self) -> u16;

    fn is_success(&self) -> bool {
        (200..300).contains(&self.status())
    }

    /// Parses the body as JSON.
    fn json<T: DeserializeOwned>(self) -> impl Future<Output = Result<T, SubmissionError>> + Send;
}

/// Talks to a running simulator server over HTTP.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    type Response = reqwest::Response;

    async fn post_json(
        &self,
        path: &str,
        body: &FormSubmission,
    ) -> Result<reqwest::Response, SubmissionError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("POST {}", url);

        // `json` sets `Content-Type: application/json`.
        let response = self.client.post(&url).json(body).send().await?;
        log::debug!("Response status from {}: {}", url, response.status());
        Ok(response)
    }
}

impl TransportResponse for reqwest::Response {
    fn status(&self) -> u16 {
        reqwest::Response::status(self).as_u16()
    }

    async fn json<T: DeserializeOwned>(self) -> Result<T, SubmissionError> {
        let bytes = self.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
