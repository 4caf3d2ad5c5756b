use crate::error::SubmitError;
use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE, redirect::Policy};
use std::time::Duration;

/// Raw response from the spreadsheet endpoint; interpretation happens in the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The two request shapes the submission client needs. Implementations follow
/// redirects: Apps Script answers every call with a 302 to the rendered output.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` as `application/x-www-form-urlencoded`.
    async fn post_form(&self, url: &str, body: String) -> Result<TransportResponse, SubmitError>;

    async fn get(&self, url: &str) -> Result<TransportResponse, SubmitError>;
}

/// [`Transport`] over `reqwest`, with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(10))
            .build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    async fn read(response: reqwest::Response) -> Result<TransportResponse, SubmitError> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;
        Ok(TransportResponse { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_form(&self, url: &str, body: String) -> Result<TransportResponse, SubmitError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::read(response).await
    }

    async fn get(&self, url: &str) -> Result<TransportResponse, SubmitError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::read(response).await
    }
}

/// The URL is stripped: on the GET fallback it carries the whole form payload.
fn map_reqwest_error(err: reqwest::Error) -> SubmitError {
    let err = err.without_url();
    if err.is_timeout() {
        SubmitError::Timeout
    } else if err.is_connect() {
        SubmitError::Unreachable(err.to_string())
    } else {
        SubmitError::Transport(err.to_string())
    }
}
