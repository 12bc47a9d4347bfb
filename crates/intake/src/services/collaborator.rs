//! Delivery of submissions to the remote storage endpoint.
//!
//! `Collaborator` is the seam between the workflow and the network. The
//! production implementation is `HttpCollaborator` (reqwest); tests plug in
//! an in-memory fake.

use std::future::Future;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::domain::SubmissionPayload;

pub const DEFAULT_ENDPOINT: &str = "https://sheetdb.io/api/v1/7gy6ue89nrnhs";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("endpoint answered {0}")]
    Status(StatusCode),
}

pub trait Collaborator: Send + Sync + 'static {
    /// Deliver one payload. Resolves once the endpoint answered; there is
    /// no timeout.
    fn submit(
        &self,
        payload: SubmissionPayload,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpCollaborator {
    client: Client,
    endpoint: String,
}

impl HttpCollaborator {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl Collaborator for HttpCollaborator {
    fn submit(
        &self,
        payload: SubmissionPayload,
    ) -> impl Future<Output = Result<(), TransportError>> + Send {
        let request = self.client.post(self.endpoint.as_str()).json(&payload);
        let endpoint = self.endpoint.clone();
        async move {
            let response = request.send().await?;
            let status = response.status();
            if status.is_success() {
                debug!(%endpoint, %status, "submission accepted");
                Ok(())
            } else {
                warn!(%endpoint, %status, "submission rejected");
                Err(TransportError::Status(status))
            }
        }
    }
}
